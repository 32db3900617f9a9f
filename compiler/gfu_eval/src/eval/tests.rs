use super::*;
use gfu_diagnostic::{buffer_sink, silent_sink, Dump};
use gfu_ir::Pos;
use pretty_assertions::assert_eq;

fn context() -> (G, Env) {
    let g = G::builder().sink(silent_sink()).out(silent_sink()).build();
    let env = g.root_env().child();
    (g, env)
}

fn eval(g: &G, env: &Env, source: &str) -> Result<Val, E> {
    g.eval_string(Pos::new("test"), source, env)
}

fn rendered(source: &str) -> String {
    let (g, env) = context();
    match eval(&g, &env, source) {
        Ok(val) => val.to_string(),
        Err(e) => e.to_string(),
    }
}

#[test]
fn empty_sequence_is_nil() {
    let (g, env) = context();
    assert_eq!(eval_forms(&g, &[], &env).unwrap(), Val::Nil);
}

#[test]
fn literals_evaluate_to_themselves() {
    assert_eq!(rendered("_"), "_");
    assert_eq!(rendered("T"), "T");
    assert_eq!(rendered("F"), "F");
    assert_eq!(rendered("-12"), "-12");
}

#[test]
fn last_value_wins() {
    assert_eq!(rendered("1 2 3"), "3");
}

#[test]
fn identifiers_resolve_through_env() {
    let (g, env) = context();
    env.define(&g.intern("x"), Val::Int(7));
    let inner = env.child();
    assert_eq!(eval(&g, &inner, "x").unwrap(), Val::Int(7));
}

#[test]
fn unknown_identifier() {
    assert_eq!(rendered("nope"), "Error: Unknown id: nope");
}

#[test]
fn first_error_stops_evaluation() {
    let out = buffer_sink();
    let g = G::builder().sink(silent_sink()).out(out.clone()).build();
    let env = g.root_env().child();
    let e = eval(&g, &env, "(dump 1) missing (dump 2)").unwrap_err();
    assert_eq!(e.message(), "Error: Unknown id: missing");
    assert_eq!(out.output(), "1\n");
}

#[test]
fn vectors_evaluate_items_and_spread_splats() {
    assert_eq!(rendered("[1 (+ 1 1) _]"), "[1 2 _]");
    assert_eq!(rendered("(let [xs [2 3]] [1 xs.. 4])"), "[1 2 3 4]");
    assert_eq!(rendered("[_.. 1]"), "[1]");
}

#[test]
fn splat_of_non_iterable() {
    assert_eq!(rendered("[1..]"), "Error: Not iterable: 1");
}

#[test]
fn standalone_splat_is_a_marker() {
    assert_eq!(rendered("[1 2].."), "[1 2]..");
}

#[test]
fn empty_call_is_nil() {
    assert_eq!(rendered("()"), "_");
}

#[test]
fn calling_a_non_callable() {
    assert_eq!(rendered("(42 1)"), "Error: Not callable: 42");
    assert_eq!(rendered("([1 2])"), "Error: Not callable: [1 2]");
}

#[test]
fn prim_arity_is_checked_before_running() {
    assert_eq!(
        rendered("(if T)"),
        "Error: Wrong number of arguments to Prim(if): expected 2 to 3, got 1"
    );
    assert_eq!(
        rendered("(type 1 2)"),
        "Error: Wrong number of arguments to Prim(type): expected 1, got 2"
    );
}

#[test]
fn fun_calls_bind_params_in_child_env() {
    assert_eq!(rendered("((fun (x y) (- x y)) 10 3)"), "7");
    assert_eq!(rendered("(let [x 1] ((fun () x)))"), "1");
}

#[test]
fn fun_arity() {
    assert_eq!(
        rendered("((fun (x) x))"),
        "Error: Wrong number of arguments to (fun (x) ...): expected 1, got 0"
    );
    assert_eq!(
        rendered("((fun (x xs..) xs) 1 2 3)"),
        "[2 3]"
    );
    assert_eq!(rendered("((fun (xs..) xs))"), "[]");
    assert_eq!(
        rendered("((fun (x xs..) x))"),
        "Error: Wrong number of arguments to (fun (x xs..) ...): expected at least 1, got 0"
    );
}

#[test]
fn fun_arguments_spread_splats() {
    assert_eq!(rendered("((fun (a b c) b) [1 2 3]..)"), "2");
}

#[test]
fn closures_capture_their_env() {
    let source = "
        (fun adder (n) (fun (x) (+ x n)))
        (let [add2 (adder 2)] (add2 40))";
    assert_eq!(rendered(source), "42");
}

#[test]
fn call_fun_directly() {
    let (g, env) = context();
    let f = eval(&g, &env, "(fun (a b) [b a])").unwrap();
    let Val::Fun(closure) = &f else {
        panic!("expected fun, got {f}");
    };
    let result = call_fun(&g, &f, closure, vec![Val::Int(1), Val::Int(2)]).unwrap();
    let mut line = String::new();
    result.dump(&mut line).unwrap();
    assert_eq!(line, "[2 1]");
}

#[test]
fn deep_recursion_does_not_overflow() {
    let source = "
        (fun count (n acc) (if (= n 0) acc (count (- n 1) (+ acc 1))))
        (count 5000 0)";
    assert_eq!(rendered(source), "5000");
}
