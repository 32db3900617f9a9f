use super::*;
use gfu_diagnostic::dump_string;
use gfu_ir::SymbolTable;
use pretty_assertions::assert_eq;

fn ints(ns: &[i64]) -> Val {
    Val::vec(ns.iter().copied().map(Val::Int).collect::<Vec<_>>())
}

#[test]
fn nil_is_falsy_and_renders_underscore() {
    assert!(!Val::Nil.is_truthy());
    assert_eq!(Val::Nil.to_string(), "_");
    assert!(Val::Nil.is_nil());
}

#[test]
fn only_nil_and_false_are_falsy() {
    assert!(!Val::Bool(false).is_truthy());
    assert!(Val::Bool(true).is_truthy());
    assert!(Val::Int(0).is_truthy());
    assert!(Val::vec(Vec::new()).is_truthy());
}

#[test]
fn scalar_renderings() {
    assert_eq!(Val::Bool(true).to_string(), "T");
    assert_eq!(Val::Bool(false).to_string(), "F");
    assert_eq!(Val::Int(-42).to_string(), "-42");
}

#[test]
fn compound_renderings() {
    let v = Val::vec(vec![Val::Int(1), Val::Nil, ints(&[2, 3])]);
    assert_eq!(dump_string(&v).unwrap(), "[1 _ [2 3]]");
    assert_eq!(Val::vec(Vec::new()).to_string(), "[]");
    assert_eq!(Val::Splat(Rc::new(ints(&[1]))).to_string(), "[1]..");
}

fn noop(_g: &G, _args: &[Form], _env: &Env) -> Result<Val, E> {
    Ok(Val::Nil)
}

#[test]
fn callable_renderings() {
    let syms = SymbolTable::new();
    let fun = Fun {
        name: None,
        params: vec![syms.intern("x"), syms.intern("y")],
        rest: Some(syms.intern("zs")),
        body: Rc::from(Vec::new()),
    };
    assert_eq!(Val::Fun(Closure::new(fun, Env::new())).to_string(), "(fun (x y zs..) ...)");

    let named = Fun {
        name: Some(syms.intern("id")),
        params: vec![syms.intern("x")],
        rest: None,
        body: Rc::from(Vec::new()),
    };
    assert_eq!(Val::Fun(Closure::new(named, Env::new())).to_string(), "(fun id (x) ...)");

    let prim = Prim::new("noop", 0, Some(0), noop);
    assert_eq!(Val::Prim(Rc::new(prim)).to_string(), "Prim(noop)");
}

#[test]
fn fun_arity_bounds() {
    let syms = SymbolTable::new();
    let mut fun = Fun {
        name: None,
        params: vec![syms.intern("a")],
        rest: None,
        body: Rc::from(Vec::new()),
    };
    assert_eq!((fun.min_args(), fun.max_args()), (1, Some(1)));
    fun.rest = Some(syms.intern("more"));
    assert_eq!((fun.min_args(), fun.max_args()), (1, None));
}

#[test]
fn iteration() {
    assert_eq!(Val::Nil.iter().map(Iterator::count), Some(0));
    let v = ints(&[1, 2, 3]);
    assert_eq!(
        v.iter().unwrap().cloned().collect::<Vec<_>>(),
        vec![Val::Int(1), Val::Int(2), Val::Int(3)]
    );
    let splat = Val::Splat(Rc::new(v));
    assert_eq!(splat.iter().map(Iterator::count), Some(3));
    assert!(Val::Int(1).iter().is_none());
    assert!(Val::Bool(false).iter().is_none());
}

#[test]
fn equality() {
    assert_eq!(ints(&[1, 2]), ints(&[1, 2]));
    assert_ne!(ints(&[1, 2]), ints(&[1]));
    assert_ne!(Val::Int(0), Val::Bool(false));
    assert_ne!(Val::Nil, Val::Bool(false));

    let prim = Val::Prim(Rc::new(Prim::new("noop", 0, None, noop)));
    let other = Val::Prim(Rc::new(Prim::new("noop", 0, None, noop)));
    assert_eq!(prim, prim.clone());
    assert_ne!(prim, other);
}

#[test]
fn builtin_type_ids() {
    assert_eq!(Val::Nil.type_id(), TypeId::NIL);
    assert_eq!(Val::Int(1).type_id(), TypeId::INT);
    assert_eq!(ints(&[]).type_id(), TypeId::VEC);
    assert_eq!(Val::Bool(true).builtin_type(), Some(BuiltinType::Bool));
}

#[test]
fn closures_compare_by_definition() {
    let syms = SymbolTable::new();
    let def = || Fun {
        name: None,
        params: vec![syms.intern("x")],
        rest: None,
        body: Rc::from(Vec::new()),
    };
    let closure = Closure::new(def(), Env::new());
    let rebound = Closure {
        fun: Rc::clone(&closure.fun),
        env: Env::new(),
    };
    assert_eq!(Val::Fun(closure.clone()), Val::Fun(rebound));
    assert_ne!(Val::Fun(closure), Val::Fun(Closure::new(def(), Env::new())));
}

fn nested_vecs(depth: usize) -> Val {
    let mut val = Val::Int(0);
    for _ in 0..depth {
        val = Val::vec(vec![val]);
    }
    val
}

#[test]
fn deep_values_render_compare_and_drop() {
    let depth = 100_000;
    let a = nested_vecs(depth);
    let b = nested_vecs(depth);
    assert_eq!(a, b);
    assert_eq!(a.to_string().len(), 2 * depth + 1);
    drop(a);
    drop(b);
}

#[test]
fn dropping_a_value_keeps_shared_children() {
    let inner = ints(&[1, 2]);
    let outer = Val::vec(vec![inner.clone(), Val::Splat(Rc::new(inner.clone()))]);
    drop(outer);
    assert_eq!(inner.to_string(), "[1 2]");
}
