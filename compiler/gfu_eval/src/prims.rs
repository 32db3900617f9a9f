//! Core primitives bound in every root environment.
//!
//! Just enough to drive the evaluator: sequencing, branching, local
//! bindings, functions, type inspection, output and integer arithmetic.

use std::rc::Rc;

use gfu_diagnostic::{Dump, E};
use gfu_ir::{Form, FormKind, Sym};

use crate::errors;
use crate::eval::{eval_args, eval_form, eval_forms};
use crate::value::{Closure, Fun, Prim, PrimFn};
use crate::{Env, Val, G};

/// `(name, min_args, max_args, implementation)`
const CORE: &[(&str, usize, Option<usize>, PrimFn)] = &[
    ("do", 0, None, prim_do),
    ("if", 2, Some(3), prim_if),
    ("let", 1, None, prim_let),
    ("fun", 1, None, prim_fun),
    ("type", 1, Some(1), prim_type),
    ("dump", 0, None, prim_dump),
    ("+", 0, None, prim_add),
    ("-", 1, None, prim_sub),
    ("=", 1, None, prim_eq),
];

/// Bind every core primitive in `env`.
pub(crate) fn install(g: &G, env: &Env) {
    for &(name, min, max, imp) in CORE {
        let prim = Prim::new(name, min, max, imp);
        env.define(&g.intern(name), Val::Prim(Rc::new(prim)));
    }
}

/// `(do forms...)`
fn prim_do(g: &G, args: &[Form], env: &Env) -> Result<Val, E> {
    eval_forms(g, args, env)
}

/// `(if cond then else?)`
fn prim_if(g: &G, args: &[Form], env: &Env) -> Result<Val, E> {
    if eval_form(g, &args[0], env)?.is_truthy() {
        eval_form(g, &args[1], env)
    } else {
        match args.get(2) {
            Some(alt) => eval_form(g, alt, env),
            None => Ok(g.nil()),
        }
    }
}

/// `(let [id val ...] body...)`
///
/// Bindings are sequential; each value sees the ones before it.
fn prim_let(g: &G, args: &[Form], env: &Env) -> Result<Val, E> {
    let bindings = &args[0];
    let pairs = match &bindings.kind {
        FormKind::Vec(items) if items.len() % 2 == 0 => items,
        _ => return Err(errors::invalid_form(g, "let bindings", bindings)),
    };
    let frame = env.child();
    for pair in pairs.chunks_exact(2) {
        let Some(sym) = pair[0].as_id() else {
            return Err(errors::invalid_form(g, "let binding", &pair[0]));
        };
        let val = eval_form(g, &pair[1], &frame)?;
        frame.define(sym, val);
    }
    eval_forms(g, &args[1..], &frame)
}

/// `(fun name? (params... rest..?) body...)`
///
/// A named function is also bound in the current environment, which makes
/// recursion work. The binding does not keep the environment alive.
fn prim_fun(g: &G, args: &[Form], env: &Env) -> Result<Val, E> {
    let (name, args) = match args[0].as_id() {
        Some(sym) => (Some(sym.clone()), &args[1..]),
        None => (None, args),
    };
    let Some((params_form, body)) = args.split_first() else {
        return Err(g.error("Missing fun params"));
    };
    let (params, rest) = parse_params(g, params_form)?;

    let fun = Fun {
        name: name.clone(),
        params,
        rest,
        body: body.into(),
    };
    let fun = Val::Fun(Closure::new(fun, env.clone()));
    if let Some(sym) = &name {
        env.define(sym, fun.clone());
    }
    Ok(fun)
}

fn parse_params(g: &G, form: &Form) -> Result<(Vec<Sym>, Option<Sym>), E> {
    let FormKind::Expr(items) = &form.kind else {
        return Err(errors::invalid_form(g, "fun params", form));
    };
    let mut params = Vec::with_capacity(items.len());
    let mut rest = None;
    for (i, item) in items.iter().enumerate() {
        match &item.kind {
            FormKind::Id(sym) => params.push(sym.clone()),
            FormKind::Splat(inner) if i + 1 == items.len() => match inner.as_id() {
                Some(sym) => rest = Some(sym.clone()),
                None => return Err(errors::invalid_form(g, "rest param", item)),
            },
            _ => return Err(errors::invalid_form(g, "fun param", item)),
        }
    }
    Ok((params, rest))
}

/// `(type x)`
fn prim_type(g: &G, args: &[Form], env: &Env) -> Result<Val, E> {
    let val = eval_form(g, &args[0], env)?;
    Ok(Val::Meta(g.type_of(&val)))
}

/// `(dump vals...)` writes the renderings, space separated, as one line.
fn prim_dump(g: &G, args: &[Form], env: &Env) -> Result<Val, E> {
    let vals = eval_args(g, args, env)?;
    let mut line = String::new();
    for (i, val) in vals.iter().enumerate() {
        if i > 0 {
            line.push(' ');
        }
        val.dump(&mut line).map_err(|e| errors::dump_failed(g, &e))?;
    }
    g.out().writeln(&line);
    g.out().flush();
    Ok(g.nil())
}

fn ints(g: &G, args: &[Form], env: &Env) -> Result<Vec<i64>, E> {
    eval_args(g, args, env)?
        .iter()
        .map(|val| val.as_int().ok_or_else(|| errors::expected_type(g, "Int", val)))
        .collect()
}

/// `(+ ints...)`
fn prim_add(g: &G, args: &[Form], env: &Env) -> Result<Val, E> {
    let mut sum: i64 = 0;
    for n in ints(g, args, env)? {
        sum = sum.checked_add(n).ok_or_else(|| errors::int_overflow(g, "+"))?;
    }
    Ok(Val::Int(sum))
}

/// `(- x)` negates, `(- x ys...)` subtracts from `x`.
fn prim_sub(g: &G, args: &[Form], env: &Env) -> Result<Val, E> {
    let ns = ints(g, args, env)?;
    let Some((&first, rest)) = ns.split_first() else {
        return Ok(Val::Int(0));
    };
    let result = if rest.is_empty() {
        first.checked_neg()
    } else {
        rest.iter().try_fold(first, |acc, &n| acc.checked_sub(n))
    };
    result
        .map(Val::Int)
        .ok_or_else(|| errors::int_overflow(g, "-"))
}

/// `(= x ys...)` is `T` when every value equals `x`.
fn prim_eq(g: &G, args: &[Form], env: &Env) -> Result<Val, E> {
    let vals = eval_args(g, args, env)?;
    let eq = match vals.split_first() {
        Some((first, rest)) => rest.iter().all(|v| v.is_eq(first)),
        None => true,
    };
    Ok(g.bool_val(eq))
}
