//! The evaluator.
//!
//! Forms evaluate in order, the last value wins and the first error stops
//! everything. Recursion goes through [`eval_form`], which guards the
//! native stack.

use std::rc::Rc;

use gfu_diagnostic::E;
use gfu_ir::{Form, FormKind};
use gfu_stack::ensure_sufficient_stack;

use crate::errors;
use crate::value::{Closure, Prim};
use crate::{Env, Val, G};

/// Evaluate `forms` in order in `env`.
///
/// Returns the value of the last form, or nil for an empty sequence.
pub fn eval_forms(g: &G, forms: &[Form], env: &Env) -> Result<Val, E> {
    let mut result = g.nil();
    for form in forms {
        result = eval_form(g, form, env)?;
    }
    Ok(result)
}

/// Evaluate a single form.
pub fn eval_form(g: &G, form: &Form, env: &Env) -> Result<Val, E> {
    tracing::trace!(pos = ?form.pos, %form, "eval");
    ensure_sufficient_stack(|| match &form.kind {
        FormKind::Nil => Ok(g.nil()),
        FormKind::Bool(b) => Ok(g.bool_val(*b)),
        FormKind::Int(n) => Ok(Val::Int(*n)),
        FormKind::Id(sym) => env.lookup(sym).ok_or_else(|| errors::unknown_id(g, sym)),
        FormKind::Vec(items) => Ok(Val::vec(eval_args(g, items, env)?)),
        FormKind::Splat(inner) => {
            let val = eval_form(g, inner, env)?;
            if val.iter().is_none() {
                return Err(errors::not_iterable(g, &val));
            }
            Ok(Val::Splat(Rc::new(val)))
        }
        FormKind::Expr(items) => eval_call(g, items, env),
    })
}

/// Evaluate argument forms, spreading splats in place.
pub fn eval_args(g: &G, forms: &[Form], env: &Env) -> Result<Vec<Val>, E> {
    let mut vals = Vec::with_capacity(forms.len());
    for form in forms {
        let val = eval_form(g, form, env)?;
        if let Val::Splat(inner) = &val {
            let items = inner.iter().ok_or_else(|| errors::not_iterable(g, inner))?;
            vals.extend(items.cloned());
        } else {
            vals.push(val);
        }
    }
    Ok(vals)
}

fn eval_call(g: &G, items: &[Form], env: &Env) -> Result<Val, E> {
    let Some((head, args)) = items.split_first() else {
        return Ok(g.nil());
    };
    let target = eval_form(g, head, env)?;
    match &target {
        Val::Prim(prim) => call_prim(g, &target, prim, args, env),
        Val::Fun(closure) => {
            let args = eval_args(g, args, env)?;
            call_fun(g, &target, closure, args)
        }
        _ => Err(errors::not_callable(g, &target)),
    }
}

fn check_arity(
    g: &G,
    callee: &Val,
    min: usize,
    max: Option<usize>,
    got: usize,
) -> Result<(), E> {
    if got < min || max.is_some_and(|max| got > max) {
        return Err(errors::wrong_arg_count(g, callee, min, max, got));
    }
    Ok(())
}

fn call_prim(g: &G, callee: &Val, prim: &Prim, args: &[Form], env: &Env) -> Result<Val, E> {
    check_arity(g, callee, prim.min_args, prim.max_args, args.len())?;
    (prim.imp)(g, args, env)
}

/// Apply `closure` to already evaluated arguments.
///
/// Parameters bind in a fresh child of the closure's environment; surplus
/// arguments go to the rest parameter as a vector.
pub fn call_fun(g: &G, callee: &Val, closure: &Closure, mut args: Vec<Val>) -> Result<Val, E> {
    let fun = &closure.fun;
    check_arity(g, callee, fun.min_args(), fun.max_args(), args.len())?;
    let frame = closure.env.child();
    let rest = args.split_off(fun.params.len());
    for (param, arg) in fun.params.iter().zip(args) {
        frame.define(param, arg);
    }
    if let Some(sym) = &fun.rest {
        frame.define(sym, Val::vec(rest));
    }
    eval_forms(g, &fun.body, &frame)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
