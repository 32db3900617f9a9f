//! Centralized error constructors for the evaluator.
//!
//! Every runtime error message is spelled out here, so the evaluator and the
//! primitives report the same failure the same way.

use gfu_diagnostic::{DumpError, E};
use gfu_ir::{Form, Sym};

use crate::{Val, G};

pub fn unknown_id(g: &G, sym: &Sym) -> E {
    g.error(format_args!("Unknown id: {sym}"))
}

pub fn not_callable(g: &G, val: &Val) -> E {
    g.error(format_args!("Not callable: {val}"))
}

/// `callee` received `got` arguments outside `min..=max`.
pub fn wrong_arg_count(g: &G, callee: &Val, min: usize, max: Option<usize>, got: usize) -> E {
    match max {
        Some(max) if max == min => g.error(format_args!(
            "Wrong number of arguments to {callee}: expected {min}, got {got}"
        )),
        Some(max) => g.error(format_args!(
            "Wrong number of arguments to {callee}: expected {min} to {max}, got {got}"
        )),
        None => g.error(format_args!(
            "Wrong number of arguments to {callee}: expected at least {min}, got {got}"
        )),
    }
}

pub fn not_iterable(g: &G, val: &Val) -> E {
    g.error(format_args!("Not iterable: {val}"))
}

pub fn expected_type(g: &G, expected: &str, val: &Val) -> E {
    g.error(format_args!("Expected {expected}: {val}"))
}

pub fn int_overflow(g: &G, op: &str) -> E {
    g.error(format_args!("Integer overflow in {op}"))
}

/// A primitive got syntax it cannot use, e.g. `(let x)`.
pub fn invalid_form(g: &G, what: &str, form: &Form) -> E {
    g.error(format_args!("Invalid {what}: {form}"))
}

pub fn dump_failed(g: &G, e: &DumpError) -> E {
    g.error(format_args!("Dump failed: {e}"))
}
