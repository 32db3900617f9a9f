//! g-fu Eval - values, environments, the evaluator and the global context.
//!
//! # Architecture
//!
//! - [`Val`]: runtime values; built-in kinds in a closed enum, host kinds
//!   behind [`Type`]
//! - [`TypeRegistry`]: every kind a context knows, by name and [`TypeId`]
//! - [`Env`]: lexical frames chained to their parent
//! - [`eval_forms`]: sequential evaluation with short-circuit on error
//! - [`G`]: the per-session context tying reader, evaluator and
//!   diagnostics together
//!
//! ```text
//! gfu_eval::init_tracing();
//! let g = G::new();
//! let env = g.root_env().child();
//! let val = g.eval_string(Pos::new("repl"), "(+ 1 2)", &env)?;
//! ```
//!
//! [`TypeId`]: gfu_ir::TypeId

mod env;
pub mod errors;
mod eval;
mod g;
mod prims;
mod types;
mod value;

use std::sync::Once;

pub use env::Env;
pub use eval::{call_fun, eval_args, eval_form, eval_forms};
pub use g::{GBuilder, DEBUG_ENV_VAR, G};
pub use types::{Meta, RegisterError, Type, TypeRegistry};
pub use value::{Closure, ExtVal, Fun, Prim, PrimFn, Val};

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing unless `RUST_LOG` is set, and nothing after the first call.
/// Hosts call it once before building their first [`G`]; embedders with
/// their own subscriber should skip it.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
