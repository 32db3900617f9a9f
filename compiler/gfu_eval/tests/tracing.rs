//! Subscriber installation. Runs in its own binary: the subscriber is
//! process-global.

#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use gfu_diagnostic::silent_sink;
use gfu_eval::{init_tracing, Val, G};
use gfu_ir::Pos;
use pretty_assertions::assert_eq;

#[test]
fn init_tracing_installs_once() {
    std::env::set_var("RUST_LOG", "gfu_eval=warn");
    init_tracing();
    init_tracing();
    let again = tracing::subscriber::set_global_default(tracing_subscriber::registry());
    assert!(again.is_err());

    let g = G::builder().sink(silent_sink()).out(silent_sink()).build();
    let env = g.root_env().child();
    let val = g.eval_string(Pos::new("traced"), "(+ 1 2)", &env).unwrap();
    assert_eq!(val, Val::Int(3));
}
