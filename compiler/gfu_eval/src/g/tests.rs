use std::io::Write as _;
use std::panic::{self, AssertUnwindSafe};

use super::*;
use crate::ExtVal;
use gfu_diagnostic::{buffer_sink, silent_sink, DumpResult};
use pretty_assertions::assert_eq;

fn quiet() -> G {
    G::builder().sink(silent_sink()).out(silent_sink()).build()
}

#[test]
fn defaults() {
    let g = G::new();
    assert!(!g.is_debug());
    assert_eq!(g.types().len(), BuiltinType::ALL.len());
}

#[test]
fn singletons() {
    let g = quiet();
    assert_eq!(g.nil(), Val::Nil);
    assert_eq!(g.t(), Val::Bool(true));
    assert_eq!(g.f(), Val::Bool(false));
    assert_eq!(g.bool_val(true), g.t());
    assert_eq!(g.bool_val(false), g.f());
}

#[test]
fn interning_is_stable() {
    let g = quiet();
    let a = g.intern("foo");
    let b = g.intern("foo");
    assert_eq!(a, b);
    assert_eq!(a.tag(), b.tag());
    assert_ne!(g.intern("bar").tag(), a.tag());
    assert_eq!(g.symbols().get("foo"), Some(a));
}

#[test]
fn eval_string_threads_positions_across_forms() {
    let g = quiet();
    let env = g.root_env().child();
    let e = g
        .eval_string(Pos::at("repl", 3, 1), "1\n  (2", &env)
        .unwrap_err();
    assert_eq!(e.pos(), Some(&Pos::at("repl", 4, 5)));
}

#[test]
fn read_errors_prevent_evaluation() {
    let out = buffer_sink();
    let g = G::builder().sink(silent_sink()).out(out.clone()).build();
    let env = g.root_env().child();
    let e = g.eval_string(Pos::new("x"), "(dump 1) )", &env).unwrap_err();
    assert!(e.is_read_error());
    assert_eq!(out.output(), "");
}

#[test]
fn load_evaluates_file_with_fresh_positions() {
    let g = quiet();
    let env = g.root_env().child();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "(let [x 20]\n  (+ x 22))").unwrap();
    let name = file.path().to_str().unwrap().to_owned();

    let val = g.load(Pos::at("caller", 9, 9), &name, &env).unwrap();
    assert_eq!(val, Val::Int(42));
}

#[test]
fn load_reports_read_errors_against_the_file() {
    let g = quiet();
    let env = g.root_env().child();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "\n[1 2").unwrap();
    let name = file.path().to_str().unwrap().to_owned();

    let e = g.load(Pos::new("caller"), &name, &env).unwrap_err();
    assert_eq!(e.pos(), Some(&Pos::at(name.as_str(), 2, 5)));
}

#[test]
fn load_replaces_invalid_utf8() {
    let g = quiet();
    let env = g.root_env().child();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"; caf\xe9 \xff\n(+ 1 2)").unwrap();
    let name = file.path().to_str().unwrap().to_owned();

    let val = g.load(Pos::new("caller"), &name, &env).unwrap();
    assert_eq!(val, Val::Int(3));

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"\xff").unwrap();
    let name = file.path().to_str().unwrap().to_owned();
    let e = g.load(Pos::new("caller"), &name, &env).unwrap_err();
    assert_eq!(e.message(), "Error: Unknown id: \u{fffd}");
}

#[test]
fn load_missing_file() {
    let g = quiet();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.gf");
    let name = path.to_str().unwrap();

    let e = g.load(Pos::new("caller"), name, g.root_env()).unwrap_err();
    assert!(!e.is_read_error());
    assert!(e.message().starts_with("Error: Failed loading file"));
    assert!(e.message().contains(name));
}

#[test]
fn errors_embed_value_renderings() {
    let g = quiet();
    let val = Val::vec(vec![Val::Int(1), Val::Nil]);
    let e = g.error(format_args!("Bad value: {val}"));
    assert_eq!(e.to_string(), "Error: Bad value: [1 _]");

    let inner = g.read_error(Pos::at("f", 1, 2), "Open vector");
    let outer = g.error(format_args!("While loading: {inner}"));
    assert!(outer.to_string().contains("Read error in 'f'; row 1, col 2:\nOpen vector"));
}

#[test]
#[should_panic(expected = "Error: boom")]
fn debug_mode_aborts_on_error() {
    let g = G::builder().debug(true).sink(silent_sink()).build();
    let _ = g.error("boom");
}

#[test]
fn debug_mode_renders_before_aborting() {
    let sink = buffer_sink();
    let g = G::builder().debug(true).sink(sink.clone()).build();
    assert!(g.is_debug());

    let result = panic::catch_unwind(AssertUnwindSafe(|| g.error("boom")));
    assert!(result.is_err());
    assert_eq!(sink.output(), "Error: boom\n");
}

#[test]
fn debug_mode_aborts_on_read_errors() {
    let sink = buffer_sink();
    let g = G::builder().debug(true).sink(sink.clone()).build();
    let env = g.root_env().child();

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        g.eval_string(Pos::new("dbg"), "(1", &env)
    }));
    assert!(result.is_err());
    assert_eq!(
        sink.output(),
        "Read error in 'dbg'; row 1, col 3:\nOpen expression\n"
    );
}

#[test]
fn flag_parsing() {
    for on in ["1", "true", "TRUE", "on", " On "] {
        assert!(parse_flag(on), "{on:?}");
    }
    for off in ["", "0", "false", "off", "yes"] {
        assert!(!parse_flag(off), "{off:?}");
    }
}

struct Celsius;

impl Type for Celsius {
    fn name(&self) -> &str {
        "Celsius"
    }

    fn is_truthy(&self, _val: &ExtVal) -> bool {
        true
    }

    fn dump(&self, val: &ExtVal, out: &mut dyn fmt::Write) -> DumpResult {
        write!(out, "{}C", val.downcast_ref::<i64>().copied().unwrap_or_default())?;
        Ok(())
    }
}

#[test]
fn host_types_register_and_render() {
    let g = quiet();
    let meta = g.register_type(Celsius).unwrap();
    assert_eq!(g.types().get("Celsius"), Some(&meta));
    assert!(g.register_type(Celsius).is_err());

    let temp = Val::Ext(ExtVal::new(meta.clone(), 21_i64).unwrap());
    assert_eq!(g.type_of(&temp), meta);
    assert_eq!(g.dump_string(&temp).unwrap(), "21C");

    let env = g.root_env().child();
    env.define(&g.intern("temp"), temp);
    let val = g
        .eval_string(Pos::new("t"), "(dump temp) (type temp)", &env)
        .unwrap();
    assert_eq!(val.to_string(), "Celsius");
}

#[test]
fn type_of_builtins() {
    let g = quiet();
    assert_eq!(g.type_of(&g.nil()).name(), "Nil");
    assert_eq!(g.type_of(&Val::Int(1)).id(), gfu_ir::TypeId::INT);
}
