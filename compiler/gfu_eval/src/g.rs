//! The global context.
//!
//! One [`G`] per interpreter session. It owns the symbol table, the type
//! registry, the nil/true/false singletons, the root environment and the
//! diagnostics that decide whether an error is returned or aborts.

use std::cell::{Ref, RefCell};
use std::fmt;
use std::fs;
use std::rc::Rc;

use gfu_diagnostic::{
    dump_string, stderr_sink, stdout_sink, Diagnostics, Dump, DumpError, ErrorPolicy, SharedSink,
    E,
};
use gfu_ir::{BuiltinType, Pos, Sym, SymbolTable};
use gfu_read::Reader;

use crate::eval::eval_forms;
use crate::types::{Meta, RegisterError, Type, TypeRegistry};
use crate::{prims, Env, Val};

/// Environment variable that turns debug mode on for
/// [`GBuilder::debug_from_env`].
pub const DEBUG_ENV_VAR: &str = "GFU_DEBUG";

/// Global interpreter context.
pub struct G {
    syms: SymbolTable,
    types: RefCell<TypeRegistry>,
    diag: Diagnostics,
    out: SharedSink,
    nil: Val,
    t: Val,
    f: Val,
    root: Env,
}

impl G {
    /// A context with default settings: debug off, errors to stderr,
    /// `dump` output to stdout.
    pub fn new() -> Self {
        GBuilder::new().build()
    }

    pub fn builder() -> GBuilder {
        GBuilder::new()
    }

    /// Read every form in `source` starting at `pos`, then evaluate them in
    /// order in `env`.
    ///
    /// Nothing is evaluated if reading fails. Empty input yields nil.
    #[tracing::instrument(level = "debug", skip_all, fields(src = pos.src()))]
    pub fn eval_string(&self, pos: Pos, source: &str, env: &Env) -> Result<Val, E> {
        let forms = Reader::new(&self.syms, &self.diag, source).read_all(pos)?;
        tracing::trace!(forms = forms.len(), "read complete");
        eval_forms(self, &forms, env)
    }

    /// Read `filename` and evaluate its contents in `env`.
    ///
    /// Positions restart at row 1, col 1 of the file; `pos` is where the
    /// load was requested from and only shows up in traces. Bytes that are
    /// not valid UTF-8 are replaced rather than rejected.
    #[tracing::instrument(level = "debug", skip_all, fields(%filename, from = ?pos))]
    #[allow(
        clippy::needless_pass_by_value,
        reason = "Takes its position the way eval_string does"
    )]
    pub fn load(&self, pos: Pos, filename: &str, env: &Env) -> Result<Val, E> {
        let bytes = match fs::read(filename) {
            Ok(bytes) => bytes,
            Err(e) => {
                return Err(self.error(format_args!("Failed loading file '{filename}': {e}")));
            }
        };
        let source = String::from_utf8_lossy(&bytes);
        tracing::debug!(bytes = bytes.len(), "loaded file");
        self.eval_string(Pos::new(filename), &source, env)
    }

    /// A plain error reading `Error: <message>`.
    ///
    /// Under debug mode this renders the error to the diagnostic sink and
    /// panics instead of returning.
    pub fn error(&self, message: impl fmt::Display) -> E {
        self.diag.error(message)
    }

    /// An error pinned to `pos`; same debug-mode rule as [`G::error`].
    pub fn read_error(&self, pos: Pos, message: impl fmt::Display) -> E {
        self.diag.read_error(pos, message)
    }

    #[inline]
    pub fn is_debug(&self) -> bool {
        self.diag.policy().aborts()
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diag
    }

    /// Where `dump` writes.
    pub fn out(&self) -> &SharedSink {
        &self.out
    }

    pub fn intern(&self, name: &str) -> Sym {
        self.syms.intern(name)
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.syms
    }

    #[inline]
    pub fn nil(&self) -> Val {
        self.nil.clone()
    }

    #[inline]
    pub fn t(&self) -> Val {
        self.t.clone()
    }

    #[inline]
    pub fn f(&self) -> Val {
        self.f.clone()
    }

    #[inline]
    pub fn bool_val(&self, b: bool) -> Val {
        if b {
            self.t()
        } else {
            self.f()
        }
    }

    /// Environment holding the core primitives.
    ///
    /// Evaluate in [`Env::child`] of it to keep user bindings out of the
    /// shared root.
    pub fn root_env(&self) -> &Env {
        &self.root
    }

    pub fn types(&self) -> Ref<'_, TypeRegistry> {
        self.types.borrow()
    }

    /// Register a host value kind.
    pub fn register_type(&self, ty: impl Type + 'static) -> Result<Meta, RegisterError> {
        self.types.borrow_mut().register(Rc::new(ty))
    }

    pub fn type_of(&self, val: &Val) -> Meta {
        if let Val::Ext(ext) = val {
            return ext.meta().clone();
        }
        let builtin = val.builtin_type().unwrap_or(BuiltinType::Nil);
        self.types().builtin(builtin)
    }

    /// Render anything dumpable to a string.
    pub fn dump_string(&self, val: &dyn Dump) -> Result<String, DumpError> {
        dump_string(val)
    }
}

impl Default for G {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for [`G`].
///
/// ```text
/// let g = G::builder().debug_from_env().sink(buffer_sink()).build();
/// ```
#[derive(Default)]
pub struct GBuilder {
    debug: bool,
    sink: Option<SharedSink>,
    out: Option<SharedSink>,
}

impl GBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Abort on the first error constructed instead of returning it.
    #[must_use]
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Turn debug mode on when `GFU_DEBUG` is `1`, `true` or `on`.
    #[must_use]
    pub fn debug_from_env(self) -> Self {
        let debug = std::env::var(DEBUG_ENV_VAR).is_ok_and(|v| parse_flag(&v));
        self.debug(debug)
    }

    /// Where debug-mode errors are rendered before aborting.
    #[must_use]
    pub fn sink(mut self, sink: SharedSink) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Where `dump` writes.
    #[must_use]
    pub fn out(mut self, out: SharedSink) -> Self {
        self.out = Some(out);
        self
    }

    pub fn build(self) -> G {
        let policy = ErrorPolicy::from_debug(self.debug);
        let diag = Diagnostics::new(policy, self.sink.unwrap_or_else(stderr_sink));
        tracing::debug!(?policy, "creating context");

        let g = G {
            syms: SymbolTable::new(),
            types: RefCell::new(TypeRegistry::new()),
            diag,
            out: self.out.unwrap_or_else(stdout_sink),
            nil: Val::Nil,
            t: Val::Bool(true),
            f: Val::Bool(false),
            root: Env::new(),
        };
        prims::install(&g, &g.root);
        g
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "on"
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
