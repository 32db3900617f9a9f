//! The central raise routine.

use std::fmt::{self, Write};

use gfu_ir::Pos;

use crate::dump::Dumped;
use crate::sink::{stderr_sink, SharedSink};
use crate::E;

/// What happens when an error is constructed.
///
/// Fixed when the context is built; nothing switches it mid-session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ErrorPolicy {
    /// Hand the error back as a value.
    #[default]
    Return,
    /// Render the error to the diagnostic sink, then panic with the same
    /// text. Meant for debugging the interpreter itself.
    Abort,
}

impl ErrorPolicy {
    /// `Abort` when `debug` is set.
    #[inline]
    pub fn from_debug(debug: bool) -> Self {
        if debug {
            Self::Abort
        } else {
            Self::Return
        }
    }

    #[inline]
    pub fn aborts(self) -> bool {
        matches!(self, Self::Abort)
    }
}

/// Builds errors and applies the [`ErrorPolicy`].
pub struct Diagnostics {
    policy: ErrorPolicy,
    sink: SharedSink,
}

impl Diagnostics {
    pub fn new(policy: ErrorPolicy, sink: SharedSink) -> Self {
        Diagnostics { policy, sink }
    }

    #[inline]
    pub fn policy(&self) -> ErrorPolicy {
        self.policy
    }

    /// Where debug-mode renderings go.
    pub fn sink(&self) -> &SharedSink {
        &self.sink
    }

    /// A plain error reading `Error: <message>`.
    ///
    /// Values and errors interpolated into `message` render through their
    /// `Dump` implementations:
    ///
    /// ```text
    /// diag.error(format_args!("Not callable: {}", val))
    /// ```
    pub fn error(&self, message: impl fmt::Display) -> E {
        let mut msg = String::from("Error: ");
        push_message(&mut msg, message);
        self.raise(E::basic(msg))
    }

    /// A read error pinned to `pos`.
    pub fn read_error(&self, pos: Pos, message: impl fmt::Display) -> E {
        let mut msg = String::new();
        push_message(&mut msg, message);
        self.raise(E::read(pos, msg))
    }

    /// Apply the policy to a freshly built error.
    ///
    /// Under `Return` the error comes straight back. Under `Abort` it is
    /// rendered, written to the sink, flushed, and the thread panics with the
    /// rendered text; this never returns.
    pub fn raise(&self, e: E) -> E {
        match self.policy {
            ErrorPolicy::Return => {
                tracing::debug!(error = %e, "error raised");
                e
            }
            ErrorPolicy::Abort => {
                let text = Dumped(&e).to_string();
                tracing::error!(error = %text, "debug mode: aborting on error");
                self.sink.writeln(&text);
                self.sink.flush();
                panic!("{text}");
            }
        }
    }
}

impl Default for Diagnostics {
    fn default() -> Self {
        Diagnostics::new(ErrorPolicy::Return, stderr_sink())
    }
}

/// Append `message`, falling back to a marker if a `Display` impl inside it
/// reports failure. `format!` would panic in that case.
fn push_message(out: &mut String, message: impl fmt::Display) {
    let start = out.len();
    if write!(out, "{message}").is_err() {
        out.truncate(start);
        out.push_str("<message failed to render>");
    }
}
