//! Error values.

use std::fmt;

use gfu_ir::Pos;

use crate::dump::{Dump, DumpResult, Dumped};

/// A g-fu error.
///
/// Errors are created through [`Diagnostics`](crate::Diagnostics) so the
/// context's policy is applied at construction time; this type only carries
/// the data and knows how to render it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum E {
    /// Construction or evaluation error; renders its message verbatim.
    Basic { msg: String },
    /// Syntax error tied to the offending source position.
    Read { pos: Pos, msg: String },
}

impl E {
    pub(crate) fn basic(msg: String) -> Self {
        E::Basic { msg }
    }

    pub(crate) fn read(pos: Pos, msg: String) -> Self {
        E::Read { pos, msg }
    }

    /// The message without any position header.
    pub fn message(&self) -> &str {
        match self {
            E::Basic { msg } | E::Read { msg, .. } => msg,
        }
    }

    /// Where a read error occurred.
    pub fn pos(&self) -> Option<&Pos> {
        match self {
            E::Basic { .. } => None,
            E::Read { pos, .. } => Some(pos),
        }
    }

    pub fn is_read_error(&self) -> bool {
        matches!(self, E::Read { .. })
    }
}

impl Dump for E {
    fn dump(&self, out: &mut dyn fmt::Write) -> DumpResult {
        match self {
            E::Basic { msg } => out.write_str(msg)?,
            E::Read { pos, msg } => write!(
                out,
                "Read error in '{}'; row {}, col {}:\n{}",
                pos.src(),
                pos.row,
                pos.col,
                msg
            )?,
        }
        Ok(())
    }
}

impl fmt::Display for E {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&Dumped(self), f)
    }
}

impl std::error::Error for E {}
