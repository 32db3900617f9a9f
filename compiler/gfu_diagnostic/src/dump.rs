//! The rendering capability.
//!
//! Everything a user can see (values, errors) renders through [`Dump`]. The
//! same implementation backs `Display`, so a value printed by the program
//! and the same value embedded in an error message always read the same.

use std::fmt;

/// Result of rendering: `Ok` means the whole value was written.
pub type DumpResult = Result<(), DumpError>;

/// Rendering failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DumpError {
    /// The output sink rejected a write.
    #[error("output sink rejected write")]
    Sink(#[from] fmt::Error),
    /// A value refused to render itself.
    #[error("failed dumping {type_name}: {reason}")]
    Value { type_name: String, reason: String },
}

/// Textual rendering into any `fmt::Write` sink.
pub trait Dump {
    fn dump(&self, out: &mut dyn fmt::Write) -> DumpResult;
}

impl<T: Dump + ?Sized> Dump for &T {
    fn dump(&self, out: &mut dyn fmt::Write) -> DumpResult {
        (**self).dump(out)
    }
}

/// Render `value` into a fresh string.
pub fn dump_string<T: Dump + ?Sized>(value: &T) -> Result<String, DumpError> {
    let mut out = String::new();
    value.dump(&mut out)?;
    Ok(out)
}

/// `Display` adapter over a [`Dump`] implementation.
///
/// Never reports `fmt::Error` for a value that fails to render; the failure's
/// own message is written in its place. This keeps `format!` and friends from
/// panicking while an error message is being assembled.
pub struct Dumped<'a, T: ?Sized>(pub &'a T);

impl<T: Dump + ?Sized> fmt::Display for Dumped<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match dump_string(self.0) {
            Ok(text) => f.write_str(&text),
            Err(e) => write!(f, "{e}"),
        }
    }
}
