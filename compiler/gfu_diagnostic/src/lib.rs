//! Diagnostics for the g-fu runtime.
//!
//! - [`Dump`]: the rendering capability shared by values and errors
//! - [`E`]: error values, plain or positioned
//! - [`Diagnostics`]: the single place errors are raised, applying the
//!   context's [`ErrorPolicy`]
//! - [`Sink`]: where rendered text goes (stdout, stderr, a buffer, nowhere)
//!
//! # Error policy
//!
//! With [`ErrorPolicy::Return`] an error is an ordinary value handed back to
//! the caller. With [`ErrorPolicy::Abort`] (debug mode) raising renders the
//! error to the diagnostic sink and panics with the same text, so a broken
//! interpreter stops at the first error it constructs.

mod diagnostics;
mod dump;
mod error;
mod sink;

pub use diagnostics::{Diagnostics, ErrorPolicy};
pub use dump::{dump_string, Dump, DumpError, DumpResult, Dumped};
pub use error::E;
pub use sink::{buffer_sink, silent_sink, stderr_sink, stdout_sink, BufferSink, SharedSink, Sink};
