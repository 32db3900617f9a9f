//! g-fu reader: source text to [`Form`]s.
//!
//! The reader owns the input buffer and its byte offset; the source
//! position is threaded through explicitly. [`Reader::read`] takes the
//! position the next form starts searching from and returns the parsed form
//! together with the position just past it, so a caller reading a whole
//! source unit passes each returned position into the next call:
//!
//! ```text
//! let mut reader = Reader::new(&syms, &diag, source);
//! let mut pos = Pos::new("main.gf");
//! while let Some((form, next)) = reader.read(pos)? {
//!     forms.push(form);
//!     pos = next;
//! }
//! ```
//!
//! End of input is `Ok(None)`, not an error. Malformed input is a read
//! error carrying the exact row and column where reading failed.
//!
//! [`Form`]: gfu_ir::Form

mod reader;

pub use reader::Reader;
