//! Stack growth for the recursive parts of the runtime.
//!
//! Both the reader (nested `(...)` and `[...]`) and the evaluator (nested
//! calls, function bodies calling functions) recurse once per level of
//! nesting in the user's source. Source text is untrusted, so every recursive
//! entry point runs its body through [`ensure_sufficient_stack`].
//!
//! On native targets the stack is grown on demand with `stacker`; on
//! `wasm32` the closure is simply called.

/// Remaining stack below which a new segment is allocated.
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment.
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, growing the stack first if less than the red zone remains.
///
/// ```text
/// fn read_items(&mut self, pos: Pos) -> Result<Vec<Form>, E> {
///     ensure_sufficient_stack(|| { /* may call read_items again */ })
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// `wasm32` manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
