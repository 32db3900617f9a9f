//! Destinations for rendered text.
//!
//! A context writes user-visible output (the `dump` primitive) and debug-mode
//! error renderings through a [`Sink`]. Embedders pick stdout/stderr; tests
//! pick a buffer and read it back.

use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::Mutex;

/// Sink that accumulates everything written to it.
#[derive(Default)]
pub struct BufferSink {
    buffer: Mutex<String>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write(&self, text: &str) {
        self.buffer.lock().push_str(text);
    }

    pub fn output(&self) -> String {
        self.buffer.lock().clone()
    }

    pub fn clear(&self) {
        self.buffer.lock().clear();
    }
}

/// Output destination, dispatched by enum.
pub enum Sink {
    Stdout,
    Stderr,
    Buffer(BufferSink),
    /// Discards everything.
    Silent,
}

impl Sink {
    /// Append `text`.
    ///
    /// Writes to the standard streams are best effort; a closed stdout must
    /// not turn into a second error while the first one is being reported.
    pub fn write(&self, text: &str) {
        match self {
            Self::Stdout => {
                let _ = io::stdout().lock().write_all(text.as_bytes());
            }
            Self::Stderr => {
                let _ = io::stderr().lock().write_all(text.as_bytes());
            }
            Self::Buffer(b) => b.write(text),
            Self::Silent => {}
        }
    }

    /// Append `text` followed by a newline.
    pub fn writeln(&self, text: &str) {
        self.write(text);
        self.write("\n");
    }

    /// Push buffered bytes out; call after a render sequence completes.
    pub fn flush(&self) {
        match self {
            Self::Stdout => {
                let _ = io::stdout().lock().flush();
            }
            Self::Stderr => {
                let _ = io::stderr().lock().flush();
            }
            Self::Buffer(_) | Self::Silent => {}
        }
    }

    /// Everything written so far; empty for sinks that don't capture.
    pub fn output(&self) -> String {
        match self {
            Self::Buffer(b) => b.output(),
            Self::Stdout | Self::Stderr | Self::Silent => String::new(),
        }
    }

    pub fn clear(&self) {
        if let Self::Buffer(b) = self {
            b.clear();
        }
    }
}

pub type SharedSink = Arc<Sink>;

pub fn stdout_sink() -> SharedSink {
    Arc::new(Sink::Stdout)
}

pub fn stderr_sink() -> SharedSink {
    Arc::new(Sink::Stderr)
}

pub fn buffer_sink() -> SharedSink {
    Arc::new(Sink::Buffer(BufferSink::new()))
}

pub fn silent_sink() -> SharedSink {
    Arc::new(Sink::Silent)
}
