//! Adapter from `std::io::Write` to the formatter sinks the emitter writes into.

use core::fmt;
use std::io;

use desk_ast::NodeId;

use crate::c::CEmitter;
use crate::error::EmitError;

/// Wraps an [`io::Write`] so it can receive emitted text.
///
/// The first I/O error is kept so it can be reported instead of the opaque
/// [`fmt::Error`] the formatter machinery sees.
#[derive(Debug)]
pub struct IoSink<W> {
    inner: W,
    error: Option<io::Error>,
}

impl<W: io::Write> IoSink<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, error: None }
    }

    /// The I/O error that stopped the last write, if any.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: io::Write> fmt::Write for IoSink<W> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.inner.write_all(s.as_bytes()).map_err(|err| {
            self.error = Some(err);
            fmt::Error
        })
    }
}

impl<'a> CEmitter<'a> {
    /// Render into an [`io::Write`], surfacing the writer's own error on failure.
    pub fn emit_to_io<W: io::Write>(
        &self,
        writer: W,
        node: NodeId,
        follow_siblings: bool,
    ) -> Result<(), EmitError> {
        let mut sink = IoSink::new(writer);
        match self.emit(&mut sink, node, follow_siblings) {
            Err(EmitError::Sink(fmt_err)) => Err(match sink.take_error() {
                Some(io_err) => EmitError::Io(io_err),
                None => EmitError::Sink(fmt_err),
            }),
            other => other,
        }
    }
}
