#![cfg(feature = "std")]

use std::io;

use desk_ast::AstBuilder;
use desk_codegen::{CEmitter, EmitError, IoSink};

struct BrokenPipe;

impl io::Write for BrokenPipe {
    fn write(&mut self, _: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "reader went away"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_emit_to_io_writes_bytes() {
    let mut b = AstBuilder::new();
    let ty = b.named_type("int", 1, Vec::new());
    let decl = b.declaration("cursor", ty, None);
    let ast = b.finish();

    let mut buffer = Vec::new();
    CEmitter::new(&ast).emit_to_io(&mut buffer, decl, false).unwrap();
    assert_eq!(String::from_utf8(buffer).unwrap(), "int *cursor;\n");
}

#[test]
fn test_emit_to_io_surfaces_writer_error() {
    let mut b = AstBuilder::new();
    let n = b.identifier("x");
    let ast = b.finish();

    let err = CEmitter::new(&ast).emit_to_io(BrokenPipe, n, false).unwrap_err();
    match err {
        EmitError::Io(io_err) => assert_eq!(io_err.kind(), io::ErrorKind::BrokenPipe),
        other => panic!("expected an I/O error, got {other:?}"),
    }
}

#[test]
fn test_io_sink_keeps_first_error() {
    use std::fmt::Write;

    let mut sink = IoSink::new(BrokenPipe);
    assert!(sink.write_str("x").is_err());
    assert_eq!(sink.take_error().map(|e| e.kind()), Some(io::ErrorKind::BrokenPipe));
    assert!(sink.take_error().is_none());
}
