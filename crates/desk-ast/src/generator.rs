//! Callback contract for generators that consume parsed trees.

use alloc::string::{String, ToString};
use alloc::sync::Arc;

use crate::ast::{Ast, NodeId};

/// A successfully parsed input file.
///
/// The tree is shared, so a generator may clone the `Arc` and keep it past the
/// `on_parse` call that delivered it.
#[derive(Clone, Debug)]
pub struct ParsedFile {
    /// Name of the file the tree was parsed from.
    pub filename: String,
    /// The file's syntax tree.
    pub ast: Arc<Ast>,
}

impl ParsedFile {
    pub fn new(filename: &str, ast: Ast) -> Self {
        Self {
            filename: filename.to_string(),
            ast: Arc::new(ast),
        }
    }

    /// First top-level declaration of the file.
    pub fn root(&self) -> Option<NodeId> {
        self.ast.first_root()
    }
}

/// Hooks a host invokes around a batch of parsed files. All hooks default to no-ops.
pub trait Generator {
    /// Called once before any file is processed.
    fn on_init(&mut self) {}

    /// Called once per parsed file, in input order.
    fn on_parse(&mut self, _file: &ParsedFile) {}

    /// Called once after every file has been processed.
    fn on_cleanup(&mut self) {}
}
