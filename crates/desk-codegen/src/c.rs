//! C source emission for desk syntax trees.
//!
//! The emitter is a recursive-descent printer. The only state carried down the
//! recursion is the nesting depth (0 for the top-level declaration list) and the
//! member indentation of the aggregate currently being printed; nothing survives
//! between calls.
//!
//! Operator expressions are parenthesized at every application, so the output never
//! depends on C operator precedence.

use alloc::string::String;
use core::fmt::{self, Write};

use desk_ast::{Ast, Node, NodeId, NodeKind, TypeUsage};
use tracing::{debug, trace, warn};

use crate::error::EmitError;
use crate::options::{EmitOptions, WIDE_FLAGS_THRESHOLD};

/// C emitter over one syntax tree.
#[derive(Clone, Debug)]
pub struct CEmitter<'a> {
    ast: &'a Ast,
    options: EmitOptions,
}

impl<'a> CEmitter<'a> {
    /// Create an emitter with default options.
    pub fn new(ast: &'a Ast) -> Self {
        Self::with_options(ast, EmitOptions::default())
    }

    /// Create an emitter with the specified options.
    pub fn with_options(ast: &'a Ast, options: EmitOptions) -> Self {
        Self { ast, options }
    }

    /// The tree being rendered.
    pub fn ast(&self) -> &'a Ast {
        self.ast
    }

    pub fn options(&self) -> &EmitOptions {
        &self.options
    }

    /// Render `node`, and every sibling after it when `follow_siblings` is set.
    pub fn emit<W: Write>(
        &self,
        out: &mut W,
        node: NodeId,
        follow_siblings: bool,
    ) -> Result<(), EmitError> {
        let mut printer = Printer {
            ast: self.ast,
            options: &self.options,
            out,
            indent: 0,
        };
        if follow_siblings {
            for sibling in self.ast.siblings(node) {
                printer.node(sibling, 0)?;
            }
        } else {
            printer.node(node, 0)?;
        }
        Ok(())
    }

    /// Render the whole tree as one source file.
    pub fn generate(&self) -> Result<String, EmitError> {
        debug!(
            roots = self.ast.roots().len(),
            nodes = self.ast.len(),
            "generating C source"
        );
        let mut out = String::new();
        if let Some(banner) = &self.options.banner {
            writeln!(out, "/* {} */", banner)?;
            out.push('\n');
        }
        if let Some(first) = self.ast.first_root() {
            self.emit(&mut out, first, true)?;
        }
        Ok(out)
    }
}

struct Printer<'a, 'w, W: Write> {
    ast: &'a Ast,
    options: &'a EmitOptions,
    out: &'w mut W,
    indent: usize,
}

impl<'a, 'w, W: Write> Printer<'a, 'w, W> {
    fn write_indent(&mut self) -> fmt::Result {
        for _ in 0..self.indent {
            self.out.write_str(&self.options.indent)?;
        }
        Ok(())
    }

    fn node(&mut self, id: NodeId, depth: usize) -> fmt::Result {
        let ast = self.ast;
        let node = ast.node(id);
        trace!(node = id.index(), kind = ?node.node_type(), depth, "emit");

        if self.options.tag_comments && !node.tags.is_empty() {
            self.tag_comment(node, depth)?;
        }

        match &node.kind {
            NodeKind::Identifier { .. }
            | NodeKind::NumericConstant
            | NodeKind::StringConstant
            | NodeKind::CharConstant => self.out.write_str(node.name()),

            NodeKind::UnaryOperator { op, operand } => {
                write!(self.out, "({}", op.as_str())?;
                self.node(*operand, depth + 1)?;
                self.out.write_char(')')
            }

            NodeKind::BinaryOperator { op, left, right } => {
                self.out.write_char('(')?;
                self.node(*left, depth)?;
                write!(self.out, " {} ", op.as_str())?;
                self.node(*right, depth + 1)?;
                self.out.write_char(')')
            }

            NodeKind::StructDeclaration { members } => {
                self.aggregate("struct", node.text(), members, depth)
            }
            NodeKind::UnionDeclaration { members } => {
                self.aggregate("union", node.text(), members, depth)
            }
            NodeKind::EnumDeclaration { constants } => {
                self.enumeration(node.text(), constants, depth)
            }
            NodeKind::FlagsDeclaration { flags } => self.flags(node.text(), flags, depth),

            NodeKind::Declaration { initializer, .. } => {
                self.declaration(id, node, *initializer, depth)
            }
            NodeKind::TypeUsage(usage) => self.type_usage(node, usage, depth),

            NodeKind::Tag { .. } => self.tag(id, depth),

            NodeKind::ConstantDefinition { expression } => {
                write!(self.out, "#define {} (", node.name())?;
                self.node(*expression, depth + 1)?;
                self.out.write_str(")\n")
            }

            NodeKind::ProcedureHeader {
                return_type,
                parameters,
            } => self.procedure(node, *return_type, parameters, depth),
        }
    }

    fn tag(&mut self, id: NodeId, depth: usize) -> fmt::Result {
        let ast = self.ast;
        self.out.write_str(ast.node(id).name())?;
        let parameters = ast.tag_parameters(id);
        if !parameters.is_empty() {
            self.out.write_char('(')?;
            for (i, &param) in parameters.iter().enumerate() {
                if i > 0 {
                    self.out.write_str(", ")?;
                }
                self.node(param, depth + 1)?;
            }
            self.out.write_char(')')?;
        }
        Ok(())
    }

    /// `// @a(1, 2) @b` followed by a fresh, indented line.
    fn tag_comment(&mut self, node: &Node, depth: usize) -> fmt::Result {
        self.out.write_str("// ")?;
        for (i, &tag) in node.tags.iter().enumerate() {
            if i > 0 {
                self.out.write_char(' ')?;
            }
            self.tag(tag, depth)?;
        }
        self.out.write_char('\n')?;
        self.write_indent()
    }

    fn aggregate(
        &mut self,
        keyword: &str,
        name: Option<&str>,
        members: &[NodeId],
        depth: usize,
    ) -> fmt::Result {
        if depth == 0 {
            if let Some(name) = name {
                writeln!(self.out, "typedef {keyword} {name} {name};")?;
            }
        }
        match name {
            Some(name) => writeln!(self.out, "{keyword} {name}")?,
            None => writeln!(self.out, "{keyword}")?,
        }
        self.write_indent()?;
        self.out.write_str("{\n")?;

        self.indent += 1;
        for &member in members {
            self.write_indent()?;
            self.node(member, depth + 1)?;
            self.out.write_str(";\n")?;
        }
        self.indent -= 1;

        self.write_indent()?;
        self.out.write_char('}')?;
        if depth == 0 {
            self.out.write_str(";\n\n")?;
        }
        Ok(())
    }

    fn enumeration(
        &mut self,
        name: Option<&str>,
        constants: &[NodeId],
        depth: usize,
    ) -> fmt::Result {
        if depth == 0 {
            if let Some(name) = name {
                writeln!(self.out, "typedef enum {name} {name};")?;
            }
        }
        match name {
            Some(name) => writeln!(self.out, "enum {name}")?,
            None => self.out.write_str("enum\n")?,
        }
        self.write_indent()?;
        self.out.write_str("{\n")?;

        self.indent += 1;
        for &constant in constants {
            self.write_indent()?;
            self.node(constant, depth + 1)?;
            self.out.write_str(",\n")?;
        }
        self.indent -= 1;

        self.write_indent()?;
        self.out.write_char('}')?;
        if depth == 0 {
            self.out.write_str(";\n\n")?;
        }
        Ok(())
    }

    fn flags(&mut self, name: Option<&str>, flags: &[NodeId], depth: usize) -> fmt::Result {
        // The option may only lower the threshold; 32-bit storage cannot hold bit 31.
        let threshold = self.options.wide_flags_threshold.min(WIDE_FLAGS_THRESHOLD);
        let wide = flags.len() >= threshold;
        debug!(flags = flags.len(), wide, "selected flag storage width");
        if flags.len() > 64 {
            warn!(
                flags = flags.len(),
                name = name.unwrap_or(""),
                "flag set exceeds 64 bits; shifts past bit 63 are undefined in C"
            );
        }
        let (one, storage) = if wide {
            ("1ull", "unsigned long long int")
        } else {
            ("1u", "unsigned int")
        };

        let ast = self.ast;
        for (bit, &flag) in flags.iter().enumerate() {
            let flag = ast.node(flag);
            if self.options.tag_comments && !flag.tags.is_empty() {
                self.tag_comment(flag, depth + 1)?;
            }
            writeln!(self.out, "#define {} ({}<<{})", flag.name(), one, bit)?;
        }

        if let Some(name) = name {
            writeln!(self.out, "typedef {storage} {name};")?;
            self.out.write_char('\n')?;
        }
        Ok(())
    }

    fn declaration(
        &mut self,
        id: NodeId,
        node: &Node,
        initializer: Option<NodeId>,
        depth: usize,
    ) -> fmt::Result {
        let ast = self.ast;
        let (type_id, usage) = ast.type_usage_of(id);
        self.node(type_id, depth)?;
        self.out.write_str(node.name())?;
        for &size in &usage.array_sizes {
            self.out.write_char('[')?;
            self.node(size, depth)?;
            self.out.write_char(']')?;
        }
        if depth == 0 {
            if let Some(init) = initializer {
                self.out.write_str(" = ")?;
                self.node(init, depth + 1)?;
            }
            self.out.write_str(";\n")?;
        }
        Ok(())
    }

    /// Base type plus pointer markers, leaving the cursor where the declared name goes.
    fn type_usage(&mut self, node: &Node, usage: &TypeUsage, depth: usize) -> fmt::Result {
        match usage.inline_aggregate {
            Some(aggregate) => self.node(aggregate, depth + 1)?,
            None => self.out.write_str(node.name())?,
        }
        self.out.write_char(' ')?;
        for _ in 0..usage.pointer_count {
            self.out.write_char('*')?;
        }
        Ok(())
    }

    fn procedure(
        &mut self,
        node: &Node,
        return_type: Option<NodeId>,
        parameters: &[NodeId],
        depth: usize,
    ) -> fmt::Result {
        match return_type {
            Some(ty) => self.node(ty, depth + 1)?,
            None => self.out.write_str("void ")?,
        }
        write!(self.out, "{}(", node.name())?;
        if parameters.is_empty() {
            self.out.write_str("void")?;
        } else {
            for (i, &param) in parameters.iter().enumerate() {
                if i > 0 {
                    self.out.write_str(", ")?;
                }
                self.node(param, depth + 1)?;
            }
        }
        self.out.write_str(");\n")
    }
}

/// Render `node` (and its following siblings if asked) with default options.
pub fn emit<W: Write>(
    out: &mut W,
    ast: &Ast,
    node: NodeId,
    follow_siblings: bool,
) -> Result<(), EmitError> {
    CEmitter::new(ast).emit(out, node, follow_siblings)
}

/// Convenience function to render a whole tree as C with default options.
pub fn compile_to_c(ast: &Ast) -> Result<String, EmitError> {
    CEmitter::new(ast).generate()
}

/// Convenience function to render a whole tree as C with specified options.
pub fn compile_to_c_with_options(ast: &Ast, options: EmitOptions) -> Result<String, EmitError> {
    CEmitter::with_options(ast, options).generate()
}
