//! Construction API for syntax trees.
//!
//! Front-ends create nodes bottom-up: children first, then the node that owns them.
//! Every constructor that takes a list links the list's `next` chain, so the finished
//! tree can be walked either through the payload vectors or sibling by sibling.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::ast::{Ast, BinaryOp, Node, NodeId, NodeKind, TypeUsage, UnaryOp};

/// Incrementally builds an [`Ast`].
#[derive(Clone, Debug, Default)]
pub struct AstBuilder {
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
}

impl AstBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, kind: NodeKind, text: Option<String>) -> NodeId {
        let id = NodeId::from_index(self.nodes.len());
        self.nodes.push(Node::new(kind, text));
        id
    }

    fn link(&mut self, list: &[NodeId]) {
        for pair in list.windows(2) {
            self.nodes[pair[0].index()].next = Some(pair[1]);
        }
    }

    fn owned_list(&mut self, list: Vec<NodeId>) -> Vec<NodeId> {
        self.link(&list);
        list
    }

    /// An identifier use, unresolved until [`bind_identifier`](Self::bind_identifier).
    pub fn identifier(&mut self, name: &str) -> NodeId {
        self.push(
            NodeKind::Identifier { declaration: None },
            Some(name.to_string()),
        )
    }

    /// A numeric literal, stored with its source spelling.
    pub fn numeric(&mut self, text: &str) -> NodeId {
        self.push(NodeKind::NumericConstant, Some(text.to_string()))
    }

    /// A string literal, quotes included.
    pub fn string_literal(&mut self, text: &str) -> NodeId {
        self.push(NodeKind::StringConstant, Some(text.to_string()))
    }

    /// A character literal, quotes included.
    pub fn char_literal(&mut self, text: &str) -> NodeId {
        self.push(NodeKind::CharConstant, Some(text.to_string()))
    }

    pub fn unary(&mut self, op: UnaryOp, operand: NodeId) -> NodeId {
        self.push(NodeKind::UnaryOperator { op, operand }, Some(op.as_str().to_string()))
    }

    pub fn binary(&mut self, op: BinaryOp, left: NodeId, right: NodeId) -> NodeId {
        self.push(
            NodeKind::BinaryOperator { op, left, right },
            Some(op.as_str().to_string()),
        )
    }

    /// A struct declaration. `name` is `None` for inline anonymous structs.
    pub fn struct_decl(&mut self, name: Option<&str>, members: Vec<NodeId>) -> NodeId {
        let members = self.owned_list(members);
        self.push(
            NodeKind::StructDeclaration { members },
            name.map(ToString::to_string),
        )
    }

    /// A union declaration. `name` is `None` for inline anonymous unions.
    pub fn union_decl(&mut self, name: Option<&str>, members: Vec<NodeId>) -> NodeId {
        let members = self.owned_list(members);
        self.push(
            NodeKind::UnionDeclaration { members },
            name.map(ToString::to_string),
        )
    }

    /// An enum declaration; each constant becomes an identifier node.
    pub fn enum_decl(&mut self, name: &str, constants: &[&str]) -> NodeId {
        let constants = constants.iter().map(|c| self.identifier(c)).collect();
        let constants = self.owned_list(constants);
        self.push(
            NodeKind::EnumDeclaration { constants },
            Some(name.to_string()),
        )
    }

    /// A flags declaration; each flag becomes an identifier node.
    pub fn flags_decl(&mut self, name: &str, flags: &[&str]) -> NodeId {
        let flags = flags.iter().map(|f| self.identifier(f)).collect();
        let flags = self.owned_list(flags);
        self.push(NodeKind::FlagsDeclaration { flags }, Some(name.to_string()))
    }

    /// A reference to a named type.
    pub fn named_type(
        &mut self,
        name: &str,
        pointer_count: usize,
        array_sizes: Vec<NodeId>,
    ) -> NodeId {
        let array_sizes = self.owned_list(array_sizes);
        self.push(
            NodeKind::TypeUsage(TypeUsage {
                pointer_count,
                array_sizes,
                inline_aggregate: None,
                definition: None,
            }),
            Some(name.to_string()),
        )
    }

    /// A type wrapping an inline struct or union declaration.
    pub fn inline_type(
        &mut self,
        aggregate: NodeId,
        pointer_count: usize,
        array_sizes: Vec<NodeId>,
    ) -> NodeId {
        let array_sizes = self.owned_list(array_sizes);
        self.push(
            NodeKind::TypeUsage(TypeUsage {
                pointer_count,
                array_sizes,
                inline_aggregate: Some(aggregate),
                definition: None,
            }),
            None,
        )
    }

    /// A named declaration of `type_usage`, with an optional initializer.
    pub fn declaration(
        &mut self,
        name: &str,
        type_usage: NodeId,
        initializer: Option<NodeId>,
    ) -> NodeId {
        self.push(
            NodeKind::Declaration {
                type_usage,
                initializer,
            },
            Some(name.to_string()),
        )
    }

    /// A tag such as `@Serialize` with its parameter expressions.
    pub fn tag(&mut self, text: &str, parameters: Vec<NodeId>) -> NodeId {
        let parameters = self.owned_list(parameters);
        self.push(NodeKind::Tag { parameters }, Some(text.to_string()))
    }

    /// A named compile-time constant.
    pub fn constant(&mut self, name: &str, expression: NodeId) -> NodeId {
        self.push(
            NodeKind::ConstantDefinition { expression },
            Some(name.to_string()),
        )
    }

    /// A procedure prototype. `return_type` of `None` means no return value.
    pub fn procedure(
        &mut self,
        name: &str,
        return_type: Option<NodeId>,
        parameters: Vec<NodeId>,
    ) -> NodeId {
        let parameters = self.owned_list(parameters);
        self.push(
            NodeKind::ProcedureHeader {
                return_type,
                parameters,
            },
            Some(name.to_string()),
        )
    }

    /// Record which declaration an identifier refers to.
    ///
    /// Panics if `identifier` is not an identifier node.
    pub fn bind_identifier(&mut self, identifier: NodeId, declaration: NodeId) {
        match &mut self.nodes[identifier.index()].kind {
            NodeKind::Identifier { declaration: slot } => *slot = Some(declaration),
            other => panic!("cannot bind a {:?} to a declaration", other.node_type()),
        }
    }

    /// Record which declaration a named type resolves to.
    ///
    /// Panics if `type_usage` is not a type-usage node.
    pub fn resolve_type(&mut self, type_usage: NodeId, definition: NodeId) {
        match &mut self.nodes[type_usage.index()].kind {
            NodeKind::TypeUsage(usage) => usage.definition = Some(definition),
            other => panic!("cannot resolve a {:?} as a type", other.node_type()),
        }
    }

    /// Attach tags to a node, after any it already carries.
    pub fn attach_tags(&mut self, node: NodeId, tags: Vec<NodeId>) {
        let mut all = core::mem::take(&mut self.nodes[node.index()].tags);
        all.extend(tags);
        self.link(&all);
        self.nodes[node.index()].tags = all;
    }

    /// Append a top-level declaration.
    pub fn push_root(&mut self, node: NodeId) {
        if let Some(&last) = self.roots.last() {
            self.nodes[last.index()].next = Some(node);
        }
        self.roots.push(node);
    }

    /// Freeze the tree.
    pub fn finish(self) -> Ast {
        Ast {
            nodes: self.nodes,
            roots: self.roots,
        }
    }
}
