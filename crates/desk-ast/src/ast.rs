//! Node model for desk syntax trees.
//!
//! A parsed file is held in a single [`Ast`] arena. Nodes refer to each other by
//! [`NodeId`], which keeps the identifier-to-declaration back-reference a plain lookup
//! key rather than a second owning edge.

use alloc::string::String;
use alloc::vec::Vec;

/// Index of a node inside its [`Ast`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) fn from_index(index: usize) -> Self {
        match u32::try_from(index) {
            Ok(raw) => NodeId(raw),
            Err(_) => panic!("syntax tree exceeds {} nodes", u32::MAX),
        }
    }

    /// Position of this node in the arena.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Payload-free discriminant of a [`NodeKind`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeType {
    Identifier,
    NumericConstant,
    StringConstant,
    CharConstant,
    UnaryOperator,
    BinaryOperator,
    StructDeclaration,
    UnionDeclaration,
    EnumDeclaration,
    FlagsDeclaration,
    Declaration,
    TypeUsage,
    Tag,
    ConstantDefinition,
    ProcedureHeader,
}

/// Unary operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// Sentinel for an operator the front-end could not classify.
    Invalid,
    /// Negation (-).
    Negate,
    /// Logical not (!).
    Not,
    /// Bitwise not (~).
    BitNot,
}

impl UnaryOp {
    /// Source spelling of the operator.
    pub fn as_str(self) -> &'static str {
        match self {
            UnaryOp::Invalid => "(invalid)",
            UnaryOp::Negate => "-",
            UnaryOp::Not => "!",
            UnaryOp::BitNot => "~",
        }
    }
}

/// Binary operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// Sentinel for an operator the front-end could not classify.
    Invalid,
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    // Bitwise
    Shl,
    Shr,
    BitAnd,
    BitOr,
    // Logical
    And,
    Or,
}

impl BinaryOp {
    /// Source spelling of the operator.
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOp::Invalid => "(invalid)",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitOr => "|",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        }
    }
}

/// A reference to a concrete type: pointer depth, array dimensions, and either a named
/// type (the owning node's text) or an inline anonymous aggregate.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TypeUsage {
    /// Number of pointer markers.
    pub pointer_count: usize,
    /// One expression per array dimension, outermost first.
    pub array_sizes: Vec<NodeId>,
    /// Inline struct or union declaration, if the type is anonymous.
    pub inline_aggregate: Option<NodeId>,
    /// Declaration the named type resolves to, when the front-end resolved it.
    /// Lookup only; never followed during structural recursion.
    pub definition: Option<NodeId>,
}

/// Per-kind payload of a node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// Identifier use.
    Identifier {
        /// Declaration this identifier names. Absent when unresolved.
        declaration: Option<NodeId>,
    },
    NumericConstant,
    StringConstant,
    CharConstant,
    UnaryOperator {
        op: UnaryOp,
        operand: NodeId,
    },
    BinaryOperator {
        op: BinaryOp,
        left: NodeId,
        right: NodeId,
    },
    StructDeclaration {
        members: Vec<NodeId>,
    },
    UnionDeclaration {
        members: Vec<NodeId>,
    },
    EnumDeclaration {
        constants: Vec<NodeId>,
    },
    FlagsDeclaration {
        flags: Vec<NodeId>,
    },
    Declaration {
        type_usage: NodeId,
        initializer: Option<NodeId>,
    },
    TypeUsage(TypeUsage),
    Tag {
        parameters: Vec<NodeId>,
    },
    ConstantDefinition {
        expression: NodeId,
    },
    ProcedureHeader {
        /// Absent means the procedure returns nothing.
        return_type: Option<NodeId>,
        parameters: Vec<NodeId>,
    },
}

impl NodeKind {
    /// The discriminant of this payload.
    pub fn node_type(&self) -> NodeType {
        match self {
            NodeKind::Identifier { .. } => NodeType::Identifier,
            NodeKind::NumericConstant => NodeType::NumericConstant,
            NodeKind::StringConstant => NodeType::StringConstant,
            NodeKind::CharConstant => NodeType::CharConstant,
            NodeKind::UnaryOperator { .. } => NodeType::UnaryOperator,
            NodeKind::BinaryOperator { .. } => NodeType::BinaryOperator,
            NodeKind::StructDeclaration { .. } => NodeType::StructDeclaration,
            NodeKind::UnionDeclaration { .. } => NodeType::UnionDeclaration,
            NodeKind::EnumDeclaration { .. } => NodeType::EnumDeclaration,
            NodeKind::FlagsDeclaration { .. } => NodeType::FlagsDeclaration,
            NodeKind::Declaration { .. } => NodeType::Declaration,
            NodeKind::TypeUsage(_) => NodeType::TypeUsage,
            NodeKind::Tag { .. } => NodeType::Tag,
            NodeKind::ConstantDefinition { .. } => NodeType::ConstantDefinition,
            NodeKind::ProcedureHeader { .. } => NodeType::ProcedureHeader,
        }
    }
}

/// A single element of the tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    /// Kind and payload.
    pub kind: NodeKind,
    /// Source spelling: identifier, keyword, literal or declared name.
    pub text: Option<String>,
    /// Next sibling in the list that owns this node.
    pub next: Option<NodeId>,
    /// Tags attached to this node, in source order.
    pub tags: Vec<NodeId>,
}

impl Node {
    pub(crate) fn new(kind: NodeKind, text: Option<String>) -> Self {
        Self {
            kind,
            text,
            next: None,
            tags: Vec::new(),
        }
    }

    /// The discriminant of this node.
    pub fn node_type(&self) -> NodeType {
        self.kind.node_type()
    }

    /// The node's text, if it has any.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// The node's text, or the empty string for anonymous nodes.
    pub fn name(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    /// Whether this node is one of the expression kinds.
    pub fn is_expression(&self) -> bool {
        matches!(
            self.node_type(),
            NodeType::Identifier
                | NodeType::NumericConstant
                | NodeType::StringConstant
                | NodeType::CharConstant
                | NodeType::UnaryOperator
                | NodeType::BinaryOperator
        )
    }
}

/// An immutable syntax tree for one parsed file.
///
/// Built with [`AstBuilder`](crate::AstBuilder). Once finished, nothing mutates it, so
/// any number of readers may share it across threads.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Ast {
    pub(crate) nodes: Vec<Node>,
    pub(crate) roots: Vec<NodeId>,
}

impl Ast {
    /// Look up a node.
    ///
    /// Panics if `id` does not belong to this tree.
    pub fn node(&self, id: NodeId) -> &Node {
        match self.nodes.get(id.index()) {
            Some(node) => node,
            None => panic!("node {:?} does not belong to this tree", id),
        }
    }

    /// Look up a node, returning `None` for foreign ids.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Top-level declarations, in source order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// The first top-level declaration; following its `next` chain visits every root.
    pub fn first_root(&self) -> Option<NodeId> {
        self.roots.first().copied()
    }

    /// Number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over `id` and every sibling after it.
    pub fn siblings(&self, id: NodeId) -> Siblings<'_> {
        Siblings {
            ast: self,
            current: Some(id),
        }
    }

    /// Owned structural children of `id`, in source order.
    ///
    /// Tags and the identifier/type back-references are not children.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        match &self.node(id).kind {
            NodeKind::Identifier { .. }
            | NodeKind::NumericConstant
            | NodeKind::StringConstant
            | NodeKind::CharConstant => Vec::new(),
            NodeKind::UnaryOperator { operand, .. } => alloc::vec![*operand],
            NodeKind::BinaryOperator { left, right, .. } => alloc::vec![*left, *right],
            NodeKind::StructDeclaration { members } | NodeKind::UnionDeclaration { members } => {
                members.clone()
            }
            NodeKind::EnumDeclaration { constants } => constants.clone(),
            NodeKind::FlagsDeclaration { flags } => flags.clone(),
            NodeKind::Declaration {
                type_usage,
                initializer,
            } => {
                let mut out = alloc::vec![*type_usage];
                out.extend(initializer.iter().copied());
                out
            }
            NodeKind::TypeUsage(usage) => {
                let mut out = usage.array_sizes.clone();
                out.extend(usage.inline_aggregate.iter().copied());
                out
            }
            NodeKind::Tag { parameters } => parameters.clone(),
            NodeKind::ConstantDefinition { expression } => alloc::vec![*expression],
            NodeKind::ProcedureHeader {
                return_type,
                parameters,
            } => {
                let mut out: Vec<NodeId> = return_type.iter().copied().collect();
                out.extend(parameters.iter().copied());
                out
            }
        }
    }

    /// The declaration an identifier names, if it was resolved.
    ///
    /// Returns `None` for unresolved identifiers and for nodes that are not identifiers.
    pub fn declaration_of(&self, identifier: NodeId) -> Option<NodeId> {
        match &self.node(identifier).kind {
            NodeKind::Identifier { declaration } => *declaration,
            _ => None,
        }
    }

    /// The type-usage payload of a node, if it is one.
    pub fn as_type_usage(&self, id: NodeId) -> Option<&TypeUsage> {
        match &self.node(id).kind {
            NodeKind::TypeUsage(usage) => Some(usage),
            _ => None,
        }
    }

    /// The type-usage node and payload of a declaration.
    ///
    /// Panics if `declaration` is not a declaration or its type slot holds something
    /// other than a type-usage; both mean the tree was built inconsistently.
    pub fn type_usage_of(&self, declaration: NodeId) -> (NodeId, &TypeUsage) {
        let type_id = match &self.node(declaration).kind {
            NodeKind::Declaration { type_usage, .. } => *type_usage,
            other => panic!(
                "node {:?} is a {:?}, expected a declaration",
                declaration,
                other.node_type()
            ),
        };
        match self.as_type_usage(type_id) {
            Some(usage) => (type_id, usage),
            None => panic!(
                "declaration {:?} has a {:?} in its type slot",
                declaration,
                self.node(type_id).node_type()
            ),
        }
    }
}

/// Iterator over a node and the siblings that follow it.
#[derive(Clone, Debug)]
pub struct Siblings<'a> {
    ast: &'a Ast,
    current: Option<NodeId>,
}

impl<'a> Iterator for Siblings<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.current?;
        self.current = self.ast.node(id).next;
        Some(id)
    }
}
