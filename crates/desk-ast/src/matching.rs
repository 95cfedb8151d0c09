//! Declaration type predicates for generators.

use crate::ast::{Ast, NodeId, NodeKind};

/// A textual type descriptor: leading `*` markers then a base type name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypeSignature<'a> {
    pub pointer_count: usize,
    pub base: &'a str,
}

impl<'a> TypeSignature<'a> {
    /// Split `**Widget` into pointer depth 2 and base `Widget`.
    pub fn parse(signature: &'a str) -> Self {
        let base = signature.trim_start_matches('*');
        Self {
            pointer_count: signature.len() - base.len(),
            base,
        }
    }
}

impl Ast {
    /// Whether `node` is a declaration of exactly the type `signature` describes.
    ///
    /// Pointer depth and base name must both match; the name comparison is full-length,
    /// so `Foo` does not match a declaration of `FooBar`. Declarations of inline
    /// aggregates have no base name and never match. Non-declarations are `false`.
    pub fn declaration_is_type(&self, node: NodeId, signature: &str) -> bool {
        if !matches!(self.node(node).kind, NodeKind::Declaration { .. }) {
            return false;
        }
        let wanted = TypeSignature::parse(signature);
        let (type_id, usage) = self.type_usage_of(node);
        usage.inline_aggregate.is_none()
            && usage.pointer_count == wanted.pointer_count
            && self.node(type_id).text() == Some(wanted.base)
    }

    /// Same as [`declaration_is_type`](Self::declaration_is_type), named for member checks.
    pub fn struct_member_is_type(&self, member: NodeId, signature: &str) -> bool {
        self.declaration_is_type(member, signature)
    }
}
