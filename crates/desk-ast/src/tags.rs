//! Tag queries.
//!
//! Tags are matched by name against their text with word-boundary substring
//! matching: `"foo"` finds a tag written `@foo` or `foo bar`, but not `foobar` or `fo`.

use crate::ast::{Ast, NodeId, NodeKind};

fn is_word_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_'
}

/// Whether `needle` occurs in `haystack` aligned to word boundaries.
///
/// If the needle starts with a word character, the byte before the match must not be
/// one; if it ends with a word character, the byte after the match must not be one.
/// An empty needle never matches.
pub fn has_alphanumeric_block(haystack: &str, needle: &str) -> bool {
    let hay = haystack.as_bytes();
    let pat = needle.as_bytes();
    let (Some(&first), Some(&last)) = (pat.first(), pat.last()) else {
        return false;
    };
    if pat.len() > hay.len() {
        return false;
    }

    (0..=hay.len() - pat.len()).any(|start| {
        let end = start + pat.len();
        if &hay[start..end] != pat {
            return false;
        }
        let open = !is_word_char(first) || start == 0 || !is_word_char(hay[start - 1]);
        let close = !is_word_char(last) || end == hay.len() || !is_word_char(hay[end]);
        open && close
    })
}

impl Ast {
    /// The first tag on `node` whose text contains `name` as a whole word.
    pub fn find_tag(&self, node: NodeId, name: &str) -> Option<NodeId> {
        self.node(node).tags.iter().copied().find(|&tag| {
            self.node(tag)
                .text()
                .is_some_and(|text| has_alphanumeric_block(text, name))
        })
    }

    /// Whether `node` carries a tag matching `name`.
    pub fn has_tag(&self, node: NodeId, name: &str) -> bool {
        self.find_tag(node, name).is_some()
    }

    /// Zero-indexed parameter of a tag. `None` when out of range or `tag` is not a tag.
    pub fn tag_parameter(&self, tag: NodeId, index: usize) -> Option<NodeId> {
        self.tag_parameters(tag).get(index).copied()
    }

    /// All parameters of a tag; empty when `tag` is not a tag.
    pub fn tag_parameters(&self, tag: NodeId) -> &[NodeId] {
        match &self.node(tag).kind {
            NodeKind::Tag { parameters } => parameters,
            _ => &[],
        }
    }
}
