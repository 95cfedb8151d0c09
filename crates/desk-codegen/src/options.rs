//! Options for C emission.

use alloc::string::{String, ToString};

/// Flag sets with at least this many members are stored in a 64-bit alias.
pub const WIDE_FLAGS_THRESHOLD: usize = 31;

/// Options for C code emission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmitOptions {
    /// One level of member indentation.
    /// Default: four spaces
    pub indent: String,
    /// Render tags as a `//` comment line ahead of the tagged node.
    /// Default: `true`
    pub tag_comments: bool,
    /// Member count at which a flag set switches to 64-bit storage.
    /// Values above [`WIDE_FLAGS_THRESHOLD`] are clamped to it.
    /// Default: [`WIDE_FLAGS_THRESHOLD`]
    pub wide_flags_threshold: usize,
    /// Comment written at the top of a whole generated file.
    /// Default: `Some("Generated by desk-codegen")`
    pub banner: Option<String>,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            indent: "    ".to_string(),
            tag_comments: true,
            wide_flags_threshold: WIDE_FLAGS_THRESHOLD,
            banner: Some("Generated by desk-codegen".to_string()),
        }
    }
}

impl EmitOptions {
    /// Create default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-level indentation string.
    pub fn with_indent(mut self, indent: &str) -> Self {
        self.indent = indent.to_string();
        self
    }

    /// Do not render tag comment lines.
    pub fn without_tag_comments(mut self) -> Self {
        self.tag_comments = false;
        self
    }

    /// Set the member count at which flag sets use 64-bit storage.
    ///
    /// Only lowering takes effect; the emitter never keeps 31 or more flags in 32 bits.
    pub fn with_wide_flags_threshold(mut self, threshold: usize) -> Self {
        self.wide_flags_threshold = threshold;
        self
    }

    /// Set the file banner comment.
    pub fn with_banner(mut self, banner: &str) -> Self {
        self.banner = Some(banner.to_string());
        self
    }

    /// Omit the file banner comment.
    pub fn without_banner(mut self) -> Self {
        self.banner = None;
        self
    }
}
