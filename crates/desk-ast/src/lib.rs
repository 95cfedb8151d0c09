//! Syntax tree for the desk declaration language.
//!
//! This crate holds the in-memory tree a front-end produces (structs, unions, enums,
//! flag sets, constants, procedure headers and constant expressions) together with the
//! read-only queries generators run over it:
//!
//! - [`Ast::find_tag`] / [`Ast::has_tag`] / [`Ast::tag_parameter`] for tag metadata
//! - [`Ast::evaluate`] to fold constant expressions to integers
//! - [`Ast::declaration_is_type`] to match declarations against `**Name` signatures
//! - [`case`] to convert identifiers between naming conventions
//!
//! Every query is total: a missing tag, an out-of-range index or a division by zero
//! yields `None`, `false` or `0`, never an error.

#![no_std]
#![forbid(unsafe_code)]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "alloc")]
mod ast;
#[cfg(feature = "alloc")]
mod builder;
#[cfg(feature = "alloc")]
mod eval;
#[cfg(feature = "alloc")]
mod generator;
#[cfg(feature = "alloc")]
mod matching;
#[cfg(feature = "alloc")]
mod tags;

#[cfg(feature = "alloc")]
pub mod case;

#[cfg(feature = "alloc")]
pub use ast::*;
#[cfg(feature = "alloc")]
pub use builder::AstBuilder;
#[cfg(feature = "alloc")]
pub use eval::parse_leading_integer;
#[cfg(feature = "alloc")]
pub use generator::{Generator, ParsedFile};
#[cfg(feature = "alloc")]
pub use matching::TypeSignature;
#[cfg(feature = "alloc")]
pub use tags::has_alphanumeric_block;

/// Crate version, as `major.minor.patch`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
