//! Source emission for desk syntax trees.
//!
//! ## Modules
//!
//! - [`c`] - reference backend rendering a tree as compilable C declarations
//! - [`host`] - runs [`Generator`](desk_ast::Generator) hooks over parsed files
//!
//! ## Usage
//!
//! ```
//! use desk_ast::AstBuilder;
//! use desk_codegen::compile_to_c;
//!
//! let mut b = AstBuilder::new();
//! let flags = b.flags_decl("EntityFlags", &["Alive", "Visible"]);
//! b.push_root(flags);
//! let ast = b.finish();
//!
//! let c_code = compile_to_c(&ast).unwrap();
//! assert!(c_code.contains("#define Visible (1u<<1)"));
//! assert!(c_code.contains("typedef unsigned int EntityFlags;"));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "alloc")]
pub mod c;
#[cfg(feature = "alloc")]
mod error;
#[cfg(feature = "alloc")]
pub mod host;
#[cfg(feature = "alloc")]
mod options;
#[cfg(feature = "std")]
mod sink;

#[cfg(feature = "alloc")]
pub use c::{compile_to_c, compile_to_c_with_options, emit, CEmitter};
#[cfg(feature = "alloc")]
pub use error::EmitError;
#[cfg(feature = "alloc")]
pub use host::{CHeaderGenerator, GeneratorHost};
#[cfg(feature = "alloc")]
pub use options::{EmitOptions, WIDE_FLAGS_THRESHOLD};
#[cfg(feature = "std")]
pub use sink::IoSink;
