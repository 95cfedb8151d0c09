//! Static generator hosting.
//!
//! Dynamic loading of generator plug-ins belongs to the host application. This module
//! covers the part every host shares: invoking the [`Generator`] hooks in the right
//! order over a batch of parsed files.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use desk_ast::{Generator, ParsedFile};
use tracing::{debug, info, warn};

use crate::c::compile_to_c_with_options;
use crate::options::EmitOptions;

/// Runs registered generators over parsed files.
#[derive(Default)]
pub struct GeneratorHost<'g> {
    generators: Vec<&'g mut dyn Generator>,
}

impl<'g> GeneratorHost<'g> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a generator; hooks run in registration order.
    pub fn register(&mut self, generator: &'g mut dyn Generator) -> &mut Self {
        self.generators.push(generator);
        self
    }

    pub fn len(&self) -> usize {
        self.generators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }

    /// Call every `on_init`, then `on_parse` for each file, then every `on_cleanup`.
    pub fn run(&mut self, files: &[ParsedFile]) {
        info!(
            generators = self.generators.len(),
            files = files.len(),
            "running generators"
        );
        for generator in self.generators.iter_mut() {
            generator.on_init();
        }
        for file in files {
            debug!(file = %file.filename, nodes = file.ast.len(), "dispatching parsed file");
            for generator in self.generators.iter_mut() {
                generator.on_parse(file);
            }
        }
        for generator in self.generators.iter_mut() {
            generator.on_cleanup();
        }
    }
}

/// Reference generator: renders each parsed file as C source.
#[derive(Clone, Debug, Default)]
pub struct CHeaderGenerator {
    options: EmitOptions,
    outputs: BTreeMap<String, String>,
}

impl CHeaderGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: EmitOptions) -> Self {
        Self {
            options,
            outputs: BTreeMap::new(),
        }
    }

    /// Rendered source for `filename`, if that file was parsed.
    pub fn output(&self, filename: &str) -> Option<&str> {
        self.outputs.get(filename).map(String::as_str)
    }

    /// Every rendered file, ordered by file name.
    pub fn outputs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.outputs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Generator for CHeaderGenerator {
    fn on_init(&mut self) {
        self.outputs.clear();
    }

    fn on_parse(&mut self, file: &ParsedFile) {
        match compile_to_c_with_options(&file.ast, self.options.clone()) {
            Ok(source) => {
                self.outputs.insert(file.filename.clone(), source);
            }
            Err(err) => warn!(file = %file.filename, %err, "failed to render C source"),
        }
    }

    fn on_cleanup(&mut self) {
        debug!(files = self.outputs.len(), "C rendering finished");
    }
}
