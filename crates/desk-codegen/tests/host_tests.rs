use std::cell::RefCell;
use std::sync::Arc;

use desk_ast::{Ast, AstBuilder, Generator, ParsedFile};
use desk_codegen::{CHeaderGenerator, EmitOptions, GeneratorHost};

struct Recorder<'l> {
    name: &'static str,
    log: &'l RefCell<Vec<String>>,
}

impl Generator for Recorder<'_> {
    fn on_init(&mut self) {
        self.log.borrow_mut().push(format!("{} init", self.name));
    }

    fn on_parse(&mut self, file: &ParsedFile) {
        self.log
            .borrow_mut()
            .push(format!("{} parse {}", self.name, file.filename));
    }

    fn on_cleanup(&mut self) {
        self.log.borrow_mut().push(format!("{} cleanup", self.name));
    }
}

/// Keeps every tree it is handed past the end of the run.
#[derive(Default)]
struct Retainer {
    trees: Vec<Arc<Ast>>,
}

impl Generator for Retainer {
    fn on_parse(&mut self, file: &ParsedFile) {
        self.trees.push(Arc::clone(&file.ast));
    }
}

fn constant_file(filename: &str, name: &str, value: &str) -> ParsedFile {
    let mut b = AstBuilder::new();
    let n = b.numeric(value);
    let constant = b.constant(name, n);
    b.push_root(constant);
    ParsedFile::new(filename, b.finish())
}

#[test]
fn test_hooks_run_in_phase_order() {
    let log = RefCell::new(Vec::new());
    let mut first = Recorder { name: "first", log: &log };
    let mut second = Recorder { name: "second", log: &log };
    let files = [
        constant_file("a.desk", "A", "1"),
        constant_file("b.desk", "B", "2"),
    ];

    let mut host = GeneratorHost::new();
    host.register(&mut first).register(&mut second);
    assert_eq!(host.len(), 2);
    host.run(&files);

    assert_eq!(
        *log.borrow(),
        [
            "first init",
            "second init",
            "first parse a.desk",
            "second parse a.desk",
            "first parse b.desk",
            "second parse b.desk",
            "first cleanup",
            "second cleanup",
        ]
    );
}

#[test]
fn test_default_hooks_are_no_ops() {
    struct Silent;
    impl Generator for Silent {}

    let mut silent = Silent;
    let mut host = GeneratorHost::new();
    assert!(host.is_empty());
    host.register(&mut silent);
    host.run(&[constant_file("a.desk", "A", "1")]);
}

#[test]
fn test_generators_may_retain_trees() {
    let mut retainer = Retainer::default();
    {
        let files = vec![constant_file("a.desk", "Answer", "42")];
        let mut host = GeneratorHost::new();
        host.register(&mut retainer);
        host.run(&files);
    }

    assert_eq!(retainer.trees.len(), 1);
    let ast = &retainer.trees[0];
    let root = ast.first_root().unwrap();
    assert_eq!(ast.node(root).name(), "Answer");
}

#[test]
fn test_c_header_generator_renders_each_file() {
    let mut c_gen = CHeaderGenerator::with_options(EmitOptions::new().without_banner());
    let files = [
        constant_file("b.desk", "B", "2"),
        constant_file("a.desk", "A", "1"),
    ];
    GeneratorHost::new().register(&mut c_gen).run(&files);

    assert_eq!(c_gen.output("a.desk"), Some("#define A (1)\n"));
    assert_eq!(c_gen.output("b.desk"), Some("#define B (2)\n"));
    assert_eq!(c_gen.output("c.desk"), None);

    let names: Vec<&str> = c_gen.outputs().map(|(name, _)| name).collect();
    assert_eq!(names, ["a.desk", "b.desk"]);
}

#[test]
fn test_c_header_generator_resets_between_runs() {
    let mut c_gen = CHeaderGenerator::new();
    GeneratorHost::new()
        .register(&mut c_gen)
        .run(&[constant_file("old.desk", "Old", "0")]);
    GeneratorHost::new()
        .register(&mut c_gen)
        .run(&[constant_file("new.desk", "New", "1")]);

    assert_eq!(c_gen.output("old.desk"), None);
    let rendered = c_gen.output("new.desk").unwrap();
    assert!(rendered.starts_with("/* Generated by desk-codegen */"));
    assert!(rendered.ends_with("#define New (1)\n"));
}
