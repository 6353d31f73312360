use composer_core::node::Node;

use crate::cli::BuildArgs;
use crate::util::{fail, parse_json, read_input};

pub fn run(args: BuildArgs) {
    let source = read_input(args.ast.as_deref());
    let ast: Node = parse_json(&source, "composition AST");

    let program = composer_compiler::compile(&ast).unwrap_or_else(|e| fail(e));
    let json = serde_json::to_string_pretty(&program).expect("Program always serializes");

    match args.out {
        Some(path) => std::fs::write(&path, json).unwrap_or_else(|e| fail(format!("writing {}: {e}", path.display()))),
        None => println!("{json}"),
    }
}
