use composer_fsm::Program;

use crate::cli::DumpArgs;
use crate::util::{parse_json, read_input};

pub fn run(args: DumpArgs) {
    let source = read_input(args.program.as_deref());
    let program: Program = parse_json(&source, "compiled program");
    print!("{}", composer_fsm::dump::dump(&program));
}
