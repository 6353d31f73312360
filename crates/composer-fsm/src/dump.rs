//! A human-readable listing of a compiled [`Program`]: one line per
//! state, jump targets shown as both the relative offset and the
//! absolute index they resolve to.

use std::fmt::Write as _;

use crate::program::Program;
use crate::state::State;

pub fn dump(program: &Program) -> String {
    let mut out = String::new();
    for (index, state) in program.states.iter().enumerate() {
        writeln!(out, "{:>4}: {}", index, describe(index, state)).expect("String write is infallible");
    }
    out
}

fn describe(index: usize, state: &State) -> String {
    let target = |offset: i32| index as i64 + offset as i64;
    match state {
        State::Pass { next } => format!("pass{}", fmt_next(index, *next)),
        State::Action { name, next } => format!("action {name:?}{}", fmt_next(index, *next)),
        State::Function { exec, next } => {
            format!("function {:?}{}", exec.code, fmt_next(index, *next))
        }
        State::Literal { value, next } => format!("literal {value}{}", fmt_next(index, *next)),
        State::Choice { then, else_ } => format!(
            "choice then=+{then}->{} else={else_:+}->{}",
            target(*then),
            target(*else_)
        ),
        State::Push { field, next } => match field {
            Some(f) => format!("push field={f:?}{}", fmt_next(index, *next)),
            None => format!("push{}", fmt_next(index, *next)),
        },
        State::Pop { collect, next } => format!("pop collect={collect}{}", fmt_next(index, *next)),
        State::Let { bindings, next } => {
            format!("let {:?}{}", bindings.keys().collect::<Vec<_>>(), fmt_next(index, *next))
        }
        State::Exit { next } => format!("exit{}", fmt_next(index, *next)),
        State::Try { catch, next } => {
            format!("try catch={catch:+}->{}{}", target(*catch), fmt_next(index, *next))
        }
    }
}

fn fmt_next(index: usize, next: Option<i32>) -> String {
    match next {
        Some(n) => format!(" next={n:+}->{}", index as i64 + n as i64),
        None => " (terminal)".to_string(),
    }
}
