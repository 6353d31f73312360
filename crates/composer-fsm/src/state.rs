//! A single FSM state record (§3.2). `next`/`then`/`else`/`catch` are
//! signed offsets relative to the owning state's own index; an absent
//! `next` on the terminal state encodes program completion.

use composer_core::Exec;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum State {
    Pass {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        next: Option<i32>,
    },
    Action {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        next: Option<i32>,
    },
    Function {
        exec: Exec,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        next: Option<i32>,
    },
    Literal {
        value: Value,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        next: Option<i32>,
    },
    Choice {
        then: i32,
        #[serde(rename = "else")]
        else_: i32,
    },
    Push {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        field: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        next: Option<i32>,
    },
    Pop {
        #[serde(default)]
        collect: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        next: Option<i32>,
    },
    Let {
        #[serde(rename = "let")]
        bindings: IndexMap<String, Value>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        next: Option<i32>,
    },
    Exit {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        next: Option<i32>,
    },
    Try {
        catch: i32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        next: Option<i32>,
    },
}

impl State {
    /// The state's own `type` tag, for diagnostics and [`crate::dump`].
    pub fn type_name(&self) -> &'static str {
        match self {
            State::Pass { .. } => "pass",
            State::Action { .. } => "action",
            State::Function { .. } => "function",
            State::Literal { .. } => "literal",
            State::Choice { .. } => "choice",
            State::Push { .. } => "push",
            State::Pop { .. } => "pop",
            State::Let { .. } => "let",
            State::Exit { .. } => "exit",
            State::Try { .. } => "try",
        }
    }

    /// Every relative offset this state carries, paired with a label for
    /// diagnostics (`"next"`, `"then"`, `"else"`, `"catch"`).
    pub fn jumps(&self) -> Vec<(&'static str, i32)> {
        match self {
            State::Pass { next }
            | State::Action { next, .. }
            | State::Function { next, .. }
            | State::Literal { next, .. }
            | State::Push { next, .. }
            | State::Pop { next, .. }
            | State::Let { next, .. }
            | State::Exit { next } => next.map(|n| vec![("next", n)]).unwrap_or_default(),
            State::Try { catch, next } => {
                let mut v = vec![("catch", *catch)];
                if let Some(n) = next {
                    v.push(("next", *n));
                }
                v
            }
            State::Choice { then, else_ } => vec![("then", *then), ("else", *else_)],
        }
    }

    /// Sets this state's `next` offset. Panics on `Choice`, which has no
    /// `next` field — the compiler never calls this on a state it just
    /// emitted as a block's tail when that tail is a `Choice`, since no
    /// compiled block ever ends in one (see composer-compiler's `lower`).
    pub fn set_next(&mut self, offset: i32) {
        match self {
            State::Pass { next }
            | State::Action { next, .. }
            | State::Function { next, .. }
            | State::Literal { next, .. }
            | State::Push { next, .. }
            | State::Pop { next, .. }
            | State::Let { next, .. }
            | State::Exit { next }
            | State::Try { next, .. } => *next = Some(offset),
            State::Choice { .. } => unreachable!("a compiled block never ends in a bare choice state"),
        }
    }
}
