//! The composition AST: one tagged node per kind from §3.1.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `exec: {kind, code}` — the source text of a `function` node, or the
/// code body an `action` artifact carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exec {
    pub kind: String,
    pub code: String,
}

impl Exec {
    pub const DEFAULT_KIND: &'static str = "nodejs:default";

    pub fn new(code: impl Into<String>) -> Self {
        Self {
            kind: Self::DEFAULT_KIND.to_string(),
            code: code.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionNode {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionNode {
    pub exec: Exec,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiteralNode {
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceNode {
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IfNode {
    pub test: Box<Node>,
    pub consequent: Box<Node>,
    pub alternate: Box<Node>,
    #[serde(default)]
    pub nosave: bool,
    #[serde(default, flatten)]
    pub extra: IndexMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhileNode {
    pub test: Box<Node>,
    pub body: Box<Node>,
    #[serde(default)]
    pub nosave: bool,
    #[serde(default, flatten)]
    pub extra: IndexMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TryNode {
    pub body: Box<Node>,
    pub handler: Box<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinallyNode {
    pub body: Box<Node>,
    pub finalizer: Box<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LetNode {
    pub declarations: IndexMap<String, Value>,
    pub body: Box<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetainNode {
    pub body: Box<Node>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Whether the emitted `pop` pairs the pre-body snapshot with the
    /// body's result (`true`, the public `retain()` constructor's only
    /// shape) or just restores the captured field in place of `params`
    /// (`false`, used internally by desugaring to project a field back
    /// out without running it through a `function`/`literal`/`pass`
    /// step — see `composer-core::desugar::retain_catch`). Defaults to
    /// `true` so AST JSON predating this field still round-trips.
    #[serde(default = "collect_default")]
    pub collect: bool,
    #[serde(default, flatten)]
    pub extra: IndexMap<String, Value>,
}

fn collect_default() -> bool {
    true
}

/// A single composition AST node. Unrecognized option keys on `If`,
/// `While`, and `Retain` are preserved in `extra` but ignored by the
/// compiler (§4.1: "preserved but ignored").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    Action(ActionNode),
    Function(FunctionNode),
    Literal(LiteralNode),
    Sequence(SequenceNode),
    If(IfNode),
    While(WhileNode),
    Try(TryNode),
    Finally(FinallyNode),
    Let(LetNode),
    Retain(RetainNode),
}

impl Node {
    pub fn empty_sequence() -> Self {
        Node::Sequence(SequenceNode { children: vec![] })
    }
}
