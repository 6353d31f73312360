//! The deployable artifact shape (§6.1): a FaaS action whose body embeds
//! the flat FSM as a JSON literal, plus a manifest annotation carrying
//! the original AST so tooling can recover the source composition.

use composer_core::{Artifact, Node};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::program::Program;

/// `{key: "conductor", value: <original AST>}` (§6.1).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub key: String,
    pub value: Value,
}

impl Manifest {
    pub const KEY: &'static str = "conductor";

    pub fn for_ast(ast: &Node) -> Result<Self, serde_json::Error> {
        Ok(Manifest {
            key: Self::KEY.to_string(),
            value: serde_json::to_value(ast)?,
        })
    }
}

/// The unit the builder surface deploys: a named program, the action
/// artifacts its `action` nodes captured, and the manifest annotation
/// recovering the source AST.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deployable {
    pub name: String,
    pub program: Program,
    pub artifacts: Vec<Artifact>,
    pub annotation: Manifest,
}
