//! Action artifacts attached to `action` nodes and hoisted up the tree.
//!
//! `action(name, options)` can carry a body — either a native sequence of
//! other action names, or inline code — that must travel with the
//! composition to deploy time even though it has no effect on the FSM the
//! compiler emits for that leaf. Every constructor that embeds a child
//! composition by value hoists that child's artifacts into its own.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::BuilderError;

/// A deployable unit captured by an `action` node's options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    pub name: String,
    pub body: ArtifactBody,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArtifactBody {
    /// `action(name, {sequence: [...]})` — a native FaaS sequence artifact.
    NativeSequence(Vec<String>),
    /// `action(name, {filename: ...})` or `action(name, {action: ...})` —
    /// inline code or an already-shaped action record.
    Inline(Value),
}

/// Hoists `incoming` into `target`, one at a time, failing with
/// [`BuilderError::DuplicateArtifact`] the moment a name already present
/// in `target` reappears (§7: "duplicate named-action" is a synchronous
/// construction error). Every constructor that combines more than one
/// child's artifacts — `sequence`, `if`, `while`, `try`, `finally` — goes
/// through this instead of a bare `Vec::extend` so two same-named
/// artifacts can never silently coexist.
pub(crate) fn merge_artifacts(
    target: &mut Vec<Artifact>,
    incoming: Vec<Artifact>,
) -> Result<(), BuilderError> {
    for artifact in incoming {
        if target.iter().any(|existing| existing.name == artifact.name) {
            return Err(BuilderError::DuplicateArtifact(artifact.name));
        }
        target.push(artifact);
    }
    Ok(())
}
