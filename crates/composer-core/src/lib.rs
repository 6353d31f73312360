//! AST data model and builder for the serverless composition engine.
//!
//! A [`Composition`] is a normalized AST node plus the action [`Artifact`]s
//! hoisted up from its descendants. Every public constructor in [`builder`]
//! validates its arguments and returns a `Result`, matching the single
//! construction-error kind described for the builder surface.

pub mod artifact;
pub mod builder;
mod desugar;
pub mod error;
pub mod node;
pub mod options;

#[cfg(test)]
mod desugar_tests;
#[cfg(test)]
mod node_tests;

pub use artifact::{Artifact, ArtifactBody};
pub use builder::{
    action, finally_, function, if_, let_, literal, literal_default, named, repeat, retain,
    retry, script, seq, sequence, task, try_, while_, Composition, ExecInput, Task,
};
pub use error::BuilderError;
pub use node::{
    ActionNode, Exec, FinallyNode, FunctionNode, IfNode, LetNode, LiteralNode, Node, RetainNode,
    SequenceNode, TryNode, WhileNode,
};
pub use options::{ActionOptions, IfOptions, RetainOptions, WhileOptions};
