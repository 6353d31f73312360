//! Pure constructors for each composition kind (§4.1).
//!
//! Rust has no runtime notion of a "callable" JSON value, so the
//! `task`/`sequence` coercion table in §4.1 — which distinguishes a
//! callable argument (coerced via `function`) from a plain string
//! argument (coerced via `action`) — is expressed here as a type-level
//! choice instead of a runtime typeof check: pass a bare `&str`/`String`
//! for the action-name case, or wrap source text in [`script`] for the
//! function case. Because [`Task::FunctionSource`] can only ever hold a
//! `String`, there is no way to hand this API a captured Rust closure in
//! the first place — the "reject captured native functions" rule from
//! §3.1 and §7 holds structurally rather than by an `=== "[native
//! code]"`-style runtime check.
//!
//! `if`, `while`, `try`, and `let` are Rust keywords, so their
//! constructors carry a trailing underscore.

use indexmap::IndexMap;
use serde_json::{json, Value};

use crate::artifact::{merge_artifacts, Artifact, ArtifactBody};
use crate::desugar;
use crate::error::BuilderError;
use crate::node::{
    ActionNode, Exec, FinallyNode, FunctionNode, IfNode, LetNode, LiteralNode, Node, RetainNode,
    SequenceNode, TryNode, WhileNode,
};
use crate::options::{ActionOptions, IfOptions, RetainOptions, WhileOptions};

/// A built, normalized AST node plus the action artifacts hoisted up from
/// its descendants. This is the builder's universal return type.
#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    pub node: Node,
    pub artifacts: Vec<Artifact>,
    pub name: Option<String>,
}

impl Composition {
    pub(crate) fn leaf(node: Node) -> Self {
        Composition {
            node,
            artifacts: Vec::new(),
            name: None,
        }
    }

    pub(crate) fn with_artifacts(node: Node, artifacts: Vec<Artifact>) -> Self {
        Composition {
            node,
            artifacts,
            name: None,
        }
    }
}

/// `named(name)` — attaches a deployable identity to a composition.
/// Unnamed compositions can still be compiled and run in-process but
/// cannot be deployed (§6.3, SPEC_FULL.md's "named / deployable identity").
pub fn named(mut composition: Composition, name: impl Into<String>) -> Composition {
    composition.name = Some(name.into());
    composition
}

/// What [`task`] accepts: the Rust rendition of `task`'s JS-side coercion
/// table (§4.1) — `null` → empty sequence, an existing composition →
/// itself, a callable → `function`, a string → `action`.
#[derive(Debug, Clone)]
pub enum Task {
    Empty,
    Node(Composition),
    FunctionSource(String),
    ActionName(String),
}

impl From<Composition> for Task {
    fn from(c: Composition) -> Self {
        Task::Node(c)
    }
}

impl From<&str> for Task {
    fn from(s: &str) -> Self {
        Task::ActionName(s.to_string())
    }
}

impl From<String> for Task {
    fn from(s: String) -> Self {
        Task::ActionName(s)
    }
}

impl From<()> for Task {
    fn from(_: ()) -> Self {
        Task::Empty
    }
}

/// Marks a source-text argument as a function body rather than an action
/// name, standing in for §4.1's "callable" coercion case.
pub fn script(code: impl Into<String>) -> Task {
    Task::FunctionSource(code.into())
}

/// `task(x)` (§4.1): coerces `null` to an empty sequence, an existing
/// composition to itself, [`script`] source to a `function`, and a plain
/// string to an `action` name.
pub fn task(input: impl Into<Task>) -> Result<Composition, BuilderError> {
    match input.into() {
        Task::Empty => Ok(Composition::leaf(Node::empty_sequence())),
        Task::Node(c) => Ok(c),
        Task::FunctionSource(src) => function(src),
        Task::ActionName(name) => action(name, ActionOptions::default()),
    }
}

/// `sequence(…xs)` (§4.1, alias `seq`): variadic, each argument coerced
/// via [`task`]. A sequence is the array of its fully flattened children;
/// a one-element sequence collapses to its element (§3.1).
pub fn sequence<I, T>(items: I) -> Result<Composition, BuilderError>
where
    I: IntoIterator<Item = T>,
    T: Into<Task>,
{
    let mut children = Vec::new();
    let mut artifacts = Vec::new();
    for item in items {
        let built = task(item)?;
        match built.node {
            Node::Sequence(SequenceNode { children: inner }) => children.extend(inner),
            other => children.push(other),
        }
        merge_artifacts(&mut artifacts, built.artifacts)?;
    }
    if children.len() == 1 {
        return Ok(Composition::with_artifacts(
            children.into_iter().next().unwrap(),
            artifacts,
        ));
    }
    Ok(Composition::with_artifacts(
        Node::Sequence(SequenceNode { children }),
        artifacts,
    ))
}

/// Alias for [`sequence`] (§6.3: "sequence (alias seq)").
pub fn seq<I, T>(items: I) -> Result<Composition, BuilderError>
where
    I: IntoIterator<Item = T>,
    T: Into<Task>,
{
    sequence(items)
}

/// `if(test, consequent, alternate, options?)` (§4.1). Arity is enforced
/// by the Rust signature itself (exactly four parameters) rather than a
/// runtime count check.
pub fn if_(
    test: impl Into<Task>,
    consequent: impl Into<Task>,
    alternate: impl Into<Task>,
    options: IfOptions,
) -> Result<Composition, BuilderError> {
    let test = task(test)?;
    let consequent = task(consequent)?;
    let alternate = task(alternate)?;
    let mut artifacts = test.artifacts;
    merge_artifacts(&mut artifacts, consequent.artifacts)?;
    merge_artifacts(&mut artifacts, alternate.artifacts)?;
    Ok(Composition::with_artifacts(
        Node::If(IfNode {
            test: Box::new(test.node),
            consequent: Box::new(consequent.node),
            alternate: Box::new(alternate.node),
            nosave: options.nosave,
            extra: options.extra,
        }),
        artifacts,
    ))
}

/// `while(test, body, options?)` (§4.1).
pub fn while_(
    test: impl Into<Task>,
    body: impl Into<Task>,
    options: WhileOptions,
) -> Result<Composition, BuilderError> {
    let test = task(test)?;
    let body = task(body)?;
    let mut artifacts = test.artifacts;
    merge_artifacts(&mut artifacts, body.artifacts)?;
    Ok(Composition::with_artifacts(
        Node::While(WhileNode {
            test: Box::new(test.node),
            body: Box::new(body.node),
            nosave: options.nosave,
            extra: options.extra,
        }),
        artifacts,
    ))
}

/// `try(body, handler, options?)` (§4.1). No options are recognized for
/// `try` in §3.1's table, so unlike `if`/`while`/`retain` this
/// constructor takes no options argument at all.
pub fn try_(body: impl Into<Task>, handler: impl Into<Task>) -> Result<Composition, BuilderError> {
    let body = task(body)?;
    let handler = task(handler)?;
    let mut artifacts = body.artifacts;
    merge_artifacts(&mut artifacts, handler.artifacts)?;
    Ok(Composition::with_artifacts(
        Node::Try(TryNode {
            body: Box::new(body.node),
            handler: Box::new(handler.node),
        }),
        artifacts,
    ))
}

/// `finally(body, finalizer, options?)` (§4.1).
pub fn finally_(
    body: impl Into<Task>,
    finalizer: impl Into<Task>,
) -> Result<Composition, BuilderError> {
    let body = task(body)?;
    let finalizer = task(finalizer)?;
    let mut artifacts = body.artifacts;
    merge_artifacts(&mut artifacts, finalizer.artifacts)?;
    Ok(Composition::with_artifacts(
        Node::Finally(FinallyNode {
            body: Box::new(body.node),
            finalizer: Box::new(finalizer.node),
        }),
        artifacts,
    ))
}

/// `let(decls, …body)` (§4.1): `decls` is a plain object; body is a
/// sequence.
pub fn let_<I, T>(
    declarations: IndexMap<String, Value>,
    body: I,
) -> Result<Composition, BuilderError>
where
    I: IntoIterator<Item = T>,
    T: Into<Task>,
{
    let body = sequence(body)?;
    Ok(Composition::with_artifacts(
        Node::Let(LetNode {
            declarations,
            body: Box::new(body.node),
        }),
        body.artifacts,
    ))
}

/// `literal(v, options?)` (§4.1): `v` must not be callable — trivially
/// true here since `v` is a [`serde_json::Value`], which has no callable
/// variant — and defaults to `{}` when absent (see [`literal_default`]).
pub fn literal(value: Value) -> Result<Composition, BuilderError> {
    Ok(Composition::leaf(Node::Literal(LiteralNode { value })))
}

/// `literal()` with no argument, defaulting `v` to `{}` per §4.1.
pub fn literal_default() -> Result<Composition, BuilderError> {
    literal(json!({}))
}

/// What [`function`] accepts (§4.1): source text (wrapped as
/// `{kind:'nodejs:default', code}`), or an already-shaped [`Exec`]
/// record.
#[derive(Debug, Clone)]
pub enum ExecInput {
    Source(String),
    Exec(Exec),
}

impl From<&str> for ExecInput {
    fn from(s: &str) -> Self {
        ExecInput::Source(s.to_string())
    }
}

impl From<String> for ExecInput {
    fn from(s: String) -> Self {
        ExecInput::Source(s)
    }
}

impl From<Exec> for ExecInput {
    fn from(e: Exec) -> Self {
        ExecInput::Exec(e)
    }
}

const NATIVE_CODE_MARKER: &str = "[native code]";

/// `function(exec, options?)` (§4.1). Rejects any source whose text
/// reports itself as native (the boundary behavior pinned in §8: "A
/// function whose source contains `[native code]` is rejected at build
/// time"), which is this crate's concrete rendition of "functions that
/// report as built-in are rejected" from §3.1.
pub fn function(exec: impl Into<ExecInput>) -> Result<Composition, BuilderError> {
    let exec = match exec.into() {
        ExecInput::Source(code) => Exec::new(code),
        ExecInput::Exec(exec) => exec,
    };
    if exec.code.contains(NATIVE_CODE_MARKER) {
        return Err(BuilderError::InvalidArgument {
            constructor: "function",
            reason: "refusing to capture a native function".to_string(),
        });
    }
    Ok(Composition::leaf(Node::Function(FunctionNode { exec })))
}

fn qualify_action_name(owner: &str, candidate: &str) -> String {
    if candidate.contains('/') {
        candidate.to_string()
    } else {
        format!("{owner}/{candidate}")
    }
}

/// `action(name, options?)` (§4.1): `sequence` (a list of action names,
/// auto-namespaced when unqualified) creates a native-sequence artifact;
/// `filename` reads code from disk; `action` becomes the artifact body
/// verbatim.
pub fn action(name: impl Into<String>, options: ActionOptions) -> Result<Composition, BuilderError> {
    let name = name.into();
    let mut artifacts = Vec::new();

    if let Some(members) = options.sequence {
        let qualified = members
            .iter()
            .map(|m| qualify_action_name(&name, m))
            .collect();
        artifacts.push(Artifact {
            name: name.clone(),
            body: ArtifactBody::NativeSequence(qualified),
        });
    } else if let Some(filename) = options.filename {
        let code = std::fs::read_to_string(&filename).map_err(|e| BuilderError::InvalidArgument {
            constructor: "action",
            reason: format!("reading filename `{filename}`: {e}"),
        })?;
        artifacts.push(Artifact {
            name: name.clone(),
            body: ArtifactBody::Inline(Value::String(code)),
        });
    } else if let Some(body) = options.action {
        artifacts.push(Artifact {
            name: name.clone(),
            body: ArtifactBody::Inline(body),
        });
    }

    Ok(Composition::with_artifacts(
        Node::Action(ActionNode { name }),
        artifacts,
    ))
}

/// `retain(body, options?)` (§4.1). Options are consumed in the
/// desugaring order filter → catch → plain; no two may coexist.
pub fn retain(body: impl Into<Task>, options: RetainOptions) -> Result<Composition, BuilderError> {
    let has_filter = options.filter.is_some();
    let has_catch = options.catch;
    let has_field = options.field.is_some();

    if has_filter && has_catch {
        return Err(BuilderError::ConflictingOptions {
            constructor: "retain",
            a: "filter",
            b: "catch",
        });
    }
    if has_filter && has_field {
        return Err(BuilderError::ConflictingOptions {
            constructor: "retain",
            a: "filter",
            b: "field",
        });
    }
    if has_catch && has_field {
        return Err(BuilderError::ConflictingOptions {
            constructor: "retain",
            a: "catch",
            b: "field",
        });
    }

    if let Some(filter) = options.filter {
        return desugar::retain_filter(body, filter);
    }
    if options.catch {
        return desugar::retain_catch(body);
    }

    let body = task(body)?;
    Ok(Composition::with_artifacts(
        Node::Retain(RetainNode {
            body: Box::new(body.node),
            field: options.field,
            collect: true,
            extra: IndexMap::new(),
        }),
        body.artifacts,
    ))
}

/// `repeat(n, …body)` (§3.1, §4.1): desugars to
/// `let({count:n}, while(dec > 0, seq(…body)))`.
pub fn repeat<I, T>(n: i64, body: I) -> Result<Composition, BuilderError>
where
    I: IntoIterator<Item = T>,
    T: Into<Task>,
{
    desugar::repeat(n, body)
}

/// `retry(n, …body)` (§3.1, §4.1): retries the attempt up to `n` extra
/// times after an initial failure, yielding the first success or the
/// final failure's `result`.
pub fn retry<I, T>(n: i64, body: I) -> Result<Composition, BuilderError>
where
    I: IntoIterator<Item = T>,
    T: Into<Task>,
{
    desugar::retry(n, body)
}
