//! The desugaring rules of §3.1: `repeat`, `retry`, and the `filter`/
//! `catch` forms of `retain` all expand to plain compositions built from
//! the other constructors, so the compiler only ever has to know about
//! the ten node kinds in [`crate::node::Node`].

use indexmap::IndexMap;
use serde_json::json;

use crate::builder::{self, Composition, Task};
use crate::error::BuilderError;
use crate::node::{Node, RetainNode};
use crate::options::{RetainOptions, WhileOptions};

/// Projects `params[field]` back onto `params` itself, without ever
/// running the value through a `function`/`literal`/`pass` step.
///
/// `push{field}` captures the value into a frame and `pop{collect:false}`
/// restores it as `params` — neither dispatch calls `inspect` (§4.3). A
/// plain `function` doing the equivalent (`p => p[field]`) would instead
/// have its output run through `inspect` like every other `function`
/// step, and a value that happens to carry a top-level `error` key would
/// be treated as a fresh, uncaught exception rather than data merely
/// passing through — exactly the failure this helper exists to avoid.
fn project_field(field: &str) -> Composition {
    Composition::with_artifacts(
        Node::Retain(RetainNode {
            body: Box::new(Node::empty_sequence()),
            field: Some(field.to_string()),
            collect: false,
            extra: IndexMap::new(),
        }),
        Vec::new(),
    )
}

/// `retain(body, {catch:true})` (§3.1): "desugars to a retained `finally`
/// that wraps the result (including errors) in `{result}` and then
/// unwraps." Concretely: the body runs inside a `finally` whose finalizer
/// always wraps whatever comes out (success value or `{error}`) in
/// `{result: …}`; [`project_field`] then projects `result` back out of
/// that wrapper without re-triggering `inspect` on a bare `{error}`, so
/// the untouched outcome — success or failure — is what the surrounding
/// plain `retain` pairs with the pre-attempt snapshot.
pub(crate) fn retain_catch(body: impl Into<Task>) -> Result<Composition, BuilderError> {
    let body = builder::task(body)?;
    let wrap_finalizer = builder::function("(p) => ({ result: p })")?;
    let wrapped = builder::finally_(body, wrap_finalizer)?;
    let unwrap = project_field("result");
    let attempt = builder::sequence([Task::Node(wrapped), Task::Node(unwrap)])?;
    builder::retain(Task::Node(attempt), RetainOptions::default())
}

/// `retain(body, {filter})` (§3.1): "desugars to a sequence that captures
/// `filter(params)`, then retains `body` against those captured params."
pub(crate) fn retain_filter(
    body: impl Into<Task>,
    filter_source: String,
) -> Result<Composition, BuilderError> {
    let capture = builder::function(filter_source)?;
    let retained = builder::retain(body, RetainOptions::default())?;
    builder::sequence([Task::Node(capture), Task::Node(retained)])
}

/// `repeat(n, …body)` (§3.1): "desugars to
/// `let({count:n}, while(dec > 0, seq(…)))`."
pub(crate) fn repeat<I, T>(n: i64, body: I) -> Result<Composition, BuilderError>
where
    I: IntoIterator<Item = T>,
    T: Into<Task>,
{
    let mut declarations = IndexMap::new();
    declarations.insert("count".to_string(), json!(n));
    let test = builder::function("() => count-- > 0")?;
    let body = builder::sequence(body)?;
    let loop_ = builder::while_(Task::Node(test), Task::Node(body), Default::default())?;
    builder::let_(declarations, [Task::Node(loop_)])
}

/// `retry(n, …body)` (§3.1): "desugars to a `let({count:n})` wrapping: an
/// initial `retain(seq(…), {catch:true})`; a `while` whose test checks
/// for an `error` in the retained result and decrements `count`, whose
/// body re-executes the attempt via `finally(restore params, attempt)`;
/// finally projecting `result`."
///
/// Under deterministic failure this runs the body `n+1` times (one
/// initial attempt plus `n` retries) before surfacing the final
/// `result`; under first-try success it runs the body exactly once,
/// since the `while` test's `&&` short-circuits before decrementing
/// `count` whenever the attempt already succeeded.
pub(crate) fn retry<I, T>(n: i64, body: I) -> Result<Composition, BuilderError>
where
    I: IntoIterator<Item = T>,
    T: Into<Task>,
{
    let mut declarations = IndexMap::new();
    declarations.insert("count".to_string(), json!(n));

    let attempt_items: Vec<Task> = body.into_iter().map(Into::into).collect();
    let first_attempt = builder::retain(
        Task::Node(builder::sequence(attempt_items.clone())?),
        RetainOptions {
            catch: true,
            ..Default::default()
        },
    )?;

    // `inspect` (§4.3) replaces `params` wholesale with whatever this
    // function returns, so the test can't just return a bare boolean —
    // `retry_body`'s `restore_params` needs `p.params` and the final
    // `project_result` needs `p.result` to still be there after the loop
    // exits, so the test carries both forward alongside `value`.
    let retry_test = builder::function(
        "(p) => ({ value: !!(p.result && p.result.error) && count-- > 0, params: p.params, result: p.result })",
    )?;
    let restore_params = builder::function("(p) => p.params")?;
    let retry_attempt = builder::retain(
        Task::Node(builder::sequence(attempt_items)?),
        RetainOptions {
            catch: true,
            ..Default::default()
        },
    )?;
    let retry_body = builder::finally_(Task::Node(restore_params), Task::Node(retry_attempt))?;
    // `nosave: true`: the loop's own result must carry forward past the
    // last iteration that ran, not snap back to the pre-loop snapshot —
    // `project_result` below needs the *latest* attempt's `result`, which
    // a `nosave: false` (the default) while would discard at loop exit.
    let retry_loop = builder::while_(
        Task::Node(retry_test),
        Task::Node(retry_body),
        WhileOptions { nosave: true, ..Default::default() },
    )?;

    let project_result = builder::function("(p) => p.result")?;

    let body = builder::sequence([
        Task::Node(first_attempt),
        Task::Node(retry_loop),
        Task::Node(project_result),
    ])?;

    builder::let_(declarations, [Task::Node(body)])
}
