//! Per-constructor option bags (§3.1's "Recognized options" column).
//!
//! Each struct carries its recognized fields plus an `extra` catch-all so
//! unrecognized keys round-trip through JSON instead of being rejected.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IfOptions {
    #[serde(default)]
    pub nosave: bool,
    #[serde(default, flatten)]
    pub extra: IndexMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WhileOptions {
    #[serde(default)]
    pub nosave: bool,
    #[serde(default, flatten)]
    pub extra: IndexMap<String, Value>,
}

/// `action(name, options)`. `sequence`, `filename`, and `action` are
/// mutually the ways to attach a deployable artifact body; the builder
/// picks whichever is set (at most one is expected, though the contract
/// does not require callers to enforce that themselves).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionOptions {
    pub sequence: Option<Vec<String>>,
    pub filename: Option<String>,
    pub action: Option<Value>,
}

/// `retain(body, options)`. Exactly one of `filter`, `catch`, or `field`
/// (the "plain" form) may be set — see `retain`'s desugaring order in
/// §3.1: filter → catch → plain.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RetainOptions {
    pub field: Option<String>,
    pub filter: Option<String>,
    pub catch: bool,
}
