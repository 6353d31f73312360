//! The shape of a FaaS action-management client (§6.3). A real
//! HTTP-backed implementation is out of scope (§1's non-goals) — this
//! models only the seam `deploy()` drives, the way `composer-script`
//! models `Evaluator` as a seam rather than embedding one engine.

use composer_core::Artifact;

use crate::config::Credentials;

/// Creates, replaces, and removes deployed actions. `update` is called
/// once per artifact plus once for the composition's own named action;
/// `delete` is called first, per §6.3's "delete-then-update" order, so a
/// stale action of the same name never lingers alongside its
/// replacement.
pub trait ActionClient {
    /// Deletes the action named `name`, if it exists. Returns `true`
    /// whether or not the action existed — only a transport-level
    /// failure to reach the platform should report `false`.
    fn delete(&self, credentials: &Credentials, name: &str) -> bool;

    /// Creates or replaces the action named `name` with `artifact`.
    /// Returns whether the update succeeded.
    fn update(&self, credentials: &Credentials, name: &str, artifact: &Artifact) -> bool;
}

/// An [`ActionClient`] that always succeeds and records every call it
/// received, in order. Ships for tests and for `composer-cli deploy
/// --offline`.
#[derive(Debug, Default)]
pub struct NullActionClient {
    calls: std::sync::Mutex<Vec<Call>>,
}

/// One recorded interaction with a [`NullActionClient`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Delete { name: String },
    Update { name: String, artifact: Artifact },
}

impl NullActionClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// The calls received so far, oldest first.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("NullActionClient mutex poisoned").clone()
    }
}

impl ActionClient for NullActionClient {
    fn delete(&self, _credentials: &Credentials, name: &str) -> bool {
        self.calls
            .lock()
            .expect("NullActionClient mutex poisoned")
            .push(Call::Delete { name: name.to_string() });
        true
    }

    fn update(&self, _credentials: &Credentials, name: &str, artifact: &Artifact) -> bool {
        self.calls
            .lock()
            .expect("NullActionClient mutex poisoned")
            .push(Call::Update { name: name.to_string(), artifact: artifact.clone() });
        true
    }
}
