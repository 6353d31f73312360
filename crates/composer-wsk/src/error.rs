//! `composer-wsk`'s error kind: everything that can keep a deployment
//! from reaching the platform, short of the platform's own response
//! (which an [`crate::client::ActionClient`] reports as a plain `bool`).

#[derive(Debug, Clone, thiserror::Error)]
pub enum WskError {
    #[error("composition is not named; attach one with `named()` before deploying")]
    NotNamed,

    #[error("failed to compile composition for deployment: {0}")]
    Compile(String),

    #[error("failed to update action `{name}`")]
    UpdateFailed { name: String },
}
