//! `deploy()` (§6.3): compiles a named composition, then pushes it and
//! every artifact its `action` nodes captured to the platform through an
//! [`ActionClient`], delete-then-update per name.

use composer_core::Composition;

use crate::client::ActionClient;
use crate::config::Credentials;
use crate::error::WskError;

/// Compiles `composition` and deploys it plus its captured artifacts.
/// Each of the composition's own deployable action and every artifact is
/// deleted (to clear a stale prior deployment under the same name) and
/// then updated with its current body; `deploy` returns how many of
/// those updates the client reported as successful.
pub fn deploy(
    composition: &Composition,
    credentials: &Credentials,
    client: &dyn ActionClient,
) -> Result<usize, WskError> {
    let deployable = composer_compiler::build_deployable(composition).map_err(|e| match e {
        composer_compiler::CompileError::NotNamed => WskError::NotNamed,
        other => WskError::Compile(other.to_string()),
    })?;

    let mut updated = 0;

    let program_json = serde_json::to_value(&deployable.program).expect("Program always serializes");
    let program_artifact = composer_core::Artifact {
        name: deployable.name.clone(),
        body: composer_core::artifact::ArtifactBody::Inline(program_json),
    };
    client.delete(credentials, &deployable.name);
    if client.update(credentials, &deployable.name, &program_artifact) {
        updated += 1;
    }

    for artifact in &deployable.artifacts {
        client.delete(credentials, &artifact.name);
        if client.update(credentials, &artifact.name, artifact) {
            updated += 1;
        }
    }

    Ok(updated)
}

#[cfg(test)]
mod tests {
    use composer_core::builder;
    use composer_core::options::ActionOptions;
    use composer_core::Task;

    use super::*;
    use crate::client::NullActionClient;

    #[test]
    fn deploys_the_named_composition_and_its_artifacts() {
        let composition = builder::named(
            builder::sequence([Task::Node(
                builder::action(
                    "helper",
                    ActionOptions { sequence: Some(vec!["step".to_string()]), ..Default::default() },
                )
                .unwrap(),
            )])
            .unwrap(),
            "my-composition",
        );

        let client = NullActionClient::new();
        let count = deploy(&composition, &Credentials::default(), &client).unwrap();

        assert_eq!(count, 2);
        let calls = client.calls();
        assert_eq!(calls.len(), 4);
    }

    #[test]
    fn unnamed_composition_is_rejected_before_touching_the_client() {
        let composition = builder::literal(serde_json::json!({})).unwrap();
        let client = NullActionClient::new();
        let err = deploy(&composition, &Credentials::default(), &client).unwrap_err();
        assert!(matches!(err, WskError::NotNamed));
        assert!(client.calls().is_empty());
    }
}
