use std::fs;
use std::path::Path;
use std::sync::Arc;

use starknet::core::types::{
    contract::{CompiledClass, SierraClass},
    Felt, FlattenedSierraClass,
};

use crate::abi::ContractInterface;
use crate::config::ClassPaths;
use crate::error::WorkflowError;

/// A compiled contract class loaded from disk, ready to declare.
///
/// The class hash identifies the code on the network; the compiled class hash
/// covers the CASM companion the sequencer executes.
#[derive(Debug, Clone)]
pub struct ContractArtifact {
    pub class: Arc<FlattenedSierraClass>,
    pub class_hash: Felt,
    pub compiled_class_hash: Felt,
}

impl ContractArtifact {
    /// Load the Sierra class and its CASM companion. Purely local; fails
    /// fast on missing or malformed files.
    pub fn load(paths: &ClassPaths) -> Result<Self, WorkflowError> {
        let sierra: SierraClass = read_json(&paths.sierra)?;
        let flattened = sierra
            .flatten()
            .map_err(|e| WorkflowError::ClassHash {
                path: paths.sierra.clone(),
                reason: e.to_string(),
            })?;
        let class_hash = flattened.class_hash();

        let casm: CompiledClass = read_json(&paths.casm)?;
        let compiled_class_hash = casm.class_hash().map_err(|e| WorkflowError::ClassHash {
            path: paths.casm.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            class: Arc::new(flattened),
            class_hash,
            compiled_class_hash,
        })
    }

    /// The function set embedded in the class itself, e.g. the proxy's own
    /// minimal `upgrade`/`getAdmin` surface.
    pub fn interface(&self) -> Result<ContractInterface, WorkflowError> {
        ContractInterface::from_json_str(&self.class.abi)
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, WorkflowError> {
    let raw = fs::read(path).map_err(|source| WorkflowError::ArtifactIo {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&raw).map_err(|source| WorkflowError::ArtifactParse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClassPaths;

    #[test]
    fn missing_artifact_reports_its_path() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ClassPaths::new(
            dir.path().join("missing.contract_class.json"),
            dir.path().join("missing.compiled_contract_class.json"),
        );

        match ContractArtifact::load(&paths) {
            Err(WorkflowError::ArtifactIo { path, .. }) => {
                assert!(path.ends_with("missing.contract_class.json"));
            }
            other => panic!("expected ArtifactIo, got {other:?}"),
        }
    }

    #[test]
    fn malformed_artifact_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let sierra = dir.path().join("broken.contract_class.json");
        std::fs::write(&sierra, "not json").unwrap();
        let paths = ClassPaths::new(&sierra, dir.path().join("broken.casm.json"));

        assert!(matches!(
            ContractArtifact::load(&paths),
            Err(WorkflowError::ArtifactParse { .. })
        ));
    }
}
