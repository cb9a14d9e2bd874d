//! Typed view over a contract interface description (ABI).
//!
//! The proxy exposes only its own minimal function set; after deployment the
//! binding is switched to the implementation's interface so calls resolve
//! against the implementation instead. Parsing happens entirely locally and
//! fails before any network traffic.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use starknet::core::{types::Felt, utils::get_selector_from_name};

use crate::error::WorkflowError;

/// One entry of a contract ABI. Only the shape needed to resolve callable
/// entry points is modelled; type declarations are carried but not
/// interpreted.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AbiEntry {
    Function(AbiFunction),
    L1Handler(AbiFunction),
    Constructor(AbiFunction),
    Event(AbiDeclaration),
    Struct(AbiDeclaration),
    Enum(AbiDeclaration),
    Impl(AbiDeclaration),
    Interface(AbiInterface),
}

#[derive(Debug, Clone, Deserialize)]
pub struct AbiFunction {
    pub name: String,
    #[serde(default)]
    pub inputs: Vec<AbiInput>,
    #[serde(default)]
    pub outputs: Vec<AbiOutput>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AbiInput {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AbiOutput {
    #[serde(rename = "type")]
    pub ty: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AbiDeclaration {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AbiInterface {
    pub name: String,
    pub items: Vec<AbiEntry>,
}

/// Callable function set of a bound contract, indexed name -> selector.
#[derive(Debug, Clone)]
pub struct ContractInterface {
    functions: BTreeMap<String, Felt>,
}

impl ContractInterface {
    /// Index every callable function, including those nested inside
    /// interface blocks.
    pub fn from_entries(entries: &[AbiEntry]) -> Result<Self, WorkflowError> {
        let mut functions = BTreeMap::new();
        collect_functions(entries, &mut functions)?;
        Ok(Self { functions })
    }

    pub fn from_json_str(abi: &str) -> Result<Self, WorkflowError> {
        let entries: Vec<AbiEntry> =
            serde_json::from_str(abi).map_err(|source| WorkflowError::ArtifactParse {
                path: "<inline abi>".into(),
                source,
            })?;
        Self::from_entries(&entries)
    }

    /// Load an interface description file produced by the contract build.
    pub fn from_file(path: &Path) -> Result<Self, WorkflowError> {
        let raw = fs::read_to_string(path).map_err(|source| WorkflowError::ArtifactIo {
            path: path.to_path_buf(),
            source,
        })?;
        let entries: Vec<AbiEntry> =
            serde_json::from_str(&raw).map_err(|source| WorkflowError::ArtifactParse {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_entries(&entries)
    }

    /// Selector for a named entry point. Unknown names fail locally, before
    /// any request is made.
    pub fn selector(&self, entry_point: &str) -> Result<Felt, WorkflowError> {
        self.functions
            .get(entry_point)
            .copied()
            .ok_or_else(|| WorkflowError::UnknownEntryPoint {
                name: entry_point.to_string(),
            })
    }

    pub fn contains(&self, entry_point: &str) -> bool {
        self.functions.contains_key(entry_point)
    }

    pub fn function_names(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(String::as_str)
    }
}

fn collect_functions(
    entries: &[AbiEntry],
    functions: &mut BTreeMap<String, Felt>,
) -> Result<(), WorkflowError> {
    for entry in entries {
        match entry {
            AbiEntry::Function(function) | AbiEntry::L1Handler(function) => {
                let selector = get_selector_from_name(&function.name)?;
                functions.insert(function.name.clone(), selector);
            }
            AbiEntry::Interface(interface) => {
                collect_functions(&interface.items, functions)?;
            }
            _ => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_ABI: &str = r#"[
        {
            "type": "function",
            "name": "getAdmin",
            "inputs": [],
            "outputs": [{"type": "core::felt252"}]
        },
        {
            "type": "struct",
            "name": "core::integer::u256",
            "members": [
                {"name": "low", "type": "core::integer::u128"},
                {"name": "high", "type": "core::integer::u128"}
            ]
        },
        {
            "type": "interface",
            "name": "contracts::exchange::IExchange",
            "items": [
                {
                    "type": "function",
                    "name": "get_erc20_count",
                    "inputs": [],
                    "outputs": [{"type": "core::felt252"}]
                }
            ]
        }
    ]"#;

    #[test]
    fn indexes_top_level_and_nested_functions() {
        let interface = ContractInterface::from_json_str(SAMPLE_ABI).unwrap();

        assert!(interface.contains("getAdmin"));
        assert!(interface.contains("get_erc20_count"));
        assert_eq!(
            interface.selector("getAdmin").unwrap(),
            get_selector_from_name("getAdmin").unwrap()
        );
    }

    #[test]
    fn unknown_entry_points_fail_by_name() {
        let interface = ContractInterface::from_json_str(SAMPLE_ABI).unwrap();

        match interface.selector("upgrade") {
            Err(WorkflowError::UnknownEntryPoint { name }) => assert_eq!(name, "upgrade"),
            other => panic!("expected UnknownEntryPoint, got {other:?}"),
        }
    }

    #[test]
    fn malformed_interface_data_is_rejected() {
        assert!(matches!(
            ContractInterface::from_json_str("{\"not\": \"an abi\"}"),
            Err(WorkflowError::ArtifactParse { .. })
        ));
    }

    #[test]
    fn missing_interface_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("exchange.json");

        assert!(matches!(
            ContractInterface::from_file(&missing),
            Err(WorkflowError::ArtifactIo { .. })
        ));
    }

    #[test]
    fn interface_file_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("exchange.json");
        std::fs::write(&path, SAMPLE_ABI).unwrap();

        let interface = ContractInterface::from_file(&path).unwrap();
        assert!(interface.contains("get_erc20_count"));
    }
}
