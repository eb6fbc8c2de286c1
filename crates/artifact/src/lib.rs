//! Loader for compiled contract artifacts.
//!
//! Artifacts follow the Hardhat layout,
//! `artifacts/contracts/<Name>.sol/<Name>.json`, each carrying the contract
//! ABI and its creation bytecode. Loading happens once per run; a missing or
//! unreadable artifact aborts before any transaction is submitted.

use alloy::primitives::{Bytes, hex};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("artifact not found at {path}")]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("artifact at {path} is not valid JSON")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("artifact at {path} has invalid bytecode")]
    InvalidBytecode {
        path: PathBuf,
        #[source]
        source: hex::FromHexError,
    },
    #[error("artifact at {path} carries no deployable bytecode")]
    MissingBytecode { path: PathBuf },
}

/// Fields of a Hardhat build artifact the deployment driver needs.
#[derive(Debug, Deserialize)]
struct RawArtifact {
    #[serde(default)]
    abi: serde_json::Value,
    #[serde(default)]
    bytecode: String,
}

/// A compiled contract ready for deployment.
#[derive(Debug, Clone)]
pub struct ContractArtifact {
    pub contract_name: String,
    pub abi: serde_json::Value,
    pub bytecode: Bytes,
}

impl ContractArtifact {
    /// Path of a contract artifact under `artifacts_root`.
    pub fn path(artifacts_root: &Path, name: &str) -> PathBuf {
        artifacts_root
            .join("contracts")
            .join(format!("{name}.sol"))
            .join(format!("{name}.json"))
    }

    /// Loads `<root>/contracts/<Name>.sol/<Name>.json`.
    pub fn load(artifacts_root: &Path, name: &str) -> Result<Self, ArtifactError> {
        let path = Self::path(artifacts_root, name);

        let raw = std::fs::read(&path).map_err(|source| ArtifactError::NotFound {
            path: path.clone(),
            source,
        })?;
        let raw: RawArtifact =
            serde_json::from_slice(&raw).map_err(|source| ArtifactError::Malformed {
                path: path.clone(),
                source,
            })?;

        let bytecode: Bytes =
            raw.bytecode
                .parse()
                .map_err(|source| ArtifactError::InvalidBytecode {
                    path: path.clone(),
                    source,
                })?;
        // Interfaces and abstract contracts compile to an empty "0x" payload.
        if bytecode.is_empty() {
            return Err(ArtifactError::MissingBytecode { path });
        }

        Ok(Self {
            contract_name: name.to_owned(),
            abi: raw.abi,
            bytecode,
        })
    }
}
