//! Persisted addresses of the deployed contract set.

use alloy::primitives::Address;
use eyre::{Result, WrapErr};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name-to-address map produced by a deployment run and consumed by every
/// later command. Keys match the `.env` variable names the workload
/// commands read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployedAddresses {
    #[serde(rename = "LOGGING_CONTRACT_ADDRESS")]
    pub logging: Address,
    #[serde(rename = "POLICY_CONTRACT_ADDRESS")]
    pub policy: Address,
    #[serde(rename = "DRONE_CONTRACT_ADDRESS")]
    pub drone: Address,
    #[serde(rename = "ATTRIBUTE_CONTRACT_ADDRESS")]
    pub attribute: Address,
    #[serde(rename = "PDP_CONTRACT_ADDRESS")]
    pub pdp: Address,
}

impl DeployedAddresses {
    /// Writes the map to `path`, overwriting any previous content.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .wrap_err_with(|| format!("failed to write {}", path.display()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).wrap_err_with(|| {
            format!(
                "deployed addresses not found at {}; run `pdp-bench deploy` first",
                path.display()
            )
        })?;
        serde_json::from_slice(&bytes)
            .wrap_err_with(|| format!("malformed address file at {}", path.display()))
    }

    /// `.env` lines for the operator to paste into their configuration.
    pub fn env_lines(&self) -> String {
        format!(
            "LOGGING_CONTRACT_ADDRESS={}\n\
             POLICY_CONTRACT_ADDRESS={}\n\
             DRONE_CONTRACT_ADDRESS={}\n\
             ATTRIBUTE_CONTRACT_ADDRESS={}\n\
             PDP_CONTRACT_ADDRESS={}",
            self.logging, self.policy, self.drone, self.attribute, self.pdp
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DeployedAddresses {
        DeployedAddresses {
            logging: Address::repeat_byte(0x11),
            policy: Address::repeat_byte(0x22),
            drone: Address::repeat_byte(0x33),
            attribute: Address::repeat_byte(0x44),
            pdp: Address::repeat_byte(0x55),
        }
    }

    #[test]
    fn round_trips_through_the_address_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deployed-addresses.json");

        let addresses = sample();
        addresses.save(&path).unwrap();
        assert_eq!(DeployedAddresses::load(&path).unwrap(), addresses);
    }

    #[test]
    fn file_contains_five_address_shaped_strings() {
        let json = serde_json::to_value(sample()).unwrap();
        let map = json.as_object().unwrap();
        assert_eq!(map.len(), 5);
        for value in map.values() {
            let s = value.as_str().unwrap();
            assert_eq!(s.len(), 42);
            assert!(s.starts_with("0x"));
            assert!(s[2..].chars().all(|c| c.is_ascii_hexdigit()));
        }
    }

    #[test]
    fn missing_file_names_the_prerequisite() {
        let dir = tempfile::tempdir().unwrap();
        let err = DeployedAddresses::load(&dir.path().join("missing.json")).unwrap_err();
        assert!(err.to_string().contains("pdp-bench deploy"));
    }
}
