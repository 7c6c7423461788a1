use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::network::Network;
use crate::params::ConsensusParams;

/// Chain selection read from the node's configuration file.
///
/// ```toml
/// network = "testnet"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChainConfig {
    /// Network to run on; mainnet when omitted
    pub network: Network,
}

impl ChainConfig {
    /// Config selecting `network`.
    pub fn new(network: Network) -> Self {
        Self { network }
    }

    /// Parses a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Reads and parses a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("Loading chain config from {}", path.display());
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Builds the consensus parameters for the selected network.
    pub fn consensus_params(&self) -> ConsensusParams {
        ConsensusParams::new(self.network)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParamsError;

    #[test]
    fn test_parse_network() {
        let config = ChainConfig::from_toml_str("network = \"regtest\"").unwrap();
        assert_eq!(config, ChainConfig::new(Network::Regtest));
        assert_eq!(config.consensus_params().network, Network::Regtest);
    }

    #[test]
    fn test_empty_document_defaults_to_mainnet() {
        let config = ChainConfig::from_toml_str("").unwrap();
        assert_eq!(config.network, Network::Mainnet);
    }

    #[test]
    fn test_rejects_unknown_network() {
        let err = ChainConfig::from_toml_str("network = \"signet\"").unwrap_err();
        assert!(matches!(err, ParamsError::Config(_)));
    }

    #[test]
    fn test_rejects_unknown_keys() {
        assert!(ChainConfig::from_toml_str("network = \"testnet\"\nport = 1").is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = ChainConfig::load("/nonexistent/hunter/chain.toml").unwrap_err();
        assert!(matches!(err, ParamsError::Io(_)));
    }
}
