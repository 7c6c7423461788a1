use hex_literal::hex;
use primitive_types::{H256, U256};
use serde::Serialize;

use crate::fork::ForkPolicy;
use crate::network::Network;
use crate::pow::{PowAlgo, NUM_ALGOS};

const MAINNET_GENESIS_HASH: H256 = H256(hex!("00000000db7eb7a9e1a06cf995363dcdc4c28e8ae04827a961942657db9a1631"));
const TESTNET_GENESIS_HASH: H256 = H256(hex!("000000492c361a01ce7558a3bfb198ea3ff2f86f8b0c2e00d26135c53f4acbf7"));
const REGTEST_GENESIS_HASH: H256 = H256(hex!("0a6ad3b8e7a9ac8f29feea3a9fe18b1c14d1a05aa71c9dca0e45fc2eea3a5bd7"));

/// BIP34 is not scheduled on any network; the height is out of reach.
const BIP34_UNSCHEDULED_HEIGHT: u32 = 100_000_000;

const TARGET_SPACING_SECONDS: u64 = 60; // 1 minute
const TARGET_TIMESPAN_SECONDS: u64 = 2 * 24 * 60 * 60; // 2 days

/// Chain ids stamped into auxpow headers, indexed by [`PowAlgo`].
const AUXPOW_CHAIN_IDS: [i32; NUM_ALGOS] = [0x0006, 0x0002];

/// Parameters that influence chain consensus.
///
/// A value of this type is built once at startup by [`ConsensusParams::new`]
/// and only read afterwards. It is plain data, so it can be shared between
/// validation threads by reference or inside an `Arc` without locking.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsensusParams {
    /// Network these parameters belong to
    pub network: Network,
    /// Hash of the genesis block
    pub hash_genesis_block: H256,
    /// Blocks between block reward halvings
    pub subsidy_halving_interval: u32,
    /// Upgraded blocks in the window needed to enforce the new version rules
    pub majority_enforce_block_upgrade: u32,
    /// Upgraded blocks in the window needed to reject outdated versions
    pub majority_reject_block_outdated: u32,
    /// Number of recent blocks inspected for version majorities
    pub majority_window: u32,
    /// Height at which BIP34 becomes active
    pub bip34_height: u32,
    /// Hash of the block at `bip34_height`
    pub bip34_hash: H256,
    /// Easiest allowed target, indexed by [`PowAlgo`]
    pub pow_limit: [U256; NUM_ALGOS],
    /// Disable difficulty retargeting (test networks only)
    pub pow_no_retargeting: bool,
    /// Target time between blocks, in seconds
    pub pow_target_spacing: u64,
    /// Time covered by one difficulty retarget, in seconds
    pub pow_target_timespan: u64,
    /// Auxpow chain id, indexed by [`PowAlgo`]
    pub auxpow_chain_id: [i32; NUM_ALGOS],
    /// Reject auxpow whose parent chain uses our own chain id
    pub strict_chain_id: bool,
    /// Fork activation policy
    pub rules: ForkPolicy,
}

impl ConsensusParams {
    /// Builds and checks the parameter set for `network`.
    ///
    /// # Panics
    /// If the bound constants violate a construction invariant (zero target
    /// spacing, inconsistent majority thresholds, zero pow limit). These are
    /// defects in the constant tables, never runtime conditions.
    pub fn new(network: Network) -> Self {
        let params = match network {
            Network::Mainnet => Self::build_mainnet(),
            Network::Testnet => Self::build_testnet(),
            Network::Regtest => Self::build_regtest(),
        }
        .validated();

        log::info!(
            "Selected {} consensus parameters (genesis {:?}, retarget every {} blocks)",
            params.network,
            params.hash_genesis_block,
            params.difficulty_adjustment_interval()
        );
        params
    }

    /// Mainnet parameters.
    pub fn mainnet() -> Self {
        Self::new(Network::Mainnet)
    }

    /// Testnet parameters.
    pub fn testnet() -> Self {
        Self::new(Network::Testnet)
    }

    /// Regtest parameters.
    pub fn regtest() -> Self {
        Self::new(Network::Regtest)
    }

    fn build_mainnet() -> Self {
        ConsensusParams {
            network: Network::Mainnet,
            hash_genesis_block: MAINNET_GENESIS_HASH,
            subsidy_halving_interval: 2_100_000,
            majority_enforce_block_upgrade: 750,
            majority_reject_block_outdated: 950,
            majority_window: 1000,
            bip34_height: BIP34_UNSCHEDULED_HEIGHT,
            bip34_hash: H256::zero(),
            pow_limit: [U256::MAX >> 32u32, U256::MAX >> 20u32],
            pow_no_retargeting: false,
            pow_target_spacing: TARGET_SPACING_SECONDS,
            pow_target_timespan: TARGET_TIMESPAN_SECONDS,
            auxpow_chain_id: AUXPOW_CHAIN_IDS,
            strict_chain_id: true,
            rules: ForkPolicy::mainnet(),
        }
    }

    fn build_testnet() -> Self {
        ConsensusParams {
            network: Network::Testnet,
            hash_genesis_block: TESTNET_GENESIS_HASH,
            subsidy_halving_interval: 2_100_000,
            majority_enforce_block_upgrade: 51,
            majority_reject_block_outdated: 75,
            majority_window: 100,
            bip34_height: BIP34_UNSCHEDULED_HEIGHT,
            bip34_hash: H256::zero(),
            pow_limit: [U256::MAX >> 32u32, U256::MAX >> 20u32],
            pow_no_retargeting: false,
            pow_target_spacing: TARGET_SPACING_SECONDS,
            pow_target_timespan: TARGET_TIMESPAN_SECONDS,
            auxpow_chain_id: AUXPOW_CHAIN_IDS,
            strict_chain_id: false,
            rules: ForkPolicy::testnet(),
        }
    }

    // Regtest keeps testnet's timing and chain ids.
    fn build_regtest() -> Self {
        ConsensusParams {
            network: Network::Regtest,
            hash_genesis_block: REGTEST_GENESIS_HASH,
            subsidy_halving_interval: 150,
            majority_enforce_block_upgrade: 750,
            majority_reject_block_outdated: 950,
            majority_window: 1000,
            pow_limit: [U256::MAX >> 1u32; NUM_ALGOS],
            pow_no_retargeting: true,
            strict_chain_id: true,
            rules: ForkPolicy::regtest(),
            ..Self::build_testnet()
        }
    }

    fn validated(self) -> Self {
        assert!(
            self.pow_target_spacing > 0,
            "{}: pow_target_spacing must be non-zero",
            self.network
        );
        assert!(
            self.pow_target_timespan >= self.pow_target_spacing,
            "{}: pow_target_timespan {} is shorter than pow_target_spacing {}",
            self.network,
            self.pow_target_timespan,
            self.pow_target_spacing
        );
        assert!(
            self.majority_window > 0
                && self.majority_enforce_block_upgrade <= self.majority_reject_block_outdated
                && self.majority_reject_block_outdated <= self.majority_window,
            "{}: majority thresholds {}/{}/{} are inconsistent",
            self.network,
            self.majority_enforce_block_upgrade,
            self.majority_reject_block_outdated,
            self.majority_window
        );
        for algo in PowAlgo::ALL {
            assert!(
                !self.pow_limit[algo.index()].is_zero(),
                "{}: pow limit for {} is zero",
                self.network,
                algo
            );
        }
        assert_eq!(
            self.rules.network(),
            self.network,
            "fork policy bound to the wrong network"
        );
        self
    }

    /// Blocks between difficulty retargets.
    pub fn difficulty_adjustment_interval(&self) -> u64 {
        self.pow_target_timespan / self.pow_target_spacing
    }

    /// Whether a block at `height` may use the legacy header encoding. Only
    /// the genesis block may.
    pub fn allows_legacy_format(&self, height: u32) -> bool {
        height == 0
    }

    /// Easiest allowed target for `algo`.
    pub fn pow_limit_for(&self, algo: PowAlgo) -> U256 {
        self.pow_limit[algo.index()]
    }

    /// Auxpow chain id for `algo`.
    pub fn auxpow_chain_id_for(&self, algo: PowAlgo) -> i32 {
        self.auxpow_chain_id[algo.index()]
    }

    /// Whether `found` upgraded blocks out of the last `majority_window` are
    /// enough to enforce the new version's rules.
    pub fn enforces_block_upgrade(&self, found: u32) -> bool {
        found >= self.majority_enforce_block_upgrade
    }

    /// Whether `found` upgraded blocks out of the last `majority_window` are
    /// enough to reject blocks still using the outdated version.
    pub fn rejects_outdated_block(&self, found: u32) -> bool {
        found >= self.majority_reject_block_outdated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fork::{ActivationOracle, Fork};

    #[test]
    fn test_networks_bind_matching_policy() {
        for network in Network::ALL {
            let params = ConsensusParams::new(network);
            assert_eq!(params.network, network);
            assert_eq!(params.rules.network(), network);
        }
    }

    #[test]
    fn test_difficulty_adjustment_interval() {
        let params = ConsensusParams::mainnet();
        assert_eq!(params.difficulty_adjustment_interval(), 2880);
        assert_eq!(
            params.difficulty_adjustment_interval(),
            params.pow_target_timespan / params.pow_target_spacing
        );
    }

    #[test]
    fn test_regtest_inherits_testnet_timing() {
        let testnet = ConsensusParams::testnet();
        let regtest = ConsensusParams::regtest();
        assert_eq!(regtest.pow_target_spacing, testnet.pow_target_spacing);
        assert_eq!(regtest.pow_target_timespan, testnet.pow_target_timespan);
        assert_eq!(regtest.auxpow_chain_id, testnet.auxpow_chain_id);
        assert_eq!(regtest.bip34_height, testnet.bip34_height);
        assert!(regtest.pow_no_retargeting);
        assert!(!testnet.pow_no_retargeting);
        assert_ne!(regtest.hash_genesis_block, testnet.hash_genesis_block);
    }

    #[test]
    fn test_legacy_format_only_at_genesis() {
        let params = ConsensusParams::testnet();
        assert!(params.allows_legacy_format(0));
        assert!(!params.allows_legacy_format(1));
        assert!(!params.allows_legacy_format(u32::MAX));
    }

    #[test]
    fn test_legacy_format_is_independent_of_forks() {
        let params = ConsensusParams::mainnet();
        let height = params.rules.activation_height(Fork::CarryingCap);
        assert!(params.rules.is_activation_height(Fork::CarryingCap, height));
        assert!(!params.allows_legacy_format(height));
    }

    #[test]
    fn test_per_algo_accessors() {
        let params = ConsensusParams::mainnet();
        assert_eq!(params.pow_limit_for(PowAlgo::Sha256d), U256::MAX >> 32u32);
        assert_eq!(params.pow_limit_for(PowAlgo::Scrypt), U256::MAX >> 20u32);
        assert_eq!(params.auxpow_chain_id_for(PowAlgo::Sha256d), 6);
        assert_eq!(params.auxpow_chain_id_for(PowAlgo::Scrypt), 2);

        let regtest = ConsensusParams::regtest();
        assert_eq!(regtest.pow_limit_for(PowAlgo::Sha256d), regtest.pow_limit_for(PowAlgo::Scrypt));
    }

    #[test]
    fn test_majority_thresholds() {
        let params = ConsensusParams::testnet();
        assert!(!params.enforces_block_upgrade(50));
        assert!(params.enforces_block_upgrade(51));
        assert!(!params.rejects_outdated_block(74));
        assert!(params.rejects_outdated_block(75));
    }

    #[test]
    #[should_panic(expected = "pow_target_spacing must be non-zero")]
    fn test_zero_spacing_is_fatal() {
        let _ = ConsensusParams { pow_target_spacing: 0, ..ConsensusParams::build_mainnet() }.validated();
    }

    #[test]
    #[should_panic(expected = "majority thresholds")]
    fn test_inconsistent_majority_is_fatal() {
        let _ = ConsensusParams { majority_reject_block_outdated: 1001, ..ConsensusParams::build_mainnet() }
            .validated();
    }

    #[test]
    #[should_panic(expected = "pow limit for scrypt is zero")]
    fn test_zero_pow_limit_is_fatal() {
        let _ = ConsensusParams {
            pow_limit: [U256::MAX, U256::zero()],
            ..ConsensusParams::build_testnet()
        }
        .validated();
    }

    #[test]
    #[should_panic(expected = "fork policy bound to the wrong network")]
    fn test_mismatched_policy_is_fatal() {
        let _ = ConsensusParams { rules: ForkPolicy::mainnet(), ..ConsensusParams::build_regtest() }.validated();
    }
}
