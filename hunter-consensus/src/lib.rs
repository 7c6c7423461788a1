//! Hunter Coin Consensus
//!
//! Fork activation policy and per-network consensus parameters. Everything in
//! this crate is immutable once constructed and safe to share between
//! validation threads.

#![warn(missing_docs)]
#![warn(unused_extern_crates)]
#![forbid(unsafe_code)]

/// Operator-facing network selection.
pub mod config;

/// Common error types.
pub mod error;

/// Named rule-changes and the height-to-activation oracle.
pub mod fork;

/// Network selector.
pub mod network;

/// Consensus parameter bundles.
pub mod params;

/// Supported proof-of-work algorithms.
pub mod pow;

/// Re-export commonly used types.
pub mod prelude {
    pub use crate::config::ChainConfig;
    pub use crate::error::{ParamsError, Result};
    pub use crate::fork::{ActivationOracle, Fork, ForkHeights, ForkPolicy};
    pub use crate::network::Network;
    pub use crate::params::ConsensusParams;
    pub use crate::pow::{PowAlgo, NUM_ALGOS};
}

pub use prelude::*;
