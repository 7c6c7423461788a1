//! Height-triggered rule changes.
//!
//! Each network carries a static [`ForkHeights`] table. A fork is active at
//! every height at or above its table entry, so activation is monotonic by
//! construction. Regtest starts from the testnet table and applies
//! [`REGTEST_FORK_OVERRIDES`] on top, which keeps shared values in one place.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParamsError;
use crate::network::Network;

/// Named rule changes. Ordinals are stable and must never be reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Fork {
    /// Poison disaster; general cost raised from 1 to 10 HUC.
    Poison = 0,
    /// Carrying capacity, removed spawn death, new-style name registration,
    /// stricter transaction version and auxpow checks.
    CarryingCap = 1,
    /// General cost 200 HUC, carrying capacity 2000 HUC, heart spawn rate
    /// 1/500, general explosion radius 1.
    LessHearts = 2,
    /// Life steal: destruct fee, hearts disabled, randomised spawn and
    /// banking locations.
    LifeSteal = 3,
}

impl Fork {
    /// Every fork, in ordinal order.
    pub const ALL: [Fork; 4] = [Fork::Poison, Fork::CarryingCap, Fork::LessHearts, Fork::LifeSteal];

    /// Canonical name used in logs and config files.
    pub fn name(&self) -> &'static str {
        match self {
            Fork::Poison => "poison",
            Fork::CarryingCap => "carryingcap",
            Fork::LessHearts => "lesshearts",
            Fork::LifeSteal => "lifesteal",
        }
    }
}

impl TryFrom<u8> for Fork {
    type Error = ParamsError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Fork::Poison),
            1 => Ok(Fork::CarryingCap),
            2 => Ok(Fork::LessHearts),
            3 => Ok(Fork::LifeSteal),
            _ => Err(ParamsError::InvalidForkOrdinal(value)),
        }
    }
}

impl fmt::Display for Fork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Fork {
    type Err = ParamsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Fork::ALL
            .into_iter()
            .find(|fork| fork.name() == wanted)
            .ok_or_else(|| ParamsError::UnknownFork(s.to_string()))
    }
}

/// First active height of every fork on one network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForkHeights {
    /// Activation height of [`Fork::Poison`]
    pub poison: u32,
    /// Activation height of [`Fork::CarryingCap`]
    pub carrying_cap: u32,
    /// Activation height of [`Fork::LessHearts`]
    pub less_hearts: u32,
    /// Activation height of [`Fork::LifeSteal`]
    pub life_steal: u32,
}

impl ForkHeights {
    /// Activation height of `fork`.
    pub const fn get(&self, fork: Fork) -> u32 {
        match fork {
            Fork::Poison => self.poison,
            Fork::CarryingCap => self.carrying_cap,
            Fork::LessHearts => self.less_hearts,
            Fork::LifeSteal => self.life_steal,
        }
    }

    /// Copy of this table with a single entry replaced.
    pub const fn with_override(mut self, fork: Fork, height: u32) -> Self {
        match fork {
            Fork::Poison => self.poison = height,
            Fork::CarryingCap => self.carrying_cap = height,
            Fork::LessHearts => self.less_hearts = height,
            Fork::LifeSteal => self.life_steal = height,
        }
        self
    }

    /// Copy of this table with each `(fork, height)` applied in order. Later
    /// entries win.
    pub const fn with_overrides(self, overrides: &[(Fork, u32)]) -> Self {
        let mut heights = self;
        let mut i = 0;
        while i < overrides.len() {
            let (fork, height) = overrides[i];
            heights = heights.with_override(fork, height);
            i += 1;
        }
        heights
    }
}

/// Mainnet activation heights.
pub const MAINNET_FORK_HEIGHTS: ForkHeights = ForkHeights {
    poison: 255_000,
    carrying_cap: 500_000,
    less_hearts: 590_000,
    life_steal: 795_000,
};

/// Testnet activation heights.
pub const TESTNET_FORK_HEIGHTS: ForkHeights = ForkHeights {
    poison: 190_000,
    carrying_cap: 200_000,
    less_hearts: 240_000,
    life_steal: 301_000,
};

/// Entries where regtest departs from testnet. Empty means regtest follows
/// testnet exactly.
pub const REGTEST_FORK_OVERRIDES: &[(Fork, u32)] = &[];

/// Regtest activation heights.
pub const REGTEST_FORK_HEIGHTS: ForkHeights = TESTNET_FORK_HEIGHTS.with_overrides(REGTEST_FORK_OVERRIDES);

/// Height-to-activation oracle.
pub trait ActivationOracle {
    /// Whether `fork` is in effect for a block at `height`.
    fn is_active(&self, fork: Fork, height: u32) -> bool;

    /// Whether `height` is exactly the block where `fork` switches on. Used
    /// to run one-time migration logic. Height 0 never qualifies.
    fn is_activation_height(&self, fork: Fork, height: u32) -> bool {
        if height == 0 {
            return false;
        }

        self.is_active(fork, height) && !self.is_active(fork, height - 1)
    }
}

/// Fork policy of one network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForkPolicy {
    network: Network,
    heights: ForkHeights,
}

impl ForkPolicy {
    /// Policy for `network`.
    pub fn new(network: Network) -> Self {
        let heights = match network {
            Network::Mainnet => MAINNET_FORK_HEIGHTS,
            Network::Testnet => TESTNET_FORK_HEIGHTS,
            Network::Regtest => REGTEST_FORK_HEIGHTS,
        };
        Self { network, heights }
    }

    /// Mainnet policy.
    pub fn mainnet() -> Self {
        Self::new(Network::Mainnet)
    }

    /// Testnet policy.
    pub fn testnet() -> Self {
        Self::new(Network::Testnet)
    }

    /// Regtest policy.
    pub fn regtest() -> Self {
        Self::new(Network::Regtest)
    }

    /// Network this policy belongs to.
    pub fn network(&self) -> Network {
        self.network
    }

    /// The table backing this policy.
    pub fn heights(&self) -> &ForkHeights {
        &self.heights
    }

    /// First height at which `fork` is active.
    pub fn activation_height(&self, fork: Fork) -> u32 {
        self.heights.get(fork)
    }

    /// Forks that switch on exactly at `height`.
    pub fn forks_activating_at(&self, height: u32) -> impl Iterator<Item = Fork> + '_ {
        Fork::ALL
            .into_iter()
            .filter(move |fork| self.is_activation_height(*fork, height))
    }
}

impl ActivationOracle for ForkPolicy {
    fn is_active(&self, fork: Fork, height: u32) -> bool {
        height >= self.heights.get(fork)
    }
}
