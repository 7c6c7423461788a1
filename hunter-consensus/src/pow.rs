use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParamsError;

/// Number of supported proof-of-work algorithms.
pub const NUM_ALGOS: usize = 2;

/// Dual-algorithm proof-of-work. The ordinal indexes every per-algorithm
/// array in [`ConsensusParams`](crate::params::ConsensusParams).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum PowAlgo {
    /// Double SHA-256
    Sha256d = 0,
    /// Scrypt
    Scrypt = 1,
}

impl PowAlgo {
    /// All algorithms, in ordinal order.
    pub const ALL: [PowAlgo; NUM_ALGOS] = [PowAlgo::Sha256d, PowAlgo::Scrypt];

    /// Position in the per-algorithm arrays.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Canonical lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            PowAlgo::Sha256d => "sha256d",
            PowAlgo::Scrypt => "scrypt",
        }
    }
}

impl TryFrom<u8> for PowAlgo {
    type Error = ParamsError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(PowAlgo::Sha256d),
            1 => Ok(PowAlgo::Scrypt),
            _ => Err(ParamsError::InvalidAlgoOrdinal(value)),
        }
    }
}

impl fmt::Display for PowAlgo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PowAlgo {
    type Err = ParamsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sha256d" | "sha256" => Ok(PowAlgo::Sha256d),
            "scrypt" => Ok(PowAlgo::Scrypt),
            _ => Err(ParamsError::UnknownAlgo(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algo_ordinals_are_stable() {
        assert_eq!(PowAlgo::Sha256d as u8, 0);
        assert_eq!(PowAlgo::Scrypt as u8, 1);
        for (i, algo) in PowAlgo::ALL.iter().enumerate() {
            assert_eq!(algo.index(), i);
            assert_eq!(PowAlgo::try_from(i as u8).unwrap(), *algo);
        }
    }

    #[test]
    fn test_invalid_algo_ordinal() {
        assert!(matches!(
            PowAlgo::try_from(NUM_ALGOS as u8),
            Err(ParamsError::InvalidAlgoOrdinal(2))
        ));
    }

    #[test]
    fn test_algo_names() {
        assert_eq!("SHA256D".parse::<PowAlgo>().unwrap(), PowAlgo::Sha256d);
        assert_eq!("scrypt".parse::<PowAlgo>().unwrap(), PowAlgo::Scrypt);
        assert!("ethash".parse::<PowAlgo>().is_err());
        assert_eq!(PowAlgo::Scrypt.to_string(), "scrypt");
    }
}
