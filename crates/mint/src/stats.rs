use alloy_primitives::U256;
use std::fmt;

/// Shown instead of the remaining supply when it could not be read.
pub const SUPPLY_PLACEHOLDER: &str = "—";

/// The two on-chain counters the remaining supply is derived from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SupplyStats {
    pub max_supply: U256,
    pub total_minted: U256,
}

impl SupplyStats {
    pub fn remaining(&self) -> U256 {
        self.max_supply.saturating_sub(self.total_minted)
    }
}

/// What the "remaining" counter displays.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RemainingSupply {
    Known(U256),
    #[default]
    Unavailable,
}

impl From<SupplyStats> for RemainingSupply {
    fn from(stats: SupplyStats) -> Self {
        Self::Known(stats.remaining())
    }
}

impl fmt::Display for RemainingSupply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(remaining) => remaining.fmt(f),
            Self::Unavailable => f.write_str(SUPPLY_PLACEHOLDER),
        }
    }
}
