use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const COARSE_STEP: u32 = 50;
pub const FINE_STEP: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Denomination {
    TenCents,
    TwentyCents,
    FiftyCents,
    TwoEuro,
}

impl Denomination {
    pub const ALL: [Denomination; 4] = [
        Denomination::TenCents,
        Denomination::TwentyCents,
        Denomination::FiftyCents,
        Denomination::TwoEuro,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Denomination::TenCents => "10ct",
            Denomination::TwentyCents => "20ct",
            Denomination::FiftyCents => "50ct",
            Denomination::TwoEuro => "2Euro",
        }
    }

    pub fn face_value_cents(self) -> u64 {
        match self {
            Denomination::TenCents => 10,
            Denomination::TwentyCents => 20,
            Denomination::FiftyCents => 50,
            Denomination::TwoEuro => 200,
        }
    }

    /// Coins ship in rolls: 50ct and 2Euro come in packs of 50, everything
    /// else in packs of 100.
    pub fn rounding_step(self) -> u32 {
        match self {
            Denomination::FiftyCents | Denomination::TwoEuro => COARSE_STEP,
            Denomination::TenCents | Denomination::TwentyCents => FINE_STEP,
        }
    }
}

impl fmt::Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown denomination `{0}` (expected one of 10ct, 20ct, 50ct, 2Euro)")]
pub struct UnknownDenomination(pub String);

impl FromStr for Denomination {
    type Err = UnknownDenomination;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Denomination::ALL
            .into_iter()
            .find(|denomination| {
                denomination.label().eq_ignore_ascii_case(wanted)
                    || format!("{denomination:?}").eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| UnknownDenomination(wanted.to_string()))
    }
}
