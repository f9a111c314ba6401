//! Region-keyed display text for the Nisab.
//!
//! Wording only. The threshold itself is computed the same way everywhere.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Region {
    Bangladesh,
    #[default]
    International,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NisabWording {
    pub basis_note: &'static str,
    pub weight_note: &'static str,
}

impl Region {
    /// Picks a region from an IANA timezone name.
    pub fn from_timezone(tz: &str) -> Self {
        match tz.trim() {
            "Asia/Dhaka" | "Asia/Dacca" => Region::Bangladesh,
            _ => Region::International,
        }
    }

    pub fn nisab_wording(&self) -> NisabWording {
        match self {
            Region::Bangladesh => NisabWording {
                basis_note: "Nisab is the market value of 52.5 vori of silver (Hanafi).",
                weight_note: "1 vori = 11.66 g. Gold: 7.5 vori, silver: 52.5 vori.",
            },
            Region::International => NisabWording {
                basis_note: "Nisab is the market value of 612.15 g of silver (Hanafi).",
                weight_note: "Gold: 87.45 g, silver: 612.15 g.",
            },
        }
    }
}
