//! # Region Identifiers
//!
//! Newtypes for state/union-territory and district names. Raw government
//! CSV exports spell the same region a dozen ways ("ORISSA", "WESTBENGAL",
//! "Andaman & Nicobar"); everything downstream of ingest works with the
//! canonical uppercase forms defined here.
//!
//! ## Cleaning
//!
//! Both newtypes share one scrub: uppercase, `&` → `AND`, strip everything
//! that is not an ASCII letter or whitespace, collapse runs of whitespace.
//! Names containing digits are rejected outright — in the source exports
//! those are shifted rows, not regions.
//!
//! ## Canonicalization
//!
//! [`StateName`] additionally folds known aliases and then requires a
//! substring match against the official 36-entity list; construction fails
//! for anything that resolves to no official entity.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// The official 36 states and union territories.
pub const OFFICIAL_STATES: [&str; 36] = [
    "ANDAMAN AND NICOBAR ISLANDS",
    "ANDHRA PRADESH",
    "ARUNACHAL PRADESH",
    "ASSAM",
    "BIHAR",
    "CHANDIGARH",
    "CHHATTISGARH",
    "DADRA AND NAGAR HAVELI AND DAMAN AND DIU",
    "DELHI",
    "GOA",
    "GUJARAT",
    "HARYANA",
    "HIMACHAL PRADESH",
    "JAMMU AND KASHMIR",
    "JHARKHAND",
    "KARNATAKA",
    "KERALA",
    "LADAKH",
    "LAKSHADWEEP",
    "MADHYA PRADESH",
    "MAHARASHTRA",
    "MANIPUR",
    "MEGHALAYA",
    "MIZORAM",
    "NAGALAND",
    "ODISHA",
    "PUDUCHERRY",
    "PUNJAB",
    "RAJASTHAN",
    "SIKKIM",
    "TAMIL NADU",
    "TELANGANA",
    "TRIPURA",
    "UTTAR PRADESH",
    "UTTARAKHAND",
    "WEST BENGAL",
];

/// Known misspellings and legacy names, folded before the official-list match.
const STATE_ALIASES: [(&str, &str); 15] = [
    ("ANDAMAN NICOBAR", "ANDAMAN AND NICOBAR ISLANDS"),
    ("ANDAMAN AND NICOBAR", "ANDAMAN AND NICOBAR ISLANDS"),
    ("ANDAAMAN NICOBAR", "ANDAMAN AND NICOBAR ISLANDS"),
    ("ANDAMAN NICOBAR ISLANDS", "ANDAMAN AND NICOBAR ISLANDS"),
    (
        "THE DADRA AND NAGAR HAVELI AND DAMAN AND DIU",
        "DADRA AND NAGAR HAVELI AND DAMAN AND DIU",
    ),
    ("DADRA NAGAR HAVELI", "DADRA AND NAGAR HAVELI AND DAMAN AND DIU"),
    ("DAMAN AND DIU", "DADRA AND NAGAR HAVELI AND DAMAN AND DIU"),
    ("ORISSA", "ODISHA"),
    ("PONDICHERRY", "PUDUCHERRY"),
    ("UTTARANCHAL", "UTTARAKHAND"),
    ("CHHATISGARH", "CHHATTISGARH"),
    ("WESTBENGAL", "WEST BENGAL"),
    ("WEST BANGAL", "WEST BENGAL"),
    ("WEST BENGLI", "WEST BENGAL"),
    ("JAMMU KASHMIR", "JAMMU AND KASHMIR"),
];

/// Districts that predate the Telangana bifurcation in the older exports.
/// Rows carrying these districts are reassigned to TELANGANA during ingest.
const TELANGANA_DISTRICTS: [&str; 10] = [
    "ADILABAD",
    "HYDERABAD",
    "KARIMNAGAR",
    "KHAMMAM",
    "MAHABUBNAGAR",
    "MEDAK",
    "NALGONDA",
    "NIZAMABAD",
    "RANGAREDDI",
    "WARANGAL",
];

/// Shared scrub applied to every raw region name.
fn clean(raw: &str) -> Result<String, ValidationError> {
    if raw.chars().any(|c| c.is_ascii_digit()) {
        return Err(ValidationError::DigitsInName(raw.to_string()));
    }
    let upper = raw.to_uppercase().replace('&', "AND");
    let letters: String = upper
        .chars()
        .filter(|c| c.is_ascii_uppercase() || c.is_whitespace())
        .collect();
    let collapsed = letters.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(collapsed)
}

// -- Validating Deserialize for StateName -------------------------------------

impl<'de> Deserialize<'de> for StateName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::canonical(&raw).map_err(serde::de::Error::custom)
    }
}

/// A canonical state or union territory name.
///
/// Always one of [`OFFICIAL_STATES`]; construction via [`StateName::canonical`]
/// folds aliases and fails for unrecognized names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct StateName(String);

impl StateName {
    /// Clean a raw name and resolve it to the official entity list.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::DigitsInName`] or
    /// [`ValidationError::EmptyName`] when cleaning fails, and
    /// [`ValidationError::UnknownState`] when the cleaned name matches no
    /// official entity.
    pub fn canonical(raw: &str) -> Result<Self, ValidationError> {
        let cleaned = clean(raw)?;
        if let Some((_, target)) = STATE_ALIASES.iter().find(|(alias, _)| *alias == cleaned) {
            return Ok(Self((*target).to_string()));
        }
        for official in OFFICIAL_STATES {
            if official.contains(&cleaned) || cleaned.contains(official) {
                return Ok(Self(official.to_string()));
            }
        }
        Err(ValidationError::UnknownState(cleaned))
    }

    /// Access the canonical name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for StateName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StateName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// -- Validating Deserialize for DistrictName ----------------------------------

impl<'de> Deserialize<'de> for DistrictName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::new(&raw).map_err(serde::de::Error::custom)
    }
}

/// A cleaned district name.
///
/// Districts have no official master list in the source exports, so only
/// the shared scrub applies. Always uppercase, letters and spaces, non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct DistrictName(String);

impl DistrictName {
    /// Clean a raw district name.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::DigitsInName`] or
    /// [`ValidationError::EmptyName`] when cleaning fails.
    pub fn new(raw: &str) -> Result<Self, ValidationError> {
        Ok(Self(clean(raw)?))
    }

    /// Access the cleaned name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this district belongs to the pre-bifurcation Telangana set.
    pub fn is_telangana_district(&self) -> bool {
        TELANGANA_DISTRICTS.contains(&self.0.as_str())
    }
}

impl std::borrow::Borrow<str> for DistrictName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DistrictName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
