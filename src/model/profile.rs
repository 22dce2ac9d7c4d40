use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Youngest age a profile accepts.
pub const AGE_MIN: u32 = 1;
/// Oldest age a profile accepts.
pub const AGE_MAX: u32 = 99;

/// Respondent sex as used by normalization rules.
///
/// Serialized as "M"/"F". `parse` also accepts the spelled-out forms used
/// by older survey payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Sex {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl Sex {
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim() {
            "M" | "m" | "male" | "Male" => Ok(Sex::Male),
            "F" | "f" | "female" | "Female" => Ok(Sex::Female),
            other => bail!("Unrecognized sex '{}': expected M, F, male or female", other),
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sex::Male => write!(f, "M"),
            Sex::Female => write!(f, "F"),
        }
    }
}

/// Demographic attributes a normalization lookup is keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct UserProfile {
    pub age: u32,
    pub sex: Sex,
}

impl UserProfile {
    /// Build a profile, rejecting out-of-bounds ages.
    pub fn new(age: u32, sex: Sex) -> Result<Self> {
        if !(AGE_MIN..=AGE_MAX).contains(&age) {
            bail!("Age must be between {} and {}", AGE_MIN, AGE_MAX);
        }
        Ok(Self { age, sex })
    }

    /// Whether the age lies within the accepted bounds.
    ///
    /// Deserialized profiles bypass `new`, so the scoring engine re-checks
    /// this before computing.
    pub fn age_in_bounds(&self) -> bool {
        (AGE_MIN..=AGE_MAX).contains(&self.age)
    }
}
