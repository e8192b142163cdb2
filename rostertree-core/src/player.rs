/// The `Player` domain record and its text-form construction.
///
/// A player is immutable after construction. Ranking and identity are
/// deliberately different relations: ranking orders players by their
/// appearance count (with goals and name breaking ties so traversal order
/// is fully deterministic), while identity is name + jersey + club — the
/// fields that pin down which real person a record denotes.
use std::cmp::Ordering;
use std::fmt;

use thiserror::Error;

use crate::record::TreeRecord;

/// Column count of a dataset row: the ten stored fields plus the losses
/// column, which is carried by the dataset but not by `Player`.
pub const DATASET_FIELDS: usize = 11;

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    pub name: String,
    pub jersey: u32,
    pub club: String,
    pub position: String,
    pub nationality: String,
    pub age: u32,
    pub appearances: u32,
    pub wins: u32,
    pub goals: u32,
    pub assists: u32,
}

/// Why a row or argument list could not become a `Player`.
///
/// Construction always happens before any tree call, so a failure here
/// never leaves a tree partially mutated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlayerError {
    #[error("expected 11 fields, got {0}")]
    FieldCount(usize),
    #[error("field {field} is not a number: {value:?}")]
    NotANumber { field: &'static str, value: String },
}

impl Player {
    /// Builds a player from the fields of one dataset row or one command
    /// argument list, in dataset column order.
    pub fn from_fields(fields: &[&str]) -> Result<Self, PlayerError> {
        if fields.len() != DATASET_FIELDS {
            return Err(PlayerError::FieldCount(fields.len()));
        }
        Ok(Player {
            name: fields[0].trim().to_string(),
            jersey: parse_count("jersey", fields[1])?,
            club: fields[2].trim().to_string(),
            position: fields[3].trim().to_string(),
            nationality: fields[4].trim().to_string(),
            age: parse_count("age", fields[5])?,
            appearances: parse_count("appearances", fields[6])?,
            wins: parse_count("wins", fields[7])?,
            // fields[8] is the losses column; it is not carried.
            goals: parse_count("goals", fields[9])?,
            assists: parse_count("assists", fields[10])?,
        })
    }
}

fn parse_count(field: &'static str, value: &str) -> Result<u32, PlayerError> {
    value.trim().parse().map_err(|_| PlayerError::NotANumber {
        field,
        value: value.trim().to_string(),
    })
}

impl TreeRecord for Player {
    fn rank(&self, other: &Self) -> Ordering {
        self.appearances
            .cmp(&other.appearances)
            .then_with(|| self.goals.cmp(&other.goals))
            .then_with(|| self.name.cmp(&other.name))
    }

    fn same(&self, other: &Self) -> bool {
        self.name == other.name && self.jersey == other.jersey && self.club == other.club
    }
}

/// Canonical comma-delimited form, in dataset column order minus losses.
/// This is the line format the `print` command emits.
impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{},{},{},{},{},{},{}",
            self.name,
            self.jersey,
            self.club,
            self.position,
            self.nationality,
            self.age,
            self.appearances,
            self.wins,
            self.goals,
            self.assists,
        )
    }
}
