//! Teacher records
//!
//! The shape shared by the classes API response and the stored favorites list.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Unique teacher identifier as assigned by the backend
pub type TeacherId = i64;

// =============================================================================
// ScheduleEntry
// =============================================================================

/// One weekly availability slot
///
/// `from`/`to` are minutes since midnight, matching the backend's encoding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScheduleEntry {
    pub week_day: u8,
    pub from: u32,
    pub to: u32,
}

impl ScheduleEntry {
    pub fn new(week_day: u8, from: u32, to: u32) -> Self {
        Self { week_day, from, to }
    }
}

// =============================================================================
// Teacher
// =============================================================================

/// A tutor profile
///
/// Only `id`, `name` and `subject` are required when deserializing; every
/// other field falls back to its default and unknown fields are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Teacher {
    pub id: TeacherId,
    pub name: String,
    pub subject: String,
    /// Price per hour
    #[serde(default)]
    pub cost: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whatsapp: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schedule: Vec<ScheduleEntry>,
}

impl Teacher {
    /// Create a teacher with the required fields only
    pub fn new(id: TeacherId, name: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            subject: subject.into(),
            cost: 0.0,
            avatar: None,
            bio: None,
            whatsapp: None,
            schedule: Vec::new(),
        }
    }

    /// Decode a JSON array of teachers
    pub fn list_from_json(json: &str) -> crate::error::Result<Vec<Teacher>> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encode a list of teachers as a JSON array
    pub fn list_to_json(teachers: &[Teacher]) -> crate::error::Result<String> {
        Ok(serde_json::to_string(teachers)?)
    }
}

// =============================================================================
// FavoriteIds
// =============================================================================

/// Identifier set derived from a favorites list
///
/// Membership is the only question the list screen asks, so this is rebuilt
/// from the current favorites rather than kept in sync.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FavoriteIds(HashSet<TeacherId>);

impl FavoriteIds {
    pub fn from_teachers(teachers: &[Teacher]) -> Self {
        Self(teachers.iter().map(|t| t.id).collect())
    }

    pub fn contains(&self, id: TeacherId) -> bool {
        self.0.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> FromIterator<&'a Teacher> for FavoriteIds {
    fn from_iter<I: IntoIterator<Item = &'a Teacher>>(iter: I) -> Self {
        Self(iter.into_iter().map(|t| t.id).collect())
    }
}
