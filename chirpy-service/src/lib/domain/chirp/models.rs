use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use super::errors::ChirpBodyError;
use super::errors::ChirpIdError;
use super::errors::SortOrderError;
use crate::domain::user::models::UserId;

/// A short message posted by a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chirp {
    pub id: ChirpId,
    pub body: ChirpBody,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Chirp unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChirpId(pub Uuid);

impl ChirpId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a chirp ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, ChirpIdError> {
        Uuid::parse_str(s)
            .map(ChirpId)
            .map_err(|e| ChirpIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for ChirpId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ChirpId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Chirp text
///
/// Ensures the body is non-empty and at most 140 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChirpBody(String);

impl ChirpBody {
    const MAX_LENGTH: usize = 140;

    /// Create a validated chirp body.
    ///
    /// Length is counted in characters, not bytes.
    ///
    /// # Errors
    /// * `Empty` - Body is empty or whitespace only
    /// * `TooLong` - Body exceeds 140 characters
    pub fn new(body: String) -> Result<Self, ChirpBodyError> {
        if body.trim().is_empty() {
            return Err(ChirpBodyError::Empty);
        }

        let length = body.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(ChirpBodyError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        Ok(Self(body))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Ordering of chirp listings by creation time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl FromStr for SortOrder {
    type Err = SortOrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Ascending),
            "desc" => Ok(SortOrder::Descending),
            other => Err(SortOrderError::Unknown(other.to_string())),
        }
    }
}

/// Criteria for listing chirps
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChirpFilter {
    pub author_id: Option<UserId>,
    pub sort: SortOrder,
}
