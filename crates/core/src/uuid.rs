//! Record identifiers.
//!
//! Projects and brand elements are keyed by a *canonical* UUID: **32 lowercase hexadecimal
//! characters** with no hyphens, the same value `Uuid::new_v4().simple().to_string()` produces.
//!
//! Identifiers supplied from outside the core (path segments, CLI arguments) must already be
//! canonical. Uppercase, hyphenated, wrong-length or non-hex input is rejected rather than
//! normalised, so a given record has exactly one spelling in URLs and in the database.

use crate::error::{BrandError, BrandResult};
use std::{fmt, str::FromStr};

use ::uuid::Uuid;

/// Canonical identifier of a stored project or brand element.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RecordId(Uuid);

impl RecordId {
    /// Allocates a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Validates an externally supplied identifier.
    ///
    /// # Errors
    ///
    /// Returns [`BrandError::InvalidInput`] if `input` is not in canonical form.
    pub fn parse(input: &str) -> BrandResult<Self> {
        if !Self::is_canonical(input) {
            return Err(BrandError::InvalidInput(format!(
                "id must be 32 lowercase hex characters without hyphens, got: '{input}'"
            )));
        }
        Uuid::parse_str(input)
            .map(Self)
            .map_err(|e| BrandError::InvalidInput(format!("invalid id '{input}': {e}")))
    }

    /// Purely syntactic check: exactly 32 bytes of `0-9a-f`.
    pub fn is_canonical(input: &str) -> bool {
        input.len() == 32
            && input
                .bytes()
                .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

impl FromStr for RecordId {
    type Err = BrandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecordId::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_ids_display_in_canonical_form() {
        let id = RecordId::new().to_string();
        assert!(RecordId::is_canonical(&id), "not canonical: {id}");
    }

    #[test]
    fn parse_round_trips_canonical_input() {
        let input = "550e8400e29b41d4a716446655440000";
        assert_eq!(RecordId::parse(input).unwrap().to_string(), input);
    }

    #[test]
    fn parse_rejects_non_canonical_forms() {
        for bad in [
            "550e8400-e29b-41d4-a716-446655440000",
            "550E8400E29B41D4A716446655440000",
            "550e8400e29b41d4a71644665544000",
            "zz0e8400e29b41d4a716446655440000",
            "",
        ] {
            assert!(
                matches!(RecordId::parse(bad), Err(BrandError::InvalidInput(_))),
                "accepted {bad:?}"
            );
        }
    }
}
