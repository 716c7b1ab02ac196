//! Caller identity.
//!
//! Real identity resolution (sessions, tokens) lives outside the core. API surfaces resolve a
//! [`CallerIdentity`] and hand it to the services; the core only records who owns a project.

use crate::{BrandError, BrandResult};
use brandgen_types::NonEmptyText;

/// The user on whose behalf a request runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallerIdentity {
    user_id: NonEmptyText,
}

impl CallerIdentity {
    /// # Errors
    ///
    /// Returns `BrandError::InvalidInput` if `user_id` is blank.
    pub fn new(user_id: &str) -> BrandResult<Self> {
        let user_id = NonEmptyText::new(user_id)
            .map_err(|_| BrandError::InvalidInput("user id cannot be empty".into()))?;
        Ok(Self { user_id })
    }

    /// Resolves the caller for a request.
    ///
    /// # Arguments
    ///
    /// * `supplied` - User id sent by the client, e.g. the `x-user-id` header
    /// * `default_user_id` - Configured owner used when `supplied` is absent or blank
    ///
    /// # Errors
    ///
    /// Returns `BrandError::InvalidInput` only if both values are blank.
    pub fn resolve(supplied: Option<&str>, default_user_id: &str) -> BrandResult<Self> {
        match NonEmptyText::from_optional(supplied) {
            Some(user_id) => Ok(Self { user_id }),
            None => Self::new(default_user_id),
        }
    }

    pub fn user_id(&self) -> &str {
        self.user_id.as_str()
    }
}
