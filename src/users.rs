//! User-data access facade
//!
//! Exposes the three user-record operations of the frontend: fetch a user by
//! identifier, persist an edited record, and change a password. The backend
//! endpoints are not live yet, so every operation short-circuits to a fixed
//! successful result without performing network I/O. The facade keeps the
//! shared HTTP client and the endpoint paths so the real calls can be wired
//! in without changing the call sites.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Path of the user-detail fetch endpoint (`GET`, `uid` query parameter).
pub const USER_DETAIL_GET_PATH: &str = "/user/detail/get";

/// Path of the user-detail update endpoint (`POST`, JSON body).
pub const USER_DETAIL_UPDATE_PATH: &str = "/user/detail/update";

/// Path of the password-change endpoint (`POST`).
pub const USER_PASSWORD_CHANGE_PATH: &str = "/user/password/change";

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// A user record as exchanged with the user-detail endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user identifier.
    pub uid: String,

    /// Given name.
    pub first_name: String,

    /// Family name.
    pub last_name: String,

    /// Contact email address.
    pub email: String,
}

// ---------------------------------------------------------------------------
// UserService
// ---------------------------------------------------------------------------

/// Facade over the user-record API.
///
/// All operations currently return fabricated values; they cannot fail by
/// construction.
pub struct UserService {
    /// Shared HTTP client, held for the eventual real endpoint calls.
    #[allow(dead_code)]
    http: Arc<reqwest::Client>,

    /// Base URL of the user-record API.
    #[allow(dead_code)]
    base_url: String,
}

impl UserService {
    /// Creates a facade over the API at `base_url`.
    pub fn new(http: Arc<reqwest::Client>, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// Fetches the user record for `uid`.
    ///
    /// Stubbed: fabricates a record for the requested identifier instead of
    /// calling [`USER_DETAIL_GET_PATH`].
    pub async fn get_user_info(&self, uid: &str) -> Result<User> {
        Ok(User {
            uid: uid.to_string(),
            first_name: "userFirstName".to_string(),
            last_name: "userLastName".to_string(),
            email: "user@email.ch".to_string(),
        })
    }

    /// Persists an edited user record.
    ///
    /// Stubbed: reports success instead of POSTing to
    /// [`USER_DETAIL_UPDATE_PATH`].
    pub async fn save_user_info(&self, _user: &User) -> Result<bool> {
        Ok(true)
    }

    /// Changes the password for `uid`.
    ///
    /// Stubbed: reports success instead of POSTing to
    /// [`USER_PASSWORD_CHANGE_PATH`].
    pub async fn change_user_password(&self, _uid: &str, _new_password: &str) -> Result<bool> {
        Ok(true)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
