//! User profile and identity tokens.
//!
//! Both exist if and only if the session is logged in, and both clear
//! together on logout — never one without the other.

use serde::{Deserialize, Serialize};

/// The logged-in user's profile as returned by the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub user_id: String,
    pub display_name: String,
    #[serde(default)]
    pub picture_url: Option<String>,
    #[serde(default)]
    pub status_message: Option<String>,
}

/// Claims of the decoded OpenID Connect ID token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedIdToken {
    #[serde(default)]
    pub iss: Option<String>,
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub aud: Option<String>,
    #[serde(default)]
    pub exp: Option<i64>,
    #[serde(default)]
    pub iat: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Raw and decoded tokens for the current login.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityTokens {
    pub id_token: Option<String>,
    pub access_token: Option<String>,
    pub decoded: Option<DecodedIdToken>,
}

impl IdentityTokens {
    pub fn is_present(&self) -> bool {
        self.id_token.is_some() || self.access_token.is_some() || self.decoded.is_some()
    }

    pub fn clear(&mut self) {
        self.id_token = None;
        self.access_token = None;
        self.decoded = None;
    }
}
