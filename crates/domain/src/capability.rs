//! Capabilities and permission scopes.
//!
//! A capability is a named optional feature whose availability depends on
//! runtime context (login state, embedding surface, granted permissions),
//! never on static configuration alone. Consumers test set membership and
//! must not rely on any ordering.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Features the playground can offer once resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Push messages into the current chat (`sendMessages`).
    SendMessage,
    /// Open the share target picker dialog.
    ShareTargetPicker,
    /// QR / barcode scanning, v2 API.
    ScanCodeV2,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::SendMessage => "send_message",
            Self::ShareTargetPicker => "share_target_picker",
            Self::ScanCodeV2 => "scan_code_v2",
        };
        write!(f, "{name}")
    }
}

/// The derived capability set. Unordered; membership checks only.
pub type CapabilitySet = HashSet<Capability>;

/// An OAuth-style permission scope advertised by the platform, either in
/// the session context or by the explicit granted-permission query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scope {
    Profile,
    /// `chat_message.write` — the gate for send-message.
    ChatMessageWrite,
    OpenId,
    Email,
    /// Scopes this playground does not model explicitly.
    Other(String),
}

impl Scope {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Profile => "profile",
            Self::ChatMessageWrite => "chat_message.write",
            Self::OpenId => "openid",
            Self::Email => "email",
            Self::Other(s) => s,
        }
    }
}

impl From<&str> for Scope {
    fn from(s: &str) -> Self {
        match s {
            "profile" => Self::Profile,
            "chat_message.write" => Self::ChatMessageWrite,
            "openid" => Self::OpenId,
            "email" => Self::Email,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for Scope {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Scope {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Scope::from(s.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_string_round_trip() {
        for raw in ["profile", "chat_message.write", "openid", "email", "payments"] {
            let scope = Scope::from(raw);
            assert_eq!(scope.as_str(), raw);
        }
        assert!(matches!(Scope::from("payments"), Scope::Other(_)));
    }

    #[test]
    fn scope_serde_uses_wire_names() {
        let json = serde_json::to_string(&Scope::ChatMessageWrite).unwrap();
        assert_eq!(json, "\"chat_message.write\"");
        let back: Scope = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Scope::ChatMessageWrite);
    }
}
