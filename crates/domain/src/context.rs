//! Session context — metadata describing the embedding surface.
//!
//! Populated once after platform initialization and immutable for the
//! session's duration; a different context requires a full reload.

use serde::{Deserialize, Serialize};

use crate::capability::Scope;

/// Where the app is embedded. `None` and `External` surfaces cannot push
/// messages into a chat, which is why they appear in the capability
/// fallback exclusion list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextType {
    /// One-to-one chat.
    Utou,
    Room,
    Group,
    SquareChat,
    External,
    None,
}

/// The view height the host client renders the app in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewType {
    Compact,
    Tall,
    Full,
}

/// Host operating system as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Os {
    Ios,
    Android,
    Web,
}

/// Context returned by the platform once, right after init.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Context {
    #[serde(rename = "type")]
    pub context_type: ContextType,
    #[serde(default)]
    pub view_type: Option<ViewType>,
    #[serde(default)]
    pub liff_id: Option<String>,
    /// Scopes the app was registered with. These are hints about what the
    /// app *may* do, not what the user actually granted.
    #[serde(default)]
    pub scope: Vec<Scope>,
    #[serde(default)]
    pub mini_domain_allowed: bool,
    #[serde(default)]
    pub endpoint_url: Option<String>,
}

impl Context {
    /// Whether the advertised scope list hints at message-write permission.
    pub fn hints_message_write(&self) -> bool {
        self.scope.contains(&Scope::ChatMessageWrite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_deserializes_platform_json() {
        let raw = r#"{
            "type": "utou",
            "viewType": "full",
            "liffId": "1234-abcd",
            "scope": ["profile", "chat_message.write"],
            "miniDomainAllowed": false,
            "endpointUrl": "https://example.com/app"
        }"#;
        let ctx: Context = serde_json::from_str(raw).unwrap();
        assert_eq!(ctx.context_type, ContextType::Utou);
        assert_eq!(ctx.view_type, Some(ViewType::Full));
        assert!(ctx.hints_message_write());
    }

    #[test]
    fn square_chat_uses_snake_case() {
        let ctx_type: ContextType = serde_json::from_str("\"square_chat\"").unwrap();
        assert_eq!(ctx_type, ContextType::SquareChat);
    }

    #[test]
    fn missing_optional_fields_default() {
        let ctx: Context = serde_json::from_str(r#"{"type": "external"}"#).unwrap();
        assert_eq!(ctx.context_type, ContextType::External);
        assert!(ctx.scope.is_empty());
        assert!(!ctx.hints_message_write());
    }
}
