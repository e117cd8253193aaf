//! User profile record.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Profile stored under `userInfo` by the login page.
///
/// Only `nickname` is read here; other fields are collected in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    /// Display name. Numbers and `true` are shown as their text; falsy values
    /// (`null`, `false`, `0`, `""`) and containers count as no name.
    #[serde(
        default,
        deserialize_with = "lenient_nickname",
        skip_serializing_if = "Option::is_none"
    )]
    pub nickname: Option<String>,
    /// Remaining fields, untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl UserInfo {
    /// Create a profile with just a nickname.
    pub fn with_nickname(nickname: impl Into<String>) -> Self {
        Self {
            nickname: Some(nickname.into()),
            extra: serde_json::Map::new(),
        }
    }

    /// The nickname, if present and non-empty.
    pub fn display_name(&self) -> Option<&str> {
        self.nickname.as_deref().filter(|n| !n.is_empty())
    }
}

fn lenient_nickname<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let name = match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    };
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        assert_eq!(UserInfo::with_nickname("ana").display_name(), Some("ana"));
        assert_eq!(UserInfo::with_nickname("").display_name(), None);
        assert_eq!(UserInfo::default().display_name(), None);
    }

    #[test]
    fn test_non_string_nickname_is_shown_as_text() {
        let info: UserInfo = serde_json::from_str(r#"{"nickname":123,"userId":7}"#).unwrap();
        assert_eq!(info.display_name(), Some("123"));
        assert_eq!(info.extra["userId"], 7);

        let info: UserInfo = serde_json::from_str(r#"{"nickname":true}"#).unwrap();
        assert_eq!(info.display_name(), Some("true"));
    }

    #[test]
    fn test_falsy_nickname_is_no_name() {
        for json in [
            r#"{"nickname":null}"#,
            r#"{"nickname":0}"#,
            r#"{"nickname":false}"#,
            r#"{"nickname":{"first":"ana"}}"#,
        ] {
            let info: UserInfo = serde_json::from_str(json).unwrap();
            assert_eq!(info.display_name(), None, "{}", json);
        }
    }

    #[test]
    fn test_extra_fields_survive() {
        let json = r#"{"nickname":"ana","userId":7,"avatar":"a.png"}"#;
        let info: UserInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.extra.len(), 2);

        let back: serde_json::Value = serde_json::to_value(&info).unwrap();
        assert_eq!(back["userId"], 7);
        assert_eq!(back["nickname"], "ana");
    }
}
