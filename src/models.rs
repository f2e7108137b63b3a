use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LEN: usize = 4;

/// Maximum accepted message length, in characters.
pub const MAX_MESSAGE_LEN: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Account {
    pub account_id: i64,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Message {
    pub message_id: i64,
    pub posted_by: i64,
    pub message_text: String,
    pub time_posted_epoch: i64,
}

/// Body of `POST /register` and `POST /login`.
///
/// Missing or `null` fields decode as empty strings and scalar values as
/// their text, so odd bodies fail the ordinary registration and login checks
/// instead of the JSON extractor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default, deserialize_with = "lenient_string")]
    pub username: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub password: String,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct LenientString;

    impl<'de> Visitor<'de> for LenientString {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a string, number, boolean or null")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_unit<E: de::Error>(self) -> Result<String, E> {
            Ok(String::new())
        }

        fn visit_none<E: de::Error>(self) -> Result<String, E> {
            Ok(String::new())
        }
    }

    deserializer.deserialize_any(LenientString)
}

/// Body of `POST /messages`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewMessage {
    #[serde(default)]
    pub posted_by: i64,
    #[serde(default)]
    pub message_text: String,
    #[serde(default)]
    pub time_posted_epoch: i64,
}

/// Body of `PATCH /messages/{message_id}`. Any other fields are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessagePatch {
    #[serde(default)]
    pub message_text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_ignore_client_supplied_id() {
        let creds: Credentials =
            serde_json::from_str(r#"{"account_id":9,"username":"bob","password":"pass1"}"#)
                .unwrap();
        assert_eq!(creds.username, "bob");
        assert_eq!(creds.password, "pass1");
    }

    #[test]
    fn credentials_accept_null_and_scalars() {
        let creds: Credentials =
            serde_json::from_str(r#"{"username":null,"password":1234}"#).unwrap();
        assert_eq!(creds.username, "");
        assert_eq!(creds.password, "1234");

        let creds: Credentials =
            serde_json::from_str(r#"{"username":true,"password":"pass1"}"#).unwrap();
        assert_eq!(creds.username, "true");
    }

    #[test]
    fn credentials_reject_nested_values() {
        assert!(serde_json::from_str::<Credentials>(r#"{"username":["bob"]}"#).is_err());
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let msg: NewMessage = serde_json::from_str("{}").unwrap();
        assert_eq!(msg.posted_by, 0);
        assert!(msg.message_text.is_empty());

        let patch: MessagePatch = serde_json::from_str(r#"{"posted_by":3}"#).unwrap();
        assert!(patch.message_text.is_empty());
    }

    #[test]
    fn message_serializes_with_wire_field_names() {
        let msg = Message {
            message_id: 1,
            posted_by: 1,
            message_text: "hi".into(),
            time_posted_epoch: 1000,
        };
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "message_id": 1,
                "posted_by": 1,
                "message_text": "hi",
                "time_posted_epoch": 1000
            })
        );
    }
}
