//! Login session blob.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// The JSON blob returned by `POST /v1/account/login` and kept under the
/// `login` storage key.
///
/// Only the `admin` flag and the token are interpreted; every other field
/// is carried through untouched.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default, deserialize_with = "truthy_flag")]
    pub admin: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Session {
    /// A name to greet the user with: `name`, then `email`, looked up at the
    /// top level and inside a nested `user` object.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        let nested = self.extra.get("user").and_then(Value::as_object);
        ["name", "email"].into_iter().find_map(|key| {
            self.extra
                .get(key)
                .or_else(|| nested.and_then(|user| user.get(key)))
                .and_then(Value::as_str)
        })
    }
}

// Redacts the token.
impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("admin", &self.admin)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("extra_keys", &self.extra.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// `true`, the number one and strings holding the number one count as set;
/// anything else (including `"true"`) does not.
#[allow(clippy::float_cmp)]
fn truthy_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(flag) => flag,
        Value::Number(n) => n.as_f64() == Some(1.0),
        Value::String(s) => s.trim().parse::<f64>().is_ok_and(|n| n == 1.0),
        _ => false,
    })
}
