//! Boxcar payload model and composition.
//!
//! The gateway only accepts scalar values outside the `aps` block, and it
//! rejects keys starting with `to`/`from`. Both constraints are enforced by
//! the types here: extras can only hold scalars, and the sender fields are
//! renamed to `recipient`/`senderName` when the push block is built.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::error::{AppError, AppResult};

/// Lifetime of a push on the gateway, in seconds.
///
/// `expires` is sent in milliseconds while this value is in seconds; the
/// gateway expects exactly that pairing.
pub const EXPIRES_AFTER_SECONDS: u64 = 1800;

/// Keys of the input record that never reach the payload as-is
pub const EXCLUDED_FIELDS: &[&str] = &["badge", "alert", "sound", "to", "from", "fromName"];

/// A value the gateway accepts outside the `aps` block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScalarValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
}

impl ScalarValue {
    /// Convert a JSON value, returning `None` for objects and arrays
    pub fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Null => Some(ScalarValue::Null),
            Value::Bool(b) => Some(ScalarValue::Bool(b)),
            Value::Number(n) => Some(ScalarValue::Number(n)),
            Value::String(s) => Some(ScalarValue::String(s)),
            Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Parse a command-line value: JSON scalars (`3`, `true`, `null`) keep
    /// their type, anything else becomes a string.
    pub fn parse_lenient(raw: &str) -> Self {
        serde_json::from_str::<Value>(raw)
            .ok()
            .and_then(Self::from_json)
            .unwrap_or_else(|| ScalarValue::String(raw.to_string()))
    }
}

impl From<ScalarValue> for Value {
    fn from(value: ScalarValue) -> Self {
        match value {
            ScalarValue::Null => Value::Null,
            ScalarValue::Bool(b) => Value::Bool(b),
            ScalarValue::Number(n) => Value::Number(n),
            ScalarValue::String(s) => Value::String(s),
        }
    }
}

impl From<&str> for ScalarValue {
    fn from(value: &str) -> Self {
        ScalarValue::String(value.to_string())
    }
}

impl From<String> for ScalarValue {
    fn from(value: String) -> Self {
        ScalarValue::String(value)
    }
}

impl From<i64> for ScalarValue {
    fn from(value: i64) -> Self {
        ScalarValue::Number(value.into())
    }
}

impl From<i32> for ScalarValue {
    fn from(value: i32) -> Self {
        ScalarValue::Number(value.into())
    }
}

impl From<bool> for ScalarValue {
    fn from(value: bool) -> Self {
        ScalarValue::Bool(value)
    }
}

/// Caller-supplied notification content
///
/// Built either through the `with_*` methods or from arbitrary JSON via
/// `TryFrom<Value>`, which strips structured extras. The `aps` and sender
/// fields are forwarded with whatever JSON type the caller gave them; a
/// present `null` is sent as `null`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "Value")]
pub struct NotificationData {
    pub badge: Option<Value>,
    /// Plain text, or a dictionary alert (`{"title": .., "body": ..}`)
    pub alert: Option<Value>,
    pub sound: Option<Value>,
    /// Sender identifier, sent as `recipient`
    pub from: Option<Value>,
    /// Sender display name, sent as `senderName`
    pub from_name: Option<Value>,
    /// Additional scalar fields copied to the top level of the payload
    pub extra: BTreeMap<String, ScalarValue>,
}

impl NotificationData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_badge(mut self, badge: i64) -> Self {
        self.badge = Some(Value::from(badge));
        self
    }

    pub fn with_alert(mut self, alert: impl Into<String>) -> Self {
        self.alert = Some(Value::String(alert.into()));
        self
    }

    /// Dictionary alert, e.g. `{"title": "..", "body": ".."}`
    pub fn with_alert_object(mut self, alert: Map<String, Value>) -> Self {
        self.alert = Some(Value::Object(alert));
        self
    }

    pub fn with_sound(mut self, sound: impl Into<String>) -> Self {
        self.sound = Some(Value::String(sound.into()));
        self
    }

    pub fn with_from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(Value::String(from.into()));
        self
    }

    pub fn with_from_name(mut self, from_name: impl Into<String>) -> Self {
        self.from_name = Some(Value::String(from_name.into()));
        self
    }

    /// Add an extra field. Reserved keys (see `EXCLUDED_FIELDS`) are ignored
    /// when the payload is composed.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<ScalarValue>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Extras that survive into the payload
    fn extra_layer(&self) -> Map<String, Value> {
        self.extra
            .iter()
            .filter(|(key, _)| !EXCLUDED_FIELDS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), Value::from(value.clone())))
            .collect()
    }
}

impl TryFrom<Value> for NotificationData {
    type Error = AppError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let Value::Object(fields) = value else {
            return Err(AppError::Validation {
                field: "data".to_string(),
                reason: "Notification data must be a JSON object".to_string(),
            });
        };

        let mut data = NotificationData::new();
        for (key, value) in fields {
            match key.as_str() {
                "badge" => data.badge = Some(value),
                "alert" => data.alert = Some(value),
                "sound" => data.sound = Some(value),
                "from" => data.from = Some(value),
                "fromName" => data.from_name = Some(value),
                "to" => {}
                _ => match ScalarValue::from_json(value) {
                    Some(scalar) => {
                        data.extra.insert(key, scalar);
                    }
                    None => tracing::debug!(field = %key, "Dropping structured field from push data"),
                },
            }
        }

        Ok(data)
    }
}

/// Addressees of a push, as given by the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recipients {
    Single(String),
    Many(Vec<Option<String>>),
}

impl Recipients {
    /// Normalise to the alias list: empty and missing entries are dropped,
    /// order is kept, duplicates are kept.
    pub fn into_aliases(self) -> Vec<String> {
        let ids = match self {
            Recipients::Single(id) => vec![Some(id)],
            Recipients::Many(ids) => ids,
        };
        ids.into_iter().flatten().filter(|id| !id.is_empty()).collect()
    }
}

impl From<&str> for Recipients {
    fn from(id: &str) -> Self {
        Recipients::Single(id.to_string())
    }
}

impl From<String> for Recipients {
    fn from(id: String) -> Self {
        Recipients::Single(id)
    }
}

impl From<Vec<String>> for Recipients {
    fn from(ids: Vec<String>) -> Self {
        Recipients::Many(ids.into_iter().map(Some).collect())
    }
}

impl From<Vec<&str>> for Recipients {
    fn from(ids: Vec<&str>) -> Self {
        Recipients::Many(ids.into_iter().map(|id| Some(id.to_string())).collect())
    }
}

impl From<Vec<Option<String>>> for Recipients {
    fn from(ids: Vec<Option<String>>) -> Self {
        Recipients::Many(ids)
    }
}

impl From<Vec<Option<&str>>> for Recipients {
    fn from(ids: Vec<Option<&str>>) -> Self {
        Recipients::Many(ids.into_iter().map(|id| id.map(str::to_string)).collect())
    }
}

/// Gateway targeting filters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Filters {
    pub aliases: Vec<String>,
}

impl Filters {
    pub fn for_recipients(to: impl Into<Recipients>) -> Self {
        Self {
            aliases: to.into().into_aliases(),
        }
    }
}

#[derive(Debug, Serialize)]
struct Aps<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    badge: Option<&'a Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    alert: Option<&'a Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sound: Option<&'a Value>,
}

/// Fields owned by the sender; they win over any same-named extra or filter
#[derive(Debug, Serialize)]
struct PushBlock<'a> {
    expires: i64,
    expires_after: u64,
    aps: Aps<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    recipient: Option<&'a Value>,
    #[serde(rename = "senderName", skip_serializing_if = "Option::is_none")]
    sender_name: Option<&'a Value>,
}

impl<'a> PushBlock<'a> {
    fn new(data: &'a NotificationData, expires: i64) -> Self {
        Self {
            expires,
            expires_after: EXPIRES_AFTER_SECONDS,
            aps: Aps {
                badge: data.badge.as_ref(),
                alert: data.alert.as_ref(),
                sound: data.sound.as_ref(),
            },
            recipient: data.from.as_ref(),
            sender_name: data.from_name.as_ref(),
        }
    }
}

/// Merge layers left to right; a key in a later layer replaces the earlier one.
pub fn merge_layers<I>(layers: I) -> Map<String, Value>
where
    I: IntoIterator<Item = Map<String, Value>>,
{
    let mut merged = Map::new();
    for layer in layers {
        merged.extend(layer);
    }
    merged
}

fn to_layer<T: Serialize>(name: &str, value: &T) -> AppResult<Map<String, Value>> {
    let value = serde_json::to_value(value).map_err(|source| AppError::Serialization {
        context: format!("encoding {}", name),
        source,
    })?;

    match value {
        Value::Object(map) => Ok(map),
        other => Err(AppError::Validation {
            field: name.to_string(),
            reason: format!("Expected an object, got {}", other),
        }),
    }
}

/// Current Unix time in milliseconds
pub fn now_millis() -> i64 {
    jiff::Timestamp::now().as_millisecond()
}

/// Compose the JSON body for a push, stamped with the current time.
pub fn compose_message(data: &NotificationData, filters: &Filters) -> AppResult<String> {
    compose_message_at(data, filters, now_millis())
}

/// Compose the JSON body for a push with an explicit `expires` (Unix ms).
///
/// Precedence: data extras < filters < push block. Key order does not
/// depend on input order, so identical inputs give byte-identical output.
pub fn compose_message_at(
    data: &NotificationData,
    filters: &Filters,
    expires: i64,
) -> AppResult<String> {
    let merged = merge_layers([
        data.extra_layer(),
        to_layer("filters", filters)?,
        to_layer("push", &PushBlock::new(data, expires))?,
    ]);

    serde_json::to_string(&merged).map_err(|source| AppError::Serialization {
        context: "encoding payload".to_string(),
        source,
    })
}
