//! The order record and its request payloads.
//!
//! JSON field names are camelCase, matching what the customer and kitchen pages send.
//! Line items, totals and any fields the server does not know are opaque to it and stored
//! exactly as received. An explicit `null` reads as the field's default.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};
use std::fmt::{self, Display};
use std::num::ParseIntError;
use std::str::FromStr;

/// Type-safe identifier for Orders: milliseconds since the Unix epoch at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub i64);

impl Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for OrderId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// Where an order sits in the kitchen workflow.
///
/// The usual path is pending → preparing → ready → completed, with cancelled possible at
/// any point, but no transition is enforced. Strings outside the known set are kept
/// verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    #[default]
    Pending,
    Preparing,
    Ready,
    Completed,
    Cancelled,
    Other(String),
}

impl OrderStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Preparing => "preparing",
            Self::Ready => "ready",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Other(status) => status,
        }
    }
}

impl From<String> for OrderStatus {
    fn from(status: String) -> Self {
        match status.as_str() {
            "pending" => Self::Pending,
            "preparing" => Self::Preparing,
            "ready" => Self::Ready,
            "completed" => Self::Completed,
            "cancelled" => Self::Cancelled,
            _ => Self::Other(status),
        }
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Other(status) => status,
            known => known.as_str().to_string(),
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents a customer order.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](resource_actor::ActorEntity) trait (see
/// [`order_actor::entity`](crate::order_actor::entity)), allowing it to be managed by a
/// [`ResourceActor`](resource_actor::ResourceActor).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    #[serde(default, deserialize_with = "nullable")]
    pub items: Vec<Value>,
    #[serde(default = "zero_total", deserialize_with = "nullable_total")]
    pub total: Number,
    #[serde(
        rename = "type",
        default = "default_order_type",
        deserialize_with = "nullable_order_type"
    )]
    pub order_type: String,
    #[serde(default, deserialize_with = "nullable")]
    pub customer_name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub customer_phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub status: OrderStatus,
    #[serde(with = "iso_millis")]
    pub created_at: DateTime<Utc>,
    #[serde(
        default,
        with = "iso_millis::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
    /// Client fields the server has no use for, such as `notes` or `paymentMethod`.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Payload for creating a new order. Omitted fields take their defaults.
///
/// `id`, `status` and the timestamps are assigned by the server; if a client sends them
/// they are dropped. Every other unknown field is kept in `extra`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OrderCreate {
    #[serde(deserialize_with = "nullable")]
    pub items: Vec<Value>,
    #[serde(deserialize_with = "nullable_total")]
    pub total: Number,
    #[serde(rename = "type", deserialize_with = "nullable_order_type")]
    pub order_type: String,
    #[serde(deserialize_with = "nullable")]
    pub customer_name: String,
    #[serde(deserialize_with = "nullable")]
    pub customer_phone: String,
    pub timestamp: Option<String>,
    pub date: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for OrderCreate {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total: zero_total(),
            order_type: default_order_type(),
            customer_name: String::new(),
            customer_phone: String::new(),
            timestamp: None,
            date: None,
            extra: Map::new(),
        }
    }
}

/// Payload for updating an order.
///
/// Only the fields listed here can change. `id`, `createdAt`, `updatedAt` and fields kept
/// in [`Order::extra`] are not part of the payload, so a client cannot overwrite them.
/// A `null` value leaves the field as it is.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OrderUpdate {
    pub items: Option<Vec<Value>>,
    pub total: Option<Number>,
    #[serde(rename = "type")]
    pub order_type: Option<String>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub timestamp: Option<String>,
    pub date: Option<String>,
    pub status: Option<OrderStatus>,
}

impl OrderUpdate {
    /// A status-only update, the common case from the kitchen page.
    pub fn status(status: OrderStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

/// Keys the server assigns. They never come from a client's `extra` fields.
const SERVER_FIELDS: [&str; 4] = ["id", "status", "createdAt", "updatedAt"];

impl Order {
    /// Builds a pending order stamped at `created_at`.
    ///
    /// A missing display `timestamp` defaults to the creation instant and a missing
    /// `date` to the creation day.
    pub fn new(id: OrderId, params: OrderCreate, created_at: DateTime<Utc>) -> Self {
        let mut extra = params.extra;
        for key in SERVER_FIELDS {
            extra.remove(key);
        }

        Self {
            id,
            items: params.items,
            total: params.total,
            order_type: params.order_type,
            customer_name: params.customer_name,
            customer_phone: params.customer_phone,
            timestamp: params
                .timestamp
                .or_else(|| Some(iso_millis::format(&created_at))),
            date: params
                .date
                .or_else(|| Some(created_at.format("%Y-%m-%d").to_string())),
            status: OrderStatus::Pending,
            created_at,
            updated_at: None,
            extra,
        }
    }

    /// Shallow merge of the allowed fields.
    pub fn apply(&mut self, update: OrderUpdate) {
        let OrderUpdate {
            items,
            total,
            order_type,
            customer_name,
            customer_phone,
            timestamp,
            date,
            status,
        } = update;

        if let Some(items) = items {
            self.items = items;
        }
        if let Some(total) = total {
            self.total = total;
        }
        if let Some(order_type) = order_type {
            self.order_type = order_type;
        }
        if let Some(customer_name) = customer_name {
            self.customer_name = customer_name;
        }
        if let Some(customer_phone) = customer_phone {
            self.customer_phone = customer_phone;
        }
        if timestamp.is_some() {
            self.timestamp = timestamp;
        }
        if date.is_some() {
            self.date = date;
        }
        if let Some(status) = status {
            self.status = status;
        }
    }
}

fn default_order_type() -> String {
    "eat".to_string()
}

fn zero_total() -> Number {
    Number::from(0)
}

/// Reads an explicit `null` as the type's default.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn nullable_total<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Number, D::Error> {
    Option::<Number>::deserialize(deserializer).map(|total| total.unwrap_or_else(zero_total))
}

fn nullable_order_type<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Option::<String>::deserialize(deserializer)
        .map(|order_type| order_type.unwrap_or_else(default_order_type))
}

/// RFC 3339 timestamps with millisecond precision and a `Z` suffix.
pub mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn format(instant: &DateTime<Utc>) -> String {
        instant.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn serialize<S: Serializer>(instant: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(instant))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        DateTime::<Utc>::deserialize(deserializer)
    }

    pub mod option {
        use chrono::{DateTime, Utc};
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            instant: &Option<DateTime<Utc>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match instant {
                Some(instant) => serializer.serialize_str(&super::format(instant)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error> {
            Option::<DateTime<Utc>>::deserialize(deserializer)
        }
    }
}
