//! Order tracking timeline

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    Processing,
    Packed,
    Shipped,
    Delivered,
    Cancelled,
    Unknown(String),
}

/// Forward fulfilment order. `Cancelled` sits outside it.
const FORWARD: [OrderStatus; 4] = [OrderStatus::Processing, OrderStatus::Packed, OrderStatus::Shipped, OrderStatus::Delivered];

impl OrderStatus {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "processing" => Self::Processing,
            "packed" => Self::Packed,
            "shipped" => Self::Shipped,
            "delivered" => Self::Delivered,
            "cancelled" | "canceled" => Self::Cancelled,
            _ => Self::Unknown(value.to_string()),
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Self::Processing => "Processing",
            Self::Packed => "Packed",
            Self::Shipped => "Shipped",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
            Self::Unknown(raw) => raw.as_str(),
        }
    }

    fn forward_index(&self) -> Option<usize> { FORWARD.iter().position(|s| s == self) }
}

impl From<String> for OrderStatus {
    fn from(value: String) -> Self { Self::parse(&value) }
}

impl From<OrderStatus> for String {
    fn from(value: OrderStatus) -> Self { value.title().to_string() }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingStep {
    pub title: String,
    #[serde(with = "iso_or_empty")]
    pub date: Option<DateTime<Utc>>,
    pub completed: bool,
}

impl TrackingStep {
    fn done(title: &str, date: DateTime<Utc>) -> Self { Self { title: title.to_string(), date: Some(date), completed: true } }
    fn pending(title: &str) -> Self { Self { title: title.to_string(), date: None, completed: false } }
}

/// Timeline for an order in `status`, created at `created_at`.
///
/// Only the creation time is known; every later completed step is dated `now`.
pub fn derive_steps(status: &OrderStatus, created_at: DateTime<Utc>, now: DateTime<Utc>) -> Vec<TrackingStep> {
    if *status == OrderStatus::Cancelled {
        return vec![
            TrackingStep::done(OrderStatus::Processing.title(), created_at),
            TrackingStep::done(OrderStatus::Cancelled.title(), now),
        ];
    }
    let reached = status.forward_index();
    FORWARD
        .iter()
        .enumerate()
        .map(|(i, step)| match reached {
            Some(idx) if i <= idx => TrackingStep::done(step.title(), if i == 0 { created_at } else { now }),
            _ => TrackingStep::pending(step.title()),
        })
        .collect()
}

pub fn derive_steps_now(status: &OrderStatus, created_at: DateTime<Utc>) -> Vec<TrackingStep> {
    derive_steps(status, created_at, Utc::now())
}

/// Order detail fields the tracking screen reads.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderTracking {
    #[serde(alias = "_id")]
    pub id: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl OrderTracking {
    pub fn steps(&self, now: DateTime<Utc>) -> Vec<TrackingStep> { derive_steps(&self.status, self.created_at, now) }
    pub fn is_cancelled(&self) -> bool { self.status == OrderStatus::Cancelled }
}

mod iso_or_empty {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &Option<DateTime<Utc>>, s: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => s.serialize_str(&d.to_rfc3339()),
            None => s.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<DateTime<Utc>>, D::Error> {
        let raw = String::deserialize(d)?;
        if raw.is_empty() { return Ok(None); }
        DateTime::parse_from_rfc3339(&raw).map(|dt| Some(dt.with_timezone(&Utc))).map_err(serde::de::Error::custom)
    }
}
