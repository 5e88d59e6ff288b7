//! Text codecs for persisted timestamps and due dates.
//!
//! # Responsibility
//! - Serialize `createdAt` as RFC 3339 UTC text and `dueDate` as `YYYY-MM-DD`.
//! - Re-parse both leniently on load, since older payloads stored them in
//!   other shapes.
//!
//! # Invariants
//! - `createdAt` accepts RFC 3339 text or integer epoch milliseconds.
//! - `dueDate` accepts `YYYY-MM-DD`, RFC 3339 text (date part kept), empty text
//!   or null. Anything else is dropped to `None` instead of failing the load.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use log::warn;
use serde::de::{self, IgnoredAny, MapAccess, SeqAccess, Unexpected, Visitor};
use serde::{Deserializer, Serializer};
use std::fmt::Formatter;

const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a date-input string into an optional calendar date.
///
/// Blank input and unrecognized formats both yield `None`.
pub fn parse_due_date(text: &str) -> Option<NaiveDate> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, DUE_DATE_FORMAT) {
        return Some(date);
    }
    // Keep the date as written; converting to UTC can move it to another day.
    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|value| value.date_naive())
}

/// Formats a due date the way it is persisted.
pub fn format_due_date(date: NaiveDate) -> String {
    date.format(DUE_DATE_FORMAT).to_string()
}

/// Formats a creation timestamp the way it is persisted.
pub fn format_created_at(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Serde adapter for `createdAt` fields.
pub mod created_at_format {
    use super::*;

    pub fn serialize<S: Serializer>(
        value: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_created_at(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        deserializer.deserialize_any(CreatedAtVisitor)
    }
}

/// Serde adapter for optional `dueDate` fields.
pub mod due_date_format {
    use super::*;

    pub fn serialize<S: Serializer>(
        value: &Option<NaiveDate>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(date) => serializer.serialize_str(&format_due_date(*date)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDate>, D::Error> {
        deserializer.deserialize_option(DueDateVisitor)
    }
}

struct CreatedAtVisitor;

impl<'de> Visitor<'de> for CreatedAtVisitor {
    type Value = DateTime<Utc>;

    fn expecting(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str("an RFC 3339 timestamp or epoch milliseconds")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        DateTime::parse_from_rfc3339(value.trim())
            .map(|parsed| parsed.with_timezone(&Utc))
            .map_err(|_| E::invalid_value(Unexpected::Str(value), &self))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        DateTime::from_timestamp_millis(value)
            .ok_or_else(|| E::invalid_value(Unexpected::Signed(value), &self))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        i64::try_from(value)
            .ok()
            .and_then(DateTime::from_timestamp_millis)
            .ok_or_else(|| E::invalid_value(Unexpected::Unsigned(value), &self))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
        if !value.is_finite() {
            return Err(E::invalid_value(Unexpected::Float(value), &self));
        }
        DateTime::from_timestamp_millis(value as i64)
            .ok_or_else(|| E::invalid_value(Unexpected::Float(value), &self))
    }
}

struct DueDateVisitor;

impl<'de> Visitor<'de> for DueDateVisitor {
    type Value = Option<NaiveDate>;

    fn expecting(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str("a calendar date string or null")
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        let parsed = parse_due_date(value);
        if parsed.is_none() && !value.trim().is_empty() {
            warn!("event=due_date_decode module=model status=dropped reason=unrecognized_format");
        }
        Ok(parsed)
    }

    fn visit_bool<E: de::Error>(self, _value: bool) -> Result<Self::Value, E> {
        Ok(dropped_due_date("bool"))
    }

    fn visit_i64<E: de::Error>(self, _value: i64) -> Result<Self::Value, E> {
        Ok(dropped_due_date("number"))
    }

    fn visit_u64<E: de::Error>(self, _value: u64) -> Result<Self::Value, E> {
        Ok(dropped_due_date("number"))
    }

    fn visit_f64<E: de::Error>(self, _value: f64) -> Result<Self::Value, E> {
        Ok(dropped_due_date("number"))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(dropped_due_date("array"))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(dropped_due_date("object"))
    }
}

fn dropped_due_date(kind: &str) -> Option<NaiveDate> {
    warn!("event=due_date_decode module=model status=dropped reason=unexpected_type kind={kind}");
    None
}
