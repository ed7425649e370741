// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const PAYLOAD_TYPE_KEY: &str = "type";

pub(crate) const PAYLOAD_ROOT_PATH: &str = "$";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Typed view over one object of a payload tree. Keeps the location of the
/// object so that errors point at the offending entry, e.g. `facets[2].key`.
///
/// Explicit `null` values are treated as absent keys.
pub(crate) struct PayloadObject<'a> {
    map: &'a Map<String, Value>,
    path: String,
}

impl<'a> PayloadObject<'a> {
    pub fn root(value: &'a Value) -> Result<Self, MalformedPayloadError> {
        Self::from_value(value, PAYLOAD_ROOT_PATH.to_string())
    }

    pub fn from_value(value: &'a Value, path: String) -> Result<Self, MalformedPayloadError> {
        match value {
            Value::Object(map) => Ok(Self { map, path }),
            other => Err(MalformedPayloadError::new(
                path,
                format!("expected an object, got {}", value_kind(other)),
            )),
        }
    }

    pub fn child_path(&self, key: &str) -> String {
        if self.path == PAYLOAD_ROOT_PATH {
            key.to_string()
        } else {
            format!("{}.{key}", self.path)
        }
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        self.map.get(key).filter(|v| !v.is_null())
    }

    /// Discriminator of a tagged object
    pub fn tag(&self, family: &'static str) -> Result<&'a str, DenormalizeError> {
        match self.get(PAYLOAD_TYPE_KEY) {
            Some(Value::String(tag)) => Ok(tag),
            Some(other) => Err(self.malformed(PAYLOAD_TYPE_KEY, "a string", other).into()),
            None => Err(UnknownVariantError {
                family,
                tag: None,
                path: self.path.clone(),
            }
            .into()),
        }
    }

    pub fn unknown_variant(&self, family: &'static str, tag: &str) -> UnknownVariantError {
        tracing::debug!(family, tag, path = %self.path, "Unknown payload variant");
        UnknownVariantError {
            family,
            tag: Some(tag.to_string()),
            path: self.path.clone(),
        }
    }

    pub fn optional_str(&self, key: &str) -> Result<Option<&'a str>, MalformedPayloadError> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(other) => Err(self.malformed(key, "a string", other)),
        }
    }

    pub fn required_str(&self, key: &str) -> Result<&'a str, MalformedPayloadError> {
        self.optional_str(key)?
            .ok_or_else(|| MalformedPayloadError::new(self.child_path(key), "missing value"))
    }

    /// List of scalars rendered as strings. Numbers are accepted since term
    /// values are frequently numeric identifiers.
    pub fn string_list(&self, key: &str) -> Result<Vec<String>, MalformedPayloadError> {
        let Some(value) = self.get(key) else {
            return Ok(Vec::new());
        };
        let Value::Array(items) = value else {
            return Err(self.malformed(key, "a list", value));
        };

        items
            .iter()
            .enumerate()
            .map(|(i, item)| match item {
                Value::String(s) => Ok(s.clone()),
                Value::Number(n) => Ok(n.to_string()),
                other => Err(MalformedPayloadError::new(
                    format!("{}[{i}]", self.child_path(key)),
                    format!("expected a string, got {}", value_kind(other)),
                )),
            })
            .collect()
    }

    /// Like [`Self::string_list`], but an absent key is malformed
    pub fn required_string_list(&self, key: &str) -> Result<Vec<String>, MalformedPayloadError> {
        self.ensure_present(key)?;
        self.string_list(key)
    }

    pub fn optional_bool(&self, key: &str) -> Result<Option<bool>, MalformedPayloadError> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(Value::String(s)) if s == "true" => Ok(Some(true)),
            Some(Value::String(s)) if s == "false" => Ok(Some(false)),
            Some(other) => Err(self.malformed(key, "a boolean", other)),
        }
    }

    pub fn optional_i64(&self, key: &str) -> Result<Option<i64>, MalformedPayloadError> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::Number(n)) if n.is_i64() => Ok(n.as_i64()),
            Some(value @ Value::String(s)) => s
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| self.malformed(key, "an integer", value)),
            Some(other) => Err(self.malformed(key, "an integer", other)),
        }
    }

    pub fn optional_f64(&self, key: &str) -> Result<Option<f64>, MalformedPayloadError> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::Number(n)) => Ok(n.as_f64()),
            Some(value @ Value::String(s)) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .map(Some)
                .ok_or_else(|| self.malformed(key, "a finite number", value)),
            Some(other) => Err(self.malformed(key, "a number", other)),
        }
    }

    pub fn required_f64(&self, key: &str) -> Result<f64, MalformedPayloadError> {
        self.optional_f64(key)?
            .ok_or_else(|| MalformedPayloadError::new(self.child_path(key), "missing value"))
    }

    /// RFC 3339 timestamp, normalized to UTC
    pub fn optional_datetime(
        &self,
        key: &str,
    ) -> Result<Option<DateTime<Utc>>, MalformedPayloadError> {
        let Some(value) = self.optional_str(key)? else {
            return Ok(None);
        };
        DateTime::parse_from_rfc3339(value)
            .map(|dt| Some(dt.with_timezone(&Utc)))
            .map_err(|e| MalformedPayloadError::new(self.child_path(key), e.to_string()))
    }

    pub fn optional_period(&self, key: &str) -> Result<Option<DatePeriod>, MalformedPayloadError> {
        let Some(value) = self.optional_str(key)? else {
            return Ok(None);
        };
        value
            .parse()
            .map(Some)
            .map_err(|e: DatePeriodParseError| {
                MalformedPayloadError::new(self.child_path(key), e.to_string())
            })
    }

    /// Reads a value through its serde representation, used for the
    /// string-encoded enums
    pub fn optional_serde<T: DeserializeOwned>(
        &self,
        key: &str,
    ) -> Result<Option<T>, MalformedPayloadError> {
        let Some(value) = self.get(key) else {
            return Ok(None);
        };
        serde_json::from_value(value.clone())
            .map(Some)
            .map_err(|e| MalformedPayloadError::new(self.child_path(key), e.to_string()))
    }

    pub fn optional_object(
        &self,
        key: &str,
    ) -> Result<Option<PayloadObject<'a>>, MalformedPayloadError> {
        self.get(key)
            .map(|value| PayloadObject::from_value(value, self.child_path(key)))
            .transpose()
    }

    /// Raw value with its path, for nested tagged objects
    pub fn required_value(&self, key: &str) -> Result<(&'a Value, String), MalformedPayloadError> {
        let path = self.child_path(key);
        match self.get(key) {
            Some(value) => Ok((value, path)),
            None => Err(MalformedPayloadError::new(path, "missing value")),
        }
    }

    /// Items of a list together with their paths. An absent list is empty.
    pub fn list(&self, key: &str) -> Result<Vec<(&'a Value, String)>, MalformedPayloadError> {
        let Some(value) = self.get(key) else {
            return Ok(Vec::new());
        };
        let Value::Array(items) = value else {
            return Err(self.malformed(key, "a list", value));
        };

        let path = self.child_path(key);
        Ok(items
            .iter()
            .enumerate()
            .map(|(i, item)| (item, format!("{path}[{i}]")))
            .collect())
    }

    pub fn required_list(
        &self,
        key: &str,
    ) -> Result<Vec<(&'a Value, String)>, MalformedPayloadError> {
        self.ensure_present(key)?;
        self.list(key)
    }

    fn ensure_present(&self, key: &str) -> Result<(), MalformedPayloadError> {
        match self.get(key) {
            Some(_) => Ok(()),
            None => Err(MalformedPayloadError::new(self.child_path(key), "missing value")),
        }
    }

    pub fn optional_geo_point(
        &self,
        key: &str,
    ) -> Result<Option<GeoPoint>, MalformedPayloadError> {
        let Some(point) = self.optional_object(key)? else {
            return Ok(None);
        };
        Ok(Some(GeoPoint::new(
            point.required_f64("lng")?,
            point.required_f64("lat")?,
        )))
    }

    fn malformed(&self, key: &str, expected: &str, actual: &Value) -> MalformedPayloadError {
        MalformedPayloadError::new(
            self.child_path(key),
            format!("expected {expected}, got {}", value_kind(actual)),
        )
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
