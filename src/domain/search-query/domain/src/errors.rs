// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Raised synchronously when a filter, facet, query or builder call violates
/// one of the model invariants
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Field filter on '{field}' requires at least one term")]
    EmptyTerms { field: String },

    #[error("{operator} filter requires at least one operand")]
    EmptyOperands { operator: &'static str },

    #[error("Multi-query facet '{key}' requires at least one query")]
    EmptyQueries { key: String },

    #[error("Offset must not be negative, got {0}")]
    NegativeOffset(i64),

    #[error("Limit must not be negative, got {0}")]
    NegativeLimit(i64),

    #[error("Filter key '{0}' is already in use")]
    DuplicateFilterKey(String),

    #[error("Facet key '{0}' is already in use")]
    DuplicateFacetKey(String),

    #[error("Facet '{facet_key}' excludes filter '{filter_key}' which is not part of the query")]
    UnknownExcludeFilter {
        facet_key: String,
        filter_key: String,
    },

    #[error("Select query requires a non-empty index name")]
    MissingIndex,

    #[error("Date range on '{field}' requires at least one bound")]
    MissingDateRangeBound { field: String },

    #[error("Period '{period}' uses units finer than a day")]
    UnsupportedPeriodUnit { period: String },

    #[error("Number '{name}' must be finite")]
    NonFiniteNumber { name: String },
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub struct UnknownVariantError {
    pub family: &'static str,
    pub tag: Option<String>,
    pub path: String,
}

impl std::fmt::Display for UnknownVariantError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.tag {
            Some(tag) => write!(f, "Unknown {} type '{tag}' at '{}'", self.family, self.path),
            None => write!(f, "Missing {} type at '{}'", self.family, self.path),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Malformed payload at '{path}': {reason}")]
pub struct MalformedPayloadError {
    pub path: String,
    pub reason: String,
}

impl MalformedPayloadError {
    pub fn new(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DenormalizeError {
    #[error(transparent)]
    UnknownVariant(#[from] UnknownVariantError),

    #[error(transparent)]
    MalformedPayload(#[from] MalformedPayloadError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
