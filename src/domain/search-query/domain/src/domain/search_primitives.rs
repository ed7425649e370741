// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SearchSortDirection {
    #[default]
    Asc,
    Desc,
}

impl SearchSortDirection {
    pub fn as_backend_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// How the terms of the free-text query are combined
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum QueryOperator {
    #[default]
    And,
    Or,
}

impl QueryOperator {
    pub fn as_backend_str(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Anchoring of a relative date boundary to a day edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DateRangeRound {
    StartOfDay,
    StartOfPreviousDay,
    EndOfDay,
    EndOfPreviousDay,
}

impl DateRangeRound {
    pub fn date_math_suffix(self) -> &'static str {
        match self {
            Self::StartOfDay => crate::DATE_MATH_START_OF_DAY,
            Self::StartOfPreviousDay => "/DAY-1DAY",
            Self::EndOfDay => crate::DATE_MATH_END_OF_DAY,
            Self::EndOfPreviousDay => "/DAY-1SECOND",
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Language code of the searched resources. Empty means the default language.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct ResourceLanguage(String);

impl ResourceLanguage {
    pub fn of(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn code(&self) -> &str {
        &self.0
    }

    pub fn is_default(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for ResourceLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
