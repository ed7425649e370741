// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use crate::QueryOperator;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const DEFAULT_SEARCH_PAGE_SIZE: usize = 10;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Defaults applied to every builder created from this config
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchQueryConfig {
    pub default_limit: usize,
    pub default_query_operator: QueryOperator,

    /// IANA time zone name used for date math, UTC when unset
    pub default_time_zone: Option<String>,
}

impl Default for SearchQueryConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_SEARCH_PAGE_SIZE,
            default_query_operator: QueryOperator::And,
            default_time_zone: None,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
