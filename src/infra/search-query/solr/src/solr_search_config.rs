// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use kamu_search_query::SEARCH_FIELD_GEO_POINTS;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SolrSearchConfig {
    /// Core that search queries go to. Language-specific cores are suffixed
    /// with `-<lang>`.
    pub default_index: String,

    pub def_type: String,
    pub geo_field: String,
    pub facet_min_count: u32,

    /// `-1` means unlimited
    pub facet_limit: i32,
}

impl Default for SolrSearchConfig {
    fn default() -> Self {
        Self {
            default_index: "default".to_string(),
            def_type: "edismax".to_string(),
            geo_field: SEARCH_FIELD_GEO_POINTS.to_string(),
            facet_min_count: 1,
            facet_limit: -1,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
