// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use crate::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Immutable search request, produced by [`SearchQueryBuilder`].
///
/// Filter keys and facet keys are unique within a query, and every facet
/// exclusion references a keyed filter of the same query.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub(crate) text: String,
    pub(crate) lang: ResourceLanguage,
    pub(crate) offset: usize,
    pub(crate) limit: usize,
    pub(crate) sort: Vec<SearchSortCriteria>,
    pub(crate) filters: Vec<SearchFilter>,
    pub(crate) facets: Vec<SearchFacet>,
    pub(crate) archive: bool,
    pub(crate) default_query_operator: QueryOperator,
    pub(crate) time_zone: Option<String>,
    pub(crate) boosting: Option<Boosting>,
    pub(crate) distance_reference_point: Option<GeoPoint>,
    pub(crate) explain: bool,
}

impl SearchQuery {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn lang(&self) -> &ResourceLanguage {
        &self.lang
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// First criteria is the primary sort key
    pub fn sort(&self) -> &[SearchSortCriteria] {
        &self.sort
    }

    pub fn filters(&self) -> &[SearchFilter] {
        &self.filters
    }

    pub fn facets(&self) -> &[SearchFacet] {
        &self.facets
    }

    /// Whether archived items are included in the results
    pub fn archive(&self) -> bool {
        self.archive
    }

    pub fn default_query_operator(&self) -> QueryOperator {
        self.default_query_operator
    }

    pub fn time_zone(&self) -> Option<&str> {
        self.time_zone.as_deref()
    }

    pub fn boosting(&self) -> Option<&Boosting> {
        self.boosting.as_ref()
    }

    pub fn distance_reference_point(&self) -> Option<&GeoPoint> {
        self.distance_reference_point.as_ref()
    }

    pub fn explain(&self) -> bool {
        self.explain
    }

    pub fn filter_by_key(&self, key: &str) -> Option<&SearchFilter> {
        self.filters.iter().find(|f| f.key() == Some(key))
    }

    pub fn facet_by_key(&self, key: &str) -> Option<&SearchFacet> {
        self.facets.iter().find(|f| f.key() == key)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Search query addressed to an explicitly named index
#[derive(Debug, Clone, PartialEq)]
pub struct SelectQuery {
    pub(crate) index: String,
    pub(crate) query: SearchQuery,
}

impl SelectQuery {
    pub fn index(&self) -> &str {
        &self.index
    }

    pub fn query(&self) -> &SearchQuery {
        &self.query
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
