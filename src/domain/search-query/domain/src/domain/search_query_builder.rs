// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::HashSet;

use crate::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Mutable accumulator of a [`SearchQuery`].
///
/// A failing call leaves the accumulated state untouched. Not meant to be
/// shared between threads while being filled.
#[derive(Debug)]
pub struct SearchQueryBuilder {
    text: String,
    lang: ResourceLanguage,
    offset: usize,
    limit: usize,
    sort: Vec<SearchSortCriteria>,
    filters: Vec<SearchFilter>,
    filter_keys: HashSet<String>,
    facets: Vec<SearchFacet>,
    facet_keys: HashSet<String>,
    archive: bool,
    default_query_operator: QueryOperator,
    time_zone: Option<String>,
    boosting: Option<Boosting>,
    distance_reference_point: Option<GeoPoint>,
    explain: bool,
}

impl SearchQueryBuilder {
    pub fn new() -> Self {
        Self::with_config(&SearchQueryConfig::default())
    }

    pub fn with_config(config: &SearchQueryConfig) -> Self {
        Self {
            text: String::new(),
            lang: ResourceLanguage::default(),
            offset: 0,
            limit: config.default_limit,
            sort: Vec::new(),
            filters: Vec::new(),
            filter_keys: HashSet::new(),
            facets: Vec::new(),
            facet_keys: HashSet::new(),
            archive: false,
            default_query_operator: config.default_query_operator,
            time_zone: config.default_time_zone.clone(),
            boosting: None,
            distance_reference_point: None,
            explain: false,
        }
    }

    pub fn text(&mut self, text: impl Into<String>) -> &mut Self {
        self.text = text.into();
        self
    }

    pub fn lang(&mut self, lang: ResourceLanguage) -> &mut Self {
        self.lang = lang;
        self
    }

    pub fn offset(&mut self, offset: i64) -> Result<&mut Self, ValidationError> {
        self.offset = usize::try_from(offset).map_err(|_| {
            tracing::debug!(offset, "Rejecting negative offset");
            ValidationError::NegativeOffset(offset)
        })?;
        Ok(self)
    }

    pub fn limit(&mut self, limit: i64) -> Result<&mut Self, ValidationError> {
        self.limit = usize::try_from(limit).map_err(|_| {
            tracing::debug!(limit, "Rejecting negative limit");
            ValidationError::NegativeLimit(limit)
        })?;
        Ok(self)
    }

    /// Appends sort criteria after the ones already added
    pub fn sort(&mut self, criteria: impl IntoIterator<Item = SearchSortCriteria>) -> &mut Self {
        self.sort.extend(criteria);
        self
    }

    /// Appends filters. The whole call is rejected if any keyed filter reuses
    /// a key of a previously added filter or of another filter in the call.
    pub fn filter(
        &mut self,
        filters: impl IntoIterator<Item = SearchFilter>,
    ) -> Result<&mut Self, ValidationError> {
        let filters: Vec<_> = filters.into_iter().collect();

        let mut incoming_keys = HashSet::new();
        for key in filters.iter().filter_map(SearchFilter::key) {
            if self.filter_keys.contains(key) || !incoming_keys.insert(key) {
                tracing::debug!(key, "Rejecting filter with a duplicate key");
                return Err(ValidationError::DuplicateFilterKey(key.to_string()));
            }
        }

        for filter in filters {
            if let Some(key) = filter.key() {
                self.filter_keys.insert(key.to_string());
            }
            self.filters.push(filter);
        }

        Ok(self)
    }

    /// Appends facets, with the same all-or-nothing key uniqueness rule as
    /// [`Self::filter`]
    pub fn facet(
        &mut self,
        facets: impl IntoIterator<Item = SearchFacet>,
    ) -> Result<&mut Self, ValidationError> {
        let facets: Vec<_> = facets.into_iter().collect();

        let mut incoming_keys = HashSet::new();
        for key in facets.iter().map(SearchFacet::key) {
            if self.facet_keys.contains(key) || !incoming_keys.insert(key) {
                tracing::debug!(key, "Rejecting facet with a duplicate key");
                return Err(ValidationError::DuplicateFacetKey(key.to_string()));
            }
        }

        for facet in facets {
            self.facet_keys.insert(facet.key().to_string());
            self.facets.push(facet);
        }

        Ok(self)
    }

    /// Includes archived items into the results
    pub fn archive(&mut self, archive: bool) -> &mut Self {
        self.archive = archive;
        self
    }

    pub fn default_query_operator(&mut self, operator: QueryOperator) -> &mut Self {
        self.default_query_operator = operator;
        self
    }

    pub fn time_zone(&mut self, time_zone: impl Into<String>) -> &mut Self {
        self.time_zone = Some(time_zone.into());
        self
    }

    pub fn boosting(&mut self, boosting: Boosting) -> &mut Self {
        self.boosting = Some(boosting);
        self
    }

    pub fn distance_reference_point(&mut self, point: GeoPoint) -> &mut Self {
        self.distance_reference_point = Some(point);
        self
    }

    pub fn explain(&mut self, explain: bool) -> &mut Self {
        self.explain = explain;
        self
    }

    #[tracing::instrument(
        level = "debug",
        name = "SearchQueryBuilder_build",
        skip_all,
        fields(num_filters = self.filters.len(), num_facets = self.facets.len())
    )]
    pub fn build(self) -> Result<SearchQuery, ValidationError> {
        for facet in &self.facets {
            if let Some(filter_key) = facet.exclude_filter()
                && !self.filter_keys.contains(filter_key)
            {
                return Err(ValidationError::UnknownExcludeFilter {
                    facet_key: facet.key().to_string(),
                    filter_key: filter_key.to_string(),
                });
            }
        }

        self.ensure_finite_numbers()?;

        Ok(SearchQuery {
            text: self.text,
            lang: self.lang,
            offset: self.offset,
            limit: self.limit,
            sort: self.sort,
            filters: self.filters,
            facets: self.facets,
            archive: self.archive,
            default_query_operator: self.default_query_operator,
            time_zone: self.time_zone,
            boosting: self.boosting,
            distance_reference_point: self.distance_reference_point,
            explain: self.explain,
        })
    }
}

impl SearchQueryBuilder {
    /// Non-finite numbers have no payload or backend representation
    fn ensure_finite_numbers(&self) -> Result<(), ValidationError> {
        let mut numbers = Vec::new();
        if let Some(boosting) = &self.boosting {
            numbers.push(("boosting.tie".to_string(), boosting.tie));
        }
        if let Some(point) = &self.distance_reference_point {
            numbers.push(("distanceReferencePoint.lng".to_string(), point.lng));
            numbers.push(("distanceReferencePoint.lat".to_string(), point.lat));
        }
        for facet in &self.facets {
            if let SearchFacet::SpatialDistanceRange(facet) = facet {
                numbers.push((format!("{}.point.lng", facet.key), facet.point.lng));
                numbers.push((format!("{}.point.lat", facet.key), facet.point.lat));
                numbers.push((format!("{}.from", facet.key), facet.from));
                numbers.push((format!("{}.to", facet.key), facet.to));
            }
        }

        match numbers.into_iter().find(|(_, value)| !value.is_finite()) {
            Some((name, value)) => {
                tracing::debug!(%name, value, "Rejecting non-finite number");
                Err(ValidationError::NonFiniteNumber { name })
            }
            None => Ok(()),
        }
    }
}

impl Default for SearchQueryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Builder of a [`SelectQuery`]. Exposes every [`SearchQueryBuilder`] setter
/// and additionally requires the target index.
#[derive(Debug, Default)]
pub struct SelectQueryBuilder {
    index: Option<String>,
    query: SearchQueryBuilder,
}

impl SelectQueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &SearchQueryConfig) -> Self {
        Self {
            index: None,
            query: SearchQueryBuilder::with_config(config),
        }
    }

    pub fn index(&mut self, index: impl Into<String>) -> &mut Self {
        self.index = Some(index.into());
        self
    }

    #[tracing::instrument(
        level = "debug",
        name = "SelectQueryBuilder_build",
        skip_all,
        fields(index = ?self.index)
    )]
    pub fn build(self) -> Result<SelectQuery, ValidationError> {
        let index = self
            .index
            .filter(|index| !index.is_empty())
            .ok_or(ValidationError::MissingIndex)?;

        Ok(SelectQuery {
            index,
            query: self.query.build()?,
        })
    }
}

impl std::ops::Deref for SelectQueryBuilder {
    type Target = SearchQueryBuilder;

    fn deref(&self) -> &Self::Target {
        &self.query
    }
}

impl std::ops::DerefMut for SelectQueryBuilder {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.query
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
