// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use kamu_search_query::{
    Boosting,
    GeoPoint,
    SEARCH_FIELD_DATE,
    SEARCH_FIELD_NATURAL_SORT,
    SEARCH_FIELD_SORT_VALUE,
    SearchFilter,
    SearchQuery,
    SearchSortCriteria,
    SelectQuery,
};

use super::{SolrLocalParams, facet_params};
use crate::{SolrRequestBuildError, SolrSearchConfig, SolrSelectRequest};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

const MATCH_ALL_QUERY: &str = "*:*";
const SCORE_SORT_FIELD: &str = "score";
const GEO_DISTANCE_FUNCTION: &str = "geodist()";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct SolrSelectRequestBuilder {}

impl SolrSelectRequestBuilder {
    /// Targets the configured default core, or its language variant
    #[tracing::instrument(
        level = "debug",
        name = "SolrSelectRequestBuilder_build_search_request",
        skip_all,
        fields(lang = %query.lang())
    )]
    pub fn build_search_request(
        query: &SearchQuery,
        config: &SolrSearchConfig,
    ) -> Result<SolrSelectRequest, SolrRequestBuildError> {
        let index = if query.lang().is_default() {
            config.default_index.clone()
        } else {
            format!("{}-{}", config.default_index, query.lang())
        };

        Self::build_request(index, query, config)
    }

    #[tracing::instrument(
        level = "debug",
        name = "SolrSelectRequestBuilder_build_select_request",
        skip_all,
        fields(index = select.index())
    )]
    pub fn build_select_request(
        select: &SelectQuery,
        config: &SolrSearchConfig,
    ) -> Result<SolrSelectRequest, SolrRequestBuildError> {
        Self::build_request(select.index().to_string(), select.query(), config)
    }

    fn build_request(
        index: String,
        query: &SearchQuery,
        config: &SolrSearchConfig,
    ) -> Result<SolrSelectRequest, SolrRequestBuildError> {
        let mut request = SolrSelectRequest::new(index);

        Self::basic_params(&mut request, query, config);
        Self::filter_params(&mut request, query)?;

        if let Some(sort) = Self::sort_argument(query)? {
            request.push("sort", sort);
        }

        if let Some(point) = query.distance_reference_point() {
            Self::geo_params(&mut request, point, config);
        }

        if let Some(boosting) = query.boosting() {
            Self::boosting_params(&mut request, boosting);
        }

        Self::facet_arguments(&mut request, query, config)?;

        tracing::debug!(
            index = %request.index,
            num_params = request.params.len(),
            "Built Solr select request"
        );

        Ok(request)
    }

    fn basic_params(
        request: &mut SolrSelectRequest,
        query: &SearchQuery,
        config: &SolrSearchConfig,
    ) {
        request.push("q", Self::textual_query(query.text()));
        request.push("q.op", query.default_query_operator().as_backend_str());
        request.push("defType", config.def_type.as_str());
        request.push("start", query.offset().to_string());
        request.push("rows", query.limit().to_string());

        if let Some(time_zone) = query.time_zone() {
            request.push("TZ", time_zone);
        }

        if query.explain() {
            request.push("debugQuery", "true");
        }
    }

    fn textual_query(text: &str) -> String {
        match text.trim() {
            "" => MATCH_ALL_QUERY.to_string(),
            text => text.to_string(),
        }
    }

    fn filter_params(
        request: &mut SolrSelectRequest,
        query: &SearchQuery,
    ) -> Result<(), SolrRequestBuildError> {
        for filter in query.filters() {
            let compiled = filter.compile()?;
            let value = match filter.key() {
                Some(key) => SolrLocalParams::new().with("tag", key).wrap(&compiled),
                None => compiled,
            };
            request.push("fq", value);
        }

        if !query.archive() {
            request.push("fq", SearchFilter::archive().compile()?);
        }

        Ok(())
    }

    fn sort_argument(query: &SearchQuery) -> Result<Option<String>, SolrRequestBuildError> {
        let mut parts = Vec::with_capacity(query.sort().len());

        for criteria in query.sort() {
            let field = match criteria {
                SearchSortCriteria::Score { .. } => SCORE_SORT_FIELD,
                SearchSortCriteria::Date { .. } => SEARCH_FIELD_DATE,
                SearchSortCriteria::Name { .. } => SEARCH_FIELD_SORT_VALUE,
                SearchSortCriteria::Natural { .. } => SEARCH_FIELD_NATURAL_SORT,
                SearchSortCriteria::CustomField { field, .. } => field.as_str(),
                SearchSortCriteria::SpatialDist { .. } => {
                    if query.distance_reference_point().is_none() {
                        return Err(SolrRequestBuildError::MissingDistanceReferencePoint);
                    }
                    GEO_DISTANCE_FUNCTION
                }
            };

            parts.push(format!("{field} {}", criteria.direction().as_backend_str()));
        }

        if parts.is_empty() {
            Ok(None)
        } else {
            Ok(Some(parts.join(",")))
        }
    }

    fn geo_params(request: &mut SolrSelectRequest, point: &GeoPoint, config: &SolrSearchConfig) {
        request.push("pt", point.to_string());
        request.push("sfield", config.geo_field.as_str());
    }

    fn boosting_params(request: &mut SolrSelectRequest, boosting: &Boosting) {
        if boosting.is_empty() {
            return;
        }

        if !boosting.query_fields.is_empty() {
            request.push("qf", boosting.query_fields.join(" "));
        }
        if !boosting.phrase_fields.is_empty() {
            request.push("pf", boosting.phrase_fields.join(" "));
        }
        for boost_query in &boosting.boost_queries {
            request.push("bq", boost_query.as_str());
        }
        for boost_function in &boosting.boost_functions {
            request.push("bf", boost_function.as_str());
        }

        request.push("tie", boosting.tie.to_string());
    }

    fn facet_arguments(
        request: &mut SolrSelectRequest,
        query: &SearchQuery,
        config: &SolrSearchConfig,
    ) -> Result<(), SolrRequestBuildError> {
        if query.facets().is_empty() {
            return Ok(());
        }

        request.push("facet", "true");
        request.push("facet.mincount", config.facet_min_count.to_string());
        request.push("facet.limit", config.facet_limit.to_string());

        for facet in query.facets() {
            for (name, value) in facet_params(facet, config)? {
                request.push(name, value);
            }
        }

        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
