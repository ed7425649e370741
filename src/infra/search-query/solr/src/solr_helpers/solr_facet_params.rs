// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use kamu_search_query::{
    AbsoluteDateRangeFacet,
    FieldFacet,
    QueryFacet,
    RelativeDateRangeFacet,
    SearchFacet,
    SpatialDistanceRangeFacet,
    ValidationError,
    date_math_add,
    format_date_math_timestamp,
    format_range_query,
};

use super::{SolrLocalParams, join_list_value};
use crate::SolrSearchConfig;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub(crate) const PARAM_FACET_FIELD: &str = "facet.field";
pub(crate) const PARAM_FACET_QUERY: &str = "facet.query";
pub(crate) const PARAM_FACET_RANGE: &str = "facet.range";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub(crate) fn facet_params(
    facet: &SearchFacet,
    config: &SolrSearchConfig,
) -> Result<Vec<(&'static str, String)>, ValidationError> {
    match facet {
        SearchFacet::Field(facet) => Ok(vec![field_facet(facet)]),
        SearchFacet::Query(facet) => {
            Ok(vec![query_facet(facet, facet.exclude_filter.as_deref())])
        }
        // Sub-queries inherit the exclusion of the group unless they carry their own
        SearchFacet::MultiQuery(facet) => Ok(facet
            .queries()
            .iter()
            .map(|q| {
                let exclude_filter = q.exclude_filter.as_deref().or(facet.exclude_filter());
                query_facet(q, exclude_filter)
            })
            .collect()),
        SearchFacet::AbsoluteDateRange(facet) => {
            absolute_date_range_facet(facet).map(|param| vec![param])
        }
        SearchFacet::RelativeDateRange(facet) => {
            relative_date_range_facet(facet).map(|param| vec![param])
        }
        SearchFacet::SpatialDistanceRange(facet) => Ok(vec![spatial_facet(facet, config)]),
    }
}

fn keyed(key: &str, exclude_filter: Option<&str>) -> SolrLocalParams {
    SolrLocalParams::new()
        .with("key", key)
        .with_opt("ex", exclude_filter)
}

fn field_facet(facet: &FieldFacet) -> (&'static str, String) {
    let mut local = keyed(&facet.key, facet.exclude_filter.as_deref());
    if !facet.terms.is_empty() {
        local = local.with("terms", join_list_value(&facet.terms));
    }
    (PARAM_FACET_FIELD, local.wrap(&facet.field))
}

fn query_facet(facet: &QueryFacet, exclude_filter: Option<&str>) -> (&'static str, String) {
    (
        PARAM_FACET_QUERY,
        keyed(&facet.key, exclude_filter).wrap(&facet.query),
    )
}

fn range_facet(
    key: &str,
    exclude_filter: Option<&str>,
    field: &str,
    start: String,
    end: String,
    gap: String,
) -> (&'static str, String) {
    let local = keyed(key, exclude_filter)
        .with("facet.range.start", start)
        .with("facet.range.end", end)
        .with("facet.range.gap", gap);
    (PARAM_FACET_RANGE, local.wrap(field))
}

fn absolute_date_range_facet(
    facet: &AbsoluteDateRangeFacet,
) -> Result<(&'static str, String), ValidationError> {
    let exclude_filter = facet.exclude_filter.as_deref();

    // Range faceting needs both ends, otherwise the whole range is one bucket
    if let (Some(gap), Some(from), Some(to)) = (&facet.gap, &facet.from, &facet.to) {
        return Ok(range_facet(
            &facet.key,
            exclude_filter,
            &facet.field,
            format_date_math_timestamp(from),
            format_date_math_timestamp(to),
            date_math_add(gap)?,
        ));
    }

    let query = facet.to_filter().compile()?;
    Ok((PARAM_FACET_QUERY, keyed(&facet.key, exclude_filter).wrap(&query)))
}

fn relative_date_range_facet(
    facet: &RelativeDateRangeFacet,
) -> Result<(&'static str, String), ValidationError> {
    let exclude_filter = facet.exclude_filter.as_deref();
    let start = facet.start_date_math()?;
    let end = facet.end_date_math()?;

    if let Some(gap) = &facet.gap {
        return Ok(range_facet(
            &facet.key,
            exclude_filter,
            &facet.field,
            start,
            end,
            date_math_add(gap)?,
        ));
    }

    let query = format_range_query(&facet.field, Some(&start), Some(&end));
    Ok((PARAM_FACET_QUERY, keyed(&facet.key, exclude_filter).wrap(&query)))
}

fn spatial_facet(
    facet: &SpatialDistanceRangeFacet,
    config: &SolrSearchConfig,
) -> (&'static str, String) {
    let local = SolrLocalParams::new()
        .parser("frange")
        .with("key", facet.key.as_str())
        .with_opt("ex", facet.exclude_filter.as_deref())
        .with("l", facet.from.to_string())
        .with("u", facet.to.to_string());

    (
        PARAM_FACET_QUERY,
        local.wrap(&format!("geodist({},{})", config.geo_field, facet.point)),
    )
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
