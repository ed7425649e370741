// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde_json::Value;

use super::payload_reader::{PAYLOAD_ROOT_PATH, PayloadObject};
use crate::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

type FilterConstructor = fn(&PayloadObject<'_>) -> Result<SearchFilter, DenormalizeError>;
type FacetConstructor = fn(&PayloadObject<'_>) -> Result<SearchFacet, DenormalizeError>;
type SortCriteriaConstructor =
    fn(&PayloadObject<'_>) -> Result<SearchSortCriteria, DenormalizeError>;

// Field specialization tags are resolved through `FieldSpecialization` before
// these registries are consulted
static FILTER_REGISTRY: &[(&str, FilterConstructor)] = &[
    ("absoluteDateRange", absolute_date_range_filter),
    ("and", and_filter),
    ("archive", archive_filter),
    ("field", field_filter),
    ("not", not_filter),
    ("or", or_filter),
    ("query", query_filter),
    ("relativeDateRange", relative_date_range_filter),
];

static FACET_REGISTRY: &[(&str, FacetConstructor)] = &[
    ("absoluteDateRange", absolute_date_range_facet),
    ("field", field_facet),
    ("multiQuery", multi_query_facet),
    ("query", query_facet),
    ("relativeDateRange", relative_date_range_facet),
    ("spatialDistanceRange", spatial_distance_range_facet),
];

static SORT_CRITERIA_REGISTRY: &[(&str, SortCriteriaConstructor)] = &[
    ("customField", custom_field_criteria),
    ("date", date_criteria),
    ("name", name_criteria),
    ("natural", natural_criteria),
    ("score", score_criteria),
    ("spatialDist", spatial_dist_criteria),
];

const FILTER_FAMILY: &str = "filter";
const FACET_FAMILY: &str = "facet";
const SORT_CRITERIA_FAMILY: &str = "sortCriteria";

fn lookup<T: Copy>(registry: &[(&str, T)], tag: &str) -> Option<T> {
    registry
        .iter()
        .find(|(registered, _)| *registered == tag)
        .map(|(_, constructor)| *constructor)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Search query
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Reconstructs a query builder from its structured payload. Keys that are
/// absent keep the defaults of `config`.
#[tracing::instrument(level = "debug", skip_all)]
pub fn denormalize_search_query(
    payload: &Value,
    config: &SearchQueryConfig,
) -> Result<SearchQueryBuilder, DenormalizeError> {
    let object = PayloadObject::root(payload)?;
    let mut builder = SearchQueryBuilder::with_config(config);
    read_search_query(&object, &mut builder)?;
    Ok(builder)
}

/// Same as [`denormalize_search_query`] plus the `index` key
#[tracing::instrument(level = "debug", skip_all)]
pub fn denormalize_select_query(
    payload: &Value,
    config: &SearchQueryConfig,
) -> Result<SelectQueryBuilder, DenormalizeError> {
    let object = PayloadObject::root(payload)?;
    let mut builder = SelectQueryBuilder::with_config(config);
    if let Some(index) = object.optional_str("index")? {
        builder.index(index);
    }
    read_search_query(&object, &mut builder)?;
    Ok(builder)
}

fn read_search_query(
    object: &PayloadObject<'_>,
    builder: &mut SearchQueryBuilder,
) -> Result<(), DenormalizeError> {
    if let Some(text) = object.optional_str("text")? {
        builder.text(text);
    }
    if let Some(lang) = language(object)? {
        builder.lang(lang);
    }
    if let Some(offset) = object.optional_i64("offset")? {
        builder.offset(offset)?;
    }
    if let Some(limit) = object.optional_i64("limit")? {
        builder.limit(limit)?;
    }

    let sort = object
        .list("sort")?
        .into_iter()
        .map(|(value, path)| sort_criteria_at(value, path))
        .collect::<Result<Vec<_>, _>>()?;
    let filters = object
        .list("filter")?
        .into_iter()
        .map(|(value, path)| filter_at(value, path))
        .collect::<Result<Vec<_>, _>>()?;
    let facets = object
        .list("facets")?
        .into_iter()
        .map(|(value, path)| facet_at(value, path))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(
        num_sort = sort.len(),
        num_filters = filters.len(),
        num_facets = facets.len(),
        "Denormalized query parts",
    );

    builder.sort(sort);
    builder.filter(filters)?;
    builder.facet(facets)?;

    if let Some(archive) = object.optional_bool("archive")? {
        builder.archive(archive);
    }
    if let Some(operator) = object.optional_serde("defaultQueryOperator")? {
        builder.default_query_operator(operator);
    }
    if let Some(time_zone) = object.optional_str("timeZone")? {
        builder.time_zone(time_zone);
    }
    if let Some(boosting) = object.optional_object("boosting")? {
        builder.boosting(read_boosting(&boosting)?);
    }
    if let Some(point) = object.optional_geo_point("distanceReferencePoint")? {
        builder.distance_reference_point(point);
    }
    if let Some(explain) = object.optional_bool("explain")? {
        builder.explain(explain);
    }

    Ok(())
}

/// Either a plain code or an object with a `code` key
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum LanguagePayload {
    Code(String),
    Object { code: String },
}

fn language(object: &PayloadObject<'_>) -> Result<Option<ResourceLanguage>, MalformedPayloadError> {
    Ok(object
        .optional_serde::<LanguagePayload>("lang")?
        .map(|lang| match lang {
            LanguagePayload::Code(code) | LanguagePayload::Object { code } => {
                ResourceLanguage::of(code)
            }
        }))
}

fn read_boosting(object: &PayloadObject<'_>) -> Result<Boosting, MalformedPayloadError> {
    Ok(Boosting {
        query_fields: object.string_list("queryFields")?,
        phrase_fields: object.string_list("phraseFields")?,
        boost_queries: object.string_list("boostQueries")?,
        boost_functions: object.string_list("boostFunctions")?,
        tie: object.optional_f64("tie")?.unwrap_or_default(),
    })
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Filters
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub fn denormalize_filter(payload: &Value) -> Result<SearchFilter, DenormalizeError> {
    filter_at(payload, PAYLOAD_ROOT_PATH.to_string())
}

fn filter_at(value: &Value, path: String) -> Result<SearchFilter, DenormalizeError> {
    let object = PayloadObject::from_value(value, path)?;
    let tag = object.tag(FILTER_FAMILY)?;

    let filter = if let Some(specialization) = FieldSpecialization::from_tag(tag) {
        field_filter_on(&object, specialization.field())?
    } else {
        let constructor = lookup(FILTER_REGISTRY, tag)
            .ok_or_else(|| object.unknown_variant(FILTER_FAMILY, tag))?;
        constructor(&object)?
    };

    Ok(match object.optional_str("key")? {
        Some(key) => filter.with_key(key),
        None => filter,
    })
}

fn operands(object: &PayloadObject<'_>) -> Result<Vec<SearchFilter>, DenormalizeError> {
    object
        .required_list("filters")?
        .into_iter()
        .map(|(value, path)| filter_at(value, path))
        .collect()
}

fn field_filter(object: &PayloadObject<'_>) -> Result<SearchFilter, DenormalizeError> {
    field_filter_on(object, object.required_str("field")?)
}

fn field_filter_on(
    object: &PayloadObject<'_>,
    field: &str,
) -> Result<SearchFilter, DenormalizeError> {
    let filter = FieldFilter::new(field, object.required_string_list("terms")?)?;
    Ok(if object.optional_bool("exclude")?.unwrap_or(false) {
        filter.exclude().into()
    } else {
        filter.into()
    })
}

fn and_filter(object: &PayloadObject<'_>) -> Result<SearchFilter, DenormalizeError> {
    Ok(SearchFilter::and(operands(object)?)?)
}

fn or_filter(object: &PayloadObject<'_>) -> Result<SearchFilter, DenormalizeError> {
    Ok(SearchFilter::or(operands(object)?)?)
}

fn not_filter(object: &PayloadObject<'_>) -> Result<SearchFilter, DenormalizeError> {
    let (value, path) = object.required_value("filter")?;
    Ok(SearchFilter::not(filter_at(value, path)?))
}

fn query_filter(object: &PayloadObject<'_>) -> Result<SearchFilter, DenormalizeError> {
    Ok(SearchFilter::raw_query(object.required_str("query")?))
}

fn archive_filter(_: &PayloadObject<'_>) -> Result<SearchFilter, DenormalizeError> {
    Ok(SearchFilter::archive())
}

fn absolute_date_range_filter(
    object: &PayloadObject<'_>,
) -> Result<SearchFilter, DenormalizeError> {
    let filter = AbsoluteDateRangeFilter::new(
        object.optional_datetime("from")?,
        object.optional_datetime("to")?,
    );
    Ok(match object.optional_str("field")? {
        Some(field) => filter.with_field(field),
        None => filter,
    }
    .into())
}

fn relative_date_range_filter(
    object: &PayloadObject<'_>,
) -> Result<SearchFilter, DenormalizeError> {
    let filter = RelativeDateRangeFilter::new(
        object.optional_period("before")?,
        object.optional_period("after")?,
    );
    Ok(match object.optional_str("field")? {
        Some(field) => filter.with_field(field),
        None => filter,
    }
    .into())
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Facets
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub fn denormalize_facet(payload: &Value) -> Result<SearchFacet, DenormalizeError> {
    facet_at(payload, PAYLOAD_ROOT_PATH.to_string())
}

fn facet_at(value: &Value, path: String) -> Result<SearchFacet, DenormalizeError> {
    let object = PayloadObject::from_value(value, path)?;
    let tag = object.tag(FACET_FAMILY)?;

    if let Some(specialization) = FieldSpecialization::from_tag(tag) {
        return field_facet_on(&object, specialization.field());
    }

    let constructor =
        lookup(FACET_REGISTRY, tag).ok_or_else(|| object.unknown_variant(FACET_FAMILY, tag))?;
    constructor(&object)
}

fn field_facet(object: &PayloadObject<'_>) -> Result<SearchFacet, DenormalizeError> {
    field_facet_on(object, object.required_str("field")?)
}

fn field_facet_on(
    object: &PayloadObject<'_>,
    field: &str,
) -> Result<SearchFacet, DenormalizeError> {
    let facet = FieldFacet::new(
        object.required_str("key")?,
        field,
        object.string_list("terms")?,
    );
    Ok(match object.optional_str("excludeFilter")? {
        Some(filter_key) => facet.with_exclude_filter(filter_key),
        None => facet,
    }
    .into())
}

fn query_facet(object: &PayloadObject<'_>) -> Result<SearchFacet, DenormalizeError> {
    let facet = QueryFacet::new(object.required_str("key")?, object.required_str("query")?);
    Ok(match object.optional_str("excludeFilter")? {
        Some(filter_key) => facet.with_exclude_filter(filter_key),
        None => facet,
    }
    .into())
}

fn multi_query_facet(object: &PayloadObject<'_>) -> Result<SearchFacet, DenormalizeError> {
    let mut queries = Vec::new();
    for (value, path) in object.required_list("queries")? {
        match facet_at(value, path.clone())? {
            SearchFacet::Query(query) => queries.push(query),
            _ => {
                return Err(MalformedPayloadError::new(path, "expected a query facet").into());
            }
        }
    }

    let facet = MultiQueryFacet::new(object.required_str("key")?, queries)?;
    Ok(match object.optional_str("excludeFilter")? {
        Some(filter_key) => facet.with_exclude_filter(filter_key),
        None => facet,
    }
    .into())
}

fn absolute_date_range_facet(
    object: &PayloadObject<'_>,
) -> Result<SearchFacet, DenormalizeError> {
    let mut facet = AbsoluteDateRangeFacet::new(
        object.required_str("key")?,
        object.optional_datetime("from")?,
        object.optional_datetime("to")?,
    );
    facet.gap = object.optional_period("gap")?;
    if let Some(field) = object.optional_str("field")? {
        facet.field = field.to_string();
    }
    facet.exclude_filter = object.optional_str("excludeFilter")?.map(str::to_string);
    Ok(facet.into())
}

fn relative_date_range_facet(
    object: &PayloadObject<'_>,
) -> Result<SearchFacet, DenormalizeError> {
    let mut facet = RelativeDateRangeFacet::new(
        object.required_str("key")?,
        object.optional_period("before")?,
        object.optional_period("after")?,
    );
    facet.gap = object.optional_period("gap")?;
    if let Some(round_start) = object.optional_serde("roundStart")? {
        facet.round_start = round_start;
    }
    if let Some(round_end) = object.optional_serde("roundEnd")? {
        facet.round_end = round_end;
    }
    if let Some(field) = object.optional_str("field")? {
        facet.field = field.to_string();
    }
    facet.exclude_filter = object.optional_str("excludeFilter")?.map(str::to_string);
    Ok(facet.into())
}

fn spatial_distance_range_facet(
    object: &PayloadObject<'_>,
) -> Result<SearchFacet, DenormalizeError> {
    let point = object
        .optional_geo_point("point")?
        .ok_or_else(|| MalformedPayloadError::new(object.child_path("point"), "missing value"))?;

    let facet = SpatialDistanceRangeFacet::new(
        object.required_str("key")?,
        point,
        object.required_f64("from")?,
        object.required_f64("to")?,
    );
    Ok(match object.optional_str("excludeFilter")? {
        Some(filter_key) => facet.with_exclude_filter(filter_key),
        None => facet,
    }
    .into())
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Sort criteria
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub fn denormalize_sort_criteria(payload: &Value) -> Result<SearchSortCriteria, DenormalizeError> {
    sort_criteria_at(payload, PAYLOAD_ROOT_PATH.to_string())
}

fn sort_criteria_at(value: &Value, path: String) -> Result<SearchSortCriteria, DenormalizeError> {
    let object = PayloadObject::from_value(value, path)?;
    let tag = object.tag(SORT_CRITERIA_FAMILY)?;

    let constructor = lookup(SORT_CRITERIA_REGISTRY, tag)
        .ok_or_else(|| object.unknown_variant(SORT_CRITERIA_FAMILY, tag))?;
    constructor(&object)
}

fn direction(object: &PayloadObject<'_>) -> Result<SearchSortDirection, DenormalizeError> {
    Ok(object.optional_serde("direction")?.unwrap_or_default())
}

fn custom_field_criteria(
    object: &PayloadObject<'_>,
) -> Result<SearchSortCriteria, DenormalizeError> {
    Ok(SearchSortCriteria::custom_field(
        object.required_str("field")?,
        direction(object)?,
    ))
}

fn date_criteria(object: &PayloadObject<'_>) -> Result<SearchSortCriteria, DenormalizeError> {
    Ok(SearchSortCriteria::Date {
        direction: direction(object)?,
    })
}

fn name_criteria(object: &PayloadObject<'_>) -> Result<SearchSortCriteria, DenormalizeError> {
    Ok(SearchSortCriteria::Name {
        direction: direction(object)?,
    })
}

fn natural_criteria(object: &PayloadObject<'_>) -> Result<SearchSortCriteria, DenormalizeError> {
    Ok(SearchSortCriteria::Natural {
        direction: direction(object)?,
    })
}

fn score_criteria(object: &PayloadObject<'_>) -> Result<SearchSortCriteria, DenormalizeError> {
    Ok(SearchSortCriteria::Score {
        direction: direction(object)?,
    })
}

fn spatial_dist_criteria(
    object: &PayloadObject<'_>,
) -> Result<SearchSortCriteria, DenormalizeError> {
    Ok(SearchSortCriteria::SpatialDist {
        direction: direction(object)?,
    })
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
