// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use assert_matches::assert_matches;
use kamu_search_query::*;
use pretty_assertions::assert_eq;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn keyed_site(key: &str, site: &str) -> SearchFilter {
    SearchFilter::from(FieldFilter::site([site]).unwrap()).with_key(key)
}

fn anonymous_site(site: &str) -> SearchFilter {
    FieldFilter::site([site]).unwrap().into()
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_build_defaults() {
    let query = SearchQueryBuilder::new().build().unwrap();

    assert_eq!(query.text(), "");
    assert!(query.lang().is_default());
    assert_eq!(query.offset(), 0);
    assert_eq!(query.limit(), DEFAULT_SEARCH_PAGE_SIZE);
    assert!(query.sort().is_empty());
    assert!(query.filters().is_empty());
    assert!(query.facets().is_empty());
    assert!(!query.archive());
    assert_eq!(query.default_query_operator(), QueryOperator::And);
    assert_eq!(query.time_zone(), None);
    assert_eq!(query.boosting(), None);
    assert_eq!(query.distance_reference_point(), None);
    assert!(!query.explain());
}

#[test]
fn test_build_with_config() {
    let config = SearchQueryConfig {
        default_limit: 25,
        default_query_operator: QueryOperator::Or,
        default_time_zone: Some("Europe/Berlin".to_string()),
    };

    let query = SearchQueryBuilder::with_config(&config).build().unwrap();
    assert_eq!(query.limit(), 25);
    assert_eq!(query.default_query_operator(), QueryOperator::Or);
    assert_eq!(query.time_zone(), Some("Europe/Berlin"));
}

#[test]
fn test_config_deserialization() {
    let config: SearchQueryConfig = serde_json::from_value(serde_json::json!({
        "defaultLimit": 50,
        "defaultQueryOperator": "OR",
    }))
    .unwrap();

    assert_eq!(
        config,
        SearchQueryConfig {
            default_limit: 50,
            default_query_operator: QueryOperator::Or,
            default_time_zone: None,
        }
    );

    let config: SearchQueryConfig = serde_json::from_value(serde_json::json!({})).unwrap();
    assert_eq!(config, SearchQueryConfig::default());
}

#[test_log::test]
fn test_setters_last_write_wins() {
    let mut builder = SearchQueryBuilder::new();
    builder
        .text("first")
        .text("  hello world ")
        .lang(ResourceLanguage::of("en"))
        .lang(ResourceLanguage::of("de"))
        .archive(true)
        .default_query_operator(QueryOperator::Or)
        .time_zone("UTC")
        .distance_reference_point(GeoPoint::new(7.1, 50.7))
        .explain(true)
        .boosting(Boosting {
            query_fields: vec!["sp_title^1.4".to_string()],
            tie: 0.1,
            ..Default::default()
        });
    builder.offset(20).unwrap().limit(5).unwrap();

    let query = builder.build().unwrap();
    assert_eq!(query.text(), "  hello world ");
    assert_eq!(query.lang().code(), "de");
    assert_eq!(query.offset(), 20);
    assert_eq!(query.limit(), 5);
    assert!(query.archive());
    assert_eq!(query.default_query_operator(), QueryOperator::Or);
    assert_eq!(query.time_zone(), Some("UTC"));
    assert_eq!(query.distance_reference_point(), Some(&GeoPoint::new(7.1, 50.7)));
    assert!(query.explain());
    assert_eq!(
        query.boosting().map(|b| b.query_fields.clone()),
        Some(vec!["sp_title^1.4".to_string()])
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_negative_paging_is_rejected() {
    let mut builder = SearchQueryBuilder::new();
    builder.offset(10).unwrap();

    assert_matches!(builder.offset(-1), Err(ValidationError::NegativeOffset(-1)));
    assert_matches!(builder.limit(-1), Err(ValidationError::NegativeLimit(-1)));

    // Failed calls leave the state untouched
    let query = builder.build().unwrap();
    assert_eq!(query.offset(), 10);
    assert_eq!(query.limit(), DEFAULT_SEARCH_PAGE_SIZE);
}

#[test]
fn test_zero_limit_is_accepted() {
    let mut builder = SearchQueryBuilder::new();
    builder.limit(0).unwrap();
    assert_eq!(builder.build().unwrap().limit(), 0);
}

#[test]
fn test_non_finite_numbers_are_rejected() {
    let mut builder = SearchQueryBuilder::new();
    builder.boosting(Boosting {
        tie: f64::NAN,
        ..Default::default()
    });
    assert_matches!(
        builder.build(),
        Err(ValidationError::NonFiniteNumber { name }) if name == "boosting.tie"
    );

    let mut builder = SearchQueryBuilder::new();
    builder.distance_reference_point(GeoPoint::new(f64::NAN, 50.7));
    assert_matches!(
        builder.build(),
        Err(ValidationError::NonFiniteNumber { name }) if name == "distanceReferencePoint.lng"
    );

    let mut builder = SearchQueryBuilder::new();
    builder
        .facet([SearchFacet::from(SpatialDistanceRangeFacet::new(
            "near",
            GeoPoint::new(7.1, 50.7),
            0.0,
            f64::INFINITY,
        ))])
        .unwrap();
    let err = builder.build().unwrap_err();
    assert_eq!(err.to_string(), "Number 'near.to' must be finite");
}

#[test]
fn test_sort_keeps_order_of_addition() {
    let mut builder = SearchQueryBuilder::new();
    builder
        .sort([SearchSortCriteria::Score {
            direction: SearchSortDirection::Desc,
        }])
        .sort([
            SearchSortCriteria::Date {
                direction: SearchSortDirection::Desc,
            },
            SearchSortCriteria::custom_field("sp_title", SearchSortDirection::Asc),
        ]);

    let query = builder.build().unwrap();
    assert_eq!(
        query.sort().iter().map(|c| c.direction()).collect::<Vec<_>>(),
        [
            SearchSortDirection::Desc,
            SearchSortDirection::Desc,
            SearchSortDirection::Asc
        ]
    );
    assert_matches!(query.sort()[0], SearchSortCriteria::Score { .. });
    assert_matches!(
        &query.sort()[2],
        SearchSortCriteria::CustomField { field, .. } if field == "sp_title"
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_duplicate_filter_key_across_calls() {
    let mut builder = SearchQueryBuilder::new();
    builder.filter([keyed_site("site", "1")]).unwrap();

    assert_matches!(
        builder.filter([keyed_site("site", "2")]),
        Err(ValidationError::DuplicateFilterKey(key)) if key == "site"
    );

    let query = builder.build().unwrap();
    assert_eq!(query.filters().len(), 1);
    assert_eq!(
        query.filter_by_key("site").unwrap().compile().unwrap(),
        "sp_site:1"
    );
}

#[test_log::test]
fn test_duplicate_filter_key_within_call_rejects_whole_call() {
    let mut builder = SearchQueryBuilder::new();

    assert_matches!(
        builder.filter([
            keyed_site("a", "1"),
            keyed_site("site", "2"),
            keyed_site("site", "3"),
        ]),
        Err(ValidationError::DuplicateFilterKey(key)) if key == "site"
    );

    // Nothing of the rejected call was applied, so `a` is still free
    builder.filter([keyed_site("a", "4")]).unwrap();

    let query = builder.build().unwrap();
    assert_eq!(query.filters().len(), 1);
    assert_eq!(query.filter_by_key("a").unwrap().compile().unwrap(), "sp_site:4");
}

#[test]
fn test_anonymous_filters_are_always_distinct() {
    let mut builder = SearchQueryBuilder::new();
    builder
        .filter([anonymous_site("1"), anonymous_site("1")])
        .unwrap()
        .filter([anonymous_site("1"), keyed_site("site", "1")])
        .unwrap();

    let query = builder.build().unwrap();
    assert_eq!(query.filters().len(), 4);
    assert!(query.filter_by_key("site").is_some());
}

#[test_log::test]
fn test_duplicate_facet_key() {
    let mut builder = SearchQueryBuilder::new();
    builder
        .facet([SearchFacet::from(FieldFacet::site("sites", ["1"]))])
        .unwrap();

    assert_matches!(
        builder.facet([SearchFacet::from(QueryFacet::new("sites", "x:1"))]),
        Err(ValidationError::DuplicateFacetKey(key)) if key == "sites"
    );
    assert_matches!(
        builder.facet([
            SearchFacet::from(QueryFacet::new("news", "x:1")),
            SearchFacet::from(QueryFacet::new("news", "x:2")),
        ]),
        Err(ValidationError::DuplicateFacetKey(key)) if key == "news"
    );

    let query = builder.build().unwrap();
    assert_eq!(query.facets().len(), 1);
    assert_matches!(query.facet_by_key("sites"), Some(SearchFacet::Field(_)));
    assert_matches!(query.facet_by_key("news"), None);
}

#[test]
fn test_facet_exclusion_must_reference_keyed_filter() {
    let mut builder = SearchQueryBuilder::new();
    builder
        .filter([keyed_site("site", "1")])
        .unwrap()
        .facet([SearchFacet::from(
            FieldFacet::site("sites", Vec::<String>::new()).with_exclude_filter("site"),
        )])
        .unwrap();
    assert!(builder.build().is_ok());

    let mut builder = SearchQueryBuilder::new();
    builder
        .filter([anonymous_site("1")])
        .unwrap()
        .facet([SearchFacet::from(
            QueryFacet::new("news", "sp_objecttype:news").with_exclude_filter("type"),
        )])
        .unwrap();
    assert_matches!(
        builder.build(),
        Err(ValidationError::UnknownExcludeFilter { facet_key, filter_key })
            if facet_key == "news" && filter_key == "type"
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_select_query_requires_index() {
    assert_matches!(
        SelectQueryBuilder::new().build(),
        Err(ValidationError::MissingIndex)
    );

    let mut builder = SelectQueryBuilder::new();
    builder.index("");
    assert_matches!(builder.build(), Err(ValidationError::MissingIndex));
}

#[test]
fn test_select_query_exposes_search_setters() {
    let mut builder = SelectQueryBuilder::new();
    builder.index("products");
    builder.text("shoes").limit(3).unwrap();
    builder.filter([keyed_site("site", "1")]).unwrap();

    let select = builder.build().unwrap();
    assert_eq!(select.index(), "products");
    assert_eq!(select.query().text(), "shoes");
    assert_eq!(select.query().limit(), 3);
    assert!(select.query().filter_by_key("site").is_some());
}

#[test]
fn test_select_query_propagates_search_validation() {
    let mut builder = SelectQueryBuilder::new();
    builder.index("products");
    builder
        .facet([SearchFacet::from(
            QueryFacet::new("q", "x:1").with_exclude_filter("missing"),
        )])
        .unwrap();

    assert_matches!(
        builder.build(),
        Err(ValidationError::UnknownExcludeFilter { .. })
    );
}

#[test]
fn test_built_query_is_shareable() {
    fn assert_send_sync<T: Send + Sync>(_: &T) {}

    let query = SearchQueryBuilder::new().build().unwrap();
    assert_send_sync(&query);

    let shared = std::sync::Arc::new(query);
    let handle = {
        let shared = shared.clone();
        std::thread::spawn(move || shared.limit())
    };
    assert_eq!(handle.join().unwrap(), shared.limit());
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
