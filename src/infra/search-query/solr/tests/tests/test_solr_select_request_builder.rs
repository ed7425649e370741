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
use kamu_search_query_solr::*;
use pretty_assertions::assert_eq;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn build(builder: SearchQueryBuilder) -> SolrSelectRequest {
    let query = builder.build().unwrap();
    SolrSelectRequestBuilder::build_search_request(&query, &SolrSearchConfig::default()).unwrap()
}

fn keyed_site(key: &str, site: &str) -> SearchFilter {
    SearchFilter::from(FieldFilter::site([site]).unwrap()).with_key(key)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_default_request() {
    let request = build(SearchQueryBuilder::new());

    assert_eq!(request.index, "default");
    assert_eq!(
        request.params,
        [
            ("q", "*:*"),
            ("q.op", "AND"),
            ("defType", "edismax"),
            ("start", "0"),
            ("rows", "10"),
            ("fq", "-sp_archive:true"),
        ]
        .map(|(n, v)| (n.to_string(), v.to_string()))
        .to_vec()
    );
}

#[test]
fn test_config_deserialization() {
    let config: SolrSearchConfig = serde_json::from_value(serde_json::json!({
        "defaultIndex": "portal",
        "facetLimit": 100,
    }))
    .unwrap();

    assert_eq!(
        config,
        SolrSearchConfig {
            default_index: "portal".to_string(),
            facet_limit: 100,
            ..Default::default()
        }
    );
    assert_eq!(config.geo_field, "sp_geo_points");
}

#[test]
fn test_index_follows_language() {
    let mut builder = SearchQueryBuilder::new();
    builder.lang(ResourceLanguage::of("de"));
    assert_eq!(build(builder).index, "default-de");

    let config = SolrSearchConfig {
        default_index: "portal".to_string(),
        ..Default::default()
    };
    let query = SearchQueryBuilder::new().build().unwrap();
    let request = SolrSelectRequestBuilder::build_search_request(&query, &config).unwrap();
    assert_eq!(request.index, "portal");
}

#[test_log::test]
fn test_select_request_targets_its_index() {
    let mut builder = SelectQueryBuilder::new();
    builder.index("products");
    builder.text("shoes").lang(ResourceLanguage::of("en"));
    let select = builder.build().unwrap();

    let request =
        SolrSelectRequestBuilder::build_select_request(&select, &SolrSearchConfig::default())
            .unwrap();
    assert_eq!(request.index, "products");
    assert_eq!(request.param("q"), Some("shoes"));
    assert_eq!(
        request.to_json()["path"],
        serde_json::json!("/products/select")
    );
}

#[test]
fn test_basic_params() {
    let mut builder = SearchQueryBuilder::new();
    builder
        .text("  solar panels ")
        .default_query_operator(QueryOperator::Or)
        .time_zone("Europe/Berlin")
        .explain(true);
    builder.offset(30).unwrap().limit(15).unwrap();

    let request = build(builder);
    assert_eq!(request.param("q"), Some("solar panels"));
    assert_eq!(request.param("q.op"), Some("OR"));
    assert_eq!(request.param("start"), Some("30"));
    assert_eq!(request.param("rows"), Some("15"));
    assert_eq!(request.param("TZ"), Some("Europe/Berlin"));
    assert_eq!(request.param("debugQuery"), Some("true"));
}

#[test]
fn test_whitespace_text_matches_all() {
    let mut builder = SearchQueryBuilder::new();
    builder.text(" \t ");
    let request = build(builder);

    assert_eq!(request.param("q"), Some("*:*"));
    assert_eq!(request.param("TZ"), None);
    assert_eq!(request.param("debugQuery"), None);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_filters_are_tagged_by_key() {
    let mut builder = SearchQueryBuilder::new();
    builder
        .filter([
            keyed_site("site", "1"),
            SearchFilter::field("sp_objecttype", ["news", "blog"]).unwrap(),
        ])
        .unwrap();

    assert_eq!(
        build(builder).param_values("fq"),
        [
            "{!tag=site}sp_site:1",
            "sp_objecttype:(news blog)",
            "-sp_archive:true"
        ]
    );
}

#[test]
fn test_archive_lifts_archive_filter() {
    let mut builder = SearchQueryBuilder::new();
    builder.archive(true);
    assert!(build(builder).param_values("fq").is_empty());
}

#[test]
fn test_invalid_filter_fails_request() {
    let mut builder = SearchQueryBuilder::new();
    builder
        .filter([RelativeDateRangeFilter::new(Some(DatePeriod::hours(2)), None).into()])
        .unwrap();
    let query = builder.build().unwrap();

    assert_matches!(
        SolrSelectRequestBuilder::build_search_request(&query, &SolrSearchConfig::default()),
        Err(SolrRequestBuildError::Validation(
            ValidationError::UnsupportedPeriodUnit { .. }
        ))
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_sort_mapping() {
    let mut builder = SearchQueryBuilder::new();
    builder
        .distance_reference_point(GeoPoint::new(7.1, 50.7))
        .sort([
            SearchSortCriteria::Score {
                direction: SearchSortDirection::Desc,
            },
            SearchSortCriteria::Date {
                direction: SearchSortDirection::Desc,
            },
            SearchSortCriteria::Name {
                direction: SearchSortDirection::Asc,
            },
            SearchSortCriteria::Natural {
                direction: SearchSortDirection::Asc,
            },
            SearchSortCriteria::custom_field("sp_title", SearchSortDirection::Desc),
            SearchSortCriteria::SpatialDist {
                direction: SearchSortDirection::Asc,
            },
        ]);

    let request = build(builder);
    assert_eq!(
        request.param("sort"),
        Some(
            "score desc,sp_date desc,sp_sortvalue asc,sp_natural_sort asc,sp_title desc,\
             geodist() asc"
        )
    );
    assert_eq!(request.param("pt"), Some("50.7,7.1"));
    assert_eq!(request.param("sfield"), Some("sp_geo_points"));
}

#[test]
fn test_no_sort_param_without_criteria() {
    assert_eq!(build(SearchQueryBuilder::new()).param("sort"), None);
}

#[test]
fn test_spatial_sort_requires_reference_point() {
    let mut builder = SearchQueryBuilder::new();
    builder.sort([SearchSortCriteria::SpatialDist {
        direction: SearchSortDirection::Asc,
    }]);
    let query = builder.build().unwrap();

    let err = SolrSelectRequestBuilder::build_search_request(&query, &SolrSearchConfig::default())
        .unwrap_err();
    assert_matches!(err, SolrRequestBuildError::MissingDistanceReferencePoint);
    assert_eq!(
        err.to_string(),
        "Sorting by spatial distance requires a distance reference point"
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test]
fn test_boosting_params() {
    let mut builder = SearchQueryBuilder::new();
    builder.boosting(Boosting {
        query_fields: vec!["sp_title^1.4".to_string(), "content^0.8".to_string()],
        phrase_fields: vec!["sp_title^2".to_string()],
        boost_queries: vec![
            "sp_objecttype:news^2".to_string(),
            "sp_objecttype:blog^1.5".to_string(),
        ],
        boost_functions: vec!["recip(ms(NOW,sp_date),3.16e-11,1,1)".to_string()],
        tie: 0.1,
    });

    let request = build(builder);
    assert_eq!(request.param("qf"), Some("sp_title^1.4 content^0.8"));
    assert_eq!(request.param("pf"), Some("sp_title^2"));
    assert_eq!(
        request.param_values("bq"),
        ["sp_objecttype:news^2", "sp_objecttype:blog^1.5"]
    );
    assert_eq!(
        request.param_values("bf"),
        ["recip(ms(NOW,sp_date),3.16e-11,1,1)"]
    );
    assert_eq!(request.param("tie"), Some("0.1"));
}

#[test]
fn test_empty_boosting_is_skipped() {
    let mut builder = SearchQueryBuilder::new();
    builder.boosting(Boosting {
        tie: 0.5,
        ..Default::default()
    });

    let request = build(builder);
    assert_eq!(request.param("qf"), None);
    assert_eq!(request.param("tie"), None);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
