// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use assert_matches::assert_matches;
use chrono::{TimeZone, Utc};
use kamu_search_query::*;
use pretty_assertions::assert_eq;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn site(terms: &[&str]) -> SearchFilter {
    FieldFilter::site(terms.iter().copied()).unwrap().into()
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test]
fn test_field_filter_single_term() {
    let filter = SearchFilter::field("sp_objecttype", ["news"]).unwrap();
    assert_eq!(filter.compile().unwrap(), "sp_objecttype:news");
}

#[test]
fn test_field_filter_multiple_terms_keep_order() {
    let filter = SearchFilter::field("sp_objecttype", ["news", "blog", "article"]).unwrap();
    assert_eq!(filter.compile().unwrap(), "sp_objecttype:(news blog article)");
}

#[test]
fn test_field_filter_empty_terms() {
    assert_matches!(
        FieldFilter::new("sp_objecttype", Vec::<String>::new()),
        Err(ValidationError::EmptyTerms { field }) if field == "sp_objecttype"
    );
    assert_matches!(
        FieldFilter::category(Vec::<String>::new()),
        Err(ValidationError::EmptyTerms { .. })
    );
}

#[test]
fn test_field_filter_exclude() {
    let filter = FieldFilter::object_type(["news", "blog"]).unwrap().exclude();
    assert!(filter.is_excluded());
    assert_eq!(filter.compile(), "-sp_objecttype:(news blog)");

    let filter = FieldFilter::site(["12"]).unwrap().exclude();
    assert_eq!(filter.compile(), "-sp_site:12");
}

#[test]
fn test_field_filter_specializations() {
    let cases = [
        (FieldFilter::category(["1"]).unwrap(), "sp_category_path:1"),
        (FieldFilter::content_section_type(["1"]).unwrap(), "sp_contenttype:1"),
        (FieldFilter::content_type(["1"]).unwrap(), "contenttype:1"),
        (FieldFilter::group(["1"]).unwrap(), "sp_group_path:1"),
        (FieldFilter::object_type(["1"]).unwrap(), "sp_objecttype:1"),
        (FieldFilter::site(["1"]).unwrap(), "sp_site:1"),
        (FieldFilter::source(["1"]).unwrap(), "sp_source:1"),
    ];

    for (filter, expected) in cases {
        assert_eq!(filter.compile(), expected);
        assert!(filter.specialization().is_some());
    }

    assert_eq!(FieldFilter::new("custom", ["1"]).unwrap().specialization(), None);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test]
fn test_and_or_composition() {
    let a = site(&["1"]);
    let b = SearchFilter::field("sp_objecttype", ["news", "blog"]).unwrap();

    let and = SearchFilter::and([a.clone(), b.clone()]).unwrap();
    assert_eq!(
        and.compile().unwrap(),
        format!("({} AND {})", a.compile().unwrap(), b.compile().unwrap())
    );
    assert_eq!(and.compile().unwrap(), "(sp_site:1 AND sp_objecttype:(news blog))");

    let or = SearchFilter::or([a.clone(), b.clone()]).unwrap();
    assert_eq!(
        or.compile().unwrap(),
        format!("({} OR {})", a.compile().unwrap(), b.compile().unwrap())
    );
}

#[test]
fn test_nested_composition() {
    let filter = SearchFilter::or([
        SearchFilter::and([site(&["1"]), site(&["2"])]).unwrap(),
        SearchFilter::not(site(&["3"])),
    ])
    .unwrap();

    assert_eq!(
        filter.compile().unwrap(),
        "((sp_site:1 AND sp_site:2) OR NOT sp_site:3)"
    );
}

#[test]
fn test_and_or_require_operands() {
    assert_matches!(
        SearchFilter::and(Vec::new()),
        Err(ValidationError::EmptyOperands { operator: "AND" })
    );
    assert_matches!(
        SearchFilter::or(Vec::new()),
        Err(ValidationError::EmptyOperands { operator: "OR" })
    );

    // Bypassing the checked constructor
    let filter = SearchFilter::new(SearchFilterExpr::And(vec![]));
    assert_matches!(filter.compile(), Err(ValidationError::EmptyOperands { .. }));
}

#[test]
fn test_filter_macros() {
    let single = filter_and!(site(&["1"]));
    assert_eq!(single.compile().unwrap(), "sp_site:1");

    let and = filter_and!(site(&["1"]), site(&["2"]), site(&["3"]));
    assert_eq!(and.compile().unwrap(), "(sp_site:1 AND sp_site:2 AND sp_site:3)");

    let or = filter_or!(site(&["1"]), filter_not!(site(&["2"])));
    assert_eq!(or.compile().unwrap(), "(sp_site:1 OR NOT sp_site:2)");
}

#[test]
fn test_not_raw_query_archive() {
    assert_eq!(
        SearchFilter::not(site(&["1"])).compile().unwrap(),
        "NOT sp_site:1"
    );
    assert_eq!(
        SearchFilter::raw_query("sp_title:\"hello world\"~2")
            .compile()
            .unwrap(),
        "sp_title:\"hello world\"~2"
    );
    assert_eq!(SearchFilter::archive().compile().unwrap(), "-sp_archive:true");
}

#[test]
fn test_filter_key() {
    let filter = site(&["1"]).with_key("site");
    assert_eq!(filter.key(), Some("site"));
    assert_eq!(filter.compile().unwrap(), "sp_site:1");
    assert_eq!(site(&["1"]).key(), None);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test]
fn test_absolute_date_range() {
    let from = Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap();
    let to = Utc.with_ymd_and_hms(2021, 1, 2, 0, 0, 0).unwrap();

    let both = AbsoluteDateRangeFilter::new(Some(from), Some(to));
    assert_eq!(
        both.compile().unwrap(),
        "sp_date_list:[2021-01-01T00:00:00Z TO 2021-01-02T00:00:00Z]"
    );

    let from_only = AbsoluteDateRangeFilter::new(Some(from), None);
    assert_eq!(
        from_only.compile().unwrap(),
        "sp_date_list:[2021-01-01T00:00:00Z TO *]"
    );

    let to_only = AbsoluteDateRangeFilter::new(None, Some(to)).with_field("sp_date");
    assert_eq!(
        to_only.compile().unwrap(),
        "sp_date:[* TO 2021-01-02T00:00:00Z]"
    );
}

#[test]
fn test_absolute_date_range_is_rendered_in_utc() {
    let from = chrono::DateTime::parse_from_rfc3339("2021-01-01T02:30:15+02:00")
        .unwrap()
        .with_timezone(&Utc);

    let filter = AbsoluteDateRangeFilter::new(Some(from), None);
    assert_eq!(
        filter.compile().unwrap(),
        "sp_date_list:[2021-01-01T00:30:15Z TO *]"
    );
}

#[test]
fn test_absolute_date_range_requires_bound() {
    assert_matches!(
        AbsoluteDateRangeFilter::new(None, None).compile(),
        Err(ValidationError::MissingDateRangeBound { field }) if field == "sp_date_list"
    );
}

#[test]
fn test_relative_date_range_before() {
    let cases = [
        (DatePeriod::days(1), "NOW-1DAYS/DAY"),
        (DatePeriod::weeks(1), "NOW-7DAYS/DAY"),
        (DatePeriod::months(2), "NOW-2MONTHS/DAY"),
        (DatePeriod::years(3), "NOW-3YEARS/DAY"),
    ];

    for (before, from) in cases {
        let filter = RelativeDateRangeFilter::new(Some(before), None);
        assert_eq!(
            filter.compile().unwrap(),
            format!("sp_date_list:[{from} TO NOW/DAY+1DAY-1SECOND]")
        );
    }
}

#[test]
fn test_relative_date_range_after() {
    let filter = RelativeDateRangeFilter::new(None, Some(DatePeriod::days(3)));
    assert_eq!(
        filter.compile().unwrap(),
        "sp_date_list:[NOW/DAY TO NOW-3DAYS/DAY]"
    );
}

#[test]
fn test_relative_date_range_both_bounds() {
    let filter =
        RelativeDateRangeFilter::new(Some(DatePeriod::weeks(2)), Some(DatePeriod::days(1)))
            .with_field("sp_date");
    assert_eq!(
        filter.compile().unwrap(),
        "sp_date:[NOW-14DAYS/DAY TO NOW-1DAYS/DAY]"
    );
}

#[test]
fn test_relative_date_range_compound_period() {
    let before: DatePeriod = "P1Y2M".parse().unwrap();
    let filter = RelativeDateRangeFilter::new(Some(before), None);
    assert_eq!(
        filter.compile().unwrap(),
        "sp_date_list:[NOW-1YEARS-2MONTHS/DAY TO NOW/DAY+1DAY-1SECOND]"
    );
}

#[test]
fn test_relative_date_range_rejects_time_units() {
    for before in [
        DatePeriod::hours(1),
        DatePeriod::minutes(30),
        DatePeriod::seconds(10),
    ] {
        assert_matches!(
            RelativeDateRangeFilter::new(Some(before), None).compile(),
            Err(ValidationError::UnsupportedPeriodUnit { .. })
        );
    }

    let mixed: DatePeriod = "P1DT1H".parse().unwrap();
    assert_matches!(
        RelativeDateRangeFilter::new(None, Some(mixed)).compile(),
        Err(ValidationError::UnsupportedPeriodUnit { period }) if period == "P1DT1H"
    );
}

#[test]
fn test_relative_date_range_requires_bound() {
    assert_matches!(
        RelativeDateRangeFilter::new(None, None).compile(),
        Err(ValidationError::MissingDateRangeBound { .. })
    );
}

#[test]
fn test_date_range_inside_composition() {
    let filter = SearchFilter::and([
        site(&["1"]),
        RelativeDateRangeFilter::new(Some(DatePeriod::days(1)), None).into(),
    ])
    .unwrap();
    assert_eq!(
        filter.compile().unwrap(),
        "(sp_site:1 AND sp_date_list:[NOW-1DAYS/DAY TO NOW/DAY+1DAY-1SECOND])"
    );

    let invalid = SearchFilter::not(RelativeDateRangeFilter::new(None, None).into());
    assert_matches!(
        invalid.compile(),
        Err(ValidationError::MissingDateRangeBound { .. })
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
