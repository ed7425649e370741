// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Value, json};

use super::payload_reader::PAYLOAD_TYPE_KEY;
use crate::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn timestamp_value(ts: Option<&DateTime<Utc>>) -> Option<Value> {
    ts.map(|ts| json!(ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)))
}

fn period_value(period: Option<DatePeriod>) -> Option<Value> {
    period.map(|period| json!(period.to_string()))
}

fn insert_opt(payload: &mut Value, key: &str, value: Option<Value>) {
    if let (Some(value), Value::Object(map)) = (value, payload) {
        map.insert(key.to_string(), value);
    }
}

fn tagged(tag: &str, mut body: Value) -> Value {
    if let Value::Object(map) = &mut body {
        map.insert(PAYLOAD_TYPE_KEY.to_string(), json!(tag));
    }
    body
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

impl SearchFilter {
    /// Payload discriminator of the filter
    pub fn tag(&self) -> &'static str {
        match self.expr() {
            SearchFilterExpr::Field(filter) => filter
                .specialization()
                .map_or("field", FieldSpecialization::tag),
            SearchFilterExpr::And(_) => "and",
            SearchFilterExpr::Or(_) => "or",
            SearchFilterExpr::Not(_) => "not",
            SearchFilterExpr::RawQuery(_) => "query",
            SearchFilterExpr::Archive => "archive",
            SearchFilterExpr::AbsoluteDateRange(_) => "absoluteDateRange",
            SearchFilterExpr::RelativeDateRange(_) => "relativeDateRange",
        }
    }

    pub fn to_payload(&self) -> Value {
        let mut payload = match self.expr() {
            SearchFilterExpr::Field(filter) => {
                let mut body = json!({
                    "terms": filter.terms(),
                    "exclude": filter.is_excluded(),
                });
                if filter.specialization().is_none() {
                    insert_opt(&mut body, "field", Some(json!(filter.field())));
                }
                body
            }
            SearchFilterExpr::And(operands) | SearchFilterExpr::Or(operands) => json!({
                "filters": operands.iter().map(SearchFilter::to_payload).collect::<Vec<_>>(),
            }),
            SearchFilterExpr::Not(operand) => json!({ "filter": operand.to_payload() }),
            SearchFilterExpr::RawQuery(query) => json!({ "query": query }),
            SearchFilterExpr::Archive => json!({}),
            SearchFilterExpr::AbsoluteDateRange(filter) => {
                let mut body = json!({ "field": filter.field });
                insert_opt(&mut body, "from", timestamp_value(filter.from.as_ref()));
                insert_opt(&mut body, "to", timestamp_value(filter.to.as_ref()));
                body
            }
            SearchFilterExpr::RelativeDateRange(filter) => {
                let mut body = json!({ "field": filter.field });
                insert_opt(&mut body, "before", period_value(filter.before));
                insert_opt(&mut body, "after", period_value(filter.after));
                body
            }
        };

        insert_opt(&mut payload, "key", self.key().map(|key| json!(key)));
        tagged(self.tag(), payload)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

impl SearchFacet {
    /// Payload discriminator of the facet
    pub fn tag(&self) -> &'static str {
        match self {
            SearchFacet::Field(facet) => facet
                .specialization()
                .map_or("field", FieldSpecialization::tag),
            SearchFacet::Query(_) => "query",
            SearchFacet::MultiQuery(_) => "multiQuery",
            SearchFacet::AbsoluteDateRange(_) => "absoluteDateRange",
            SearchFacet::RelativeDateRange(_) => "relativeDateRange",
            SearchFacet::SpatialDistanceRange(_) => "spatialDistanceRange",
        }
    }

    pub fn to_payload(&self) -> Value {
        let mut payload = match self {
            SearchFacet::Field(facet) => {
                let mut body = json!({ "terms": facet.terms });
                if facet.specialization().is_none() {
                    insert_opt(&mut body, "field", Some(json!(facet.field)));
                }
                body
            }
            SearchFacet::Query(facet) => json!({ "query": facet.query }),
            SearchFacet::MultiQuery(facet) => json!({
                "queries": facet
                    .queries()
                    .iter()
                    .map(|query| SearchFacet::Query(query.clone()).to_payload())
                    .collect::<Vec<_>>(),
            }),
            SearchFacet::AbsoluteDateRange(facet) => {
                let mut body = json!({ "field": facet.field });
                insert_opt(&mut body, "from", timestamp_value(facet.from.as_ref()));
                insert_opt(&mut body, "to", timestamp_value(facet.to.as_ref()));
                insert_opt(&mut body, "gap", period_value(facet.gap));
                body
            }
            SearchFacet::RelativeDateRange(facet) => {
                let mut body = json!({
                    "field": facet.field,
                    "roundStart": facet.round_start,
                    "roundEnd": facet.round_end,
                });
                insert_opt(&mut body, "before", period_value(facet.before));
                insert_opt(&mut body, "after", period_value(facet.after));
                insert_opt(&mut body, "gap", period_value(facet.gap));
                body
            }
            SearchFacet::SpatialDistanceRange(facet) => json!({
                "point": facet.point.to_payload(),
                "from": facet.from,
                "to": facet.to,
            }),
        };

        insert_opt(&mut payload, "key", Some(json!(self.key())));
        insert_opt(
            &mut payload,
            "excludeFilter",
            self.exclude_filter().map(|key| json!(key)),
        );
        tagged(self.tag(), payload)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

impl SearchSortCriteria {
    /// Payload discriminator of the criteria
    pub fn tag(&self) -> &'static str {
        match self {
            SearchSortCriteria::CustomField { .. } => "customField",
            SearchSortCriteria::Date { .. } => "date",
            SearchSortCriteria::Name { .. } => "name",
            SearchSortCriteria::Natural { .. } => "natural",
            SearchSortCriteria::Score { .. } => "score",
            SearchSortCriteria::SpatialDist { .. } => "spatialDist",
        }
    }

    pub fn to_payload(&self) -> Value {
        let mut payload = json!({ "direction": self.direction() });
        if let SearchSortCriteria::CustomField { field, .. } = self {
            insert_opt(&mut payload, "field", Some(json!(field)));
        }
        tagged(self.tag(), payload)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

impl Boosting {
    pub fn to_payload(&self) -> Value {
        json!(self)
    }
}

impl GeoPoint {
    pub fn to_payload(&self) -> Value {
        json!({ "lng": self.lng, "lat": self.lat })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

impl SearchQuery {
    pub fn to_payload(&self) -> Value {
        let mut payload = json!({
            "text": self.text(),
            "lang": self.lang().code(),
            "offset": self.offset(),
            "limit": self.limit(),
            "sort": self.sort().iter().map(SearchSortCriteria::to_payload).collect::<Vec<_>>(),
            "filter": self.filters().iter().map(SearchFilter::to_payload).collect::<Vec<_>>(),
            "facets": self.facets().iter().map(SearchFacet::to_payload).collect::<Vec<_>>(),
            "archive": self.archive(),
            "defaultQueryOperator": self.default_query_operator(),
            "explain": self.explain(),
        });

        insert_opt(&mut payload, "timeZone", self.time_zone().map(|tz| json!(tz)));
        insert_opt(&mut payload, "boosting", self.boosting().map(Boosting::to_payload));
        insert_opt(
            &mut payload,
            "distanceReferencePoint",
            self.distance_reference_point().map(GeoPoint::to_payload),
        );
        payload
    }
}

impl SelectQuery {
    pub fn to_payload(&self) -> Value {
        let mut payload = self.query().to_payload();
        insert_opt(&mut payload, "index", Some(json!(self.index())));
        payload
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
