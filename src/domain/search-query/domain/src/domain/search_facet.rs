// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::{DateTime, Utc};

use crate::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Request for aggregate counts returned alongside the search results.
///
/// Every facet carries a key that correlates it with its counts in the
/// response, and may name a keyed filter of the same query that should be
/// ignored while the facet is computed.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchFacet {
    Field(FieldFacet),
    Query(QueryFacet),
    MultiQuery(MultiQueryFacet),
    AbsoluteDateRange(AbsoluteDateRangeFacet),
    RelativeDateRange(RelativeDateRangeFacet),
    SpatialDistanceRange(SpatialDistanceRangeFacet),
}

impl SearchFacet {
    pub fn key(&self) -> &str {
        match self {
            SearchFacet::Field(f) => &f.key,
            SearchFacet::Query(f) => &f.key,
            SearchFacet::MultiQuery(f) => f.key(),
            SearchFacet::AbsoluteDateRange(f) => &f.key,
            SearchFacet::RelativeDateRange(f) => &f.key,
            SearchFacet::SpatialDistanceRange(f) => &f.key,
        }
    }

    pub fn exclude_filter(&self) -> Option<&str> {
        match self {
            SearchFacet::Field(f) => f.exclude_filter.as_deref(),
            SearchFacet::Query(f) => f.exclude_filter.as_deref(),
            SearchFacet::MultiQuery(f) => f.exclude_filter(),
            SearchFacet::AbsoluteDateRange(f) => f.exclude_filter.as_deref(),
            SearchFacet::RelativeDateRange(f) => f.exclude_filter.as_deref(),
            SearchFacet::SpatialDistanceRange(f) => f.exclude_filter.as_deref(),
        }
    }
}

impl From<FieldFacet> for SearchFacet {
    fn from(facet: FieldFacet) -> Self {
        Self::Field(facet)
    }
}

impl From<QueryFacet> for SearchFacet {
    fn from(facet: QueryFacet) -> Self {
        Self::Query(facet)
    }
}

impl From<MultiQueryFacet> for SearchFacet {
    fn from(facet: MultiQueryFacet) -> Self {
        Self::MultiQuery(facet)
    }
}

impl From<AbsoluteDateRangeFacet> for SearchFacet {
    fn from(facet: AbsoluteDateRangeFacet) -> Self {
        Self::AbsoluteDateRange(facet)
    }
}

impl From<RelativeDateRangeFacet> for SearchFacet {
    fn from(facet: RelativeDateRangeFacet) -> Self {
        Self::RelativeDateRange(facet)
    }
}

impl From<SpatialDistanceRangeFacet> for SearchFacet {
    fn from(facet: SpatialDistanceRangeFacet) -> Self {
        Self::SpatialDistanceRange(facet)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Counts per distinct value of a backend field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldFacet {
    pub key: String,
    pub field: String,

    /// Restricts counting to these values (empty means all)
    pub terms: Vec<String>,

    pub exclude_filter: Option<String>,
}

impl FieldFacet {
    pub fn new<S>(
        key: impl Into<String>,
        field: impl Into<String>,
        terms: impl IntoIterator<Item = S>,
    ) -> Self
    where
        S: Into<String>,
    {
        Self {
            key: key.into(),
            field: field.into(),
            terms: terms.into_iter().map(Into::into).collect(),
            exclude_filter: None,
        }
    }

    pub fn specialized<S: Into<String>>(
        key: impl Into<String>,
        specialization: FieldSpecialization,
        terms: impl IntoIterator<Item = S>,
    ) -> Self {
        Self::new(key, specialization.field(), terms)
    }

    pub fn category<S: Into<String>>(
        key: impl Into<String>,
        terms: impl IntoIterator<Item = S>,
    ) -> Self {
        Self::specialized(key, FieldSpecialization::Category, terms)
    }

    pub fn content_section_type<S: Into<String>>(
        key: impl Into<String>,
        terms: impl IntoIterator<Item = S>,
    ) -> Self {
        Self::specialized(key, FieldSpecialization::ContentSectionType, terms)
    }

    pub fn content_type<S: Into<String>>(
        key: impl Into<String>,
        terms: impl IntoIterator<Item = S>,
    ) -> Self {
        Self::specialized(key, FieldSpecialization::ContentType, terms)
    }

    pub fn group<S: Into<String>>(
        key: impl Into<String>,
        terms: impl IntoIterator<Item = S>,
    ) -> Self {
        Self::specialized(key, FieldSpecialization::Group, terms)
    }

    pub fn object_type<S: Into<String>>(
        key: impl Into<String>,
        terms: impl IntoIterator<Item = S>,
    ) -> Self {
        Self::specialized(key, FieldSpecialization::ObjectType, terms)
    }

    pub fn site<S: Into<String>>(
        key: impl Into<String>,
        terms: impl IntoIterator<Item = S>,
    ) -> Self {
        Self::specialized(key, FieldSpecialization::Site, terms)
    }

    pub fn source<S: Into<String>>(
        key: impl Into<String>,
        terms: impl IntoIterator<Item = S>,
    ) -> Self {
        Self::specialized(key, FieldSpecialization::Source, terms)
    }

    pub fn with_exclude_filter(self, filter_key: impl Into<String>) -> Self {
        Self {
            exclude_filter: Some(filter_key.into()),
            ..self
        }
    }

    pub fn specialization(&self) -> Option<FieldSpecialization> {
        FieldSpecialization::from_field(&self.field)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Counts items matching a raw backend query
#[derive(Debug, Clone, PartialEq)]
pub struct QueryFacet {
    pub key: String,
    pub query: String,
    pub exclude_filter: Option<String>,
}

impl QueryFacet {
    pub fn new(key: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            query: query.into(),
            exclude_filter: None,
        }
    }

    pub fn with_exclude_filter(self, filter_key: impl Into<String>) -> Self {
        Self {
            exclude_filter: Some(filter_key.into()),
            ..self
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq)]
pub struct MultiQueryFacet {
    key: String,
    queries: Vec<QueryFacet>,
    exclude_filter: Option<String>,
}

impl MultiQueryFacet {
    pub fn new(
        key: impl Into<String>,
        queries: impl IntoIterator<Item = QueryFacet>,
    ) -> Result<Self, ValidationError> {
        let key = key.into();
        let queries: Vec<_> = queries.into_iter().collect();
        if queries.is_empty() {
            return Err(ValidationError::EmptyQueries { key });
        }

        Ok(Self {
            key,
            queries,
            exclude_filter: None,
        })
    }

    pub fn with_exclude_filter(self, filter_key: impl Into<String>) -> Self {
        Self {
            exclude_filter: Some(filter_key.into()),
            ..self
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn queries(&self) -> &[QueryFacet] {
        &self.queries
    }

    pub fn exclude_filter(&self) -> Option<&str> {
        self.exclude_filter.as_deref()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq)]
pub struct AbsoluteDateRangeFacet {
    pub key: String,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,

    /// Bucket width. Without it the facet yields a single count for the
    /// whole range.
    pub gap: Option<DatePeriod>,

    pub field: String,
    pub exclude_filter: Option<String>,
}

impl AbsoluteDateRangeFacet {
    pub fn new(
        key: impl Into<String>,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            key: key.into(),
            from,
            to,
            gap: None,
            field: DEFAULT_DATE_RANGE_FIELD.to_string(),
            exclude_filter: None,
        }
    }

    pub fn with_gap(self, gap: DatePeriod) -> Self {
        Self {
            gap: Some(gap),
            ..self
        }
    }

    pub fn with_field(self, field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            ..self
        }
    }

    pub fn with_exclude_filter(self, filter_key: impl Into<String>) -> Self {
        Self {
            exclude_filter: Some(filter_key.into()),
            ..self
        }
    }

    /// The filter selecting exactly the items this facet counts
    pub fn to_filter(&self) -> AbsoluteDateRangeFilter {
        AbsoluteDateRangeFilter::new(self.from, self.to).with_field(self.field.clone())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq)]
pub struct RelativeDateRangeFacet {
    pub key: String,
    pub before: Option<DatePeriod>,
    pub after: Option<DatePeriod>,
    pub gap: Option<DatePeriod>,
    pub round_start: DateRangeRound,
    pub round_end: DateRangeRound,
    pub field: String,
    pub exclude_filter: Option<String>,
}

impl RelativeDateRangeFacet {
    pub fn new(
        key: impl Into<String>,
        before: Option<DatePeriod>,
        after: Option<DatePeriod>,
    ) -> Self {
        Self {
            key: key.into(),
            before,
            after,
            gap: None,
            round_start: DateRangeRound::StartOfDay,
            round_end: DateRangeRound::EndOfDay,
            field: DEFAULT_DATE_RANGE_FIELD.to_string(),
            exclude_filter: None,
        }
    }

    pub fn with_gap(self, gap: DatePeriod) -> Self {
        Self {
            gap: Some(gap),
            ..self
        }
    }

    pub fn with_rounding(self, round_start: DateRangeRound, round_end: DateRangeRound) -> Self {
        Self {
            round_start,
            round_end,
            ..self
        }
    }

    pub fn with_field(self, field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            ..self
        }
    }

    pub fn with_exclude_filter(self, filter_key: impl Into<String>) -> Self {
        Self {
            exclude_filter: Some(filter_key.into()),
            ..self
        }
    }

    /// Date math of the lower boundary, e.g. `NOW-7DAYS/DAY`
    pub fn start_date_math(&self) -> Result<String, ValidationError> {
        self.ensure_bounded()?;
        Self::boundary(self.before.as_ref(), self.round_start)
    }

    /// Date math of the upper boundary, e.g. `NOW/DAY+1DAY-1SECOND`
    pub fn end_date_math(&self) -> Result<String, ValidationError> {
        self.ensure_bounded()?;
        Self::boundary(self.after.as_ref(), self.round_end)
    }

    fn ensure_bounded(&self) -> Result<(), ValidationError> {
        if self.before.is_none() && self.after.is_none() {
            return Err(ValidationError::MissingDateRangeBound {
                field: self.field.clone(),
            });
        }
        Ok(())
    }

    fn boundary(
        period: Option<&DatePeriod>,
        round: DateRangeRound,
    ) -> Result<String, ValidationError> {
        let offset = match period {
            Some(period) => date_math_subtract(period)?,
            None => String::new(),
        };
        Ok(format!("{DATE_MATH_NOW}{offset}{}", round.date_math_suffix()))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Counts items whose distance from `point` falls within `[from, to]`
/// kilometers
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialDistanceRangeFacet {
    pub key: String,
    pub point: GeoPoint,
    pub from: f64,
    pub to: f64,
    pub exclude_filter: Option<String>,
}

impl SpatialDistanceRangeFacet {
    pub fn new(key: impl Into<String>, point: GeoPoint, from: f64, to: f64) -> Self {
        Self {
            key: key.into(),
            point,
            from,
            to,
            exclude_filter: None,
        }
    }

    pub fn with_exclude_filter(self, filter_key: impl Into<String>) -> Self {
        Self {
            exclude_filter: Some(filter_key.into()),
            ..self
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
