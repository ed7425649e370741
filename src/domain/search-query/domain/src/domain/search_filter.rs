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

/// Boolean query fragment that narrows the result set without affecting
/// scoring. The optional key lets facets exclude the filter by reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilter {
    key: Option<String>,
    expr: SearchFilterExpr,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchFilterExpr {
    Field(FieldFilter),

    And(Vec<SearchFilter>),

    Or(Vec<SearchFilter>),

    Not(Box<SearchFilter>),

    /// Passed to the backend verbatim
    RawQuery(String),

    /// Excludes archived items
    Archive,

    AbsoluteDateRange(AbsoluteDateRangeFilter),

    RelativeDateRange(RelativeDateRangeFilter),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

impl SearchFilter {
    pub fn new(expr: SearchFilterExpr) -> Self {
        Self { key: None, expr }
    }

    pub fn with_key(self, key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            ..self
        }
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn expr(&self) -> &SearchFilterExpr {
        &self.expr
    }

    pub fn field<S>(
        field: impl Into<String>,
        terms: impl IntoIterator<Item = S>,
    ) -> Result<Self, ValidationError>
    where
        S: Into<String>,
    {
        FieldFilter::new(field, terms).map(Self::from)
    }

    pub fn and(operands: impl IntoIterator<Item = SearchFilter>) -> Result<Self, ValidationError> {
        let operands: Vec<_> = operands.into_iter().collect();
        if operands.is_empty() {
            return Err(ValidationError::EmptyOperands { operator: "AND" });
        }
        Ok(Self::new(SearchFilterExpr::And(operands)))
    }

    pub fn or(operands: impl IntoIterator<Item = SearchFilter>) -> Result<Self, ValidationError> {
        let operands: Vec<_> = operands.into_iter().collect();
        if operands.is_empty() {
            return Err(ValidationError::EmptyOperands { operator: "OR" });
        }
        Ok(Self::new(SearchFilterExpr::Or(operands)))
    }

    pub fn not(operand: SearchFilter) -> Self {
        Self::new(SearchFilterExpr::Not(Box::new(operand)))
    }

    pub fn raw_query(query: impl Into<String>) -> Self {
        Self::new(SearchFilterExpr::RawQuery(query.into()))
    }

    pub fn archive() -> Self {
        Self::new(SearchFilterExpr::Archive)
    }

    /// Renders the filter into the backend query grammar
    pub fn compile(&self) -> Result<String, ValidationError> {
        match &self.expr {
            SearchFilterExpr::Field(filter) => Ok(filter.compile()),
            SearchFilterExpr::And(operands) => Self::compile_operands(operands, "AND"),
            SearchFilterExpr::Or(operands) => Self::compile_operands(operands, "OR"),
            SearchFilterExpr::Not(operand) => Ok(format!("NOT {}", operand.compile()?)),
            SearchFilterExpr::RawQuery(query) => Ok(query.clone()),
            SearchFilterExpr::Archive => Ok(format!("-{SEARCH_FIELD_ARCHIVE}:true")),
            SearchFilterExpr::AbsoluteDateRange(filter) => filter.compile(),
            SearchFilterExpr::RelativeDateRange(filter) => filter.compile(),
        }
    }

    fn compile_operands(
        operands: &[SearchFilter],
        operator: &'static str,
    ) -> Result<String, ValidationError> {
        if operands.is_empty() {
            return Err(ValidationError::EmptyOperands { operator });
        }

        let parts = operands
            .iter()
            .map(SearchFilter::compile)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(format!("({})", parts.join(&format!(" {operator} "))))
    }
}

impl From<SearchFilterExpr> for SearchFilter {
    fn from(expr: SearchFilterExpr) -> Self {
        Self::new(expr)
    }
}

impl From<FieldFilter> for SearchFilter {
    fn from(filter: FieldFilter) -> Self {
        Self::new(SearchFilterExpr::Field(filter))
    }
}

impl From<AbsoluteDateRangeFilter> for SearchFilter {
    fn from(filter: AbsoluteDateRangeFilter) -> Self {
        Self::new(SearchFilterExpr::AbsoluteDateRange(filter))
    }
}

impl From<RelativeDateRangeFilter> for SearchFilter {
    fn from(filter: RelativeDateRangeFilter) -> Self {
        Self::new(SearchFilterExpr::RelativeDateRange(filter))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

// AND: variable number of arguments
#[macro_export]
macro_rules! filter_and {
    // Zero arguments → explicit compile error
    () => {
        compile_error!("filter_and!() requires at least one argument")
    };

    // 1 arg -> just return the expr
    ($single:expr) => {
        $single
    };

    // 2+ args -> And(vec![...])
    ($first:expr, $($rest:expr),+ $(,)?) => {
        $crate::SearchFilter::new($crate::SearchFilterExpr::And(vec![$first, $($rest),+]))
    };
}

// OR: variable number of arguments
#[macro_export]
macro_rules! filter_or {
    () => {
        compile_error!("filter_or!() requires at least one argument")
    };

    ($single:expr) => {
        $single
    };

    ($first:expr, $($rest:expr),+ $(,)?) => {
        $crate::SearchFilter::new($crate::SearchFilterExpr::Or(vec![$first, $($rest),+]))
    };
}

#[macro_export]
macro_rules! filter_not {
    ($expr:expr) => {
        $crate::SearchFilter::not($expr)
    };
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFilter {
    field: String,
    terms: Vec<String>,
    exclude: bool,
}

impl FieldFilter {
    pub fn new<S>(
        field: impl Into<String>,
        terms: impl IntoIterator<Item = S>,
    ) -> Result<Self, ValidationError>
    where
        S: Into<String>,
    {
        let field = field.into();
        let terms: Vec<String> = terms.into_iter().map(Into::into).collect();
        if terms.is_empty() {
            return Err(ValidationError::EmptyTerms { field });
        }

        Ok(Self {
            field,
            terms,
            exclude: false,
        })
    }

    pub fn specialized<S>(
        specialization: FieldSpecialization,
        terms: impl IntoIterator<Item = S>,
    ) -> Result<Self, ValidationError>
    where
        S: Into<String>,
    {
        Self::new(specialization.field(), terms)
    }

    pub fn category<S: Into<String>>(
        terms: impl IntoIterator<Item = S>,
    ) -> Result<Self, ValidationError> {
        Self::specialized(FieldSpecialization::Category, terms)
    }

    pub fn content_section_type<S: Into<String>>(
        terms: impl IntoIterator<Item = S>,
    ) -> Result<Self, ValidationError> {
        Self::specialized(FieldSpecialization::ContentSectionType, terms)
    }

    pub fn content_type<S: Into<String>>(
        terms: impl IntoIterator<Item = S>,
    ) -> Result<Self, ValidationError> {
        Self::specialized(FieldSpecialization::ContentType, terms)
    }

    pub fn group<S: Into<String>>(
        terms: impl IntoIterator<Item = S>,
    ) -> Result<Self, ValidationError> {
        Self::specialized(FieldSpecialization::Group, terms)
    }

    pub fn object_type<S: Into<String>>(
        terms: impl IntoIterator<Item = S>,
    ) -> Result<Self, ValidationError> {
        Self::specialized(FieldSpecialization::ObjectType, terms)
    }

    pub fn site<S: Into<String>>(
        terms: impl IntoIterator<Item = S>,
    ) -> Result<Self, ValidationError> {
        Self::specialized(FieldSpecialization::Site, terms)
    }

    pub fn source<S: Into<String>>(
        terms: impl IntoIterator<Item = S>,
    ) -> Result<Self, ValidationError> {
        Self::specialized(FieldSpecialization::Source, terms)
    }

    /// Negates the filter: matching items are removed from the result set
    pub fn exclude(self) -> Self {
        Self {
            exclude: true,
            ..self
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn is_excluded(&self) -> bool {
        self.exclude
    }

    pub fn specialization(&self) -> Option<FieldSpecialization> {
        FieldSpecialization::from_field(&self.field)
    }

    pub fn compile(&self) -> String {
        let prefix = if self.exclude { "-" } else { "" };
        match self.terms.as_slice() {
            [single] => format!("{prefix}{}:{single}", self.field),
            terms => format!("{prefix}{}:({})", self.field, terms.join(" ")),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbsoluteDateRangeFilter {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub field: String,
}

impl AbsoluteDateRangeFilter {
    pub fn new(from: Option<DateTime<Utc>>, to: Option<DateTime<Utc>>) -> Self {
        Self {
            from,
            to,
            field: DEFAULT_DATE_RANGE_FIELD.to_string(),
        }
    }

    pub fn with_field(self, field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            ..self
        }
    }

    pub fn compile(&self) -> Result<String, ValidationError> {
        if self.from.is_none() && self.to.is_none() {
            return Err(ValidationError::MissingDateRangeBound {
                field: self.field.clone(),
            });
        }

        let from = self.from.as_ref().map(format_date_math_timestamp);
        let to = self.to.as_ref().map(format_date_math_timestamp);

        Ok(format_range_query(&self.field, from.as_deref(), to.as_deref()))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Date range relative to the moment the query is executed, at day
/// granularity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelativeDateRangeFilter {
    /// How far back the range starts
    pub before: Option<DatePeriod>,
    pub after: Option<DatePeriod>,
    pub field: String,
}

impl RelativeDateRangeFilter {
    pub fn new(before: Option<DatePeriod>, after: Option<DatePeriod>) -> Self {
        Self {
            before,
            after,
            field: DEFAULT_DATE_RANGE_FIELD.to_string(),
        }
    }

    pub fn with_field(self, field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            ..self
        }
    }

    pub fn compile(&self) -> Result<String, ValidationError> {
        let now_minus = |period: &DatePeriod| -> Result<String, ValidationError> {
            Ok(format!(
                "{DATE_MATH_NOW}{}{DATE_MATH_START_OF_DAY}",
                date_math_subtract(period)?
            ))
        };

        let (from, to) = match (&self.before, &self.after) {
            (Some(before), None) => (
                now_minus(before)?,
                format!("{DATE_MATH_NOW}{DATE_MATH_END_OF_DAY}"),
            ),
            (None, Some(after)) => (
                format!("{DATE_MATH_NOW}{DATE_MATH_START_OF_DAY}"),
                now_minus(after)?,
            ),
            (Some(before), Some(after)) => (now_minus(before)?, now_minus(after)?),
            (None, None) => {
                return Err(ValidationError::MissingDateRangeBound {
                    field: self.field.clone(),
                });
            }
        };

        Ok(format_range_query(
            &self.field,
            Some(from.as_str()),
            Some(to.as_str()),
        ))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
