// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use crate::SearchSortDirection;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchSortCriteria {
    CustomField {
        field: String,
        direction: SearchSortDirection,
    },

    /// By the primary date of the item
    Date { direction: SearchSortDirection },

    /// Lexicographically by title
    Name { direction: SearchSortDirection },

    /// By title, comparing embedded numbers numerically
    Natural { direction: SearchSortDirection },

    /// By relevance
    Score { direction: SearchSortDirection },

    /// By distance from the query's reference point
    SpatialDist { direction: SearchSortDirection },
}

impl SearchSortCriteria {
    pub fn custom_field(field: impl Into<String>, direction: SearchSortDirection) -> Self {
        Self::CustomField {
            field: field.into(),
            direction,
        }
    }

    pub fn direction(&self) -> SearchSortDirection {
        match self {
            Self::CustomField { direction, .. }
            | Self::Date { direction }
            | Self::Name { direction }
            | Self::Natural { direction }
            | Self::Score { direction }
            | Self::SpatialDist { direction } => *direction,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
