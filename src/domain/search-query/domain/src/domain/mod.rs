// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod boosting;
mod date_math;
mod date_period;
mod geo_point;
mod search_facet;
mod search_fields;
mod search_filter;
mod search_primitives;
mod search_query;
mod search_query_builder;
mod search_query_config;
mod search_sort;

pub use boosting::*;
pub use date_math::*;
pub use date_period::*;
pub use geo_point::*;
pub use search_facet::*;
pub use search_fields::*;
pub use search_filter::*;
pub use search_primitives::*;
pub use search_query::*;
pub use search_query_builder::*;
pub use search_query_config::*;
pub use search_sort::*;
