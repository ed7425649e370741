// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod solr_facet_params;
mod solr_local_params;
mod solr_select_request_builder;

pub(crate) use solr_facet_params::*;
pub(crate) use solr_local_params::*;
pub use solr_select_request_builder::*;
