// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

pub(crate) mod solr_helpers;
mod solr_search_config;
mod solr_select_request;

pub use solr_helpers::SolrSelectRequestBuilder;
pub use solr_search_config::*;
pub use solr_select_request::*;
