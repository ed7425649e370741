// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Relevance weighting passed through to the backend's query parser
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Boosting {
    /// Field weights, e.g. `sp_title^1.4`
    pub query_fields: Vec<String>,

    /// Phrase match weights, e.g. `sp_title^1.5`
    pub phrase_fields: Vec<String>,

    /// Additive boost queries, e.g. `sp_objecttype:news^0.8`
    pub boost_queries: Vec<String>,

    /// Boost functions, e.g. `recip(ms(NOW,sp_date),3.16e-11,1,1)`
    pub boost_functions: Vec<String>,

    /// Blends the max-scoring field with the others: `0.0` is pure max,
    /// `1.0` is pure sum
    pub tie: f64,
}

impl Boosting {
    pub fn is_empty(&self) -> bool {
        self.query_fields.is_empty()
            && self.phrase_fields.is_empty()
            && self.boost_queries.is_empty()
            && self.boost_functions.is_empty()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
