// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use kamu_search_query::ValidationError;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Parameters of a request to the `/select` handler of a Solr core
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolrSelectRequest {
    pub index: String,

    /// In emission order. Multi-valued parameters repeat.
    pub params: Vec<(String, String)>,
}

impl SolrSelectRequest {
    pub fn new(index: impl Into<String>) -> Self {
        Self {
            index: index.into(),
            params: Vec::new(),
        }
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.params.push((name.into(), value.into()));
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn param_values(&self, name: &str) -> Vec<&str> {
        self.params
            .iter()
            .filter(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// Form-encoded-ready representation, keyed by the Solr path
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "path": format!("/{}/select", self.index),
            "params": self.params,
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(thiserror::Error, Debug)]
pub enum SolrRequestBuildError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Sorting by spatial distance requires a distance reference point")]
    MissingDistanceReferencePoint,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
