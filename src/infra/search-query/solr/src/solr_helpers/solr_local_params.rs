// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

/// Accumulates a Solr local params prefix such as `{!key=sites ex=site}`
#[derive(Debug, Default)]
pub(crate) struct SolrLocalParams {
    parser: Option<&'static str>,
    pairs: Vec<(&'static str, String)>,
}

impl SolrLocalParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parser(mut self, parser: &'static str) -> Self {
        self.parser = Some(parser);
        self
    }

    pub fn with(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.pairs.push((name, value.into()));
        self
    }

    pub fn with_opt(self, name: &'static str, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.with(name, value),
            None => self,
        }
    }

    /// Prepends the local params to `body`. Nothing is prepended when empty.
    pub fn wrap(&self, body: &str) -> String {
        if self.parser.is_none() && self.pairs.is_empty() {
            return body.to_string();
        }

        let mut parts = Vec::with_capacity(self.pairs.len() + 1);
        if let Some(parser) = self.parser {
            parts.push(parser.to_string());
        }
        for (name, value) in &self.pairs {
            parts.push(format!("{name}={}", quote_value(value)));
        }

        format!("{{!{}}}{body}", parts.join(" "))
    }
}

/// Values that the local params parser would cut short are single-quoted,
/// with `\` and `'` backslash-escaped inside the quotes
fn quote_value(value: &str) -> String {
    let needs_quoting = value.is_empty()
        || value
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '}' | '\'' | '"' | ',' | '\\'));
    if !needs_quoting {
        return value.to_string();
    }

    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for c in value.chars() {
        if matches!(c, '\'' | '\\') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('\'');
    quoted
}

/// Joins the values of a comma-separated list parameter such as `terms`,
/// escaping separators that occur inside a value
pub(crate) fn join_list_value<S: AsRef<str>>(values: &[S]) -> String {
    values
        .iter()
        .map(|value| value.as_ref().replace('\\', "\\\\").replace(',', "\\,"))
        .collect::<Vec<_>>()
        .join(",")
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
