// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::{DateTime, Utc};

use crate::{DatePeriod, ValidationError};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const DATE_MATH_NOW: &str = "NOW";
pub const DATE_MATH_START_OF_DAY: &str = "/DAY";
pub const DATE_MATH_END_OF_DAY: &str = "/DAY+1DAY-1SECOND";
pub const DATE_MATH_OPEN_BOUND: &str = "*";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// UTC, second precision, `Z`-suffixed
pub fn format_date_math_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// `P1Y2M` -> `-1YEARS-2MONTHS`
pub fn date_math_subtract(period: &DatePeriod) -> Result<String, ValidationError> {
    date_math_offset(period, '-')
}

/// `P2W` -> `+14DAYS`
pub fn date_math_add(period: &DatePeriod) -> Result<String, ValidationError> {
    date_math_offset(period, '+')
}

fn date_math_offset(period: &DatePeriod, sign: char) -> Result<String, ValidationError> {
    let mut offset = String::new();
    for token in period.date_math_tokens()? {
        offset.push(sign);
        offset.push_str(&token);
    }
    Ok(offset)
}

/// Renders `field:[<from> TO <to>]`, where a missing bound becomes `*`
pub fn format_range_query(field: &str, from: Option<&str>, to: Option<&str>) -> String {
    format!(
        "{field}:[{} TO {}]",
        from.unwrap_or(DATE_MATH_OPEN_BOUND),
        to.unwrap_or(DATE_MATH_OPEN_BOUND)
    )
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
