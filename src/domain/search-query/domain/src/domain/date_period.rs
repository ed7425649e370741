// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use crate::ValidationError;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Calendar period in the ISO-8601 `P[nY][nM][nW][nD][T[nH][nM][nS]]` form.
///
/// Components are kept as written (`P2W` stays two weeks, not fourteen days)
/// so that the period renders back exactly the way it was parsed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DatePeriod {
    pub years: u32,
    pub months: u32,
    pub weeks: u32,
    pub days: u32,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl DatePeriod {
    pub fn years(years: u32) -> Self {
        Self {
            years,
            ..Default::default()
        }
    }

    pub fn months(months: u32) -> Self {
        Self {
            months,
            ..Default::default()
        }
    }

    pub fn weeks(weeks: u32) -> Self {
        Self {
            weeks,
            ..Default::default()
        }
    }

    pub fn days(days: u32) -> Self {
        Self {
            days,
            ..Default::default()
        }
    }

    pub fn hours(hours: u32) -> Self {
        Self {
            hours,
            ..Default::default()
        }
    }

    pub fn minutes(minutes: u32) -> Self {
        Self {
            minutes,
            ..Default::default()
        }
    }

    pub fn seconds(seconds: u32) -> Self {
        Self {
            seconds,
            ..Default::default()
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }

    pub fn has_time_component(&self) -> bool {
        self.hours != 0 || self.minutes != 0 || self.seconds != 0
    }

    /// Translates the period into backend date math units, largest first.
    ///
    /// Weeks are folded into days. The empty period yields a single `0DAYS`
    /// token.
    pub fn date_math_tokens(&self) -> Result<Vec<String>, ValidationError> {
        if self.has_time_component() {
            return Err(ValidationError::UnsupportedPeriodUnit {
                period: self.to_string(),
            });
        }

        let mut tokens = Vec::new();
        if self.years != 0 {
            tokens.push(format!("{}YEARS", self.years));
        }
        if self.months != 0 {
            tokens.push(format!("{}MONTHS", self.months));
        }

        let days = u64::from(self.weeks) * 7 + u64::from(self.days);
        if days != 0 || tokens.is_empty() {
            tokens.push(format!("{days}DAYS"));
        }

        Ok(tokens)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

impl std::fmt::Display for DatePeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_zero() {
            return write!(f, "P0D");
        }

        write!(f, "P")?;
        for (value, designator) in [
            (self.years, 'Y'),
            (self.months, 'M'),
            (self.weeks, 'W'),
            (self.days, 'D'),
        ] {
            if value != 0 {
                write!(f, "{value}{designator}")?;
            }
        }

        if self.has_time_component() {
            write!(f, "T")?;
            for (value, designator) in [
                (self.hours, 'H'),
                (self.minutes, 'M'),
                (self.seconds, 'S'),
            ] {
                if value != 0 {
                    write!(f, "{value}{designator}")?;
                }
            }
        }

        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

impl std::str::FromStr for DatePeriod {
    type Err = DatePeriodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = |reason: &'static str| DatePeriodParseError {
            value: s.to_string(),
            reason,
        };

        let rest = s.strip_prefix('P').ok_or_else(|| err("must start with 'P'"))?;

        let mut period = DatePeriod::default();
        let mut in_time_part = false;
        let mut seen_component = false;
        let mut last_rank = 0;
        let mut digits = String::new();

        for ch in rest.chars() {
            if ch.is_ascii_digit() {
                digits.push(ch);
                continue;
            }

            if ch == 'T' {
                if in_time_part || !digits.is_empty() {
                    return Err(err("misplaced time designator"));
                }
                in_time_part = true;
                continue;
            }

            if digits.is_empty() {
                return Err(err("unit designator without a value"));
            }
            let value: u32 = digits.parse().map_err(|_| err("component value is too large"))?;
            digits.clear();

            let (slot, rank) = match (in_time_part, ch) {
                (false, 'Y') => (&mut period.years, 1),
                (false, 'M') => (&mut period.months, 2),
                (false, 'W') => (&mut period.weeks, 3),
                (false, 'D') => (&mut period.days, 4),
                (true, 'H') => (&mut period.hours, 5),
                (true, 'M') => (&mut period.minutes, 6),
                (true, 'S') => (&mut period.seconds, 7),
                _ => return Err(err("unknown unit designator")),
            };
            if rank <= last_rank {
                return Err(err("components are out of order"));
            }

            *slot = value;
            last_rank = rank;
            seen_component = true;
        }

        if !digits.is_empty() {
            return Err(err("trailing value without a unit designator"));
        }
        if !seen_component {
            return Err(err("no components"));
        }
        // Time components rank above all date components
        if in_time_part && last_rank < 5 {
            return Err(err("time designator without a time component"));
        }

        Ok(period)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid period '{value}': {reason}")]
pub struct DatePeriodParseError {
    pub value: String,
    pub reason: &'static str,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
