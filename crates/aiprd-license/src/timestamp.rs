// AI PRD Builder - Model Context Protocol Server
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Expiry timestamps.
//!
//! License documents are written by several tools, so expiry values arrive in
//! a few shapes:
//!
//! - RFC 3339: `2030-01-01T00:00:00Z`
//! - naive date-time, read as UTC: `2030-01-01T00:00:00`
//! - plain date, midnight UTC: `2030-01-01`
//! - JSON number of milliseconds since the Unix epoch

use crate::error::{LicenseError, LicenseResult};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::Value as JsonValue;

const MS_PER_DAY: i64 = 86_400_000;

/// Expiry assumed for a license file that does not carry one.
pub fn far_future() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2099, 12, 31, 0, 0, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Parse an expiry value from a license document.
pub fn parse_timestamp(value: &JsonValue) -> LicenseResult<DateTime<Utc>> {
    let parsed = match value {
        JsonValue::String(raw) => parse_str(raw),
        JsonValue::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single()),
        _ => None,
    };
    parsed.ok_or_else(|| LicenseError::InvalidTimestamp(value.to_string()))
}

fn parse_str(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    let midnight = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()?
        .and_hms_opt(0, 0, 0)?;
    Some(Utc.from_utc_datetime(&midnight))
}

/// Whole days left until `expires_at`, rounded up.
///
/// Returns `Err(Expired)` unless `expires_at` is strictly after `now`, so a
/// successful result is always at least 1.
pub fn days_remaining(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> LicenseResult<i64> {
    if expires_at <= now {
        return Err(LicenseError::Expired(expires_at));
    }
    let millis = (expires_at - now).num_milliseconds();
    Ok((millis + MS_PER_DAY - 1) / MS_PER_DAY)
}
