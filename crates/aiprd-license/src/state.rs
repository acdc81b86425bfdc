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

//! Resolved license snapshot.

use crate::environment::Environment;
use crate::error::LicenseResult;
use crate::features::licensed_feature_ids;
use crate::tier::Tier;
use crate::timestamp::days_remaining;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which resolution step produced a [`LicenseState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceTag {
    ExternalBinary,
    LicenseFile,
    Trial,
    DefaultFree,
}

/// The entitlement snapshot returned to every caller.
///
/// `expires_at` and `days_remaining` are either both set or both `None`, and
/// `days_remaining` is never negative: [`LicenseState::expiring`] refuses to
/// build a state for an expiry that is not in the future.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LicenseState {
    pub tier: Tier,
    pub features: Vec<String>,
    pub signature_verified: bool,
    pub hardware_verified: bool,
    pub expires_at: Option<DateTime<Utc>>,
    pub days_remaining: Option<i64>,
    pub source: SourceTag,
    pub environment: Environment,
    /// Reserved for diagnostics; currently always empty.
    pub errors: Vec<String>,
}

impl LicenseState {
    /// Free tier fallback used when no other source is accepted.
    pub fn default_free(environment: Environment) -> Self {
        Self {
            tier: Tier::Free,
            features: Vec::new(),
            signature_verified: false,
            hardware_verified: false,
            expires_at: None,
            days_remaining: None,
            source: SourceTag::DefaultFree,
            environment,
            errors: Vec::new(),
        }
    }

    /// A state without an expiry.
    pub fn perpetual(
        tier: Tier,
        features: Option<Vec<String>>,
        source: SourceTag,
        environment: Environment,
    ) -> Self {
        Self {
            tier,
            features: features.unwrap_or_else(|| default_features(tier)),
            signature_verified: false,
            hardware_verified: false,
            expires_at: None,
            days_remaining: None,
            source,
            environment,
            errors: Vec::new(),
        }
    }

    /// A state with an expiry, validated against `now`.
    ///
    /// `features` falls back to the tier's default capability list.
    pub fn expiring(
        tier: Tier,
        features: Option<Vec<String>>,
        expires_at: DateTime<Utc>,
        now: DateTime<Utc>,
        source: SourceTag,
        environment: Environment,
    ) -> LicenseResult<Self> {
        let days = days_remaining(expires_at, now)?;
        Ok(Self {
            tier,
            features: features.unwrap_or_else(|| default_features(tier)),
            signature_verified: false,
            hardware_verified: false,
            expires_at: Some(expires_at),
            days_remaining: Some(days),
            source,
            environment,
            errors: Vec::new(),
        })
    }
}

fn default_features(tier: Tier) -> Vec<String> {
    licensed_feature_ids(tier)
        .iter()
        .map(|f| f.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_default_free_shape() {
        let state = LicenseState::default_free(Environment::Cli);
        assert_eq!(state.tier, Tier::Free);
        assert_eq!(state.source, SourceTag::DefaultFree);
        assert!(state.features.is_empty());
        assert!(state.expires_at.is_none());
        assert!(state.days_remaining.is_none());
        assert!(state.errors.is_empty());
    }

    #[test]
    fn test_expiring_uses_default_features() {
        let now = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        let state = LicenseState::expiring(
            Tier::Trial,
            None,
            now + Duration::days(10),
            now,
            SourceTag::Trial,
            Environment::Cowork,
        )
        .unwrap();

        assert_eq!(state.features.len(), 7);
        assert_eq!(state.days_remaining, Some(10));
        assert_eq!(state.environment, Environment::Cowork);
    }

    #[test]
    fn test_expiring_rejects_past() {
        let now = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        let result = LicenseState::expiring(
            Tier::Licensed,
            Some(vec!["vision_engine".to_string()]),
            now - Duration::seconds(1),
            now,
            SourceTag::LicenseFile,
            Environment::Cli,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_serialized_field_names() {
        let state = LicenseState::default_free(Environment::Cowork);
        let value = serde_json::to_value(&state).unwrap();

        assert_eq!(value["tier"], "free");
        assert_eq!(value["source"], "default_free");
        assert_eq!(value["environment"], "cowork");
        assert!(value["expires_at"].is_null());
        assert!(value["days_remaining"].is_null());
        assert_eq!(value["errors"], serde_json::json!([]));
    }
}
