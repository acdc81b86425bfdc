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

//! License resolution fallback chain.
//!
//! Sources are tried in strict priority order and the first one accepted
//! wins:
//!
//! 1. **External validator** (`<engine_home>/validate-license`), run with a
//!    bounded timeout. Missing binary, spawn failure, non-zero exit, timeout,
//!    malformed output and expired reports are one failure class.
//! 2. **License files**, scanned in order. An existing but expired or
//!    malformed file does not stop the scan.
//! 3. **Trial file** (`<engine_home>/trial.json`), tier forced to `trial`.
//! 4. **Free default**.
//!
//! Nothing is cached: every call re-reads the files and re-runs the validator.

use crate::environment::Environment;
use crate::error::{LicenseError, LicenseResult};
use crate::paths::LicensePaths;
use crate::state::{LicenseState, SourceTag};
use crate::tier::Tier;
use crate::timestamp::{far_future, parse_timestamp};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, warn};

/// How long the external validator may run.
pub const DEFAULT_VALIDATOR_TIMEOUT: Duration = Duration::from_secs(5);

/// Anything that can produce the current license state.
///
/// Resolution never fails; implementations degrade to a free-tier state.
#[async_trait]
pub trait LicenseProvider: Send + Sync {
    async fn resolve(&self) -> LicenseState;
}

/// Resolves the license state from the validator, local files, or defaults.
#[derive(Debug, Clone)]
pub struct LicenseResolver {
    paths: LicensePaths,
    environment: Environment,
    validator_timeout: Duration,
}

/// Validator stdout. Only `tier` is mandatory.
#[derive(Debug, Deserialize)]
struct ValidatorReport {
    tier: String,
    #[serde(default)]
    features: Option<Vec<String>>,
    #[serde(default)]
    signature_verified: bool,
    #[serde(default)]
    hardware_verified: bool,
    #[serde(default)]
    expires_at: Option<JsonValue>,
}

#[derive(Debug, Deserialize)]
struct LicenseFile {
    #[serde(default)]
    tier: Option<String>,
    #[serde(default)]
    expires_at: Option<JsonValue>,
    #[serde(default)]
    enabled_features: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct TrialFile {
    #[serde(default)]
    trial_expires_at: Option<JsonValue>,
    #[serde(default)]
    expires_at: Option<JsonValue>,
}

impl LicenseResolver {
    pub fn new(paths: LicensePaths, environment: Environment) -> Self {
        Self {
            paths,
            environment,
            validator_timeout: DEFAULT_VALIDATOR_TIMEOUT,
        }
    }

    /// Override the validator timeout.
    pub fn with_validator_timeout(mut self, timeout: Duration) -> Self {
        self.validator_timeout = timeout;
        self
    }

    pub fn paths(&self) -> &LicensePaths {
        &self.paths
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// Whether the external validator binary is installed.
    ///
    /// Existence check only; the validator is not run.
    pub fn validator_available(&self) -> bool {
        self.paths.validator.exists()
    }

    /// Run the full fallback chain.
    pub async fn resolve(&self) -> LicenseState {
        if self.validator_available() {
            match self.run_validator().await {
                Ok(state) => return state,
                Err(e) => warn!(
                    "External validator failed, falling back to in-plugin validation: {}",
                    e
                ),
            }
        }

        self.resolve_local(Utc::now())
    }

    /// Local sources only (license files, trial file, free default), evaluated
    /// against `now`.
    pub fn resolve_local(&self, now: DateTime<Utc>) -> LicenseState {
        for candidate in &self.paths.license_candidates {
            if !candidate.exists() {
                continue;
            }
            match self.read_license_file(candidate, now) {
                Ok(state) => return state,
                Err(e) => debug!("Skipping license file {}: {}", candidate.display(), e),
            }
        }

        if self.paths.trial.exists() {
            match self.read_trial_file(&self.paths.trial, now) {
                Ok(state) => return state,
                Err(e) => debug!("Skipping trial file {}: {}", self.paths.trial.display(), e),
            }
        }

        LicenseState::default_free(self.environment)
    }

    async fn run_validator(&self) -> LicenseResult<LicenseState> {
        let mut cmd = Command::new(&self.paths.validator);
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = tokio::time::timeout(self.validator_timeout, cmd.output())
            .await
            .map_err(|_| LicenseError::ValidatorTimeout(self.validator_timeout))??;

        if !output.status.success() {
            return Err(LicenseError::ValidatorFailed(output.status));
        }

        let report: ValidatorReport = serde_json::from_slice(&output.stdout)?;
        let tier: Tier = report.tier.parse()?;

        let mut state = match report.expires_at.filter(|v| !v.is_null()) {
            Some(raw) => LicenseState::expiring(
                tier,
                report.features,
                parse_timestamp(&raw)?,
                Utc::now(),
                SourceTag::ExternalBinary,
                self.environment,
            )?,
            None => LicenseState::perpetual(
                tier,
                report.features,
                SourceTag::ExternalBinary,
                self.environment,
            ),
        };
        state.signature_verified = report.signature_verified;
        state.hardware_verified = report.hardware_verified;

        debug!("External validator accepted tier {}", state.tier);
        Ok(state)
    }

    fn read_license_file(&self, path: &Path, now: DateTime<Utc>) -> LicenseResult<LicenseState> {
        let raw = std::fs::read_to_string(path)?;
        let file: LicenseFile = serde_json::from_str(&raw)?;

        let tier: Tier = match file.tier.as_deref() {
            None | Some("") => return Err(LicenseError::MissingTier),
            Some(name) => name.parse()?,
        };
        let expires_at = match file.expires_at.filter(|v| !v.is_null()) {
            Some(raw) => parse_timestamp(&raw)?,
            None => far_future(),
        };

        LicenseState::expiring(
            tier,
            file.enabled_features,
            expires_at,
            now,
            SourceTag::LicenseFile,
            self.environment,
        )
    }

    fn read_trial_file(&self, path: &Path, now: DateTime<Utc>) -> LicenseResult<LicenseState> {
        let raw = std::fs::read_to_string(path)?;
        let file: TrialFile = serde_json::from_str(&raw)?;

        let expires_at = match file
            .trial_expires_at
            .filter(|v| !v.is_null())
            .or(file.expires_at.filter(|v| !v.is_null()))
        {
            Some(raw) => parse_timestamp(&raw)?,
            None => Utc
                .timestamp_millis_opt(0)
                .single()
                .unwrap_or(DateTime::<Utc>::MIN_UTC),
        };

        LicenseState::expiring(
            Tier::Trial,
            None,
            expires_at,
            now,
            SourceTag::Trial,
            self.environment,
        )
    }
}

#[async_trait]
impl LicenseProvider for LicenseResolver {
    async fn resolve(&self) -> LicenseState {
        LicenseResolver::resolve(self).await
    }
}
