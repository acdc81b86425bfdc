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

//! Error types for license resolution and configuration loading.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Why a single resolution source was rejected.
///
/// These never reach callers of [`crate::LicenseResolver::resolve`]; the
/// resolver logs them and moves on to the next source.
#[derive(Error, Debug)]
pub enum LicenseError {
    /// IO error while reading a candidate or spawning the validator.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Candidate content is not valid JSON or has the wrong shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// External validator exited unsuccessfully.
    #[error("validator exited with {0}")]
    ValidatorFailed(std::process::ExitStatus),

    /// External validator did not finish in time.
    #[error("validator timed out after {0:?}")]
    ValidatorTimeout(Duration),

    /// Tier name outside free/trial/licensed.
    #[error("unknown tier: {0}")]
    InvalidTier(String),

    /// Candidate has no usable tier field.
    #[error("missing tier")]
    MissingTier,

    /// Expiry value could not be read as a timestamp.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// Candidate expired.
    #[error("expired at {0}")]
    Expired(chrono::DateTime<chrono::Utc>),
}

/// Result type for a single resolution source.
pub type LicenseResult<T> = Result<T, LicenseError>;

/// Skill configuration loading error.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid JSON.
    #[error("could not parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Top-level value is not a JSON object.
    #[error("{0} does not contain a JSON object")]
    NotAnObject(PathBuf),
}
