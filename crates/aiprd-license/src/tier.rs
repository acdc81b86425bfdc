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

//! License tiers.

use crate::error::LicenseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Entitlement level driving which features are unlocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Free,
    Trial,
    Licensed,
}

impl Tier {
    /// All tiers, lowest first.
    pub const ALL: [Tier; 3] = [Tier::Free, Tier::Trial, Tier::Licensed];

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Free => "free",
            Tier::Trial => "trial",
            Tier::Licensed => "licensed",
        }
    }

    /// Parse a tier name, treating anything unrecognised as [`Tier::Free`].
    pub fn from_name_lossy(name: &str) -> Self {
        name.parse().unwrap_or(Tier::Free)
    }

    /// Whether this tier unlocks the full feature baseline.
    pub fn is_paid(self) -> bool {
        matches!(self, Tier::Trial | Tier::Licensed)
    }
}

impl FromStr for Tier {
    type Err = LicenseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "free" => Ok(Tier::Free),
            "trial" => Ok(Tier::Trial),
            "licensed" => Ok(Tier::Licensed),
            other => Err(LicenseError::InvalidTier(other.to_string())),
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
