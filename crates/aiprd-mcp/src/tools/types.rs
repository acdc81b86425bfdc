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

//! Shared types for MCP tools.

use serde::Deserialize;

// ============ Argument Structures ============

#[derive(Debug, Default, Deserialize)]
pub struct LicenseFeaturesArgs {
    #[serde(default)]
    pub tier: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ReadSkillConfigArgs {
    #[serde(default)]
    pub section: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PrdContextArgs {
    #[serde(default)]
    pub context_type: Option<String>,
}

// ============ Tool Constants ============

/// Reported when the skill configuration has no `name`.
pub const DEFAULT_PLUGIN_NAME: &str = "AI PRD Builder";

/// Reported when the skill configuration has no `version`.
pub const UNKNOWN_VERSION: &str = "unknown";
