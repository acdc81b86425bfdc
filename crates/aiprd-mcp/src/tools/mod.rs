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

//! AI PRD Builder tools for MCP server.
//!
//! Available tools:
//! - `validate_license`: Resolve the active license tier
//! - `get_license_features`: Feature profile for a tier
//! - `get_config`: Plugin configuration summary
//! - `read_skill_config`: Read one section of the skill configuration
//! - `check_health`: Installation health snapshot
//! - `get_prd_context_info`: PRD context type catalog and gating
//! - `list_available_strategies`: Thinking strategies for the active tier

mod config;
mod helpers;
mod license;
#[macro_use]
mod schema_macros;
mod types;

pub use config::{
    execute_check_health, execute_get_config, execute_get_prd_context_info,
    execute_read_skill_config,
};
pub use license::{
    execute_get_license_features, execute_list_available_strategies, execute_validate_license,
};

use crate::error::{McpError, McpResult};
use crate::protocol::Tool;
use aiprd_license::{EnginePaths, Environment, LicenseProvider, SkillConfig};
use serde_json::Value as JsonValue;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// The seven tools this server exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolName {
    ValidateLicense,
    GetLicenseFeatures,
    GetConfig,
    ReadSkillConfig,
    CheckHealth,
    GetPrdContextInfo,
    ListAvailableStrategies,
}

impl ToolName {
    /// All tools, in the order `tools/list` reports them.
    pub const ALL: [ToolName; 7] = [
        ToolName::ValidateLicense,
        ToolName::GetLicenseFeatures,
        ToolName::GetConfig,
        ToolName::ReadSkillConfig,
        ToolName::CheckHealth,
        ToolName::GetPrdContextInfo,
        ToolName::ListAvailableStrategies,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ToolName::ValidateLicense => "validate_license",
            ToolName::GetLicenseFeatures => "get_license_features",
            ToolName::GetConfig => "get_config",
            ToolName::ReadSkillConfig => "read_skill_config",
            ToolName::CheckHealth => "check_health",
            ToolName::GetPrdContextInfo => "get_prd_context_info",
            ToolName::ListAvailableStrategies => "list_available_strategies",
        }
    }
}

impl FromStr for ToolName {
    type Err = McpError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        ToolName::ALL
            .into_iter()
            .find(|tool| tool.as_str() == name)
            .ok_or_else(|| McpError::ToolNotFound(name.to_string()))
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything a tool handler may read.
///
/// The skill configuration is loaded once at startup; the license is resolved
/// again on every call through `license`.
#[derive(Clone)]
pub struct ToolContext {
    pub config: Arc<SkillConfig>,
    pub paths: EnginePaths,
    pub environment: Environment,
    pub license: Arc<dyn LicenseProvider>,
}

/// Tool catalog bound to the shared handler context.
pub struct ToolRegistry {
    context: ToolContext,
    tools: Vec<Tool>,
}

impl ToolRegistry {
    pub fn new(context: ToolContext) -> Self {
        Self {
            context,
            tools: get_tools(),
        }
    }

    /// Tool definitions for `tools/list`.
    pub fn tools(&self) -> &[Tool] {
        &self.tools
    }

    pub fn context(&self) -> &ToolContext {
        &self.context
    }

    /// Execute a tool by name.
    pub async fn execute(&self, name: &str, arguments: Option<JsonValue>) -> McpResult<JsonValue> {
        let tool: ToolName = name.parse()?;
        self.call(tool, arguments).await
    }

    /// Execute a known tool.
    pub async fn call(&self, tool: ToolName, arguments: Option<JsonValue>) -> McpResult<JsonValue> {
        let ctx = &self.context;
        match tool {
            ToolName::ValidateLicense => execute_validate_license(ctx, arguments).await,
            ToolName::GetLicenseFeatures => execute_get_license_features(ctx, arguments).await,
            ToolName::GetConfig => execute_get_config(ctx, arguments),
            ToolName::ReadSkillConfig => execute_read_skill_config(ctx, arguments),
            ToolName::CheckHealth => execute_check_health(ctx, arguments),
            ToolName::GetPrdContextInfo => execute_get_prd_context_info(ctx, arguments).await,
            ToolName::ListAvailableStrategies => {
                execute_list_available_strategies(ctx, arguments).await
            }
        }
    }
}

/// Get all available tools.
pub fn get_tools() -> Vec<Tool> {
    ToolName::ALL
        .into_iter()
        .map(|tool| Tool {
            name: tool.as_str().to_string(),
            description: description(tool).to_string(),
            input_schema: input_schema(tool),
        })
        .collect()
}

fn description(tool: ToolName) -> &'static str {
    match tool {
        ToolName::ValidateLicense => "Validate the current license tier. Returns tier, features, and validation details. Works in both CLI (external binary) and Cowork (in-plugin) modes.",
        ToolName::GetLicenseFeatures => "Get the full feature set available for a given license tier.",
        ToolName::GetConfig => "Get the full plugin configuration.",
        ToolName::ReadSkillConfig => "Read a specific section of the skill configuration.",
        ToolName::CheckHealth => "Check the health of the MCP server and its dependencies.",
        ToolName::GetPrdContextInfo => "Get configuration details for a specific PRD context type.",
        ToolName::ListAvailableStrategies => "List thinking strategies available for the current license tier.",
    }
}

fn input_schema(tool: ToolName) -> JsonValue {
    match tool {
        ToolName::GetLicenseFeatures => tool_schema! {
            required: [],
            properties: {
                tier: schema_enum!(["free", "trial", "licensed"], "The license tier to query features for")
            }
        },
        ToolName::ReadSkillConfig => tool_schema! {
            required: [],
            properties: {
                section: schema_string!("Config section to read (e.g. 'license', 'prd_contexts', 'thinking', 'verification')")
            }
        },
        ToolName::GetPrdContextInfo => tool_schema! {
            required: [],
            properties: {
                context_type: schema_enum!(
                    ["proposal", "feature", "bug", "incident", "poc", "mvp", "release", "cicd"],
                    "The PRD context type to query"
                )
            }
        },
        ToolName::ValidateLicense
        | ToolName::GetConfig
        | ToolName::CheckHealth
        | ToolName::ListAvailableStrategies => tool_schema!(),
    }
}

#[cfg(test)]
pub(crate) fn test_context(config: JsonValue, tier: aiprd_license::Tier) -> ToolContext {
    use aiprd_license::{LicenseState, SourceTag};
    use async_trait::async_trait;
    use std::path::Path;

    struct FixedLicense(aiprd_license::Tier);

    #[async_trait]
    impl LicenseProvider for FixedLicense {
        async fn resolve(&self) -> LicenseState {
            LicenseState::perpetual(self.0, None, SourceTag::LicenseFile, Environment::Cli)
        }
    }

    ToolContext {
        config: Arc::new(SkillConfig::from_value(config).expect("object config")),
        paths: EnginePaths::rooted_at(Path::new("/nonexistent/aiprd-test")),
        environment: Environment::Cli,
        license: Arc::new(FixedLicense(tier)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aiprd_license::Tier;
    use serde_json::json;

    #[test]
    fn test_get_tools_returns_all_tools() {
        let tools = get_tools();
        assert_eq!(tools.len(), 7);

        let names: Vec<&str> = tools.iter().map(|t| t.name.as_str()).collect();
        assert!(names.contains(&"validate_license"));
        assert!(names.contains(&"list_available_strategies"));
    }

    #[test]
    fn test_tool_schemas_valid() {
        for tool in get_tools() {
            assert!(!tool.description.is_empty(), "{} has no description", tool.name);
            assert_eq!(tool.input_schema["type"], "object");
            assert!(tool.input_schema["properties"].is_object());
            assert_eq!(tool.input_schema["required"], json!([]));
        }
    }

    #[test]
    fn test_tool_name_round_trip() {
        for tool in ToolName::ALL {
            assert_eq!(tool.as_str().parse::<ToolName>().unwrap(), tool);
        }
    }

    #[tokio::test]
    async fn test_execute_tool_unknown() {
        let registry = ToolRegistry::new(test_context(json!({}), Tier::Free));
        let err = registry.execute("nonexistent_tool", None).await.unwrap_err();
        assert!(matches!(err, McpError::ToolNotFound(_)));
        assert_eq!(err.to_string(), "Unknown tool: nonexistent_tool");
    }

    #[tokio::test]
    async fn test_execute_validate_license() {
        let registry = ToolRegistry::new(test_context(json!({}), Tier::Trial));
        let result = registry.execute("validate_license", None).await.unwrap();

        assert_eq!(result["tier"], "trial");
        assert_eq!(result["source"], "license_file");
        assert_eq!(result["features"].as_array().unwrap().len(), 7);
    }
}
