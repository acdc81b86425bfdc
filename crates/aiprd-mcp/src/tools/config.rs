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

//! Configuration tools: get_config, read_skill_config, check_health,
//! get_prd_context_info.

use super::helpers::{non_empty, parse_args};
use super::types::{PrdContextArgs, ReadSkillConfigArgs, DEFAULT_PLUGIN_NAME, UNKNOWN_VERSION};
use super::ToolContext;
use crate::error::McpResult;
use aiprd_license::features::free_contexts;
use chrono::{SecondsFormat, Utc};
use serde_json::{json, Value as JsonValue};

/// Execute get_config tool.
pub fn execute_get_config(ctx: &ToolContext, _arguments: Option<JsonValue>) -> McpResult<JsonValue> {
    let config = &ctx.config;

    Ok(json!({
        "version": config.str_at(&["version"]).unwrap_or(UNKNOWN_VERSION),
        "name": config.str_at(&["name"]).unwrap_or(DEFAULT_PLUGIN_NAME),
        "environment": ctx.environment,
        "engine_home": ctx.paths.engine_home.display().to_string(),
        "plugin_root": ctx.paths.plugin_root.display().to_string(),
        "prd_contexts": list_or_empty(config.lookup(&["prd_contexts", "available"])),
        "supported_providers": list_or_empty(config.lookup(&["providers", "supported"]))
    }))
}

/// Execute read_skill_config tool.
///
/// An unknown or absent section lists what is available instead of failing.
pub fn execute_read_skill_config(
    ctx: &ToolContext,
    arguments: Option<JsonValue>,
) -> McpResult<JsonValue> {
    let args: ReadSkillConfigArgs = parse_args(arguments)?;

    if let Some(name) = non_empty(args.section) {
        if let Some(data) = ctx.config.section(&name) {
            return Ok(json!({
                "section": name,
                "data": data
            }));
        }
    }

    Ok(json!({
        "available_sections": ctx.config.section_names(),
        "hint": "Pass a section name to read its contents"
    }))
}

/// Execute check_health tool.
///
/// Only checks that the validator exists; it is never run from here.
pub fn execute_check_health(ctx: &ToolContext, _arguments: Option<JsonValue>) -> McpResult<JsonValue> {
    let validator_available = ctx.paths.validator().exists();
    let license_mode = if validator_available {
        "external_binary"
    } else {
        "in_plugin"
    };

    Ok(json!({
        "status": "ok",
        "version": ctx.config.str_at(&["version"]).unwrap_or(UNKNOWN_VERSION),
        "environment": ctx.environment,
        "skill_config_loaded": !ctx.config.is_empty(),
        "external_validator_available": validator_available,
        "license_mode": license_mode,
        "engine_home": ctx.paths.engine_home.display().to_string(),
        "plugin_root": ctx.paths.plugin_root.display().to_string(),
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
    }))
}

/// Execute get_prd_context_info tool.
pub async fn execute_get_prd_context_info(
    ctx: &ToolContext,
    arguments: Option<JsonValue>,
) -> McpResult<JsonValue> {
    let args: PrdContextArgs = parse_args(arguments)?;
    let available = list_or_empty(ctx.config.lookup(&["prd_contexts", "available"]));
    let catalog = ctx.config.object_at(&["prd_contexts", "configurations"]);

    if let (Some(context_type), Some(catalog)) = (non_empty(args.context_type), catalog) {
        let Some(configuration) = catalog.get(&context_type) else {
            return Ok(json!({
                "error": format!("unknown context type '{}'", context_type),
                "available": available
            }));
        };

        let tier = ctx.license.resolve().await.tier;
        let requires_license = !free_contexts(&ctx.config).contains(&context_type);

        return Ok(json!({
            "context_type": context_type,
            "configuration": configuration,
            "requires_license": requires_license,
            "current_tier": tier
        }));
    }

    Ok(json!({
        "available_contexts": available,
        "configurations": catalog.cloned().unwrap_or_default()
    }))
}

fn list_or_empty(value: Option<&JsonValue>) -> JsonValue {
    value.cloned().unwrap_or_else(|| json!([]))
}
