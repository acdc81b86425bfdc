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

//! License tools: validate_license, get_license_features, list_available_strategies.

use super::helpers::{non_empty, parse_args};
use super::types::LicenseFeaturesArgs;
use super::ToolContext;
use crate::error::McpResult;
use aiprd_license::features::free_strategies;
use aiprd_license::{features_for_tier, Tier};
use serde_json::{json, Value as JsonValue};

/// Execute validate_license tool.
///
/// Runs a fresh resolution and returns the license state as-is.
pub async fn execute_validate_license(
    ctx: &ToolContext,
    _arguments: Option<JsonValue>,
) -> McpResult<JsonValue> {
    let state = ctx.license.resolve().await;
    Ok(serde_json::to_value(state)?)
}

/// Execute get_license_features tool.
///
/// The requested tier is echoed back verbatim; an unrecognised name gets the
/// free profile.
pub async fn execute_get_license_features(
    ctx: &ToolContext,
    arguments: Option<JsonValue>,
) -> McpResult<JsonValue> {
    let args: LicenseFeaturesArgs = parse_args(arguments)?;

    let tier_name = match non_empty(args.tier) {
        Some(name) => name,
        None => ctx.license.resolve().await.tier.as_str().to_string(),
    };
    let profile = features_for_tier(Tier::from_name_lossy(&tier_name), &ctx.config);

    Ok(json!({
        "tier": tier_name,
        "features": profile,
        "environment": ctx.environment
    }))
}

/// Execute list_available_strategies tool.
pub async fn execute_list_available_strategies(
    ctx: &ToolContext,
    _arguments: Option<JsonValue>,
) -> McpResult<JsonValue> {
    let tier = ctx.license.resolve().await.tier;

    let catalog = ctx
        .config
        .string_list(&["thinking", "available_strategies"])
        .unwrap_or_default();
    let prioritization = ctx
        .config
        .lookup(&["thinking", "strategy_prioritization"])
        .cloned()
        .unwrap_or_else(|| json!({}));

    let (strategies, locked) = if tier.is_paid() {
        (catalog.clone(), Vec::new())
    } else {
        let free = free_strategies(&ctx.config);
        // Catalog order is preserved for the locked list
        let locked: Vec<String> = catalog
            .iter()
            .filter(|s| !free.contains(s))
            .cloned()
            .collect();
        (free, locked)
    };

    Ok(json!({
        "tier": tier,
        "total_available": strategies.len(),
        "total_strategies": catalog.len(),
        "strategies": strategies,
        "locked": locked,
        "prioritization": prioritization
    }))
}
