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

//! AI PRD Builder MCP Server binary.
//!
//! Serves the plugin's license and configuration tools to an MCP host over
//! line-delimited JSON-RPC on stdio.
//!
//! # Usage
//!
//! ```bash
//! # Run with locations taken from the environment
//! aiprd-mcp
//!
//! # Run against an explicit plugin installation
//! aiprd-mcp --plugin-root /opt/ai-prd-builder --engine-home ~/.aiprd
//!
//! # Run with debug logging
//! RUST_LOG=debug aiprd-mcp
//! ```
//!
//! # Available Tools
//!
//! - `validate_license`: Resolve the active license tier
//! - `get_license_features`: Feature profile for a tier
//! - `get_config`: Plugin configuration summary
//! - `read_skill_config`: Read one section of the skill configuration
//! - `check_health`: Installation health snapshot
//! - `get_prd_context_info`: PRD context type catalog and gating
//! - `list_available_strategies`: Thinking strategies for the active tier

use aiprd_license::{EnginePaths, Environment, SkillConfig};
use aiprd_mcp::{McpServer, McpServerConfig};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "aiprd-mcp")]
#[command(author = "Dweve B.V.")]
#[command(version)]
#[command(about = "AI PRD Builder Model Context Protocol (MCP) Server")]
struct Cli {
    /// Plugin installation directory [env: CLAUDE_PLUGIN_ROOT]
    #[arg(long)]
    plugin_root: Option<PathBuf>,

    /// Engine home holding the validator and engine-level license files [env: AIPRD_ENGINE_HOME]
    #[arg(long)]
    engine_home: Option<PathBuf>,

    /// Skill configuration document [env: AIPRD_SKILL_CONFIG]
    #[arg(long)]
    skill_config: Option<PathBuf>,

    /// Seconds to wait for the external license validator
    #[arg(long, default_value_t = 5)]
    validator_timeout_secs: u64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr; stdout carries protocol frames only
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("aiprd_mcp=info".parse().expect("valid log directive"))
                .add_directive("aiprd_license=info".parse().expect("valid log directive")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let paths = EnginePaths::resolve(cli.plugin_root, cli.engine_home, cli.skill_config);
    let skill_config = match SkillConfig::load(&paths.skill_config) {
        Ok(config) => config,
        Err(e) => {
            warn!("Skill configuration unavailable, using empty config: {}", e);
            SkillConfig::default()
        }
    };

    let config = McpServerConfig {
        paths,
        environment: Environment::detect(),
        validator_timeout: Duration::from_secs(cli.validator_timeout_secs),
        ..Default::default()
    };

    let mut server = McpServer::new(config, skill_config);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(server.run_stdio());
    // The stdin reader parks a blocking thread that would otherwise delay exit
    runtime.shutdown_background();

    info!("AI PRD Builder MCP Server stopped");
    result?;
    Ok(())
}
