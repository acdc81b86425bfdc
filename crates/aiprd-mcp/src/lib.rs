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

//! AI PRD Builder Model Context Protocol (MCP) Server
//!
//! This crate exposes the AI PRD Builder plugin's license and configuration
//! tools to an MCP host over line-delimited JSON-RPC on stdio. Key features:
//!
//! - **Validate the license** through the external validator or local files
//! - **Report tier features** derived from the skill configuration
//! - **Read the skill configuration** by section, with discovery
//! - **Gate strategies and PRD contexts** by the active tier
//! - **Check health** of the plugin installation

mod error;
pub mod framing;
mod protocol;
mod server;
pub mod tools;

pub use error::{McpError, McpResult};
pub use framing::LineBuffer;
pub use protocol::*;
pub use server::{McpServer, McpServerConfig};
pub use tools::{get_tools, ToolContext, ToolName, ToolRegistry};

/// MCP Server version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Server name for MCP protocol
pub const SERVER_NAME: &str = "ai-prd-builder";

/// MCP protocol revision advertised during `initialize`.
pub const PROTOCOL_VERSION: &str = "2024-11-05";
