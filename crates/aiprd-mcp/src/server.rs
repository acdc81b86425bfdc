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

//! MCP Server implementation.

use crate::error::{McpError, McpResult};
use crate::framing::LineBuffer;
use crate::protocol::*;
use crate::tools::{ToolContext, ToolRegistry};
use crate::{PROTOCOL_VERSION, SERVER_NAME, VERSION};
use aiprd_license::{
    EnginePaths, Environment, LicenseResolver, SkillConfig, DEFAULT_VALIDATOR_TIMEOUT,
};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, error, info, warn};

/// Bytes requested from stdin per read.
const READ_CHUNK_SIZE: usize = 8 * 1024;

/// MCP Server configuration.
///
/// Server metadata plus the resolved locations the license resolver and the
/// tools read from.
#[derive(Debug, Clone)]
pub struct McpServerConfig {
    /// Server name reported in protocol handshake.
    pub name: String,

    /// Server version reported in protocol handshake.
    ///
    /// Replaced by the skill configuration's `version` when it has one.
    pub version: String,

    /// Plugin root, engine home and skill config locations.
    pub paths: EnginePaths,

    /// Launch context label.
    pub environment: Environment,

    /// Upper bound on one external validator run.
    pub validator_timeout: Duration,
}

impl Default for McpServerConfig {
    fn default() -> Self {
        Self {
            name: SERVER_NAME.to_string(),
            version: VERSION.to_string(),
            paths: EnginePaths::resolve(None, None, None),
            environment: Environment::detect(),
            validator_timeout: DEFAULT_VALIDATOR_TIMEOUT,
        }
    }
}

/// AI PRD Builder MCP Server.
///
/// Speaks line-delimited JSON-RPC 2.0 over stdio. Messages are handled one at
/// a time in arrival order; each response is written and flushed before the
/// next message is looked at.
pub struct McpServer {
    /// Server configuration including paths and metadata.
    config: McpServerConfig,

    /// Unfinished input carried between reads.
    buffer: LineBuffer,

    /// Tool catalog and handler context.
    registry: ToolRegistry,
}

impl McpServer {
    /// Create a server backed by the real license resolver.
    ///
    /// # Examples
    ///
    /// ```
    /// use aiprd_license::SkillConfig;
    /// use aiprd_mcp::{McpServer, McpServerConfig};
    ///
    /// let server = McpServer::new(McpServerConfig::default(), SkillConfig::default());
    /// assert_eq!(server.config().name, "ai-prd-builder");
    /// ```
    pub fn new(config: McpServerConfig, skill_config: SkillConfig) -> Self {
        let resolver = LicenseResolver::new(config.paths.license_paths(), config.environment)
            .with_validator_timeout(config.validator_timeout);

        let context = ToolContext {
            config: Arc::new(skill_config),
            paths: config.paths.clone(),
            environment: config.environment,
            license: Arc::new(resolver),
        };

        Self::with_registry(config, ToolRegistry::new(context))
    }

    /// Create a server around an existing tool registry.
    pub fn with_registry(mut config: McpServerConfig, registry: ToolRegistry) -> Self {
        if let Some(version) = registry.context().config.str_at(&["version"]) {
            config.version = version.to_string();
        }

        Self {
            config,
            buffer: LineBuffer::new(),
            registry,
        }
    }

    pub fn config(&self) -> &McpServerConfig {
        &self.config
    }

    /// Run the server on stdin/stdout until EOF or a termination signal.
    pub async fn run_stdio(&mut self) -> McpResult<()> {
        info!(
            environment = %self.config.environment,
            "AI PRD Builder MCP Server starting on stdio"
        );

        let stdin = tokio::io::stdin();
        let stdout = tokio::io::stdout();

        tokio::select! {
            result = self.serve(stdin, stdout) => result,
            _ = shutdown_signal() => {
                info!("Termination signal received, shutting down");
                Ok(())
            }
        }
    }

    /// Serve one transport until its input is exhausted.
    ///
    /// # Errors
    ///
    /// Returns an error if a response cannot be written. Read errors end the
    /// loop cleanly.
    pub async fn serve<R, W>(&mut self, mut reader: R, mut writer: W) -> McpResult<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut chunk = vec![0u8; READ_CHUNK_SIZE];
        loop {
            match reader.read(&mut chunk).await {
                Ok(0) => {
                    info!("Input closed, shutting down");
                    break;
                }
                Ok(n) => {
                    self.process_chunk(&chunk[..n], &mut writer).await?;
                }
                Err(e) => {
                    error!("Read error: {}", e);
                    break;
                }
            }
        }

        Ok(())
    }

    /// Frame a chunk and answer every complete message in it, in order.
    ///
    /// Returns the number of responses written.
    pub async fn process_chunk<W>(&mut self, chunk: &[u8], writer: &mut W) -> McpResult<usize>
    where
        W: AsyncWrite + Unpin,
    {
        let mut written = 0;
        for line in self.buffer.push(chunk) {
            debug!("Received: {}", line);

            let Some(response) = self.handle_message(&line).await else {
                continue;
            };
            let response_str = serde_json::to_string(&response)?;
            debug!("Sending: {}", response_str);
            writer.write_all(response_str.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
            written += 1;
        }
        Ok(written)
    }

    /// Parse and dispatch one framed message.
    ///
    /// Lines that are not a JSON object are logged and dropped without a
    /// reply. Any object is dispatched, whatever its `method` holds.
    pub async fn handle_message(&self, line: &str) -> Option<JsonRpcResponse> {
        let parsed = serde_json::from_str::<Value>(line).and_then(|value| {
            if value.is_object() {
                serde_json::from_value::<JsonRpcRequest>(value)
            } else {
                Err(serde::de::Error::custom("message is not a JSON object"))
            }
        });

        match parsed {
            Ok(request) => self.handle_request(request).await,
            Err(e) => {
                warn!("Failed to parse message: {}", e);
                None
            }
        }
    }

    /// Handle a single JSON-RPC request.
    ///
    /// # Supported Methods
    ///
    /// - `initialize` - Protocol handshake
    /// - `notifications/initialized` - Acknowledged silently
    /// - `tools/list` - List available tools
    /// - `tools/call` - Execute a specific tool
    ///
    /// Unknown methods get a "Method not found" error (-32601) when they carry
    /// an id and are ignored otherwise.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let id = request.id.clone();

        match request.method.as_str() {
            "initialize" => Some(self.handle_initialize(id)),
            "notifications/initialized" => {
                debug!("Client sent initialized notification");
                None
            }
            "tools/list" => Some(self.handle_tools_list(id)),
            "tools/call" => Some(self.handle_tools_call(id, request.params).await),
            method if request.is_notification() => {
                debug!("Ignoring notification: {}", method);
                None
            }
            method => {
                warn!("Unknown method: {}", method);
                let err = McpError::MethodNotFound(method.to_string());
                Some(JsonRpcResponse::error(id, &err))
            }
        }
    }

    fn handle_initialize(&self, id: Option<Value>) -> JsonRpcResponse {
        info!("Server initialized");

        let result = InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability::default()),
            },
            server_info: ServerInfo {
                name: self.config.name.clone(),
                version: self.config.version.clone(),
            },
        };

        JsonRpcResponse::success(
            id,
            serde_json::to_value(result).expect("InitializeResult serialization cannot fail"),
        )
    }

    fn handle_tools_list(&self, id: Option<Value>) -> JsonRpcResponse {
        let result = ListToolsResult {
            tools: self.registry.tools().to_vec(),
        };
        JsonRpcResponse::success(
            id,
            serde_json::to_value(result).expect("ListToolsResult serialization cannot fail"),
        )
    }

    /// Handle the `tools/call` method.
    ///
    /// Tool failures, including an unknown or missing tool name, are returned
    /// as successful responses with `isError: true`.
    async fn handle_tools_call(&self, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
        let params: CallToolParams = params
            .and_then(|p| serde_json::from_value(p).ok())
            .unwrap_or_default();
        let name = params.name.unwrap_or_default();

        let result = match self.registry.execute(&name, params.arguments).await {
            Ok(value) => CallToolResult::json(&value),
            Err(e) => {
                warn!(tool = %name, "Tool call failed: {}", e);
                CallToolResult::error(e.to_string())
            }
        };

        JsonRpcResponse::success(
            id,
            serde_json::to_value(result).expect("CallToolResult serialization cannot fail"),
        )
    }
}

/// Resolves on SIGINT or, on unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
