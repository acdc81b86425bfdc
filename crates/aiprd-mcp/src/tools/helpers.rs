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

//! Helper functions shared across MCP tools.

use crate::error::{McpError, McpResult};
use serde::Deserialize;
use serde_json::Value as JsonValue;

/// Parse JSON arguments into a typed structure.
///
/// Missing or `null` arguments parse as an empty object.
pub fn parse_args<T: for<'de> Deserialize<'de>>(args: Option<JsonValue>) -> McpResult<T> {
    let args = match args {
        None | Some(JsonValue::Null) => JsonValue::Object(serde_json::Map::new()),
        Some(value) => value,
    };
    serde_json::from_value(args).map_err(|e| McpError::InvalidArguments(e.to_string()))
}

/// Treat an empty string argument the same as an absent one.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
