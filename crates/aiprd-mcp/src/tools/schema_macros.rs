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

//! Declarative macros for tool input schemas.
//!
//! Every tool takes at most one optional argument, so the macros cover string
//! and enumerated-string properties plus the object wrapper.
//!
//! ```text
//! let schema = tool_schema! {
//!     required: [],
//!     properties: {
//!         tier: schema_enum!(["free", "trial", "licensed"], "Tier to query")
//!     }
//! };
//!
//! // Tool without arguments
//! let schema = tool_schema!();
//! ```

/// Generate a JSON schema object with type "string" and description.
#[macro_export]
macro_rules! schema_string {
    ($description:expr) => {
        serde_json::json!({
            "type": "string",
            "description": $description
        })
    };
}

/// Generate a JSON schema object with string enum constraints.
#[macro_export]
macro_rules! schema_enum {
    ([$($variant:expr),+ $(,)?], $description:expr) => {
        serde_json::json!({
            "type": "string",
            "enum": [$($variant),+],
            "description": $description
        })
    };
}

/// Generate a complete tool input schema.
///
/// The empty form produces an object schema with no properties.
#[macro_export]
macro_rules! tool_schema {
    () => {
        serde_json::json!({
            "type": "object",
            "properties": {},
            "required": []
        })
    };
    (
        required: [$($req:expr),* $(,)?],
        properties: {
            $($field:ident: $schema:expr),+ $(,)?
        }
    ) => {
        serde_json::json!({
            "type": "object",
            "properties": {
                $(stringify!($field): $schema),+
            },
            "required": [$($req),*]
        })
    };
}
