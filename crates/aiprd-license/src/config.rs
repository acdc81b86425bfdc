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

//! Skill configuration document.
//!
//! The document is opaque: callers address values by section name and nested
//! key path, and every accessor returns `None` rather than failing when a
//! section is missing or has an unexpected shape.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::path::Path;

/// Read-only view over `skill-config.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillConfig {
    sections: Map<String, JsonValue>,
}

impl SkillConfig {
    /// Load and parse a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let value: JsonValue = serde_json::from_str(&raw).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_value(value).ok_or_else(|| ConfigError::NotAnObject(path.to_path_buf()))
    }

    /// Wrap a JSON value; only objects are accepted.
    pub fn from_value(value: JsonValue) -> Option<Self> {
        match value {
            JsonValue::Object(sections) => Some(Self { sections }),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Raw value of a top-level section.
    pub fn section(&self, name: &str) -> Option<&JsonValue> {
        self.sections.get(name)
    }

    /// Top-level section names, sorted.
    pub fn section_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.sections.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Follow a key path from the top level, e.g. `["license", "free_tier"]`.
    pub fn lookup(&self, path: &[&str]) -> Option<&JsonValue> {
        let (first, rest) = path.split_first()?;
        rest.iter()
            .try_fold(self.sections.get(*first)?, |value, key| value.get(*key))
            .filter(|value| !value.is_null())
    }

    pub fn str_at(&self, path: &[&str]) -> Option<&str> {
        self.lookup(path)?.as_str()
    }

    /// Object at `path`.
    pub fn object_at(&self, path: &[&str]) -> Option<&Map<String, JsonValue>> {
        self.lookup(path)?.as_object()
    }

    /// String array at `path`; non-string elements are skipped.
    pub fn string_list(&self, path: &[&str]) -> Option<Vec<String>> {
        let items = self.lookup(path)?.as_array()?;
        Some(
            items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
        )
    }
}
