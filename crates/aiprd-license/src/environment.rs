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

//! Launch context detection.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Environment variable set by the cowork host for every plugin process.
pub const PLUGIN_ROOT_ENV: &str = "CLAUDE_PLUGIN_ROOT";

/// Working directory prefix used by cowork sessions.
const SESSIONS_PREFIX: &str = "/sessions/";

/// Deployment mode label attached to license states and tool responses.
///
/// This is informational only; no resolution step branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Cli,
    Cowork,
}

impl Environment {
    /// Detect the launch context of the current process.
    pub fn detect() -> Self {
        let plugin_root = std::env::var(PLUGIN_ROOT_ENV).ok();
        let cwd = std::env::current_dir().ok();
        Self::from_context(plugin_root.as_deref(), cwd.as_deref())
    }

    /// Classify from explicit inputs.
    pub fn from_context(plugin_root: Option<&str>, cwd: Option<&Path>) -> Self {
        let in_sessions = cwd
            .and_then(|p| p.to_str())
            .is_some_and(|p| p.starts_with(SESSIONS_PREFIX));

        if plugin_root.is_some_and(|r| !r.is_empty()) || in_sessions {
            Environment::Cowork
        } else {
            Environment::Cli
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Cli => "cli",
            Environment::Cowork => "cowork",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plugin_root_means_cowork() {
        let env = Environment::from_context(Some("/opt/plugin"), Some(Path::new("/home/me")));
        assert_eq!(env, Environment::Cowork);
    }

    #[test]
    fn test_sessions_cwd_means_cowork() {
        let env = Environment::from_context(None, Some(Path::new("/sessions/abc123")));
        assert_eq!(env, Environment::Cowork);
    }

    #[test]
    fn test_default_is_cli() {
        assert_eq!(
            Environment::from_context(None, Some(Path::new("/home/me/project"))),
            Environment::Cli
        );
        assert_eq!(Environment::from_context(Some(""), None), Environment::Cli);
    }

    #[test]
    fn test_serializes_as_label() {
        assert_eq!(serde_json::to_string(&Environment::Cowork).unwrap(), "\"cowork\"");
    }
}
