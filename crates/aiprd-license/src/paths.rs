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

//! Well-known filesystem locations.
//!
//! Every location can be overridden explicitly (CLI flags), then through the
//! environment, and finally falls back to a built-in default.

use crate::environment::PLUGIN_ROOT_ENV;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Overrides the skill configuration file location.
pub const SKILL_CONFIG_ENV: &str = "AIPRD_SKILL_CONFIG";

/// Overrides the engine home directory.
pub const ENGINE_HOME_ENV: &str = "AIPRD_ENGINE_HOME";

const SKILL_CONFIG_FILE: &str = "skill-config.json";
const ENGINE_HOME_DIR: &str = ".aiprd";
const LEGACY_HOME_DIR: &str = ".ai-prd";
const LICENSE_FILE: &str = "license.json";
const TRIAL_FILE: &str = "trial.json";
const VALIDATOR_BINARY: &str = "validate-license";

/// Resolved process locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnginePaths {
    /// Plugin installation directory.
    pub plugin_root: PathBuf,

    /// Engine home (validator binary, engine-level license and trial files).
    pub engine_home: PathBuf,

    /// Skill configuration document.
    pub skill_config: PathBuf,

    /// User home directory.
    pub home: PathBuf,
}

impl EnginePaths {
    /// Resolve locations from explicit overrides, then the process environment.
    pub fn resolve(
        plugin_root: Option<PathBuf>,
        engine_home: Option<PathBuf>,
        skill_config: Option<PathBuf>,
    ) -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));

        let plugin_root = plugin_root
            .or_else(|| env_path(PLUGIN_ROOT_ENV))
            .unwrap_or_else(default_plugin_root);
        let engine_home = engine_home
            .or_else(|| env_path(ENGINE_HOME_ENV))
            .unwrap_or_else(|| home.join(ENGINE_HOME_DIR));
        let skill_config = skill_config
            .or_else(|| env_path(SKILL_CONFIG_ENV))
            .unwrap_or_else(|| plugin_root.join(SKILL_CONFIG_FILE));

        Self {
            plugin_root,
            engine_home,
            skill_config,
            home,
        }
    }

    /// Lay out every location under a single base directory.
    ///
    /// Useful for tests and sandboxed runs: `<base>/plugin`, `<base>/engine`
    /// and `<base>/home`.
    pub fn rooted_at(base: &Path) -> Self {
        let plugin_root = base.join("plugin");
        Self {
            skill_config: plugin_root.join(SKILL_CONFIG_FILE),
            plugin_root,
            engine_home: base.join("engine"),
            home: base.join("home"),
        }
    }

    /// External validator executable.
    pub fn validator(&self) -> PathBuf {
        self.engine_home.join(VALIDATOR_BINARY)
    }

    /// Candidate files consulted by the license resolver.
    pub fn license_paths(&self) -> LicensePaths {
        LicensePaths {
            validator: self.validator(),
            license_candidates: vec![
                self.plugin_root.join(LICENSE_FILE),
                self.engine_home.join(LICENSE_FILE),
                self.home.join(LEGACY_HOME_DIR).join(LICENSE_FILE),
            ],
            trial: self.engine_home.join(TRIAL_FILE),
        }
    }
}

/// Files and binaries examined during license resolution, in priority order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicensePaths {
    pub validator: PathBuf,
    pub license_candidates: Vec<PathBuf>,
    pub trial: PathBuf,
}

fn env_path(key: &str) -> Option<PathBuf> {
    std::env::var_os(key)
        .filter(|v: &OsString| !v.is_empty())
        .map(PathBuf::from)
}

/// The binary ships as `<plugin_root>/bin/<exe>`.
fn default_plugin_root() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().and_then(Path::parent).map(Path::to_path_buf))
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}
