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

//! License resolution for the AI PRD Builder.
//!
//! This crate answers one question for the MCP server: which entitlement tier
//! is active right now, and what does that tier unlock? Key pieces:
//!
//! - **[`LicenseResolver`]** walks the ordered fallback chain (external
//!   validator, license files, trial file, free default) and always yields a
//!   [`LicenseState`]
//! - **[`features_for_tier`]** derives a [`FeatureProfile`] from a tier and the
//!   skill configuration
//! - **[`SkillConfig`]** wraps the opaque configuration document
//! - **[`Environment`]** labels the launch context (`cli` or `cowork`)
//! - **[`EnginePaths`]** locates the plugin root, engine home and config file

pub mod config;
pub mod environment;
mod error;
pub mod features;
pub mod paths;
pub mod resolver;
pub mod state;
pub mod tier;
pub mod timestamp;

pub use config::SkillConfig;
pub use environment::Environment;
pub use error::{ConfigError, LicenseError, LicenseResult};
pub use features::{features_for_tier, licensed_feature_ids, FeatureProfile};
pub use paths::{EnginePaths, LicensePaths};
pub use resolver::{LicenseProvider, LicenseResolver, DEFAULT_VALIDATOR_TIMEOUT};
pub use state::{LicenseState, SourceTag};
pub use tier::Tier;
