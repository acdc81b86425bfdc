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

//! Integration tests for the local license resolution chain.

use aiprd_license::{
    EnginePaths, Environment, LicenseProvider, LicenseResolver, SourceTag, Tier,
};
use chrono::{Duration, Utc};
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

/// Helper to lay out an empty plugin/engine/home tree.
fn sandbox() -> (TempDir, EnginePaths) {
    let dir = TempDir::new().unwrap();
    let paths = EnginePaths::rooted_at(dir.path());
    fs::create_dir_all(&paths.plugin_root).unwrap();
    fs::create_dir_all(&paths.engine_home).unwrap();
    fs::create_dir_all(paths.home.join(".ai-prd")).unwrap();
    (dir, paths)
}

fn resolver(paths: &EnginePaths) -> LicenseResolver {
    LicenseResolver::new(paths.license_paths(), Environment::Cowork)
}

#[tokio::test]
async fn test_no_sources_yields_default_free() {
    let (_dir, paths) = sandbox();
    let state = resolver(&paths).resolve().await;

    assert_eq!(state.tier, Tier::Free);
    assert_eq!(state.source, SourceTag::DefaultFree);
    assert!(state.features.is_empty());
    assert!(state.expires_at.is_none());
    assert!(state.days_remaining.is_none());
    assert!(state.errors.is_empty());
    assert_eq!(state.environment, Environment::Cowork);
}

#[tokio::test]
async fn test_expired_license_without_trial_falls_to_free() {
    let (_dir, paths) = sandbox();
    let expired = (Utc::now() - Duration::days(30)).to_rfc3339();
    fs::write(
        paths.plugin_root.join("license.json"),
        format!(r#"{{"tier": "licensed", "expires_at": "{}"}}"#, expired),
    )
    .unwrap();

    let state = resolver(&paths).resolve().await;
    assert_eq!(state.source, SourceTag::DefaultFree);
    assert_eq!(state.tier, Tier::Free);
}

#[tokio::test]
async fn test_engine_home_license_accepted() {
    let (_dir, paths) = sandbox();
    let expiry = (Utc::now() + Duration::days(45)).to_rfc3339();
    fs::write(
        paths.engine_home.join("license.json"),
        format!(r#"{{"tier": "licensed", "expires_at": "{}"}}"#, expiry),
    )
    .unwrap();

    let state = resolver(&paths).resolve().await;
    assert_eq!(state.tier, Tier::Licensed);
    assert_eq!(state.source, SourceTag::LicenseFile);
    let days = state.days_remaining.unwrap();
    assert!((45..=46).contains(&days), "unexpected days_remaining {}", days);
    assert!(state.expires_at.is_some());
}

#[tokio::test]
async fn test_active_trial_after_expired_license() {
    let (_dir, paths) = sandbox();
    fs::write(
        paths.home.join(".ai-prd").join("license.json"),
        r#"{"tier": "licensed", "expires_at": "2001-01-01"}"#,
    )
    .unwrap();
    let expiry = (Utc::now() + Duration::days(7)).to_rfc3339();
    fs::write(
        paths.engine_home.join("trial.json"),
        format!(r#"{{"trial_expires_at": "{}"}}"#, expiry),
    )
    .unwrap();

    let state = resolver(&paths).resolve().await;
    assert_eq!(state.tier, Tier::Trial);
    assert_eq!(state.source, SourceTag::Trial);
    assert_eq!(state.features.len(), 7);
}

#[tokio::test]
async fn test_days_remaining_present_iff_expiry_present() {
    let (_dir, paths) = sandbox();
    let r = resolver(&paths);

    let free = r.resolve().await;
    assert_eq!(free.expires_at.is_some(), free.days_remaining.is_some());

    fs::write(paths.plugin_root.join("license.json"), r#"{"tier": "trial"}"#).unwrap();
    let licensed = r.resolve().await;
    assert_eq!(licensed.expires_at.is_some(), licensed.days_remaining.is_some());
    assert!(licensed.days_remaining.unwrap() >= 0);
}

#[tokio::test]
async fn test_resolution_is_not_cached() {
    let (_dir, paths) = sandbox();
    let provider: Arc<dyn LicenseProvider> = Arc::new(resolver(&paths));

    assert_eq!(provider.resolve().await.tier, Tier::Free);

    fs::write(paths.plugin_root.join("license.json"), r#"{"tier": "licensed"}"#).unwrap();
    assert_eq!(provider.resolve().await.tier, Tier::Licensed);

    fs::remove_file(paths.plugin_root.join("license.json")).unwrap();
    assert_eq!(provider.resolve().await.tier, Tier::Free);
}
