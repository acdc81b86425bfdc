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

//! Integration tests for the external validator contract.
//!
//! Each scenario installs a small shell script as `validate-license`. The
//! scenarios run sequentially inside one test so that no other test in this
//! binary forks while a freshly written script is still open.

#![cfg(unix)]

use aiprd_license::{EnginePaths, Environment, LicenseResolver, SourceTag, Tier};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::time::{Duration, Instant};
use tempfile::TempDir;

struct Sandbox {
    _dir: TempDir,
    paths: EnginePaths,
}

impl Sandbox {
    fn new(script: &str) -> Self {
        let dir = TempDir::new().unwrap();
        let paths = EnginePaths::rooted_at(dir.path());
        fs::create_dir_all(&paths.plugin_root).unwrap();
        fs::create_dir_all(&paths.engine_home).unwrap();

        let validator = paths.validator();
        fs::write(&validator, format!("#!/bin/sh\n{}\n", script)).unwrap();
        fs::set_permissions(&validator, fs::Permissions::from_mode(0o755)).unwrap();

        Self { _dir: dir, paths }
    }

    fn with_license_file(self) -> Self {
        fs::write(
            self.paths.plugin_root.join("license.json"),
            r#"{"tier": "trial"}"#,
        )
        .unwrap();
        self
    }

    fn resolver(&self) -> LicenseResolver {
        LicenseResolver::new(self.paths.license_paths(), Environment::Cli)
            .with_validator_timeout(Duration::from_millis(500))
    }
}

#[tokio::test]
async fn test_external_validator_contract() {
    // Valid report is trusted and tagged
    let sandbox = Sandbox::new(
        r#"echo '{"tier": "licensed", "features": ["vision_engine"], "signature_verified": true, "hardware_verified": true, "expires_at": "2099-01-01T00:00:00Z"}'"#,
    );
    let state = sandbox.resolver().resolve().await;
    assert_eq!(state.tier, Tier::Licensed);
    assert_eq!(state.source, SourceTag::ExternalBinary);
    assert_eq!(state.environment, Environment::Cli);
    assert_eq!(state.features, vec!["vision_engine".to_string()]);
    assert!(state.signature_verified);
    assert!(state.hardware_verified);
    assert!(state.days_remaining.unwrap() > 0);

    // Report without expiry
    let sandbox = Sandbox::new(r#"echo '{"tier": "trial"}'"#);
    let state = sandbox.resolver().resolve().await;
    assert_eq!(state.source, SourceTag::ExternalBinary);
    assert_eq!(state.features.len(), 7);
    assert!(state.expires_at.is_none());
    assert!(state.days_remaining.is_none());

    // Non-zero exit falls through to the license file
    let sandbox = Sandbox::new(r#"echo '{"tier": "licensed"}'; exit 3"#).with_license_file();
    let state = sandbox.resolver().resolve().await;
    assert_eq!(state.source, SourceTag::LicenseFile);
    assert_eq!(state.tier, Tier::Trial);

    // Malformed output falls through to the free default
    let sandbox = Sandbox::new(r#"echo '{"tier": "licensed"'"#);
    assert_eq!(sandbox.resolver().resolve().await.source, SourceTag::DefaultFree);

    // Unknown tier is untrustworthy
    let sandbox = Sandbox::new(r#"echo '{"tier": "platinum"}'"#);
    assert_eq!(sandbox.resolver().resolve().await.source, SourceTag::DefaultFree);

    // Expired report is rejected
    let sandbox = Sandbox::new(r#"echo '{"tier": "licensed", "expires_at": "2000-01-01"}'"#)
        .with_license_file();
    assert_eq!(sandbox.resolver().resolve().await.source, SourceTag::LicenseFile);

    // Timeout is bounded
    let sandbox = Sandbox::new("exec sleep 10").with_license_file();
    let started = Instant::now();
    let state = sandbox.resolver().resolve().await;
    assert_eq!(state.source, SourceTag::LicenseFile);
    assert!(
        started.elapsed() < Duration::from_secs(5),
        "validator timeout not enforced: {:?}",
        started.elapsed()
    );
}
