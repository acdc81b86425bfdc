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

//! Tier feature profiles.
//!
//! Paid tiers (`trial`, `licensed`) start from an everything-enabled baseline
//! and apply a shallow override object from `license.<tier>_tier`. The free
//! tier reads each limit from `license.free_tier` and falls back to a built-in
//! literal per field. Nothing here performs I/O or fails.

use crate::config::SkillConfig;
use crate::tier::Tier;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value as JsonValue};

/// Coarse capability gate for paid tiers.
pub const LICENSED_FEATURES: [&str; 7] = [
    "thinking_strategies",
    "advanced_rag",
    "verification_engine",
    "vision_engine",
    "orchestration_engine",
    "encryption_engine",
    "strategy_engine",
];

/// Free tier strategies when the configuration names none.
pub const DEFAULT_FREE_STRATEGIES: [&str; 2] = ["zero_shot", "chain_of_thought"];

/// Free tier PRD contexts when the configuration names none.
pub const DEFAULT_FREE_CONTEXTS: [&str; 2] = ["feature", "bug"];

const DEFAULT_FREE_ROUNDS: u64 = 3;
const DEFAULT_FREE_QUESTIONS: u64 = 5;
const DEFAULT_FREE_VERIFICATION: &str = "basic";
const DEFAULT_FREE_RAG_HOPS: u64 = 1;
const DEFAULT_FREE_SECTIONS: u64 = 6;
const DEFAULT_FREE_KPIS: &str = "summary_only";

/// Capability identifiers unlocked by `tier` when a license source supplies no
/// explicit list.
pub fn licensed_feature_ids(tier: Tier) -> &'static [&'static str] {
    if tier.is_paid() {
        &LICENSED_FEATURES
    } else {
        &[]
    }
}

/// Tier-derived capability limits.
///
/// Held as a JSON object because configuration overrides may add keys or
/// replace a baseline value with any JSON shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureProfile(Map<String, JsonValue>);

impl FeatureProfile {
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.0.get(key)
    }
}

/// Resolve the feature profile for a tier.
pub fn features_for_tier(tier: Tier, config: &SkillConfig) -> FeatureProfile {
    match tier {
        Tier::Licensed => paid_profile(config, "licensed_tier"),
        Tier::Trial => paid_profile(config, "trial_tier"),
        Tier::Free => free_profile(config),
    }
}

/// Strategies available on the free tier.
///
/// Checks `license.free_tier.strategies`, then
/// `strategy_engine.license_tiers.free`, then the built-in pair.
pub fn free_strategies(config: &SkillConfig) -> Vec<String> {
    config
        .string_list(&["license", "free_tier", "strategies"])
        .or_else(|| config.string_list(&["strategy_engine", "license_tiers", "free"]))
        .unwrap_or_else(|| to_strings(&DEFAULT_FREE_STRATEGIES))
}

/// PRD context types available on the free tier.
pub fn free_contexts(config: &SkillConfig) -> Vec<String> {
    config
        .string_list(&["license", "free_tier", "prd_contexts"])
        .unwrap_or_else(|| to_strings(&DEFAULT_FREE_CONTEXTS))
}

fn paid_profile(config: &SkillConfig, override_key: &str) -> FeatureProfile {
    let strategies = config
        .string_list(&["thinking", "available_strategies"])
        .unwrap_or_default();
    let contexts = config
        .string_list(&["prd_contexts", "available"])
        .unwrap_or_default();

    let mut profile = match json!({
        "strategies": "all",
        "strategies_list": strategies,
        "prd_contexts": "all",
        "prd_contexts_list": contexts,
        "max_clarification_rounds": "unlimited",
        "max_clarification_questions": "context_aware",
        "verification": "full",
        "rag_max_hops": "context_aware",
        "sections_limit": "context_aware",
        "business_kpis": "full"
    }) {
        JsonValue::Object(map) => map,
        _ => Map::new(),
    };

    if let Some(overrides) = config.object_at(&["license", override_key]) {
        for (key, value) in overrides {
            profile.insert(key.clone(), value.clone());
        }
    }

    FeatureProfile(profile)
}

fn free_profile(config: &SkillConfig) -> FeatureProfile {
    let field = |key: &str, default: JsonValue| {
        config
            .lookup(&["license", "free_tier", key])
            .filter(|value| !is_blank(value))
            .cloned()
            .unwrap_or(default)
    };

    let strategies = field("strategies", json!(DEFAULT_FREE_STRATEGIES));
    let contexts = field("prd_contexts", json!(DEFAULT_FREE_CONTEXTS));

    let mut profile = Map::new();
    profile.insert("strategies".into(), strategies.clone());
    profile.insert("strategies_list".into(), strategies);
    profile.insert("prd_contexts".into(), contexts.clone());
    profile.insert("prd_contexts_list".into(), contexts);
    profile.insert(
        "max_clarification_rounds".into(),
        field("max_clarification_rounds", json!(DEFAULT_FREE_ROUNDS)),
    );
    profile.insert(
        "max_clarification_questions".into(),
        field("max_clarification_questions", json!(DEFAULT_FREE_QUESTIONS)),
    );
    profile.insert(
        "verification".into(),
        field("verification", json!(DEFAULT_FREE_VERIFICATION)),
    );
    profile.insert(
        "rag_max_hops".into(),
        field("rag_max_hops", json!(DEFAULT_FREE_RAG_HOPS)),
    );
    profile.insert(
        "sections_limit".into(),
        field("sections_limit", json!(DEFAULT_FREE_SECTIONS)),
    );
    profile.insert(
        "business_kpis".into(),
        field("business_kpis", json!(DEFAULT_FREE_KPIS)),
    );

    FeatureProfile(profile)
}

/// `false`, `0` and `""` count as unset for free-tier fields.
fn is_blank(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => true,
        JsonValue::Bool(b) => !b,
        JsonValue::Number(n) => n.as_f64() == Some(0.0),
        JsonValue::String(s) => s.is_empty(),
        JsonValue::Array(_) | JsonValue::Object(_) => false,
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(value: JsonValue) -> SkillConfig {
        SkillConfig::from_value(value).unwrap()
    }

    #[test]
    fn test_licensed_feature_ids() {
        assert_eq!(licensed_feature_ids(Tier::Licensed).len(), 7);
        assert_eq!(licensed_feature_ids(Tier::Trial), &LICENSED_FEATURES);
        assert!(licensed_feature_ids(Tier::Free).is_empty());
    }

    #[test]
    fn test_free_defaults_with_empty_config() {
        let profile = features_for_tier(Tier::Free, &SkillConfig::default());

        assert_eq!(profile.get("strategies").unwrap(), &json!(["zero_shot", "chain_of_thought"]));
        assert_eq!(profile.get("prd_contexts").unwrap(), &json!(["feature", "bug"]));
        assert_eq!(profile.get("max_clarification_rounds").unwrap(), &json!(3));
        assert_eq!(profile.get("max_clarification_questions").unwrap(), &json!(5));
        assert_eq!(profile.get("verification").unwrap(), &json!("basic"));
        assert_eq!(profile.get("rag_max_hops").unwrap(), &json!(1));
        assert_eq!(profile.get("sections_limit").unwrap(), &json!(6));
        assert_eq!(profile.get("business_kpis").unwrap(), &json!("summary_only"));
    }

    #[test]
    fn test_free_fields_from_config() {
        let cfg = config(json!({
            "license": { "free_tier": {
                "strategies": ["zero_shot"],
                "max_clarification_rounds": 2,
                "verification": "none"
            }}
        }));
        let profile = features_for_tier(Tier::Free, &cfg);

        assert_eq!(profile.get("strategies").unwrap(), &json!(["zero_shot"]));
        assert_eq!(profile.get("strategies_list").unwrap(), &json!(["zero_shot"]));
        assert_eq!(profile.get("max_clarification_rounds").unwrap(), &json!(2));
        assert_eq!(profile.get("verification").unwrap(), &json!("none"));
        // Unset fields keep their literal defaults
        assert_eq!(profile.get("sections_limit").unwrap(), &json!(6));
    }

    #[test]
    fn test_blank_free_fields_use_defaults() {
        let cfg = config(json!({
            "license": { "free_tier": {
                "max_clarification_rounds": 0,
                "verification": "",
                "business_kpis": false,
                "sections_limit": null,
                "prd_contexts": []
            }}
        }));
        let profile = features_for_tier(Tier::Free, &cfg);

        assert_eq!(profile.get("max_clarification_rounds").unwrap(), &json!(3));
        assert_eq!(profile.get("verification").unwrap(), &json!("basic"));
        assert_eq!(profile.get("business_kpis").unwrap(), &json!("summary_only"));
        assert_eq!(profile.get("sections_limit").unwrap(), &json!(6));
        // An empty list is an explicit value
        assert_eq!(profile.get("prd_contexts").unwrap(), &json!([]));
    }

    #[test]
    fn test_paid_baseline() {
        let cfg = config(json!({
            "thinking": { "available_strategies": ["zero_shot", "react", "tree_of_thoughts"] },
            "prd_contexts": { "available": ["feature", "bug", "mvp"] }
        }));
        for tier in [Tier::Licensed, Tier::Trial] {
            let profile = features_for_tier(tier, &cfg);
            assert_eq!(profile.get("strategies").unwrap(), &json!("all"));
            assert_eq!(
                profile.get("strategies_list").unwrap(),
                &json!(["zero_shot", "react", "tree_of_thoughts"])
            );
            assert_eq!(profile.get("prd_contexts_list").unwrap(), &json!(["feature", "bug", "mvp"]));
            assert_eq!(profile.get("max_clarification_rounds").unwrap(), &json!("unlimited"));
            assert_eq!(profile.get("verification").unwrap(), &json!("full"));
        }
    }

    #[test]
    fn test_paid_override_is_shallow_and_per_tier() {
        let cfg = config(json!({
            "license": {
                "trial_tier": { "max_clarification_rounds": 10, "watermark": true },
                "licensed_tier": { "verification": "forensic" }
            }
        }));

        let trial = features_for_tier(Tier::Trial, &cfg);
        assert_eq!(trial.get("max_clarification_rounds").unwrap(), &json!(10));
        assert_eq!(trial.get("watermark").unwrap(), &json!(true));
        assert_eq!(trial.get("verification").unwrap(), &json!("full"));

        let licensed = features_for_tier(Tier::Licensed, &cfg);
        assert_eq!(licensed.get("verification").unwrap(), &json!("forensic"));
        assert_eq!(licensed.get("max_clarification_rounds").unwrap(), &json!("unlimited"));
        assert!(licensed.get("watermark").is_none());
    }

    #[test]
    fn test_deterministic_for_every_tier() {
        let cfg = config(json!({ "license": { "free_tier": { "sections_limit": 4 } } }));
        for tier in Tier::ALL {
            assert_eq!(features_for_tier(tier, &cfg), features_for_tier(tier, &cfg));
        }
    }

    #[test]
    fn test_free_strategies_fallback_chain() {
        let from_license = config(json!({
            "license": { "free_tier": { "strategies": ["a"] } },
            "strategy_engine": { "license_tiers": { "free": ["b"] } }
        }));
        assert_eq!(free_strategies(&from_license), vec!["a"]);

        let from_engine = config(json!({
            "strategy_engine": { "license_tiers": { "free": ["b"] } }
        }));
        assert_eq!(free_strategies(&from_engine), vec!["b"]);

        assert_eq!(
            free_strategies(&SkillConfig::default()),
            vec!["zero_shot", "chain_of_thought"]
        );
    }

    #[test]
    fn test_free_contexts_default() {
        assert_eq!(free_contexts(&SkillConfig::default()), vec!["feature", "bug"]);
    }
}
