//! Golden file tests for the recipe sanitizer.
//!
//! Each fixture in `fixtures/sanitize/` holds a raw stored document and the
//! validation result it must produce. Missing timestamps resolve to a fixed
//! "now" of 2024-01-01T00:00:00Z.
//!
//! Test format:
//! ```json
//! {
//!   "id": "52772",
//!   "input": { "strMeal": "...", ... },
//!   "expected": { "isValid": true, "missingFields": [], "sanitizedRecipe": { ... } }
//! }
//! ```

use chrono::{TimeZone, Utc};
use glob::glob;
use mealswipe_core::sanitize::validate_and_sanitize_recipe_at;
use mealswipe_core::ValidationResult;
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
struct TestCase {
    id: String,
    input: Value,
    expected: ValidationResult,
}

fn load_test_cases() -> Vec<(String, TestCase)> {
    let pattern = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/sanitize/*.json");
    let pattern_str = pattern.to_string_lossy();

    let mut cases = Vec::new();
    for entry in glob(&pattern_str).expect("Failed to read glob pattern") {
        let path = entry.expect("Failed to read directory entry");
        let name = path.file_stem().unwrap().to_string_lossy().into_owned();
        let content = fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e));
        let case: TestCase = serde_json::from_str(&content)
            .unwrap_or_else(|e| panic!("Failed to parse {}: {}", path.display(), e));
        cases.push((name, case));
    }

    cases.sort_by(|a, b| a.0.cmp(&b.0));
    cases
}

#[test]
fn test_sanitizer_golden_files() {
    let cases = load_test_cases();
    assert!(!cases.is_empty(), "no sanitizer fixtures found");

    let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let mut failures = Vec::new();

    for (name, case) in &cases {
        let actual = validate_and_sanitize_recipe_at(&case.id, &case.input, now);
        if actual != case.expected {
            failures.push((name.clone(), case.expected.clone(), actual));
        }
    }

    if !failures.is_empty() {
        let mut msg = format!(
            "\n{} failures across {} tests:\n",
            failures.len(),
            cases.len()
        );
        for (name, expected, actual) in &failures {
            msg.push_str(&format!("\n=== {} ===\n", name));
            msg.push_str(&format!("Expected: {:#?}\n", expected));
            msg.push_str(&format!("Actual:   {:#?}\n", actual));
        }
        panic!("{}", msg);
    }
}

/// Sanitizing an already-sanitized recipe changes nothing.
#[test]
fn test_sanitized_output_is_stable() {
    let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

    for (name, case) in load_test_cases() {
        let Some(first) = validate_and_sanitize_recipe_at(&case.id, &case.input, now).sanitized_recipe
        else {
            continue;
        };
        let stored = serde_json::to_value(&first).unwrap();
        let second = validate_and_sanitize_recipe_at(&case.id, &stored, now);

        assert_eq!(second.sanitized_recipe.as_ref(), Some(&first), "fixture {}", name);
        assert!(second.is_valid, "fixture {} should be valid after sanitizing", name);
    }
}
