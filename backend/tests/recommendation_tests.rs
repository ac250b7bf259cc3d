//! Recommendation pipeline integration tests
//!
//! Covers the comma-list parsing of the generative service's output, the
//! seasonal-demand intersection, and the environmental-adjustment fallback.

use proptest::prelude::*;
use validator::Validate;

use shared::{
    adaptation_tips, cultivation_advice, filter_by_demand, parse_crop_list, FieldReadings,
    RankedCrop,
};

fn readings() -> FieldReadings {
    FieldReadings {
        nitrogen: 50.0,
        phosphorus: 50.0,
        potassium: 50.0,
        temperature: 25.0,
        humidity: 60.0,
        ph: 6.5,
        rainfall: 100.0,
    }
}

fn ranked() -> Vec<RankedCrop> {
    vec![
        RankedCrop { name: "rice".to_string(), probability: 0.4 },
        RankedCrop { name: "banana".to_string(), probability: 0.3 },
        RankedCrop { name: "cotton".to_string(), probability: 0.2 },
        RankedCrop { name: "coffee".to_string(), probability: 0.1 },
    ]
}

// ============================================================================
// Unit Tests
// ============================================================================

#[test]
fn test_free_form_reply_parsing() {
    let reply = "Rice, Banana, COTTON,\n coffee ";
    assert_eq!(
        parse_crop_list(reply),
        vec!["rice", "banana", "cotton", "coffee"]
    );
}

#[test]
fn test_malformed_reply_yields_fewer_crops_not_an_error() {
    assert!(parse_crop_list("").is_empty());
    assert_eq!(parse_crop_list("just one crop name"), vec!["just one crop name"]);
}

#[test]
fn test_intersection_preserves_classifier_rank_order() {
    let in_demand = vec!["coffee".to_string(), "rice".to_string(), "durian".to_string()];
    let matched = filter_by_demand(&ranked(), &in_demand);
    let names: Vec<&str> = matched.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["rice", "coffee"]);
}

#[test]
fn test_empty_intersection_falls_back_to_generic_advice() {
    let in_demand = vec!["durian".to_string(), "lychee".to_string()];
    let matched = filter_by_demand(&ranked(), &in_demand);
    assert!(matched.is_empty());

    // The fallback must be non-empty even for fully in-range readings
    let tips = adaptation_tips(&readings());
    assert!(!tips.is_empty());
}

#[test]
fn test_adaptation_tips_target_the_failing_factor() {
    let mut r = readings();
    r.nitrogen = 10.0;
    r.phosphorus = 10.0;
    r.potassium = 10.0;
    let tips = adaptation_tips(&r);
    assert!(tips.iter().any(|t| t.contains("nitrogen")));
    assert!(tips.iter().any(|t| t.contains("phosphorus") || t.contains("DAP")));
    assert!(tips.iter().any(|t| t.contains("potassium") || t.contains("potash")));
}

#[test]
fn test_every_matched_crop_gets_cultivation_advice() {
    for crop in ["rice", "banana", "cotton", "coffee"] {
        let advice = cultivation_advice(crop);
        assert_ne!(advice, "Treatment information is not available for this crop.");
    }
}

#[test]
fn test_reading_ranges_enforced() {
    assert!(readings().validate().is_ok());

    let mut r = readings();
    r.temperature = 60.0;
    assert!(r.validate().is_err());

    let mut r = readings();
    r.nitrogen = -1.0;
    assert!(r.validate().is_err());
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Parsed crop names are always trimmed and lowercased.
    #[test]
    fn prop_parsed_names_normalized(raw in "[A-Za-z ,]{0,64}") {
        for name in parse_crop_list(&raw) {
            prop_assert_eq!(name.clone(), name.trim().to_lowercase());
            prop_assert!(!name.is_empty());
        }
    }

    /// Filtering never invents crops and never reorders the ranking.
    #[test]
    fn prop_filter_is_an_order_preserving_subset(keep in proptest::collection::vec(0usize..4, 0..4)) {
        let ranked = ranked();
        let in_demand: Vec<String> = keep.iter().map(|i| ranked[*i].name.clone()).collect();
        let matched = filter_by_demand(&ranked, &in_demand);

        let positions: Vec<usize> = matched
            .iter()
            .map(|c| ranked.iter().position(|r| r.name == c.name).unwrap())
            .collect();
        for pair in positions.windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
    }

    /// Adjustment advice is non-empty for any in-range readings.
    #[test]
    fn prop_adaptation_tips_never_empty(
        n in 0.0f64..200.0,
        ph in 0.0f64..14.0,
        temp in 0.0f64..50.0,
        humidity in 0.0f64..100.0,
    ) {
        let r = FieldReadings {
            nitrogen: n,
            phosphorus: 50.0,
            potassium: 50.0,
            temperature: temp,
            humidity,
            ph,
            rainfall: 100.0,
        };
        prop_assert!(!adaptation_tips(&r).is_empty());
    }
}
