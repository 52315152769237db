//! Integration test: catalog directory loading and odds
//!
//! Hand-edited records are loaded permissively, and the simulator agrees with
//! the analytic odds for what was loaded.

use std::fs;
use std::path::PathBuf;

use cardsharp::catalog::{effective_odds, load_catalog, CatalogHandle};
use cardsharp::simulator::{run_simulation, SimConfig};

fn scratch_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "cardsharp-catalog-{}-{}",
        tag,
        std::process::id()
    ));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_mixed_directory_loads_what_it_can() {
    let dir = scratch_dir("mixed");
    fs::write(
        dir.join("a_int.json"),
        r#"{"name": "Common", "cost": 100, "items": [{"item": "Pebble", "chance": 1.0}]}"#,
    )
    .unwrap();
    fs::write(
        dir.join("b_string.json"),
        r#"{"name": "Rare", "cost": " 300 ", "items": [{"item": "Gem", "chance": "0.5"}]}"#,
    )
    .unwrap();
    fs::write(dir.join("c_broken.json"), "{ this is not json").unwrap();
    fs::write(dir.join("d_nameless.json"), r#"{"cost": 5}"#).unwrap();
    fs::write(dir.join("notes.txt"), r#"{"name": "Ignored"}"#).unwrap();

    let catalog = load_catalog(&dir);
    let names: Vec<&str> = catalog.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["Common", "Rare"]);
    assert_eq!(catalog["Rare"].cost, 300);
    assert!((catalog["Rare"].items[0].chance - 0.5).abs() < f64::EPSILON);

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_duplicate_name_later_file_wins() {
    let dir = scratch_dir("dupes");
    fs::write(dir.join("1.json"), r#"{"name": "Box", "cost": 1}"#).unwrap();
    fs::write(dir.join("2.json"), r#"{"name": "Box", "cost": 2}"#).unwrap();

    let catalog = load_catalog(&dir);
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog["Box"].cost, 2);

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_handle_picks_up_new_records_on_reload() {
    let dir = scratch_dir("reload");
    fs::write(dir.join("first.json"), r#"{"name": "First", "cost": 1}"#).unwrap();

    let mut handle = CatalogHandle::new(&dir);
    assert_eq!(handle.catalog().len(), 1);

    fs::write(dir.join("second.json"), r#"{"name": "Second", "cost": 2}"#).unwrap();
    assert_eq!(handle.catalog().len(), 1, "cached until reloaded");
    assert_eq!(handle.reload().len(), 2);
    assert_eq!(handle.get("Second").map(|d| d.cost), Some(2));

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_simulation_matches_effective_odds() {
    let dir = scratch_dir("sim");
    fs::write(
        dir.join("stingy.json"),
        r#"{"name": "Stingy", "cost": 50, "items": [
            {"item": "Dust", "chance": 0.3},
            {"item": "Shard", "chance": 0.2}
        ]}"#,
    )
    .unwrap();
    let catalog = load_catalog(&dir);
    let stingy = &catalog["Stingy"];

    let config = SimConfig {
        lootbox: "Stingy".to_string(),
        draws: 50_000,
        seed: Some(2024),
        verbosity: 0,
    };
    let report = run_simulation(&config, stingy);
    let expected = effective_odds(&stingy.items);

    assert_eq!(report.rows.len(), 2);
    for (row, odds) in report.rows.iter().zip(&expected) {
        assert!(
            (row.observed - odds).abs() < 0.02,
            "{:?}: observed {} vs expected {}",
            row.item,
            row.observed,
            odds
        );
    }
    assert_eq!(report.empty_draws, 0);
    assert!((report.fallback_rate - 0.5).abs() < 0.02);

    fs::remove_dir_all(&dir).ok();
}
