use std::path::PathBuf;

use pcbuild::session::SessionSnapshot;
use pcbuild::sync::FilterField;
use pcbuild::*;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn catalog() -> Catalog {
    Catalog::load(&fixture_path("catalog.json")).expect("Failed to load fixture catalog")
}

fn part(catalog: &Catalog, id: &str) -> Part {
    catalog.get(id).cloned().unwrap_or_else(|| panic!("fixture has no part {}", id))
}

#[test]
fn test_save_and_load_round_trip() {
    let catalog = catalog();
    let mut session = BuildSession::new(&default_config());
    session.select(part(&catalog, "cpu-7600")).unwrap();
    session.select(part(&catalog, "mb-b650m")).unwrap();
    session.add_addon(part(&catalog, "sw-win11"), 2).unwrap();
    session.clear_filter(FilterField::FormFactor);

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("nested").join("session.json");
    session.save(&path).expect("Failed to save session");

    let loaded = BuildSession::load(&path).expect("Failed to load session");
    assert_eq!(loaded, session);
    assert_eq!(loaded.filters().form_factor, None);
    assert_eq!(loaded.selection().addons()[0].qty, 2);

    let snapshot = SessionSnapshot::load(&path).unwrap();
    assert!(snapshot.saved_at <= chrono::Utc::now());
}

#[test]
fn test_saved_file_is_plain_json() {
    let catalog = catalog();
    let mut session = BuildSession::new(&default_config());
    session.select(part(&catalog, "psu-750")).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    session.save(&path).unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert!(raw["savedAt"].is_string());
    assert_eq!(raw["session"]["smartSync"], true);
    assert_eq!(raw["session"]["pricing"]["vatPercent"], 7.0);
    assert_eq!(raw["session"]["selection"]["base"]["PSU"]["id"], "psu-750");
    assert_eq!(
        raw["session"]["selection"]["base"]["PSU"]["attributes"]["wattage"],
        750.0
    );
    assert_eq!(raw["session"]["filters"]["minPSUWatt"], 100.0);
}

/// Writes a snapshot whose selection is given as raw JSON.
fn write_snapshot(dir: &std::path::Path, selection: serde_json::Value) -> PathBuf {
    let snapshot = serde_json::json!({
        "savedAt": "2026-01-05T10:00:00Z",
        "session": { "selection": selection },
    });
    let path = dir.join("session.json");
    std::fs::write(&path, serde_json::to_string_pretty(&snapshot).unwrap()).unwrap();
    path
}

fn part_json(catalog: &Catalog, id: &str) -> serde_json::Value {
    serde_json::to_value(part(catalog, id)).unwrap()
}

#[test]
fn test_load_rejects_part_in_wrong_slot() {
    let catalog = catalog();
    let dir = tempfile::tempdir().unwrap();
    let path = write_snapshot(
        dir.path(),
        serde_json::json!({ "base": { "CPU": part_json(&catalog, "mon-27") } }),
    );

    let err = BuildSession::load(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("CPU slot holds part 'mon-27'"));
}

#[test]
fn test_load_rejects_base_part_in_addons() {
    let catalog = catalog();
    let dir = tempfile::tempdir().unwrap();
    let path = write_snapshot(
        dir.path(),
        serde_json::json!({
            "addons": [{ "id": "gpu-4070", "product": part_json(&catalog, "gpu-4070"), "qty": 1 }],
        }),
    );

    assert!(BuildSession::load(&path).is_err());
}

#[test]
fn test_load_merges_duplicate_addons_and_floors_quantity() {
    let catalog = catalog();
    let dir = tempfile::tempdir().unwrap();
    let monitor = part_json(&catalog, "mon-27");
    let path = write_snapshot(
        dir.path(),
        serde_json::json!({
            "base": { "CPU": part_json(&catalog, "cpu-7600") },
            "addons": [
                { "id": "mon-27", "product": monitor.clone(), "qty": 0 },
                { "id": "mon-27", "product": monitor, "qty": 2 },
            ],
        }),
    );

    let session = BuildSession::load(&path).unwrap();
    let addons = session.selection().addons();
    assert_eq!(addons.len(), 1);
    assert_eq!(addons[0].qty, 3);
    assert_eq!(session.selection().get(Category::Cpu).unwrap().id, "cpu-7600");
}

#[test]
fn test_nan_pricing_in_session_never_zeroes_the_quote() {
    let catalog = catalog();
    let mut session = BuildSession::new(&default_config());
    session.select(part(&catalog, "cpu-7600")).unwrap();
    session.pricing.discount_type = quote::DiscountType::Percent;
    session.pricing.discount_value = f64::NAN;
    session.pricing.vat_percent = f64::NAN;

    let quote = session.evaluate(&catalog).quote;
    assert_eq!(quote.discount_amount, 0.0);
    assert_eq!(quote.tax_amount, 0.0);
    assert_eq!(quote.total, quote.subtotal);
    assert!(quote.total > 0.0);
}

#[test]
fn test_load_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    assert!(BuildSession::load(&dir.path().join("absent.json")).is_err());
}

#[test]
fn test_load_rejects_garbage() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(BuildSession::load(&path).is_err());
}

#[test]
fn test_evaluation_reflects_every_change() {
    let catalog = catalog();
    let mut session = BuildSession::new(&default_config());

    let eval = session.evaluate(&catalog);
    assert!(eval.report.is_empty());
    assert_eq!(eval.quote.missing_required.len(), 6);
    assert_eq!(eval.candidates[&Category::Cpu].len(), 3);

    session.select(part(&catalog, "cpu-14700k")).unwrap();
    session.select(part(&catalog, "gpu-4070")).unwrap();
    session.select(part(&catalog, "psu-300")).unwrap();

    let eval = session.evaluate(&catalog);
    assert_eq!(eval.report.level, Some(Level::Warn));
    assert_eq!(eval.filters.min_psu_watt, Some(468.0));
    let psus: Vec<_> = eval.candidates[&Category::Psu].iter().map(|p| p.id.as_str()).collect();
    assert_eq!(psus, vec!["psu-750"]);
    let boards: Vec<_> = eval.candidates[&Category::Motherboard]
        .iter()
        .map(|p| p.id.as_str())
        .collect();
    assert_eq!(boards, vec!["mb-z790"]);

    session.reset();
    let eval = session.evaluate(&catalog);
    assert!(eval.filters.is_empty());
    assert_eq!(eval.quote.total, 0.0);
}

#[test]
fn test_hide_out_of_stock_from_config() {
    let catalog = catalog();
    let config = EngineConfig {
        hide_out_of_stock: true,
        ..default_config()
    };
    let session = BuildSession::new(&config);
    let cpus: Vec<_> = session.evaluate(&catalog).candidates[&Category::Cpu]
        .iter()
        .map(|p| p.id.clone())
        .collect();
    assert_eq!(cpus, vec!["cpu-7600", "cpu-14700k"]);
}
