use gfgp_dashboard::columns;
use gfgp_dashboard::dashboard::{country_view, institution_view, overview, snapshot};
use gfgp_dashboard::detail::{extract_category, Category};
use gfgp_dashboard::filter::{filter_by_country, CountrySelector};
use gfgp_dashboard::loader::{load_dataset, Encoding};
use gfgp_dashboard::output::export_snapshot;
use gfgp_dashboard::ranking::rank_institutions;
use gfgp_dashboard::store::DatasetStore;
use gfgp_dashboard::types::{InstitutionKey, Lookup};
use std::fs;
use tempfile::tempdir;

fn write_fixture(dir: &std::path::Path) -> std::path::PathBuf {
    let header = "Name of institution,Country,GFGP Self-Assessment Score,GFGP Assessment Level,\
KPMG's due diligence overall score,SCORE,Overall Input Score,Risk Rating ,\
Presence of an internal audit unit,external audit unit,\
Weaknesses in the access to university online systems,Finance manual,\
Weaknesses in the access to university online systems,Medical Dep\n";
    let mut bytes = header.as_bytes().to_vec();
    bytes.extend_from_slice(b"Universit\xe9 de Lom\xe9,Togo,0.7,Silver,0.61,22,7,Medium,Yes,Yes,No,Yes,Yes,Yes\n");
    bytes.extend_from_slice(b"Kenyatta University,Kenya,0.9,Gold,0.8,30,9,Low,,No,Yes,Yes,No,No\n");
    bytes.extend_from_slice(b"Pwani University,Kenya,0.5,Platinum,0.5,30,,Low,No,,nan,No,,Yes\n");
    bytes.extend_from_slice(b",Kenya,0.1,Bronze,0.1,1,1,High,No,No,No,No,No,No\n");
    let path = dir.join("gfgp.csv");
    fs::write(&path, bytes).unwrap();
    path
}

#[test]
fn load_rank_and_detail_from_latin1_csv() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = write_fixture(dir.path());

    let (records, report) = load_dataset(&path, Encoding::Latin1)?;
    assert_eq!(report.total_rows, 4);
    assert_eq!(report.loaded_rows, 3);
    assert_eq!(report.skipped_rows, 1);
    assert_eq!(records[0].name, "Universit\u{e9} de Lom\u{e9}");

    // The repeated header is addressable as `.1`.
    assert_eq!(
        records[0].text("Weaknesses in the access to university online systems.1"),
        Some("Yes")
    );
    assert_eq!(records[0].text(columns::RISK_RATING), Some("Medium"));

    let store = DatasetStore::new(records);
    let kenya = CountrySelector::Country("Kenya".into());
    let subset = filter_by_country(store.records(), &kenya);
    let ranking = rank_institutions(&subset, &kenya);
    let order: Vec<&str> = ranking.rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(order, vec!["Pwani University", "Kenyatta University"]);

    let view = country_view(&store, &CountrySelector::All, 15);
    assert_eq!(view.ranking.leader_name(), "Pwani University");
    assert_eq!(view.ranking.leader_country_label(), "COUNTRY: Kenya");
    assert_eq!(view.top.input.len(), 3);
    assert_eq!(view.departments.medical.yes_count, 2);

    let pwani = InstitutionKey::new("Kenya", "Pwani University");
    let detail = institution_view(&store, Some(&pwani)).found().unwrap();
    assert_eq!(detail.ranks.global_rank, Some(1));
    assert_eq!(detail.ranks.country_rank, Some(2));
    assert_eq!(detail.summary.internal_audit, "Internal: No");
    assert_eq!(detail.summary.external_audit, "External: N/A");

    let financial = extract_category(
        store.records().iter().find(|r| r.name == "Pwani University").unwrap(),
        Category::FinancialManagement,
    );
    let weakness = financial
        .iter()
        .find(|row| row.parameter == "Weaknesses in the access to university online systems")
        .unwrap();
    assert_eq!(weakness.assessment, "N/A");
    assert_eq!(financial[0].parameter, "Finance manual");
    assert_eq!(financial[0].assessment, "No");

    let charts = overview(&store);
    assert_eq!(charts.institutions_per_country.len(), 2);
    assert_eq!(charts.risk_ratings[0].label, "Low");
    assert_eq!(charts.risk_ratings[0].count, 2);
    Ok(())
}

#[test]
fn unknown_selection_renders_placeholder_and_exports() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = write_fixture(dir.path());
    let (records, _) = load_dataset(&path, Encoding::Latin1)?;
    let store = DatasetStore::new(records);

    let missing = InstitutionKey::by_name("University of Atlantis");
    let snap = snapshot(
        &store,
        &CountrySelector::Country("Atlantis".into()),
        Some(&missing),
        15,
    );
    assert!(snap.country.ranking.rows.is_empty());
    assert_eq!(snap.country.ranking.leader_name(), "None");
    assert!(snap.country.departments.medical.is_no_data());
    assert_eq!(snap.country.histograms.input.len(), 10);
    assert_eq!(snap.institution, Lookup::NotFound(missing));

    let out = dir.path().join("out");
    let written = export_snapshot(&out, &snap)?;
    assert!(written.iter().all(|p| p.exists()));
    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(out.join("dashboard.json"))?)?;
    assert_eq!(json["institution"]["status"], "not_found");
    assert_eq!(json["country"]["country"], "Atlantis");
    Ok(())
}

#[test]
fn selected_institution_exports_category_tables() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = write_fixture(dir.path());
    let (records, _) = load_dataset(&path, Encoding::Latin1)?;
    let store = DatasetStore::new(records);

    let key = InstitutionKey::by_name("Kenyatta University");
    let snap = snapshot(&store, &CountrySelector::All, Some(&key), 2);
    assert_eq!(snap.country.top.overall.len(), 2);

    let out = dir.path().join("export");
    export_snapshot(&out, &snap)?;
    for name in ["ranking.csv", "top_overall.csv", "financial.csv", "fiduciary.csv"] {
        assert!(out.join(name).exists(), "{name} missing");
    }
    let ranking = fs::read_to_string(out.join("ranking.csv"))?;
    assert!(ranking.starts_with("Number,Name of institution,"));
    Ok(())
}
