use crate::dashboard::{CountryView, DashboardSnapshot, InstitutionView};
use crate::types::Lookup;
use serde::Serialize;
use std::error::Error;
use std::path::{Path, PathBuf};
use tabled::{settings::Style, Table, Tabled};
use tracing::debug;

pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), Box<dyn Error>> {
    let mut wtr = csv::Writer::from_path(path)?;
    for r in rows {
        wtr.serialize(r)?;
    }
    wtr.flush()?;
    debug!(path = %path.display(), rows = rows.len(), "wrote csv");
    Ok(())
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), Box<dyn Error>> {
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s)?;
    debug!(path = %path.display(), "wrote json");
    Ok(())
}

/// Print a titled markdown preview of the first `max_rows` rows.
pub fn preview_table<T>(title: &str, note: Option<&str>, rows: &[T], max_rows: usize)
where
    T: Tabled,
{
    println!("{}", title);
    if let Some(n) = note {
        println!("({})", n);
    }
    println!();
    if rows.is_empty() || max_rows == 0 {
        println!("(no rows)\n");
        return;
    }
    let table = Table::new(rows.iter().take(max_rows))
        .with(Style::markdown())
        .to_string();
    println!("{}\n", table);
}

/// Write the ranking and top-score tables of a country view. Returns the
/// files written.
pub fn export_country_view(dir: &Path, view: &CountryView) -> Result<Vec<PathBuf>, Box<dyn Error>> {
    let mut written = Vec::new();
    let path = dir.join("ranking.csv");
    write_csv(&path, &view.ranking.rows)?;
    written.push(path);
    for (name, rows) in [
        ("top_input.csv", &view.top.input),
        ("top_output.csv", &view.top.output),
        ("top_impact.csv", &view.top.impact),
        ("top_overall.csv", &view.top.overall),
    ] {
        let path = dir.join(name);
        write_csv(&path, rows)?;
        written.push(path);
    }
    Ok(written)
}

/// Write one CSV per assessment category of the selected institution.
pub fn export_institution_view(
    dir: &Path,
    view: &InstitutionView,
) -> Result<Vec<PathBuf>, Box<dyn Error>> {
    let mut written = Vec::new();
    for table in &view.categories {
        let path = dir.join(format!("{}.csv", table.category.slug()));
        write_csv(&path, &table.rows)?;
        written.push(path);
    }
    Ok(written)
}

/// Write every table of a snapshot plus `dashboard.json`.
pub fn export_snapshot(dir: &Path, snapshot: &DashboardSnapshot) -> Result<Vec<PathBuf>, Box<dyn Error>> {
    std::fs::create_dir_all(dir)?;
    let mut written = export_country_view(dir, &snapshot.country)?;
    if let Lookup::Found(view) = &snapshot.institution {
        written.extend(export_institution_view(dir, view)?);
    }
    let path = dir.join("dashboard.json");
    write_json(&path, snapshot)?;
    written.push(path);
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TopScoreRow;

    fn rows() -> Vec<TopScoreRow> {
        (1..=3)
            .map(|n| TopScoreRow {
                number: n,
                institution: format!("University {}", n),
                score: n.to_string(),
            })
            .collect()
    }

    #[test]
    fn preview_handles_empty_and_truncated_tables() {
        preview_table::<TopScoreRow>("Empty", None, &[], 5);
        preview_table("Top", Some("first two"), &rows(), 2);
        preview_table("Hidden", None, &rows(), 0);
    }

    #[test]
    fn csv_rows_use_display_headers() -> Result<(), Box<dyn Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("top.csv");
        write_csv(&path, &rows())?;
        let text = std::fs::read_to_string(&path)?;
        assert!(text.starts_with("#,Institution,Score\n"));
        assert_eq!(text.lines().count(), 4);
        Ok(())
    }
}
