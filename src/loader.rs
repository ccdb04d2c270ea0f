use crate::columns::{self, is_known_country, NUMERIC_COLUMNS};
use crate::error::LoadError;
use crate::types::InstitutionRecord;
use crate::util::{decode_latin1, normalize_cell, parse_f64_safe};
use csv::ReaderBuilder;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;
use tracing::{debug, info, warn};

/// Text encoding of the CSV export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Encoding {
    /// ISO-8859-1, what the scorecard export is written in.
    #[default]
    Latin1,
    Utf8,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoadReport {
    pub total_rows: usize,
    pub loaded_rows: usize,
    pub skipped_rows: usize,
    pub numeric_warnings: usize,
    pub unclassified_rows: usize,
    /// Names used by institutions in more than one country.
    pub ambiguous_names: Vec<String>,
}

pub fn load_dataset(
    path: impl AsRef<Path>,
    encoding: Encoding,
) -> Result<(Vec<InstitutionRecord>, LoadReport), LoadError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let text = match encoding {
        Encoding::Latin1 => decode_latin1(&bytes),
        Encoding::Utf8 => String::from_utf8_lossy(&bytes).into_owned(),
    };
    debug!(path = %path.display(), bytes = bytes.len(), ?encoding, "read dataset");
    parse_dataset(&text)
}

/// Parse already-decoded CSV text into institution records.
pub fn parse_dataset(text: &str) -> Result<(Vec<InstitutionRecord>, LoadReport), LoadError> {
    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());
    let headers = normalize_headers(rdr.headers()?.iter());
    if !headers
        .iter()
        .any(|h| h == columns::NAME || h == columns::NAME_ALIAS)
    {
        return Err(LoadError::MissingColumn(columns::NAME));
    }

    let mut report = LoadReport::default();
    let mut records: Vec<InstitutionRecord> = Vec::new();

    for result in rdr.records() {
        report.total_rows += 1;
        let row = match result {
            Ok(r) => r,
            Err(e) => {
                warn!(row = report.total_rows, error = %e, "skipping unreadable row");
                report.skipped_rows += 1;
                continue;
            }
        };

        let cells: HashMap<String, String> = headers
            .iter()
            .zip(row.iter())
            .filter_map(|(h, v)| normalize_cell(v).map(|v| (h.clone(), v)))
            .collect();

        for column in NUMERIC_COLUMNS {
            if let Some(raw) = cells.get(column) {
                if parse_f64_safe(Some(raw)).is_none() {
                    warn!(row = report.total_rows, column, value = %raw, "non-numeric score treated as missing");
                    report.numeric_warnings += 1;
                }
            }
        }

        let Some(record) = InstitutionRecord::from_columns(cells) else {
            warn!(row = report.total_rows, "skipping row without an institution name");
            report.skipped_rows += 1;
            continue;
        };
        if !record.country.as_deref().is_some_and(is_known_country) {
            debug!(institution = %record.name, country = ?record.country, "unclassified country");
            report.unclassified_rows += 1;
        }
        records.push(record);
    }

    report.loaded_rows = records.len();
    report.ambiguous_names = ambiguous_names(&records);
    for name in &report.ambiguous_names {
        warn!(institution = %name, "institution name used in more than one country");
    }
    info!(
        total = report.total_rows,
        loaded = report.loaded_rows,
        skipped = report.skipped_rows,
        "dataset parsed"
    );
    Ok((records, report))
}

/// Trim header names and disambiguate repeats: the second `X` becomes `X.1`,
/// the third `X.2`, and so on.
pub fn normalize_headers<'a>(raw: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    raw.map(|h| {
        let base = h.trim().to_string();
        let count = seen.entry(base.clone()).or_insert(0);
        let name = if *count == 0 {
            base
        } else {
            format!("{}.{}", base, count)
        };
        *count += 1;
        name
    })
    .collect()
}

fn ambiguous_names(records: &[InstitutionRecord]) -> Vec<String> {
    let mut by_name: BTreeMap<&str, BTreeSet<Option<&str>>> = BTreeMap::new();
    for r in records {
        by_name
            .entry(r.name.as_str())
            .or_default()
            .insert(r.country.as_deref());
    }
    by_name
        .into_iter()
        .filter(|(_, countries)| countries.len() > 1)
        .map(|(name, _)| name.to_string())
        .collect()
}
