use crate::types::{InstitutionKey, InstitutionRecord, Lookup};
use serde::Serialize;
use std::borrow::Borrow;
use std::collections::HashSet;
use tracing::warn;

pub const ALL_COUNTRIES: &str = "All Countries";

/// The country dropdown value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub enum CountrySelector {
    #[default]
    All,
    Country(String),
}

impl CountrySelector {
    /// An absent or blank selector means "All Countries".
    pub fn from_input(input: Option<&str>) -> Self {
        match input.map(str::trim) {
            None | Some("") | Some(ALL_COUNTRIES) => Self::All,
            Some(country) => Self::Country(country.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::All => ALL_COUNTRIES,
            Self::Country(country) => country,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    /// Key for an institution picked under this selector: exact inside a
    /// country, by name alone under "All Countries".
    pub fn institution_key(&self, name: &str) -> InstitutionKey {
        match self {
            Self::All => InstitutionKey::by_name(name),
            Self::Country(country) => InstitutionKey::new(country.as_str(), name),
        }
    }

    pub fn matches(&self, record: &InstitutionRecord) -> bool {
        match self {
            Self::All => true,
            Self::Country(country) => record.country.as_deref() == Some(country.as_str()),
        }
    }
}

/// Iterate any slice of records or record references.
pub fn iter_records<'a, R: Borrow<InstitutionRecord>>(
    records: &'a [R],
) -> impl Iterator<Item = &'a InstitutionRecord> + 'a {
    records.iter().map(|r| r.borrow())
}

/// Records of the selected country in their original order. An unknown
/// country gives an empty subset.
pub fn filter_by_country<'a, R: Borrow<InstitutionRecord>>(
    records: &'a [R],
    selector: &CountrySelector,
) -> Vec<&'a InstitutionRecord> {
    iter_records(records)
        .filter(|r| selector.matches(r))
        .collect()
}

/// "All Countries" followed by each country in order of first appearance.
pub fn country_options<R: Borrow<InstitutionRecord>>(records: &[R]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut options = vec![ALL_COUNTRIES.to_string()];
    for country in iter_records(records).filter_map(|r| r.country.as_deref()) {
        if seen.insert(country) {
            options.push(country.to_string());
        }
    }
    options
}

/// Institution dropdown entries for the selected country. Every entry is an
/// exact key.
pub fn institution_options<R: Borrow<InstitutionRecord>>(
    records: &[R],
    selector: &CountrySelector,
) -> Vec<InstitutionKey> {
    filter_by_country(records, selector)
        .into_iter()
        .map(InstitutionRecord::key)
        .collect()
}

/// Resolve an institution selector against the dataset.
pub fn find_institution<'a, R: Borrow<InstitutionRecord>>(
    records: &'a [R],
    key: Option<&InstitutionKey>,
) -> Lookup<&'a InstitutionRecord> {
    let Some(key) = key.filter(|k| !k.name.trim().is_empty()) else {
        return Lookup::NoSelection;
    };
    let mut matches = iter_records(records).filter(|r| r.matches(key));
    match matches.next() {
        Some(record) => {
            if key.is_wildcard() && matches.any(|other| other.country != record.country) {
                warn!(institution = %key.name, "ambiguous name, using first match in {:?}", record.country);
            }
            Lookup::Found(record)
        }
        None => Lookup::NotFound(key.clone()),
    }
}
