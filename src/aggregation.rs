use crate::columns;
use crate::filter::{find_institution, iter_records};
use crate::types::{
    ComparisonBar, CountryCountRow, DueDiligenceBar, HistogramBucket, InstitutionKey,
    InstitutionRecord, LevelCount, Lookup,
};
use crate::util::round_to;
use serde::Serialize;
use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::ops::RangeInclusive;

pub const YES: &str = "Yes";
pub const NO: &str = "No";

/// Bucket range of the input, output and impact score charts.
pub const COMPONENT_SCORE_BUCKETS: RangeInclusive<i64> = 1..=10;
/// Bucket range of the overall `SCORE` chart.
pub const OVERALL_SCORE_BUCKETS: RangeInclusive<i64> = 1..=35;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SplitPercentages {
    pub yes_pct: f64,
    pub no_pct: f64,
}

/// Yes/No tally of one categorical column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoricalSplit {
    pub yes_count: usize,
    pub no_count: usize,
    /// `None` is the "no data" result: there is no "Yes" answer to chart.
    pub percentages: Option<SplitPercentages>,
}

impl CategoricalSplit {
    pub fn is_no_data(&self) -> bool {
        self.percentages.is_none()
    }

    /// Pie slice labels, e.g. `Yes: 3 (60.00%)`. Empty for the no-data case.
    pub fn labels(&self) -> Vec<String> {
        match self.percentages {
            Some(p) => vec![
                format!("Yes: {} ({:.2}%)", self.yes_count, p.yes_pct),
                format!("No: {} ({:.2}%)", self.no_count, p.no_pct),
            ],
            None => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreHistograms {
    pub input: Vec<HistogramBucket>,
    pub output: Vec<HistogramBucket>,
    pub impact: Vec<HistogramBucket>,
    pub overall: Vec<HistogramBucket>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentSplits {
    pub medical: CategoricalSplit,
    pub agriculture: CategoricalSplit,
    pub sociology: CategoricalSplit,
    pub business: CategoricalSplit,
}

/// Grouped bars comparing two institutions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub bars: Vec<ComparisonBar>,
    /// Upper bound of the value axis: 10% above the tallest bar.
    pub y_max: f64,
}

/// Number of distinct institution names per country. Rows without a
/// country are not counted.
pub fn count_by_country<R: Borrow<InstitutionRecord>>(records: &[R]) -> BTreeMap<String, usize> {
    let mut names: BTreeMap<&str, HashSet<&str>> = BTreeMap::new();
    for r in iter_records(records) {
        if let Some(country) = r.country.as_deref() {
            names.entry(country).or_default().insert(r.name.as_str());
        }
    }
    names
        .into_iter()
        .map(|(country, set)| (country.to_string(), set.len()))
        .collect()
}

pub fn country_count_rows(counts: &BTreeMap<String, usize>) -> Vec<CountryCountRow> {
    counts
        .iter()
        .map(|(country, n)| CountryCountRow {
            country: country.clone(),
            institutions: *n,
        })
        .collect()
}

/// Dense histogram: one bucket per integer in `buckets`, counting records
/// whose value equals the bucket exactly. Empty buckets are kept.
pub fn histogram<R: Borrow<InstitutionRecord>>(
    records: &[R],
    column: &str,
    buckets: RangeInclusive<i64>,
) -> Vec<HistogramBucket> {
    let mut counts: HashMap<i64, usize> = HashMap::new();
    for value in iter_records(records).filter_map(|r| r.number(column)) {
        if value.fract() == 0.0 {
            *counts.entry(value as i64).or_insert(0) += 1;
        }
    }
    buckets
        .map(|bucket| HistogramBucket {
            bucket,
            count: counts.get(&bucket).copied().unwrap_or(0),
        })
        .collect()
}

pub fn score_histograms<R: Borrow<InstitutionRecord>>(records: &[R]) -> ScoreHistograms {
    ScoreHistograms {
        input: histogram(records, columns::INPUT_SCORE, COMPONENT_SCORE_BUCKETS),
        output: histogram(records, columns::OUTPUT_SCORE, COMPONENT_SCORE_BUCKETS),
        impact: histogram(records, columns::IMPACT_SCORE, COMPONENT_SCORE_BUCKETS),
        overall: histogram(records, columns::SCORE, OVERALL_SCORE_BUCKETS),
    }
}

/// Count exact `Yes` / `No` answers in a column. Percentages (rounded to two
/// decimals) are only produced when at least one answer is `Yes`.
pub fn categorical_split<R: Borrow<InstitutionRecord>>(records: &[R], column: &str) -> CategoricalSplit {
    let (mut yes_count, mut no_count) = (0usize, 0usize);
    for value in iter_records(records).filter_map(|r| r.text(column)) {
        match value {
            YES => yes_count += 1,
            NO => no_count += 1,
            _ => {}
        }
    }
    let percentages = (yes_count > 0).then(|| {
        let total = (yes_count + no_count) as f64;
        SplitPercentages {
            yes_pct: round_to(yes_count as f64 / total * 100.0, 2),
            no_pct: round_to(no_count as f64 / total * 100.0, 2),
        }
    });
    CategoricalSplit {
        yes_count,
        no_count,
        percentages,
    }
}

pub fn department_splits<R: Borrow<InstitutionRecord>>(records: &[R]) -> DepartmentSplits {
    DepartmentSplits {
        medical: categorical_split(records, columns::MEDICAL_DEPARTMENT),
        agriculture: categorical_split(records, columns::AGRICULTURE_DEPARTMENT),
        sociology: categorical_split(records, columns::SOCIOLOGY_DEPARTMENT),
        business: categorical_split(records, columns::BUSINESS_DEPARTMENT),
    }
}

/// Tally of every distinct value of a categorical column, most frequent
/// first (ties by label). Missing cells are not counted.
pub fn level_distribution<R: Borrow<InstitutionRecord>>(records: &[R], column: &str) -> Vec<LevelCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for value in iter_records(records).filter_map(|r| r.text(column)) {
        *counts.entry(value).or_insert(0) += 1;
    }
    let mut tally: Vec<LevelCount> = counts
        .into_iter()
        .map(|(label, count)| LevelCount {
            label: label.to_string(),
            count,
        })
        .collect();
    tally.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    tally
}

/// Due-diligence score per institution, skipping institutions without one.
pub fn due_diligence_scores<R: Borrow<InstitutionRecord>>(records: &[R]) -> Vec<DueDiligenceBar> {
    iter_records(records)
        .filter_map(|r| {
            r.due_diligence_score.map(|score| DueDiligenceBar {
                institution: r.name.clone(),
                score,
            })
        })
        .collect()
}

const COMPARED_SCORES: [(&str, &str); 4] = [
    (columns::INPUT_SCORE, "Overall Input Score"),
    (columns::OUTPUT_SCORE, "Overall Output Score"),
    (columns::IMPACT_SCORE, "Overall Impact Score"),
    (columns::SCORE, "FINAL SCORE"),
];

/// Side-by-side input, output, impact and final scores of two institutions.
/// A missing score is drawn as 0.
pub fn compare_institutions<R: Borrow<InstitutionRecord>>(
    records: &[R],
    first: Option<&InstitutionKey>,
    second: Option<&InstitutionKey>,
) -> Lookup<Comparison> {
    let (a, b) = match (find_institution(records, first), find_institution(records, second)) {
        (Lookup::Found(a), Lookup::Found(b)) => (a, b),
        (Lookup::NotFound(key), _) | (_, Lookup::NotFound(key)) => return Lookup::NotFound(key),
        _ => return Lookup::NoSelection,
    };

    let mut bars = Vec::with_capacity(COMPARED_SCORES.len() * 2);
    for (column, variable) in COMPARED_SCORES {
        for r in [a, b] {
            bars.push(ComparisonBar {
                institution: r.name.clone(),
                variable: variable.to_string(),
                value: r.number(column).unwrap_or(0.0),
            });
        }
    }
    let y_max = bars.iter().map(|bar| bar.value).fold(0.0, f64::max) * 1.1;
    Lookup::Found(Comparison { bars, y_max })
}
