// View models for one selector change.
//
// Each function recomputes its view from the immutable store and hands it
// back to the caller; nothing derived is kept between calls.
use crate::aggregation::{
    count_by_country, country_count_rows, department_splits, due_diligence_scores,
    level_distribution, score_histograms, DepartmentSplits, ScoreHistograms,
};
use crate::columns;
use crate::detail::{extract_category, gauges, summarize, Category, Gauges, InstitutionSummary};
use crate::filter::{filter_by_country, find_institution, institution_options, CountrySelector};
use crate::ranking::{rank_institutions, rank_record, top_by_score, RankPair, Ranking};
use crate::store::DatasetStore;
use crate::types::{
    CountryCountRow, DueDiligenceBar, InstitutionKey, LevelCount, Lookup, ParameterRow,
    TopScoreRow,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopTables {
    pub input: Vec<TopScoreRow>,
    pub output: Vec<TopScoreRow>,
    pub impact: Vec<TopScoreRow>,
    pub overall: Vec<TopScoreRow>,
}

/// Everything that reacts to the country selector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryView {
    pub country: String,
    /// `Country: <label>` caption of the department charts.
    pub country_caption: String,
    /// Size of the whole dataset, independent of the selector.
    pub total_institutions: usize,
    pub ranking: Ranking,
    pub institution_options: Vec<InstitutionKey>,
    pub top: TopTables,
    pub histograms: ScoreHistograms,
    pub departments: DepartmentSplits,
}

/// Population-wide charts that do not depend on any selector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
    pub institutions_per_country: Vec<CountryCountRow>,
    pub due_diligence: Vec<DueDiligenceBar>,
    pub assessment_levels: Vec<LevelCount>,
    pub risk_ratings: Vec<LevelCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTable {
    pub category: Category,
    pub title: &'static str,
    pub rows: Vec<ParameterRow>,
}

/// Everything that reacts to the institution selector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstitutionView {
    pub key: InstitutionKey,
    pub summary: InstitutionSummary,
    pub gauges: Gauges,
    pub ranks: RankPair,
    pub categories: Vec<CategoryTable>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub generated_at: DateTime<Utc>,
    pub overview: Overview,
    pub country: CountryView,
    pub institution: Lookup<InstitutionView>,
}

pub fn country_view(store: &DatasetStore, selector: &CountrySelector, top_n: usize) -> CountryView {
    let subset = filter_by_country(store.records(), selector);
    debug!(country = selector.label(), institutions = subset.len(), "recomputing country view");
    CountryView {
        country: selector.label().to_string(),
        country_caption: format!("Country: {}", selector.label()),
        total_institutions: store.len(),
        ranking: rank_institutions(&subset, selector),
        institution_options: institution_options(store.records(), selector),
        top: TopTables {
            input: top_by_score(&subset, columns::INPUT_SCORE, top_n),
            output: top_by_score(&subset, columns::OUTPUT_SCORE, top_n),
            impact: top_by_score(&subset, columns::IMPACT_SCORE, top_n),
            overall: top_by_score(&subset, columns::SCORE, top_n),
        },
        histograms: score_histograms(&subset),
        departments: department_splits(&subset),
    }
}

pub fn overview(store: &DatasetStore) -> Overview {
    let records = store.records();
    Overview {
        institutions_per_country: country_count_rows(&count_by_country(records)),
        due_diligence: due_diligence_scores(records),
        assessment_levels: level_distribution(records, columns::ASSESSMENT_LEVEL),
        risk_ratings: level_distribution(records, columns::RISK_RATING),
    }
}

pub fn institution_view(store: &DatasetStore, key: Option<&InstitutionKey>) -> Lookup<InstitutionView> {
    let record = match find_institution(store.records(), key) {
        Lookup::Found(r) => r,
        Lookup::NoSelection => return Lookup::NoSelection,
        Lookup::NotFound(k) => {
            debug!(institution = %k, "institution not in dataset");
            return Lookup::NotFound(k);
        }
    };
    let ranks = rank_record(store.records(), record);
    let categories = Category::ALL
        .iter()
        .map(|&category| CategoryTable {
            category,
            title: category.title(),
            rows: extract_category(record, category),
        })
        .collect();
    Lookup::Found(InstitutionView {
        key: record.key(),
        summary: summarize(record),
        gauges: gauges(record),
        ranks,
        categories,
    })
}

pub fn snapshot(
    store: &DatasetStore,
    selector: &CountrySelector,
    institution: Option<&InstitutionKey>,
    top_n: usize,
) -> DashboardSnapshot {
    DashboardSnapshot {
        generated_at: Utc::now(),
        overview: overview(store),
        country: country_view(store, selector, top_n),
        institution: institution_view(store, institution),
    }
}
