// Per-institution detail: category parameter tables, the summary panel and
// the gauges. Every missing value is rendered as "N/A" here and nowhere else.
use crate::columns;
use crate::filter::find_institution;
use crate::types::{InstitutionKey, InstitutionRecord, Lookup, ParameterRow};
use crate::util::NOT_AVAILABLE;
use serde::Serialize;
use std::borrow::Borrow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    FinancialManagement,
    Procurement,
    HumanResources,
    Governance,
    RiskManagement,
    FiduciaryFindings,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::FinancialManagement,
        Category::Procurement,
        Category::HumanResources,
        Category::Governance,
        Category::RiskManagement,
        Category::FiduciaryFindings,
    ];

    /// Parameter columns of the category, in display order.
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Self::FinancialManagement => &columns::FINANCIAL_MANAGEMENT,
            Self::Procurement => &columns::PROCUREMENT,
            Self::HumanResources => &columns::HUMAN_RESOURCES,
            Self::Governance => &columns::GOVERNANCE,
            Self::RiskManagement => &columns::RISK_MANAGEMENT,
            Self::FiduciaryFindings => &columns::FIDUCIARY_FINDINGS,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::FinancialManagement => "Financial Management",
            Self::Procurement => "Procurement",
            Self::HumanResources => "Human Resources",
            Self::Governance => "Governance",
            Self::RiskManagement => "Risk Management",
            Self::FiduciaryFindings => "Summary of Fiduciary Risks",
        }
    }

    /// File-name friendly tag.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::FinancialManagement => "financial",
            Self::Procurement => "procurement",
            Self::HumanResources => "hr",
            Self::Governance => "governance",
            Self::RiskManagement => "risk",
            Self::FiduciaryFindings => "fiduciary",
        }
    }
}

fn or_not_available(value: Option<&str>) -> String {
    value.unwrap_or(NOT_AVAILABLE).to_string()
}

/// (parameter, assessment) pairs of one category in declaration order.
pub fn extract_category(record: &InstitutionRecord, category: Category) -> Vec<ParameterRow> {
    category
        .columns()
        .iter()
        .map(|column| ParameterRow {
            parameter: column.to_string(),
            assessment: or_not_available(record.text(column)),
        })
        .collect()
}

pub fn extract_institution_category<R: Borrow<InstitutionRecord>>(
    records: &[R],
    key: Option<&InstitutionKey>,
    category: Category,
) -> Lookup<Vec<ParameterRow>> {
    find_institution(records, key).map(|r| extract_category(r, category))
}

pub const GRANTS_SECTION: &str = "Presence of Grants Administration and Management Policy";
pub const AUDIT_SECTION: &str = "Presence of Audit Units";

/// Summary panel of one institution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstitutionSummary {
    pub overall_assessment: String,
    pub risk_rating: String,
    pub risk_rating_details: String,
    pub grants_management: String,
    /// Always prefixed: `Internal: <value>` or `Internal: N/A`.
    pub internal_audit: String,
    /// Always prefixed: `External: <value>` or `External: N/A`.
    pub external_audit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplaySection {
    pub section: &'static str,
    pub value: String,
}

impl InstitutionSummary {
    /// The summary as labelled display rows; both audit flags sit under
    /// the "Presence of Audit Units" heading.
    pub fn sections(&self) -> Vec<DisplaySection> {
        let row = |section: &'static str, value: &str| DisplaySection {
            section,
            value: value.to_string(),
        };
        vec![
            row("Overall Assessment", &self.overall_assessment),
            row("Risk Rating", &self.risk_rating),
            row("Risk Rating Details", &self.risk_rating_details),
            row(GRANTS_SECTION, &self.grants_management),
            row(AUDIT_SECTION, &self.internal_audit),
            row(AUDIT_SECTION, &self.external_audit),
        ]
    }
}

pub fn summarize(record: &InstitutionRecord) -> InstitutionSummary {
    InstitutionSummary {
        overall_assessment: or_not_available(record.overall_assessment.as_deref()),
        risk_rating: or_not_available(record.risk_rating.as_deref()),
        risk_rating_details: or_not_available(record.risk_rating_details.as_deref()),
        grants_management: or_not_available(record.grants_management.as_deref()),
        internal_audit: format!("Internal: {}", or_not_available(record.internal_audit.as_deref())),
        external_audit: format!("External: {}", or_not_available(record.external_audit.as_deref())),
    }
}

/// Red/green bands of a gauge: red up to the value, green above it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GaugeRanges {
    pub red: Option<(f64, f64)>,
    pub green: Option<(f64, f64)>,
}

pub fn gauge_ranges(value: Option<f64>, max: f64) -> GaugeRanges {
    match value {
        Some(v) if v >= max => GaugeRanges {
            red: None,
            green: Some((0.0, max)),
        },
        Some(v) if v > 0.0 => GaugeRanges {
            red: Some((0.0, v)),
            green: Some((v, max)),
        },
        _ => GaugeRanges {
            red: Some((0.0, max)),
            green: None,
        },
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Gauge {
    /// Needle position; a missing score reads as 0.
    pub value: f64,
    pub max: f64,
    pub ranges: GaugeRanges,
}

impl Gauge {
    pub fn new(value: Option<f64>, max: f64) -> Self {
        Self {
            value: value.unwrap_or(0.0),
            max,
            ranges: gauge_ranges(value, max),
        }
    }
}

pub const OVERALL_SCORE_MAX: f64 = 35.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Gauges {
    pub self_assessment: Gauge,
    pub due_diligence: Gauge,
    pub overall: Gauge,
    pub assessment_level: String,
    pub badge_asset: Option<&'static str>,
    pub institution_label: String,
    pub country_label: String,
}

pub fn gauges(record: &InstitutionRecord) -> Gauges {
    Gauges {
        self_assessment: Gauge::new(record.self_assessment_score, 1.0),
        due_diligence: Gauge::new(record.due_diligence_score, 1.0),
        overall: Gauge::new(record.score, OVERALL_SCORE_MAX),
        assessment_level: record.assessment_level_label.clone().unwrap_or_default(),
        badge_asset: record.assessment_level.map(|l| l.badge_asset()),
        institution_label: format!("Institution: {}", record.name),
        country_label: format!("Country: {}", record.country.as_deref().unwrap_or(NOT_AVAILABLE)),
    }
}
