use crate::columns;
use crate::util::parse_f64_safe;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use tabled::Tabled;

/// GFGP assessment tier. Declaration order is ranking order: Platinum first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum AssessmentLevel {
    Platinum,
    Gold,
    Silver,
    Bronze,
}

impl AssessmentLevel {
    pub const TIERS: [AssessmentLevel; 4] = [
        AssessmentLevel::Platinum,
        AssessmentLevel::Gold,
        AssessmentLevel::Silver,
        AssessmentLevel::Bronze,
    ];

    /// Exact, case-sensitive match on the tier label. Anything else is
    /// unranked.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim() {
            "Platinum" => Some(Self::Platinum),
            "Gold" => Some(Self::Gold),
            "Silver" => Some(Self::Silver),
            "Bronze" => Some(Self::Bronze),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Platinum => "Platinum",
            Self::Gold => "Gold",
            Self::Silver => "Silver",
            Self::Bronze => "Bronze",
        }
    }

    /// Badge image shown next to the level gauge.
    pub fn badge_asset(&self) -> &'static str {
        match self {
            Self::Platinum => "platinum.png",
            Self::Gold => "gold.jpeg",
            Self::Silver => "silver.jpeg",
            Self::Bronze => "bronze.jpeg",
        }
    }
}

impl fmt::Display for AssessmentLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which country an [`InstitutionKey`] is scoped to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CountryScope {
    /// Wildcard: the first institution with the name, in any country.
    Any,
    /// Only institutions without a country value.
    Unclassified,
    Country(String),
}

/// Identity of an institution. Names repeat across countries, so keys built
/// from records are always exact; only [`InstitutionKey::by_name`] matches
/// across countries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct InstitutionKey {
    pub country: CountryScope,
    pub name: String,
}

impl InstitutionKey {
    pub fn new(country: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            country: CountryScope::Country(country.into()),
            name: name.into(),
        }
    }

    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            country: CountryScope::Any,
            name: name.into(),
        }
    }

    pub fn is_wildcard(&self) -> bool {
        self.country == CountryScope::Any
    }
}

impl fmt::Display for InstitutionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.country {
            CountryScope::Any => f.write_str(&self.name),
            CountryScope::Unclassified => write!(f, "{} (no country)", self.name),
            CountryScope::Country(country) => write!(f, "{} ({})", self.name, country),
        }
    }
}

/// Outcome of resolving an institution selector.
///
/// `NoSelection` and `NotFound` are ordinary states of the dashboard, not
/// errors: the renderer shows a placeholder for both.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Lookup<T> {
    NoSelection,
    NotFound(InstitutionKey),
    Found(T),
}

impl<T> Lookup<T> {
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Lookup<U> {
        match self {
            Lookup::NoSelection => Lookup::NoSelection,
            Lookup::NotFound(key) => Lookup::NotFound(key),
            Lookup::Found(v) => Lookup::Found(f(v)),
        }
    }

    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }
}

/// One institution of the scorecard dataset.
///
/// The typed fields are derived from the row cells by [`InstitutionRecord::from_columns`];
/// `columns` keeps every non-missing cell of the row by header name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InstitutionRecord {
    pub name: String,
    pub country: Option<String>,
    pub institution_type: Option<String>,
    pub self_assessment_score: Option<f64>,
    pub assessment_level: Option<AssessmentLevel>,
    pub assessment_level_label: Option<String>,
    pub due_diligence_score: Option<f64>,
    pub score: Option<f64>,
    pub input_score: Option<f64>,
    pub output_score: Option<f64>,
    pub impact_score: Option<f64>,
    pub risk_rating: Option<String>,
    pub risk_rating_details: Option<String>,
    pub overall_assessment: Option<String>,
    pub grants_management: Option<String>,
    pub internal_audit: Option<String>,
    pub external_audit: Option<String>,
    pub columns: HashMap<String, String>,
}

impl InstitutionRecord {
    /// Build a record from a row of already-normalized cells (missing cells
    /// are simply absent). Returns `None` when the row has no name.
    pub fn from_columns(cells: HashMap<String, String>) -> Option<Self> {
        let name = cells
            .get(columns::NAME)
            .or_else(|| cells.get(columns::NAME_ALIAS))?
            .clone();
        let text = |column: &str| cells.get(column).cloned();
        let number = |column: &str| parse_f64_safe(cells.get(column).map(String::as_str));
        let assessment_level_label = text(columns::ASSESSMENT_LEVEL);
        Some(Self {
            name,
            country: text(columns::COUNTRY),
            institution_type: text(columns::INSTITUTION_TYPE),
            self_assessment_score: number(columns::SELF_ASSESSMENT_SCORE),
            assessment_level: assessment_level_label
                .as_deref()
                .and_then(AssessmentLevel::parse),
            assessment_level_label,
            due_diligence_score: number(columns::DUE_DILIGENCE_SCORE),
            score: number(columns::SCORE),
            input_score: number(columns::INPUT_SCORE),
            output_score: number(columns::OUTPUT_SCORE),
            impact_score: number(columns::IMPACT_SCORE),
            risk_rating: text(columns::RISK_RATING),
            risk_rating_details: text(columns::RISK_RATING_DETAILS),
            overall_assessment: text(columns::OVERALL_ASSESSMENT),
            grants_management: text(columns::GRANTS_MANAGEMENT),
            internal_audit: text(columns::INTERNAL_AUDIT),
            external_audit: text(columns::EXTERNAL_AUDIT),
            columns: cells,
        })
    }

    /// Exact key of this record. A record without a country gets an
    /// `Unclassified` key, never the wildcard.
    pub fn key(&self) -> InstitutionKey {
        InstitutionKey {
            country: match &self.country {
                Some(country) => CountryScope::Country(country.clone()),
                None => CountryScope::Unclassified,
            },
            name: self.name.clone(),
        }
    }

    pub fn matches(&self, key: &InstitutionKey) -> bool {
        self.name == key.name
            && match &key.country {
                CountryScope::Any => true,
                CountryScope::Unclassified => self.country.is_none(),
                CountryScope::Country(country) => self.country.as_deref() == Some(country.as_str()),
            }
    }

    /// Raw cell text by column name.
    pub fn text(&self, column: &str) -> Option<&str> {
        match column {
            columns::NAME | columns::NAME_ALIAS => Some(self.name.as_str()),
            columns::COUNTRY => self.country.as_deref(),
            columns::INSTITUTION_TYPE => self.institution_type.as_deref(),
            columns::ASSESSMENT_LEVEL => self.assessment_level_label.as_deref(),
            columns::RISK_RATING => self.risk_rating.as_deref(),
            columns::RISK_RATING_DETAILS => self.risk_rating_details.as_deref(),
            columns::OVERALL_ASSESSMENT => self.overall_assessment.as_deref(),
            columns::GRANTS_MANAGEMENT => self.grants_management.as_deref(),
            columns::INTERNAL_AUDIT => self.internal_audit.as_deref(),
            columns::EXTERNAL_AUDIT => self.external_audit.as_deref(),
            _ => self.columns.get(column).map(String::as_str),
        }
    }

    /// Numeric cell by column name. Scores use the values parsed at load time.
    pub fn number(&self, column: &str) -> Option<f64> {
        match column {
            columns::SELF_ASSESSMENT_SCORE => self.self_assessment_score,
            columns::DUE_DILIGENCE_SCORE => self.due_diligence_score,
            columns::SCORE => self.score,
            columns::INPUT_SCORE => self.input_score,
            columns::OUTPUT_SCORE => self.output_score,
            columns::IMPACT_SCORE => self.impact_score,
            _ => parse_f64_safe(self.columns.get(column).map(String::as_str)),
        }
    }
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct RankedRow {
    #[serde(rename = "Number")]
    #[tabled(rename = "Number")]
    pub number: usize,
    #[serde(rename = "Name of institution")]
    #[tabled(rename = "Name of institution")]
    pub name: String,
    #[serde(rename = "GFGP Self-Assessment Score")]
    #[tabled(rename = "GFGP Self-Assessment Score")]
    pub self_assessment_score: String,
    #[serde(rename = "GFGP Assessment Level")]
    #[tabled(rename = "GFGP Assessment Level")]
    pub assessment_level: String,
    #[serde(rename = "KPMG's due diligence overall score")]
    #[tabled(rename = "KPMG's due diligence overall score")]
    pub due_diligence_score: String,
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct TopScoreRow {
    #[serde(rename = "#")]
    #[tabled(rename = "#")]
    pub number: usize,
    #[serde(rename = "Institution")]
    #[tabled(rename = "Institution")]
    pub institution: String,
    #[serde(rename = "Score")]
    #[tabled(rename = "Score")]
    pub score: String,
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct CountryCountRow {
    #[serde(rename = "Country")]
    #[tabled(rename = "Country")]
    pub country: String,
    #[serde(rename = "Number of Institutions")]
    #[tabled(rename = "Number of Institutions")]
    pub institutions: usize,
}

#[derive(Debug, Serialize, Tabled, Clone, Copy, PartialEq, Eq)]
pub struct HistogramBucket {
    #[serde(rename = "Score")]
    #[tabled(rename = "Score")]
    pub bucket: i64,
    #[serde(rename = "Count")]
    #[tabled(rename = "Count")]
    pub count: usize,
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq, Eq)]
pub struct LevelCount {
    #[serde(rename = "Label")]
    #[tabled(rename = "Label")]
    pub label: String,
    #[serde(rename = "Count")]
    #[tabled(rename = "Count")]
    pub count: usize,
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct ParameterRow {
    #[serde(rename = "Parameter")]
    #[tabled(rename = "Parameter")]
    pub parameter: String,
    #[serde(rename = "Assessment")]
    #[tabled(rename = "Assessment")]
    pub assessment: String,
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct DueDiligenceBar {
    #[serde(rename = "Institution")]
    #[tabled(rename = "Institution")]
    pub institution: String,
    #[serde(rename = "Score")]
    #[tabled(rename = "Score")]
    pub score: f64,
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct ComparisonBar {
    #[serde(rename = "Institution Name")]
    #[tabled(rename = "Institution Name")]
    pub institution: String,
    #[serde(rename = "Variable")]
    #[tabled(rename = "Variable")]
    pub variable: String,
    #[serde(rename = "Value")]
    #[tabled(rename = "Value")]
    pub value: f64,
}
