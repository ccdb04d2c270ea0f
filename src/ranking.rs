use crate::filter::{find_institution, iter_records, CountrySelector};
use crate::types::{
    AssessmentLevel, InstitutionKey, InstitutionRecord, Lookup, RankedRow, TopScoreRow,
};
use crate::util::{format_score, NOT_AVAILABLE};
use serde::Serialize;
use std::borrow::Borrow;
use std::cmp::Ordering;

/// Institution at position 1 of a ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Leader {
    pub name: String,
    pub country: Option<String>,
    /// `"COUNTRY: <country>"` for a cross-country ranking, empty otherwise.
    pub country_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranking {
    pub rows: Vec<RankedRow>,
    pub leader: Option<Leader>,
}

impl Ranking {
    pub fn leader_name(&self) -> &str {
        self.leader.as_ref().map_or("None", |l| l.name.as_str())
    }

    pub fn leader_country_label(&self) -> &str {
        self.leader.as_ref().map_or("", |l| l.country_label.as_str())
    }
}

/// Global and within-country position of one institution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RankPair {
    /// Over every institution, by `SCORE`. `None` when the institution has no score.
    pub global_rank: Option<usize>,
    /// Within the institution's country, by due-diligence score.
    pub country_rank: Option<usize>,
}

/// Sort position of a tier; unranked institutions come after Bronze.
pub fn tier_position(level: Option<AssessmentLevel>) -> usize {
    match level {
        Some(level) => level as usize,
        None => AssessmentLevel::TIERS.len(),
    }
}

/// Descending comparison with missing values last.
fn descending_missing_last(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn ranking_order(a: &InstitutionRecord, b: &InstitutionRecord) -> Ordering {
    tier_position(a.assessment_level)
        .cmp(&tier_position(b.assessment_level))
        .then_with(|| descending_missing_last(a.due_diligence_score, b.due_diligence_score))
}

/// Order a subset by assessment tier, then by due-diligence score, numbering
/// the result from 1. Ties keep their input order.
pub fn rank_institutions<R: Borrow<InstitutionRecord>>(
    subset: &[R],
    selector: &CountrySelector,
) -> Ranking {
    let mut ordered: Vec<&InstitutionRecord> = iter_records(subset).collect();
    ordered.sort_by(|a, b| ranking_order(a, b));

    let leader = ordered.first().map(|top| Leader {
        name: top.name.clone(),
        country: top.country.clone(),
        country_label: if selector.is_all() {
            format!("COUNTRY: {}", top.country.as_deref().unwrap_or(""))
        } else {
            String::new()
        },
    });

    let rows = ordered
        .into_iter()
        .enumerate()
        .map(|(idx, r)| RankedRow {
            number: idx + 1,
            name: r.name.clone(),
            self_assessment_score: format_score(r.self_assessment_score),
            assessment_level: r
                .assessment_level_label
                .clone()
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            due_diligence_score: format_score(r.due_diligence_score),
        })
        .collect();

    Ranking { rows, leader }
}

/// Competition ("min") rank of `target` among `values`, highest first: equal
/// values share the smallest rank of their group and the next distinct value
/// skips past the whole group. Missing values are not ranked.
pub fn min_rank_descending(
    values: impl IntoIterator<Item = Option<f64>>,
    target: Option<f64>,
) -> Option<usize> {
    let target = target?;
    Some(1 + values.into_iter().flatten().filter(|v| *v > target).count())
}

/// Rank an institution over the whole population (by `SCORE`) and within its
/// own country (by due-diligence score).
pub fn compute_rank<R: Borrow<InstitutionRecord>>(
    records: &[R],
    key: Option<&InstitutionKey>,
) -> Lookup<RankPair> {
    let target = match find_institution(records, key) {
        Lookup::Found(r) => r,
        Lookup::NoSelection => return Lookup::NoSelection,
        Lookup::NotFound(k) => return Lookup::NotFound(k),
    };

    Lookup::Found(rank_record(records, target))
}

/// Ranks of an already-resolved record.
pub fn rank_record<R: Borrow<InstitutionRecord>>(records: &[R], target: &InstitutionRecord) -> RankPair {
    let global_rank = min_rank_descending(iter_records(records).map(|r| r.score), target.score);
    let country_rank = target.country.as_deref().and_then(|country| {
        let peers = iter_records(records)
            .filter(|r| r.country.as_deref() == Some(country))
            .map(|r| r.due_diligence_score);
        min_rank_descending(peers, target.due_diligence_score)
    });
    RankPair {
        global_rank,
        country_rank,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns;

    fn inst(
        name: &str,
        country: &str,
        level: Option<AssessmentLevel>,
        due_diligence: Option<f64>,
    ) -> InstitutionRecord {
        InstitutionRecord {
            name: name.into(),
            country: Some(country.into()),
            assessment_level: level,
            assessment_level_label: level.map(|l| l.as_str().to_string()),
            due_diligence_score: due_diligence,
            ..Default::default()
        }
    }

    fn scored(name: &str, country: &str, score: Option<f64>, due_diligence: Option<f64>) -> InstitutionRecord {
        InstitutionRecord {
            score,
            ..inst(name, country, None, due_diligence)
        }
    }

    fn order(ranking: &Ranking) -> Vec<&str> {
        ranking.rows.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn tier_beats_due_diligence_score() {
        let subset = vec![
            inst("A", "Kenya", Some(AssessmentLevel::Gold), Some(0.8)),
            inst("B", "Kenya", Some(AssessmentLevel::Platinum), Some(0.5)),
        ];
        let ranking = rank_institutions(&subset, &CountrySelector::All);
        assert_eq!(order(&ranking), vec!["B", "A"]);
        assert_eq!(ranking.rows[0].number, 1);
        assert_eq!(ranking.rows[1].number, 2);
    }

    #[test]
    fn unranked_sort_after_bronze_and_missing_scores_last_within_tier() {
        let subset = vec![
            inst("none", "Kenya", None, Some(0.99)),
            inst("bronze", "Kenya", Some(AssessmentLevel::Bronze), Some(0.1)),
            inst("silver-missing", "Kenya", Some(AssessmentLevel::Silver), None),
            inst("silver-high", "Kenya", Some(AssessmentLevel::Silver), Some(0.7)),
        ];
        let ranking = rank_institutions(&subset, &CountrySelector::All);
        assert_eq!(
            order(&ranking),
            vec!["silver-high", "silver-missing", "bronze", "none"]
        );
        assert_eq!(ranking.rows[3].assessment_level, "N/A");
        assert_eq!(ranking.rows[1].due_diligence_score, "N/A");
    }

    #[test]
    fn full_ties_keep_input_order() {
        let subset = vec![
            inst("first", "Kenya", Some(AssessmentLevel::Gold), Some(0.6)),
            inst("second", "Kenya", Some(AssessmentLevel::Gold), Some(0.6)),
            inst("third", "Kenya", Some(AssessmentLevel::Gold), Some(0.6)),
        ];
        let once = rank_institutions(&subset, &CountrySelector::All);
        let twice = rank_institutions(&subset, &CountrySelector::All);
        assert_eq!(order(&once), vec!["first", "second", "third"]);
        assert_eq!(once, twice);
    }

    #[test]
    fn leader_country_only_labelled_for_all_countries() {
        let subset = vec![inst("A", "Ghana", Some(AssessmentLevel::Gold), Some(0.8))];
        let all = rank_institutions(&subset, &CountrySelector::All);
        assert_eq!(all.leader_name(), "A");
        assert_eq!(all.leader_country_label(), "COUNTRY: Ghana");

        let ghana = rank_institutions(&subset, &CountrySelector::Country("Ghana".into()));
        assert_eq!(ghana.leader_country_label(), "");
        assert_eq!(ghana.leader.unwrap().country.as_deref(), Some("Ghana"));
    }

    #[test]
    fn empty_subset_has_no_leader() {
        let subset: Vec<InstitutionRecord> = Vec::new();
        let ranking = rank_institutions(&subset, &CountrySelector::All);
        assert!(ranking.rows.is_empty());
        assert_eq!(ranking.leader_name(), "None");
        assert_eq!(ranking.leader_country_label(), "");
    }

    #[test]
    fn min_rank_shares_rank_and_skips_after_ties() {
        let values = [Some(30.0), Some(20.0), Some(20.0), Some(20.0), Some(10.0), None];
        assert_eq!(min_rank_descending(values, Some(30.0)), Some(1));
        assert_eq!(min_rank_descending(values, Some(20.0)), Some(2));
        assert_eq!(min_rank_descending(values, Some(10.0)), Some(5));
        assert_eq!(min_rank_descending(values, None), None);
    }

    #[test]
    fn compute_rank_uses_score_globally_and_due_diligence_in_country() {
        let records = vec![
            scored("A", "Kenya", Some(25.0), Some(0.9)),
            scored("B", "Kenya", Some(30.0), Some(0.4)),
            scored("C", "Ghana", Some(30.0), Some(0.95)),
            scored("D", "Kenya", Some(12.0), Some(0.9)),
        ];
        let pair = compute_rank(&records, Some(&InstitutionKey::new("Kenya", "A")))
            .found()
            .unwrap();
        assert_eq!(pair.global_rank, Some(3));
        assert_eq!(pair.country_rank, Some(1));

        let d = compute_rank(&records, Some(&InstitutionKey::new("Kenya", "D")))
            .found()
            .unwrap();
        assert_eq!(d.global_rank, Some(4));
        assert_eq!(d.country_rank, Some(1));

        let b = compute_rank(&records, Some(&InstitutionKey::new("Kenya", "B")))
            .found()
            .unwrap();
        assert_eq!(b.global_rank, Some(1));
        assert_eq!(b.country_rank, Some(3));
    }

    #[test]
    fn compute_rank_reports_missing_and_unknown() {
        let records = vec![scored("A", "Kenya", None, None)];
        assert_eq!(compute_rank(&records, None), Lookup::NoSelection);
        let unknown = InstitutionKey::by_name("Z");
        assert_eq!(
            compute_rank(&records, Some(&unknown)),
            Lookup::NotFound(unknown.clone())
        );
        let pair = compute_rank(&records, Some(&InstitutionKey::by_name("A")))
            .found()
            .unwrap();
        assert_eq!(pair.global_rank, None);
        assert_eq!(pair.country_rank, None);
    }

    #[test]
    fn top_by_score_limits_and_numbers_rows() {
        let records = vec![
            scored("low", "Kenya", Some(5.0), None),
            scored("none", "Kenya", None, None),
            scored("high", "Kenya", Some(31.0), None),
            scored("mid", "Kenya", Some(18.0), None),
        ];
        let top = top_by_score(&records, columns::SCORE, 3);
        let names: Vec<&str> = top.iter().map(|r| r.institution.as_str()).collect();
        assert_eq!(names, vec!["high", "mid", "low"]);
        assert_eq!(top[0].number, 1);
        assert_eq!(top[0].score, "31");
    }
}
