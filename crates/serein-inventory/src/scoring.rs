use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Risk band derived from a total stress score. Thresholds are evaluated
/// high to low, first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskBand {
    Low,
    Moderate,
    Elevated,
    High,
}

impl RiskBand {
    pub fn for_total(total: i32) -> Self {
        if total > 300 {
            RiskBand::High
        } else if total > 200 {
            RiskBand::Elevated
        } else if total >= 150 {
            RiskBand::Moderate
        } else {
            RiskBand::Low
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            RiskBand::High => "high risk (~80%)",
            RiskBand::Elevated => "elevated risk (~50%)",
            RiskBand::Moderate => "moderate risk (~37%)",
            RiskBand::Low => "low risk",
        }
    }
}

/// The computed outcome of one selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StressScore {
    pub total: i32,
    pub band: RiskBand,
}

/// Sum the point values of the selected events and resolve the band.
///
/// Duplicate ids count once. Ids the lookup does not recognize contribute
/// nothing. The empty selection scores 0 and lands in the low band.
pub fn score_selection<F>(event_ids: &[i32], lookup: F) -> StressScore
where
    F: Fn(i32) -> Option<i32>,
{
    let unique: BTreeSet<i32> = event_ids.iter().copied().collect();
    let total = unique.into_iter().filter_map(lookup).sum();

    StressScore {
        total,
        band: RiskBand::for_total(total),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::point_value;

    #[test]
    fn band_boundaries() {
        assert_eq!(RiskBand::for_total(149), RiskBand::Low);
        assert_eq!(RiskBand::for_total(150), RiskBand::Moderate);
        assert_eq!(RiskBand::for_total(200), RiskBand::Moderate);
        assert_eq!(RiskBand::for_total(201), RiskBand::Elevated);
        assert_eq!(RiskBand::for_total(300), RiskBand::Elevated);
        assert_eq!(RiskBand::for_total(301), RiskBand::High);
    }

    #[test]
    fn empty_selection_scores_zero_low() {
        let score = score_selection(&[], point_value);
        assert_eq!(score.total, 0);
        assert_eq!(score.band, RiskBand::Low);
        assert_eq!(score.band.message(), "low risk");
    }

    #[test]
    fn divorce_plus_separation_is_low() {
        let score = score_selection(&[2, 3], point_value);
        assert_eq!(score.total, 138);
        assert_eq!(score.band, RiskBand::Low);
    }

    #[test]
    fn spouse_divorce_imprisonment_is_elevated() {
        let score = score_selection(&[1, 2, 4], point_value);
        assert_eq!(score.total, 236);
        assert_eq!(score.band, RiskBand::Elevated);
        assert_eq!(score.band.message(), "elevated risk (~50%)");
    }

    #[test]
    fn selection_order_does_not_matter() {
        let a = score_selection(&[1, 2, 4], point_value);
        let b = score_selection(&[4, 1, 2], point_value);
        assert_eq!(a.total, b.total);
        assert_eq!(a.band, b.band);
    }

    #[test]
    fn duplicates_count_once() {
        let once = score_selection(&[2], point_value);
        let twice = score_selection(&[2, 2, 2], point_value);
        assert_eq!(once.total, 73);
        assert_eq!(twice.total, 73);
    }

    #[test]
    fn unknown_ids_are_skipped() {
        let score = score_selection(&[2, 3, 999], point_value);
        assert_eq!(score.total, 138);
    }

    #[test]
    fn scoring_is_idempotent() {
        let first = score_selection(&[1, 2], point_value);
        let second = score_selection(&[1, 2], point_value);
        assert_eq!(first.total, second.total);
        assert_eq!(first.band, second.band);
    }
}
