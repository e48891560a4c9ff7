use crate::slate::{Position, Tier};

use super::config::ScoringConfig;
use super::evaluators::Flag;
use super::percentile::percentile_ranks_scaled;

/// Tier cutoffs, as percentiles of final_score over the whole scored
/// population: top decile, next two, next three, remainder.
const MUST_CUTOFF: f64 = 90.0;
const WANT_CUTOFF: f64 = 70.0;
const VIABLE_CUTOFF: f64 = 40.0;

/// Blend cash and importance into the final score. Weights are normalized
/// by their sum, keeping the result on the 0-100 scale for any valid pair.
pub fn final_score(cash_score: f64, importance_score: f64, config: &ScoringConfig) -> f64 {
    let total = config.w_cash + config.w_importance;
    (config.w_cash * cash_score + config.w_importance * importance_score) / total
}

/// Assign tiers across the full population (not per position). Midpoint tie
/// ranks plus `>=` cutoffs resolve boundary ties toward the higher tier.
pub fn assign_tiers(final_scores: &[f64]) -> Vec<Tier> {
    percentile_ranks_scaled(final_scores)
        .into_iter()
        .map(|pr| {
            if pr >= MUST_CUTOFF {
                Tier::Must
            } else if pr >= WANT_CUTOFF {
                Tier::Want
            } else if pr >= VIABLE_CUTOFF {
                Tier::Viable
            } else {
                Tier::Fade
            }
        })
        .collect()
}

/// Assemble the ordered reasons list: evaluator flags first, then a
/// confidence note when data was thin, then the numeric justification.
pub fn build_reasons(
    flags: &[Flag],
    confidence: f64,
    role_percentile: f64,
    importance_score: f64,
    position: Position,
) -> Vec<String> {
    let mut reasons: Vec<String> = flags.iter().map(|f| f.label().to_string()).collect();

    if confidence < 1.0 {
        reasons.push(format!("confidence {confidence:.2}: scored on partial data"));
    }

    let top_pct = (100.0 - role_percentile).max(1.0);
    reasons.push(format!("top-{top_pct:.0}% role in {position} pool"));

    if importance_score > 0.0 {
        reasons.push(format!(
            "+{importance_score:.0} leverage vs replacement"
        ));
    } else {
        reasons.push("no leverage edge vs replacement".to_string());
    }

    reasons
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_final_score_default_blend() {
        let config = ScoringConfig::default();
        let f = final_score(80.0, 50.0, &config);
        assert!((f - (0.6 * 80.0 + 0.4 * 50.0)).abs() < 1e-12);
    }

    #[test]
    fn test_final_score_normalizes_weight_sum() {
        let config = ScoringConfig {
            w_cash: 3.0,
            w_importance: 1.0,
            ..Default::default()
        };
        let f = final_score(100.0, 0.0, &config);
        assert!((f - 75.0).abs() < 1e-12);
        assert!(f <= 100.0);
    }

    #[test]
    fn test_tier_deciles() {
        // 0..=99 evenly spaced: ranks equal values
        let scores: Vec<f64> = (0..100).map(f64::from).collect();
        let tiers = assign_tiers(&scores);

        assert_eq!(tiers[99], Tier::Must);
        assert_eq!(tiers[90], Tier::Must); // boundary goes to the higher tier
        assert_eq!(tiers[89], Tier::Want);
        assert_eq!(tiers[70], Tier::Want);
        assert_eq!(tiers[69], Tier::Viable);
        assert_eq!(tiers[40], Tier::Viable);
        assert_eq!(tiers[39], Tier::Fade);
        assert_eq!(tiers[0], Tier::Fade);
    }

    #[test]
    fn test_tier_never_inverts_score_order() {
        let scores = [12.0, 88.0, 45.0, 45.0, 91.0, 3.0, 67.0];
        let tiers = assign_tiers(&scores);
        for i in 0..scores.len() {
            for j in 0..scores.len() {
                if scores[i] > scores[j] {
                    assert!(tiers[i] <= tiers[j], "score order inverted at ({i},{j})");
                }
            }
        }
    }

    #[test]
    fn test_tied_scores_share_a_tier() {
        let scores = [50.0, 50.0, 50.0, 50.0];
        let tiers = assign_tiers(&scores);
        assert!(tiers.iter().all(|&t| t == tiers[0]));
    }

    #[test]
    fn test_reasons_ordering() {
        let reasons = build_reasons(
            &[Flag::DualThreat, Flag::HighVolumePasser],
            0.85,
            88.0,
            14.0,
            Position::QB,
        );

        assert_eq!(reasons[0], Flag::DualThreat.label());
        assert_eq!(reasons[1], Flag::HighVolumePasser.label());
        assert!(reasons[2].starts_with("confidence 0.85"));
        assert_eq!(reasons[3], "top-12% role in QB pool");
        assert_eq!(reasons[4], "+14 leverage vs replacement");
    }

    #[test]
    fn test_no_confidence_note_at_full_confidence() {
        let reasons = build_reasons(&[], 1.0, 50.0, 0.0, Position::WR);
        assert_eq!(reasons.len(), 2);
        assert_eq!(reasons[0], "top-50% role in WR pool");
        assert_eq!(reasons[1], "no leverage edge vs replacement");
    }

    #[test]
    fn test_top_percent_floors_at_one() {
        let reasons = build_reasons(&[], 1.0, 100.0, 0.0, Position::RB);
        assert_eq!(reasons[0], "top-1% role in RB pool");
    }
}
