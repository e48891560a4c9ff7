use crate::slate::{Position, PositionData, QbData};

use super::super::extract::FeatureVector;
use super::{
    shared_values, ColumnSpec, EvalContext, Flag, PositionEvaluator, RankRow, SHARED_COLUMNS,
};

/// Goal-line carries are worth more than open-field designed runs; scrambles
/// count, but less.
const GOAL_LINE_RUSH_WEIGHT: f64 = 1.5;
const SCRAMBLE_WEIGHT: f64 = 0.5;

/// Fallback pass rate when dropbacks are projected but the rate is not.
const DEFAULT_NEUTRAL_PASS_RATE: f64 = 0.55;

/// Pool-rank cutoff flagging the dual-threat archetype.
const DUAL_THREAT_CUTOFF: f64 = 0.75;
/// Both pass volume and team implied points must clear this for the
/// high-volume passer archetype.
const HIGH_VOLUME_CUTOFF: f64 = 0.70;

const DUAL_THREAT_BONUS: f64 = 0.04;
const HIGH_VOLUME_BONUS: f64 = 0.03;

const COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::plain("median"),
    ColumnSpec::plain("floor"),
    ColumnSpec::plain("ceiling"),
    ColumnSpec::plain("value"),
    ColumnSpec::inverted("low_owned"),
    ColumnSpec::plain("pass_volume"),
    ColumnSpec::plain("rush_equity"),
    ColumnSpec::plain("implied"),
    ColumnSpec::plain("game_total"),
    ColumnSpec::inverted("low_pressure"),
    ColumnSpec::inverted("low_ints"),
];

pub struct QbEvaluator;

impl QbEvaluator {
    fn data(fv: &FeatureVector) -> QbData {
        match &fv.data {
            PositionData::Qb(d) => d.clone(),
            _ => QbData::default(),
        }
    }
}

impl PositionEvaluator for QbEvaluator {
    fn position(&self) -> Position {
        Position::QB
    }

    fn columns(&self) -> &'static [ColumnSpec] {
        COLUMNS
    }

    fn values(&self, fv: &FeatureVector) -> Vec<Option<f64>> {
        debug_assert_eq!(COLUMNS.len(), SHARED_COLUMNS.len() + 6);
        let d = Self::data(fv);

        let pass_volume = d
            .proj_dropbacks
            .map(|db| db * d.neutral_pass_rate.unwrap_or(DEFAULT_NEUTRAL_PASS_RATE));
        let rush_equity = rush_equity(&d);

        let mut vals = shared_values(fv);
        vals.extend([
            pass_volume,
            rush_equity,
            d.team_implied_points,
            d.game_total,
            d.opp_pressure_rate,
            d.proj_interceptions,
        ]);
        vals
    }

    fn flags(&self, fv: &FeatureVector, ranks: &RankRow) -> Vec<Flag> {
        let mut flags = Vec::new();

        if ranks.at_least("rush_equity", DUAL_THREAT_CUTOFF) || fv.extra_flag("qb_rush_upside_flag")
        {
            flags.push(Flag::DualThreat);
        }
        if ranks.at_least("pass_volume", HIGH_VOLUME_CUTOFF)
            && ranks.at_least("implied", HIGH_VOLUME_CUTOFF)
        {
            flags.push(Flag::HighVolumePasser);
        }

        flags
    }

    fn apply_flags(
        &self,
        (mut role, leverage): (f64, f64),
        _fv: &FeatureVector,
        flags: &[Flag],
        _ctx: &EvalContext,
    ) -> (f64, f64) {
        // Archetype bonuses are additive and stack; neither is exclusive.
        if flags.contains(&Flag::DualThreat) {
            role += DUAL_THREAT_BONUS;
        }
        if flags.contains(&Flag::HighVolumePasser) {
            role += HIGH_VOLUME_BONUS;
        }
        (role, leverage)
    }
}

/// Weighted rushing opportunity. Missing terms contribute nothing, but a QB
/// with no rushing projection at all stays unranked on this component.
fn rush_equity(d: &QbData) -> Option<f64> {
    if d.proj_designed_rush_att.is_none()
        && d.proj_goal_line_rush_att.is_none()
        && d.proj_scramble_att.is_none()
    {
        return None;
    }
    Some(
        d.proj_designed_rush_att.unwrap_or(0.0)
            + GOAL_LINE_RUSH_WEIGHT * d.proj_goal_line_rush_att.unwrap_or(0.0)
            + SCRAMBLE_WEIGHT * d.proj_scramble_att.unwrap_or(0.0),
    )
}

#[cfg(test)]
mod tests {
    use super::super::super::config::ScoringConfig;
    use super::super::evaluate_pool;
    use super::super::test_util::{context, vector};
    use super::*;
    use crate::slate::Site;

    fn qb(id: &str, median: f64, data: QbData) -> FeatureVector {
        vector(id, 7000, median, PositionData::Qb(data))
    }

    fn pool_of_four() -> Vec<FeatureVector> {
        vec![
            qb(
                "runner",
                20.0,
                QbData {
                    proj_dropbacks: Some(32.0),
                    proj_designed_rush_att: Some(8.0),
                    proj_goal_line_rush_att: Some(1.5),
                    proj_scramble_att: Some(4.0),
                    team_implied_points: Some(24.0),
                    ..Default::default()
                },
            ),
            qb(
                "slinger",
                21.0,
                QbData {
                    proj_dropbacks: Some(44.0),
                    neutral_pass_rate: Some(0.65),
                    proj_designed_rush_att: Some(1.0),
                    team_implied_points: Some(27.0),
                    ..Default::default()
                },
            ),
            qb(
                "game-manager",
                15.0,
                QbData {
                    proj_dropbacks: Some(30.0),
                    proj_designed_rush_att: Some(2.0),
                    team_implied_points: Some(19.0),
                    ..Default::default()
                },
            ),
            qb(
                "backup-ish",
                12.0,
                QbData {
                    proj_dropbacks: Some(28.0),
                    proj_designed_rush_att: Some(1.5),
                    team_implied_points: Some(17.0),
                    ..Default::default()
                },
            ),
        ]
    }

    #[test]
    fn test_rush_equity_weighting() {
        let d = QbData {
            proj_designed_rush_att: Some(6.0),
            proj_goal_line_rush_att: Some(2.0),
            proj_scramble_att: Some(4.0),
            ..Default::default()
        };
        // 6 + 1.5*2 + 0.5*4 = 11
        assert_eq!(rush_equity(&d), Some(11.0));
    }

    #[test]
    fn test_rush_equity_missing_when_no_rushing_data() {
        assert_eq!(rush_equity(&QbData::default()), None);
    }

    #[test]
    fn test_dual_threat_flagged_for_top_rusher() {
        let config = ScoringConfig::default();
        let ctx = context(Position::QB, &config, Site::Dk);
        let evals = evaluate_pool(&QbEvaluator, &pool_of_four(), &ctx);

        assert!(evals[0].flags.contains(&Flag::DualThreat));
        assert!(!evals[2].flags.contains(&Flag::DualThreat));
    }

    #[test]
    fn test_high_volume_passer_needs_both_signals() {
        let config = ScoringConfig::default();
        let ctx = context(Position::QB, &config, Site::Dk);
        let evals = evaluate_pool(&QbEvaluator, &pool_of_four(), &ctx);

        assert!(evals[1].flags.contains(&Flag::HighVolumePasser));
        // The runner has good implied points but middling volume
        assert!(!evals[0].flags.contains(&Flag::HighVolumePasser));
    }

    #[test]
    fn test_archetype_bonus_is_additive() {
        let config = ScoringConfig::default();
        let ctx = context(Position::QB, &config, Site::Dk);

        let fv = qb("any", 18.0, QbData::default());
        let flagged = QbEvaluator.apply_flags((0.5, 0.5), &fv, &[Flag::DualThreat], &ctx);
        assert!((flagged.0 - (0.5 + DUAL_THREAT_BONUS)).abs() < 1e-12);

        let both = QbEvaluator.apply_flags(
            (0.5, 0.5),
            &fv,
            &[Flag::DualThreat, Flag::HighVolumePasser],
            &ctx,
        );
        assert!((both.0 - (0.5 + DUAL_THREAT_BONUS + HIGH_VOLUME_BONUS)).abs() < 1e-12);
    }

    #[test]
    fn test_extras_flag_triggers_dual_threat() {
        let config = ScoringConfig::default();
        let ctx = context(Position::QB, &config, Site::Dk);

        let mut pool = pool_of_four();
        pool[3]
            .extras
            .insert("qb_rush_upside_flag".to_string(), crate::slate::ExtValue::Bool(true));
        let evals = evaluate_pool(&QbEvaluator, &pool, &ctx);
        assert!(evals[3].flags.contains(&Flag::DualThreat));
    }
}
