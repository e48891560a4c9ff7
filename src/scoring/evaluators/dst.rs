use crate::slate::{DstData, Position, PositionData, Site};

use super::super::extract::FeatureVector;
use super::{
    shared_values, ColumnSpec, EvalContext, Flag, PositionEvaluator, RankRow, SHARED_COLUMNS,
};

/// Pay-up only reads as viable on a genuine mismatch.
const PAY_UP_MISMATCH_CUTOFF: f64 = 0.70;

/// FD pricing justifies paying up for defense more often than DK.
const PAY_UP_LEVERAGE_BONUS_FD: f64 = 0.06;
const PAY_UP_LEVERAGE_BONUS_DK: f64 = 0.03;

/// Defense is a pay-down position; an expensive unit eats salary the skill
/// spots want. The threshold and the dock both follow site pricing.
const PAY_DOWN_SALARY_DK: u32 = 3800;
const PAY_DOWN_SALARY_FD: u32 = 4800;
const PAY_DOWN_PENALTY_DK: f64 = 0.04;
const PAY_DOWN_PENALTY_FD: f64 = 0.02;

const COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::plain("median"),
    ColumnSpec::plain("floor"),
    ColumnSpec::plain("ceiling"),
    ColumnSpec::plain("value"),
    ColumnSpec::inverted("low_owned"),
    ColumnSpec::plain("opp_dropbacks"),
    ColumnSpec::plain("sack_rate"),
    ColumnSpec::plain("int_rate"),
    ColumnSpec::inverted("low_opp_implied"),
    ColumnSpec::plain("sacks"),
    ColumnSpec::plain("turnovers"),
];

pub struct DstEvaluator;

impl DstEvaluator {
    fn data(fv: &FeatureVector) -> DstData {
        match &fv.data {
            PositionData::Dst(d) => d.clone(),
            _ => DstData::default(),
        }
    }
}

impl PositionEvaluator for DstEvaluator {
    fn position(&self) -> Position {
        Position::DST
    }

    fn columns(&self) -> &'static [ColumnSpec] {
        COLUMNS
    }

    fn values(&self, fv: &FeatureVector) -> Vec<Option<f64>> {
        debug_assert_eq!(COLUMNS.len(), SHARED_COLUMNS.len() + 6);
        let d = Self::data(fv);

        // Opponent-side opportunity drives the unit, not its own history
        let turnovers = match (d.proj_interceptions, d.proj_fumbles_recovered) {
            (None, None) => None,
            (i, f) => Some(i.unwrap_or(0.0) + f.unwrap_or(0.0)),
        };

        let mut vals = shared_values(fv);
        vals.extend([
            d.opp_dropbacks_proj,
            d.opp_sack_rate_allowed,
            d.opp_interception_rate,
            d.opp_implied_points,
            d.proj_sacks,
            turnovers,
        ]);
        vals
    }

    fn flags(&self, fv: &FeatureVector, ranks: &RankRow) -> Vec<Flag> {
        let d = Self::data(fv);

        let mismatch = ranks.at_least("sack_rate", PAY_UP_MISMATCH_CUTOFF)
            || ranks.at_least("low_opp_implied", PAY_UP_MISMATCH_CUTOFF);
        if d.pay_up_viable_flag == Some(true) && mismatch {
            vec![Flag::PayUpViable]
        } else {
            Vec::new()
        }
    }

    fn apply_flags(
        &self,
        (mut role, mut leverage): (f64, f64),
        fv: &FeatureVector,
        flags: &[Flag],
        ctx: &EvalContext,
    ) -> (f64, f64) {
        match ctx.site {
            Site::Dk if fv.salary >= PAY_DOWN_SALARY_DK => role -= PAY_DOWN_PENALTY_DK,
            Site::Fd if fv.salary >= PAY_DOWN_SALARY_FD => role -= PAY_DOWN_PENALTY_FD,
            _ => {}
        }
        if flags.contains(&Flag::PayUpViable) {
            leverage += match ctx.site {
                Site::Fd => PAY_UP_LEVERAGE_BONUS_FD,
                Site::Dk | Site::Other => PAY_UP_LEVERAGE_BONUS_DK,
            };
        }
        (role, leverage)
    }
}
