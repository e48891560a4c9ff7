use crate::slate::{Position, PositionData, RbData};

use super::super::extract::FeatureVector;
use super::{
    shared_values, ColumnSpec, EvalContext, Flag, PositionEvaluator, RankRow, SHARED_COLUMNS,
};

const COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::plain("median"),
    ColumnSpec::plain("floor"),
    ColumnSpec::plain("ceiling"),
    ColumnSpec::plain("value"),
    ColumnSpec::inverted("low_owned"),
    ColumnSpec::plain("snaps"),
    ColumnSpec::plain("routes"),
    ColumnSpec::plain("tgt_share"),
    ColumnSpec::plain("targets"),
    ColumnSpec::plain("gl_share"),
    ColumnSpec::plain("third_down"),
    ColumnSpec::plain("hv_touches"),
    ColumnSpec::plain("touch_share"),
    // More negative spread = bigger favorite = better game script
    ColumnSpec::inverted("favored"),
];

pub struct RbEvaluator;

impl RbEvaluator {
    fn data(fv: &FeatureVector) -> RbData {
        match &fv.data {
            PositionData::Rb(d) => d.clone(),
            _ => RbData::default(),
        }
    }
}

impl PositionEvaluator for RbEvaluator {
    fn position(&self) -> Position {
        Position::RB
    }

    fn columns(&self) -> &'static [ColumnSpec] {
        COLUMNS
    }

    fn values(&self, fv: &FeatureVector) -> Vec<Option<f64>> {
        debug_assert_eq!(COLUMNS.len(), SHARED_COLUMNS.len() + 9);
        let d = Self::data(fv);

        let mut vals = shared_values(fv);
        vals.extend([
            fv.snap_share,
            d.proj_route_participation.or(fv.route_share),
            d.proj_target_share,
            d.proj_targets,
            d.proj_goal_line_share,
            d.proj_third_down_share,
            d.proj_high_value_touches,
            fv.touch_share,
            d.spread,
        ]);
        vals
    }

    fn flags(&self, fv: &FeatureVector, _ranks: &RankRow) -> Vec<Flag> {
        let d = Self::data(fv);
        if d.committee_risk_flag == Some(true) {
            vec![Flag::CommitteeRisk]
        } else {
            Vec::new()
        }
    }

    fn apply_flags(
        &self,
        (mut role, leverage): (f64, f64),
        _fv: &FeatureVector,
        flags: &[Flag],
        ctx: &EvalContext,
    ) -> (f64, f64) {
        // An ambiguous backfield dents the role, it never excludes.
        if flags.contains(&Flag::CommitteeRisk) {
            role *= 1.0 - ctx.config.committee_penalty_fraction;
        }
        (role, leverage)
    }
}
