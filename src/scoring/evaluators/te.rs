use crate::slate::{Position, PositionData, TeData};

use super::super::extract::FeatureVector;
use super::{
    shared_values, ColumnSpec, EvalContext, Flag, PositionEvaluator, RankRow, SHARED_COLUMNS,
};

/// An inline-heavy or route-thin TE is a blocking role, not a target role.
const INLINE_RATE_CUTOFF: f64 = 0.75;
const INLINE_ROUTES_CUTOFF: f64 = 0.30;
const FULL_ROUTE_CUTOFF: f64 = 0.80;
const RED_ZONE_CUTOFF: f64 = 0.75;

const INLINE_ROLE_FACTOR: f64 = 0.90;
const TD_OR_BUST_ROLE_FACTOR: f64 = 0.95;
const FULL_ROUTE_BONUS: f64 = 0.04;
const RED_ZONE_BONUS: f64 = 0.03;

const COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::plain("median"),
    ColumnSpec::plain("floor"),
    ColumnSpec::plain("ceiling"),
    ColumnSpec::plain("value"),
    ColumnSpec::inverted("low_owned"),
    ColumnSpec::plain("routes"),
    ColumnSpec::plain("tgt_share"),
    ColumnSpec::plain("targets"),
    ColumnSpec::plain("rz_tgt_share"),
    // Carried for flag detection only; no role/leverage weight
    ColumnSpec::plain("inline_rate"),
];

pub struct TeEvaluator;

impl TeEvaluator {
    fn data(fv: &FeatureVector) -> TeData {
        match &fv.data {
            PositionData::Te(d) => d.clone(),
            _ => TeData::default(),
        }
    }
}

impl PositionEvaluator for TeEvaluator {
    fn position(&self) -> Position {
        Position::TE
    }

    fn columns(&self) -> &'static [ColumnSpec] {
        COLUMNS
    }

    fn values(&self, fv: &FeatureVector) -> Vec<Option<f64>> {
        debug_assert_eq!(COLUMNS.len(), SHARED_COLUMNS.len() + 5);
        let d = Self::data(fv);

        let mut vals = shared_values(fv);
        vals.extend([
            d.proj_route_participation.or(fv.route_share),
            d.proj_target_share,
            d.proj_targets,
            d.proj_red_zone_target_share,
            d.proj_inline_rate,
        ]);
        vals
    }

    fn flags(&self, fv: &FeatureVector, ranks: &RankRow) -> Vec<Flag> {
        let d = Self::data(fv);
        let mut flags = Vec::new();

        if d.full_route_role_flag == Some(true) || ranks.at_least("routes", FULL_ROUTE_CUTOFF) {
            flags.push(Flag::FullRouteRole);
        }
        if ranks.at_least("inline_rate", INLINE_RATE_CUTOFF)
            || ranks.at_most("routes", INLINE_ROUTES_CUTOFF)
        {
            flags.push(Flag::InlineRole);
        }
        if ranks.at_least("rz_tgt_share", RED_ZONE_CUTOFF) {
            flags.push(Flag::RedZoneRole);
        }
        if d.td_or_bust_flag == Some(true) {
            flags.push(Flag::TdOrBust);
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
        if flags.contains(&Flag::FullRouteRole) {
            role += FULL_ROUTE_BONUS;
        }
        if flags.contains(&Flag::RedZoneRole) {
            role += RED_ZONE_BONUS;
        }
        if flags.contains(&Flag::InlineRole) {
            role *= INLINE_ROLE_FACTOR;
        }
        if flags.contains(&Flag::TdOrBust) {
            role *= TD_OR_BUST_ROLE_FACTOR;
        }
        (role, leverage)
    }
}
