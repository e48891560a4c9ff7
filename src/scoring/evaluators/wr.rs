use crate::slate::{Position, PositionData, WrData};

use super::super::extract::FeatureVector;
use super::{
    shared_values, ColumnSpec, EvalContext, Flag, PositionEvaluator, RankRow, SHARED_COLUMNS,
};

/// Deep-target rank at or above this, with thin route participation,
/// signals a boom-bust profile even without the explicit flag.
const BOOM_BUST_DEEP_CUTOFF: f64 = 0.75;
const BOOM_BUST_ROUTES_CUTOFF: f64 = 0.40;
/// Route-participation rank that reads as an every-down role on its own.
const EVERY_DOWN_ROUTES_CUTOFF: f64 = 0.85;

/// Boom-bust trims the role; volatility itself is surfaced via the flag.
const BOOM_BUST_ROLE_FACTOR: f64 = 0.95;
const EVERY_DOWN_BONUS: f64 = 0.04;

const COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::plain("median"),
    ColumnSpec::plain("floor"),
    ColumnSpec::plain("ceiling"),
    ColumnSpec::plain("value"),
    ColumnSpec::inverted("low_owned"),
    ColumnSpec::plain("routes"),
    ColumnSpec::plain("tgt_share"),
    ColumnSpec::plain("targets"),
    ColumnSpec::plain("air_yards"),
    ColumnSpec::plain("deep_rate"),
    ColumnSpec::inverted("low_adot"),
    ColumnSpec::plain("rz_targets"),
];

pub struct WrEvaluator;

impl WrEvaluator {
    fn data(fv: &FeatureVector) -> WrData {
        match &fv.data {
            PositionData::Wr(d) => d.clone(),
            _ => WrData::default(),
        }
    }
}

impl PositionEvaluator for WrEvaluator {
    fn position(&self) -> Position {
        Position::WR
    }

    fn columns(&self) -> &'static [ColumnSpec] {
        COLUMNS
    }

    fn values(&self, fv: &FeatureVector) -> Vec<Option<f64>> {
        debug_assert_eq!(COLUMNS.len(), SHARED_COLUMNS.len() + 7);
        let d = Self::data(fv);

        let mut vals = shared_values(fv);
        vals.extend([
            d.proj_route_participation.or(fv.route_share),
            d.proj_target_share,
            d.proj_targets,
            d.proj_air_yards_share,
            d.proj_deep_target_rate,
            d.proj_adot,
            d.proj_red_zone_targets,
        ]);
        vals
    }

    fn flags(&self, fv: &FeatureVector, ranks: &RankRow) -> Vec<Flag> {
        let d = Self::data(fv);
        let mut flags = Vec::new();

        let boom_bust = d.boom_bust_flag == Some(true)
            || (ranks.at_least("deep_rate", BOOM_BUST_DEEP_CUTOFF)
                && ranks.at_most("routes", BOOM_BUST_ROUTES_CUTOFF));
        if boom_bust {
            flags.push(Flag::BoomBust);
        }

        if d.every_down_role_flag == Some(true)
            || ranks.at_least("routes", EVERY_DOWN_ROUTES_CUTOFF)
        {
            flags.push(Flag::EveryDownRole);
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
        // Boom-bust never gates eligibility on its own
        if flags.contains(&Flag::BoomBust) {
            role *= BOOM_BUST_ROLE_FACTOR;
        }
        if flags.contains(&Flag::EveryDownRole) {
            role += EVERY_DOWN_BONUS;
        }
        (role, leverage)
    }
}
