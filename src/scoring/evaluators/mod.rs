mod dst;
mod qb;
mod rb;
mod te;
mod wr;

use std::collections::BTreeMap;

use crate::slate::{Position, Site};

use super::config::ScoringConfig;
use super::extract::FeatureVector;
use super::percentile::percentile_ranks;
use super::weights::WeightSet;

pub use dst::DstEvaluator;
pub use qb::QbEvaluator;
pub use rb::RbEvaluator;
pub use te::TeEvaluator;
pub use wr::WrEvaluator;

/// Archetype and fragility signals raised during evaluation. Surfaced
/// verbatim (by label) at the front of an entity's reasons list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    DualThreat,
    HighVolumePasser,
    CommitteeRisk,
    BoomBust,
    EveryDownRole,
    FullRouteRole,
    InlineRole,
    RedZoneRole,
    TdOrBust,
    PayUpViable,
}

impl Flag {
    pub fn label(self) -> &'static str {
        match self {
            Flag::DualThreat => "Dual-threat rushing equity",
            Flag::HighVolumePasser => "High-volume passer",
            Flag::CommitteeRisk => "Committee backfield risk",
            Flag::BoomBust => "Boom-bust target profile",
            Flag::EveryDownRole => "Every-down role",
            Flag::FullRouteRole => "Full-route role",
            Flag::InlineRole => "Inline/blocking role",
            Flag::RedZoneRole => "Red-zone target role",
            Flag::TdOrBust => "TD-or-bust profile",
            Flag::PayUpViable => "Pay-up viable matchup",
        }
    }
}

/// One named component column. Inverted columns rank lower-is-better
/// signals (pressure rate, aDOT, opponent implied total).
#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    pub key: &'static str,
    pub invert: bool,
}

impl ColumnSpec {
    pub const fn plain(key: &'static str) -> Self {
        Self { key, invert: false }
    }

    pub const fn inverted(key: &'static str) -> Self {
        Self { key, invert: true }
    }
}

/// Columns every position shares, derived from the shared projection.
/// Low projected ownership is a leverage signal, never a role signal.
pub const SHARED_COLUMNS: [ColumnSpec; 5] = [
    ColumnSpec::plain("median"),
    ColumnSpec::plain("floor"),
    ColumnSpec::plain("ceiling"),
    ColumnSpec::plain("value"),
    ColumnSpec::inverted("low_owned"),
];

pub fn shared_values(fv: &FeatureVector) -> Vec<Option<f64>> {
    vec![
        Some(fv.median),
        fv.floor,
        fv.ceiling,
        Some(fv.value),
        fv.ownership,
    ]
}

/// Pool-relative component ranks for one entity, in [0, 1]. Missing
/// components stay missing and fall out of the weighted blend.
#[derive(Debug, Clone)]
pub struct RankRow {
    ranks: BTreeMap<&'static str, f64>,
}

impl RankRow {
    pub fn get(&self, key: &str) -> Option<f64> {
        self.ranks.get(key).copied()
    }

    /// True when the component is present and ranks at or above the cutoff.
    pub fn at_least(&self, key: &str, cutoff: f64) -> bool {
        self.get(key).is_some_and(|r| r >= cutoff)
    }

    /// True when the component is present and ranks at or below the cutoff.
    pub fn at_most(&self, key: &str, cutoff: f64) -> bool {
        self.get(key).is_some_and(|r| r <= cutoff)
    }
}

#[derive(Debug, Clone)]
pub struct RawEvaluation {
    pub role_score: f64,
    pub leverage_score: f64,
    pub flags: Vec<Flag>,
}

/// Per-pool evaluation context: site, run config, and the weight sets the
/// engine resolved for this position.
pub struct EvalContext<'a> {
    pub site: Site,
    pub config: &'a ScoringConfig,
    pub role_weights: WeightSet,
    pub leverage_weights: WeightSet,
}

/// One evaluator per position family. The trait covers the raw component
/// values and the position's flag logic; the shared machinery in
/// `evaluate_pool` handles ranking and weighting identically for all five.
pub trait PositionEvaluator {
    fn position(&self) -> Position;

    /// Component columns, aligned with `values`.
    fn columns(&self) -> &'static [ColumnSpec];

    /// Raw component values for one entity. Missing inputs stay `None`.
    fn values(&self, fv: &FeatureVector) -> Vec<Option<f64>>;

    /// Archetype/fragility flags, decided from pool-relative ranks.
    fn flags(&self, fv: &FeatureVector, ranks: &RankRow) -> Vec<Flag>;

    /// Apply flag and pricing adjustments to (role, leverage).
    fn apply_flags(
        &self,
        scores: (f64, f64),
        fv: &FeatureVector,
        flags: &[Flag],
        ctx: &EvalContext,
    ) -> (f64, f64) {
        let _ = (fv, flags, ctx);
        scores
    }
}

pub fn evaluator_for(position: Position) -> &'static dyn PositionEvaluator {
    match position {
        Position::QB => &QbEvaluator,
        Position::RB => &RbEvaluator,
        Position::WR => &WrEvaluator,
        Position::TE => &TeEvaluator,
        Position::DST => &DstEvaluator,
    }
}

/// Evaluate one position pool: rank each component column within the pool,
/// then blend present component ranks per entity with renormalized weights.
///
/// Phase structure: per-entity raw values first (pure), then the pool-wide
/// ranking, then per-entity scoring against the frozen ranks.
pub fn evaluate_pool(
    evaluator: &dyn PositionEvaluator,
    pool: &[FeatureVector],
    ctx: &EvalContext,
) -> Vec<RawEvaluation> {
    let columns = evaluator.columns();

    let matrix: Vec<Vec<Option<f64>>> = pool.iter().map(|fv| evaluator.values(fv)).collect();
    debug_assert!(matrix.iter().all(|row| row.len() == columns.len()));

    let mut column_ranks: Vec<Vec<Option<f64>>> = Vec::with_capacity(columns.len());
    for (ci, spec) in columns.iter().enumerate() {
        let raw: Vec<Option<f64>> = matrix.iter().map(|row| row[ci]).collect();
        let mut ranks = percentile_ranks(&raw);
        if spec.invert {
            for r in ranks.iter_mut().flatten() {
                *r = 1.0 - *r;
            }
        }
        column_ranks.push(ranks);
    }

    pool.iter()
        .enumerate()
        .map(|(ei, fv)| {
            let ranks: BTreeMap<&'static str, f64> = columns
                .iter()
                .enumerate()
                .filter_map(|(ci, spec)| column_ranks[ci][ei].map(|r| (spec.key, r)))
                .collect();
            let row = RankRow { ranks };

            let role = weighted_blend(&row, &ctx.role_weights);
            let leverage = weighted_blend(&row, &ctx.leverage_weights);
            let flags = evaluator.flags(fv, &row);
            let (role_score, leverage_score) =
                evaluator.apply_flags((role, leverage), fv, &flags, ctx);

            RawEvaluation {
                role_score,
                leverage_score,
                flags,
            }
        })
        .collect()
}

/// Weighted mean over the components that are actually present, so a
/// missing input carries no weight instead of reading as a zero signal.
fn weighted_blend(row: &RankRow, weights: &WeightSet) -> f64 {
    let mut total = 0.0;
    let mut weight_sum = 0.0;
    for (&key, &w) in &weights.weights {
        if w <= 0.0 {
            continue;
        }
        if let Some(rank) = row.get(key) {
            total += w * rank;
            weight_sum += w;
        }
    }
    if weight_sum > 0.0 {
        total / weight_sum
    } else {
        0.0
    }
}
