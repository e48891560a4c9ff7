use std::collections::BTreeMap;

use crate::slate::Position;

use super::percentile::{clamp01, percentile_ranks};

/// A linear model over component percentile ranks. Keys match the component
/// columns each position evaluator declares.
#[derive(Debug, Clone)]
pub struct WeightSet {
    pub weights: BTreeMap<&'static str, f64>,
}

impl WeightSet {
    fn new(pairs: &[(&'static str, f64)]) -> Self {
        Self {
            weights: pairs.iter().copied().collect(),
        }
    }

    pub fn get(&self, key: &str) -> f64 {
        self.weights.get(key).copied().unwrap_or(0.0)
    }
}

/// Role weights come in a tight-pricing and a loose-pricing variant; loose
/// slates lean harder on raw median projection. Leverage weights are a
/// single set per position.
#[derive(Debug, Clone)]
pub struct PositionWeightProfile {
    pub position: Position,
    pub tight: WeightSet,
    pub loose: WeightSet,
    pub leverage: WeightSet,
}

impl PositionWeightProfile {
    /// Blend tight and loose role weights by slate looseness in [0, 1].
    pub fn role_weights(&self, looseness: f64) -> WeightSet {
        let l = clamp01(looseness);
        let keys: std::collections::BTreeSet<&'static str> = self
            .tight
            .weights
            .keys()
            .chain(self.loose.weights.keys())
            .copied()
            .collect();
        let weights = keys
            .into_iter()
            .map(|k| (k, (1.0 - l) * self.tight.get(k) + l * self.loose.get(k)))
            .collect();
        WeightSet { weights }
    }
}

pub fn default_weight_profiles() -> BTreeMap<Position, PositionWeightProfile> {
    let mut profiles = BTreeMap::new();

    profiles.insert(
        Position::QB,
        PositionWeightProfile {
            position: Position::QB,
            tight: WeightSet::new(&[
                ("median", 0.20),
                ("floor", 0.14),
                ("value", 0.14),
                ("pass_volume", 0.12),
                ("rush_equity", 0.16),
                ("implied", 0.08),
                ("game_total", 0.04),
                ("low_pressure", 0.05),
                ("low_ints", 0.07),
            ]),
            loose: WeightSet::new(&[
                ("median", 0.28),
                ("floor", 0.12),
                ("value", 0.08),
                ("pass_volume", 0.12),
                ("rush_equity", 0.20),
                ("implied", 0.10),
                ("game_total", 0.04),
                ("low_pressure", 0.02),
                ("low_ints", 0.04),
            ]),
            leverage: WeightSet::new(&[
                ("ceiling", 0.30),
                ("rush_equity", 0.22),
                ("pass_volume", 0.16),
                ("implied", 0.18),
                ("game_total", 0.14),
                ("low_owned", 0.10),
            ]),
        },
    );

    profiles.insert(
        Position::RB,
        PositionWeightProfile {
            position: Position::RB,
            tight: WeightSet::new(&[
                ("median", 0.16),
                ("floor", 0.12),
                ("value", 0.12),
                ("snaps", 0.12),
                ("routes", 0.14),
                ("tgt_share", 0.12),
                ("targets", 0.08),
                ("gl_share", 0.10),
                ("third_down", 0.06),
                ("hv_touches", 0.04),
                ("touch_share", 0.04),
                ("favored", 0.02),
            ]),
            loose: WeightSet::new(&[
                ("median", 0.24),
                ("floor", 0.10),
                ("value", 0.08),
                ("snaps", 0.10),
                ("routes", 0.12),
                ("tgt_share", 0.12),
                ("targets", 0.08),
                ("gl_share", 0.10),
                ("third_down", 0.04),
                ("hv_touches", 0.04),
                ("touch_share", 0.04),
                ("favored", 0.04),
            ]),
            leverage: WeightSet::new(&[
                ("ceiling", 0.30),
                ("hv_touches", 0.20),
                ("gl_share", 0.20),
                ("tgt_share", 0.15),
                ("targets", 0.15),
                ("low_owned", 0.10),
            ]),
        },
    );

    profiles.insert(
        Position::WR,
        PositionWeightProfile {
            position: Position::WR,
            tight: WeightSet::new(&[
                ("median", 0.16),
                ("floor", 0.12),
                ("value", 0.12),
                ("routes", 0.18),
                ("tgt_share", 0.18),
                ("targets", 0.10),
                ("low_adot", 0.06),
                ("rz_targets", 0.04),
                ("air_yards", 0.04),
            ]),
            loose: WeightSet::new(&[
                ("median", 0.22),
                ("floor", 0.10),
                ("value", 0.08),
                ("routes", 0.18),
                ("tgt_share", 0.18),
                ("targets", 0.10),
                ("low_adot", 0.04),
                ("rz_targets", 0.06),
                ("air_yards", 0.04),
            ]),
            leverage: WeightSet::new(&[
                ("ceiling", 0.30),
                ("air_yards", 0.20),
                ("deep_rate", 0.20),
                ("tgt_share", 0.15),
                ("rz_targets", 0.15),
                ("low_owned", 0.10),
            ]),
        },
    );

    profiles.insert(
        Position::TE,
        PositionWeightProfile {
            position: Position::TE,
            tight: WeightSet::new(&[
                ("median", 0.14),
                ("floor", 0.10),
                ("value", 0.14),
                ("routes", 0.20),
                ("tgt_share", 0.16),
                ("targets", 0.12),
                ("rz_tgt_share", 0.14),
            ]),
            loose: WeightSet::new(&[
                ("median", 0.18),
                ("floor", 0.10),
                ("value", 0.10),
                ("routes", 0.20),
                ("tgt_share", 0.16),
                ("targets", 0.12),
                ("rz_tgt_share", 0.14),
            ]),
            leverage: WeightSet::new(&[
                ("ceiling", 0.35),
                ("rz_tgt_share", 0.25),
                ("tgt_share", 0.20),
                ("routes", 0.20),
                ("low_owned", 0.10),
            ]),
        },
    );

    profiles.insert(
        Position::DST,
        PositionWeightProfile {
            position: Position::DST,
            tight: WeightSet::new(&[
                ("median", 0.08),
                ("floor", 0.04),
                ("value", 0.18),
                ("opp_dropbacks", 0.14),
                ("sack_rate", 0.16),
                ("int_rate", 0.12),
                ("low_opp_implied", 0.16),
                ("sacks", 0.06),
                ("turnovers", 0.06),
            ]),
            loose: WeightSet::new(&[
                ("median", 0.10),
                ("floor", 0.04),
                ("value", 0.14),
                ("opp_dropbacks", 0.14),
                ("sack_rate", 0.16),
                ("int_rate", 0.12),
                ("low_opp_implied", 0.18),
                ("sacks", 0.06),
                ("turnovers", 0.06),
            ]),
            leverage: WeightSet::new(&[
                ("ceiling", 0.25),
                ("sacks", 0.20),
                ("turnovers", 0.20),
                ("opp_dropbacks", 0.20),
                ("low_opp_implied", 0.15),
                ("low_owned", 0.10),
            ]),
        },
    );

    profiles
}

/// How many entities sit in the top value band. More cheap points on the
/// board means looser pricing, which shifts role weights toward raw median.
///
/// `values` is points per $1k of salary, one entry per scorable entity.
pub fn estimate_looseness(values: &[Option<f64>]) -> f64 {
    if values.is_empty() {
        return 0.5;
    }
    let prs = percentile_ranks(values);
    let high = prs
        .iter()
        .filter(|pr| pr.is_some_and(|p| p >= 0.80))
        .count();
    // Typical main slate carries roughly 15-30 real value plays.
    clamp01((high as f64 - 12.0) / 24.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profiles_cover_all_positions() {
        let profiles = default_weight_profiles();
        for pos in Position::ALL {
            assert!(profiles.contains_key(&pos), "missing profile for {pos}");
        }
    }

    #[test]
    fn test_blend_at_extremes() {
        let profiles = default_weight_profiles();
        let qb = &profiles[&Position::QB];

        let tight = qb.role_weights(0.0);
        assert_eq!(tight.get("median"), qb.tight.get("median"));

        let loose = qb.role_weights(1.0);
        assert_eq!(loose.get("median"), qb.loose.get("median"));
    }

    #[test]
    fn test_blend_midpoint() {
        let profiles = default_weight_profiles();
        let rb = &profiles[&Position::RB];
        let mid = rb.role_weights(0.5);
        let expected = (rb.tight.get("median") + rb.loose.get("median")) / 2.0;
        assert!((mid.get("median") - expected).abs() < 1e-12);
    }

    #[test]
    fn test_blend_clamps_out_of_range_looseness() {
        let profiles = default_weight_profiles();
        let wr = &profiles[&Position::WR];
        let w = wr.role_weights(3.0);
        assert_eq!(w.get("median"), wr.loose.get("median"));
    }

    #[test]
    fn test_looseness_empty_slate_is_neutral() {
        assert_eq!(estimate_looseness(&[]), 0.5);
    }

    #[test]
    fn test_looseness_bounds() {
        // 50 entities, top 20% band has 10 members: (10-12)/24 clamps to 0
        let values: Vec<Option<f64>> = (0..50).map(|i| Some(i as f64)).collect();
        let l = estimate_looseness(&values);
        assert!((0.0..=1.0).contains(&l));
    }
}
