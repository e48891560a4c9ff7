use serde::{Deserialize, Serialize};

/// Main scoring configuration.
///
/// Every knob is overridable per run; the engine never reads mutable global
/// state. Weights are normalized by their sum, so any positive pair works.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   w_cash: 0.6
///   w_importance: 0.4
///   replacement_salary_bracket: 500
///   committee_penalty_fraction: 0.2
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct ScoringConfig {
    /// Weight of cash_score in the final blend (default: 0.6)
    pub w_cash: f64,

    /// Weight of importance_score in the final blend (default: 0.4)
    pub w_importance: f64,

    /// Salary gap, in currency units, that qualifies a cheaper same-position
    /// entity as a replacement candidate (default: 500)
    pub replacement_salary_bracket: u32,

    /// Fraction of roleScore removed when an RB carries committee risk
    /// (default: 0.20)
    pub committee_penalty_fraction: f64,

    /// Lower bound for the confidence multiplier (default: 0.0)
    pub confidence_floor: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            w_cash: 0.6,
            w_importance: 0.4,
            replacement_salary_bracket: 500,
            committee_penalty_fraction: 0.20,
            confidence_floor: 0.0,
        }
    }
}
