use super::config::ScoringConfig;

/// Validate scoring configuration before a run starts.
/// Returns all validation errors at once (not just the first).
///
/// A bad configuration fails the whole run up front; silently clamping a
/// negative weight could misrepresent the caller's intent.
pub fn validate_scoring(config: &ScoringConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if !config.w_cash.is_finite() || config.w_cash < 0.0 {
        errors.push(format!(
            "scoring.w_cash: must be a non-negative number, got {}",
            config.w_cash
        ));
    }

    if !config.w_importance.is_finite() || config.w_importance < 0.0 {
        errors.push(format!(
            "scoring.w_importance: must be a non-negative number, got {}",
            config.w_importance
        ));
    }

    // Only meaningful to check when both weights are individually valid
    if errors.is_empty() && config.w_cash + config.w_importance <= 0.0 {
        errors.push("scoring: w_cash + w_importance must be positive".to_string());
    }

    if config.replacement_salary_bracket == 0 {
        errors.push("scoring.replacement_salary_bracket: must be positive".to_string());
    }

    if !config.committee_penalty_fraction.is_finite()
        || !(0.0..1.0).contains(&config.committee_penalty_fraction)
    {
        errors.push(format!(
            "scoring.committee_penalty_fraction: must be in [0, 1), got {}",
            config.committee_penalty_fraction
        ));
    }

    if !config.confidence_floor.is_finite() || !(0.0..=1.0).contains(&config.confidence_floor) {
        errors.push(format!(
            "scoring.confidence_floor: must be in [0, 1], got {}",
            config.confidence_floor
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config() {
        assert!(validate_scoring(&ScoringConfig::default()).is_ok());
    }

    #[test]
    fn test_negative_cash_weight() {
        let config = ScoringConfig {
            w_cash: -0.1,
            ..Default::default()
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert!(errors[0].contains("w_cash"));
    }

    #[test]
    fn test_zero_weight_sum() {
        let config = ScoringConfig {
            w_cash: 0.0,
            w_importance: 0.0,
            ..Default::default()
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert!(errors[0].contains("must be positive"));
    }

    #[test]
    fn test_lopsided_weights_are_valid() {
        // Weights need not sum to 1; they are normalized by their sum.
        let config = ScoringConfig {
            w_cash: 2.0,
            w_importance: 1.0,
            ..Default::default()
        };
        assert!(validate_scoring(&config).is_ok());
    }

    #[test]
    fn test_zero_bracket() {
        let config = ScoringConfig {
            replacement_salary_bracket: 0,
            ..Default::default()
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert!(errors[0].contains("replacement_salary_bracket"));
    }

    #[test]
    fn test_committee_fraction_of_one_rejected() {
        let config = ScoringConfig {
            committee_penalty_fraction: 1.0,
            ..Default::default()
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert!(errors[0].contains("committee_penalty_fraction"));
    }

    #[test]
    fn test_nan_weight_rejected() {
        let config = ScoringConfig {
            w_importance: f64::NAN,
            ..Default::default()
        };
        assert!(validate_scoring(&config).is_err());
    }

    #[test]
    fn test_collects_all_errors() {
        let config = ScoringConfig {
            w_cash: -1.0,
            replacement_salary_bracket: 0,
            confidence_floor: 2.0,
            ..Default::default()
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
