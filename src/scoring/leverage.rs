/// Importance: how much an entity improves the best achievable lineup
/// versus spending the same salary elsewhere at its position.
///
/// The replacement is the salary-matched alternative: the highest-salary
/// entity in the same pool at least one full bracket cheaper. No entity is
/// ever judged to subtract value, only to add none.
pub fn importance_scores(
    salaries: &[u32],
    leverage_percentiles: &[f64],
    bracket: u32,
) -> Vec<f64> {
    debug_assert_eq!(salaries.len(), leverage_percentiles.len());

    salaries
        .iter()
        .zip(leverage_percentiles)
        .map(|(&salary, &lev)| {
            let repl = replacement_percentile(salary, salaries, leverage_percentiles, bracket);
            (lev - repl).max(0.0)
        })
        .collect()
}

/// Leverage percentile of the nearest-salary replacement, or 0.0 when no
/// entity sits a full bracket below.
fn replacement_percentile(
    salary: u32,
    salaries: &[u32],
    leverage_percentiles: &[f64],
    bracket: u32,
) -> f64 {
    let ceiling = match salary.checked_sub(bracket) {
        Some(c) => c,
        None => return 0.0,
    };

    let mut best: Option<(u32, f64)> = None;
    for (&s, &lev) in salaries.iter().zip(leverage_percentiles) {
        if s > ceiling {
            continue;
        }
        // Nearest salary wins; among equals, credit the stronger option
        let better = match best {
            None => true,
            Some((bs, bl)) => s > bs || (s == bs && lev > bl),
        };
        if better {
            best = Some((s, lev));
        }
    }

    best.map(|(_, lev)| lev).unwrap_or(0.0)
}
