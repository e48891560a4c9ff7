/// Percentile ranks in [0, 1] for each value, against the other values in
/// the same slice.
///
/// - `None` stays `None`: a missing input is unknown, not bad. Callers
///   zero-weight missing components and renormalize.
/// - Ties share the average (midpoint) rank.
/// - A single present value ranks 1.0 (it is the pool maximum).
pub fn percentile_ranks(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut indexed: Vec<(usize, f64)> = values
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.filter(|f| f.is_finite()).map(|f| (i, f)))
        .collect();

    let n = indexed.len();
    let mut out = vec![None; values.len()];
    if n == 0 {
        return out;
    }
    if n == 1 {
        out[indexed[0].0] = Some(1.0);
        return out;
    }

    indexed.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

    // Assign average ranks for tie groups. Ranks are 1..=n.
    let mut rank = 0;
    while rank < n {
        let start = rank;
        let val = indexed[rank].1;
        while rank < n && indexed[rank].1 == val {
            rank += 1;
        }
        let end = rank; // exclusive
        let avg_rank = (start + 1 + end) as f64 / 2.0;
        let pr = (avg_rank - 1.0) / (n - 1) as f64;
        for &(orig, _) in &indexed[start..end] {
            out[orig] = Some(pr);
        }
    }

    out
}

/// Percentile ranks on the 0-100 scale for fully-present score slices.
pub fn percentile_ranks_scaled(values: &[f64]) -> Vec<f64> {
    let opts: Vec<Option<f64>> = values.iter().map(|&v| Some(v)).collect();
    percentile_ranks(&opts)
        .into_iter()
        .map(|pr| pr.unwrap_or(0.0) * 100.0)
        .collect()
}

pub fn clamp01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_ordering() {
        let prs = percentile_ranks(&[Some(10.0), Some(30.0), Some(20.0)]);
        assert_eq!(prs, vec![Some(0.0), Some(1.0), Some(0.5)]);
    }

    #[test]
    fn test_missing_stays_missing() {
        let prs = percentile_ranks(&[Some(5.0), None, Some(15.0)]);
        assert_eq!(prs[0], Some(0.0));
        assert_eq!(prs[1], None);
        assert_eq!(prs[2], Some(1.0));
    }

    #[test]
    fn test_ties_share_midpoint_rank() {
        let prs = percentile_ranks(&[Some(1.0), Some(2.0), Some(2.0), Some(3.0)]);
        // Tied values at ranks 2 and 3 share (2+3)/2 = 2.5 -> (2.5-1)/3 = 0.5
        assert_eq!(prs[1], Some(0.5));
        assert_eq!(prs[2], Some(0.5));
        assert_eq!(prs[0], Some(0.0));
        assert_eq!(prs[3], Some(1.0));
    }

    #[test]
    fn test_single_value_is_the_maximum() {
        assert_eq!(percentile_ranks(&[Some(7.0)]), vec![Some(1.0)]);
    }

    #[test]
    fn test_all_missing() {
        assert_eq!(percentile_ranks(&[None, None]), vec![None, None]);
    }

    #[test]
    fn test_nan_treated_as_missing() {
        let prs = percentile_ranks(&[Some(f64::NAN), Some(1.0), Some(2.0)]);
        assert_eq!(prs[0], None);
        assert_eq!(prs[1], Some(0.0));
        assert_eq!(prs[2], Some(1.0));
    }

    #[test]
    fn test_scaled_bounds() {
        let prs = percentile_ranks_scaled(&[3.0, 1.0, 2.0]);
        assert_eq!(prs, vec![100.0, 0.0, 50.0]);
    }

    #[test]
    fn test_all_equal_values() {
        let prs = percentile_ranks_scaled(&[4.0, 4.0, 4.0]);
        // Everyone shares the midpoint
        assert!(prs.iter().all(|&p| (p - 50.0).abs() < 1e-9));
    }
}
