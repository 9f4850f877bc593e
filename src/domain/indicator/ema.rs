//! Exponential moving average.
//!
//! k = 2/(n+1), seeded with the SMA of the first n values, then
//! EMA[i] = x[i]*k + EMA[i-1]*(1-k). The first (n-1) positions are not yet
//! available and stay `None` — never zero, so a warmup value can never leak
//! into a crossover comparison.

/// Compute an EMA over `values`. Output has the same length; positions
/// before the seed are `None`. A zero period yields an all-`None` series.
pub fn ema(values: &[f64], period: usize) -> Vec<Option<f64>> {
    if period == 0 {
        return vec![None; values.len()];
    }

    let mut out = Vec::with_capacity(values.len());
    let k = 2.0 / (period as f64 + 1.0);
    let mut current = 0.0;
    let mut sum = 0.0;

    for (i, &value) in values.iter().enumerate() {
        if i < period - 1 {
            sum += value;
            out.push(None);
        } else if i == period - 1 {
            sum += value;
            current = sum / period as f64;
            out.push(Some(current));
        } else {
            current = value * k + current * (1.0 - k);
            out.push(Some(current));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn warmup_is_none() {
        let out = ema(&[10.0, 20.0, 30.0, 40.0, 50.0], 3);
        assert_eq!(out[0], None);
        assert_eq!(out[1], None);
        assert!(out[2].is_some());
        assert!(out[3].is_some());
        assert!(out[4].is_some());
    }

    #[test]
    fn seed_is_sma() {
        let out = ema(&[10.0, 20.0, 30.0], 3);
        assert_relative_eq!(out[2].unwrap(), 20.0);
    }

    #[test]
    fn recursive_smoothing() {
        let out = ema(&[10.0, 20.0, 30.0, 40.0, 50.0], 3);
        let k = 2.0 / 4.0;
        let seed = 20.0;
        let e3 = 40.0 * k + seed * (1.0 - k);
        let e4 = 50.0 * k + e3 * (1.0 - k);
        assert_relative_eq!(out[3].unwrap(), e3);
        assert_relative_eq!(out[4].unwrap(), e4);
    }

    #[test]
    fn period_1_tracks_input() {
        let out = ema(&[10.0, 20.0, 30.0], 1);
        assert_relative_eq!(out[0].unwrap(), 10.0);
        assert_relative_eq!(out[1].unwrap(), 20.0);
        assert_relative_eq!(out[2].unwrap(), 30.0);
    }

    #[test]
    fn constant_input_stays_constant() {
        let out = ema(&[100.0; 10], 4);
        for value in out.into_iter().skip(3) {
            assert_relative_eq!(value.unwrap(), 100.0);
        }
    }

    #[test]
    fn period_0_is_all_none() {
        let out = ema(&[10.0, 20.0], 0);
        assert_eq!(out, vec![None, None]);
    }

    #[test]
    fn empty_input() {
        assert!(ema(&[], 3).is_empty());
    }

    #[test]
    fn period_longer_than_input() {
        let out = ema(&[10.0, 20.0], 5);
        assert_eq!(out, vec![None, None]);
    }
}
