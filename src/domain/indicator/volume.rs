//! Trailing simple moving average of volume.

/// Rolling mean of the last `window` volumes. The first (window-1) positions
/// are `None`.
pub fn volume_sma(volumes: &[f64], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; volumes.len()];
    }

    let mut out = Vec::with_capacity(volumes.len());
    let mut sum = 0.0;

    for (i, &volume) in volumes.iter().enumerate() {
        sum += volume;
        if i >= window {
            sum -= volumes[i - window];
        }
        if i >= window - 1 {
            out.push(Some(sum / window as f64));
        } else {
            out.push(None);
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
        let out = volume_sma(&[100.0, 200.0, 300.0, 400.0], 3);
        assert_eq!(out[0], None);
        assert_eq!(out[1], None);
        assert!(out[2].is_some());
        assert!(out[3].is_some());
    }

    #[test]
    fn trailing_mean() {
        let out = volume_sma(&[100.0, 200.0, 300.0, 400.0], 3);
        assert_relative_eq!(out[2].unwrap(), 200.0);
        assert_relative_eq!(out[3].unwrap(), 300.0);
    }

    #[test]
    fn window_1_tracks_input() {
        let out = volume_sma(&[5.0, 7.0, 9.0], 1);
        assert_relative_eq!(out[0].unwrap(), 5.0);
        assert_relative_eq!(out[1].unwrap(), 7.0);
        assert_relative_eq!(out[2].unwrap(), 9.0);
    }

    #[test]
    fn constant_volume() {
        let out = volume_sma(&[1000.0; 25], 20);
        for value in out.into_iter().skip(19) {
            assert_relative_eq!(value.unwrap(), 1000.0);
        }
    }

    #[test]
    fn window_0_is_all_none() {
        assert_eq!(volume_sma(&[1.0, 2.0], 0), vec![None, None]);
    }

    #[test]
    fn empty_input() {
        assert!(volume_sma(&[], 20).is_empty());
    }
}
