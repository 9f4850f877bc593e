//! MACD (Moving Average Convergence Divergence).
//!
//! DIF = EMA(close, fast) - EMA(close, slow)
//! DEA = EMA(DIF, signal), seeded over the first `signal` defined DIF values
//! Histogram = DIF - DEA
//!
//! Default parameters: fast=12, slow=26, signal=9.
//! With fast < slow the DIF becomes defined at index slow-1 and the DEA at
//! index slow+signal-2.

use super::ema::ema;

pub const DEFAULT_FAST: usize = 12;
pub const DEFAULT_SLOW: usize = 26;
pub const DEFAULT_SIGNAL: usize = 9;

/// The three MACD series, aligned 1:1 with the input closes.
#[derive(Debug, Clone, PartialEq)]
pub struct MacdSeries {
    pub dif: Vec<Option<f64>>,
    pub dea: Vec<Option<f64>>,
    pub hist: Vec<Option<f64>>,
}

pub fn macd(closes: &[f64], fast: usize, slow: usize, signal_period: usize) -> MacdSeries {
    let ema_fast = ema(closes, fast);
    let ema_slow = ema(closes, slow);

    let dif: Vec<Option<f64>> = ema_fast
        .iter()
        .zip(&ema_slow)
        .map(|pair| match pair {
            (Some(f), Some(s)) => Some(f - s),
            _ => None,
        })
        .collect();

    // DIF is None for a prefix and defined for the contiguous tail, so the
    // signal EMA runs over the defined region and is shifted back into place.
    let mut dea: Vec<Option<f64>> = vec![None; closes.len()];
    if let Some(offset) = dif.iter().position(|v| v.is_some()) {
        let defined: Vec<f64> = dif[offset..].iter().flatten().copied().collect();
        for (i, value) in ema(&defined, signal_period).into_iter().enumerate() {
            dea[offset + i] = value;
        }
    }

    let hist: Vec<Option<f64>> = dif
        .iter()
        .zip(&dea)
        .map(|pair| match pair {
            (Some(d), Some(s)) => Some(d - s),
            _ => None,
        })
        .collect();

    MacdSeries { dif, dea, hist }
}

pub fn macd_default(closes: &[f64]) -> MacdSeries {
    macd(closes, DEFAULT_FAST, DEFAULT_SLOW, DEFAULT_SIGNAL)
}
