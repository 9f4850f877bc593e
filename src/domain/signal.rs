//! Signal generation: MACD crossover gated by a volume filter.
//!
//! Entry: DIF crosses from at-or-below to above DEA (golden cross) while the
//! current volume exceeds volume_ma * volume_factor. Exit: DIF crosses from
//! at-or-above to below DEA (death cross). Signals are advisory; the
//! simulator moves the money.

use super::indicator::IndicatorFrame;
use super::ohlcv::DailyBar;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalKind {
    Enter,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalEvent {
    pub bar_index: usize,
    pub kind: SignalKind,
}

/// Walk the bars in order and emit entry/exit events.
///
/// Crossing detection needs the current and previous DIF/DEA to all be
/// defined; warmup bars never produce signals, and an undefined volume
/// average suppresses entry for that bar. At most one signal per bar, and an
/// exit for an open position always wins over a same-bar entry re-check, so
/// the output strictly alternates Enter/Exit starting with Enter.
pub fn generate_signals(
    bars: &[DailyBar],
    frame: &IndicatorFrame,
    volume_factor: f64,
) -> Vec<SignalEvent> {
    let mut events = Vec::new();
    let mut open = false;

    for i in 1..bars.len().min(frame.len()) {
        let (Some(dif), Some(dea), Some(prev_dif), Some(prev_dea)) = (
            frame.dif[i],
            frame.dea[i],
            frame.dif[i - 1],
            frame.dea[i - 1],
        ) else {
            continue;
        };

        let golden_cross = prev_dif <= prev_dea && dif > dea;
        let death_cross = prev_dif >= prev_dea && dif < dea;

        if open {
            if death_cross {
                events.push(SignalEvent {
                    bar_index: i,
                    kind: SignalKind::Exit,
                });
                open = false;
            }
            continue;
        }

        if golden_cross {
            let volume_ok = frame.volume_ma[i]
                .map(|ma| bars[i].volume > ma * volume_factor)
                .unwrap_or(false);
            if volume_ok {
                events.push(SignalEvent {
                    bar_index: i,
                    kind: SignalKind::Enter,
                });
                open = true;
            }
        }
    }

    events
}
