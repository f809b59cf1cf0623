//! Opening-range breakout strategy (day-session-aware, cooldown-aware).
//!
//! Per calendar (UTC) day, the opening range is the [min low, max high] band
//! of the day's first `lookback_minutes` worth of bars. A close beyond the
//! band by more than `atr_multiplier * ATR` fires a breakout signal. A
//! cooldown in hours suppresses repeated fires.
//!
//! Bars inside the range-formation window are always Flat: comparing them
//! against a band that includes later bars in the window would leak future
//! data into past signals. Days with fewer bars than the formation window
//! needs have no tradeable range and stay Flat throughout.

use chrono::NaiveDate;

use crate::domain::{Bar, Signal};
use crate::indicators::{Atr, Indicator};
use crate::strategies::Strategy;

#[derive(Debug, Clone)]
pub struct OpeningRangeBreakout {
    lookback_minutes: i64,
    atr_period: usize,
    atr_multiplier: f64,
    cooldown_hours: i64,
    name: String,
}

impl OpeningRangeBreakout {
    pub fn new(
        lookback_minutes: i64,
        atr_period: usize,
        atr_multiplier: f64,
        cooldown_hours: i64,
    ) -> Self {
        assert!(lookback_minutes > 0, "lookback_minutes must be > 0");
        assert!(cooldown_hours >= 0, "cooldown_hours must be >= 0");
        Self {
            lookback_minutes,
            atr_period,
            atr_multiplier,
            cooldown_hours,
            name: format!("opening_range_{lookback_minutes}m"),
        }
    }
}

impl Default for OpeningRangeBreakout {
    fn default() -> Self {
        Self::new(90, 10, 0.03, 2)
    }
}

/// Infer the series' bar interval as the median of consecutive timestamp
/// deltas, in whole seconds. Returns `None` for series shorter than 2 bars
/// or with a non-positive median (duplicate timestamps).
///
/// Heuristic: gaps (weekends, outages) skew individual deltas, but as long
/// as more than half the deltas are regular the median recovers the true
/// interval. An explicitly configured interval would be more robust; kept
/// as inference to match the data-driven behavior of the rest of the layer.
pub fn infer_bar_interval_secs(bars: &[Bar]) -> Option<i64> {
    if bars.len() < 2 {
        return None;
    }
    let mut deltas: Vec<i64> = bars
        .windows(2)
        .map(|w| (w[1].timestamp - w[0].timestamp).num_seconds())
        .collect();
    deltas.sort_unstable();
    let median = deltas[deltas.len() / 2];
    (median > 0).then_some(median)
}

impl Strategy for OpeningRangeBreakout {
    fn name(&self) -> &str {
        &self.name
    }

    fn generate_signals(&self, bars: &[Bar]) -> Vec<Signal> {
        let n = bars.len();
        let mut signals = vec![Signal::Flat; n];

        let Some(interval_secs) = infer_bar_interval_secs(bars) else {
            return signals;
        };
        let formation_bars = ((self.lookback_minutes * 60) / interval_secs).max(1) as usize;
        let cooldown_bars = ((self.cooldown_hours * 3600) / interval_secs) as usize;

        let atr = Atr::new(self.atr_period).compute(bars);

        // Raw breakout signals, day by day.
        let mut day_start = 0usize;
        let mut current_day: NaiveDate = bars[0].timestamp.date_naive();
        for i in 0..=n {
            let day_ended = i == n || bars[i].timestamp.date_naive() != current_day;
            if !day_ended {
                continue;
            }

            let day = &bars[day_start..i];
            if day.len() >= formation_bars {
                let window = &day[..formation_bars];
                let upper = window.iter().map(|b| b.high).fold(f64::MIN, f64::max);
                let lower = window.iter().map(|b| b.low).fold(f64::MAX, f64::min);

                // Only bars after the formation window may trade the range.
                for (j, bar) in day.iter().enumerate().skip(formation_bars) {
                    let k = day_start + j;
                    if atr[k].is_nan() {
                        continue;
                    }
                    let buffer = self.atr_multiplier * atr[k];
                    if bar.close > upper + buffer {
                        signals[k] = Signal::Long;
                    } else if bar.close < lower - buffer {
                        signals[k] = Signal::Short;
                    }
                }
            }

            if i < n {
                day_start = i;
                current_day = bars[i].timestamp.date_naive();
            }
        }

        apply_cooldown(&mut signals, cooldown_bars);
        signals
    }
}

/// Zero any non-flat signal that fires within `cooldown_bars` bars of the
/// previous surviving non-flat signal.
fn apply_cooldown(signals: &mut [Signal], cooldown_bars: usize) {
    if cooldown_bars == 0 {
        return;
    }
    let mut last_fired: Option<usize> = None;
    for i in 0..signals.len() {
        if signals[i].is_flat() {
            continue;
        }
        match last_fired {
            Some(j) if i - j < cooldown_bars => signals[i] = Signal::Flat,
            _ => last_fired = Some(i),
        }
    }
}
