//! Synthetic power and energy readings.

use rand::{Rng, RngCore};

/// Source of uniform draws in `[0, 1)`.
///
/// Every [`RngCore`] is a source; tests substitute fixed sequences.
pub trait UniformSource {
    fn next_unit(&mut self) -> f64;
}

impl<R: RngCore + ?Sized> UniformSource for R {
    fn next_unit(&mut self) -> f64 {
        self.random::<f64>()
    }
}

/// Minimum energy attributed to one sample (kWh).
pub const ENERGY_FLOOR_KWH: f64 = 0.1;

/// Power fluctuation span as a fraction of the base load (±25%).
const POWER_SPAN: f64 = 0.5;

/// Energy scale as a fraction of the base load.
const ENERGY_SCALE: f64 = 0.005;

/// One synthesized reading before a label is attached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub power_w: u32,
    pub energy_kwh: Option<f64>,
}

/// Power fluctuating ±25% around `base_w`, floored to a non-negative integer.
///
/// `u` must lie in `[0, 1)`. Non-finite bases yield 0.
pub fn power_w(base_w: f64, u: f64) -> u32 {
    let raw = (base_w + (u - 0.5) * base_w * POWER_SPAN).floor();
    // `as` saturates and maps NaN to 0.
    raw.max(0.0) as u32
}

/// Small positive energy scaled by `base_w`, floored at 0.1 and rounded
/// to two decimals.
pub fn energy_kwh(base_w: f64, u: f64) -> f64 {
    round2((u * base_w * ENERGY_SCALE).max(ENERGY_FLOOR_KWH))
}

/// Rounds to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Draws one reading from `source`: power first, then energy when requested.
pub fn synthesize<S: UniformSource + ?Sized>(
    source: &mut S,
    base_w: f64,
    include_energy: bool,
) -> Reading {
    let power_w = power_w(base_w, source.next_unit());
    let energy_kwh = include_energy.then(|| energy_kwh(base_w, source.next_unit()));
    Reading {
        power_w,
        energy_kwh,
    }
}

/// Replays a fixed list of draws, cycling when exhausted.
#[derive(Debug, Clone)]
pub struct FixedSource {
    values: Vec<f64>,
    next: usize,
}

impl FixedSource {
    /// Creates a source from `values`; an empty list always yields 0.0.
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        Self {
            values: values.into(),
            next: 0,
        }
    }
}

impl UniformSource for FixedSource {
    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.next % self.values.len()];
        self.next += 1;
        value
    }
}
