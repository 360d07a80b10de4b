// dvbs2
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The root-raised-cosine interpolating FIR filter (C9, spec.md §4.7), grounded on the circular
//! tap-buffer structure of `examples/original_source/dvb2s_fir.go`'s `fir`/`newFir`.

use dvbs2_core::complex::Complex;
use dvbs2_core::errors::{config_rejected, Result};

/// Compute the root-raised-cosine impulse response, sampled at `oversampling` samples per symbol
/// over `span` symbols on either side of the centre tap, for roll-off `rolloff` in `(0, 1]`.
///
/// Unlike the fixed-size tables elsewhere in this crate, these coefficients are derived from the
/// closed-form RRC formula rather than an unavailable Annex table: the formula is exact and
/// auditable, so there is nothing to place behind a documented-placeholder policy.
pub fn rrc_coefficients(oversampling: usize, rolloff: f64, span: usize) -> Result<Vec<f64>> {
    if oversampling == 0 {
        return config_rejected("fir: oversampling must be nonzero");
    }
    if !(0.0..=1.0).contains(&rolloff) || rolloff == 0.0 {
        return config_rejected("fir: rolloff must be in (0, 1]");
    }

    let taps_per_side = span * oversampling;
    let n = 2 * taps_per_side + 1;
    let ts = oversampling as f64;

    let mut coeffs = Vec::with_capacity(n);
    for k in 0..n {
        let t = (k as f64 - taps_per_side as f64) / ts;
        coeffs.push(rrc_impulse(t, rolloff));
    }
    Ok(coeffs)
}

/// The root-raised-cosine impulse response evaluated at `t` symbol periods from the centre tap,
/// handling the two removable singularities (`t = 0` and `t = +-1/(4*rolloff)`) analytically.
fn rrc_impulse(t: f64, rolloff: f64) -> f64 {
    if t.abs() < 1e-9 {
        return 1.0 - rolloff + 4.0 * rolloff / std::f64::consts::PI;
    }

    let four_beta_t = 4.0 * rolloff * t;
    if (four_beta_t.abs() - 1.0).abs() < 1e-9 {
        let a = 1.0 + 2.0 / std::f64::consts::PI;
        let b = 1.0 - 2.0 / std::f64::consts::PI;
        let sign = if four_beta_t > 0.0 { 1.0 } else { -1.0 };
        return (rolloff / std::f64::consts::SQRT_2)
            * (a * (std::f64::consts::PI / (4.0 * rolloff)).sin()
                + sign * b * (std::f64::consts::PI / (4.0 * rolloff)).cos());
    }

    let pi = std::f64::consts::PI;
    let numerator = (pi * t * (1.0 - rolloff)).sin()
        + 4.0 * rolloff * t * (pi * t * (1.0 + rolloff)).cos();
    let denominator = pi * t * (1.0 - four_beta_t * four_beta_t);
    numerator / denominator
}

/// An interpolating FIR filter driven by a circular tap buffer, matching
/// `examples/original_source/dvb2s_fir.go`'s structure: a fixed-size history ring plus a running
/// write cursor, so each output sample costs one insert and one dot product over `coefficients`.
pub struct Fir {
    coefficients: Vec<f64>,
    history: Vec<Complex>,
    cursor: usize,
    oversampling: usize,
    interpolate_by_repeat: bool,
}

impl Fir {
    /// Build a filter from precomputed `coefficients` (see [`rrc_coefficients`]).
    ///
    /// `interpolate_by_repeat` selects between the two zero-insertion policies spec.md §4.7
    /// allows: `false` inserts true zeros between symbols (the DSP-correct policy, producing the
    /// expected stopband image rejection); `true` sample-and-holds the input symbol across the
    /// inserted positions instead, trading spectral correctness for a simpler, filterless
    /// receiver chain during bring-up.
    pub fn new(coefficients: Vec<f64>, oversampling: usize, interpolate_by_repeat: bool) -> Self {
        let history = vec![Complex::default(); coefficients.len()];
        Self { coefficients, history, cursor: 0, oversampling, interpolate_by_repeat }
    }

    /// Reset the filter's internal history to silence, as if freshly constructed. Required by
    /// spec.md §5 so a caller can reuse one `Fir` across unrelated transmissions without the tail
    /// of the previous one leaking into the next.
    pub fn reset(&mut self) {
        self.history.fill(Complex::default());
        self.cursor = 0;
    }

    /// Write `sample` into the tap at the current cursor, sum the filter against that write, then
    /// advance the cursor — in that order, matching
    /// `examples/original_source/dvb2s_fir.go`'s `fir()` method.
    fn step(&mut self, sample: Complex) -> Complex {
        let n = self.history.len();
        self.history[self.cursor] = sample;

        let mut acc = Complex::default();
        for (i, &c) in self.coefficients.iter().enumerate() {
            let idx = (i + self.cursor) % n;
            acc += self.history[idx] * c;
        }

        self.cursor = (self.cursor + 1) % n;
        acc
    }

    /// Interpolate one input `symbol` up to [`Self::oversampling`] output samples, appended to
    /// `out`.
    pub fn interpolate(&mut self, symbol: Complex, out: &mut Vec<Complex>) {
        for phase in 0..self.oversampling {
            let driven = if phase == 0 {
                symbol
            } else if self.interpolate_by_repeat {
                symbol
            } else {
                Complex::default()
            };
            out.push(self.step(driven));
        }
    }

    /// The oversampling ratio this filter was built with.
    pub fn oversampling(&self) -> usize {
        self.oversampling
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rrc_coefficients_are_symmetric_about_the_centre_tap() {
        let coeffs = rrc_coefficients(4, 0.35, 6).unwrap();
        let n = coeffs.len();
        for i in 0..n / 2 {
            assert!((coeffs[i] - coeffs[n - 1 - i]).abs() < 1e-9);
        }
    }

    #[test]
    fn rrc_coefficients_has_the_expected_tap_count() {
        let coeffs = rrc_coefficients(2, 0.2, 8).unwrap();
        assert_eq!(coeffs.len(), 2 * 8 * 2 + 1);
    }

    #[test]
    fn rejects_zero_oversampling_and_out_of_range_rolloff() {
        assert!(rrc_coefficients(0, 0.35, 6).is_err());
        assert!(rrc_coefficients(4, 0.0, 6).is_err());
        assert!(rrc_coefficients(4, 1.5, 6).is_err());
    }

    #[test]
    fn interpolate_produces_oversampling_many_outputs_per_input() {
        let coeffs = rrc_coefficients(4, 0.35, 4).unwrap();
        let mut fir = Fir::new(coeffs, 4, false);
        let mut out = Vec::new();
        fir.interpolate(Complex::new(1.0, 0.0), &mut out);
        assert_eq!(out.len(), 4);
    }

    #[test]
    fn reset_restores_the_all_zero_history() {
        let coeffs = rrc_coefficients(2, 0.35, 4).unwrap();
        let mut fir = Fir::new(coeffs, 2, false);
        let mut out = Vec::new();
        fir.interpolate(Complex::new(1.0, 1.0), &mut out);
        fir.reset();

        let mut fresh = Fir::new(rrc_coefficients(2, 0.35, 4).unwrap(), 2, false);
        let mut out_after_reset = Vec::new();
        let mut out_fresh = Vec::new();
        fir.interpolate(Complex::new(0.5, -0.5), &mut out_after_reset);
        fresh.interpolate(Complex::new(0.5, -0.5), &mut out_fresh);
        assert_eq!(out_after_reset, out_fresh);
    }

    #[test]
    fn sample_and_hold_policy_repeats_the_driven_input_across_the_oversampling_window() {
        let coeffs = vec![1.0];
        let mut fir = Fir::new(coeffs, 3, true);
        let mut out = Vec::new();
        fir.interpolate(Complex::new(2.0, 0.0), &mut out);
        assert_eq!(out, vec![Complex::new(2.0, 0.0); 3]);
    }
}
