// dvbs2
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! QPSK constellation mapper (C6, spec.md §4.4), grounded on
//! `examples/original_source/dvb2s.go`'s `mapIntoConstellation`.

use dvbs2_core::complex::Complex;
use dvbs2_core::errors::Result;

use crate::tables::UNIT_MAGNITUDE_COORD;

/// Map `fecframe` two bits at a time onto the Gray-coded QPSK constellation (spec.md §4.4's
/// truth table), writing one symbol per pair into `symbols`.
///
/// `fecframe.len()` must be even and `symbols.len() == fecframe.len() / 2`; violating that is a
/// caller bug; the per-pair mapping itself cannot fail; the `Result` exists so a future
/// non-QPSK mapper sharing this signature has somewhere to report an impossible bit pattern.
pub fn map_qpsk(fecframe: &[bool], symbols: &mut [Complex]) -> Result<()> {
    debug_assert_eq!(fecframe.len(), symbols.len() * 2);

    let s = UNIT_MAGNITUDE_COORD;
    for (k, symbol) in symbols.iter_mut().enumerate() {
        let a = fecframe[2 * k];
        let b = fecframe[2 * k + 1];
        *symbol = match (a, b) {
            (false, false) => Complex::new(s, s),
            (false, true) => Complex::new(s, -s),
            (true, false) => Complex::new(-s, s),
            (true, true) => Complex::new(-s, -s),
        };
    }
    Ok(())
}

/// Recover the bit pair a QPSK symbol encodes, by sign of its real/imaginary components. Used by
/// tests to check the round-trip invariant of spec.md §8; production code never needs to invert
/// the mapper (this is a transmit-only modulator).
pub fn demap_qpsk(symbol: Complex) -> Result<(bool, bool)> {
    Ok(match (symbol.re >= 0.0, symbol.im >= 0.0) {
        (true, true) => (false, false),
        (true, false) => (false, true),
        (false, true) => (true, false),
        (false, false) => (true, true),
    })
}
