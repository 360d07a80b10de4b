// dvbs2
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The 90-symbol PL header (C7, spec.md §4.5): a 26-symbol Start-Of-Frame pattern followed by a
//! 64-symbol PLSC (PL signalling code) built from a (64,7) block code, scrambled, and mapped to
//! π/2-BPSK. Grounded on `examples/original_source/dvb2s.go`'s `plHeaderEncode`.

use dvbs2_core::complex::Complex;

use crate::tables::{
    bits_from_msb, PL_HEADER_G_TABLE, PL_HEADER_SCRAMBLE_TABLE, PL_HEADER_SLOT, PL_HEADER_SOF,
    PL_HEADER_SOF_LEN,
};

/// Encode `plheader_int` (the 7-bit `plHeaderInt` of spec.md §4.5 step 1, MSB first) into the
/// 64-bit PLSC word `x`: the XOR of the rows of [`PL_HEADER_G_TABLE`] selected by its set bits.
fn plsc_word(plheader_int: u8) -> u64 {
    let mut x = 0u64;
    for (i, &row) in PL_HEADER_G_TABLE.iter().enumerate() {
        let bit = (plheader_int >> (6 - i)) & 1;
        if bit == 1 {
            x ^= row;
        }
    }
    x
}

/// Build the 64-bit scrambled PLSC region from `x` and `plheader_int`, following spec.md §4.5
/// step 3 pairwise: each even bit `e` comes straight from `x`; each odd bit `o` is `e` XORed with
/// `plHeaderInt`'s LSB, *not* an independent bit of `x`. Both are then XORed with
/// [`PL_HEADER_SCRAMBLE_TABLE`].
fn plsc_scrambled(x: u64, plheader_int: u8) -> [bool; 64] {
    let header_bit = plheader_int & 1 != 0;
    let mut scrambled = [false; 64];
    for p in 0..32 {
        let m = 1u64 << (31 - p);
        let e = (x & m) != 0;
        let o = e != header_bit;
        scrambled[2 * p] = e != PL_HEADER_SCRAMBLE_TABLE[2 * p];
        scrambled[2 * p + 1] = o != PL_HEADER_SCRAMBLE_TABLE[2 * p + 1];
    }
    scrambled
}

/// π/2-BPSK map one bit of the 90-bit header buffer at absolute symbol index `k` (spec.md §4.5
/// step 4): even indices map onto the `(+s, +s)`/`(-s, -s)` diagonal, odd indices onto the
/// `(-s, +s)`/`(+s, -s)` diagonal.
fn map_pi2_bpsk(bit: bool, k: usize, s: f64) -> Complex {
    match (k % 2, bit) {
        (0, false) => Complex::new(s, s),
        (0, true) => Complex::new(-s, -s),
        (_, false) => Complex::new(-s, s),
        (_, true) => Complex::new(s, -s),
    }
}

/// Build the full 90-symbol PL header for a given `plheader_int` (spec.md §4.5): 26 SOF symbols
/// followed by 64 PLSC symbols. Every output symbol has unit magnitude.
pub fn encode_pl_header(plheader_int: u8) -> [Complex; PL_HEADER_SLOT] {
    let sof_bits = bits_from_msb(PL_HEADER_SOF, PL_HEADER_SOF_LEN);
    let x = plsc_word(plheader_int);
    let scrambled = plsc_scrambled(x, plheader_int);

    let s = crate::tables::UNIT_MAGNITUDE_COORD;
    std::array::from_fn(|k| {
        let bit = if k < PL_HEADER_SOF_LEN { sof_bits[k] } else { scrambled[k - PL_HEADER_SOF_LEN] };
        map_pi2_bpsk(bit, k, s)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_has_the_right_length_and_unit_magnitude_symbols() {
        let header = encode_pl_header(28);
        assert_eq!(header.len(), PL_HEADER_SLOT);
        for symbol in header {
            assert!((symbol.magnitude() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn header_encoding_is_deterministic() {
        assert_eq!(encode_pl_header(42), encode_pl_header(42));
    }

    #[test]
    fn distinct_plheader_ints_usually_produce_distinct_headers() {
        assert_ne!(encode_pl_header(0), encode_pl_header(1));
    }

    #[test]
    fn sof_region_does_not_depend_on_plheader_int() {
        let a = encode_pl_header(5);
        let b = encode_pl_header(100);
        assert_eq!(&a[..PL_HEADER_SOF_LEN], &b[..PL_HEADER_SOF_LEN]);
    }

    #[test]
    fn odd_plsc_bits_are_derived_from_the_paired_even_bit_not_independent_bits_of_x() {
        // Every pair's odd bit (pre-scrambling) must equal its own even bit XORed with
        // plheader_int's LSB, not an independent bit of `x`. Check this against the spec formula
        // directly for both possible values of the LSB.
        for plheader_int in [28u8, 29u8] {
            let x = plsc_word(plheader_int);
            let header_bit = plheader_int & 1 != 0;
            let scrambled = plsc_scrambled(x, plheader_int);

            for p in 0..32 {
                let m = 1u64 << (31 - p);
                let e = (x & m) != 0;
                let o = e != header_bit;
                assert_eq!(scrambled[2 * p], e != PL_HEADER_SCRAMBLE_TABLE[2 * p]);
                assert_eq!(scrambled[2 * p + 1], o != PL_HEADER_SCRAMBLE_TABLE[2 * p + 1]);
            }
        }
    }
}
