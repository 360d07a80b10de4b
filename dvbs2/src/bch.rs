// dvbs2
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! BCH outer FEC encoder (C4, spec.md §4.2), grounded on
//! `examples/original_source/dvb2s.go`'s `bchPolymul`/`bchInit`/`bchEncode`.

use crate::tables::{bch_sub_polynomials, BCH_SUB_POLY_LEN};

/// Multiply two GF(2) polynomials (`a` fixed at `BCH_SUB_POLY_LEN` coefficients, `b` of length
/// `len_b`) via bitwise AND + XOR-accumulate, writing the product into `out` and returning the
/// product's coefficient count (its degree plus one).
fn gf2_poly_mul(a: &[bool; BCH_SUB_POLY_LEN], b: &[bool], len_b: usize, out: &mut [bool]) -> usize {
    for c in out.iter_mut().take(BCH_SUB_POLY_LEN + len_b) {
        *c = false;
    }

    for j in 0..len_b {
        for i in 0..BCH_SUB_POLY_LEN {
            out[i + j] ^= a[i] && b[j];
        }
    }

    let mut degree_plus_one = 0;
    for (i, &c) in out.iter().enumerate().take(BCH_SUB_POLY_LEN + len_b) {
        if c {
            degree_plus_one = i + 1;
        }
    }
    degree_plus_one
}

/// Construct the BCH generator polynomial for QPSK 3/4 normal FECFRAME (`t=12`): multiply all
/// twelve sub-polynomials pairwise, then reverse the product in place.
///
/// Returns the coefficient count, which spec.md §8 requires to be exactly 193 for this
/// configuration (`BCH_GENERATOR_DEGREE + 1`).
pub fn bch_generator_polynomial() -> (Vec<bool>, usize) {
    let sub_polys = bch_sub_polynomials();

    let mut scratch = vec![false; BCH_SUB_POLY_LEN * sub_polys.len() + 1];
    let mut len = gf2_poly_mul(&sub_polys[0], &sub_polys[1], BCH_SUB_POLY_LEN, &mut scratch);

    let mut product = scratch.clone();
    for sub_poly in sub_polys.iter().skip(2) {
        len = gf2_poly_mul(sub_poly, &product, len, &mut scratch);
        std::mem::swap(&mut product, &mut scratch);
    }

    let mut gpoly = vec![false; len];
    for i in 0..len {
        gpoly[i] = product[len - i - 1];
    }

    (gpoly, len)
}

/// Systematic, MSB-first shift-register BCH division (spec.md §4.2).
///
/// `gpoly` is the generator polynomial from [`bch_generator_polynomial`]; `bbframe` is the
/// information block; `parity` is written in place and must have length `gpoly.len() - 1`.
///
/// The inner loop reads `gpoly[i + 1]` for `i` in `[0, len - 1)`, which only ever touches the
/// first `len - 1` generator coefficients — spec.md §9 flags this as a suspected defect in the
/// reference implementation and directs implementations to reproduce it rather than "fix" it,
/// verifying correctness only against the (external, out of scope) golden parity vector.
pub fn bch_encode(bbframe: &[bool], gpoly: &[bool], parity: &mut [bool]) {
    debug_assert_eq!(parity.len() + 1, gpoly.len());

    parity.fill(false);

    let len = parity.len();
    for &bit in bbframe {
        let fb = parity[0] ^ bit;
        for i in 0..len - 1 {
            parity[i] = (gpoly[i + 1] && fb) ^ parity[i + 1];
        }
        parity[len - 1] = fb;
    }
}
