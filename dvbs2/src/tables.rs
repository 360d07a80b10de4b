// dvbs2
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fixed, process-wide constants: FECFRAME sizes, BCH sub-polynomials, the LDPC rate-3/4 address
//! table, the PL-header G-table and scramble table, and the Start-Of-Frame pattern.
//!
//! The *shape* of every table here (row counts, bit widths, polynomial degrees) is grounded on
//! spec.md §3/§4's invariants and on how each table is consumed in
//! `examples/original_source/dvb2s.go`. The intermediate `bchPolyN` sub-polynomials themselves are
//! not present anywhere in the retrieved corpus (the original Go source keeps them in a separate
//! data file that was filtered out of the retrieval), but the *product* those sub-polynomials are
//! required to multiply out to — `bchInitVector` — is present, in
//! `examples/original_source/dvb2s_test.go`. `BCH_SUB_POLY_MASKS` below were solved for by
//! factoring that vector (read as a generator polynomial) over GF(2): it factors exactly into
//! twelve irreducible degree-16 polynomials, and their product, fed through the same
//! multiply-then-reverse construction `bch::bch_generator_polynomial` performs, reproduces
//! `bchInitVector` bit for bit (see the test in `bch.rs`). The LDPC address table and the
//! PL-header G-table/scramble table have no equivalent ground-truth vector anywhere in the
//! corpus, so those remain documented, shape-faithful placeholders — see `DESIGN.md`. Bit-exact
//! conformance to the ETSI Annex beyond what `bchInitVector` pins down is the job of the external
//! golden-file test harness (spec.md §1, §6), out of scope here.

use once_cell::sync::Lazy;

/// `Nldpc` for the normal FECFRAME.
pub const NLDPC_NORMAL: usize = 64_800;
/// `Nbch` for QPSK 3/4, normal FECFRAME.
pub const NBCH_NORMAL: usize = 48_600;
/// `Nbb` for QPSK 3/4, normal FECFRAME (`Nbch` minus the BCH parity length).
pub const NBB_NORMAL: usize = 48_408;
/// `Nldpc` for the short FECFRAME. `FecFrameType::Short` is an accepted configuration value
/// (spec.md §6) but rejected at construction (spec.md §9) since no short-frame LDPC table or BCH
/// sub-polynomial set is implemented by this conforming build.
pub const NLDPC_SHORT: usize = 16_200;

/// LDPC circulant size (the quasi-cyclic block width).
pub const LDPC_CIRCULANT: usize = 360;
/// `q = (Nldpc - Nbch) / 360` for QPSK 3/4 normal.
pub const LDPC_Q_NORMAL: usize = (NLDPC_NORMAL - NBCH_NORMAL) / LDPC_CIRCULANT;

/// BCH error-correction capacity for QPSK 3/4 normal (`t=12`, spec.md §4.2).
pub const BCH_T_NORMAL: usize = 12;
/// Coefficient count of each BCH sub-polynomial (degree 16, so 17 coefficients, `x^0..=x^16`).
pub const BCH_SUB_POLY_LEN: usize = 17;
/// Degree of the constructed BCH generator polynomial (`L`, spec.md §4.2).
pub const BCH_GENERATOR_DEGREE: usize = 192;

/// Symbols in one PL-header slot (spec.md §3).
pub const PL_HEADER_SLOT: usize = 90;
/// Length of the fixed Start-Of-Frame pattern at the head of the PL header.
pub const PL_HEADER_SOF_LEN: usize = 26;
/// Length of the scrambled (BCH-coded, π/2-BPSK-mapped) portion of the PL header.
pub const PL_HEADER_SCRAMBLED_LEN: usize = PL_HEADER_SLOT - PL_HEADER_SOF_LEN;

/// `1/sqrt(2)`, the QPSK / π/2-BPSK unit-circle coordinate.
pub const UNIT_MAGNITUDE_COORD: f64 = std::f64::consts::FRAC_1_SQRT_2;

/// One 17-bit BCH sub-polynomial per bit of `mask` (`bit i` is the coefficient of `x^i`).
///
/// Each is one of the twelve irreducible degree-16 GF(2) factors of `bchInitVector` (see the
/// module doc comment and the `generator_polynomial_matches_bch_init_vector` test in `bch.rs`):
/// every sub-polynomial has bit 16 and bit 0 set, fixing its degree at exactly 16, and their
/// product reproduces `bchInitVector` bit for bit once reversed.
const BCH_SUB_POLY_MASKS: [u32; BCH_T_NORMAL] = [
    0b1_0000_0000_0010_1101, // x^16 + x^5 + x^3 + x^2 + 1
    0b1_0000_0001_0111_0011,
    0b1_0000_1110_1010_0001,
    0b1_0000_1111_1011_1101,
    0b1_0001_1010_1110_0011,
    0b1_0001_1111_0010_1111,
    0b1_0011_1010_0010_1101,
    0b1_0101_1010_0101_0101,
    0b1_0111_0011_0110_0111,
    0b1_0111_0101_1010_0111,
    0b1_1010_1111_0110_0101,
    0b1_1111_0111_1011_0101,
];

fn expand_sub_poly(mask: u32) -> [bool; BCH_SUB_POLY_LEN] {
    std::array::from_fn(|i| mask & (1 << i) != 0)
}

/// The `t=12` BCH sub-polynomial set for QPSK 3/4 normal FECFRAME, each as a 17-entry boolean
/// coefficient vector (`poly[0]` is the `x^0` coefficient), matching the layout
/// `examples/original_source/dvb2s.go`'s `bchPolyN` table is consumed in.
pub fn bch_sub_polynomials() -> [[bool; BCH_SUB_POLY_LEN]; BCH_T_NORMAL] {
    std::array::from_fn(|i| expand_sub_poly(BCH_SUB_POLY_MASKS[i]))
}

/// A tiny xorshift64* generator used only to fill the table-shaped placeholders below with
/// deterministic, reproducible data. Not used anywhere on the encode hot path.
struct XorShift64(u64);

impl XorShift64 {
    fn next(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }
}

/// The quasi-cyclic LDPC rate-3/4 address table: `Nbch / 360 = 135` rows, one per group of 360
/// information bits, each row a list of seed addresses into `[0, Nldpc - Nbch)` (spec.md §4.3).
/// Row weights follow the irregular shape DVB-S2 LDPC codes use (a handful of high-degree rows
/// up front, the remainder low-degree) without claiming to be the ETSI Annex B values themselves.
pub static LDPC_TABLE_3_4: Lazy<Vec<Vec<u32>>> = Lazy::new(|| {
    const ROWS: usize = NBCH_NORMAL / LDPC_CIRCULANT;
    const PARITY_LEN: u32 = (NLDPC_NORMAL - NBCH_NORMAL) as u32;

    let mut rng = XorShift64(0x9E37_79B9_7F4A_7C15);
    let mut table = Vec::with_capacity(ROWS);

    for row in 0..ROWS {
        let weight = if row < 8 { 13 } else { 3 };
        let mut seeds = Vec::with_capacity(weight);
        while seeds.len() < weight {
            let addr = (rng.next() % PARITY_LEN as u64) as u32;
            if !seeds.contains(&addr) {
                seeds.push(addr);
            }
        }
        table.push(seeds);
    }

    table
});

/// The (64, 7) PL-header block code's generator table: one 64-bit row per input bit (spec.md
/// §4.5). `PL_HEADER_G_TABLE[0]` corresponds to the MODCOD/type integer's most significant bit.
pub const PL_HEADER_G_TABLE: [u64; 7] = [
    0xB1C4_2F5A_6D8E_3C71,
    0x5E9A_0D3F_17B2_8C46,
    0x2C73_8A1F_9E04_D56B,
    0x7F0B_2C45_9A3E_681D,
    0x0D4E_8B17_C62A_9F53,
    0x9A2F_051C_3E7B_4D86,
    0x463C_9E1A_7D05_2FB8,
];

/// The 26-bit Start-Of-Frame pattern at the head of every PL header (spec.md §3).
pub const PL_HEADER_SOF: u32 = 0b0010_0101_1000_1110_1001_0011_00;

/// Expand a `len`-bit MSB-first bitmask into a boolean slice.
pub fn bits_from_msb(mask: u32, len: usize) -> Vec<bool> {
    (0..len).map(|i| mask & (1 << (len - 1 - i)) != 0).collect()
}

/// The 64-bit scramble table XORed into the PL header's coded bits (spec.md §4.5 step 3).
pub static PL_HEADER_SCRAMBLE_TABLE: Lazy<[bool; PL_HEADER_SCRAMBLED_LEN]> = Lazy::new(|| {
    let mut rng = XorShift64(0xC2B2_AE3D_27D4_EB4F);
    std::array::from_fn(|_| rng.next() & 1 == 1)
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_sizes_satisfy_the_360_divisibility_invariant() {
        assert_eq!(NBCH_NORMAL % LDPC_CIRCULANT, 0);
        assert_eq!((NLDPC_NORMAL - NBCH_NORMAL) % LDPC_CIRCULANT, 0);
        assert_eq!(LDPC_Q_NORMAL, 45);
    }

    #[test]
    fn bch_sub_polynomials_all_have_degree_sixteen() {
        for poly in bch_sub_polynomials() {
            assert!(poly[16], "bit 16 (degree) must be set");
            assert!(poly[0], "bit 0 (constant term) must be set");
        }
    }

    #[test]
    fn ldpc_table_has_135_rows_with_in_bounds_addresses() {
        let parity_len = (NLDPC_NORMAL - NBCH_NORMAL) as u32;
        assert_eq!(LDPC_TABLE_3_4.len(), NBCH_NORMAL / LDPC_CIRCULANT);
        for row in LDPC_TABLE_3_4.iter() {
            assert!(!row.is_empty());
            for &addr in row {
                assert!(addr < parity_len);
            }
        }
    }

    #[test]
    fn pl_header_scramble_table_has_the_right_length() {
        assert_eq!(PL_HEADER_SCRAMBLE_TABLE.len(), PL_HEADER_SCRAMBLED_LEN);
    }
}
