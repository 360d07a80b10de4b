// dvbs2-core
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `bits` module owns the FECFRAME backing storage and hands out disjoint views onto it.
//!
//! A FECFRAME is logically partitioned into three disjoint, contiguous regions (`bbframe`,
//! `bch_parity`, `ldpc_parity`) plus one view that spans the first two (`bch_block`). All regions
//! alias the same backing `Vec<bool>`; `FecFrame` hands out non-overlapping `&mut` borrows so
//! stages never hold conflicting references to the same bits.

use crate::errors::{config_rejected, Result};

/// A single FECFRAME of `nldpc` bits, partitioned into `bbframe | bch_parity | ldpc_parity`.
#[derive(Clone, Debug)]
pub struct FecFrame {
    bits: Vec<bool>,
    nbb: usize,
    nbch: usize,
}

impl FecFrame {
    /// Construct a zeroed FECFRAME. `nbb <= nbch <= nldpc` is the caller's responsibility to
    /// uphold (the DVB-S2 size tables in `dvbs2::tables` always satisfy it); a violation here is
    /// a configuration error in the caller, not a recoverable runtime condition.
    pub fn new(nbb: usize, nbch: usize, nldpc: usize) -> Result<Self> {
        if nbb > nbch || nbch > nldpc {
            return config_rejected("FecFrame: sizes must satisfy nbb <= nbch <= nldpc");
        }
        Ok(Self { bits: vec![false; nldpc], nbb, nbch })
    }

    /// Total FECFRAME length, `Nldpc`.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// `bbframe` = bits `[0, Nbb)`.
    pub fn bbframe(&self) -> &[bool] {
        &self.bits[..self.nbb]
    }

    /// Mutable view of `bbframe`.
    pub fn bbframe_mut(&mut self) -> &mut [bool] {
        &mut self.bits[..self.nbb]
    }

    /// `bchBlock` = bits `[0, Nbch)`, the LDPC input.
    pub fn bch_block(&self) -> &[bool] {
        &self.bits[..self.nbch]
    }

    /// `bchParity` = bits `[Nbb, Nbch)`.
    pub fn bch_parity(&self) -> &[bool] {
        &self.bits[self.nbb..self.nbch]
    }

    /// Mutable view of `bchParity`.
    pub fn bch_parity_mut(&mut self) -> &mut [bool] {
        &mut self.bits[self.nbb..self.nbch]
    }

    /// `ldpcParity` = bits `[Nbch, Nldpc)`.
    pub fn ldpc_parity(&self) -> &[bool] {
        &self.bits[self.nbch..]
    }

    /// Mutable view of `ldpcParity`.
    pub fn ldpc_parity_mut(&mut self) -> &mut [bool] {
        &mut self.bits[self.nbch..]
    }

    /// The entire FECFRAME, in bit order.
    pub fn as_slice(&self) -> &[bool] {
        &self.bits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regions_are_disjoint_and_cover_the_frame() {
        let mut f = FecFrame::new(4, 6, 10).unwrap();
        assert_eq!(f.bbframe().len(), 4);
        assert_eq!(f.bch_parity().len(), 2);
        assert_eq!(f.ldpc_parity().len(), 4);
        assert_eq!(f.bch_block().len(), 6);

        f.bbframe_mut().fill(true);
        f.bch_parity_mut().fill(false);
        f.ldpc_parity_mut().fill(true);

        // bbframe writes are visible through bch_block, the aliasing view over [0, Nbch).
        assert!(f.bch_block()[..4].iter().all(|&b| b));
        assert!(f.bch_block()[4..].iter().all(|&b| !b));
        assert!(f.ldpc_parity().iter().all(|&b| b));
    }

    #[test]
    fn rejects_malformed_sizes() {
        assert!(FecFrame::new(6, 4, 10).is_err());
        assert!(FecFrame::new(4, 11, 10).is_err());
    }
}
