// dvbs2
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The pipeline driver (C10): sequences every stage from a user payload bit slice to an
//! oversampled IQ sample stream, in the order `examples/original_source/dvb2s_test.go` exercises
//! the reference implementation's stages.

use dvbs2_core::complex::Complex;
use dvbs2_core::errors::{config_rejected, Result};

use crate::bbheader::BbHeader;
use crate::bch::{bch_encode, bch_generator_polynomial};
use crate::fir::{rrc_coefficients, Fir};
use crate::ldpc::ldpc_encode;
use crate::mapper::map_qpsk;
use crate::pl_header::encode_pl_header;
use crate::scramble::{bb_scramble, PlScrambler};
use crate::tables::{
    LDPC_CIRCULANT, LDPC_Q_NORMAL, LDPC_TABLE_3_4, NBB_NORMAL, NBCH_NORMAL, NLDPC_NORMAL,
};

use dvbs2_core::bits::FecFrame;

/// The two FECFRAME lengths the standard defines. Only `Normal` is actually encodable by this
/// build: `Short` is accepted as a configuration value so callers can name it, but is rejected at
/// [`Pipeline::new`] since no short-frame LDPC table or BCH sub-polynomial set exists here.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FecFrameType {
    Normal,
    Short,
}

/// The supported interpolation ratios (symbols-to-samples) for the output IQ stream.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Oversampling {
    Two,
    Four,
}

impl Oversampling {
    fn factor(self) -> usize {
        match self {
            Oversampling::Two => 2,
            Oversampling::Four => 4,
        }
    }
}

/// Construction-time configuration for a [`Pipeline`].
#[derive(Copy, Clone, Debug)]
pub struct PipelineConfig {
    pub fecframe_type: FecFrameType,
    pub oversampling: Oversampling,
    /// Root-raised-cosine roll-off factor, in `(0, 1]`.
    pub rolloff: f64,
    /// `plHeaderInt`, the 7-bit value carried in every PL header's PLSC: `(modcod << 2) | type`
    /// for DVB-S2 (spec.md §4.5 step 1).
    pub modcod_type: u8,
}

impl Default for PipelineConfig {
    /// Normal FECFRAME, 4x oversampling, 0.35 roll-off, `modcod = 7`/`type = 0` (`plHeaderInt =
    /// 28`): the conforming QPSK 3/4 configuration this crate actually implements end to end.
    fn default() -> Self {
        Self {
            fecframe_type: FecFrameType::Normal,
            oversampling: Oversampling::Four,
            rolloff: 0.35,
            modcod_type: 28,
        }
    }
}

/// A stateful, single-configuration DVB-S2 transmit modulator. Owns everything needed to turn
/// successive payload bit slices into oversampled IQ sample batches: the reusable `FecFrame`
/// scratch buffer, the BCH generator polynomial, and the interpolating FIR filter's history.
pub struct Pipeline {
    config: PipelineConfig,
    frame: FecFrame,
    gpoly: Vec<bool>,
    fir: Fir,
    dfl: usize,
}

impl Pipeline {
    /// Construct a pipeline for `config`, rejecting anything this build cannot encode.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        if config.fecframe_type != FecFrameType::Normal {
            return config_rejected("pipeline: only the normal FECFRAME is implemented");
        }
        if !(0.0..=1.0).contains(&config.rolloff) || config.rolloff == 0.0 {
            return config_rejected("pipeline: rolloff must be in (0, 1]");
        }

        let frame = FecFrame::new(NBB_NORMAL, NBCH_NORMAL, NLDPC_NORMAL)?;
        let (gpoly, _) = bch_generator_polynomial();

        let coefficients = rrc_coefficients(config.oversampling.factor(), config.rolloff, 8)?;
        let fir = Fir::new(coefficients, config.oversampling.factor(), false);

        let dfl = NBB_NORMAL - 80;

        log::debug!(
            "dvbs2 pipeline constructed: fecframe=normal oversampling={}x rolloff={} modcod_type={}",
            config.oversampling.factor(),
            config.rolloff,
            config.modcod_type,
        );

        Ok(Self { config, frame, gpoly, fir, dfl })
    }

    /// The data-field length in bits: how many payload bits fit in one FECFRAME's baseband
    /// header-plus-payload region.
    pub fn data_field_len(&self) -> usize {
        self.dfl
    }

    /// Reset the FIR interpolator's pulse-shaping history, as if this `Pipeline` were freshly
    /// constructed. The FECFRAME scratch buffer needs no equivalent reset: every stage below
    /// overwrites it in full on each call.
    pub fn reset(&mut self) {
        self.fir.reset();
    }

    /// Encode one FECFRAME worth of `payload` bits into an oversampled IQ sample stream.
    ///
    /// If `payload` is shorter than [`Self::data_field_len`] the remainder of the data field is
    /// zero-padded and a warning is logged; if it is longer, only the first
    /// [`Self::data_field_len`] bits are consumed. Returns the IQ samples and the number of
    /// payload bits actually consumed.
    pub fn encode(&mut self, payload: &[bool]) -> Result<(Vec<Complex>, usize)> {
        let consumed = payload.len().min(self.dfl);
        if payload.len() < self.dfl {
            log::warn!(
                "dvbs2 pipeline: payload shorter than the data field ({} < {}), zero-padding",
                payload.len(),
                self.dfl,
            );
        }

        let header = BbHeader::new(NBB_NORMAL, 0);
        let bbframe = self.frame.bbframe_mut();
        bbframe[..80].copy_from_slice(header.bits());
        bbframe[80..80 + consumed].copy_from_slice(&payload[..consumed]);
        bbframe[80 + consumed..].fill(false);

        bb_scramble(self.frame.bbframe_mut());

        let bbframe = self.frame.bbframe();
        let mut parity = vec![false; self.gpoly.len() - 1];
        bch_encode(bbframe, &self.gpoly, &mut parity);
        self.frame.bch_parity_mut().copy_from_slice(&parity);

        let bch_block = self.frame.bch_block().to_vec();
        let mut ldpc_parity = vec![false; NLDPC_NORMAL - NBCH_NORMAL];
        ldpc_encode(&bch_block, &LDPC_TABLE_3_4, LDPC_Q_NORMAL, &mut ldpc_parity);
        self.frame.ldpc_parity_mut().copy_from_slice(&ldpc_parity);

        debug_assert_eq!(NBCH_NORMAL % LDPC_CIRCULANT, 0);

        let fecframe = self.frame.as_slice();
        let mut payload_symbols = vec![Complex::default(); fecframe.len() / 2];
        map_qpsk(fecframe, &mut payload_symbols)?;

        let mut scrambler = PlScrambler::new();
        scrambler.scramble(&mut payload_symbols);

        let header_symbols = encode_pl_header(self.config.modcod_type);

        let mut samples = Vec::with_capacity(
            (header_symbols.len() + payload_symbols.len()) * self.config.oversampling.factor(),
        );
        for symbol in header_symbols.into_iter().chain(payload_symbols) {
            self.fir.interpolate(symbol, &mut samples);
        }

        Ok((samples, consumed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_short_fecframe() {
        let config = PipelineConfig { fecframe_type: FecFrameType::Short, ..Default::default() };
        assert!(Pipeline::new(config).is_err());
    }

    #[test]
    fn rejects_out_of_range_rolloff() {
        let config = PipelineConfig { rolloff: 0.0, ..Default::default() };
        assert!(Pipeline::new(config).is_err());
    }

    #[test]
    fn encodes_a_full_frame_to_the_expected_sample_count() {
        let mut pipeline = Pipeline::new(PipelineConfig::default()).unwrap();
        let payload = vec![true; pipeline.data_field_len()];
        let (samples, consumed) = pipeline.encode(&payload).unwrap();

        assert_eq!(consumed, pipeline.data_field_len());
        let expected_symbols = NLDPC_NORMAL / 2 + crate::tables::PL_HEADER_SLOT;
        assert_eq!(samples.len(), expected_symbols * 4);
    }

    #[test]
    fn short_payload_is_zero_padded_and_still_produces_a_full_frame() {
        let mut pipeline = Pipeline::new(PipelineConfig::default()).unwrap();
        let payload = vec![true; 16];
        let (samples, consumed) = pipeline.encode(&payload).unwrap();

        assert_eq!(consumed, 16);
        let expected_symbols = NLDPC_NORMAL / 2 + crate::tables::PL_HEADER_SLOT;
        assert_eq!(samples.len(), expected_symbols * 4);
    }

    #[test]
    fn every_output_sample_has_finite_magnitude() {
        let mut pipeline = Pipeline::new(PipelineConfig::default()).unwrap();
        let payload: Vec<bool> = (0..pipeline.data_field_len()).map(|i| i % 3 == 0).collect();
        let (samples, _) = pipeline.encode(&payload).unwrap();
        assert!(samples.iter().all(|s| s.magnitude().is_finite()));
    }
}
