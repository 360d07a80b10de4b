// dvbs2
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A DVB-S2 (ETSI EN 302 307) baseband-to-IQ transmit modulator core for QPSK, code rate 3/4,
//! normal FECFRAME. The pipeline turns a user payload bit sequence into an oversampled complex
//! IQ stream: baseband framing and scrambling, BCH outer FEC, LDPC inner FEC, QPSK mapping,
//! physical-layer header construction, physical-layer scrambling, and root-raised-cosine
//! pulse-shaping interpolation, in that order. See [`pipeline::Pipeline`] for the entry point.

#![warn(rust_2018_idioms)]
#![forbid(unsafe_code)]

pub mod bbheader;
pub mod bch;
pub mod fir;
pub mod ldpc;
pub mod mapper;
pub mod pipeline;
pub mod pl_header;
pub mod scramble;
pub mod tables;

pub use pipeline::{FecFrameType, Oversampling, Pipeline, PipelineConfig};
