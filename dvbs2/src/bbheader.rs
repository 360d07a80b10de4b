// dvbs2
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The 80-bit baseband header (spec.md §3, component C2), grounded on
//! `examples/original_source/dvb2s_bbheader.go`.

use dvbs2_core::checksum::Crc8;

/// `MATYPE-1` field constants (TS/GS type, SIS/MIS, CCM/ACM, ISSYI, NPD, roll-off), named after
/// the flags `examples/original_source/dvb2s_bbheader.go` defines as package-level constants.
pub struct Matype1;

impl Matype1 {
    pub const GENERIC_STREAM_PACKETIZED: u8 = 0x00;
    pub const GENERIC_STREAM_CONTINUOUS: u8 = 0x40;
    pub const TRANSPORT_STREAM: u8 = 0xC0;

    pub const MULTIPLE_INPUT_STREAM: u8 = 0x00;
    pub const SINGLE_INPUT_STREAM: u8 = 0x20;

    pub const ADAPTIVE_CODING_MODULATION: u8 = 0x00;
    pub const CONSTANT_CODING_MODULATION: u8 = 0x10;

    pub const ISSY_INDICATOR_NO: u8 = 0x00;
    pub const ISSY_INDICATOR_YES: u8 = 0x08;

    pub const NULL_PACKET_DELETION_NO: u8 = 0x00;
    pub const NULL_PACKET_DELETION_YES: u8 = 0x04;

    pub const ROLLOFF_035: u8 = 0x00;
    pub const ROLLOFF_025: u8 = 0x01;
    pub const ROLLOFF_020: u8 = 0x02;
}

/// The conforming BB-header byte values: Transport Stream, single input stream, constant coding
/// and modulation, no ISSY, no null-packet deletion, roll-off 0.35.
const CONFORMING_MATYPE1: u8 = Matype1::TRANSPORT_STREAM
    | Matype1::SINGLE_INPUT_STREAM
    | Matype1::CONSTANT_CODING_MODULATION
    | Matype1::ROLLOFF_035;

/// User-packet length in bits for an MPEG-2 Transport Stream payload (188 bytes).
const TS_USER_PACKET_LEN_BITS: u16 = 188 * 8;
/// User-packet sync byte for Transport Stream input (ISO/IEC 13818-1).
const TS_SYNC_BYTE: u8 = 0x47;

const HEADER_LEN_BITS: usize = 80;

/// An 80-bit baseband header with its CRC-8 trailer (spec.md §3).
#[derive(Clone, Debug)]
pub struct BbHeader {
    bits: [bool; HEADER_LEN_BITS],
}

impl BbHeader {
    /// Build the conforming BB-header for a frame whose `bbframe` carries `nbb` bits.
    ///
    /// `dfl` (the data-field length) is `nbb - 80`; `syncd` is the distance in bits from the end
    /// of this header to the first complete user packet, which callers that do not pack user
    /// packets into the data field leave at zero.
    pub fn new(nbb: usize, syncd: u16) -> Self {
        let dfl = (nbb - HEADER_LEN_BITS) as u16;

        let mut bytes = [0u8; 10];
        bytes[0] = CONFORMING_MATYPE1;
        bytes[1] = 0x00; // MATYPE-2: stream identifier, reserved 0.
        bytes[2] = (TS_USER_PACKET_LEN_BITS >> 8) as u8;
        bytes[3] = TS_USER_PACKET_LEN_BITS as u8;
        bytes[4] = (dfl >> 8) as u8;
        bytes[5] = dfl as u8;
        bytes[6] = TS_SYNC_BYTE;
        bytes[7] = (syncd >> 8) as u8;
        bytes[8] = syncd as u8;
        bytes[9] = 0x00; // CRC-8 placeholder, filled in below.

        let mut bits = [false; HEADER_LEN_BITS];
        for (byte_idx, &byte) in bytes.iter().enumerate() {
            for bit_idx in 0..8 {
                bits[byte_idx * 8 + bit_idx] = (byte & (0x80 >> bit_idx)) != 0;
            }
        }

        let mut crc = Crc8::new();
        for &bit in &bits[..HEADER_LEN_BITS - 8] {
            crc.update(bit);
        }
        let crc = crc.finish();

        // The CRC-8 register is written LSB-first into the bitstream (spec.md §3).
        let mut sr = crc;
        for bit in bits[HEADER_LEN_BITS - 8..].iter_mut() {
            *bit = sr & 0x01 != 0;
            sr >>= 1;
        }

        Self { bits }
    }

    /// The 80-bit header as an ordered bit sequence, MSB-first within each byte.
    pub fn bits(&self) -> &[bool; HEADER_LEN_BITS] {
        &self.bits
    }

    /// The CRC-8 byte actually written into the trailing 8 bits.
    pub fn crc(&self) -> u8 {
        let mut crc = 0u8;
        for (i, &bit) in self.bits[HEADER_LEN_BITS - 8..].iter().enumerate() {
            crc |= (bit as u8) << i;
        }
        crc
    }
}
