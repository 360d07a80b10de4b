// dvbs2-core
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `errors` module defines the common error type for the modulator core.

use std::error::Error as StdError;
use std::fmt;
use std::result;

/// `Error` enumerates every way the core can refuse to do something. The core performs no I/O
/// and has no retry policy: both variants are terminal to the operation that produced them.
#[derive(Debug)]
pub enum Error {
    /// A pipeline was asked to construct itself from an unsupported or incompatible
    /// configuration (unknown FECFRAME type, unsupported oversampling, unsupported MODCOD/rate
    /// pairing). Fatal to construction; there is no partially-built `Pipeline`.
    ConfigurationRejected(&'static str),
    /// Internal state that should be structurally impossible was observed (e.g. a constellation
    /// mapper fed a two-bit value outside `{0, 1, 2, 3}`). Names the stage that detected it.
    InvariantViolation(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Error::ConfigurationRejected(msg) => write!(f, "configuration rejected: {}", msg),
            Error::InvariantViolation(msg) => write!(f, "invariant violation: {}", msg),
        }
    }
}

impl StdError for Error {}

pub type Result<T> = result::Result<T, Error>;

/// Convenience function to create a configuration-rejected error.
pub fn config_rejected<T>(desc: &'static str) -> Result<T> {
    Err(Error::ConfigurationRejected(desc))
}

/// Convenience function to create an invariant-violation error.
pub fn invariant_violation<T>(stage: &'static str) -> Result<T> {
    Err(Error::InvariantViolation(stage))
}
