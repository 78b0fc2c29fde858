use rug::integer::Order;
use rug::Integer;
use thiserror::Error;
use zeroize::Zeroize;

pub mod rng;
mod secret;

pub use secret::SecretInteger;
pub(crate) use secret::wipe_integer;

/// Fixed-width big-endian codec for [`Integer`]
///
/// Every value exchanged by the proof has a fixed length on the wire, so
/// independent implementations agree on the bytes being hashed.
pub trait IntegerExt: Sized {
    /// Encodes a non-negative integer as exactly `W` big-endian bytes, left
    /// padded with zeroes
    ///
    /// Returns `None` if the integer is negative or doesn't fit into `W` bytes
    fn to_be_octets<const W: usize>(&self) -> Option<[u8; W]>;

    /// Decodes big-endian bytes as a non-negative integer
    fn from_be_octets(bytes: &[u8]) -> Self;

    /// Checks that `0 <= self < 2^bits`
    fn fits_in_bits(&self, bits: usize) -> bool;
}

impl IntegerExt for Integer {
    fn to_be_octets<const W: usize>(&self) -> Option<[u8; W]> {
        if !self.fits_in_bits(W * 8) {
            return None;
        }
        let mut digits = self.to_digits::<u8>(Order::Msf);
        let mut out = [0u8; W];
        out[W - digits.len()..].copy_from_slice(&digits);
        digits.zeroize();
        Some(out)
    }

    fn from_be_octets(bytes: &[u8]) -> Self {
        Integer::from_digits(bytes, Order::Msf)
    }

    fn fits_in_bits(&self, bits: usize) -> bool {
        !self.cmp0().is_lt() && (self.significant_bits() as usize) <= bits
    }
}

/// Error indicating that proof is invalid
#[derive(Debug, Clone, Error)]
#[error("invalid proof")]
pub struct InvalidProof(#[source] InvalidProofReason);

impl InvalidProof {
    #[cfg(test)]
    pub(crate) fn reason(&self) -> InvalidProofReason {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub(crate) enum InvalidProofReason {
    #[error("modulus must be an odd composite of at most 2048 bits and not a perfect power")]
    Modulus,
    #[error("challenge is out of range")]
    ChallengeRange,
    #[error("response is out of range")]
    ResponseRange,
    #[error("powmod not defined")]
    ModPow,
    #[error("commitment check failed for base {0}")]
    EqualityCheck(usize),
    #[error("hash output is shorter than the challenge")]
    DigestTooShort,
    #[error("recomputed challenge doesn't match")]
    ChallengeMismatch,
    #[error("malformed encoding")]
    Encoding,
}

impl From<InvalidProofReason> for InvalidProof {
    fn from(reason: InvalidProofReason) -> Self {
        Self(reason)
    }
}
