//! ZK-proof of knowledge of the factorization of an RSA modulus.
//!
//! ## Description
//!
//! A party P has two primes `p`, `q` of 1024 bits each and publishes
//! `N = pq`. P wants to convince anyone who only sees `N` that it knows the
//! factorization, without disclosing `p` and `q`. The proof is bound to an
//! identity of the prover and, optionally, to additional data of the calling
//! protocol, so it cannot be replayed under another name or in another
//! context.
//!
//! The construction is the Girault / Poupard-Stern proof of knowledge of
//! `N - phi(N)`, made non-interactive with the Fiat-Shamir heuristic. See
//! [`factorization`] for the protocol and [`wire`] for the fixed-length byte
//! interface.
//!
//! ## Example
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use factoring_zk::{factorization as p, ModulusContext, Randomness};
//! let mut rng = rand_core::OsRng;
//! # let mut rng = rand_dev::DevRng::new();
//! # fn random_prime(rng: &mut impl rand_core::RngCore) -> rug::Integer {
//! #     let mut bytes = [0u8; 128];
//! #     rng.fill_bytes(&mut bytes);
//! #     bytes[0] |= 0x80;
//! #     let mut n = rug::Integer::from_digits(&bytes, rug::integer::Order::Msf);
//! #     n.next_prime_mut();
//! #     if n.significant_bits() > 1024 { random_prime(rng) } else { n }
//! # }
//! # let (p, q) = (random_prime(&mut rng), random_prime(&mut rng));
//!
//! // 0. Prover P holds two 1024-bit primes `p` and `q`
//! let ctx = ModulusContext::from_primes(p, q)?;
//! let data = p::Data { n: ctx.n().clone() };
//!
//! // 1. P computes a non-interactive proof, bound to its identity
//! let id = b"party-1";
//! let proof = p::non_interactive::prove::<sha2::Sha256>(
//!     Randomness::Generator(&mut rng),
//!     &ctx,
//!     id,
//!     None,
//! )?;
//! // Secret factors are wiped as soon as the context is gone
//! ctx.kill();
//!
//! // 2. P sends `data, proof` to the verifier V
//!
//! # fn send(_: &p::Data, _: &p::Proof) { }
//! send(&data, &proof);
//!
//! // 3. V receives and verifies the proof:
//!
//! # let recv = || (data, proof);
//! let (data, proof) = recv();
//! p::non_interactive::verify::<sha2::Sha256>(&data, &proof, id, None)?;
//! # Ok(()) }
//! ```
//! If the verification succeeded, V can trust that `N` was honestly built by
//! its owner.

#![deny(clippy::disallowed_methods)]

use thiserror::Error;

#[doc(hidden)]
pub mod _doctest;

mod arith;
mod common;
pub mod factorization;
pub mod gmp_zeroize;
pub mod modulus;
pub mod wire;

/// Underlying big number implementation. Use this to get
/// the correct version of the library
pub use rug;

pub use common::{IntegerExt, InvalidProof, SecretInteger};
pub use factorization::Randomness;
pub use modulus::ModulusContext;
pub use wire::VerifyResult;

/// Size of each prime factor, in bytes
pub const FACTOR_BYTES: usize = 128;
/// Size of the modulus `N = pq`, in bytes
pub const MODULUS_BYTES: usize = 2 * FACTOR_BYTES;
/// Size of the Fiat-Shamir challenge `e`, in bytes
pub const CHALLENGE_BYTES: usize = 16;
/// Size of the commitment randomness `r`, in bytes
pub const COMMITMENT_BYTES: usize = MODULUS_BYTES;
/// Size of the response `y`, in bytes
pub const RESPONSE_BYTES: usize = MODULUS_BYTES;
/// Number of bases `Z_i` the commitment is computed over
pub const BASES: usize = 2;

/// Error returned by the prover side: context construction and proving
#[derive(Debug, Clone, Error)]
#[error(transparent)]
pub struct Error(#[from] ErrorReason);

/// Broad category of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or conflicting inputs: wrong lengths, out of range values
    InvalidArgument,
    /// The factors can't form a modulus: zero, even, or not coprime
    InvalidModulus,
    /// An arithmetic precondition was violated. Unreachable for valid
    /// primes, indicates a bug
    Arithmetic,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        self.0.kind()
    }
}

#[derive(Debug, Clone, Error)]
enum ErrorReason {
    #[error("factor must be exactly 128 bytes, got {0}")]
    FactorLength(usize),
    #[error("factor must be exactly 1024 bits, got {0}")]
    FactorSize(u32),
    #[error("commitment randomness must be exactly 256 bytes, got {0}")]
    CommitmentLength(usize),
    #[error("hash output is shorter than the challenge")]
    DigestTooShort,
    #[error("challenge is out of range")]
    ChallengeRange,
    #[error("response doesn't fit into 256 bytes")]
    ResponseOverflow,
    #[error("factor must be odd and greater than one")]
    InvalidFactor,
    #[error("factors are not coprime")]
    NotCoprime,
    #[error("modulus must be odd and greater than one")]
    EvenModulus,
    #[error("exponent is negative")]
    NegativeExponent,
    #[error("couldn't encode a value")]
    Encoding,
}

impl ErrorReason {
    fn kind(&self) -> ErrorKind {
        match self {
            ErrorReason::FactorLength(_)
            | ErrorReason::FactorSize(_)
            | ErrorReason::CommitmentLength(_)
            | ErrorReason::DigestTooShort
            | ErrorReason::ChallengeRange
            | ErrorReason::ResponseOverflow => ErrorKind::InvalidArgument,
            ErrorReason::InvalidFactor | ErrorReason::NotCoprime => ErrorKind::InvalidModulus,
            ErrorReason::EvenModulus | ErrorReason::NegativeExponent | ErrorReason::Encoding => {
                ErrorKind::Arithmetic
            }
        }
    }
}
