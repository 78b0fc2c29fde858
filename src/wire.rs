//! Fixed-length byte interface
//!
//! Every value crosses this boundary as a big-endian byte string of a fixed
//! size: factors of [`FACTOR_BYTES`](crate::FACTOR_BYTES), the modulus of
//! [`MODULUS_BYTES`], the challenge of [`CHALLENGE_BYTES`] and the response
//! of [`RESPONSE_BYTES`].
//! Independent implementations that agree on these encodings and on the
//! hash interoperate bit for bit.
//!
//! ```rust
//! # fn main() -> Result<(), factoring_zk::Error> {
//! use factoring_zk::{wire, Randomness, VerifyResult};
//! # let mut rng = rand_dev::DevRng::new();
//! # use factoring_zk::IntegerExt;
//! # let (p, q) = factoring_zk::doctest_factors!();
//! # let (p, q) = (p.to_be_octets::<128>().unwrap(), q.to_be_octets::<128>().unwrap());
//! # let n = factoring_zk::ModulusContext::from_octets(&p, &q)?.n_octets()?;
//! type D = sha2::Sha256;
//!
//! let (e, y) = wire::prove_octets::<D>(Randomness::Generator(&mut rng), &p, &q, b"alice", None)?;
//! let result = wire::verify_octets::<D>(&n, &e, &y, b"alice", None);
//! assert_eq!(result, VerifyResult::Ok);
//! assert_eq!(result.code(), 0);
//! # Ok(()) }
//! ```

use rug::Integer;

use crate::factorization::{non_interactive, Data, Proof};
use crate::{Error, IntegerExt, InvalidProof, ModulusContext, Randomness};
use crate::{CHALLENGE_BYTES, MODULUS_BYTES, RESPONSE_BYTES};

/// Outcome of a verification
///
/// A rejected proof is a normal outcome, not an error: malformed inputs and
/// false transcripts alike map to [`VerifyResult::Fail`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum VerifyResult {
    Ok = 0,
    Fail = 91,
}

impl VerifyResult {
    /// Numeric status code, `0` on success
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn is_ok(self) -> bool {
        self == VerifyResult::Ok
    }
}

impl From<Result<(), InvalidProof>> for VerifyResult {
    fn from(result: Result<(), InvalidProof>) -> Self {
        match result {
            Ok(()) => VerifyResult::Ok,
            Err(_) => VerifyResult::Fail,
        }
    }
}

/// Proves knowledge of the factorization of `N = pq`, given the factors as
/// [`FACTOR_BYTES`](crate::FACTOR_BYTES) big-endian bytes each
///
/// Returns `(e, y)`. The modulus context built from `p` and `q` is wiped
/// before returning, on success and on error alike.
pub fn prove_octets<D: digest::Digest>(
    randomness: Randomness,
    p: &[u8],
    q: &[u8],
    id: &[u8],
    ad: Option<&[u8]>,
) -> Result<([u8; CHALLENGE_BYTES], [u8; RESPONSE_BYTES]), Error> {
    let ctx = ModulusContext::from_octets(p, q)?;
    let proof = non_interactive::prove::<D>(randomness, &ctx, id, ad);
    ctx.kill();
    let proof = proof?;
    proof
        .to_octets()
        .ok_or_else(|| crate::ErrorReason::Encoding.into())
}

/// Verifies a proof `(e, y)` for the modulus `n`
///
/// `n` must be [`MODULUS_BYTES`] long, `e` [`CHALLENGE_BYTES`] and `y`
/// [`RESPONSE_BYTES`]. Any other length fails the verification.
pub fn verify_octets<D: digest::Digest>(
    n: &[u8],
    e: &[u8],
    y: &[u8],
    id: &[u8],
    ad: Option<&[u8]>,
) -> VerifyResult {
    if n.len() != MODULUS_BYTES {
        tracing::debug!(len = n.len(), "modulus has wrong length");
        return VerifyResult::Fail;
    }
    let Some(proof) = Proof::from_octets(e, y) else {
        tracing::debug!(e = e.len(), y = y.len(), "proof has wrong length");
        return VerifyResult::Fail;
    };
    let data = Data {
        n: Integer::from_be_octets(n),
    };
    non_interactive::verify::<D>(&data, &proof, id, ad).into()
}
