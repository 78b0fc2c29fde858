//! ZK-proof of knowledge of the factorization of an RSA modulus
//!
//! ## Description
//!
//! A party P has a modulus `N = pq` and wants to prove that it knows `p` and
//! `q`, without disclosing them. The proof is the Girault / Poupard-Stern
//! proof of knowledge of `N - phi(N)`:
//!
//! - Public bases `Z_1, .., Z_K` are derived from `N` by hashing, so neither
//!   party chooses them.
//! - P picks `r` uniformly in `[0, A)`, `A = 2^2048`, and commits to
//!   `X_i = Z_i^r mod N`.
//! - The verifier challenges with `e` uniform in `[0, B)`, `B = 2^128`.
//! - P responds with `y = r + (N - phi(N)) e`, computed over the integers.
//! - The verifier accepts if `0 <= y < A` and `Z_i^(y - N e) = X_i mod N`.
//!   It rejects outright a prime `N` or a perfect power, whose `N - phi(N)`
//!   is public.
//!
//! Knowing `N - phi(N) = p + q - 1` together with `N` is equivalent to
//! knowing the factorization. Exponentiations on the prover side use CRT with
//! the secrets kept in [`ModulusContext`].
//!
//! In the [non-interactive](non_interactive) version the challenge is
//! `e = H(N, X_1, .., X_K, ID, AD)` truncated to [`CHALLENGE_BYTES`]. The
//! commitment is not transmitted: the verifier recomputes it from `(e, y)`
//! and checks that it hashes to `e`.
//!
//! ## Example
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use factoring_zk::factorization as p;
//! use factoring_zk::{ModulusContext, Randomness};
//! # let mut rng = rand_dev::DevRng::new();
//! # let (p, q) = factoring_zk::doctest_factors!();
//! type D = sha2::Sha256;
//!
//! // Interactive flow: commitment, challenge, response
//! let ctx = ModulusContext::from_primes(p, q)?;
//! let data = p::Data { n: ctx.n().clone() };
//!
//! let (commitment, pcommitment) =
//!     p::interactive::commit::<D>(&ctx, Randomness::Generator(&mut rng))?;
//! let challenge = p::interactive::challenge(&mut rng);
//! let response = p::interactive::prove(&ctx, &pcommitment, &challenge)?;
//! drop(pcommitment);
//! ctx.kill();
//!
//! p::interactive::verify::<D>(&data, &commitment, &challenge, &response)?;
//! # Ok(()) }
//! ```

use rand_core::{CryptoRngCore, RngCore};
use rug::integer::IsPrime;
use rug::Integer;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::common::rng::HashRng;
use crate::common::{IntegerExt, SecretInteger};
use crate::{ErrorReason, BASES, CHALLENGE_BYTES, COMMITMENT_BYTES, MODULUS_BYTES};

const BASES_TAG: &[u8] = b"factoring_zk.bases";
const CHALLENGE_TAG: &[u8] = b"factoring_zk.challenge";

/// Extra bytes drawn per base so that reducing modulo `N` is statistically
/// close to uniform
const BASES_SLACK_BYTES: usize = 16;

/// Miller-Rabin rounds used to reject prime moduli
const PRIMALITY_REPS: u32 = 30;

/// Public data that both parties know: the modulus
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Data {
    pub n: Integer,
}

/// Prover's first message, obtained by [`interactive::commit`]
///
/// `xs[i] = Z_i^r mod N`. Only sent in the interactive protocol
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Commitment {
    pub xs: [Integer; BASES],
}

/// Prover's secret randomness accompanying the commitment. Kept as state
/// between rounds in the interactive protocol, wiped on drop
#[derive(Debug)]
pub struct PrivateCommitment {
    r: SecretInteger,
}

/// Verifier's challenge to prover, in `[0, 2^128)`. Can be obtained
/// deterministically by [`non_interactive::challenge`] or randomly by
/// [`interactive::challenge`]
pub type Challenge = Integer;

/// Prover's answer to the challenge, `y = r + (N - phi(N)) e`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Response {
    pub y: Integer,
}

/// The non-interactive ZK proof. Computed by [`non_interactive::prove`]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Proof {
    pub e: Challenge,
    pub y: Integer,
}

impl Proof {
    /// Encodes the proof as `(e, y)` of [`CHALLENGE_BYTES`] and
    /// [`RESPONSE_BYTES`](crate::RESPONSE_BYTES) big-endian bytes
    ///
    /// Returns `None` if either component is out of range
    pub fn to_octets(&self) -> Option<([u8; CHALLENGE_BYTES], [u8; crate::RESPONSE_BYTES])> {
        Some((self.e.to_be_octets()?, self.y.to_be_octets()?))
    }

    /// Decodes the proof from `(e, y)` octets. Lengths must be exact
    pub fn from_octets(e: &[u8], y: &[u8]) -> Option<Self> {
        if e.len() != CHALLENGE_BYTES || y.len() != crate::RESPONSE_BYTES {
            return None;
        }
        Some(Self {
            e: Integer::from_be_octets(e),
            y: Integer::from_be_octets(y),
        })
    }
}

/// Source of the prover's commitment randomness `r`
///
/// Exactly one source is used per proof: a fresh draw from a CSPRNG in
/// production, or a fixed value for reproducible test vectors.
pub enum Randomness<'a> {
    /// Draw [`COMMITMENT_BYTES`] uniformly random bytes from the generator
    Generator(&'a mut dyn CryptoRngCore),
    /// Use these big-endian bytes as `r`. Must be exactly
    /// [`COMMITMENT_BYTES`] long
    Fixed(&'a [u8]),
}

impl Randomness<'_> {
    fn sample(self) -> Result<SecretInteger, ErrorReason> {
        match self {
            Randomness::Generator(rng) => {
                let mut bytes = zeroize::Zeroizing::new([0u8; COMMITMENT_BYTES]);
                rng.fill_bytes(&mut *bytes);
                Ok(SecretInteger::from_be_octets(&*bytes))
            }
            Randomness::Fixed(bytes) if bytes.len() == COMMITMENT_BYTES => {
                Ok(SecretInteger::from_be_octets(bytes))
            }
            Randomness::Fixed(bytes) => Err(ErrorReason::CommitmentLength(bytes.len())),
        }
    }
}

/// Derives the public bases `Z_1, .., Z_K` from the modulus
///
/// `Z_i` is the first `MODULUS_BYTES + 16` bytes of the stream
/// `H(le64(j) || tag || N || be32(i))`, `j = 0, 1, ..`, reduced modulo `N`.
///
/// Returns `None` if `N` is not positive or doesn't fit into
/// [`MODULUS_BYTES`]
pub fn bases<D: digest::Digest>(n: &Integer) -> Option<[Integer; BASES]> {
    if n.cmp0().is_le() {
        return None;
    }
    let n_octets = n.to_be_octets::<MODULUS_BYTES>()?;
    Some(core::array::from_fn(|i| {
        let index = (i as u32).to_be_bytes();
        let mut rng = HashRng::<_, D>::new(|d: D| {
            d.chain_update(BASES_TAG)
                .chain_update(n_octets)
                .chain_update(index)
                .finalize()
        });
        let mut bytes = [0u8; MODULUS_BYTES + BASES_SLACK_BYTES];
        rng.fill_bytes(&mut bytes);
        Integer::from_be_octets(&bytes).modulo(n)
    }))
}

/// Checks that `N` can be an RSA modulus: odd, composite, not a perfect power
/// and at most [`MODULUS_BYTES`] long
///
/// For a prime `N`, `N - phi(N) = 1` is public, and for `N = p^k` the value
/// `p^(k-1)` is recovered by taking a root, so anyone could answer.
fn modulus_is_sound(n: &Integer) -> bool {
    n.is_odd()
        && *n > 1
        && n.fits_in_bits(MODULUS_BYTES * 8)
        && n.is_probably_prime(PRIMALITY_REPS) == IsPrime::No
        && !n.is_perfect_power()
}

/// Checks that the hash is wide enough to produce a challenge
fn digest_is_wide_enough<D: digest::Digest>() -> bool {
    <D as digest::Digest>::output_size() >= CHALLENGE_BYTES
}

/// The interactive version of the ZK proof. Should be completed in 3 rounds:
/// prover commits to data, verifier responds with a random challenge, and
/// prover gives proof with commitment and challenge.
pub mod interactive {
    use rand_core::RngCore;
    use rug::{Complete, Integer};

    use crate::common::{IntegerExt, InvalidProofReason, SecretInteger};
    use crate::{Error, ErrorReason, InvalidProof, ModulusContext};
    use crate::{CHALLENGE_BYTES, RESPONSE_BYTES};

    use super::{Challenge, Commitment, Data, PrivateCommitment, Randomness, Response};

    /// Create commitment from the given randomness source
    pub fn commit<D: digest::Digest>(
        ctx: &ModulusContext,
        randomness: Randomness,
    ) -> Result<(Commitment, PrivateCommitment), Error> {
        let r = randomness.sample()?;
        let bases = super::bases::<D>(ctx.n()).ok_or(ErrorReason::Encoding)?;

        // We do an extra allocation as workaround while `array::try_map` is not stable
        let xs = bases
            .iter()
            .map(|z| ctx.pow_mod_n(z, &r))
            .collect::<Result<Vec<_>, Error>>()?
            .try_into()
            .map_err(|_| ErrorReason::Encoding)?;
        Ok((Commitment { xs }, PrivateCommitment { r }))
    }

    /// Generate random challenge in `[0, 2^128)`
    pub fn challenge<R: RngCore>(rng: &mut R) -> Challenge {
        let mut bytes = [0u8; CHALLENGE_BYTES];
        rng.fill_bytes(&mut bytes);
        Integer::from_be_octets(&bytes)
    }

    /// Compute proof for given data and prior protocol values
    pub fn prove(
        ctx: &ModulusContext,
        PrivateCommitment { r }: &PrivateCommitment,
        challenge: &Challenge,
    ) -> Result<Response, Error> {
        if !challenge.fits_in_bits(CHALLENGE_BYTES * 8) {
            return Err(ErrorReason::ChallengeRange.into());
        }
        let shift = SecretInteger::new((&*ctx.phi_complement() * challenge).complete());
        let y = (&**r + &*shift).complete();
        if !y.fits_in_bits(RESPONSE_BYTES * 8) {
            // r + (p + q - 1) e reached 2^2048, retrying is up to the caller
            return Err(ErrorReason::ResponseOverflow.into());
        }
        Ok(Response { y })
    }

    /// Recomputes the commitment an honest prover would have sent, from the
    /// challenge and the response alone: `X_i = Z_i^(y - N e) mod N`
    pub fn recover_commitment<D: digest::Digest>(
        Data { n }: &Data,
        challenge: &Challenge,
        Response { y }: &Response,
    ) -> Result<Commitment, InvalidProof> {
        if !super::modulus_is_sound(n) {
            return Err(InvalidProofReason::Modulus.into());
        }
        if !challenge.fits_in_bits(CHALLENGE_BYTES * 8) {
            return Err(InvalidProofReason::ChallengeRange.into());
        }
        if !y.fits_in_bits(RESPONSE_BYTES * 8) {
            return Err(InvalidProofReason::ResponseRange.into());
        }

        let exponent = y - (n * challenge).complete();
        let bases = super::bases::<D>(n).ok_or(InvalidProofReason::Modulus)?;
        let xs = bases
            .iter()
            .map(|z| {
                z.pow_mod_ref(&exponent, n)
                    .map(Integer::from)
                    .ok_or(InvalidProofReason::ModPow)
            })
            .collect::<Result<Vec<_>, _>>()?
            .try_into()
            .map_err(|_| InvalidProofReason::Encoding)?;
        Ok(Commitment { xs })
    }

    /// Verify the proof. If this succeeds, the prover knows the factorization
    /// of `N` except with probability about `2^-128`
    pub fn verify<D: digest::Digest>(
        data: &Data,
        commitment: &Commitment,
        challenge: &Challenge,
        response: &Response,
    ) -> Result<(), InvalidProof> {
        let recovered = match recover_commitment::<D>(data, challenge, response) {
            Ok(recovered) => recovered,
            Err(err) => {
                tracing::debug!(?err, "factoring proof rejected");
                return Err(err);
            }
        };
        for (i, (expected, actual)) in commitment.xs.iter().zip(&recovered.xs).enumerate() {
            if expected != actual {
                tracing::debug!(base = i, "factoring proof rejected: commitment mismatch");
                return Err(InvalidProofReason::EqualityCheck(i).into());
            }
        }
        Ok(())
    }
}

/// The non-interactive version of proof. Completed in one round, for example
/// see the documentation of the crate.
pub mod non_interactive {
    use rug::Integer;
    use subtle::ConstantTimeEq;

    use crate::common::{IntegerExt, InvalidProofReason};
    use crate::{Error, ErrorKind, ErrorReason, InvalidProof, ModulusContext, CHALLENGE_BYTES};

    use super::{Challenge, Commitment, Data, Proof, Randomness, Response};

    /// Compute proof for the given data, producing commitment from the given
    /// randomness and deriving deterministic challenge.
    ///
    /// Obtained from the above interactive proof via Fiat-Shamir heuristic.
    /// Empty `ad` is the same as no `ad` at all.
    pub fn prove<D: digest::Digest>(
        randomness: Randomness,
        ctx: &ModulusContext,
        id: &[u8],
        ad: Option<&[u8]>,
    ) -> Result<Proof, Error> {
        let result = prove_unchecked::<D>(randomness, ctx, id, ad);
        if let Err(err) = &result {
            if err.kind() == ErrorKind::Arithmetic {
                tracing::error!(%err, "arithmetic failure while proving");
            }
        }
        result
    }

    fn prove_unchecked<D: digest::Digest>(
        randomness: Randomness,
        ctx: &ModulusContext,
        id: &[u8],
        ad: Option<&[u8]>,
    ) -> Result<Proof, Error> {
        if !super::digest_is_wide_enough::<D>() {
            return Err(ErrorReason::DigestTooShort.into());
        }
        let data = Data { n: ctx.n().clone() };
        let (commitment, pcommitment) = super::interactive::commit::<D>(ctx, randomness)?;
        let e = challenge::<D>(&data, &commitment, id, ad).ok_or(ErrorReason::Encoding)?;
        let Response { y } = super::interactive::prove(ctx, &pcommitment, &e)?;
        Ok(Proof { e, y })
    }

    /// Verify the proof, deriving challenge independently from same data
    pub fn verify<D: digest::Digest>(
        data: &Data,
        proof: &Proof,
        id: &[u8],
        ad: Option<&[u8]>,
    ) -> Result<(), InvalidProof> {
        let result = check::<D>(data, proof, id, ad);
        if let Err(err) = &result {
            tracing::debug!(?err, "factoring proof rejected");
        }
        result
    }

    fn check<D: digest::Digest>(
        data: &Data,
        proof: &Proof,
        id: &[u8],
        ad: Option<&[u8]>,
    ) -> Result<(), InvalidProof> {
        if !super::digest_is_wide_enough::<D>() {
            return Err(InvalidProofReason::DigestTooShort.into());
        }
        let e = proof
            .e
            .to_be_octets::<CHALLENGE_BYTES>()
            .ok_or(InvalidProofReason::ChallengeRange)?;
        let response = Response { y: proof.y.clone() };
        let commitment = super::interactive::recover_commitment::<D>(data, &proof.e, &response)?;
        let expected = challenge::<D>(data, &commitment, id, ad)
            .and_then(|e| e.to_be_octets::<CHALLENGE_BYTES>())
            .ok_or(InvalidProofReason::Encoding)?;
        if bool::from(expected[..].ct_eq(&e[..])) {
            Ok(())
        } else {
            Err(InvalidProofReason::ChallengeMismatch.into())
        }
    }

    /// Deterministically compute challenge based on prior known values in protocol
    ///
    /// `e` is the first [`CHALLENGE_BYTES`] bytes of
    /// `H(tag || N || X_1 || .. || X_K || le64(|id|) || id [|| le64(|ad|) || ad])`,
    /// read as a big-endian integer. `N` and `X_i` are encoded on
    /// [`MODULUS_BYTES`](crate::MODULUS_BYTES) bytes, the `ad` block is only
    /// present when `ad` is non-empty.
    ///
    /// Returns `None` if `N` or the commitment don't fit into their encoding,
    /// or if `D` outputs fewer than [`CHALLENGE_BYTES`] bytes
    pub fn challenge<D: digest::Digest>(
        Data { n }: &Data,
        commitment: &Commitment,
        id: &[u8],
        ad: Option<&[u8]>,
    ) -> Option<Challenge> {
        let mut digest = D::new()
            .chain_update(super::CHALLENGE_TAG)
            .chain_update(n.to_be_octets::<{ crate::MODULUS_BYTES }>()?);
        for x in &commitment.xs {
            digest.update(x.to_be_octets::<{ crate::MODULUS_BYTES }>()?);
        }
        digest.update((id.len() as u64).to_le_bytes());
        digest.update(id);
        if let Some(ad) = ad.filter(|ad| !ad.is_empty()) {
            digest.update((ad.len() as u64).to_le_bytes());
            digest.update(ad);
        }
        let output = digest.finalize();
        output
            .get(..CHALLENGE_BYTES)
            .map(Integer::from_be_octets)
    }
}

#[cfg(test)]
mod test {
    use rand_core::RngCore;
    use rug::{Complete, Integer};

    use crate::common::test::generate_factors;
    use crate::common::InvalidProofReason;
    use crate::{ErrorKind, IntegerExt, ModulusContext, Randomness};

    type D = sha2::Sha256;

    fn context(rng: &mut impl RngCore) -> ModulusContext {
        let (p, q) = generate_factors(rng);
        ModulusContext::from_primes(p, q).unwrap()
    }

    #[test]
    fn passing() {
        let mut rng = rand_dev::DevRng::new();
        let ctx = context(&mut rng);
        let data = super::Data { n: ctx.n().clone() };
        let proof = super::non_interactive::prove::<D>(
            Randomness::Generator(&mut rng),
            &ctx,
            b"prover",
            Some(b"session 1"),
        )
        .unwrap();
        let r = super::non_interactive::verify::<D>(&data, &proof, b"prover", Some(b"session 1"));
        match r {
            Ok(()) => (),
            Err(e) => panic!("{e:?}"),
        }
    }

    #[test]
    fn passing_interactive() {
        let mut rng = rand_dev::DevRng::new();
        let ctx = context(&mut rng);
        let data = super::Data { n: ctx.n().clone() };
        let (commitment, pcommitment) =
            super::interactive::commit::<D>(&ctx, Randomness::Generator(&mut rng)).unwrap();
        let challenge = super::interactive::challenge(&mut rng);
        let response = super::interactive::prove(&ctx, &pcommitment, &challenge).unwrap();
        super::interactive::verify::<D>(&data, &commitment, &challenge, &response).unwrap();
    }

    #[test]
    fn failing_interactive_with_wrong_challenge() {
        let mut rng = rand_dev::DevRng::new();
        let ctx = context(&mut rng);
        let data = super::Data { n: ctx.n().clone() };
        let (commitment, pcommitment) =
            super::interactive::commit::<D>(&ctx, Randomness::Generator(&mut rng)).unwrap();
        let challenge = super::interactive::challenge(&mut rng);
        let response = super::interactive::prove(&ctx, &pcommitment, &challenge).unwrap();
        let other = challenge ^ Integer::from(1);
        let err = super::interactive::verify::<D>(&data, &commitment, &other, &response)
            .unwrap_err();
        assert_eq!(err.reason(), InvalidProofReason::EqualityCheck(0));
    }

    #[test]
    fn failing_without_factorization() {
        // A cheater who doesn't know phi(N) guesses N - phi(N) as 2 sqrt(N)
        let mut rng = rand_dev::DevRng::new();
        let ctx = context(&mut rng);
        let n = ctx.n().clone();
        let data = super::Data { n: n.clone() };
        let (commitment, pcommitment) =
            super::interactive::commit::<D>(&ctx, Randomness::Generator(&mut rng)).unwrap();
        let challenge = super::interactive::challenge(&mut rng);
        let guess = Integer::from(n.sqrt_ref()) * 2u8;
        let y = Integer::from(&*pcommitment.r + &(guess * &challenge));
        let response = super::Response { y };
        assert!(
            super::interactive::verify::<D>(&data, &commitment, &challenge, &response).is_err()
        );
    }

    #[test]
    fn fixed_randomness_is_deterministic() {
        let mut rng = rand_dev::DevRng::new();
        let ctx = context(&mut rng);
        let mut r = [0u8; crate::COMMITMENT_BYTES];
        rng.fill_bytes(&mut r);
        // keep y below 2^2048
        r[0] &= 0x7f;

        let first =
            super::non_interactive::prove::<D>(Randomness::Fixed(&r), &ctx, b"id", None).unwrap();
        let second =
            super::non_interactive::prove::<D>(Randomness::Fixed(&r), &ctx, b"id", None).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn fixed_randomness_of_wrong_length() {
        let mut rng = rand_dev::DevRng::new();
        let ctx = context(&mut rng);
        let r = [1u8; crate::COMMITMENT_BYTES - 1];
        let err = super::non_interactive::prove::<D>(Randomness::Fixed(&r), &ctx, b"id", None)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn response_overflow_is_rejected() {
        let mut rng = rand_dev::DevRng::new();
        let ctx = context(&mut rng);
        let r = [0xffu8; crate::COMMITMENT_BYTES];
        let (_, pcommitment) =
            super::interactive::commit::<D>(&ctx, Randomness::Fixed(&r)).unwrap();
        let err = super::interactive::prove(&ctx, &pcommitment, &Integer::from(1)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        let big_challenge = Integer::from(1) << 128u32;
        let err = super::interactive::prove(&ctx, &pcommitment, &big_challenge).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn absent_and_empty_ad_agree() {
        let mut rng = rand_dev::DevRng::new();
        let ctx = context(&mut rng);
        let data = super::Data { n: ctx.n().clone() };
        let proof = super::non_interactive::prove::<D>(
            Randomness::Generator(&mut rng),
            &ctx,
            b"id",
            None,
        )
        .unwrap();
        super::non_interactive::verify::<D>(&data, &proof, b"id", None).unwrap();
        super::non_interactive::verify::<D>(&data, &proof, b"id", Some(b"")).unwrap();
        let err =
            super::non_interactive::verify::<D>(&data, &proof, b"id", Some(b"\0")).unwrap_err();
        assert_eq!(err.reason(), InvalidProofReason::ChallengeMismatch);
    }

    #[test]
    fn rejects_out_of_range_values() {
        let mut rng = rand_dev::DevRng::new();
        let ctx = context(&mut rng);
        let data = super::Data { n: ctx.n().clone() };
        let proof = super::non_interactive::prove::<D>(
            Randomness::Generator(&mut rng),
            &ctx,
            b"id",
            None,
        )
        .unwrap();

        let mut bad = proof.clone();
        bad.y = Integer::from(1) << 2048u32;
        let err = super::non_interactive::verify::<D>(&data, &bad, b"id", None).unwrap_err();
        assert_eq!(err.reason(), InvalidProofReason::ResponseRange);

        let mut bad = proof.clone();
        bad.e = Integer::from(-1);
        let err = super::non_interactive::verify::<D>(&data, &bad, b"id", None).unwrap_err();
        assert_eq!(err.reason(), InvalidProofReason::ChallengeRange);

        let even = super::Data { n: ctx.n().clone() + 1u8 };
        let err = super::non_interactive::verify::<D>(&even, &proof, b"id", None).unwrap_err();
        assert_eq!(err.reason(), InvalidProofReason::Modulus);

        let wide = super::Data { n: (Integer::from(1) << 2048u32) + 1u8 };
        let err = super::non_interactive::verify::<D>(&wide, &proof, b"id", None).unwrap_err();
        assert_eq!(err.reason(), InvalidProofReason::Modulus);
    }

    #[test]
    fn bases_depend_only_on_modulus() {
        let mut rng = rand_dev::DevRng::new();
        let ctx = context(&mut rng);
        let n = ctx.n();
        let first = super::bases::<D>(n).unwrap();
        let second = super::bases::<D>(n).unwrap();
        assert_eq!(first, second);
        assert_ne!(first[0], first[1]);
        assert!(first.iter().all(|z| z < n));

        assert!(super::bases::<D>(&Integer::new()).is_none());
        assert!(super::bases::<D>(&Integer::from(-7)).is_none());
        assert!(super::bases::<D>(&(Integer::from(1) << 2048u32)).is_none());
    }

    /// Commits to `r` over `n` and answers as if `N - phi(N) = secret`,
    /// without any factorization
    fn forge(n: &Integer, secret: &Integer, id: &[u8]) -> super::Proof {
        let r = (Integer::from(1) << 2040u32) + 12345u32;
        let xs = super::bases::<D>(n)
            .unwrap()
            .map(|z| Integer::from(z.pow_mod_ref(&r, n).unwrap()));
        let data = super::Data { n: n.clone() };
        let commitment = super::Commitment { xs };
        let e = super::non_interactive::challenge::<D>(&data, &commitment, id, None).unwrap();
        let y = r + (secret * &e).complete();
        super::Proof { e, y }
    }

    #[test]
    fn failing_prime_modulus() {
        let n = Integer::from((Integer::from(1) << 2047u32).next_prime_ref());
        let proof = forge(&n, &Integer::from(1), b"mallory");
        let data = super::Data { n };
        let err = super::non_interactive::verify::<D>(&data, &proof, b"mallory", None).unwrap_err();
        assert_eq!(err.reason(), InvalidProofReason::Modulus);
    }

    #[test]
    fn failing_prime_power_modulus() {
        // N = p^2, N - phi(N) = p = sqrt(N)
        let p = Integer::from((Integer::from(1) << 1023u32).next_prime_ref());
        let n = p.clone().square();
        let proof = forge(&n, &p, b"mallory");
        let data = super::Data { n };
        let err = super::non_interactive::verify::<D>(&data, &proof, b"mallory", None).unwrap_err();
        assert_eq!(err.reason(), InvalidProofReason::Modulus);
    }

    #[test]
    fn modulus_soundness_checks() {
        let mut rng = rand_dev::DevRng::new();
        let ctx = context(&mut rng);
        assert!(super::modulus_is_sound(ctx.n()));
        assert!(!super::modulus_is_sound(&Integer::from(1_000_000_007)));
        assert!(!super::modulus_is_sound(&Integer::from(3u32.pow(13))));
        assert!(!super::modulus_is_sound(&Integer::from(1)));
        assert!(!super::modulus_is_sound(&(ctx.n().clone() * 2u8)));
    }

    #[test]
    fn octets_roundtrip() {
        let proof = super::Proof {
            e: Integer::from(0xabcd),
            y: Integer::from(1) << 2000u32,
        };
        let (e, y) = proof.to_octets().unwrap();
        assert_eq!(super::Proof::from_octets(&e, &y), Some(proof));
        assert_eq!(super::Proof::from_octets(&e[1..], &y), None);
    }
}
