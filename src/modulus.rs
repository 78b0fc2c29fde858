//! Secret-bearing modulus context
//!
//! [`ModulusContext`] is the only place where the factors of `N` live. It is
//! built right before proving and destroyed right after: dropping it (or
//! calling [`ModulusContext::kill`]) overwrites `p`, `q`, `q^(-1) mod p`, and
//! `N` with zeroes.

use core::fmt;

use rug::{Complete, Integer};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::arith;
use crate::common::{wipe_integer, IntegerExt, SecretInteger};
use crate::{Error, ErrorReason, FACTOR_BYTES, MODULUS_BYTES};

/// Factorization of `N = pq` with the CRT coefficient `invpq = q^(-1) mod p`
pub struct ModulusContext {
    p: SecretInteger,
    q: SecretInteger,
    invpq: SecretInteger,
    n: Integer,
}

impl ModulusContext {
    /// Builds the context from two prime factors of exactly
    /// [`FACTOR_BYTES`] bytes each, top bit set
    ///
    /// Fails if either factor is even or not greater than one, if either is
    /// not exactly `8 * FACTOR_BYTES` bits long, or if `p` and `q` are not
    /// coprime (in particular, if `p = q`). Primality itself is not checked:
    /// a proof made with composite factors simply won't verify.
    pub fn from_primes(p: Integer, q: Integer) -> Result<Self, Error> {
        let p = SecretInteger::new(p);
        let q = SecretInteger::new(q);

        if p.is_even() || *p <= 1 || q.is_even() || *q <= 1 {
            tracing::debug!("factor is even or not greater than one");
            return Err(ErrorReason::InvalidFactor.into());
        }
        let bits = (FACTOR_BYTES * 8) as u32;
        for factor in [&p, &q] {
            if factor.significant_bits() != bits {
                tracing::debug!(bits = factor.significant_bits(), "factor has wrong size");
                return Err(ErrorReason::FactorSize(factor.significant_bits()).into());
            }
        }

        let invpq = arith::ct_invert_prime(&q, &p)?.ok_or_else(|| {
            tracing::debug!("factors are not coprime");
            ErrorReason::NotCoprime
        })?;
        let n = (&*p * &*q).complete();

        Ok(Self { p, q, invpq, n })
    }

    /// Builds the context from big-endian factors of exactly
    /// [`FACTOR_BYTES`] bytes each
    pub fn from_octets(p: &[u8], q: &[u8]) -> Result<Self, Error> {
        for factor in [p, q] {
            if factor.len() != FACTOR_BYTES {
                return Err(ErrorReason::FactorLength(factor.len()).into());
            }
        }
        Self::from_primes(Integer::from_be_octets(p), Integer::from_be_octets(q))
    }

    /// Public modulus `N = pq`
    pub fn n(&self) -> &Integer {
        &self.n
    }

    /// Public modulus as [`MODULUS_BYTES`] big-endian bytes
    pub fn n_octets(&self) -> Result<[u8; MODULUS_BYTES], Error> {
        self.n
            .to_be_octets()
            .ok_or_else(|| ErrorReason::Encoding.into())
    }

    /// `N - phi(N) = p + q - 1`
    pub(crate) fn phi_complement(&self) -> SecretInteger {
        SecretInteger::new((&*self.p + &*self.q).complete() - 1u8)
    }

    /// Computes `base^exp mod N` via CRT, exponentiating modulo `p` and `q`
    /// separately in constant time
    ///
    /// `exp` must be non-negative
    pub fn pow_mod_n(&self, base: &Integer, exp: &Integer) -> Result<Integer, Error> {
        if exp.cmp0().is_lt() {
            return Err(ErrorReason::NegativeExponent.into());
        }
        let exp_p = arith::reduce_exponent(exp, &self.p);
        let exp_q = arith::reduce_exponent(exp, &self.q);
        let x_p = SecretInteger::new(arith::ct_pow_mod(base, &exp_p, &self.p)?);
        let x_q = SecretInteger::new(arith::ct_pow_mod(base, &exp_q, &self.q)?);
        Ok(arith::crt_combine(&x_p, &x_q, &self.p, &self.q, &self.invpq))
    }

    /// Destroys the context, wiping all the secrets it holds
    ///
    /// Equivalent to dropping it, spelled out for call sites that want the
    /// end of the secret's lifetime to be visible.
    pub fn kill(self) {}
}

impl Zeroize for ModulusContext {
    fn zeroize(&mut self) {
        self.p.zeroize();
        self.q.zeroize();
        self.invpq.zeroize();
        wipe_integer(&mut self.n);
    }
}

impl Drop for ModulusContext {
    fn drop(&mut self) {
        self.zeroize()
    }
}

impl ZeroizeOnDrop for ModulusContext {}

impl fmt::Debug for ModulusContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModulusContext")
            .field("n", &self.n)
            .finish_non_exhaustive()
    }
}
