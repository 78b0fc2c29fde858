//! Modular arithmetic on the fixed widths used by the proof
//!
//! Secret operands (prime factors and exponents reduced modulo `p - 1`) only
//! go through [`ct_pow_mod`] and [`ct_invert_prime`], which are backed by
//! GMP's `mpz_powm_sec`: its running time and memory access pattern depend
//! only on the sizes of the operands. Public values use the regular
//! variable-time routines of `rug`.
//!
//! The rest is not constant time. [`reduce_exponent`] reduces the secret
//! exponent modulo `p - 1`, the CRT splits reduce bases modulo `p` and `q`,
//! and [`crt_combine`] multiplies and reduces by secret values, all with
//! GMP's regular division and multiplication. Their operands have fixed
//! sizes (2048-bit dividends, 1024-bit divisors), so the timing mostly
//! depends on limb counts, but GMP makes no promise about it.

use rug::{Complete, Integer};

use crate::common::SecretInteger;
use crate::ErrorReason;

/// Computes `base^exp mod m` in time independent of `base` and `exp`
///
/// `m` must be odd and greater than one, `exp` must be non-negative. Zero
/// exponent gives one.
pub fn ct_pow_mod(base: &Integer, exp: &Integer, m: &Integer) -> Result<Integer, ErrorReason> {
    if m.is_even() || *m <= 1 {
        return Err(ErrorReason::EvenModulus);
    }
    match exp.cmp0() {
        core::cmp::Ordering::Less => Err(ErrorReason::NegativeExponent),
        core::cmp::Ordering::Equal => Ok(Integer::from(1)),
        core::cmp::Ordering::Greater => Ok(base.clone().modulo(m).secure_pow_mod(exp, m)),
    }
}

/// Reduces a non-negative exponent modulo `p - 1` into `[1, p - 1]`
///
/// `a^e = a^(reduced e) mod p` for every `a` when `e > 0`, including `a = 0`,
/// which `e mod (p - 1)` would get wrong whenever it is zero. Zero stays zero.
pub fn reduce_exponent(exp: &Integer, p: &Integer) -> SecretInteger {
    if exp.cmp0().is_le() {
        return SecretInteger::new(Integer::new());
    }
    let p_minus_one = SecretInteger::new((p - 1u8).complete());
    let e = SecretInteger::new((exp - 1u8).complete());
    SecretInteger::new(e.clone().modulo(&p_minus_one) + 1u8)
}

/// Computes `a^(-1) mod p` for a prime `p` in constant time, as `a^(p-2)`
///
/// Falls back to the variable-time extended gcd if `p` turns out not to be a
/// prime, which can only happen on invalid input. Returns `None` if `a` is not
/// invertible modulo `p`.
pub fn ct_invert_prime(a: &Integer, p: &Integer) -> Result<Option<SecretInteger>, ErrorReason> {
    let exp = SecretInteger::new((p - 2u8).complete());
    let candidate = SecretInteger::new(ct_pow_mod(a, &exp, p)?);
    let check = SecretInteger::new((a * &*candidate).complete().modulo(p));
    if *check == 1 {
        return Ok(Some(candidate));
    }
    Ok(a.invert_ref(p).map(|inv| SecretInteger::new(inv.into())))
}

/// Recombines `x_p = x mod p` and `x_q = x mod q` into `x mod pq`
///
/// `invpq` must be `q^(-1) mod p`
pub fn crt_combine(
    x_p: &Integer,
    x_q: &Integer,
    p: &Integer,
    q: &Integer,
    invpq: &Integer,
) -> Integer {
    let h = SecretInteger::new(((x_p - x_q).complete() * invpq).modulo(p));
    x_q + (q * &*h).complete()
}
