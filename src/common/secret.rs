//! Integers carrying secret material
//!
//! `rug` doesn't clear limbs when an [`Integer`] is dropped or reassigned, so
//! secret values are kept in [`SecretInteger`], which overwrites its limbs
//! before releasing them. Temporaries allocated inside GMP itself are covered
//! by [`crate::gmp_zeroize`].

use core::fmt;
use core::ops::Deref;

use rug::Integer;
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::IntegerExt;

/// Integer whose limbs are overwritten with zeroes when dropped
pub struct SecretInteger(Integer);

impl SecretInteger {
    pub fn new(value: Integer) -> Self {
        Self(value)
    }

    /// Decodes big-endian bytes. The caller remains responsible for the
    /// input buffer
    pub fn from_be_octets(bytes: &[u8]) -> Self {
        Self(Integer::from_be_octets(bytes))
    }
}

impl Deref for SecretInteger {
    type Target = Integer;

    fn deref(&self) -> &Integer {
        &self.0
    }
}

impl Zeroize for SecretInteger {
    fn zeroize(&mut self) {
        wipe_integer(&mut self.0)
    }
}

impl Drop for SecretInteger {
    fn drop(&mut self) {
        self.zeroize()
    }
}

impl ZeroizeOnDrop for SecretInteger {}

impl fmt::Debug for SecretInteger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretInteger(..)")
    }
}

/// Overwrites every allocated limb of `x` and sets it to zero
pub(crate) fn wipe_integer(x: &mut Integer) {
    // SAFETY: `d` points to `alloc` limbs owned by `x`, nothing else aliases
    // them while we hold `&mut x`. Size zero with zeroed limbs is a valid
    // representation of 0.
    unsafe {
        let raw = x.as_raw_mut();
        let alloc = usize::try_from((*raw).alloc).unwrap_or(0);
        let limbs = core::slice::from_raw_parts_mut((*raw).d.as_ptr(), alloc);
        limbs.zeroize();
        (*raw).size = 0;
    }
}

#[cfg(test)]
mod test {
    use rug::Integer;
    use zeroize::Zeroize;

    use super::{wipe_integer, SecretInteger};

    #[test]
    fn wipe_leaves_zero() {
        let mut x = Integer::from(1) << 1000u32;
        x -= 12345;
        wipe_integer(&mut x);
        assert_eq!(x, 0);
        // still usable afterwards
        x += 7;
        assert_eq!(x, 7);
    }

    #[test]
    fn zeroize_secret() {
        let mut s = SecretInteger::new(Integer::from(0xdead_beef_u32));
        assert_eq!(*s, 0xdead_beef_u32);
        s.zeroize();
        assert_eq!(*s, 0);
        assert_eq!(format!("{s:?}"), "SecretInteger(..)");
    }

    #[test]
    fn wipe_unallocated() {
        let mut x = Integer::new();
        wipe_integer(&mut x);
        assert_eq!(x, 0);
    }
}
