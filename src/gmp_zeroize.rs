//! Wiping of GMP's internal buffers
//!
//! [`SecretInteger`](crate::SecretInteger) and
//! [`ModulusContext`](crate::ModulusContext) clear the limbs they own, but GMP
//! reallocates and frees scratch buffers of its own while exponentiating, and
//! those hold intermediate values derived from the factors. GMP lets the
//! application replace its memory functions, so we wrap the default ones
//! with versions that overwrite every buffer before it's released.
//!
//! Hooks are process-wide. Call [`enable_zeroize`] once on startup, before
//! any big integer is allocated.

use std::ffi::c_void;
use std::ptr::addr_of_mut;
use std::sync::{Once, OnceLock};

use gmp_mpfr_sys::gmp;
use zeroize::Zeroize;

type AllocFn = unsafe extern "C" fn(usize) -> *mut c_void;
type FreeFn = unsafe extern "C" fn(*mut c_void, usize);

/// GMP's memory functions as they were before we installed the hooks
struct Defaults {
    alloc: AllocFn,
    free: FreeFn,
}

static DEFAULTS: OnceLock<Option<Defaults>> = OnceLock::new();
static HOOKS: Once = Once::new();

/// Makes GMP zero every buffer it reallocates or frees
///
/// Idempotent. Returns `false` if GMP didn't report its current memory
/// functions, in which case nothing is installed.
pub fn enable_zeroize() -> bool {
    if DEFAULTS.get_or_init(read_defaults).is_none() {
        return false;
    }
    // Defaults are published before the hooks that read them
    HOOKS.call_once(|| {
        // SAFETY: documented at https://gmplib.org/manual/Custom-Allocation.
        // Allocation is left to GMP, so every block the hooks see was
        // allocated by the default function.
        unsafe {
            gmp::set_memory_functions(None, Some(realloc_and_zeroize), Some(free_and_zeroize))
        };
        tracing::debug!("gmp buffers are wiped on release");
    });
    true
}

fn read_defaults() -> Option<Defaults> {
    let mut alloc: gmp::allocate_function = None;
    let mut realloc: gmp::reallocate_function = None;
    let mut free: gmp::free_function = None;
    // SAFETY: the out pointers are valid for writes
    unsafe {
        gmp::get_memory_functions(
            addr_of_mut!(alloc),
            addr_of_mut!(realloc),
            addr_of_mut!(free),
        )
    };

    match (alloc, realloc, free) {
        (Some(alloc), Some(_), Some(free)) => Some(Defaults { alloc, free }),
        _ => {
            tracing::error!("gmp didn't report its memory functions, buffers won't be wiped");
            None
        }
    }
}

fn defaults() -> &'static Defaults {
    match DEFAULTS.get() {
        Some(Some(defaults)) => defaults,
        // hooks are only installed together with the defaults
        _ => std::process::abort(),
    }
}

extern "C" fn realloc_and_zeroize(
    old_ptr: *mut c_void,
    old_size: usize,
    new_size: usize,
) -> *mut c_void {
    // Native realloc may release the old block before we get a chance to wipe
    // it, so move the data by hand
    let defaults = defaults();
    // SAFETY: GMP guarantees `old_ptr` is a live block of `old_size` bytes.
    // The default allocator aborts rather than return null.
    unsafe {
        let new_ptr = (defaults.alloc)(new_size);
        let len = old_size.min(new_size);
        core::ptr::copy_nonoverlapping(old_ptr as *const u8, new_ptr as *mut u8, len);
        free_and_zeroize(old_ptr, old_size);
        new_ptr
    }
}

extern "C" fn free_and_zeroize(ptr: *mut c_void, size: usize) {
    let defaults = defaults();
    // SAFETY: GMP guarantees `ptr` is a live block of `size` bytes, owned by
    // GMP and not referenced after this call
    unsafe {
        core::slice::from_raw_parts_mut(ptr as *mut u8, size).zeroize();
        (defaults.free)(ptr, size);
    }
}
