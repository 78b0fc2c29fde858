//! GMP memory hooks are process-wide, so they get their own test binary

use factoring_zk::{gmp_zeroize, wire, IntegerExt, Randomness, VerifyResult};
use rug::Integer;

type D = sha2::Sha256;

#[test]
fn proofs_work_with_zeroizing_allocator() {
    assert!(gmp_zeroize::enable_zeroize());
    // idempotent
    assert!(gmp_zeroize::enable_zeroize());

    let mut rng = rand_dev::DevRng::new();
    let p = Integer::from(1) << 1023u32;
    let p = Integer::from(p.next_prime_ref());
    let q = (Integer::from(1) << 1023u32) + (Integer::from(1) << 512u32);
    let q = Integer::from(q.next_prime_ref());
    let p = p.to_be_octets::<128>().unwrap();
    let q = q.to_be_octets::<128>().unwrap();
    let n = factoring_zk::ModulusContext::from_octets(&p, &q)
        .unwrap()
        .n_octets()
        .unwrap();

    for _ in 0..3 {
        let (e, y) =
            wire::prove_octets::<D>(Randomness::Generator(&mut rng), &p, &q, b"id", None).unwrap();
        assert_eq!(
            wire::verify_octets::<D>(&n, &e, &y, b"id", None),
            VerifyResult::Ok
        );
    }
}
