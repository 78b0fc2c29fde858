//! Pregenerates test vectors
//!
//! Reads the prover's factors from `./test-data/factors.json`, generating a
//! fresh pair if the file doesn't exist, then proves with a fixed commitment
//! for a few choices of additional data and writes the results to
//! `./test-data/factoring_vectors.json`. Tests, doctests and benchmarks load
//! both files.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{ensure, Context, Result};
use rug::Integer;
use sha2::Digest;

use factoring_zk::{wire, IntegerExt, ModulusContext, Randomness, VerifyResult};

type D = sha2::Sha256;

const FACTORS: &str = "./test-data/factors.json";
const VECTORS: &str = "./test-data/factoring_vectors.json";
const ID: &[u8] = b"unique_identifier";
const AD: [u8; 16] = [
    0xd7, 0xd3, 0x15, 0x56, 0x16, 0x77, 0x8f, 0xb4, 0x36, 0xa1, 0xeb, 0x20, 0x70, 0x89, 0x22, 0x05,
];
const COMMITMENT_SEED: &[u8] = b"factoring_zk.test_vector.r";

#[derive(serde::Serialize)]
struct Vector {
    name: &'static str,
    #[serde(with = "hex::serde")]
    p: Vec<u8>,
    #[serde(with = "hex::serde")]
    q: Vec<u8>,
    #[serde(with = "hex::serde")]
    n: Vec<u8>,
    #[serde(with = "hex::serde")]
    id: Vec<u8>,
    ad: Option<String>,
    #[serde(with = "hex::serde")]
    r: Vec<u8>,
    #[serde(with = "hex::serde")]
    e: Vec<u8>,
    #[serde(with = "hex::serde")]
    y: Vec<u8>,
}

fn main() -> Result<()> {
    let (p, q) = load_or_generate_factors(FACTORS.as_ref())?;
    let n = ModulusContext::from_octets(&p, &q)
        .context("factors are invalid")?
        .n_octets()
        .context("encode modulus")?;
    let r = commitment();

    let cases: [(&'static str, Option<&[u8]>); 3] = [
        ("with_ad", Some(&AD)),
        ("without_ad", None),
        ("empty_ad", Some(&[])),
    ];
    let mut vectors = Vec::with_capacity(cases.len());
    for (name, ad) in cases {
        let (e, y) = wire::prove_octets::<D>(Randomness::Fixed(&r), &p, &q, ID, ad)
            .with_context(|| format!("prove {name}"))?;
        ensure!(
            wire::verify_octets::<D>(&n, &e, &y, ID, ad) == VerifyResult::Ok,
            "{name} doesn't verify"
        );
        vectors.push(Vector {
            name,
            p: p.clone(),
            q: q.clone(),
            n: n.to_vec(),
            id: ID.to_vec(),
            ad: ad.map(hex::encode),
            r: r.to_vec(),
            e: e.to_vec(),
            y: y.to_vec(),
        });
    }

    let json = serde_json::to_vec_pretty(&vectors).context("serialize vectors")?;
    std::fs::write(VECTORS, json).context("save vectors")?;
    Ok(())
}

fn load_or_generate_factors(path: &Path) -> Result<(Vec<u8>, Vec<u8>)> {
    if !path.exists() {
        let mut rng = rand_core::OsRng;
        let p = generate_prime(&mut rng);
        let q = loop {
            let q = generate_prime(&mut rng);
            if q != p {
                break q;
            }
        };
        let factors = BTreeMap::from([
            ("p", p.to_string_radix(16)),
            ("q", q.to_string_radix(16)),
        ]);
        let json = serde_json::to_vec_pretty(&factors).context("serialize factors")?;
        std::fs::write(path, json).context("save factors")?;
    }

    let json = std::fs::read(path).context("read factors")?;
    let factors: BTreeMap<String, String> =
        serde_json::from_slice(&json).context("parse factors")?;
    let decode = |name: &str| -> Result<Vec<u8>> {
        let digits = factors
            .get(name)
            .with_context(|| format!("factor {name} is missing"))?;
        hex::decode(digits).with_context(|| format!("factor {name} is not hex"))
    };
    Ok((decode("p")?, decode("q")?))
}

/// Commitment randomness shared by all vectors: the first 256 bytes of
/// `sha256(le64(i) || seed)`, `i = 0, 1, ..`
fn commitment() -> [u8; 256] {
    let mut r = [0u8; 256];
    for (i, chunk) in r.chunks_mut(32).enumerate() {
        let block = D::new()
            .chain_update((i as u64).to_le_bytes())
            .chain_update(COMMITMENT_SEED)
            .finalize();
        chunk.copy_from_slice(&block);
    }
    r
}

/// Random prime of exactly 1024 bits
///
/// Fine for test vectors. Real keys should come from a vetted RSA key
/// generator.
fn generate_prime(rng: &mut impl rand_core::RngCore) -> Integer {
    loop {
        let mut bytes = [0u8; 128];
        rng.fill_bytes(&mut bytes);
        bytes[0] |= 0x80;
        let mut n = Integer::from_be_octets(&bytes);
        n.next_prime_mut();
        if n.significant_bits() == 1024 {
            break n;
        }
    }
}
