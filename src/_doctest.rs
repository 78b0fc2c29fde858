/// Prover's factors from `test-data/factors.json`, as a pair of
/// [`rug::Integer`]. Only meant for doctests; refer to `demos/pregenerate.rs`
/// to see how the file is produced
#[macro_export]
macro_rules! doctest_factors {
    () => {{
        const JSON: &str = include_str!("../test-data/factors.json");
        let factors: std::collections::BTreeMap<String, String> =
            serde_json::from_str(JSON).unwrap();
        let factor = |name: &str| $crate::rug::Integer::from_str_radix(&factors[name], 16).unwrap();
        (factor("p"), factor("q"))
    }};
}
