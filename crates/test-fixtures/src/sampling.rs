//! Seeded data samplers driven by a `TrueDag`.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal, Uniform};

use crate::dag::TrueDag;

/// Linear-Gaussian structural equations: every variable is a weighted sum of its
/// parents plus standard normal noise. Edge weights are drawn from
/// `±[0.5, 1.5]`. Returns `rows` samples, one `Vec` per row.
pub fn linear_gaussian(dag: &TrueDag, rows: usize, seed: u64) -> Vec<Vec<f64>> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let n = dag.num_vertices();
    let magnitude = Uniform::new_inclusive(0.5, 1.5);
    let weights: Vec<Vec<(usize, f64)>> = (0..n)
        .map(|v| {
            dag.parents(v)
                .into_iter()
                .map(|p| {
                    let sign = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
                    (p, sign * magnitude.sample(&mut rng))
                })
                .collect()
        })
        .collect();

    let noise = Normal::new(0.0, 1.0).expect("unit normal is valid");
    let order = dag.topological_order();
    (0..rows)
        .map(|_| {
            let mut row = vec![0.0; n];
            for &v in &order {
                let signal: f64 = weights[v].iter().map(|&(p, w)| w * row[p]).sum();
                row[v] = signal + noise.sample(&mut rng);
            }
            row
        })
        .collect()
}

/// Categorical structural equations. A variable with parents copies the value of
/// one uniformly chosen parent (reduced modulo its own level count) with
/// probability `strength`, and is uniform otherwise. Roots are uniform.
pub fn discrete(
    dag: &TrueDag,
    levels: &[usize],
    rows: usize,
    strength: f64,
    seed: u64,
) -> Vec<Vec<usize>> {
    assert_eq!(levels.len(), dag.num_vertices(), "one level count per variable");
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let parents: Vec<Vec<usize>> = (0..dag.num_vertices()).map(|v| dag.parents(v)).collect();
    let order = dag.topological_order();
    (0..rows)
        .map(|_| {
            let mut row = vec![0usize; levels.len()];
            for &v in &order {
                row[v] = if !parents[v].is_empty() && rng.gen_bool(strength) {
                    let source = parents[v][rng.gen_range(0..parents[v].len())];
                    row[source] % levels[v]
                } else {
                    rng.gen_range(0..levels[v])
                };
            }
            row
        })
        .collect()
}
