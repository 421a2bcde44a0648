//! Equal-population binning of a 2-d Gaussian sample
//!
//! Builds a 16-bin partition from one Gaussian sample, then fills a
//! second, wider sample through it and prints per-bin statistics.
//!
//! Run with: cargo run --example gaussian_binning

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use turtle::Turtle;
use turtle_core::SliceSource;

fn sample(n: usize, sigma: f64, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let normal = Normal::new(0.0, sigma).unwrap();
    (0..2 * n).map(|_| normal.sample(&mut rng)).collect()
}

fn main() -> turtle::Result<()> {
    let numberofbins = 16;
    let reference = sample(4000, 1.0, 11);

    let source = SliceSource::new(&reference, 2)?;
    let mut turtle = Turtle::from_source(source, numberofbins)?;
    println!(
        "built {} bins of {} reference points each",
        turtle.num_bins(),
        turtle.entries_per_bin()
    );

    // Fill with a wider distribution; tail points clamp into the
    // outermost bins.
    let batch = sample(20_000, 1.5, 12);
    turtle.fill_source(SliceSource::new(&batch, 2)?)?;

    println!("\n bin   count     volume    density   center");
    for bin in turtle.sort_by_density(false) {
        let center = turtle.center(bin).expect("bin id from ranking");
        println!(
            "{bin:>4}  {:>7.0}  {:>9.4}  {:>9.1}  ({:+.2}, {:+.2})",
            turtle.counts()[bin],
            turtle.volume(bin).expect("bin id from ranking"),
            turtle.density(bin).expect("bin id from ranking"),
            center[0],
            center[1],
        );
    }

    println!(
        "\ndensest bin: {}, sparsest bin: {}",
        turtle.max_density_bin(),
        turtle.min_density_bin()
    );
    Ok(())
}
