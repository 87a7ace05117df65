//! Print which backends this binary carries and how each one reduces the
//! same random walk.
//!
//! Usage:
//!   cargo run -p geom-simd --example kernel_report -- [n] [tolerance]

use geom_simd::rand::{random_walk, ReplayToken, VertexCount, WalkCfg};
use geom_simd::{compiled_kernels, get_capabilities, select_kernel, simplify, Algorithm};

fn main() {
    let mut args = std::env::args().skip(1);
    let n: usize = args.next().and_then(|s| s.parse().ok()).unwrap_or(10_000);
    let tolerance: f64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(0.5);

    println!("compiled: {:?}", compiled_kernels());
    println!("cpu:      {:?}", get_capabilities());

    let cfg = WalkCfg {
        points: VertexCount::Fixed(n),
        ..WalkCfg::default()
    };
    let line = random_walk(cfg, ReplayToken::new(2025, 0));
    for algorithm in Algorithm::ALL {
        match select_kernel(algorithm) {
            Ok(kernel) => match simplify(&line, tolerance, algorithm) {
                Ok(out) => println!(
                    "{algorithm:>7} -> {kernel:<7} lanes={} kept {}/{}",
                    kernel.lanes(),
                    out.len(),
                    line.len()
                ),
                Err(e) => println!("{algorithm:>7} -> error: {e}"),
            },
            Err(e) => println!("{algorithm:>7} -> {e}"),
        }
    }
}
