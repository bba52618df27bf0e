//! CP-ALS on a synthetic tensor with a known number of components
//!
//! Run with:
//! ```bash
//! RUST_LOG=tensorlib_decomp=debug cargo run -p tensorlib-decomp --example cp_als
//! ```

use scirs2_core::random::{rngs::StdRng, SeedableRng};
use tensorlib_core::DenseND;
use tensorlib_decomp::{cp, random_factors, DecompConfig, InitStrategy};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_filter(filter))
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    println!("{}", "=".repeat(80));
    println!("CP-ALS Decomposition Example");
    println!("{}", "=".repeat(80));

    // Three components mixed into a 20×15×10 tensor
    let shape = [20, 15, 10];
    let mut rng = StdRng::seed_from_u64(1999);
    let truth = random_factors::<f64, _>(&shape, 3, &mut rng);
    let tensor = DenseND::from_shape_fn(&shape, |idx| {
        (0..3)
            .map(|r| truth[0][[idx[0], r]] * truth[1][[idx[1], r]] * truth[2][[idx[2], r]])
            .sum::<f64>()
    });

    for init in [InitStrategy::Hosvd, InitStrategy::Random] {
        let config = DecompConfig::new(3)
            .with_tol(1e-8)
            .with_max_iter(1000)
            .with_init(init)
            .with_random_state(7);

        let result = cp(&tensor, &config)?;

        println!();
        println!("init = {}", init);
        println!("  - Sweeps: {} (converged: {})", result.iters, result.converged);
        println!("  - SSE: {:.3e}", result.sse);
        println!("  - Fit: {:.6}", result.fit(&tensor)?);
        println!("  - Weights: {:?}", result.weights.to_vec());
        for (axis, factor) in result.factors.iter().enumerate() {
            println!("    Axis {}: {:?}", axis, factor.shape());
        }
    }

    Ok(())
}
