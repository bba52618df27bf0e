//! Tucker-ALS compression of a noisy low-multilinear-rank tensor
//!
//! Run with:
//! ```bash
//! cargo run -p tensorlib-decomp --example tucker
//! ```

use scirs2_core::random::{rngs::StdRng, SeedableRng};
use tensorlib_core::{AxisMeta, DenseND, TensorHandle};
use tensorlib_decomp::{tucker, DecompConfig};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_filter(filter))
        .init();

    let shape = [24, 18, 12];
    let mut rng = StdRng::seed_from_u64(42);
    let noise = DenseND::<f64>::random_uniform_with(&shape, -0.01, 0.01, &mut rng);

    // smooth structure of multilinear rank (2, 2, 2) plus noise
    let signal = DenseND::from_shape_fn(&shape, |idx| {
        let (i, j, k) = (idx[0] as f64, idx[1] as f64, idx[2] as f64);
        (1.0 + 0.1 * i) * (2.0 - 0.05 * j) * (0.5 + 0.2 * k) + (0.3 * i).sin() * (0.2 * j).cos() * (0.1 * k).sin()
    });
    let tensor = &signal + &noise;

    let handle = TensorHandle::from_dense(
        tensor,
        vec![
            AxisMeta::new("x", shape[0]),
            AxisMeta::new("y", shape[1]),
            AxisMeta::new("time", shape[2]),
        ],
    )?
    .with_meta("description", "separable field with a small additive noise floor");

    let result = tucker(handle.as_dense(), &DecompConfig::new(2).with_tol(1e-8))?;

    println!("Tucker decomposition of {:?}", handle.shape());
    for (axis, meta) in handle.axes.iter().enumerate() {
        println!("  {:>5}: basis {:?}", meta.name, result.factors[axis].shape());
    }
    println!("  core: {:?}", result.core.shape());
    println!("  sweeps: {} (converged: {})", result.iters, result.converged);
    println!("  relative error: {:.3e}", (result.sse / handle.as_dense().squared_norm()).sqrt());
    println!("  compression ratio: {:.1}x", result.compression_ratio());

    Ok(())
}
