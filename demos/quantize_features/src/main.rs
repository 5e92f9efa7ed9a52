use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use featquant_core::{ClipRange, Quantizer, QuantizerConfig, TargetType};
use log::info;
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Fit a feature quantizer on synthetic normal features and report the
/// learned scale and reconstruction error.
///
/// Scenario: features already standardized upstream, with a few injected
/// outliers to show the quantile bound ignoring them.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
struct Args {
    /// Target type (int8, int16, int32, float16, float32 or dtype aliases like i2)
    #[arg(long, default_value = "int16")]
    target: TargetType,

    /// Explicit symmetric bound; disables quantile estimation
    #[arg(long)]
    max_value: Option<f64>,

    /// Tail fraction dropped on each side when estimating the bound
    #[arg(long, default_value_t = QuantizerConfig::DEFAULT_MAX_QUANTILE)]
    max_quantile: f64,

    /// Pre-scale clip band
    #[arg(long, value_enum, default_value_t = ClipArg::Bound)]
    clip: ClipArg,

    /// JSON quantizer config; overrides the flags above
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    /// Number of samples (rows)
    #[arg(long, default_value_t = 1_000)]
    rows: usize,

    /// Number of features (columns)
    #[arg(long, default_value_t = 8)]
    cols: usize,

    /// Number of injected outliers
    #[arg(long, default_value_t = 3)]
    outliers: usize,

    /// Magnitude of injected outliers
    #[arg(long, default_value_t = 1e3)]
    outlier: f64,

    /// RNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum ClipArg {
    Bound,
    TargetRange,
}

impl From<ClipArg> for ClipRange {
    fn from(arg: ClipArg) -> Self {
        match arg {
            ClipArg::Bound => ClipRange::Bound,
            ClipArg::TargetRange => ClipRange::TargetRange,
        }
    }
}

fn load_config(args: &Args) -> Result<QuantizerConfig> {
    if let Some(path) = &args.config {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: QuantizerConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        return Ok(config);
    }

    let mut config = QuantizerConfig::new(args.target)
        .with_max_quantile(args.max_quantile)
        .with_clip(args.clip.into());
    if let Some(max_value) = args.max_value {
        config = config.with_max_value(max_value);
    }
    Ok(config)
}

/// Standard normal features via Box-Muller, plus `outliers` entries of
/// alternating sign at `±outlier`.
fn synthetic_features(args: &Args) -> Array2<f64> {
    let mut rng = StdRng::seed_from_u64(args.seed);
    let mut x = Array2::from_shape_fn((args.rows, args.cols), |_| {
        let u1: f64 = rng.gen_range(f64::EPSILON..1.0);
        let u2: f64 = rng.gen_range(0.0..1.0);
        (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
    });

    for k in 0..args.outliers.min(x.len()) {
        let idx = (rng.gen_range(0..args.rows), rng.gen_range(0..args.cols));
        x[idx] = if k % 2 == 0 { args.outlier } else { -args.outlier };
    }
    x
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    anyhow::ensure!(args.rows > 0 && args.cols > 0, "rows and cols must be positive");

    let config = load_config(&args)?;
    info!("Quantizer config: {:?}", config);

    println!("=== Feature Quantization ===\n");
    println!("  Features: {} x {}", args.rows, args.cols);
    println!("  Outliers: {} at ±{}", args.outliers, args.outlier);
    println!("  Target:   {} (range ±{})\n", config.target_type(), config.target_range());

    let x = synthetic_features(&args);

    let mut stage = Quantizer::new(config);
    let quantized = stage.fit(&x)?.transform(&x)?;
    let recovered = stage.inverse_transform_quantized(&quantized)?;
    let fitted = stage.fitted()?;

    let mut max_error = 0.0f64;
    let mut sum_sq = 0.0f64;
    let mut inside = 0usize;
    for (&orig, &recon) in x.iter().zip(recovered.iter()) {
        if orig.abs() <= fitted.bound() {
            let err = (orig - recon).abs();
            max_error = max_error.max(err);
            sum_sq += err * err;
            inside += 1;
        }
    }
    let rmse = if inside > 0 { (sum_sq / inside as f64).sqrt() } else { 0.0 };

    let raw_bytes = x.len() * std::mem::size_of::<f32>();
    let packed_bytes = x.len() * (fitted.target_type().bits() as usize / 8);

    println!("Fit:");
    println!("  Bound:      {:.6}", fitted.bound());
    println!("  Scale:      {:.6}", fitted.scale());
    println!("  Step size:  {:.3e}", fitted.step_size());
    println!("  Clip band:  ±{}", fitted.clip_band());
    println!();
    println!("Reconstruction (values inside the bound: {} of {}):", inside, x.len());
    println!("  Max abs error: {:.3e}", max_error);
    println!("  RMSE:          {:.3e}", rmse);
    println!();
    println!(
        "Size: {} bytes (f32) -> {} bytes ({}), {:.1}x",
        raw_bytes,
        packed_bytes,
        fitted.target_type(),
        raw_bytes as f64 / packed_bytes as f64
    );

    Ok(())
}
