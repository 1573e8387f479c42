mod provenance;
mod table_io;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use mixdesign::api::{
    fill_nan, from_percent, sample_surface, Composition, DesignConfig, DesignRegistry,
    ExchangeCfg, HullDesign, InterpCfg, InterpolatorRegistry, PointTable, RbfCfg, RbfKernel,
};
use mixdesign::simplex::{is_on_simplex, SimplexCfg};
use provenance::{write_sidecar, Payload};
use serde::Serialize;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

#[derive(Parser)]
#[command(name = "mixdesign")]
#[command(about = "Three-component mixture designs and response-surface fits")]
struct Cmd {
    /// Log at debug level
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Generate a design and write it as a percent point table with score 0
    Design {
        /// Registered design name; defaults to "Hull" with --hull, else "Simplex Centroid"
        #[arg(long)]
        variant: Option<String>,
        #[arg(long, default_value_t = 3)]
        components: usize,
        /// Degree m (default 2), or the subset size for hull designs
        /// (0 = all candidates, the default with --hull)
        #[arg(long)]
        order: Option<usize>,
        /// CSV of boundary polygon vertices in percent (Comp1..Comp3 or Comp1..Comp4)
        #[arg(long)]
        hull: Option<PathBuf>,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = 100)]
        max_iter: usize,
        #[arg(long)]
        out: PathBuf,
    },
    /// Fit an interpolator to a scored point table and evaluate it
    Fit {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, default_value = "RBF")]
        interp: String,
        #[arg(long, default_value = "thin_plate_spline")]
        kernel: String,
        #[arg(long, default_value_t = 1.0)]
        epsilon: f64,
        #[arg(long, default_value_t = 0.0)]
        smoothing: f64,
        #[arg(long)]
        lazy: bool,
        /// Query composition in percent, e.g. 20,30,50 (repeatable)
        #[arg(long = "query", value_parser = parse_percent_triple)]
        queries: Vec<Composition>,
        /// Sample the surface on an (i, j, k)/grid lattice
        #[arg(long)]
        grid: Option<usize>,
        /// Replace undefined surface values with this
        #[arg(long)]
        fill: Option<f64>,
        /// Surface CSV (required with --grid)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print the provenance block and the registered designs/interpolators
    Report,
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = if cmd.verbose { Level::DEBUG } else { Level::INFO };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .init();
    match cmd.action {
        Action::Design {
            variant,
            components,
            order,
            hull,
            seed,
            max_iter,
            out,
        } => design(DesignArgs {
            variant,
            components,
            order,
            hull,
            seed,
            max_iter,
            out,
        }),
        Action::Fit {
            input,
            interp,
            kernel,
            epsilon,
            smoothing,
            lazy,
            queries,
            grid,
            fill,
            out,
        } => {
            let rbf = RbfCfg {
                kernel: kernel.parse::<RbfKernel>()?,
                epsilon,
                smoothing,
                lazy,
            };
            fit(FitArgs {
                input,
                interp,
                rbf,
                queries,
                grid,
                fill,
                out,
            })
        }
        Action::Report => report(),
    }
}

fn parse_percent_triple(s: &str) -> std::result::Result<Composition, String> {
    let parts = s
        .split(',')
        .map(|t| t.trim().parse::<f64>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| format!("{s:?}: {e}"))?;
    let [a, b, c] = parts[..] else {
        return Err(format!("{s:?}: expected three comma-separated percentages"));
    };
    let p = from_percent(&Composition::new(a, b, c));
    if !is_on_simplex(&p, SimplexCfg::default()) {
        return Err(format!("{s:?}: components must be non-negative and sum to 100"));
    }
    Ok(p)
}

#[derive(Serialize)]
struct DesignArgs {
    variant: Option<String>,
    components: usize,
    order: Option<usize>,
    hull: Option<PathBuf>,
    seed: u64,
    max_iter: usize,
    out: PathBuf,
}

fn design(args: DesignArgs) -> Result<()> {
    let mut registry = DesignRegistry::default();
    if let Some(path) = &args.hull {
        let polygon = table_io::read_polygon(path)?;
        let hull = HullDesign::from_percent(polygon)
            .with_context(|| format!("building hull design from {}", path.display()))?;
        tracing::info!(candidates = hull.candidates().len(), "hull candidates");
        registry.insert(Box::new(hull));
    }
    let default_variant = if args.hull.is_some() {
        "Hull"
    } else {
        "Simplex Centroid"
    };
    let variant = args.variant.as_deref().unwrap_or(default_variant);
    let order = args.order.unwrap_or(if args.hull.is_some() { 0 } else { 2 });
    if variant == "Hull" && (1..args.components).contains(&order) {
        tracing::warn!(
            order,
            components = args.components,
            "hull subset smaller than the component count is degenerate"
        );
    }
    let cfg = DesignConfig::new(args.components, order).with_exchange(ExchangeCfg {
        max_iter: args.max_iter,
        seed: args.seed,
        ..ExchangeCfg::default()
    });
    let points = registry.generate(variant, &cfg)?;
    let table = PointTable::from_design(&points)
        .with_context(|| format!("{variant} produced points outside the 3-component table"))?;
    table_io::write_point_table(&args.out, &table)?;
    tracing::info!(variant, points = table.len(), out = %args.out.display(), "design");

    let mut payload = Payload::new("design", &args)?;
    if let Some(path) = &args.hull {
        payload = payload.with_input(path);
    }
    write_sidecar(&args.out, payload)?;
    Ok(())
}

#[derive(Serialize)]
struct FitArgs {
    input: PathBuf,
    interp: String,
    #[serde(skip)]
    rbf: RbfCfg,
    #[serde(skip)]
    queries: Vec<Composition>,
    grid: Option<usize>,
    fill: Option<f64>,
    out: Option<PathBuf>,
}

fn fit(args: FitArgs) -> Result<()> {
    if args.grid.is_some() && args.out.is_none() {
        bail!("--grid needs --out");
    }
    let table = table_io::read_point_table(&args.input)?;
    let registry = InterpolatorRegistry::default();
    let cfg = InterpCfg { rbf: args.rbf };
    let interp = registry
        .build(&args.interp, &table.points(), &table.scores(), &cfg)
        .with_context(|| format!("fitting {} to {}", args.interp, args.input.display()))?;
    let r2 = interp.r2()?;
    tracing::info!(interp = interp.name(), points = table.len(), r2, "fit");

    for q in &args.queries {
        let value = interp.evaluate(q)?;
        println!("{:.4},{:.4},{:.4},{value}", 100.0 * q.x, 100.0 * q.y, 100.0 * q.z);
    }

    if let (Some(scale), Some(out)) = (args.grid, &args.out) {
        let mut samples = sample_surface(interp.as_ref(), scale)?;
        if let Some(fill) = args.fill {
            let filled = fill_nan(&mut samples, fill);
            tracing::debug!(filled, "undefined samples filled");
        }
        table_io::write_surface(out, &samples)?;
        tracing::info!(samples = samples.len(), out = %out.display(), "surface");

        let mut params = serde_json::to_value(&args)?;
        params["r2"] = serde_json::json!(r2);
        params["kernel"] = serde_json::json!(args.rbf.kernel.as_str());
        params["epsilon"] = serde_json::json!(args.rbf.epsilon);
        params["smoothing"] = serde_json::json!(args.rbf.smoothing);
        write_sidecar(out, Payload::new("fit", &params)?.with_input(&args.input))?;
    }
    Ok(())
}

fn report() -> Result<()> {
    let mut obj = provenance::header();
    obj["designs"] = serde_json::json!(DesignRegistry::default().names());
    obj["interpolators"] = serde_json::json!(InterpolatorRegistry::default().names());
    obj["kernels"] = RbfKernel::ALL.iter().map(|k| k.as_str()).collect();
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
