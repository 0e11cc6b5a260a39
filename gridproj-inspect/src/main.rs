use clap::Parser;
use gridproj_core::{
    LinearProjection, ProjectionEvaluator, ProjectionSettings, RealVectorBounds,
    RealVectorStateSpace, StateSampler, StateSpace,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

mod logging;
mod report;

#[derive(Parser, Debug)]
#[command(name = "gridproj-inspect")]
#[command(about = "Build a random projection of a box-bounded space and show its grid cells")]
#[command(version)]
struct Args {
    /// Dimension of the state space (N)
    #[arg(short = 'n', long, default_value = "4")]
    dimension: usize,

    /// Dimension of the projection (M), overrides the config file
    #[arg(short = 'm', long)]
    projected: Option<usize>,

    /// Lower bound on every axis
    #[arg(long, default_value = "-1.0", allow_hyphen_values = true)]
    low: f64,

    /// Upper bound on every axis
    #[arg(long, default_value = "1.0", allow_hyphen_values = true)]
    high: f64,

    /// JSON settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for the projection matrix
    #[arg(long)]
    seed: Option<u64>,

    /// Seed for state sampling (extent inference and random points)
    #[arg(long)]
    sample_seed: Option<u64>,

    /// Fixed cell sizes, comma separated
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    cells: Option<Vec<f64>>,

    /// Per-row scale divisors, comma separated (N values)
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    scale: Option<Vec<f64>>,

    /// Uniform samples used to infer cell sizes
    #[arg(long)]
    samples: Option<usize>,

    /// Cells per axis across the inferred extent
    #[arg(long)]
    splits: Option<f64>,

    /// State to discretize, comma separated (repeatable)
    #[arg(short, long = "point", value_parser = parse_point, allow_hyphen_values = true)]
    points: Vec<Point>,

    /// Number of sampled states to discretize when no --point is given
    #[arg(long, default_value = "5")]
    random_points: usize,

    /// Emit a JSON report instead of text
    #[arg(long)]
    json: bool,

    /// Log level (debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

/// One comma-separated state from the command line
#[derive(Debug, Clone)]
struct Point(Vec<f64>);

fn parse_point(s: &str) -> Result<Point, String> {
    s.split(',')
        .map(|v| {
            v.trim()
                .parse::<f64>()
                .map_err(|e| format!("invalid component '{}': {}", v, e))
        })
        .collect::<Result<Vec<f64>, String>>()
        .map(Point)
}

impl Args {
    /// Config file values, then command-line overrides.
    fn settings(&self) -> Result<ProjectionSettings, Box<dyn std::error::Error>> {
        let mut settings = match &self.config {
            Some(path) => ProjectionSettings::load(path)?,
            None => ProjectionSettings::default(),
        };
        if let Some(m) = self.projected {
            settings.output_dimension = Some(m);
        }
        if let Some(cells) = &self.cells {
            settings.cell_dimensions = Some(cells.clone());
        }
        if let Some(scale) = &self.scale {
            settings.scale = Some(scale.clone());
        }
        if let Some(seed) = self.seed {
            settings.seed = Some(seed);
        }
        if let Some(samples) = self.samples {
            settings.inference.extent_samples = samples;
        }
        if let Some(splits) = self.splits {
            settings.inference.dimension_splits = splits;
        }
        Ok(settings)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    logging::init_with_filter(&args.log_level);

    let settings = args.settings()?;
    debug!("Settings: {}", settings.to_json()?);

    let from = args.dimension;
    let to = settings.output_dimension.unwrap_or(2);
    if to > from {
        return Err(format!("projected dimension {} exceeds state dimension {}", to, from).into());
    }

    let bounds = RealVectorBounds::uniform(from, args.low, args.high);
    let mut space = RealVectorStateSpace::new(bounds)?;
    if let Some(seed) = args.sample_seed {
        space = space.with_seed(seed);
    }
    let space = Arc::new(space);

    let mut rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let scale = settings.scale.clone().unwrap_or_default();
    let projector = LinearProjection::random(from, to, &scale, &mut rng)?;

    let mut evaluator = ProjectionEvaluator::new(space.clone(), projector);
    settings.apply(&mut evaluator)?;
    evaluator.setup()?;
    info!("Projection {} -> {} ready for {}", from, to, space.name());

    let points: Vec<Vec<f64>> = if args.points.is_empty() {
        let mut sampler = space.alloc_sampler();
        (0..args.random_points)
            .map(|_| {
                let mut state = space.alloc_state();
                sampler.sample_uniform(&mut state);
                state
            })
            .collect()
    } else {
        if let Some(bad) = args.points.iter().find(|p| p.0.len() != from) {
            return Err(format!("point {:?} does not have {} components", bad.0, from).into());
        }
        args.points.iter().map(|p| p.0.clone()).collect()
    };

    let report = report::build(&evaluator, &points);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if args.json {
        serde_json::to_writer_pretty(&mut out, &report)?;
        writeln!(out)?;
    } else {
        report::write_text(&evaluator, &report, &mut out)?;
    }
    Ok(())
}
