use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use csg2d::{CsgConfig, DEFAULT_JOIN_TOLERANCE, DEFAULT_MAX_DEPTH, LINE_EPSILON};
use csg2d::wire::DEFAULT_WIRE_TOLERANCE;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

mod commands;

use commands::{BooleanOp, Loops};

#[derive(Parser)]
#[command(name = "csg2d")]
#[command(about = "2D boolean operations, triangulation and wire networks over JSON point data")]
struct Cmd {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    action: Action,
}

/// BSP tolerances shared by the boolean commands.
#[derive(Args)]
struct CsgArgs {
    /// Half-plane classification tolerance
    #[arg(long, default_value_t = LINE_EPSILON)]
    epsilon: f64,
    /// Maximum BSP recursion depth
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,
    /// Squared distance under which segments are chained into one loop
    #[arg(long, default_value_t = DEFAULT_JOIN_TOLERANCE)]
    join_tolerance: f64,
}

impl CsgArgs {
    fn config(&self) -> CsgConfig {
        CsgConfig::default()
            .with_epsilon(self.epsilon)
            .with_max_depth(self.max_depth)
            .with_join_tolerance(self.join_tolerance)
    }
}

/// Two polygon-set files, each `[[[x, y], ...], ...]`.
#[derive(Args)]
struct Operands {
    a: PathBuf,
    b: PathBuf,
    #[command(flatten)]
    csg: CsgArgs,
}

#[derive(Subcommand)]
enum Action {
    /// Print the loops bounding A ∪ B
    Union(Operands),
    /// Print the loops bounding A − B
    Subtract(Operands),
    /// Print the loops bounding A ∩ B
    Intersect(Operands),
    /// Ear-clip a single ring `[[x, y], ...]`
    Triangulate { input: PathBuf },
    /// Build a planar network from segments `[[[x1, y1], [x2, y2]], ...]`
    Wire {
        input: PathBuf,
        /// Vertex merge distance and minimum edge length
        #[arg(long, default_value_t = DEFAULT_WIRE_TOLERANCE)]
        tolerance: f64,
        /// Fail if any two edges cross or overlap
        #[arg(long)]
        check: bool,
    },
    /// Simplify a path `[[x, y], ...]` with Ramer-Douglas-Peucker
    Simplify {
        input: PathBuf,
        #[arg(long)]
        tolerance: f64,
    },
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = match cmd.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cmd.action {
        Action::Union(operands) => boolean(BooleanOp::Union, &operands),
        Action::Subtract(operands) => boolean(BooleanOp::Subtract, &operands),
        Action::Intersect(operands) => boolean(BooleanOp::Intersect, &operands),
        Action::Triangulate { input } => {
            let ring: Vec<[f64; 2]> = read_json(&input)?;
            emit(&commands::triangulate(&ring)?)
        }
        Action::Wire {
            input,
            tolerance,
            check,
        } => {
            let segments: Vec<[[f64; 2]; 2]> = read_json(&input)?;
            tracing::info!(segments = segments.len(), tolerance, "wire");
            emit(&commands::wire(&segments, tolerance, check)?)
        }
        Action::Simplify { input, tolerance } => {
            let path: Vec<[f64; 2]> = read_json(&input)?;
            emit(&commands::simplify(&path, tolerance))
        }
    }
}

fn boolean(op: BooleanOp, operands: &Operands) -> Result<()> {
    let a: Loops = read_json(&operands.a)?;
    let b: Loops = read_json(&operands.b)?;
    tracing::info!(?op, a = a.len(), b = b.len(), "boolean");

    let loops = commands::boolean(op, &a, &b, operands.csg.config())
        .with_context(|| format!("{op:?} failed"))?;
    emit(&loops)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

fn emit<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}
