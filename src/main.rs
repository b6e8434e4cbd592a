//! Geo point clustering tool
//!
//! Reads map markers from a CSV file, clusters them and writes one row per
//! cluster and one row per noise point.

use clap::{Parser, ValueEnum};
use csv::{ReaderBuilder, WriterBuilder};
use log::{LevelFilter, debug, error, warn};
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use rust_geocluster::cluster::{
    AutoParams, ClusterStrategy, Clustering, Coord, DEFAULT_MAX_DENSITY_POINTS, DensityParams,
    GridParams, Point, PointList, Strategy, Viewport,
};
use rust_geocluster::{Error, Result};


#[derive(Clone, Copy, Debug, PartialEq, ValueEnum)]
enum StrategyKind {
    /// Density clustering (core distances + minimum spanning tree)
    Density,
    /// Fixed 3x6 grid over the viewport
    Grid,
    /// Density clustering up to --max-density-points, grid above
    Auto,
}

#[derive(Parser)]
#[command(name = "rust_geocluster")]
#[command(about = "Density-based geo point clustering tool", long_about = None)]
struct Args {
    /// Input CSV file with id,latitude,longitude[,thumbnail[,label]] columns
    #[arg(short, long, default_value = "points.csv")]
    input: PathBuf,

    /// Output CSV file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Neighbour rank used for core distances
    #[arg(short, default_value_t = 3)]
    k: usize,

    /// Multiplier applied to the 75th percentile of core distances
    #[arg(short = 'm', long, default_value_t = 1.8)]
    size_multiplier: f64,

    /// Minimum number of points in a cluster
    #[arg(short = 's', long, default_value_t = 2)]
    min_cluster_size: usize,

    /// Clustering strategy
    #[arg(long, value_enum, default_value_t = StrategyKind::Density)]
    strategy: StrategyKind,

    /// Grid viewport as south,west,north,east (default: bounds of the input)
    #[arg(long, value_parser = parse_viewport, allow_hyphen_values = true)]
    viewport: Option<Viewport>,

    /// Largest input clustered with the density strategy in auto mode
    #[arg(long, default_value_t = DEFAULT_MAX_DENSITY_POINTS)]
    max_density_points: usize,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn main() {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(if args.debug {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .parse_default_env()
        .init();

    if let Err(e) = run(&args) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let points = read_points(&args.input)?;
    if points.is_empty() {
        warn!("No points found in {:?}", args.input);
    }
    debug!("Read {} points from {:?}", points.len(), args.input);

    let strategy = build_strategy(args, &points)?;
    debug!("Running {:?}", strategy);

    let result = strategy.cluster(&points);
    debug!(
        "Found {} clusters and {} noise points (threshold {:.1} m)",
        result.clusters.len(),
        result.noise.len(),
        result.threshold
    );

    match &args.output {
        None => write_clustering(io::stdout().lock(), &result)?,
        Some(output_file) => {
            write_clustering(File::create(output_file)?, &result)?;
            debug!("Clusters written to {:?}", output_file);
        }
    }

    Ok(())
}

/// Parses `south,west,north,east` into a viewport
fn parse_viewport(s: &str) -> std::result::Result<Viewport, String> {
    let values = s
        .split(',')
        .map(|v| v.trim().parse::<f64>())
        .collect::<std::result::Result<Vec<f64>, _>>()
        .map_err(|e| format!("viewport: {}", e))?;

    match values[..] {
        [south, west, north, east] => {
            Viewport::new(Coord::new(south, west), Coord::new(north, east))
                .map_err(|e| e.to_string())
        }
        _ => Err(format!("viewport needs 4 values, got {}", values.len())),
    }
}

/// Maps command line flags onto a clustering strategy
fn build_strategy(args: &Args, points: &[Point]) -> Result<Strategy> {
    let density = DensityParams {
        k: args.k,
        size_multiplier: args.size_multiplier,
        min_cluster_size: args.min_cluster_size,
    };
    density.validate()?;

    Ok(match args.strategy {
        StrategyKind::Density => Strategy::Density(density),
        StrategyKind::Grid => {
            let viewport = args
                .viewport
                .or_else(|| Viewport::bounding(points))
                .ok_or_else(|| Error::InvalidViewport("no viewport and no valid points".into()))?;
            Strategy::Grid(GridParams::new(viewport))
        }
        StrategyKind::Auto => Strategy::Auto(AutoParams {
            density,
            viewport: args.viewport,
            max_density_points: args.max_density_points,
        }),
    })
}

fn read_points(filename: &Path) -> Result<PointList> {
    parse_points(File::open(filename)?)
}

/// Reads points from CSV
///
/// Expected format: `id,latitude,longitude[,thumbnail[,label]]` (header row is optional).
/// Rows without parsable coordinates are skipped.
fn parse_points<R: Read>(input: R) -> Result<PointList> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(input);

    let mut points = PointList::new();
    for (line, result) in reader.records().enumerate() {
        let record = result?;

        let lat = record.get(1).map(|v| v.trim().parse::<f64>());
        let lon = record.get(2).map(|v| v.trim().parse::<f64>());
        let (lat, lon) = match (lat, lon) {
            (Some(Ok(lat)), Some(Ok(lon))) => (lat, lon),
            // Determine if first row is header
            _ if line == 0 => continue,
            _ => {
                warn!("Skipping line {}: no valid latitude,longitude", line + 1);
                continue;
            }
        };

        let mut point = Point::new(record.get(0).unwrap_or_default().trim(), lat, lon);
        if let Some(thumbnail) = record.get(3).map(str::trim).filter(|t| !t.is_empty()) {
            point = point.with_thumbnail(thumbnail);
        }
        if let Some(label) = record.get(4) {
            point = point.with_label(label.trim());
        }
        points.push(point);
    }

    Ok(points)
}

/// Writes clusters and noise points as CSV
///
/// Format: `kind,cluster,count,latitude,longitude,radius_m,thumbnail,ids`,
/// cluster member ids are joined with `;`.
fn write_clustering<W: Write>(output: W, result: &Clustering) -> Result<()> {
    let mut writer = WriterBuilder::new().from_writer(output);
    writer.write_record([
        "kind",
        "cluster",
        "count",
        "latitude",
        "longitude",
        "radius_m",
        "thumbnail",
        "ids",
    ])?;

    for cluster in &result.clusters {
        writer.write_record([
            "cluster".to_string(),
            cluster.c.to_string(),
            cluster.count.to_string(),
            cluster.centroid.lat().to_string(),
            cluster.centroid.lon().to_string(),
            format!("{:.1}", cluster.radius),
            cluster.thumbnail.clone().unwrap_or_default(),
            cluster.ids.join(";"),
        ])?;
    }

    for point in &result.noise {
        writer.write_record([
            "noise".to_string(),
            String::new(),
            "1".to_string(),
            point.coord.lat().to_string(),
            point.coord.lon().to_string(),
            "0.0".to_string(),
            point.thumbnail.clone().unwrap_or_default(),
            point.id.clone(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}
