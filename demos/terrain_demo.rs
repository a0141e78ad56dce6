//! Terrain simplification demo for rtincrate
//!
//! Generates a synthetic heightmap, optionally round-trips it through a
//! terrain-RGB encoding, and prints mesh size and fidelity for a range of
//! error thresholds.

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rtincrate::prelude::*;

#[derive(Parser, Debug, Clone)]
#[command(name = "terrain_demo", version)]
struct Args {
    /// Grid side is 2^k + 1 samples
    #[arg(long, default_value_t = 8)]
    k: u32,
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Error thresholds to extract at, in metres
    #[arg(long, value_delimiter = ',', default_value = "0,0.5,1,2,5,10,50")]
    thresholds: Vec<f32>,
    /// Use the midpoint-only error metric instead of the exact one
    #[arg(long, default_value_t = false)]
    midpoint: bool,
    /// Encode the terrain as "mapbox" or "terrarium" pixels and decode it again
    #[arg(long)]
    encoding: Option<String>,
    /// Gaussian blur applied before simplification
    #[arg(long, default_value_t = 0.0)]
    blur: f32,
    /// Also extract under this triangle budget
    #[arg(long)]
    max_triangles: Option<usize>,
    /// Latitude of the tile centre, for web-mercator vertical scaling
    #[arg(long, default_value_t = 0.0)]
    latitude: f64,
}

/// Ridged hills with seeded noise, in metres
fn synthetic_terrain(size: usize, seed: u64) -> Vec<f32> {
    let mut rng = StdRng::seed_from_u64(seed);
    let phase: f32 = rng.gen_range(0.0..std::f32::consts::TAU);
    let mut data = Vec::with_capacity(size * size);
    for y in 0..size {
        for x in 0..size {
            let u = x as f32 / (size - 1) as f32;
            let v = y as f32 / (size - 1) as f32;
            let hills = (u * 6.0 + phase).sin() * (v * 4.0).cos() * 300.0;
            let ridge = (1.0 - ((u - v) * 9.0).sin().abs()) * 120.0;
            data.push(1500.0 + hills + ridge + rng.gen_range(-2.0..2.0));
        }
    }
    data
}

fn encode_mapbox(h: f32) -> [u8; 3] {
    let v = ((h as f64 + 10000.0) * 10.0).round().max(0.0) as u32;
    [(v >> 16) as u8, (v >> 8) as u8, v as u8]
}

fn encode_terrarium(h: f32) -> [u8; 3] {
    let v = h as f64 + 32768.0;
    let whole = v.floor();
    let frac = ((v - whole) * 256.0).floor();
    [(whole as u32 >> 8) as u8, whole as u32 as u8, frac as u8]
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("rtincrate Terrain Demo");
    println!("======================");

    let size = (1usize << args.k) + 1;
    let samples = synthetic_terrain(size, args.seed);
    let mut heightmap = Heightmap::new(samples, size, size).context("building heightmap")?;
    println!("Generated {}x{} heightmap (seed {})", size, size, args.seed);

    if let Some(name) = &args.encoding {
        let encoding: TerrainEncoding = name.parse()?;
        let pixels: Vec<u8> = heightmap
            .as_slice()
            .iter()
            .flat_map(|&h| match encoding {
                TerrainEncoding::Mapbox => encode_mapbox(h),
                TerrainEncoding::Terrarium => encode_terrarium(h),
            })
            .collect();
        heightmap = decode_elevations(&pixels, size, size, 3, encoding)?;
        println!("Round-tripped samples through {} encoding", encoding);
    }

    if args.blur > 0.0 {
        let options = PreprocessOptions::default().with_blur(args.blur);
        heightmap = heightmap.preprocess(&options)?;
        println!("Applied Gaussian blur (sigma = {})", args.blur);
    }

    let (lo, hi) = heightmap.range();
    println!("Elevation range: {:.2} .. {:.2}", lo, hi);

    let metric = if args.midpoint {
        ErrorMetric::Midpoint
    } else {
        ErrorMetric::Exact
    };
    let tin = Tin::from_heightmap(heightmap, TinConfig::default().with_metric(metric))?;
    println!("Root error ({:?} metric): {:.3}", metric, tin.root_error());

    println!(
        "\n{:>10} {:>10} {:>10} {:>12} {:>10}",
        "threshold", "vertices", "triangles", "max error", "rmsd"
    );
    for &threshold in &args.thresholds {
        let mesh = tin.simplify(threshold)?;
        let metrics = mesh.measure(tin.heightmap())?;
        println!(
            "{:>10.2} {:>10} {:>10} {:>12.4} {:>10.4}",
            threshold,
            mesh.vertex_count(),
            mesh.triangle_count(),
            metrics.max_error,
            metrics.rmsd
        );
    }

    if let Some(max_triangles) = args.max_triangles {
        let limits = MeshLimits::none().with_max_triangles(max_triangles);
        let mesh = BudgetedSimplifier::new(&tin, limits).simplify(0.0)?;
        let metrics = mesh.measure(tin.heightmap())?;
        println!(
            "\nBudget of {} triangles: {} vertices, {} triangles, max error {:.4}",
            max_triangles,
            mesh.vertex_count(),
            mesh.triangle_count(),
            metrics.max_error
        );
    }

    // place the coarsest useful mesh into a 1 km tile
    let threshold = args.thresholds.iter().copied().fold(0.0f32, f32::max);
    let mesh = tin.extract(threshold)?;
    let z_scale = latitude_adjustment(args.latitude) as f32;
    let positions = mesh.positions(tin.heightmap(), z_scale)?;
    let placed = rescale_positions(&positions, Bounds::new(0.0, 0.0, 1000.0, 1000.0), true);
    if let Some(first) = placed.first() {
        println!(
            "\nFirst vertex of the {:.2} m mesh in tile space: ({:.1}, {:.1}, {:.1})",
            threshold, first.x, first.y, first.z
        );
    }

    Ok(())
}
