use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use geom_simd::rand::{
    draw_polygon_radial, random_walk, RadialCfg, ReplayToken, VertexCount, WalkCfg,
};
use geom_simd::{
    compiled_kernels, find_all_intersections, get_capabilities, select_kernel, simplify,
    Algorithm, Point, Polygon, SimdCapabilities,
};
use serde::Serialize;
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;
mod table;

use provenance::Provenance;

#[derive(Parser)]
#[command(name = "geom-cli")]
#[command(about = "Polyline simplification and polygon queries over point tables")]
struct Cmd {
    /// Optional run label; propagated to provenance sidecars and logs
    #[arg(long, global = true)]
    tag: Option<String>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Douglas-Peucker reduction of an x,y table
    Simplify {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        tolerance: f64,
        /// auto|scalar|avx2|avx512|neon
        #[arg(long, default_value = "auto")]
        algo: Algorithm,
        #[arg(long)]
        out: PathBuf,
    },
    /// Write a reproducible random table
    Gen {
        #[command(subcommand)]
        kind: GenKind,
    },
    /// Area, orientation and closure of a polygon table; `--x/--y` adds a containment test
    Polygon {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, requires = "y", allow_hyphen_values = true)]
        x: Option<f64>,
        #[arg(long, requires = "x", allow_hyphen_values = true)]
        y: Option<f64>,
    },
    /// Edge crossings between two polygon tables
    Intersect {
        #[arg(long)]
        a: PathBuf,
        #[arg(long)]
        b: PathBuf,
        #[arg(long, default_value = "auto")]
        algo: Algorithm,
        /// Optional table of hits (edge_a, edge_b, t, u, x, y)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print compiled and detected vector backends as JSON
    Caps,
    /// Print a small provenance JSON block
    Report,
}

#[derive(Subcommand)]
enum GenKind {
    /// Noisy monotone-in-x walk
    Walk {
        #[arg(long, default_value_t = 10_000)]
        n: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long)]
        out: PathBuf,
    },
    /// Closed star-shaped counter-clockwise polygon
    Polygon {
        #[arg(long, default_value_t = 12)]
        n: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = 1.0)]
        radius: f64,
        #[arg(long)]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Simplify {
            input,
            tolerance,
            algo,
            out,
        } => run_simplify(&input, tolerance, algo, &out, cmd.tag),
        Action::Gen { kind } => generate(kind, cmd.tag),
        Action::Polygon { input, x, y } => polygon(&input, x.zip(y)),
        Action::Intersect { a, b, algo, out } => intersect(&a, &b, algo, out.as_deref(), cmd.tag),
        Action::Caps => caps(),
        Action::Report => report(cmd.tag),
    }
}

fn run_simplify(
    input: &Path,
    tolerance: f64,
    algo: Algorithm,
    out: &Path,
    tag: Option<String>,
) -> Result<()> {
    let line = table::read_points(input)?;
    let reduced = simplify(&line, tolerance, algo)
        .with_context(|| format!("simplifying {}", input.display()))?;
    tracing::info!(
        input = %input.display(),
        tolerance,
        %algo,
        points_in = line.len(),
        points_out = reduced.len(),
        "simplify"
    );
    table::write_points(out, &reduced)?;
    Provenance::new(
        "simplify",
        json!({
            "input": input.to_string_lossy(),
            "tolerance": tolerance,
            "algo": algo.name(),
            "points_in": line.len(),
            "points_out": reduced.len(),
        }),
    )
    .tagged(tag)
    .write_next_to(out)?;
    Ok(())
}

fn generate(kind: GenKind, tag: Option<String>) -> Result<()> {
    match kind {
        GenKind::Walk { n, seed, out } => {
            let cfg = WalkCfg {
                points: VertexCount::Fixed(n),
                ..WalkCfg::default()
            };
            let line = random_walk(cfg, ReplayToken::new(seed, 0));
            tracing::info!(n = line.len(), seed, out = %out.display(), "gen walk");
            table::write_points(&out, &line)?;
            Provenance::new("gen walk", json!({"n": n, "seed": seed}))
                .tagged(tag)
                .write_next_to(&out)?;
        }
        GenKind::Polygon {
            n,
            seed,
            radius,
            out,
        } => {
            let cfg = RadialCfg {
                vertex_count: VertexCount::Fixed(n),
                base_radius: radius,
                ..RadialCfg::default()
            };
            let poly = draw_polygon_radial(cfg, ReplayToken::new(seed, 0));
            tracing::info!(n = poly.len(), seed, out = %out.display(), "gen polygon");
            table::write_points(&out, poly.vertices())?;
            let params = json!({"n": n, "seed": seed, "radius": radius});
            Provenance::new("gen polygon", params)
                .tagged(tag)
                .write_next_to(&out)?;
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct PolygonReport {
    vertices: usize,
    closed: bool,
    signed_area: f64,
    area: f64,
    orientation: &'static str,
    centroid: Option<[f64; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    contains: Option<bool>,
}

fn polygon_report(poly: &Polygon, at: Option<(f64, f64)>) -> PolygonReport {
    let signed_area = poly.signed_area();
    let orientation = if signed_area > 0.0 {
        "ccw"
    } else if signed_area < 0.0 {
        "cw"
    } else {
        "degenerate"
    };
    PolygonReport {
        vertices: poly.len(),
        closed: poly.is_closed(),
        signed_area,
        area: signed_area.abs(),
        orientation,
        centroid: poly.centroid().map(|c: Point| [c.x, c.y]),
        contains: at.map(|(x, y)| poly.contains(x, y)),
    }
}

fn polygon(input: &Path, at: Option<(f64, f64)>) -> Result<()> {
    let poly = Polygon::new(table::read_points(input)?);
    let report = polygon_report(&poly, at);
    tracing::info!(input = %input.display(), vertices = report.vertices, "polygon");
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn intersect(
    a: &Path,
    b: &Path,
    algo: Algorithm,
    out: Option<&Path>,
    tag: Option<String>,
) -> Result<()> {
    let pa = Polygon::new(table::read_points(a)?);
    let pb = Polygon::new(table::read_points(b)?);
    let hits = find_all_intersections(&pa, &pb, algo)?;
    tracing::info!(
        a = %a.display(),
        b = %b.display(),
        %algo,
        hits = hits.len(),
        "intersect"
    );
    if let Some(out) = out {
        table::write_hits(out, &hits)?;
        Provenance::new(
            "intersect",
            json!({
                "a": a.to_string_lossy(),
                "b": b.to_string_lossy(),
                "algo": algo.name(),
                "hits": hits.len(),
            }),
        )
        .tagged(tag)
        .write_next_to(out)?;
    }
    let summary = json!({
        "algo": algo.name(),
        "hits": hits.len(),
        "points": hits.iter().map(|h| [h.hit.point.x, h.hit.point.y]).collect::<Vec<_>>(),
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

#[derive(Serialize)]
struct Flags {
    avx2: bool,
    avx512: bool,
    neon: bool,
}

impl From<SimdCapabilities> for Flags {
    fn from(c: SimdCapabilities) -> Self {
        Self {
            avx2: c.avx2,
            avx512: c.avx512,
            neon: c.neon,
        }
    }
}

#[derive(Serialize)]
struct CapsReport {
    version: &'static str,
    compiled: Flags,
    cpu: Flags,
    auto: String,
    lanes: usize,
}

fn caps() -> Result<()> {
    let auto = select_kernel(Algorithm::Auto)?;
    let report = CapsReport {
        version: geom_simd::VERSION,
        compiled: compiled_kernels().into(),
        cpu: get_capabilities().into(),
        auto: auto.to_string(),
        lanes: auto.lanes(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn report(tag: Option<String>) -> Result<()> {
    let obj = json!({
        "code_rev": provenance::code_rev(),
        "geom_simd": geom_simd::VERSION,
        "tags": tag.into_iter().collect::<Vec<_>>(),
        "params": {},
        "outputs": []
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
