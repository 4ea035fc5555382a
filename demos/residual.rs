//! Prints the two fixed scenes of the kernel as text for a renderer to pick up.
//!
//! ```text
//! cargo run --example residual
//! RUST_LOG=polyfacet=trace cargo run --example residual
//! ```

use polyfacet::math::Vector4;
use polyfacet::{Polygon, Result, Solid};
use tracing::info;

fn main() -> Result<()> {
    // Default: WARN for everything, INFO for polyfacet and this demo.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("residual=info".parse().unwrap_or_default())
        .add_directive("polyfacet=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let p1 = Polygon::from_coords(&[
        -4.0, -3.0, -2.0, -1.0, -4.0, 2.0, -2.0, 4.0, 1.0, 3.0, 4.0, 2.0, 3.0, -1.0, 1.0, -3.0,
    ])?;
    let p2 = Polygon::from_coords(&[-2.0, -4.0, -3.0, 0.0, 0.0, 4.0, 2.0, 1.0, 3.0, -4.0])?;
    info!(%p1, %p2, "residual scene");
    for (i, piece) in (&p1 - &p2)?.iter().enumerate() {
        info!(piece = i, area = piece.area(), "{piece}");
    }

    let solid = Solid::from_facets(&[
        [2.0, 0.0, 1.0, 1.0],
        [-2.0, -4.0, -1.0, 1.0],
        [0.0, 2.0, 0.0, 1.0],
        [-1.0, -2.0, 2.0, 1.0],
        [1.0, -2.0, -2.0, 1.0],
    ])?;
    for p in solid.points() {
        info!(facets = ?solid.incident_facets(p), "vertex {p}");
    }
    let view = Vector4::new(10.0, 7.0, 5.0, 1.0);
    for (a, b) in solid.get_visible_edges(&view) {
        info!("visible edge {a} -> {b}");
    }
    Ok(())
}
