//! Walkthrough of the point, segment and polyline types.
//!
//! ```text
//! cargo run --example walkthrough
//! RUST_LOG=geopolar=trace cargo run --example walkthrough
//! ```

use geopolar::geometry::{DirectedSegment, Polyline, SpatialPoint};
use geopolar::{operands, GeopolarError};

fn main() -> Result<(), GeopolarError> {
    // Default: WARN for everything, INFO for geopolar.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("geopolar=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let mut p = SpatialPoint::planar(3.0, 4.0);
    println!("p = {p}  r = {}  theta = {:.4}", p.r(), p.theta());
    p.set_polar(5.0, 0.0, 0.0);
    println!("after set_polar(5, 0): p = {p}");

    p.add(operands![1.0, [2.0, 3.0]]).divide_by(0.0);
    println!("after add and divide by zero: p = {p}");

    let q = SpatialPoint::from_str_literal("1, 2, 3")?;
    let json = serde_json::json!({ "x": 4, "y": 6, "z": 8 });
    let r = SpatialPoint::from_value(&json)?;
    println!("midpoint of {q} and {r}: {}", q.fraction(&r, 0.5));
    println!("{q} rotated 90 degrees: {}", q.rotate(90.0));

    let segment =
        DirectedSegment::from_points(&SpatialPoint::planar(0.0, 0.0), &SpatialPoint::planar(3.0, 4.0));
    println!(
        "segment {segment}: norm = {}  angle = {:.4}",
        segment.norm(),
        segment.angle()
    );

    let mut polyline = Polyline::new();
    let last = polyline.append(SpatialPoint::planar(2.0, 0.0));
    polyline.prepend(SpatialPoint::planar(0.0, 0.0));
    polyline.insert_before(segment.fraction(0.5), Some(last))?;
    println!("polyline ({} points): {polyline}", polyline.len());

    Ok(())
}
