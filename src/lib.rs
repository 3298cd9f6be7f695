//! # sif-lottie
//!
//! Converts animated Synfig regions into Lottie path shapes.
//!
//! The heavy lifting lives in [`sif_core`]: every region layer is resampled
//! into one synchronized shape timeline. This crate adds the batch entry
//! points. Layers are independent, so they are converted on the rayon pool
//! against one shared, read-only [`DocumentContext`].

pub use lottie_data;
pub use sif_core;
pub use sif_data;

pub use sif_core::{ConversionSettings, ConvertError, DocumentContext, Result};

use lottie_data::model::PathShape;
use rayon::prelude::*;
use sif_core::gen_shapes_path;
use sif_data::Node;
use tracing::{debug, instrument};

/// Converts each layer to a path shape, in input order. The shape index is
/// the layer's position in `layers`. The first failing layer (in input
/// order) aborts the batch.
#[instrument(level = "debug", skip_all, fields(layers = layers.len()))]
pub fn convert_regions(layers: &[Node], ctx: &DocumentContext) -> Result<Vec<PathShape>> {
    let layers: Vec<&Node> = layers.iter().collect();
    convert_all(&layers, ctx)
}

fn convert_all(layers: &[&Node], ctx: &DocumentContext) -> Result<Vec<PathShape>> {
    let results: Vec<Result<PathShape>> = layers
        .par_iter()
        .enumerate()
        .map(|(ix, layer)| gen_shapes_path(layer, ctx, ix as u32))
        .collect();
    results.into_iter().collect()
}

fn is_region(layer: &Node) -> bool {
    layer.tag() == "layer"
        && layer.attr("type") == Some("region")
        && layer.attr("active") != Some("false")
}

/// Reads the canvas metadata and converts every active region layer directly
/// under the `<canvas>` root.
#[instrument(level = "debug", skip_all)]
pub fn convert_document(canvas: &Node, settings: ConversionSettings) -> Result<Vec<PathShape>> {
    let ctx = DocumentContext::from_canvas(canvas, settings)?;
    let layers: Vec<&Node> = canvas.children().iter().filter(|l| is_region(l)).collect();
    debug!(
        regions = layers.len(),
        fps = ctx.fps,
        pixels_per_unit = ctx.pixels_per_unit,
        "Converting document"
    );
    convert_all(&layers, &ctx)
}
