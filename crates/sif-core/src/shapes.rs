use crate::context::DocumentContext;
use crate::error::Result;
use crate::region::gen_bline_region;
use lottie_data::model::{PathShape, Shape, ShapeProperty};
use sif_data::Node;

/// Wraps the synchronized outline of a region layer into a path shape. The
/// layer's `desc` becomes the shape name.
pub fn gen_shapes_path(layer: &Node, ctx: &DocumentContext, ix: u32) -> Result<PathShape> {
    let k = gen_bline_region(layer, ctx)?;
    Ok(PathShape {
        nm: layer.attr("desc").map(str::to_string),
        ix: Some(ix),
        ks: ShapeProperty { a: 1, k },
    })
}

/// Same as [`gen_shapes_path`], tagged as a shape item.
pub fn gen_shape(layer: &Node, ctx: &DocumentContext, ix: u32) -> Result<Shape> {
    gen_shapes_path(layer, ctx, ix).map(Shape::Path)
}
