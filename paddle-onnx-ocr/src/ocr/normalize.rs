use crate::error::{OcrError, Result};
use crate::models::{BoxPoint, TextBlock};

use super::engine::NativeOcrResult;

const QUAD_POINTS: usize = 4;

/// Map engine output onto the host schema, keeping detection order.
///
/// Blocks reporting fewer than four points keep their text but get no points.
pub fn normalize(native: NativeOcrResult) -> Result<Vec<TextBlock>> {
    if native.text_blocks.is_empty() {
        return Err(OcrError::EmptyResult);
    }

    Ok(native
        .text_blocks
        .into_iter()
        .map(|block| {
            let box_points = if block.box_points.len() >= QUAD_POINTS {
                block
                    .box_points
                    .iter()
                    .map(|&(x, y)| BoxPoint::new(x, y))
                    .collect()
            } else {
                Vec::new()
            };

            TextBlock {
                text: block.text,
                box_points,
            }
        })
        .collect())
}
