//! Fixed-height resize geometry

use crate::{ResizeError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizePlan {
    /// Already at or below the target height; dimensions unchanged.
    Keep,
    Resize { width: u32, height: u32 },
}

/// Width scales with the height ratio and is truncated, then bumped to the
/// next even number when odd. Height becomes exactly `target_height`.
pub fn plan_resize(width: u32, height: u32, target_height: u32) -> Result<ResizePlan> {
    if height <= target_height {
        return Ok(ResizePlan::Keep);
    }

    let scale = target_height as f64 / height as f64;
    let mut new_width = (width as f64 * scale) as u32;
    if new_width % 2 != 0 {
        new_width += 1;
    }

    if new_width == 0 {
        return Err(ResizeError::DegenerateDimensions {
            width,
            height,
            target_height,
        });
    }

    Ok(ResizePlan::Resize {
        width: new_width,
        height: target_height,
    })
}
