//! Frame sheet resolution: decoded bitmap plus grid-cell layout.
//!
//! Each image reference in an orientation can carry a `.frames` companion
//! document describing how the sheet is cut into animation frames. Without
//! one, the whole bitmap is a single frame.

use std::path::Path;

use anyhow::Context;
use image::DynamicImage;
use serde::Deserialize;

use crate::geom::Vec2I;

#[derive(Deserialize)]
struct FramesDocument {
    #[serde(rename = "frameGrid")]
    frame_grid: RawFrameGrid,
}

#[derive(Deserialize)]
struct RawFrameGrid {
    size: [i32; 2],
    #[serde(default = "single_cell")]
    dimensions: [i32; 2],
}

fn single_cell() -> [i32; 2] {
    [1, 1]
}

/// Grid-cell layout of a frame sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameGrid {
    /// Per-frame size in pixels.
    pub size: Vec2I,
    /// Frame columns and rows in the sheet.
    pub dimensions: Vec2I,
}

impl FrameGrid {
    /// Parse a `.frames` companion document.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let txt = std::fs::read_to_string(path)
            .with_context(|| format!("Reading frames file {}", path.display()))?;
        let doc: FramesDocument = serde_json::from_str(&txt)
            .with_context(|| format!("Parsing frames file {}", path.display()))?;

        let grid = FrameGrid {
            size: Vec2I::new(doc.frame_grid.size[0], doc.frame_grid.size[1]),
            dimensions: Vec2I::new(doc.frame_grid.dimensions[0], doc.frame_grid.dimensions[1]),
        };
        if grid.size.x <= 0 || grid.size.y <= 0 {
            anyhow::bail!("Frame grid size must be positive in {}", path.display());
        }
        if grid.dimensions.x <= 0 || grid.dimensions.y <= 0 {
            anyhow::bail!("Frame grid dimensions must be positive in {}", path.display());
        }
        Ok(grid)
    }
}

/// Decoded bitmap plus grid layout for one direction of an object sprite.
#[derive(Debug, Clone)]
pub struct FrameSet {
    /// Decoded sheet bitmap.
    pub image: DynamicImage,
    /// Cell layout of the sheet.
    pub grid: FrameGrid,
}

impl FrameSet {
    /// Pair a decoded bitmap with its grid, checking that the grid fits
    /// inside the bitmap.
    pub fn from_parts(image: DynamicImage, grid: FrameGrid) -> anyhow::Result<Self> {
        let need_w = grid.size.x as u32 * grid.dimensions.x as u32;
        let need_h = grid.size.y as u32 * grid.dimensions.y as u32;
        if need_w > image.width() || need_h > image.height() {
            anyhow::bail!(
                "Frame grid {}x{} cells of {}x{} px exceeds sheet of {}x{} px",
                grid.dimensions.x,
                grid.dimensions.y,
                grid.size.x,
                grid.size.y,
                image.width(),
                image.height(),
            );
        }
        Ok(FrameSet { image, grid })
    }

    /// Decode a sheet and its `.frames` companion (when one sits next to
    /// the image); otherwise the whole bitmap is one frame.
    pub fn load(image_path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let image_path = image_path.as_ref();
        let image = image::open(image_path)
            .with_context(|| format!("Decoding sheet {}", image_path.display()))?;

        let frames_path = image_path.with_extension("frames");
        let grid = if frames_path.exists() {
            FrameGrid::load(&frames_path)?
        } else {
            FrameGrid {
                size: Vec2I::new(image.width() as i32, image.height() as i32),
                dimensions: Vec2I::new(1, 1),
            }
        };

        Self::from_parts(image, grid)
    }

    /// Total frame count in the sheet.
    pub fn frame_count(&self) -> u32 {
        self.grid.dimensions.x as u32 * self.grid.dimensions.y as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_must_fit_inside_sheet() {
        let image = DynamicImage::new_rgba8(32, 16);
        let grid = FrameGrid {
            size: Vec2I::new(16, 16),
            dimensions: Vec2I::new(2, 1),
        };
        assert!(FrameSet::from_parts(image, grid).is_ok());

        let image = DynamicImage::new_rgba8(32, 16);
        let too_big = FrameGrid {
            size: Vec2I::new(16, 16),
            dimensions: Vec2I::new(3, 1),
        };
        assert!(FrameSet::from_parts(image, too_big).is_err());
    }

    #[test]
    fn frame_count_multiplies_dimensions() {
        let set = FrameSet::from_parts(
            DynamicImage::new_rgba8(64, 48),
            FrameGrid {
                size: Vec2I::new(16, 24),
                dimensions: Vec2I::new(4, 2),
            },
        )
        .expect("grid fits");
        assert_eq!(set.frame_count(), 8);
    }
}
