//! Rendering geometry for a resolved orientation.
//!
//! Pure arithmetic over the resolved model state and a caller-supplied
//! grid factor (pixel size of one game tile on the editing canvas).

use crate::error::AssetError;
use crate::frames::FrameSet;
use crate::geom::Vec2F;
use crate::orientation::{Direction, ObjectOrientation};

/// Pixel size of one game tile at native zoom.
pub const DEFAULT_GRID_FACTOR: i32 = 8;

/// `DEFAULT_GRID_FACTOR / grid_factor`: the divisor taking asset pixels
/// to canvas pixels. Rejects non-positive factors.
pub fn scale_factor(grid_factor: i32) -> Result<f64, AssetError> {
    if grid_factor <= 0 {
        return Err(AssetError::InvalidGridFactor { value: grid_factor });
    }
    Ok(f64::from(DEFAULT_GRID_FACTOR) / f64::from(grid_factor))
}

impl ObjectOrientation {
    /// Frame set for `direction`: the left set only when facing left and
    /// a left set was resolved, otherwise the right set. The error names
    /// the direction that was selected, not the one queried, so a left
    /// query that fell back to an unresolved right set reports right.
    pub fn frames_for(&self, direction: Direction) -> Result<&FrameSet, AssetError> {
        let selected = match direction {
            Direction::Left if self.left_frames.is_some() => Direction::Left,
            _ => Direction::Right,
        };
        let frames = match selected {
            Direction::Left => self.left_frames.as_ref(),
            Direction::Right => self.right_frames.as_ref(),
        };
        frames.ok_or(AssetError::MissingFrameData { direction: selected })
    }

    /// Rendered frame width in canvas pixels.
    pub fn width(&self, grid_factor: i32, direction: Direction) -> Result<i32, AssetError> {
        let scale = scale_factor(grid_factor)?;
        let frames = self.frames_for(direction)?;
        Ok((f64::from(frames.grid.size.x) / scale).ceil() as i32)
    }

    /// Rendered frame height in canvas pixels.
    pub fn height(&self, grid_factor: i32, direction: Direction) -> Result<i32, AssetError> {
        let scale = scale_factor(grid_factor)?;
        let frames = self.frames_for(direction)?;
        Ok((f64::from(frames.grid.size.y) / scale).ceil() as i32)
    }

    /// Horizontal canvas origin of the frame, from the image position
    /// offset alone.
    pub fn origin_x(&self, grid_factor: i32, _direction: Direction) -> Result<i32, AssetError> {
        let scale = scale_factor(grid_factor)?;
        let pos = self.image_position.value_or(Vec2F::ZERO);
        Ok((pos.x() / scale).floor() as i32)
    }

    /// Vertical canvas origin of the frame: one tile above the bottom of
    /// the rendered frame, shifted by the image position offset.
    pub fn origin_y(&self, grid_factor: i32, direction: Direction) -> Result<i32, AssetError> {
        let scale = scale_factor(grid_factor)?;
        let height = self.height(grid_factor, direction)?;
        let pos = self.image_position.value_or(Vec2F::ZERO);
        Ok(-height + grid_factor - (pos.y() / scale).floor() as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Field;
    use crate::frames::FrameGrid;
    use crate::geom::Vec2I;
    use image::DynamicImage;

    fn orientation_with_frames(size: Vec2I) -> ObjectOrientation {
        let sheet = DynamicImage::new_rgba8(size.x as u32, size.y as u32);
        let set = FrameSet::from_parts(
            sheet,
            FrameGrid {
                size,
                dimensions: Vec2I::new(1, 1),
            },
        )
        .expect("grid fits");

        let mut orientation = ObjectOrientation::default();
        orientation.resolve_frames(Direction::Right, set);
        orientation
    }

    #[test]
    fn native_zoom_maps_pixels_one_to_one() {
        let orientation = orientation_with_frames(Vec2I::new(64, 32));

        assert_eq!(orientation.width(8, Direction::Right).unwrap(), 64);
        assert_eq!(orientation.height(8, Direction::Right).unwrap(), 32);
        assert_eq!(orientation.origin_x(8, Direction::Right).unwrap(), 0);
        // -height + grid_factor - 0
        assert_eq!(orientation.origin_y(8, Direction::Right).unwrap(), -24);
    }

    #[test]
    fn one_tile_tall_frame_sits_on_the_baseline() {
        let orientation = orientation_with_frames(Vec2I::new(64, 8));
        assert_eq!(orientation.origin_y(8, Direction::Right).unwrap(), 0);
    }

    #[test]
    fn doubled_grid_factor_doubles_canvas_size() {
        let orientation = orientation_with_frames(Vec2I::new(64, 32));

        assert_eq!(orientation.width(16, Direction::Right).unwrap(), 128);
        assert_eq!(orientation.height(16, Direction::Right).unwrap(), 64);
    }

    #[test]
    fn odd_scales_round_up_size_and_down_origin() {
        let mut orientation = orientation_with_frames(Vec2I::new(10, 10));
        orientation.image_position.set(crate::geom::Vec2F::new(5.0, 5.0));

        // scale = 8 / 3
        assert_eq!(orientation.width(3, Direction::Right).unwrap(), 4);
        assert_eq!(orientation.origin_x(3, Direction::Right).unwrap(), 1);
    }

    #[test]
    fn image_position_shifts_the_origin() {
        let mut orientation = orientation_with_frames(Vec2I::new(16, 16));
        orientation.image_position.set(crate::geom::Vec2F::new(-4.0, 8.0));

        assert_eq!(orientation.origin_x(8, Direction::Right).unwrap(), -4);
        assert_eq!(orientation.origin_y(8, Direction::Right).unwrap(), -16 + 8 - 8);
    }

    #[test]
    fn non_positive_grid_factor_is_rejected() {
        let orientation = orientation_with_frames(Vec2I::new(16, 16));

        for bad in [0, -8] {
            assert!(matches!(
                orientation.width(bad, Direction::Right),
                Err(AssetError::InvalidGridFactor { value }) if value == bad
            ));
            assert!(matches!(
                orientation.origin_y(bad, Direction::Right),
                Err(AssetError::InvalidGridFactor { .. })
            ));
        }
    }

    #[test]
    fn geometry_before_frame_resolution_fails() {
        let orientation = ObjectOrientation::default();
        assert!(matches!(
            orientation.width(8, Direction::Right),
            Err(AssetError::MissingFrameData { direction: Direction::Right })
        ));
        // A left query with no left set selects (and reports) right.
        assert!(matches!(
            orientation.height(8, Direction::Left),
            Err(AssetError::MissingFrameData { direction: Direction::Right })
        ));
    }

    #[test]
    fn missing_frame_error_names_the_selected_direction() {
        let sheet = DynamicImage::new_rgba8(16, 8);
        let mut orientation = ObjectOrientation::default();
        orientation.resolve_frames(
            Direction::Left,
            FrameSet::from_parts(
                sheet,
                FrameGrid {
                    size: Vec2I::new(16, 8),
                    dimensions: Vec2I::new(1, 1),
                },
            )
            .expect("grid fits"),
        );

        // Left resolves to the left set; right selects the missing
        // right set and says so.
        assert_eq!(orientation.width(8, Direction::Left).unwrap(), 16);
        assert!(matches!(
            orientation.width(8, Direction::Right),
            Err(AssetError::MissingFrameData { direction: Direction::Right })
        ));
    }

    #[test]
    fn left_direction_falls_back_to_right_frames() {
        let orientation = orientation_with_frames(Vec2I::new(24, 8));
        // No left set resolved: left queries use the right set.
        assert_eq!(orientation.width(8, Direction::Left).unwrap(), 24);

        let mut both = orientation.clone();
        let left_sheet = DynamicImage::new_rgba8(48, 8);
        both.resolve_frames(
            Direction::Left,
            FrameSet::from_parts(
                left_sheet,
                FrameGrid {
                    size: Vec2I::new(48, 8),
                    dimensions: Vec2I::new(1, 1),
                },
            )
            .expect("grid fits"),
        );
        assert_eq!(both.width(8, Direction::Left).unwrap(), 48);
        assert_eq!(both.width(8, Direction::Right).unwrap(), 24);
    }

    #[test]
    fn default_field_ignored_in_origin_when_absent() {
        let orientation = orientation_with_frames(Vec2I::new(16, 16));
        assert!(orientation.image_position.is_absent());
        assert_eq!(orientation.origin_x(8, Direction::Right).unwrap(), 0);

        let mut resolved = orientation.clone();
        resolved.resolve_defaults();
        assert_eq!(resolved.image_position, Field::Defaulted(crate::geom::Vec2F::ZERO));
        assert_eq!(
            resolved.origin_x(8, Direction::Right).unwrap(),
            orientation.origin_x(8, Direction::Right).unwrap()
        );
    }
}
