use std::fmt::Display;

use crate::{Coord, GeoTransform};

/// Offset from a raster edge to the center of the outermost pixel.
pub const PIXEL_CENTER: f64 = 0.5;

/// The size of a raster, in pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RasterExtent {
	pub width: usize,
	pub height: usize,
}

/// The georeferenced positions of a raster's four corner pixel centers.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CornerSet {
	pub upper_left: Coord,
	pub upper_right: Coord,
	pub lower_right: Coord,
	pub lower_left: Coord,
}

impl CornerSet {
	pub fn new(transform: &GeoTransform, extent: RasterExtent) -> Self {
		let left = PIXEL_CENTER;
		let top = PIXEL_CENTER;
		let right = extent.width as f64 - PIXEL_CENTER;
		let bottom = extent.height as f64 - PIXEL_CENTER;

		Self {
			upper_left: transform.apply(left, top),
			upper_right: transform.apply(right, top),
			lower_right: transform.apply(right, bottom),
			lower_left: transform.apply(left, bottom),
		}
	}

	/// The corners in clockwise order, starting from the upper left.
	pub fn iter(&self) -> impl Iterator<Item = Coord> {
		[self.upper_left, self.upper_right, self.lower_right, self.lower_left].into_iter()
	}
}

/// One line per corner, clockwise from the upper left.
impl Display for CornerSet {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		for corner in self.iter() {
			writeln!(f, "{}", corner)?;
		}
		Ok(())
	}
}

pub fn compute_corners(transform: &GeoTransform, extent: RasterExtent) -> CornerSet {
	CornerSet::new(transform, extent)
}
