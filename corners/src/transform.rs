use std::fmt::Display;

/// A point in the raster's georeferenced space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Coord {
	pub x: f64,
	pub y: f64,
}

impl Display for Coord {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result { write!(f, "{:.15} {:.15}", self.x, self.y) }
}

/// An affine mapping from pixel space to georeferenced space, in GDAL's coefficient order.
///
/// * `x = c[0] + pixel * c[1] + line * c[2]`
/// * `y = c[3] + pixel * c[4] + line * c[5]`
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GeoTransform([f64; 6]);

impl GeoTransform {
	pub const fn new(coefficients: [f64; 6]) -> Self { Self(coefficients) }

	pub fn coefficients(&self) -> [f64; 6] { self.0 }

	/// Map a (possibly fractional) pixel position to georeferenced coordinates.
	pub fn apply(&self, pixel: f64, line: f64) -> Coord {
		let c = &self.0;
		Coord {
			x: c[0] + pixel * c[1] + line * c[2],
			y: c[3] + pixel * c[4] + line * c[5],
		}
	}
}

impl From<[f64; 6]> for GeoTransform {
	fn from(coefficients: [f64; 6]) -> Self { Self(coefficients) }
}

impl From<GeoTransform> for [f64; 6] {
	fn from(transform: GeoTransform) -> Self { transform.0 }
}
