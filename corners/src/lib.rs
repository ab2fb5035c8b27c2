//! Corner coordinates of georeferenced rasters.
//!
//! A raster's corners are computed at pixel centers, half a pixel in from each edge, by applying the dataset's
//! affine transform. When a dataset carries no transform, one is fitted to its ground control points instead.

pub use crate::{
	corner::{compute_corners, CornerSet, RasterExtent, PIXEL_CENTER},
	error::CornerError,
	source::{corners_of, resolve, Gcp, Georeferencing, RasterSource, MIN_GCPS},
	transform::{Coord, GeoTransform},
};

mod corner;
mod error;
mod source;
mod transform;
