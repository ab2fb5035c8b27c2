use log::{debug, warn};

use crate::{compute_corners, CornerError, CornerSet, GeoTransform, RasterExtent};

/// The fewest ground control points an affine transform can be fitted to.
pub const MIN_GCPS: usize = 3;

/// A known correspondence between a pixel position and a georeferenced position.
#[derive(Clone, Debug, PartialEq)]
pub struct Gcp {
	pub id: Option<String>,
	pub pixel: f64,
	pub line: f64,
	pub x: f64,
	pub y: f64,
	pub z: f64,
}

/// A raster dataset that can be georeferenced.
pub trait RasterSource {
	fn extent(&self) -> RasterExtent;

	/// The transform stored in the dataset, if it has one.
	fn geo_transform(&self) -> Option<GeoTransform>;

	fn gcps(&self) -> Vec<Gcp>;

	/// Least-squares fit of an affine transform to `gcps`. `None` if the fit fails.
	fn fit_gcps(&self, gcps: &[Gcp]) -> Option<GeoTransform>;
}

/// Where the transform used for a raster came from.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Georeferencing {
	Transform(GeoTransform),
	Gcps { transform: GeoTransform, count: usize },
}

impl Georeferencing {
	pub fn transform(&self) -> GeoTransform {
		match *self {
			Self::Transform(transform) => transform,
			Self::Gcps { transform, .. } => transform,
		}
	}
}

/// Pick the transform for `source`: the stored one if present, otherwise one fitted to its GCPs.
pub fn resolve(source: &impl RasterSource) -> Result<Georeferencing, CornerError> {
	if let Some(transform) = source.geo_transform() {
		debug!("using stored geotransform {:?}", transform.coefficients());
		return Ok(Georeferencing::Transform(transform));
	}
	warn!("No geotransform found");

	let gcps = source.gcps();
	match gcps.len() {
		0 => Err(CornerError::NoGeoreferencing),
		found if found < MIN_GCPS => Err(CornerError::InsufficientGcps { found }),
		count => {
			for gcp in gcps.iter() {
				debug!(
					"gcp {}: ({}, {}) -> ({}, {}, {})",
					gcp.id.as_deref().unwrap_or("?"),
					gcp.pixel,
					gcp.line,
					gcp.x,
					gcp.y,
					gcp.z
				);
			}
			let transform = source.fit_gcps(&gcps).ok_or(CornerError::TransformFit)?;
			debug!("fitted geotransform {:?} from {} gcps", transform.coefficients(), count);
			Ok(Georeferencing::Gcps { transform, count })
		},
	}
}

pub fn corners_of(source: &impl RasterSource) -> Result<CornerSet, CornerError> {
	let georef = resolve(source)?;
	Ok(compute_corners(&georef.transform(), source.extent()))
}
