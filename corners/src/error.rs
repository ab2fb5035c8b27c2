use std::path::PathBuf;

use thiserror::Error;

use crate::MIN_GCPS;

/// Everything that stops corners from being printed. None of these are recoverable.
#[derive(Debug, Error)]
pub enum CornerError {
	#[error("usage: geotiff-corners <file>")]
	Usage,
	#[error("Error opening file: {}", .path.display())]
	Open {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
	#[error("File is not a valid raster: {}", .path.display())]
	NotValid { path: PathBuf },
	#[error("No geotransform or GCPs found")]
	NoGeoreferencing,
	#[error("Not enough GCPs to create a geotransform (found {}, need {})", .found, MIN_GCPS)]
	InsufficientGcps { found: usize },
	#[error("Error creating geotransform from GCPs")]
	TransformFit,
}
