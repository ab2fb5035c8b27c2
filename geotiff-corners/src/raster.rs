use std::{
	ffi::CStr,
	fs::File,
	os::raw::c_int,
	path::{Path, PathBuf},
	ptr,
};

use corners::{CornerError, Gcp, GeoTransform, RasterExtent, RasterSource};
use gdal::{Dataset, DatasetOptions, GdalOpenFlags};
use gdal_sys::GDAL_GCP;
use log::debug;

/// A raster dataset opened through GDAL. The dataset is closed when this is dropped.
pub struct Raster {
	set: Dataset,
}

impl Raster {
	/// Open `path` with GDAL. Anything GDAL can name works, including `/vsi*` virtual paths and subdatasets.
	pub fn open(path: &Path) -> Result<Self, CornerError> {
		let not_valid = || CornerError::NotValid {
			path: PathBuf::from(path),
		};
		let set = match Dataset::open_ex(
			path,
			DatasetOptions {
				open_flags: GdalOpenFlags::GDAL_OF_READONLY | GdalOpenFlags::GDAL_OF_RASTER,
				..Default::default()
			},
		) {
			Ok(x) => x,
			Err(err) => {
				debug!("gdal refused {}: {}", path.display(), err);
				// A file the OS can read but GDAL can't is not a raster.
				return Err(match File::open(path) {
					Ok(_) => not_valid(),
					Err(source) => CornerError::Open {
						path: path.to_path_buf(),
						source,
					},
				});
			},
		};

		let driver = set.driver().long_name();
		if driver.is_empty() {
			return Err(not_valid());
		}
		if set.raster_count() == 0 {
			debug!("{} has no raster bands", path.display());
			return Err(not_valid());
		}

		let (width, height) = set.raster_size();
		debug!(
			"opened {} with {}: {}x{}, {} bands",
			path.display(),
			driver,
			width,
			height,
			set.raster_count()
		);

		Ok(Self { set })
	}
}

impl RasterSource for Raster {
	fn extent(&self) -> RasterExtent {
		let (width, height) = self.set.raster_size();
		RasterExtent { width, height }
	}

	fn geo_transform(&self) -> Option<GeoTransform> { self.set.geo_transform().ok().map(GeoTransform::from) }

	fn gcps(&self) -> Vec<Gcp> {
		let (count, gcps) = unsafe {
			let set = self.set.c_dataset();
			(gdal_sys::GDALGetGCPCount(set), gdal_sys::GDALGetGCPs(set))
		};
		debug!("{} gcps", count);
		if count <= 0 || gcps.is_null() {
			return Vec::new();
		}

		// GDAL owns the array for as long as the dataset is open.
		let gcps = unsafe { std::slice::from_raw_parts(gcps, count as usize) };
		gcps.iter()
			.map(|gcp| Gcp {
				id: (!gcp.pszId.is_null())
					.then(|| unsafe { CStr::from_ptr(gcp.pszId).to_string_lossy().into_owned() }),
				pixel: gcp.dfGCPPixel,
				line: gcp.dfGCPLine,
				x: gcp.dfGCPX,
				y: gcp.dfGCPY,
				z: gcp.dfGCPZ,
			})
			.collect()
	}

	fn fit_gcps(&self, gcps: &[Gcp]) -> Option<GeoTransform> { fit_gcps(gcps) }
}

/// Fit an affine transform to `gcps` with GDAL's least-squares solver.
pub fn fit_gcps(gcps: &[Gcp]) -> Option<GeoTransform> {
	let count = c_int::try_from(gcps.len()).ok()?;
	let gcps: Vec<_> = gcps
		.iter()
		.map(|gcp| GDAL_GCP {
			pszId: ptr::null_mut(),
			pszInfo: ptr::null_mut(),
			dfGCPPixel: gcp.pixel,
			dfGCPLine: gcp.line,
			dfGCPX: gcp.x,
			dfGCPY: gcp.y,
			dfGCPZ: gcp.z,
		})
		.collect();

	let mut transform = [0.0; 6];
	// Approximate fits are accepted; GDAL returns TRUE on success.
	let ok = unsafe { gdal_sys::GDALGCPsToGeoTransform(count, gcps.as_ptr(), transform.as_mut_ptr(), 1) };
	(ok != 0).then(|| GeoTransform::new(transform))
}

#[cfg(test)]
mod tests {
	use super::*;

	fn gcp(pixel: f64, line: f64, x: f64, y: f64) -> Gcp {
		Gcp {
			id: None,
			pixel,
			line,
			x,
			y,
			z: 0.0,
		}
	}

	fn assert_close(actual: [f64; 6], expected: [f64; 6]) {
		for (a, e) in actual.iter().zip(expected.iter()) {
			assert!((a - e).abs() < 1e-9, "{:?} != {:?}", actual, expected);
		}
	}

	#[test]
	fn fits_exact_three_points() {
		let gcps = [
			gcp(0.0, 0.0, 10.0, 20.0),
			gcp(1.0, 0.0, 11.0, 20.0),
			gcp(0.0, 1.0, 10.0, 19.0),
		];
		let transform = fit_gcps(&gcps).expect("fit");
		assert_close(transform.coefficients(), [10.0, 1.0, 0.0, 20.0, 0.0, -1.0]);
	}

	#[test]
	fn fits_scaled_grid() {
		let gcps = [
			gcp(0.0, 0.0, 500000.0, 4100000.0),
			gcp(100.0, 0.0, 503000.0, 4100000.0),
			gcp(100.0, 50.0, 503000.0, 4098500.0),
			gcp(0.0, 50.0, 500000.0, 4098500.0),
			gcp(50.0, 25.0, 501500.0, 4099250.0),
		];
		let transform = fit_gcps(&gcps).expect("fit");
		let [c0, c1, c2, c3, c4, c5] = transform.coefficients();
		assert!((c0 - 500000.0).abs() < 1e-4);
		assert!((c1 - 30.0).abs() < 1e-7);
		assert!(c2.abs() < 1e-7);
		assert!((c3 - 4100000.0).abs() < 1e-4);
		assert!(c4.abs() < 1e-7);
		assert!((c5 + 30.0).abs() < 1e-7);
	}

	#[test]
	fn collinear_points_fail() {
		let gcps = [
			gcp(0.0, 0.0, 10.0, 20.0),
			gcp(1.0, 1.0, 11.0, 19.0),
			gcp(2.0, 2.0, 12.0, 18.0),
		];
		assert!(fit_gcps(&gcps).is_none());
	}

	#[test]
	fn opens_in_memory_vrt() {
		let path = Path::new("/vsimem/raster_tests/north_up.vrt");
		let xml = "<VRTDataset rasterXSize=\"4\" rasterYSize=\"3\">\n  \
		           <GeoTransform>0.0, 1.0, 0.0, 0.0, 0.0, -1.0</GeoTransform>\n  \
		           <VRTRasterBand dataType=\"Byte\" band=\"1\"/>\n</VRTDataset>\n";
		gdal::vsi::create_mem_file(path, xml.as_bytes().to_vec()).unwrap();

		let raster = Raster::open(path);
		gdal::vsi::unlink_mem_file(path).unwrap();
		let raster = raster.unwrap_or_else(|e| panic!("{}", e));
		assert_eq!(
			raster.extent(),
			RasterExtent {
				width: 4,
				height: 3
			}
		);
		assert_eq!(
			raster.geo_transform(),
			Some(GeoTransform::new([0.0, 1.0, 0.0, 0.0, 0.0, -1.0]))
		);
	}

	#[test]
	fn missing_virtual_path_is_an_open_error() {
		let path = Path::new("/vsimem/raster_tests/absent.vrt");
		assert!(matches!(Raster::open(path), Err(CornerError::Open { .. })));
	}

	#[test]
	fn missing_file_is_an_open_error() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("absent.tif");
		assert!(matches!(Raster::open(&path), Err(CornerError::Open { .. })));
	}

	#[test]
	fn text_file_is_not_valid() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("notes.txt");
		std::fs::write(&path, "this is not a raster image\n").unwrap();
		assert!(matches!(Raster::open(&path), Err(CornerError::NotValid { .. })));
	}
}
