use std::path::{Path, PathBuf};

use clap::{ErrorKind, Parser};
use corners::{corners_of, CornerError, CornerSet};
use log::debug;

use crate::raster::Raster;

mod raster;

#[derive(Parser)]
#[clap(name = "geotiff-corners", version)]
/// Print the corner coordinates of a georeferenced raster.
///
/// Corners are printed at pixel centers, one `x y` pair per line: upper left, upper right, lower right, lower left.
pub struct Options {
	/// Path to the raster file, or any other name GDAL can open.
	#[clap(allow_hyphen_values = true)]
	file: PathBuf,
}

fn run(file: &Path) -> Result<CornerSet, CornerError> {
	let raster = Raster::open(file)?;
	corners_of(&raster)
}

fn main() {
	env_logger::init();

	let opts = match Options::try_parse() {
		Ok(x) => x,
		Err(e) => match e.kind() {
			ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
			_ => {
				debug!("{}", e);
				println!("{}", CornerError::Usage);
				std::process::exit(1);
			},
		},
	};

	match run(&opts.file) {
		Ok(corners) => print!("{}", corners),
		Err(e) => {
			println!("{}", e);
			std::process::exit(1);
		},
	}
}
