use std::fs::File;
use std::io::Read;
use std::path::{Component, Path, PathBuf};
use std::{env, io};

/// Extension of the postcard cache written next to a syllable listing.
pub(crate) const CACHE_EXTENSION: &str = "bin";

/// Reads a whole text file into memory.
pub(crate) fn read_to_string<P: AsRef<Path>>(filename: P) -> io::Result<String> {
	let mut contents = String::new();
	File::open(filename)?.read_to_string(&mut contents)?;
	Ok(contents)
}

/// Path of the binary cache kept beside a syllable listing:
/// `data/syllables.txt` is cached as `data/syllables.bin`.
pub(crate) fn cache_path<P: AsRef<Path>>(listing: P) -> io::Result<PathBuf> {
	let listing = listing.as_ref();
	if listing.file_stem().is_none() {
		return Err(io::Error::new(
			io::ErrorKind::InvalidInput,
			format!("{} does not name a syllable listing", listing.display()),
		));
	}
	Ok(listing.with_extension(CACHE_EXTENSION))
}

/// Resolves the folder holding the season training files.
///
/// Relative folders are anchored at the working directory, with `.`
/// components dropped: `./data` becomes `<cwd>/data`. Absolute folders
/// are kept, and so is a relative one when the working directory cannot
/// be read.
pub fn data_folder(folder: &str) -> PathBuf {
	let folder = Path::new(folder);
	if folder.is_absolute() {
		return folder.to_path_buf();
	}
	let Ok(cwd) = env::current_dir() else {
		return folder.to_path_buf();
	};

	let relative: PathBuf = folder
		.components()
		.filter(|component| *component != Component::CurDir)
		.collect();
	if relative.as_os_str().is_empty() {
		cwd
	} else {
		cwd.join(relative)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn cache_sits_beside_the_listing() {
		let path = cache_path("data/syllables.txt").unwrap();
		assert_eq!(path, PathBuf::from("data/syllables.bin"));
		assert_eq!(cache_path("syllables").unwrap(), PathBuf::from("syllables.bin"));
	}

	#[test]
	fn cache_needs_a_listing_name() {
		assert!(cache_path("/").is_err());
	}

	#[test]
	fn relative_folders_hang_off_the_working_directory() {
		let cwd = env::current_dir().unwrap();
		assert_eq!(data_folder("."), cwd);
		assert_eq!(data_folder("./data"), cwd.join("data"));
		assert_eq!(data_folder("data/seasons"), cwd.join("data").join("seasons"));
	}

	#[test]
	fn absolute_folders_are_kept() {
		assert_eq!(data_folder("/srv/haiku"), PathBuf::from("/srv/haiku"));
	}
}
