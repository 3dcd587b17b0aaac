use std::path::Path;

use haiku_gen_core::corpus::open_as_haikus;
use haiku_gen_core::model::haiku_input::DEFAULT_HEADER;
use haiku_gen_core::{HaikuInput, ModelError, NGramModel, SyllableDictionary};
use log::warn;
use rand::SeedableRng;
use rand::rngs::StdRng;

mod config;

const SEASONS: [&str; 4] = ["Autumn", "Winter", "Spring", "Summer"];

/// Trains the word model of one season, one training sequence per haiku.
///
/// Returns `None` (after a warning) when the file is missing or holds no
/// haiku, so the remaining seasons still run.
fn train_season(season: &str, path: &Path, order: usize) -> Result<Option<NGramModel<String>>, ModelError> {
	if !path.is_file() {
		warn!("skipping {season}: {} not found", path.display());
		return Ok(None);
	}

	let corpus = open_as_haikus(path)?;
	match NGramModel::new(&corpus, order, 0.0) {
		Ok(model) => Ok(Some(model)),
		Err(ModelError::EmptyCorpus) => {
			warn!("skipping {season}: {} holds no haiku", path.display());
			Ok(None)
		}
		Err(e) => Err(e),
	}
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
	env_logger::init();

	// HAIKU_GEN_DATA, HAIKU_GEN_ORDER, HAIKU_GEN_SEED, HAIKU_GEN_MAX_RESTARTS, HAIKU_GEN_SYLLABLES
	let config = config::from_env()?;

	let mut rng = match config.seed {
		Some(seed) => StdRng::seed_from_u64(seed),
		None => StdRng::from_os_rng(),
	};

	// Unknown words count as one syllable, so a missing listing still works
	let syllables = if config.syllables.is_file() {
		SyllableDictionary::load(&config.syllables)?
	} else {
		warn!("{} not found, every word counts as one syllable", config.syllables.display());
		SyllableDictionary::new()
	};

	let mut input = HaikuInput::default();
	input.max_restarts = config.max_restarts;

	println!("The following haikus represent the four seasons.");
	for season in SEASONS {
		let path = config.data.join(format!("{season} Training.txt"));
		let Some(model) = train_season(season, &path, config.order)? else {
			continue;
		};

		println!("{DEFAULT_HEADER}");
		println!("|==|{season}|==|");
		println!("{}", model.generate_haiku(&syllables, &input, &mut rng)?);
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::fs;

	fn season_file(name: &str, contents: &str) -> std::path::PathBuf {
		let dir = std::env::temp_dir().join(format!("haiku-gen-exemple-{}", std::process::id()));
		fs::create_dir_all(&dir).unwrap();
		let path = dir.join(name);
		fs::write(&path, contents).unwrap();
		path
	}

	#[test]
	fn empty_season_is_skipped() {
		let path = season_file("Winter Training.txt", "\n\n");
		assert!(train_season("Winter", &path, 2).unwrap().is_none());
	}

	#[test]
	fn missing_season_is_skipped() {
		let path = std::env::temp_dir().join("haiku-gen-exemple-no-such-season.txt");
		assert!(train_season("Summer", &path, 2).unwrap().is_none());
	}

	#[test]
	fn filled_season_trains_a_model() {
		let path = season_file("Autumn Training.txt", "An old silent pond\nA frog jumps into the pond\nSplash! Silence again.\n");
		let model = train_season("Autumn", &path, 2).unwrap().unwrap();
		assert_eq!(model.order(), 2);
	}

	#[test]
	fn bad_order_still_fails() {
		let path = season_file("Spring Training.txt", "spring rain\n");
		assert!(matches!(train_season("Spring", &path, 1), Err(ModelError::InvalidOrder(1))));
	}
}
