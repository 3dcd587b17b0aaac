//! Driver settings read from environment variables.
//!
//! Every variable is optional; unset ones fall back to [`Config::default`].

use std::path::PathBuf;

use haiku_gen_core::io::data_folder;
use haiku_gen_core::model::haiku_input::DEFAULT_MAX_RESTARTS;
use thiserror::Error;

const ENV_PREFIX: &str = "HAIKU_GEN_";

const ENV_DATA: &str = "DATA";
const ENV_ORDER: &str = "ORDER";
const ENV_SEED: &str = "SEED";
const ENV_MAX_RESTARTS: &str = "MAX_RESTARTS";
const ENV_SYLLABLES: &str = "SYLLABLES";

const DEFAULT_DATA: &str = "./data";
const DEFAULT_ORDER: usize = 2;
const DEFAULT_SYLLABLES: &str = "syllables.txt";

/// Errors produced while reading the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// A variable is set but is not valid Unicode.
	#[error("env var {key}: {message}")]
	EnvVar { key: String, message: String },

	/// A variable is set but cannot be parsed into the expected type.
	#[error("env var {key}={value:?}: {message}")]
	Parse { key: String, value: String, message: String },
}

/// Settings of the seasonal haiku driver.
#[derive(Clone, Debug)]
pub struct Config {
	/// Folder holding the training files and the syllable listing.
	pub data: PathBuf,
	/// Order of the n-gram models.
	pub order: usize,
	/// Seed of the random source; `None` draws one from the OS.
	pub seed: Option<u64>,
	/// Restart budget of each haiku line.
	pub max_restarts: usize,
	/// `word  count` syllable listing.
	pub syllables: PathBuf,
}

impl Default for Config {
	fn default() -> Self {
		let data = data_folder(DEFAULT_DATA);
		let syllables = data.join(DEFAULT_SYLLABLES);
		Self {
			data,
			order: DEFAULT_ORDER,
			seed: None,
			max_restarts: DEFAULT_MAX_RESTARTS,
			syllables,
		}
	}
}

fn env_key(suffix: &str) -> String {
	format!("{ENV_PREFIX}{suffix}")
}

fn env_string(key: &str) -> Result<Option<String>, ConfigError> {
	match std::env::var(key) {
		Ok(s) => Ok(Some(s)),
		Err(std::env::VarError::NotPresent) => Ok(None),
		Err(e) => Err(ConfigError::EnvVar { key: key.to_owned(), message: e.to_string() }),
	}
}

fn env_parsed<T>(key: &str) -> Result<Option<T>, ConfigError>
where
	T: std::str::FromStr,
	T::Err: std::fmt::Display,
{
	let Some(value) = env_string(key)? else {
		return Ok(None);
	};
	match value.parse() {
		Ok(parsed) => Ok(Some(parsed)),
		Err(e) => Err(ConfigError::Parse {
			key: key.to_owned(),
			message: e.to_string(),
			value,
		}),
	}
}

/// Builds the configuration from `HAIKU_GEN_*` variables.
///
/// The syllable listing defaults to `syllables.txt` inside the data folder,
/// wherever that folder is.
pub fn from_env() -> Result<Config, ConfigError> {
	let default = Config::default();

	let data = env_string(&env_key(ENV_DATA))?
		.map(|s| data_folder(&s))
		.unwrap_or(default.data);
	let syllables = env_string(&env_key(ENV_SYLLABLES))?
		.map(PathBuf::from)
		.unwrap_or_else(|| data.join(DEFAULT_SYLLABLES));

	Ok(Config {
		order: env_parsed(&env_key(ENV_ORDER))?.unwrap_or(default.order),
		seed: env_parsed(&env_key(ENV_SEED))?,
		max_restarts: env_parsed(&env_key(ENV_MAX_RESTARTS))?.unwrap_or(default.max_restarts),
		data,
		syllables,
	})
}
