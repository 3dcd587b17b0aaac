/// Decorative line printed above a generated haiku.
pub const DEFAULT_HEADER: &str = "|==|======|==|";

/// Restarts allowed per line before giving up.
pub const DEFAULT_MAX_RESTARTS: usize = 1000;

/// Syllables per line of a classic haiku.
pub const DEFAULT_LINE_SYLLABLES: [usize; 3] = [5, 7, 5];

/// Input parameters for syllable-constrained generation.
///
/// # Responsibilities
/// - Bound the work spent on a single line (`max_restarts`)
/// - Describe the shape of the poem (one syllable target per line)
/// - Hold the optional decorative header
///
/// # Invariants
/// - `line_syllables` is never empty
#[derive(Clone, Debug, PartialEq)]
pub struct HaikuInput {
	/// Number of full restarts allowed for one line.
	pub max_restarts: usize,

	/// Line printed before the poem, if any.
	pub header: Option<String>,

	/// Syllable target of each line, in order.
	line_syllables: Vec<usize>,
}

impl Default for HaikuInput {
	fn default() -> Self {
		Self {
			max_restarts: DEFAULT_MAX_RESTARTS,
			header: Some(DEFAULT_HEADER.to_owned()),
			line_syllables: DEFAULT_LINE_SYLLABLES.to_vec(),
		}
	}
}

impl HaikuInput {
	/// Returns the syllable target of each line.
	pub fn line_syllables(&self) -> &[usize] {
		&self.line_syllables
	}

	/// Replaces the poem shape.
	///
	/// # Errors
	/// Returns an error if `line_syllables` is empty.
	pub fn set_line_syllables(&mut self, line_syllables: Vec<usize>) -> Result<(), String> {
		if line_syllables.is_empty() {
			return Err("A poem needs at least one line".to_owned());
		}
		self.line_syllables = line_syllables;
		Ok(())
	}
}
