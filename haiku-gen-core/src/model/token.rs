use std::fmt::{self, Debug, Display};
use std::hash::Hash;

/// A unit of a training sequence: a character or a word.
///
/// The trait fixes how a generated sequence is joined back into text and
/// how padding symbols are rendered when a context is printed.
pub trait Token: Clone + Eq + Ord + Hash + Debug + Display {
	/// Separator placed between tokens when joining a sequence.
	const SEPARATOR: &'static str;
	/// Printed form of the start padding symbol.
	const START_MARK: &'static str;
	/// Printed form of the end padding symbol.
	const END_MARK: &'static str;

	/// Joins a token sequence into a single string.
	fn join(tokens: &[Self]) -> String {
		tokens
			.iter()
			.map(ToString::to_string)
			.collect::<Vec<_>>()
			.join(Self::SEPARATOR)
	}
}

impl Token for char {
	const SEPARATOR: &'static str = "";
	const START_MARK: &'static str = "^";
	const END_MARK: &'static str = "$";

	fn join(tokens: &[Self]) -> String {
		tokens.iter().collect()
	}
}

impl Token for String {
	const SEPARATOR: &'static str = " ";
	const START_MARK: &'static str = "<s>";
	const END_MARK: &'static str = "</s>";
}

/// A token of a padded sequence.
///
/// Padding symbols are separate variants, so they can never be mistaken
/// for a token of the corpus.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Symbol<T> {
	Start,
	Token(T),
	End,
}

impl<T: Token> Display for Symbol<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Symbol::Start => f.write_str(T::START_MARK),
			Symbol::Token(token) => write!(f, "{token}"),
			Symbol::End => f.write_str(T::END_MARK),
		}
	}
}

/// Automaton state: the last `n - 1` symbols.
pub type Context<T> = Vec<Symbol<T>>;

/// Surrounds a sequence with `n - 1` start symbols and one end symbol.
pub fn pad<T: Token>(sequence: &[T], n: usize) -> Vec<Symbol<T>> {
	let mut padded = Vec::with_capacity(sequence.len() + n);
	padded.extend(std::iter::repeat_n(Symbol::Start, n.saturating_sub(1)));
	padded.extend(sequence.iter().cloned().map(Symbol::Token));
	padded.push(Symbol::End);
	padded
}

/// Renders a context for log and error messages, e.g. `(^, c)`.
pub fn display_context<T: Token>(context: &[Symbol<T>]) -> String {
	let symbols: Vec<String> = context.iter().map(ToString::to_string).collect();
	format!("({})", symbols.join(", "))
}
