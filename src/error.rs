//! Errors reported by the checked helpers.
//!
//! The core algorithms never fail; they trust the caller. The few `checked_*` and `try_*`
//! entry points validate the preconditions first and report violations through [`Error`].

#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Error {
	pub kind: ErrorKind,
	pub message: &'static str,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ErrorKind {
	DivisionByZero,
	DivisionOverflow,
	LengthOutOfRange,
}

impl std::fmt::Debug for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Error").field("kind", &self.kind).field("message", &self.message).finish()
	}
}

impl std::fmt::Display for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{:?}: {}", self.kind, self.message)
	}
}

impl std::error::Error for Error {}

impl Error {
	#[cold]
	pub fn new(kind: ErrorKind, msg: &'static str) -> Self {
		Self { kind, message: msg }
	}

	#[cold]
	pub fn new_division_by_zero(msg: &'static str) -> Self {
		Self::new(ErrorKind::DivisionByZero, msg)
	}

	#[cold]
	pub fn new_division_overflow(msg: &'static str) -> Self {
		Self::new(ErrorKind::DivisionOverflow, msg)
	}

	#[cold]
	pub fn new_length_out_of_range(msg: &'static str) -> Self {
		Self::new(ErrorKind::LengthOutOfRange, msg)
	}
}

#[inline(always)]
pub fn assert(what: bool, err: fn() -> Error) -> Result<(), Error> {
	if what { Ok(()) } else { Err(err()) }
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_assert() {
		assert_eq!(assert(true, || Error::new_division_by_zero("unused")), Ok(()));

		let err = assert(false, || Error::new_division_overflow("Limb::checked_div()"));
		assert_eq!(err.err().map(|e| e.kind), Some(ErrorKind::DivisionOverflow));
	}

	#[test]
	fn test_display() {
		let err = Error::new_length_out_of_range("span::try_first()");
		assert_eq!(err.to_string(), "LengthOutOfRange: span::try_first()");
		assert_eq!(
			format!("{err:?}"),
			"Error { kind: LengthOutOfRange, message: \"span::try_first()\" }"
		);
	}
}
