//! Limb-level kernel for arbitrary precision integers.
//!
//! Numbers are stored in caller-owned limb views, least significant limb first, and read as
//! unsigned or as two's complement depending on the [`SpanOption`] passed to each call. Nothing
//! here allocates or owns a number.
//!
//! - [`limb`]: single-limb arithmetic with explicit carries
//! - [`span`]: views, slicing and sign extension
//! - [`option`]: per-call configuration flags
//! - [`bitwise`]: logical operators over views of any lengths
//! - [`compare`]: promoted and infinite-precision comparison
//
#![allow(non_snake_case)]

pub mod bitwise;
pub mod compare;
pub mod error;
pub mod limb;
pub mod option;
pub mod span;

pub use bitwise::{
	BinaryOp, UnaryOp, apply_binary, apply_binary_inplace, apply_unary, apply_unary_inplace,
	bitand, bitand_inplace, bitgeq, bitgeq_inplace, bitgreater, bitgreater_inplace, bitleq,
	bitleq_inplace, bitless, bitless_inplace, bitnand, bitnand_inplace, bitnor, bitnor_inplace,
	bitnot, bitnot_inplace, bitor, bitor_inplace, bitxnor, bitxnor_inplace, bitxor, bitxor_inplace,
};
pub use compare::{compare_infinite, compare_promoted};
pub use error::{Error, ErrorKind};
pub use limb::Limb;
pub use option::{BasicOption, SpanOption};
pub use span::{Extent, LimbSpan, LimbSpanMut};

#[macro_export]
macro_rules! testvec {
	($($x:expr),* $(,)?) => {{
		let v: Vec<$crate::limb::Limb> = vec![$($crate::limb::Limb($x)),*];
		v
	}};
}

/// Sends `log` records of this crate to stderr. Safe to call from every test.
#[cfg(test)]
pub(crate) fn init_test_logging() {
	// Only the first call installs the logger, later ones return an error.
	let _ = stderrlog::new().module(module_path!()).verbosity(4usize).init();
}
