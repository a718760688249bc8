//! Three-way comparison of the numbers stored in two limb views.
//!
//! [`compare_promoted()`] follows the usual integer promotion rules: when the longer operand is
//! unsigned, the shorter one is sign extended and then read as unsigned too, so `-1` compares as
//! a huge positive number. [`compare_infinite()`] compares the true values of the infinitely
//! extended operands.

use crate::limb::Limb;
use crate::option::SpanOption;
use crate::span::{Extent, LimbSpan};
use std::cmp::Ordering;

/// Preconditions:
///     l.len() >= r.len()
fn promoted(l: &[Limb], l_signed: bool, r: &[Limb], r_signed: bool) -> Ordering {
	debug_assert!(l.len() >= r.len());

	let mut i = l.len();
	if i == 0 {
		return Ordering::Equal;
	}

	if l.len() > r.len() {
		let r_ext = crate::span::sign_extension(r, r_signed);

		// Only the top limb carries the sign
		i -= 1;
		if l[i] != r_ext {
			return if l_signed { l[i].signed_cmp(r_ext) } else { l[i].cmp(&r_ext) };
		}

		while i > r.len() {
			i -= 1;
			if l[i] != r_ext {
				return l[i].cmp(&r_ext);
			}
		}
	} else if l_signed && r_signed {
		i -= 1;
		if l[i] != r[i] {
			return l[i].signed_cmp(r[i]);
		}
	}

	while i > 0 {
		i -= 1;
		if l[i] != r[i] {
			return l[i].cmp(&r[i]);
		}
	}

	Ordering::Equal
}

/// Preconditions:
///     l.len() >= r.len()
///
/// Promotion only differs from the true ordering when a negative number is read as unsigned,
/// which needs the operands to disagree on signedness. In that case the signs decide first.
/// `check_signs` is false when the extents already show that promotion keeps the sign.
fn infinite(l: &[Limb], l_signed: bool, r: &[Limb], r_signed: bool, check_signs: bool) -> Ordering {
	debug_assert!(l.len() >= r.len());

	if l_signed != r_signed && check_signs {
		let l_ext = crate::span::sign_extension(l, l_signed);
		let r_ext = crate::span::sign_extension(r, r_signed);
		if l_ext != r_ext {
			return l_ext.signed_cmp(r_ext);
		}
	}

	promoted(l, l_signed, r, r_signed)
}

/// Whether the upfront sign check in `infinite()` can matter for operands of these extents.
///
/// With `l` statically at least as long as `r`, promotion is exact unless `r` is signed. The
/// mirror case holds for `r` statically at least as long as `l`.
const fn needs_sign_check(l: Extent, l_signed: bool, r: Extent, r_signed: bool) -> bool {
	match (l, r) {
		(Extent::Fixed(ln), Extent::Fixed(rn)) => (ln >= rn && r_signed) || (rn >= ln && l_signed),
		_ => true,
	}
}

/// Compares `l` and `r` under the promotion rules.
///
/// Reads `LEFT_SIGNED` and `RIGHT_SIGNED`. The operands may come in either length order.
pub fn compare_promoted<L, R>(opt: SpanOption, l: &L, r: &R) -> Ordering
where
	L: LimbSpan + ?Sized,
	R: LimbSpan + ?Sized,
{
	log::trace!(
		"compare::compare_promoted(): l = {}, r = {}, opt = {:?}",
		l.len(),
		r.len(),
		opt.flag_names()
	);

	if l.len() >= r.len() {
		promoted(l.limbs(), opt.left_signed(), r.limbs(), opt.right_signed())
	} else {
		let opt = opt.swap_sides();
		promoted(r.limbs(), opt.left_signed(), l.limbs(), opt.right_signed()).reverse()
	}
}

/// Compares the values of `l` and `r` as if both were extended to infinite length.
///
/// Reads `LEFT_SIGNED` and `RIGHT_SIGNED`. The operands may come in either length order.
pub fn compare_infinite<L, R>(opt: SpanOption, l: &L, r: &R) -> Ordering
where
	L: LimbSpan + ?Sized,
	R: LimbSpan + ?Sized,
{
	log::trace!(
		"compare::compare_infinite(): l = {}, r = {}, opt = {:?}",
		l.len(),
		r.len(),
		opt.flag_names()
	);

	let (l_signed, r_signed) = (opt.left_signed(), opt.right_signed());
	let check_signs = needs_sign_check(L::EXTENT, l_signed, R::EXTENT, r_signed);
	if l.len() >= r.len() {
		infinite(l.limbs(), l_signed, r.limbs(), r_signed, check_signs)
	} else {
		let opt = opt.swap_sides();
		infinite(r.limbs(), opt.left_signed(), l.limbs(), opt.right_signed(), check_signs).reverse()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testvec;
	use proptest::prelude::*;

	const MAX: u64 = u64::MAX;
	const TOP: u64 = 1 << 63;

	const SIGNED: SpanOption = SpanOption::LEFT_SIGNED.union(SpanOption::RIGHT_SIGNED);

	/// Value of a short view as `i128`, extended per its signedness.
	fn value(a: &[Limb], signed: bool) -> i128 {
		assert!(a.len() <= 1);
		match a.first() {
			None => 0,
			Some(&x) if signed => x.as_signed() as i128,
			Some(&x) => x.0 as i128,
		}
	}

	fn options() -> [SpanOption; 4] {
		[SpanOption::empty(), SpanOption::LEFT_SIGNED, SpanOption::RIGHT_SIGNED, SIGNED]
	}

	#[test]
	fn test_promoted_vs_infinite() {
		crate::init_test_logging();

		let l = testvec![MAX];
		let r = testvec![0, 1];
		let opt = SpanOption::LEFT_SIGNED;

		// -1 promoted to unsigned is larger than 2**64
		assert_eq!(compare_promoted(opt, l.as_slice(), r.as_slice()), Ordering::Greater);
		assert_eq!(compare_infinite(opt, l.as_slice(), r.as_slice()), Ordering::Less);

		assert_eq!(compare_promoted(opt.swap_sides(), r.as_slice(), l.as_slice()), Ordering::Less);
		assert_eq!(compare_infinite(opt.swap_sides(), r.as_slice(), l.as_slice()), Ordering::Greater);
	}

	#[test]
	fn test_equal() {
		let empty = testvec![];
		for opt in options() {
			assert_eq!(compare_promoted(opt, empty.as_slice(), empty.as_slice()), Ordering::Equal);
			assert_eq!(compare_infinite(opt, empty.as_slice(), empty.as_slice()), Ordering::Equal);
		}

		// zeros compare equal to the empty view
		let zeros = testvec![0, 0, 0];
		for opt in options() {
			assert_eq!(compare_infinite(opt, zeros.as_slice(), empty.as_slice()), Ordering::Equal);
			assert_eq!(compare_promoted(opt, empty.as_slice(), zeros.as_slice()), Ordering::Equal);
		}

		// -1 in one limb and in three limbs
		let a = testvec![MAX];
		let b = testvec![MAX, MAX, MAX];
		assert_eq!(compare_infinite(SIGNED, a.as_slice(), b.as_slice()), Ordering::Equal);
		assert_eq!(compare_promoted(SIGNED, a.as_slice(), b.as_slice()), Ordering::Equal);
		assert_eq!(compare_infinite(SpanOption::LEFT_SIGNED, a.as_slice(), b.as_slice()), Ordering::Less);
	}

	#[test]
	fn test_multi_limb() {
		let opt = SpanOption::empty();
		let a = testvec![5, 1];
		let b = testvec![7, 0, 0];
		assert_eq!(compare_promoted(opt, a.as_slice(), b.as_slice()), Ordering::Greater);

		let b = testvec![7, 1];
		assert_eq!(compare_promoted(opt, a.as_slice(), b.as_slice()), Ordering::Less);

		// only the top limb is signed
		let a = testvec![TOP, 0];
		let b = testvec![1, 0];
		assert_eq!(compare_infinite(SIGNED, a.as_slice(), b.as_slice()), Ordering::Greater);

		let a = testvec![0, TOP];
		let b = testvec![0, 1];
		assert_eq!(compare_infinite(SIGNED, a.as_slice(), b.as_slice()), Ordering::Less);
		assert_eq!(compare_promoted(opt, a.as_slice(), b.as_slice()), Ordering::Greater);

		// longer signed operand against a shorter unsigned one
		let a = testvec![0, MAX];
		let b = testvec![MAX];
		let opt = SpanOption::LEFT_SIGNED;
		assert_eq!(compare_promoted(opt, a.as_slice(), b.as_slice()), Ordering::Less);
		assert_eq!(compare_infinite(opt, a.as_slice(), b.as_slice()), Ordering::Less);
	}

	#[test]
	fn test_fixed_extents() {
		let a = [Limb(MAX)];
		let b = [Limb(MAX), Limb(0)];

		// -1 against 2**64 - 1
		assert_eq!(compare_infinite(SpanOption::LEFT_SIGNED, &a, &b), Ordering::Less);
		assert_eq!(compare_infinite(SpanOption::RIGHT_SIGNED, &b, &a), Ordering::Greater);
		assert_eq!(compare_promoted(SpanOption::LEFT_SIGNED, &a, &b), Ordering::Greater);

		// same length, left signed and negative
		let c = [Limb(1)];
		assert_eq!(compare_infinite(SpanOption::LEFT_SIGNED, &a, &c), Ordering::Less);
		assert_eq!(compare_promoted(SpanOption::LEFT_SIGNED, &a, &c), Ordering::Greater);

		assert!(!needs_sign_check(Extent::Fixed(2), true, Extent::Fixed(1), false));
		assert!(needs_sign_check(Extent::Fixed(2), false, Extent::Fixed(1), true));
		assert!(needs_sign_check(Extent::Fixed(1), true, Extent::Fixed(1), false));
		assert!(needs_sign_check(Extent::Dynamic, true, Extent::Fixed(1), false));
	}

	proptest! {
		#[test]
		fn prop_order_independent(
			opt_index in 0..4usize,
			l in proptest::collection::vec(prop_oneof![Just(0u64), Just(MAX), Just(TOP), any::<u64>()], 0..6),
			r in proptest::collection::vec(prop_oneof![Just(0u64), Just(MAX), Just(TOP), any::<u64>()], 0..6),
		) {
			let opt = options()[opt_index];
			let l: Vec<Limb> = l.into_iter().map(Limb).collect();
			let r: Vec<Limb> = r.into_iter().map(Limb).collect();

			let swapped = opt.swap_sides();
			prop_assert_eq!(
				compare_promoted(opt, l.as_slice(), r.as_slice()),
				compare_promoted(swapped, r.as_slice(), l.as_slice()).reverse()
			);
			prop_assert_eq!(
				compare_infinite(opt, l.as_slice(), r.as_slice()),
				compare_infinite(swapped, r.as_slice(), l.as_slice()).reverse()
			);
		}

		#[test]
		fn prop_infinite_matches_values(
			opt_index in 0..4usize,
			l in proptest::collection::vec(any::<u64>(), 0..=1),
			r in proptest::collection::vec(any::<u64>(), 0..=1),
		) {
			let opt = options()[opt_index];
			let l: Vec<Limb> = l.into_iter().map(Limb).collect();
			let r: Vec<Limb> = r.into_iter().map(Limb).collect();

			let expected = value(&l, opt.left_signed()).cmp(&value(&r, opt.right_signed()));
			prop_assert_eq!(compare_infinite(opt, l.as_slice(), r.as_slice()), expected);
		}

		#[test]
		fn prop_sign_extension_is_invisible(
			opt_index in 0..4usize,
			l in proptest::collection::vec(any::<u64>(), 1..5),
			r in proptest::collection::vec(any::<u64>(), 0..5),
			extra in 1..4usize,
		) {
			let opt = options()[opt_index];
			let l: Vec<Limb> = l.into_iter().map(Limb).collect();
			let r: Vec<Limb> = r.into_iter().map(Limb).collect();

			let ext = crate::span::sign_extension(&l, opt.left_signed());
			let mut longer = l.clone();
			longer.extend(std::iter::repeat_n(ext, extra));

			prop_assert_eq!(
				compare_infinite(opt, l.as_slice(), r.as_slice()),
				compare_infinite(opt, longer.as_slice(), r.as_slice())
			);
		}
	}
}
