//! Borrowed views of limb sequences.
//!
//! A view is anything implementing [`LimbSpan`]: a runtime-length `[Limb]` or a fixed-length
//! `[Limb; N]`. The algorithms in this crate operate on slices, but each view type also reports
//! its [`Extent`], i.e., whether its length is known at compile time. The engines use the extents
//! to decide statically which phases of a computation can be skipped.
//!
//! Limbs are stored least significant first. Depending on the configuration, a view is read as
//! an unsigned number or as a two's complement number whose top bit repeats forever.

use crate::error::{Error, assert};
use crate::limb::Limb;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Extent {
	Fixed(usize),
	Dynamic,
}

impl Extent {
	/// The length to use at runtime. A fixed extent wins over the runtime value, which lets the
	/// compiler see the constant.
	#[inline]
	pub const fn resolve(self, len: usize) -> usize {
		match self {
			Extent::Fixed(n) => {
				debug_assert!(n == len);
				n
			},
			Extent::Dynamic => len,
		}
	}

	#[inline]
	pub const fn min(self, other: Extent) -> Extent {
		match (self, other) {
			(Extent::Fixed(a), Extent::Fixed(b)) => Extent::Fixed(if a <= b { a } else { b }),
			_ => Extent::Dynamic,
		}
	}

	#[inline]
	pub const fn max(self, other: Extent) -> Extent {
		match (self, other) {
			(Extent::Fixed(a), Extent::Fixed(b)) => Extent::Fixed(if a >= b { a } else { b }),
			_ => Extent::Dynamic,
		}
	}

	/// Smallest of the extents, or `Dynamic` if any of them is `Dynamic`.
	///
	/// Preconditions:
	///     `extents` is not empty
	pub const fn min_of(extents: &[Extent]) -> Extent {
		debug_assert!(!extents.is_empty());
		let mut result = Extent::Fixed(usize::MAX);
		let mut i = 0;
		while i < extents.len() {
			result = result.min(extents[i]);
			i += 1;
		}
		result
	}

	/// Largest of the extents, or `Dynamic` if any of them is `Dynamic`.
	pub const fn max_of(extents: &[Extent]) -> Extent {
		let mut result = Extent::Fixed(0);
		let mut i = 0;
		while i < extents.len() {
			result = result.max(extents[i]);
			i += 1;
		}
		result
	}

	/// Returns true unless both extents are fixed and `self` is not longer than `other`.
	///
	/// Used to skip the code handling a destination that outlives an operand.
	#[inline]
	pub const fn may_exceed(self, other: Extent) -> bool {
		match (self, other) {
			(Extent::Fixed(a), Extent::Fixed(b)) => a > b,
			_ => true,
		}
	}
}

pub trait LimbSpan {
	const EXTENT: Extent;

	fn limbs(&self) -> &[Limb];

	#[inline]
	fn len(&self) -> usize {
		Self::EXTENT.resolve(self.limbs().len())
	}

	#[inline]
	fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// The limb pattern continuing beyond the stored limbs.
	#[inline]
	fn sign_extension(&self, signed: bool) -> Limb {
		sign_extension(self.limbs(), signed)
	}
}

pub trait LimbSpanMut: LimbSpan {
	fn limbs_mut(&mut self) -> &mut [Limb];
}

impl LimbSpan for [Limb] {
	const EXTENT: Extent = Extent::Dynamic;

	#[inline]
	fn limbs(&self) -> &[Limb] {
		self
	}
}

impl LimbSpanMut for [Limb] {
	#[inline]
	fn limbs_mut(&mut self) -> &mut [Limb] {
		self
	}
}

impl<const N: usize> LimbSpan for [Limb; N] {
	const EXTENT: Extent = Extent::Fixed(N);

	#[inline]
	fn limbs(&self) -> &[Limb] {
		self
	}
}

impl<const N: usize> LimbSpanMut for [Limb; N] {
	#[inline]
	fn limbs_mut(&mut self) -> &mut [Limb] {
		self
	}
}

/// Returns the limb that continues beyond the highest limb of `a`.
///
/// A negative two's complement number continues with 1-bits, anything else with 0-bits. So the
/// result is `Limb::MAX` if `signed` and the top bit of `a` is set, and `Limb::ZERO` otherwise,
/// including when `a` is empty.
#[inline]
pub const fn sign_extension(a: &[Limb], signed: bool) -> Limb {
	if signed && !a.is_empty() { a[a.len() - 1].sign_mask() } else { Limb::ZERO }
}

//--------------------------------------------------------------------------------------------------
// slicing

/// The first `n` limbs.
#[inline]
pub fn first<S: LimbSpan + ?Sized>(a: &S, n: usize) -> &[Limb] {
	debug_assert!(n <= a.len());
	&a.limbs()[..n]
}

/// Everything after the first `n` limbs.
#[inline]
pub fn skip<S: LimbSpan + ?Sized>(a: &S, n: usize) -> &[Limb] {
	debug_assert!(n <= a.len());
	&a.limbs()[n..]
}

/// The last `n` limbs.
#[inline]
pub fn last<S: LimbSpan + ?Sized>(a: &S, n: usize) -> &[Limb] {
	debug_assert!(n <= a.len());
	let a = a.limbs();
	&a[a.len() - n..]
}

/// Everything before the last `n` limbs.
#[inline]
pub fn truncate<S: LimbSpan + ?Sized>(a: &S, n: usize) -> &[Limb] {
	debug_assert!(n <= a.len());
	let a = a.limbs();
	&a[..a.len() - n]
}

#[inline]
pub fn first_mut<S: LimbSpanMut + ?Sized>(a: &mut S, n: usize) -> &mut [Limb] {
	debug_assert!(n <= a.len());
	&mut a.limbs_mut()[..n]
}

#[inline]
pub fn skip_mut<S: LimbSpanMut + ?Sized>(a: &mut S, n: usize) -> &mut [Limb] {
	debug_assert!(n <= a.len());
	&mut a.limbs_mut()[n..]
}

#[inline]
pub fn last_mut<S: LimbSpanMut + ?Sized>(a: &mut S, n: usize) -> &mut [Limb] {
	debug_assert!(n <= a.len());
	let a = a.limbs_mut();
	let len = a.len();
	&mut a[len - n..]
}

#[inline]
pub fn truncate_mut<S: LimbSpanMut + ?Sized>(a: &mut S, n: usize) -> &mut [Limb] {
	debug_assert!(n <= a.len());
	let a = a.limbs_mut();
	let len = a.len();
	&mut a[..len - n]
}

/// The first `N` limbs as a fixed-length view.
///
/// Panics if `a` is shorter than `N`.
#[inline]
pub fn first_fixed<const N: usize, S: LimbSpan + ?Sized>(a: &S) -> &[Limb; N] {
	match a.limbs().first_chunk::<N>() {
		Some(head) => head,
		None => panic!("span::first_fixed(): view is too short"),
	}
}

/// The last `N` limbs as a fixed-length view.
///
/// Panics if `a` is shorter than `N`.
#[inline]
pub fn last_fixed<const N: usize, S: LimbSpan + ?Sized>(a: &S) -> &[Limb; N] {
	match a.limbs().last_chunk::<N>() {
		Some(tail) => tail,
		None => panic!("span::last_fixed(): view is too short"),
	}
}

pub fn try_first<S: LimbSpan + ?Sized>(a: &S, n: usize) -> Result<&[Limb], Error> {
	assert(n <= a.len(), || Error::new_length_out_of_range("span::try_first()"))?;
	Ok(&a.limbs()[..n])
}

pub fn try_skip<S: LimbSpan + ?Sized>(a: &S, n: usize) -> Result<&[Limb], Error> {
	assert(n <= a.len(), || Error::new_length_out_of_range("span::try_skip()"))?;
	Ok(&a.limbs()[n..])
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::ErrorKind;
	use crate::testvec;

	const MAX: u64 = u64::MAX;

	#[test]
	fn test_extent_algebra() {
		use Extent::{Dynamic, Fixed};

		assert_eq!(Extent::min_of(&[Fixed(3), Fixed(1), Fixed(2)]), Fixed(1));
		assert_eq!(Extent::min_of(&[Fixed(3), Dynamic, Fixed(2)]), Dynamic);
		assert_eq!(Extent::max_of(&[Fixed(3), Fixed(1), Fixed(2)]), Fixed(3));
		assert_eq!(Extent::max_of(&[Fixed(3), Dynamic]), Dynamic);
		assert_eq!(Extent::max_of(&[]), Fixed(0));

		assert!(Fixed(3).may_exceed(Fixed(2)));
		assert!(!Fixed(2).may_exceed(Fixed(2)));
		assert!(Fixed(1).may_exceed(Dynamic));
		assert!(Dynamic.may_exceed(Fixed(5)));

		assert_eq!(Fixed(4).resolve(4), 4);
		assert_eq!(Dynamic.resolve(7), 7);
	}

	#[test]
	#[cfg(debug_assertions)]
	#[should_panic]
	fn test_min_of_empty() {
		let extents: &[Extent] = std::hint::black_box(&[]);
		let _ = Extent::min_of(extents);
	}

	#[test]
	fn test_extent_of_views() {
		assert_eq!(<[Limb; 3] as LimbSpan>::EXTENT, Extent::Fixed(3));
		assert_eq!(<[Limb] as LimbSpan>::EXTENT, Extent::Dynamic);

		let a = [Limb(1), Limb(2)];
		assert_eq!(LimbSpan::len(&a), 2);
		assert_eq!(LimbSpan::len(&a[..1]), 1);
		assert!(LimbSpan::is_empty(&a[..0]));
	}

	#[test]
	fn test_sign_extension() {
		let a = testvec![];
		assert_eq!(sign_extension(&a, true), Limb::ZERO);
		assert_eq!(sign_extension(&a, false), Limb::ZERO);

		let a = testvec![MAX, 1];
		assert_eq!(sign_extension(&a, true), Limb::ZERO);

		let a = testvec![0, 1 << 63];
		assert_eq!(sign_extension(&a, true), Limb::MAX);
		assert_eq!(sign_extension(&a, false), Limb::ZERO);

		let a = [Limb(MAX)];
		assert_eq!(a.sign_extension(true), Limb::MAX);
		assert_eq!(a.sign_extension(false), Limb::ZERO);

		const EXT: Limb = sign_extension(&[Limb(1), Limb(MAX)], true);
		assert_eq!(EXT, Limb::MAX);
	}

	#[test]
	fn test_slicing() {
		let a = testvec![1, 2, 3, 4, 5];
		assert_eq!(first(a.as_slice(), 2), &testvec![1, 2][..]);
		assert_eq!(skip(a.as_slice(), 2), &testvec![3, 4, 5][..]);
		assert_eq!(last(a.as_slice(), 2), &testvec![4, 5][..]);
		assert_eq!(truncate(a.as_slice(), 2), &testvec![1, 2, 3][..]);
		assert!(first(a.as_slice(), 0).is_empty());
		assert!(skip(a.as_slice(), 5).is_empty());

		let fixed = [Limb(1), Limb(2), Limb(3)];
		let head: &[Limb; 2] = first_fixed::<2, _>(&fixed);
		assert_eq!(head, &[Limb(1), Limb(2)]);
		let tail: &[Limb; 1] = last_fixed::<1, _>(&fixed);
		assert_eq!(tail, &[Limb(3)]);
	}

	#[test]
	fn test_slicing_mut() {
		let mut a = testvec![1, 2, 3, 4, 5];
		first_mut(a.as_mut_slice(), 1)[0] = Limb(10);
		skip_mut(a.as_mut_slice(), 4)[0] = Limb(50);
		last_mut(a.as_mut_slice(), 2)[0] = Limb(40);
		truncate_mut(a.as_mut_slice(), 3)[1] = Limb(20);
		assert_eq!(a, testvec![10, 20, 3, 40, 50]);
	}

	#[test]
	fn test_try_slicing() {
		let a = [Limb(1), Limb(2)];
		assert_eq!(try_first(&a, 2), Ok(&a[..]));
		assert_eq!(try_skip(&a, 1), Ok(&a[1..]));

		let err = try_first(&a, 3).err().map(|e| e.kind);
		assert_eq!(err, Some(ErrorKind::LengthOutOfRange));
		let err = try_skip(&a, 3).err().map(|e| e.kind);
		assert_eq!(err, Some(ErrorKind::LengthOutOfRange));
	}
}
