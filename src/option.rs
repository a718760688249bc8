//! Typed bitsets used as per-call configuration.

use arrayvec::ArrayVec;
use std::marker::PhantomData;

/// A `u64` treated as a set of flags.
///
/// `Tag` only distinguishes unrelated option types, so flags of one domain can't be combined
/// with flags of another. All operations are `const`, so options can be built in constants.
pub struct BasicOption<Tag> {
	bits: u64,
	phantom: PhantomData<fn() -> Tag>,
}

impl<Tag> BasicOption<Tag> {
	#[inline]
	pub const fn new(bits: u64) -> Self {
		Self { bits, phantom: PhantomData }
	}

	#[inline]
	pub const fn empty() -> Self {
		Self::new(0)
	}

	#[inline]
	pub const fn bits(self) -> u64 {
		self.bits
	}

	#[inline]
	pub const fn is_empty(self) -> bool {
		self.bits == 0
	}

	/// True iff all bits of `other` are set in `self`.
	#[inline]
	pub const fn contains(self, other: Self) -> bool {
		self.bits & other.bits == other.bits
	}

	#[inline]
	pub const fn intersects(self, other: Self) -> bool {
		self.bits & other.bits != 0
	}

	#[inline]
	pub const fn union(self, other: Self) -> Self {
		Self::new(self.bits | other.bits)
	}

	#[inline]
	pub const fn intersection(self, other: Self) -> Self {
		Self::new(self.bits & other.bits)
	}

	#[inline]
	pub const fn symmetric_difference(self, other: Self) -> Self {
		Self::new(self.bits ^ other.bits)
	}

	#[inline]
	pub const fn complement(self) -> Self {
		Self::new(!self.bits)
	}
}

impl<Tag> Clone for BasicOption<Tag> {
	#[inline]
	fn clone(&self) -> Self {
		*self
	}
}

impl<Tag> Copy for BasicOption<Tag> {}

impl<Tag> Default for BasicOption<Tag> {
	#[inline]
	fn default() -> Self {
		Self::empty()
	}
}

impl<Tag> PartialEq for BasicOption<Tag> {
	#[inline]
	fn eq(&self, other: &Self) -> bool {
		self.bits == other.bits
	}
}

impl<Tag> Eq for BasicOption<Tag> {}

impl<Tag> PartialOrd for BasicOption<Tag> {
	#[inline]
	fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
		Some(self.cmp(other))
	}
}

impl<Tag> Ord for BasicOption<Tag> {
	#[inline]
	fn cmp(&self, other: &Self) -> std::cmp::Ordering {
		self.bits.cmp(&other.bits)
	}
}

impl<Tag> std::hash::Hash for BasicOption<Tag> {
	fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
		self.bits.hash(state)
	}
}

impl<Tag> std::fmt::Debug for BasicOption<Tag> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "BasicOption({:#x})", self.bits)
	}
}

impl<Tag> From<u64> for BasicOption<Tag> {
	#[inline]
	fn from(bits: u64) -> Self {
		Self::new(bits)
	}
}

impl<Tag> std::ops::Not for BasicOption<Tag> {
	type Output = Self;

	#[inline]
	fn not(self) -> Self {
		self.complement()
	}
}

impl<Tag> std::ops::BitAnd for BasicOption<Tag> {
	type Output = Self;

	#[inline]
	fn bitand(self, rhs: Self) -> Self {
		self.intersection(rhs)
	}
}

impl<Tag> std::ops::BitOr for BasicOption<Tag> {
	type Output = Self;

	#[inline]
	fn bitor(self, rhs: Self) -> Self {
		self.union(rhs)
	}
}

impl<Tag> std::ops::BitXor for BasicOption<Tag> {
	type Output = Self;

	#[inline]
	fn bitxor(self, rhs: Self) -> Self {
		self.symmetric_difference(rhs)
	}
}

impl<Tag> std::ops::BitAndAssign for BasicOption<Tag> {
	#[inline]
	fn bitand_assign(&mut self, rhs: Self) {
		*self = *self & rhs;
	}
}

impl<Tag> std::ops::BitOrAssign for BasicOption<Tag> {
	#[inline]
	fn bitor_assign(&mut self, rhs: Self) {
		*self = *self | rhs;
	}
}

impl<Tag> std::ops::BitXorAssign for BasicOption<Tag> {
	#[inline]
	fn bitxor_assign(&mut self, rhs: Self) {
		*self = *self ^ rhs;
	}
}

//--------------------------------------------------------------------------------------------------

pub enum SpanOptionTag {}

/// Configuration of a limb span operation.
///
/// Operations take two operands, left and right. Single-operand operations call theirs the
/// argument, which shares the right operand's flags (`ARG_*`).
pub type SpanOption = BasicOption<SpanOptionTag>;

impl BasicOption<SpanOptionTag> {
	/// The left operand is a signed two's complement number instead of an unsigned one.
	pub const LEFT_SIGNED: Self = Self::new(0x1);
	pub const RIGHT_SIGNED: Self = Self::new(0x10);
	pub const ARG_SIGNED: Self = Self::RIGHT_SIGNED;

	/// The operation may use the left operand as scratch space.
	///
	/// Only meaningful for operands passed as mutable views. Ownership stays with the caller.
	pub const LEFT_MUTABLE: Self = Self::new(0x2);
	pub const RIGHT_MUTABLE: Self = Self::new(0x20);
	pub const ARG_MUTABLE: Self = Self::RIGHT_MUTABLE;

	/// Prefer fewer branches over skipping work.
	///
	/// Continuing a cheap computation can be faster than testing whether it is needed when the
	/// views are short. For long views it is usually slower.
	pub const BRANCHLESS: Self = Self::new(0x100);

	/// The destination is promised to be large enough for the result.
	pub const NO_OVERFLOW: Self = Self::new(0x200);

	/// The operands (left and right, or destination and one operand) don't overlap.
	///
	/// Views may overlap only if they start at the same address, with or without these flags.
	pub const RESTRICT_LEFT_RIGHT: Self = Self::new(0x1000);
	pub const RESTRICT_DEST_LEFT: Self = Self::new(0x2000);
	pub const RESTRICT_DEST_RIGHT: Self = Self::new(0x4000);
	pub const RESTRICT_DEST_ARG: Self = Self::RESTRICT_DEST_RIGHT;

	/// All flags describing the left operand.
	pub const LEFT: Self = Self::LEFT_SIGNED.union(Self::LEFT_MUTABLE).union(Self::RESTRICT_DEST_LEFT);

	/// All flags describing the right operand.
	pub const RIGHT: Self =
		Self::RIGHT_SIGNED.union(Self::RIGHT_MUTABLE).union(Self::RESTRICT_DEST_RIGHT);

	const NAMES: [(Self, &'static str); 9] = [
		(Self::LEFT_SIGNED, "LEFT_SIGNED"),
		(Self::LEFT_MUTABLE, "LEFT_MUTABLE"),
		(Self::RIGHT_SIGNED, "RIGHT_SIGNED"),
		(Self::RIGHT_MUTABLE, "RIGHT_MUTABLE"),
		(Self::BRANCHLESS, "BRANCHLESS"),
		(Self::NO_OVERFLOW, "NO_OVERFLOW"),
		(Self::RESTRICT_LEFT_RIGHT, "RESTRICT_LEFT_RIGHT"),
		(Self::RESTRICT_DEST_LEFT, "RESTRICT_DEST_LEFT"),
		(Self::RESTRICT_DEST_RIGHT, "RESTRICT_DEST_RIGHT"),
	];

	#[inline]
	pub const fn left_signed(self) -> bool {
		self.intersects(Self::LEFT_SIGNED)
	}

	#[inline]
	pub const fn right_signed(self) -> bool {
		self.intersects(Self::RIGHT_SIGNED)
	}

	#[inline]
	pub const fn branchless(self) -> bool {
		self.intersects(Self::BRANCHLESS)
	}

	#[inline]
	pub const fn no_overflow(self) -> bool {
		self.intersects(Self::NO_OVERFLOW)
	}

	/// Exchanges the roles of the left and the right operand.
	///
	/// Flags not tied to one side (`BRANCHLESS`, `NO_OVERFLOW`, `RESTRICT_LEFT_RIGHT`) stay as
	/// they are, as do bits that aren't defined flags.
	pub const fn swap_sides(self) -> Self {
		let left = self.intersection(Self::LEFT).bits();
		let right = self.intersection(Self::RIGHT).bits();
		let rest = self.intersection(Self::LEFT.union(Self::RIGHT).complement());

		// LEFT_SIGNED and LEFT_MUTABLE sit 4 bits below their right counterparts,
		// RESTRICT_DEST_LEFT sits 1 bit below RESTRICT_DEST_RIGHT.
		let left_to_right = ((left & 0x3) << 4) | ((left & 0x2000) << 1);
		let right_to_left = ((right & 0x30) >> 4) | ((right & 0x4000) >> 1);
		rest.union(Self::new(left_to_right | right_to_left))
	}

	/// Names of the flags set in `self`.
	pub fn flag_names(self) -> ArrayVec<&'static str, 9> {
		Self::NAMES
			.iter()
			.filter(|(flag, _)| self.contains(*flag))
			.map(|(_, name)| *name)
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	enum OtherTag {}
	type OtherOption = BasicOption<OtherTag>;

	#[test]
	fn test_basic_ops() {
		let a = OtherOption::new(0b0110);
		let b = OtherOption::new(0b0011);

		assert_eq!((a | b).bits(), 0b0111);
		assert_eq!((a & b).bits(), 0b0010);
		assert_eq!((a ^ b).bits(), 0b0101);
		assert_eq!((!a).bits(), !0b0110);
		assert!(a.intersects(b));
		assert!(!a.contains(b));
		assert!(a.contains(OtherOption::new(0b0100)));
		assert!(OtherOption::default().is_empty());
		assert_eq!(OtherOption::from(5), OtherOption::new(5));
		assert!(OtherOption::new(1) < OtherOption::new(2));

		let mut c = a;
		c |= b;
		c &= OtherOption::new(0b0101);
		c ^= OtherOption::new(0b0001);
		assert_eq!(c.bits(), 0b0100);
	}

	#[test]
	fn test_const_construction() {
		const OPT: SpanOption = SpanOption::LEFT_SIGNED.union(SpanOption::BRANCHLESS);
		assert!(OPT.left_signed());
		assert!(!OPT.right_signed());
		assert!(OPT.branchless());
		assert!(!OPT.no_overflow());
	}

	#[test]
	fn test_distinct_bits() {
		let flags = SpanOption::NAMES.map(|(flag, _)| flag.bits());
		for (i, a) in flags.iter().enumerate() {
			assert_eq!(a.count_ones(), 1);
			for b in &flags[i + 1..] {
				assert_eq!(a & b, 0);
			}
		}
		assert_eq!(SpanOption::ARG_SIGNED, SpanOption::RIGHT_SIGNED);
		assert_eq!(SpanOption::RESTRICT_DEST_ARG, SpanOption::RESTRICT_DEST_RIGHT);
	}

	#[test]
	fn test_swap_sides() {
		let opt = SpanOption::LEFT_SIGNED | SpanOption::RIGHT_MUTABLE | SpanOption::BRANCHLESS;
		let swapped = opt.swap_sides();
		assert_eq!(
			swapped,
			SpanOption::RIGHT_SIGNED | SpanOption::LEFT_MUTABLE | SpanOption::BRANCHLESS
		);
		assert_eq!(swapped.swap_sides(), opt);

		let opt = SpanOption::RESTRICT_DEST_LEFT | SpanOption::RESTRICT_LEFT_RIGHT;
		assert_eq!(
			opt.swap_sides(),
			SpanOption::RESTRICT_DEST_RIGHT | SpanOption::RESTRICT_LEFT_RIGHT
		);
		assert_eq!(SpanOption::LEFT.swap_sides(), SpanOption::RIGHT);
	}

	#[test]
	fn test_flag_names() {
		let opt = SpanOption::RIGHT_SIGNED | SpanOption::NO_OVERFLOW;
		assert_eq!(opt.flag_names().as_slice(), &["RIGHT_SIGNED", "NO_OVERFLOW"]);
		assert!(SpanOption::empty().flag_names().is_empty());
	}
}
