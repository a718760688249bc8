use crate::error::{Error, assert};
use std::cmp::Ordering;

pub mod half;

pub type Value = u64;
pub type SignedValue = i64;
pub type Half = u32;
pub type Double = u128;

/// One machine word of a big integer.
#[derive(Clone, Copy, Default, PartialEq, Debug, Eq, Ord, PartialOrd, Hash)]
pub struct Limb(pub Value);

impl Limb {
	pub const BITS: usize = Value::BITS as usize;
	pub const HALF_BITS: usize = Half::BITS as usize;

	pub const ZERO: Limb = Self(0);
	pub const MAX: Limb = Self(Value::MAX);

	#[inline]
	pub const fn make_double(low: Limb, high: Limb) -> Double {
		(low.0 as Double) | ((high.0 as Double) << Limb::BITS)
	}

	#[inline]
	pub const fn from_low_half(value: Double) -> Limb {
		Limb(value as Value)
	}

	#[inline]
	pub const fn from_high_half(value: Double) -> Limb {
		Limb((value >> Limb::BITS) as Value)
	}

	#[inline]
	pub const fn from_bool(value: bool) -> Limb {
		Limb(value as Value)
	}

	#[inline]
	pub const fn is_zero(self) -> bool {
		self.0 == 0
	}

	#[inline]
	pub const fn is_not_zero(self) -> bool {
		self.0 != 0
	}

	#[inline]
	pub const fn leading_zeros(self) -> usize {
		self.0.leading_zeros() as usize
	}

	#[inline]
	pub const fn trailing_zeros(self) -> usize {
		self.0.trailing_zeros() as usize
	}

	#[inline]
	pub const fn count_ones(self) -> usize {
		self.0.count_ones() as usize
	}

	/// Returns number of bits needed to store the value.
	/// If the value is zero, it returns 0.
	#[inline]
	pub const fn bit_width(self) -> usize {
		Self::BITS - self.leading_zeros()
	}

	#[inline]
	pub const fn as_signed(self) -> SignedValue {
		self.0 as SignedValue
	}

	/// Compares the limbs as two's complement values.
	#[inline]
	pub const fn signed_cmp(self, other: Limb) -> Ordering {
		let (a, b) = (self.as_signed(), other.as_signed());
		if a < b {
			Ordering::Less
		} else if a > b {
			Ordering::Greater
		} else {
			Ordering::Equal
		}
	}

	/// `MAX` if the top bit is set, `ZERO` otherwise.
	#[inline]
	pub const fn sign_mask(self) -> Limb {
		Limb((self.as_signed() >> (Limb::BITS - 1)) as Value)
	}

	#[inline]
	pub const fn wrapping_add(self, other: Limb) -> Limb {
		Limb(self.0.wrapping_add(other.0))
	}

	#[inline]
	pub const fn wrapping_sub(self, other: Limb) -> Limb {
		Limb(self.0.wrapping_sub(other.0))
	}

	#[inline]
	pub const fn wrapping_neg(self) -> Limb {
		Limb(self.0.wrapping_neg())
	}

	//----------------------------------------------------------------------------------------------
	// increment, decrement, negate

	/// Returns:
	///     (value, carry)
	/// Where:
	///     value = (self + carry) % 2**BITS
	///     carry = the addition wrapped around
	#[inline]
	pub const fn incc(self, carry: bool) -> (Limb, bool) {
		let value = self.wrapping_add(Limb::from_bool(carry));
		(value, value.0 < self.0)
	}

	#[inline]
	pub const fn inc(self) -> (Limb, bool) {
		self.incc(true)
	}

	/// Returns:
	///     (value, borrow)
	/// Where:
	///     value = (self - borrow) % 2**BITS
	///     borrow = the subtraction wrapped around
	#[inline]
	pub const fn decb(self, borrow: bool) -> (Limb, bool) {
		let value = self.wrapping_sub(Limb::from_bool(borrow));
		(value, value.0 > self.0)
	}

	#[inline]
	pub const fn dec(self) -> (Limb, bool) {
		self.decb(true)
	}

	/// Computes `!self + carry`.
	///
	/// Negating a multi-limb number flips every limb and adds one at the bottom, so calling this
	/// from the lowest limb up with the returned carry negates the whole number. With `carry ==
	/// false` it is a plain bitwise complement.
	///
	/// The returned flag is true iff `carry` was set and `self` is zero.
	#[inline]
	pub const fn negc(self, carry: bool) -> (Limb, bool) {
		Limb(!self.0).incc(carry)
	}

	/// Two's complement negation. The flag is true iff `self` is zero.
	#[inline]
	pub const fn neg(self) -> (Limb, bool) {
		(self.wrapping_neg(), self.is_zero())
	}

	//----------------------------------------------------------------------------------------------
	// add, sub

	#[inline]
	pub const fn const_addc(a: Limb, b: Limb, carry: bool) -> (Limb, bool) {
		let (sum, overflow1) = a.0.overflowing_add(b.0);
		let (sum, overflow2) = Limb(sum).incc(carry);
		(sum, overflow1 | overflow2)
	}

	#[cfg(native_x86_64)]
	#[inline]
	fn __nonconst_addc(a: Limb, b: Limb, carry: bool) -> (Limb, bool) {
		let mut out: Value = 0;
		#[allow(unused_unsafe)]
		let c_out = unsafe { std::arch::x86_64::_addcarry_u64(carry as u8, a.0, b.0, &mut out) };
		(Limb(out), c_out != 0)
	}

	#[cfg(not(native_x86_64))]
	#[inline]
	fn __nonconst_addc(a: Limb, b: Limb, carry: bool) -> (Limb, bool) {
		Self::const_addc(a, b, carry)
	}

	/// Returns:
	///     (value, carry)
	/// Where:
	///     value = (a + b + carry) % 2**BITS
	///     carry = (a + b + carry) > MAX
	///
	/// Use `const_addc()` in const contexts.
	#[inline]
	pub fn addc(a: Limb, b: Limb, carry: bool) -> (Limb, bool) {
		Self::__nonconst_addc(a, b, carry)
	}

	#[inline]
	pub const fn const_subb(a: Limb, b: Limb, borrow: bool) -> (Limb, bool) {
		let (diff, borrow1) = a.0.overflowing_sub(b.0);
		let (diff, borrow2) = Limb(diff).decb(borrow);
		(diff, borrow1 | borrow2)
	}

	#[cfg(native_x86_64)]
	#[inline]
	fn __nonconst_subb(a: Limb, b: Limb, borrow: bool) -> (Limb, bool) {
		let mut out: Value = 0;
		#[allow(unused_unsafe)]
		let b_out = unsafe { std::arch::x86_64::_subborrow_u64(borrow as u8, a.0, b.0, &mut out) };
		(Limb(out), b_out != 0)
	}

	#[cfg(not(native_x86_64))]
	#[inline]
	fn __nonconst_subb(a: Limb, b: Limb, borrow: bool) -> (Limb, bool) {
		Self::const_subb(a, b, borrow)
	}

	/// Returns:
	///     (value, borrow)
	/// Where:
	///     value = (a - b - borrow) % 2**BITS
	///     borrow = (a - b - borrow) < 0
	///
	/// Use `const_subb()` in const contexts.
	#[inline]
	pub fn subb(a: Limb, b: Limb, borrow: bool) -> (Limb, bool) {
		Self::__nonconst_subb(a, b, borrow)
	}

	//----------------------------------------------------------------------------------------------
	// mul

	/// Returns:
	///     [low, high]
	/// Where:
	///     big_value = a * b + c + d
	///     low = big_value % 2**BITS
	///     high = big_value / 2**BITS
	///
	/// The result always fits, because `(2**BITS - 1)**2 + 2 * (2**BITS - 1) == 2**(2 * BITS) - 1`.
	#[inline]
	pub const fn mul(a: Limb, b: Limb, c: Limb, d: Limb) -> [Limb; 2] {
		if cfg!(feature = "portable") {
			half::mul(a, b, c, d)
		} else {
			let t = (a.0 as Double) * (b.0 as Double) + (c.0 as Double) + (d.0 as Double);
			[Limb::from_low_half(t), Limb::from_high_half(t)]
		}
	}

	#[inline]
	pub const fn widening_mul(a: Limb, b: Limb) -> [Limb; 2] {
		Self::mul(a, b, Limb::ZERO, Limb::ZERO)
	}

	//----------------------------------------------------------------------------------------------
	// div

	#[cfg(native_x86_64)]
	#[inline]
	fn __nonconst_div(high: Limb, low: Limb, divisor: Limb) -> (Limb, Limb) {
		let quot: Value;
		let rem: Value;
		// SAFETY: `div` only touches the named registers. With `high < divisor` the quotient fits
		// into `rax`; otherwise the CPU raises a divide error, which is not memory unsafe.
		unsafe {
			std::arch::asm!(
				"div {divisor}",
				divisor = in(reg) divisor.0,
				inout("rax") low.0 => quot,
				inout("rdx") high.0 => rem,
				options(nomem, nostack),
			);
		}
		(Limb(quot), Limb(rem))
	}

	#[cfg(not(native_x86_64))]
	#[inline]
	fn __nonconst_div(high: Limb, low: Limb, divisor: Limb) -> (Limb, Limb) {
		half::div(high, low, divisor)
	}

	/// Returns:
	///     (quot, rem)
	/// Where:
	///     big_value = high * 2**BITS + low
	///     quot = big_value / divisor
	///     rem = big_value % divisor
	/// Preconditions:
	///     high < divisor
	///
	/// If the precondition doesn't hold, the result is unspecified; on x86_64 the `div`
	/// instruction raises a divide error. Use `const_div()` in const contexts and `checked_div()`
	/// for untrusted input.
	#[inline]
	pub fn div(high: Limb, low: Limb, divisor: Limb) -> (Limb, Limb) {
		debug_assert!(high.0 < divisor.0);
		Self::__nonconst_div(high, low, divisor)
	}

	/// Same as `div()`, but usable in const contexts.
	///
	/// Violating the precondition panics, so it fails the build when evaluated at compile time.
	#[inline]
	pub const fn const_div(high: Limb, low: Limb, divisor: Limb) -> (Limb, Limb) {
		assert!(high.0 < divisor.0, "Limb::const_div(): high part of dividend >= divisor");
		half::div(high, low, divisor)
	}

	/// Same as `div()`, but reports the precondition violation instead of returning garbage.
	pub fn checked_div(high: Limb, low: Limb, divisor: Limb) -> Result<(Limb, Limb), Error> {
		assert(divisor.is_not_zero(), || Error::new_division_by_zero("Limb::checked_div()"))?;
		assert(high < divisor, || Error::new_division_overflow("Limb::checked_div()"))?;
		Ok(Self::div(high, low, divisor))
	}
}

impl std::ops::Not for Limb {
	type Output = Self;

	#[inline]
	fn not(self) -> Self {
		Self(!self.0)
	}
}

impl std::ops::BitXor for Limb {
	type Output = Self;

	#[inline]
	fn bitxor(self, rhs: Self) -> Self {
		Self(self.0 ^ rhs.0)
	}
}

impl std::ops::BitAnd for Limb {
	type Output = Self;

	#[inline]
	fn bitand(self, rhs: Self) -> Self {
		Self(self.0 & rhs.0)
	}
}

impl std::ops::BitOr for Limb {
	type Output = Self;

	#[inline]
	fn bitor(self, rhs: Self) -> Self {
		Self(self.0 | rhs.0)
	}
}

impl std::cmp::PartialEq<Value> for Limb {
	#[inline]
	fn eq(&self, other: &Value) -> bool {
		self.0 == *other
	}
}
