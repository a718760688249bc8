//! Portable double-limb multiplication and division.
//!
//! Everything here is built from operations on half limbs stored in a `Value`, so it needs
//! neither a double-width type nor a native instruction, and all of it is `const`. `Limb::mul()`
//! and `Limb::div()` use these when no native path is selected; `Limb::const_div()` always does.

use super::{Half, Limb, Value};

const HALF_BITS: u32 = Half::BITS;
const HALF_MASK: Value = Half::MAX as Value;
const HALF_BASE: Value = 1 << HALF_BITS;

/// Returns `(low, high)` half limbs of `a`.
#[inline]
const fn split(a: Value) -> (Value, Value) {
	(a & HALF_MASK, a >> HALF_BITS)
}

/// Returns:
///     [low, high]
/// Where:
///     big_value = a * b + c + d
///
/// Schoolbook multiplication of the half limbs. Each partial sum below is at most
/// `(2**32 - 1)**2 + 2 * (2**32 - 1) == 2**64 - 1`, so none of them overflows.
#[inline]
pub const fn mul(a: Limb, b: Limb, c: Limb, d: Limb) -> [Limb; 2] {
	let (a0, a1) = split(a.0);
	let (b0, b1) = split(b.0);
	let (c0, c1) = split(c.0);
	let (d0, d1) = split(d.0);

	let lo = a0 * b0 + c0 + d0;
	let m1 = a0 * b1 + c1 + d1;
	let m2 = a1 * b0 + (lo >> HALF_BITS) + (m1 & HALF_MASK);
	let hi = a1 * b1 + (m2 >> HALF_BITS) + (m1 >> HALF_BITS);

	[Limb((lo & HALF_MASK) | (m2 << HALF_BITS)), Limb(hi)]
}

/// Returns:
///     (quot, rem)
/// Where:
///     big_value = high * 2**BITS + low
///     quot = big_value / divisor
///     rem = big_value % divisor
/// Preconditions:
///     high < divisor
#[inline]
pub const fn div(high: Limb, low: Limb, divisor: Limb) -> (Limb, Limb) {
	debug_assert!(high.0 < divisor.0);
	if divisor.0 >> HALF_BITS == 0 {
		div_by_half(high.0, low.0, divisor.0)
	} else {
		div_normalized(high.0, low.0, divisor.0)
	}
}

/// Division by a divisor that fits into a half limb.
///
/// Since `u1 < v < 2**32`, both partial dividends are below `v * 2**32` and each quotient
/// digit fits into a half limb. No data dependent branches.
#[inline]
const fn div_by_half(u1: Value, u0: Value, v: Value) -> (Limb, Limb) {
	let (u00, u01) = split(u0);

	let n1 = (u1 << HALF_BITS) | u01;
	let (q1, r1) = (n1 / v, n1 % v);

	let n0 = (r1 << HALF_BITS) | u00;
	let (q0, r0) = (n0 / v, n0 % v);

	(Limb((q1 << HALF_BITS) | q0), Limb(r0))
}

/// Knuth's Algorithm D, specialized for a 4 half-limb dividend and a 2 half-limb divisor.
#[inline]
const fn div_normalized(u1: Value, u0: Value, v: Value) -> (Limb, Limb) {
	// The divisor's upper half is non-zero, so the shift is at most HALF_BITS - 1.
	let shift = v.leading_zeros();
	let v = v << shift;
	let (v0, v1) = split(v);

	// `u0 >> (BITS - shift)` is not defined for `shift == 0`, hence the two steps.
	let u1 = (u1 << shift) | ((u0 >> 1) >> (Value::BITS - 1 - shift));
	let u0 = u0 << shift;
	let (u00, u01) = split(u0);

	let q1 = quot_digit(u1, u01, v1, v0);
	let u1 = u1.wrapping_mul(HALF_BASE).wrapping_add(u01).wrapping_sub(q1.wrapping_mul(v));

	let q0 = quot_digit(u1, u00, v1, v0);
	let rem = u1.wrapping_mul(HALF_BASE).wrapping_add(u00).wrapping_sub(q0.wrapping_mul(v));

	(Limb((q1 << HALF_BITS) | q0), Limb(rem >> shift))
}

/// Divides the 3 half-limb number `u * 2**32 + u_next` by the normalized divisor `[v0, v1]`.
///
/// The quotient digit is estimated from `u / v1`, which is never too small and at most 2 too
/// large. Each correction step is bounded by `rhat < 2**32`; once `rhat` overflows a half limb,
/// the estimate is known to be exact.
#[inline]
const fn quot_digit(u: Value, u_next: Value, v1: Value, v0: Value) -> Value {
	let mut q = u / v1;
	let mut rhat = u % v1;
	while q >= HALF_BASE || q * v0 > (rhat << HALF_BITS) + u_next {
		q -= 1;
		rhat += v1;
		if rhat >= HALF_BASE {
			break;
		}
	}
	q
}
