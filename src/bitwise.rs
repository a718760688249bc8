//! Bitwise logical operators over limb views.
//!
//! Operands may have different lengths and different signedness. A shorter operand continues
//! with its sign extension, so the result is what the operator gives for the two infinitely
//! extended values, truncated to the destination length.
//!
//! Once an operand runs out, it is a constant (all zeros or all ones) and the binary operator
//! collapses into one of the unary operators in [`UnaryOp`]. The engine then writes a constant or
//! a possibly complemented copy instead of evaluating the binary operator per limb.

use crate::limb::Limb;
use crate::option::SpanOption;
use crate::span::{Extent, LimbSpan, LimbSpanMut};

/// Single-argument forms, including the ones a binary operator collapses into.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum UnaryOp {
	/// All bits set.
	One,
	/// All bits cleared.
	Zero,
	/// The argument itself.
	Neutral,
	/// The complement of the argument.
	Not,
}

impl UnaryOp {
	#[inline]
	pub const fn apply(self, a: Limb) -> Limb {
		match self {
			UnaryOp::One => Limb::MAX,
			UnaryOp::Zero => Limb::ZERO,
			UnaryOp::Neutral => a,
			UnaryOp::Not => Limb(!a.0),
		}
	}
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BinaryOp {
	/// `l & r`
	And,
	/// `!(l & r)`
	Nand,
	/// `l | r`
	Or,
	/// `!(l | r)`
	Nor,
	/// `l ^ r`
	Xor,
	/// `!(l ^ r)`
	Xnor,
	/// `!l & r`, the bits where `l < r`
	Less,
	/// `l & !r`, the bits where `l > r`
	Greater,
	/// `!l | r`, the bits where `l <= r`
	Leq,
	/// `l | !r`, the bits where `l >= r`
	Geq,
}

impl BinaryOp {
	pub const ALL: [BinaryOp; 10] = [
		BinaryOp::And,
		BinaryOp::Nand,
		BinaryOp::Or,
		BinaryOp::Nor,
		BinaryOp::Xor,
		BinaryOp::Xnor,
		BinaryOp::Less,
		BinaryOp::Greater,
		BinaryOp::Leq,
		BinaryOp::Geq,
	];

	#[inline]
	pub const fn apply(self, l: Limb, r: Limb) -> Limb {
		let (l, r) = (l.0, r.0);
		Limb(match self {
			BinaryOp::And => l & r,
			BinaryOp::Nand => !(l & r),
			BinaryOp::Or => l | r,
			BinaryOp::Nor => !(l | r),
			BinaryOp::Xor => l ^ r,
			BinaryOp::Xnor => !(l ^ r),
			BinaryOp::Less => !l & r,
			BinaryOp::Greater => l & !r,
			BinaryOp::Leq => !l | r,
			BinaryOp::Geq => l | !r,
		})
	}

	/// The function of `l` this operator becomes when `r` is all ones.
	pub const fn bind_one(self) -> UnaryOp {
		match self {
			BinaryOp::And => UnaryOp::Neutral,
			BinaryOp::Nand => UnaryOp::Not,
			BinaryOp::Or => UnaryOp::One,
			BinaryOp::Nor => UnaryOp::Zero,
			BinaryOp::Xor => UnaryOp::Not,
			BinaryOp::Xnor => UnaryOp::Neutral,
			BinaryOp::Less => UnaryOp::Not,
			BinaryOp::Greater => UnaryOp::Zero,
			BinaryOp::Leq => UnaryOp::One,
			BinaryOp::Geq => UnaryOp::Neutral,
		}
	}

	/// The function of `l` this operator becomes when `r` is zero.
	pub const fn bind_zero(self) -> UnaryOp {
		match self {
			BinaryOp::And => UnaryOp::Zero,
			BinaryOp::Nand => UnaryOp::One,
			BinaryOp::Or => UnaryOp::Neutral,
			BinaryOp::Nor => UnaryOp::Not,
			BinaryOp::Xor => UnaryOp::Neutral,
			BinaryOp::Xnor => UnaryOp::Not,
			BinaryOp::Less => UnaryOp::Zero,
			BinaryOp::Greater => UnaryOp::Neutral,
			BinaryOp::Leq => UnaryOp::Not,
			BinaryOp::Geq => UnaryOp::One,
		}
	}

	/// `op.flip().apply(r, l) == op.apply(l, r)`
	pub const fn flip(self) -> BinaryOp {
		match self {
			BinaryOp::Less => BinaryOp::Greater,
			BinaryOp::Greater => BinaryOp::Less,
			BinaryOp::Leq => BinaryOp::Geq,
			BinaryOp::Geq => BinaryOp::Leq,
			op => op,
		}
	}

	/// Collapses the operator for a sign extension `r`, which is either all ones or zero.
	#[inline]
	pub const fn bind(self, r: Limb) -> UnaryOp {
		debug_assert!(r.0 == 0 || r.0 == Limb::MAX.0);
		if r.is_zero() { self.bind_zero() } else { self.bind_one() }
	}
}

/// Evaluates `$body` with `$f` bound to a closure computing `$op`.
///
/// Every arm gets its own closure type, so `$body` is monomorphized per operator and the
/// element loops don't branch on the operator.
macro_rules! with_binary_fn {
	(@arms $op:expr, $f:ident, $body:expr, $($variant:ident)*) => {
		match $op {
			$(BinaryOp::$variant => {
				let $f = |l: Limb, r: Limb| -> Limb { BinaryOp::$variant.apply(l, r) };
				$body
			})*
		}
	};
	($op:expr, $f:ident => $body:expr) => {
		with_binary_fn!(@arms $op, $f, $body, And Nand Or Nor Xor Xnor Less Greater Leq Geq)
	};
}

//--------------------------------------------------------------------------------------------------
// element loops
//
// All of them process blocks of 16 limbs, then blocks of 4, then what remains. The fixed trip
// counts let the compiler vectorize the inner loops.

const UNROLL_LARGE: usize = 16;
const UNROLL_SMALL: usize = 4;

/// `d[i] = f(l[i], r[i])` for all `i < d.len()`
#[inline(always)]
fn zip_unroll<F: Fn(Limb, Limb) -> Limb>(d: &mut [Limb], l: &[Limb], r: &[Limb], f: F) {
	let n = d.len();
	let (l, r) = (&l[..n], &r[..n]);

	let (d_large, d) = d.as_chunks_mut::<UNROLL_LARGE>();
	let (l_large, l) = l.as_chunks::<UNROLL_LARGE>();
	let (r_large, r) = r.as_chunks::<UNROLL_LARGE>();
	for ((d, l), r) in d_large.iter_mut().zip(l_large).zip(r_large) {
		for i in 0..UNROLL_LARGE {
			d[i] = f(l[i], r[i]);
		}
	}

	let (d_small, d) = d.as_chunks_mut::<UNROLL_SMALL>();
	let (l_small, l) = l.as_chunks::<UNROLL_SMALL>();
	let (r_small, r) = r.as_chunks::<UNROLL_SMALL>();
	for ((d, l), r) in d_small.iter_mut().zip(l_small).zip(r_small) {
		for i in 0..UNROLL_SMALL {
			d[i] = f(l[i], r[i]);
		}
	}

	for ((d, l), r) in d.iter_mut().zip(l).zip(r) {
		*d = f(*l, *r);
	}
}

/// `d[i] = f(d[i], r[i])` for all `i < d.len()`
#[inline(always)]
fn zip_inplace_unroll<F: Fn(Limb, Limb) -> Limb>(d: &mut [Limb], r: &[Limb], f: F) {
	let r = &r[..d.len()];

	let (d_large, d) = d.as_chunks_mut::<UNROLL_LARGE>();
	let (r_large, r) = r.as_chunks::<UNROLL_LARGE>();
	for (d, r) in d_large.iter_mut().zip(r_large) {
		for i in 0..UNROLL_LARGE {
			d[i] = f(d[i], r[i]);
		}
	}

	let (d_small, d) = d.as_chunks_mut::<UNROLL_SMALL>();
	let (r_small, r) = r.as_chunks::<UNROLL_SMALL>();
	for (d, r) in d_small.iter_mut().zip(r_small) {
		for i in 0..UNROLL_SMALL {
			d[i] = f(d[i], r[i]);
		}
	}

	for (d, r) in d.iter_mut().zip(r) {
		*d = f(*d, *r);
	}
}

/// `d[i] = f(a[i])` for all `i < d.len()`
#[inline(always)]
fn map_unroll<F: Fn(Limb) -> Limb>(d: &mut [Limb], a: &[Limb], f: F) {
	let a = &a[..d.len()];

	let (d_large, d) = d.as_chunks_mut::<UNROLL_LARGE>();
	let (a_large, a) = a.as_chunks::<UNROLL_LARGE>();
	for (d, a) in d_large.iter_mut().zip(a_large) {
		for i in 0..UNROLL_LARGE {
			d[i] = f(a[i]);
		}
	}

	let (d_small, d) = d.as_chunks_mut::<UNROLL_SMALL>();
	let (a_small, a) = a.as_chunks::<UNROLL_SMALL>();
	for (d, a) in d_small.iter_mut().zip(a_small) {
		for i in 0..UNROLL_SMALL {
			d[i] = f(a[i]);
		}
	}

	for (d, a) in d.iter_mut().zip(a) {
		*d = f(*a);
	}
}

/// `d[i] = f(d[i])` for all `i < d.len()`
#[inline(always)]
fn map_inplace_unroll<F: Fn(Limb) -> Limb>(d: &mut [Limb], f: F) {
	let (d_large, d) = d.as_chunks_mut::<UNROLL_LARGE>();
	for d in d_large {
		for i in 0..UNROLL_LARGE {
			d[i] = f(d[i]);
		}
	}

	let (d_small, d) = d.as_chunks_mut::<UNROLL_SMALL>();
	for d in d_small {
		for i in 0..UNROLL_SMALL {
			d[i] = f(d[i]);
		}
	}

	for d in d {
		*d = f(*d);
	}
}

//--------------------------------------------------------------------------------------------------
// engine

/// `d = u(d)`
fn unary_inplace(u: UnaryOp, d: &mut [Limb]) {
	match u {
		UnaryOp::One | UnaryOp::Zero => d.fill(u.apply(Limb::ZERO)),
		UnaryOp::Neutral => {},
		UnaryOp::Not => map_inplace_unroll(d, |a| !a),
	}
}

/// `d = u(a)`, where `a` continues with `a_ext` beyond its stored limbs.
fn unary(u: UnaryOp, d: &mut [Limb], a: &[Limb], a_ext: Limb) {
	let n = d.len().min(a.len());
	let (head, tail) = d.split_at_mut(n);
	match u {
		UnaryOp::One | UnaryOp::Zero => {
			head.fill(u.apply(Limb::ZERO));
			tail.fill(u.apply(Limb::ZERO));
			return;
		},
		UnaryOp::Neutral => head.copy_from_slice(&a[..n]),
		UnaryOp::Not => map_unroll(head, a, |a| !a),
	}
	tail.fill(u.apply(a_ext));
}

/// `d = op(d, c)` for a sign extension `c`.
fn binary_inplace_const(op: BinaryOp, opt: SpanOption, d: &mut [Limb], c: Limb, c_signed: bool) {
	if !c_signed {
		unary_inplace(op.bind_zero(), d);
	} else if !opt.branchless() {
		unary_inplace(op.bind(c), d);
	} else {
		with_binary_fn!(op, f => map_inplace_unroll(d, |a| f(a, c)));
	}
}

/// `d = op(a, c)` for a sign extension `c`, where `a` continues with `a_ext`.
fn binary_const(
	op: BinaryOp, opt: SpanOption, d: &mut [Limb], a: &[Limb], a_ext: Limb, c: Limb, c_signed: bool,
) {
	if !c_signed {
		unary(op.bind_zero(), d, a, a_ext);
	} else if !opt.branchless() {
		unary(op.bind(c), d, a, a_ext);
	} else {
		let n = d.len().min(a.len());
		let (head, tail) = d.split_at_mut(n);
		with_binary_fn!(op, f => map_unroll(head, a, |a| f(a, c)));
		tail.fill(op.apply(a_ext, c));
	}
}

/// `d = op(d, r)`
fn binary_inplace(op: BinaryOp, opt: SpanOption, d: &mut [Limb], r: &[Limb]) {
	let r_ext = crate::span::sign_extension(r, opt.right_signed());

	let n = d.len().min(r.len());
	let (head, tail) = d.split_at_mut(n);
	with_binary_fn!(op, f => zip_inplace_unroll(head, r, f));

	binary_inplace_const(op, opt, tail, r_ext, opt.right_signed());
}

/// `d = op(l, r)`
fn binary(op: BinaryOp, opt: SpanOption, d: &mut [Limb], l: &[Limb], r: &[Limb]) {
	let l_ext = crate::span::sign_extension(l, opt.left_signed());
	let r_ext = crate::span::sign_extension(r, opt.right_signed());

	let common = l.len().min(r.len());
	let n = d.len().min(common);
	let (head, tail) = d.split_at_mut(n);
	with_binary_fn!(op, f => zip_unroll(head, l, r, f));

	if tail.is_empty() {
		return;
	}

	// Beyond the common part, the shorter operand is a constant. With equal lengths, both are.
	if l.len() > r.len() {
		binary_const(op, opt, tail, &l[common..], l_ext, r_ext, opt.right_signed());
	} else {
		binary_const(op.flip(), opt, tail, &r[common..], r_ext, l_ext, opt.left_signed());
	}
}

//--------------------------------------------------------------------------------------------------
// entry points

/// `d = u(r)`, where `r` is read with the `ARG_SIGNED` flag.
pub fn apply_unary<D, R>(u: UnaryOp, opt: SpanOption, d: &mut D, r: &R)
where
	D: LimbSpanMut + ?Sized,
	R: LimbSpan + ?Sized,
{
	log::trace!(
		"bitwise::apply_unary(): op = {u:?}, d = {}, r = {}, opt = {:?}",
		d.len(),
		r.len(),
		opt.flag_names()
	);
	if opt.no_overflow() {
		debug_assert!(d.len() >= r.len());
	}

	let r_ext = r.sign_extension(opt.right_signed());
	let d = d.limbs_mut();
	if D::EXTENT.may_exceed(R::EXTENT) {
		unary(u, d, r.limbs(), r_ext);
	} else {
		// `d` can't outlive `r`, so no sign extension is ever written.
		let n = d.len();
		unary(u, d, &r.limbs()[..n], r_ext);
	}
}

/// `d = u(d)`
pub fn apply_unary_inplace<D: LimbSpanMut + ?Sized>(u: UnaryOp, d: &mut D) {
	log::trace!("bitwise::apply_unary_inplace(): op = {u:?}, d = {}", d.len());
	unary_inplace(u, d.limbs_mut());
}

/// `d = op(l, r)`
///
/// Reads `LEFT_SIGNED`, `RIGHT_SIGNED` and `BRANCHLESS`. The result is truncated to the length
/// of `d`; with `NO_OVERFLOW`, `d` must be at least as long as both operands.
pub fn apply_binary<D, L, R>(op: BinaryOp, opt: SpanOption, d: &mut D, l: &L, r: &R)
where
	D: LimbSpanMut + ?Sized,
	L: LimbSpan + ?Sized,
	R: LimbSpan + ?Sized,
{
	log::trace!(
		"bitwise::apply_binary(): op = {op:?}, d = {}, l = {}, r = {}, opt = {:?}",
		d.len(),
		l.len(),
		r.len(),
		opt.flag_names()
	);
	if opt.no_overflow() {
		debug_assert!(d.len() >= l.len().max(r.len()));
	}

	let (l, r) = (l.limbs(), r.limbs());
	let d = d.limbs_mut();
	if D::EXTENT.may_exceed(Extent::max_of(&[L::EXTENT, R::EXTENT])) {
		binary(op, opt, d, l, r);
	} else {
		// `d` can't outlive the longer operand, so the constant-only region is never reached.
		let n = d.len();
		debug_assert!(n <= l.len().max(r.len()));
		binary(op, opt, d, &l[..n.min(l.len())], &r[..n.min(r.len())]);
	}
}

/// `d = op(d, r)`, with `d` as the left operand.
pub fn apply_binary_inplace<D, R>(op: BinaryOp, opt: SpanOption, d: &mut D, r: &R)
where
	D: LimbSpanMut + ?Sized,
	R: LimbSpan + ?Sized,
{
	log::trace!(
		"bitwise::apply_binary_inplace(): op = {op:?}, d = {}, r = {}, opt = {:?}",
		d.len(),
		r.len(),
		opt.flag_names()
	);
	binary_inplace(op, opt, d.limbs_mut(), r.limbs());
}

/// `d = !r`
pub fn bitnot<D, R>(opt: SpanOption, d: &mut D, r: &R)
where
	D: LimbSpanMut + ?Sized,
	R: LimbSpan + ?Sized,
{
	apply_unary(UnaryOp::Not, opt, d, r);
}

/// `d = !d`
pub fn bitnot_inplace<D: LimbSpanMut + ?Sized>(opt: SpanOption, d: &mut D) {
	log::trace!("bitwise::bitnot_inplace(): opt = {:?}", opt.flag_names());
	apply_unary_inplace(UnaryOp::Not, d);
}

macro_rules! binary_entry_points {
	($($name:ident, $inplace:ident => $op:ident;)*) => {$(
		#[doc = concat!("`d = l ", stringify!($op), " r`, see [`apply_binary()`].")]
		#[inline]
		pub fn $name<D, L, R>(opt: SpanOption, d: &mut D, l: &L, r: &R)
		where
			D: LimbSpanMut + ?Sized,
			L: LimbSpan + ?Sized,
			R: LimbSpan + ?Sized,
		{
			apply_binary(BinaryOp::$op, opt, d, l, r);
		}

		#[doc = concat!("`d = d ", stringify!($op), " r`, see [`apply_binary_inplace()`].")]
		#[inline]
		pub fn $inplace<D, R>(opt: SpanOption, d: &mut D, r: &R)
		where
			D: LimbSpanMut + ?Sized,
			R: LimbSpan + ?Sized,
		{
			apply_binary_inplace(BinaryOp::$op, opt, d, r);
		}
	)*};
}

binary_entry_points! {
	bitand, bitand_inplace => And;
	bitnand, bitnand_inplace => Nand;
	bitor, bitor_inplace => Or;
	bitnor, bitnor_inplace => Nor;
	bitxor, bitxor_inplace => Xor;
	bitxnor, bitxnor_inplace => Xnor;
	bitless, bitless_inplace => Less;
	bitgreater, bitgreater_inplace => Greater;
	bitleq, bitleq_inplace => Leq;
	bitgeq, bitgeq_inplace => Geq;
}
