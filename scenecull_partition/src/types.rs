// Copyright 2025 the Scenecull Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive geometry types and helpers.

use core::cmp::Ordering;
use core::fmt::Debug;

/// Axis-aligned bounding box in 2D.
///
/// Bounds are inclusive: a box whose `max` equals another box's `min` touches it,
/// and a zero-area box is a valid point.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Aabb2D<T> {
    /// Minimum x (left)
    pub min_x: T,
    /// Minimum y (top)
    pub min_y: T,
    /// Maximum x (right)
    pub max_x: T,
    /// Maximum y (bottom)
    pub max_y: T,
}

impl<T> Aabb2D<T> {
    /// Create a new AABB from min/max corners.
    pub const fn new(min_x: T, min_y: T, max_x: T, max_y: T) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }
}

impl<T: Copy + PartialOrd> Aabb2D<T> {
    /// Whether this AABB contains the point.
    pub fn contains_point(&self, x: T, y: T) -> bool {
        le(self.min_x, x) && le(self.min_y, y) && le(x, self.max_x) && le(y, self.max_y)
    }

    /// The intersection of two AABBs.
    pub fn intersect(&self, other: &Self) -> Self {
        let min_x = max_t(self.min_x, other.min_x);
        let min_y = max_t(self.min_y, other.min_y);
        let max_x = min_t(self.max_x, other.max_x);
        let max_y = min_t(self.max_y, other.max_y);
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Whether the two AABBs share at least one point.
    pub fn intersects(&self, other: &Self) -> bool {
        !self.intersect(other).is_empty()
    }

    /// Return true if the AABB is empty or inverted (no area). Assumes no NaN.
    pub fn is_empty(&self) -> bool {
        lt(self.max_x, self.min_x) || lt(self.max_y, self.min_y)
    }

    /// Lower bound along `axis`.
    #[inline]
    pub fn lo(&self, axis: Axis) -> T {
        match axis {
            Axis::X => self.min_x,
            Axis::Y => self.min_y,
        }
    }

    /// Upper bound along `axis`.
    #[inline]
    pub fn hi(&self, axis: Axis) -> T {
        match axis {
            Axis::X => self.max_x,
            Axis::Y => self.max_y,
        }
    }

    /// Which side of the split line at `pos` along `axis` this box lies on.
    #[inline]
    pub fn side(&self, axis: Axis, pos: T) -> Side {
        if lt(self.hi(axis), pos) {
            Side::Low
        } else if lt(pos, self.lo(axis)) {
            Side::High
        } else {
            Side::Straddle
        }
    }
}

impl<T: Scalar> Aabb2D<T> {
    /// Center of the box, rounded toward negative infinity for integers.
    #[inline]
    pub fn center(&self) -> (T, T) {
        (T::mid(self.min_x, self.max_x), T::mid(self.min_y, self.max_y))
    }

    /// True when no coordinate is NaN and `min <= max` on both axes.
    pub fn is_valid(&self) -> bool {
        self.min_x.is_valid()
            && self.min_y.is_valid()
            && self.max_x.is_valid()
            && self.max_y.is_valid()
            && le(self.min_x, self.max_x)
            && le(self.min_y, self.max_y)
    }

    /// Squared distance from the point to the closest point of the box.
    ///
    /// Zero when the point lies inside or on the boundary.
    pub fn distance_sq_to_point(&self, x: T, y: T) -> T::Acc {
        let dx = axis_gap(self.min_x, self.max_x, x);
        let dy = axis_gap(self.min_y, self.max_y, y);
        T::acc_add_sq(T::acc_add_sq(T::acc_from_usize(0), dx), dy)
    }
}

fn axis_gap<T: Scalar>(lo: T, hi: T, v: T) -> T::Acc {
    if lt(v, lo) {
        T::widen(lo) - T::widen(v)
    } else if lt(hi, v) {
        T::widen(v) - T::widen(hi)
    } else {
        T::acc_from_usize(0)
    }
}

impl Aabb2D<f32> {
    /// Create an AABB from origin and size in f32.
    pub const fn from_xywh(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x + w,
            max_y: y + h,
        }
    }
}

impl Aabb2D<f64> {
    /// Create an AABB from origin and size in f64.
    pub const fn from_xywh(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x + w,
            max_y: y + h,
        }
    }
}

impl Aabb2D<i64> {
    /// Create an AABB from origin and size in i64.
    pub const fn from_xywh(x: i64, y: i64, w: i64, h: i64) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x + w,
            max_y: y + h,
        }
    }
}

/// A splitting dimension.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Horizontal (dimension 0).
    X,
    /// Vertical (dimension 1).
    Y,
}

impl Axis {
    /// The other axis.
    #[inline]
    pub const fn flip(self) -> Self {
        match self {
            Self::X => Self::Y,
            Self::Y => Self::X,
        }
    }

    /// Pick the component of a point that lies along this axis.
    #[inline]
    pub fn pick<T>(self, x: T, y: T) -> T {
        match self {
            Self::X => x,
            Self::Y => y,
        }
    }
}

/// Placement of a box relative to a split line.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// Entirely below the split (`max < pos`).
    Low,
    /// Entirely above the split (`min > pos`).
    High,
    /// Touches or crosses the split line.
    Straddle,
}

impl Side {
    /// Whether a query box on this side of a split can reach boxes placed on `half`.
    ///
    /// Straddling children are always reachable, so only `Low` and `High` are
    /// meaningful for `half`.
    #[inline]
    pub fn reaches(self, half: Self) -> bool {
        self == Self::Straddle || half == Self::Straddle || self == half
    }
}

/// Numeric scalar abstraction for 2D AABBs used by backends.
///
/// This trait provides the operations the partitioning heuristics need (centers,
/// means and variances) and an associated widened accumulator type
/// (e.g., f32→f64, i64→i128) so sums over many items stay precise.
///
/// For `i64`, squared deviations are accumulated in `i128` and saturate at
/// `i128::MAX`, so boxes anywhere in the `i64` range are accepted.
pub trait Scalar: Copy + PartialOrd + Debug + 'static {
    /// Widened accumulator type suitable for sums and squared distances.
    type Acc: Copy
        + PartialOrd
        + core::ops::Add<Output = Self::Acc>
        + core::ops::Sub<Output = Self::Acc>
        + core::ops::Mul<Output = Self::Acc>
        + Debug;

    /// Midpoint between a and b (used for centers).
    fn mid(a: Self, b: Self) -> Self;

    /// Convert a scalar to the accumulator type.
    fn widen(v: Self) -> Self::Acc;

    /// Convert a `usize` to the accumulator type.
    fn acc_from_usize(n: usize) -> Self::Acc;

    /// `acc + d * d`. Integer accumulators saturate instead of overflowing.
    fn acc_add_sq(acc: Self::Acc, d: Self::Acc) -> Self::Acc;

    /// Narrow `sum / n` back to the scalar type. `n` is never zero.
    fn mean(sum: Self::Acc, n: usize) -> Self;

    /// False for NaN.
    fn is_valid(self) -> bool;
}

impl Scalar for f32 {
    type Acc = f64;

    #[inline]
    fn mid(a: Self, b: Self) -> Self {
        0.5 * (a + b)
    }

    #[inline]
    fn widen(v: Self) -> Self::Acc {
        v as f64
    }

    #[inline]
    fn acc_from_usize(n: usize) -> Self::Acc {
        n as f64
    }

    #[inline]
    fn acc_add_sq(acc: Self::Acc, d: Self::Acc) -> Self::Acc {
        acc + d * d
    }

    #[inline]
    fn mean(sum: Self::Acc, n: usize) -> Self {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "The mean of f32 values fits in f32; only precision is lost."
        )]
        let m = (sum / n as f64) as f32;
        m
    }

    #[inline]
    fn is_valid(self) -> bool {
        !self.is_nan()
    }
}

impl Scalar for f64 {
    type Acc = Self;

    #[inline]
    fn mid(a: Self, b: Self) -> Self {
        0.5 * (a + b)
    }

    #[inline]
    fn widen(v: Self) -> Self::Acc {
        v
    }

    #[inline]
    fn acc_from_usize(n: usize) -> Self::Acc {
        n as Self::Acc
    }

    #[inline]
    fn acc_add_sq(acc: Self::Acc, d: Self::Acc) -> Self::Acc {
        acc + d * d
    }

    #[inline]
    fn mean(sum: Self::Acc, n: usize) -> Self {
        sum / n as Self
    }

    #[inline]
    fn is_valid(self) -> bool {
        !self.is_nan()
    }
}

impl Scalar for i64 {
    type Acc = i128;

    #[inline]
    fn mid(a: Self, b: Self) -> Self {
        // Average without overflow: (a & b) + ((a ^ b) >> 1)
        (a & b) + ((a ^ b) >> 1)
    }

    #[inline]
    fn widen(v: Self) -> Self::Acc {
        v as i128
    }

    #[inline]
    fn acc_from_usize(n: usize) -> Self::Acc {
        n as i128
    }

    #[inline]
    fn acc_add_sq(acc: Self::Acc, d: Self::Acc) -> Self::Acc {
        acc.saturating_add(d.saturating_mul(d))
    }

    #[inline]
    fn mean(sum: Self::Acc, n: usize) -> Self {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "The mean of i64 values is itself within i64 range."
        )]
        let m = sum.div_euclid(n as i128) as i64;
        m
    }

    #[inline]
    fn is_valid(self) -> bool {
        true
    }
}

/// Helper alias for the widened accumulator type associated with a scalar `T`.
pub type ScalarAcc<T> = <T as Scalar>::Acc;

pub(crate) fn min_t<T: PartialOrd + Copy>(a: T, b: T) -> T {
    match a.partial_cmp(&b) {
        Some(Ordering::Greater) => b,
        _ => a,
    }
}

pub(crate) fn max_t<T: PartialOrd + Copy>(a: T, b: T) -> T {
    match a.partial_cmp(&b) {
        Some(Ordering::Less) => b,
        _ => a,
    }
}

pub(crate) fn le<T: PartialOrd>(a: T, b: T) -> bool {
    a.partial_cmp(&b)
        .map(|o| o != Ordering::Greater)
        .unwrap_or(false)
}

pub(crate) fn lt<T: PartialOrd>(a: T, b: T) -> bool {
    a.partial_cmp(&b)
        .map(|o| o == Ordering::Less)
        .unwrap_or(false)
}
