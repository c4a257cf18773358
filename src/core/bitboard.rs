//! Fixed-size coordinate sets packed into an unsigned integer.
//!
//! Cell `(x, y)` lives at bit `y * N + x`. Membership, insertion and
//! iteration are the only operations the engine needs; iteration is always
//! row-major, so two sets with the same members iterate identically.

use std::ops::{BitAnd, BitOr};
use std::{fmt, mem};

use num_traits::{PrimInt, Unsigned, Zero};

use crate::core::common::GameError;
use crate::core::config::BOARD_SIZE;
use crate::core::geometry::Coord;

/// An N×N set of coordinates stored in `T`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitBoard<T, const N: usize>
where
    T: PrimInt + Unsigned + Zero,
{
    bits: T,
}

/// The set type used for hits, misses and occupancy on a standard board.
pub type CoordSet = BitBoard<u128, { BOARD_SIZE as usize }>;

impl<T, const N: usize> BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    const BOARD_BITS: usize = N * N;

    /// Empty set. `T` must hold at least N×N bits.
    #[inline]
    pub fn new() -> Self {
        debug_assert!(Self::BOARD_BITS <= mem::size_of::<T>() * 8);
        BitBoard { bits: T::zero() }
    }

    #[inline]
    fn bit(coord: Coord) -> Result<usize, GameError> {
        if coord.x < 0 || coord.y < 0 || coord.x as usize >= N || coord.y as usize >= N {
            return Err(GameError::OutOfBounds(coord));
        }
        Ok(coord.y as usize * N + coord.x as usize)
    }

    /// Off-board coordinates are never members.
    #[inline]
    pub fn contains(&self, coord: Coord) -> bool {
        match Self::bit(coord) {
            Ok(idx) => ((self.bits >> idx) & T::one()) != T::zero(),
            Err(_) => false,
        }
    }

    /// Add `coord`, returning whether it was newly inserted.
    pub fn insert(&mut self, coord: Coord) -> Result<bool, GameError> {
        let idx = Self::bit(coord)?;
        let was_set = self.contains(coord);
        self.bits = self.bits | (T::one() << idx);
        Ok(!was_set)
    }

    /// Remove `coord`, returning whether it was present.
    pub fn remove(&mut self, coord: Coord) -> bool {
        match Self::bit(coord) {
            Ok(idx) => {
                let was_set = self.contains(coord);
                self.bits = self.bits & !(T::one() << idx);
                was_set
            }
            Err(_) => false,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.is_zero()
    }

    pub fn is_disjoint(&self, other: &Self) -> bool {
        (*self & *other).is_empty()
    }

    /// Build a set from coordinates, failing on the first off-board entry.
    pub fn try_from_coords<I>(coords: I) -> Result<Self, GameError>
    where
        I: IntoIterator<Item = Coord>,
    {
        let mut set = Self::new();
        for coord in coords {
            set.insert(coord)?;
        }
        Ok(set)
    }

    /// Members in row-major order.
    pub fn iter(&self) -> Iter<'_, T, N> {
        Iter { set: self, idx: 0 }
    }
}

impl<T, const N: usize> Default for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> BitOr for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        BitBoard {
            bits: self.bits | rhs.bits,
        }
    }
}

impl<T, const N: usize> BitAnd for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        BitBoard {
            bits: self.bits & rhs.bits,
        }
    }
}

/// Iterator over the members of a [`BitBoard`].
pub struct Iter<'a, T, const N: usize>
where
    T: PrimInt + Unsigned + Zero,
{
    set: &'a BitBoard<T, N>,
    idx: usize,
}

impl<T, const N: usize> Iterator for Iter<'_, T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    type Item = Coord;

    fn next(&mut self) -> Option<Coord> {
        while self.idx < BitBoard::<T, N>::BOARD_BITS {
            let idx = self.idx;
            self.idx += 1;
            if ((self.set.bits >> idx) & T::one()) != T::zero() {
                return Some(Coord::new((idx % N) as i32, (idx / N) as i32));
            }
        }
        None
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    type Item = Coord;
    type IntoIter = Iter<'a, T, N>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, const N: usize> fmt::Debug for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter().map(|c| (c.x, c.y))).finish()
    }
}

/// Grid picture: `■` for members, `□` otherwise.
impl<T, const N: usize> fmt::Display for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..N {
            for x in 0..N {
                let mark = if self.contains(Coord::new(x as i32, y as i32)) {
                    '■'
                } else {
                    '□'
                };
                write!(f, "{} ", mark)?;
            }
            if y + 1 < N {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
impl<T, const N: usize> serde::Serialize for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

#[cfg(feature = "serde")]
impl<'de, T, const N: usize> serde::Deserialize<'de> for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let coords = <Vec<Coord> as serde::Deserialize>::deserialize(deserializer)?;
        Self::try_from_coords(coords).map_err(serde::de::Error::custom)
    }
}
