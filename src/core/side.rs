//! Squad sides and per-side data storage.
//!
//! ## Side
//!
//! The two playing sides, `A` and `B`.
//!
//! ## SideMap
//!
//! Per-side storage indexed by `Side`, mirroring how squads, allocation
//! results and counters are kept for both sides at once.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two active squads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

impl Side {
    /// Both sides, A first.
    pub const BOTH: [Side; 2] = [Side::A, Side::B];

    /// The opposing side.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }

    const fn index(self) -> usize {
        match self {
            Side::A => 0,
            Side::B => 1,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::A => f.write_str("Squad A"),
            Side::B => f.write_str("Squad B"),
        }
    }
}

/// Data stored once per side.
///
/// ## Example
///
/// ```
/// use pickup_roster::core::{Side, SideMap};
///
/// let mut wins: SideMap<u32> = SideMap::default();
/// wins[Side::B] += 1;
///
/// assert_eq!(wins[Side::A], 0);
/// assert_eq!(wins[Side::B], 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SideMap<T> {
    data: [T; 2],
}

impl<T> SideMap<T> {
    /// Create from explicit values for A and B.
    pub fn new(a: T, b: T) -> Self {
        Self { data: [a, b] }
    }

    /// Create with values from a factory function.
    pub fn from_fn(mut factory: impl FnMut(Side) -> T) -> Self {
        Self::new(factory(Side::A), factory(Side::B))
    }

    #[must_use]
    pub fn get(&self, side: Side) -> &T {
        &self.data[side.index()]
    }

    pub fn get_mut(&mut self, side: Side) -> &mut T {
        &mut self.data[side.index()]
    }

    /// Iterate over (Side, &T) pairs, A first.
    pub fn iter(&self) -> impl Iterator<Item = (Side, &T)> {
        Side::BOTH.into_iter().zip(self.data.iter())
    }

    /// Transform each entry.
    pub fn map<U>(self, mut f: impl FnMut(Side, T) -> U) -> SideMap<U> {
        let [a, b] = self.data;
        SideMap::new(f(Side::A, a), f(Side::B, b))
    }

    /// Consume into the (A, B) pair.
    pub fn into_pair(self) -> (T, T) {
        let [a, b] = self.data;
        (a, b)
    }
}

impl<T> Index<Side> for SideMap<T> {
    type Output = T;

    fn index(&self, side: Side) -> &Self::Output {
        self.get(side)
    }
}

impl<T> IndexMut<Side> for SideMap<T> {
    fn index_mut(&mut self, side: Side) -> &mut Self::Output {
        self.get_mut(side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other() {
        assert_eq!(Side::A.other(), Side::B);
        assert_eq!(Side::B.other(), Side::A);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Side::A), "Squad A");
        assert_eq!(format!("{}", Side::B), "Squad B");
    }

    #[test]
    fn test_side_map_index() {
        let mut map = SideMap::new(vec![1], vec![2, 3]);
        map[Side::A].push(4);

        assert_eq!(map[Side::A], vec![1, 4]);
        assert_eq!(map[Side::B].len(), 2);
    }

    #[test]
    fn test_side_map_iter_order() {
        let map = SideMap::from_fn(|side| side);
        let sides: Vec<_> = map.iter().map(|(s, v)| (s, *v)).collect();

        assert_eq!(sides, vec![(Side::A, Side::A), (Side::B, Side::B)]);
    }

    #[test]
    fn test_side_map_map() {
        let map = SideMap::new(2, 3).map(|_, v| v * 10);
        assert_eq!(map.into_pair(), (20, 30));
    }
}
