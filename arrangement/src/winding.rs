// facet/arrangement/src/winding.rs
//
// Copyright © 2024 The Facet Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Per-path winding numbers.

use facet_content::program::PathId;
use smallvec::SmallVec;
use std::fmt::{self, Debug, Formatter};
use std::ops::{Add, AddAssign, Neg, Sub};

/// A sparse map from path to winding number. Entries are sorted by path and never zero.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct WindingMap {
    entries: SmallVec<[(PathId, i32); 4]>,
}

impl WindingMap {
    #[inline]
    pub fn new() -> WindingMap {
        WindingMap { entries: SmallVec::new() }
    }

    #[inline]
    pub fn single(path: PathId, winding: i32) -> WindingMap {
        let mut map = WindingMap::new();
        map.add_delta(path, winding);
        map
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn get(&self, path: PathId) -> i32 {
        match self.entries.binary_search_by_key(&path, |&(path, _)| path) {
            Ok(index) => self.entries[index].1,
            Err(_) => 0,
        }
    }

    pub fn add_delta(&mut self, path: PathId, delta: i32) {
        if delta == 0 {
            return;
        }
        match self.entries.binary_search_by_key(&path, |&(path, _)| path) {
            Ok(index) => {
                self.entries[index].1 += delta;
                if self.entries[index].1 == 0 {
                    self.entries.remove(index);
                }
            }
            Err(index) => self.entries.insert(index, (path, delta)),
        }
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (PathId, i32)> + '_ {
        self.entries.iter().cloned()
    }
}

impl<'a> AddAssign<&'a WindingMap> for WindingMap {
    fn add_assign(&mut self, other: &'a WindingMap) {
        for (path, delta) in other.iter() {
            self.add_delta(path, delta);
        }
    }
}

impl<'a, 'b> Add<&'b WindingMap> for &'a WindingMap {
    type Output = WindingMap;
    #[inline]
    fn add(self, other: &'b WindingMap) -> WindingMap {
        let mut sum = self.clone();
        sum += other;
        sum
    }
}

impl<'a> Neg for &'a WindingMap {
    type Output = WindingMap;
    #[inline]
    fn neg(self) -> WindingMap {
        WindingMap {
            entries: self.entries.iter().map(|&(path, winding)| (path, -winding)).collect(),
        }
    }
}

impl<'a, 'b> Sub<&'b WindingMap> for &'a WindingMap {
    type Output = WindingMap;
    #[inline]
    fn sub(self, other: &'b WindingMap) -> WindingMap {
        self + &-other
    }
}

impl Debug for WindingMap {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        formatter.debug_map().entries(self.entries.iter().map(|&(path, winding)| (path.0, winding)))
                             .finish()
    }
}

#[cfg(test)]
mod test {
    use super::WindingMap;
    use facet_content::program::PathId;

    #[test]
    fn test_add_and_cancel() {
        let mut map = WindingMap::single(PathId(2), 1);
        map += &WindingMap::single(PathId(0), -1);
        assert_eq!(map.get(PathId(0)), -1);
        assert_eq!(map.get(PathId(1)), 0);
        assert_eq!(map.iter().map(|(path, _)| path).collect::<Vec<_>>(), vec![PathId(0), PathId(2)]);
        map += &(-&map.clone());
        assert!(map.is_zero());
    }

    #[test]
    fn test_sub() {
        let a = &WindingMap::single(PathId(1), 3) + &WindingMap::single(PathId(4), 1);
        let b = WindingMap::single(PathId(1), 1);
        let difference = &a - &b;
        assert_eq!(difference.get(PathId(1)), 2);
        assert_eq!(difference.get(PathId(4)), 1);
    }
}
