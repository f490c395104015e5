// facet/content/src/fill.rs
//
// Copyright © 2024 The Facet Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The fill rule, which determines how self-intersecting paths are filled.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The fill rule, which determines how self-intersecting paths are filled.
///
/// Paths that don't intersect themselves (and have no holes) are unaffected by the choice of fill
/// rule.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillRule {
    /// The nonzero rule: <https://en.wikipedia.org/wiki/Nonzero-rule>
    #[serde(rename = "nonzero")]
    Winding,
    /// The even-odd rule: <https://en.wikipedia.org/wiki/Even%E2%80%93odd_rule>
    EvenOdd,
}

impl Default for FillRule {
    #[inline]
    fn default() -> FillRule {
        FillRule::Winding
    }
}

impl FillRule {
    /// Returns true if a point with the given winding number is inside the path.
    #[inline]
    pub fn is_inside(self, winding: i32) -> bool {
        match self {
            FillRule::Winding => winding != 0,
            FillRule::EvenOdd => winding % 2 != 0,
        }
    }
}

impl FromStr for FillRule {
    type Err = ();

    fn from_str(string: &str) -> Result<FillRule, ()> {
        match string {
            "nonzero" | "winding" => Ok(FillRule::Winding),
            "evenodd" => Ok(FillRule::EvenOdd),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod test {
    use super::FillRule;

    #[test]
    fn test_fill_rules() {
        assert!(FillRule::Winding.is_inside(2));
        assert!(FillRule::Winding.is_inside(-1));
        assert!(!FillRule::Winding.is_inside(0));
        assert!(FillRule::EvenOdd.is_inside(-1));
        assert!(FillRule::EvenOdd.is_inside(3));
        assert!(!FillRule::EvenOdd.is_inside(2));
        assert!(!FillRule::EvenOdd.is_inside(-2));
    }

    #[test]
    fn test_parse() {
        assert_eq!("nonzero".parse(), Ok(FillRule::Winding));
        assert_eq!("evenodd".parse(), Ok(FillRule::EvenOdd));
        assert!("bogus".parse::<FillRule>().is_err());
    }
}
