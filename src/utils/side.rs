#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::diff_iterable::Range;

/// One side of a two-way comparison.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    #[must_use]
    pub fn from_left(is_left: bool) -> Self { if is_left { Side::Left } else { Side::Right } }

    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    #[must_use]
    pub fn select<T>(self, left: T, right: T) -> T {
        match self {
            Side::Left => left,
            Side::Right => right,
        }
    }

    #[must_use]
    pub fn start(self, range: &Range) -> usize { self.select(range.start1, range.start2) }

    #[must_use]
    pub fn end(self, range: &Range) -> usize { self.select(range.end1, range.end2) }
}

/// One side of a three-way comparison.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThreeSide {
    Left,
    Base,
    Right,
}

impl ThreeSide {
    #[must_use]
    pub fn select<T>(self, left: T, base: T, right: T) -> T {
        match self {
            ThreeSide::Left => left,
            ThreeSide::Base => base,
            ThreeSide::Right => right,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_side_selection() {
        let range = Range::new(1, 2, 3, 4);

        assert_eq!(Side::Left.start(&range), 1);
        assert_eq!(Side::Right.end(&range), 4);
        assert_eq!(Side::from_left(false).other(), Side::Left);
        assert_eq!(ThreeSide::Base.select("l", "b", "r"), "b");
    }
}
