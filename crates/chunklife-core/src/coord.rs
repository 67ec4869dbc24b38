use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul};

/// Integer 2-vector used for chunk indices, cell-local indices and pixel positions.
///
/// The three coordinate spaces are never mixed; which one a `Coord` belongs to
/// is decided by the API that hands it out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const ORIGIN: Coord = Coord { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Coord { x, y }
    }

    /// Check if this point lies in the half-open square `[origin, origin + side)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use chunklife_core::Coord;
    ///
    /// let origin = Coord::new(100, 100);
    /// assert!(Coord::new(100, 119).in_square(origin, 20));
    /// assert!(!Coord::new(120, 100).in_square(origin, 20));
    /// ```
    pub fn in_square(&self, origin: Coord, side: i32) -> bool {
        self.x >= origin.x
            && self.y >= origin.y
            && self.x < origin.x + side
            && self.y < origin.y + side
    }
}

impl Add for Coord {
    type Output = Coord;

    fn add(self, rhs: Coord) -> Coord {
        Coord::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Mul<Coord> for i32 {
    type Output = Coord;

    fn mul(self, rhs: Coord) -> Coord {
        Coord::new(self * rhs.x, self * rhs.y)
    }
}

impl Mul<i32> for Coord {
    type Output = Coord;

    fn mul(self, rhs: i32) -> Coord {
        rhs * self
    }
}

impl From<(i32, i32)> for Coord {
    fn from((x, y): (i32, i32)) -> Self {
        Coord::new(x, y)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_coord_value_equality() {
        assert_eq!(Coord::new(3, -4), Coord::new(3, -4));
        assert_ne!(Coord::new(3, -4), Coord::new(-4, 3));
        assert_eq!(Coord::default(), Coord::ORIGIN);
    }

    #[test]
    fn test_coord_as_map_key() {
        let mut map = HashMap::new();
        map.insert(Coord::new(1, 2), "a");
        map.insert(Coord::new(2, 1), "b");

        // A freshly built value finds the entry, identity is irrelevant
        assert_eq!(map.get(&Coord::new(1, 2)), Some(&"a"));
        assert_eq!(map.get(&Coord::new(2, 1)), Some(&"b"));
        assert_eq!(map.get(&Coord::new(0, 0)), None);
    }

    #[test]
    fn test_coord_add() {
        assert_eq!(Coord::new(1, 2) + Coord::new(10, -20), Coord::new(11, -18));
        assert_eq!(Coord::new(4, 4) + Coord::ORIGIN, Coord::new(4, 4));
    }

    #[test]
    fn test_coord_scale() {
        assert_eq!(3 * Coord::new(2, -5), Coord::new(6, -15));
        assert_eq!(Coord::new(2, -5) * 3, Coord::new(6, -15));
        assert_eq!(0 * Coord::new(7, 7), Coord::ORIGIN);
    }

    #[test]
    fn test_in_square_edges() {
        let origin = Coord::new(0, 0);
        assert!(Coord::new(0, 0).in_square(origin, 5));
        assert!(Coord::new(4, 4).in_square(origin, 5));
        assert!(!Coord::new(5, 4).in_square(origin, 5));
        assert!(!Coord::new(4, 5).in_square(origin, 5));
        assert!(!Coord::new(-1, 0).in_square(origin, 5));
    }

    #[test]
    fn test_display_and_from_tuple() {
        let coord: Coord = (7, -1).into();
        assert_eq!(coord, Coord::new(7, -1));
        assert_eq!(coord.to_string(), "(7, -1)");
    }

    #[test]
    fn test_serialization() {
        let coord = Coord::new(-3, 9);
        let json = serde_json::to_string(&coord).unwrap();
        assert_eq!(json, r#"{"x":-3,"y":9}"#);
        let back: Coord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, coord);
    }
}
