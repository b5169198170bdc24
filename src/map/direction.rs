use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
    Northeast,
    Southeast,
    Southwest,
    Northwest,
}

/// Name and unit grid offset per direction, indexed by discriminant.
/// Screen coordinates: y grows downwards, so north is -1.
const TABLE: [(Direction, &str, (f64, f64)); 8] = [
    (Direction::North, "north", (0.0, -1.0)),
    (Direction::South, "south", (0.0, 1.0)),
    (Direction::East, "east", (1.0, 0.0)),
    (Direction::West, "west", (-1.0, 0.0)),
    (Direction::Northeast, "northeast", (1.0, -1.0)),
    (Direction::Southeast, "southeast", (1.0, 1.0)),
    (Direction::Southwest, "southwest", (-1.0, 1.0)),
    (Direction::Northwest, "northwest", (-1.0, -1.0)),
];

impl Direction {
    /// Exact, lower-case compass names only.
    pub fn from_name(name: &str) -> Option<Self> {
        TABLE.iter().find(|(_, n, _)| *n == name).map(|(d, _, _)| *d)
    }

    pub fn name(self) -> &'static str {
        TABLE[self as usize].1
    }

    pub fn offset(self) -> (f64, f64) {
        TABLE[self as usize].2
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
