//! Cardinal direction vectors and cluster edges
//!
//! Push directions are locked to the eight compass points; a component is either
//! -1, 0 or 1. Screen coordinates are used throughout, so positive `y` is down.

use std::fmt;

/// Integer direction vector with components in `{-1, 0, 1}`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Direction {
    /// Horizontal component
    pub x: i32,
    /// Vertical component
    pub y: i32,
}

impl Direction {
    /// Push towards increasing `x`
    pub const RIGHT: Self = Self::new(1, 0);
    /// Push towards decreasing `x`
    pub const LEFT: Self = Self::new(-1, 0);
    /// Push towards decreasing `y`
    pub const UP: Self = Self::new(0, -1);
    /// Push towards increasing `y`
    pub const DOWN: Self = Self::new(0, 1);

    /// Create a direction, clamping each component to its sign
    pub const fn new(x: i32, y: i32) -> Self {
        Self {
            x: x.signum(),
            y: y.signum(),
        }
    }

    /// Whether both components are zero
    pub const fn is_zero(self) -> bool {
        self.x == 0 && self.y == 0
    }

    /// Whether both components are non-zero
    pub const fn is_diagonal(self) -> bool {
        self.x != 0 && self.y != 0
    }

    /// Opposite direction
    #[must_use]
    pub const fn reversed(self) -> Self {
        Self::new(-self.x, -self.y)
    }

    /// Direction with `x` and `y` exchanged
    #[must_use]
    pub const fn swapped(self) -> Self {
        Self::new(self.y, self.x)
    }

    /// Horizontal part only
    #[must_use]
    pub const fn horizontal(self) -> Self {
        Self::new(self.x, 0)
    }

    /// Vertical part only
    #[must_use]
    pub const fn vertical(self) -> Self {
        Self::new(0, self.y)
    }

    /// Dot product, used to score how well two directions agree
    pub const fn dot(self, other: Self) -> i32 {
        self.x * other.x + self.y * other.y
    }

    /// Leading edge of a cluster pushed in this direction
    ///
    /// The horizontal component wins; a zero vector leads with the bottom edge.
    pub const fn leading_edge(self) -> Edge {
        if self.x < 0 {
            Edge::Left
        } else if self.x > 0 {
            Edge::Right
        } else if self.y < 0 {
            Edge::Top
        } else {
            Edge::Bottom
        }
    }

    /// Candidate push directions in priority order
    ///
    /// A diagonal vector is split into its components, horizontal first, then the
    /// reversed components. A straight vector is tried forwards and backwards, then
    /// on the perpendicular axis forwards and backwards.
    pub fn push_order(self) -> Vec<Self> {
        if self.is_diagonal() {
            let reversed = self.reversed();
            vec![
                self.horizontal(),
                self.vertical(),
                reversed.horizontal(),
                reversed.vertical(),
            ]
        } else {
            let swapped = self.swapped();
            vec![self, self.reversed(), swapped, swapped.reversed()]
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Side of a cluster
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    /// Side facing decreasing `x`
    Left,
    /// Side facing decreasing `y`
    Top,
    /// Side facing increasing `x`
    Right,
    /// Side facing increasing `y`
    Bottom,
}

impl Edge {
    /// All four edges
    pub const ALL: [Self; 4] = [Self::Left, Self::Top, Self::Right, Self::Bottom];

    /// Unit cell offset of one shift step led by this edge
    pub const fn step(self) -> (i32, i32) {
        match self {
            Self::Left => (-1, 0),
            Self::Top => (0, -1),
            Self::Right => (1, 0),
            Self::Bottom => (0, 1),
        }
    }

    /// Whether the edge moves along the `x` axis
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Left => "left",
            Self::Top => "top",
            Self::Right => "right",
            Self::Bottom => "bottom",
        };
        f.write_str(name)
    }
}

/// Sign of a float with zero mapping to zero
pub const fn sign(value: f64) -> i32 {
    if value > 0.0 {
        1
    } else if value < 0.0 {
        -1
    } else {
        0
    }
}

/// Lock an arbitrary offset to one of the eight compass directions
///
/// A component survives when the offset's angle leaves more than half of the unit
/// vector on that axis. An undetermined angle (both deltas zero) yields the zero
/// vector.
pub fn compute_direction_vector(delta_x: f64, delta_y: f64) -> Direction {
    let angle = (delta_y / delta_x).atan();

    let x = if angle.cos().abs() > 0.5 {
        sign(delta_x)
    } else {
        0
    };
    let y = if angle.sin().abs() > 0.5 {
        sign(delta_y)
    } else {
        0
    };
    Direction::new(x, y)
}
