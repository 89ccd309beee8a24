use std::fmt;

/// Process-unique identifier for a behavior-driven agent.
///
/// Stable for the agent's whole lifetime and never reused by the scheduler's
/// allocator. Other agents only ever hold this id, never the record itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct AgentId(pub u32);

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "agent#{}", self.0)
    }
}

/// Back-reference to the world entity that carries an agent's body.
///
/// Used only for position and movement lookups through
/// [`MovementOracle`](crate::env::MovementOracle); the behavior engine never
/// owns the entity's lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Discrete grid position expressed in tile coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Tile distance (Chebyshev): diagonal steps cost the same as straight ones.
    pub fn distance(self, other: Position) -> u32 {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        dx.max(dy)
    }

    /// Adjacent tile one king-move closer to `other` (or `self` when already there).
    pub fn step_toward(self, other: Position) -> Position {
        Position::new(
            self.x + (other.x - self.x).signum(),
            self.y + (other.y - self.y).signum(),
        )
    }

    /// Adjacent tile one king-move farther from `other`.
    ///
    /// When both positions coincide there is no "away" direction; the step
    /// falls back to moving east so overlapping agents separate.
    pub fn step_away(self, other: Position) -> Position {
        let dx = (self.x - other.x).signum();
        let dy = (self.y - other.y).signum();
        if dx == 0 && dy == 0 {
            return Position::new(self.x + 1, self.y);
        }
        Position::new(self.x + dx, self.y + dy)
    }

    /// Adjacent tile for one of the eight king-move directions (`index % 8`).
    pub fn neighbor(self, index: u32) -> Position {
        const OFFSETS: [(i32, i32); 8] = [
            (0, -1),
            (1, -1),
            (1, 0),
            (1, 1),
            (0, 1),
            (-1, 1),
            (-1, 0),
            (-1, -1),
        ];
        let (dx, dy) = OFFSETS[(index % 8) as usize];
        Position::new(self.x + dx, self.y + dy)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Team tag used for alliance and opposition queries.
///
/// [`Team::NEUTRAL`] is neither ally nor opponent of anyone, itself included.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Team(pub u8);

impl Team {
    pub const NEUTRAL: Self = Self(0);

    #[inline]
    pub const fn is_neutral(self) -> bool {
        self.0 == Self::NEUTRAL.0
    }

    pub const fn is_ally_of(self, other: Team) -> bool {
        !self.is_neutral() && !other.is_neutral() && self.0 == other.0
    }

    pub const fn is_opponent_of(self, other: Team) -> bool {
        !self.is_neutral() && !other.is_neutral() && self.0 != other.0
    }
}

/// Scheduler frame counter. Only advances on frames that actually run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Frame(pub u64);

impl Frame {
    pub const ZERO: Self = Self(0);

    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
