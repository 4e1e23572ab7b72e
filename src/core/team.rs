//! Teams and per-team data storage.
//!
//! ## TeamIndex
//!
//! Position of a team in the configured team list. A game always has
//! exactly [`TEAM_COUNT`] teams.
//!
//! ## TeamMap
//!
//! Per-team storage backed by `Vec` for O(1) access, indexed by `TeamIndex`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Number of teams in a game.
pub const TEAM_COUNT: usize = 2;

/// Caller-supplied unique team identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(pub String);

impl TeamId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TeamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A team and its players, fixed once the game is configured.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub players: Vec<String>,
}

impl Team {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: TeamId::new(id),
            name: name.into(),
            players: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_player(mut self, player: impl Into<String>) -> Self {
        self.players.push(player.into());
        self
    }

    #[must_use]
    pub fn with_players<I, S>(mut self, players: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.players.extend(players.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn has_player(&self, player: &str) -> bool {
        self.players.iter().any(|p| p == player)
    }
}

/// Index of a team in the configured team list (0 or 1).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamIndex(pub u8);

impl TeamIndex {
    #[must_use]
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over every team index.
    pub fn all() -> impl Iterator<Item = TeamIndex> {
        (0..TEAM_COUNT as u8).map(TeamIndex)
    }
}

impl std::fmt::Display for TeamIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Team {}", self.0 + 1)
    }
}

/// Per-team data storage with O(1) access.
///
/// ```
/// use chhota_pandit::core::{TeamIndex, TeamMap};
///
/// let mut totals: TeamMap<u32> = TeamMap::with_default();
/// totals[TeamIndex::new(1)] += 3;
/// assert_eq!(totals[TeamIndex::new(0)], 0);
/// assert_eq!(totals[TeamIndex::new(1)], 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamMap<T> {
    data: Vec<T>,
}

impl<T> TeamMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(factory: impl Fn(TeamIndex) -> T) -> Self {
        Self {
            data: TeamIndex::all().map(factory).collect(),
        }
    }

    /// Create a map with default values.
    pub fn with_default() -> Self
    where
        T: Default,
    {
        Self::new(|_| T::default())
    }

    #[must_use]
    pub fn get(&self, team: TeamIndex) -> &T {
        &self.data[team.index()]
    }

    pub fn get_mut(&mut self, team: TeamIndex) -> &mut T {
        &mut self.data[team.index()]
    }

    /// Iterate over (TeamIndex, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (TeamIndex, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (TeamIndex(i as u8), v))
    }

    /// Iterate over (TeamIndex, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (TeamIndex, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (TeamIndex(i as u8), v))
    }
}

impl<T: Default> Default for TeamMap<T> {
    fn default() -> Self {
        Self::with_default()
    }
}

impl<T> Index<TeamIndex> for TeamMap<T> {
    type Output = T;

    fn index(&self, team: TeamIndex) -> &Self::Output {
        self.get(team)
    }
}

impl<T> IndexMut<TeamIndex> for TeamMap<T> {
    fn index_mut(&mut self, team: TeamIndex) -> &mut Self::Output {
        self.get_mut(team)
    }
}
