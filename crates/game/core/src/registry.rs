//! Flat registry of every tracked agent.
//!
//! The registry is the single source of truth for which agents exist. Agents
//! refer to each other only by [`AgentId`]; a removed agent simply stops
//! resolving, and whoever held its id drops it the next time they look.
//!
//! All queries are pure filters over a snapshot of ids, so callers can mutate
//! the registry (including removing agents) while walking a snapshot they took
//! earlier.

use std::collections::HashMap;

use crate::state::{AgentId, AgentRecord, Position, Team};

/// Storage for agent records keyed by id.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    agents: HashMap<AgentId, AgentRecord>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a record by id, returning the previous record.
    pub fn upsert(&mut self, agent: AgentRecord) -> Option<AgentRecord> {
        self.agents.insert(agent.id, agent)
    }

    /// Removes an agent. Removing an unknown id is a no-op.
    pub fn remove(&mut self, id: AgentId) -> Option<AgentRecord> {
        self.agents.remove(&id)
    }

    /// Removes every listed agent; unknown ids are ignored.
    pub fn remove_all(&mut self, ids: impl IntoIterator<Item = AgentId>) -> usize {
        ids.into_iter()
            .filter(|id| self.agents.remove(id).is_some())
            .count()
    }

    pub fn get(&self, id: AgentId) -> Option<&AgentRecord> {
        self.agents.get(&id)
    }

    pub fn get_mut(&mut self, id: AgentId) -> Option<&mut AgentRecord> {
        self.agents.get_mut(&id)
    }

    pub fn contains(&self, id: AgentId) -> bool {
        self.agents.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Resolves an id to a live record, or `None` if it is gone or dead.
    pub fn resolve_target(&self, id: AgentId) -> Option<&AgentRecord> {
        self.get(id).filter(|agent| agent.alive)
    }

    pub fn team_of(&self, id: AgentId) -> Option<Team> {
        self.get(id).map(|agent| agent.team)
    }

    /// Snapshot of every registered id, ordered by id.
    pub fn all_agents(&self) -> Vec<AgentId> {
        let mut ids: Vec<AgentId> = self.agents.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Agents whose tile distance to `origin` is at most `radius` (inclusive).
    pub fn agents_within_radius(&self, origin: Position, radius: u32) -> Vec<AgentId> {
        self.all_agents()
            .into_iter()
            .filter(|id| {
                self.get(*id)
                    .is_some_and(|agent| agent.position.distance(origin) <= radius)
            })
            .collect()
    }

    /// Other agents on the same (non-neutral) team as `origin`.
    pub fn teammates(&self, origin: AgentId) -> Vec<AgentId> {
        self.filter_by_team(origin, Team::is_ally_of)
    }

    /// Agents on a different non-neutral team than `origin`.
    pub fn opponents(&self, origin: AgentId) -> Vec<AgentId> {
        self.filter_by_team(origin, Team::is_opponent_of)
    }

    /// Stable sort of `ids` by ascending distance to `origin`.
    ///
    /// Ids that no longer resolve sort last, keeping their relative order.
    pub fn nearest_first(&self, ids: &[AgentId], origin: Position) -> Vec<AgentId> {
        let mut sorted = ids.to_vec();
        sorted.sort_by_key(|id| {
            self.get(*id)
                .map(|agent| agent.position.distance(origin))
                .unwrap_or(u32::MAX)
        });
        sorted
    }

    /// Nearest live opponent within `origin`'s sight radius.
    pub fn closest_opponent(&self, origin: AgentId) -> Option<AgentId> {
        self.closest_opponent_where(origin, |_| true)
    }

    /// Like [`Registry::closest_opponent`], skipping opponents rejected by
    /// `accept`.
    pub fn closest_opponent_where(
        &self,
        origin: AgentId,
        accept: impl Fn(&AgentRecord) -> bool,
    ) -> Option<AgentId> {
        let me = self.get(origin)?;
        let candidates: Vec<AgentId> = self
            .opponents(origin)
            .into_iter()
            .filter(|id| {
                self.resolve_target(*id).is_some_and(|other| {
                    other.position.distance(me.position) <= me.spatial.sight_radius
                        && accept(other)
                })
            })
            .collect();
        self.nearest_first(&candidates, me.position).first().copied()
    }

    fn filter_by_team(&self, origin: AgentId, relation: fn(Team, Team) -> bool) -> Vec<AgentId> {
        let Some(team) = self.team_of(origin) else {
            return Vec::new();
        };
        self.all_agents()
            .into_iter()
            .filter(|id| *id != origin)
            .filter(|id| self.get(*id).is_some_and(|other| relation(team, other.team)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::EntityId;

    fn agent(id: u32, team: u8, x: i32, y: i32) -> AgentRecord {
        AgentRecord::new(AgentId(id), EntityId(id), Team(team), Position::new(x, y))
    }

    fn registry() -> Registry {
        let mut registry = Registry::new();
        registry.upsert(agent(1, 1, 0, 0));
        registry.upsert(agent(2, 1, 2, 0));
        registry.upsert(agent(3, 2, 5, 0));
        registry.upsert(agent(4, 2, 9, 0));
        registry.upsert(agent(5, 0, 1, 1));
        registry
    }

    #[test]
    fn upsert_replaces_by_id() {
        let mut registry = registry();
        let previous = registry.upsert(agent(2, 2, 7, 7));
        assert_eq!(previous.map(|a| a.team), Some(Team(1)));
        assert_eq!(registry.len(), 5);
        assert_eq!(registry.team_of(AgentId(2)), Some(Team(2)));
    }

    #[test]
    fn removing_twice_is_the_same_as_removing_once() {
        let mut once = registry();
        once.remove(AgentId(3));

        let mut twice = registry();
        assert!(twice.remove(AgentId(3)).is_some());
        assert!(twice.remove(AgentId(3)).is_none());

        assert_eq!(once.all_agents(), twice.all_agents());
        assert_eq!(twice.remove_all([AgentId(3), AgentId(4), AgentId(4)]), 1);
    }

    #[test]
    fn snapshot_survives_mutation_while_iterating() {
        let mut registry = registry();
        let snapshot = registry.all_agents();
        for id in &snapshot {
            registry.remove(*id);
        }
        assert_eq!(snapshot.len(), 5);
        assert!(registry.is_empty());
    }

    #[test]
    fn radius_query_is_inclusive() {
        let registry = registry();
        let within = registry.agents_within_radius(Position::ORIGIN, 5);
        assert_eq!(within, vec![AgentId(1), AgentId(2), AgentId(3), AgentId(5)]);
    }

    #[test]
    fn team_queries_exclude_neutral_and_self() {
        let registry = registry();
        assert_eq!(registry.teammates(AgentId(1)), vec![AgentId(2)]);
        assert_eq!(registry.opponents(AgentId(1)), vec![AgentId(3), AgentId(4)]);
        assert!(registry.teammates(AgentId(5)).is_empty());
        assert!(registry.opponents(AgentId(5)).is_empty());
    }

    #[test]
    fn nearest_first_is_stable_and_ascending() {
        let mut registry = registry();
        registry.upsert(agent(6, 1, 0, 2)); // same distance as agent 2
        let order = registry.nearest_first(
            &[AgentId(4), AgentId(6), AgentId(2), AgentId(3), AgentId(99)],
            Position::ORIGIN,
        );
        assert_eq!(
            order,
            vec![AgentId(6), AgentId(2), AgentId(3), AgentId(4), AgentId(99)]
        );
    }

    #[test]
    fn closest_opponent_respects_sight_and_liveness() {
        let mut registry = registry();
        assert_eq!(registry.closest_opponent(AgentId(1)), Some(AgentId(3)));

        registry.get_mut(AgentId(3)).unwrap().alive = false;
        // Agent 4 sits at distance 9, beyond the default sight radius of 8.
        assert_eq!(registry.closest_opponent(AgentId(1)), None);

        registry.get_mut(AgentId(1)).unwrap().spatial.sight_radius = 9;
        assert_eq!(registry.closest_opponent(AgentId(1)), Some(AgentId(4)));
    }

    #[test]
    fn closest_opponent_where_falls_through_to_the_next_candidate() {
        let mut registry = registry();
        registry.get_mut(AgentId(1)).unwrap().spatial.sight_radius = 9;

        let skip_three = |other: &AgentRecord| other.id != AgentId(3);
        assert_eq!(
            registry.closest_opponent_where(AgentId(1), skip_three),
            Some(AgentId(4))
        );
        assert_eq!(registry.closest_opponent_where(AgentId(1), |_| false), None);
    }
}
