//! Frame loop and agent lifecycle.
//!
//! The [`Scheduler`] owns the registry of agents and runs one behavior pass
//! per [`tick`](Scheduler::tick). Agents near the primary agent are
//! dispatched closest-first; each dispatch works on a copy of the record that
//! is committed only if the handler succeeds.

use combat_core::{
    AgentId, AgentRecord, AgentTemplate, BehaviorConfig, BehaviorEnv, CapabilityOracle,
    CombatError, EntityId, Frame, MovementOracle, Position, Registry, Suppression,
};

use crate::api::{PolicyRegistry, Result, RuntimeError};
use crate::behavior::{BehaviorContext, execute_behavior};

/// What happened during one call to [`Scheduler::tick`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Frame the tick ran as, or the unchanged frame if it was suppressed.
    pub frame: Frame,
    pub suppressed: Option<Suppression>,
    /// Agents dispatched, in dispatch order.
    pub dispatched: Vec<AgentId>,
    /// Dispatched agents whose handler failed; their changes were dropped.
    pub failed: Vec<AgentId>,
    /// Agents removed because their entity vanished or died.
    pub reaped: Vec<AgentId>,
}

impl TickReport {
    fn running(frame: Frame) -> Self {
        Self {
            frame,
            ..Self::default()
        }
    }

    fn suppressed(frame: Frame, reason: Suppression) -> Self {
        Self {
            frame,
            suppressed: Some(reason),
            ..Self::default()
        }
    }

    pub fn is_suppressed(&self) -> bool {
        self.suppressed.is_some()
    }
}

/// Owns the battlefield's agents and drives them frame by frame.
#[derive(Debug)]
pub struct Scheduler {
    registry: Registry,
    config: BehaviorConfig,
    policies: PolicyRegistry,
    primary: Option<AgentId>,
    frame: Frame,
    seed: u64,
    enabled: bool,
    next_id: u32,
}

impl Scheduler {
    pub fn builder() -> SchedulerBuilder {
        SchedulerBuilder::new()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn config(&self) -> &BehaviorConfig {
        &self.config
    }

    pub fn policies_mut(&mut self) -> &mut PolicyRegistry {
        &mut self.policies
    }

    pub fn agent(&self, id: AgentId) -> Option<&AgentRecord> {
        self.registry.get(id)
    }

    pub fn frame(&self) -> Frame {
        self.frame
    }

    pub fn primary(&self) -> Option<AgentId> {
        self.primary
    }

    /// Marks `id` as the primary (player-controlled) agent.
    ///
    /// # Errors
    ///
    /// Returns `RuntimeError::UnknownAgent` if `id` is not registered.
    pub fn set_primary(&mut self, id: AgentId) -> Result<()> {
        if !self.registry.contains(id) {
            return Err(RuntimeError::UnknownAgent(id));
        }
        self.primary = Some(id);
        Ok(())
    }

    /// Scheduler-local switch; a disabled scheduler behaves like a paused game.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Creates an agent from `template` with a freshly allocated id.
    pub fn spawn(&mut self, template: &AgentTemplate, entity: EntityId, home: Position) -> AgentId {
        let id = self.allocate_id();
        self.registry.upsert(template.to_agent(id, entity, home));
        tracing::info!("spawned {} on entity {} at {}", id, entity, home);
        id
    }

    /// Inserts or replaces a record by id.
    pub fn upsert(&mut self, agent: AgentRecord) -> Option<AgentRecord> {
        self.next_id = self.next_id.max(agent.id.0.saturating_add(1));
        self.registry.upsert(agent)
    }

    /// Removes an agent. Removing an unknown id is a no-op.
    pub fn despawn(&mut self, id: AgentId) -> bool {
        let removed = self.registry.remove(id).is_some();
        if removed {
            tracing::info!("despawned {}", id);
        }
        removed
    }

    /// Removes every listed agent, returning how many were present.
    pub fn despawn_all(&mut self, ids: impl IntoIterator<Item = AgentId>) -> usize {
        let removed = self.registry.remove_all(ids);
        tracing::info!("despawned {} agents", removed);
        removed
    }

    /// Makes `agent` fight `source`.
    ///
    /// Followers of `agent` that are not already engaged pick up the same
    /// target.
    ///
    /// # Errors
    ///
    /// Returns `RuntimeError::UnknownAgent` if either agent is not registered.
    pub fn provoke(&mut self, agent: AgentId, source: AgentId) -> Result<()> {
        if !self.registry.contains(source) {
            return Err(RuntimeError::UnknownAgent(source));
        }
        let record = self
            .registry
            .get_mut(agent)
            .ok_or(RuntimeError::UnknownAgent(agent))?;
        record.engage(source)?;
        tracing::info!("{} provoked by {}", agent, source);

        let followers: Vec<AgentId> = self
            .registry
            .all_agents()
            .into_iter()
            .filter(|id| {
                self.registry.get(*id).is_some_and(|follower| {
                    follower.leader == Some(agent) && follower.alive && !follower.is_engaged()
                })
            })
            .collect();
        for id in followers {
            if let Some(follower) = self.registry.get_mut(id) {
                follower.engage(source)?;
                tracing::info!("{} follows {} against {}", id, agent, source);
            }
        }
        Ok(())
    }

    /// Sends a non-engaged agent to investigate `source`.
    ///
    /// Returns `false` if the agent is already engaged.
    ///
    /// # Errors
    ///
    /// Returns `RuntimeError::UnknownAgent` if `agent` is not registered.
    pub fn alert(&mut self, agent: AgentId, source: Position) -> Result<bool> {
        let record = self
            .registry
            .get_mut(agent)
            .ok_or(RuntimeError::UnknownAgent(agent))?;
        let alerted = record.raise_alert(source);
        if alerted {
            tracing::debug!("{} alerted toward {}", agent, source);
        }
        Ok(alerted)
    }

    /// Makes `follower` defer to `leader`'s decisions.
    ///
    /// # Errors
    ///
    /// Returns `RuntimeError::UnknownAgent` if either agent is not registered.
    pub fn set_leader(&mut self, follower: AgentId, leader: AgentId) -> Result<()> {
        if !self.registry.contains(leader) {
            return Err(RuntimeError::UnknownAgent(leader));
        }
        let record = self
            .registry
            .get_mut(follower)
            .ok_or(RuntimeError::UnknownAgent(follower))?;
        record.leader = Some(leader);
        Ok(())
    }

    /// Runs one frame.
    ///
    /// A suppressed frame changes nothing, not even the frame counter.
    ///
    /// # Errors
    ///
    /// Returns an error if the primary agent is unknown or the movement or
    /// capability collaborator is missing. Per-agent failures never abort the
    /// frame; they are logged and listed in [`TickReport::failed`].
    pub fn tick(&mut self, env: &BehaviorEnv<'_>) -> Result<TickReport> {
        let suppressed = if self.enabled {
            env.suppression()
        } else {
            Some(Suppression::Disabled)
        };
        if let Some(reason) = suppressed {
            tracing::trace!("frame suppressed: {}", reason);
            return Ok(TickReport::suppressed(self.frame, reason));
        }

        let primary = self.primary.ok_or(RuntimeError::PrimaryNotSet)?;
        if !self.registry.contains(primary) {
            return Err(RuntimeError::PrimaryMissing(primary));
        }
        let movement = env.movement()?;
        let capability = env.capability()?;

        self.frame = self.frame.next();
        let mut report = TickReport::running(self.frame);
        report.reaped = self.sync_world(primary, movement, capability);

        let origin = self
            .registry
            .get(primary)
            .map(|record| record.position)
            .ok_or(RuntimeError::PrimaryMissing(primary))?;
        let nearby = self
            .registry
            .agents_within_radius(origin, self.config.max_update_range);

        for id in self.registry.nearest_first(&nearby, origin) {
            let Some(record) = self.registry.get(id) else {
                continue;
            };
            if !is_manageable(record, primary, capability) {
                continue;
            }

            let mut working = record.clone();
            report.dispatched.push(id);
            let outcome = {
                let ctx = BehaviorContext {
                    registry: &self.registry,
                    config: &self.config,
                    policies: &self.policies,
                    env,
                    frame: self.frame,
                    seed: self.seed,
                };
                execute_behavior(&mut working, &ctx)
            };

            match outcome {
                Ok(()) => {
                    self.registry.upsert(working);
                }
                Err(err) => {
                    tracing::warn!(
                        "{} skipped on frame {} [{}]: {}",
                        id,
                        self.frame,
                        err.error_code(),
                        err
                    );
                    report.failed.push(id);
                }
            }
        }

        tracing::trace!(
            "frame {}: {} dispatched, {} failed, {} reaped",
            self.frame,
            report.dispatched.len(),
            report.failed.len(),
            report.reaped.len()
        );
        Ok(report)
    }

    /// Refreshes position and liveness proxies and removes agents whose
    /// entity is gone. The primary agent is synced but never removed.
    fn sync_world(
        &mut self,
        primary: AgentId,
        movement: &dyn MovementOracle,
        capability: &dyn CapabilityOracle,
    ) -> Vec<AgentId> {
        let mut reaped = Vec::new();
        for id in self.registry.all_agents() {
            let Some(record) = self.registry.get_mut(id) else {
                continue;
            };
            let position = movement.position(record.entity);
            let alive = position.is_some() && capability.is_alive(record.entity);
            if let Some(position) = position {
                record.position = position;
            }
            record.alive = alive;

            if !alive && id != primary {
                self.registry.remove(id);
                tracing::info!("reaped {}", id);
                reaped.push(id);
            }
        }
        reaped
    }

    fn allocate_id(&mut self) -> AgentId {
        while self.registry.contains(AgentId(self.next_id)) {
            self.next_id += 1;
        }
        let id = AgentId(self.next_id);
        self.next_id += 1;
        id
    }
}

/// Dead, primary and inanimate agents are never dispatched.
fn is_manageable(record: &AgentRecord, primary: AgentId, capability: &dyn CapabilityOracle) -> bool {
    record.id != primary
        && !record.is_inanimate()
        && record.alive
        && capability.is_alive(record.entity)
}

/// Builder for [`Scheduler`].
#[derive(Debug, Default)]
pub struct SchedulerBuilder {
    config: Option<BehaviorConfig>,
    policies: Option<PolicyRegistry>,
    seed: u64,
}

impl SchedulerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: BehaviorConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn policies(mut self, policies: PolicyRegistry) -> Self {
        self.policies = Some(policies);
        self
    }

    /// Base seed for every roll; same seed and world give the same run.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn build(self) -> Scheduler {
        Scheduler {
            registry: Registry::new(),
            config: self.config.unwrap_or_default(),
            policies: self.policies.unwrap_or_default(),
            primary: None,
            frame: Frame::ZERO,
            seed: self.seed,
            enabled: true,
            next_id: 1,
        }
    }
}
