//! In-memory battlefield implementing every collaborator trait.
//!
//! The sandbox is used by the simulation binary and by tests. Bodies live on
//! an open grid with no collision; movement completes instantly and can be
//! made to linger with [`SandboxWorld::set_step_frames`]. Every movement and
//! resolver call is recorded so tests can assert on them.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use combat_core::{
    ActionId, ActionInstance, ActionOracle, ActionScope, AgentId, AgentRecord, BehaviorEnv,
    CapabilityOracle, EntityId, GlobalGate, InteractionResolver, MovementOracle, Position,
    ResolveError, RngOracle,
};

/// One recorded movement request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorldCall {
    Step {
        entity: EntityId,
        from: Position,
        to: Position,
    },
    Turn {
        entity: EntityId,
        toward: Position,
    },
}

impl WorldCall {
    pub fn entity(&self) -> EntityId {
        match self {
            Self::Step { entity, .. } | Self::Turn { entity, .. } => *entity,
        }
    }

    pub fn is_step(&self) -> bool {
        matches!(self, Self::Step { .. })
    }
}

/// One recorded resolver call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Execution {
    pub source: AgentId,
    pub target: Option<AgentId>,
    pub actions: Vec<ActionId>,
}

#[derive(Clone, Debug)]
struct Body {
    position: Position,
    hp: u32,
    max_hp: u32,
    moving_frames: u32,
    immobile: bool,
    silenced: bool,
}

impl Body {
    fn is_alive(&self) -> bool {
        self.hp > 0
    }
}

#[derive(Debug, Default)]
struct Gate {
    paused: Cell<bool>,
    modal: Cell<bool>,
    scripted: Cell<bool>,
}

/// In-memory world.
#[derive(Debug)]
pub struct SandboxWorld {
    bodies: RefCell<HashMap<EntityId, Body>>,
    next_entity: Cell<u32>,
    step_frames: Cell<u32>,
    damage: Cell<u32>,
    gate: Gate,
    calls: RefCell<Vec<WorldCall>>,
    executions: RefCell<Vec<Execution>>,
}

impl Default for SandboxWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl SandboxWorld {
    pub const DEFAULT_HP: u32 = 20;
    pub const DEFAULT_DAMAGE: u32 = 3;

    pub fn new() -> Self {
        Self {
            bodies: RefCell::new(HashMap::new()),
            next_entity: Cell::new(1),
            step_frames: Cell::new(0),
            damage: Cell::new(Self::DEFAULT_DAMAGE),
            gate: Gate::default(),
            calls: RefCell::new(Vec::new()),
            executions: RefCell::new(Vec::new()),
        }
    }

    /// Bundles this world with an action catalog and rng into a frame env.
    pub fn env<'a>(
        &'a self,
        actions: &'a dyn ActionOracle,
        rng: &'a dyn RngOracle,
    ) -> BehaviorEnv<'a> {
        BehaviorEnv::with_all(self, self, actions, self, self, rng)
    }

    /// Places a new body with `hp` hit points and returns its entity id.
    pub fn spawn_body(&self, position: Position, hp: u32) -> EntityId {
        let entity = EntityId(self.next_entity.get());
        self.next_entity.set(entity.0 + 1);
        self.bodies.borrow_mut().insert(
            entity,
            Body {
                position,
                hp,
                max_hp: hp,
                moving_frames: 0,
                immobile: false,
                silenced: false,
            },
        );
        entity
    }

    /// Removes a body from the world entirely.
    pub fn remove_body(&self, entity: EntityId) -> bool {
        self.bodies.borrow_mut().remove(&entity).is_some()
    }

    /// Moves a body without going through movement requests.
    pub fn teleport(&self, entity: EntityId, position: Position) {
        self.with_body(entity, |body| body.position = position);
    }

    pub fn kill(&self, entity: EntityId) {
        self.with_body(entity, |body| body.hp = 0);
    }

    pub fn hp(&self, entity: EntityId) -> Option<u32> {
        self.bodies.borrow().get(&entity).map(|body| body.hp)
    }

    pub fn set_immobile(&self, entity: EntityId, immobile: bool) {
        self.with_body(entity, |body| body.immobile = immobile);
    }

    /// A silenced body fails every capability check for actions.
    pub fn set_silenced(&self, entity: EntityId, silenced: bool) {
        self.with_body(entity, |body| body.silenced = silenced);
    }

    /// Frames a body stays "moving" after each step request.
    pub fn set_step_frames(&self, frames: u32) {
        self.step_frames.set(frames);
    }

    /// Damage dealt per enemy-scoped instance (and healed per ally-scoped one).
    pub fn set_damage(&self, damage: u32) {
        self.damage.set(damage);
    }

    pub fn set_paused(&self, paused: bool) {
        self.gate.paused.set(paused);
    }

    pub fn set_modal_blocking(&self, blocking: bool) {
        self.gate.modal.set(blocking);
    }

    pub fn set_scripted_sequence(&self, active: bool) {
        self.gate.scripted.set(active);
    }

    /// Advances in-flight movement by one frame.
    pub fn advance(&self) {
        for body in self.bodies.borrow_mut().values_mut() {
            body.moving_frames = body.moving_frames.saturating_sub(1);
        }
    }

    /// Recorded movement calls, oldest first.
    pub fn calls(&self) -> Vec<WorldCall> {
        self.calls.borrow().clone()
    }

    /// Recorded movement calls issued for `entity`.
    pub fn calls_for(&self, entity: EntityId) -> Vec<WorldCall> {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.entity() == entity)
            .copied()
            .collect()
    }

    /// Recorded resolver calls, oldest first.
    pub fn executions(&self) -> Vec<Execution> {
        self.executions.borrow().clone()
    }

    pub fn clear_log(&self) {
        self.calls.borrow_mut().clear();
        self.executions.borrow_mut().clear();
    }

    fn with_body(&self, entity: EntityId, f: impl FnOnce(&mut Body)) {
        if let Some(body) = self.bodies.borrow_mut().get_mut(&entity) {
            f(body);
        }
    }

    fn body_alive(&self, entity: EntityId) -> bool {
        self.bodies
            .borrow()
            .get(&entity)
            .is_some_and(Body::is_alive)
    }
}

impl MovementOracle for SandboxWorld {
    fn position(&self, entity: EntityId) -> Option<Position> {
        self.bodies.borrow().get(&entity).map(|body| body.position)
    }

    fn is_moving(&self, entity: EntityId) -> bool {
        self.bodies
            .borrow()
            .get(&entity)
            .is_some_and(|body| body.moving_frames > 0)
    }

    fn is_stopping(&self, _entity: EntityId) -> bool {
        false
    }

    fn step_toward(&self, entity: EntityId, destination: Position) {
        let step_frames = self.step_frames.get();
        let mut bodies = self.bodies.borrow_mut();
        let Some(body) = bodies.get_mut(&entity) else {
            return;
        };
        if !body.is_alive() || body.immobile {
            return;
        }
        let from = body.position;
        body.position = from.step_toward(destination);
        body.moving_frames = step_frames;
        self.calls.borrow_mut().push(WorldCall::Step {
            entity,
            from,
            to: body.position,
        });
    }

    fn turn_toward(&self, entity: EntityId, target: Position) {
        self.calls.borrow_mut().push(WorldCall::Turn {
            entity,
            toward: target,
        });
    }
}

impl CapabilityOracle for SandboxWorld {
    fn is_alive(&self, entity: EntityId) -> bool {
        self.body_alive(entity)
    }

    fn can_move(&self, agent: &AgentRecord) -> bool {
        self.bodies
            .borrow()
            .get(&agent.entity)
            .is_some_and(|body| body.is_alive() && !body.immobile)
    }

    fn can_execute(&self, agent: &AgentRecord, action: ActionId) -> bool {
        agent.actions.contains(&action)
            && self
                .bodies
                .borrow()
                .get(&agent.entity)
                .is_some_and(|body| body.is_alive() && !body.silenced)
    }
}

impl InteractionResolver for SandboxWorld {
    fn execute(
        &self,
        actions: &[ActionInstance],
        source: &AgentRecord,
        target: Option<&AgentRecord>,
    ) -> Result<(), ResolveError> {
        if actions.is_empty() {
            return Err(ResolveError::Empty { agent: source.id });
        }
        self.executions.borrow_mut().push(Execution {
            source: source.id,
            target: target.map(|record| record.id),
            actions: actions.iter().map(|instance| instance.action).collect(),
        });

        let Some(target) = target else {
            return Ok(());
        };
        if !self.body_alive(target.entity) {
            return Err(ResolveError::InvalidTarget { target: target.id });
        }

        let damage = self.damage.get();
        self.with_body(target.entity, |body| {
            for instance in actions {
                match instance.scope {
                    ActionScope::Enemy => body.hp = body.hp.saturating_sub(damage),
                    ActionScope::Ally => body.hp = (body.hp + damage).min(body.max_hp),
                    ActionScope::SelfTarget => {}
                }
            }
        });
        Ok(())
    }
}

impl GlobalGate for SandboxWorld {
    fn is_paused(&self) -> bool {
        self.gate.paused.get()
    }

    fn is_modal_blocking(&self) -> bool {
        self.gate.modal.get()
    }

    fn is_scripted_sequence_active(&self) -> bool {
        self.gate.scripted.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::{ActionProfile, Suppression, Team};

    #[test]
    fn steps_are_recorded_and_move_one_tile() {
        let world = SandboxWorld::new();
        let entity = world.spawn_body(Position::ORIGIN, 10);

        world.step_toward(entity, Position::new(5, -3));

        assert_eq!(world.position(entity), Some(Position::new(1, -1)));
        assert_eq!(
            world.calls(),
            vec![WorldCall::Step {
                entity,
                from: Position::ORIGIN,
                to: Position::new(1, -1)
            }]
        );
    }

    #[test]
    fn step_frames_keep_bodies_moving_until_advanced() {
        let world = SandboxWorld::new();
        world.set_step_frames(2);
        let entity = world.spawn_body(Position::ORIGIN, 10);

        world.step_toward(entity, Position::new(3, 0));
        assert!(world.is_moving(entity));
        world.advance();
        assert!(world.is_busy(entity));
        world.advance();
        assert!(!world.is_moving(entity));
    }

    #[test]
    fn immobile_bodies_ignore_steps() {
        let world = SandboxWorld::new();
        let entity = world.spawn_body(Position::ORIGIN, 10);
        world.set_immobile(entity, true);

        world.step_toward(entity, Position::new(3, 0));

        assert_eq!(world.position(entity), Some(Position::ORIGIN));
        assert!(world.calls().is_empty());
    }

    #[test]
    fn resolver_damages_enemies_and_heals_allies() {
        let world = SandboxWorld::new();
        let source_entity = world.spawn_body(Position::ORIGIN, 10);
        let target_entity = world.spawn_body(Position::new(1, 0), 10);
        let source = AgentRecord::new(AgentId(1), source_entity, Team(1), Position::ORIGIN);
        let target = AgentRecord::new(AgentId(2), target_entity, Team(2), Position::new(1, 0));

        let strike = ActionProfile::new(ActionId(1), "strike", ActionScope::Enemy, 1);
        world
            .execute(&[strike.instance()], &source, Some(&target))
            .unwrap();
        assert_eq!(world.hp(target_entity), Some(10 - SandboxWorld::DEFAULT_DAMAGE));

        let mend = ActionProfile::new(ActionId(2), "mend", ActionScope::Ally, 1);
        world
            .execute(&[mend.instance()], &source, Some(&target))
            .unwrap();
        assert_eq!(world.hp(target_entity), Some(10));

        world.kill(target_entity);
        assert_eq!(
            world.execute(&[strike.instance()], &source, Some(&target)),
            Err(ResolveError::InvalidTarget { target: AgentId(2) })
        );
        assert_eq!(world.executions().len(), 3);
    }

    #[test]
    fn gate_reports_first_active_reason() {
        let world = SandboxWorld::new();
        assert_eq!(world.suppression(), None);

        world.set_scripted_sequence(true);
        assert_eq!(world.suppression(), Some(Suppression::ScriptedSequence));

        world.set_paused(true);
        assert_eq!(world.suppression(), Some(Suppression::Paused));
    }
}
