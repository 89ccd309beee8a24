//! Shared arena for integration tests: a sandbox world, the bundled action
//! catalog and a scheduler with one primary agent at the origin.
#![allow(dead_code)]

use combat_content::ActionCatalog;
use combat_core::{
    ActionId, AgentId, AgentRecord, AgentTemplate, BehaviorConfig, PcgRng, PolicyKind, Position,
    Team,
};
use combat_runtime::{SandboxWorld, Scheduler, TickReport};

pub const SLASH: ActionId = ActionId(1);
pub const MEND: ActionId = ActionId(4);
pub const RALLY: ActionId = ActionId(5);

pub const HEROES: Team = Team(1);
pub const GOBLINS: Team = Team(2);

pub struct Arena {
    pub world: SandboxWorld,
    pub actions: ActionCatalog,
    pub rng: PcgRng,
    pub scheduler: Scheduler,
    pub primary: AgentId,
}

impl Arena {
    pub fn new() -> Self {
        Self::with_config(BehaviorConfig::default(), 7)
    }

    pub fn with_config(config: BehaviorConfig, seed: u64) -> Self {
        let world = SandboxWorld::new();
        let mut scheduler = Scheduler::builder().config(config).seed(seed).build();

        let hero = AgentTemplate::builder().team(HEROES).build();
        let entity = world.spawn_body(Position::ORIGIN, 1_000);
        let primary = scheduler.spawn(&hero, entity, Position::ORIGIN);
        scheduler.set_primary(primary).unwrap();

        Self {
            world,
            actions: ActionCatalog::embedded().unwrap(),
            rng: PcgRng,
            scheduler,
            primary,
        }
    }

    /// Spawns a combatant with a body of 100 hp at `at`.
    pub fn spawn(&mut self, team: Team, at: Position, actions: &[ActionId], think: u32) -> AgentId {
        self.spawn_with(team, at, actions, think, PolicyKind::FirstAvailable)
    }

    pub fn spawn_with(
        &mut self,
        team: Team,
        at: Position,
        actions: &[ActionId],
        think: u32,
        policy: PolicyKind,
    ) -> AgentId {
        let template = AgentTemplate::builder()
            .team(team)
            .actions(actions.iter().copied())
            .policy(policy)
            .think_frames(think)
            .build();
        let entity = self.world.spawn_body(at, 100);
        self.scheduler.spawn(&template, entity, at)
    }

    pub fn tick(&mut self) -> TickReport {
        let env = self.world.env(&self.actions, &self.rng);
        let report = self.scheduler.tick(&env).unwrap();
        self.world.advance();
        report
    }

    pub fn run(&mut self, frames: usize) {
        for _ in 0..frames {
            self.tick();
        }
    }

    pub fn agent(&self, id: AgentId) -> &AgentRecord {
        self.scheduler.agent(id).unwrap()
    }

    /// Panics if any registered agent breaks a record invariant.
    pub fn assert_invariants(&self) {
        for id in self.scheduler.registry().all_agents() {
            if let Err(violation) = self.agent(id).check_invariants() {
                panic!("frame {}: {}", self.scheduler.frame(), violation);
            }
        }
    }
}
