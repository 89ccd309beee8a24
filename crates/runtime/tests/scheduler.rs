//! Frame loop behavior: dispatch order, suppression, reaping and failure
//! isolation.
mod common;

use combat_core::{
    BehaviorConfig, BehaviorEnv, Frame, OracleError, Phase, PolicyKind, Position, Suppression,
};
use combat_runtime::{RuntimeError, Scheduler};
use common::{Arena, GOBLINS, HEROES, SLASH};

#[test]
fn agents_are_dispatched_closest_first() {
    let mut arena = Arena::new();
    let far = arena.spawn(GOBLINS, Position::new(9, 0), &[SLASH], 20);
    let near = arena.spawn(GOBLINS, Position::new(0, 2), &[SLASH], 20);
    let mid = arena.spawn(GOBLINS, Position::new(-5, 3), &[SLASH], 20);

    let report = arena.tick();

    assert_eq!(report.dispatched, vec![near, mid, far]);
    assert!(report.failed.is_empty());
    assert_eq!(report.frame, Frame(1));
}

#[test]
fn agents_beyond_update_range_are_not_dispatched() {
    let config = BehaviorConfig::default().with_max_update_range(5);
    let mut arena = Arena::with_config(config, 1);
    let inside = arena.spawn(GOBLINS, Position::new(5, 0), &[SLASH], 20);
    arena.spawn(GOBLINS, Position::new(6, 0), &[SLASH], 20);

    let report = arena.tick();

    assert_eq!(report.dispatched, vec![inside]);
}

#[test]
fn primary_and_inanimate_agents_are_never_dispatched() {
    let mut arena = Arena::new();
    let dummy = combat_core::AgentTemplate::builder()
        .kind(combat_core::AgentKind::Inanimate)
        .build();
    let entity = arena.world.spawn_body(Position::new(1, 0), 10);
    arena
        .scheduler
        .spawn(&dummy, entity, Position::new(1, 0));

    let report = arena.tick();

    assert!(report.dispatched.is_empty());
}

#[test]
fn suppressed_frames_freeze_every_agent() {
    let mut arena = Arena::new();
    let goblin = arena.spawn(GOBLINS, Position::new(3, 0), &[SLASH], 20);
    arena.scheduler.provoke(goblin, arena.primary).unwrap();
    arena.tick();

    let frame = arena.scheduler.frame();
    let before = arena.agent(goblin).clone();

    arena.world.set_paused(true);
    for _ in 0..5 {
        let report = arena.tick();
        assert_eq!(report.suppressed, Some(Suppression::Paused));
        assert!(report.dispatched.is_empty());
    }
    arena.world.set_paused(false);
    arena.world.set_modal_blocking(true);
    assert_eq!(arena.tick().suppressed, Some(Suppression::ModalDialog));
    arena.world.set_modal_blocking(false);

    assert_eq!(arena.scheduler.frame(), frame);
    assert_eq!(arena.agent(goblin), &before);

    let report = arena.tick();
    assert!(!report.is_suppressed());
    assert_eq!(report.frame, frame.next());
    assert_eq!(arena.agent(goblin).timers.wait, before.timers.wait - 1);
}

#[test]
fn disabled_scheduler_reports_disabled() {
    let mut arena = Arena::new();
    arena.scheduler.set_enabled(false);

    let report = arena.tick();

    assert_eq!(report.suppressed, Some(Suppression::Disabled));
    assert_eq!(arena.scheduler.frame(), Frame::ZERO);
}

#[test]
fn dead_agents_are_reaped_but_the_primary_is_kept() {
    let mut arena = Arena::new();
    let goblin = arena.spawn(GOBLINS, Position::new(2, 0), &[SLASH], 20);
    let vanished = arena.spawn(GOBLINS, Position::new(4, 0), &[SLASH], 20);

    arena.world.kill(arena.agent(goblin).entity);
    arena.world.remove_body(arena.agent(vanished).entity);
    arena.world.kill(arena.agent(arena.primary).entity);

    let report = arena.tick();

    assert_eq!(report.reaped, vec![goblin, vanished]);
    assert!(arena.scheduler.agent(goblin).is_none());
    assert!(arena.scheduler.agent(arena.primary).is_some());
    assert!(!arena.agent(arena.primary).alive);
}

#[test]
fn removing_an_agent_twice_is_a_no_op() {
    let mut arena = Arena::new();
    let goblin = arena.spawn(GOBLINS, Position::new(2, 0), &[SLASH], 20);

    assert!(arena.scheduler.despawn(goblin));
    assert!(!arena.scheduler.despawn(goblin));
    assert_eq!(arena.scheduler.despawn_all([goblin, goblin]), 0);
    assert_eq!(arena.scheduler.registry().len(), 1);

    let report = arena.tick();
    assert!(report.dispatched.is_empty());
}

#[test]
fn one_failing_agent_does_not_stop_the_frame() {
    let mut arena = Arena::new();
    let broken = arena.spawn_with(
        GOBLINS,
        Position::new(1, 0),
        &[SLASH],
        1,
        PolicyKind::Custom("missing".into()),
    );
    let healthy = arena.spawn(GOBLINS, Position::new(0, 3), &[SLASH], 20);
    arena.scheduler.provoke(broken, arena.primary).unwrap();
    arena.scheduler.provoke(healthy, arena.primary).unwrap();

    // Reaches Decide on the first frame, then fails resolving its policy.
    let first = arena.tick();
    assert!(first.failed.is_empty());
    assert_eq!(arena.agent(broken).phase, Phase::Decide);

    let stuck = arena.agent(broken).clone();
    let report = arena.tick();

    assert_eq!(report.dispatched, vec![broken, healthy]);
    assert_eq!(report.failed, vec![broken]);
    assert_eq!(arena.agent(broken), &stuck);
    assert_eq!(arena.agent(healthy).phase, Phase::Approach);
}

#[test]
fn registered_custom_policy_is_used() {
    use combat_core::{ActionDecisionPolicy, Decision, DecisionContext};

    struct AlwaysPass;
    impl ActionDecisionPolicy for AlwaysPass {
        fn decide(&self, _ctx: &DecisionContext<'_>) -> Decision {
            Decision::Pass
        }
    }

    let mut arena = Arena::new();
    arena
        .scheduler
        .policies_mut()
        .register("passive", AlwaysPass);
    let goblin = arena.spawn_with(
        GOBLINS,
        Position::new(1, 0),
        &[SLASH],
        1,
        PolicyKind::Custom("passive".into()),
    );
    arena.scheduler.provoke(goblin, arena.primary).unwrap();

    arena.run(2);

    let record = arena.agent(goblin);
    assert_eq!(record.phase, Phase::Decide);
    assert!(!record.is_action_decided());
    assert_eq!(
        record.timers.wait,
        BehaviorConfig::DEFAULT_INVALID_DECISION_RETRY
    );
}

#[test]
fn tick_requires_a_registered_primary() {
    let world = combat_runtime::SandboxWorld::new();
    let actions = combat_content::ActionCatalog::default();
    let rng = combat_core::PcgRng;
    let env = world.env(&actions, &rng);

    let mut scheduler = Scheduler::builder().build();
    assert!(matches!(
        scheduler.tick(&env),
        Err(RuntimeError::PrimaryNotSet)
    ));
    assert!(matches!(
        scheduler.set_primary(combat_core::AgentId(4)),
        Err(RuntimeError::UnknownAgent(_))
    ));
}

#[test]
fn missing_movement_collaborator_is_an_error() {
    let mut arena = Arena::new();
    let env = BehaviorEnv::new(None, Some(&arena.world), None, None, None, None);

    let err = arena.scheduler.tick(&env).unwrap_err();

    assert!(matches!(
        err,
        RuntimeError::Oracle(OracleError::MovementNotAvailable)
    ));
    assert_eq!(arena.scheduler.frame(), Frame::ZERO);
}

#[test]
fn provocation_spreads_to_idle_followers() {
    let mut arena = Arena::new();
    let chief = arena.spawn(GOBLINS, Position::new(4, 0), &[SLASH], 20);
    let follower = arena.spawn(GOBLINS, Position::new(5, 1), &[SLASH], 20);
    let busy = arena.spawn(GOBLINS, Position::new(5, -1), &[SLASH], 20);
    let squire = arena.spawn(HEROES, Position::new(-1, 0), &[SLASH], 20);
    arena.scheduler.set_leader(follower, chief).unwrap();
    arena.scheduler.set_leader(busy, chief).unwrap();
    arena.scheduler.provoke(busy, squire).unwrap();

    arena.scheduler.provoke(chief, arena.primary).unwrap();

    assert_eq!(arena.agent(follower).current_target, Some(arena.primary));
    assert_eq!(arena.agent(follower).phase, Phase::Approach);
    assert_eq!(arena.agent(busy).current_target, Some(squire));
}

#[test]
fn same_seed_gives_the_same_fight() {
    fn fight(seed: u64) -> (Vec<combat_core::AgentRecord>, Vec<combat_runtime::Execution>) {
        let mut arena = Arena::with_config(BehaviorConfig::default(), seed);
        let goblins = [
            arena.spawn(GOBLINS, Position::new(3, 0), &[SLASH, common::RALLY], 4),
            arena.spawn(GOBLINS, Position::new(-2, 4), &[SLASH], 6),
        ];
        arena.spawn(HEROES, Position::new(0, 6), &[SLASH], 5);
        for goblin in goblins {
            arena.scheduler.provoke(goblin, arena.primary).unwrap();
        }
        for _ in 0..120 {
            arena.tick();
            arena.assert_invariants();
        }
        let records = arena
            .scheduler
            .registry()
            .all_agents()
            .into_iter()
            .map(|id| arena.agent(id).clone())
            .collect();
        (records, arena.world.executions())
    }

    let (records, executions) = fight(42);
    assert!(!executions.is_empty());
    assert_eq!(fight(42), (records, executions));
}
