//! Behavioural test: a bee flies in, wanders, and is removed once it leaves
//! the viewport.

#[path = "support/thread_safe_app.rs"]
mod thread_safe_app;

#[path = "support/rspec_runner.rs"]
mod rspec_runner;

#[path = "support/swarm_fixture.rs"]
mod swarm_fixture;

use bevy::prelude::*;
use buzz::{BeeAnimation, BeeBounds, FlightPhase, SwarmSettings};
use rspec::block::Context as Scenario;
use rspec_runner::run_serial;
use swarm_fixture::{SwarmFixture, DEFAULT_STEP};

/// Upper bound on frames for the entry leg; entry takes at most 1.5 s here.
const MAX_ENTRY_FRAMES: usize = 40;

fn lone_bee() -> SwarmFixture {
    SwarmFixture::seeded(
        SwarmSettings {
            spawn_chance: 0.0,
            initial_bees: 1,
            seed: Some(11),
            ..SwarmSettings::default()
        },
        DEFAULT_STEP,
    )
}

fn has_entered(state: &SwarmFixture) -> bool {
    state
        .bees()
        .first()
        .is_none_or(|(_, bee, _, _)| bee.has_entered())
}

fn fly_until_entered(state: &SwarmFixture) {
    for _ in 0..MAX_ENTRY_FRAMES {
        state.tick(1);
        if has_entered(state) {
            return;
        }
    }
}

/// Moves every bee well outside the viewport, bounds included.
fn carry_off(state: &SwarmFixture) {
    let mut app = state.app_guard();
    let world = app.world_mut();
    let mut query = world.query::<(&mut Transform, &mut BeeBounds)>();
    for (mut transform, mut bounds) in query.iter_mut(world) {
        let offset = Vec3::new(100.0, 100.0, 0.0);
        transform.translation += offset;
        bounds.translate(offset);
    }
}

fn animation_time(state: &SwarmFixture) -> Option<f32> {
    let mut app = state.app_guard();
    let world = app.world_mut();
    let mut query = world.query::<&BeeAnimation>();
    query.iter(world).next().map(|animation| animation.elapsed)
}

#[test]
fn bee_enters_wanders_and_leaves() {
    run_serial(&rspec::given(
        "a swarm of one bee",
        lone_bee(),
        |scenario: &mut Scenario<SwarmFixture>| {
            scenario.when("the bee flies until it reaches the viewport", |ctx| {
                ctx.before_all(|state| fly_until_entered(state));

                ctx.then("the bee is still alive", |state| {
                    assert_eq!(state.bee_count(), 1);
                });

                ctx.then("the bee has switched to wandering", |state| {
                    let bees = state.bees();
                    let (_, bee, _, bounds) = bees
                        .first()
                        .unwrap_or_else(|| panic!("bee vanished before entering"));
                    assert_eq!(bee.phase, FlightPhase::Wandering);
                    assert!(bounds.intersects(state.viewport().bounds()));
                });

                ctx.then("the wing animation kept time with the flight", |state| {
                    let elapsed = animation_time(state)
                        .unwrap_or_else(|| panic!("bee lost its animation clock"));
                    let flown = state.app_guard().world().resource::<Time>().elapsed_secs();
                    assert!((elapsed - flown).abs() < 1e-4, "{elapsed} != {flown}");
                });
            });

            scenario.when("the bee is carried out of the viewport", |ctx| {
                ctx.before_all(|state| {
                    carry_off(state);
                    state.tick(1);
                });

                ctx.then("the bee is removed", |state| {
                    assert_eq!(state.bee_count(), 0);
                });

                ctx.then("its glasses are removed with it", |state| {
                    let mut app = state.app_guard();
                    let world = app.world_mut();
                    let mut query = world.query::<&buzz::Glasses>();
                    assert_eq!(query.iter(world).count(), 0);
                });
            });
        },
    ));
}
