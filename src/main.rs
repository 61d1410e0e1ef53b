//! Strider - headless demo
//!
//! Drives the first-person controller through a scripted run in the test
//! arena: walk, sprint, jump, crawl into the tunnel, try to stand up under
//! the ceiling, back out and look around. Run with `RUST_LOG=debug` to see
//! state transitions, landings and obstruction warnings.

use glam::Vec2;
use strider_game::{InputEvent, Simulation, TickReport};

/// One scripted phase: events delivered on its first tick, then idle ticks.
struct Phase {
    name: &'static str,
    events: Vec<InputEvent>,
    ticks: u32,
}

impl Phase {
    fn new(name: &'static str, events: Vec<InputEvent>, seconds: f32, tick_rate: u32) -> Self {
        Self {
            name,
            events,
            ticks: (seconds * tick_rate as f32).round() as u32,
        }
    }
}

fn run_phase(simulation: &mut Simulation, phase: &Phase) -> Option<TickReport> {
    let mut last = simulation.tick(&phase.events);
    for _ in 1..phase.ticks {
        last = simulation.tick(&[]).or(last);
    }
    last
}

fn main() {
    env_logger::init();

    let mut simulation = Simulation::test();
    if !simulation.player.is_active() {
        log::error!("player controller failed to build, nothing to run");
        return;
    }
    let rate = simulation.config.tick_rate;

    let forward = InputEvent::Move(Vec2::new(0.0, 1.0));
    let backward = InputEvent::Move(Vec2::new(0.0, -1.0));
    let stop = InputEvent::Move(Vec2::ZERO);

    // Mouse look is a rate: the Look axis stays applied until replaced
    let turn = InputEvent::Look(Vec2::new(0.9, 0.0));
    let tilt = InputEvent::Look(Vec2::new(0.0, -0.5));
    let still = InputEvent::Look(Vec2::ZERO);

    let script = [
        Phase::new("settle", vec![], 0.25, rate),
        Phase::new("walk", vec![forward], 0.5, rate),
        Phase::new("stop", vec![stop], 0.3, rate),
        Phase::new("crouch", vec![InputEvent::CrouchStarted], 0.3, rate),
        Phase::new("crawl into tunnel", vec![forward], 3.0, rate),
        Phase::new("stop", vec![stop], 0.3, rate),
        Phase::new("try to stand", vec![InputEvent::CrouchCanceled], 0.5, rate),
        Phase::new("back out", vec![backward], 4.0, rate),
        Phase::new("stop", vec![stop], 0.5, rate),
        Phase::new("turn around", vec![turn], 2.0, rate),
        Phase::new("look down", vec![still, tilt], 1.0, rate),
        Phase::new("level view", vec![still], 0.1, rate),
        Phase::new("sprint", vec![forward, InputEvent::SprintStarted], 1.5, rate),
        Phase::new("jump", vec![InputEvent::JumpStarted], 1.2, rate),
        Phase::new("walk", vec![InputEvent::SprintCanceled], 0.5, rate),
        Phase::new("stop", vec![stop], 0.5, rate),
    ];

    for phase in &script {
        let report = run_phase(&mut simulation, phase);
        let player = &simulation.player;

        match report {
            Some(report) => log::info!(
                "{:<18} state={:?} pos={:.2?} height={:.2} obstructed={}",
                phase.name,
                report.state,
                player.position(),
                report.stance.height,
                report.obstructed,
            ),
            None => log::info!("{:<18} (no movement)", phase.name),
        }
    }

    if let Some(controller) = simulation.player.controller() {
        use strider_physics::{CameraPivot, CharacterBody};

        log::info!(
            "finished after {} ticks: yaw={:.1} pitch={:.1} eye={:.2?}",
            simulation.frame,
            controller.body().yaw_degrees(),
            controller.camera_pivot().pitch_degrees(),
            simulation.player.eye_position(),
        );
    }
}
