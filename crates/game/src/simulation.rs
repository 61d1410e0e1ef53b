//! Game simulation - the fixed-step loop.
//!
//! Each tick delivers the frame's input events, runs the movement phase for
//! the player, then the look phase. Given the same events the simulation
//! produces the same trajectory.

use serde::{Deserialize, Serialize};
use strider_physics::movement::BodySettings;
use strider_physics::{MovementConfig, TickReport};

use crate::events::{InputDispatcher, InputEvent};
use crate::input::PlayerInput;
use crate::level::Level;
use crate::player::Player;

/// Game simulation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Simulation tick rate (ticks per second).
    pub tick_rate: u32,

    /// Movement configuration for the player controller.
    pub movement: MovementConfig,

    /// Capsule body tuning.
    pub body: BodySettings,

    /// Scale from mouse pixels to look axis units.
    pub mouse_sensitivity: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60,
            movement: MovementConfig::default(),
            body: BodySettings::default(),
            mouse_sensitivity: 0.1,
        }
    }
}

impl SimulationConfig {
    /// Get the time step per tick in seconds.
    pub fn delta_time(&self) -> f32 {
        1.0 / self.tick_rate as f32
    }
}

/// The main game simulation.
#[derive(Debug)]
pub struct Simulation {
    /// Current frame/tick number.
    pub frame: u64,

    /// Simulation configuration.
    pub config: SimulationConfig,

    /// Current level.
    pub level: Level,

    /// Input event bus.
    pub dispatcher: InputDispatcher,

    /// The local player.
    pub player: Player,

    previous_input: PlayerInput,
}

impl Simulation {
    /// Create a new simulation with the player at the level's first spawn
    /// point, already listening for input.
    pub fn new(config: SimulationConfig, level: Level) -> Self {
        let spawn = level.player_spawn(0).unwrap_or_default();
        let mut dispatcher = InputDispatcher::new();
        let mut player = Player::spawn(
            1,
            "Player",
            &level,
            spawn,
            config.movement.clone(),
            config.body,
        );
        player.enable_input(&mut dispatcher);

        log::info!(
            "simulation started on {} at {} Hz, player at {:?}",
            level.name,
            config.tick_rate,
            spawn.position
        );

        Self {
            frame: 0,
            config,
            level,
            dispatcher,
            player,
            previous_input: PlayerInput::default(),
        }
    }

    /// Create a simulation with default configuration and test arena.
    pub fn test() -> Self {
        Self::new(SimulationConfig::default(), Level::test_arena())
    }

    /// Reconnect the player to the input bus.
    pub fn activate(&mut self) {
        self.player.enable_input(&mut self.dispatcher);
    }

    /// Disconnect the player from the input bus. Events delivered while
    /// inactive are dropped.
    pub fn deactivate(&mut self) {
        self.player.disable_input(&mut self.dispatcher);
    }

    /// Advance the simulation by one tick.
    ///
    /// Returns the player's movement report, or `None` when the player is
    /// inert or movement is disabled.
    pub fn tick(&mut self, events: &[InputEvent]) -> Option<TickReport> {
        let delta_time = self.config.delta_time();

        for event in events {
            self.dispatcher.dispatch(event);
        }

        let report = self.player.update(&self.level.collision, delta_time);
        self.player.late_update(delta_time);

        if let Some(report) = report {
            log::trace!(
                "frame {} {:?} at {:?}",
                self.frame,
                report.state,
                self.player.position()
            );
        }

        self.frame += 1;
        report
    }

    /// Advance one tick from polled device state.
    pub fn tick_input(&mut self, input: &PlayerInput) -> Option<TickReport> {
        let events = input.to_events(&self.previous_input, self.config.mouse_sensitivity);
        self.previous_input = input.clone();
        self.tick(&events)
    }

    /// Get the delta time for this simulation.
    pub fn delta_time(&self) -> f32 {
        self.config.delta_time()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use glam::{Vec2, Vec3};
    use strider_physics::{CharacterBody, MovementState};

    use super::*;
    use crate::level::{SpawnPoint, TUNNEL_CEILING};

    const FORWARD: InputEvent = InputEvent::Move(Vec2::new(0.0, 1.0));
    const STOP: InputEvent = InputEvent::Move(Vec2::ZERO);

    fn settle(sim: &mut Simulation) {
        for _ in 0..10 {
            sim.tick(&[]);
        }
    }

    #[test]
    fn test_simulation_creation() {
        let sim = Simulation::test();
        assert_eq!(sim.frame, 0);
        assert!(sim.player.is_active());
        assert_eq!(sim.dispatcher.listener_count(), 1);
    }

    #[test]
    fn test_tick_advances_frame() {
        let mut sim = Simulation::test();

        sim.tick(&[]);
        assert_eq!(sim.frame, 1);

        sim.tick(&[]);
        assert_eq!(sim.frame, 2);
    }

    #[test]
    fn test_movement_input() {
        let mut sim = Simulation::test();
        settle(&mut sim);
        let start_pos = sim.player.position();

        sim.tick(&[FORWARD]);
        for _ in 0..59 {
            sim.tick(&[]);
        }

        let end_pos = sim.player.position();
        assert!(end_pos.z < start_pos.z - 1.0, "player should move forward: {end_pos:?}");
        assert!((end_pos.x - start_pos.x).abs() < 1e-3);
        assert_eq!(sim.player.state(), MovementState::Walking);
    }

    #[test]
    fn test_sprint_is_faster() {
        let mut walk = Simulation::test();
        let mut sprint = Simulation::test();

        walk.tick(&[FORWARD]);
        sprint.tick(&[FORWARD, InputEvent::SprintStarted]);
        for _ in 0..60 {
            walk.tick(&[]);
            sprint.tick(&[]);
        }

        assert_eq!(sprint.player.state(), MovementState::Sprinting);
        assert!(sprint.player.position().z < walk.player.position().z - 1.0);
    }

    #[test]
    fn test_jump_leaves_and_returns_to_ground() {
        let mut sim = Simulation::test();
        settle(&mut sim);
        let floor_y = sim.player.position().y;

        let report = sim.tick(&[InputEvent::JumpStarted]).unwrap();
        assert!(report.jumped);

        let mut peak = floor_y;
        for _ in 0..20 {
            sim.tick(&[]);
            peak = peak.max(sim.player.position().y);
        }
        assert!(peak > floor_y + 1.5, "peak {peak}");
        assert_eq!(sim.player.state(), MovementState::Jumping);

        for _ in 0..60 {
            sim.tick(&[]);
        }
        assert!((sim.player.position().y - floor_y).abs() < 0.05);
        assert_eq!(sim.player.state(), MovementState::Idle);
    }

    #[test]
    fn test_standing_up_blocked_in_tunnel() {
        let mut sim = Simulation::test();
        settle(&mut sim);

        sim.tick(&[InputEvent::CrouchStarted]);
        for _ in 0..30 {
            sim.tick(&[]);
        }

        // Crawl to the middle of the tunnel
        sim.tick(&[FORWARD]);
        while sim.player.position().z > -6.0 && sim.frame < 600 {
            sim.tick(&[]);
        }
        assert!(sim.player.position().z <= -6.0, "stuck at {:?}", sim.player.position());
        sim.tick(&[STOP]);

        let report = sim.tick(&[InputEvent::CrouchCanceled]).unwrap();
        assert!(report.obstructed);
        assert_eq!(report.state, MovementState::Crouching);

        for _ in 0..30 {
            sim.tick(&[]);
        }
        let controller = sim.player.controller().unwrap();
        assert_eq!(controller.state(), MovementState::Crouching);
        assert!(controller.obstructed());
        assert!(controller.stance().height < TUNNEL_CEILING);
    }

    #[test]
    fn test_player_rests_on_crate() {
        let mut level = Level::test_arena();
        level.spawn_points.insert(
            0,
            SpawnPoint {
                position: Vec3::new(-15.0, 2.05, 10.0),
                facing: 0.0,
            },
        );
        let mut sim = Simulation::new(SimulationConfig::default(), level);

        let mut report = None;
        for _ in 0..600 {
            report = sim.tick(&[]);
        }

        let report = report.unwrap();
        assert!(report.ground.is_grounded);
        assert_eq!(report.state, MovementState::Idle);
        assert!((sim.player.position().y - 2.0).abs() < 0.01, "{:?}", sim.player.position());
        let vy = sim.player.controller().unwrap().kinematics().vertical_velocity;
        assert!(vy > -2.0, "vy={vy}");
    }

    #[test]
    fn test_look_turns_player() {
        let mut sim = Simulation::test();

        sim.tick(&[InputEvent::Look(Vec2::new(54.0, 0.0))]);
        sim.tick(&[InputEvent::Look(Vec2::ZERO)]);

        let yaw = sim.player.controller().unwrap().body().yaw_degrees();
        assert!((yaw - 90.0).abs() < 1e-3, "yaw {yaw}");
    }

    #[test]
    fn test_deactivated_simulation_ignores_events() {
        let mut sim = Simulation::test();
        settle(&mut sim);
        let start = sim.player.position();

        sim.deactivate();
        sim.tick(&[FORWARD]);
        for _ in 0..30 {
            sim.tick(&[]);
        }
        assert!((sim.player.position() - start).length() < 1e-3);

        sim.activate();
        sim.tick(&[FORWARD]);
        for _ in 0..30 {
            sim.tick(&[]);
        }
        assert!(sim.player.position().z < start.z - 0.5);
    }

    #[test]
    fn test_no_listener_leak_across_activation_cycles() {
        let mut sim = Simulation::test();
        for _ in 0..10 {
            sim.deactivate();
            sim.activate();
            sim.activate();
        }
        assert_eq!(sim.dispatcher.listener_count(), 1);
    }

    #[test]
    fn test_polled_input() {
        let mut sim = Simulation::test();
        let mut input = PlayerInput::default();
        input.movement.forward = true;

        for frame in 0..60 {
            input.frame = frame;
            sim.tick_input(&input);
        }

        assert!(sim.player.position().z < -1.0);
    }

    #[test]
    fn test_determinism() {
        let script: Vec<Vec<InputEvent>> = (0..200)
            .map(|i| {
                let mut events = vec![InputEvent::Move(Vec2::new(
                    if i % 3 == 0 { 1.0 } else { 0.0 },
                    if i % 2 == 0 { 1.0 } else { 0.5 },
                ))];
                if i % 40 == 0 {
                    events.push(InputEvent::JumpStarted);
                }
                if i % 25 == 0 {
                    events.push(InputEvent::Look(Vec2::new(10.0, 2.0)));
                }
                events
            })
            .collect();

        let run = || {
            let mut sim = Simulation::test();
            for events in &script {
                sim.tick(events);
            }
            sim.player.position()
        };

        let pos1 = run();
        let pos2 = run();
        assert_eq!(pos1, pos2, "simulations should be deterministic");
    }
}
