// tps_arena_core/arena/src/sim/input.rs
use crate::core::types::PlayerInput;
use crate::sim::snapshot::{BotSnapshot, SimSnapshot};
use glam::Vec2;
use std::collections::VecDeque;
use std::f32::consts::{PI, TAU};

/// Supplies one frame of player intent per tick.
pub trait InputSource {
    fn next_input(&mut self, snapshot: &SimSnapshot) -> PlayerInput;
}

/// Replays a fixed list of frames, then idles.
#[derive(Debug, Default, Clone)]
pub struct ReplayInput {
    frames: VecDeque<PlayerInput>,
}

impl ReplayInput {
    pub fn new(frames: impl IntoIterator<Item = PlayerInput>) -> Self {
        ReplayInput { frames: frames.into_iter().collect() }
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ReplayInput {
    fn next_input(&mut self, _snapshot: &SimSnapshot) -> PlayerInput {
        self.frames.pop_front().unwrap_or_default()
    }
}

/// Simple autopilot for the harness binary: turns toward the nearest living
/// bot, closes distance, taps the trigger when lined up and reloads when dry.
#[derive(Debug, Clone)]
pub struct ScriptedPilot {
    pub max_turn_per_frame: f32,
    pub engage_distance: f32,
    pub fire_alignment: f32,
    trigger_held: bool,
}

impl ScriptedPilot {
    pub fn new() -> Self {
        ScriptedPilot {
            max_turn_per_frame: 0.12,
            engage_distance: 18.0,
            fire_alignment: 0.03,
            trigger_held: false,
        }
    }

    fn nearest_bot<'a>(snapshot: &'a SimSnapshot) -> Option<(&'a BotSnapshot, f32)> {
        let me = snapshot.player.position;
        snapshot
            .bots
            .iter()
            .filter(|b| b.alive)
            .map(|b| (b, Vec2::new(b.position.x - me.x, b.position.z - me.z).length()))
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }

    fn wrap_angle(angle: f32) -> f32 {
        (angle + PI).rem_euclid(TAU) - PI
    }
}

impl Default for ScriptedPilot {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSource for ScriptedPilot {
    fn next_input(&mut self, snapshot: &SimSnapshot) -> PlayerInput {
        let player = &snapshot.player;
        let mut input = PlayerInput::idle();
        input.look_delta.y = -player.pitch;

        if player.ammo == 0 && !player.reloading {
            input.reload = true;
        }

        let Some((bot, distance)) = Self::nearest_bot(snapshot) else {
            input.look_delta.x = self.max_turn_per_frame;
            return input;
        };

        let dx = bot.position.x - player.position.x;
        let dz = bot.position.z - player.position.z;
        let desired_yaw = (-dx).atan2(-dz);
        let error = Self::wrap_angle(desired_yaw - player.yaw);
        input.look_delta.x = error.clamp(-self.max_turn_per_frame, self.max_turn_per_frame);

        if distance > self.engage_distance {
            input.move_intent = Vec2::new(0.0, 1.0);
            input.sprint = distance > self.engage_distance * 2.0;
        } else {
            // strafe while engaging
            input.move_intent = Vec2::new(if snapshot.tick % 240 < 120 { 1.0 } else { -1.0 }, 0.0);
        }

        // Tap the trigger on alternate frames.
        let lined_up = error.abs() <= self.fire_alignment && distance <= self.engage_distance * 2.0;
        input.fire = lined_up && !self.trigger_held;
        self.trigger_held = input.fire;
        input
    }
}
