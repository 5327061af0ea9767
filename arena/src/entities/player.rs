// tps_arena_core/arena/src/entities/player.rs
use crate::core::config::{PlayerConfig, WeaponConfig};
use glam::{Vec2, Vec3};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlayerState {
    pub position: Vec3,
    pub velocity: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub health: i32,
    pub max_health: i32,
    pub alive: bool,

    pub ammo: u32,
    pub reserve: u32,
    pub fire_cooldown: f32,
    /// > 0 while a reload is in progress.
    pub reload_timer: f32,

    pub grounded: bool,
    pub crouching: bool,
    pub sprinting: bool,
    pub kills: u32,
}

impl PlayerState {
    pub fn new(player: &PlayerConfig, weapon: &WeaponConfig) -> Self {
        PlayerState {
            position: Vec3::from_array(player.spawn),
            velocity: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            health: player.max_health,
            max_health: player.max_health,
            alive: true,
            ammo: weapon.magazine_size,
            reserve: weapon.initial_reserve,
            fire_cooldown: 0.0,
            reload_timer: 0.0,
            grounded: true,
            crouching: false,
            sprinting: false,
            kills: 0,
        }
    }

    pub fn is_reloading(&self) -> bool {
        self.reload_timer > 0.0
    }

    pub fn can_shoot(&self) -> bool {
        self.alive && self.ammo > 0 && self.fire_cooldown <= 0.0 && !self.is_reloading()
    }

    pub fn can_start_reload(&self, magazine_size: u32) -> bool {
        self.alive && !self.is_reloading() && self.ammo < magazine_size && self.reserve > 0
    }

    /// Arms the reload timer. Returns false (and changes nothing) when a reload is not allowed.
    pub fn start_reload(&mut self, weapon: &WeaponConfig) -> bool {
        if !self.can_start_reload(weapon.magazine_size) {
            return false;
        }
        self.reload_timer = weapon.reload_duration;
        true
    }

    /// Moves rounds from reserve into the magazine. Returns how many were loaded.
    pub fn complete_reload(&mut self, magazine_size: u32) -> u32 {
        let loaded = magazine_size.saturating_sub(self.ammo).min(self.reserve);
        self.ammo += loaded;
        self.reserve -= loaded;
        self.reload_timer = 0.0;
        loaded
    }

    /// Returns true if this damage killed the player.
    pub fn apply_damage(&mut self, damage: i32) -> bool {
        if !self.alive || damage <= 0 {
            return false;
        }
        self.health = (self.health - damage).clamp(0, self.max_health);
        if self.health == 0 {
            self.die();
            return true;
        }
        false
    }

    fn die(&mut self) {
        self.alive = false;
        self.velocity = Vec3::ZERO;
        self.reload_timer = 0.0;
        self.fire_cooldown = 0.0;
    }

    pub fn apply_look(&mut self, delta: Vec2, max_pitch: f32) {
        if !delta.is_finite() {
            return;
        }
        self.yaw = (self.yaw + delta.x).rem_euclid(std::f32::consts::TAU);
        self.pitch = (self.pitch + delta.y).clamp(-max_pitch, max_pitch);
    }

    /// Ground-plane forward for the current yaw. Yaw 0 faces -Z.
    pub fn forward(&self) -> Vec3 {
        Vec3::new(-self.yaw.sin(), 0.0, -self.yaw.cos())
    }

    pub fn right(&self) -> Vec3 {
        Vec3::new(self.yaw.cos(), 0.0, -self.yaw.sin())
    }

    pub fn aim_direction(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        Vec3::new(-sy * cp, sp, -cy * cp)
    }
}
