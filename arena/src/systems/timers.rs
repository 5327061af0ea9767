// tps_arena_core/arena/src/systems/timers.rs
use crate::core::config::WeaponConfig;
use crate::core::types::GameEvent;
use crate::entities::{BotState, PlayerState};
use tracing::debug;

// Residue below this is treated as expired so accumulated float error
// cannot leave a timer a hair above zero.
const TIMER_EPSILON: f32 = 1e-5;

/// Decrements `timer` by `dt`, flooring at 0. Returns true only on the call
/// that takes a running timer to zero.
pub fn countdown(timer: &mut f32, dt: f32) -> bool {
    if *timer <= 0.0 {
        *timer = 0.0;
        return false;
    }
    *timer -= dt;
    if *timer <= TIMER_EPSILON {
        *timer = 0.0;
        return true;
    }
    false
}

pub struct TimerSystem;

impl TimerSystem {
    /// Advances player cooldowns. Emits ReloadCompleted when the reload timer expires.
    pub fn tick_player(player: &mut PlayerState, dt: f32, weapon: &WeaponConfig) -> Option<GameEvent> {
        countdown(&mut player.fire_cooldown, dt);
        if countdown(&mut player.reload_timer, dt) && player.alive {
            let loaded = player.complete_reload(weapon.magazine_size);
            debug!("Reload complete: +{} (ammo {}, reserve {})", loaded, player.ammo, player.reserve);
            return Some(GameEvent::ReloadCompleted { loaded });
        }
        None
    }

    /// Advances bot timers. Returns true when a dead bot's respawn delay has elapsed.
    pub fn tick_bot(bot: &mut BotState, dt: f32) -> bool {
        countdown(&mut bot.fire_cooldown, dt);
        countdown(&mut bot.think_timer, dt);
        countdown(&mut bot.alert_timer, dt);
        let respawn_due = countdown(&mut bot.respawn_timer, dt);
        respawn_due && !bot.alive
    }
}
