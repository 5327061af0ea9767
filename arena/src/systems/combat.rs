// tps_arena_core/arena/src/systems/combat.rs
use crate::core::config::{BotConfig, PlayerConfig, SimConfig, WeaponConfig};
use crate::core::types::{BehaviorState, GameEvent, PLAYER_ENTITY_ID};
use crate::entities::{BotState, PlayerState};
use crate::systems::perception::{horizontal_distance, raise_alert};
use crate::systems::physics::collision::{apply_spread, ray_aabb};
use crate::world::ArenaWorld;
use glam::Vec3;
use rand::Rng;
use tracing::{debug, info, trace};

#[derive(Debug, Clone, Copy, PartialEq)]
enum HitTarget {
    Bot(usize),
    Obstacle(u32),
}

pub struct CombatResolver;

impl CombatResolver {
    /// Player-initiated hitscan. Blocked shots are silent no-ops; an empty
    /// magazine may start a reload instead.
    pub fn fire(
        player: &mut PlayerState,
        aim_direction: Vec3,
        bots: &mut [BotState],
        world: &ArenaWorld,
        config: &SimConfig,
        rng: &mut impl Rng,
    ) -> Vec<GameEvent> {
        let weapon = &config.weapon;
        let mut events = Vec::new();

        if !player.can_shoot() {
            if player.alive && player.ammo == 0 && weapon.auto_reload_on_empty && player.start_reload(weapon) {
                debug!("Magazine empty, auto reload started ({} in reserve)", player.reserve);
                events.push(GameEvent::ReloadStarted);
            }
            return events;
        }
        let aim = aim_direction.normalize_or_zero();
        if aim == Vec3::ZERO {
            return events;
        }

        player.ammo -= 1;
        player.fire_cooldown = weapon.fire_interval;

        let spread = if player.crouching { weapon.spread_crouching } else { weapon.spread_standing };
        let direction = apply_spread(aim, spread, rng.gen(), rng.gen());
        let origin = Self::muzzle_point(player, weapon);
        events.push(GameEvent::ShotFired { source: PLAYER_ENTITY_ID, origin, direction });

        let mut closest: Option<(f32, HitTarget)> = world
            .raycast_obstacles(origin, direction, weapon.range)
            .map(|hit| (hit.distance, HitTarget::Obstacle(hit.obstacle)));

        for (slot, bot) in bots.iter().enumerate().filter(|(_, b)| b.alive) {
            let (min, max) = Self::bot_hit_box(bot, &config.bot);
            if let Some(distance) = ray_aabb(origin, direction, min, max, weapon.range) {
                if closest.map_or(true, |(best, _)| distance < best) {
                    closest = Some((distance, HitTarget::Bot(slot)));
                }
            }
        }

        match closest {
            Some((distance, HitTarget::Bot(slot))) => {
                let point = origin + direction * distance;
                let bot = &mut bots[slot];
                let killed = bot.apply_damage(weapon.damage, config.bot.respawn_delay);
                events.push(GameEvent::HitLanded { source: PLAYER_ENTITY_ID, target: bot.id, point });
                events.push(GameEvent::DamageTaken { target: bot.id, source: PLAYER_ENTITY_ID, amount: weapon.damage });
                if killed {
                    player.kills += 1;
                    info!("[Bot {}]: Killed by player (kills {})", bot.id, player.kills);
                    events.push(GameEvent::Kill { source: PLAYER_ENTITY_ID, target: bot.id });
                } else {
                    raise_alert(bot, player.position, &config.bot);
                    trace!("[Bot {}]: Hit for {}, health {}", bot.id, weapon.damage, bot.health);
                }
            }
            Some((distance, HitTarget::Obstacle(obstacle))) => {
                events.push(GameEvent::Impact { source: PLAYER_ENTITY_ID, obstacle, point: origin + direction * distance });
            }
            None => {}
        }

        events
    }

    /// Bot-initiated hitscan against the player's hit volume only.
    /// Accuracy is a deterministic ray cast inside an aim-error cone.
    pub fn bot_fire(
        bot: &mut BotState,
        player: &mut PlayerState,
        world: &ArenaWorld,
        config: &SimConfig,
        rng: &mut impl Rng,
    ) -> Vec<GameEvent> {
        let bot_config = &config.bot;
        let mut events = Vec::new();

        if !bot.alive || bot.behavior != BehaviorState::Attack || bot.fire_cooldown > 0.0 || !player.alive {
            return events;
        }
        if horizontal_distance(bot.position, player.position) > bot_config.fire_range {
            return events;
        }

        bot.fire_cooldown = rng.gen_range(bot_config.fire_cooldown_min..=bot_config.fire_cooldown_max);
        bot.face_towards(player.position);

        let origin = Vec3::new(bot.position.x, world.ground_height + world.eye_height, bot.position.z);
        let (min, max) = Self::player_hit_box(player, &config.player, world);
        let aim = ((min + max) * 0.5 - origin).normalize_or_zero();
        let direction = apply_spread(aim, bot_config.aim_error, rng.gen(), rng.gen());
        events.push(GameEvent::ShotFired { source: bot.id, origin, direction });

        if ray_aabb(origin, direction, min, max, bot_config.fire_range).is_none() {
            return events;
        }

        let damage = rng.gen_range(bot_config.damage_min..=bot_config.damage_max);
        let killed = player.apply_damage(damage);
        raise_alert(bot, player.position, bot_config);
        events.push(GameEvent::DamageTaken { target: PLAYER_ENTITY_ID, source: bot.id, amount: damage });
        trace!("[Bot {}]: Hit player for {}, health {}", bot.id, damage, player.health);

        if killed {
            info!("[Bot {}]: Killed the player", bot.id);
            events.push(GameEvent::Kill { source: bot.id, target: PLAYER_ENTITY_ID });
            events.push(GameEvent::PlayerDied { killer: bot.id });
        }
        events
    }

    pub fn request_reload(player: &mut PlayerState, weapon: &WeaponConfig) -> Option<GameEvent> {
        if player.start_reload(weapon) {
            debug!("Reload started: ammo {}, reserve {}", player.ammo, player.reserve);
            Some(GameEvent::ReloadStarted)
        } else {
            None
        }
    }

    pub fn muzzle_point(player: &PlayerState, weapon: &WeaponConfig) -> Vec3 {
        player.position - Vec3::Y * weapon.muzzle_drop
    }

    pub fn bot_hit_box(bot: &BotState, config: &BotConfig) -> (Vec3, Vec3) {
        let half = Vec3::from_array(config.hit_half_extents);
        (bot.position - half, bot.position + half)
    }

    /// Feet-anchored box; crouching shrinks it in proportion to stance height.
    pub fn player_hit_box(player: &PlayerState, config: &PlayerConfig, world: &ArenaWorld) -> (Vec3, Vec3) {
        let half = Vec3::from_array(config.hit_half_extents);
        let stance = if player.crouching { config.crouch_height } else { config.stand_height };
        let feet = (player.position.y - stance).max(world.ground_height);
        let height = 2.0 * half.y * stance / config.stand_height;
        (
            Vec3::new(player.position.x - half.x, feet, player.position.z - half.z),
            Vec3::new(player.position.x + half.x, feet + height, player.position.z + half.z),
        )
    }
}
