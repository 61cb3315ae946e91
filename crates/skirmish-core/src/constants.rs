//! Simulation constants and tuning parameters.
//!
//! Durations are seconds, distances world units, speeds units/second.

/// Nominal host frame rate (Hz). Only the app's frame pacing uses it.
pub const FRAME_RATE: u32 = 60;

/// Upper bound on a single tick's elapsed time (seconds).
pub const MAX_FRAME_DT: f64 = 0.1;

/// Reference frame length for per-frame damping factors.
pub const DAMPING_REFERENCE_DT: f64 = 1.0 / 60.0;

// --- World ---

pub const WORLD_WIDTH: f64 = 2000.0;
pub const WORLD_HEIGHT: f64 = 1500.0;

/// Default camera viewport.
pub const VIEWPORT_WIDTH: f64 = 1280.0;
pub const VIEWPORT_HEIGHT: f64 = 720.0;

// --- Player ---

pub const PLAYER_SIZE: f64 = 64.0;
pub const PLAYER_MAX_HEALTH: i32 = 100;
pub const PLAYER_SPEED: f64 = 200.0;
pub const PLAYER_JUMP_FORCE: f64 = 500.0;
/// Time airborne after a jump before the grounded flag returns.
pub const PLAYER_JUMP_AIRTIME: f64 = 0.5;
pub const PLAYER_FIRE_INTERVAL: f64 = 0.25;
/// Velocity multiplier per reference frame on an axis with no key held.
pub const PLAYER_DAMPING: f64 = 0.85;
/// Distance from the body centre to the muzzle.
pub const PLAYER_MUZZLE_OFFSET: f64 = 32.0;
pub const PLAYER_HURT_HOLD: f64 = 0.5;
/// Speed above which the player counts as moving (walk clip).
pub const PLAYER_WALK_THRESHOLD: f64 = 50.0;
/// Speed above which the player counts as running (run clip).
pub const PLAYER_RUN_THRESHOLD: f64 = 150.0;

pub const KILL_SCORE: u64 = 100;

// --- Soldiers (ranged hostiles) ---

pub const SOLDIER_SIZE: f64 = 64.0;
pub const SOLDIER_DETECTION_RANGE: f64 = 500.0;
pub const SOLDIER_ATTACK_RANGE: f64 = 300.0;
pub const SOLDIER_BASE_HEALTH: i32 = 80;
pub const SOLDIER_HEALTH_PER_WAVE: i32 = 10;
pub const SOLDIER_BASE_SPEED: f64 = 80.0;
pub const SOLDIER_SPEED_PER_WAVE: f64 = 5.0;
pub const SOLDIER_FIRE_INTERVAL_MIN: f64 = 1.5;
pub const SOLDIER_FIRE_INTERVAL_MAX: f64 = 2.5;
pub const SOLDIER_DAMAGE_PER_WAVE: i32 = 1;
pub const SOLDIER_PATROL_SPEED_FACTOR: f64 = 0.5;
pub const SOLDIER_PATROL_MIN: f64 = 2.0;
pub const SOLDIER_PATROL_MAX: f64 = 5.0;
pub const SOLDIER_HURT_HOLD: f64 = 0.3;

// --- Zombies (melee hostiles) ---

pub const ZOMBIE_SIZE: f64 = 56.0;
pub const ZOMBIE_DETECTION_RANGE: f64 = 350.0;
pub const ZOMBIE_ATTACK_RANGE: f64 = 40.0;
pub const ZOMBIE_BASE_HEALTH: i32 = 60;
pub const ZOMBIE_HEALTH_PER_WAVE: i32 = 8;
pub const ZOMBIE_BASE_SPEED: f64 = 40.0;
pub const ZOMBIE_SPEED_PER_WAVE: f64 = 3.0;
pub const ZOMBIE_MELEE_DAMAGE: i32 = 15;
pub const ZOMBIE_MELEE_INTERVAL: f64 = 1.0;
pub const ZOMBIE_WANDER_SPEED_FACTOR: f64 = 0.3;
pub const ZOMBIE_WANDER_MIN: f64 = 3.0;
pub const ZOMBIE_WANDER_MAX: f64 = 5.0;
pub const ZOMBIE_KNOCKBACK_SPEED: f64 = 50.0;
/// How long a knocked-back zombie drifts before it steers again.
pub const ZOMBIE_STAGGER_SECS: f64 = 0.2;

/// Patrol/wander clip switches to the moving clip above this speed.
pub const HOSTILE_MOVING_THRESHOLD: f64 = 10.0;

/// Longest a dead hostile stays in its roster before pruning.
pub const DEATH_LINGER: f64 = 1.0;

// --- Bullets ---

pub const BULLET_SPEED: f64 = 600.0;
pub const BULLET_DAMAGE: i32 = 20;
pub const BULLET_WIDTH: f64 = 16.0;
pub const BULLET_HEIGHT: f64 = 8.0;
pub const BULLET_LIFETIME: f64 = 2.0;
pub const BULLET_TRAIL_LENGTH: usize = 5;
pub const BULLET_SPRITE: &str = "bullet";

// --- Particles ---

pub const EXPLOSION_FRAMES: u32 = 20;
pub const EXPLOSION_FPS: f64 = 30.0;
pub const EXPLOSION_SIZE: f64 = 128.0;
pub const MUZZLE_FRAMES: u32 = 5;
pub const MUZZLE_FPS: f64 = 20.0;
pub const MUZZLE_SIZE: f64 = 32.0;

pub const SPARK_SIZE: f64 = 4.0;
pub const SPARK_SPEED: f64 = 200.0;
pub const SPARK_LIFETIME: f64 = 0.3;

pub const BLOOD_SIZE: f64 = 3.0;
pub const BLOOD_SPREAD: f64 = 150.0;
pub const BLOOD_LIFT_MIN: f64 = 50.0;
pub const BLOOD_LIFT_MAX: f64 = 150.0;
pub const BLOOD_GRAVITY: f64 = 500.0;
pub const BLOOD_LIFETIME: f64 = 0.5;

/// Horizontal drag per reference frame on ballistic particles.
pub const PARTICLE_DRAG: f64 = 0.98;
/// Lifetime that maps to full opacity when fading ballistic particles.
pub const PARTICLE_FADE_SPAN: f64 = 0.5;

pub const IMPACT_SPARKS: usize = 3;
pub const DEATH_SPARKS: usize = 12;
pub const DEATH_BLOOD: usize = 8;

// --- Waves ---

pub const WAVE_DELAY: f64 = 3.0;
pub const WAVE_BASE_SOLDIERS: u32 = 3;
pub const WAVE_BASE_ZOMBIES: u32 = 6;
pub const WAVE_SOLDIERS_PER_WAVE: f64 = 0.5;
pub const WAVE_ZOMBIES_PER_WAVE: f64 = 0.7;
pub const WAVE_MAX_SOLDIERS: u32 = 10;
pub const WAVE_MAX_ZOMBIES: u32 = 20;
pub const WAVE_BONUS_BASE: u64 = 1000;
pub const WAVE_BONUS_PER_WAVE: u64 = 250;
pub const WAVE_HEAL: i32 = 20;

/// Soldier spawn ring around the player.
pub const SOLDIER_SPAWN_MIN_RADIUS: f64 = 400.0;
pub const SOLDIER_SPAWN_MAX_RADIUS: f64 = 700.0;
/// Random angular jitter added to evenly spaced soldier spawns.
pub const SOLDIER_SPAWN_JITTER: f64 = 0.5;
/// Zombie spawn ring around the player.
pub const ZOMBIE_SPAWN_MIN_RADIUS: f64 = 300.0;
pub const ZOMBIE_SPAWN_MAX_RADIUS: f64 = 700.0;
/// Keep spawns this far from the world edges.
pub const SPAWN_EDGE_MARGIN: f64 = 64.0;

// --- Display ---

pub const HEALTH_BAR_HIGH: f64 = 0.6;
pub const HEALTH_BAR_LOW: f64 = 0.3;
