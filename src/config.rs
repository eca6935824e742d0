//! Configuration constants for the drone arena simulation.

use crate::types::Point;

// Agents
pub const AGENT_SIZE: f64 = 4.0; // Footprint side length in tiles
pub const AGENT_SPEED: f64 = 16.0; // Tiles per second
pub const AGENT_MAX_HEALTH: f64 = 100.0;

// Pickups
pub const PICKUP_SIZE: f64 = 4.0; // Footprint side length in tiles

// Timers (seconds, against the match clock)
pub const PLAYER_RESPAWN_DELAY: f64 = 5.0;
pub const ITEM_RESPAWN_DELAY: f64 = 10.0;

// Terrain
pub const WALL_SOLIDITY: f64 = 100.0; // Starting health of a destructible wall tile

// Ballistics
pub const SAMPLES_PER_TILE: f64 = 2.0; // Segment rasterization density (anti-tunneling)

// Match rules
pub const DEFAULT_WIN_SCORE: i32 = 10;

/// Parking position for agents when no spawn point is free. Off-arena, so
/// the out-of-bounds-is-solid convention keeps the agent pinned until a
/// later relocation.
pub const OFF_ARENA: Point = Point { x: -100.0, y: -100.0 };
