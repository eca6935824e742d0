//! Respawn scheduler: matures pending player and item respawns against
//! the match clock. Runs last in the step, so a death inflicted this step
//! starts its timer this step.

use crate::arena::Arena;
use crate::config;
use crate::registry::{PendingRespawn, Pickup, Registry};
use crate::types::{AgentId, Point};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Picks a spawn point whose agent footprint is free of live agents.
/// Spawn points are shuffled so repeated respawns spread across the
/// arena. None if every point is occupied.
pub fn find_spawn_point(arena: &Arena, registry: &Registry, rng: &mut StdRng) -> Option<Point> {
    let mut candidates = arena.player_spawns.clone();
    candidates.shuffle(rng);
    for (x, y) in candidates {
        let position = Point::new(x as f64, y as f64);
        let footprint = crate::types::Bounds::new(
            position,
            Point::new(config::AGENT_SIZE, config::AGENT_SIZE),
        );
        let occupied = registry
            .live_agents()
            .any(|agent| agent.bounds().overlaps(&footprint));
        if !occupied {
            return Some(position);
        }
    }
    None
}

/// Matures every pending respawn whose time has come. Matured entries are
/// applied, the rest stay queued; compaction happens after the scan.
pub fn run(arena: &Arena, registry: &mut Registry, time: f64, rng: &mut StdRng) {
    let mut matured: Vec<PendingRespawn> = Vec::new();
    registry.pending.retain(|entry| {
        if entry.matures_at() <= time {
            matured.push(*entry);
            false
        } else {
            true
        }
    });

    for entry in matured {
        match entry {
            PendingRespawn::Player { id, .. } => respawn_player(arena, registry, id, rng),
            PendingRespawn::Item { kind, position, .. } => {
                registry.pickups.push(Pickup { position, kind });
                crate::debug_respawn!("{} respawned at ({}, {})", kind.name(), position.0, position.1);
            }
        }
    }
}

// Reinstates a dead agent: full health, unarmed, at a free spawn point.
// Spawn exhaustion is non-fatal; the agent is parked off-arena.
fn respawn_player(arena: &Arena, registry: &mut Registry, id: AgentId, rng: &mut StdRng) {
    let position = match find_spawn_point(arena, registry, rng) {
        Some(position) => position,
        None => {
            log::warn!("No free spawn point for agent {}, parking off-arena", id);
            config::OFF_ARENA
        }
    };
    let agent = registry.agent_mut(id);
    agent.position = position;
    agent.health = config::AGENT_MAX_HEALTH;
    agent.alive = true;
    agent.weapon = None;
    agent.ammo = 0;
    agent.path_field = None;
    crate::debug_respawn!("agent {} respawned at ({:.0}, {:.0})", id, position.x, position.y);
}
