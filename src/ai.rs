//! AI decision procedure: turns one agent's state plus its pathfinding
//! field into a movement/aim/fire intent. Unarmed agents hunt the nearest
//! reachable pickup; armed agents hunt the nearest reachable opponent and
//! fire on a clear sight line.

use crate::arena::Arena;
use crate::registry::Registry;
use crate::types::{Intent, Point, sample_segment};

/// Computes the intent for the AI agent at `index`. Requires the agent's
/// path field to be freshly computed for this step; without one the agent
/// idles.
pub fn decide(arena: &Arena, registry: &Registry, index: usize) -> Intent {
    let agent = &registry.agents[index];
    debug_assert!(agent.ai && agent.alive);
    let Some(field) = agent.path_field.as_ref() else {
        return Intent::idle();
    };

    if agent.is_armed() {
        // Nearest reachable live opponent.
        let target = registry
            .live_agents()
            .filter(|other| other.id != agent.id)
            .filter_map(|other| {
                let dist = field.distance(other.tile());
                (dist != crate::pathfind::UNREACHABLE).then_some((dist, other))
            })
            .min_by_key(|(dist, other)| (*dist, other.id));

        let Some((_, target)) = target else {
            return Intent::idle();
        };

        if sight_clear(arena, agent.center(), target.center()) {
            crate::debug_ai!(agent.id, "target {} in sight, firing", target.id);
            return Intent {
                move_dir: Point::default(),
                aim: target.center(),
                fire: true,
            };
        }
        return follow_path(field, target.tile(), agent.aim);
    }

    // Unarmed: nearest reachable pickup.
    let goal = registry
        .pickups
        .iter()
        .filter_map(|pickup| {
            let dist = field.distance(pickup.position);
            (dist != crate::pathfind::UNREACHABLE).then_some((dist, pickup.position))
        })
        .min_by_key(|(dist, position)| (*dist, *position));

    match goal {
        Some((_, position)) => follow_path(field, position, agent.aim),
        None => Intent::idle(),
    }
}

fn follow_path(field: &crate::pathfind::PathField, target: (i32, i32), aim: Point) -> Intent {
    match field.first_step(target) {
        Some(step) => Intent {
            move_dir: Point::new(step.0 as f64, step.1 as f64),
            aim,
            fire: false,
        },
        None => Intent::idle(),
    }
}

/// True if no sampled point along the segment lands on a solid tile.
pub fn sight_clear(arena: &Arena, from: Point, to: Point) -> bool {
    sample_segment(from, to).iter().all(|point| {
        let (x, y) = point.tile();
        !arena.is_solid(x, y)
    })
}
