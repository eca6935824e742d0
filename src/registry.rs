//! The actor registry: every mutable collection a match owns. Components
//! borrow the registry for the duration of one phase and cross-reference
//! entities by id or position only, never through long-lived references.

use crate::config;
use crate::pathfind::PathField;
use crate::types::{AgentId, Bounds, Point};
use crate::weapons::WeaponKind;

/// A controllable entity, human- or AI-driven. Position is the top-left
/// corner of its square footprint, in sub-tile units.
#[derive(Debug, Clone)]
pub struct Agent {
    pub id: AgentId,
    pub ai: bool,
    pub position: Point,
    pub health: f64,
    pub score: i32,
    pub aim: Point,
    pub weapon: Option<WeaponKind>,
    pub ammo: u32,
    pub last_shot: f64,
    pub alive: bool,
    /// BFS field from the agent's tile, recomputed every step. AI only.
    pub path_field: Option<PathField>,
}

impl Agent {
    pub fn new(id: AgentId, ai: bool, position: Point) -> Self {
        Agent {
            id,
            ai,
            position,
            health: config::AGENT_MAX_HEALTH,
            score: 0,
            aim: position,
            weapon: None,
            ammo: 0,
            last_shot: 0.0,
            alive: true,
            path_field: None,
        }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(
            self.position,
            Point::new(config::AGENT_SIZE, config::AGENT_SIZE),
        )
    }

    pub fn center(&self) -> Point {
        self.bounds().center()
    }

    /// The tile anchoring the agent's footprint.
    pub fn tile(&self) -> (i32, i32) {
        self.position.tile()
    }

    pub fn is_armed(&self) -> bool {
        self.weapon.is_some()
    }
}

/// A weapon pickup sitting in the world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pickup {
    pub position: (i32, i32),
    pub kind: WeaponKind,
}

impl Pickup {
    pub fn bounds(&self) -> Bounds {
        Bounds::at_tile(self.position, config::PICKUP_SIZE)
    }
}

/// An in-flight projectile. Ballistic parameters come from the weapon
/// table, keyed by `kind`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    pub owner: AgentId,
    pub kind: WeaponKind,
    pub position: Point,
    pub velocity: Point,
}

/// A timed, deferred reinsertion: a dead agent waiting to respawn or a
/// consumed pickup waiting to reappear. `at` is in match-clock seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PendingRespawn {
    Player { id: AgentId, at: f64 },
    Item { kind: WeaponKind, position: (i32, i32), at: f64 },
}

impl PendingRespawn {
    pub fn matures_at(&self) -> f64 {
        match self {
            PendingRespawn::Player { at, .. } => *at,
            PendingRespawn::Item { at, .. } => *at,
        }
    }
}

/// Exclusive owner of all agents, pickups, projectiles and pending
/// respawns for one match.
#[derive(Debug, Default)]
pub struct Registry {
    pub agents: Vec<Agent>,
    pub pickups: Vec<Pickup>,
    pub projectiles: Vec<Projectile>,
    pub pending: Vec<PendingRespawn>,
}

impl Registry {
    pub fn new() -> Self {
        Registry::default()
    }

    pub fn live_agents(&self) -> impl Iterator<Item = &Agent> {
        self.agents.iter().filter(|a| a.alive)
    }

    pub fn agent(&self, id: AgentId) -> &Agent {
        &self.agents[id as usize]
    }

    pub fn agent_mut(&mut self, id: AgentId) -> &mut Agent {
        &mut self.agents[id as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_bounds_and_center() {
        let agent = Agent::new(0, false, Point::new(2.0, 2.0));
        assert_eq!(agent.bounds().size, Point::new(4.0, 4.0));
        assert_eq!(agent.center(), Point::new(4.0, 4.0));
        assert_eq!(agent.tile(), (2, 2));
    }

    #[test]
    fn test_live_agents_excludes_dead() {
        let mut registry = Registry::new();
        registry.agents.push(Agent::new(0, false, Point::new(2.0, 2.0)));
        registry.agents.push(Agent::new(1, false, Point::new(8.0, 2.0)));
        registry.agents[1].alive = false;
        let live: Vec<AgentId> = registry.live_agents().map(|a| a.id).collect();
        assert_eq!(live, vec![0]);
    }

    #[test]
    fn test_pending_maturation_time() {
        let p = PendingRespawn::Player { id: 3, at: 12.5 };
        assert_eq!(p.matures_at(), 12.5);
        let i = PendingRespawn::Item {
            kind: WeaponKind::Laser,
            position: (4, 4),
            at: 7.0,
        };
        assert_eq!(i.matures_at(), 7.0);
    }
}
