use crate::ai;
use crate::arena::Arena;
use crate::ballistics;
use crate::config;
use crate::error::ConfigError;
use crate::movement;
use crate::pathfind;
use crate::registry::{Agent, Pickup, Projectile, Registry};
use crate::respawn;
use crate::types::{AgentId, Intent};
use crate::weapons::WeaponTable;
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashMap;

/// One entry of the final ranking, descending by score with registration
/// order as the deterministic tie-break.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankEntry {
    pub id: AgentId,
    pub score: i32,
}

/// The complete state of one match: arena, actors, clock, weapon table
/// and endgame bookkeeping. Mutated exclusively through `step`.
pub struct Game {
    arena: Arena,
    registry: Registry,
    weapons: WeaponTable,
    win_score: i32,
    time: f64,
    rng: StdRng,
    ranking: Option<Vec<RankEntry>>,
}

impl Game {
    /// Creates a match over a loaded arena. The weapon table and win
    /// score are validated here; the per-step path assumes both are sane.
    pub fn new(arena: Arena, weapons: WeaponTable, win_score: i32) -> Result<Self, ConfigError> {
        Game::with_seed(arena, weapons, win_score, rand::random())
    }

    /// Like `new`, but with a fixed RNG seed for reproducible matches.
    pub fn with_seed(
        arena: Arena,
        weapons: WeaponTable,
        win_score: i32,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        weapons.validate()?;
        if win_score < 1 {
            return Err(ConfigError::InvalidWinScore { value: win_score });
        }

        let mut registry = Registry::new();
        for spawn in &arena.item_spawns {
            registry.pickups.push(Pickup {
                position: spawn.position,
                kind: spawn.kind,
            });
        }

        info!(
            "Match created: {}x{} arena, first to {} points",
            arena.width(),
            arena.height(),
            win_score
        );
        Ok(Game {
            arena,
            registry,
            weapons,
            win_score,
            time: 0.0,
            rng: StdRng::seed_from_u64(seed),
            ranking: None,
        })
    }

    /// Registers a new agent and assigns it a free spawn point. Spawn
    /// exhaustion is non-fatal: the agent is parked off-arena until a
    /// point frees up via respawn.
    pub fn add_agent(&mut self, ai: bool) -> AgentId {
        let id = self.registry.agents.len() as AgentId;
        let position = match respawn::find_spawn_point(&self.arena, &self.registry, &mut self.rng)
        {
            Some(position) => position,
            None => {
                log::warn!("No free spawn point for new agent {}, parking off-arena", id);
                config::OFF_ARENA
            }
        };
        self.registry.agents.push(Agent::new(id, ai, position));
        info!(
            "Agent {} ({}) joined at ({:.0}, {:.0})",
            id,
            if ai { "AI" } else { "human" },
            position.x,
            position.y
        );
        id
    }

    /// Advances the simulation by `elapsed` seconds. Phase order is
    /// load-bearing: movement and pickups for every agent, then all
    /// projectiles, then respawn maturation and the endgame predicate.
    /// Supplied intents apply to human agents only; AI agents compute
    /// their own. Once the match is decided, stepping is a no-op.
    pub fn step(&mut self, intents: &HashMap<AgentId, Intent>, elapsed: f64) {
        if self.ranking.is_some() || elapsed <= 0.0 {
            return;
        }
        self.time += elapsed;

        let resolved = self.resolve_intents(intents);
        movement::run(
            &self.arena,
            &mut self.registry,
            &self.weapons,
            &resolved,
            self.time,
            elapsed,
            &mut self.rng,
        );
        ballistics::run(
            &mut self.arena,
            &mut self.registry,
            &self.weapons,
            self.time,
            elapsed,
        );
        respawn::run(&self.arena, &mut self.registry, self.time, &mut self.rng);
        self.evaluate_endgame();
    }

    // Recomputes each live AI agent's pathfinding field, then derives one
    // intent per agent slot. Dead agents get idle intents.
    fn resolve_intents(&mut self, supplied: &HashMap<AgentId, Intent>) -> Vec<Intent> {
        for agent in self.registry.agents.iter_mut() {
            if agent.ai && agent.alive {
                agent.path_field = Some(pathfind::compute(&self.arena, agent.tile()));
            }
        }

        (0..self.registry.agents.len())
            .map(|index| {
                let agent = &self.registry.agents[index];
                if !agent.alive {
                    Intent::idle()
                } else if agent.ai {
                    ai::decide(&self.arena, &self.registry, index)
                } else {
                    supplied.get(&agent.id).copied().unwrap_or_else(Intent::idle)
                }
            })
            .collect()
    }

    // Freezes the ranking the first time any score reaches the win
    // threshold. The triggering step's physics has already completed.
    fn evaluate_endgame(&mut self) {
        if self.ranking.is_some() {
            return;
        }
        if !self.registry.agents.iter().any(|a| a.score >= self.win_score) {
            return;
        }
        let mut entries: Vec<RankEntry> = self
            .registry
            .agents
            .iter()
            .map(|a| RankEntry {
                id: a.id,
                score: a.score,
            })
            .collect();
        // Stable sort keeps registration order within equal scores.
        entries.sort_by_key(|entry| std::cmp::Reverse(entry.score));
        info!(
            "Match decided: agent {} reached {} points",
            entries[0].id, entries[0].score
        );
        self.ranking = Some(entries);
    }

    /// The frozen final ranking, if any agent has reached the win score.
    /// Non-destructive; the caller decides when to tear the match down.
    pub fn check_endgame(&self) -> Option<&[RankEntry]> {
        self.ranking.as_deref()
    }

    // Read-only query surface for the rendering/UI collaborator.

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn agents(&self) -> &[Agent] {
        &self.registry.agents
    }

    /// Agents currently in play; the dead are excluded until their
    /// respawn matures.
    pub fn live_agents(&self) -> impl Iterator<Item = &Agent> {
        self.registry.live_agents()
    }

    pub fn pickups(&self) -> &[Pickup] {
        &self.registry.pickups
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.registry.projectiles
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    /// One-shot terrain-changed flag, cleared on read.
    pub fn take_terrain_dirty(&mut self) -> bool {
        self.arena.take_dirty()
    }

    #[cfg(test)]
    pub(crate) fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }
}
