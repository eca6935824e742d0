//! Per-agent pathfinding oracle: a breadth-first distance and
//! back-direction field over the arena, recomputed from scratch every
//! step. Full-grid BFS per AI agent is an accepted cost at the reference
//! arena scale (64x56); it is the first thing to revisit for larger grids.

use crate::arena::Arena;
use crate::config;
use crate::types::Bounds;
use std::collections::VecDeque;

/// Distance sentinel for tiles no path reaches.
pub const UNREACHABLE: u32 = u32::MAX;

/// The four cardinal steps.
const STEPS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// BFS result field: per tile, the shortest hop count from the origin and
/// the step leading one hop back toward the origin along a shortest path.
#[derive(Debug, Clone)]
pub struct PathField {
    width: i32,
    height: i32,
    origin: (i32, i32),
    dist: Vec<u32>,
    back: Vec<Option<(i32, i32)>>,
}

impl PathField {
    pub fn origin(&self) -> (i32, i32) {
        self.origin
    }

    fn index(&self, tile: (i32, i32)) -> Option<usize> {
        let (x, y) = tile;
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            None
        } else {
            Some((y * self.width + x) as usize)
        }
    }

    /// Shortest hop count to `tile`, or `UNREACHABLE`.
    pub fn distance(&self, tile: (i32, i32)) -> u32 {
        match self.index(tile) {
            Some(i) => self.dist[i],
            None => UNREACHABLE,
        }
    }

    pub fn reachable(&self, tile: (i32, i32)) -> bool {
        self.distance(tile) != UNREACHABLE
    }

    /// Reconstructs the shortest path origin -> target (inclusive of both)
    /// by walking the back-direction chain from the target.
    pub fn path_to(&self, target: (i32, i32)) -> Option<Vec<(i32, i32)>> {
        if !self.reachable(target) {
            return None;
        }
        let mut path = Vec::with_capacity(self.distance(target) as usize + 1);
        let mut tile = target;
        path.push(tile);
        while tile != self.origin {
            let back = self.back[self.index(tile)?]?;
            tile = (tile.0 + back.0, tile.1 + back.1);
            path.push(tile);
        }
        path.reverse();
        Some(path)
    }

    /// The first cardinal step from the origin toward `target`, or None if
    /// the target is unreachable or already the origin tile.
    pub fn first_step(&self, target: (i32, i32)) -> Option<(i32, i32)> {
        let path = self.path_to(target)?;
        let next = *path.get(1)?;
        Some((next.0 - self.origin.0, next.1 - self.origin.1))
    }
}

/// True if an agent footprint anchored at `tile` sits fully on passable
/// terrain.
pub fn footprint_clear(arena: &Arena, tile: (i32, i32)) -> bool {
    !arena.rect_overlaps_solid(&Bounds::at_tile(tile, config::AGENT_SIZE))
}

/// Breadth-first flood from `origin` over 4-connected tiles, rejecting any
/// neighbor where the agent footprint would overlap solid terrain. The
/// origin itself always carries distance 0, whatever terrain it sits on.
pub fn compute(arena: &Arena, origin: (i32, i32)) -> PathField {
    let width = arena.width();
    let height = arena.height();
    let cells = (width * height) as usize;

    let mut field = PathField {
        width,
        height,
        origin,
        dist: vec![UNREACHABLE; cells],
        back: vec![None; cells],
    };

    let Some(start) = field.index(origin) else {
        return field; // Off-grid origin (sentinel parking): empty field
    };
    field.dist[start] = 0;

    let mut queue = VecDeque::new();
    queue.push_back(origin);
    while let Some(tile) = queue.pop_front() {
        let Some(here) = field.index(tile) else {
            continue;
        };
        let next_dist = field.dist[here] + 1;
        for step in STEPS {
            let neighbor = (tile.0 + step.0, tile.1 + step.1);
            let Some(n) = field.index(neighbor) else {
                continue;
            };
            if field.dist[n] != UNREACHABLE || !footprint_clear(arena, neighbor) {
                continue;
            }
            field.dist[n] = next_dist;
            field.back[n] = Some((-step.0, -step.1));
            queue.push_back(neighbor);
        }
    }
    field
}
