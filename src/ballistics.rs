//! Ballistics resolver: trigger pulls, projectile flight, first-obstruction
//! detection along rasterized segments, and blast resolution against
//! terrain and agents.

use crate::arena::Arena;
use crate::config;
use crate::registry::{Agent, PendingRespawn, Projectile, Registry};
use crate::types::{Bounds, Point, sample_segment};
use crate::weapons::{WeaponProfile, WeaponTable};
use rand::Rng;
use rand::rngs::StdRng;
use std::collections::HashSet;

/// Resolves one trigger pull. A shot is valid when the agent is armed,
/// has ammo, and the per-weapon delay has elapsed; it spawns the
/// profile's projectile count with angular spread and consumes one ammo.
/// Running dry unequips the weapon.
pub fn fire(
    agent: &mut Agent,
    table: &WeaponTable,
    time: f64,
    rng: &mut StdRng,
    projectiles: &mut Vec<Projectile>,
) {
    let Some(kind) = agent.weapon else { return };
    let profile = table.profile(kind);
    if agent.ammo == 0 || time - agent.last_shot < profile.shot_delay {
        return;
    }
    let heading = agent.aim - agent.center();
    if heading.length() < 1e-9 {
        return;
    }
    let base_angle = heading.y.atan2(heading.x);
    for _ in 0..profile.count {
        let jitter = if profile.spread > 0.0 {
            rng.gen_range(-profile.spread / 2.0..=profile.spread / 2.0)
        } else {
            0.0
        };
        let angle = base_angle + jitter;
        projectiles.push(Projectile {
            owner: agent.id,
            kind,
            position: agent.center(),
            velocity: Point::new(angle.cos(), angle.sin()) * profile.projectile_speed,
        });
    }
    agent.last_shot = time;
    agent.ammo -= 1;
    crate::debug_ballistics!(agent.id, "fired {} (ammo left {})", kind.name(), agent.ammo);
    if agent.ammo == 0 {
        agent.weapon = None;
        crate::debug_ballistics!(agent.id, "{} exhausted, unequipped", kind.name());
    }
}

/// Advances every projectile by one step. Non-penetrating projectiles
/// stop at the first obstruction; penetrating ones damage every
/// qualifying point along the segment and are destroyed once, at the end
/// of the sweep. Removal is mark-then-compact, never mid-iteration.
pub fn run(arena: &mut Arena, registry: &mut Registry, table: &WeaponTable, time: f64, dt: f64) {
    let Registry {
        agents,
        projectiles,
        pending,
        ..
    } = registry;

    let mut removed = vec![false; projectiles.len()];
    for i in 0..projectiles.len() {
        let proj = projectiles[i];
        if !arena.contains(proj.position) {
            removed[i] = true;
            continue;
        }
        let profile = *table.profile(proj.kind);
        let next = proj.position + proj.velocity * dt;
        let owner = proj.owner as usize;

        // Per-sweep damage bookkeeping: each agent and each tile takes
        // damage at most once per projectile per step.
        let mut damaged_agents = vec![false; agents.len()];
        let mut damaged_tiles: HashSet<(i32, i32)> = HashSet::new();
        let mut hit_any = false;

        for sample in sample_segment(proj.position, next) {
            let (tx, ty) = sample.tile();
            let obstructed = arena.is_solid(tx, ty)
                || agents
                    .iter()
                    .enumerate()
                    .any(|(j, a)| j != owner && a.alive && a.bounds().contains(sample));
            if !obstructed {
                continue;
            }
            resolve_blast(
                arena,
                agents,
                pending,
                owner,
                sample,
                &profile,
                time,
                &mut damaged_agents,
                &mut damaged_tiles,
            );
            hit_any = true;
            if !profile.penetrating {
                break;
            }
        }

        if hit_any {
            removed[i] = true;
        } else {
            projectiles[i].position = next;
        }
    }

    let mut index = 0;
    projectiles.retain(|_| {
        let keep = !removed[index];
        index += 1;
        keep
    });
}

/// Applies one blast at `hit`: every in-bounds tile within the Euclidean
/// blast radius of the hit tile loses `damage` solidity (bedrock exempt),
/// and every live agent overlapping the footprint takes `damage` exactly
/// once. Deaths are scored here and their respawn timers start now.
#[allow(clippy::too_many_arguments)]
fn resolve_blast(
    arena: &mut Arena,
    agents: &mut [Agent],
    pending: &mut Vec<PendingRespawn>,
    owner: usize,
    hit: Point,
    profile: &WeaponProfile,
    time: f64,
    damaged_agents: &mut [bool],
    damaged_tiles: &mut HashSet<(i32, i32)>,
) {
    let center = hit.tile();
    let radius = profile.blast_radius;
    let reach = radius.ceil() as i32;

    let mut footprint: Vec<(i32, i32)> = Vec::new();
    for dy in -reach..=reach {
        for dx in -reach..=reach {
            if ((dx * dx + dy * dy) as f64) > radius * radius + 1e-9 {
                continue;
            }
            let tile = (center.0 + dx, center.1 + dy);
            if tile.0 >= 0 && tile.1 >= 0 && tile.0 < arena.width() && tile.1 < arena.height() {
                footprint.push(tile);
            }
        }
    }

    for &(x, y) in &footprint {
        if damaged_tiles.insert((x, y)) {
            arena.damage(x, y, profile.damage);
        }
    }

    for j in 0..agents.len() {
        if damaged_agents[j] || !agents[j].alive {
            continue;
        }
        let bounds = agents[j].bounds();
        if !footprint
            .iter()
            .any(|&tile| bounds.overlaps(&Bounds::at_tile(tile, 1.0)))
        {
            continue;
        }
        damaged_agents[j] = true;
        agents[j].health -= profile.damage;
        crate::debug_ballistics!(
            agents[j].id,
            "took {:.0} blast damage, {:.0} health left",
            profile.damage,
            agents[j].health.max(0.0)
        );
        if agents[j].health <= 0.0 {
            agents[j].health = 0.0;
            agents[j].alive = false;
            agents[j].weapon = None;
            agents[j].ammo = 0;
            agents[j].path_field = None;
            pending.push(PendingRespawn::Player {
                id: agents[j].id,
                at: time + config::PLAYER_RESPAWN_DELAY,
            });
            if j == owner {
                agents[j].score -= 1;
                log::info!("Agent {} blew itself up", agents[j].id);
            } else {
                agents[owner].score += 1;
                log::info!(
                    "Agent {} destroyed agent {} (score {})",
                    owner,
                    agents[j].id,
                    agents[owner].score
                );
            }
        }
    }
}
