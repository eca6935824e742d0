//! Movement, pickup and trigger resolution: the first phase of every
//! step. All of it runs before any projectile advances, so a pickup
//! grabbed this step can already fire this step.

use crate::arena::Arena;
use crate::ballistics;
use crate::config;
use crate::registry::{PendingRespawn, Registry};
use crate::types::Intent;
use crate::weapons::WeaponTable;
use rand::rngs::StdRng;

/// Advances every live agent against its intent: tentative displacement
/// accepted whole or not at all (no sliding, no clamping), then pickup
/// consumption, then trigger resolution.
pub fn run(
    arena: &Arena,
    registry: &mut Registry,
    table: &WeaponTable,
    intents: &[Intent],
    time: f64,
    dt: f64,
    rng: &mut StdRng,
) {
    let Registry {
        agents,
        pickups,
        projectiles,
        pending,
    } = registry;

    for (index, agent) in agents.iter_mut().enumerate() {
        if !agent.alive {
            continue;
        }
        let intent = &intents[index];
        agent.aim = intent.aim;

        // Tentative move: reject on any solid overlap or grid exit.
        let displacement = intent.move_dir.normalized() * (config::AGENT_SPEED * dt);
        if displacement.length() > 0.0 {
            let mut candidate = agent.bounds();
            candidate.position = candidate.position + displacement;
            if !arena.rect_overlaps_solid(&candidate) {
                agent.position = candidate.position;
            } else {
                crate::debug_move!(agent.id, "move blocked at ({:.2}, {:.2})",
                    candidate.position.x, candidate.position.y);
            }
        }

        // First overlapping pickup wins; removal happens after the scan,
        // never mid-iteration.
        let consumed = pickups
            .iter()
            .position(|pickup| agent.bounds().overlaps(&pickup.bounds()));
        if let Some(i) = consumed {
            let pickup = pickups.remove(i);
            agent.weapon = Some(pickup.kind);
            agent.ammo = table.profile(pickup.kind).max_ammo; // Reset, not additive
            pending.push(PendingRespawn::Item {
                kind: pickup.kind,
                position: pickup.position,
                at: time + config::ITEM_RESPAWN_DELAY,
            });
            crate::debug_move!(
                agent.id,
                "picked up {} at ({}, {})",
                pickup.kind.name(),
                pickup.position.0,
                pickup.position.1
            );
        }

        if intent.fire {
            ballistics::fire(agent, table, time, rng, projectiles);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{Agent, Pickup};
    use crate::types::Point;
    use crate::weapons::WeaponKind;
    use assert_approx_eq::assert_approx_eq;
    use rand::SeedableRng;

    fn room_codes(width: usize, height: usize) -> Vec<Vec<u8>> {
        let mut codes = vec![vec![0u8; width]; height];
        for y in 0..height {
            for x in 0..width {
                if x == 0 || y == 0 || x == width - 1 || y == height - 1 {
                    codes[y][x] = 1;
                }
            }
        }
        codes
    }

    fn setup(width: usize, height: usize) -> (Arena, Registry, WeaponTable, StdRng) {
        let arena = Arena::from_tile_codes(&room_codes(width, height)).unwrap();
        (
            arena,
            Registry::new(),
            WeaponTable::standard(),
            StdRng::seed_from_u64(7),
        )
    }

    #[test]
    fn test_sub_tile_advance() {
        // Scenario: speed * dt below one tile advances without snapping.
        let (arena, mut registry, table, mut rng) = setup(24, 16);
        registry.agents.push(Agent::new(0, false, Point::new(2.0, 2.0)));
        let intents = [Intent {
            move_dir: Point::new(1.0, 0.0),
            aim: Point::default(),
            fire: false,
        }];
        let dt = 0.03; // 16 t/s * 0.03 s = 0.48 tiles
        run(&arena, &mut registry, &table, &intents, 0.0, dt, &mut rng);
        assert_approx_eq!(registry.agents[0].position.x, 2.0 + config::AGENT_SPEED * dt);
        assert_approx_eq!(registry.agents[0].position.y, 2.0);
    }

    #[test]
    fn test_blocked_move_stays_put() {
        let (arena, mut registry, table, mut rng) = setup(24, 16);
        // Hugging the west border; moving further west must be rejected
        // outright, with no partial slide.
        registry.agents.push(Agent::new(0, false, Point::new(1.0, 2.0)));
        let intents = [Intent {
            move_dir: Point::new(-1.0, -1.0),
            aim: Point::default(),
            fire: false,
        }];
        run(&arena, &mut registry, &table, &intents, 0.0, 0.1, &mut rng);
        assert_eq!(registry.agents[0].position, Point::new(1.0, 2.0));
    }

    #[test]
    fn test_diagonal_speed_is_normalized() {
        let (arena, mut registry, table, mut rng) = setup(32, 32);
        registry.agents.push(Agent::new(0, false, Point::new(10.0, 10.0)));
        let intents = [Intent {
            move_dir: Point::new(1.0, 1.0),
            aim: Point::default(),
            fire: false,
        }];
        let dt = 0.05;
        run(&arena, &mut registry, &table, &intents, 0.0, dt, &mut rng);
        let moved = registry.agents[0].position - Point::new(10.0, 10.0);
        assert_approx_eq!(moved.length(), config::AGENT_SPEED * dt);
    }

    #[test]
    fn test_dead_agents_do_not_move() {
        let (arena, mut registry, table, mut rng) = setup(24, 16);
        let mut corpse = Agent::new(0, false, Point::new(2.0, 2.0));
        corpse.alive = false;
        registry.agents.push(corpse);
        let intents = [Intent {
            move_dir: Point::new(1.0, 0.0),
            aim: Point::default(),
            fire: false,
        }];
        run(&arena, &mut registry, &table, &intents, 0.0, 0.1, &mut rng);
        assert_eq!(registry.agents[0].position, Point::new(2.0, 2.0));
    }

    #[test]
    fn test_pickup_equips_resets_ammo_and_queues_respawn() {
        let (arena, mut registry, table, mut rng) = setup(24, 16);
        let mut agent = Agent::new(0, false, Point::new(4.0, 4.0));
        // Leftover ammo from a previous weapon must not accumulate.
        agent.weapon = Some(WeaponKind::MachineGun);
        agent.ammo = 3;
        registry.agents.push(agent);
        registry.pickups.push(Pickup {
            position: (6, 4),
            kind: WeaponKind::RocketLauncher,
        });

        let intents = [Intent::idle()];
        run(&arena, &mut registry, &table, &intents, 42.0, 0.016, &mut rng);

        let agent = &registry.agents[0];
        assert_eq!(agent.weapon, Some(WeaponKind::RocketLauncher));
        assert_eq!(
            agent.ammo,
            table.profile(WeaponKind::RocketLauncher).max_ammo
        );
        assert!(registry.pickups.is_empty());
        assert_eq!(
            registry.pending,
            vec![PendingRespawn::Item {
                kind: WeaponKind::RocketLauncher,
                position: (6, 4),
                at: 42.0 + config::ITEM_RESPAWN_DELAY,
            }]
        );
    }

    #[test]
    fn test_only_first_overlapping_pickup_consumed() {
        let (arena, mut registry, table, mut rng) = setup(24, 16);
        registry.agents.push(Agent::new(0, false, Point::new(4.0, 4.0)));
        registry.pickups.push(Pickup {
            position: (5, 4),
            kind: WeaponKind::MachineGun,
        });
        registry.pickups.push(Pickup {
            position: (6, 4),
            kind: WeaponKind::Laser,
        });
        let intents = [Intent::idle()];
        run(&arena, &mut registry, &table, &intents, 0.0, 0.016, &mut rng);
        assert_eq!(registry.agents[0].weapon, Some(WeaponKind::MachineGun));
        assert_eq!(registry.pickups.len(), 1);
    }

    #[test]
    fn test_fire_intent_spawns_projectile() {
        let (arena, mut registry, table, mut rng) = setup(24, 16);
        let mut agent = Agent::new(0, false, Point::new(4.0, 4.0));
        agent.weapon = Some(WeaponKind::Laser);
        agent.ammo = 2;
        agent.last_shot = -10.0;
        registry.agents.push(agent);
        let intents = [Intent {
            move_dir: Point::default(),
            aim: Point::new(18.0, 6.0),
            fire: true,
        }];
        run(&arena, &mut registry, &table, &intents, 1.0, 0.016, &mut rng);
        assert_eq!(registry.projectiles.len(), 1);
        assert_eq!(registry.agents[0].ammo, 1);
    }
}
