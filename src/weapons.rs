//! Static, validated weapon configuration, indexed by weapon kind.

use crate::error::ConfigError;

/// The weapon kinds an agent can carry. Level tile codes 4/5/6 map onto
/// these in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeaponKind {
    MachineGun,
    Laser,
    RocketLauncher,
}

impl WeaponKind {
    pub const ALL: [WeaponKind; 3] = [
        WeaponKind::MachineGun,
        WeaponKind::Laser,
        WeaponKind::RocketLauncher,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            WeaponKind::MachineGun => "machinegun",
            WeaponKind::Laser => "laser",
            WeaponKind::RocketLauncher => "rocketlauncher",
        }
    }

    /// Maps a weapon spawn marker tile code. Codes below 4 are terrain or
    /// player spawns and are handled by the arena loader.
    pub fn from_tile_code(code: u8) -> Option<WeaponKind> {
        match code {
            4 => Some(WeaponKind::MachineGun),
            5 => Some(WeaponKind::Laser),
            6 => Some(WeaponKind::RocketLauncher),
            _ => None,
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

/// Per-kind ballistic parameters, immutable for the match.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeaponProfile {
    pub max_ammo: u32,
    pub shot_delay: f64,       // Seconds between trigger pulls
    pub projectile_speed: f64, // Tiles per second
    pub damage: f64,           // Per blast, to terrain solidity and agent health alike
    pub count: u32,            // Projectiles per trigger pull
    pub spread: f64,           // Angular jitter in radians, total cone width
    pub blast_radius: f64,     // Euclidean, in tiles; 0 = hit tile only
    pub penetrating: bool,
}

/// The per-match weapon table. Built once, validated once, then read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct WeaponTable {
    profiles: [WeaponProfile; 3],
}

impl WeaponTable {
    pub fn new(profiles: [WeaponProfile; 3]) -> Self {
        WeaponTable { profiles }
    }

    /// The stock loadout. Ammo counts follow the original game settings.
    pub fn standard() -> Self {
        WeaponTable::new([
            // MachineGun
            WeaponProfile {
                max_ammo: 100,
                shot_delay: 0.12,
                projectile_speed: 60.0,
                damage: 25.0,
                count: 1,
                spread: 0.04,
                blast_radius: 0.0,
                penetrating: false,
            },
            // Laser
            WeaponProfile {
                max_ammo: 100,
                shot_delay: 0.5,
                projectile_speed: 120.0,
                damage: 35.0,
                count: 1,
                spread: 0.0,
                blast_radius: 0.0,
                penetrating: true,
            },
            // RocketLauncher
            WeaponProfile {
                max_ammo: 10,
                shot_delay: 1.0,
                projectile_speed: 30.0,
                damage: 50.0,
                count: 1,
                spread: 0.0,
                blast_radius: 4.0,
                penetrating: false,
            },
        ])
    }

    pub fn profile(&self, kind: WeaponKind) -> &WeaponProfile {
        &self.profiles[kind.index()]
    }

    /// Rejects profiles that would divide by zero or misbehave inside the
    /// per-step loops.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for kind in WeaponKind::ALL {
            let weapon = kind.name();
            let p = self.profile(kind);
            if p.max_ammo == 0 {
                return Err(ConfigError::ZeroAmmo { weapon });
            }
            if p.projectile_speed <= 0.0 {
                return Err(ConfigError::NonPositive {
                    weapon,
                    field: "projectile speed",
                });
            }
            if p.damage <= 0.0 {
                return Err(ConfigError::NonPositive {
                    weapon,
                    field: "damage",
                });
            }
            if p.count == 0 {
                return Err(ConfigError::NonPositive {
                    weapon,
                    field: "projectile count",
                });
            }
            if p.shot_delay < 0.0 {
                return Err(ConfigError::Negative {
                    weapon,
                    field: "shot delay",
                });
            }
            if p.spread < 0.0 {
                return Err(ConfigError::Negative {
                    weapon,
                    field: "spread",
                });
            }
            if p.blast_radius < 0.0 {
                return Err(ConfigError::Negative {
                    weapon,
                    field: "blast radius",
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table_is_valid() {
        assert!(WeaponTable::standard().validate().is_ok());
    }

    #[test]
    fn test_zero_ammo_rejected() {
        let mut table = WeaponTable::standard();
        table.profiles[WeaponKind::RocketLauncher as usize].max_ammo = 0;
        assert_eq!(
            table.validate(),
            Err(ConfigError::ZeroAmmo {
                weapon: "rocketlauncher"
            })
        );
    }

    #[test]
    fn test_nonpositive_speed_rejected() {
        let mut table = WeaponTable::standard();
        table.profiles[WeaponKind::Laser as usize].projectile_speed = 0.0;
        assert!(matches!(
            table.validate(),
            Err(ConfigError::NonPositive { weapon: "laser", .. })
        ));
    }

    #[test]
    fn test_tile_code_mapping() {
        assert_eq!(WeaponKind::from_tile_code(4), Some(WeaponKind::MachineGun));
        assert_eq!(WeaponKind::from_tile_code(5), Some(WeaponKind::Laser));
        assert_eq!(
            WeaponKind::from_tile_code(6),
            Some(WeaponKind::RocketLauncher)
        );
        assert_eq!(WeaponKind::from_tile_code(3), None);
    }
}
