pub mod ai;
pub mod arena;
pub mod ballistics;
pub mod config;
pub mod error;
pub mod game;
pub mod logging;
pub mod movement;
pub mod pathfind;
pub mod registry;
pub mod respawn;
pub mod types;
pub mod weapons;

pub use arena::Arena;
pub use error::{ConfigError, LevelError};
pub use game::{Game, RankEntry};
pub use registry::{Agent, Pickup, Projectile};
pub use types::{AgentId, Intent, Point};
pub use weapons::{WeaponKind, WeaponProfile, WeaponTable};
