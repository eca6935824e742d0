use crate::config;
use crate::error::LevelError;
use crate::types::{Bounds, Point};
use crate::weapons::WeaponKind;

// One cell of the destructible grid. Bedrock never loses solidity; other
// tiles become passable once solidity drops to zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tile {
    pub bedrock: bool,
    pub solidity: f64,
}

/// A weapon spawn descriptor extracted from the level data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemSpawn {
    pub position: (i32, i32),
    pub kind: WeaponKind,
}

/// The destructible tile grid plus the spawn lists extracted from it.
///
/// Out-of-bounds convention: every solidity query treats coordinates
/// outside the grid as solid. Movement, ballistics, sight lines and
/// pathfinding all go through `is_solid`, so the convention holds
/// uniformly.
#[derive(Debug, Clone, PartialEq)]
pub struct Arena {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
    pub player_spawns: Vec<(i32, i32)>,
    pub item_spawns: Vec<ItemSpawn>,
    dirty: bool,
}

impl Arena {
    /// Builds an arena from a rectangular grid of integer tile codes:
    /// 0 open floor, 1 bedrock, 2 player spawn, 3 destructible wall,
    /// 4/5/6 weapon spawn markers. Spawn markers sit on open floor.
    /// Malformed input fails here, before any match starts.
    pub fn from_tile_codes(codes: &[Vec<u8>]) -> Result<Arena, LevelError> {
        if codes.is_empty() || codes[0].is_empty() {
            return Err(LevelError::EmptyGrid);
        }
        let width = codes[0].len();
        let height = codes.len();

        let mut tiles = Vec::with_capacity(width * height);
        let mut player_spawns = Vec::new();
        let mut item_spawns = Vec::new();

        for (y, row) in codes.iter().enumerate() {
            if row.len() != width {
                return Err(LevelError::RowLengthMismatch {
                    row: y,
                    len: row.len(),
                    expected: width,
                });
            }
            for (x, &code) in row.iter().enumerate() {
                let tile = match code {
                    0 => Tile {
                        bedrock: false,
                        solidity: 0.0,
                    },
                    1 => Tile {
                        bedrock: true,
                        solidity: 1.0,
                    },
                    2 => {
                        player_spawns.push((x as i32, y as i32));
                        Tile {
                            bedrock: false,
                            solidity: 0.0,
                        }
                    }
                    3 => Tile {
                        bedrock: false,
                        solidity: config::WALL_SOLIDITY,
                    },
                    _ => match WeaponKind::from_tile_code(code) {
                        Some(kind) => {
                            item_spawns.push(ItemSpawn {
                                position: (x as i32, y as i32),
                                kind,
                            });
                            Tile {
                                bedrock: false,
                                solidity: 0.0,
                            }
                        }
                        None => return Err(LevelError::UnknownTileCode { code, x, y }),
                    },
                };
                tiles.push(tile);
            }
        }

        let arena = Arena {
            width: width as i32,
            height: height as i32,
            tiles,
            player_spawns,
            item_spawns,
            dirty: true, // Force an initial terrain upload by the renderer
        };
        arena.validate()?;

        log::info!(
            "Arena loaded: {}x{} tiles, {} player spawns, {} item spawns",
            arena.width,
            arena.height,
            arena.player_spawns.len(),
            arena.item_spawns.len()
        );
        Ok(arena)
    }

    // Load-time invariants: solid border, player spawns with a clear
    // agent footprint.
    fn validate(&self) -> Result<(), LevelError> {
        for y in 0..self.height {
            for x in 0..self.width {
                let border = x == 0 || y == 0 || x == self.width - 1 || y == self.height - 1;
                if border && !self.is_solid(x, y) {
                    return Err(LevelError::OpenBorder {
                        x: x as usize,
                        y: y as usize,
                    });
                }
            }
        }
        for &(x, y) in &self.player_spawns {
            let footprint = Bounds::at_tile((x, y), config::AGENT_SIZE);
            if self.rect_overlaps_solid(&footprint) {
                return Err(LevelError::BlockedSpawn { x, y });
            }
        }
        Ok(())
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            None
        } else {
            Some((y * self.width + x) as usize)
        }
    }

    pub fn tile(&self, x: i32, y: i32) -> Option<&Tile> {
        self.index(x, y).map(|i| &self.tiles[i])
    }

    /// Solidity query with the fixed out-of-bounds-is-solid convention.
    pub fn is_solid(&self, x: i32, y: i32) -> bool {
        match self.index(x, y) {
            Some(i) => self.tiles[i].solidity > 0.0,
            None => true,
        }
    }

    /// True if the point lies inside the grid.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= 0.0
            && point.y >= 0.0
            && point.x < self.width as f64
            && point.y < self.height as f64
    }

    /// True if any tile covered by the bounds is solid. Covered tiles
    /// outside the grid count as solid, so this also rejects bounds that
    /// leave the arena.
    pub fn rect_overlaps_solid(&self, bounds: &Bounds) -> bool {
        let (x0, x1, y0, y1) = bounds.covered_tiles();
        for y in y0..y1 {
            for x in x0..x1 {
                if self.is_solid(x, y) {
                    return true;
                }
            }
        }
        false
    }

    /// Reduces a non-bedrock tile's solidity, clamped at zero. Sets the
    /// dirty flag when the tile newly becomes passable. Out-of-bounds and
    /// bedrock are no-ops.
    pub fn damage(&mut self, x: i32, y: i32, amount: f64) {
        let Some(i) = self.index(x, y) else { return };
        let tile = &mut self.tiles[i];
        if tile.bedrock || tile.solidity <= 0.0 {
            return;
        }
        tile.solidity = (tile.solidity - amount).max(0.0);
        if tile.solidity <= 0.0 {
            log::debug!(target: "arena", "Tile ({}, {}) destroyed", x, y);
            self.dirty = true;
        }
    }

    /// One-shot "terrain changed" flag for the rendering collaborator;
    /// reading it clears it.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Open room with a solid border, one player spawn and one item spawn.
    pub fn room_codes(width: usize, height: usize) -> Vec<Vec<u8>> {
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

    #[test]
    fn test_load_extracts_spawns() {
        let mut codes = room_codes(16, 16);
        codes[2][2] = 2;
        codes[10][10] = 5;
        let arena = Arena::from_tile_codes(&codes).unwrap();
        assert_eq!(arena.player_spawns, vec![(2, 2)]);
        assert_eq!(
            arena.item_spawns,
            vec![ItemSpawn {
                position: (10, 10),
                kind: WeaponKind::Laser
            }]
        );
        // Marker tiles are open floor.
        assert!(!arena.is_solid(2, 2));
        assert!(!arena.is_solid(10, 10));
    }

    #[test]
    fn test_row_length_mismatch_rejected() {
        let mut codes = room_codes(8, 8);
        codes[3].push(0);
        assert_eq!(
            Arena::from_tile_codes(&codes),
            Err(LevelError::RowLengthMismatch {
                row: 3,
                len: 9,
                expected: 8
            })
        );
    }

    #[test]
    fn test_unknown_code_rejected() {
        let mut codes = room_codes(8, 8);
        codes[4][4] = 9;
        assert_eq!(
            Arena::from_tile_codes(&codes),
            Err(LevelError::UnknownTileCode { code: 9, x: 4, y: 4 })
        );
    }

    #[test]
    fn test_empty_grid_rejected() {
        assert_eq!(Arena::from_tile_codes(&[]), Err(LevelError::EmptyGrid));
        assert_eq!(
            Arena::from_tile_codes(&[vec![]]),
            Err(LevelError::EmptyGrid)
        );
    }

    #[test]
    fn test_open_border_rejected() {
        let mut codes = room_codes(8, 8);
        codes[0][3] = 0;
        assert_eq!(
            Arena::from_tile_codes(&codes),
            Err(LevelError::OpenBorder { x: 3, y: 0 })
        );
    }

    #[test]
    fn test_blocked_spawn_rejected() {
        let mut codes = room_codes(16, 16);
        codes[2][2] = 2;
        codes[3][4] = 3; // Wall inside the 4x4 spawn footprint
        assert_eq!(
            Arena::from_tile_codes(&codes),
            Err(LevelError::BlockedSpawn { x: 2, y: 2 })
        );
    }

    #[test]
    fn test_out_of_bounds_is_solid() {
        let arena = Arena::from_tile_codes(&room_codes(8, 8)).unwrap();
        assert!(arena.is_solid(-1, 4));
        assert!(arena.is_solid(4, -1));
        assert!(arena.is_solid(8, 4));
        assert!(arena.is_solid(4, 8));
        assert!(!arena.is_solid(4, 4));
    }

    #[test]
    fn test_damage_clamps_and_sets_dirty() {
        let mut codes = room_codes(8, 8);
        codes[4][4] = 3;
        let mut arena = Arena::from_tile_codes(&codes).unwrap();
        assert!(arena.take_dirty()); // Initial upload flag
        assert!(!arena.take_dirty()); // One-shot

        arena.damage(4, 4, config::WALL_SOLIDITY / 2.0);
        assert!(arena.is_solid(4, 4));
        assert!(!arena.take_dirty()); // Still solid, nothing to redraw yet

        arena.damage(4, 4, config::WALL_SOLIDITY);
        assert!(!arena.is_solid(4, 4));
        assert_eq!(arena.tile(4, 4).unwrap().solidity, 0.0);
        assert!(arena.take_dirty());
    }

    #[test]
    fn test_bedrock_ignores_damage() {
        let mut arena = Arena::from_tile_codes(&room_codes(8, 8)).unwrap();
        arena.take_dirty();
        arena.damage(0, 0, 1e9);
        assert!(arena.is_solid(0, 0));
        assert!(!arena.take_dirty());
    }

    #[test]
    fn test_rect_overlaps_solid_rejects_leaving_grid() {
        let arena = Arena::from_tile_codes(&room_codes(8, 8)).unwrap();
        let inside = Bounds::new(Point::new(2.0, 2.0), Point::new(4.0, 4.0));
        assert!(!arena.rect_overlaps_solid(&inside));
        let hugging_border = Bounds::new(Point::new(0.5, 2.0), Point::new(4.0, 4.0));
        assert!(arena.rect_overlaps_solid(&hugging_border));
        let outside = Bounds::new(Point::new(-6.0, -6.0), Point::new(4.0, 4.0));
        assert!(arena.rect_overlaps_solid(&outside));
    }
}
