//! Tile map loading
//!
//! Maps are JSON documents holding a character grid. Each character is one
//! tile; the loader turns them into the wall, floor and hazard rectangle
//! layers plus player spawn points. Row 0 is the top of the map and world y
//! grows upward.
//!
//! | Char | Tile |
//! |---|---|
//! | `#` | wall |
//! | `.` | floor |
//! | `~` | hazard |
//! | `1`-`9` | floor with the spawn point for that player |
//! | space | nothing |

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{TILE_SCALING, TILE_SIZE};
use crate::error::{ArenaError, Result};
use crate::sim::{Arena, Rect};

const DEFAULT_ROWS: &[&str] = &[
    "##################################",
    "#................................#",
    "#..1.........#.......~~~.........#",
    "#............#.......~~~.........#",
    "#............#...................#",
    "#.......######...................#",
    "#................................#",
    "#.....~~~.............######.....#",
    "#.....~~~.................#......#",
    "#.........................#......#",
    "#.........#...............#...2..#",
    "#.........#......................#",
    "##################################",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileMap {
    /// Edge length of one tile before scaling
    #[serde(default = "default_tile_size")]
    pub tile_size: f32,
    #[serde(default = "default_scale")]
    pub scale: f32,
    pub rows: Vec<String>,
}

fn default_tile_size() -> f32 {
    TILE_SIZE
}

fn default_scale() -> f32 {
    TILE_SCALING
}

impl TileMap {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ArenaError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let map = Self::from_json(&json)?;
        log::info!("Loaded map {} ({} rows)", path.display(), map.rows.len());
        Ok(map)
    }

    /// The map shipped with the game
    pub fn builtin() -> Self {
        Self {
            tile_size: TILE_SIZE,
            scale: TILE_SCALING,
            rows: DEFAULT_ROWS.iter().map(|row| row.to_string()).collect(),
        }
    }

    /// World-space edge length of one tile
    pub fn tile_edge(&self) -> f32 {
        self.tile_size * self.scale
    }

    /// Build the arena layers
    pub fn build(&self) -> Result<Arena> {
        let Some(first) = self.rows.first() else {
            return Err(ArenaError::EmptyMap);
        };
        let width = first.chars().count();
        let height = self.rows.len();
        let edge = self.tile_edge();
        if width == 0 || !(edge > 0.0) {
            return Err(ArenaError::EmptyMap);
        }

        let mut arena = Arena::default();
        let mut spawns: Vec<Option<Vec2>> = Vec::new();

        for (row, line) in self.rows.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(ArenaError::RaggedRow {
                    row,
                    expected: width,
                    found,
                });
            }

            let y = (height - 1 - row) as f32 * edge;
            for (col, ch) in line.chars().enumerate() {
                let min = Vec2::new(col as f32 * edge, y);
                let tile = Rect::new(min, min + Vec2::splat(edge));
                match ch {
                    '#' => arena.walls.push(tile),
                    '.' => arena.floor.push(tile),
                    '~' => arena.hazards.push(tile),
                    '1'..='9' => {
                        let slot = ch as usize - '1' as usize;
                        if spawns.len() <= slot {
                            spawns.resize(slot + 1, None);
                        }
                        spawns[slot] = Some(tile.center());
                        arena.floor.push(tile);
                    }
                    ' ' => {}
                    _ => return Err(ArenaError::UnknownTile { row, col, ch }),
                }
            }
        }

        arena.spawns = spawns
            .into_iter()
            .enumerate()
            .map(|(slot, spawn)| spawn.ok_or(ArenaError::MissingSpawn { player: slot + 1 }))
            .collect::<Result<_>>()?;

        log::debug!(
            "Built arena: {} walls, {} floor, {} hazards, {} spawns",
            arena.walls.len(),
            arena.floor.len(),
            arena.hazards.len(),
            arena.spawns.len()
        );
        Ok(arena)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(rows: &[&str]) -> TileMap {
        TileMap {
            tile_size: 10.0,
            scale: 2.0,
            rows: rows.iter().map(|r| r.to_string()).collect(),
        }
    }

    #[test]
    fn test_layers_and_coordinates() {
        let arena = map(&["###", "#1~", "#.2"]).build().unwrap();
        assert_eq!(arena.walls.len(), 5);
        assert_eq!(arena.hazards.len(), 1);
        assert_eq!(arena.floor.len(), 3);

        // Top-left wall sits on the highest row
        assert_eq!(arena.walls[0], Rect::new(Vec2::new(0.0, 40.0), Vec2::new(20.0, 60.0)));
        assert_eq!(arena.hazards[0], Rect::new(Vec2::new(40.0, 20.0), Vec2::new(60.0, 40.0)));
        assert_eq!(arena.spawns, vec![Vec2::new(30.0, 30.0), Vec2::new(50.0, 10.0)]);
    }

    #[test]
    fn test_errors() {
        assert!(matches!(map(&[]).build(), Err(ArenaError::EmptyMap)));
        assert!(matches!(
            map(&["###", "#."]).build(),
            Err(ArenaError::RaggedRow {
                row: 1,
                expected: 3,
                found: 2
            })
        ));
        assert!(matches!(
            map(&["#x#"]).build(),
            Err(ArenaError::UnknownTile {
                row: 0,
                col: 1,
                ch: 'x'
            })
        ));
        assert!(matches!(
            map(&["#2#"]).build(),
            Err(ArenaError::MissingSpawn { player: 1 })
        ));
    }

    #[test]
    fn test_json_defaults() {
        let tiles = TileMap::from_json("{ \"rows\": [\"#1#\"] }").unwrap();
        assert_eq!(tiles.tile_size, TILE_SIZE);
        assert_eq!(tiles.scale, TILE_SCALING);
        assert_eq!(tiles.tile_edge(), 48.0);
    }

    #[test]
    fn test_builtin_map_has_two_spawns() {
        let arena = TileMap::builtin().build().unwrap();
        assert_eq!(arena.spawns.len(), 2);
        assert!(!arena.walls.is_empty());
        assert!(!arena.hazards.is_empty());
        for spawn in &arena.spawns {
            let probe = Rect::from_center(*spawn, Vec2::splat(1.0));
            assert!(!arena.walls.iter().any(|w| w.overlaps(&probe)));
        }
    }
}
