//! Texture registry.
//!
//! The engine never sees pixels. Each texture is an opaque id plus its size; the window
//! layer keeps the real GPU handles in a list indexed by the same id, so tearing down is a
//! single pass over that list.
use std::collections::HashMap;

use anyhow::{Result, anyhow};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(pub u32);

impl TextureId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug, PartialEq)]
struct Entry {
    path: String,
    width: f32,
    height: f32,
}

/// Largest wall material id with a texture slot.
pub const MAX_WALL_ID: usize = 15;

#[derive(Clone, Debug, Default)]
pub struct TextureTable {
    entries: Vec<Entry>,
    by_path: HashMap<String, TextureId>,
    walls: [Option<TextureId>; MAX_WALL_ID + 1],
    sky: Option<TextureId>,
}

impl TextureTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a texture under its asset path. Registering the same path twice returns
    /// the first id, so every entity using an image shares one handle.
    pub fn register(&mut self, path: &str, width: u32, height: u32) -> TextureId {
        if let Some(&id) = self.by_path.get(path) {
            return id;
        }
        let id = TextureId(self.entries.len() as u32);
        self.entries.push(Entry {
            path: path.to_string(),
            width: width as f32,
            height: height as f32,
        });
        self.by_path.insert(path.to_string(), id);
        id
    }

    pub fn lookup(&self, path: &str) -> Result<TextureId> {
        self.by_path
            .get(path)
            .copied()
            .ok_or_else(|| anyhow!("texture {path:?} was never loaded"))
    }

    /// (width, height) in texels.
    #[inline]
    pub fn size(&self, id: TextureId) -> Option<(f32, f32)> {
        self.entries.get(id.index()).map(|e| (e.width, e.height))
    }

    pub fn path(&self, id: TextureId) -> Option<&str> {
        self.entries.get(id.index()).map(|e| e.path.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn set_wall(&mut self, wall_id: u8, id: TextureId) -> Result<()> {
        let slot = self
            .walls
            .get_mut(wall_id as usize)
            .ok_or_else(|| anyhow!("wall id {wall_id} exceeds {MAX_WALL_ID}"))?;
        *slot = Some(id);
        Ok(())
    }

    #[inline]
    pub fn wall(&self, wall_id: u8) -> Option<TextureId> {
        self.walls.get(wall_id as usize).copied().flatten()
    }

    pub fn set_sky(&mut self, id: TextureId) {
        self.sky = Some(id);
    }

    #[inline]
    pub fn sky(&self) -> Option<TextureId> {
        self.sky
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_path_shares_an_id() {
        let mut table = TextureTable::new();
        let a = table.register("res/a.png", 64, 32);
        let b = table.register("res/b.png", 16, 16);
        assert_ne!(a, b);
        assert_eq!(table.register("res/a.png", 1, 1), a);
        assert_eq!(table.len(), 2);
        assert_eq!(table.size(a), Some((64.0, 32.0)));
        assert_eq!(table.lookup("res/b.png").unwrap(), b);
        assert!(table.lookup("res/c.png").is_err());
    }

    #[test]
    fn wall_slots() {
        let mut table = TextureTable::new();
        let id = table.register("res/textures/1.png", 64, 64);
        table.set_wall(1, id).unwrap();
        assert_eq!(table.wall(1), Some(id));
        assert_eq!(table.wall(2), None);
        assert_eq!(table.wall(200), None);
        assert!(table.set_wall(16, id).is_err());
    }

    #[test]
    fn ids_stay_unique_past_sixteen_bits() {
        let mut table = TextureTable::new();
        let ids: Vec<TextureId> =
            (0..70_000).map(|i| table.register(&format!("t{i}.png"), 1, 1)).collect();
        assert_eq!(ids[69_999], TextureId(69_999));
        assert_eq!(ids[69_999].index(), table.len() - 1);
        assert_ne!(ids[0], ids[65_536]);
    }
}
