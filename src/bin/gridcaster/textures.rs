use anyhow::{Result, anyhow};
use rand::Rng;
use raylib::prelude::*;

use gridcaster::render::textures::{TextureId, TextureTable};

const FALLBACK_SIZE: i32 = 64;

/// GPU textures, indexed by the ids handed out by the engine's `TextureTable`.
///
/// Dropping the manager unloads every texture.
pub struct TextureManager {
    textures: Vec<Texture2D>,
}

impl TextureManager {
    /// Loads every path, registering each in `table`. Missing or unreadable images are
    /// replaced by a procedural checker so the level stays playable.
    pub fn load_all(
        rl: &mut RaylibHandle,
        thread: &RaylibThread,
        paths: &[String],
        table: &mut TextureTable,
    ) -> Result<Self> {
        let mut tm = Self { textures: Vec::with_capacity(paths.len()) };
        for path in paths {
            let tex = match rl.load_texture(thread, path) {
                Ok(tex) => tex,
                Err(e) => {
                    log::warn!("{path}: {e}, using a generated texture");
                    let img = Self::make_noise_checker(FALLBACK_SIZE, FALLBACK_SIZE);
                    rl.load_texture_from_image(thread, &img)
                        .map_err(|e| anyhow!("uploading fallback for {path}: {e}"))?
                }
            };
            let id = table.register(path, tex.width.max(1) as u32, tex.height.max(1) as u32);
            if id.index() == tm.textures.len() {
                tm.textures.push(tex);
            }
        }
        log::info!("loaded {} textures", tm.textures.len());
        Ok(tm)
    }

    #[inline]
    pub fn get(&self, id: TextureId) -> Option<&Texture2D> {
        self.textures.get(id.index())
    }

    /// Checker with a random base colour and per-texel noise.
    fn make_noise_checker(w: i32, h: i32) -> Image {
        let mut rng = rand::thread_rng();
        let base = Color::new(rng.gen_range(60..200), rng.gen_range(60..200), rng.gen_range(60..200), 255);
        let mut img = Image::gen_image_color(w, h, base);
        let cell = 8;
        for y in 0..h {
            for x in 0..w {
                let lift: u8 = if ((x / cell) + (y / cell)) % 2 == 0 { 40 } else { 0 };
                let n: u8 = rng.gen_range(0..24);
                let c = Color::new(
                    base.r.saturating_add(lift).saturating_sub(n),
                    base.g.saturating_add(lift).saturating_sub(n),
                    base.b.saturating_add(lift).saturating_sub(n),
                    255,
                );
                img.draw_pixel(x, y, c);
            }
        }
        img
    }
}
