// main.rs
mod audio_manager;
mod framebuffer;
mod process_events;
mod textures;

use anyhow::{Context, Result, ensure};
use raylib::prelude::*;

use audio_manager::AudioManager;
use framebuffer::Framebuffer;
use gridcaster::core::input::Key;
use gridcaster::core::level::Level;
use gridcaster::core::map::GridMap;
use gridcaster::render::textures::TextureTable;
use gridcaster::{EngineConfig, Renderer, World};
use process_events::process_events;
use textures::TextureManager;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(e) = run() {
        log::error!("{e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cfg = EngineConfig::load_or_default()?;

    // an optional map file replaces the built-in layout, spawns stay as they are
    let mut level = Level::demo()?;
    if let Some(path) = std::env::args().nth(1) {
        level.map = GridMap::load(&path)?;
        let (x, y, _) = level.player_start;
        ensure!(!level.map.is_solid(x, y), "{path}: player start ({x}, {y}) is inside a wall");
    }

    let (mut window, raylib_thread) = raylib::init()
        .size(cfg.window_width as i32, cfg.window_height as i32)
        .title("gridcaster")
        .build();
    window.set_target_fps(cfg.target_fps);
    window.set_exit_key(None);
    window.disable_cursor();

    let mut table = TextureTable::new();
    let texman = TextureManager::load_all(&mut window, &raylib_thread, &level.asset_paths(), &mut table)?;
    level.bind_textures(&mut table)?;
    let mut world = World::from_level(&level, &table, &cfg).context("building the level")?;

    let mut framebuffer = Framebuffer::new(&mut window, &raylib_thread, cfg.view_width, cfg.view_height)?;
    let mut renderer = Renderer::new(&cfg);

    let mut audio = AudioManager::new();
    match audio.as_mut() {
        Some(a) => a.load_sfx_auto(),
        None => log::warn!("no audio output device, running silent"),
    }

    loop {
        let input = process_events(&window);
        if input.quit {
            break;
        }
        // long stalls would otherwise move the player through walls
        let dt = window.get_frame_time().min(cfg.max_frame_dt);
        let events = world.update(&input, dt, &cfg);
        if events.enemies_killed > 0 {
            log::info!("{} left standing", world.living_enemies().count());
        }

        if let Some(a) = audio.as_mut() {
            a.play_events(&events);
            let moving = [Key::Forward, Key::Back, Key::StrafeLeft, Key::StrafeRight]
                .into_iter()
                .any(|k| input.is_held(k));
            if moving {
                a.play_player_step(world.player.sprinting);
            }
        }

        let weapon = &world.player.weapon;
        let hud = format!("FPS: {}  AMMO: {}/{}", window.get_fps(), weapon.ammo, weapon.max_ammo);
        let commands = renderer.render(&world, &table, &cfg);
        framebuffer.present(&mut window, &raylib_thread, commands, &texman, &hud);
    }
    Ok(())
}
