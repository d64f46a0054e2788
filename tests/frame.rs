use gridcaster::core::anim::{AnimatedSprite, SpriteImage};
use gridcaster::core::input::{InputState, Key};
use gridcaster::core::map::GridMap;
use gridcaster::core::player::Player;
use gridcaster::core::weapon::Weapon;
use gridcaster::core::world::Prop;
use gridcaster::render::caster::{Face, MISS_DISTANCE, cast};
use gridcaster::render::draw::DrawCommand;
use gridcaster::render::textures::{TextureId, TextureTable};
use gridcaster::{EngineConfig, Renderer, World};

const BLOCK_ROOM: &str = "
    1 1 1 1 1 1 1 1
    1 0 0 0 0 0 0 1
    1 0 0 0 0 0 0 1
    1 0 0 1 1 0 0 1
    1 0 0 1 1 0 0 1
    1 0 0 0 0 0 0 1
    1 0 0 0 0 0 0 1
    1 1 1 1 1 1 1 1
";

const HALL: &str = "
    1 1 1 1 1 1 1 1 1 1 1 1
    1 0 0 0 0 0 0 0 0 0 0 1
    1 0 0 0 0 0 0 0 0 0 0 1
    1 0 0 0 0 0 0 0 0 0 0 1
    1 0 0 0 0 0 0 0 0 0 0 1
    1 0 0 0 0 0 0 0 0 0 0 1
    1 0 0 0 0 0 0 0 0 0 0 1
    1 0 0 0 0 0 0 0 0 0 0 1
    1 0 0 0 0 0 0 0 0 0 0 1
    1 0 0 0 0 0 0 0 0 0 0 1
    1 0 0 0 0 0 0 0 0 0 0 1
    1 1 1 1 1 1 1 1 1 1 1 1
";

// the same hall with a pillar at column 7, rows 8 and 9
const PILLAR_HALL: &str = "
    1 1 1 1 1 1 1 1 1 1 1 1
    1 0 0 0 0 0 0 0 0 0 0 1
    1 0 0 0 0 0 0 0 0 0 0 1
    1 0 0 0 0 0 0 0 0 0 0 1
    1 0 0 0 0 0 0 0 0 0 0 1
    1 0 0 0 0 0 0 0 0 0 0 1
    1 0 0 0 0 0 0 0 0 0 0 1
    1 0 0 0 0 0 0 0 0 0 0 1
    1 0 0 0 0 0 0 1 0 0 0 1
    1 0 0 0 0 0 0 1 0 0 0 1
    1 0 0 0 0 0 0 0 0 0 0 1
    1 1 1 1 1 1 1 1 1 1 1 1
";

fn close(a: f32, b: f32, tol: f32) -> bool {
    (a - b).abs() < tol
}

fn shotgun(table: &mut TextureTable) -> Weapon {
    let frames = (0..8).map(|i| table.register(&format!("gun/{i}.png"), 128, 64)).collect();
    Weapon::new(AnimatedSprite::new(frames, 1.0 / 3.0).unwrap(), 3, 4, 6, 30).unwrap()
}

fn world_in(layout: &str, x: f32, y: f32) -> (World, TextureTable) {
    let mut table = TextureTable::new();
    let brick = table.register("brick.png", 64, 64);
    table.set_wall(1, brick).unwrap();
    let weapon = shotgun(&mut table);
    let map = GridMap::parse(layout).unwrap();
    (World::new(map, Player::new(x, y, 0.0, weapon)), table)
}

fn setup() -> (World, TextureTable) {
    world_in(BLOCK_ROOM, 2.0, 2.0)
}

#[test]
fn rays_from_the_start_hit_walls_inside_the_map() {
    let map = GridMap::parse(BLOCK_ROOM).unwrap();

    let east = cast(&map, 2.0, 2.0, 0.0, 0.005);
    assert_eq!(east.wall, 1);
    assert_eq!(east.face, Face::Vertical);
    assert!(east.distance < map.diagonal() && east.distance < MISS_DISTANCE);
    assert!(close(east.distance, 5.0, 0.01), "{}", east.distance);

    // diagonal straight into the block's corner
    let corner = cast(&map, 2.0, 2.0, 45.0, 0.005);
    assert_eq!(corner.wall, 1);
    assert!(close(corner.distance, 2.0_f32.sqrt(), 0.02), "{}", corner.distance);

    for angle in (0..360).step_by(15) {
        let hit = cast(&map, 2.0, 2.0, angle as f32, 0.005);
        assert!(!hit.is_miss(), "angle {angle}");
        assert!(hit.distance < map.diagonal());
    }
}

#[test]
fn full_frame_fills_every_column() {
    let cfg = EngineConfig::default();
    let (world, table) = setup();
    let mut renderer = Renderer::new(&cfg);
    let commands = renderer.render(&world, &table, &cfg);

    let strips = commands
        .iter()
        .filter(|c| c.texture() == table.wall(1))
        .count();
    assert_eq!(strips, cfg.ray_count);

    let depth = renderer.depth();
    assert_eq!(depth.len(), cfg.ray_count);
    assert!(depth.iter().all(|d| d.is_finite() && *d > 0.0));
    assert!(close(depth[cfg.ray_count / 2], 5.0, 0.01));
}

#[test]
fn prop_behind_the_block_is_hidden_until_the_player_steps_aside() {
    let cfg = EngineConfig::default();
    let (mut world, mut table) = setup();
    let lamp = table.register("lamp.png", 32, 64);
    // player looks down the row through the block
    world.player.x = 1.5;
    world.player.y = 3.5;
    world.props.push(Prop { x: 5.5, y: 3.5, sprite: SpriteImage::Static(lamp) });

    let mut renderer = Renderer::new(&cfg);
    let hidden = renderer
        .render(&world, &table, &cfg)
        .iter()
        .filter(|c| c.texture() == Some(lamp))
        .count();
    assert_eq!(hidden, 0);

    world.player.y = 5.5;
    world.player.angle = 0.0;
    world.props[0].y = 5.5;
    let shown = renderer
        .render(&world, &table, &cfg)
        .iter()
        .filter(|c| matches!(c, DrawCommand::Texture { texture, .. } if *texture == lamp))
        .count();
    assert!(shown > 0);
}

/// Hall with a lamp 10 away and 25 degrees right of centre, standing in an open cell.
fn lamp_columns(layout: &str) -> usize {
    let cfg = EngineConfig::default();
    let (mut world, mut table) = world_in(layout, 1.5, 6.0);
    let lamp = table.register("lamp.png", 32, 64);
    let (s, c) = 25.0_f32.to_radians().sin_cos();
    let (x, y) = (1.5 + 10.0 * c, 6.0 + 10.0 * s);
    assert!(!world.map.is_solid(x, y));
    world.props.push(Prop { x, y, sprite: SpriteImage::Static(lamp) });

    let mut renderer = Renderer::new(&cfg);
    renderer
        .render(&world, &table, &cfg)
        .iter()
        .filter(|c| c.texture() == Some(lamp))
        .count()
}

#[test]
fn side_prop_in_front_of_the_far_wall_is_drawn() {
    // the east wall behind it is 10.48 away along the ray, 9.5 deep
    assert!(lamp_columns(HALL) > 0);
}

#[test]
fn side_prop_behind_a_pillar_is_hidden() {
    assert_eq!(lamp_columns(PILLAR_HALL), 0);
}

#[test]
fn walking_into_the_block_stops_at_its_face() {
    let cfg = EngineConfig::default();
    let (mut world, _) = setup();
    world.player.x = 2.0;
    world.player.y = 3.5;
    let forward = InputState::default().with_held(Key::Forward);
    for _ in 0..40 {
        world.update(&forward, 0.05, &cfg);
    }
    let p = &world.player;
    assert!(close(p.x + p.radius, 3.0, 1e-4), "x = {}", p.x);
    assert!(!world.map.is_solid(p.x, p.y));
}

#[test]
fn weapon_is_drawn_last_at_the_bottom() {
    let cfg = EngineConfig::default();
    let (world, table) = setup();
    let mut renderer = Renderer::new(&cfg);
    let commands = renderer.render(&world, &table, &cfg);
    let Some(DrawCommand::Texture { texture, dst, .. }) = commands.last() else {
        panic!("no weapon");
    };
    assert_eq!(*texture, TextureId(1));
    assert_eq!(dst.w, cfg.view_width as f32 / 4.0);
    assert!(close(dst.y + dst.h, cfg.view_height as f32, 1e-3));
}
