//! Tile Platformer headless demo
//!
//! Builds a small level, drops a player, a few crates and three enemies into
//! it, then runs the fixed-step loop against a scripted input tape and logs
//! what happens.

use std::rc::Rc;

use clap::Parser;
use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use tile_platformer::actor::{Actor, Fly, HopConfig, HopWait, Patrol, StateKind};
use tile_platformer::consts::SIM_DT;
use tile_platformer::input::{ActionInput, NoInput, actions};
use tile_platformer::sim::{Collider, Entity, EntityId, PhysicsEngine, TileGrid, TileType, World};
use tile_platformer::{Settings, SimResult, logging};

const LEVEL: &[&str] = &[
    "........................",
    "........................",
    "........................",
    "..............H.........",
    "..........====H.........",
    "..............H.........",
    "..............H.........",
    "..............H.........",
    "#.............H........#",
    "#.....^^......H........#",
    "########################",
    "########################",
];

const TILE_SIZE: f32 = 16.0;

/// (first frame, last frame, action) held over an inclusive frame range
const TAPE: &[(u32, u32, &str)] = &[
    (0, 50, actions::MOVE_RIGHT),
    (60, 60, actions::JUMP),
    (60, 140, actions::MOVE_RIGHT),
    (150, 200, actions::MOVE_UP),
    (210, 210, actions::JUMP),
    (210, 260, actions::MOVE_LEFT),
    (300, 340, actions::MOVE_RIGHT),
];

/// Headless tile platformer simulation
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of frames to simulate
    #[arg(short, long, default_value_t = 360)]
    frames: u32,

    /// Seed for crate placement
    #[arg(short, long, default_value_t = 7)]
    seed: u64,

    /// JSON settings file
    #[arg(long)]
    settings: Option<std::path::PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    logging::init(args.verbose);

    if let Err(err) = run(&args) {
        log::error!("Demo failed: {}", err);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> SimResult<()> {
    let settings = match &args.settings {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    log::info!("Tile Platformer demo starting (seed {}, {} frames)", args.seed, args.frames);

    let mut world = World::new();
    let mut engine = PhysicsEngine::new(&settings.physics);
    engine.register_collision_layer(Rc::new(TileGrid::from_ascii(LEVEL, Vec2::splat(TILE_SIZE))));

    let player_id = spawn(
        &mut world,
        &mut engine,
        Entity::new("player", Vec2::new(24.0, 128.0)).with_collider(Collider::aabb(Vec2::new(16.0, 24.0))),
        1.0,
        true,
    );
    let mut player = Actor::player(&mut world, player_id, settings.player.clone())?;

    let mut rng = Pcg32::seed_from_u64(args.seed);
    let mut crates = Vec::new();
    for i in 0..4 {
        let position = Vec2::new(rng.random_range(48.0..320.0), rng.random_range(0.0..48.0));
        let mass = rng.random_range(1.0..4.0);
        let id = spawn(
            &mut world,
            &mut engine,
            Entity::new(format!("crate-{i}"), position).with_collider(Collider::aabb(Vec2::splat(TILE_SIZE))),
            mass,
            true,
        );
        crates.push(id);
    }

    let mut enemies = spawn_enemies(&mut world, &mut engine, &settings)?;

    let mut input = ActionInput::new();
    let mut last_state = player.state();
    for frame in 0..args.frames {
        apply_tape(&mut input, frame);

        player.handle_input(&mut world, &input);
        for enemy in &mut enemies {
            enemy.handle_input(&mut world, &NoInput);
        }

        engine.update(&mut world, SIM_DT);

        player.update(&mut world, SIM_DT, &input);
        for enemy in &mut enemies {
            enemy.update(&mut world, SIM_DT, &NoInput);
        }

        let pairs = engine.collision_pairs().to_vec();
        for (a, b) in pairs {
            log::trace!("Frame {}: pair {:?} / {:?}", frame, a, b);
            let other = if a == player_id {
                b
            } else if b == player_id {
                a
            } else {
                continue;
            };
            if enemies.iter().any(|e| e.entity() == other && !e.is_dead()) {
                player.take_damage(&mut world, 1);
            }
        }

        let hazard = engine
            .tile_trigger_events()
            .iter()
            .any(|t| t.entity == player_id && t.tile == TileType::Hazard);
        if hazard {
            player.take_damage(&mut world, 1);
        }

        if player.state() != last_state {
            log::info!("Frame {}: player {:?} -> {:?}", frame, last_state, player.state());
            last_state = player.state();
        }
        for sound in player.take_sounds() {
            log::debug!("Frame {}: sound '{}'", frame, sound);
        }

        input.end_frame();

        if player.state() == StateKind::Dead {
            log::info!("Frame {}: player is dead, stopping", frame);
            break;
        }
    }

    let position = world.transform(player_id)?.position;
    log::info!(
        "Player finished at ({:.1}, {:.1}) in {:?} with {}/{} health",
        position.x,
        position.y,
        player.state(),
        player.health().current(),
        player.health().max()
    );
    for id in crates {
        let position = world.transform(id)?.position;
        log::info!("{} rests at ({:.1}, {:.1})", world.get(id)?.name, position.x, position.y);
    }
    Ok(())
}

/// Spawn `entity` with a fresh body and register it with the engine
fn spawn(world: &mut World, engine: &mut PhysicsEngine, entity: Entity, mass: f32, use_gravity: bool) -> EntityId {
    let id = world.spawn(entity.with_body(engine.new_body(mass, use_gravity)));
    engine.register_body(id);
    id
}

fn spawn_enemies(world: &mut World, engine: &mut PhysicsEngine, settings: &Settings) -> SimResult<Vec<Actor>> {
    let slime = spawn(
        world,
        engine,
        Entity::new("slime", Vec2::new(272.0, 144.0)).with_collider(Collider::aabb(Vec2::splat(TILE_SIZE))),
        1.0,
        true,
    );
    let bat = spawn(
        world,
        engine,
        Entity::new("bat", Vec2::new(320.0, 32.0)).with_collider(Collider::circle(6.0)),
        1.0,
        false,
    );
    let frog = spawn(
        world,
        engine,
        Entity::new("frog", Vec2::new(48.0, 144.0)).with_collider(Collider::aabb(Vec2::splat(TILE_SIZE))),
        1.0,
        true,
    );

    let tuning = &settings.player;
    let hop = HopConfig {
        left: 24.0,
        right: 80.0,
        jump_velocity: 220.0,
        move_speed: 40.0,
        interval: 1.5,
    };
    Ok(vec![
        Actor::ai(world, slime, tuning.clone(), Box::new(Patrol::new(256.0, 344.0, 30.0)))?,
        Actor::ai(world, bat, tuning.clone(), Box::new(Fly::new(24.0, 120.0, 40.0)))?,
        Actor::ai(world, frog, tuning.clone(), Box::new(HopWait::new(hop)))?,
    ])
}

/// Hold exactly the actions whose tape range covers `frame`
fn apply_tape(input: &mut ActionInput, frame: u32) {
    let all = [
        actions::MOVE_LEFT,
        actions::MOVE_RIGHT,
        actions::MOVE_UP,
        actions::MOVE_DOWN,
        actions::JUMP,
    ];
    for action in all {
        let held = TAPE
            .iter()
            .any(|&(start, end, a)| a == action && (start..=end).contains(&frame));
        if held {
            input.press(action);
        } else {
            input.release(action);
        }
    }
}
