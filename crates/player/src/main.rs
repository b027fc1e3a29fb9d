//! Headless sandbox: a player walks into a small yard of props driven by a
//! scripted input file, picking things up, throwing them and zooming.
//!
//! Usage: `sandbox [player.ron] [script.ron]`

use anyhow::{Context, Result};
use engine_core::{Entity, Vec3};
use input::ScriptedInput;
use physics::{PhysicsBody, PhysicsWorld};
use player::{
    FollowCamera, InteractableRegistry, Locomotion, PickupableObject, PlayerConfig,
    PlayerController, SimpleCharacter,
};
use rand::{Rng, SeedableRng};
use std::path::Path;

const FRAME_DT: f32 = 1.0 / 60.0;
const PROP_COUNT: usize = 8;

/// Walk up to the props, grab one, carry it, throw it, zoom out and back in.
const DEFAULT_SCRIPT: &str = r#"(
    steps: [
        (frames: 30, movement: (0.0, 1.0)),
        (frames: 10),
        (frames: 1, events: [Pickup]),
        (frames: 40, movement: (0.3, 0.5), zoom: -0.05),
        (frames: 1, events: [LaunchItem]),
        (frames: 20, events: [JumpStarted]),
        (frames: 1, events: [JumpEnded, CrouchStarted]),
        (frames: 20, movement: (0.0, 1.0), zoom: 0.08),
        (frames: 1, events: [CrouchEnded, Pickup]),
        (frames: 30),
        (frames: 1, events: [Pickup]),
        (frames: 30),
    ],
)"#;

fn spawn_props(
    physics: &mut PhysicsWorld,
    objects: &mut InteractableRegistry,
    rng: &mut impl Rng,
) -> Vec<Entity> {
    (0..PROP_COUNT)
        .map(|i| {
            let position = Vec3::new(
                rng.gen_range(-1.0..1.0),
                0.25,
                -3.0 - rng.gen_range(0.0..4.0),
            );
            let (body, collider) = if i % 3 == 0 {
                physics.add_interactable_sphere(position, 0.25)
            } else {
                physics.add_interactable_box(position, Vec3::splat(0.25))
            };
            objects.register(
                PickupableObject::new(format!("prop-{}", i)),
                PhysicsBody::with_collider(body, collider),
            )
        })
        .collect()
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => PlayerConfig::read(Path::new(&path))
            .with_context(|| format!("loading player config {}", path))?,
        None => PlayerConfig::load(Path::new("player.ron")),
    };
    let mut input = match args.next() {
        Some(path) => {
            let source = std::fs::read_to_string(&path)
                .with_context(|| format!("reading input script {}", path))?;
            ScriptedInput::from_ron_str(&source)
                .with_context(|| format!("parsing input script {}", path))?
        }
        None => ScriptedInput::from_ron_str(DEFAULT_SCRIPT).context("parsing built-in script")?,
    };

    let mut physics = PhysicsWorld::new();
    physics.add_ground_plane();
    physics.add_static_cuboid(Vec3::new(0.0, 1.0, -9.0), Vec3::new(4.0, 1.0, 0.2));
    let (player_body, _) = physics.add_player_body(Vec3::new(0.0, 0.9, 0.0), 0.5, 0.4);

    let mut objects = InteractableRegistry::new();
    let mut rng = rand::rngs::StdRng::seed_from_u64(42);
    let props = spawn_props(&mut physics, &mut objects, &mut rng);
    physics.update_query_pipeline();

    let mut controller: PlayerController<SimpleCharacter, FollowCamera> =
        PlayerController::builder(config)
            .locomotion(SimpleCharacter::new(Vec3::ZERO))
            .camera_rig(FollowCamera::new())
            .build()?;

    log::info!("Sandbox running with {} props", props.len());

    let mut frame = 0u32;
    let mut last = (None, None);
    while input.advance() {
        let output = controller.run_frame(FRAME_DT, &mut input, &mut physics, &mut objects);

        if (output.hovered, output.held) != last {
            log::info!(
                "frame {:>4}: hovered {:?} held {:?}",
                frame,
                output.hovered.and_then(|e| objects.label(e)),
                output.held.and_then(|e| objects.label(e)),
            );
            last = (output.hovered, output.held);
        }
        for ray in &output.debug_rays {
            log::trace!("look ray {:?} -> {:?}", ray.from, ray.to);
        }

        let character = controller.locomotion_mut();
        character.simulate(FRAME_DT);
        let position = character.transform().position;
        physics.set_kinematic_position(player_body, position + Vec3::new(0.0, 0.9, 0.0));

        let camera = controller.camera_rig().transform(position);
        controller.locomotion_mut().camera = Some(camera);

        physics.step();
        frame += 1;
    }

    log::info!(
        "Finished after {} frames: zoom {:.2}, player at {:?}",
        frame,
        controller.current_zoom(),
        controller.locomotion().transform().position
    );
    objects.for_each(|_, object, body| {
        if let Some(t) = physics.get_body_transform(body.rigid_body) {
            log::info!("{} {:?} at {:.2?}", object.label(), object.state(), t.position);
        }
    });

    Ok(())
}
