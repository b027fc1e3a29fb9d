//! Player controller: routes input to locomotion, drives object interaction
//! and keeps the camera zoom in step. One `update` per frame, discrete
//! actions through `on_event`.

use crate::camera_rig::CameraRig;
use crate::character::Locomotion;
use crate::config::PlayerConfig;
use crate::error::ControllerError;
use crate::interactable::InteractableRegistry;
use crate::interaction::{InteractionController, InteractionOutcome, LookFrame};
use crate::zoom::{CameraPose, ZoomSmoother};
use engine_core::{Entity, Vec3};
use input::{FrameInput, InputEvent, InputSource};
use physics::{BodyControl, ConeCastDetector, RayQuery};

/// Line segment for debug drawing of look rays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebugRay {
    pub from: Vec3,
    pub to: Vec3,
}

/// Everything a frame produced that the caller may want to show.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameOutput {
    pub hovered: Option<Entity>,
    pub held: Option<Entity>,
    /// Pose written to the camera rig this frame, if the zoom moved.
    pub camera: Option<CameraPose>,
    /// Look ray hits, only filled when `debug_visualize_rays` is on.
    pub debug_rays: Vec<DebugRay>,
}

/// Assembles a `PlayerController`, failing loudly if a collaborator is missing.
pub struct PlayerControllerBuilder<L, C> {
    config: PlayerConfig,
    locomotion: Option<L>,
    camera_rig: Option<C>,
}

impl<L: Locomotion, C: CameraRig> PlayerControllerBuilder<L, C> {
    pub fn new(config: PlayerConfig) -> Self {
        Self {
            config,
            locomotion: None,
            camera_rig: None,
        }
    }

    pub fn locomotion(mut self, locomotion: L) -> Self {
        self.locomotion = Some(locomotion);
        self
    }

    pub fn camera_rig(mut self, camera_rig: C) -> Self {
        self.camera_rig = Some(camera_rig);
        self
    }

    pub fn build(self) -> Result<PlayerController<L, C>, ControllerError> {
        let locomotion = self.locomotion.ok_or(ControllerError::MissingLocomotion)?;
        let mut camera_rig = self.camera_rig.ok_or(ControllerError::MissingCameraRig)?;
        let config = self.config;
        config.validate()?;

        let detector = ConeCastDetector::new(config.ray_cast_angle, config.num_raycast_rays)?;
        let interaction = InteractionController::new(detector, config.raycast_distance, config.launch);
        let zoom = ZoomSmoother::new(
            config.initial_zoom,
            config.min_zoom,
            config.max_zoom,
            config.zoom_speed,
            config.zoom_buffer_size,
            config.zoom_dead_zone,
        );

        // Start the rig where the zoom state says it is
        let pose = zoom.pose();
        camera_rig.set_follow_offset(pose.follow_offset);
        camera_rig.set_rotation(pose.rotation());

        log::info!(
            "Player controller ready: {} look rays over {} deg, zoom {:.2}",
            config.num_raycast_rays,
            config.ray_cast_angle,
            zoom.current_zoom()
        );

        Ok(PlayerController {
            config,
            locomotion,
            camera_rig,
            interaction,
            zoom,
        })
    }
}

pub struct PlayerController<L, C> {
    config: PlayerConfig,
    locomotion: L,
    camera_rig: C,
    interaction: InteractionController,
    zoom: ZoomSmoother,
}

impl<L: Locomotion, C: CameraRig> PlayerController<L, C> {
    pub fn builder(config: PlayerConfig) -> PlayerControllerBuilder<L, C> {
        PlayerControllerBuilder::new(config)
    }

    /// Look origin, forward and hold anchor from the character's current pose.
    pub fn look_frame(&self) -> LookFrame {
        let pose = self.locomotion.transform();
        LookFrame {
            origin: pose.transform_point(self.config.look_origin_offset),
            forward: pose.forward(),
            hold_anchor: pose.transform_point(self.config.hold_anchor_offset),
        }
    }

    /// World position held objects are carried to.
    pub fn holding_object_position(&self) -> Vec3 {
        self.look_frame().hold_anchor
    }

    /// Handle one discrete action.
    pub fn on_event<P: BodyControl + ?Sized>(
        &mut self,
        event: InputEvent,
        physics: &mut P,
        objects: &mut InteractableRegistry,
    ) -> InteractionOutcome {
        match event {
            InputEvent::Pickup => self.interaction.on_pickup(physics, objects),
            InputEvent::LaunchItem => {
                let look = self.look_frame();
                self.interaction.on_launch(&look, physics, objects)
            }
            InputEvent::CrouchStarted => {
                self.locomotion.crouch();
                InteractionOutcome::Ignored
            }
            InputEvent::CrouchEnded => {
                self.locomotion.uncrouch();
                InteractionOutcome::Ignored
            }
            InputEvent::JumpStarted => {
                self.locomotion.jump();
                InteractionOutcome::Ignored
            }
            InputEvent::JumpEnded => {
                self.locomotion.stop_jumping();
                InteractionOutcome::Ignored
            }
        }
    }

    /// Per-frame pass: movement, hover/hold, zoom.
    pub fn update<P: RayQuery + BodyControl + ?Sized>(
        &mut self,
        dt: f32,
        input: &FrameInput,
        physics: &mut P,
        objects: &mut InteractableRegistry,
    ) -> FrameOutput {
        self.apply_movement(input);

        let look = self.look_frame();
        let hits = self.interaction.update(&look, physics, objects);

        let camera = self.zoom.update(input.zoom_delta, dt);
        if let Some(pose) = camera {
            self.camera_rig.set_follow_offset(pose.follow_offset);
            self.camera_rig.set_rotation(pose.rotation());
        }

        let debug_rays = if self.config.debug_visualize_rays {
            hits.iter()
                .map(|hit| DebugRay {
                    from: look.origin,
                    to: hit.point,
                })
                .collect()
        } else {
            Vec::new()
        };

        FrameOutput {
            hovered: self.interaction.hovered(),
            held: self.interaction.held(),
            camera,
            debug_rays,
        }
    }

    /// Dispatch pending discrete actions, then run `update` with the source's continuous input.
    pub fn run_frame<I, P>(
        &mut self,
        dt: f32,
        input: &mut I,
        physics: &mut P,
        objects: &mut InteractableRegistry,
    ) -> FrameOutput
    where
        I: InputSource + ?Sized,
        P: RayQuery + BodyControl + ?Sized,
    {
        for event in input.drain_events() {
            let outcome = self.on_event(event, physics, objects);
            if outcome != InteractionOutcome::Ignored {
                log::debug!("{:?} -> {:?}", event, outcome);
            }
        }
        let frame_input = input.frame_input();
        self.update(dt, &frame_input, physics, objects)
    }

    fn apply_movement(&mut self, input: &FrameInput) {
        // x = right, y = forward (-Z)
        let mut direction = Vec3::new(input.movement.x, 0.0, -input.movement.y);
        if let Some(camera) = self.locomotion.camera_transform() {
            direction = camera.relative_to(direction, self.locomotion.up_vector());
        }
        self.locomotion.set_movement_direction(direction);
    }

    pub fn current_zoom(&self) -> f32 {
        self.zoom.current_zoom()
    }

    pub fn zoom(&self) -> &ZoomSmoother {
        &self.zoom
    }

    pub fn interaction(&self) -> &InteractionController {
        &self.interaction
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    pub fn locomotion(&self) -> &L {
        &self.locomotion
    }

    pub fn locomotion_mut(&mut self) -> &mut L {
        &mut self.locomotion
    }

    pub fn camera_rig(&self) -> &C {
        &self.camera_rig
    }
}
