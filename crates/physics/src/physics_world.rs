//! Physics world management with Rapier3D.

use crate::collision::CollisionGroup;
use crate::queries::{BodyControl, ExplosionForce};
use engine_core::{Transform, Vec3};
use rapier3d::prelude::*;

/// Environment collision groups so static geometry collides with the player and props.
fn env_collision_groups() -> InteractionGroups {
    CollisionGroup::interaction_groups(CollisionGroup::environment())
}

/// Main physics world containing all simulation state.
pub struct PhysicsWorld {
    pub rigid_body_set: RigidBodySet,
    pub collider_set: ColliderSet,
    pub gravity: Vector<Real>,
    pub integration_parameters: IntegrationParameters,
    pub physics_pipeline: PhysicsPipeline,
    pub island_manager: IslandManager,
    pub broad_phase: DefaultBroadPhase,
    pub narrow_phase: NarrowPhase,
    pub impulse_joint_set: ImpulseJointSet,
    pub multibody_joint_set: MultibodyJointSet,
    pub ccd_solver: CCDSolver,
    pub query_pipeline: QueryPipeline,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsWorld {
    /// Create a new physics world with default gravity.
    pub fn new() -> Self {
        Self {
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            gravity: vector![0.0, -9.81, 0.0],
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
        }
    }

    pub fn set_gravity(&mut self, gravity: Vec3) {
        self.gravity = vector![gravity.x, gravity.y, gravity.z];
    }

    /// Step the physics simulation.
    pub fn step(&mut self) {
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );
    }

    /// Update query pipeline for raycasting.
    pub fn update_query_pipeline(&mut self) {
        self.query_pipeline.update(&self.collider_set);
    }

    /// Add a dynamic rigid body and return its handle.
    pub fn add_dynamic_body(&mut self, position: Vec3) -> RigidBodyHandle {
        let rigid_body = RigidBodyBuilder::dynamic()
            .translation(vector![position.x, position.y, position.z])
            .build();
        self.rigid_body_set.insert(rigid_body)
    }

    /// Add a kinematic rigid body (for the player).
    pub fn add_kinematic_body(&mut self, position: Vec3) -> RigidBodyHandle {
        let rigid_body = RigidBodyBuilder::kinematic_position_based()
            .translation(vector![position.x, position.y, position.z])
            .build();
        self.rigid_body_set.insert(rigid_body)
    }

    /// Add a dynamic box prop the player can pick up.
    pub fn add_interactable_box(
        &mut self,
        position: Vec3,
        half_extents: Vec3,
    ) -> (RigidBodyHandle, ColliderHandle) {
        let body = self.add_dynamic_body(position);
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            .collision_groups(CollisionGroup::interaction_groups(CollisionGroup::interactable()))
            .build();
        let collider =
            self.collider_set
                .insert_with_parent(collider, body, &mut self.rigid_body_set);
        (body, collider)
    }

    /// Add a dynamic sphere prop the player can pick up.
    pub fn add_interactable_sphere(
        &mut self,
        position: Vec3,
        radius: f32,
    ) -> (RigidBodyHandle, ColliderHandle) {
        let body = self.add_dynamic_body(position);
        let collider = ColliderBuilder::ball(radius)
            .collision_groups(CollisionGroup::interaction_groups(CollisionGroup::interactable()))
            .build();
        let collider =
            self.collider_set
                .insert_with_parent(collider, body, &mut self.rigid_body_set);
        (body, collider)
    }

    /// Add the player's kinematic capsule. Look queries never report it.
    pub fn add_player_body(
        &mut self,
        position: Vec3,
        half_height: f32,
        radius: f32,
    ) -> (RigidBodyHandle, ColliderHandle) {
        let body = self.add_kinematic_body(position);
        let collider = ColliderBuilder::capsule_y(half_height, radius)
            .collision_groups(CollisionGroup::interaction_groups(CollisionGroup::player()))
            .build();
        let collider =
            self.collider_set
                .insert_with_parent(collider, body, &mut self.rigid_body_set);
        (body, collider)
    }

    /// Add a ground plane collider (flat Y=0 half-space).
    pub fn add_ground_plane(&mut self) -> ColliderHandle {
        let collider = ColliderBuilder::halfspace(Vector::y_axis())
            .collision_groups(env_collision_groups())
            .build();
        self.collider_set.insert(collider)
    }

    /// Add a static wall-like cuboid with no parent body.
    pub fn add_static_cuboid(&mut self, translation: Vec3, half_extents: Vec3) -> ColliderHandle {
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            .translation(vector![translation.x, translation.y, translation.z])
            .collision_groups(env_collision_groups())
            .build();
        self.collider_set.insert(collider)
    }

    /// Get the transform of a rigid body.
    pub fn get_body_transform(&self, handle: RigidBodyHandle) -> Option<Transform> {
        self.rigid_body_set.get(handle).map(|body| {
            let pos = body.translation();
            let rot = body.rotation();
            Transform {
                position: Vec3::new(pos.x, pos.y, pos.z),
                rotation: glam::Quat::from_xyzw(rot.i, rot.j, rot.k, rot.w),
                scale: Vec3::ONE,
            }
        })
    }

    /// Linear velocity of a rigid body.
    pub fn get_body_velocity(&self, handle: RigidBodyHandle) -> Option<Vec3> {
        self.rigid_body_set.get(handle).map(|body| {
            let v = body.linvel();
            Vec3::new(v.x, v.y, v.z)
        })
    }

    /// Set the position of a kinematic body.
    pub fn set_kinematic_position(&mut self, handle: RigidBodyHandle, position: Vec3) {
        if let Some(body) = self.rigid_body_set.get_mut(handle) {
            body.set_next_kinematic_translation(vector![position.x, position.y, position.z]);
        }
    }

    /// Apply an impulse through the body's centre of mass.
    pub fn apply_impulse(&mut self, handle: RigidBodyHandle, impulse: Vec3) {
        if let Some(body) = self.rigid_body_set.get_mut(handle) {
            // Effective inverse mass stays zero until the step after a kinematic
            // body turns dynamic; the collider-derived mass is already valid.
            let mass = body.mass();
            if mass > 0.0 {
                let linvel = *body.linvel() + vector![impulse.x, impulse.y, impulse.z] / mass;
                body.set_linvel(linvel, true);
            }
        }
    }
}

impl BodyControl for PhysicsWorld {
    fn is_kinematic(&self, body: RigidBodyHandle) -> Option<bool> {
        self.rigid_body_set.get(body).map(|b| b.is_kinematic())
    }

    fn set_kinematic(&mut self, body: RigidBodyHandle, kinematic: bool) {
        if let Some(b) = self.rigid_body_set.get_mut(body) {
            let body_type = if kinematic {
                RigidBodyType::KinematicPositionBased
            } else {
                RigidBodyType::Dynamic
            };
            b.set_body_type(body_type, true);
        }
    }

    fn move_kinematic(&mut self, body: RigidBodyHandle, position: Vec3) {
        self.set_kinematic_position(body, position);
    }

    fn apply_explosion_force(&mut self, body: RigidBodyHandle, explosion: &ExplosionForce) -> bool {
        let Some(b) = self.rigid_body_set.get(body) else {
            return false;
        };
        if !b.is_dynamic() {
            log::debug!("Explosion force ignored for non-dynamic body {:?}", body);
            return false;
        }

        // World centre of mass is not refreshed while a body is kinematic, so
        // derive it from the current pose.
        let com = b
            .position()
            .transform_point(&b.mass_properties().local_mprops.local_com);
        let up = Vec3::new(-self.gravity.x, -self.gravity.y, -self.gravity.z)
            .try_normalize()
            .unwrap_or(Vec3::Y);
        let impulse = explosion.impulse_at(
            Vec3::new(com.x, com.y, com.z),
            up,
            self.integration_parameters.dt,
        );

        match impulse {
            Some(impulse) => {
                self.apply_impulse(body, impulse);
                true
            }
            None => false,
        }
    }
}
