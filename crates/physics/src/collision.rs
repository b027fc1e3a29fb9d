//! Collision groups and filtering.

use rapier3d::prelude::*;

/// Collision groups for different entity types.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionGroup {
    /// Static environment (terrain, walls)
    Environment = 1 << 0,
    /// Player character
    Player = 1 << 1,
    /// Props the player can pick up
    Interactable = 1 << 2,
}

impl CollisionGroup {
    /// Create a collision group for environment.
    pub fn environment() -> (Group, Group) {
        let membership = Group::from_bits_retain(Self::Environment as u32);
        let filter = Group::ALL;
        (membership, filter)
    }

    /// Create a collision group for player.
    pub fn player() -> (Group, Group) {
        let membership = Group::from_bits_retain(Self::Player as u32);
        let filter = Group::from_bits_retain(
            Self::Environment as u32 | Self::Interactable as u32,
        );
        (membership, filter)
    }

    /// Create a collision group for interactable props.
    pub fn interactable() -> (Group, Group) {
        let membership = Group::from_bits_retain(Self::Interactable as u32);
        let filter = Group::from_bits_retain(
            Self::Environment as u32 | Self::Player as u32 | Self::Interactable as u32,
        );
        (membership, filter)
    }

    /// Groups used by the player's look queries: they see the world and props
    /// but never the player's own colliders.
    pub fn look_query() -> InteractionGroups {
        InteractionGroups::new(
            Group::ALL,
            Group::from_bits_retain(Self::Environment as u32 | Self::Interactable as u32),
        )
    }

    pub fn interaction_groups((membership, filter): (Group, Group)) -> InteractionGroups {
        InteractionGroups::new(membership, filter)
    }
}

/// Component linking an ECS entity to its physics handles.
#[derive(Debug, Clone, Copy)]
pub struct PhysicsBody {
    pub rigid_body: RigidBodyHandle,
    pub collider: Option<ColliderHandle>,
}

impl PhysicsBody {
    pub fn with_collider(rigid_body: RigidBodyHandle, collider: ColliderHandle) -> Self {
        Self {
            rigid_body,
            collider: Some(collider),
        }
    }
}
