//! Common ECS components used across the engine.

/// Logical interaction state of a world object the player can pick up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum InteractionState {
    #[default]
    Idle,
    /// Currently the best candidate under the player's look direction.
    Hovered,
    /// Picked up and physics-suspended, following the player.
    Held,
}

impl InteractionState {
    pub fn is_held(&self) -> bool {
        matches!(self, InteractionState::Held)
    }

    pub fn is_hovered(&self) -> bool {
        matches!(self, InteractionState::Hovered)
    }
}
