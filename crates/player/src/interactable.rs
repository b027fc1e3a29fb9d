//! World objects the player can hover, pick up, drop and launch, and the
//! registry that maps collider hits back to them.

use engine_core::{Entity, InteractionState, World};
use physics::{ColliderHandle, PhysicsBody, RigidBodyHandle};
use std::collections::HashMap;

/// Behaviour shared by every object variant the player can interact with.
///
/// Physics side effects (kinematic toggling, impulses) are applied by the
/// interaction controller; implementors only track their own state and
/// whatever feedback they want to show.
pub trait Interactable: Send + Sync {
    fn state(&self) -> InteractionState;

    fn is_held(&self) -> bool {
        self.state().is_held()
    }

    fn on_hover_enter(&mut self);

    fn on_hover_exit(&mut self);

    fn on_pickup(&mut self);

    fn on_drop(&mut self);

    /// Name used in logs.
    fn label(&self) -> &str {
        "object"
    }
}

/// Component stored in the registry's ECS world.
pub type BoxedInteractable = Box<dyn Interactable>;

/// A plain physics prop.
#[derive(Debug, Clone, PartialEq)]
pub struct PickupableObject {
    pub name: String,
    state: InteractionState,
    /// Times the object has been picked up.
    pickups: u32,
}

impl PickupableObject {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: InteractionState::Idle,
            pickups: 0,
        }
    }

    pub fn pickups(&self) -> u32 {
        self.pickups
    }
}

impl Interactable for PickupableObject {
    fn state(&self) -> InteractionState {
        self.state
    }

    fn on_hover_enter(&mut self) {
        if self.state == InteractionState::Idle {
            self.state = InteractionState::Hovered;
        }
    }

    fn on_hover_exit(&mut self) {
        if self.state == InteractionState::Hovered {
            self.state = InteractionState::Idle;
        }
    }

    fn on_pickup(&mut self) {
        self.state = InteractionState::Held;
        self.pickups += 1;
    }

    fn on_drop(&mut self) {
        self.state = InteractionState::Idle;
    }

    fn label(&self) -> &str {
        &self.name
    }
}

/// Maps collider handles to interactable objects.
///
/// Objects live as entities in an owned `hecs` world, each carrying its
/// `BoxedInteractable` and `PhysicsBody`. An object may own several colliders.
#[derive(Default)]
pub struct InteractableRegistry {
    world: World,
    colliders: HashMap<ColliderHandle, Entity>,
}

impl InteractableRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an object. Its `body.collider`, if any, resolves to it.
    pub fn register(&mut self, object: impl Interactable + 'static, body: PhysicsBody) -> Entity {
        let boxed: BoxedInteractable = Box::new(object);
        let entity = self.world.spawn((boxed, body));
        if let Some(collider) = body.collider {
            self.colliders.insert(collider, entity);
        }
        log::debug!("Registered interactable {:?} (body {:?})", entity, body.rigid_body);
        entity
    }

    /// Make an extra collider resolve to `entity`. Returns false if the entity is gone.
    pub fn add_collider(&mut self, entity: Entity, collider: ColliderHandle) -> bool {
        if !self.world.contains(entity) {
            return false;
        }
        self.colliders.insert(collider, entity);
        true
    }

    /// Forget an object and all of its colliders. Returns false if it was not registered.
    pub fn unregister(&mut self, entity: Entity) -> bool {
        if self.world.despawn(entity).is_err() {
            return false;
        }
        self.colliders.retain(|_, e| *e != entity);
        log::debug!("Unregistered interactable {:?}", entity);
        true
    }

    /// The object a collider belongs to, if it is registered.
    pub fn resolve(&self, collider: ColliderHandle) -> Option<Entity> {
        self.colliders
            .get(&collider)
            .copied()
            .filter(|e| self.world.contains(*e))
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.world.contains(entity)
    }

    pub fn len(&self) -> usize {
        self.world.len() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn body(&self, entity: Entity) -> Option<RigidBodyHandle> {
        self.world
            .get::<&PhysicsBody>(entity)
            .ok()
            .map(|body| body.rigid_body)
    }

    pub fn state(&self, entity: Entity) -> Option<InteractionState> {
        self.world
            .get::<&BoxedInteractable>(entity)
            .ok()
            .map(|object| object.state())
    }

    pub fn is_held(&self, entity: Entity) -> bool {
        self.world
            .get::<&BoxedInteractable>(entity)
            .map(|object| object.is_held())
            .unwrap_or(false)
    }

    pub fn label(&self, entity: Entity) -> Option<String> {
        self.world
            .get::<&BoxedInteractable>(entity)
            .ok()
            .map(|object| object.label().to_string())
    }

    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut (dyn Interactable + 'static)> {
        self.world
            .query_one_mut::<&mut BoxedInteractable>(entity)
            .ok()
            .map(|object| &mut **object)
    }

    /// Visit every registered object.
    pub fn for_each(&self, mut f: impl FnMut(Entity, &dyn Interactable, &PhysicsBody)) {
        for (entity, (object, body)) in self
            .world
            .query::<(&BoxedInteractable, &PhysicsBody)>()
            .iter()
        {
            f(entity, &**object, body);
        }
    }
}
