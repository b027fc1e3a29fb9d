//! Hover, pickup, drop and launch of world objects.

use crate::config::LaunchConfig;
use crate::interactable::InteractableRegistry;
use engine_core::{Entity, Vec3};
use physics::{BodyControl, ConeCastDetector, ExplosionForce, RayQuery, RaycastHit, RigidBodyHandle};

/// Where the player is looking from and where held objects are carried, in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LookFrame {
    pub origin: Vec3,
    pub forward: Vec3,
    pub hold_anchor: Vec3,
}

/// What a pickup or launch request did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionOutcome {
    PickedUp(Entity),
    Dropped(Entity),
    Launched(Entity),
    Ignored,
}

#[derive(Debug, Clone, Copy)]
struct HeldObject {
    entity: Entity,
    body: RigidBodyHandle,
    /// Kinematic flag before pickup, restored on drop.
    was_kinematic: bool,
}

/// First hit, in cone order, that belongs to a registered object not currently held.
pub fn select_hover_candidate(
    hits: &[RaycastHit],
    objects: &InteractableRegistry,
    held: Option<Entity>,
) -> Option<Entity> {
    hits.iter()
        .filter_map(|hit| objects.resolve(hit.collider))
        .find(|&entity| Some(entity) != held && !objects.is_held(entity))
}

/// Owns the hovered/held pair. Only one object is ever held.
pub struct InteractionController {
    detector: ConeCastDetector,
    max_distance: f32,
    launch: LaunchConfig,
    hovered: Option<Entity>,
    held: Option<HeldObject>,
}

impl InteractionController {
    pub fn new(detector: ConeCastDetector, max_distance: f32, launch: LaunchConfig) -> Self {
        Self {
            detector,
            max_distance,
            launch,
            hovered: None,
            held: None,
        }
    }

    pub fn hovered(&self) -> Option<Entity> {
        self.hovered
    }

    pub fn held(&self) -> Option<Entity> {
        self.held.map(|h| h.entity)
    }

    pub fn is_holding(&self) -> bool {
        self.held.is_some()
    }

    pub fn detector(&self) -> &ConeCastDetector {
        &self.detector
    }

    /// Per-frame pass: pick the hovered object, then carry the held one to the anchor.
    /// Returns the raw cone hits for debug drawing.
    pub fn update<P: RayQuery + BodyControl + ?Sized>(
        &mut self,
        look: &LookFrame,
        physics: &mut P,
        objects: &mut InteractableRegistry,
    ) -> Vec<RaycastHit> {
        let hits = self.scan(look, &*physics, objects);
        self.carry(look.hold_anchor, physics, objects);
        hits
    }

    /// Cone cast along the look direction and update the hovered object.
    pub fn scan<Q: RayQuery + ?Sized>(
        &mut self,
        look: &LookFrame,
        physics: &Q,
        objects: &mut InteractableRegistry,
    ) -> Vec<RaycastHit> {
        let hits = self
            .detector
            .cone_cast(physics, look.origin, look.forward, self.max_distance);
        let candidate = select_hover_candidate(&hits, objects, self.held());
        self.set_hovered(candidate, objects);
        hits
    }

    fn set_hovered(&mut self, candidate: Option<Entity>, objects: &mut InteractableRegistry) {
        if candidate == self.hovered {
            return;
        }
        if let Some(previous) = self.hovered.take() {
            if let Some(object) = objects.get_mut(previous) {
                object.on_hover_exit();
            }
        }
        if let Some(entity) = candidate {
            if let Some(object) = objects.get_mut(entity) {
                object.on_hover_enter();
                log::trace!("Hovering {} ({:?})", object.label(), entity);
            }
        }
        self.hovered = candidate;
    }

    /// Keep the held body at the hold anchor. Forgets objects that were unregistered.
    pub fn carry<B: BodyControl + ?Sized>(
        &mut self,
        hold_anchor: Vec3,
        physics: &mut B,
        objects: &InteractableRegistry,
    ) {
        let Some(held) = self.held else {
            return;
        };
        if !objects.contains(held.entity) {
            log::debug!("Held object {:?} was removed from the world", held.entity);
            physics.set_kinematic(held.body, held.was_kinematic);
            self.held = None;
            return;
        }
        physics.move_kinematic(held.body, hold_anchor);
    }

    /// Pickup input: grab the hovered object, or drop the held one.
    pub fn on_pickup<B: BodyControl + ?Sized>(
        &mut self,
        physics: &mut B,
        objects: &mut InteractableRegistry,
    ) -> InteractionOutcome {
        if self.held.is_some() {
            return match self.release(physics, objects, false) {
                Some(entity) => InteractionOutcome::Dropped(entity),
                None => InteractionOutcome::Ignored,
            };
        }

        let Some(entity) = self.hovered else {
            log::trace!("Pickup ignored: nothing hovered");
            return InteractionOutcome::Ignored;
        };
        let (Some(body), Some(object)) = (objects.body(entity), objects.get_mut(entity)) else {
            // Hovered object vanished since the last scan
            self.hovered = None;
            return InteractionOutcome::Ignored;
        };

        let was_kinematic = physics.is_kinematic(body).unwrap_or(false);
        physics.set_kinematic(body, true);
        object.on_pickup();
        log::debug!("Picked up {} ({:?})", object.label(), entity);

        // Held replaces hovered; the next scan skips it
        self.hovered = None;
        self.held = Some(HeldObject {
            entity,
            body,
            was_kinematic,
        });
        InteractionOutcome::PickedUp(entity)
    }

    /// Launch input: release the held object and push it away from just behind the anchor.
    pub fn on_launch<B: BodyControl + ?Sized>(
        &mut self,
        look: &LookFrame,
        physics: &mut B,
        objects: &mut InteractableRegistry,
    ) -> InteractionOutcome {
        let Some(held) = self.held else {
            log::trace!("Launch ignored: nothing held");
            return InteractionOutcome::Ignored;
        };
        self.release(physics, objects, true);

        let explosion = ExplosionForce {
            force: self.launch.force,
            center: look.hold_anchor - look.forward * self.launch.back_offset,
            radius: self.launch.radius,
            upwards_modifier: self.launch.upwards_modifier,
        };
        let pushed = physics.apply_explosion_force(held.body, &explosion);
        log::debug!("Launched {:?} (impulse applied: {})", held.entity, pushed);
        InteractionOutcome::Launched(held.entity)
    }

    /// Drop behaviour and clear the held reference. A dropped body gets its
    /// pre-pickup kinematic flag back; a launched one is always left dynamic.
    fn release<B: BodyControl + ?Sized>(
        &mut self,
        physics: &mut B,
        objects: &mut InteractableRegistry,
        launching: bool,
    ) -> Option<Entity> {
        let held = self.held.take()?;
        if let Some(object) = objects.get_mut(held.entity) {
            object.on_drop();
            log::debug!("Dropped {} ({:?})", object.label(), held.entity);
        }
        physics.set_kinematic(held.body, held.was_kinematic && !launching);
        Some(held.entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interactable::PickupableObject;
    use engine_core::InteractionState;
    use physics::{ColliderHandle, PhysicsBody};
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// Physics double: answers rays from a fixed list, records body changes.
    #[derive(Default)]
    struct FakePhysics {
        hits: Vec<RaycastHit>,
        next_hit: RefCell<usize>,
        kinematic: HashMap<RigidBodyHandle, bool>,
        impulses: Vec<(RigidBodyHandle, ExplosionForce)>,
        moves: Vec<(RigidBodyHandle, Vec3)>,
    }

    impl RayQuery for FakePhysics {
        fn cast_ray(&self, _origin: Vec3, _direction: Vec3, _max: f32) -> Option<RaycastHit> {
            let mut next = self.next_hit.borrow_mut();
            let hit = self.hits.get(*next).copied();
            *next += 1;
            hit
        }
    }

    impl BodyControl for FakePhysics {
        fn is_kinematic(&self, body: RigidBodyHandle) -> Option<bool> {
            Some(self.kinematic.get(&body).copied().unwrap_or(false))
        }

        fn set_kinematic(&mut self, body: RigidBodyHandle, kinematic: bool) {
            self.kinematic.insert(body, kinematic);
        }

        fn move_kinematic(&mut self, body: RigidBodyHandle, position: Vec3) {
            self.moves.push((body, position));
        }

        fn apply_explosion_force(&mut self, body: RigidBodyHandle, explosion: &ExplosionForce) -> bool {
            self.impulses.push((body, *explosion));
            true
        }
    }

    impl FakePhysics {
        fn with_hits(hits: Vec<RaycastHit>) -> Self {
            Self {
                hits,
                ..Default::default()
            }
        }

        fn rewind(&self) {
            *self.next_hit.borrow_mut() = 0;
        }
    }

    fn hit(collider: ColliderHandle, distance: f32) -> RaycastHit {
        RaycastHit {
            collider,
            distance,
            point: Vec3::new(0.0, 0.0, -distance),
            normal: Vec3::Z,
        }
    }

    fn spawn(objects: &mut InteractableRegistry, i: u32, name: &str) -> (Entity, RigidBodyHandle, ColliderHandle) {
        let body = RigidBodyHandle::from_raw_parts(i, 0);
        let collider = ColliderHandle::from_raw_parts(i, 0);
        let entity = objects.register(PickupableObject::new(name), PhysicsBody::with_collider(body, collider));
        (entity, body, collider)
    }

    fn controller(rays: usize) -> InteractionController {
        let detector = ConeCastDetector::new(25.0, rays).unwrap();
        InteractionController::new(detector, 1.25, LaunchConfig::default())
    }

    fn look() -> LookFrame {
        LookFrame {
            origin: Vec3::new(0.0, 0.5, 0.0),
            forward: -Vec3::Z,
            hold_anchor: Vec3::new(0.0, 1.2, -0.7),
        }
    }

    #[test]
    fn hover_picks_first_qualifying_hit_not_nearest() {
        let mut objects = InteractableRegistry::new();
        let (a, _, ca) = spawn(&mut objects, 1, "a");
        let (b, _, cb) = spawn(&mut objects, 2, "b");
        let (_, _, cc) = spawn(&mut objects, 3, "c");
        objects.get_mut(a).unwrap().on_pickup();

        // C is nearest but comes last in cone order
        let hits = vec![hit(ca, 1.0), hit(cb, 1.1), hit(cc, 0.2)];
        assert_eq!(select_hover_candidate(&hits, &objects, None), Some(b));

        let physics = FakePhysics::with_hits(hits);
        let mut interaction = controller(3);
        interaction.scan(&look(), &physics, &mut objects);
        assert_eq!(interaction.hovered(), Some(b));
        assert_eq!(objects.state(b), Some(InteractionState::Hovered));
    }

    #[test]
    fn hover_skips_unregistered_colliders() {
        let mut objects = InteractableRegistry::new();
        let (b, _, cb) = spawn(&mut objects, 2, "b");
        let wall = ColliderHandle::from_raw_parts(40, 0);

        let physics = FakePhysics::with_hits(vec![hit(wall, 0.3), hit(cb, 1.0)]);
        let mut interaction = controller(2);
        interaction.scan(&look(), &physics, &mut objects);
        assert_eq!(interaction.hovered(), Some(b));
    }

    #[test]
    fn hover_exit_fires_when_candidate_changes() {
        let mut objects = InteractableRegistry::new();
        let (a, _, ca) = spawn(&mut objects, 1, "a");
        let mut interaction = controller(1);

        let physics = FakePhysics::with_hits(vec![hit(ca, 1.0)]);
        interaction.scan(&look(), &physics, &mut objects);
        assert_eq!(objects.state(a), Some(InteractionState::Hovered));

        let empty = FakePhysics::default();
        interaction.scan(&look(), &empty, &mut objects);
        assert_eq!(interaction.hovered(), None);
        assert_eq!(objects.state(a), Some(InteractionState::Idle));
    }

    #[test]
    fn hover_moves_from_one_object_to_another() {
        let mut objects = InteractableRegistry::new();
        let (a, _, ca) = spawn(&mut objects, 1, "a");
        let (b, _, cb) = spawn(&mut objects, 2, "b");
        let mut interaction = controller(1);

        let physics = FakePhysics::with_hits(vec![hit(ca, 1.0)]);
        interaction.scan(&look(), &physics, &mut objects);
        assert_eq!(interaction.hovered(), Some(a));

        let physics = FakePhysics::with_hits(vec![hit(cb, 1.0)]);
        interaction.scan(&look(), &physics, &mut objects);
        assert_eq!(interaction.hovered(), Some(b));
        assert_eq!(objects.state(a), Some(InteractionState::Idle));
        assert_eq!(objects.state(b), Some(InteractionState::Hovered));
    }

    #[test]
    fn pickup_with_nothing_hovered_is_noop() {
        let mut objects = InteractableRegistry::new();
        spawn(&mut objects, 1, "a");
        let mut physics = FakePhysics::default();
        let mut interaction = controller(1);

        assert_eq!(interaction.on_pickup(&mut physics, &mut objects), InteractionOutcome::Ignored);
        assert!(!interaction.is_holding());
        assert!(physics.kinematic.is_empty());
    }

    #[test]
    fn pickup_then_drop_restores_kinematic_flag() {
        let mut objects = InteractableRegistry::new();
        let (a, body, ca) = spawn(&mut objects, 1, "a");
        let mut physics = FakePhysics::with_hits(vec![hit(ca, 1.0)]);
        let mut interaction = controller(1);

        interaction.scan(&look(), &physics, &mut objects);
        assert_eq!(interaction.on_pickup(&mut physics, &mut objects), InteractionOutcome::PickedUp(a));
        assert_eq!(physics.kinematic.get(&body), Some(&true));
        assert_eq!(interaction.held(), Some(a));
        assert!(objects.is_held(a));

        assert_eq!(interaction.on_pickup(&mut physics, &mut objects), InteractionOutcome::Dropped(a));
        assert_eq!(physics.kinematic.get(&body), Some(&false));
        assert_eq!(interaction.held(), None);
        assert_eq!(objects.state(a), Some(InteractionState::Idle));
    }

    #[test]
    fn pickup_keeps_previously_kinematic_body_kinematic() {
        let mut objects = InteractableRegistry::new();
        let (_, body, ca) = spawn(&mut objects, 1, "platform");
        let mut physics = FakePhysics::with_hits(vec![hit(ca, 1.0)]);
        physics.kinematic.insert(body, true);
        let mut interaction = controller(1);

        interaction.scan(&look(), &physics, &mut objects);
        interaction.on_pickup(&mut physics, &mut objects);
        interaction.on_pickup(&mut physics, &mut objects);
        assert_eq!(physics.kinematic.get(&body), Some(&true));
    }

    #[test]
    fn held_object_is_not_rehovered_and_follows_anchor() {
        let mut objects = InteractableRegistry::new();
        let (a, body, ca) = spawn(&mut objects, 1, "a");
        let mut physics = FakePhysics::with_hits(vec![hit(ca, 1.0)]);
        let mut interaction = controller(1);

        interaction.scan(&look(), &physics, &mut objects);
        interaction.on_pickup(&mut physics, &mut objects);

        physics.rewind();
        interaction.update(&look(), &mut physics, &mut objects);
        assert_eq!(interaction.hovered(), None);
        assert_eq!(objects.state(a), Some(InteractionState::Held));
        assert_eq!(physics.moves, vec![(body, look().hold_anchor)]);
    }

    #[test]
    fn launch_applies_one_impulse_and_clears_held() {
        let mut objects = InteractableRegistry::new();
        let (a, body, ca) = spawn(&mut objects, 1, "a");
        let mut physics = FakePhysics::with_hits(vec![hit(ca, 1.0)]);
        let mut interaction = controller(1);

        interaction.scan(&look(), &physics, &mut objects);
        interaction.on_pickup(&mut physics, &mut objects);
        assert_eq!(
            interaction.on_launch(&look(), &mut physics, &mut objects),
            InteractionOutcome::Launched(a)
        );

        assert_eq!(physics.impulses.len(), 1);
        let (pushed, explosion) = physics.impulses[0];
        assert_eq!(pushed, body);
        let expected_center = look().hold_anchor - look().forward * 0.2;
        assert!((explosion.center - expected_center).length() < 1e-6);
        assert_eq!(explosion.force, 1500.0);
        assert_eq!(physics.kinematic.get(&body), Some(&false));
        assert_eq!(interaction.held(), None);
        assert_eq!(objects.state(a), Some(InteractionState::Idle));

        // Second launch has nothing to throw
        assert_eq!(
            interaction.on_launch(&look(), &mut physics, &mut objects),
            InteractionOutcome::Ignored
        );
        assert_eq!(physics.impulses.len(), 1);
    }

    #[test]
    fn launch_leaves_previously_kinematic_body_dynamic() {
        let mut objects = InteractableRegistry::new();
        let (a, body, ca) = spawn(&mut objects, 1, "platform");
        let mut physics = FakePhysics::with_hits(vec![hit(ca, 1.0)]);
        physics.kinematic.insert(body, true);
        let mut interaction = controller(1);

        interaction.scan(&look(), &physics, &mut objects);
        interaction.on_pickup(&mut physics, &mut objects);
        assert_eq!(
            interaction.on_launch(&look(), &mut physics, &mut objects),
            InteractionOutcome::Launched(a)
        );
        assert_eq!(physics.kinematic.get(&body), Some(&false));
        assert_eq!(physics.impulses.len(), 1);
    }

    #[test]
    fn launch_without_held_object_is_noop() {
        let mut objects = InteractableRegistry::new();
        let (_, _, ca) = spawn(&mut objects, 1, "a");
        let mut physics = FakePhysics::with_hits(vec![hit(ca, 1.0)]);
        let mut interaction = controller(1);
        interaction.scan(&look(), &physics, &mut objects);

        assert_eq!(
            interaction.on_launch(&look(), &mut physics, &mut objects),
            InteractionOutcome::Ignored
        );
        assert!(physics.impulses.is_empty());
        assert!(physics.kinematic.is_empty());
        assert!(interaction.hovered().is_some());
    }

    #[test]
    fn removed_held_object_is_forgotten() {
        let mut objects = InteractableRegistry::new();
        let (a, body, ca) = spawn(&mut objects, 1, "a");
        let mut physics = FakePhysics::with_hits(vec![hit(ca, 1.0)]);
        let mut interaction = controller(1);

        interaction.scan(&look(), &physics, &mut objects);
        interaction.on_pickup(&mut physics, &mut objects);
        objects.unregister(a);

        interaction.carry(look().hold_anchor, &mut physics, &objects);
        assert!(!interaction.is_holding());
        assert_eq!(physics.kinematic.get(&body), Some(&false));
        assert!(physics.moves.is_empty());
    }
}
