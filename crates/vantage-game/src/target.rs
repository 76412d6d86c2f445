//! Hit targets and usable scene objects
//!
//! Targets are looked up by the [`EntityId`] stored on their collider and
//! dispatched by capability: weapons call [`Hittable::on_hit`], the
//! interaction probe calls [`Usable::on_use`].

use std::collections::HashMap;
use std::fmt;

use tracing::info;
use vantage_core::EntityId;

/// What a hittable did with a hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitResponse {
    /// The target took the hit and stays
    Absorbed,
    /// The target should be removed from the scene
    Destroyed,
}

/// Something that reacts to weapon hits
pub trait Hittable {
    fn on_hit(&mut self, _damage: f32) -> HitResponse {
        HitResponse::Absorbed
    }
}

/// Something that reacts to the use action
pub trait Usable {
    fn on_use(&mut self) {}
}

/// A scene object with optional hit and use capabilities
pub trait Target: fmt::Debug {
    /// Name shown in logs
    fn name(&self) -> &str;

    fn as_hittable(&mut self) -> Option<&mut dyn Hittable> {
        None
    }

    fn as_usable(&mut self) -> Option<&mut dyn Usable> {
        None
    }
}

/// Practice target that counts what it takes
#[derive(Debug, Clone, Default)]
pub struct Dummy {
    pub name: String,
    pub hits: u32,
    pub damage_taken: f32,
}

impl Dummy {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

impl Hittable for Dummy {
    fn on_hit(&mut self, damage: f32) -> HitResponse {
        self.hits += 1;
        self.damage_taken += damage;
        HitResponse::Absorbed
    }
}

impl Target for Dummy {
    fn name(&self) -> &str {
        &self.name
    }

    fn as_hittable(&mut self) -> Option<&mut dyn Hittable> {
        Some(self)
    }
}

/// Hostile target, destroyed once its health runs out
#[derive(Debug, Clone)]
pub struct Enemy {
    pub name: String,
    pub health: f32,
}

impl Enemy {
    pub fn new(name: impl Into<String>, health: f32) -> Self {
        Self {
            name: name.into(),
            health,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }
}

impl Hittable for Enemy {
    fn on_hit(&mut self, damage: f32) -> HitResponse {
        self.health -= damage;
        if self.is_dead() {
            HitResponse::Destroyed
        } else {
            HitResponse::Absorbed
        }
    }
}

impl Target for Enemy {
    fn name(&self) -> &str {
        &self.name
    }

    fn as_hittable(&mut self) -> Option<&mut dyn Hittable> {
        Some(self)
    }
}

/// Two-state switch flipped by the use action
#[derive(Debug, Clone, Default)]
pub struct Switch {
    pub name: String,
    pub on: bool,
    pub uses: u32,
}

impl Switch {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

impl Usable for Switch {
    fn on_use(&mut self) {
        self.on = !self.on;
        self.uses += 1;
    }
}

impl Target for Switch {
    fn name(&self) -> &str {
        &self.name
    }

    fn as_usable(&mut self) -> Option<&mut dyn Usable> {
        Some(self)
    }
}

/// All live targets keyed by scene entity
#[derive(Debug, Default)]
pub struct TargetRegistry {
    targets: HashMap<EntityId, Box<dyn Target>>,
}

impl TargetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a target for an entity, replacing any previous one
    pub fn insert(&mut self, entity: EntityId, target: impl Target + 'static) {
        self.targets.insert(entity, Box::new(target));
    }

    pub fn get(&self, entity: EntityId) -> Option<&dyn Target> {
        self.targets.get(&entity).map(|target| target.as_ref())
    }

    pub fn remove(&mut self, entity: EntityId) -> Option<Box<dyn Target>> {
        self.targets.remove(&entity)
    }

    pub fn contains(&self, entity: EntityId) -> bool {
        self.targets.contains_key(&entity)
    }

    /// Whether the entity is registered and can take hits
    pub fn is_hittable(&mut self, entity: EntityId) -> bool {
        self.targets
            .get_mut(&entity)
            .is_some_and(|target| target.as_hittable().is_some())
    }

    /// Deliver a hit. Destroyed targets are dropped from the registry.
    ///
    /// Returns `None` when the entity is unknown or not hittable.
    pub fn hit(&mut self, entity: EntityId, damage: f32) -> Option<HitResponse> {
        let target = self.targets.get_mut(&entity)?;
        info!("Hit {}", target.name());
        let response = target.as_hittable()?.on_hit(damage);

        if response == HitResponse::Destroyed {
            if let Some(target) = self.targets.remove(&entity) {
                info!("{} destroyed", target.name());
            }
        }
        Some(response)
    }

    /// Deliver the use action. Returns whether the target was usable.
    pub fn use_target(&mut self, entity: EntityId) -> bool {
        let Some(usable) = self
            .targets
            .get_mut(&entity)
            .and_then(|target| target.as_usable())
        else {
            return false;
        };
        usable.on_use();
        true
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}
