//! Descriptors are the editable, serializable-in-spirit view of a scene.
//!
//! They are plain data: nothing here knows about the renderer. A [crate::scene::SceneBuilder]
//! turns them into renderer primitives when a session starts.
//!
//! Descriptors live in [DescriptorList]s and are addressed through [Id] handles. A handle
//! stays valid until its descriptor is removed and is never handed out again afterwards,
//! so a stale handle cannot alias a newer descriptor.
//!
//! While a render session is building or rendering, the [Descriptors] are locked through an
//! [EditLock] and every mutation fails with [EditError::SessionActive].

pub mod light;
pub mod path;
pub mod shape;

use std::{
    fmt::Debug,
    hash::Hash,
    marker::PhantomData,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

pub use light::{LightDescriptor, LightKind};
pub use path::BoundedPath;
pub use shape::{ShapeDescriptor, ShapeGeometry, ShapeKind};

use crate::error::EditError;

/// Stable handle to a descriptor of type `T`
pub struct Id<T> {
    raw: u64,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    pub fn raw(self) -> u64 {
        self.raw
    }
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<T> Eq for Id<T> {}

impl<T> Hash for Id<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl<T> Debug for Id<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.raw)
    }
}

/// An ordered collection of descriptors. Iteration follows insertion order.
#[derive(Debug, Clone)]
pub struct DescriptorList<T> {
    items: Vec<(Id<T>, T)>,
    next_id: u64,
}

impl<T> Default for DescriptorList<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            next_id: 0,
        }
    }
}

impl<T> DescriptorList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: T) -> Id<T> {
        let id = Id {
            raw: self.next_id,
            _marker: PhantomData,
        };
        self.next_id += 1;
        self.items.push((id, item));
        id
    }

    pub fn get(&self, id: Id<T>) -> Option<&T> {
        self.position(id).map(|idx| &self.items[idx].1)
    }

    pub fn get_mut(&mut self, id: Id<T>) -> Option<&mut T> {
        self.position(id).map(|idx| &mut self.items[idx].1)
    }

    /// Removes the descriptor, returns `None` if the handle is not (or no longer) present
    pub fn remove(&mut self, id: Id<T>) -> Option<T> {
        self.position(id).map(|idx| self.items.remove(idx).1)
    }

    pub fn contains(&self, id: Id<T>) -> bool {
        self.position(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Id<T>, &T)> + '_ {
        self.items.iter().map(|(id, item)| (*id, item))
    }

    fn position(&self, id: Id<T>) -> Option<usize> {
        self.items.iter().position(|(i, _)| *i == id)
    }
}

impl<T> FromIterator<T> for DescriptorList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        for item in iter {
            list.push(item);
        }
        list
    }
}

/// The shapes and lights of the scene being edited
#[derive(Debug, Default)]
pub struct Descriptors {
    shapes: DescriptorList<ShapeDescriptor>,
    lights: DescriptorList<LightDescriptor>,
    locked: Arc<AtomicBool>,
}

impl Descriptors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(
        shapes: DescriptorList<ShapeDescriptor>,
        lights: DescriptorList<LightDescriptor>,
    ) -> Self {
        Self {
            shapes,
            lights,
            locked: Default::default(),
        }
    }

    pub fn shapes(&self) -> &DescriptorList<ShapeDescriptor> {
        &self.shapes
    }

    pub fn lights(&self) -> &DescriptorList<LightDescriptor> {
        &self.lights
    }

    pub fn is_locked(&self) -> bool {
        self.locked.load(Ordering::Acquire)
    }

    /// Prevents edits until the returned guard is dropped.
    ///
    /// Returns `None` if a lock is already held.
    pub fn lock(&self) -> Option<EditLock> {
        self.locked
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| EditLock {
                locked: self.locked.clone(),
            })
    }

    fn check_unlocked(&self) -> Result<(), EditError> {
        if self.is_locked() {
            Err(EditError::SessionActive)
        } else {
            Ok(())
        }
    }

    /// Appends a shape of the given kind with default parameters
    pub fn add_shape(&mut self, kind: ShapeKind) -> Result<Id<ShapeDescriptor>, EditError> {
        self.insert_shape(ShapeDescriptor::new(kind))
    }

    pub fn insert_shape(
        &mut self,
        shape: ShapeDescriptor,
    ) -> Result<Id<ShapeDescriptor>, EditError> {
        self.check_unlocked()?;
        let id = self.shapes.push(shape);
        log::debug!("Added shape {id:?}");
        Ok(id)
    }

    pub fn shape_mut(
        &mut self,
        id: Id<ShapeDescriptor>,
    ) -> Result<&mut ShapeDescriptor, EditError> {
        self.check_unlocked()?;
        self.shapes.get_mut(id).ok_or(EditError::UnknownDescriptor)
    }

    /// Removes a shape. Removing an unknown or already removed shape is a no-op returning `false`.
    pub fn remove_shape(&mut self, id: Id<ShapeDescriptor>) -> Result<bool, EditError> {
        self.check_unlocked()?;
        let removed = self.shapes.remove(id).is_some();
        if removed {
            log::debug!("Removed shape {id:?}");
        }
        Ok(removed)
    }

    /// Appends a light of the given kind with default parameters
    pub fn add_light(&mut self, kind: LightKind) -> Result<Id<LightDescriptor>, EditError> {
        self.insert_light(LightDescriptor::new(kind))
    }

    pub fn insert_light(
        &mut self,
        light: LightDescriptor,
    ) -> Result<Id<LightDescriptor>, EditError> {
        self.check_unlocked()?;
        let id = self.lights.push(light);
        log::debug!("Added light {id:?}");
        Ok(id)
    }

    pub fn light_mut(
        &mut self,
        id: Id<LightDescriptor>,
    ) -> Result<&mut LightDescriptor, EditError> {
        self.check_unlocked()?;
        self.lights.get_mut(id).ok_or(EditError::UnknownDescriptor)
    }

    /// Removes a light. Removing an unknown or already removed light is a no-op returning `false`.
    pub fn remove_light(&mut self, id: Id<LightDescriptor>) -> Result<bool, EditError> {
        self.check_unlocked()?;
        let removed = self.lights.remove(id).is_some();
        if removed {
            log::debug!("Removed light {id:?}");
        }
        Ok(removed)
    }
}

/// Keeps the [Descriptors] it was taken from read-only while alive
#[derive(Debug)]
pub struct EditLock {
    locked: Arc<AtomicBool>,
}

impl Drop for EditLock {
    fn drop(&mut self) {
        self.locked.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_are_never_reused() {
        let mut list = DescriptorList::new();
        let a = list.push(1);
        let b = list.push(2);
        assert_eq!(list.remove(a), Some(1));
        let c = list.push(3);

        assert_ne!(a, c);
        assert_ne!(b, c);
        assert_eq!(list.get(a), None);
        assert_eq!(list.get(c), Some(&3));
    }

    #[test]
    fn iteration_keeps_insertion_order() {
        let mut list: DescriptorList<_> = ["a", "b", "c"].into_iter().collect();
        let first = list.iter().next().map(|(id, _)| id).unwrap();
        list.remove(first);
        list.push("d");

        let items: Vec<_> = list.iter().map(|(_, s)| *s).collect();
        assert_eq!(items, ["b", "c", "d"]);
    }

    #[test]
    fn removal_is_idempotent() {
        let mut descriptors = Descriptors::new();
        let sphere = descriptors.add_shape(ShapeKind::Sphere).unwrap();
        let light = descriptors.add_light(LightKind::Point).unwrap();

        assert_eq!(descriptors.remove_shape(sphere), Ok(true));
        assert_eq!(descriptors.remove_shape(sphere), Ok(false));
        assert_eq!(descriptors.remove_light(light), Ok(true));
        assert_eq!(descriptors.remove_light(light), Ok(false));
        assert!(descriptors.shapes().is_empty());
        assert!(descriptors.lights().is_empty());
    }

    #[test]
    fn edits_are_rejected_while_locked() {
        let mut descriptors = Descriptors::new();
        let sphere = descriptors.add_shape(ShapeKind::Sphere).unwrap();

        let lock = descriptors.lock().unwrap();
        assert!(descriptors.lock().is_none());
        assert_eq!(
            descriptors.add_shape(ShapeKind::Disk),
            Err(EditError::SessionActive)
        );
        assert_eq!(
            descriptors.shape_mut(sphere).map(|_| ()),
            Err(EditError::SessionActive)
        );
        assert_eq!(
            descriptors.remove_shape(sphere),
            Err(EditError::SessionActive)
        );
        assert_eq!(
            descriptors.add_light(LightKind::Spot),
            Err(EditError::SessionActive)
        );
        assert_eq!(descriptors.shapes().len(), 1);

        drop(lock);
        assert!(!descriptors.is_locked());
        assert!(descriptors.add_shape(ShapeKind::Disk).is_ok());
    }

    #[test]
    fn edits_through_handles() {
        let mut descriptors = Descriptors::new();
        let sphere = descriptors.add_shape(ShapeKind::Sphere).unwrap();
        if let ShapeGeometry::Sphere { radius, .. } =
            &mut descriptors.shape_mut(sphere).unwrap().geometry
        {
            *radius = 2.0;
        }

        assert!(matches!(
            descriptors.shapes().get(sphere).unwrap().geometry,
            ShapeGeometry::Sphere { radius, .. } if radius == 2.0
        ));

        descriptors.remove_shape(sphere).unwrap();
        assert_eq!(
            descriptors.shape_mut(sphere).map(|_| ()),
            Err(EditError::UnknownDescriptor)
        );
    }
}
