use std::any::{Any, TypeId};
use std::collections::HashMap;

use crate::descriptor::{PrivilegeDescriptor, Privileged};
use crate::error::RegistryError;

/// Process-wide table mapping entity types to their privilege descriptors.
///
/// Built once during startup configuration, single-threaded, before any
/// request is served; after [`PrivilegeRegistryBuilder::build`] the registry
/// is immutable and safe for unsynchronized concurrent reads. Pass it by
/// reference (or behind an `Arc`) into the request pipeline; it is an
/// explicit configuration object, not a mutable global.
///
/// Registering several descriptors for the same entity type is allowed;
/// they are AND-composed at filter time. Registering two descriptors with
/// the same label for the same type is rejected as a duplicate.
#[derive(Default)]
pub struct PrivilegeRegistry {
    entries: HashMap<TypeId, Entry>,
}

struct Entry {
    key: &'static str,
    // Vec<PrivilegeDescriptor<M>> for the entity type behind the TypeId
    descriptors: Box<dyn Any + Send + Sync>,
}

impl PrivilegeRegistry {
    /// Descriptors registered for `M`, in registration order.
    ///
    /// An empty slice means no restriction is configured for this type.
    #[must_use]
    pub fn descriptors_for<M: Privileged>(&self) -> &[PrivilegeDescriptor<M>] {
        self.entries
            .get(&TypeId::of::<M>())
            .and_then(|entry| entry.descriptors.downcast_ref::<Vec<PrivilegeDescriptor<M>>>())
            .map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn has_descriptors<M: Privileged>(&self) -> bool {
        !self.descriptors_for::<M>().is_empty()
    }

    /// Number of entity types with at least one descriptor.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stable keys of all registered entity types, unordered.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.values().map(|entry| entry.key)
    }
}

/// Builder collecting descriptor registrations during startup.
///
/// Registration errors are fatal: the builder is consumed by value, so a
/// failed `register` drops the partially built registry instead of serving
/// from it.
#[derive(Default)]
pub struct PrivilegeRegistryBuilder {
    entries: HashMap<TypeId, Entry>,
}

impl PrivilegeRegistryBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a descriptor for entity type `M`.
    ///
    /// # Errors
    /// Returns [`RegistryError::DuplicateDescriptor`] if a descriptor with
    /// the same label is already registered for `M`.
    pub fn register<M: Privileged>(
        mut self,
        descriptor: PrivilegeDescriptor<M>,
    ) -> Result<Self, RegistryError> {
        let entry = self.entries.entry(TypeId::of::<M>()).or_insert_with(|| Entry {
            key: M::KEY,
            descriptors: Box::new(Vec::<PrivilegeDescriptor<M>>::new()),
        });

        let descriptors = entry
            .descriptors
            .downcast_mut::<Vec<PrivilegeDescriptor<M>>>()
            .unwrap_or_else(|| unreachable!("entry keyed by TypeId::of::<M>()"));

        if descriptors.iter().any(|d| d.label() == descriptor.label()) {
            return Err(RegistryError::DuplicateDescriptor {
                entity: M::KEY,
                label: descriptor.label().to_owned(),
            });
        }

        descriptors.push(descriptor);
        Ok(self)
    }

    #[must_use]
    pub fn build(self) -> PrivilegeRegistry {
        PrivilegeRegistry {
            entries: self.entries,
        }
    }
}
