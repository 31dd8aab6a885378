//! Injection sites: slots that receive generated clients.

use std::collections::HashMap;

use crate::client::{ClientFactory, RemoteInterface};

/// Declared shape of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteShape {
    /// One client, for the first declared backend.
    Single,
    /// One client per backend, in declaration order.
    Sequence,
    /// Clients keyed by backend name.
    Mapping,
}

/// Something that can receive clients from a factory.
trait Slot {
    fn shape(&self) -> SiteShape;
    fn interface(&self) -> &'static str;
    fn is_populated(&self) -> bool;
    fn fill(&mut self, factory: &ClientFactory, backends: &[String]);
}

struct SingleSlot<'a, T>(&'a mut Option<T>);

impl<T: RemoteInterface> Slot for SingleSlot<'_, T> {
    fn shape(&self) -> SiteShape {
        SiteShape::Single
    }

    fn interface(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn is_populated(&self) -> bool {
        self.0.is_some()
    }

    fn fill(&mut self, factory: &ClientFactory, backends: &[String]) {
        if let Some(first) = backends.first() {
            *self.0 = Some(factory.create_one(first.as_str()));
        }
    }
}

struct SequenceSlot<'a, T>(&'a mut Option<Vec<T>>);

impl<T: RemoteInterface> Slot for SequenceSlot<'_, T> {
    fn shape(&self) -> SiteShape {
        SiteShape::Sequence
    }

    fn interface(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn is_populated(&self) -> bool {
        self.0.is_some()
    }

    fn fill(&mut self, factory: &ClientFactory, backends: &[String]) {
        *self.0 = Some(factory.create_many(backends));
    }
}

struct MappingSlot<'a, T>(&'a mut Option<HashMap<String, T>>);

impl<T: RemoteInterface> Slot for MappingSlot<'_, T> {
    fn shape(&self) -> SiteShape {
        SiteShape::Mapping
    }

    fn interface(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn is_populated(&self) -> bool {
        self.0.is_some()
    }

    fn fill(&mut self, factory: &ClientFactory, backends: &[String]) {
        *self.0 = Some(factory.create_mapped(backends));
    }
}

/// Single slot of type `U` filled with client `C` through `convert`.
struct CoercedSlot<'a, C, U> {
    slot: &'a mut Option<U>,
    convert: fn(C) -> U,
}

impl<C: RemoteInterface, U> Slot for CoercedSlot<'_, C, U> {
    fn shape(&self) -> SiteShape {
        SiteShape::Single
    }

    fn interface(&self) -> &'static str {
        std::any::type_name::<C>()
    }

    fn is_populated(&self) -> bool {
        self.slot.is_some()
    }

    fn fill(&mut self, factory: &ClientFactory, backends: &[String]) {
        if let Some(first) = backends.first() {
            let client: C = factory.create_one(first.as_str());
            *self.slot = Some((self.convert)(client));
        }
    }
}

/// A field marked for client installation.
pub struct InjectionSite<'a> {
    field: &'static str,
    backends: Vec<String>,
    slot: Box<dyn Slot + 'a>,
}

impl<'a> InjectionSite<'a> {
    /// A slot holding one client `T`.
    pub fn single<T: RemoteInterface>(field: &'static str, slot: &'a mut Option<T>) -> Self {
        Self::with_slot(field, Box::new(SingleSlot(slot)))
    }

    /// A slot holding a list of `T`, one per backend.
    pub fn sequence<T: RemoteInterface>(field: &'static str, slot: &'a mut Option<Vec<T>>) -> Self {
        Self::with_slot(field, Box::new(SequenceSlot(slot)))
    }

    /// A slot holding `T`s keyed by backend name.
    pub fn mapping<T: RemoteInterface>(
        field: &'static str,
        slot: &'a mut Option<HashMap<String, T>>,
    ) -> Self {
        Self::with_slot(field, Box::new(MappingSlot(slot)))
    }

    /// A slot whose declared type differs from the client type, e.g.
    /// `Option<Arc<dyn HelloApi>>` filled from a `HelloClient`.
    pub fn coerced<C: RemoteInterface, U: 'a>(
        field: &'static str,
        slot: &'a mut Option<U>,
        convert: fn(C) -> U,
    ) -> Self {
        Self::with_slot(field, Box::new(CoercedSlot { slot, convert }))
    }

    fn with_slot(field: &'static str, slot: Box<dyn Slot + 'a>) -> Self {
        Self {
            field,
            backends: Vec::new(),
            slot,
        }
    }

    /// Declare the backend names this site is wired to.
    pub fn backends<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.backends = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn field(&self) -> &'static str {
        self.field
    }

    pub fn backend_names(&self) -> &[String] {
        &self.backends
    }

    pub fn shape(&self) -> SiteShape {
        self.slot.shape()
    }

    /// Type name of the client installed into this site.
    pub fn interface(&self) -> &'static str {
        self.slot.interface()
    }

    pub fn is_populated(&self) -> bool {
        self.slot.is_populated()
    }

    pub(crate) fn fill(&mut self, factory: &ClientFactory) {
        self.slot.fill(factory, &self.backends);
    }
}

impl std::fmt::Debug for InjectionSite<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InjectionSite")
            .field("field", &self.field)
            .field("backends", &self.backends)
            .field("shape", &self.shape())
            .field("interface", &self.interface())
            .finish()
    }
}

/// An object with fields that receive generated clients.
pub trait Injectable {
    fn injection_sites(&mut self) -> Vec<InjectionSite<'_>>;
}
