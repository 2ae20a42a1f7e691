// ── Handler registry ──
//
// Name-to-handler lookup. Built once at startup by explicit
// registration calls, then passed by reference to the gate and
// orchestrator -- never ambient global state, so tests can substitute a
// fake registry wholesale.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::error::CoreError;
use crate::handler::ApHandler;
use crate::resolver::ManagementApi;
use crate::vendors;

type HandlerCtor = Box<dyn Fn(Arc<dyn ManagementApi>) -> Box<dyn ApHandler> + Send + Sync>;

/// Identifies a constructible vendor handler. Immutable after
/// registration.
pub struct HandlerDescriptor {
    class: String,
    construct: HandlerCtor,
}

impl HandlerDescriptor {
    pub fn new<F>(class: impl Into<String>, construct: F) -> Self
    where
        F: Fn(Arc<dyn ManagementApi>) -> Box<dyn ApHandler> + Send + Sync + 'static,
    {
        Self {
            class: class.into(),
            construct: Box::new(construct),
        }
    }

    /// The device-class key this descriptor serves.
    pub fn class(&self) -> &str {
        &self.class
    }

    /// Construct a fresh handler bound to the given management API.
    pub fn instantiate(&self, api: Arc<dyn ManagementApi>) -> Box<dyn ApHandler> {
        (self.construct)(api)
    }
}

impl std::fmt::Debug for HandlerDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerDescriptor")
            .field("class", &self.class)
            .finish_non_exhaustive()
    }
}

/// Mapping from device-class key to handler descriptor.
///
/// Append-only at runtime: descriptors register at startup and live for
/// the process lifetime. Lookup by an unknown key is an error, never a
/// silent no-op.
#[derive(Debug, Default)]
pub struct HandlerRegistry {
    handlers: IndexMap<String, HandlerDescriptor>,
}

impl HandlerRegistry {
    /// An empty registry. Most callers want [`builtin_registry`] instead.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a descriptor under its device-class key. Registering
    /// the same key again replaces the earlier descriptor.
    pub fn register(&mut self, descriptor: HandlerDescriptor) {
        self.handlers.insert(descriptor.class.clone(), descriptor);
    }

    /// Look up the descriptor for a device-class key.
    pub fn lookup(&self, class: &str) -> Result<&HandlerDescriptor, CoreError> {
        self.handlers
            .get(class)
            .ok_or_else(|| CoreError::UnknownDeviceClass {
                class: class.to_owned(),
            })
    }

    /// Registered device-class keys, in registration order.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

/// The registry of all vendor handlers shipped with this crate.
pub fn builtin_registry() -> HandlerRegistry {
    let mut registry = HandlerRegistry::new();
    registry.register(vendors::meraki::MerakiMr45::descriptor());
    registry
}
