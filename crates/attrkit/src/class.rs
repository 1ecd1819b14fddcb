//! # Attribute-bearing classes
//!
//! A [`ClassDef`] is the frozen result of a declarative phase: a name, an
//! optional parent, the class's own [`ClassRegistry`], the accessor table and
//! the coercion gateway its setters call into.
//!
//! ## Lifecycle
//!
//! 1. **Declare**: [`ClassDef::builder`] returns a [`ClassBuilder`]; each
//!    `attribute(..)` call goes straight into the builder's registry.
//! 2. **Freeze**: [`ClassBuilder::build`] synthesizes one [`Accessor`] per
//!    effective attribute and returns a shared [`ClassRef`]. Nothing can be
//!    declared on a class after this point.
//! 3. **Introspect**: [`ClassDef::attributes`], [`ClassDef::default_values`]
//!    and [`ClassDef::present_attributes`].
//!
//! ## Inheritance
//!
//! The parent link is explicit and walked until it is absent. Effective
//! defaults are recomputed on every call and never written back:
//!
//! | Query | Inherited? | Order |
//! |-------|------------|-------|
//! | `default_values()` | yes, own value wins | parent-first |
//! | `attributes()` | yes | keys of `default_values()` |
//! | `present_attributes()` | **no** | declaration order |
//!
//! Parent-first means inherited names come in the parent's order, followed by
//! names new to this class in declaration order. Re-declaring an inherited
//! name keeps the inherited position.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use tracing::debug;

use crate::accessor::Accessor;
use crate::coercion::{CoercionGateway, StandardGateway};
use crate::declaration::{AttrOptions, AttributeDeclaration};
use crate::registry::ClassRegistry;
use crate::types::AttrType;
use crate::value::Value;

/// Shared handle to a frozen class.
pub type ClassRef = Arc<ClassDef>;

pub struct ClassDef {
    name: String,
    parent: Option<ClassRef>,
    registry: ClassRegistry,
    accessors: IndexMap<String, Accessor>,
    gateway: Arc<dyn CoercionGateway>,
}

impl ClassDef {
    /// Start declaring a class.
    pub fn builder(name: impl Into<String>) -> ClassBuilder {
        ClassBuilder {
            name: name.into(),
            parent: None,
            registry: ClassRegistry::new(),
            gateway: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<&ClassRef> {
        self.parent.as_ref()
    }

    /// This class's own registry (no inherited entries).
    pub fn registry(&self) -> &ClassRegistry {
        &self.registry
    }

    pub fn gateway(&self) -> &Arc<dyn CoercionGateway> {
        &self.gateway
    }

    /// Check if this class is `other` or descends from it.
    pub fn is_a(&self, other: &ClassDef) -> bool {
        let mut current = Some(self);
        while let Some(class) = current {
            if std::ptr::eq(class, other) {
                return true;
            }
            current = class.parent.as_deref();
        }
        false
    }

    /// Effective defaults: the parent's effective defaults overlaid with this
    /// class's own, own values winning on collision.
    pub fn default_values(&self) -> IndexMap<String, Value> {
        let mut merged = match &self.parent {
            Some(parent) => parent.default_values(),
            None => IndexMap::new(),
        };
        for (name, value) in self.registry.own_defaults() {
            // Overwriting an existing key keeps its position
            merged.insert(name.clone(), value.clone());
        }
        merged
    }

    /// All attribute names, own and inherited, parent-first.
    pub fn attributes(&self) -> Vec<String> {
        self.default_values().into_keys().collect()
    }

    /// Names this class itself marks as required. Not inherited.
    pub fn present_attributes(&self) -> Vec<String> {
        self.registry.present_names().to_vec()
    }

    /// Accessor for an attribute, own or inherited.
    pub fn accessor(&self, name: &str) -> Option<&Accessor> {
        self.accessors.get(name)
    }

    /// Accessors in slot order.
    pub fn accessors(&self) -> impl Iterator<Item = &Accessor> {
        self.accessors.values()
    }

    /// The declaration in effect for a name: own first, then the nearest ancestor's.
    pub fn declaration(&self, name: &str) -> Option<&Arc<AttributeDeclaration>> {
        self.accessor(name).map(Accessor::declaration)
    }

    pub(crate) fn slot_count(&self) -> usize {
        self.accessors.len()
    }
}

impl fmt::Debug for ClassDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassDef")
            .field("name", &self.name)
            .field("parent", &self.parent.as_ref().map(|p| p.name()))
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

/// Declarative phase of a class.
pub struct ClassBuilder {
    name: String,
    parent: Option<ClassRef>,
    registry: ClassRegistry,
    gateway: Option<Arc<dyn CoercionGateway>>,
}

impl ClassBuilder {
    /// Set the parent class.
    pub fn extends(mut self, parent: &ClassRef) -> Self {
        self.parent = Some(Arc::clone(parent));
        self
    }

    /// Declare an attribute. Declaring a name twice keeps the last declaration.
    pub fn attribute(mut self, name: impl Into<String>, ty: AttrType, options: AttrOptions) -> Self {
        let name = name.into();
        debug!(class = %self.name, attribute = %name, ty = %ty, "declared attribute");
        self.registry.declare(name, ty, options);
        self
    }

    /// Re-declare an attribute the parent already has.
    ///
    /// Same as [`attribute`](Self::attribute), but a name no ancestor
    /// declares is a bug in the class definition: it panics in debug builds.
    pub fn redeclare(self, name: impl Into<String>, ty: AttrType, options: AttrOptions) -> Self {
        let name = name.into();
        debug_assert!(
            self.parent
                .as_ref()
                .is_some_and(|parent| parent.accessor(&name).is_some()),
            "`{name}` is not inherited by {}",
            self.name
        );
        self.attribute(name, ty, options)
    }

    /// Use a specific coercion gateway for this class (and subclasses that
    /// don't set their own).
    pub fn gateway(mut self, gateway: Arc<dyn CoercionGateway>) -> Self {
        self.gateway = Some(gateway);
        self
    }

    /// Freeze the class and synthesize its accessors.
    pub fn build(self) -> ClassRef {
        let ClassBuilder {
            name,
            parent,
            registry,
            gateway,
        } = self;

        let mut accessors = parent
            .as_ref()
            .map(|p| p.accessors.clone())
            .unwrap_or_default();

        for declaration in registry.declarations() {
            let slot = accessors
                .get_index_of(declaration.name())
                .unwrap_or(accessors.len());
            accessors.insert(
                declaration.name().to_string(),
                Accessor::synthesize(slot, Arc::clone(declaration)),
            );
        }

        let gateway: Arc<dyn CoercionGateway> = match gateway {
            Some(gateway) => gateway,
            None => match &parent {
                Some(parent) => Arc::clone(&parent.gateway),
                None => Arc::new(StandardGateway::default()),
            },
        };

        debug!(
            class = %name,
            parent = parent.as_ref().map(|p| p.name()),
            attributes = accessors.len(),
            "class frozen"
        );

        Arc::new(ClassDef {
            name,
            parent,
            registry,
            accessors,
            gateway,
        })
    }
}
