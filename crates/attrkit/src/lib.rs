//! # attrkit
//!
//! Declare, once per class, the named and typed attributes a value object
//! carries, with defaults and a coercion policy applied on every assignment.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Declaration (object.rs, value_object! macro)               │
//! │  - Static metadata table per type, built on first use       │
//! │  - Compile-checked getter/setter per attribute              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Classes (class.rs, registry.rs, accessor.rs)               │
//! │  - Per-class registry: own defaults, presence list          │
//! │  - Inheritance merge, recomputed on every introspection     │
//! │  - Accessors: fast path or coerce, then dual write          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Instances (instance.rs)                                    │
//! │  - Dedicated slots + generic attribute map                  │
//! │  - Defaults applied at construction, presence validation    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Coercion Gateway (coercion/)                               │
//! │  - Trait seam; StandardGateway driven by CoercionConfig     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Rules
//!
//! - A later declaration of the same name replaces the earlier one.
//! - Own defaults win over inherited ones; presence marks are never inherited.
//! - `attributes()` is parent-first: inherited names in the parent's order,
//!   then new names in declaration order.
//! - The gateway never sees `default` or `present`; [`CoercionOptions`] has no
//!   field for them.
//! - Sequences always go through the gateway so their elements get coerced.
//!
//! ## Module Overview
//!
//! - [`value`]: the closed [`Value`] set
//! - [`types`]: declared types ([`AttrType`], [`Primitive`])
//! - [`declaration`]: [`AttrOptions`] and [`AttributeDeclaration`]
//! - [`registry`]: [`ClassRegistry`]
//! - [`class`]: [`ClassDef`], [`ClassBuilder`], inheritance merge
//! - [`accessor`]: [`Accessor`]
//! - [`instance`]: [`Instance`]
//! - [`coercion`]: [`CoercionGateway`], [`StandardGateway`]
//! - [`config`]: [`CoercionConfig`]
//! - [`object`]: [`ValueObject`] and [`value_object!`]

pub mod accessor;
pub mod class;
pub mod coercion;
pub mod config;
pub mod declaration;
pub mod error;
pub mod instance;
pub mod object;
pub mod registry;
pub mod types;
pub mod value;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;

pub use accessor::Accessor;
pub use class::{ClassBuilder, ClassDef, ClassRef};
pub use coercion::{CoercionGateway, StandardGateway};
pub use config::CoercionConfig;
pub use declaration::{opts, AttrOptions, AttributeDeclaration, CoercionOptions};
pub use error::{CoercionError, Error, Result};
pub use instance::Instance;
pub use object::ValueObject;
pub use registry::ClassRegistry;
pub use types::{AttrType, Primitive};
pub use value::Value;

#[doc(hidden)]
pub mod __private {
    pub use once_cell::sync::Lazy;
    pub use paste::paste;
}
