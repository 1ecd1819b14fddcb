//! Attribute declarations and their options.
//!
//! An [`AttributeDeclaration`] is the immutable record of one `attribute`
//! call: name, declared type and [`AttrOptions`]. The options the coercion
//! gateway sees are a separate type, [`CoercionOptions`], which has no slot
//! for `default` or `present`; the strip happens once, when the declaration
//! is created.

use indexmap::IndexMap;

use crate::types::AttrType;
use crate::value::Value;

/// Options given when declaring an attribute.
///
/// Built with chained setters, in the same style as the attribute specs:
///
/// ```ignore
/// opts().default("x").present()
/// opts().of(AttrType::INT).allow_nil()
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttrOptions {
    /// Default value, stored as given.
    pub default: Option<Value>,

    /// Element type for sequence attributes.
    pub element_type: Option<AttrType>,

    /// Whether a nil assignment is stored as nil instead of failing.
    pub allow_nil: bool,

    /// Whether the declaring class marks this attribute as required.
    ///
    /// Presence is local to the declaring class; subclasses do not inherit it.
    pub present: bool,

    /// Gateway-specific options, passed through untouched.
    pub extra: IndexMap<String, Value>,
}

/// Start an empty options bag.
pub fn opts() -> AttrOptions {
    AttrOptions::new()
}

impl AttrOptions {
    pub fn new() -> Self {
        <Self as Default>::default()
    }

    /// Set the default value.
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Set the element type of a sequence.
    pub fn of(mut self, element_type: AttrType) -> Self {
        self.element_type = Some(element_type);
        self
    }

    /// Set the allow_nil flag.
    pub fn allow_nil(mut self) -> Self {
        self.allow_nil = true;
        self
    }

    /// Set the present flag.
    pub fn present(mut self) -> Self {
        self.present = true;
        self
    }

    /// Add a gateway-specific option.
    pub fn option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// The options forwarded to the gateway: everything except `default` and `present`.
    pub fn coercion_options(&self) -> CoercionOptions {
        CoercionOptions {
            element_type: self.element_type.clone(),
            allow_nil: self.allow_nil,
            extra: self.extra.clone(),
        }
    }
}

/// Options received by a [`CoercionGateway`](crate::CoercionGateway).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoercionOptions {
    /// Per-element target type when coercing a sequence.
    pub element_type: Option<AttrType>,

    /// When true, nil input is returned as nil instead of failing.
    pub allow_nil: bool,

    /// Type-specific options, opaque to the registry.
    pub extra: IndexMap<String, Value>,
}

impl CoercionOptions {
    /// Look up a gateway-specific option.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }
}

/// A single registered attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeDeclaration {
    name: String,
    ty: AttrType,
    options: AttrOptions,
    coercion: CoercionOptions,
}

impl AttributeDeclaration {
    pub fn new(name: impl Into<String>, ty: AttrType, options: AttrOptions) -> Self {
        let coercion = options.coercion_options();
        Self {
            name: name.into(),
            ty,
            options,
            coercion,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &AttrType {
        &self.ty
    }

    pub fn options(&self) -> &AttrOptions {
        &self.options
    }

    /// The stripped options handed to the gateway on a coercing assignment.
    pub fn coercion_options(&self) -> &CoercionOptions {
        &self.coercion
    }
}
