//! # Coercion Gateway
//!
//! Setters that receive a value not already satisfying the declared type hand
//! it to a [`CoercionGateway`]. The gateway either returns a value of the
//! target type or fails with a [`CoercionError`]; the setter stores the result
//! or propagates the error unchanged.
//!
//! [`StandardGateway`] is installed on every root class unless the builder
//! sets another one, and subclasses inherit their parent's gateway.
//!
//! ## Standard Rules
//!
//! | Target | Accepts |
//! |--------|---------|
//! | `Int` | Int, whole Float, numeric text |
//! | `Float` | Float, Int, numeric text |
//! | `Bool` | Bool, Int 0/1, configured true/false spellings |
//! | `String` | String, Symbol, Int, Float, Bool, Time |
//! | `Symbol` | Symbol, non-empty text |
//! | `Time` | Time, RFC 3339 text (or `format` option), Int Unix seconds |
//! | `Sequence` | Sequence (elements coerced to `element_type`), scalars if `wrap_scalars` |
//! | `Mapping` | Mapping, nested objects (their attribute map) |
//! | `Object` | instances of the class or a subclass, mappings (built into one) |
//! | `Any` | everything |
//!
//! Nil is returned as nil when `allow_nil` is set (and always for `Any`);
//! otherwise it fails with [`CoercionError::NilNotAllowed`].

mod primitive;

use tracing::trace;

use crate::class::ClassRef;
use crate::config::CoercionConfig;
use crate::declaration::CoercionOptions;
use crate::error::CoercionError;
use crate::instance::Instance;
use crate::types::AttrType;
use crate::value::Value;

/// Converts arbitrary input into a declared type.
pub trait CoercionGateway: Send + Sync {
    fn coerce(
        &self,
        ty: &AttrType,
        value: Value,
        options: &CoercionOptions,
    ) -> Result<Value, CoercionError>;
}

#[derive(Debug, Clone, Default)]
pub struct StandardGateway {
    config: CoercionConfig,
}

impl StandardGateway {
    pub fn new(config: CoercionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CoercionConfig {
        &self.config
    }

    fn coerce_sequence(
        &self,
        value: Value,
        options: &CoercionOptions,
    ) -> Result<Value, CoercionError> {
        let items = match value {
            Value::Sequence(items) => items,
            other if self.config.wrap_scalars => vec![other],
            other => return Err(unsupported(&other, &AttrType::Sequence)),
        };

        let Some(element_type) = &options.element_type else {
            return Ok(Value::Sequence(items));
        };

        // Elements never inherit allow_nil; gateway-specific options do carry over
        let element_options = CoercionOptions {
            element_type: None,
            allow_nil: false,
            extra: options.extra.clone(),
        };

        items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                if !element_type.is_sequence() && element_type.is_satisfied_by(&item) {
                    return Ok(item);
                }
                self.coerce(element_type, item, &element_options)
                    .map_err(|source| CoercionError::Element {
                        index,
                        source: Box::new(source),
                    })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Sequence)
    }
}

impl CoercionGateway for StandardGateway {
    fn coerce(
        &self,
        ty: &AttrType,
        value: Value,
        options: &CoercionOptions,
    ) -> Result<Value, CoercionError> {
        trace!(ty = %ty, input = value.kind_name(), "standard coercion");

        if value.is_nil() {
            return if options.allow_nil || matches!(ty, AttrType::Any) {
                Ok(Value::Nil)
            } else {
                Err(CoercionError::NilNotAllowed {
                    target: ty.to_string(),
                })
            };
        }

        match ty {
            AttrType::Primitive(target) => {
                primitive::coerce(*target, value, options, &self.config)
            }
            AttrType::Sequence => self.coerce_sequence(value, options),
            AttrType::Mapping => coerce_mapping(value),
            AttrType::Object(class) => coerce_object(class, value),
            AttrType::Any => Ok(value),
        }
    }
}

fn coerce_mapping(value: Value) -> Result<Value, CoercionError> {
    match value {
        Value::Mapping(map) => Ok(Value::Mapping(map)),
        Value::Object(instance) => Ok(Value::Mapping(instance.into_attributes())),
        other => Err(unsupported(&other, &AttrType::Mapping)),
    }
}

fn coerce_object(class: &ClassRef, value: Value) -> Result<Value, CoercionError> {
    match value {
        Value::Object(instance) if instance.class().is_a(class) => Ok(Value::Object(instance)),
        Value::Mapping(map) => Instance::with_attributes(class, map)
            .map(Value::from)
            .map_err(|source| CoercionError::Nested {
                class: class.name().to_string(),
                source: Box::new(source),
            }),
        other => Err(unsupported(&other, &AttrType::Object(class.clone()))),
    }
}

pub(crate) fn unsupported(value: &Value, target: &AttrType) -> CoercionError {
    CoercionError::Unsupported {
        kind: value.kind_name(),
        target: target.to_string(),
    }
}
