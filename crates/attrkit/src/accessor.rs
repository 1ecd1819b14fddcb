//! Getter/setter pairs synthesized from declarations.
//!
//! An [`Accessor`] binds one [`AttributeDeclaration`] to a slot index in the
//! instance layout. Getting is a plain read. Setting follows one rule:
//!
//! - value already satisfies the declared type, and the type is not a
//!   sequence: store it unchanged
//! - otherwise: hand it to the class's gateway with the stripped options and
//!   store whatever comes back
//!
//! Sequences always go through the gateway so element coercion runs even when
//! the container is already a sequence. Either way the dedicated slot and the
//! generic attribute map are written with the same value.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::declaration::AttributeDeclaration;
use crate::error::CoercionError;
use crate::instance::Instance;
use crate::value::Value;

#[derive(Debug, Clone)]
pub struct Accessor {
    slot: usize,
    declaration: Arc<AttributeDeclaration>,
}

impl Accessor {
    pub(crate) fn synthesize(slot: usize, declaration: Arc<AttributeDeclaration>) -> Self {
        Self { slot, declaration }
    }

    pub fn name(&self) -> &str {
        self.declaration.name()
    }

    /// Index of the dedicated slot in every instance of the class.
    pub fn slot(&self) -> usize {
        self.slot
    }

    pub fn declaration(&self) -> &Arc<AttributeDeclaration> {
        &self.declaration
    }

    /// Read the dedicated slot.
    pub fn get<'a>(&self, instance: &'a Instance) -> &'a Value {
        instance.slot(self.slot)
    }

    /// Assign a value, coercing it when it does not already satisfy the type.
    ///
    /// Gateway errors are returned unchanged and leave the instance untouched.
    pub fn set(&self, instance: &mut Instance, value: Value) -> Result<(), CoercionError> {
        let ty = self.declaration.ty();

        let stored = if !ty.is_sequence() && ty.is_satisfied_by(&value) {
            trace!(attribute = %self.name(), "assigned without coercion");
            value
        } else {
            let gateway = Arc::clone(instance.class().gateway());
            trace!(attribute = %self.name(), ty = %ty, input = value.kind_name(), "coercing");
            gateway
                .coerce(ty, value, self.declaration.coercion_options())
                .inspect_err(|err| {
                    debug!(
                        class = %instance.class().name(),
                        attribute = %self.name(),
                        error = %err,
                        "coercion failed"
                    );
                })?
        };

        instance.write_slot(self.slot, self.name(), stored);
        Ok(())
    }
}
