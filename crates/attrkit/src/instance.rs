//! Instance state.
//!
//! An [`Instance`] owns one dedicated slot per effective attribute of its
//! class plus a generic name → value map. Both are written together by
//! [`Accessor::set`](crate::Accessor::set), so the map always equals the
//! union of the slots.
//!
//! Construction applies the class's effective defaults. Each default is
//! cloned into the new instance, so instances never share a default object.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::class::ClassRef;
use crate::error::{Error, Result};
use crate::value::{Value, NIL};

#[derive(Clone)]
pub struct Instance {
    class: ClassRef,
    slots: Vec<Value>,
    attributes: IndexMap<String, Value>,
}

impl Instance {
    /// Create an instance with every attribute set to its effective default.
    ///
    /// Non-nil defaults are assigned through the setters, so they are coerced
    /// like any other value. Nil defaults are stored as nil.
    pub fn new(class: &ClassRef) -> Result<Self> {
        let mut instance = Self::blank(class);
        for (name, default) in class.default_values() {
            if default.is_nil() {
                continue;
            }
            if let Some(accessor) = class.accessor(&name) {
                accessor.set(&mut instance, default)?;
            }
        }
        Ok(instance)
    }

    /// Create an instance from defaults, then assign each input entry in order.
    ///
    /// Fails on the first unknown name or coercion error.
    pub fn with_attributes<I, K, V>(class: &ClassRef, input: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let mut instance = Self::new(class)?;
        for (name, value) in input {
            let name: String = name.into();
            instance.set(name, value)?;
        }
        Ok(instance)
    }

    /// All slots nil, map entries present for every attribute.
    fn blank(class: &ClassRef) -> Self {
        let attributes = class
            .accessors()
            .map(|accessor| (accessor.name().to_string(), Value::Nil))
            .collect();
        Self {
            class: Arc::clone(class),
            slots: vec![Value::Nil; class.slot_count()],
            attributes,
        }
    }

    pub fn class(&self) -> &ClassRef {
        &self.class
    }

    /// Read an attribute through its accessor.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.class.accessor(name).map(|accessor| accessor.get(self))
    }

    /// Assign an attribute through its accessor.
    pub fn set(&mut self, name: impl AsRef<str>, value: impl Into<Value>) -> Result<()> {
        let name = name.as_ref();
        let class = Arc::clone(&self.class);
        let accessor = class.accessor(name).ok_or_else(|| Error::UnknownAttribute {
            class: class.name().to_string(),
            attribute: name.to_string(),
        })?;
        accessor.set(self, value.into())?;
        Ok(())
    }

    /// The generic attribute map, in slot order.
    pub fn attributes(&self) -> &IndexMap<String, Value> {
        &self.attributes
    }

    pub fn into_attributes(self) -> IndexMap<String, Value> {
        self.attributes
    }

    /// Check the class's own presence list.
    ///
    /// An attribute is missing when its value [is blank](Value::is_blank).
    /// Presence marks on ancestors are not consulted.
    pub fn validate(&self) -> Result<()> {
        let missing: Vec<String> = self
            .class
            .present_attributes()
            .into_iter()
            .filter(|name| self.get(name).map_or(true, Value::is_blank))
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::MissingAttributes {
                class: self.class.name().to_string(),
                names: missing,
            })
        }
    }

    pub(crate) fn slot(&self, slot: usize) -> &Value {
        self.slots.get(slot).unwrap_or(&NIL)
    }

    /// Write the dedicated slot and the generic map entry together.
    pub(crate) fn write_slot(&mut self, slot: usize, name: &str, value: Value) {
        match self.attributes.get_mut(name) {
            Some(entry) => *entry = value.clone(),
            None => {
                self.attributes.insert(name.to_string(), value.clone());
            }
        }
        if let Some(target) = self.slots.get_mut(slot) {
            *target = value;
        }
    }
}

impl PartialEq for Instance {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.class, &other.class) && self.attributes == other.attributes
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("class", &self.class.name())
            .field("attributes", &self.attributes)
            .finish()
    }
}
