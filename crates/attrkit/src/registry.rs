//! Per-class attribute registry.
//!
//! A [`ClassRegistry`] is built incrementally while a class is being declared.
//! It keeps three things, all local to the one class:
//!
//! - **own defaults**: name → default value, in first-declaration order
//! - **presence list**: names this class marks as required
//! - **declarations**: name → [`AttributeDeclaration`], used to synthesize accessors
//!
//! Inherited attributes never appear here; see
//! [`ClassDef::default_values`](crate::ClassDef::default_values) for the merge.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::declaration::{AttrOptions, AttributeDeclaration};
use crate::types::AttrType;
use crate::value::Value;

#[derive(Debug, Clone, Default)]
pub struct ClassRegistry {
    own_defaults: IndexMap<String, Value>,
    present_names: Vec<String>,
    declarations: IndexMap<String, Arc<AttributeDeclaration>>,
}

impl ClassRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an attribute, overwriting any earlier declaration of the same name.
    ///
    /// The default is `options.default` when given; otherwise an empty sequence
    /// for sequence types and nil for everything else. A re-declared name keeps
    /// its original position. The presence list only ever grows.
    pub fn declare(&mut self, name: impl Into<String>, ty: AttrType, options: AttrOptions) {
        let name = name.into();

        let default = match &options.default {
            Some(value) => value.clone(),
            None if ty.is_sequence() => Value::Sequence(Vec::new()),
            None => Value::Nil,
        };
        self.own_defaults.insert(name.clone(), default);

        if options.present && !self.present_names.contains(&name) {
            self.present_names.push(name.clone());
        }

        let declaration = AttributeDeclaration::new(name.clone(), ty, options);
        self.declarations.insert(name, Arc::new(declaration));
    }

    /// Names declared directly on this class, in declaration order.
    pub fn own_attribute_names(&self) -> impl Iterator<Item = &str> {
        self.own_defaults.keys().map(String::as_str)
    }

    pub fn own_defaults(&self) -> &IndexMap<String, Value> {
        &self.own_defaults
    }

    pub fn present_names(&self) -> &[String] {
        &self.present_names
    }

    pub fn declaration(&self, name: &str) -> Option<&Arc<AttributeDeclaration>> {
        self.declarations.get(name)
    }

    pub fn declarations(&self) -> impl Iterator<Item = &Arc<AttributeDeclaration>> {
        self.declarations.values()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}
