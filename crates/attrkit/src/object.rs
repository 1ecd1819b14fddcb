//! # Declared value objects
//!
//! [`value_object!`](crate::value_object) turns a declaration block into a
//! typed wrapper around an [`Instance`]:
//!
//! ```ignore
//! value_object! {
//!     pub struct Base {
//!         name: AttrType::STRING, opts().default("x").present();
//!     }
//! }
//!
//! value_object! {
//!     pub struct Child extends Base(BaseAttributes) {
//!         age: AttrType::INT, opts().default(0);
//!         tags: AttrType::Sequence, opts().of(AttrType::SYMBOL);
//!     }
//! }
//!
//! let mut child = Child::new()?;
//! child.set_age("41")?;          // coerced to Int(41)
//! assert_eq!(child.name(), &Value::from("x"));
//! ```
//!
//! The macro generates:
//!
//! - the struct itself, a newtype over [`Instance`]
//! - a [`ValueObject`] impl whose class is built once, on first use, from the
//!   declaration list (the static metadata table)
//! - a `<Name>Attributes` trait with one getter `field()` and one setter
//!   `set_field(value)` per declared attribute, implemented for the struct
//!
//! A subclass names its parent and the accessor traits it should pick up:
//! `extends Parent(ParentAttributes, GrandparentAttributes)`. Inherited names
//! re-declared by a subclass go in a trailing `overrides { .. }` block: they
//! change the class's declaration but reuse the inherited getter and setter.
//! Only inherited names belong there; any other name panics in debug builds
//! when the class is first built.
//! Setters dispatch through the instance's own class, so an overridden
//! attribute is coerced with the subclass's declaration.

use indexmap::IndexMap;

use crate::class::ClassRef;
use crate::error::{Error, Result};
use crate::instance::Instance;
use crate::types::AttrType;
use crate::value::{Value, NIL};

pub trait ValueObject: Sized {
    /// The frozen class shared by every instance of this type.
    fn class() -> &'static ClassRef;

    /// Wrap an instance of [`Self::class`] without checking it.
    fn wrap(instance: Instance) -> Self;

    fn instance(&self) -> &Instance;

    fn instance_mut(&mut self) -> &mut Instance;

    /// Create a value object with every attribute at its default.
    fn new() -> Result<Self> {
        Instance::new(Self::class()).map(Self::wrap)
    }

    /// Create a value object from defaults plus the given assignments.
    fn from_attributes<I, K, V>(input: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Instance::with_attributes(Self::class(), input).map(Self::wrap)
    }

    /// Wrap an instance if its class is this type's class or a subclass of it.
    fn try_from_instance(instance: Instance) -> Option<Self> {
        if instance.class().is_a(Self::class()) {
            Some(Self::wrap(instance))
        } else {
            None
        }
    }

    /// All attribute names, own and inherited.
    fn attributes() -> Vec<String> {
        Self::class().attributes()
    }

    /// Effective defaults.
    fn default_values() -> IndexMap<String, Value> {
        Self::class().default_values()
    }

    /// Names this type itself marks as required.
    fn present_attributes() -> Vec<String> {
        Self::class().present_attributes()
    }

    /// The declared type of this value object, for nesting it in another.
    fn attr_type() -> AttrType {
        AttrType::object(Self::class())
    }

    fn validate(&self) -> Result<()> {
        self.instance().validate()
    }

    /// Read through the instance's accessor. Used by generated getters.
    fn read(&self, name: &str) -> &Value {
        self.instance().get(name).unwrap_or(&NIL)
    }

    /// Write through the instance's accessor. Used by generated setters.
    ///
    /// Gateway failures come back as [`Error::Coercion`]. A name the
    /// instance's class never declared (an accessor trait listed in `extends`
    /// that is not from an ancestor) is [`Error::UnknownAttribute`].
    fn write(&mut self, name: &str, value: Value) -> Result<()> {
        let class = std::sync::Arc::clone(self.instance().class());
        let accessor = class.accessor(name).ok_or_else(|| Error::UnknownAttribute {
            class: class.name().to_string(),
            attribute: name.to_string(),
        })?;
        accessor.set(self.instance_mut(), value)?;
        Ok(())
    }
}

/// Declare a value object type. See the [module docs](crate::object).
#[macro_export]
macro_rules! value_object {
    (@options) => {
        $crate::AttrOptions::new()
    };
    (@options $opts:expr) => {
        $opts
    };
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident $(extends $parent:ident ( $($inherited:path),* $(,)? ))? {
            $(
                $(#[$field_meta:meta])*
                $field:ident : $ty:expr $(, $opts:expr)? ;
            )*
        }
        $(overrides {
            $(
                $override_field:ident : $override_ty:expr $(, $override_opts:expr)? ;
            )*
        })?
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        $vis struct $name($crate::Instance);

        impl $crate::ValueObject for $name {
            fn class() -> &'static $crate::ClassRef {
                static CLASS: $crate::__private::Lazy<$crate::ClassRef> =
                    $crate::__private::Lazy::new(|| {
                        let builder = $crate::ClassDef::builder(stringify!($name));
                        $(
                            let builder = builder
                                .extends(<$parent as $crate::ValueObject>::class());
                        )?
                        builder
                            $(
                                .attribute(
                                    stringify!($field),
                                    $ty,
                                    $crate::value_object!(@options $($opts)?),
                                )
                            )*
                            $($(
                                .redeclare(
                                    stringify!($override_field),
                                    $override_ty,
                                    $crate::value_object!(@options $($override_opts)?),
                                )
                            )*)?
                            .build()
                    });
                &CLASS
            }

            fn wrap(instance: $crate::Instance) -> Self {
                Self(instance)
            }

            fn instance(&self) -> &$crate::Instance {
                &self.0
            }

            fn instance_mut(&mut self) -> &mut $crate::Instance {
                &mut self.0
            }
        }

        $crate::__private::paste! {
            #[doc = concat!("Accessors for the attributes declared on [`", stringify!($name), "`].")]
            $vis trait [<$name Attributes>]: $crate::ValueObject {
                $(
                    $(#[$field_meta])*
                    fn $field(&self) -> &$crate::Value {
                        self.read(stringify!($field))
                    }

                    #[doc = concat!("Assign `", stringify!($field), "`, coercing to its declared type.")]
                    fn [<set_ $field>](
                        &mut self,
                        value: impl Into<$crate::Value>,
                    ) -> $crate::Result<()> {
                        self.write(stringify!($field), value.into())
                    }
                )*
            }

            impl [<$name Attributes>] for $name {}

            $($(
                impl $inherited for $name {}
            )*)?
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declaration::opts;
    use crate::error::CoercionError;

    crate::value_object! {
        /// A labelled point.
        struct Point {
            label: AttrType::STRING, opts().default("origin").present();
            x: AttrType::INT, opts().default(0);
            y: AttrType::INT, opts().default(0);
        }
    }

    crate::value_object! {
        struct Pixel extends Point(PointAttributes) {
            color: AttrType::SYMBOL, opts().default("black");
        }
        overrides {
            x: AttrType::FLOAT;
        }
    }

    crate::value_object! {
        struct Tag {
            text: AttrType::STRING;
        }
    }

    // Picks up Point's accessors without descending from Point
    crate::value_object! {
        struct Stray extends Tag(PointAttributes) {}
    }

    #[test]
    fn generated_accessors_read_defaults() {
        let point = Point::new().unwrap();
        assert_eq!(point.label(), &Value::from("origin"));
        assert_eq!(point.x(), &Value::Int(0));
    }

    #[test]
    fn generated_setter_coerces() {
        let mut point = Point::new().unwrap();
        point.set_x("12").unwrap();
        assert_eq!(point.x(), &Value::Int(12));
        assert_eq!(point.instance().attributes()["x"], Value::Int(12));
    }

    #[test]
    fn generated_setter_propagates_errors() {
        let mut point = Point::new().unwrap();
        let err = point.set_y("up").unwrap_err();
        assert!(matches!(
            err,
            Error::Coercion(CoercionError::InvalidFormat { .. })
        ));
        assert_eq!(point.y(), &Value::Int(0));
    }

    #[test]
    fn class_is_built_once() {
        assert!(std::sync::Arc::ptr_eq(Point::class(), Point::class()));
        assert_eq!(Point::class().name(), "Point");
    }

    #[test]
    fn subclass_introspection() {
        assert_eq!(Pixel::attributes(), vec!["label", "x", "y", "color"]);
        assert!(Pixel::present_attributes().is_empty());
        assert_eq!(Point::present_attributes(), vec!["label"]);
        // Re-declared x has no default of its own
        assert_eq!(Pixel::default_values()["x"], Value::Nil);
        assert_eq!(Pixel::default_values()["color"], Value::from("black"));
    }

    #[test]
    fn inherited_setter_uses_subclass_declaration() {
        let mut pixel = Pixel::new().unwrap();
        pixel.set_x(3).unwrap();
        pixel.set_label("corner").unwrap();

        assert_eq!(pixel.x(), &Value::Float(3.0));
        assert_eq!(pixel.label(), &Value::from("corner"));
        assert_eq!(pixel.color(), &Value::symbol("black"));
    }

    #[test]
    fn try_from_instance_checks_lineage() {
        let pixel = Pixel::new().unwrap();
        assert!(Point::try_from_instance(pixel.instance().clone()).is_some());

        let point = Point::new().unwrap();
        assert!(Pixel::try_from_instance(point.instance().clone()).is_none());
    }

    #[test]
    fn setter_outside_the_hierarchy_is_unknown_attribute() {
        let mut stray = Stray::new().unwrap();

        let err = stray.set_x(1).unwrap_err();
        assert!(matches!(
            err,
            Error::UnknownAttribute { ref class, ref attribute } if class == "Stray" && attribute == "x"
        ));
        assert_eq!(stray.x(), &Value::Nil);
    }

    #[test]
    fn validate_uses_own_presence() {
        let mut point = Point::new().unwrap();
        point.set_label("").unwrap();
        assert!(point.validate().is_err());
    }
}
