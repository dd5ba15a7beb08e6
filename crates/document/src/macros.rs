//! Declarative macros that generate mapping impls.

/// Declare a fieldless enum stored in documents by ordinal.
///
/// Reading accepts the ordinal, the ordinal as a string, or the variant name.
/// The first variant is the `Default`.
///
/// ```
/// use arango_document::{document_enum, Document};
///
/// document_enum! {
///     pub enum CollectionType {
///         Document = 2,
///         Edge = 3,
///     }
/// }
///
/// let doc: Document = r#"{"type":3,"kind":"Document"}"#.parse().unwrap();
/// assert_eq!(doc.get_field::<CollectionType>("type").unwrap(), CollectionType::Edge);
/// assert_eq!(doc.get_field::<CollectionType>("kind").unwrap(), CollectionType::Document);
/// ```
#[macro_export]
macro_rules! document_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(#[$first_meta:meta])*
            $first:ident = $first_ordinal:literal
            $(, $(#[$variant_meta:meta])* $variant:ident = $ordinal:literal)*
            $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        $vis enum $name {
            $(#[$first_meta])*
            $first,
            $($(#[$variant_meta])* $variant,)*
        }

        impl ::std::default::Default for $name {
            fn default() -> Self {
                $name::$first
            }
        }

        impl $crate::Enumerant for $name {
            const NAME: &'static str = stringify!($name);
            const VARIANTS: &'static [(&'static str, i64, Self)] = &[
                (stringify!($first), $first_ordinal, $name::$first),
                $((stringify!($variant), $ordinal, $name::$variant),)*
            ];

            fn ordinal(&self) -> i64 {
                match self {
                    $name::$first => $first_ordinal,
                    $($name::$variant => $ordinal,)*
                }
            }

            fn name(&self) -> &'static str {
                match self {
                    $name::$first => stringify!($first),
                    $($name::$variant => stringify!($variant),)*
                }
            }
        }

        impl $crate::FromValue for $name {
            fn shape() -> $crate::Shape {
                $crate::Shape::Enum
            }

            fn from_value(
                value: &$crate::Value,
                _depth: $crate::Depth,
            ) -> ::std::result::Result<Self, $crate::DocumentError> {
                $crate::coerce::enumerant_from_value(value)
            }
        }

        impl $crate::ToValue for $name {
            fn to_value(
                &self,
                _depth: $crate::Depth,
            ) -> ::std::result::Result<$crate::Value, $crate::DocumentError> {
                Ok($crate::Value::Integer($crate::Enumerant::ordinal(self)))
            }
        }
    };
}

/// Implement [`Mapped`](crate::Mapped) for a struct with named fields.
///
/// Every listed field becomes a descriptor named after the field. Options:
/// `#[alias = "..."]` stores the field under another name or a dotted path,
/// `#[skip]` keeps the descriptor but never reads or writes it. Fields that
/// are not listed are ignored by the mapper.
///
/// The struct also gets [`FromValue`](crate::FromValue) and
/// [`ToValue`](crate::ToValue), so it can be nested in other mapped structs
/// and collections.
///
/// ```
/// use arango_document::{mapped, Document};
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Person {
///     name: String,
///     age: i64,
///     tags: Vec<String>,
///     j: i64,
///     cache: String,
/// }
///
/// mapped!(Person {
///     name,
///     age,
///     tags,
///     #[alias = "a.j"]
///     j,
///     #[skip]
///     cache,
/// });
///
/// let doc: Document = r#"{"name":"Ann","age":41,"tags":["x"],"a":{"j":1}}"#.parse().unwrap();
/// let person: Person = doc.to_typed().unwrap();
/// assert_eq!(person.j, 1);
/// assert_eq!(Document::from_typed(&person).unwrap().int("a.j").unwrap(), 1);
/// ```
#[macro_export]
macro_rules! mapped {
    ($ty:ty { $( $(#[$opt:ident $(= $val:expr)?])* $field:ident ),* $(,)? }) => {
        impl $crate::Mapped for $ty {
            fn descriptors() -> &'static [$crate::FieldDescriptor<Self>] {
                static FIELDS: ::std::sync::OnceLock<::std::vec::Vec<$crate::FieldDescriptor<$ty>>> =
                    ::std::sync::OnceLock::new();
                FIELDS.get_or_init(|| {
                    ::std::vec![
                        $(
                            $crate::FieldDescriptor::new(
                                stringify!($field),
                                |target: &$ty| &target.$field,
                                |target: &mut $ty| &mut target.$field,
                            )
                            $( .$opt($($val)?) )*
                        ),*
                    ]
                })
            }
        }

        impl $crate::FromValue for $ty {
            fn shape() -> $crate::Shape {
                $crate::Shape::Compound
            }

            fn from_value(
                value: &$crate::Value,
                depth: $crate::Depth,
            ) -> ::std::result::Result<Self, $crate::DocumentError> {
                $crate::mapper::compound_from_value(value, depth)
            }
        }

        impl $crate::ToValue for $ty {
            fn to_value(
                &self,
                depth: $crate::Depth,
            ) -> ::std::result::Result<$crate::Value, $crate::DocumentError> {
                $crate::mapper::compound_to_value(self, depth)
            }
        }
    };
}
