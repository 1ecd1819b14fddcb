use thiserror::Error;

/// Failure raised by a coercion gateway.
///
/// Setters return these unchanged.
#[derive(Error, Debug)]
pub enum CoercionError {
    #[error("nil is not allowed for {target}")]
    NilNotAllowed { target: String },

    #[error("cannot coerce {kind} into {target}")]
    Unsupported { kind: &'static str, target: String },

    #[error("invalid {target} value: {input}")]
    InvalidFormat { target: String, input: String },

    #[error("element {index}: {source}")]
    Element {
        index: usize,
        #[source]
        source: Box<CoercionError>,
    },

    #[error("nested {class}: {source}")]
    Nested {
        class: String,
        #[source]
        source: Box<Error>,
    },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Coercion error: {0}")]
    Coercion(#[from] CoercionError),

    #[error("Unknown attribute `{attribute}` for {class}")]
    UnknownAttribute { class: String, attribute: String },

    #[error("Missing required attributes for {class}: {}", .names.join(", "))]
    MissingAttributes { class: String, names: Vec<String> },

    #[error("Config error: {0}")]
    Config(#[from] confique::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
