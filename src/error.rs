use thiserror::Error;

use crate::metadata::token::Token;

macro_rules! invalid_metadata {
    // Single string version
    ($msg:expr) => {
        crate::Error::InvalidMetadata {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::InvalidMetadata {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// The taxonomy mirrors the three ways a binding-model analysis can fail:
///
/// - [`Error::UnimplementedHandler`] - a backend did not supply a visitor capability required
///   by dispatch; indicates an incomplete backend rather than bad input.
/// - [`Error::InvalidMetadata`] - the metadata snapshot violates a structural invariant
///   (malformed semantic linkages, parameter flags outside the classification table, ...).
/// - [`Error::TypeNotFound`] / [`Error::UnresolvedReference`] - a token or external reference
///   could not be resolved to a definition; no correct model can be built without it.
///
/// All inputs are pure, deterministic reads of an immutable snapshot, so re-attempting a
/// failed operation cannot change its outcome; there is no retry path.
#[derive(Error, Debug)]
pub enum Error {
    /// A visitor capability required by dispatch was not implemented.
    ///
    /// Surfaced immediately so an incomplete backend fails at analysis time
    /// instead of producing partial output. The associated value names the
    /// missing capability (e.g. `"visit_class"`).
    #[error("Required visitor capability is not implemented - {0}")]
    UnimplementedHandler(&'static str),

    /// The metadata snapshot violates a structural invariant.
    ///
    /// The error includes the source location where the violation was detected,
    /// and the message names the offending type or member so the bad metadata
    /// can be located.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of the violated invariant
    /// * `file` - Source file in which the violation was detected
    /// * `line` - Source line at which the violation was detected
    #[error("Invalid metadata - {file}:{line}: {message}")]
    InvalidMetadata {
        /// The message to be printed for the invalid metadata error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// Failed to find a record in the [`crate::metadata::store::MetadataStore`].
    ///
    /// The associated [`Token`] identifies which record was not found.
    #[error("Failed to find record in MetadataStore - {0}")]
    TypeNotFound(Token),

    /// An external type reference did not resolve to a definition.
    ///
    /// Every external reference must resolve to exactly one definition in the
    /// store; anything else makes the model unbuildable.
    #[error("Failed to resolve type reference to a definition - {namespace}.{name}")]
    UnresolvedReference {
        /// Namespace of the unresolved reference
        namespace: String,
        /// Name of the unresolved reference
        name: String,
    },
}

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
