//! Optional semantic backend for alias detection.
//!
//! Alias detection ("America" for "the United States") needs world
//! knowledge the resolution primitives do not carry. [`Semantics`] is the
//! injection point: callers wire in an [`AliasResolver`] backed by whatever
//! knowledge source they have, or leave the slot
//! [`Unavailable`](Semantics::Unavailable). Consumers test availability
//! explicitly; an unavailable backend is a typed error, not a panic, and
//! the alias predicate degrades it to a non-match.
//!
//! # Example
//!
//! ```
//! use corefer::semantics::Semantics;
//!
//! let semantics = Semantics::unavailable();
//! assert!(!semantics.is_available());
//! ```

use std::fmt;

use crate::error::{Error, Result};
use crate::mention::Mention;

/// Decides whether two mentions name the same entity, consulting an
/// external knowledge source. Implementations report lookup failures as
/// errors; the caller decides how to degrade.
pub trait AliasResolver: Send + Sync {
    /// True when `mention` and `antecedent` are known aliases.
    fn alias(&self, mention: &Mention, antecedent: &Mention) -> Result<bool>;
}

/// Capability slot for the semantic backend.
#[derive(Default)]
pub enum Semantics {
    /// No backend configured.
    #[default]
    Unavailable,
    /// A configured backend.
    Available(Box<dyn AliasResolver>),
}

impl Semantics {
    /// The empty slot.
    #[must_use]
    pub fn unavailable() -> Self {
        Semantics::Unavailable
    }

    /// Wire in a backend.
    #[must_use]
    pub fn with_resolver(resolver: impl AliasResolver + 'static) -> Self {
        Semantics::Available(Box::new(resolver))
    }

    /// True when a backend is configured.
    #[must_use]
    pub fn is_available(&self) -> bool {
        matches!(self, Semantics::Available(_))
    }

    /// Run the alias query. Fails with a typed error when no backend is
    /// configured, and passes backend errors through.
    pub fn try_alias(&self, mention: &Mention, antecedent: &Mention) -> Result<bool> {
        match self {
            Semantics::Unavailable => Err(Error::semantics("alias resolver not configured")),
            Semantics::Available(resolver) => resolver.alias(mention, antecedent),
        }
    }
}

impl fmt::Debug for Semantics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Semantics::Unavailable => f.write_str("Semantics::Unavailable"),
            Semantics::Available(_) => f.write_str("Semantics::Available(..)"),
        }
    }
}
