//! Core capability token types.

use std::fmt;
use std::marker::PhantomData;

/// An unforgeable capability token proving authorization.
///
/// `new()` is `pub(super)`, so only the authority in this module can mint
/// one. The token is neither `Clone` nor `Copy`.
pub struct Cap<T: Capability> {
    scope: T::Scope,
    _marker: PhantomData<T>,
}

impl<T: Capability> Cap<T> {
    #[inline]
    pub(super) fn new(scope: T::Scope) -> Self {
        Self {
            scope,
            _marker: PhantomData,
        }
    }

    /// The resource this capability authorizes.
    #[inline]
    pub fn scope(&self) -> &T::Scope {
        &self.scope
    }

    /// Consume the capability and return the scope.
    #[inline]
    pub fn into_scope(self) -> T::Scope {
        self.scope
    }
}

impl<T: Capability> fmt::Debug for Cap<T>
where
    T::Scope: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cap")
            .field("capability", &T::NAME)
            .field("scope", &self.scope)
            .finish()
    }
}

impl<T: Capability> fmt::Display for Cap<T>
where
    T::Scope: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cap<{}>({})", T::NAME, self.scope)
    }
}

/// A kind of capability: what it is scoped to and what it is called in logs.
pub trait Capability: 'static + Send + Sync {
    type Scope: Clone + Send + Sync;

    const NAME: &'static str;
}
