//! Typed identifiers

use std::{
    cmp::Ordering,
    fmt::{Debug, Display, Formatter, Result as FmtResult},
    hash::{Hash, Hasher},
    marker::PhantomData,
};

/// An identifier tagged with the record type it points at.
///
/// The raw representation defaults to the `BIGINT` identity columns; carts use `Uuid`.
pub struct TypedId<T, R = i64>(R, PhantomData<fn() -> T>);

impl<T, R> TypedId<T, R> {
    pub const fn new(raw: R) -> Self {
        Self(raw, PhantomData)
    }
}

impl<T, R: Copy> TypedId<T, R> {
    #[must_use]
    pub fn get(self) -> R {
        self.0
    }
}

impl<T> TypedId<T> {
    /// Identity columns never hand out ids below 1.
    pub fn from_positive(raw: i64) -> Option<Self> {
        (raw > 0).then(|| Self::new(raw))
    }
}

impl<T, R: Clone> Clone for TypedId<T, R> {
    fn clone(&self) -> Self {
        Self::new(self.0.clone())
    }
}

impl<T, R: Copy> Copy for TypedId<T, R> {}

impl<T, R: Debug> Debug for TypedId<T, R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Debug::fmt(&self.0, f)
    }
}

impl<T, R: Display> Display for TypedId<T, R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

impl<T, R: PartialEq> PartialEq for TypedId<T, R> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T, R: Eq> Eq for TypedId<T, R> {}

impl<T, R: Hash> Hash for TypedId<T, R> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl<T, R: PartialOrd> PartialOrd for TypedId<T, R> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.0.partial_cmp(&other.0)
    }
}

impl<T, R: Ord> Ord for TypedId<T, R> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl<T, R> From<R> for TypedId<T, R> {
    fn from(value: R) -> Self {
        Self::new(value)
    }
}
