//! Predicate algebra over catalog records.
//!
//! One implementation serves every record kind: the combinators are generic
//! over [`HasProperties`], and the per-kind modules ([`bundle`], [`channel`],
//! [`package`]) only add convenience constructors.

pub mod bundle;
pub mod channel;
pub mod package;

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use catsel_schema::HasProperties;

/// A pure, shareable test over a record: `true` keeps the record.
///
/// Cloning is cheap (the closure is reference counted) and predicates are
/// `Send + Sync`, so the same constraint can be applied from several
/// resolutions at once.
pub struct Predicate<T: ?Sized> {
    test: Arc<dyn Fn(&T) -> bool + Send + Sync>,
}

impl<T: ?Sized> Predicate<T> {
    /// Wrap a closure.
    pub fn new(test: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        Self {
            test: Arc::new(test),
        }
    }

    /// Evaluate the predicate against `record`.
    pub fn test(&self, record: &T) -> bool {
        (self.test)(record)
    }
}

impl<T: ?Sized> Clone for Predicate<T> {
    fn clone(&self) -> Self {
        Self {
            test: Arc::clone(&self.test),
        }
    }
}

impl<T: ?Sized> fmt::Debug for Predicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate").finish_non_exhaustive()
    }
}

/// Keep the records for which `predicate` holds, preserving input order.
///
/// Accepts anything that yields records or references to them
/// (`&[Bundle]`, `Vec<Arc<Bundle>>`, ...) and returns the same item type.
pub fn filter<T, R, I>(records: I, predicate: &Predicate<T>) -> Vec<R>
where
    T: HasProperties + ?Sized,
    R: Borrow<T>,
    I: IntoIterator<Item = R>,
{
    records
        .into_iter()
        .filter(|r| predicate.test(<R as Borrow<T>>::borrow(r)))
        .collect()
}

/// True iff every predicate holds. Stops at the first `false`.
///
/// With no predicates the result is always `true`.
pub fn and<T>(predicates: impl IntoIterator<Item = Predicate<T>>) -> Predicate<T>
where
    T: HasProperties + ?Sized + 'static,
{
    let predicates: Vec<Predicate<T>> = predicates.into_iter().collect();
    Predicate::new(move |record: &T| predicates.iter().all(|p| p.test(record)))
}

/// True iff any predicate holds. Stops at the first `true`.
///
/// With no predicates the result is always `false`.
pub fn or<T>(predicates: impl IntoIterator<Item = Predicate<T>>) -> Predicate<T>
where
    T: HasProperties + ?Sized + 'static,
{
    let predicates: Vec<Predicate<T>> = predicates.into_iter().collect();
    Predicate::new(move |record: &T| predicates.iter().any(|p| p.test(record)))
}

/// Logical negation of `predicate`.
pub fn not<T>(predicate: Predicate<T>) -> Predicate<T>
where
    T: HasProperties + ?Sized + 'static,
{
    Predicate::new(move |record: &T| !predicate.test(record))
}
