//! Ids to identify road elements.
//!
//! Every road element receives its own number when it is created. Numbers are taken from one
//! counter shared by all element types and are never handed out twice, so an error message naming
//! an element stays unambiguous even after the element is gone.

use std::{
    any::type_name,
    cmp::Ordering,
    fmt::{self, Debug, Display, Formatter},
    hash::{Hash, Hasher},
    marker::PhantomData,
    num::NonZeroU32,
    sync::atomic::{self, AtomicU32},
};

use log::trace;
use thiserror::Error;

/// Number of the next [`ElementId`]. Zero marks an exhausted counter.
static NEXT_NUMBER: AtomicU32 = AtomicU32::new(1);

/// Take the current number of `counter` and advance it.
///
/// After [`u32::MAX`] was taken, the counter stays exhausted.
fn take_number(counter: &AtomicU32) -> Option<NonZeroU32> {
    counter
        .fetch_update(atomic::Ordering::Relaxed, atomic::Ordering::Relaxed, |number| {
            (number != 0).then_some(number.wrapping_add(1))
        })
        .ok()
        .and_then(NonZeroU32::new)
}

/// Short name of the type `T`, without its module path.
fn short_type_name<T>() -> &'static str {
    let name = type_name::<T>();
    name.rsplit("::").next().unwrap_or(name)
}

/// All element numbers are used up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("There is no id left for a new {element}!")]
pub struct NoIdAvailable {
    /// Short type name of the element that should have been created.
    pub element: &'static str,
}

/// Id of a road element of type `T`.
pub struct ElementId<T> {
    /// Number of the element, unique over all element types.
    number: NonZeroU32,
    /// [`PhantomData`]
    phantom: PhantomData<fn() -> T>,
}

impl<T> ElementId<T> {
    /// Reserve the number for a new element.
    ///
    /// ## Errors
    ///
    /// If all numbers are used up.
    pub fn new() -> Result<ElementId<T>, NoIdAvailable> {
        ElementId::from_counter(&NEXT_NUMBER)
    }

    /// Reserve the next number of `counter`.
    fn from_counter(counter: &AtomicU32) -> Result<ElementId<T>, NoIdAvailable> {
        let element = short_type_name::<T>();
        let number = take_number(counter).ok_or(NoIdAvailable { element })?;
        trace!("New id {number} for a {element}.");
        Ok(ElementId { number, phantom: PhantomData })
    }

    /// The number of the element.
    #[must_use]
    pub fn number(&self) -> u32 {
        self.number.get()
    }
}

impl<T> Clone for ElementId<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ElementId<T> {}

impl<T> Debug for ElementId<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ElementId").field(&short_type_name::<T>()).field(&self.number).finish()
    }
}

impl<T> Display for ElementId<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} #{}", short_type_name::<T>(), self.number)
    }
}

impl<T> PartialEq for ElementId<T> {
    fn eq(&self, other: &Self) -> bool {
        self.number == other.number
    }
}

impl<T> Eq for ElementId<T> {}

impl<T> PartialOrd for ElementId<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for ElementId<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.number.cmp(&other.number)
    }
}

impl<T> Hash for ElementId<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.number.hash(state);
    }
}
