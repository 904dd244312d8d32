//! Owned, size-tagged sequence.

use serde::{Deserialize, Serialize};

use super::ValueError;

/// A contiguous run of `T` owned by whichever stage currently holds it.
///
/// Cloning is a deep copy. Sending a `List` over a stage channel moves the handle, so the sender
/// can never observe the storage again once the receiver owns it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct List<T> {
    value: Vec<T>,
}

impl<T> List<T> {
    pub fn new() -> Self {
        Self { value: Vec::new() }
    }

    /// Reserve storage for exactly `n` elements up front. Allocation failure is reported,
    /// never papered over by a shorter list.
    pub fn try_with_capacity(n: usize) -> Result<Self, ValueError> {
        let mut value = Vec::new();
        value
            .try_reserve_exact(n)
            .map_err(|_| ValueError::Allocation { requested: n })?;
        Ok(Self { value })
    }

    /// Number of elements (the size tag).
    pub fn size(&self) -> usize {
        self.value.len()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn push(&mut self, item: T) {
        self.value.push(item);
    }

    pub fn first(&self) -> Option<&T> {
        self.value.first()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.value
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.value
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.value.iter()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.value
    }

    /// Split at `mid` into two owned lists. Panics if `mid > size()`, like [`Vec::split_off`].
    pub fn split_at(mut self, mid: usize) -> (Self, Self) {
        let tail = self.value.split_off(mid);
        (self, Self { value: tail })
    }
}

impl<T> From<Vec<T>> for List<T> {
    fn from(value: Vec<T>) -> Self {
        Self { value }
    }
}

impl<T> From<List<T>> for Vec<T> {
    fn from(list: List<T>) -> Self {
        list.value
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            value: iter.into_iter().collect(),
        }
    }
}

impl<T> IntoIterator for List<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.value.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.value.iter()
    }
}
