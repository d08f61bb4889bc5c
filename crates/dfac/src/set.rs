use std::{
    cmp::Ordering,
    fmt::{self, Display},
    ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Sub, SubAssign},
};

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SetError {
    #[error("index {index} out of range for set of size {size}")]
    IndexOutOfRange { index: usize, size: usize },
}

/// Unordered collection of unique elements.
///
/// Elements are kept in insertion order so that `element_at` and iteration are
/// stable, but that order carries no meaning: equality and ordering are
/// defined by inclusion only, so two sets holding the same elements compare
/// equal however they were built.
#[derive(Clone, Debug)]
pub struct FiniteSet<T> {
    elements: Vec<T>,
}

impl<T> FiniteSet<T> {
    pub fn new() -> Self {
        FiniteSet {
            elements: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn size(&self) -> usize {
        self.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn element_at(&self, index: usize) -> Result<&T, SetError> {
        self.elements.get(index).ok_or(SetError::IndexOutOfRange {
            index,
            size: self.elements.len(),
        })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.elements.iter()
    }
}

impl<T: PartialEq> FiniteSet<T> {
    pub fn contains(&self, x: &T) -> bool {
        self.elements.iter().any(|y| y == x)
    }

    /// Returns true if `x` was not already present.
    pub fn insert(&mut self, x: T) -> bool {
        if self.contains(&x) {
            false
        } else {
            self.elements.push(x);
            true
        }
    }

    pub fn remove(&mut self, x: &T) -> bool {
        let before = self.elements.len();
        self.elements.retain(|y| y != x);
        self.elements.len() != before
    }

    pub fn is_subset(&self, other: &Self) -> bool {
        self.elements.iter().all(|x| other.contains(x))
    }

    pub fn is_superset(&self, other: &Self) -> bool {
        other.is_subset(self)
    }

    pub fn is_strict_subset(&self, other: &Self) -> bool {
        self.is_subset(other) && !other.is_subset(self)
    }

    pub fn is_strict_superset(&self, other: &Self) -> bool {
        other.is_strict_subset(self)
    }

    pub fn is_disjoint(&self, other: &Self) -> bool {
        !self.elements.iter().any(|x| other.contains(x))
    }
}

impl<T: PartialEq + Clone> FiniteSet<T> {
    pub fn union_with(&mut self, other: &Self) {
        for x in &other.elements {
            if !self.contains(x) {
                self.elements.push(x.clone());
            }
        }
    }

    pub fn intersect_with(&mut self, other: &Self) {
        self.elements.retain(|x| other.contains(x));
    }

    pub fn difference_with(&mut self, other: &Self) {
        self.elements.retain(|x| !other.contains(x));
    }

    pub fn union(&self, other: &Self) -> Self {
        let mut result = self.clone();
        result.union_with(other);
        result
    }

    pub fn intersection(&self, other: &Self) -> Self {
        let mut result = self.clone();
        result.intersect_with(other);
        result
    }

    pub fn difference(&self, other: &Self) -> Self {
        let mut result = self.clone();
        result.difference_with(other);
        result
    }
}

impl<T> Default for FiniteSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PartialEq> PartialEq for FiniteSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.is_subset(other) && other.is_subset(self)
    }
}

impl<T: Eq> Eq for FiniteSet<T> {}

// partial order by inclusion; incomparable sets yield None
impl<T: PartialEq> PartialOrd for FiniteSet<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self.is_subset(other), other.is_subset(self)) {
            (true, true) => Some(Ordering::Equal),
            (true, false) => Some(Ordering::Less),
            (false, true) => Some(Ordering::Greater),
            (false, false) => None,
        }
    }
}

impl<T: PartialEq> FromIterator<T> for FiniteSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = FiniteSet::new();
        set.extend(iter);
        set
    }
}

impl<T: PartialEq> Extend<T> for FiniteSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for x in iter {
            self.insert(x);
        }
    }
}

impl<T: PartialEq, const N: usize> From<[T; N]> for FiniteSet<T> {
    fn from(elements: [T; N]) -> Self {
        elements.into_iter().collect()
    }
}

impl<T> IntoIterator for FiniteSet<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a FiniteSet<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl<T: PartialEq + Clone> BitOr for &FiniteSet<T> {
    type Output = FiniteSet<T>;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl<T: PartialEq + Clone> BitAnd for &FiniteSet<T> {
    type Output = FiniteSet<T>;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.intersection(rhs)
    }
}

impl<T: PartialEq + Clone> Sub for &FiniteSet<T> {
    type Output = FiniteSet<T>;

    fn sub(self, rhs: Self) -> Self::Output {
        self.difference(rhs)
    }
}

impl<T: PartialEq + Clone> BitOrAssign<&FiniteSet<T>> for FiniteSet<T> {
    fn bitor_assign(&mut self, rhs: &FiniteSet<T>) {
        self.union_with(rhs);
    }
}

impl<T: PartialEq + Clone> BitAndAssign<&FiniteSet<T>> for FiniteSet<T> {
    fn bitand_assign(&mut self, rhs: &FiniteSet<T>) {
        self.intersect_with(rhs);
    }
}

impl<T: PartialEq + Clone> SubAssign<&FiniteSet<T>> for FiniteSet<T> {
    fn sub_assign(&mut self, rhs: &FiniteSet<T>) {
        self.difference_with(rhs);
    }
}

impl<T: Display> Display for FiniteSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, x) in self.elements.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", x)?;
        }
        write!(f, "}}")
    }
}
