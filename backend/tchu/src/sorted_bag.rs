use crate::error::{check_argument, check_index, TchuResult};

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::iter::repeat;

/// An immutable multiset whose elements are always iterated in ascending order.
///
/// Two bags holding the same elements with the same multiplicities are equal, no matter
/// how they were built. Every operation returns a new bag.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct SortedBag<E: Ord> {
    /// Maps each element to its count, which is always strictly positive.
    counts: BTreeMap<E, usize>,
}

impl<E: Ord + Clone> SortedBag<E> {
    /// The empty bag.
    pub fn new() -> Self {
        Self {
            counts: BTreeMap::new(),
        }
    }

    /// A bag holding `count` copies of `element`.
    ///
    /// # Example
    /// ```
    /// use tchu::card::Card;
    /// use tchu::sorted_bag::SortedBag;
    ///
    /// let cards = SortedBag::of(3, Card::Red);
    /// assert_eq!(cards.size(), 3);
    /// assert_eq!(cards.count_of(&Card::Red), 3);
    /// ```
    pub fn of(count: usize, element: E) -> Self {
        Builder::new().add_count(count, element).build()
    }

    /// A bag holding `count_1` copies of `element_1` and `count_2` copies of `element_2`.
    pub fn of_two(count_1: usize, element_1: E, count_2: usize, element_2: E) -> Self {
        Builder::new()
            .add_count(count_1, element_1)
            .add_count(count_2, element_2)
            .build()
    }

    /// Total number of elements, counting repetitions.
    pub fn size(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// How many copies of `element` this bag holds.
    pub fn count_of(&self, element: &E) -> usize {
        self.counts.get(element).copied().unwrap_or(0)
    }

    pub fn contains(&self, element: &E) -> bool {
        self.counts.contains_key(element)
    }

    /// Whether every element of `other` is in this bag, at least as many times.
    pub fn contains_all(&self, other: &SortedBag<E>) -> bool {
        other
            .counts
            .iter()
            .all(|(element, count)| self.count_of(element) >= *count)
    }

    /// The bag holding the elements of both bags, multiplicities added up.
    pub fn union(&self, other: &SortedBag<E>) -> Self {
        let mut counts = self.counts.clone();
        for (element, count) in &other.counts {
            *counts.entry(element.clone()).or_insert(0) += count;
        }

        Self { counts }
    }

    /// The bag holding the elements of this bag that are not in `other`.
    /// Multiplicities saturate at zero.
    pub fn difference(&self, other: &SortedBag<E>) -> Self {
        let counts = self
            .counts
            .iter()
            .filter_map(|(element, count)| {
                let remaining = count.saturating_sub(other.count_of(element));
                (remaining > 0).then(|| (element.clone(), remaining))
            })
            .collect();

        Self { counts }
    }

    /// All the distinct sub-bags of exactly `size` elements.
    ///
    /// Returns an `Err` if `size` is larger than the size of this bag.
    ///
    /// # Example
    /// ```
    /// use tchu::card::Card;
    /// use tchu::sorted_bag::SortedBag;
    ///
    /// let cards = SortedBag::of_two(2, Card::Red, 1, Card::Locomotive);
    /// let subsets = cards.subsets_of_size(2).unwrap();
    ///
    /// assert_eq!(subsets.len(), 2);
    /// assert!(subsets.contains(&SortedBag::of(2, Card::Red)));
    /// assert!(subsets.contains(&SortedBag::of_two(1, Card::Red, 1, Card::Locomotive)));
    /// ```
    pub fn subsets_of_size(&self, size: usize) -> TchuResult<BTreeSet<SortedBag<E>>> {
        check_argument(size <= self.size(), || {
            format!(
                "Cannot enumerate subsets of size {} of a bag of size {}.",
                size,
                self.size()
            )
        })?;

        let distinct: Vec<(&E, usize)> = self.counts.iter().map(|(e, c)| (e, *c)).collect();
        let mut subsets = BTreeSet::new();
        Self::collect_subsets(&distinct, size, &Builder::new(), &mut subsets);

        Ok(subsets)
    }

    fn collect_subsets(
        distinct: &[(&E, usize)],
        remaining: usize,
        current: &Builder<E>,
        subsets: &mut BTreeSet<SortedBag<E>>,
    ) {
        if remaining == 0 {
            subsets.insert(current.clone().build());
            return;
        }

        let Some(((element, count), rest)) = distinct.split_first() else {
            return;
        };

        // Take between 0 and `count` copies of the first distinct element, recurse on the rest.
        for taken in (0..=(*count).min(remaining)).rev() {
            let next = current.clone().add_count(taken, E::clone(element));
            Self::collect_subsets(rest, remaining - taken, &next, subsets);
        }
    }

    /// The element at position `index`, in ascending order (repetitions included).
    pub fn get(&self, index: usize) -> TchuResult<&E> {
        check_index(index, self.size())?;

        let mut skipped = 0;
        for (element, count) in &self.counts {
            if index < skipped + count {
                return Ok(element);
            }
            skipped += count;
        }

        unreachable!("The index was checked against the size of the bag.")
    }

    /// Iterates over the elements in ascending order, each repeated as many times as it occurs.
    pub fn iter(&self) -> impl Iterator<Item = &E> + '_ {
        self.counts
            .iter()
            .flat_map(|(element, count)| repeat(element).take(*count))
    }

    /// Iterates over the distinct elements in ascending order, along with their counts.
    pub fn counts(&self) -> impl Iterator<Item = (&E, usize)> + '_ {
        self.counts.iter().map(|(element, count)| (element, *count))
    }

    /// The distinct elements of this bag.
    pub fn to_set(&self) -> BTreeSet<E> {
        self.counts.keys().cloned().collect()
    }

    /// The elements in ascending order, as a list.
    pub fn to_vec(&self) -> Vec<E> {
        self.iter().cloned().collect()
    }
}

impl<E: Ord + Clone> Default for SortedBag<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Ord + Clone> FromIterator<E> for SortedBag<E> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Builder::new(), |builder, element| builder.add(element))
            .build()
    }
}

impl<E: Ord + Clone + fmt::Display> fmt::Display for SortedBag<E> {
    /// Prints e.g. `{2×red, locomotive}`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries: Vec<String> = self
            .counts
            .iter()
            .map(|(element, count)| {
                if *count > 1 {
                    format!("{}×{}", count, element)
                } else {
                    element.to_string()
                }
            })
            .collect();

        write!(f, "{{{}}}", entries.join(", "))
    }
}

/// Accumulates counts, then builds a [`SortedBag`].
#[derive(Clone, Debug)]
pub struct Builder<E: Ord> {
    counts: BTreeMap<E, usize>,
}

impl<E: Ord + Clone> Builder<E> {
    pub fn new() -> Self {
        Self {
            counts: BTreeMap::new(),
        }
    }

    pub fn add(self, element: E) -> Self {
        self.add_count(1, element)
    }

    pub fn add_count(mut self, count: usize, element: E) -> Self {
        if count > 0 {
            *self.counts.entry(element).or_insert(0) += count;
        }
        self
    }

    pub fn add_all(mut self, bag: &SortedBag<E>) -> Self {
        for (element, count) in bag.counts() {
            self = self.add_count(count, element.clone());
        }
        self
    }

    pub fn size(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn build(self) -> SortedBag<E> {
        SortedBag {
            counts: self.counts,
        }
    }
}

impl<E: Ord + Clone> Default for Builder<E> {
    fn default() -> Self {
        Self::new()
    }
}
