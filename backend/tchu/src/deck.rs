use crate::error::{check_argument, TchuResult};
use crate::sorted_bag::SortedBag;

use rand::seq::SliceRandom;
use rand::Rng;

/// An immutable, shuffled pile of cards or tickets. Elements are drawn from the top only.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Deck<E> {
    /// The top of the deck is the last element.
    elements: Vec<E>,
}

impl<E: Ord + Clone> Deck<E> {
    /// Shuffles every element of `bag` into a new deck.
    pub fn of(bag: &SortedBag<E>, rng: &mut impl Rng) -> Self {
        let mut elements = bag.to_vec();
        elements.shuffle(rng);
        Self { elements }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns an `Err` if the deck is empty.
    pub fn top_card(&self) -> TchuResult<E> {
        self.check_top_count(1)?;
        Ok(self.elements[self.elements.len() - 1].clone())
    }

    /// Returns an `Err` if the deck is empty.
    pub fn without_top_card(&self) -> TchuResult<Self> {
        self.without_top_cards(1)
    }

    /// The `count` elements on top of the deck.
    ///
    /// Returns an `Err` if the deck holds fewer than `count` elements.
    pub fn top_cards(&self, count: usize) -> TchuResult<SortedBag<E>> {
        self.check_top_count(count)?;
        Ok(self.elements[self.elements.len() - count..]
            .iter()
            .cloned()
            .collect())
    }

    /// Returns an `Err` if the deck holds fewer than `count` elements.
    pub fn without_top_cards(&self, count: usize) -> TchuResult<Self> {
        self.check_top_count(count)?;
        Ok(Self {
            elements: self.elements[..self.elements.len() - count].to_vec(),
        })
    }

    fn check_top_count(&self, count: usize) -> TchuResult<()> {
        check_argument(count <= self.elements.len(), || {
            format!(
                "Cannot take {} from a deck of size {}.",
                count,
                self.elements.len()
            )
        })
    }
}
