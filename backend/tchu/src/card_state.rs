use crate::card::Card;
use crate::constants::FACE_UP_CARDS_COUNT;
use crate::deck::Deck;
use crate::error::{check_argument, check_index, TchuError, TchuResult};
use crate::sorted_bag::SortedBag;

use rand::Rng;
use serde::Serialize;

/// What every player knows about the cards: the face-up cards, and how many cards lie in the
/// deck and in the discards.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct PublicCardState {
    face_up_cards: [Card; FACE_UP_CARDS_COUNT],
    deck_size: usize,
    discards_size: usize,
}

impl PublicCardState {
    /// Returns an `Err` unless exactly five face-up cards are given.
    pub fn new(face_up_cards: Vec<Card>, deck_size: usize, discards_size: usize) -> TchuResult<Self> {
        let count = face_up_cards.len();
        let face_up_cards: [Card; FACE_UP_CARDS_COUNT] =
            face_up_cards.try_into().map_err(|_| {
                TchuError::InvalidArgument(format!(
                    "Expected {} face-up cards, but got {}.",
                    FACE_UP_CARDS_COUNT, count
                ))
            })?;

        Ok(Self {
            face_up_cards,
            deck_size,
            discards_size,
        })
    }

    #[inline]
    pub fn face_up_cards(&self) -> &[Card; FACE_UP_CARDS_COUNT] {
        &self.face_up_cards
    }

    /// Returns an `Err` if `slot` is not a face-up slot.
    pub fn face_up_card(&self, slot: usize) -> TchuResult<Card> {
        Ok(self.face_up_cards[check_index(slot, FACE_UP_CARDS_COUNT)?])
    }

    #[inline]
    pub fn deck_size(&self) -> usize {
        self.deck_size
    }

    #[inline]
    pub fn is_deck_empty(&self) -> bool {
        self.deck_size == 0
    }

    #[inline]
    pub fn discards_size(&self) -> usize {
        self.discards_size
    }

    /// Cards left to draw, counting the discards which may be shuffled back into the deck.
    #[inline]
    pub fn total_size(&self) -> usize {
        self.deck_size + self.discards_size
    }
}

/// The complete state of the cards not held by any player.
///
/// The sizes exposed by the public view are always those of `deck` and `discards`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CardState {
    public: PublicCardState,
    deck: Deck<Card>,
    discards: SortedBag<Card>,
}

impl CardState {
    /// Turns the five top cards of `deck` face up, in drawing order. The discards start empty.
    ///
    /// Returns an `Err` if `deck` holds fewer than five cards.
    pub fn of(deck: &Deck<Card>) -> TchuResult<Self> {
        check_argument(deck.size() >= FACE_UP_CARDS_COUNT, || {
            format!(
                "Cannot turn {} cards face up from a deck of size {}.",
                FACE_UP_CARDS_COUNT,
                deck.size()
            )
        })?;

        let mut deck = deck.clone();
        let mut face_up_cards = Vec::with_capacity(FACE_UP_CARDS_COUNT);
        for _ in 0..FACE_UP_CARDS_COUNT {
            face_up_cards.push(deck.top_card()?);
            deck = deck.without_top_card()?;
        }

        Self::new(face_up_cards, deck, SortedBag::new())
    }

    fn new(face_up_cards: Vec<Card>, deck: Deck<Card>, discards: SortedBag<Card>) -> TchuResult<Self> {
        Ok(Self {
            public: PublicCardState::new(face_up_cards, deck.size(), discards.size())?,
            deck,
            discards,
        })
    }

    #[inline]
    pub fn public(&self) -> &PublicCardState {
        &self.public
    }

    #[inline]
    pub fn discards(&self) -> &SortedBag<Card> {
        &self.discards
    }

    /// Replaces the face-up card at `slot` with the top card of the deck.
    ///
    /// Returns an `Err` if `slot` is out of bounds, or if the deck is empty.
    pub fn with_drawn_face_up_card(&self, slot: usize) -> TchuResult<Self> {
        let slot = check_index(slot, FACE_UP_CARDS_COUNT)?;
        let mut face_up_cards = self.public.face_up_cards.to_vec();
        face_up_cards[slot] = self.deck.top_card()?;

        Self::new(
            face_up_cards,
            self.deck.without_top_card()?,
            self.discards.clone(),
        )
    }

    /// Returns an `Err` if the deck is empty.
    pub fn top_deck_card(&self) -> TchuResult<Card> {
        self.deck.top_card()
    }

    /// Returns an `Err` if the deck is empty.
    pub fn without_top_deck_card(&self) -> TchuResult<Self> {
        Self::new(
            self.public.face_up_cards.to_vec(),
            self.deck.without_top_card()?,
            self.discards.clone(),
        )
    }

    /// Shuffles the discards into a new deck.
    ///
    /// Returns an `Err` unless the deck is empty.
    pub fn with_deck_recreated_from_discards(&self, rng: &mut impl Rng) -> TchuResult<Self> {
        check_argument(self.deck.is_empty(), || {
            format!(
                "Cannot recreate the deck while it still holds {} cards.",
                self.deck.size()
            )
        })?;

        Self::new(
            self.public.face_up_cards.to_vec(),
            Deck::of(&self.discards, rng),
            SortedBag::new(),
        )
    }

    pub fn with_more_discarded_cards(&self, cards: &SortedBag<Card>) -> TchuResult<Self> {
        Self::new(
            self.public.face_up_cards.to_vec(),
            self.deck.clone(),
            self.discards.union(cards),
        )
    }
}
