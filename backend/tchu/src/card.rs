use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumCount, EnumIter};

/// The eight colors a car card or a route can have.
///
/// The declaration order is the canonical order used everywhere colors are enumerated.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    EnumCount,
    EnumIter,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Color {
    Black,
    Violet,
    Blue,
    Green,
    Yellow,
    Orange,
    Red,
    White,
}

/// Represents the different variants of cards: one car card per color, and the locomotive.
///
/// The ordering of cards is total and fixed; it is the iteration order of any
/// [`crate::sorted_bag::SortedBag`] of cards, and the index of a card on the wire.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    EnumCount,
    EnumIter,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Card {
    Black,
    Violet,
    Blue,
    Green,
    Yellow,
    Orange,
    Red,
    White,
    /// Matches with any color, but only on tunnels.
    Locomotive,
}

impl Card {
    /// All cards, in canonical order. A card is sent on the wire as its index in this array.
    pub const ALL: [Card; 9] = [
        Card::Black,
        Card::Violet,
        Card::Blue,
        Card::Green,
        Card::Yellow,
        Card::Orange,
        Card::Red,
        Card::White,
        Card::Locomotive,
    ];

    /// The car card of the given color.
    ///
    /// # Examples:
    /// ```
    /// use tchu::card::{Card, Color};
    ///
    /// assert_eq!(Card::of(Color::Red), Card::Red);
    /// ```
    pub fn of(color: Color) -> Self {
        match color {
            Color::Black => Card::Black,
            Color::Violet => Card::Violet,
            Color::Blue => Card::Blue,
            Color::Green => Card::Green,
            Color::Yellow => Card::Yellow,
            Color::Orange => Card::Orange,
            Color::Red => Card::Red,
            Color::White => Card::White,
        }
    }

    /// The color of this card, or `None` for the locomotive.
    pub fn color(&self) -> Option<Color> {
        match self {
            Card::Black => Some(Color::Black),
            Card::Violet => Some(Color::Violet),
            Card::Blue => Some(Color::Blue),
            Card::Green => Some(Color::Green),
            Card::Yellow => Some(Color::Yellow),
            Card::Orange => Some(Color::Orange),
            Card::Red => Some(Color::Red),
            Card::White => Some(Color::White),
            Card::Locomotive => None,
        }
    }

    /// Whether the current card is the locomotive, i.e. matches with any color.
    ///
    /// # Examples:
    /// ```
    /// use tchu::card::Card;
    ///
    /// assert!(!Card::Black.is_locomotive());
    /// assert!(Card::Locomotive.is_locomotive());
    /// ```
    #[inline]
    pub fn is_locomotive(&self) -> bool {
        *self == Card::Locomotive
    }

    /// Human-readable name of `count` such cards, e.g. "red card" or "locomotives".
    pub fn display_name(&self, count: usize) -> &'static str {
        let plural = count != 1;
        match (self, plural) {
            (Card::Black, false) => "black card",
            (Card::Black, true) => "black cards",
            (Card::Violet, false) => "violet card",
            (Card::Violet, true) => "violet cards",
            (Card::Blue, false) => "blue card",
            (Card::Blue, true) => "blue cards",
            (Card::Green, false) => "green card",
            (Card::Green, true) => "green cards",
            (Card::Yellow, false) => "yellow card",
            (Card::Yellow, true) => "yellow cards",
            (Card::Orange, false) => "orange card",
            (Card::Orange, true) => "orange cards",
            (Card::Red, false) => "red card",
            (Card::Red, true) => "red cards",
            (Card::White, false) => "white card",
            (Card::White, true) => "white cards",
            (Card::Locomotive, false) => "locomotive",
            (Card::Locomotive, true) => "locomotives",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::{EnumCount, IntoEnumIterator};

    // Tests for `Color`.

    #[test]
    fn color_to_string() {
        assert_eq!(Color::Orange.to_string(), "orange");
        assert_eq!(Color::Violet.to_string(), "violet");
    }

    #[test]
    fn colors_in_declaration_order() {
        assert_eq!(Color::COUNT, 8);
        assert_eq!(Color::iter().next(), Some(Color::Black));
        assert_eq!(Color::iter().last(), Some(Color::White));
    }

    // Tests for `Card`.

    #[test]
    fn card_to_json() -> serde_json::Result<()> {
        assert_eq!(serde_json::to_string(&Card::Blue)?, r#""blue""#);
        assert_eq!(serde_json::to_string(&Card::Locomotive)?, r#""locomotive""#);
        Ok(())
    }

    #[test]
    fn json_to_card() -> serde_json::Result<()> {
        assert_eq!(serde_json::from_str::<Card>(r#""green""#)?, Card::Green);
        assert_eq!(
            serde_json::from_str::<Card>(r#""locomotive""#)?,
            Card::Locomotive
        );
        Ok(())
    }

    #[test]
    fn invalid_json_to_card() {
        assert!(serde_json::from_str::<Card>(r#""wild""#).is_err());
    }

    #[test]
    fn all_cards_in_declaration_order() {
        assert_eq!(Card::ALL.len(), Card::COUNT);
        assert!(Card::ALL.iter().copied().eq(Card::iter()));
        assert_eq!(Card::iter().filter(|card| !card.is_locomotive()).count(), Color::COUNT);
    }

    #[test]
    fn card_color_round_trip() {
        for color in Color::iter() {
            assert_eq!(Card::of(color).color(), Some(color));
        }
        assert_eq!(Card::Locomotive.color(), None);
    }

    #[test]
    fn card_display_name() {
        assert_eq!(Card::Red.display_name(1), "red card");
        assert_eq!(Card::Red.display_name(3), "red cards");
        assert_eq!(Card::Locomotive.display_name(1), "locomotive");
        assert_eq!(Card::Locomotive.display_name(0), "locomotives");
    }
}
