//! Game-wide constants. The engine takes no runtime configuration: every rule parameter lives here.

/// Number of train cards dealt to each player when the game starts.
pub const INITIAL_CARDS_COUNT: usize = 4;

/// Number of face-up cards displayed at all times.
pub const FACE_UP_CARDS_COUNT: usize = 5;

/// Slot value meaning "draw blindly from the deck" instead of from a face-up slot.
pub const DECK_SLOT: i32 = -1;

/// Number of locomotives in the full set of cards.
pub const LOCOMOTIVE_CARDS_COUNT: usize = 14;

/// Number of car cards of each color in the full set of cards.
pub const CAR_CARDS_COUNT: usize = 12;

/// Total number of cards: 8 colors of 12 car cards, plus 14 locomotives.
pub const TOTAL_CARDS_COUNT: usize = 8 * CAR_CARDS_COUNT + LOCOMOTIVE_CARDS_COUNT;

/// Number of tickets offered to each player when the game starts.
pub const INITIAL_TICKETS_COUNT: usize = 5;

/// Minimum number of tickets kept out of the initial offer.
pub const INITIAL_TICKETS_KEPT_MIN: usize = 3;

/// Number of tickets offered when drawing tickets during the game.
pub const IN_GAME_TICKETS_COUNT: usize = 3;

/// Minimum number of tickets kept out of an in-game offer.
pub const IN_GAME_TICKETS_KEPT_MIN: usize = 1;

/// Number of cars each player starts with.
pub const INITIAL_CAR_COUNT: u32 = 40;

/// A player with this many cars or fewer at the end of their turn triggers the last turn.
pub const LAST_TURN_CAR_COUNT: u32 = 2;

/// Number of cards drawn from the deck when attempting to claim a tunnel.
pub const ADDITIONAL_TUNNEL_CARDS: usize = 3;

/// Minimum number of cards across the deck and discards for drawing cards to be allowed.
pub const MIN_CARDS_TO_DRAW: usize = 5;

/// Smallest possible route length.
pub const MIN_ROUTE_LENGTH: u8 = 1;

/// Largest possible route length.
pub const MAX_ROUTE_LENGTH: u8 = 6;

/// Points granted for a claimed route, indexed by its length. Index 0 is never used.
pub const ROUTE_CLAIM_POINTS: [i32; MAX_ROUTE_LENGTH as usize + 1] = [0, 1, 2, 4, 7, 10, 15];

/// Bonus granted to the player with the strictly longest trail.
pub const LONGEST_TRAIL_BONUS_POINTS: i32 = 10;
