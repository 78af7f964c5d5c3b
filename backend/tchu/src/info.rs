use crate::card::Card;
use crate::constants::LONGEST_TRAIL_BONUS_POINTS;
use crate::route::Route;
use crate::sorted_bag::SortedBag;
use crate::trail::Trail;

/// Builds the human-readable descriptions of what a player does, shared with both players.
#[derive(Clone, Debug)]
pub struct Info {
    player_name: String,
}

/// "s" unless `count` is exactly one.
fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

/// Describes cards as e.g. "1 blue card, 2 red cards and 1 locomotive".
pub fn cards_description(cards: &SortedBag<Card>) -> String {
    let parts: Vec<String> = cards
        .counts()
        .map(|(card, count)| format!("{} {}", count, card.display_name(count)))
        .collect();

    match parts.split_last() {
        None => String::from("no cards"),
        Some((last, [])) => last.clone(),
        Some((last, rest)) => format!("{} and {}", rest.join(", "), last),
    }
}

impl Info {
    pub fn new(player_name: impl Into<String>) -> Self {
        Self {
            player_name: player_name.into(),
        }
    }

    /// Both players ended the game with the same number of points.
    pub fn draw(player_names: &[String], points: i32) -> String {
        format!(
            "{} are tied with {} points!",
            player_names.join(" and "),
            points
        )
    }

    pub fn will_play_first(&self) -> String {
        format!("{} will play first.", self.player_name)
    }

    pub fn kept_tickets(&self, count: usize) -> String {
        format!(
            "{} has kept {} ticket{}.",
            self.player_name,
            count,
            plural(count)
        )
    }

    pub fn can_play(&self) -> String {
        format!("It is {}'s turn.", self.player_name)
    }

    pub fn drew_tickets(&self, count: usize) -> String {
        format!(
            "{} has drawn {} ticket{}.",
            self.player_name,
            count,
            plural(count)
        )
    }

    pub fn drew_blind_card(&self) -> String {
        format!("{} has drawn a card from the deck.", self.player_name)
    }

    pub fn drew_visible_card(&self, card: Card) -> String {
        format!(
            "{} has drawn a face-up {}.",
            self.player_name,
            card.display_name(1)
        )
    }

    pub fn claimed_route(&self, route: &Route, cards: &SortedBag<Card>) -> String {
        format!(
            "{} has claimed the route {} using {}.",
            self.player_name,
            route,
            cards_description(cards)
        )
    }

    pub fn attempts_tunnel_claim(&self, route: &Route, initial_cards: &SortedBag<Card>) -> String {
        format!(
            "{} attempts to claim the tunnel {} using {}!",
            self.player_name,
            route,
            cards_description(initial_cards)
        )
    }

    /// The three cards drawn for a tunnel, and the extra cost they imply.
    pub fn drew_additional_cards(drawn_cards: &SortedBag<Card>, additional_cost: usize) -> String {
        let cost = if additional_cost == 0 {
            String::from("They do not imply any additional cost.")
        } else {
            format!(
                "They imply an additional cost of {} card{}.",
                additional_cost,
                plural(additional_cost)
            )
        };

        format!(
            "The additional cards are {}. {}",
            cards_description(drawn_cards),
            cost
        )
    }

    pub fn did_not_claim_route(&self, route: &Route) -> String {
        format!(
            "{} did not (or could not) claim the route {}.",
            self.player_name, route
        )
    }

    pub fn last_turn_begins(&self, car_count: u32) -> String {
        format!(
            "{} has only {} car{} left, the last turn begins!",
            self.player_name,
            car_count,
            plural(car_count as usize)
        )
    }

    pub fn gets_longest_trail_bonus(&self, trail: &Trail) -> String {
        format!(
            "{} gets the bonus of {} points for the longest trail {}.",
            self.player_name, LONGEST_TRAIL_BONUS_POINTS, trail
        )
    }

    pub fn won(&self, points: i32, loser_points: i32) -> String {
        format!(
            "{} wins with {} points, against {} points!",
            self.player_name, points, loser_points
        )
    }
}
