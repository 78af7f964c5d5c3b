use crate::card::Card;
use crate::game_state::PublicGameState;
use crate::player::{Player, PlayerError, PlayerId, PlayerResult, TurnKind};
use crate::player_state::PlayerState;
use crate::route::Route;
use crate::sorted_bag::SortedBag;
use crate::ticket::Ticket;

use std::sync::{mpsc, Arc, Mutex};
use threadpool::ThreadPool;
use tracing::warn;

/// Runs every call to a player on a dedicated thread, e.g. the one owning a user interface.
///
/// Notifications are queued and return immediately; their errors are only logged. Decisions block
/// the game until the player answers. The single worker runs calls in the order they were made,
/// so a decision always sees every notification sent before it.
pub struct DispatchedPlayer<P> {
    player: Arc<Mutex<P>>,
    dispatcher: ThreadPool,
}

impl<P: Player + 'static> DispatchedPlayer<P> {
    pub fn new(player: P) -> Self {
        Self {
            player: Arc::new(Mutex::new(player)),
            dispatcher: ThreadPool::with_name(String::from("tchu-dispatcher"), 1),
        }
    }

    /// Queues `call`, without waiting for it to run.
    fn notify<F>(&self, call: F)
    where
        F: FnOnce(&mut P) -> PlayerResult<()> + Send + 'static,
    {
        let player = Arc::clone(&self.player);

        self.dispatcher.execute(move || match player.lock() {
            Ok(mut player) => {
                if let Err(error) = call(&mut player) {
                    warn!("A dispatched notification failed: {}", error);
                }
            }
            Err(_) => warn!("The dispatched player panicked, dropping a notification."),
        });
    }

    /// Queues `call`, and waits for its answer.
    fn ask<T, F>(&self, call: F) -> PlayerResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut P) -> PlayerResult<T> + Send + 'static,
    {
        let player = Arc::clone(&self.player);
        let (tx, rx) = mpsc::sync_channel(1);

        self.dispatcher.execute(move || {
            let answer = player
                .lock()
                .map_err(|_| PlayerError::Disconnected)
                .and_then(|mut player| call(&mut player));
            // The game may have given up waiting already.
            let _ = tx.send(answer);
        });

        // The sender is dropped without an answer if the call panicked.
        rx.recv().map_err(|_| PlayerError::Disconnected)?
    }
}

impl<P: Player + 'static> Player for DispatchedPlayer<P> {
    fn init_players(&mut self, own_id: PlayerId, player_names: &[String; 2]) -> PlayerResult<()> {
        let player_names = player_names.clone();
        self.notify(move |player| player.init_players(own_id, &player_names));
        Ok(())
    }

    fn receive_info(&mut self, info: &str) -> PlayerResult<()> {
        let info = info.to_owned();
        self.notify(move |player| player.receive_info(&info));
        Ok(())
    }

    fn update_state(
        &mut self,
        new_state: &PublicGameState,
        own_state: &PlayerState,
    ) -> PlayerResult<()> {
        let new_state = new_state.clone();
        let own_state = own_state.clone();
        self.notify(move |player| player.update_state(&new_state, &own_state));
        Ok(())
    }

    fn set_initial_ticket_choice(&mut self, tickets: SortedBag<Ticket>) -> PlayerResult<()> {
        self.notify(move |player| player.set_initial_ticket_choice(tickets));
        Ok(())
    }

    fn choose_initial_tickets(&mut self) -> PlayerResult<SortedBag<Ticket>> {
        self.ask(|player| player.choose_initial_tickets())
    }

    fn next_turn_kind(&mut self) -> PlayerResult<TurnKind> {
        self.ask(|player| player.next_turn_kind())
    }

    fn choose_tickets(&mut self, options: SortedBag<Ticket>) -> PlayerResult<SortedBag<Ticket>> {
        self.ask(move |player| player.choose_tickets(options))
    }

    fn draw_slot(&mut self) -> PlayerResult<i32> {
        self.ask(|player| player.draw_slot())
    }

    fn claimed_route(&mut self) -> PlayerResult<Route> {
        self.ask(|player| player.claimed_route())
    }

    fn initial_claim_cards(&mut self) -> PlayerResult<SortedBag<Card>> {
        self.ask(|player| player.initial_claim_cards())
    }

    fn choose_additional_cards(
        &mut self,
        options: Vec<SortedBag<Card>>,
    ) -> PlayerResult<SortedBag<Card>> {
        self.ask(move |player| player.choose_additional_cards(options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::GreedyPlayer;
    use crate::game::Game;
    use crate::map;

    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::thread;

    /// Records the calls it receives, along with the thread they ran on.
    #[derive(Default)]
    struct Recorder {
        calls: Arc<Mutex<Vec<(String, Option<String>)>>>,
        panic_on_draw: bool,
    }

    impl Recorder {
        fn record(&self, call: &str) {
            self.calls
                .lock()
                .unwrap()
                .push((call.to_owned(), thread::current().name().map(String::from)));
        }
    }

    impl Player for Recorder {
        fn init_players(&mut self, _: PlayerId, _: &[String; 2]) -> PlayerResult<()> {
            self.record("init_players");
            Ok(())
        }

        fn receive_info(&mut self, info: &str) -> PlayerResult<()> {
            self.record(info);
            Ok(())
        }

        fn update_state(&mut self, _: &PublicGameState, _: &PlayerState) -> PlayerResult<()> {
            self.record("update_state");
            Ok(())
        }

        fn set_initial_ticket_choice(&mut self, _: SortedBag<Ticket>) -> PlayerResult<()> {
            self.record("set_initial_ticket_choice");
            Err(PlayerError::Protocol(String::from("ignored")))
        }

        fn choose_initial_tickets(&mut self) -> PlayerResult<SortedBag<Ticket>> {
            self.record("choose_initial_tickets");
            Ok(SortedBag::new())
        }

        fn next_turn_kind(&mut self) -> PlayerResult<TurnKind> {
            self.record("next_turn_kind");
            Ok(TurnKind::DrawCards)
        }

        fn choose_tickets(&mut self, options: SortedBag<Ticket>) -> PlayerResult<SortedBag<Ticket>> {
            Ok(options)
        }

        fn draw_slot(&mut self) -> PlayerResult<i32> {
            if self.panic_on_draw {
                panic!("no slot");
            }
            Ok(3)
        }

        fn claimed_route(&mut self) -> PlayerResult<Route> {
            Err(PlayerError::Disconnected)
        }

        fn initial_claim_cards(&mut self) -> PlayerResult<SortedBag<Card>> {
            Ok(SortedBag::new())
        }

        fn choose_additional_cards(
            &mut self,
            options: Vec<SortedBag<Card>>,
        ) -> PlayerResult<SortedBag<Card>> {
            Ok(options.into_iter().last().unwrap_or_default())
        }
    }

    #[test]
    fn calls_run_in_order_on_the_dispatcher() {
        let recorder = Recorder::default();
        let calls = Arc::clone(&recorder.calls);
        let mut player = DispatchedPlayer::new(recorder);

        player
            .init_players(PlayerId::Player1, &[String::from("Ada"), String::from("Charles")])
            .unwrap();
        player.receive_info("Ada will play first.").unwrap();
        player.set_initial_ticket_choice(SortedBag::new()).unwrap();
        assert!(player.choose_initial_tickets().unwrap().is_empty());
        assert_eq!(player.next_turn_kind().unwrap(), TurnKind::DrawCards);

        let calls = calls.lock().unwrap();
        let names: Vec<&str> = calls.iter().map(|(call, _)| call.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "init_players",
                "Ada will play first.",
                "set_initial_ticket_choice",
                "choose_initial_tickets",
                "next_turn_kind",
            ]
        );
        assert!(calls
            .iter()
            .all(|(_, thread)| thread.as_deref() == Some("tchu-dispatcher")));
    }

    #[test]
    fn answers_and_errors_come_back() {
        let mut player = DispatchedPlayer::new(Recorder::default());
        let options = vec![SortedBag::of(1, Card::Red), SortedBag::of(1, Card::Blue)];

        assert_eq!(player.draw_slot().unwrap(), 3);
        assert_eq!(
            player.choose_additional_cards(options).unwrap(),
            SortedBag::of(1, Card::Blue)
        );
        assert!(matches!(
            player.claimed_route(),
            Err(PlayerError::Disconnected)
        ));
    }

    #[test]
    fn panicking_player_is_disconnected() {
        let mut player = DispatchedPlayer::new(Recorder {
            panic_on_draw: true,
            ..Recorder::default()
        });

        assert!(matches!(player.draw_slot(), Err(PlayerError::Disconnected)));
        // The lock is poisoned from now on.
        assert!(matches!(
            player.next_turn_kind(),
            Err(PlayerError::Disconnected)
        ));
    }

    #[test]
    fn dispatched_players_play_a_game() {
        let tickets = map::tickets().iter().cloned().collect();
        let players: [Box<dyn Player>; 2] = [
            Box::new(DispatchedPlayer::new(GreedyPlayer::new())),
            Box::new(GreedyPlayer::new()),
        ];
        let names = [String::from("Ada"), String::from("Charles")];

        let outcome = Game::new(players, names, tickets, StdRng::seed_from_u64(5))
            .play()
            .unwrap();

        assert!(outcome.final_state.last_player().is_some());
    }
}
