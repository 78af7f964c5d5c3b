use crate::codec::Wire;
use crate::config::NetConfig;
use crate::message::{Message, MessageId};

use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::net::TcpStream;
use tchu::player::{Player, PlayerResult};
use tracing::{debug, info, trace};

/// Plays, on behalf of a local player, the calls a remote proxy receives.
pub struct RemotePlayerClient<P, R, W> {
    player: P,
    reader: R,
    writer: W,
}

impl<P: Player> RemotePlayerClient<P, BufReader<TcpStream>, BufWriter<TcpStream>> {
    /// Connects `player` to the proxy listening at the address given by `config`.
    pub fn connect(player: P, config: &NetConfig) -> io::Result<Self> {
        info!("Connecting to {}.", config.address());
        let stream = TcpStream::connect(config.address())?;
        let reader = BufReader::new(stream.try_clone()?);
        Ok(Self::new(player, reader, BufWriter::new(stream)))
    }
}

impl<P: Player, R: BufRead, W: Write> RemotePlayerClient<P, R, W> {
    pub fn new(player: P, reader: R, writer: W) -> Self {
        Self {
            player,
            reader,
            writer,
        }
    }

    pub fn into_player(self) -> P {
        self.player
    }

    /// Handles messages until the proxy closes the connection, which is how a game ends.
    ///
    /// Returns an `Err` as soon as a message cannot be decoded, or the local player fails.
    pub fn run(&mut self) -> PlayerResult<()> {
        let mut line = String::new();

        loop {
            line.clear();
            if self.reader.read_line(&mut line)? == 0 {
                debug!("The proxy closed the connection.");
                return Ok(());
            }

            let message: Message = line.parse()?;
            trace!("Received {}", message);
            self.handle(&message)?;
        }
    }

    fn reply<T: Wire>(&mut self, value: &T) -> PlayerResult<()> {
        let line = value.encode()?;
        trace!("Replying {}", line);
        writeln!(self.writer, "{}", line)?;
        self.writer.flush()?;
        Ok(())
    }

    fn handle(&mut self, message: &Message) -> PlayerResult<()> {
        match message.id() {
            MessageId::InitPlayers => self
                .player
                .init_players(message.field(0)?, &message.field(1)?),
            MessageId::ReceiveInfo => self.player.receive_info(&message.field::<String>(0)?),
            MessageId::UpdateState => self
                .player
                .update_state(&message.field(0)?, &message.field(1)?),
            MessageId::SetInitialTickets => {
                self.player.set_initial_ticket_choice(message.field(0)?)
            }
            MessageId::ChooseInitialTickets => {
                let tickets = self.player.choose_initial_tickets()?;
                self.reply(&tickets)
            }
            MessageId::NextTurn => {
                let turn_kind = self.player.next_turn_kind()?;
                self.reply(&turn_kind)
            }
            MessageId::ChooseTickets => {
                let tickets = self.player.choose_tickets(message.field(0)?)?;
                self.reply(&tickets)
            }
            MessageId::DrawSlot => {
                let slot = self.player.draw_slot()?;
                self.reply(&slot)
            }
            MessageId::Route => {
                let route = self.player.claimed_route()?;
                self.reply(&route)
            }
            MessageId::Cards => {
                let cards = self.player.initial_claim_cards()?;
                self.reply(&cards)
            }
            MessageId::ChooseAdditionalCards => {
                let cards = self.player.choose_additional_cards(message.field(0)?)?;
                self.reply(&cards)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use std::io::Cursor;
    use tchu::bot::GreedyPlayer;
    use tchu::card::Card;
    use tchu::game_state::PublicGameState;
    use tchu::map;
    use tchu::player::{PlayerError, PlayerId, TurnKind};
    use tchu::player_state::PlayerState;
    use tchu::route::Route;
    use tchu::sorted_bag::SortedBag;
    use tchu::ticket::Ticket;

    /// Answers every decision the same way, and remembers the notifications.
    #[derive(Default)]
    struct Echo {
        own_id: Option<PlayerId>,
        names: Vec<String>,
        infos: Vec<String>,
        offered: SortedBag<Ticket>,
    }

    impl Player for Echo {
        fn init_players(&mut self, own_id: PlayerId, player_names: &[String; 2]) -> PlayerResult<()> {
            self.own_id = Some(own_id);
            self.names = player_names.to_vec();
            Ok(())
        }

        fn receive_info(&mut self, info: &str) -> PlayerResult<()> {
            self.infos.push(info.to_owned());
            Ok(())
        }

        fn update_state(&mut self, _: &PublicGameState, _: &PlayerState) -> PlayerResult<()> {
            Ok(())
        }

        fn set_initial_ticket_choice(&mut self, tickets: SortedBag<Ticket>) -> PlayerResult<()> {
            self.offered = tickets;
            Ok(())
        }

        fn choose_initial_tickets(&mut self) -> PlayerResult<SortedBag<Ticket>> {
            Ok(self.offered.clone())
        }

        fn next_turn_kind(&mut self) -> PlayerResult<TurnKind> {
            Ok(TurnKind::DrawTickets)
        }

        fn choose_tickets(&mut self, options: SortedBag<Ticket>) -> PlayerResult<SortedBag<Ticket>> {
            Ok(options)
        }

        fn draw_slot(&mut self) -> PlayerResult<i32> {
            Ok(3)
        }

        fn claimed_route(&mut self) -> PlayerResult<Route> {
            Ok(map::routes()[7])
        }

        fn initial_claim_cards(&mut self) -> PlayerResult<SortedBag<Card>> {
            Ok(SortedBag::of(1, Card::Violet))
        }

        fn choose_additional_cards(
            &mut self,
            options: Vec<SortedBag<Card>>,
        ) -> PlayerResult<SortedBag<Card>> {
            Ok(options.into_iter().last().unwrap_or_default())
        }
    }

    fn client(lines: &str) -> RemotePlayerClient<Echo, Cursor<Vec<u8>>, Vec<u8>> {
        RemotePlayerClient::new(
            Echo::default(),
            Cursor::new(lines.as_bytes().to_vec()),
            Vec::new(),
        )
    }

    #[test]
    fn replays_calls_until_closed() -> PlayerResult<()> {
        let mut client = client(concat!(
            "INIT_PLAYERS 1 QWRh,Q2hhcmxlcw==\n",
            "RECEIVE_INFO SGk=\n",
            "SET_INITIAL_TICKETS 0,1,2\n",
            "CHOOSE_INITIAL_TICKETS\n",
            "NEXT_TURN\n",
            "DRAW_SLOT\n",
            "ROUTE\n",
            "CARDS\n",
            "CHOOSE_ADDITIONAL_CARDS 1;1,8;8\n",
        ));
        client.run()?;

        let RemotePlayerClient { player, writer, .. } = client;
        assert_eq!(player.own_id, Some(PlayerId::Player2));
        assert_eq!(player.names, vec!["Ada", "Charles"]);
        assert_eq!(player.infos, vec!["Hi"]);
        assert_eq!(
            String::from_utf8(writer).unwrap(),
            "0,1,2\n0\n3\n7\n1\n8\n"
        );
        Ok(())
    }

    #[test]
    fn update_state_is_decoded() -> PlayerResult<()> {
        let mut client = RemotePlayerClient::new(
            GreedyPlayer::new(),
            Cursor::new(
                concat!(
                    "UPDATE_STATE 40:6,7,2,0,6;30;31:1:10;11;0,1:20;21;: ;;\n",
                    "NEXT_TURN\n",
                )
                .as_bytes()
                .to_vec(),
            ),
            Vec::new(),
        );
        client.run()?;

        let RemotePlayerClient { writer, .. } = client;
        // Without cards, nothing can be claimed: cards are drawn.
        assert_eq!(String::from_utf8(writer).unwrap(), "1\n");
        Ok(())
    }

    #[test]
    fn bad_messages_stop_the_client() {
        let mut client = client("NEXT_TURN\nHELLO\nDRAW_SLOT\n");

        assert!(matches!(client.run(), Err(PlayerError::Protocol(_))));
        let RemotePlayerClient { writer, .. } = client;
        assert_eq!(String::from_utf8(writer).unwrap(), "0\n");
    }

    #[test]
    fn bad_arguments_stop_the_client() {
        let mut client = client("CHOOSE_TICKETS 999\n");

        assert!(matches!(client.run(), Err(PlayerError::Protocol(_))));
    }
}
