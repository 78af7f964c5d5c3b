use crate::codec::Wire;
use crate::message::{strip_line_end, Message, MessageId};

use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::net::TcpStream;
use tchu::card::Card;
use tchu::game_state::PublicGameState;
use tchu::player::{Player, PlayerError, PlayerId, PlayerResult, TurnKind};
use tchu::player_state::PlayerState;
use tchu::route::Route;
use tchu::sorted_bag::SortedBag;
use tchu::ticket::Ticket;
use tracing::{trace, warn};

/// Stands for a player playing from another process.
///
/// Each call is sent as a single line. Calls expecting an answer then block until the client sends
/// back a line: there is no timeout, and a connection closed by the client ends the game.
pub struct RemotePlayerProxy<R, W> {
    reader: R,
    writer: W,
}

impl RemotePlayerProxy<BufReader<TcpStream>, BufWriter<TcpStream>> {
    /// A proxy talking to the client at the other end of `stream`.
    pub fn connect(stream: TcpStream) -> io::Result<Self> {
        let reader = BufReader::new(stream.try_clone()?);
        Ok(Self::new(reader, BufWriter::new(stream)))
    }
}

impl<R: BufRead, W: Write> RemotePlayerProxy<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }

    fn send(&mut self, message: Message) -> PlayerResult<()> {
        trace!("Sending {}", message);
        writeln!(self.writer, "{}", message)?;
        self.writer.flush()?;
        Ok(())
    }

    fn receive<T: Wire>(&mut self) -> PlayerResult<T> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            warn!("The remote player closed the connection.");
            return Err(PlayerError::Disconnected);
        }

        let line = strip_line_end(&line);
        trace!("Received {}", line);
        Ok(T::decode(line)?)
    }

    /// Sends `message`, and decodes the answer.
    fn ask<T: Wire>(&mut self, message: Message) -> PlayerResult<T> {
        self.send(message)?;
        self.receive()
    }
}

impl<R: BufRead + Send, W: Write + Send> Player for RemotePlayerProxy<R, W> {
    fn init_players(&mut self, own_id: PlayerId, player_names: &[String; 2]) -> PlayerResult<()> {
        self.send(
            Message::new(MessageId::InitPlayers)
                .with(&own_id)?
                .with(player_names)?,
        )
    }

    fn receive_info(&mut self, info: &str) -> PlayerResult<()> {
        self.send(Message::new(MessageId::ReceiveInfo).with(&info.to_owned())?)
    }

    fn update_state(
        &mut self,
        new_state: &PublicGameState,
        own_state: &PlayerState,
    ) -> PlayerResult<()> {
        self.send(
            Message::new(MessageId::UpdateState)
                .with(new_state)?
                .with(own_state)?,
        )
    }

    fn set_initial_ticket_choice(&mut self, tickets: SortedBag<Ticket>) -> PlayerResult<()> {
        self.send(Message::new(MessageId::SetInitialTickets).with(&tickets)?)
    }

    fn choose_initial_tickets(&mut self) -> PlayerResult<SortedBag<Ticket>> {
        self.ask(Message::new(MessageId::ChooseInitialTickets))
    }

    fn next_turn_kind(&mut self) -> PlayerResult<TurnKind> {
        self.ask(Message::new(MessageId::NextTurn))
    }

    fn choose_tickets(&mut self, options: SortedBag<Ticket>) -> PlayerResult<SortedBag<Ticket>> {
        self.ask(Message::new(MessageId::ChooseTickets).with(&options)?)
    }

    fn draw_slot(&mut self) -> PlayerResult<i32> {
        self.ask(Message::new(MessageId::DrawSlot))
    }

    fn claimed_route(&mut self) -> PlayerResult<Route> {
        self.ask(Message::new(MessageId::Route))
    }

    fn initial_claim_cards(&mut self) -> PlayerResult<SortedBag<Card>> {
        self.ask(Message::new(MessageId::Cards))
    }

    fn choose_additional_cards(
        &mut self,
        options: Vec<SortedBag<Card>>,
    ) -> PlayerResult<SortedBag<Card>> {
        self.ask(Message::new(MessageId::ChooseAdditionalCards).with(&options)?)
    }
}
