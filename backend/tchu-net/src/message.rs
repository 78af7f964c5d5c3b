use crate::codec::Wire;
use crate::error::{ProtocolError, ProtocolResult};

use std::fmt;
use std::str::FromStr;
use strum_macros::{Display, EnumCount, EnumIter, EnumString};

/// Tags of the messages a proxy sends to a client, one per `Player` method.
#[derive(Clone, Copy, Debug, Display, EnumCount, EnumIter, EnumString, Eq, Hash, PartialEq)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageId {
    InitPlayers,
    ReceiveInfo,
    UpdateState,
    SetInitialTickets,
    ChooseInitialTickets,
    NextTurn,
    ChooseTickets,
    DrawSlot,
    Route,
    Cards,
    ChooseAdditionalCards,
}

impl MessageId {
    /// Number of arguments following the tag.
    pub fn field_count(&self) -> usize {
        match self {
            MessageId::InitPlayers | MessageId::UpdateState => 2,
            MessageId::ReceiveInfo
            | MessageId::SetInitialTickets
            | MessageId::ChooseTickets
            | MessageId::ChooseAdditionalCards => 1,
            MessageId::ChooseInitialTickets
            | MessageId::NextTurn
            | MessageId::DrawSlot
            | MessageId::Route
            | MessageId::Cards => 0,
        }
    }

    /// Whether the client answers this message with a line.
    pub fn expects_reply(&self) -> bool {
        !matches!(
            self,
            MessageId::InitPlayers
                | MessageId::ReceiveInfo
                | MessageId::UpdateState
                | MessageId::SetInitialTickets
        )
    }
}

/// Removes the line terminator, if any.
pub(crate) fn strip_line_end(line: &str) -> &str {
    line.trim_end_matches(|c| c == '\n' || c == '\r')
}

/// One line of the protocol: a tag, followed by its space-separated, encoded arguments.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Message {
    id: MessageId,
    fields: Vec<String>,
}

impl Message {
    pub fn new(id: MessageId) -> Self {
        Self {
            id,
            fields: Vec::with_capacity(id.field_count()),
        }
    }

    /// Appends an argument.
    pub fn with<T: Wire>(mut self, value: &T) -> ProtocolResult<Self> {
        self.fields.push(value.encode()?);
        Ok(self)
    }

    #[inline]
    pub fn id(&self) -> MessageId {
        self.id
    }

    #[inline]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Decodes the argument at `index`.
    pub fn field<T: Wire>(&self, index: usize) -> ProtocolResult<T> {
        let field = self.fields.get(index).ok_or(ProtocolError::FieldCount {
            expected: index + 1,
            found: self.fields.len(),
        })?;
        T::decode(field)
    }
}

/// Parses a line, checking the tag and the number of arguments.
///
/// # Example
/// ```
/// use tchu_net::message::{Message, MessageId};
///
/// let message: Message = "RECEIVE_INFO SGk=\n".parse().unwrap();
///
/// assert_eq!(message.id(), MessageId::ReceiveInfo);
/// assert_eq!(message.field::<String>(0).unwrap(), "Hi");
/// assert!("RECEIVE_INFO".parse::<Message>().is_err());
/// ```
impl FromStr for Message {
    type Err = ProtocolError;

    fn from_str(line: &str) -> ProtocolResult<Self> {
        let line = strip_line_end(line);
        let mut parts = line.split(' ');
        let tag = parts.next().unwrap_or_default();
        let id = MessageId::from_str(tag)
            .map_err(|_| ProtocolError::UnknownMessage(tag.to_owned()))?;

        let fields: Vec<String> = parts.map(String::from).collect();
        if fields.len() != id.field_count() {
            return Err(ProtocolError::FieldCount {
                expected: id.field_count(),
                found: fields.len(),
            });
        }

        Ok(Self { id, fields })
    }
}

/// The line to send, without its terminator.
impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)?;
        for field in &self.fields {
            write!(f, " {}", field)?;
        }
        Ok(())
    }
}
