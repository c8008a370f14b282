use crate::{
    header::PacketType,
    io::{BuffReader, Error},
    packet::encode_packet,
};

/// The server's verdict on a CONNECT attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConnectReturnCode {
    Accepted = 0,
    UnacceptableProtocolVersion = 1,
    IdentifierRejected = 2,
    ServerUnavailable = 3,
    BadUserNameOrPassword = 4,
    NotAuthorized = 5,
}

impl ConnectReturnCode {
    fn try_from_byte(byte: u8) -> Result<Self, Error> {
        match byte {
            0 => Ok(Self::Accepted),
            1 => Ok(Self::UnacceptableProtocolVersion),
            2 => Ok(Self::IdentifierRejected),
            3 => Ok(Self::ServerUnavailable),
            4 => Ok(Self::BadUserNameOrPassword),
            5 => Ok(Self::NotAuthorized),
            _ => Err(Error::MalformedPacket),
        }
    }
}

/// The server's reply to CONNECT.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConnackPacket {
    /// Whether the server resumed a stored session. Only meaningful when
    /// `return_code` is `Accepted`.
    pub session_present: bool,
    pub return_code: ConnectReturnCode,
}

impl ConnackPacket {
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, Error> {
        encode_packet(buffer, PacketType::Connack, 0x00, 2, |writer| {
            writer.write_u8(self.session_present as u8)?;
            writer.write_u8(self.return_code as u8)
        })
    }

    pub(crate) fn decode(reader: &mut BuffReader<'_>) -> Result<Self, Error> {
        let ack_flags = reader.read_u8()?;
        // Bits 1-7 of the acknowledge flags are reserved.
        if ack_flags & 0xFE != 0 {
            return Err(Error::MalformedPacket);
        }
        let return_code = ConnectReturnCode::try_from_byte(reader.read_u8()?)?;

        let session_present = ack_flags & 0x01 != 0;
        // The session present flag must be 0 on a refused connection.
        if session_present && return_code != ConnectReturnCode::Accepted {
            return Err(Error::MalformedPacket);
        }

        Ok(Self {
            session_present,
            return_code,
        })
    }
}
