use crate::{
    header::PacketType,
    io::{BuffReader, Error},
    packet::encode_packet,
    types::{MqttBinary, MqttString, QoS, Will},
};

const PROTOCOL_NAME: &str = "MQTT";
const PROTOCOL_LEVEL: u8 = 4;

const FLAG_USERNAME: u8 = 0x80;
const FLAG_PASSWORD: u8 = 0x40;
const FLAG_WILL_RETAIN: u8 = 0x20;
const FLAG_WILL: u8 = 0x04;
const FLAG_CLEAN_SESSION: u8 = 0x02;

/// The first packet of every session, sent by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConnectPacket<'a> {
    pub client_identifier: MqttString<'a>,
    /// Maximum silence the client promises between packets, in seconds.
    /// Zero disables the keep alive mechanism.
    pub keep_alive_seconds: u16,
    /// Whether the server must discard any session state from a previous
    /// connection under the same client identifier.
    pub clean_session: bool,
    pub will: Option<Will<'a>>,
    pub username: Option<MqttString<'a>>,
    /// Requires `username` to also be present.
    pub password: Option<MqttBinary<'a>>,
}

impl<'a> ConnectPacket<'a> {
    fn connect_flags(&self) -> u8 {
        let mut flags = 0;
        if self.username.is_some() {
            flags |= FLAG_USERNAME;
        }
        if self.password.is_some() {
            flags |= FLAG_PASSWORD;
        }
        if let Some(will) = &self.will {
            flags |= FLAG_WILL | will.qos.into_bits(3);
            if will.retain {
                flags |= FLAG_WILL_RETAIN;
            }
        }
        if self.clean_session {
            flags |= FLAG_CLEAN_SESSION;
        }
        flags
    }

    fn body_len(&self) -> u32 {
        // Protocol name, level, connect flags and keep alive.
        let mut len = 6 + 1 + 1 + 2;
        len += self.client_identifier.encoded_len();
        if let Some(will) = &self.will {
            len += will.encoded_len();
        }
        if let Some(username) = &self.username {
            len += username.encoded_len();
        }
        if let Some(password) = &self.password {
            len += password.encoded_len();
        }
        len
    }

    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, Error> {
        if self.password.is_some() && self.username.is_none() {
            return Err(Error::MalformedPacket);
        }
        if self.will.is_some_and(|will| will.topic.is_empty()) {
            return Err(Error::MalformedPacket);
        }
        // A zero-byte client identifier requires a clean session.
        if self.client_identifier.is_empty() && !self.clean_session {
            return Err(Error::MalformedPacket);
        }

        encode_packet(
            buffer,
            PacketType::Connect,
            0x00,
            self.body_len(),
            |writer| {
                writer.write_string(MqttString::from_str(PROTOCOL_NAME)?)?;
                writer.write_u8(PROTOCOL_LEVEL)?;
                writer.write_u8(self.connect_flags())?;
                writer.write_u16(self.keep_alive_seconds)?;
                writer.write_string(self.client_identifier)?;
                if let Some(will) = &self.will {
                    writer.write_string(will.topic)?;
                    writer.write_binary(will.payload)?;
                }
                if let Some(username) = &self.username {
                    writer.write_string(*username)?;
                }
                if let Some(password) = &self.password {
                    writer.write_binary(*password)?;
                }
                Ok(())
            },
        )
    }

    pub(crate) fn decode(reader: &mut BuffReader<'a>) -> Result<Self, Error> {
        let protocol_name = reader.read_string()?;
        let protocol_level = reader.read_u8()?;
        if protocol_name.as_str() != PROTOCOL_NAME || protocol_level != PROTOCOL_LEVEL {
            return Err(Error::MalformedPacket);
        }

        let flags = reader.read_u8()?;
        // Bit 0 is reserved and must be zero.
        if flags & 0x01 != 0 {
            return Err(Error::MalformedPacket);
        }
        let keep_alive_seconds = reader.read_u16()?;
        let client_identifier = reader.read_string()?;
        if client_identifier.is_empty() && flags & FLAG_CLEAN_SESSION == 0 {
            return Err(Error::MalformedPacket);
        }

        let will = if flags & FLAG_WILL != 0 {
            let qos = QoS::try_from_bits((flags >> 3) & 0x03)?;
            let topic = reader.read_string()?;
            if topic.is_empty() {
                return Err(Error::MalformedPacket);
            }
            let payload = reader.read_binary()?;
            Some(Will::new(topic, payload, qos, flags & FLAG_WILL_RETAIN != 0))
        } else if flags & (FLAG_WILL_RETAIN | 0x18) != 0 {
            // Will QoS and retain require the will flag.
            return Err(Error::MalformedPacket);
        } else {
            None
        };

        if flags & FLAG_PASSWORD != 0 && flags & FLAG_USERNAME == 0 {
            return Err(Error::MalformedPacket);
        }
        let username = if flags & FLAG_USERNAME != 0 {
            Some(reader.read_string()?)
        } else {
            None
        };
        let password = if flags & FLAG_PASSWORD != 0 {
            Some(reader.read_binary()?)
        } else {
            None
        };

        Ok(Self {
            client_identifier,
            keep_alive_seconds,
            clean_session: flags & FLAG_CLEAN_SESSION != 0,
            will,
            username,
            password,
        })
    }
}
