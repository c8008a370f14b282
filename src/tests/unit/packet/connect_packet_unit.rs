use crate::{
    io::Error,
    packet::{ConnectPacket, ControlPacket},
    tests::unit::packet::decode,
    types::{MqttBinary, MqttString, QoS, Will},
};

const PLAIN: &[u8] = &[
    0x10, 0x10, // CONNECT, remaining length 16
    0x00, 0x04, 0x4D, 0x51, 0x54, 0x54, // "MQTT"
    0x04, // protocol level 4
    0x02, // clean session
    0x00, 0x3C, // keep alive 60
    0x00, 0x04, 0x72, 0x75, 0x73, 0x74, // "rust"
];

fn plain_packet() -> ConnectPacket<'static> {
    ConnectPacket {
        client_identifier: MqttString::from_str("rust").unwrap(),
        keep_alive_seconds: 60,
        clean_session: true,
        will: None,
        username: None,
        password: None,
    }
}

#[test]
fn encode_plain() {
    let mut buffer = [0u8; 32];
    let len = plain_packet().encode(&mut buffer).unwrap();
    assert_eq!(&buffer[..len], PLAIN);
}

#[test]
fn decode_plain() {
    assert_eq!(
        decode(PLAIN),
        Ok(ControlPacket::Connect(plain_packet()))
    );
}

const FULL: &[u8] = &[
    0x10, 0x1C, // CONNECT, remaining length 28
    0x00, 0x04, 0x4D, 0x51, 0x54, 0x54, // "MQTT"
    0x04, // protocol level 4
    0xEE, // username, password, will retain, will QoS 1, will, clean session
    0x00, 0x1E, // keep alive 30
    0x00, 0x01, 0x63, // client identifier "c"
    0x00, 0x03, 0x77, 0x2F, 0x74, // will topic "w/t"
    0x00, 0x02, 0x01, 0x02, // will payload
    0x00, 0x01, 0x75, // username "u"
    0x00, 0x01, 0xAA, // password
];

fn full_packet() -> ConnectPacket<'static> {
    ConnectPacket {
        client_identifier: MqttString::from_str("c").unwrap(),
        keep_alive_seconds: 30,
        clean_session: true,
        will: Some(Will::new(
            MqttString::from_str("w/t").unwrap(),
            MqttBinary::try_from([0x01, 0x02].as_slice()).unwrap(),
            QoS::AtLeastOnce,
            true,
        )),
        username: Some(MqttString::from_str("u").unwrap()),
        password: Some(MqttBinary::try_from([0xAA].as_slice()).unwrap()),
    }
}

#[test]
fn encode_with_will_and_credentials() {
    let mut buffer = [0u8; 64];
    let len = full_packet().encode(&mut buffer).unwrap();
    assert_eq!(&buffer[..len], FULL);
}

#[test]
fn decode_with_will_and_credentials() {
    assert_eq!(decode(FULL), Ok(ControlPacket::Connect(full_packet())));
}

#[test]
fn encode_rejects_password_without_username() {
    let mut packet = plain_packet();
    packet.password = Some(MqttBinary::try_from([0xAA].as_slice()).unwrap());

    let mut buffer = [0u8; 32];
    assert_eq!(packet.encode(&mut buffer), Err(Error::MalformedPacket));
}

#[test]
fn encode_rejects_empty_identifier_without_clean_session() {
    let mut packet = plain_packet();
    packet.client_identifier = MqttString::from_str("").unwrap();
    packet.clean_session = false;

    let mut buffer = [0u8; 32];
    assert_eq!(packet.encode(&mut buffer), Err(Error::MalformedPacket));
}

#[test]
fn decode_rejects_wrong_protocol_name() {
    let mut bytes = [0u8; PLAIN.len()];
    bytes.copy_from_slice(PLAIN);
    bytes[4] = b'X';

    assert_eq!(decode(&bytes), Err(Error::MalformedPacket));
}

#[test]
fn decode_rejects_reserved_connect_flag() {
    let mut bytes = [0u8; PLAIN.len()];
    bytes.copy_from_slice(PLAIN);
    bytes[9] |= 0x01;

    assert_eq!(decode(&bytes), Err(Error::MalformedPacket));
}

#[test]
fn decode_rejects_will_qos_without_will_flag() {
    let mut bytes = [0u8; PLAIN.len()];
    bytes.copy_from_slice(PLAIN);
    bytes[9] = 0x0A; // will QoS 1 but no will flag

    assert_eq!(decode(&bytes), Err(Error::MalformedPacket));
}

#[test]
fn decode_rejects_nonzero_fixed_header_flags() {
    let mut bytes = [0u8; PLAIN.len()];
    bytes.copy_from_slice(PLAIN);
    bytes[0] = 0x11;

    assert_eq!(decode(&bytes), Err(Error::MalformedFixedHeader));
}
