use crate::{
    io::Error,
    packet::{ConnackPacket, ConnectReturnCode, ControlPacket},
    tests::unit::packet::decode,
};

#[test]
fn decode_accepted_with_session() {
    assert_eq!(
        decode(&[0x20, 0x02, 0x01, 0x00]),
        Ok(ControlPacket::Connack(ConnackPacket {
            session_present: true,
            return_code: ConnectReturnCode::Accepted,
        }))
    );
}

#[test]
fn decode_refused() {
    assert_eq!(
        decode(&[0x20, 0x02, 0x00, 0x05]),
        Ok(ControlPacket::Connack(ConnackPacket {
            session_present: false,
            return_code: ConnectReturnCode::NotAuthorized,
        }))
    );
}

#[test]
fn encode_roundtrip_bytes() {
    let mut buffer = [0u8; 4];
    let len = ConnackPacket {
        session_present: false,
        return_code: ConnectReturnCode::BadUserNameOrPassword,
    }
    .encode(&mut buffer)
    .unwrap();
    assert_eq!(&buffer[..len], &[0x20, 0x02, 0x00, 0x04]);
}

#[test]
fn rejects_reserved_acknowledge_flag_bits() {
    assert_eq!(
        decode(&[0x20, 0x02, 0x02, 0x00]),
        Err(Error::MalformedPacket)
    );
}

#[test]
fn rejects_session_present_on_refusal() {
    assert_eq!(
        decode(&[0x20, 0x02, 0x01, 0x05]),
        Err(Error::MalformedPacket)
    );
}

#[test]
fn rejects_unknown_return_code() {
    assert_eq!(
        decode(&[0x20, 0x02, 0x00, 0x06]),
        Err(Error::MalformedPacket)
    );
}

#[test]
fn rejects_wrong_remaining_length() {
    assert_eq!(
        decode(&[0x20, 0x03, 0x00, 0x00, 0x00]),
        Err(Error::MalformedPacket)
    );
}
