use heapless::Vec;

use crate::{
    io::Error,
    packet::{ControlPacket, SubackPacket, SubackReturnCode},
    tests::unit::packet::{decode, MAX_TOPICS},
    types::QoS,
};

const MIXED: &[u8] = &[
    0x90, 0x05, // SUBACK, remaining length 5
    0x00, 0x01, // packet identifier 1
    0x01, 0x02, 0x80, // granted QoS 1, granted QoS 2, failure
];

fn mixed_packet() -> SubackPacket<MAX_TOPICS> {
    let mut return_codes = Vec::new();
    return_codes
        .push(SubackReturnCode::Success(QoS::AtLeastOnce))
        .unwrap();
    return_codes
        .push(SubackReturnCode::Success(QoS::ExactlyOnce))
        .unwrap();
    return_codes.push(SubackReturnCode::Failure).unwrap();
    SubackPacket {
        packet_identifier: 1,
        return_codes,
    }
}

#[test]
fn decode_mixed_return_codes() {
    assert_eq!(decode(MIXED), Ok(ControlPacket::Suback(mixed_packet())));
}

#[test]
fn encode_mixed_return_codes() {
    let mut buffer = [0u8; 8];
    let len = mixed_packet().encode(&mut buffer).unwrap();
    assert_eq!(&buffer[..len], MIXED);
}

#[test]
fn rejects_invalid_return_code() {
    assert_eq!(
        decode(&[0x90, 0x03, 0x00, 0x01, 0x03]),
        Err(Error::MalformedPacket)
    );
}

#[test]
fn rejects_empty_return_code_list() {
    assert_eq!(decode(&[0x90, 0x02, 0x00, 0x01]), Err(Error::MalformedPacket));
}
