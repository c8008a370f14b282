use heapless::Vec;

use crate::{
    io::Error,
    packet::{ControlPacket, UnsubscribePacket},
    tests::unit::packet::{decode, MAX_TOPICS},
    types::MqttString,
};

const ONE_TOPIC: &[u8] = &[
    0xA2, 0x07, // UNSUBSCRIBE, remaining length 7
    0x00, 0x02, // packet identifier 2
    0x00, 0x03, 0x61, 0x2F, 0x62, // "a/b"
];

fn one_topic_packet() -> UnsubscribePacket<'static, MAX_TOPICS> {
    let mut topics = Vec::new();
    topics.push(MqttString::from_str("a/b").unwrap()).unwrap();
    UnsubscribePacket {
        packet_identifier: 2,
        topics,
    }
}

#[test]
fn encode_one_topic() {
    let mut buffer = [0u8; 16];
    let len = one_topic_packet().encode(&mut buffer).unwrap();
    assert_eq!(&buffer[..len], ONE_TOPIC);
}

#[test]
fn decode_one_topic() {
    assert_eq!(
        decode(ONE_TOPIC),
        Ok(ControlPacket::Unsubscribe(one_topic_packet()))
    );
}

#[test]
fn rejects_empty_topic_list() {
    assert_eq!(decode(&[0xA2, 0x02, 0x00, 0x02]), Err(Error::MalformedPacket));
}

#[test]
fn rejects_wrong_fixed_header_flags() {
    assert_eq!(
        decode(&[0xA0, 0x07, 0x00, 0x02, 0x00, 0x03, 0x61, 0x2F, 0x62]),
        Err(Error::MalformedFixedHeader)
    );
}
