use heapless::Vec;

use crate::{
    io::Error,
    packet::{ControlPacket, SubscribePacket},
    tests::unit::packet::{decode, MAX_TOPICS},
    types::{MqttString, QoS, SubscribeTopic},
};

const TWO_TOPICS: &[u8] = &[
    0x82, 0x0C, // SUBSCRIBE, remaining length 12
    0x00, 0x01, // packet identifier 1
    0x00, 0x03, 0x61, 0x2F, 0x62, 0x01, // "a/b" at QoS 1
    0x00, 0x01, 0x23, 0x02, // "#" at QoS 2
];

fn two_topics_packet() -> SubscribePacket<'static, MAX_TOPICS> {
    let mut topics = Vec::new();
    topics
        .push(SubscribeTopic::new(
            MqttString::from_str("a/b").unwrap(),
            QoS::AtLeastOnce,
        ))
        .unwrap();
    topics
        .push(SubscribeTopic::new(
            MqttString::from_str("#").unwrap(),
            QoS::ExactlyOnce,
        ))
        .unwrap();
    SubscribePacket {
        packet_identifier: 1,
        topics,
    }
}

#[test]
fn encode_two_topics() {
    let mut buffer = [0u8; 16];
    let len = two_topics_packet().encode(&mut buffer).unwrap();
    assert_eq!(&buffer[..len], TWO_TOPICS);
}

#[test]
fn decode_two_topics() {
    assert_eq!(
        decode(TWO_TOPICS),
        Ok(ControlPacket::Subscribe(two_topics_packet()))
    );
}

#[test]
fn rejects_empty_topic_list() {
    assert_eq!(decode(&[0x82, 0x02, 0x00, 0x01]), Err(Error::MalformedPacket));
}

#[test]
fn rejects_reserved_requested_qos_bits() {
    assert_eq!(
        decode(&[0x82, 0x06, 0x00, 0x01, 0x00, 0x01, 0x23, 0x04]),
        Err(Error::MalformedPacket)
    );
}

#[test]
fn rejects_wrong_fixed_header_flags() {
    assert_eq!(
        decode(&[0x80, 0x06, 0x00, 0x01, 0x00, 0x01, 0x23, 0x01]),
        Err(Error::MalformedFixedHeader)
    );
}

#[test]
fn encode_rejects_empty_topic_list() {
    let packet = SubscribePacket::<'_, MAX_TOPICS> {
        packet_identifier: 1,
        topics: Vec::new(),
    };

    let mut buffer = [0u8; 8];
    assert_eq!(packet.encode(&mut buffer), Err(Error::MalformedPacket));
}
