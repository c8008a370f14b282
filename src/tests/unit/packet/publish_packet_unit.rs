use crate::{
    io::Error,
    packet::{ControlPacket, PublishPacket},
    tests::unit::packet::decode,
    types::{IdentifiedQoS, MqttString},
};

const QOS1: &[u8] = &[
    0x32, 0x09, // PUBLISH, QoS 1, remaining length 9
    0x00, 0x03, 0x61, 0x2F, 0x62, // topic "a/b"
    0x00, 0x0A, // packet identifier 10
    0x68, 0x69, // payload "hi"
];

fn qos1_packet() -> PublishPacket<'static> {
    PublishPacket {
        dup: false,
        retain: false,
        qos: IdentifiedQoS::AtLeastOnce(10),
        topic: MqttString::from_str("a/b").unwrap(),
        payload: b"hi",
    }
}

#[test]
fn encode_qos1() {
    let mut buffer = [0u8; 16];
    let len = qos1_packet().encode(&mut buffer).unwrap();
    assert_eq!(&buffer[..len], QOS1);
}

#[test]
fn decode_qos1() {
    assert_eq!(decode(QOS1), Ok(ControlPacket::Publish(qos1_packet())));
}

#[test]
fn qos0_has_no_packet_identifier() {
    let bytes = &[
        0x31, 0x06, // PUBLISH, retain, remaining length 6
        0x00, 0x03, 0x61, 0x2F, 0x62, // topic "a/b"
        0xFF, // payload
    ];

    assert_eq!(
        decode(bytes),
        Ok(ControlPacket::Publish(PublishPacket {
            dup: false,
            retain: true,
            qos: IdentifiedQoS::AtMostOnce,
            topic: MqttString::from_str("a/b").unwrap(),
            payload: &[0xFF],
        }))
    );
}

#[test]
fn empty_payload_is_valid() {
    let bytes = &[0x30, 0x05, 0x00, 0x03, 0x61, 0x2F, 0x62];

    match decode(bytes) {
        Ok(ControlPacket::Publish(p)) => assert!(p.payload.is_empty()),
        other => panic!("unexpected: {:?}", other),
    }
}

#[test]
fn rejects_qos_3() {
    assert_eq!(
        decode(&[0x36, 0x05, 0x00, 0x03, 0x61, 0x2F, 0x62]),
        Err(Error::MalformedPacket)
    );
}

#[test]
fn rejects_dup_at_qos_0() {
    assert_eq!(
        decode(&[0x38, 0x05, 0x00, 0x03, 0x61, 0x2F, 0x62]),
        Err(Error::MalformedPacket)
    );
}

#[test]
fn rejects_zero_packet_identifier() {
    assert_eq!(
        decode(&[0x32, 0x07, 0x00, 0x03, 0x61, 0x2F, 0x62, 0x00, 0x00]),
        Err(Error::MalformedPacket)
    );
}

#[test]
fn rejects_body_shorter_than_topic_length() {
    // Topic length prefix claims 5 bytes but only 2 remain.
    assert_eq!(
        decode(&[0x30, 0x04, 0x00, 0x05, 0x61, 0x62]),
        Err(Error::MalformedString)
    );
}

#[test]
fn encode_rejects_dup_at_qos_0() {
    let packet = PublishPacket {
        dup: true,
        retain: false,
        qos: IdentifiedQoS::AtMostOnce,
        topic: MqttString::from_str("t").unwrap(),
        payload: &[],
    };

    let mut buffer = [0u8; 8];
    assert_eq!(packet.encode(&mut buffer), Err(Error::MalformedPacket));
}
