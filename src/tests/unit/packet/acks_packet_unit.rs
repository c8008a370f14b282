use crate::{
    io::Error,
    packet::{
        ControlPacket, PubackPacket, PubcompPacket, PubrecPacket, PubrelPacket, UnsubackPacket,
    },
    tests::unit::packet::decode,
};

#[test]
fn encode_bytes() {
    let mut buffer = [0u8; 4];

    let len = PubackPacket::new(0x1234).encode(&mut buffer).unwrap();
    assert_eq!(&buffer[..len], &[0x40, 0x02, 0x12, 0x34]);

    let len = PubrecPacket::new(0x1234).encode(&mut buffer).unwrap();
    assert_eq!(&buffer[..len], &[0x50, 0x02, 0x12, 0x34]);

    // PUBREL is the only acknowledgement with flags 0x02.
    let len = PubrelPacket::new(0x1234).encode(&mut buffer).unwrap();
    assert_eq!(&buffer[..len], &[0x62, 0x02, 0x12, 0x34]);

    let len = PubcompPacket::new(0x1234).encode(&mut buffer).unwrap();
    assert_eq!(&buffer[..len], &[0x70, 0x02, 0x12, 0x34]);

    let len = UnsubackPacket::new(0x1234).encode(&mut buffer).unwrap();
    assert_eq!(&buffer[..len], &[0xB0, 0x02, 0x12, 0x34]);
}

#[test]
fn decode_bytes() {
    assert_eq!(
        decode(&[0x40, 0x02, 0x12, 0x34]),
        Ok(ControlPacket::Puback(PubackPacket::new(0x1234)))
    );
    assert_eq!(
        decode(&[0x62, 0x02, 0x12, 0x34]),
        Ok(ControlPacket::Pubrel(PubrelPacket::new(0x1234)))
    );
    assert_eq!(
        decode(&[0xB0, 0x02, 0x00, 0x01]),
        Ok(ControlPacket::Unsuback(UnsubackPacket::new(1)))
    );
}

#[test]
fn pubrel_without_its_flags_is_malformed() {
    assert_eq!(
        decode(&[0x60, 0x02, 0x12, 0x34]),
        Err(Error::MalformedFixedHeader)
    );
}

#[test]
fn puback_with_flags_is_malformed() {
    assert_eq!(
        decode(&[0x42, 0x02, 0x12, 0x34]),
        Err(Error::MalformedFixedHeader)
    );
}

#[test]
fn remaining_length_must_be_exactly_two() {
    assert_eq!(
        decode(&[0x40, 0x03, 0x12, 0x34, 0x00]),
        Err(Error::MalformedPacket)
    );
    assert_eq!(decode(&[0x40, 0x01, 0x12]), Err(Error::MalformedPacket));
}
