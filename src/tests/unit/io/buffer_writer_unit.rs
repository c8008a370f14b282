use crate::{
    io::{BuffWriter, Error},
    types::{MqttBinary, MqttString},
};

#[test]
fn writes_fields_in_sequence() {
    let mut buffer = [0u8; 7];
    let mut writer = BuffWriter::new(&mut buffer);

    writer.write_u8(0x10).unwrap();
    writer.write_u16(0x1234).unwrap();
    writer
        .write_binary(MqttBinary::try_from([0xAA, 0xBB].as_slice()).unwrap())
        .unwrap();
    assert_eq!(writer.position(), 7);
    assert_eq!(buffer, [0x10, 0x12, 0x34, 0x00, 0x02, 0xAA, 0xBB]);
}

#[test]
fn writes_length_prefixed_string() {
    let mut buffer = [0u8; 5];
    let mut writer = BuffWriter::new(&mut buffer);

    writer
        .write_string(MqttString::from_str("a/b").unwrap())
        .unwrap();
    assert_eq!(buffer, [0x00, 0x03, 0x61, 0x2F, 0x62]);
}

#[test]
fn overflow_is_insufficient_buffer_size() {
    let mut buffer = [0u8; 2];
    let mut writer = BuffWriter::new(&mut buffer);

    writer.write_u16(0xFFFF).unwrap();
    assert_eq!(writer.write_u8(0x00), Err(Error::InsufficientBufferSize));
    assert_eq!(
        writer.write_slice(&[0x01]),
        Err(Error::InsufficientBufferSize)
    );
}

#[test]
fn slice_overflow_leaves_buffer_untouched() {
    let mut buffer = [0u8; 2];
    let mut writer = BuffWriter::new(&mut buffer);

    assert_eq!(
        writer.write_slice(&[0x01, 0x02, 0x03]),
        Err(Error::InsufficientBufferSize)
    );
    assert_eq!(writer.position(), 0);
    assert_eq!(buffer, [0x00, 0x00]);
}
