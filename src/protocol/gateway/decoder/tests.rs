//! Unit tests for the receive-path decoder, focused on threshold edges.
use super::*;
use crate::infra::codec::bits::write_field;
use crate::protocol::transport::can_id::standard_id;

/// Frame with `raw` written at `[start_bit, start_bit + bit_length)`.
fn frame_with(id: u16, start_bit: usize, bit_length: u8, raw: u32) -> CanFrame {
    let mut data = [0u8; 8];
    write_field(&mut data, start_bit, bit_length, raw).unwrap();
    CanFrame::new(standard_id(id), data)
}

fn decode_standard(frame: &CanFrame) -> Option<DecodedSample> {
    decode(&SignalTable::standard(), frame)
}

#[test]
/// Voltage warns at exactly 15.00 V (`>=`).
fn test_voltage_threshold_inclusive() {
    let sample = decode_standard(&frame_with(0x400, 6, 12, 1500)).unwrap();
    assert_eq!(sample.raw, 1500);
    assert_eq!(sample.physical, 15.0);
    assert!(sample.is_warning);

    let below = decode_standard(&frame_with(0x400, 6, 12, 1499)).unwrap();
    assert!(!below.is_warning);
}

#[test]
/// Current warns at exactly 10.0 A (`>=`).
fn test_current_threshold_inclusive() {
    let sample = decode_standard(&frame_with(0x500, 16, 8, 100)).unwrap();
    assert_eq!(sample.physical, 10.0);
    assert!(sample.is_warning);

    let below = decode_standard(&frame_with(0x500, 16, 8, 99)).unwrap();
    assert!(!below.is_warning);
}

#[test]
/// Temperature only warns strictly above 42.0 C (`>`).
fn test_temperature_threshold_strict() {
    let at = decode_standard(&frame_with(0x600, 32, 12, 420)).unwrap();
    assert_eq!(at.physical, 42.0);
    assert!(!at.is_warning);

    let above = decode_standard(&frame_with(0x600, 32, 12, 421)).unwrap();
    assert!(above.is_warning);
}

#[test]
/// Unknown identifiers produce no sample.
fn test_unknown_identifier_is_ignored() {
    let frame = CanFrame::new(standard_id(0x111), [0xFF; 8]);
    assert!(decode_standard(&frame).is_none());
}

#[test]
/// Bits outside the signal's field have no influence on the sample.
fn test_foreign_bits_are_masked() {
    let mut data = [0xFFu8; 8];
    write_field(&mut data, 6, 12, 1200).unwrap();
    let sample = decode_standard(&CanFrame::new(standard_id(0x400), data)).unwrap();
    assert_eq!(sample.raw, 1200);
    assert_eq!(sample.physical, 12.0);
    assert!(!sample.is_warning);
}

#[test]
/// The sample keeps the frame identifier and a link to its descriptor.
fn test_sample_metadata() {
    let sample = decode_standard(&frame_with(0x600, 32, 12, 250)).unwrap();
    assert_eq!(sample.frame_id, standard_id(0x600));
    assert_eq!(sample.descriptor.name, "TEMP");
    assert_eq!(sample.physical, 25.0);
}

#[test]
/// A short frame decodes its missing bytes as zero.
fn test_short_frame() {
    let frame = CanFrame::from_slice(standard_id(0x500), &[0x00, 0x00, 0x50]).unwrap();
    let sample = decode_standard(&frame).unwrap();
    assert_eq!(sample.raw, 0x50);
    assert_eq!(sample.physical, 8.0);
}
