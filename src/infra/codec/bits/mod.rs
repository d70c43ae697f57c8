//! Low-level components dedicated to bit manipulation for CAN payloads.
//! Fields use LSB0 (Intel) numbering: bit 0 of a field maps to absolute bit
//! `start_bit` of the buffer, and bit 0 of a byte is its least significant bit.
//! Multi-bit fields are assembled low-to-high across byte boundaries.
use crate::error::BitFieldError;

/// Widest field the codec handles (raw values are `u32`).
pub const MAX_FIELD_BITS: u8 = 32;

/// Classic CAN payload size in bytes.
pub const PAYLOAD_LEN: usize = 8;

/// Read `bit_length` bits starting at absolute bit `start_bit` and return them as a `u32`.
///
/// The most significant extracted bit lands at bit `bit_length - 1` of the result.
pub fn read_field(buffer: &[u8], start_bit: usize, bit_length: u8) -> Result<u32, BitFieldError> {
    check_bounds(buffer.len(), start_bit, bit_length)?;
    Ok(read_unchecked(buffer, start_bit, bit_length))
}

/// Write the low `bit_length` bits of `value` at absolute bit `start_bit`.
///
/// This is an in-place modify: every bit outside `[start_bit, start_bit + bit_length)`
/// keeps its previous state, so several signals can share one buffer. Bits of
/// `value` above `bit_length` are dropped without error. Bounds are validated
/// before the buffer is touched.
pub fn write_field(
    buffer: &mut [u8],
    start_bit: usize,
    bit_length: u8,
    value: u32,
) -> Result<(), BitFieldError> {
    check_bounds(buffer.len(), start_bit, bit_length)?;
    write_unchecked(buffer, start_bit, bit_length, value);
    Ok(())
}

fn check_bounds(buffer_len: usize, start_bit: usize, bit_length: u8) -> Result<(), BitFieldError> {
    let available = buffer_len * 8;
    let fits = start_bit
        .checked_add(bit_length as usize)
        .is_some_and(|end| end <= available);

    if !(1..=MAX_FIELD_BITS).contains(&bit_length) || !fits {
        return Err(BitFieldError::OutOfRange {
            start_bit,
            bit_length,
            available,
        });
    }
    Ok(())
}

fn read_unchecked(buffer: &[u8], start_bit: usize, bit_length: u8) -> u32 {
    let num_bits = bit_length as usize;
    let mut result: u32 = 0;
    let mut bits_read = 0;

    while bits_read < num_bits {
        let current_byte_index = (start_bit + bits_read) / 8;
        let current_bit_offset = (start_bit + bits_read) % 8;

        // Number of bits available within the current byte.
        let bits_this_iteration = (8 - current_bit_offset).min(num_bits - bits_read);

        let mask = ((1u16 << bits_this_iteration) - 1) as u8;
        let masked_value = (buffer[current_byte_index] >> current_bit_offset) & mask;

        result |= (masked_value as u32) << bits_read;
        bits_read += bits_this_iteration;
    }
    result
}

fn write_unchecked(buffer: &mut [u8], start_bit: usize, bit_length: u8, value: u32) {
    let num_bits = bit_length as usize;
    let mut val_to_write = value;
    let mut bits_written = 0;

    while bits_written < num_bits {
        let current_byte_index = (start_bit + bits_written) / 8;
        let current_bit_offset = (start_bit + bits_written) % 8;

        let bits_this_iteration = (8 - current_bit_offset).min(num_bits - bits_written);

        // Clear then set only the bits owned by the field.
        let mask = ((1u16 << bits_this_iteration) - 1) as u8;
        buffer[current_byte_index] &= !(mask << current_bit_offset);
        buffer[current_byte_index] |= (val_to_write as u8 & mask) << current_bit_offset;

        val_to_write >>= bits_this_iteration;
        bits_written += bits_this_iteration;
    }
}

//==================================================================================BITFIELD

/// Field layout validated once against an 8-byte payload.
///
/// Once built, reads and writes on a `[u8; PAYLOAD_LEN]` cannot fail, which keeps
/// bounds checking in a single place instead of at every call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BitField {
    start_bit: u8,
    bit_length: u8,
}

impl BitField {
    /// Validate a layout: `bit_length` in `1..=32` and `start_bit + bit_length <= 64`.
    pub const fn new(start_bit: u8, bit_length: u8) -> Result<Self, BitFieldError> {
        let end = start_bit as usize + bit_length as usize;
        if bit_length == 0 || bit_length > MAX_FIELD_BITS || end > PAYLOAD_LEN * 8 {
            return Err(BitFieldError::OutOfRange {
                start_bit: start_bit as usize,
                bit_length,
                available: PAYLOAD_LEN * 8,
            });
        }
        Ok(Self {
            start_bit,
            bit_length,
        })
    }

    /// Absolute position of the field's least significant bit.
    #[inline]
    pub const fn start_bit(&self) -> u8 {
        self.start_bit
    }

    #[inline]
    pub const fn bit_length(&self) -> u8 {
        self.bit_length
    }

    /// First bit past the field.
    #[inline]
    pub const fn end_bit(&self) -> u8 {
        self.start_bit + self.bit_length
    }

    /// Largest raw value the field can hold without truncation.
    pub const fn max_raw(&self) -> u32 {
        if self.bit_length == MAX_FIELD_BITS {
            u32::MAX
        } else {
            (1u32 << self.bit_length) - 1
        }
    }

    /// Extract the raw value from a payload.
    pub fn read(&self, payload: &[u8; PAYLOAD_LEN]) -> u32 {
        read_unchecked(payload, self.start_bit as usize, self.bit_length)
    }

    /// Store the low bits of `value` into a payload, leaving other bits untouched.
    pub fn write(&self, payload: &mut [u8; PAYLOAD_LEN], value: u32) {
        write_unchecked(payload, self.start_bit as usize, self.bit_length, value)
    }
}
