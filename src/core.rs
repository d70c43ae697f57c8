//! Defines the "data contract" between the signal table and the codec paths.
//!
//! A [`SignalDescriptor`] is the single source of truth for a signal's layout,
//! scaling and warning rule. The decoder reads it to interpret received frames,
//! the encoder reads it to synthesize test frames.
use embedded_can::StandardId;

use crate::infra::codec::bits::BitField;

/// Longest signal name a descriptor may carry, so every listening banner entry
/// fits a single report line.
pub const MAX_SIGNAL_NAME_LEN: usize = 16;

/// How a physical value is compared against its warning threshold.
///
/// The direction is chosen per signal: voltage and current warn at the threshold,
/// temperature only strictly above it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WarnComparison {
    /// `value >= threshold`
    AtLeast,
    /// `value > threshold`
    Above,
}

impl WarnComparison {
    /// Apply the comparison.
    #[inline]
    pub fn exceeds(self, value: f32, threshold: f32) -> bool {
        match self {
            WarnComparison::AtLeast => value >= threshold,
            WarnComparison::Above => value > threshold,
        }
    }

    /// Operator symbol, for diagnostics.
    pub const fn symbol(self) -> &'static str {
        match self {
            WarnComparison::AtLeast => ">=",
            WarnComparison::Above => ">",
        }
    }
}

/// Static layout and threshold record for one signal carried by one frame identifier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalDescriptor {
    /// 1. Short signal name used in report lines (e.g. "VOLT"), at most
    ///    [`MAX_SIGNAL_NAME_LEN`] bytes.
    pub name: &'static str,
    /// 2. Physical unit (e.g. "V").
    pub unit: &'static str,
    /// 3. 11-bit standard identifier of the carrying frame.
    pub frame_id: StandardId,
    /// 4. Bit layout inside the 8-byte payload.
    pub field: BitField,
    /// 5. Divisor applied to the raw value: `physical = raw / scale`.
    pub scale: f32,
    /// 6. Warning threshold, in physical units.
    pub warn_threshold: f32,
    /// 7. Comparison used against `warn_threshold`.
    pub warn_comparison: WarnComparison,
    /// 8. Decimal places shown in report lines.
    pub precision: u8,
}

impl SignalDescriptor {
    /// Convert a raw field value into physical units.
    #[inline]
    pub fn to_physical(&self, raw: u32) -> f32 {
        raw as f32 / self.scale
    }

    /// Convert a physical value into a raw field value.
    ///
    /// Rounds half up (`+ 0.5` then truncate), which is exact on the positive range
    /// these signals use. Negative and NaN inputs saturate to 0, values above
    /// `u32::MAX` saturate to `u32::MAX`; the field write later keeps only the low bits.
    #[inline]
    pub fn to_raw(&self, physical: f32) -> u32 {
        (physical * self.scale + 0.5) as u32
    }

    /// Classify a physical value against this descriptor's threshold.
    #[inline]
    pub fn is_warning(&self, physical: f32) -> bool {
        self.warn_comparison.exceeds(physical, self.warn_threshold)
    }
}

/// Result of decoding one received frame. Consumed immediately by the reporter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecodedSample {
    /// Identifier of the frame the sample came from.
    pub frame_id: StandardId,
    /// Raw field value as read from the payload.
    pub raw: u32,
    /// `raw / scale`.
    pub physical: f32,
    /// Outcome of the descriptor's threshold comparison.
    pub is_warning: bool,
    /// Descriptor that produced the sample.
    pub descriptor: &'static SignalDescriptor,
}
