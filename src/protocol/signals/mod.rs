//! Signal descriptor table: the single association from a frame identifier to
//! the layout, scaling and warning rule of the signal it carries.
//!
//! Both the receive (decode) and the self-test transmit (encode) paths resolve
//! layouts here; no other module knows a bit offset.
use embedded_can::StandardId;

use crate::core::{SignalDescriptor, WarnComparison, MAX_SIGNAL_NAME_LEN};
use crate::error::DescriptorError;
use crate::infra::codec::bits::BitField;
use crate::protocol::transport::can_id::standard_id;

/// Identifier of the voltage frame.
pub const VOLTAGE_ID: StandardId = standard_id(0x400);
/// Identifier of the current frame.
pub const CURRENT_ID: StandardId = standard_id(0x500);
/// Identifier of the temperature frame.
pub const TEMPERATURE_ID: StandardId = standard_id(0x600);

const fn layout(start_bit: u8, bit_length: u8) -> BitField {
    match BitField::new(start_bit, bit_length) {
        Ok(field) => field,
        Err(_) => panic!("signal layout must fit an 8-byte payload"),
    }
}

/// Battery voltage: bits [6, 18), V = raw / 100, warning at or above 15 V.
pub const VOLTAGE: SignalDescriptor = SignalDescriptor {
    name: "VOLT",
    unit: "V",
    frame_id: VOLTAGE_ID,
    field: layout(6, 12),
    scale: 100.0,
    warn_threshold: 15.0,
    warn_comparison: WarnComparison::AtLeast,
    precision: 2,
};

/// Current: bits [16, 24), A = raw / 10, warning at or above 10 A.
pub const CURRENT: SignalDescriptor = SignalDescriptor {
    name: "CURR",
    unit: "A",
    frame_id: CURRENT_ID,
    field: layout(16, 8),
    scale: 10.0,
    warn_threshold: 10.0,
    warn_comparison: WarnComparison::AtLeast,
    precision: 1,
};

/// Temperature: bits [32, 44), C = raw / 10, warning strictly above 42 C.
pub const TEMPERATURE: SignalDescriptor = SignalDescriptor {
    name: "TEMP",
    unit: "C",
    frame_id: TEMPERATURE_ID,
    field: layout(32, 12),
    scale: 10.0,
    warn_threshold: 42.0,
    warn_comparison: WarnComparison::Above,
    precision: 1,
};

/// The gateway's signals, in transmit order.
pub static STANDARD_SIGNALS: [SignalDescriptor; 3] = [VOLTAGE, CURRENT, TEMPERATURE];

/// Read-only identifier → descriptor association, built once at start-up.
#[derive(Debug, Clone, Copy)]
pub struct SignalTable {
    descriptors: &'static [SignalDescriptor],
}

impl SignalTable {
    /// Validate a descriptor set: bounded non-empty names, positive finite scale
    /// and unique frame identifiers.
    ///
    /// Layouts are already bounded by [`BitField`] construction.
    pub fn new(descriptors: &'static [SignalDescriptor]) -> Result<Self, DescriptorError> {
        for (index, descriptor) in descriptors.iter().enumerate() {
            if descriptor.name.is_empty() || descriptor.name.len() > MAX_SIGNAL_NAME_LEN {
                return Err(DescriptorError::InvalidName {
                    name: descriptor.name,
                });
            }
            if !(descriptor.scale.is_finite() && descriptor.scale > 0.0) {
                return Err(DescriptorError::InvalidScale {
                    name: descriptor.name,
                });
            }
            if descriptors[..index]
                .iter()
                .any(|other| other.frame_id == descriptor.frame_id)
            {
                return Err(DescriptorError::DuplicateIdentifier {
                    id: descriptor.frame_id.as_raw(),
                });
            }
        }
        Ok(Self { descriptors })
    }

    /// Table of the three gateway signals (voltage, current, temperature).
    pub fn standard() -> Self {
        Self {
            descriptors: &STANDARD_SIGNALS,
        }
    }

    /// Exact-match lookup. `None` means "not a gateway signal, ignore it".
    pub fn lookup(&self, frame_id: StandardId) -> Option<&'static SignalDescriptor> {
        let descriptors: &'static [SignalDescriptor] = self.descriptors;
        descriptors.iter().find(|d| d.frame_id == frame_id)
    }

    /// Descriptors in table order.
    pub fn iter(&self) -> impl Iterator<Item = &'static SignalDescriptor> {
        let descriptors: &'static [SignalDescriptor] = self.descriptors;
        descriptors.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}
