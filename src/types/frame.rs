//! IEC 60870-5-101 link layer frames (FT 1.2).
//!
//! ```text
//! Single character:   E5 (ack) | A2 (nack)
//!
//! Fixed length:       +----+---+---+----+----+
//!                     | 10 | C | A | CS | 16 |
//!                     +----+---+---+----+----+
//!
//! Variable length:    +----+---+---+----+---+---+----------+----+----+
//!                     | 68 | L | L | 68 | C | A | user data| CS | 16 |
//!                     +----+---+---+----+---+---+----------+----+----+
//! ```
//!
//! `L` counts the control, address and user data bytes. `CS` is the 8-bit
//! sum of the same bytes. The address field is one octet unless
//! [`AddressSize::Two`] is selected, in which case it is little-endian.

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{FrameParseErr, Iec101Error};
use crate::types::control::ControlByte;

/// Single character acknowledgement.
pub const SINGLE_ACK: u8 = 0xE5;

/// Single character negative acknowledgement.
pub const SINGLE_NACK: u8 = 0xA2;

/// Start byte of fixed length frames.
pub const FIXED_START: u8 = 0x10;

/// Start byte of variable length frames (sent twice).
pub const VARIABLE_START: u8 = 0x68;

/// Terminator of fixed and variable length frames.
pub const END_BYTE: u8 = 0x16;

/// Address used when a frame is not aimed at any particular station.
pub const NO_LINK_ADDRESS: u16 = 0;

/// Largest value of the `L` field.
pub const MAX_LENGTH_FIELD: usize = 255;

/// Width of the link address field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddressSize {
    /// One octet
    #[default]
    One,
    /// Two octets, little-endian
    Two,
}

impl AddressSize {
    /// Number of octets on the wire.
    #[inline]
    pub const fn octets(&self) -> usize {
        match self {
            Self::One => 1,
            Self::Two => 2,
        }
    }

    /// Largest user data length a variable frame can carry.
    #[inline]
    pub const fn max_user_data(&self) -> usize {
        MAX_LENGTH_FIELD - 1 - self.octets()
    }

    /// Largest link address the field can hold.
    #[inline]
    pub const fn max_address(&self) -> u16 {
        match self {
            Self::One => 0xFF,
            Self::Two => 0xFFFF,
        }
    }

    /// Length of a fixed frame with this address width.
    #[inline]
    pub const fn fixed_frame_len(&self) -> usize {
        4 + self.octets()
    }

    /// Read the address field at the start of `bytes`.
    ///
    /// `bytes` must hold at least [`octets`](Self::octets) bytes.
    #[inline]
    pub(crate) fn read(&self, bytes: &[u8]) -> u16 {
        match self {
            Self::One => bytes[0] as u16,
            Self::Two => bytes[0] as u16 | ((bytes[1] as u16) << 8),
        }
    }

    #[inline]
    pub(crate) fn write(&self, address: u16, dst: &mut BytesMut) {
        match self {
            Self::One => dst.put_u8(address as u8),
            Self::Two => dst.put_u16_le(address),
        }
    }
}

/// 8-bit arithmetic sum used as the frame checksum.
#[inline]
pub fn checksum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |sum, b| sum.wrapping_add(*b))
}

/// An IEC 101 link layer frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// Single character frame.
    SingleControl {
        /// `true` for `E5`, `false` for `A2`
        ack: bool,
    },
    /// Fixed length frame without user data.
    FixedLength {
        /// Control field
        control: ControlByte,
        /// Link address
        address: u16,
    },
    /// Variable length frame carrying an ASDU.
    VariableLength {
        /// Control field
        control: ControlByte,
        /// Link address
        address: u16,
        /// Opaque user data (ASDU)
        payload: Bytes,
    },
}

impl Default for Frame {
    /// Zero fixed frame (control 0, address 0), used as a placeholder before
    /// a successful decode.
    fn default() -> Self {
        Self::FixedLength {
            control: ControlByte::default(),
            address: 0,
        }
    }
}

impl Frame {
    /// Single character acknowledgement (`E5`).
    #[inline]
    pub const fn ack() -> Self {
        Self::SingleControl { ack: true }
    }

    /// Single character negative acknowledgement (`A2`).
    #[inline]
    pub const fn nack() -> Self {
        Self::SingleControl { ack: false }
    }

    /// Create a fixed length frame.
    #[inline]
    pub fn fixed(control: impl Into<ControlByte>, address: u16) -> Self {
        Self::FixedLength {
            control: control.into(),
            address,
        }
    }

    /// Create a variable length frame.
    ///
    /// A frame built here is always variable length, even with empty user data.
    #[inline]
    pub fn variable(
        control: impl Into<ControlByte>,
        address: u16,
        payload: impl Into<Bytes>,
    ) -> Self {
        Self::VariableLength {
            control: control.into(),
            address,
            payload: payload.into(),
        }
    }

    /// Check if this frame carries an ASDU.
    #[inline]
    pub fn has_asdu(&self) -> bool {
        matches!(self, Self::VariableLength { .. })
    }

    /// Check if this is the single character acknowledgement.
    ///
    /// The secondary station sends it when it has no class 1 or class 2
    /// data to return.
    #[inline]
    pub fn is_single_ack(&self) -> bool {
        matches!(self, Self::SingleControl { ack: true })
    }

    /// Check if this is a single character frame.
    #[inline]
    pub fn is_single_control(&self) -> bool {
        matches!(self, Self::SingleControl { .. })
    }

    /// Control field, if the frame has one.
    #[inline]
    pub fn control(&self) -> Option<ControlByte> {
        match self {
            Self::SingleControl { .. } => None,
            Self::FixedLength { control, .. } | Self::VariableLength { control, .. } => {
                Some(*control)
            }
        }
    }

    /// Mutable control field, if the frame has one.
    #[inline]
    pub fn control_mut(&mut self) -> Option<&mut ControlByte> {
        match self {
            Self::SingleControl { .. } => None,
            Self::FixedLength { control, .. } | Self::VariableLength { control, .. } => {
                Some(control)
            }
        }
    }

    /// Raw control byte (0 for single character frames).
    #[inline]
    pub fn control_byte(&self) -> u8 {
        self.control().map(|c| c.raw()).unwrap_or(0)
    }

    /// Link address (`None` for single character frames).
    #[inline]
    pub fn address(&self) -> Option<u16> {
        match self {
            Self::SingleControl { .. } => None,
            Self::FixedLength { address, .. } | Self::VariableLength { address, .. } => {
                Some(*address)
            }
        }
    }

    /// User data (empty unless variable length).
    #[inline]
    pub fn payload(&self) -> &[u8] {
        match self {
            Self::VariableLength { payload, .. } => payload,
            _ => &[],
        }
    }

    /// See [`ControlByte::is_from_startup_station`].
    #[inline]
    pub fn is_from_startup_station(&self) -> bool {
        self.control().is_some_and(|c| c.is_from_startup_station())
    }

    /// See [`ControlByte::is_from_master_station`].
    #[inline]
    pub fn is_from_master_station(&self) -> bool {
        self.control().is_some_and(|c| c.is_from_master_station())
    }

    /// See [`ControlByte::fcb`].
    #[inline]
    pub fn fcb(&self) -> bool {
        self.control().is_some_and(|c| c.fcb())
    }

    /// See [`ControlByte::is_valid_fcb`].
    #[inline]
    pub fn is_valid_fcb(&self) -> bool {
        self.control().is_some_and(|c| c.is_valid_fcb())
    }

    /// See [`ControlByte::has_level1_data_waiting_access`].
    #[inline]
    pub fn has_level1_data_waiting_access(&self) -> bool {
        self.control()
            .is_some_and(|c| c.has_level1_data_waiting_access())
    }

    /// See [`ControlByte::is_slave_cannot_recv`].
    #[inline]
    pub fn is_slave_cannot_recv(&self) -> bool {
        self.control().is_some_and(|c| c.is_slave_cannot_recv())
    }

    /// See [`ControlByte::function_code`]. Single character frames report 0.
    #[inline]
    pub fn function_code(&self) -> u8 {
        self.control().map(|c| c.function_code()).unwrap_or(0)
    }

    /// Number of bytes this frame occupies on the wire.
    #[inline]
    pub fn encoded_len(&self, address_size: AddressSize) -> usize {
        match self {
            Self::SingleControl { .. } => 1,
            Self::FixedLength { .. } => address_size.fixed_frame_len(),
            Self::VariableLength { payload, .. } => {
                6 + 1 + address_size.octets() + payload.len()
            }
        }
    }

    /// Encode with a one-octet address field.
    pub fn encode(&self) -> Bytes {
        self.encode_with(AddressSize::One)
    }

    /// Encode with the given address width.
    pub fn encode_with(&self, address_size: AddressSize) -> Bytes {
        let mut dst = BytesMut::with_capacity(self.encoded_len(address_size));
        self.encode_to(&mut dst, address_size);
        dst.freeze()
    }

    /// Append the encoded frame to `dst`.
    ///
    /// User data longer than [`AddressSize::max_user_data`] does not fit the
    /// `L` field; the length byte wraps and peers will reject the frame.
    /// Addresses above [`AddressSize::max_address`] keep only their low
    /// octet, so the frame reaches a different station.
    /// [`Iec101Codec`](crate::codec::Iec101Codec) refuses both up front.
    pub fn encode_to(&self, dst: &mut BytesMut, address_size: AddressSize) {
        dst.reserve(self.encoded_len(address_size));
        match self {
            Self::SingleControl { ack } => {
                dst.put_u8(if *ack { SINGLE_ACK } else { SINGLE_NACK });
            }
            Self::FixedLength { control, address } => {
                dst.put_u8(FIXED_START);
                let start = dst.len();
                dst.put_u8(control.raw());
                address_size.write(*address, dst);
                let cs = checksum(&dst[start..]);
                dst.put_u8(cs);
                dst.put_u8(END_BYTE);
            }
            Self::VariableLength {
                control,
                address,
                payload,
            } => {
                let len = (1 + address_size.octets() + payload.len()) as u8;
                dst.put_slice(&[VARIABLE_START, len, len, VARIABLE_START]);
                let start = dst.len();
                dst.put_u8(control.raw());
                address_size.write(*address, dst);
                dst.put_slice(payload);
                let cs = checksum(&dst[start..]);
                dst.put_u8(cs);
                dst.put_u8(END_BYTE);
            }
        }
    }
}

impl TryFrom<&[u8]> for Frame {
    type Error = Iec101Error;

    /// Decode a complete frame with a one-octet address field.
    fn try_from(bytes: &[u8]) -> std::result::Result<Self, Self::Error> {
        let mut codec = crate::codec::FrameCodec::new();
        codec.decode(bytes);
        match codec.error() {
            FrameParseErr::NoError => Ok(codec.to_link_layer_frame()),
            err => Err(err.into()),
        }
    }
}

impl std::fmt::Display for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SingleControl { ack: true } => f.write_str("E5"),
            Self::SingleControl { ack: false } => f.write_str("A2"),
            Self::FixedLength { control, address } => {
                write!(f, "FIXED(A={}) [{}]", address, control)
            }
            Self::VariableLength {
                control,
                address,
                payload,
            } => write!(f, "VAR(A={}, {} bytes) [{}]", address, payload.len(), control),
        }
    }
}
