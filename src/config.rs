//! Link layer configuration.

use crate::types::AddressSize;

/// Default link address width.
pub const DEFAULT_ADDRESS_SIZE: AddressSize = AddressSize::One;

/// Link layer parameters shared by encoder and decoder.
///
/// Both ends of a link must agree on these values; they are not
/// negotiated on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkConfig {
    /// Width of the link address field
    pub address_size: AddressSize,
    /// Largest user data length accepted by [`Iec101Codec`](crate::codec::Iec101Codec)
    pub max_user_data: usize,
}

impl LinkConfig {
    /// Create a configuration with default parameters.
    pub fn new() -> Self {
        Self {
            address_size: DEFAULT_ADDRESS_SIZE,
            max_user_data: DEFAULT_ADDRESS_SIZE.max_user_data(),
        }
    }

    /// Set the link address width.
    ///
    /// Lowers `max_user_data` if it no longer fits the length field.
    pub fn address_size(mut self, size: AddressSize) -> Self {
        self.address_size = size;
        self.max_user_data = self.max_user_data.min(size.max_user_data());
        self
    }

    /// Set the user data limit, capped at what the length field can express.
    pub fn max_user_data(mut self, len: usize) -> Self {
        self.max_user_data = len.min(self.address_size.max_user_data());
        self
    }
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self::new()
    }
}
