//! IEC 60870-5-101 link control field (C field).
//!
//! ```text
//!   bit:    7     6     5       4       3  2  1  0
//!        +-----+-----+-------+-------+------------+
//!        | DIR | PRM | FCB   | FCV   | function   |  PRM = 1 (primary)
//!        |     |     | ACD   | DFC   | code       |  PRM = 0 (secondary)
//!        +-----+-----+-------+-------+------------+
//! ```
//!
//! Bits 5 and 4 are stored raw. Their meaning, and the meaning of the
//! function code, follows whatever PRM holds when they are read.

use crate::error::{Iec101Error, Result};

const DIR_BIT: u8 = 0x80;
const PRM_BIT: u8 = 0x40;
const FCB_ACD_BIT: u8 = 0x20;
const FCV_DFC_BIT: u8 = 0x10;
const FUNCTION_MASK: u8 = 0x0F;

/// Physical transmission direction (balanced mode only).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dir {
    /// Sent by the master station (DIR = 1)
    FromMasterStation,
    /// Sent by the slave station (DIR = 0)
    FromSlaveStation,
}

/// Primary message bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prm {
    /// Primary (command) message from the startup station (PRM = 1)
    FromStartupStation,
    /// Secondary (response) message from the slave station (PRM = 0)
    FromSlaveStation,
}

/// Frame count bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fcb {
    /// FCB = 0
    Zero,
    /// FCB = 1
    One,
}

/// Frame count bit valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fcv {
    /// FCB is checked by the secondary station
    Valid,
    /// FCB is ignored
    Invalid,
}

/// Access demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acd {
    /// Class 1 data waiting for access
    Level1DataWaiting,
    /// No class 1 data waiting
    NoLevel1DataWaiting,
}

/// Data flow control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dfc {
    /// Further messages may cause data overflow
    SlaveCannotRecv,
    /// Further messages are accepted
    SlaveCanRecv,
}

/// Function codes of primary (PRM = 1) messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PrimaryFunction {
    /// Reset of remote link
    ResetRemoteLink = 0,
    /// Reset of user process
    ResetUserProcess = 1,
    /// Test function for link (balanced)
    TestLink = 2,
    /// User data, send/confirm expected
    SendUserData = 3,
    /// User data, send/no reply expected
    SendNoReply = 4,
    /// Request for access demand
    AccessRequest = 8,
    /// Request status of link
    RequestLinkStatus = 9,
    /// Request user data class 1
    RequestClass1Data = 10,
    /// Request user data class 2
    RequestClass2Data = 11,
}

impl PrimaryFunction {
    /// Create a primary function from a raw function code.
    #[inline]
    pub fn from_u8(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Self::ResetRemoteLink),
            1 => Ok(Self::ResetUserProcess),
            2 => Ok(Self::TestLink),
            3 => Ok(Self::SendUserData),
            4 => Ok(Self::SendNoReply),
            8 => Ok(Self::AccessRequest),
            9 => Ok(Self::RequestLinkStatus),
            10 => Ok(Self::RequestClass1Data),
            11 => Ok(Self::RequestClass2Data),
            _ => Err(Iec101Error::UnknownFunctionCode(value)),
        }
    }

    /// Convert to raw function code.
    #[inline]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Check if the secondary station answers this function.
    #[inline]
    pub const fn expects_reply(&self) -> bool {
        !matches!(self, Self::SendNoReply)
    }

    /// Check if FCV must be set for this function.
    ///
    /// Resets and link status requests run with FCB ignored.
    #[inline]
    pub const fn uses_fcb(&self) -> bool {
        matches!(
            self,
            Self::TestLink
                | Self::SendUserData
                | Self::RequestClass1Data
                | Self::RequestClass2Data
        )
    }
}

impl std::fmt::Display for PrimaryFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::ResetRemoteLink => "reset remote link",
            Self::ResetUserProcess => "reset user process",
            Self::TestLink => "test link",
            Self::SendUserData => "send/confirm user data",
            Self::SendNoReply => "send/no reply user data",
            Self::AccessRequest => "request access demand",
            Self::RequestLinkStatus => "request link status",
            Self::RequestClass1Data => "request class 1 data",
            Self::RequestClass2Data => "request class 2 data",
        };
        f.write_str(name)
    }
}

/// Function codes of secondary (PRM = 0) messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SecondaryFunction {
    /// Positive acknowledgement
    Ack = 0,
    /// Message not accepted, link busy
    Nack = 1,
    /// User data
    UserData = 8,
    /// Requested data not available
    NackNoData = 9,
    /// Status of link or access demand
    LinkStatus = 11,
    /// Link service not functioning
    LinkNotFunctioning = 14,
    /// Link service not implemented
    LinkNotImplemented = 15,
}

impl SecondaryFunction {
    /// Create a secondary function from a raw function code.
    #[inline]
    pub fn from_u8(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Self::Ack),
            1 => Ok(Self::Nack),
            8 => Ok(Self::UserData),
            9 => Ok(Self::NackNoData),
            11 => Ok(Self::LinkStatus),
            14 => Ok(Self::LinkNotFunctioning),
            15 => Ok(Self::LinkNotImplemented),
            _ => Err(Iec101Error::UnknownFunctionCode(value)),
        }
    }

    /// Convert to raw function code.
    #[inline]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

impl std::fmt::Display for SecondaryFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Ack => "ack",
            Self::Nack => "nack",
            Self::UserData => "user data",
            Self::NackNoData => "nack no data",
            Self::LinkStatus => "link status",
            Self::LinkNotFunctioning => "link not functioning",
            Self::LinkNotImplemented => "link not implemented",
        };
        f.write_str(name)
    }
}

/// Link control field.
///
/// A thin wrapper over the raw byte. Every setter touches only its own
/// bits; getters read the same bits regardless of PRM, so picking the
/// getter that matches the message role is up to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ControlByte(u8);

impl ControlByte {
    /// Wrap a raw control byte.
    #[inline]
    pub const fn new(raw: u8) -> Self {
        Self(raw)
    }

    /// Build a primary control byte carrying the given function.
    ///
    /// FCV is set when the function runs under frame counting; FCB starts at 0.
    #[inline]
    pub const fn primary(function: PrimaryFunction) -> Self {
        let fcv = if function.uses_fcb() { FCV_DFC_BIT } else { 0 };
        Self(PRM_BIT | fcv | function.as_u8())
    }

    /// Build a secondary control byte carrying the given function.
    #[inline]
    pub const fn secondary(function: SecondaryFunction) -> Self {
        Self(function.as_u8())
    }

    /// Get the raw byte.
    #[inline]
    pub const fn raw(&self) -> u8 {
        self.0
    }

    #[inline]
    fn set_bit(&mut self, mask: u8, on: bool) {
        if on {
            self.0 |= mask;
        } else {
            self.0 &= !mask;
        }
    }

    /// Set the DIR bit.
    #[inline]
    pub fn set_dir(&mut self, dir: Dir) {
        self.set_bit(DIR_BIT, dir == Dir::FromMasterStation);
    }

    /// Set the PRM bit.
    #[inline]
    pub fn set_prm(&mut self, prm: Prm) {
        self.set_bit(PRM_BIT, prm == Prm::FromStartupStation);
    }

    /// Set the frame count bit (bit 5, primary reading).
    #[inline]
    pub fn set_fcb(&mut self, fcb: Fcb) {
        self.set_bit(FCB_ACD_BIT, fcb == Fcb::One);
    }

    /// Set the frame count bit valid flag (bit 4, primary reading).
    #[inline]
    pub fn set_fcv(&mut self, fcv: Fcv) {
        self.set_bit(FCV_DFC_BIT, fcv == Fcv::Valid);
    }

    /// Set the access demand bit (bit 5, secondary reading).
    #[inline]
    pub fn set_acd(&mut self, acd: Acd) {
        self.set_bit(FCB_ACD_BIT, acd == Acd::Level1DataWaiting);
    }

    /// Set the data flow control bit (bit 4, secondary reading).
    #[inline]
    pub fn set_dfc(&mut self, dfc: Dfc) {
        self.set_bit(FCV_DFC_BIT, dfc == Dfc::SlaveCannotRecv);
    }

    /// Set the function code. Only the low four bits of `code` are used.
    #[inline]
    pub fn set_function_code(&mut self, code: u8) {
        self.0 = (self.0 & !FUNCTION_MASK) | (code & FUNCTION_MASK);
    }

    /// Flip the frame count bit for the next primary transaction.
    #[inline]
    pub fn toggle_fcb(&mut self) {
        self.0 ^= FCB_ACD_BIT;
    }

    /// Builder form of [`set_dir`](Self::set_dir).
    #[inline]
    pub fn with_dir(mut self, dir: Dir) -> Self {
        self.set_dir(dir);
        self
    }

    /// Builder form of [`set_prm`](Self::set_prm).
    #[inline]
    pub fn with_prm(mut self, prm: Prm) -> Self {
        self.set_prm(prm);
        self
    }

    /// Builder form of [`set_fcb`](Self::set_fcb).
    #[inline]
    pub fn with_fcb(mut self, fcb: Fcb) -> Self {
        self.set_fcb(fcb);
        self
    }

    /// Builder form of [`set_fcv`](Self::set_fcv).
    #[inline]
    pub fn with_fcv(mut self, fcv: Fcv) -> Self {
        self.set_fcv(fcv);
        self
    }

    /// Builder form of [`set_acd`](Self::set_acd).
    #[inline]
    pub fn with_acd(mut self, acd: Acd) -> Self {
        self.set_acd(acd);
        self
    }

    /// Builder form of [`set_dfc`](Self::set_dfc).
    #[inline]
    pub fn with_dfc(mut self, dfc: Dfc) -> Self {
        self.set_dfc(dfc);
        self
    }

    /// Builder form of [`set_function_code`](Self::set_function_code).
    #[inline]
    pub fn with_function_code(mut self, code: u8) -> Self {
        self.set_function_code(code);
        self
    }

    /// Check if this is a primary message (PRM = 1).
    #[inline]
    pub const fn is_from_startup_station(&self) -> bool {
        self.0 & PRM_BIT != 0
    }

    /// Check if the master station sent this message (DIR = 1).
    #[inline]
    pub const fn is_from_master_station(&self) -> bool {
        self.0 & DIR_BIT != 0
    }

    /// Frame count bit.
    #[inline]
    pub const fn fcb(&self) -> bool {
        self.0 & FCB_ACD_BIT != 0
    }

    /// Check if the frame count bit is valid (FCV = 1).
    #[inline]
    pub const fn is_valid_fcb(&self) -> bool {
        self.0 & FCV_DFC_BIT != 0
    }

    /// Check if the slave has class 1 data waiting (ACD = 1).
    #[inline]
    pub const fn has_level1_data_waiting_access(&self) -> bool {
        self.0 & FCB_ACD_BIT != 0
    }

    /// Check if the slave cannot accept further messages (DFC = 1).
    #[inline]
    pub const fn is_slave_cannot_recv(&self) -> bool {
        self.0 & FCV_DFC_BIT != 0
    }

    /// Function code (0-15).
    #[inline]
    pub const fn function_code(&self) -> u8 {
        self.0 & FUNCTION_MASK
    }

    /// Interpret the function code as a primary function.
    pub fn primary_function(&self) -> Result<PrimaryFunction> {
        PrimaryFunction::from_u8(self.function_code())
    }

    /// Interpret the function code as a secondary function.
    pub fn secondary_function(&self) -> Result<SecondaryFunction> {
        SecondaryFunction::from_u8(self.function_code())
    }
}

impl From<u8> for ControlByte {
    fn from(raw: u8) -> Self {
        Self(raw)
    }
}

impl From<ControlByte> for u8 {
    fn from(control: ControlByte) -> Self {
        control.0
    }
}

impl std::fmt::Display for ControlByte {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let dir = u8::from(self.is_from_master_station());
        if self.is_from_startup_station() {
            write!(
                f,
                "PRM DIR={} FCB={} FCV={} FC={}",
                dir,
                u8::from(self.fcb()),
                u8::from(self.is_valid_fcb()),
                self.function_code()
            )
        } else {
            write!(
                f,
                "SEC DIR={} ACD={} DFC={} FC={}",
                dir,
                u8::from(self.has_level1_data_waiting_access()),
                u8::from(self.is_slave_cannot_recv()),
                self.function_code()
            )
        }
    }
}
