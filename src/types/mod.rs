//! IEC 60870-5-101 link layer type definitions.
//!
//! - `ControlByte` - Link control field (DIR, PRM, FCB/ACD, FCV/DFC, function code)
//! - `PrimaryFunction` / `SecondaryFunction` - Function codes per station role
//! - `Frame` - Single character, fixed length and variable length frames

mod control;
mod frame;

pub use control::*;
pub use frame::*;
