//! # voltage_iec101
//!
//! IEC 60870-5-101 link layer framing for Rust.
//!
//! This crate turns the byte stream of a serial IEC 101 link into typed
//! frames and back. Link session handling (retries, FCB bookkeeping,
//! polling) and ASDU interpretation are left to the caller.
//!
//! ## Features
//!
//! - **All FT 1.2 frame shapes**: single character, fixed length, variable length
//! - **Control field access**: DIR, PRM, FCB/ACD, FCV/DFC and function codes
//! - **Partial data aware**: incomplete buffers report `NeedMoreData`
//! - **tokio-util codec**: `Iec101Codec` for `Framed` transports, with resynchronization
//!
//! ## Quick Start
//!
//! ```rust
//! use voltage_iec101::{ControlByte, Frame, FrameCodec, FrameParseErr, PrimaryFunction};
//!
//! // Request class 2 data from station 1
//! let request = Frame::fixed(ControlByte::primary(PrimaryFunction::RequestClass2Data), 1);
//! let bytes = request.encode();
//! assert_eq!(&bytes[..], &[0x10, 0x5B, 0x01, 0x5C, 0x16]);
//!
//! // Decode the reply
//! let mut codec = FrameCodec::new();
//! codec.decode(&[0xE5]);
//! assert_eq!(codec.error(), FrameParseErr::NoError);
//! assert!(codec.to_link_layer_frame().is_single_ack());
//! ```
//!
//! ## Frame Overview
//!
//! ```text
//! Single character:  E5
//! Fixed length:      10 C A CS 16
//! Variable length:   68 L L 68 C A <user data> CS 16
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod codec;
pub mod config;
pub mod error;
pub mod types;

// Re-export main types
pub use codec::{FrameCodec, Iec101Codec};
pub use config::LinkConfig;
pub use error::{FrameParseErr, Iec101Error, Result};
pub use types::*;
