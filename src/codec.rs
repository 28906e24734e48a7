//! IEC 60870-5-101 link layer frame decoding.
//!
//! [`FrameCodec`] classifies one candidate buffer and never consumes or
//! skips bytes on its own. [`Iec101Codec`] wraps it for the tokio-util
//! codec framework and takes care of buffering and resynchronization.

use bytes::{Buf, Bytes, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

use crate::config::LinkConfig;
use crate::error::{FrameParseErr, Iec101Error};
use crate::types::{
    checksum, ControlByte, Frame, END_BYTE, FIXED_START, SINGLE_ACK, SINGLE_NACK, VARIABLE_START,
};

/// Decoder for a single link layer frame.
///
/// Each call to [`decode`](Self::decode) looks at the whole buffer from its
/// first byte and overwrites the previous result. On
/// [`FrameParseErr::NeedMoreData`] call again with a longer buffer holding
/// the same frame.
///
/// # Example
///
/// ```rust
/// use voltage_iec101::{FrameCodec, FrameParseErr};
///
/// let mut codec = FrameCodec::new();
/// codec.decode(&[0x10, 0x5a, 0x01, 0x5b, 0x16]);
/// assert_eq!(codec.error(), FrameParseErr::NoError);
///
/// let frame = codec.to_link_layer_frame();
/// assert_eq!(frame.control_byte(), 0x5a);
/// assert_eq!(frame.address(), Some(0x01));
/// ```
#[derive(Debug, Clone, Default)]
pub struct FrameCodec {
    config: LinkConfig,
    error: FrameParseErr,
    frame: Frame,
    frame_len: usize,
}

impl FrameCodec {
    /// Create a decoder with a one-octet address field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a decoder with the given link parameters.
    pub fn with_config(config: LinkConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Get the link parameters.
    pub fn config(&self) -> &LinkConfig {
        &self.config
    }

    /// Decode the frame at the start of `buf`.
    ///
    /// Bytes after the end of the frame are ignored.
    pub fn decode(&mut self, buf: &[u8]) {
        match self.parse(buf) {
            Ok((frame, len)) => {
                self.error = FrameParseErr::NoError;
                self.frame = frame;
                self.frame_len = len;
            }
            Err(err) => {
                self.error = err;
                self.frame = Frame::default();
                self.frame_len = 0;
            }
        }
    }

    /// Result of the last decode.
    #[inline]
    pub fn error(&self) -> FrameParseErr {
        self.error
    }

    /// The decoded frame.
    ///
    /// Only meaningful when [`error`](Self::error) is
    /// [`FrameParseErr::NoError`]; otherwise this is the default frame.
    pub fn to_link_layer_frame(&self) -> Frame {
        self.frame.clone()
    }

    /// Number of bytes the decoded frame occupies (0 unless decoding succeeded).
    #[inline]
    pub fn frame_len(&self) -> usize {
        self.frame_len
    }

    fn parse(&self, buf: &[u8]) -> Result<(Frame, usize), FrameParseErr> {
        match buf.first() {
            None => Err(FrameParseErr::NeedMoreData),
            Some(&SINGLE_ACK) => Ok((Frame::ack(), 1)),
            Some(&SINGLE_NACK) => Ok((Frame::nack(), 1)),
            Some(&FIXED_START) => self.parse_fixed(buf),
            Some(&VARIABLE_START) => self.parse_variable(buf),
            Some(_) => Err(FrameParseErr::BadFormat),
        }
    }

    /// `10 C A CS 16`
    fn parse_fixed(&self, buf: &[u8]) -> Result<(Frame, usize), FrameParseErr> {
        let address_size = self.config.address_size;
        let total = address_size.fixed_frame_len();
        if buf.len() < total {
            return Err(FrameParseErr::NeedMoreData);
        }
        if buf[total - 1] != END_BYTE {
            return Err(FrameParseErr::BadFormat);
        }

        let covered = &buf[1..total - 2];
        if checksum(covered) != buf[total - 2] {
            return Err(FrameParseErr::CheckError);
        }

        let frame = Frame::FixedLength {
            control: ControlByte::new(covered[0]),
            address: address_size.read(&covered[1..]),
        };
        Ok((frame, total))
    }

    /// `68 L L 68 C A data.. CS 16`
    fn parse_variable(&self, buf: &[u8]) -> Result<(Frame, usize), FrameParseErr> {
        if buf.len() < 3 {
            return Err(FrameParseErr::NeedMoreData);
        }
        if buf[1] != buf[2] {
            return Err(FrameParseErr::CheckError);
        }

        let address_size = self.config.address_size;
        let len = buf[1] as usize;
        // L must at least cover the control and address fields
        if len < 1 + address_size.octets() {
            return Err(FrameParseErr::BadFormat);
        }

        let total = len + 6;
        if buf.len() < total {
            return Err(FrameParseErr::NeedMoreData);
        }
        if buf[3] != VARIABLE_START {
            return Err(FrameParseErr::BadFormat);
        }
        if buf[total - 1] != END_BYTE {
            return Err(FrameParseErr::BadFormat);
        }

        let covered = &buf[4..4 + len];
        if checksum(covered) != buf[4 + len] {
            return Err(FrameParseErr::CheckError);
        }

        let data_start = 1 + address_size.octets();
        let frame = Frame::VariableLength {
            control: ControlByte::new(covered[0]),
            address: address_size.read(&covered[1..]),
            payload: Bytes::copy_from_slice(&covered[data_start..]),
        };
        Ok((frame, total))
    }
}

/// Check if `byte` can start a frame.
#[inline]
fn is_start_byte(byte: u8) -> bool {
    matches!(byte, SINGLE_ACK | SINGLE_NACK | FIXED_START | VARIABLE_START)
}

/// IEC 60870-5-101 link layer codec for tokio.
///
/// Decoding skips bytes until a plausible start byte, then hands the
/// buffered bytes to [`FrameCodec`]. Frames rejected with
/// [`FrameParseErr::BadFormat`] or [`FrameParseErr::CheckError`] lose their
/// first byte and the scan resumes from the next candidate start byte.
///
/// # Example
///
/// ```rust,ignore
/// use tokio_util::codec::Framed;
/// use voltage_iec101::{Frame, Iec101Codec};
///
/// let port = /* serial port implementing AsyncRead + AsyncWrite */;
/// let mut framed = Framed::new(port, Iec101Codec::new());
///
/// // Request link status
/// framed.send(Frame::fixed(0x49u8, 1)).await?;
///
/// while let Some(frame) = framed.next().await {
///     println!("Received: {}", frame?);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Iec101Codec {
    inner: FrameCodec,
    discarded: u64,
}

impl Iec101Codec {
    /// Create a new IEC 101 codec with default link parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a codec with the given link parameters.
    pub fn with_config(config: LinkConfig) -> Self {
        Self {
            inner: FrameCodec::with_config(config),
            discarded: 0,
        }
    }

    /// Get the link parameters.
    pub fn config(&self) -> &LinkConfig {
        self.inner.config()
    }

    /// Total number of bytes dropped while resynchronizing.
    pub fn discarded(&self) -> u64 {
        self.discarded
    }

    fn discard(&mut self, src: &mut BytesMut, count: usize) {
        src.advance(count);
        self.discarded += count as u64;
    }
}

impl Decoder for Iec101Codec {
    type Item = Frame;
    type Error = Iec101Error;

    fn decode(
        &mut self,
        src: &mut BytesMut,
    ) -> std::result::Result<Option<Self::Item>, Self::Error> {
        loop {
            // Skip bytes that cannot start a frame
            let skip = src
                .iter()
                .position(|b| is_start_byte(*b))
                .unwrap_or(src.len());
            if skip > 0 {
                #[cfg(feature = "tracing-support")]
                tracing::debug!(bytes = skip, "skipping bytes before start byte");
                self.discard(src, skip);
            }

            if src.is_empty() {
                return Ok(None);
            }

            self.inner.decode(&src[..]);
            match self.inner.error() {
                FrameParseErr::NoError => {
                    let len = self.inner.frame_len();
                    let frame = self.inner.to_link_layer_frame();

                    if frame.payload().len() > self.inner.config().max_user_data {
                        #[cfg(feature = "tracing-support")]
                        tracing::debug!(
                            len = frame.payload().len(),
                            "dropping frame with oversized user data"
                        );
                        self.discard(src, len);
                        continue;
                    }

                    src.advance(len);
                    #[cfg(feature = "tracing-support")]
                    tracing::trace!(%frame, "frame decoded");
                    return Ok(Some(frame));
                }
                FrameParseErr::NeedMoreData => {
                    // A variable header without its repeated start byte can
                    // never complete; don't wait for its declared length
                    if src[0] == VARIABLE_START
                        && src.len() >= 4
                        && src[3] != VARIABLE_START
                    {
                        #[cfg(feature = "tracing-support")]
                        tracing::debug!("resynchronizing after bad variable frame header");
                        self.discard(src, 1);
                        continue;
                    }
                    return Ok(None);
                }
                FrameParseErr::BadFormat | FrameParseErr::CheckError => {
                    #[cfg(feature = "tracing-support")]
                    tracing::debug!(error = %self.inner.error(), "resynchronizing after rejected frame");
                    self.discard(src, 1);
                }
            }
        }
    }

    fn decode_eof(
        &mut self,
        src: &mut BytesMut,
    ) -> std::result::Result<Option<Self::Item>, Self::Error> {
        loop {
            if let Some(frame) = self.decode(src)? {
                return Ok(Some(frame));
            }
            if src.is_empty() {
                return Ok(None);
            }

            // No more bytes will arrive for the pending frame; rescan past its start
            #[cfg(feature = "tracing-support")]
            tracing::debug!(bytes = src.len(), "incomplete frame at end of stream");
            self.discard(src, 1);
        }
    }
}

impl Encoder<Frame> for Iec101Codec {
    type Error = Iec101Error;

    fn encode(&mut self, item: Frame, dst: &mut BytesMut) -> std::result::Result<(), Self::Error> {
        let max = self.inner.config().max_user_data;
        if item.payload().len() > max {
            return Err(Iec101Error::UserDataTooLarge {
                len: item.payload().len(),
                max,
            });
        }

        let address_size = self.inner.config().address_size;
        if let Some(address) = item.address() {
            if address > address_size.max_address() {
                return Err(Iec101Error::AddressOutOfRange {
                    address,
                    max: address_size.max_address(),
                });
            }
        }

        item.encode_to(dst, address_size);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AddressSize, PrimaryFunction};

    const VARIABLE: [u8; 15] = [
        0x68, 0x09, 0x09, 0x68, 0x08, 0x01, 0x46, 0x01, 0x04, 0x01, 0x00, 0x00, 0x00, 0x55, 0x16,
    ];
    const FIXED: [u8; 5] = [0x10, 0x5a, 0x01, 0x5b, 0x16];

    fn decode(data: &[u8]) -> FrameCodec {
        let mut codec = FrameCodec::new();
        codec.decode(data);
        codec
    }

    #[test]
    fn test_decode_cases() {
        let cases: Vec<(Vec<u8>, u8, FrameParseErr, &str)> = vec![
            (FIXED.to_vec(), 0x5a, FrameParseErr::NoError, "fixed"),
            (
                vec![0x10, 0x5a, 0x01, 0x5c, 0x16],
                0x5a,
                FrameParseErr::CheckError,
                "fixed checksum",
            ),
            (
                vec![0x40, 0x5a, 0x01, 0x5b, 0x16],
                0x5a,
                FrameParseErr::BadFormat,
                "start byte",
            ),
            (
                vec![0x10, 0x5a, 0x01, 0x5b, 0x26],
                0x5a,
                FrameParseErr::BadFormat,
                "fixed end byte",
            ),
            (
                vec![0x10, 0x5a],
                0x5a,
                FrameParseErr::NeedMoreData,
                "fixed need more data",
            ),
            (VARIABLE.to_vec(), 0x08, FrameParseErr::NoError, "variable"),
            (
                vec![
                    0x68, 0x09, 0x09, 0x99, 0x08, 0x01, 0x46, 0x01, 0x04, 0x01, 0x00, 0x00, 0x00,
                    0x55, 0x16,
                ],
                0x08,
                FrameParseErr::BadFormat,
                "second start byte",
            ),
            (
                vec![
                    0x68, 0x03, 0x03, 0x68, 0x08, 0x01, 0x46, 0x01, 0x04, 0x01, 0x00, 0x00, 0x00,
                    0x55, 0x16,
                ],
                0x08,
                FrameParseErr::BadFormat,
                "length does not reach end byte",
            ),
            (
                vec![
                    0x68, 0x09, 0x07, 0x68, 0x08, 0x01, 0x46, 0x01, 0x04, 0x01, 0x00, 0x00, 0x00,
                    0x55, 0x16,
                ],
                0x08,
                FrameParseErr::CheckError,
                "length bytes disagree",
            ),
        ];

        for (data, control, error, name) in cases {
            let codec = decode(&data);
            assert_eq!(codec.error(), error, "{}", name);

            if codec.error() == FrameParseErr::NoError {
                assert_eq!(codec.to_link_layer_frame().control_byte(), control, "{}", name);
            }
        }
    }

    #[test]
    fn test_decode_fixed_fields() {
        let codec = decode(&FIXED);
        assert_eq!(codec.frame_len(), 5);
        assert_eq!(codec.to_link_layer_frame(), Frame::fixed(0x5au8, 0x01));
        assert!(!codec.to_link_layer_frame().has_asdu());
    }

    #[test]
    fn test_decode_variable_fields() {
        let codec = decode(&VARIABLE);
        assert_eq!(codec.error(), FrameParseErr::NoError);
        assert_eq!(codec.frame_len(), 15);

        let frame = codec.to_link_layer_frame();
        assert!(frame.has_asdu());
        assert_eq!(frame.control_byte(), 0x08);
        assert_eq!(frame.address(), Some(0x01));
        assert_eq!(frame.payload(), &[0x46, 0x01, 0x04, 0x01, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn test_decode_single_characters() {
        let codec = decode(&[0xe5]);
        assert_eq!(codec.error(), FrameParseErr::NoError);
        assert!(codec.to_link_layer_frame().is_single_ack());
        assert_eq!(codec.frame_len(), 1);

        let codec = decode(&[0xa2]);
        assert_eq!(codec.error(), FrameParseErr::NoError);
        assert_eq!(codec.to_link_layer_frame(), Frame::nack());

        // Trailing bytes are not consulted
        let codec = decode(&[0xe5, 0xff, 0xff]);
        assert_eq!(codec.error(), FrameParseErr::NoError);
        assert_eq!(codec.frame_len(), 1);
    }

    #[test]
    fn test_decode_empty_buffer() {
        let codec = decode(&[]);
        assert_eq!(codec.error(), FrameParseErr::NeedMoreData);
        assert_eq!(codec.to_link_layer_frame(), Frame::default());
    }

    #[test]
    fn test_error_resets_frame() {
        let mut codec = FrameCodec::new();
        codec.decode(&VARIABLE);
        assert!(codec.to_link_layer_frame().has_asdu());

        codec.decode(&[0x10, 0x5a, 0x01, 0x5c, 0x16]);
        assert_eq!(codec.error(), FrameParseErr::CheckError);
        assert_eq!(codec.to_link_layer_frame(), Frame::default());
        assert_eq!(codec.frame_len(), 0);
    }

    #[test]
    fn test_truncated_frames_need_more_data() {
        for frame in [&FIXED[..], &VARIABLE[..]] {
            for end in 1..frame.len() {
                let codec = decode(&frame[..end]);
                assert_eq!(
                    codec.error(),
                    FrameParseErr::NeedMoreData,
                    "prefix of {} bytes",
                    end
                );
            }
        }
    }

    #[test]
    fn test_bit_flip_in_checksummed_span() {
        // Control, address and user data of the variable frame
        for index in 4..VARIABLE.len() - 2 {
            for bit in 0..8 {
                let mut data = VARIABLE;
                data[index] ^= 1 << bit;
                assert_eq!(
                    decode(&data).error(),
                    FrameParseErr::CheckError,
                    "byte {} bit {}",
                    index,
                    bit
                );
            }
        }

        for index in 1..3 {
            for bit in 0..8 {
                let mut data = FIXED;
                data[index] ^= 1 << bit;
                assert_eq!(decode(&data).error(), FrameParseErr::CheckError);
            }
        }
    }

    #[test]
    fn test_bad_start_bytes() {
        for first in 0..=u8::MAX {
            if is_start_byte(first) {
                continue;
            }
            let mut data = FIXED;
            data[0] = first;
            assert_eq!(decode(&data).error(), FrameParseErr::BadFormat);
        }
    }

    #[test]
    fn test_variable_end_byte() {
        let mut data = VARIABLE;
        data[14] = 0x17;
        assert_eq!(decode(&data).error(), FrameParseErr::BadFormat);
    }

    #[test]
    fn test_variable_length_too_small() {
        // L = 1 cannot hold control and address
        let codec = decode(&[0x68, 0x01, 0x01, 0x68, 0x08, 0x08, 0x16]);
        assert_eq!(codec.error(), FrameParseErr::BadFormat);
    }

    #[test]
    fn test_roundtrip() {
        let frames = [
            Frame::fixed(ControlByte::primary(PrimaryFunction::RequestLinkStatus), 3),
            Frame::fixed(0xFFu8, 0xFF),
            Frame::variable(0x73u8, 0x7F, vec![0xAAu8; 253]),
            Frame::variable(0x08u8, 0x01, vec![0x68u8, 0x16, 0x10, 0xE5]),
            Frame::variable(0x08u8, 0x01, Bytes::new()),
        ];

        for original in frames {
            let codec = decode(&original.encode());
            assert_eq!(codec.error(), FrameParseErr::NoError, "{}", original);
            assert_eq!(codec.to_link_layer_frame(), original);
        }
    }

    #[test]
    fn test_two_octet_address() {
        let config = LinkConfig::new().address_size(AddressSize::Two);
        let mut codec = FrameCodec::with_config(config);

        let original = Frame::variable(0x53u8, 0x1234, vec![0x01u8, 0x02]);
        codec.decode(&original.encode_with(AddressSize::Two));
        assert_eq!(codec.error(), FrameParseErr::NoError);
        assert_eq!(codec.to_link_layer_frame(), original);

        let original = Frame::fixed(0x49u8, 0xABCD);
        let encoded = original.encode_with(AddressSize::Two);
        codec.decode(&encoded[..5]);
        assert_eq!(codec.error(), FrameParseErr::NeedMoreData);
        codec.decode(&encoded);
        assert_eq!(codec.error(), FrameParseErr::NoError);
        assert_eq!(codec.frame_len(), 6);
        assert_eq!(codec.to_link_layer_frame(), original);

        // L = 2 is too short once the address takes two octets
        codec.decode(&[0x68, 0x02, 0x02, 0x68, 0x08, 0x01, 0x09, 0x16]);
        assert_eq!(codec.error(), FrameParseErr::BadFormat);
    }

    #[test]
    fn test_stream_decode_partial_frame() {
        let mut codec = Iec101Codec::new();

        let mut buf = BytesMut::from(&VARIABLE[..6]);
        assert!(codec.decode(&mut buf).unwrap().is_none());
        assert_eq!(buf.len(), 6);

        buf.extend_from_slice(&VARIABLE[6..]);
        let frame = codec.decode(&mut buf).unwrap().unwrap();
        assert!(frame.has_asdu());
        assert!(buf.is_empty());
    }

    #[test]
    fn test_stream_decode_skip_garbage() {
        let mut codec = Iec101Codec::new();
        let mut buf = BytesMut::from(&[0xFF, 0x00, 0x10, 0x5a, 0x01, 0x5b, 0x16, 0xe5][..]);

        let frame = codec.decode(&mut buf).unwrap().unwrap();
        assert_eq!(frame, Frame::fixed(0x5au8, 0x01));
        assert_eq!(codec.discarded(), 2);

        let frame = codec.decode(&mut buf).unwrap().unwrap();
        assert!(frame.is_single_ack());
        assert!(buf.is_empty());
    }

    #[test]
    fn test_stream_decode_resync_after_bad_checksum() {
        let mut codec = Iec101Codec::new();
        let mut buf = BytesMut::new();
        buf.extend_from_slice(&[0x10, 0x5a, 0x01, 0x5c, 0x16]);
        buf.extend_from_slice(&FIXED);

        let frame = codec.decode(&mut buf).unwrap().unwrap();
        assert_eq!(frame, Frame::fixed(0x5au8, 0x01));
        assert_eq!(codec.discarded(), 5);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_stream_decode_drops_oversized_user_data() {
        let mut codec = Iec101Codec::with_config(LinkConfig::new().max_user_data(4));
        let mut buf = BytesMut::from(&VARIABLE[..]);
        buf.extend_from_slice(&[0xe5]);

        let frame = codec.decode(&mut buf).unwrap().unwrap();
        assert!(frame.is_single_ack());
        assert_eq!(codec.discarded(), 15);
    }

    #[test]
    fn test_stream_decode_eof_drops_partial() {
        let mut codec = Iec101Codec::new();
        let mut buf = BytesMut::from(&[0x10, 0x5a, 0x01][..]);
        assert!(codec.decode_eof(&mut buf).unwrap().is_none());
        assert!(buf.is_empty());
        assert_eq!(codec.discarded(), 3);
    }

    #[test]
    fn test_stream_decode_bad_variable_header() {
        // Declared length exceeds what follows and the second 0x68 is missing
        let mut codec = Iec101Codec::new();
        let mut buf = BytesMut::from(&[0x68, 0x20, 0x20, 0x10, 0x5a, 0x01, 0x5b, 0x16][..]);

        let frame = codec.decode(&mut buf).unwrap().unwrap();
        assert_eq!(frame, Frame::fixed(0x5au8, 0x01));
        assert_eq!(codec.discarded(), 3);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_stream_decode_eof_rescans_partial() {
        // Plausible variable header whose declared length never arrives
        let mut codec = Iec101Codec::new();
        let mut buf = BytesMut::from(&[0x68, 0x20, 0x20, 0x68, 0x10, 0x5a, 0x01, 0x5b, 0x16][..]);
        assert!(codec.decode(&mut buf).unwrap().is_none());
        assert_eq!(buf.len(), 9);

        let frame = codec.decode_eof(&mut buf).unwrap().unwrap();
        assert_eq!(frame, Frame::fixed(0x5au8, 0x01));
        assert_eq!(codec.discarded(), 4);
        assert!(buf.is_empty());

        assert!(codec.decode_eof(&mut buf).unwrap().is_none());
    }

    #[test]
    fn test_stream_encode() {
        let mut codec = Iec101Codec::new();
        let mut buf = BytesMut::new();

        codec
            .encode(Frame::variable(0x08u8, 0x01, VARIABLE[6..13].to_vec()), &mut buf)
            .unwrap();
        codec.encode(Frame::ack(), &mut buf).unwrap();

        assert_eq!(&buf[..15], &VARIABLE);
        assert_eq!(buf[15], 0xE5);
    }

    #[test]
    fn test_stream_encode_rejects_oversized_user_data() {
        let mut codec = Iec101Codec::new();
        let mut buf = BytesMut::new();

        let result = codec.encode(Frame::variable(0x08u8, 0x01, vec![0u8; 254]), &mut buf);
        assert!(matches!(
            result,
            Err(Iec101Error::UserDataTooLarge { len: 254, max: 253 })
        ));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_stream_encode_rejects_out_of_range_address() {
        let mut codec = Iec101Codec::new();
        let mut buf = BytesMut::new();

        let result = codec.encode(Frame::fixed(0x49u8, 0x0101), &mut buf);
        assert!(matches!(
            result,
            Err(Iec101Error::AddressOutOfRange {
                address: 0x0101,
                max: 0xFF
            })
        ));
        assert!(buf.is_empty());

        let result = codec.encode(Frame::variable(0x53u8, 0x0100, vec![0x01u8]), &mut buf);
        assert!(result.is_err());
        assert!(buf.is_empty());

        // Highest one-octet address and single characters still encode
        codec.encode(Frame::fixed(0x49u8, 0xFF), &mut buf).unwrap();
        codec.encode(Frame::ack(), &mut buf).unwrap();
        assert_eq!(&buf[..], &[0x10, 0x49, 0xFF, 0x48, 0x16, 0xE5]);
    }

    #[test]
    fn test_stream_encode_two_octet_address() {
        let config = LinkConfig::new().address_size(AddressSize::Two);
        let mut codec = Iec101Codec::with_config(config);
        let mut buf = BytesMut::new();

        codec.encode(Frame::fixed(0x49u8, 0x0101), &mut buf).unwrap();
        assert_eq!(&buf[..], &[0x10, 0x49, 0x01, 0x01, 0x4B, 0x16]);

        let frame = codec.decode(&mut buf).unwrap().unwrap();
        assert_eq!(frame.address(), Some(0x0101));
    }

    #[tokio::test]
    async fn test_framed_read() {
        use futures::StreamExt;
        use tokio_util::codec::FramedRead;

        let mock = tokio_test::io::Builder::new()
            .read(&[0x00, 0x68, 0x09, 0x09, 0x68])
            .read(&VARIABLE[4..])
            .read(&[0xe5, 0x10, 0x5a])
            .read(&FIXED[2..])
            .build();
        let mut framed = FramedRead::new(mock, Iec101Codec::new());

        let frame = framed.next().await.unwrap().unwrap();
        assert!(frame.has_asdu());
        assert_eq!(frame.payload(), &VARIABLE[6..13]);

        let frame = framed.next().await.unwrap().unwrap();
        assert!(frame.is_single_ack());

        let frame = framed.next().await.unwrap().unwrap();
        assert_eq!(frame, Frame::fixed(0x5au8, 0x01));

        assert!(framed.next().await.is_none());
        assert_eq!(framed.decoder().discarded(), 1);
    }

    #[tokio::test]
    async fn test_framed_write() {
        use futures::SinkExt;
        use tokio_util::codec::FramedWrite;

        let mock = tokio_test::io::Builder::new().write(&FIXED).build();
        let mut framed = FramedWrite::new(mock, Iec101Codec::new());

        framed.send(Frame::fixed(0x5au8, 0x01)).await.unwrap();
    }
}
