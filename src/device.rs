//! Boundary to the MBIM protocol library.
//!
//! Framing, transaction ids and information buffer encoding live behind
//! these traits. The session only deals in structured
//! [`Request`]s and [`Response`]s.

use crate::command::{MbimStatus, Request, Response};

/// Failure reported by the device layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
pub enum DeviceError {
    /// The function completed the command with a non-success status
    Status(MbimStatus),
    /// The response could not be decoded
    Parse,
    /// The device layer gave up waiting for an answer
    Timeout,
    /// Transport level failure
    Io,
}

impl From<MbimStatus> for DeviceError {
    fn from(status: MbimStatus) -> Self {
        Self::Status(status)
    }
}

/// Something that can open an MBIM control device by path.
#[allow(async_fn_in_trait)]
pub trait MbimTransport {
    type Device: MbimDevice;

    async fn open(&mut self, path: &str) -> Result<Self::Device, DeviceError>;
}

/// An opened MBIM control device.
///
/// Commands are issued one at a time, the session never has more than one
/// outstanding. `close` consumes the device.
#[allow(async_fn_in_trait)]
pub trait MbimDevice {
    async fn command(&mut self, request: &Request<'_>) -> Result<Response, DeviceError>;

    async fn close(self) -> Result<(), DeviceError>;
}
