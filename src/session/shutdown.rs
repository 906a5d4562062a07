use embassy_time::{with_timeout, Duration};

use crate::device::MbimDevice;
use crate::error::Error;

/// Closes the device exactly once.
///
/// Further calls to [`Shutdown::close`] after the first are no-ops.
pub struct Shutdown<D> {
    device: Option<D>,
    timeout: Duration,
}

impl<D: MbimDevice> Shutdown<D> {
    pub fn new(device: D, timeout: Duration) -> Self {
        Self {
            device: Some(device),
            timeout,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.device.is_none()
    }

    /// Close the device. Failures are logged and reported as
    /// [`Error::CloseFailed`], the device is considered gone either way.
    pub async fn close(&mut self) -> Result<(), Error> {
        let Some(device) = self.device.take() else {
            debug!("Device already closed");
            return Ok(());
        };

        match with_timeout(self.timeout, device.close()).await {
            Ok(Ok(())) => {
                debug!("Device closed");
                Ok(())
            }
            Ok(Err(e)) => {
                warn!("Closing device failed: {:?}", e);
                Err(Error::CloseFailed)
            }
            Err(_) => {
                warn!("Closing device timed out");
                Err(Error::CloseFailed)
            }
        }
    }
}
