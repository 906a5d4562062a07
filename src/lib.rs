#![cfg_attr(not(test), no_std)]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod command;
pub mod command_timing;
pub mod config;
pub mod device;
pub mod error;
pub mod ip_config;
pub mod registration;
pub mod session;

#[cfg(test)]
mod test_helpers;

pub use config::{Apn, Config, PinPolicy, Timeouts};
pub use device::{DeviceError, MbimDevice, MbimTransport};
pub use error::Error;
pub use ip_config::NetworkConfig;
pub use session::control::Control;
pub use session::machine::SessionState;
pub use session::runner::Runner;
pub use session::state::State;
