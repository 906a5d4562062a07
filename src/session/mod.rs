//! Data session bring-up over an MBIM device

pub mod control;
pub mod machine;
pub mod runner;
pub mod shutdown;
pub mod state;
pub mod transaction;

use crate::config::Config;
use crate::device::MbimTransport;

use control::Control;
use runner::Runner;
use state::State;

/// Create the runner driving a session and a control handle observing it.
///
/// Call [`Runner::run`] to open the device and bring the session up.
pub fn new<'d, 'a, T: MbimTransport>(
    state: &'d mut State,
    transport: T,
    config: Config<'a>,
) -> (Runner<'d, 'a, T>, Control<'d>) {
    let state_ch = state::Runner::new(state);

    let runner = Runner::new(state_ch, transport, config);
    let control = Control::new(state_ch);

    (runner, control)
}
