use super::machine::SessionState;
use super::state;
use crate::ip_config::NetworkConfig;

/// Read-only view of a running session
pub struct Control<'d> {
    state_ch: state::Runner<'d>,
}

impl<'d> Control<'d> {
    pub(crate) fn new(state_ch: state::Runner<'d>) -> Self {
        Self { state_ch }
    }

    pub fn session_state(&self) -> SessionState {
        self.state_ch.session_state(None)
    }

    /// Available once the session has been established
    pub fn network_config(&self) -> Option<NetworkConfig> {
        self.state_ch.network_config()
    }

    /// Session id returned by the connect step
    pub fn session_id(&self) -> Option<u32> {
        self.state_ch.session_id()
    }

    pub fn registration_attempts(&self) -> u32 {
        self.state_ch.registration_attempts()
    }

    pub async fn wait_for_state(&self, ps: SessionState) {
        self.state_ch.wait_for_session_state(ps).await
    }

    pub async fn wait_for_state_change(&self) -> SessionState {
        self.state_ch.wait_for_session_state_change().await
    }

    /// Wait until the device has been closed, returning the network
    /// configuration if the session got that far.
    pub async fn wait_for_terminal(&self) -> Option<NetworkConfig> {
        self.state_ch
            .wait_for_session_state(SessionState::Closed)
            .await;
        self.network_config()
    }
}
