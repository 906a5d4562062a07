use serde::{Deserialize, Serialize};

use super::transaction::CommandError;
use crate::command::basic_connect::responses::{
    ConnectInfo, IpConfiguration, PacketServiceInfo, PinInfo, RegistrationStateInfo,
};
use crate::command::basic_connect::types::{
    ActivationCommand, ActivationState, Compression, PacketServiceAction, PinState,
};
use crate::command::basic_connect::{
    GetIpConfiguration, GetRegisterState, SetConnect, SetPacketService, SetPin,
};
use crate::command::{CommandKind, MbimStatus, Request, Response};
use crate::config::{Config, PinPolicy};
use crate::error::Error;
use crate::ip_config::{self, DecodeError, NetworkConfig};
use crate::registration::RegistrationAttempts;

/// Session progress. Each non-terminal state after `Idle` names the command
/// currently outstanding on the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionState {
    /// Device open, nothing issued yet
    Idle,
    PinPending,
    Registering,
    AttachingPacketService,
    Connecting,
    QueryingIpConfig,
    /// IPv4 configuration decoded
    Established,
    ShuttingDown,
    Closed,
}

impl SessionState {
    /// The command in flight while in this state
    pub const fn command(&self) -> Option<CommandKind> {
        match self {
            Self::PinPending => Some(CommandKind::Pin),
            Self::Registering => Some(CommandKind::RegisterState),
            Self::AttachingPacketService => Some(CommandKind::PacketService),
            Self::Connecting => Some(CommandKind::Connect),
            Self::QueryingIpConfig => Some(CommandKind::IpConfiguration),
            _ => None,
        }
    }

    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Closed)
    }
}

/// A finished command, tagged with the state it was submitted in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub state: SessionState,
    pub outcome: Result<Response, CommandError>,
}

/// What the driver of the state machine has to do next
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step<'a> {
    /// Submit this command and feed its completion back
    Submit(Request<'a>),
    /// Stop issuing commands and close the device
    Shutdown,
    /// Nothing to do, the completion did not belong to the current state
    Ignore,
}

/// Connection bring-up sequence.
///
/// The machine does no I/O. It hands out the next [`Request`] and is told
/// about each outcome through [`StateMachine::on_completion`].
#[derive(Debug, Clone)]
pub struct StateMachine<'a> {
    config: Config<'a>,
    inner: SessionState,
    attempts: RegistrationAttempts,
    session_id: Option<u32>,
    network_config: Option<NetworkConfig>,
    error: Option<Error>,
}

impl<'a> StateMachine<'a> {
    pub fn new(config: Config<'a>) -> Self {
        Self {
            config,
            inner: SessionState::Idle,
            attempts: RegistrationAttempts::new(config.max_registration_attempts),
            session_id: None,
            network_config: None,
            error: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.inner
    }

    pub fn session_id(&self) -> Option<u32> {
        self.session_id
    }

    pub fn registration_attempts(&self) -> u32 {
        self.attempts.count()
    }

    pub fn network_config(&self) -> Option<&NetworkConfig> {
        self.network_config.as_ref()
    }

    /// First fatal failure recorded, if any
    pub fn error(&self) -> Option<Error> {
        self.error
    }

    fn set_state(&mut self, new_state: SessionState) {
        debug!("State transition: {:?} -> {:?}", self.inner, new_state);
        self.inner = new_state;
    }

    /// Issue the first command of the sequence.
    ///
    /// Without a configured PIN the PIN step is skipped.
    pub fn start(&mut self) -> Step<'a> {
        if self.inner != SessionState::Idle {
            warn!("Session already started, in {:?}", self.inner);
            return Step::Ignore;
        }

        match self.config.pin {
            Some(pin) => {
                self.set_state(SessionState::PinPending);
                Step::Submit(Request::SetPin(SetPin::enter(pin)))
            }
            None => {
                debug!("No PIN configured, skipping PIN entry");
                self.enter_registering()
            }
        }
    }

    pub fn on_completion(&mut self, completion: Completion) -> Step<'a> {
        if completion.state != self.inner {
            warn!(
                "Ignoring completion from {:?} while in {:?}",
                completion.state, self.inner
            );
            return Step::Ignore;
        }

        match self.inner {
            SessionState::PinPending => self.on_pin(completion.outcome),
            SessionState::Registering => self.on_register_state(completion.outcome),
            SessionState::AttachingPacketService => self.on_packet_service(completion.outcome),
            SessionState::Connecting => self.on_connect(completion.outcome),
            SessionState::QueryingIpConfig => self.on_ip_configuration(completion.outcome),
            state => {
                warn!("No command outstanding in {:?}", state);
                Step::Ignore
            }
        }
    }

    /// Record a fatal failure and start shutting down. Only the first
    /// failure of a run is kept.
    pub fn fail(&mut self, error: Error) -> Step<'a> {
        error!("Session failed in {:?}: {:?}", self.inner, error);
        if self.error.is_none() {
            self.error = Some(error);
        }
        self.begin_shutdown();
        Step::Shutdown
    }

    /// Fail before any command could be issued, e.g. the device did not open
    pub fn abort(&mut self, error: Error) {
        error!("Session aborted in {:?}: {:?}", self.inner, error);
        if self.error.is_none() {
            self.error = Some(error);
        }
        self.finish();
    }

    /// Returns `false` if shutdown was already under way
    pub fn begin_shutdown(&mut self) -> bool {
        match self.inner {
            SessionState::ShuttingDown | SessionState::Closed => false,
            _ => {
                self.set_state(SessionState::ShuttingDown);
                true
            }
        }
    }

    /// The device has been closed
    pub fn finish(&mut self) {
        if self.inner != SessionState::Closed {
            self.set_state(SessionState::Closed);
        }
    }

    /// Terminal result of the run: the network configuration or the first
    /// fatal failure, never both.
    pub fn into_outcome(self) -> Result<NetworkConfig, Error> {
        match (self.error, self.network_config) {
            (Some(e), _) => Err(e),
            (None, Some(config)) => Ok(config),
            (None, None) => Err(Error::InvalidState),
        }
    }

    fn enter_registering(&mut self) -> Step<'a> {
        self.attempts.reset();
        self.set_state(SessionState::Registering);
        Step::Submit(Request::GetRegisterState(GetRegisterState))
    }

    fn on_pin(&mut self, outcome: Result<Response, CommandError>) -> Step<'a> {
        let policy = self.config.pin_policy;
        match outcome {
            Ok(Response::Pin(PinInfo {
                pin_state: PinState::Locked,
                remaining_attempts,
                ..
            })) if policy == PinPolicy::Strict => {
                error!("SIM still locked, {} attempts left", remaining_attempts);
                self.fail(Error::CommandFailed(CommandKind::Pin))
            }
            Ok(Response::Pin(info)) => {
                debug!("PIN state {:?}", info.pin_state);
                self.enter_registering()
            }
            Ok(_) => self.fail(Error::ParseFailed(CommandKind::Pin)),
            Err(CommandError::Failed(MbimStatus::PinDisabled)) => {
                warn!("PIN disabled, continuing");
                self.enter_registering()
            }
            Err(e @ (CommandError::Failed(_) | CommandError::Timeout))
                if policy == PinPolicy::Lenient =>
            {
                warn!("PIN entry failed ({:?}), assuming already entered", e);
                self.enter_registering()
            }
            Err(e) => self.fail(e.classify(CommandKind::Pin)),
        }
    }

    fn on_register_state(&mut self, outcome: Result<Response, CommandError>) -> Step<'a> {
        let attempt = self.attempts.record();

        match outcome {
            Ok(Response::RegisterState(RegistrationStateInfo {
                register_state,
                provider_name,
                roaming_text,
                available_data_classes,
                ..
            })) => {
                info!(
                    "Registration attempt {}: {:?}, provider '{}' roaming '{}', data classes {:?}",
                    attempt,
                    register_state,
                    provider_name.as_str(),
                    roaming_text.as_str(),
                    available_data_classes
                );

                if register_state.is_registered() {
                    self.set_state(SessionState::AttachingPacketService);
                    return Step::Submit(Request::SetPacketService(SetPacketService {
                        action: PacketServiceAction::Attach,
                    }));
                }
            }
            Ok(_) => return self.fail(Error::ParseFailed(CommandKind::RegisterState)),
            Err(e @ (CommandError::Failed(_) | CommandError::Timeout)) => {
                warn!("Registration attempt {} failed: {:?}", attempt, e);
            }
            Err(e) => return self.fail(e.classify(CommandKind::RegisterState)),
        }

        if self.attempts.exhausted() {
            return self.fail(Error::RegistrationTimedOut);
        }

        Step::Submit(Request::GetRegisterState(GetRegisterState))
    }

    fn on_packet_service(&mut self, outcome: Result<Response, CommandError>) -> Step<'a> {
        match outcome {
            Ok(Response::PacketService(PacketServiceInfo {
                packet_service_state,
                highest_available_data_class,
                uplink_speed,
                downlink_speed,
                ..
            })) => {
                info!(
                    "Packet service {:?}, data class {:?}, uplink {} bps, downlink {} bps",
                    packet_service_state,
                    highest_available_data_class,
                    uplink_speed,
                    downlink_speed
                );

                let apn = self.config.apn;
                self.set_state(SessionState::Connecting);
                Step::Submit(Request::SetConnect(SetConnect {
                    session_id: self.config.session_id,
                    activation_command: ActivationCommand::Activate,
                    access_string: apn.name(),
                    user_name: apn.username(),
                    password: apn.password(),
                    compression: Compression::None,
                    auth_protocol: self.config.auth_protocol,
                    ip_type: self.config.ip_type,
                    context_type: self.config.context_type.uuid(),
                }))
            }
            Ok(_) => self.fail(Error::ParseFailed(CommandKind::PacketService)),
            Err(e) => self.fail(e.classify(CommandKind::PacketService)),
        }
    }

    fn on_connect(&mut self, outcome: Result<Response, CommandError>) -> Step<'a> {
        match outcome {
            Ok(Response::Connect(ConnectInfo {
                session_id,
                activation_state: ActivationState::Activated,
                ip_type,
                ..
            })) => {
                info!("Session {} activated, {:?}", session_id, ip_type);
                self.session_id = Some(session_id);
                self.set_state(SessionState::QueryingIpConfig);
                Step::Submit(Request::GetIpConfiguration(GetIpConfiguration { session_id }))
            }
            Ok(Response::Connect(info)) => {
                error!(
                    "Session {} not activated: {:?}, network error {}",
                    info.session_id, info.activation_state, info.nw_error
                );
                self.fail(Error::CommandFailed(CommandKind::Connect))
            }
            Ok(_) => self.fail(Error::ParseFailed(CommandKind::Connect)),
            Err(e) => self.fail(e.classify(CommandKind::Connect)),
        }
    }

    fn on_ip_configuration(&mut self, outcome: Result<Response, CommandError>) -> Step<'a> {
        let response: IpConfiguration = match outcome {
            Ok(Response::IpConfiguration(response)) => response,
            Ok(_) => return self.fail(Error::ParseFailed(CommandKind::IpConfiguration)),
            Err(e) => return self.fail(e.classify(CommandKind::IpConfiguration)),
        };

        match ip_config::decode(&response) {
            Ok(config) => {
                info!("Network configuration: {:?}", config);
                self.network_config = Some(config);
                self.set_state(SessionState::Established);
                Step::Shutdown
            }
            Err(DecodeError::Unavailable) => self.fail(Error::ConfigUnavailable),
            Err(DecodeError::InvalidPrefixLength(p)) => {
                error!("Invalid on-link prefix length {}", p);
                self.fail(Error::ParseFailed(CommandKind::IpConfiguration))
            }
        }
    }
}
