use embassy_time::Duration;

use crate::command::basic_connect::types::{AuthProtocol, ContextIpType, ContextType};
use crate::command::CommandKind;
use crate::command_timing;

/// Registration polls allowed before giving up on the network
pub const DEFAULT_MAX_REGISTRATION_ATTEMPTS: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Apn<'a> {
    #[default]
    None,
    Given {
        name: &'a str,
        username: Option<&'a str>,
        password: Option<&'a str>,
    },
}

impl<'a> Apn<'a> {
    pub fn name(&self) -> &'a str {
        match self {
            Self::None => "",
            Self::Given { name, .. } => name,
        }
    }

    pub fn username(&self) -> &'a str {
        match self {
            Self::Given {
                username: Some(username),
                ..
            } => username,
            _ => "",
        }
    }

    pub fn password(&self) -> &'a str {
        match self {
            Self::Given {
                password: Some(password),
                ..
            } => password,
            _ => "",
        }
    }
}

/// How a failed PIN entry is judged.
///
/// A SIM that is already unlocked (PIN entered in an earlier run, or PIN
/// disabled) makes the device reject a PIN entry. Whether other PIN failures
/// are tolerated as well is a policy choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinPolicy {
    /// Any device reported PIN failure, including no answer at all, is taken
    /// as "already entered". Undecodable responses are still fatal.
    #[default]
    Lenient,
    /// Only a rejection saying the PIN is disabled, or a response saying the
    /// SIM is unlocked, is taken as "already entered".
    Strict,
}

/// Per-command timeout budget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timeouts {
    pub open: Duration,
    pub pin: Duration,
    pub register_state: Duration,
    pub packet_service: Duration,
    pub connect: Duration,
    pub ip_configuration: Duration,
    pub close: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            open: command_timing::open_timeout(),
            pin: command_timing::pin_timeout(),
            register_state: command_timing::register_state_timeout(),
            packet_service: command_timing::packet_service_timeout(),
            connect: command_timing::connect_timeout(),
            ip_configuration: command_timing::ip_configuration_timeout(),
            close: command_timing::close_timeout(),
        }
    }
}

impl Timeouts {
    pub fn for_kind(&self, kind: CommandKind) -> Duration {
        match kind {
            CommandKind::Pin => self.pin,
            CommandKind::RegisterState => self.register_state,
            CommandKind::PacketService => self.packet_service,
            CommandKind::Connect => self.connect,
            CommandKind::IpConfiguration => self.ip_configuration,
        }
    }

    /// Same budget for every step, mostly useful in tests
    pub fn uniform(timeout: Duration) -> Self {
        Self {
            open: timeout,
            pin: timeout,
            register_state: timeout,
            packet_service: timeout,
            connect: timeout,
            ip_configuration: timeout,
            close: timeout,
        }
    }
}

/// Parameters of a single session run
#[derive(Debug, Clone, Copy)]
pub struct Config<'a> {
    pub(crate) device_path: &'a str,
    pub(crate) pin: Option<&'a str>,
    pub(crate) pin_policy: PinPolicy,
    pub(crate) apn: Apn<'a>,
    pub(crate) auth_protocol: AuthProtocol,
    pub(crate) ip_type: ContextIpType,
    pub(crate) context_type: ContextType,
    pub(crate) session_id: u32,
    pub(crate) max_registration_attempts: u32,
    pub(crate) timeouts: Timeouts,
}

impl<'a> Config<'a> {
    #[must_use]
    pub fn new(device_path: &'a str) -> Self {
        Self {
            device_path,
            pin: None,
            pin_policy: PinPolicy::default(),
            apn: Apn::None,
            auth_protocol: AuthProtocol::None,
            ip_type: ContextIpType::Default,
            context_type: ContextType::Internet,
            session_id: 0,
            max_registration_attempts: DEFAULT_MAX_REGISTRATION_ATTEMPTS,
            timeouts: Timeouts::default(),
        }
    }

    pub fn with_pin(self, pin: &'a str) -> Self {
        Self {
            pin: Some(pin),
            ..self
        }
    }

    pub fn with_pin_policy(self, pin_policy: PinPolicy) -> Self {
        Self { pin_policy, ..self }
    }

    pub fn with_apn(self, apn: Apn<'a>) -> Self {
        Self { apn, ..self }
    }

    pub fn with_auth(self, auth_protocol: AuthProtocol) -> Self {
        Self {
            auth_protocol,
            ..self
        }
    }

    pub fn with_ip_type(self, ip_type: ContextIpType) -> Self {
        Self { ip_type, ..self }
    }

    pub fn with_context_type(self, context_type: ContextType) -> Self {
        Self {
            context_type,
            ..self
        }
    }

    pub fn with_session_id(self, session_id: u32) -> Self {
        Self { session_id, ..self }
    }

    /// Values below one are raised to one, a registration state is always
    /// queried at least once.
    pub fn with_max_registration_attempts(self, max: u32) -> Self {
        Self {
            max_registration_attempts: max.max(1),
            ..self
        }
    }

    pub fn with_timeouts(self, timeouts: Timeouts) -> Self {
        Self { timeouts, ..self }
    }

    pub fn device_path(&self) -> &'a str {
        self.device_path
    }

    pub fn pin(&self) -> Option<&'a str> {
        self.pin
    }

    pub fn pin_policy(&self) -> PinPolicy {
        self.pin_policy
    }

    pub fn apn(&self) -> Apn<'a> {
        self.apn
    }

    pub fn session_id(&self) -> u32 {
        self.session_id
    }

    pub fn max_registration_attempts(&self) -> u32 {
        self.max_registration_attempts
    }

    pub fn timeouts(&self) -> &Timeouts {
        &self.timeouts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::new("/dev/cdc-wdm0");
        assert_eq!(config.device_path(), "/dev/cdc-wdm0");
        assert_eq!(config.pin(), None);
        assert_eq!(config.pin_policy(), PinPolicy::Lenient);
        assert_eq!(config.max_registration_attempts(), 100);
        assert_eq!(config.timeouts().pin, Duration::from_secs(10));
        assert_eq!(config.timeouts().packet_service, Duration::from_secs(120));
        assert_eq!(config.timeouts().close, Duration::from_secs(15));
        assert_eq!(
            config.timeouts().for_kind(CommandKind::IpConfiguration),
            Duration::from_secs(60)
        );
    }

    #[test]
    fn builder() {
        let config = Config::new("/dev/cdc-wdm0")
            .with_pin("1889")
            .with_apn(Apn::Given {
                name: "internet.eplus.de",
                username: Some("eplus"),
                password: Some("eplus"),
            })
            .with_auth(AuthProtocol::Pap)
            .with_max_registration_attempts(0);

        assert_eq!(config.pin(), Some("1889"));
        assert_eq!(config.apn().name(), "internet.eplus.de");
        assert_eq!(config.apn().username(), "eplus");
        assert_eq!(config.apn().password(), "eplus");
        assert_eq!(config.max_registration_attempts(), 1);
    }

    #[test]
    fn apn_without_credentials() {
        let apn = Apn::Given {
            name: "em",
            username: None,
            password: None,
        };
        assert_eq!(apn.username(), "");
        assert_eq!(apn.password(), "");
        assert_eq!(Apn::None.name(), "");
    }
}
