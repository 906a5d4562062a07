use embassy_time::with_timeout;

use super::machine::{Completion, StateMachine, Step};
use super::shutdown::Shutdown;
use super::state;
use super::transaction::Transaction;
use crate::command::basic_connect::types::{
    ActivationCommand, AuthProtocol, Compression, ContextIpType,
};
use crate::command::basic_connect::SetConnect;
use crate::command::{CommandKind, Request, Response};
use crate::config::Config;
use crate::device::MbimTransport;
use crate::error::Error;
use crate::ip_config::NetworkConfig;

/// Drives one session from device open to device close.
///
/// Progress is published to the [`Control`](super::control::Control) handle
/// created alongside the runner.
pub struct Runner<'d, 'a, T: MbimTransport> {
    ch: state::Runner<'d>,
    transport: T,
    config: Config<'a>,
    started: bool,
}

impl<'d, 'a, T: MbimTransport> Runner<'d, 'a, T> {
    pub(crate) fn new(ch: state::Runner<'d>, transport: T, config: Config<'a>) -> Self {
        Self {
            ch,
            transport,
            config,
            started: false,
        }
    }

    async fn open(&mut self) -> Result<T::Device, Error> {
        let path = self.config.device_path;
        debug!("Opening {}", path);

        match with_timeout(self.config.timeouts.open, self.transport.open(path)).await {
            Ok(Ok(device)) => {
                info!("Opened {}", path);
                Ok(device)
            }
            Ok(Err(e)) => {
                error!("Failed to open {}: {:?}", path, e);
                Err(Error::DeviceOpenFailed)
            }
            Err(_) => {
                error!("Timed out opening {}", path);
                Err(Error::DeviceOpenFailed)
            }
        }
    }

    fn publish(&self, machine: &StateMachine<'_>) {
        self.ch.set_session_id(machine.session_id());
        self.ch
            .set_registration_attempts(machine.registration_attempts());
        self.ch.set_network_config(machine.network_config().copied());
        self.ch.set_session_state(machine.state());
    }

    /// Bring up a data session and return its IPv4 configuration.
    ///
    /// The device is closed before this returns, whatever the outcome. A
    /// runner can only be run once, later calls fail with
    /// [`Error::InvalidState`].
    pub async fn run(&mut self) -> Result<NetworkConfig, Error> {
        if self.started {
            return Err(Error::InvalidState);
        }
        self.started = true;

        let mut machine = StateMachine::new(self.config);

        let device = match self.open().await {
            Ok(device) => device,
            Err(e) => {
                machine.abort(e);
                self.publish(&machine);
                return machine.into_outcome();
            }
        };

        let mut transaction = Transaction::new(device, self.config.timeouts);
        let mut step = machine.start();

        while let Step::Submit(request) = step {
            self.publish(&machine);
            let state = machine.state();
            let outcome = transaction.execute(&request).await;
            step = machine.on_completion(Completion { state, outcome });
        }

        self.publish(&machine);
        machine.begin_shutdown();
        self.publish(&machine);

        let mut shutdown = Shutdown::new(transaction.release(), self.config.timeouts.close);
        // Close failures are already logged and never change the outcome
        let _ = shutdown.close().await;

        machine.finish();
        self.publish(&machine);

        let outcome = machine.into_outcome();
        match &outcome {
            Ok(_) => info!("Session established"),
            Err(e) => error!("Session failed: {:?}", e),
        }
        outcome
    }

    /// Deactivate the configured session on the device.
    ///
    /// Opens the device, issues a connect deactivation for
    /// [`Config::session_id`] and closes the device again.
    pub async fn disconnect(&mut self) -> Result<(), Error> {
        let device = self.open().await?;
        let mut transaction = Transaction::new(device, self.config.timeouts);

        let request = Request::SetConnect(SetConnect {
            session_id: self.config.session_id,
            activation_command: ActivationCommand::Deactivate,
            access_string: "",
            user_name: "",
            password: "",
            compression: Compression::None,
            auth_protocol: AuthProtocol::None,
            ip_type: ContextIpType::Default,
            context_type: self.config.context_type.uuid(),
        });
        let outcome = transaction.execute(&request).await;

        let mut shutdown = Shutdown::new(transaction.release(), self.config.timeouts.close);
        let _ = shutdown.close().await;

        match outcome {
            Ok(Response::Connect(info)) => {
                info!(
                    "Session {} deactivation: {:?}",
                    info.session_id, info.activation_state
                );
                Ok(())
            }
            Ok(_) => Err(Error::ParseFailed(CommandKind::Connect)),
            Err(e) => {
                let e = e.classify(CommandKind::Connect);
                error!("Disconnect failed: {:?}", e);
                Err(e)
            }
        }
    }
}
