use core::cell::RefCell;
use core::future::poll_fn;
use core::task::{Context, Poll};

use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::waitqueue::WakerRegistration;

use super::machine::SessionState;
use crate::ip_config::NetworkConfig;

/// Session progress as seen from outside the runner
pub struct State {
    shared: Mutex<NoopRawMutex, RefCell<Shared>>,
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

impl State {
    pub const fn new() -> Self {
        Self {
            shared: Mutex::new(RefCell::new(Shared {
                session_state: SessionState::Idle,
                session_id: None,
                registration_attempts: 0,
                network_config: None,
                state_waker: WakerRegistration::new(),
            })),
        }
    }
}

pub struct Shared {
    session_state: SessionState,
    session_id: Option<u32>,
    registration_attempts: u32,
    network_config: Option<NetworkConfig>,
    state_waker: WakerRegistration,
}

#[derive(Clone, Copy)]
pub struct Runner<'d> {
    pub(crate) shared: &'d Mutex<NoopRawMutex, RefCell<Shared>>,
}

impl<'d> Runner<'d> {
    pub fn new(state: &'d mut State) -> Self {
        Self {
            shared: &state.shared,
        }
    }

    pub fn set_session_state(&self, state: SessionState) {
        self.shared.lock(|s| {
            let s = &mut *s.borrow_mut();
            if s.session_state != state {
                s.session_state = state;
                s.state_waker.wake();
            }
        });
    }

    pub fn session_state(&self, cx: Option<&mut Context>) -> SessionState {
        self.shared.lock(|s| {
            let s = &mut *s.borrow_mut();
            if let Some(cx) = cx {
                s.state_waker.register(cx.waker());
            }
            s.session_state
        })
    }

    pub fn set_session_id(&self, session_id: Option<u32>) {
        self.shared.lock(|s| s.borrow_mut().session_id = session_id);
    }

    pub fn session_id(&self) -> Option<u32> {
        self.shared.lock(|s| s.borrow().session_id)
    }

    pub fn set_registration_attempts(&self, attempts: u32) {
        self.shared
            .lock(|s| s.borrow_mut().registration_attempts = attempts);
    }

    pub fn registration_attempts(&self) -> u32 {
        self.shared.lock(|s| s.borrow().registration_attempts)
    }

    pub fn set_network_config(&self, config: Option<NetworkConfig>) {
        self.shared.lock(|s| s.borrow_mut().network_config = config);
    }

    pub fn network_config(&self) -> Option<NetworkConfig> {
        self.shared.lock(|s| s.borrow().network_config)
    }

    pub async fn wait_for_session_state(&self, ps: SessionState) {
        if self.session_state(None) == ps {
            return;
        }

        poll_fn(|cx| {
            if self.session_state(Some(cx)) == ps {
                return Poll::Ready(());
            }
            Poll::Pending
        })
        .await
    }

    pub async fn wait_for_session_state_change(&self) -> SessionState {
        let old_state = self.session_state(None);

        poll_fn(|cx| {
            let current_state = self.session_state(Some(cx));
            if current_state != old_state {
                return Poll::Ready(current_state);
            }
            Poll::Pending
        })
        .await
    }
}
