//! Scripted stand-ins for the MBIM device layer

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::vec::Vec;

use crate::command::basic_connect::types::ActivationCommand;
use crate::command::{CommandKind, Request, Response};
use crate::device::{DeviceError, MbimDevice, MbimTransport};

enum Reply {
    Respond(Result<Response, DeviceError>),
    Hang,
}

/// Replies handed out by a [`MockDevice`], in submission order
pub struct Script {
    replies: VecDeque<Reply>,
    close: Result<(), DeviceError>,
    hang_on_close: bool,
}

impl Default for Script {
    fn default() -> Self {
        Self::new()
    }
}

impl Script {
    pub fn new() -> Self {
        Self {
            replies: VecDeque::new(),
            close: Ok(()),
            hang_on_close: false,
        }
    }

    pub fn respond(mut self, response: Response) -> Self {
        self.replies.push_back(Reply::Respond(Ok(response)));
        self
    }

    pub fn fail(mut self, error: DeviceError) -> Self {
        self.replies.push_back(Reply::Respond(Err(error)));
        self
    }

    /// Never answer the next command
    pub fn hang(mut self) -> Self {
        self.replies.push_back(Reply::Hang);
        self
    }

    pub fn close_with(self, close: Result<(), DeviceError>) -> Self {
        Self { close, ..self }
    }

    pub fn hang_on_close(self) -> Self {
        Self {
            hang_on_close: true,
            ..self
        }
    }
}

struct Inner {
    script: RefCell<Script>,
    submitted: RefCell<Vec<CommandKind>>,
    connects: RefCell<Vec<(u32, ActivationCommand)>>,
    in_flight: Cell<usize>,
    max_in_flight: Cell<usize>,
    closes: Cell<usize>,
}

/// Clones share the script and the recorded history
#[derive(Clone)]
pub struct MockDevice {
    inner: Rc<Inner>,
}

impl MockDevice {
    pub fn new(script: Script) -> Self {
        Self {
            inner: Rc::new(Inner {
                script: RefCell::new(script),
                submitted: RefCell::new(Vec::new()),
                connects: RefCell::new(Vec::new()),
                in_flight: Cell::new(0),
                max_in_flight: Cell::new(0),
                closes: Cell::new(0),
            }),
        }
    }

    pub fn submitted(&self) -> Vec<CommandKind> {
        self.inner.submitted.borrow().clone()
    }

    /// Session id and activation command of every connect submitted
    pub fn connect_requests(&self) -> Vec<(u32, ActivationCommand)> {
        self.inner.connects.borrow().clone()
    }

    pub fn close_count(&self) -> usize {
        self.inner.closes.get()
    }

    pub fn max_in_flight(&self) -> usize {
        self.inner.max_in_flight.get()
    }
}

struct InFlight<'a>(&'a Inner);

impl<'a> InFlight<'a> {
    fn enter(inner: &'a Inner) -> Self {
        let now = inner.in_flight.get() + 1;
        inner.in_flight.set(now);
        inner.max_in_flight.set(inner.max_in_flight.get().max(now));
        Self(inner)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.in_flight.set(self.0.in_flight.get() - 1);
    }
}

impl MbimDevice for MockDevice {
    async fn command(&mut self, request: &Request<'_>) -> Result<Response, DeviceError> {
        let _guard = InFlight::enter(&self.inner);

        self.inner.submitted.borrow_mut().push(request.kind());
        if let Request::SetConnect(connect) = request {
            self.inner
                .connects
                .borrow_mut()
                .push((connect.session_id, connect.activation_command));
        }

        let reply = self.inner.script.borrow_mut().replies.pop_front();
        match reply {
            Some(Reply::Respond(result)) => result,
            Some(Reply::Hang) => core::future::pending().await,
            None => panic!("no reply scripted for {:?}", request.kind()),
        }
    }

    async fn close(self) -> Result<(), DeviceError> {
        self.inner.closes.set(self.inner.closes.get() + 1);

        let (close, hang) = {
            let script = self.inner.script.borrow();
            (script.close, script.hang_on_close)
        };
        if hang {
            core::future::pending::<()>().await;
        }
        close
    }
}

enum OpenResult {
    Device(MockDevice),
    Fail(DeviceError),
    Hang,
}

#[derive(Clone)]
pub struct MockTransport {
    open: Rc<OpenResult>,
    opens: Rc<Cell<usize>>,
}

impl MockTransport {
    pub fn new(device: MockDevice) -> Self {
        Self::with(OpenResult::Device(device))
    }

    pub fn failing(error: DeviceError) -> Self {
        Self::with(OpenResult::Fail(error))
    }

    pub fn hanging() -> Self {
        Self::with(OpenResult::Hang)
    }

    fn with(open: OpenResult) -> Self {
        Self {
            open: Rc::new(open),
            opens: Rc::new(Cell::new(0)),
        }
    }

    pub fn open_count(&self) -> usize {
        self.opens.get()
    }
}

impl MbimTransport for MockTransport {
    type Device = MockDevice;

    async fn open(&mut self, _path: &str) -> Result<MockDevice, DeviceError> {
        self.opens.set(self.opens.get() + 1);

        match &*self.open {
            OpenResult::Device(device) => Ok(device.clone()),
            OpenResult::Fail(error) => Err(*error),
            OpenResult::Hang => core::future::pending().await,
        }
    }
}
