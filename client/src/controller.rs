//! Session controller
//!
//! Owns the [`Session`], publishes every change on a watch channel and
//! drives the countdown while a code is outstanding. Submissions run one at
//! a time: a second submit while a request is in flight is refused with
//! [`SubmitError::InFlight`].

use pv_core::domain::{Session, Step, SubmitError};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info};

use crate::countdown::{Countdown, CountdownHandle};
use crate::gateway::VerificationApi;

const TICK_PERIOD: Duration = Duration::from_secs(1);

struct Shared {
    session: Mutex<Session>,
    tx: watch::Sender<Session>,
}

impl Shared {
    fn update<T>(&self, f: impl FnOnce(&mut Session) -> T) -> T {
        let mut session = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        let out = f(&mut session);
        self.tx.send_replace(session.clone());
        out
    }

    fn snapshot(&self) -> Session {
        self.session
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

pub struct SessionController<A: VerificationApi> {
    api: Arc<A>,
    shared: Arc<Shared>,
    countdown: Mutex<Option<CountdownHandle>>,
}

impl<A: VerificationApi> SessionController<A> {
    pub fn new(api: A) -> Self {
        Self::with_api(Arc::new(api))
    }

    pub fn with_api(api: Arc<A>) -> Self {
        let session = Session::new();
        let (tx, _rx) = watch::channel(session.clone());
        Self {
            api,
            shared: Arc::new(Shared {
                session: Mutex::new(session),
                tx,
            }),
            countdown: Mutex::new(None),
        }
    }

    /// Receiver that sees every session change, countdown ticks included
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.shared.tx.subscribe()
    }

    pub fn snapshot(&self) -> Session {
        self.shared.snapshot()
    }

    pub fn set_phone(&self, phone: impl Into<String>) {
        self.shared.update(|s| s.set_phone(phone));
    }

    pub fn set_code(&self, code: impl Into<String>) {
        self.shared.update(|s| s.set_code(code));
    }

    /// Request a code for the current phone entry.
    ///
    /// On a 2xx reply the session moves to the code step and the countdown
    /// starts. Gateway failures are reported through the session message.
    pub async fn submit_phone(&self) -> Result<(), SubmitError> {
        let phone = self.shared.update(Session::begin_send)?;

        let reply = self.api.start_verification(&phone).await;
        debug!(?reply, "Send finished");

        let entered_code_step = self.shared.update(|s| {
            s.finish_send(reply);
            s.step() == Step::Code
        });
        if entered_code_step {
            info!("Verification code sent, countdown started");
            self.start_countdown();
        }
        Ok(())
    }

    /// Check the current code entry. An approved reply unlocks the session
    /// and stops the countdown.
    pub async fn submit_code(&self) -> Result<(), SubmitError> {
        let (phone, code) = self.shared.update(Session::begin_check)?;

        let reply = self.api.check_verification(&phone, &code).await;
        debug!(?reply, "Check finished");

        let unlocked = self.shared.update(|s| {
            s.finish_check(reply);
            s.is_unlocked()
        });
        if unlocked {
            info!("Phone verified");
            self.stop_countdown();
        }
        Ok(())
    }

    /// Abandon the current session and start over from the phone step.
    ///
    /// Refused while a request is in flight, so its reply can never land on
    /// the fresh session.
    pub fn restart(&self) -> Result<(), SubmitError> {
        self.shared.update(|s| {
            if s.is_loading() {
                return Err(SubmitError::InFlight);
            }
            *s = Session::new();
            Ok(())
        })?;
        self.stop_countdown();
        Ok(())
    }

    /// Whether a countdown task is currently running
    pub fn countdown_running(&self) -> bool {
        self.countdown
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    fn start_countdown(&self) {
        let shared = self.shared.clone();
        let handle = Countdown::start(TICK_PERIOD, move || shared.update(Session::tick));

        // Replacing the handle drops, and so cancels, any previous countdown
        *self.countdown.lock().unwrap_or_else(PoisonError::into_inner) = Some(handle);
    }

    fn stop_countdown(&self) {
        if let Some(handle) = self
            .countdown
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            handle.cancel();
        }
    }
}
