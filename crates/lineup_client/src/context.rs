use std::sync::Arc;
use std::time::Duration;

use leptos::prelude::*;
use leptos_use::core::ConnectionReadyState;

use lineup_common::codec::Frame;
use lineup_common::{QueueState, RequestToken};

use crate::error::ClientError;
use crate::form::JoinForm;
use crate::session::{QueueSession, SessionEvent};
use crate::view::QueueView;

/// Connection control interface exposed to components.
#[derive(Clone)]
pub struct QueueConnection {
    /// WebSocket state
    pub ready_state: Signal<ConnectionReadyState>,
    /// Socket.IO namespace joined (not just the socket open)
    pub connected: Signal<bool>,
    pub open: Arc<dyn Fn() + Send + Sync>,
    pub close: Arc<dyn Fn() + Send + Sync>,
}

/// Context provided by `QueueProvider`.
///
/// Owns the [`QueueSession`] and mirrors its state into signals after every
/// frame, so components only ever read signals.
#[derive(Clone)]
pub struct QueueContext {
    pub ready_state: Signal<ConnectionReadyState>,
    pub connected: RwSignal<bool>,
    pub view: RwSignal<QueueView>,
    pub snapshot: RwSignal<Option<QueueState>>,
    /// Last error that occurred
    pub last_error: RwSignal<Option<ClientError>>,
    session: StoredValue<QueueSession>,
    /// Set when the heartbeat closed the socket; the close handler reopens it.
    reopen_on_close: StoredValue<bool>,
    open: Arc<dyn Fn() + Send + Sync>,
    close: Arc<dyn Fn() + Send + Sync>,
}

impl QueueContext {
    pub fn new(
        ready_state: Signal<ConnectionReadyState>,
        session: QueueSession,
        open: Arc<dyn Fn() + Send + Sync>,
        close: Arc<dyn Fn() + Send + Sync>,
    ) -> Self {
        Self {
            ready_state,
            connected: RwSignal::new(session.is_connected()),
            view: RwSignal::new(session.view().clone()),
            snapshot: RwSignal::new(session.snapshot().cloned()),
            last_error: RwSignal::new(None),
            session: StoredValue::new(session),
            reopen_on_close: StoredValue::new(false),
            open,
            close,
        }
    }

    /// Feed a decoded server frame through the session.
    pub fn handle_frame(&self, frame: Frame) -> Result<SessionEvent, ClientError> {
        let result = self
            .session
            .try_update_value(|session| session.handle_frame(frame))
            .unwrap_or(Ok(SessionEvent::Ignored));
        self.publish();
        if let Err(e) = &result {
            self.record_error(e.clone());
        }
        result
    }

    pub fn transport_opened(&self) {
        self.session.update_value(|session| session.transport_opened());
        self.publish();
    }

    pub fn transport_closed(&self) {
        self.session.update_value(|session| {
            session.transport_closed();
        });
        self.publish();

        // A manual close stops the socket's own retries
        if self.reopen_on_close.get_value() {
            self.reopen_on_close.set_value(false);
            log::info!("[QueueContext] reconnecting after missed heartbeat");
            (self.open)();
        }
    }

    pub fn heartbeat(&self) -> Option<(u64, Duration)> {
        self.session.with_value(|session| session.heartbeat())
    }

    /// Heartbeat timer callback. Returns `true` when the connection was
    /// declared dead; the socket is then closed and reopened once closed.
    pub fn heartbeat_expired(&self, heartbeat: u64) -> bool {
        let event = self
            .session
            .try_update_value(|session| session.heartbeat_expired(heartbeat))
            .unwrap_or(SessionEvent::Ignored);
        if event != SessionEvent::Disconnected {
            return false;
        }
        self.publish();
        self.reopen_on_close.set_value(true);
        (self.close)();
        true
    }

    /// Validate and emit the join request; the form is cleared on success.
    pub fn submit_join(&self, form: &mut JoinForm) -> Result<RequestToken, ClientError> {
        self.session
            .with_value(|session| session.submit_join(form))
            .inspect_err(|e| log::debug!("[QueueContext] join not sent: {e}"))
    }

    pub fn update_status(&self, status: &str) -> Result<(), ClientError> {
        self.session.with_value(|session| session.update_status(status))
    }

    pub fn next_token(&self) -> Result<(), ClientError> {
        self.session.with_value(|session| session.next_token())
    }

    pub fn clear_current(&self) -> Result<(), ClientError> {
        self.session.with_value(|session| session.clear_current())
    }

    pub fn refresh(&self) -> Result<(), ClientError> {
        self.session.with_value(|session| session.refresh())
    }

    pub fn connection(&self) -> QueueConnection {
        QueueConnection {
            ready_state: self.ready_state,
            connected: self.connected.into(),
            open: self.open.clone(),
            close: self.close.clone(),
        }
    }

    pub fn record_error(&self, error: ClientError) {
        log::warn!("[QueueContext] {error}");
        self.last_error.try_update_untracked(|err| *err = Some(error));
        self.last_error.notify();
    }

    /// Copy session state into the signals that changed.
    fn publish(&self) {
        let (connected, view, snapshot) = self.session.with_value(|session| {
            (
                session.is_connected(),
                session.view().clone(),
                session.snapshot().cloned(),
            )
        });

        // Frames arrive from socket callbacks, outside any tracking scope
        if self.connected.get_untracked() != connected {
            self.connected.try_update_untracked(|c| *c = connected);
            self.connected.notify();
        }
        if self.view.with_untracked(|v| *v != view) {
            self.view.try_update_untracked(|v| *v = view);
            self.view.notify();
        }
        if self.snapshot.with_untracked(|s| *s != snapshot) {
            self.snapshot.try_update_untracked(|s| *s = snapshot);
            self.snapshot.notify();
        }
    }
}
