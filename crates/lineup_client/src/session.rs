//! Transport-agnostic queue session.
//!
//! [`QueueSession`] runs the Socket.IO handshake, answers heartbeats, applies
//! `state_update` snapshots to its [`QueueView`], and encodes outbound events.
//! It never touches the network itself: the owner hands it decoded frames and
//! supplies a `send` function that transmits the frames it produces. The
//! Leptos provider wires it to a WebSocket; tests wire it to a `Vec`.

use std::sync::Arc;
use std::time::Duration;

use lineup_common::codec::{Frame, Handshake, Packet, PacketKind};
use lineup_common::{
    ClearCurrent, GetState, NextToken, OutboundEvent, QueueState, RequestToken, UpdateStatus,
};
use serde_json::Value;

use crate::error::ClientError;
use crate::form::JoinForm;
use crate::view::QueueView;

/// Function that puts a frame on the wire.
pub type FrameSink = Arc<dyn Fn(&Frame) + Send + Sync>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    /// No transport, or the server ended the session.
    Closed,
    /// Transport is open; Engine.IO/Socket.IO handshake in progress.
    Handshaking,
    /// Namespace joined; events flow.
    Connected,
}

/// What a handled frame meant for the page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    /// Namespace joined and `get_state` sent.
    Connected { sid: Option<String> },
    /// A snapshot replaced the view.
    StateApplied,
    /// The session ended; the badge now reads `Disconnected`.
    Disconnected,
    /// Nothing visible changed.
    Ignored,
}

pub struct QueueSession {
    namespace: String,
    phase: SessionPhase,
    handshake: Option<Handshake>,
    snapshot: Option<QueueState>,
    view: QueueView,
    send: FrameSink,
    /// Bumped on every `open` and `ping`; a heartbeat timer armed for an
    /// older value is stale.
    heartbeat: u64,
}

impl QueueSession {
    pub fn new(namespace: impl Into<String>, send: impl Fn(&Frame) + Send + Sync + 'static) -> Self {
        Self {
            namespace: namespace.into(),
            phase: SessionPhase::Closed,
            handshake: None,
            snapshot: None,
            view: QueueView::connecting(),
            send: Arc::new(send),
            heartbeat: 0,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_connected(&self) -> bool {
        self.phase == SessionPhase::Connected
    }

    pub fn view(&self) -> &QueueView {
        &self.view
    }

    /// Last snapshot received, if any.
    pub fn snapshot(&self) -> Option<&QueueState> {
        self.snapshot.as_ref()
    }

    pub fn handshake(&self) -> Option<&Handshake> {
        self.handshake.as_ref()
    }

    pub fn transport_opened(&mut self) {
        log::debug!("[QueueSession] transport open, awaiting handshake");
        self.phase = SessionPhase::Handshaking;
    }

    pub fn transport_closed(&mut self) -> SessionEvent {
        log::info!("[QueueSession] transport closed");
        self.handshake = None;
        self.disconnect()
    }

    /// Current heartbeat and how long the server may stay silent after it
    /// (`pingInterval + pingTimeout`). `None` until the handshake arrives.
    pub fn heartbeat(&self) -> Option<(u64, Duration)> {
        self.handshake.as_ref().map(|h| {
            (
                self.heartbeat,
                Duration::from_millis(h.ping_interval.saturating_add(h.ping_timeout)),
            )
        })
    }

    /// A heartbeat timer fired. If no `open` or `ping` arrived since it was
    /// armed the connection is dead and the session ends.
    pub fn heartbeat_expired(&mut self, heartbeat: u64) -> SessionEvent {
        if heartbeat != self.heartbeat || self.handshake.is_none() {
            return SessionEvent::Ignored;
        }
        log::warn!("[QueueSession] no ping from server, dropping connection");
        self.handshake = None;
        self.disconnect()
    }

    /// Handle one decoded frame from the server.
    ///
    /// A malformed `state_update` or a refused connection is returned as an
    /// error; the current view is left untouched in both cases.
    pub fn handle_frame(&mut self, frame: Frame) -> Result<SessionEvent, ClientError> {
        match frame {
            Frame::Open(handshake) => {
                log::debug!(
                    "[QueueSession] engine.io open sid={} ping_interval={}ms",
                    handshake.sid,
                    handshake.ping_interval
                );
                self.handshake = Some(handshake);
                self.phase = SessionPhase::Handshaking;
                self.heartbeat += 1;
                self.send_frame(&Frame::Message(Packet::connect(&self.namespace)));
                Ok(SessionEvent::Ignored)
            }
            Frame::Ping(data) => {
                self.heartbeat += 1;
                self.send_frame(&Frame::Pong(data));
                Ok(SessionEvent::Ignored)
            }
            Frame::Close => Ok(self.disconnect()),
            Frame::Message(packet) if packet.namespace != self.namespace => {
                log::debug!(
                    "[QueueSession] ignoring packet for namespace {}",
                    packet.namespace
                );
                Ok(SessionEvent::Ignored)
            }
            Frame::Message(packet) => self.handle_packet(packet),
            Frame::Pong(_) | Frame::Upgrade | Frame::Noop => Ok(SessionEvent::Ignored),
        }
    }

    fn handle_packet(&mut self, packet: Packet) -> Result<SessionEvent, ClientError> {
        match &packet.kind {
            PacketKind::Connect(payload) => {
                let sid = payload
                    .as_ref()
                    .and_then(|p| p.get("sid"))
                    .and_then(Value::as_str)
                    .map(str::to_string);
                log::info!("[QueueSession] connected to {} (sid {:?})", self.namespace, sid);
                self.phase = SessionPhase::Connected;
                self.emit(&GetState)?;
                Ok(SessionEvent::Connected { sid })
            }
            PacketKind::Disconnect => Ok(self.disconnect()),
            PacketKind::ConnectError(payload) => {
                let reason = payload
                    .get("message")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| payload.to_string());
                log::debug!("[QueueSession] connection refused");
                self.disconnect();
                Err(ClientError::ConnectRejected(reason))
            }
            PacketKind::Event { .. } => match packet.decode_event::<QueueState>() {
                Some(Ok(state)) => {
                    self.apply_snapshot(state);
                    Ok(SessionEvent::StateApplied)
                }
                Some(Err(err)) => {
                    log::debug!("[QueueSession] keeping previous view");
                    Err(ClientError::MalformedSnapshot(err.to_string()))
                }
                None => {
                    log::debug!("[QueueSession] unhandled event {:?}", packet.event_name());
                    Ok(SessionEvent::Ignored)
                }
            },
            PacketKind::Ack { .. } => Ok(SessionEvent::Ignored),
        }
    }

    /// Replace the view with a render of `state`.
    pub fn apply_snapshot(&mut self, state: QueueState) {
        log::debug!(
            "[QueueSession] snapshot: status={} serving={:?} waiting={}",
            state.professor_status,
            state.current_token.as_ref().map(|t| t.id),
            state.queue.len()
        );
        self.view = QueueView::render(&state);
        self.snapshot = Some(state);
    }

    fn disconnect(&mut self) -> SessionEvent {
        self.phase = SessionPhase::Closed;
        self.view = self.view.disconnected();
        SessionEvent::Disconnected
    }

    /// Encode and send an event. Fire-and-forget: whether a closed transport
    /// buffers or drops it is up to the transport.
    pub fn emit<E: OutboundEvent>(&self, event: &E) -> Result<(), ClientError> {
        let packet = Packet::event(&self.namespace, event)?;
        log::debug!("[QueueSession] emit {}", E::NAME);
        self.send_frame(&Frame::Message(packet));
        Ok(())
    }

    fn send_frame(&self, frame: &Frame) {
        (self.send)(frame);
    }

    /// Ask for a fresh snapshot.
    pub fn refresh(&self) -> Result<(), ClientError> {
        self.emit(&GetState)
    }

    /// Validate the form, emit `request_token`, then clear the form.
    ///
    /// A blank name emits nothing and leaves the form as it was. There is no
    /// duplicate guard and no connection check.
    pub fn submit_join(&self, form: &mut JoinForm) -> Result<RequestToken, ClientError> {
        let request = form.validate()?;
        self.emit(&request)?;
        form.reset();
        Ok(request)
    }

    pub fn update_status(&self, status: &str) -> Result<(), ClientError> {
        self.require_connected()?;
        self.emit(&UpdateStatus {
            status: status.to_string(),
        })
    }

    pub fn next_token(&self) -> Result<(), ClientError> {
        self.require_connected()?;
        self.emit(&NextToken)
    }

    pub fn clear_current(&self) -> Result<(), ClientError> {
        self.require_connected()?;
        self.emit(&ClearCurrent)
    }

    fn require_connected(&self) -> Result<(), ClientError> {
        if self.is_connected() {
            Ok(())
        } else {
            Err(ClientError::NotConnected)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use crate::view::{CurrentTokenView, DISCONNECTED_LABEL};

    const OPEN: &str = r#"0{"sid":"abc","upgrades":[],"pingInterval":25000,"pingTimeout":20000,"maxPayload":1000000}"#;

    fn recording_session() -> (QueueSession, Arc<Mutex<Vec<String>>>) {
        let sent = Arc::new(Mutex::new(Vec::new()));
        let sink = sent.clone();
        let session = QueueSession::new("/", move |frame: &Frame| {
            sink.lock().unwrap().push(frame.encode().unwrap());
        });
        (session, sent)
    }

    fn feed(session: &mut QueueSession, raw: &str) -> Result<SessionEvent, ClientError> {
        session.handle_frame(Frame::decode(raw).unwrap())
    }

    fn connected_session() -> (QueueSession, Arc<Mutex<Vec<String>>>) {
        let (mut session, sent) = recording_session();
        session.transport_opened();
        feed(&mut session, OPEN).unwrap();
        feed(&mut session, r#"40{"sid":"xyz"}"#).unwrap();
        sent.lock().unwrap().clear();
        (session, sent)
    }

    fn state_update(status: &str, current: &str, queue: &str) -> String {
        format!(
            r#"42["state_update",{{"professor_status":"{status}","current_token":{current},"queue":{queue}}}]"#
        )
    }

    #[test]
    fn test_handshake_requests_state() {
        let (mut session, sent) = recording_session();
        session.transport_opened();
        assert_eq!(session.phase(), SessionPhase::Handshaking);

        feed(&mut session, OPEN).unwrap();
        assert_eq!(*sent.lock().unwrap(), vec!["40".to_string()]);
        assert_eq!(session.handshake().map(|h| h.ping_interval), Some(25000));

        let event = feed(&mut session, r#"40{"sid":"xyz"}"#).unwrap();
        assert_eq!(event, SessionEvent::Connected { sid: Some("xyz".into()) });
        assert!(session.is_connected());
        assert_eq!(
            *sent.lock().unwrap(),
            vec!["40".to_string(), r#"42["get_state"]"#.to_string()]
        );
    }

    #[test]
    fn test_silent_server_ends_session() {
        let (mut session, _) = recording_session();
        session.transport_opened();
        feed(
            &mut session,
            r#"0{"sid":"abc","upgrades":[],"pingInterval":25,"pingTimeout":20}"#,
        )
        .unwrap();
        feed(&mut session, "40").unwrap();

        let (heartbeat, timeout) = session.heartbeat().unwrap();
        assert_eq!(timeout, Duration::from_millis(45));
        assert_eq!(session.heartbeat_expired(heartbeat), SessionEvent::Disconnected);
        assert_eq!(session.phase(), SessionPhase::Closed);
        assert_eq!(session.view().status.label, DISCONNECTED_LABEL);
        assert!(session.heartbeat().is_none());
    }

    #[test]
    fn test_ping_rearms_heartbeat() {
        let (mut session, _) = connected_session();
        let (armed, _) = session.heartbeat().unwrap();
        feed(&mut session, "2").unwrap();

        assert_eq!(session.heartbeat_expired(armed), SessionEvent::Ignored);
        assert!(session.is_connected());

        let (current, _) = session.heartbeat().unwrap();
        assert_ne!(current, armed);
        assert_eq!(session.heartbeat_expired(current), SessionEvent::Disconnected);
    }

    #[test]
    fn test_heartbeat_ignored_before_handshake() {
        let (mut session, _) = recording_session();
        assert!(session.heartbeat().is_none());
        assert_eq!(session.heartbeat_expired(0), SessionEvent::Ignored);
    }

    #[test]
    fn test_ping_is_answered() {
        let (mut session, sent) = connected_session();
        feed(&mut session, "2").unwrap();
        assert_eq!(*sent.lock().unwrap(), vec!["3".to_string()]);
    }

    #[test]
    fn test_second_snapshot_replaces_first() {
        let (mut session, _) = connected_session();
        let first = state_update(
            "Busy",
            r#"{"id":1,"name":"Ann","type":"Regular"}"#,
            r#"[{"id":2,"name":"Ben","type":"Regular"},{"id":3,"name":"Cat","type":"Makeup"}]"#,
        );
        let second = state_update("Available", "null", r#"[{"id":4,"name":"Dee","type":"Regular"}]"#);

        assert_eq!(feed(&mut session, &first).unwrap(), SessionEvent::StateApplied);
        assert_eq!(feed(&mut session, &second).unwrap(), SessionEvent::StateApplied);

        let view = session.view();
        assert_eq!(view.status.label, "Available");
        assert_eq!(view.current, CurrentTokenView::Idle);
        assert_eq!(view.queue.count, 1);
        let names: Vec<&str> = view.queue.rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Dee"]);
    }

    #[test]
    fn test_server_disconnect_sets_badge() {
        let (mut session, _) = connected_session();
        feed(&mut session, &state_update("Busy", "null", "[]")).unwrap();
        assert_eq!(feed(&mut session, "41").unwrap(), SessionEvent::Disconnected);
        assert_eq!(session.view().status.label, DISCONNECTED_LABEL);
        assert!(!session.is_connected());
    }

    #[test]
    fn test_transport_close_sets_badge_regardless_of_status() {
        for status in ["Available", "In Cabin", "Unavailable"] {
            let (mut session, _) = connected_session();
            feed(&mut session, &state_update(status, "null", "[]")).unwrap();
            assert_eq!(session.transport_closed(), SessionEvent::Disconnected);
            assert_eq!(session.view().status.label, "Disconnected");
        }
    }

    #[test]
    fn test_malformed_snapshot_keeps_previous_view() {
        let (mut session, _) = connected_session();
        feed(&mut session, &state_update("Busy", "null", r#"[{"id":2,"name":"Ben","type":"Regular"}]"#)).unwrap();
        let before = session.view().clone();

        let result = feed(&mut session, r#"42["state_update",{"queue":7}]"#);
        assert!(matches!(result, Err(ClientError::MalformedSnapshot(_))));
        assert_eq!(session.view(), &before);
    }

    #[test]
    fn test_connect_error_is_reported() {
        let (mut session, _) = recording_session();
        session.transport_opened();
        feed(&mut session, OPEN).unwrap();
        let result = feed(&mut session, r#"44{"message":"Not authorized"}"#);
        assert_eq!(result, Err(ClientError::ConnectRejected("Not authorized".into())));
        assert_eq!(session.phase(), SessionPhase::Closed);
    }

    #[test]
    fn test_other_namespaces_are_ignored() {
        let (mut session, _) = connected_session();
        let raw = r#"42/admin,["state_update",{"professor_status":"Busy","current_token":null,"queue":[]}]"#;
        assert_eq!(feed(&mut session, raw).unwrap(), SessionEvent::Ignored);
        assert!(session.snapshot().is_none());
    }

    #[test]
    fn test_blank_name_never_emits() {
        let (session, sent) = connected_session();
        for name in ["", "   "] {
            let mut form = JoinForm::new(name, "Regular");
            assert_eq!(session.submit_join(&mut form), Err(ClientError::EmptyName));
            assert_eq!(form.name, name);
        }
        assert!(sent.lock().unwrap().is_empty());
    }

    #[test]
    fn test_valid_submission_emits_once_and_clears_form() {
        let (session, sent) = connected_session();
        let mut form = JoinForm::new("Alice", "Regular");
        let request = session.submit_join(&mut form).unwrap();

        assert_eq!(request, RequestToken::new("Alice", "Regular"));
        assert_eq!(
            *sent.lock().unwrap(),
            vec![r#"42["request_token",{"name":"Alice","type":"Regular"}]"#.to_string()]
        );
        assert!(form.name.is_empty());
    }

    #[test]
    fn test_double_submission_is_not_guarded() {
        let (session, sent) = connected_session();
        session.submit_join(&mut JoinForm::new("Alice", "Regular")).unwrap();
        session.submit_join(&mut JoinForm::new("Alice", "Regular")).unwrap();
        assert_eq!(sent.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_join_while_disconnected_is_fire_and_forget() {
        let (session, sent) = recording_session();
        session.submit_join(&mut JoinForm::new("Alice", "Makeup")).unwrap();
        assert_eq!(sent.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_professor_commands_need_connection() {
        let (session, sent) = recording_session();
        assert_eq!(session.next_token(), Err(ClientError::NotConnected));
        assert_eq!(session.clear_current(), Err(ClientError::NotConnected));
        assert_eq!(session.update_status("Busy"), Err(ClientError::NotConnected));
        assert!(sent.lock().unwrap().is_empty());
    }

    #[test]
    fn test_professor_commands_when_connected() {
        let (session, sent) = connected_session();
        session.update_status("In Cabin").unwrap();
        session.next_token().unwrap();
        session.clear_current().unwrap();
        assert_eq!(
            *sent.lock().unwrap(),
            vec![
                r#"42["update_status",{"status":"In Cabin"}]"#.to_string(),
                r#"42["next_token"]"#.to_string(),
                r#"42["clear_current"]"#.to_string(),
            ]
        );
    }

    #[test]
    fn test_reconnect_rerenders_from_new_snapshot() {
        let (mut session, sent) = connected_session();
        session.transport_closed();
        session.transport_opened();
        feed(&mut session, OPEN).unwrap();
        feed(&mut session, "40").unwrap();
        assert!(sent.lock().unwrap().contains(&r#"42["get_state"]"#.to_string()));

        feed(&mut session, &state_update("Available", "null", "[]")).unwrap();
        assert_eq!(session.view().status.label, "Available");
    }
}
