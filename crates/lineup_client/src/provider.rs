use std::sync::Arc;

use leptos::prelude::*;
use leptos_use::core::ConnectionReadyState;
use leptos_use::{
    DummyEncoder, ReconnectLimit, UseWebSocketOptions, UseWebSocketReturn,
    use_websocket_with_options,
};
use lineup_common::codec::{Frame, SocketIoCodec};

use crate::config::ClientConfig;
use crate::context::QueueContext;
use crate::error::ClientError;
use crate::session::QueueSession;

/// Provider component that opens the Socket.IO connection and provides
/// [`QueueContext`].
///
/// Wrap every part of the page that shows or changes the queue:
///
/// ```rust,ignore
/// view! {
///     <QueueProvider config=ClientConfig::from_page()>
///         <StatusBadge />
///         <QueueList />
///     </QueueProvider>
/// }
/// ```
#[component]
pub fn QueueProvider(
    /// Connection settings
    config: ClientConfig,
    children: Children,
) -> impl IntoView {
    // Placeholders, filled in once use_websocket has handed out its functions
    let send_fn: StoredValue<Option<Arc<dyn Fn(&Frame) + Send + Sync>>> = StoredValue::new(None);
    let open_fn: StoredValue<Option<Arc<dyn Fn() + Send + Sync>>> = StoredValue::new(None);
    let close_fn: StoredValue<Option<Arc<dyn Fn() + Send + Sync>>> = StoredValue::new(None);

    let session = QueueSession::new(config.namespace.clone(), move |frame: &Frame| {
        match send_fn.get_value() {
            Some(send) => send(frame),
            None => log::warn!("[QueueProvider] socket not ready, dropping {frame:?}"),
        }
    });

    let open_arc: Arc<dyn Fn() + Send + Sync> = Arc::new(move || {
        if let Some(open) = open_fn.get_value() {
            open();
        }
    });
    let close_arc: Arc<dyn Fn() + Send + Sync> = Arc::new(move || {
        if let Some(close) = close_fn.get_value() {
            close();
        }
    });

    let ready_state_signal = RwSignal::new(ConnectionReadyState::Closed);
    let ctx = QueueContext::new(ready_state_signal.into(), session, open_arc, close_arc);
    provide_context(ctx.clone());

    let url = match config.browser_endpoint() {
        Ok(url) => url.to_string(),
        Err(e) => {
            ctx.record_error(e);
            return children().into_any();
        }
    };
    log::info!("[QueueProvider] connecting to {url}");

    let on_open_ctx = ctx.clone();
    let on_close_ctx = ctx.clone();
    let on_message_ctx = ctx.clone();
    let armed_heartbeat: StoredValue<Option<u64>> = StoredValue::new(None);
    let UseWebSocketReturn {
        ready_state,
        send: raw_send,
        open,
        close,
        ..
    } = use_websocket_with_options::<Frame, Frame, SocketIoCodec, (), DummyEncoder>(
        &url,
        UseWebSocketOptions::default()
            .immediate(config.auto_connect)
            .reconnect_limit(ReconnectLimit::Infinite)
            .reconnect_interval(config.reconnect_interval_ms)
            .on_open(move |_| {
                on_open_ctx.transport_opened();
            })
            .on_close(move |_| {
                on_close_ctx.transport_closed();
            })
            .on_error(move |e| {
                log::warn!("[QueueProvider] WebSocket error: {e:?}");
            })
            .on_message_raw(move |raw: &str| {
                // Errors are logged once, when recorded into `last_error`
                match Frame::decode(raw) {
                    Ok(frame) => {
                        let _ = on_message_ctx.handle_frame(frame);
                    }
                    Err(e) => on_message_ctx.record_error(ClientError::from(e)),
                }
                arm_heartbeat(&on_message_ctx, armed_heartbeat);
            }),
    );

    send_fn.set_value(Some(Arc::new(move |frame: &Frame| {
        raw_send(frame);
    })));
    open_fn.set_value(Some(Arc::new(move || {
        open();
    })));
    close_fn.set_value(Some(Arc::new(move || {
        close();
    })));

    Effect::new(move || {
        let state = ready_state.get();
        ready_state_signal.set(state);
    });

    children().into_any()
}

/// Start a silence timer for the session's current heartbeat, once per
/// heartbeat. A ping or a new handshake makes the older timer stale.
fn arm_heartbeat(ctx: &QueueContext, armed: StoredValue<Option<u64>>) {
    let Some((heartbeat, timeout)) = ctx.heartbeat() else {
        return;
    };
    if armed.get_value() == Some(heartbeat) {
        return;
    }
    armed.set_value(Some(heartbeat));

    let ctx = ctx.clone();
    set_timeout(
        move || {
            ctx.heartbeat_expired(heartbeat);
        },
        timeout,
    );
}
