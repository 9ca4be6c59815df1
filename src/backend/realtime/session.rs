/**
 * Real-time Session
 *
 * One `Session` owns one WebSocket connection from handshake to close.
 *
 * # Lifecycle
 *
 * ```text
 * Connecting --join--> Active --any failure / close / shutdown--> Closing --leave--> Closed
 * ```
 *
 * The state lives in an `AtomicU8` and only moves forward through
 * compare-and-swap, so the `Active -> Closing` step (and the registry
 * `leave` that goes with it) happens exactly once however many paths try
 * to close the session: reader end, writer failure, shutdown signal, or
 * `Drop` when the task is torn down.
 *
 * # Tasks
 *
 * While Active, the session polls three futures on its own task:
 *
 * - **reader** - decodes inbound frames; every chat frame is broadcast to
 *   the session's channel (the sender gets its own message back)
 * - **writer** - drains the outbound queue the registry pushes into and
 *   writes each payload as a text frame, bounded by `write_timeout`
 * - **shutdown** - the server-wide cancellation token
 *
 * The first one to finish decides the `CloseReason`; the others are
 * dropped, which unblocks any pending read or write.
 */

use std::fmt::Display;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::ws::Message;
use futures_util::{Sink, SinkExt, Stream, StreamExt};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::backend::error::RealtimeError;
use crate::backend::realtime::protocol::{self, Inbound};
use crate::backend::realtime::registry::{ChannelRegistry, Payload, SessionId};
use crate::shared::ChannelId;

/// Default capacity of a session's outbound queue
pub const DEFAULT_OUTBOUND_BUFFER: usize = 64;

/// Default bound on one socket write
pub const DEFAULT_WRITE_TIMEOUT: Duration = Duration::from_secs(5);

/// Per-session tuning
#[derive(Debug, Clone, Copy)]
pub struct SessionConfig {
    /// Capacity of the outbound queue between the registry and the writer
    pub outbound_buffer: usize,
    /// Bound on a single socket write before the session is closed
    pub write_timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            outbound_buffer: DEFAULT_OUTBOUND_BUFFER,
            write_timeout: DEFAULT_WRITE_TIMEOUT,
        }
    }
}

/// Lifecycle state of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SessionState {
    Connecting = 0,
    Active = 1,
    Closing = 2,
    Closed = 3,
}

impl SessionState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Connecting,
            1 => Self::Active,
            2 => Self::Closing,
            _ => Self::Closed,
        }
    }
}

/// Why an active session ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloseReason {
    /// Close frame received or the stream ended
    ClientClosed,
    /// Reading from the socket failed
    ReadFailure(String),
    /// Writing to the socket failed or timed out
    WriteFailure(String),
    /// The client sent a frame the protocol does not accept
    ProtocolViolation(String),
    /// The registry dropped this session after a failed delivery
    Evicted,
    /// The server is shutting down
    Shutdown,
}

/// One live real-time connection bound to a single channel
pub struct Session {
    id: SessionId,
    channel_id: ChannelId,
    registry: Arc<ChannelRegistry>,
    state: AtomicU8,
}

impl Session {
    pub fn new(channel_id: ChannelId, registry: Arc<ChannelRegistry>) -> Self {
        Self {
            id: Uuid::new_v4(),
            channel_id,
            registry,
            state: AtomicU8::new(SessionState::Connecting as u8),
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn channel_id(&self) -> ChannelId {
        self.channel_id
    }

    pub fn state(&self) -> SessionState {
        SessionState::from_u8(self.state.load(Ordering::Acquire))
    }

    fn transition(&self, from: SessionState, to: SessionState) -> bool {
        self.state
            .compare_exchange(from as u8, to as u8, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Join the registry and serve the connection until it ends
    ///
    /// `sink` and `stream` are the two halves of the socket. The session
    /// is registered before the first frame is read and deregistered
    /// before this returns.
    ///
    /// # Errors
    ///
    /// Returns `RealtimeError::AlreadyJoined` if the registry refuses the
    /// join; nothing was registered in that case.
    pub async fn run<S, R, E>(
        self,
        mut sink: S,
        mut stream: R,
        shutdown: CancellationToken,
        config: SessionConfig,
    ) -> Result<CloseReason, RealtimeError>
    where
        S: Sink<Message> + Unpin,
        S::Error: Display,
        R: Stream<Item = Result<Message, E>> + Unpin,
        E: Display,
    {
        let (outbound, mut queue) = mpsc::channel::<Payload>(config.outbound_buffer.max(1));

        if let Err(err) = self.registry.join(self.channel_id, self.id, outbound) {
            self.state.store(SessionState::Closed as u8, Ordering::Release);
            return Err(err);
        }
        self.transition(SessionState::Connecting, SessionState::Active);
        tracing::info!(
            "[Session] {} active in channel {}",
            self.id,
            self.channel_id
        );

        let reason = tokio::select! {
            reason = self.read_loop(&mut stream) => reason,
            reason = write_loop(&mut sink, &mut queue, config.write_timeout) => reason,
            _ = shutdown.cancelled() => CloseReason::Shutdown,
        };

        self.close();
        drop(queue);

        match tokio::time::timeout(config.write_timeout, sink.close()).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => tracing::debug!("[Session] {} close handshake failed: {}", self.id, err),
            Err(_) => tracing::debug!("[Session] {} close handshake timed out", self.id),
        }

        tracing::info!(
            "[Session] {} in channel {} closed: {:?}",
            self.id,
            self.channel_id,
            reason
        );
        Ok(reason)
    }

    async fn read_loop<R, E>(&self, stream: &mut R) -> CloseReason
    where
        R: Stream<Item = Result<Message, E>> + Unpin,
        E: Display,
    {
        while let Some(frame) = stream.next().await {
            let message = match frame {
                Ok(message) => message,
                Err(err) => return CloseReason::ReadFailure(err.to_string()),
            };

            match protocol::decode(message) {
                Inbound::Chat(text) => {
                    let report = self.registry.broadcast(self.channel_id, text).await;
                    tracing::debug!(
                        "[Session] {} broadcast to channel {}: {} delivered, {} failed",
                        self.id,
                        self.channel_id,
                        report.delivered,
                        report.failed
                    );
                }
                Inbound::Control => {}
                Inbound::Close => return CloseReason::ClientClosed,
                Inbound::Invalid(reason) => {
                    tracing::warn!("[Session] {} protocol violation: {}", self.id, reason);
                    return CloseReason::ProtocolViolation(reason);
                }
            }
        }
        CloseReason::ClientClosed
    }

    /// Move to Closing, leave the registry, then mark Closed
    ///
    /// Returns `false` if another path already closed the session.
    fn close(&self) -> bool {
        if !self.transition(SessionState::Active, SessionState::Closing) {
            return false;
        }
        self.registry.leave(self.channel_id, self.id);
        self.state.store(SessionState::Closed as u8, Ordering::Release);
        true
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if self.close() {
            tracing::debug!("[Session] {} released on drop", self.id);
        }
    }
}

async fn write_loop<S>(
    sink: &mut S,
    queue: &mut mpsc::Receiver<Payload>,
    write_timeout: Duration,
) -> CloseReason
where
    S: Sink<Message> + Unpin,
    S::Error: Display,
{
    // `None` means the registry dropped our sender.
    while let Some(payload) = queue.recv().await {
        match tokio::time::timeout(write_timeout, sink.send(protocol::encode(&payload))).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => return CloseReason::WriteFailure(err.to_string()),
            Err(_) => {
                return CloseReason::WriteFailure(format!("write timed out after {:?}", write_timeout))
            }
        }
    }
    CloseReason::Evicted
}
