/**
 * Channel Subscription Registry
 *
 * Membership table from `ChannelId` to the sessions currently subscribed
 * to it, plus the broadcast primitive that pushes a payload to all of them.
 *
 * # Layout
 *
 * - `channels` - sharded map `ChannelId -> Arc<ChannelSubscribers>`. An
 *   entry exists only while the channel has at least one member.
 * - `memberships` - reverse index `SessionId -> ChannelId`. It is what
 *   makes "one channel per session, once" enforceable on `join`.
 *
 * The registry never sees a socket. Each member is represented by the
 * sending half of its session's outbound queue; the session's own writer
 * drains the queue into the connection.
 *
 * # Locking
 *
 * Map shards are only held for short synchronous sections, never across
 * an `.await`. The one lock held across `.await` is the per-channel
 * delivery lock, so broadcasts to one channel are serialized (FIFO) while
 * broadcasts to other channels proceed independently.
 *
 * Lock order is `memberships` shard, then `channels` shard, then the
 * channel's member shard. A `Ref` into `channels` must be dropped before
 * any other `channels` call on the same task.
 */

use std::sync::Arc;
use std::time::Duration;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use futures_util::future::join_all;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::backend::error::RealtimeError;
use crate::shared::ChannelId;

/// Identifier of one live real-time session
pub type SessionId = Uuid;

/// Frame payload shared by every delivery of one broadcast
pub type Payload = Arc<str>;

/// Sending half of a session's outbound queue, as held by the registry
pub type Outbound = mpsc::Sender<Payload>;

/// Default bound on a single subscriber delivery
pub const DEFAULT_DELIVERY_TIMEOUT: Duration = Duration::from_secs(2);

/// Outcome of one [`ChannelRegistry::broadcast`] call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    /// Subscribers whose outbound queue accepted the payload
    pub delivered: usize,
    /// Subscribers that were closed or timed out; each was removed
    pub failed: usize,
}

impl DeliveryReport {
    /// Number of subscribers the broadcast attempted to reach
    pub fn attempted(&self) -> usize {
        self.delivered + self.failed
    }
}

#[derive(Debug)]
enum DeliveryFailure {
    Closed,
    TimedOut,
}

/// Members of one channel
#[derive(Default)]
struct ChannelSubscribers {
    members: DashMap<SessionId, Outbound>,
    delivery: tokio::sync::Mutex<()>,
}

/// Thread-safe channel membership table with isolated per-subscriber delivery
pub struct ChannelRegistry {
    channels: DashMap<ChannelId, Arc<ChannelSubscribers>>,
    memberships: DashMap<SessionId, ChannelId>,
    delivery_timeout: Duration,
}

impl ChannelRegistry {
    pub fn new(delivery_timeout: Duration) -> Self {
        Self {
            channels: DashMap::new(),
            memberships: DashMap::new(),
            delivery_timeout,
        }
    }

    pub fn delivery_timeout(&self) -> Duration {
        self.delivery_timeout
    }

    /// Register `session_id` as a subscriber of `channel_id`
    ///
    /// Creates the channel entry on first join. A session that is already
    /// registered (in this or any other channel) is rejected and the
    /// registry is left untouched.
    pub fn join(
        &self,
        channel_id: ChannelId,
        session_id: SessionId,
        outbound: Outbound,
    ) -> Result<(), RealtimeError> {
        match self.memberships.entry(session_id) {
            Entry::Occupied(existing) => {
                tracing::warn!(
                    "[Registry] Rejected second join of session {} (already in channel {})",
                    session_id,
                    existing.get()
                );
                Err(RealtimeError::AlreadyJoined {
                    session_id,
                    channel_id: *existing.get(),
                })
            }
            Entry::Vacant(slot) => {
                // The channel shard stays write-locked until the member is
                // in, so a concurrent empty-channel cleanup cannot drop it.
                let channel = self.channels.entry(channel_id).or_default();
                channel.members.insert(session_id, outbound);
                drop(channel);
                slot.insert(channel_id);
                tracing::debug!("[Registry] Session {} joined channel {}", session_id, channel_id);
                Ok(())
            }
        }
    }

    /// Remove `session_id` from `channel_id`
    ///
    /// Returns `false` when the session was not registered there. Removing
    /// the last member drops the channel entry.
    pub fn leave(&self, channel_id: ChannelId, session_id: SessionId) -> bool {
        let was_member = self
            .memberships
            .remove_if(&session_id, |_, joined| *joined == channel_id)
            .is_some();

        {
            if let Some(channel) = self.channels.get(&channel_id) {
                channel.members.remove(&session_id);
            }
        }
        self.channels
            .remove_if(&channel_id, |_, channel| channel.members.is_empty());

        if was_member {
            tracing::debug!("[Registry] Session {} left channel {}", session_id, channel_id);
        }
        was_member
    }

    /// Push `payload` to every session registered for `channel_id`
    ///
    /// The member set is snapshotted when the channel's delivery lock is
    /// acquired. Each delivery is attempted concurrently and bounded by the
    /// delivery timeout; a subscriber whose queue is closed or stays full
    /// past the timeout is counted as failed and removed. Never fails as a
    /// whole.
    pub async fn broadcast(
        &self,
        channel_id: ChannelId,
        payload: impl Into<Payload>,
    ) -> DeliveryReport {
        let channel = match self.channels.get(&channel_id) {
            Some(entry) => Arc::clone(entry.value()),
            None => {
                tracing::debug!("[Registry] Broadcast to channel {} with no subscribers", channel_id);
                return DeliveryReport::default();
            }
        };
        let payload: Payload = payload.into();

        let _ordering = channel.delivery.lock().await;

        let targets: Vec<(SessionId, Outbound)> = channel
            .members
            .iter()
            .map(|member| (*member.key(), member.value().clone()))
            .collect();

        let timeout = self.delivery_timeout;
        let attempts = targets.into_iter().map(|(session_id, outbound)| {
            let payload = Arc::clone(&payload);
            async move {
                let outcome = match tokio::time::timeout(timeout, outbound.send(payload)).await {
                    Ok(Ok(())) => Ok(()),
                    Ok(Err(_)) => Err(DeliveryFailure::Closed),
                    Err(_) => Err(DeliveryFailure::TimedOut),
                };
                (session_id, outcome)
            }
        });

        let mut report = DeliveryReport::default();
        for (session_id, outcome) in join_all(attempts).await {
            match outcome {
                Ok(()) => report.delivered += 1,
                Err(failure) => {
                    report.failed += 1;
                    tracing::warn!(
                        "[Registry] Delivery to session {} in channel {} failed ({:?}), removing subscriber",
                        session_id,
                        channel_id,
                        failure
                    );
                    self.leave(channel_id, session_id);
                }
            }
        }

        tracing::debug!(
            "[Registry] Broadcast to channel {}: {} delivered, {} failed",
            channel_id,
            report.delivered,
            report.failed
        );
        report
    }

    /// Number of sessions currently registered for `channel_id`
    pub fn subscriber_count(&self, channel_id: ChannelId) -> usize {
        self.channels
            .get(&channel_id)
            .map(|channel| channel.members.len())
            .unwrap_or(0)
    }

    /// Number of channels with at least one subscriber
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Channel the session is registered in, if any
    pub fn channel_of(&self, session_id: SessionId) -> Option<ChannelId> {
        self.memberships.get(&session_id).map(|entry| *entry.value())
    }

    /// Whether `session_id` is a member of `channel_id`'s subscriber set
    pub fn is_subscribed(&self, channel_id: ChannelId, session_id: SessionId) -> bool {
        self.channels
            .get(&channel_id)
            .map(|channel| channel.members.contains_key(&session_id))
            .unwrap_or(false)
    }
}

impl Default for ChannelRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_DELIVERY_TIMEOUT)
    }
}
