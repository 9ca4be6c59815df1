//! Property-based tests for the channel registry
//!
//! Random join/leave sequences are replayed against the registry and a
//! plain `HashMap` model; the two must agree after every step.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use chatwire::backend::realtime::{ChannelRegistry, SessionId};
use chatwire::shared::ChannelId;
use proptest::prelude::*;
use tokio::sync::mpsc;

const SESSIONS: usize = 6;
const CHANNELS: ChannelId = 4;

#[derive(Debug, Clone)]
enum Op {
    Join(usize, ChannelId),
    Leave(usize, ChannelId),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..SESSIONS, 0..CHANNELS).prop_map(|(s, c)| Op::Join(s, c)),
        (0..SESSIONS, 0..CHANNELS).prop_map(|(s, c)| Op::Leave(s, c)),
    ]
}

fn session_ids() -> Vec<SessionId> {
    (0..SESSIONS).map(|_| uuid::Uuid::new_v4()).collect()
}

fn assert_matches_model(
    registry: &ChannelRegistry,
    ids: &[SessionId],
    model: &HashMap<usize, ChannelId>,
) -> Result<(), TestCaseError> {
    for channel in 0..CHANNELS {
        let expected = model.values().filter(|c| **c == channel).count();
        prop_assert_eq!(registry.subscriber_count(channel), expected);
    }
    let live: HashSet<ChannelId> = model.values().copied().collect();
    prop_assert_eq!(registry.channel_count(), live.len());

    for (index, id) in ids.iter().enumerate() {
        prop_assert_eq!(registry.channel_of(*id), model.get(&index).copied());
        for channel in 0..CHANNELS {
            prop_assert_eq!(
                registry.is_subscribed(channel, *id),
                model.get(&index) == Some(&channel)
            );
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn test_join_leave_sequences_match_model(ops in prop::collection::vec(op_strategy(), 0..64)) {
        let registry = ChannelRegistry::new(Duration::from_millis(50));
        let ids = session_ids();
        let mut model: HashMap<usize, ChannelId> = HashMap::new();
        // Keep receivers alive so no sender is seen as closed.
        let mut receivers = Vec::new();

        for op in ops {
            match op {
                Op::Join(session, channel) => {
                    let (tx, rx) = mpsc::channel(4);
                    receivers.push(rx);
                    let joined = registry.join(channel, ids[session], tx).is_ok();
                    prop_assert_eq!(joined, !model.contains_key(&session));
                    model.entry(session).or_insert(channel);
                }
                Op::Leave(session, channel) => {
                    let left = registry.leave(channel, ids[session]);
                    let expected = model.get(&session) == Some(&channel);
                    prop_assert_eq!(left, expected);
                    if expected {
                        model.remove(&session);
                    }
                }
            }
            assert_matches_model(&registry, &ids, &model)?;
        }
    }

    #[test]
    fn test_broadcast_reaches_exactly_the_channel_members(
        placement in prop::collection::vec(0..CHANNELS, 1..SESSIONS),
        target in 0..CHANNELS,
    ) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();

        runtime.block_on(async {
            let registry = ChannelRegistry::new(Duration::from_millis(50));
            let mut receivers = Vec::new();
            for channel in &placement {
                let (tx, rx) = mpsc::channel(4);
                registry.join(*channel, uuid::Uuid::new_v4(), tx).unwrap();
                receivers.push((*channel, rx));
            }

            let report = registry.broadcast(target, "ping").await;
            let members = placement.iter().filter(|c| **c == target).count();
            prop_assert_eq!(report.delivered, members);
            prop_assert_eq!(report.failed, 0);

            for (channel, rx) in receivers.iter_mut() {
                if *channel == target {
                    let received = rx.try_recv().ok();
                    prop_assert_eq!(received.as_deref(), Some("ping"));
                }
                prop_assert!(rx.try_recv().is_err());
            }
            Ok::<(), TestCaseError>(())
        })?;
    }
}
