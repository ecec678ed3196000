use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::fmt::Debug;

use tracing::trace;

/// Events carry a kind used for subscription filtering.
pub trait Topic {
    type Kind: Copy + Ord + Debug;

    fn kind(&self) -> Self::Kind;
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriberId(u64);

#[derive(Debug)]
struct Subscription<E: Topic> {
    /// `None` receives every kind.
    kinds: Option<BTreeSet<E::Kind>>,
    pending: VecDeque<E>,
}

impl<E: Topic> Subscription<E> {
    fn wants(&self, kind: E::Kind) -> bool {
        self.kinds.as_ref().map(|k| k.contains(&kind)).unwrap_or(true)
    }
}

/// Observable notification channel.
///
/// Publishing is synchronous and ordered: each event is appended to the
/// queue of every subscriber interested in its kind at the moment of
/// publishing. Subscribers pull their own queue. An unsubscribed consumer
/// never sees events published while it was away, which is what makes
/// unbind/write/rebind sequences safe against echoes.
#[derive(Debug)]
pub struct EventBus<E: Topic> {
    next_id: u64,
    subscriptions: BTreeMap<SubscriberId, Subscription<E>>,
}

impl<E: Topic> Default for EventBus<E> {
    fn default() -> Self {
        Self {
            next_id: 0,
            subscriptions: BTreeMap::new(),
        }
    }
}

impl<E: Topic + Clone> EventBus<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to every event kind.
    pub fn subscribe_all(&mut self) -> SubscriberId {
        self.insert(None)
    }

    /// Subscribe to the given kinds only.
    pub fn subscribe<I>(&mut self, kinds: I) -> SubscriberId
    where
        I: IntoIterator<Item = E::Kind>,
    {
        self.insert(Some(kinds.into_iter().collect()))
    }

    fn insert(&mut self, kinds: Option<BTreeSet<E::Kind>>) -> SubscriberId {
        let id = SubscriberId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.subscriptions.insert(
            id,
            Subscription {
                kinds,
                pending: VecDeque::new(),
            },
        );
        id
    }

    /// Drops the subscription and anything still queued for it.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        self.subscriptions.remove(&id).is_some()
    }

    pub fn is_subscribed(&self, id: SubscriberId) -> bool {
        self.subscriptions.contains_key(&id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscriptions.len()
    }

    /// Returns the number of subscribers the event was delivered to.
    pub fn emit(&mut self, event: E) -> usize {
        let kind = event.kind();
        let mut delivered = 0;
        for sub in self.subscriptions.values_mut() {
            if sub.wants(kind) {
                sub.pending.push_back(event.clone());
                delivered += 1;
            }
        }
        trace!(?kind, delivered, "event published");
        delivered
    }

    pub fn pending(&self, id: SubscriberId) -> usize {
        self.subscriptions
            .get(&id)
            .map(|s| s.pending.len())
            .unwrap_or(0)
    }

    pub fn drain(&mut self, id: SubscriberId) -> Vec<E> {
        match self.subscriptions.get_mut(&id) {
            Some(sub) => sub.pending.drain(..).collect(),
            None => Vec::new(),
        }
    }
}
