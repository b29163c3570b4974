#![allow(dead_code)]

use async_trait::async_trait;
use shop_settlement::bus::{BusError, InMemoryBus, MessageBus, Subscription, Topic};
use shop_settlement::model::{Order, OrderId};
use shop_settlement::order_service::OrderService;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// An in-memory bus whose first `failures` publishes on `flaky_topic` are refused.
pub struct FlakyBus {
    pub inner: InMemoryBus,
    flaky_topic: Topic,
    failures_left: AtomicUsize,
}

impl FlakyBus {
    pub fn new(flaky_topic: Topic, failures: usize) -> Self {
        Self {
            inner: InMemoryBus::new(),
            flaky_topic,
            failures_left: AtomicUsize::new(failures),
        }
    }

    pub fn failures_left(&self) -> usize {
        self.failures_left.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MessageBus for FlakyBus {
    async fn publish(&self, topic: Topic, payload: Vec<u8>) -> Result<(), BusError> {
        if topic == self.flaky_topic {
            let refused = self
                .failures_left
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok();
            if refused {
                return Err(BusError::Publish {
                    topic,
                    reason: "connection reset".into(),
                });
            }
        }
        self.inner.publish(topic, payload).await
    }

    async fn subscribe(&self, topic: Topic) -> Result<Subscription, BusError> {
        self.inner.subscribe(topic).await
    }

    async fn ping(&self) -> Result<(), BusError> {
        self.inner.ping().await
    }

    async fn close(&self) {
        self.inner.close().await
    }
}

/// Polls until the order leaves `NEW`.
pub async fn settled(service: &OrderService, id: OrderId) -> Order {
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            let order = service.get_order(id).await.unwrap();
            if order.status.is_terminal() {
                return order;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("order never settled")
}

/// Waits until `condition` holds.
pub async fn eventually(mut condition: impl FnMut() -> bool) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while !condition() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("condition never held")
}
