//! Periodic tick driver
//!
//! Fires ticks on a fixed interval and hands each candidate to the
//! coordinator. Ticks run one after another and never overlap.

use std::future::Future;
use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::coordinator::Coordinator;

use super::config::{ProducerConfig, MIN_INTERVAL};
use super::source::RecordSource;

/// Drives a [`Coordinator`] from a periodic timer
pub struct Producer {
    coordinator: Arc<Coordinator>,
    config: ProducerConfig,
}

impl Producer {
    /// Create a producer with the given configuration
    pub fn new(coordinator: Arc<Coordinator>, config: ProducerConfig) -> Self {
        Self {
            coordinator,
            config,
        }
    }

    /// Get the producer configuration
    pub fn config(&self) -> &ProducerConfig {
        &self.config
    }

    /// Run until `max_ticks` is reached (forever if unset)
    ///
    /// Returns the number of ticks performed.
    pub async fn run<S: RecordSource>(&self, mut source: S) -> u64 {
        self.tick_loop(&mut source, std::future::pending()).await
    }

    /// Run until `max_ticks` is reached or `shutdown` resolves
    ///
    /// Shutdown is only observed between ticks. A tick that has started
    /// always runs to completion, so a stored record is always published.
    pub async fn run_until<S, F>(&self, mut source: S, shutdown: F) -> u64
    where
        S: RecordSource,
        F: Future<Output = ()>,
    {
        self.tick_loop(&mut source, shutdown).await
    }

    /// Spawn the producer on a background task
    ///
    /// Abort the returned handle to stop it early.
    pub fn spawn<S: RecordSource>(self, source: S) -> JoinHandle<u64> {
        tokio::spawn(async move { self.run(source).await })
    }

    async fn tick_loop<S, F>(&self, source: &mut S, shutdown: F) -> u64
    where
        S: RecordSource,
        F: Future<Output = ()>,
    {
        // Zero would panic in tokio::time::interval
        let interval = self.config.interval.max(MIN_INTERVAL);
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        tracing::info!(
            interval = ?interval,
            max_ticks = ?self.config.max_ticks,
            "Producer started"
        );

        let mut ticks = 0;
        loop {
            if let Some(max) = self.config.max_ticks {
                if ticks >= max {
                    break;
                }
            }

            tokio::select! {
                biased;
                _ = &mut shutdown => {
                    tracing::info!(ticks = ticks, "Shutdown signal received");
                    break;
                }
                _ = ticker.tick() => {}
            }

            ticks += 1;
            tracing::debug!(tick = ticks, "Producer tick");

            let candidate = source.next_record();
            self.coordinator.tick(candidate).await;
        }

        tracing::info!(ticks = ticks, "Producer finished");
        ticks
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::sync::oneshot;

    use crate::store::Record;

    use super::*;

    fn counting_source() -> impl RecordSource {
        let mut n = 0u64;
        move || {
            n += 1;
            Record::new(format!("user{}@test.com", n), format!("{:032x}", n))
        }
    }

    fn fast_config() -> ProducerConfig {
        ProducerConfig::default().interval(Duration::from_millis(1))
    }

    #[tokio::test]
    async fn test_run_max_ticks() {
        let coordinator = Arc::new(Coordinator::default());
        let producer = Producer::new(Arc::clone(&coordinator), fast_config().max_ticks(3));

        let ticks = producer.run(counting_source()).await;

        assert_eq!(ticks, 3);
        assert_eq!(coordinator.store().len().await, 3);
        assert!(coordinator.record_exists("user3@test.com").await);
        assert_eq!(coordinator.stats().published, 3);
    }

    #[tokio::test]
    async fn test_repeating_source_rejected() {
        let coordinator = Arc::new(Coordinator::default());
        let producer = Producer::new(Arc::clone(&coordinator), fast_config().max_ticks(3));

        producer
            .run(|| Record::new("same@test.com", "x"))
            .await;

        let stats = coordinator.stats();
        assert_eq!(stats.ticks, 3);
        assert_eq!(stats.published, 1);
        assert_eq!(stats.rejected, 2);
        assert_eq!(coordinator.store().len().await, 1);
    }

    #[tokio::test]
    async fn test_spawn_feeds_subscriber() {
        let coordinator = Arc::new(Coordinator::default());
        let mut sub = coordinator.subscribe().await;

        let handle = Producer::new(Arc::clone(&coordinator), fast_config().max_ticks(2))
            .spawn(counting_source());

        assert_eq!(sub.recv().await.unwrap().key(), "user1@test.com");
        assert_eq!(sub.recv().await.unwrap().key(), "user2@test.com");
        assert_eq!(handle.await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_zero_interval_literal_does_not_panic() {
        let coordinator = Arc::new(Coordinator::default());
        let config = ProducerConfig {
            interval: Duration::ZERO,
            max_ticks: Some(2),
        };

        let ticks = Producer::new(Arc::clone(&coordinator), config)
            .run(counting_source())
            .await;

        assert_eq!(ticks, 2);
        assert_eq!(coordinator.store().len().await, 2);
    }

    #[tokio::test]
    async fn test_shutdown_during_publish_finishes_tick() {
        let coordinator = Arc::new(Coordinator::default());
        let mut sub = coordinator.subscribe().await;

        // Blocks publish after the record has been stored
        let registry = coordinator.broadcaster().hold_registry().await;

        let producer = Producer::new(Arc::clone(&coordinator), fast_config());
        let run = tokio::spawn(async move {
            producer
                .run_until(
                    || Record::new("ada@test.com", "x"),
                    tokio::time::sleep(Duration::from_millis(50)),
                )
                .await
        });

        while !coordinator.record_exists("ada@test.com").await {
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
        // Let the shutdown deadline pass while publish is still waiting
        tokio::time::sleep(Duration::from_millis(100)).await;
        drop(registry);

        let ticks = run.await.unwrap();
        assert_eq!(ticks, 1);

        let delivered = sub.recv().await.unwrap();
        assert_eq!(delivered.key(), "ada@test.com");

        let stats = coordinator.stats();
        assert_eq!(stats.ticks, 1);
        assert_eq!(stats.published, 1);
        assert_eq!(stats.rejected, 0);
    }

    #[tokio::test]
    async fn test_run_until_shutdown() {
        let coordinator = Arc::new(Coordinator::default());
        let mut sub = coordinator.subscribe().await;
        let (stop_tx, stop_rx) = oneshot::channel::<()>();

        let producer = Producer::new(Arc::clone(&coordinator), fast_config());
        let handle = tokio::spawn(async move {
            producer
                .run_until(counting_source(), async move {
                    let _ = stop_rx.await;
                })
                .await
        });

        sub.recv().await.unwrap();
        sub.recv().await.unwrap();
        stop_tx.send(()).unwrap();

        let ticks = handle.await.unwrap();
        assert!(ticks >= 2);
        assert_eq!(coordinator.stats().ticks, ticks);
    }
}
