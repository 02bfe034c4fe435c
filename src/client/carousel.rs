//! Auto-advancing image carousel, modelled as a cancellable periodic task.
//!
//! The timer task owns the only mutation of the current index; readers see
//! it through a `watch` channel. Cancelling (or dropping) the carousel
//! aborts the task, so the index never advances after teardown.

use std::time::Duration;
use tokio::{sync::watch, task::JoinHandle, time};

pub struct Carousel {
    rx: watch::Receiver<usize>,
    task: JoinHandle<()>,
}

impl Carousel {
    /// Start a carousel cycling over `total` images, advancing every
    /// `period`. The index starts at 0.
    pub fn start(total: usize, period: Duration) -> Self {
        let total = total.max(1);
        let (tx, rx) = watch::channel(0usize);

        let task = tokio::spawn(async move {
            let mut ticker = time::interval(period);
            // The first tick of an interval completes immediately.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let next = (*tx.borrow() + 1) % total;
                if tx.send(next).is_err() {
                    break;
                }
            }
        });

        Self { rx, task }
    }

    /// Currently visible image index, in `0..total`.
    pub fn current(&self) -> usize {
        *self.rx.borrow()
    }

    /// Stop advancing. Idempotent; also happens on drop.
    pub fn cancel(&self) {
        self.task.abort();
    }
}

impl Drop for Carousel {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERIOD: Duration = Duration::from_secs(5);

    /// Let the spawned timer task run (current-thread test runtime).
    async fn settle() {
        for _ in 0..3 {
            tokio::task::yield_now().await;
        }
    }

    async fn tick() {
        time::advance(PERIOD).await;
        settle().await;
    }

    #[tokio::test(start_paused = true)]
    async fn cycles_through_all_indices_and_wraps() {
        let carousel = Carousel::start(3, PERIOD);
        settle().await;
        assert_eq!(carousel.current(), 0);

        let mut seen = Vec::new();
        for _ in 0..6 {
            tick().await;
            seen.push(carousel.current());
        }
        assert_eq!(seen, vec![1, 2, 0, 1, 2, 0]);
    }

    #[tokio::test(start_paused = true)]
    async fn never_advances_after_cancel() {
        let carousel = Carousel::start(3, PERIOD);
        settle().await;
        tick().await;
        assert_eq!(carousel.current(), 1);

        carousel.cancel();
        for _ in 0..4 {
            tick().await;
        }
        assert_eq!(carousel.current(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_images_degrades_to_single_slot() {
        let carousel = Carousel::start(0, PERIOD);
        settle().await;
        tick().await;
        assert_eq!(carousel.current(), 0);
    }
}
