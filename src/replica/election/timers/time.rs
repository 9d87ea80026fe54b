use tokio::time::{Duration, Instant};

#[async_trait::async_trait]
pub(crate) trait Clock: Clone {
    fn now(&self) -> Instant;
    async fn sleep_until(&mut self, deadline: Instant);

    async fn sleep(&mut self, duration: Duration) {
        let deadline = self.now() + duration;
        self.sleep_until(deadline).await;
    }
}

#[derive(Copy, Clone)]
pub(crate) struct RealClock;

#[async_trait::async_trait]
impl Clock for RealClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    async fn sleep_until(&mut self, deadline: Instant) {
        tokio::time::sleep_until(deadline).await;
    }
}

#[cfg(test)]
pub(crate) use mock::mocked_clock;

#[cfg(test)]
mod mock {
    use super::Clock;
    use tokio::sync::watch;
    use tokio::time::{Duration, Instant};

    /// Returns a clock that only moves when its controller says so.
    pub(crate) fn mocked_clock() -> (MockClock, MockClockController) {
        let now = Instant::now();
        let (tx, rx) = watch::channel(now);

        (
            MockClock { current_time: rx },
            MockClockController {
                current_time: tx,
                time_of_instantiation: now,
            },
        )
    }

    #[derive(Clone)]
    pub(crate) struct MockClock {
        current_time: watch::Receiver<Instant>,
    }

    #[async_trait::async_trait]
    impl Clock for MockClock {
        fn now(&self) -> Instant {
            *self.current_time.borrow()
        }

        async fn sleep_until(&mut self, deadline: Instant) {
            while *self.current_time.borrow() < deadline {
                if self.current_time.changed().await.is_err() {
                    // Controller is gone, time will never move again.
                    std::future::pending::<()>().await;
                }
            }
        }
    }

    pub(crate) struct MockClockController {
        current_time: watch::Sender<Instant>,
        time_of_instantiation: Instant,
    }

    impl MockClockController {
        pub(crate) fn current_time(&self) -> Instant {
            *self.current_time.borrow()
        }

        pub(crate) fn elapsed_time(&self) -> Duration {
            self.current_time() - self.time_of_instantiation
        }

        /// Sleepers wake up at or after their deadline, never before. Advancing in one big step
        /// wakes each sleeper once, however many deadlines it skipped over, so advance in steps
        /// smaller than what the test wants to observe.
        pub(crate) fn advance(&mut self, duration: Duration) {
            let new_now = self.current_time() + duration;
            let _ = self.current_time.send(new_now);
        }
    }
}
