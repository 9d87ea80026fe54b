use crate::actor;
use crate::replica::election::timers::deadline::SharedDeadline;
use crate::replica::election::timers::time::{Clock, RealClock};
use rand::Rng;
use std::ops::RangeInclusive;
use std::sync::{Arc, Weak};
use tokio::time::{Duration, Instant};

/// ElectionTimerHandle is held by followers and candidates. If nobody resets it within a random
/// timeout, the actor receives an election timeout event.
pub(crate) struct ElectionTimerHandle<C: Clock = RealClock> {
    deadline: Arc<SharedDeadline>,
    timeout_range: RangeInclusive<Duration>,
    clock: C,
}

struct ElectionTimerTask<C: Clock> {
    deadline: Weak<SharedDeadline>,
    actor_client: actor::WeakActorClient,
    clock: C,
    // Static amount of time to wait between repeated timeout events, in case the actor stays in
    // the same state after handling one.
    timeout_backoff: Duration,
}

impl ElectionTimerHandle {
    pub(crate) fn spawn_timer_task(
        min_timeout: Duration,
        max_timeout: Duration,
        actor_client: actor::WeakActorClient,
    ) -> Self {
        let (task, handle) = ElectionTimerTask::new(min_timeout, max_timeout, actor_client, RealClock);
        tokio::task::spawn(task.run());

        handle
    }
}

impl<C: Clock + Send + Sync + 'static> ElectionTimerHandle<C> {
    pub(crate) fn reset_timeout(&self) {
        self.deadline.push_back(self.random_wake_time());
    }

    fn random_wake_time(&self) -> Instant {
        let rand_timeout = rand::thread_rng().gen_range(self.timeout_range.clone());
        self.clock.now() + rand_timeout
    }
}

impl<C: Clock + Send + Sync + 'static> ElectionTimerTask<C> {
    fn new(
        min_timeout: Duration,
        max_timeout: Duration,
        actor_client: actor::WeakActorClient,
        clock: C,
    ) -> (Self, ElectionTimerHandle<C>) {
        let deadline = Arc::new(SharedDeadline::default());

        let task = ElectionTimerTask {
            deadline: Arc::downgrade(&deadline),
            actor_client,
            clock: clock.clone(),
            timeout_backoff: min_timeout,
        };
        let handle = ElectionTimerHandle {
            deadline,
            timeout_range: RangeInclusive::new(min_timeout, max_timeout),
            clock,
        };

        // The task must see a deadline when it starts, otherwise it would time out right away.
        handle.reset_timeout();

        (task, handle)
    }

    async fn run(mut self) {
        loop {
            let next_wake_time = match self.deadline.upgrade() {
                Some(deadline) => deadline.take(),
                // Handle dropped: we're no longer in the state that owned this timer.
                None => return,
            };

            match next_wake_time {
                Some(wake_time) => {
                    self.clock.sleep_until(wake_time).await;
                }
                None => {
                    // Nobody pushed the deadline back while we slept.
                    let _ = self.actor_client.election_timeout().await;
                    self.clock.sleep(self.timeout_backoff).await;
                }
            }
        }
    }
}
