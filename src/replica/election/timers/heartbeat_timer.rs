use crate::replica::election::timers::time::{Clock, RealClock};
use crate::{actor, replica};
use std::sync::{Arc, Weak};
use tokio::time::Duration;

/// HeartbeatTimerHandle is held by a leader for the duration of its term. The first tick fires
/// right away so a new leader announces itself without waiting a full interval.
pub(crate) struct HeartbeatTimerHandle {
    _task_guard: Arc<()>,
}

struct HeartbeatTimerTask<C: Clock> {
    task_guard: Weak<()>,
    heartbeat_duration: Duration,
    actor_client: actor::WeakActorClient,
    tick: replica::HeartbeatTick,
    clock: C,
}

impl HeartbeatTimerHandle {
    pub(crate) fn spawn_timer_task(
        heartbeat_duration: Duration,
        actor_client: actor::WeakActorClient,
        term: replica::Term,
    ) -> Self {
        let (task, handle) = HeartbeatTimerTask::new(heartbeat_duration, actor_client, term, RealClock);
        tokio::task::spawn(task.run());

        handle
    }
}

impl<C: Clock + Send + Sync + 'static> HeartbeatTimerTask<C> {
    fn new(
        heartbeat_duration: Duration,
        actor_client: actor::WeakActorClient,
        term: replica::Term,
        clock: C,
    ) -> (Self, HeartbeatTimerHandle) {
        let guard = Arc::new(());

        let task = HeartbeatTimerTask {
            task_guard: Arc::downgrade(&guard),
            heartbeat_duration,
            actor_client,
            tick: replica::HeartbeatTick { term },
            clock,
        };

        (task, HeartbeatTimerHandle { _task_guard: guard })
    }

    async fn run(mut self) {
        loop {
            if self.task_guard.upgrade().is_none() {
                // No longer leader for this term.
                return;
            }

            let _ = self.actor_client.heartbeat_tick(self.tick.clone()).await;
            self.clock.sleep(self.heartbeat_duration).await;
        }
    }
}
