use crate::commitlog;
use crate::replica;
use std::fmt::Debug;
use tokio::sync::{mpsc, oneshot};

/// Event is everything the replica actor reacts to. Each one is handled to completion before the
/// next, which makes the replica the single writer of a node's raft state.
#[derive(Debug)]
pub(crate) enum Event {
    // Any role: append a locally applied command to our log.
    AppendCommand(
        replica::AppendCommandInput,
        Callback<replica::AppendCommandOutput, replica::AppendCommandError>,
    ),

    // Any role: grant vote if applicable. Higher term turns us into a follower.
    Vote(replica::VoteInput, Callback<replica::VoteOutput, replica::VoteError>),

    // Candidate: count the vote, transition to leader on majority.
    // Leader/Follower: discard, unless the reply carries a newer term.
    VoteReplyFromPeer(replica::VoteReplyFromPeer),

    // Any role: follow the caller if its term is current, reconcile log, apply new entries.
    AppendEntries(
        replica::AppendEntriesInput,
        Callback<replica::AppendEntriesOutput, replica::AppendEntriesError>,
    ),

    // Leader: update peer progress, commit index, step down without a majority.
    // Candidate/Follower: discard
    HeartbeatRoundResult(replica::HeartbeatRoundResult),

    // Any role: who do we think leads the cluster.
    GetLeader(Callback<Option<replica::ReplicaId>, replica::GetLeaderError>),

    // Leader: start a heartbeat round unless one is outstanding.
    // Candidate/Follower: discard
    HeartbeatTick(replica::HeartbeatTick),

    // Follower/Candidate: start a new election.
    // Leader: discard
    ElectionTimeout,
}

#[derive(Debug)]
pub(crate) struct Callback<O: Debug, E: Debug>(oneshot::Sender<Result<O, E>>);

impl<O: Debug, E: Debug> Callback<O, E> {
    fn send(self, message: Result<O, E>) {
        // Caller may have given up waiting.
        let _ = self.0.send(message);
    }
}

/// ActorClient is the only strong handle to the actor queue. When it drops, the actor's event
/// loop ends.
pub(crate) struct ActorClient {
    sender: mpsc::Sender<Event>,
}

/// WeakActorClient doesn't keep the actor alive. Timers, peer calls, the RPC server and the
/// gateway all go through one.
#[derive(Clone)]
pub(crate) struct WeakActorClient {
    sender: mpsc::WeakSender<Event>,
}

impl ActorClient {
    pub(crate) fn new(buffer_size: usize) -> (Self, mpsc::Receiver<Event>) {
        let (tx, rx) = mpsc::channel(buffer_size);

        (ActorClient { sender: tx }, rx)
    }

    pub(crate) fn weak(&self) -> WeakActorClient {
        WeakActorClient {
            sender: self.sender.downgrade(),
        }
    }
}

#[derive(Debug)]
struct ActorExited;

impl WeakActorClient {
    pub(crate) async fn append_command(
        &self,
        input: replica::AppendCommandInput,
    ) -> Result<replica::AppendCommandOutput, replica::AppendCommandError> {
        let (tx, rx) = oneshot::channel();
        self.send(Event::AppendCommand(input, Callback(tx)))
            .await
            .map_err(|_| replica::AppendCommandError::ActorExited)?;

        rx.await.unwrap_or(Err(replica::AppendCommandError::ActorExited))
    }

    pub(crate) async fn vote(&self, input: replica::VoteInput) -> Result<replica::VoteOutput, replica::VoteError> {
        let (tx, rx) = oneshot::channel();
        self.send(Event::Vote(input, Callback(tx)))
            .await
            .map_err(|_| replica::VoteError::ActorExited)?;

        rx.await.unwrap_or(Err(replica::VoteError::ActorExited))
    }

    pub(crate) async fn vote_reply_from_peer(&self, reply: replica::VoteReplyFromPeer) -> Result<(), ()> {
        self.send(Event::VoteReplyFromPeer(reply)).await.map_err(|_| ())
    }

    pub(crate) async fn append_entries(
        &self,
        input: replica::AppendEntriesInput,
    ) -> Result<replica::AppendEntriesOutput, replica::AppendEntriesError> {
        let (tx, rx) = oneshot::channel();
        self.send(Event::AppendEntries(input, Callback(tx)))
            .await
            .map_err(|_| replica::AppendEntriesError::ActorExited)?;

        rx.await.unwrap_or(Err(replica::AppendEntriesError::ActorExited))
    }

    pub(crate) async fn heartbeat_round_result(&self, round: replica::HeartbeatRoundResult) -> Result<(), ()> {
        self.send(Event::HeartbeatRoundResult(round)).await.map_err(|_| ())
    }

    pub(crate) async fn get_leader(&self) -> Result<Option<replica::ReplicaId>, replica::GetLeaderError> {
        let (tx, rx) = oneshot::channel();
        self.send(Event::GetLeader(Callback(tx)))
            .await
            .map_err(|_| replica::GetLeaderError::ActorExited)?;

        rx.await.unwrap_or(Err(replica::GetLeaderError::ActorExited))
    }

    pub(crate) async fn heartbeat_tick(&self, tick: replica::HeartbeatTick) -> Result<(), ()> {
        self.send(Event::HeartbeatTick(tick)).await.map_err(|_| ())
    }

    pub(crate) async fn election_timeout(&self) -> Result<(), ()> {
        self.send(Event::ElectionTimeout).await.map_err(|_| ())
    }

    async fn send(&self, event: Event) -> Result<(), ActorExited> {
        let sender = self.sender.upgrade().ok_or(ActorExited)?;
        sender.send(event).await.map_err(|_| ActorExited)
    }
}

/// ReplicaActor is replica logic in actor model.
pub(crate) struct ReplicaActor<L>
where
    L: commitlog::Log<replica::LogEntry>,
{
    logger: slog::Logger,
    receiver: mpsc::Receiver<Event>,
    replica: replica::Replica<L>,
}

impl<L> ReplicaActor<L>
where
    L: commitlog::Log<replica::LogEntry>,
{
    pub(crate) fn new(logger: slog::Logger, receiver: mpsc::Receiver<Event>, replica: replica::Replica<L>) -> Self {
        ReplicaActor {
            logger,
            receiver,
            replica,
        }
    }

    pub(crate) async fn run_event_loop(mut self) {
        while let Some(event) = self.receiver.recv().await {
            self.handle_event(event);
        }
        slog::info!(self.logger, "Actor queue closed. Replica is shutting down.");
    }

    // This must NOT be async. Any long running work must be spawned and come back as an event.
    fn handle_event(&mut self, event: Event) {
        match event {
            Event::AppendCommand(input, callback) => {
                callback.send(Ok(self.replica.handle_append_command(input)));
            }
            Event::Vote(input, callback) => {
                callback.send(Ok(self.replica.handle_vote(input)));
            }
            Event::VoteReplyFromPeer(reply) => {
                self.replica.handle_vote_reply_from_peer(reply);
            }
            Event::AppendEntries(input, callback) => {
                callback.send(self.replica.handle_append_entries(input));
            }
            Event::HeartbeatRoundResult(round) => {
                self.replica.handle_heartbeat_round_result(round);
            }
            Event::GetLeader(callback) => {
                callback.send(Ok(self.replica.current_leader()));
            }
            Event::HeartbeatTick(tick) => {
                self.replica.handle_heartbeat_tick(tick);
            }
            Event::ElectionTimeout => {
                self.replica.handle_election_timeout();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn weak_client_fails_once_actor_client_drops() {
        let (client, mut rx) = ActorClient::new(1);
        let weak = client.weak();

        assert!(weak.election_timeout().await.is_ok());
        assert!(matches!(rx.recv().await, Some(Event::ElectionTimeout)));

        drop(client);
        assert!(weak.election_timeout().await.is_err());
        assert!(matches!(
            weak.get_leader().await,
            Err(replica::GetLeaderError::ActorExited)
        ));
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn dropped_callback_reads_as_actor_exited() {
        let (client, mut rx) = ActorClient::new(1);
        let weak = client.weak();

        tokio::spawn(async move {
            // Receive and drop the callback without answering.
            let _ = rx.recv().await;
        });

        assert!(matches!(
            weak.get_leader().await,
            Err(replica::GetLeaderError::ActorExited)
        ));
    }
}
