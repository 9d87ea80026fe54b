mod election_state;
mod leader_state;
mod state_change_listener;
mod timers;

pub(crate) use election_state::CurrentLeader;
pub(crate) use election_state::ElectionConfig;
pub(crate) use election_state::ElectionState;
pub(crate) use leader_state::LeaderStateTracker;
pub use state_change_listener::ElectionStateChangeListener;
pub use state_change_listener::ElectionStateSnapshot;
