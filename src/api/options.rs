use std::convert::TryFrom;
use tokio::time::Duration;

/// Raft timings for a chat node. Unset fields fall back to defaults.
#[derive(Clone, Debug, Default)]
pub struct ChatNodeOptions {
    pub leader_heartbeat_duration: Option<Duration>,
    pub follower_min_timeout: Option<Duration>,
    pub follower_max_timeout: Option<Duration>,
    pub append_entries_timeout: Option<Duration>,
}

#[derive(Debug, PartialEq)]
pub(super) struct ChatNodeOptionsValidated {
    pub leader_heartbeat_duration: Duration,
    pub follower_min_timeout: Duration,
    pub follower_max_timeout: Duration,
    pub append_entries_timeout: Duration,
}

impl ChatNodeOptionsValidated {
    fn validate(&self) -> Result<(), &'static str> {
        if self.leader_heartbeat_duration >= self.follower_min_timeout {
            return Err("Follower minimum timeout must be greater than leader's heartbeat");
        }
        if self.follower_min_timeout >= self.follower_max_timeout {
            return Err("Follower minimum timeout must be less than maximum timeout");
        }
        if self.append_entries_timeout >= self.follower_min_timeout {
            return Err("Leader's AppendEntries RPC timeout must be less than the follower's minimum timeout");
        }

        Ok(())
    }
}

impl TryFrom<ChatNodeOptions> for ChatNodeOptionsValidated {
    type Error = &'static str;

    fn try_from(options: ChatNodeOptions) -> Result<Self, Self::Error> {
        let values = ChatNodeOptionsValidated {
            leader_heartbeat_duration: options.leader_heartbeat_duration.unwrap_or(Duration::from_millis(100)),
            follower_min_timeout: options.follower_min_timeout.unwrap_or(Duration::from_millis(500)),
            follower_max_timeout: options.follower_max_timeout.unwrap_or(Duration::from_millis(1500)),
            append_entries_timeout: options.append_entries_timeout.unwrap_or(Duration::from_millis(100)),
        };

        values.validate()?;
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let validated = ChatNodeOptionsValidated::try_from(ChatNodeOptions::default()).unwrap();
        assert_eq!(validated.leader_heartbeat_duration, Duration::from_millis(100));
        assert_eq!(validated.follower_min_timeout, Duration::from_millis(500));
        assert_eq!(validated.follower_max_timeout, Duration::from_millis(1500));
        assert_eq!(validated.append_entries_timeout, Duration::from_millis(100));
    }

    #[test]
    fn heartbeat_must_beat_election_timeout() {
        let options = ChatNodeOptions {
            leader_heartbeat_duration: Some(Duration::from_millis(600)),
            ..Default::default()
        };
        assert!(ChatNodeOptionsValidated::try_from(options).is_err());
    }

    #[test]
    fn election_window_must_be_non_empty() {
        let options = ChatNodeOptions {
            follower_min_timeout: Some(Duration::from_millis(1500)),
            ..Default::default()
        };
        assert!(ChatNodeOptionsValidated::try_from(options).is_err());
    }

    #[test]
    fn append_entries_timeout_must_beat_election_timeout() {
        let options = ChatNodeOptions {
            append_entries_timeout: Some(Duration::from_millis(500)),
            ..Default::default()
        };
        assert!(ChatNodeOptionsValidated::try_from(options).is_err());
    }
}
