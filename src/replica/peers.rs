use crate::replica::peer_client::{PeerClient, PeerConnectError};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::net::SocketAddr;

/// ReplicaId is a node's cluster address in `host:port` form. Leader redirects hand it to clients
/// as-is.
#[derive(Clone, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub struct ReplicaId(String);

impl ReplicaId {
    pub fn new(id: impl Into<String>) -> Self {
        ReplicaId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl From<SocketAddr> for ReplicaId {
    fn from(addr: SocketAddr) -> Self {
        ReplicaId(addr.to_string())
    }
}

impl fmt::Debug for ReplicaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub(crate) struct Peer {
    pub(crate) id: ReplicaId,
    pub(crate) client: PeerClient,
}

/// ClusterTracker knows the static membership of the cluster and holds a lazily connected client
/// per peer.
pub(crate) struct ClusterTracker {
    my_replica_id: ReplicaId,
    peers: HashMap<ReplicaId, Peer>,
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum InvalidCluster {
    #[error("node index {0} is out of range for a cluster of {1}")]
    NodeIndexOutOfRange(usize, usize),
    #[error("address {0} is listed more than once")]
    DuplicateMember(SocketAddr),
    #[error("can't create client for peer {0}: {1}")]
    PeerClient(SocketAddr, PeerConnectError),
}

impl ClusterTracker {
    pub(crate) fn create_valid_cluster(
        members: &[SocketAddr],
        my_node_index: usize,
    ) -> Result<Self, InvalidCluster> {
        let my_addr = members
            .get(my_node_index)
            .copied()
            .ok_or(InvalidCluster::NodeIndexOutOfRange(my_node_index, members.len()))?;

        let mut seen = HashSet::with_capacity(members.len());
        let mut peers = HashMap::with_capacity(members.len().saturating_sub(1));
        for addr in members {
            if !seen.insert(*addr) {
                return Err(InvalidCluster::DuplicateMember(*addr));
            }
            if *addr == my_addr {
                continue;
            }

            let client = PeerClient::new_lazy(*addr).map_err(|e| InvalidCluster::PeerClient(*addr, e))?;
            let id = ReplicaId::from(*addr);
            peers.insert(id.clone(), Peer { id, client });
        }

        Ok(ClusterTracker {
            my_replica_id: ReplicaId::from(my_addr),
            peers,
        })
    }

    pub(crate) fn my_replica_id(&self) -> &ReplicaId {
        &self.my_replica_id
    }

    pub(crate) fn peer_ids(&self) -> HashSet<ReplicaId> {
        self.peers.keys().cloned().collect()
    }

    pub(crate) fn peer(&self, peer_id: &ReplicaId) -> Option<&Peer> {
        self.peers.get(peer_id)
    }

    pub(crate) fn iter_peers(&self) -> impl Iterator<Item = &Peer> {
        self.peers.values()
    }

    pub(crate) fn contains_member(&self, id: &ReplicaId) -> bool {
        self.peers.contains_key(id) || &self.my_replica_id == id
    }

    /// Every member votes, including us.
    pub(crate) fn num_voting_replicas(&self) -> usize {
        self.peers.len() + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addrs(ports: &[u16]) -> Vec<SocketAddr> {
        ports
            .iter()
            .map(|p| SocketAddr::from(([127, 0, 0, 1], *p)))
            .collect()
    }

    #[tokio::test]
    async fn cluster_excludes_self_from_peers() {
        let members = addrs(&[9001, 9002, 9003]);
        let cluster = ClusterTracker::create_valid_cluster(&members, 1).unwrap();

        assert_eq!(cluster.my_replica_id(), &ReplicaId::new("127.0.0.1:9002"));
        assert_eq!(cluster.num_voting_replicas(), 3);
        assert!(cluster.contains_member(&ReplicaId::new("127.0.0.1:9001")));
        assert!(cluster.contains_member(&ReplicaId::new("127.0.0.1:9002")));
        assert!(!cluster.contains_member(&ReplicaId::new("127.0.0.1:9004")));
        assert!(cluster.peer(&ReplicaId::new("127.0.0.1:9002")).is_none());
        assert_eq!(cluster.iter_peers().count(), 2);
    }

    #[tokio::test]
    async fn invalid_clusters_are_rejected() {
        let members = addrs(&[9001, 9002]);
        assert!(matches!(
            ClusterTracker::create_valid_cluster(&members, 2),
            Err(InvalidCluster::NodeIndexOutOfRange(2, 2))
        ));

        let members = addrs(&[9001, 9002, 9001]);
        assert!(matches!(
            ClusterTracker::create_valid_cluster(&members, 0),
            Err(InvalidCluster::DuplicateMember(_))
        ));
    }
}
