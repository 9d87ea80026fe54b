use crate::replica::peers::ReplicaId;
use std::fmt;
use std::sync::Arc;

#[derive(Copy, Clone, PartialOrd, Ord, PartialEq, Eq, Hash)]
pub(crate) struct Term(u64);

impl Term {
    pub(crate) fn new(term: u64) -> Self {
        Term(term)
    }

    pub(crate) fn as_u64(&self) -> u64 {
        self.0
    }

    fn incr(&mut self) {
        self.0 += 1;
    }
}

impl fmt::Debug for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// PersistentLocalState holds the term and vote bookkeeping that decides election safety.
///
/// Store methods behave like a CAS: they return true only if they mutated state.
pub(crate) trait PersistentLocalState {
    /// Set current term to `new_term` iff it is larger than the current term. Clears the vote.
    fn store_term_if_increased(&mut self, new_term: Term) -> bool;

    /// Store our vote iff `expected_current_term` is still the current term and we have not
    /// voted in it yet.
    fn store_vote_for_term_if_unvoted(&mut self, expected_current_term: Term, vote: ReplicaId) -> bool;

    /// Used when transitioning to candidate. Returns the new term.
    fn increment_term_and_vote_for_self(&mut self) -> Term;

    fn current_term(&self) -> Term;
    fn voted_for_current_term(&self) -> (Term, Option<Arc<ReplicaId>>);
}

// Terms and votes live in memory only. A restarted node rejoins at term 0 and catches up from
// the first AppendEntries or Vote it sees.
pub(super) struct VolatileLocalState {
    current_term: Term,
    voted_for_this_term: Option<Arc<ReplicaId>>,
    my_replica_id: Arc<ReplicaId>,
}

impl VolatileLocalState {
    pub(super) fn new(my_replica_id: ReplicaId) -> Self {
        VolatileLocalState {
            current_term: Term::new(0),
            voted_for_this_term: None,
            my_replica_id: Arc::new(my_replica_id),
        }
    }
}

impl PersistentLocalState for VolatileLocalState {
    fn store_term_if_increased(&mut self, new_term: Term) -> bool {
        if new_term <= self.current_term {
            return false;
        }

        self.current_term = new_term;
        self.voted_for_this_term = None;
        true
    }

    fn store_vote_for_term_if_unvoted(&mut self, expected_term: Term, vote: ReplicaId) -> bool {
        if expected_term != self.current_term || self.voted_for_this_term.is_some() {
            return false;
        }

        self.voted_for_this_term.replace(Arc::new(vote));
        true
    }

    fn increment_term_and_vote_for_self(&mut self) -> Term {
        self.current_term.incr();
        self.voted_for_this_term.replace(self.my_replica_id.clone());

        self.current_term
    }

    fn current_term(&self) -> Term {
        self.current_term
    }

    fn voted_for_current_term(&self) -> (Term, Option<Arc<ReplicaId>>) {
        (self.current_term, self.voted_for_this_term.clone())
    }
}
