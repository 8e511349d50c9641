//! Friendship state machine.
//!
//! A friendship between two users is stored as up to two directed edges. A single
//! edge is a pending request; once both directions exist they are both marked
//! confirmed. Removal is one-directional: the other party's edge survives as a
//! unilateral (pending) request.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::id::UserId;

/// How a user appears in another user's friend list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FriendshipStatus {
    Pending,
    Confirmed,
}

/// A stored directed edge `from → to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FriendEdge {
    pub from: UserId,
    pub to: UserId,
    pub confirmed: bool,
}

/// Mutation applied to the edge `user → target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FriendshipOp {
    Request,
    Remove,
}

/// Both directed edges between `user` and `target`, viewed from `user`.
///
/// Each side is `Some(confirmed)` when the edge exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FriendPair {
    /// `user → target`
    pub outgoing: Option<bool>,
    /// `target → user`
    pub incoming: Option<bool>,
}

impl FriendPair {
    /// Next state of the pair after `op` on the outgoing edge.
    pub fn apply(self, op: FriendshipOp) -> Self {
        match op {
            FriendshipOp::Request if self.outgoing.is_some() => self,
            FriendshipOp::Request => match self.incoming {
                // Reciprocating accepts the other party's request.
                Some(_) => Self {
                    outgoing: Some(true),
                    incoming: Some(true),
                },
                None => Self {
                    outgoing: Some(false),
                    incoming: None,
                },
            },
            // The surviving edge falls back to a unilateral request.
            FriendshipOp::Remove => Self {
                outgoing: None,
                incoming: self.incoming.map(|_| false),
            },
        }
    }

    /// The same pair viewed from `target`.
    pub fn reversed(self) -> Self {
        Self {
            outgoing: self.incoming,
            incoming: self.outgoing,
        }
    }

    /// How `target` appears in `user`'s friend list.
    ///
    /// Mutual confirmed edges and unilateral outgoing edges count; an incoming
    /// request that `user` has not reciprocated does not.
    pub fn status(self) -> Option<FriendshipStatus> {
        match (self.outgoing, self.incoming) {
            (Some(true), Some(true)) => Some(FriendshipStatus::Confirmed),
            (Some(_), None) => Some(FriendshipStatus::Pending),
            _ => None,
        }
    }
}

/// Friend list of `user` derived from every edge that touches it.
///
/// Edges not touching `user` and self-edges are ignored.
pub fn friends_of(user: UserId, edges: &[FriendEdge]) -> BTreeMap<UserId, FriendshipStatus> {
    let mut pairs: BTreeMap<UserId, FriendPair> = BTreeMap::new();
    for edge in edges {
        if edge.from == edge.to {
            continue;
        }
        if edge.from == user {
            pairs.entry(edge.to).or_default().outgoing = Some(edge.confirmed);
        } else if edge.to == user {
            pairs.entry(edge.from).or_default().incoming = Some(edge.confirmed);
        }
    }
    pairs
        .into_iter()
        .filter_map(|(other, pair)| pair.status().map(|status| (other, status)))
        .collect()
}

/// Users present in both friend lists, ascending by id.
pub fn mutual_friends(
    a: &BTreeMap<UserId, FriendshipStatus>,
    b: &BTreeMap<UserId, FriendshipStatus>,
) -> Vec<UserId> {
    a.keys().filter(|id| b.contains_key(id)).copied().collect()
}
