use std::collections::BTreeMap;

use tracing::info;

use filmorate_domain::friendship::{
    FriendshipOp, FriendshipStatus, friends_of, mutual_friends,
};
use filmorate_domain::id::UserId;

use crate::domain::repository::{FriendshipRepository, UserRepository};
use crate::domain::types::{Friend, User};
use crate::error::FilmorateError;
use crate::usecase::user::ensure_user_exists;

async fn friend_map<G: FriendshipRepository>(
    repo: &G,
    user: UserId,
) -> Result<BTreeMap<UserId, FriendshipStatus>, FilmorateError> {
    let edges = repo.edges_of(user).await?;
    Ok(friends_of(user, &edges))
}

// ── RequestFriend ────────────────────────────────────────────────────────────

pub struct RequestFriendUseCase<G: FriendshipRepository, U: UserRepository> {
    pub repo: G,
    pub users: U,
}

impl<G: FriendshipRepository, U: UserRepository> RequestFriendUseCase<G, U> {
    /// Returns `target` as it now appears in `user`'s friend list.
    pub async fn execute(&self, user: UserId, target: UserId) -> Result<Friend, FilmorateError> {
        if user == target {
            return Err(FilmorateError::SelfFriendship);
        }
        ensure_user_exists(&self.users, user).await?;
        let target_user = self
            .users
            .find_by_id(target)
            .await?
            .ok_or(FilmorateError::UserNotFound)?;

        let pair = self.repo.apply(user, target, FriendshipOp::Request).await?;
        let status = pair.status().ok_or_else(|| {
            FilmorateError::Internal(anyhow::anyhow!(
                "friend request left no outgoing edge from {user} to {target}"
            ))
        })?;
        match status {
            FriendshipStatus::Confirmed => {
                info!(user_id = %user, friend_id = %target, "friendship confirmed")
            }
            FriendshipStatus::Pending => {
                info!(user_id = %user, friend_id = %target, "friend requested")
            }
        }
        Ok(Friend {
            user: target_user,
            status,
        })
    }
}

// ── RemoveFriend ─────────────────────────────────────────────────────────────

pub struct RemoveFriendUseCase<G: FriendshipRepository, U: UserRepository> {
    pub repo: G,
    pub users: U,
}

impl<G: FriendshipRepository, U: UserRepository> RemoveFriendUseCase<G, U> {
    /// Drops only the `user → target` edge; absent edges are a no-op.
    pub async fn execute(&self, user: UserId, target: UserId) -> Result<(), FilmorateError> {
        if user == target {
            return Err(FilmorateError::SelfFriendship);
        }
        ensure_user_exists(&self.users, user).await?;
        ensure_user_exists(&self.users, target).await?;
        self.repo.apply(user, target, FriendshipOp::Remove).await?;
        info!(user_id = %user, friend_id = %target, "friend removed");
        Ok(())
    }
}

// ── ListFriends ──────────────────────────────────────────────────────────────

pub struct ListFriendsUseCase<G: FriendshipRepository, U: UserRepository> {
    pub repo: G,
    pub users: U,
}

impl<G: FriendshipRepository, U: UserRepository> ListFriendsUseCase<G, U> {
    /// Confirmed friends and pending outgoing requests, ascending by id.
    pub async fn execute(&self, user: UserId) -> Result<Vec<Friend>, FilmorateError> {
        ensure_user_exists(&self.users, user).await?;
        let statuses = friend_map(&self.repo, user).await?;
        let ids: Vec<UserId> = statuses.keys().copied().collect();
        let friends = self
            .users
            .find_by_ids(&ids)
            .await?
            .into_iter()
            .filter_map(|friend| {
                statuses.get(&friend.id).map(|status| Friend {
                    user: friend,
                    status: *status,
                })
            })
            .collect();
        Ok(friends)
    }
}

// ── MutualFriends ────────────────────────────────────────────────────────────

pub struct MutualFriendsUseCase<G: FriendshipRepository, U: UserRepository> {
    pub repo: G,
    pub users: U,
}

impl<G: FriendshipRepository, U: UserRepository> MutualFriendsUseCase<G, U> {
    /// Users in both friend lists, ascending by id. Symmetric in its arguments.
    pub async fn execute(&self, a: UserId, b: UserId) -> Result<Vec<User>, FilmorateError> {
        if a == b {
            return Err(FilmorateError::SelfFriendship);
        }
        ensure_user_exists(&self.users, a).await?;
        ensure_user_exists(&self.users, b).await?;
        let friends_a = friend_map(&self.repo, a).await?;
        let friends_b = friend_map(&self.repo, b).await?;
        let common = mutual_friends(&friends_a, &friends_b);
        self.users.find_by_ids(&common).await
    }
}
