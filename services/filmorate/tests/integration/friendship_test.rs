use filmorate::domain::repository::FriendshipRepository;
use filmorate::error::FilmorateError;
use filmorate::infra::Store;
use filmorate::usecase::friendship::{
    ListFriendsUseCase, MutualFriendsUseCase, RemoveFriendUseCase, RequestFriendUseCase,
};
use filmorate_domain::friendship::{FriendEdge, FriendshipStatus};
use filmorate_domain::id::UserId;

use crate::helpers::{create_user, memory_store};

async fn request(store: &Store, a: UserId, b: UserId) -> Result<FriendshipStatus, FilmorateError> {
    let friend = RequestFriendUseCase {
        repo: store.clone(),
        users: store.clone(),
    }
    .execute(a, b)
    .await?;
    Ok(friend.status)
}

async fn remove(store: &Store, a: UserId, b: UserId) -> Result<(), FilmorateError> {
    RemoveFriendUseCase {
        repo: store.clone(),
        users: store.clone(),
    }
    .execute(a, b)
    .await
}

async fn friends(store: &Store, user: UserId) -> Vec<UserId> {
    ListFriendsUseCase {
        repo: store.clone(),
        users: store.clone(),
    }
    .execute(user)
    .await
    .unwrap()
    .into_iter()
    .map(|f| f.user.id)
    .collect()
}

async fn common(store: &Store, a: UserId, b: UserId) -> Result<Vec<UserId>, FilmorateError> {
    let users = MutualFriendsUseCase {
        repo: store.clone(),
        users: store.clone(),
    }
    .execute(a, b)
    .await?;
    Ok(users.into_iter().map(|u| u.id).collect())
}

#[tokio::test]
async fn should_show_request_only_to_requester_until_reciprocated() {
    let store = memory_store();
    let one = create_user(&store, "one").await.id;
    let two = create_user(&store, "two").await.id;

    assert_eq!(request(&store, one, two).await.unwrap(), FriendshipStatus::Pending);
    assert_eq!(friends(&store, one).await, vec![two]);
    assert!(friends(&store, two).await.is_empty());

    assert_eq!(request(&store, two, one).await.unwrap(), FriendshipStatus::Confirmed);
    assert_eq!(friends(&store, two).await, vec![one]);
    assert_eq!(friends(&store, one).await, vec![two]);
}

#[tokio::test]
async fn should_not_change_state_on_repeated_request() {
    let store = memory_store();
    let one = create_user(&store, "one").await.id;
    let two = create_user(&store, "two").await.id;

    request(&store, one, two).await.unwrap();
    assert_eq!(request(&store, one, two).await.unwrap(), FriendshipStatus::Pending);
    assert!(friends(&store, two).await.is_empty());
}

#[tokio::test]
async fn should_leave_other_side_pending_after_removal() {
    let store = memory_store();
    let one = create_user(&store, "one").await.id;
    let two = create_user(&store, "two").await.id;
    request(&store, one, two).await.unwrap();
    request(&store, two, one).await.unwrap();

    remove(&store, one, two).await.unwrap();
    assert!(friends(&store, one).await.is_empty());
    assert_eq!(friends(&store, two).await, vec![one]);
    assert_eq!(
        store.edges_of(two).await.unwrap(),
        vec![FriendEdge {
            from: two,
            to: one,
            confirmed: false
        }]
    );

    // Requesting again re-confirms against the surviving edge.
    assert_eq!(request(&store, one, two).await.unwrap(), FriendshipStatus::Confirmed);
}

#[tokio::test]
async fn should_treat_removal_of_absent_edge_as_no_op() {
    let store = memory_store();
    let one = create_user(&store, "one").await.id;
    let two = create_user(&store, "two").await.id;
    remove(&store, one, two).await.unwrap();
    remove(&store, one, two).await.unwrap();
    assert!(friends(&store, one).await.is_empty());
}

#[tokio::test]
async fn should_reject_self_and_unknown_users() {
    let store = memory_store();
    let one = create_user(&store, "one").await.id;

    assert!(matches!(
        request(&store, one, one).await,
        Err(FilmorateError::SelfFriendship)
    ));
    assert!(matches!(
        request(&store, one, UserId(999)).await,
        Err(FilmorateError::UserNotFound)
    ));
    assert!(matches!(
        remove(&store, UserId(999), one).await,
        Err(FilmorateError::UserNotFound)
    ));
    assert!(matches!(
        common(&store, one, one).await,
        Err(FilmorateError::SelfFriendship)
    ));
}

#[tokio::test]
async fn should_intersect_friend_lists_symmetrically() {
    let store = memory_store();
    let a = create_user(&store, "a").await.id;
    let b = create_user(&store, "b").await.id;
    let shared = create_user(&store, "shared").await.id;
    let only_a = create_user(&store, "only-a").await.id;

    request(&store, a, shared).await.unwrap();
    request(&store, b, shared).await.unwrap();
    request(&store, a, only_a).await.unwrap();

    assert_eq!(common(&store, a, b).await.unwrap(), vec![shared]);
    assert_eq!(common(&store, b, a).await.unwrap(), vec![shared]);
    assert!(common(&store, b, only_a).await.unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn should_confirm_when_requests_cross() {
    let store = memory_store();
    let a = create_user(&store, "a").await.id;
    let b = create_user(&store, "b").await.id;

    let (s1, s2) = (store.clone(), store.clone());
    let h1 = tokio::spawn(async move { request(&s1, a, b).await });
    let h2 = tokio::spawn(async move { request(&s2, b, a).await });
    h1.await.unwrap().unwrap();
    h2.await.unwrap().unwrap();

    let statuses: Vec<FriendshipStatus> = ListFriendsUseCase {
        repo: store.clone(),
        users: store.clone(),
    }
    .execute(a)
    .await
    .unwrap()
    .into_iter()
    .map(|f| f.status)
    .collect();
    assert_eq!(statuses, vec![FriendshipStatus::Confirmed]);
}
