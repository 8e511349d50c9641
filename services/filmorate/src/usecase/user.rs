use chrono::{NaiveDate, Utc};
use tracing::info;

use filmorate_domain::id::UserId;
use filmorate_domain::user::{display_name, validate_birthday, validate_email, validate_login};

use crate::domain::repository::UserRepository;
use crate::domain::types::{User, UserFields};
use crate::error::FilmorateError;

/// Fail with `UserNotFound` unless `id` is a stored user.
pub async fn ensure_user_exists<R: UserRepository>(
    repo: &R,
    id: UserId,
) -> Result<(), FilmorateError> {
    if repo.exists(id).await? {
        Ok(())
    } else {
        Err(FilmorateError::UserNotFound)
    }
}

pub struct UserInput {
    pub email: String,
    pub login: String,
    pub name: Option<String>,
    pub birthday: NaiveDate,
}

impl UserInput {
    fn validate(self, today: NaiveDate) -> Result<UserFields, FilmorateError> {
        validate_email(&self.email)?;
        validate_login(&self.login)?;
        validate_birthday(self.birthday, today)?;
        let name = display_name(self.name.as_deref(), &self.login);
        Ok(UserFields {
            email: self.email,
            login: self.login,
            name,
            birthday: self.birthday,
        })
    }
}

// ── CreateUser ───────────────────────────────────────────────────────────────

pub struct CreateUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> CreateUserUseCase<R> {
    pub async fn execute(&self, input: UserInput) -> Result<User, FilmorateError> {
        let fields = input.validate(Utc::now().date_naive())?;
        let user = self.repo.create(&fields).await?;
        info!(user_id = %user.id, login = %user.login, "user created");
        Ok(user)
    }
}

// ── UpdateUser ───────────────────────────────────────────────────────────────

pub struct UpdateUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> UpdateUserUseCase<R> {
    pub async fn execute(&self, id: UserId, input: UserInput) -> Result<User, FilmorateError> {
        let fields = input.validate(Utc::now().date_naive())?;
        let user = self
            .repo
            .update(id, &fields)
            .await?
            .ok_or(FilmorateError::UserNotFound)?;
        info!(user_id = %user.id, "user updated");
        Ok(user)
    }
}

// ── GetUser ──────────────────────────────────────────────────────────────────

pub struct GetUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> GetUserUseCase<R> {
    pub async fn execute(&self, id: UserId) -> Result<User, FilmorateError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(FilmorateError::UserNotFound)
    }
}

// ── ListUsers ────────────────────────────────────────────────────────────────

pub struct ListUsersUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> ListUsersUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<User>, FilmorateError> {
        self.repo.list().await
    }
}
