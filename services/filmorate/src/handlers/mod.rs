pub mod film;
pub mod friend;
pub mod health;
pub mod like;
pub mod reference;
pub mod user;
