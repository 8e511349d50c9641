pub mod film;
pub mod friendship;
pub mod like;
pub mod popular;
pub mod reference;
pub mod user;
