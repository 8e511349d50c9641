//! sea-orm entities for the Filmorate database.

pub mod film_genres;
pub mod films;
pub mod friendships;
pub mod genres;
pub mod likes;
pub mod ratings;
pub mod users;
