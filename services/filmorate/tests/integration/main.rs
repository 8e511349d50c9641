mod db_test;
mod film_test;
mod friendship_test;
mod helpers;
mod http_test;
mod like_test;
