pub mod credits;
pub mod filter;
pub mod genre;
pub mod movie;
pub mod review;
pub mod saved;

pub use credits::{CastMember, Credits, CrewMember};
pub use filter::MovieFilter;
pub use genre::Genre;
pub use movie::{Movie, MovieDetails, MoviePage, MovieRecord, ProductionCompany};
pub use review::Review;
pub use saved::SavedMovie;
