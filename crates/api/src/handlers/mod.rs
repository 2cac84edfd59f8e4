pub mod character;
pub mod episode;
pub mod etl;
pub mod participation;
