pub mod category;
pub mod character;
pub mod episode;
pub mod participation;
pub mod status;
