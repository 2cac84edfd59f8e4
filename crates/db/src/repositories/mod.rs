pub mod category_repo;
pub mod character_repo;
pub mod episode_repo;
pub mod participation_repo;
pub mod status_repo;
pub mod subcategory_repo;

pub use category_repo::CategoryRepo;
pub use character_repo::CharacterRepo;
pub use episode_repo::EpisodeRepo;
pub use participation_repo::ParticipationRepo;
pub use status_repo::StatusRepo;
pub use subcategory_repo::SubcategoryRepo;
