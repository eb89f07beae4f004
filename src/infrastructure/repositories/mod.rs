//! Repository implementations using SeaORM

pub mod post_repository;
pub mod user_repository;

pub use post_repository::SeaOrmPostRepository;
pub use user_repository::SeaOrmUserRepository;
