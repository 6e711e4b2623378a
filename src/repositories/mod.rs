pub mod export_repository;
pub mod profile_repository;
pub mod settings_repository;
