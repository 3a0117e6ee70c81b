//! Demonstration directory module: cities, schools, majors, and students
//! with row-level data privileges on cities, schools, and majors.
//!
//! Shows the full wiring: entity declarations with explicit privilege
//! column mappings, the startup registration hook
//! ([`config::data_privilege_settings`]), seed data, and a repository that
//! only talks to storage through privileged selects.

pub mod config;
pub mod entities;
pub mod repo;
pub mod seed;

pub use config::data_privilege_settings;
pub use repo::DirectoryRepository;
