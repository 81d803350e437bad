//! Traits shared by all use cases

pub mod usecase_metadata;

pub use usecase_metadata::UseCaseMetadata;
