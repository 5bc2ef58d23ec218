/// Application layer - Collectors, use cases and DTOs
///
/// This layer orchestrates domain services and coordinates with
/// infrastructure through ports.
pub mod collectors;
pub mod dto;
pub mod read_models;
pub mod use_cases;
