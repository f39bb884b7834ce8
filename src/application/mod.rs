/// Application layer - Use cases and DTOs
///
/// This layer contains the application logic that orchestrates
/// domain services and coordinates with infrastructure through ports.
pub mod document_fetcher;
pub mod dto;
pub mod factories;
pub mod use_cases;
