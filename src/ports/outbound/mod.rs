/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems.
pub mod document_store;

pub use document_store::DocumentStore;
