/// Domain layer - pure query logic over a KBOM report
///
/// Route classification, the report model, vulnerability shape
/// normalization and projections. Nothing here performs I/O.
pub mod domain;
pub mod policies;
pub mod services;
