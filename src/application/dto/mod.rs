/// Data Transfer Objects for application layer
///
/// DTOs carry the request event in and the response envelope out, keeping
/// the domain layer free of wire concerns.
mod request_event;
mod response_envelope;

pub use request_event::RequestEvent;
pub use response_envelope::{ResponseEnvelope, CONTENT_TYPE_HEADER, JSON_CONTENT_TYPE};
