/// Inbound ports (Driving ports) - Use case interfaces
///
/// These ports define the interfaces that external adapters (the CLI
/// driver, a serverless runtime, tests) use to invoke the query router.
pub mod query_port;

pub use query_port::QueryPort;
