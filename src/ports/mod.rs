/// Ports module defining interfaces for hexagonal architecture
///
/// This module contains both inbound ports (driving ports - the query entry
/// point) and outbound ports (driven ports - the object store read).
pub mod inbound;
pub mod outbound;
