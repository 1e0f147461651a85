//! Ports - boundaries between the rule engine and its collaborators

pub mod outbound;
