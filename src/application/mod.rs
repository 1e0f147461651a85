//! Application layer - rule-phase orchestration over the domain
//!
//! Services implement the storyteller-facing operations (day cycle,
//! nominations, votes, deaths, travelers) and depend on the outbound ports
//! for everything interactive: asking humans questions, announcing
//! outcomes, saving the match.

pub mod ports;
pub mod services;
