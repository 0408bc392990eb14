//! Barrier Coach - Behavior change support using the COM-B model
//!
//! Classifies what is blocking a user's goal as a capability, opportunity or
//! motivation barrier, picks a matching technique from a fixed catalog and
//! turns it into a short personalized message. User feedback is appended to a
//! CSV log and summarized into simple statistics.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
