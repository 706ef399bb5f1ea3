//! # Attendance Core
//!
//! Domain types shared by the storage and HTTP layers: employees, attendance
//! records, the overtime calculator and request validation.

pub mod errors;
pub mod models;
pub mod overtime;
pub mod validation;
