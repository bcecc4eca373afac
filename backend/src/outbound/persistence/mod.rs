//! Student persistence adapters.
//!
//! The store keeps records in memory and, when configured with a path,
//! mirrors them to a JSON records file so restarts keep registrations.
//! Stored document types (`models.rs`) stay private to this module.

mod in_memory_student_repository;
mod models;

pub use in_memory_student_repository::InMemoryStudentRepository;
