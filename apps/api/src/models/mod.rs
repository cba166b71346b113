pub mod employee;
pub mod job;
