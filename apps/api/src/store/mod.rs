pub mod employees;
pub mod jobs;
