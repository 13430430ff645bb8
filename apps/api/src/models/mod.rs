pub mod application;
pub mod job_application;
pub mod resume;
pub mod user;
