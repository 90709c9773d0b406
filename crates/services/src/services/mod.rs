pub mod application_count;
pub mod job_store;
pub mod jobs;
