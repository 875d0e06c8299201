pub mod job_store;
pub mod policy;
pub mod service;
