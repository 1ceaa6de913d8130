pub mod advisor;
pub mod context;
