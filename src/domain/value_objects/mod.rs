mod access_policy;
mod container_name;
mod file_name;

pub use access_policy::{AccessPolicy, DEFAULT_PUBLIC_MARKER};
pub use container_name::ContainerName;
pub use file_name::FileName;
