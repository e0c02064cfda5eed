pub mod errors;

pub use errors::ProfileError;
