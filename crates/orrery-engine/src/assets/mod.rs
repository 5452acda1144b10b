pub mod manifest;
pub mod registry;
