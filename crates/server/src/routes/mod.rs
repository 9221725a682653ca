pub mod openapi;
pub mod profile;
pub mod search;
pub mod system;
