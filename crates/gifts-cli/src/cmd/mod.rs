pub mod catalog;
pub mod init;
pub mod plan;
pub mod results;
pub mod submit;
