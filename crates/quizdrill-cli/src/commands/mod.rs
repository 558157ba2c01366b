pub mod grade;
pub mod init;
pub mod summary;
pub mod take;
pub mod validate;
