pub mod delete;
pub mod download;
pub mod health;
pub mod upload;
