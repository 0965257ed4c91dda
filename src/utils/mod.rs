pub mod dates;
pub mod env_file;
pub mod jwt;
pub mod password;
pub mod whatsapp;
