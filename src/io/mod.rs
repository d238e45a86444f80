pub mod settings_io;
pub mod vault;
