pub mod connection;
pub mod settings;

pub use connection::ConnectionDescriptor;
pub use settings::{Settings, Timeouts, load_settings};
