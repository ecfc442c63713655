pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod themes;
pub mod value_objects;
pub mod wizard;
