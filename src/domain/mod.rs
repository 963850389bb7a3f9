pub mod location;
pub mod model;
pub mod port;
pub mod validate;
