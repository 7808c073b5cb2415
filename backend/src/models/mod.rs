pub mod shipment;
pub mod time;

pub use shipment::*;
pub use time::*;
