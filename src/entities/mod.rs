//! sea-orm entities for the dealership tables.

pub mod buyer;
pub mod car;
pub mod sale;
pub mod seller;
pub mod stock;
pub mod user;
