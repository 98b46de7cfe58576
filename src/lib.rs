pub mod config;
pub mod checksum;
pub mod emv;
pub mod error;
pub mod http;
pub mod normalize;
pub mod payment;
pub mod supabase;
pub mod types;

pub use error::PixError;
pub use payment::{generate_charge_payload, ChargeRequest};
