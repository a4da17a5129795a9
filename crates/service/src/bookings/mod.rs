//! Booking domain: the storage trait lives here, concrete backends under
//! `crate::file`.

pub mod store;

pub use store::BookingStore;
