//! Appointment booking wizard.
//!
//! The wizard's steps are derived once from the merchant's booking settings
//! and then driven by an index-based state machine.

mod flow;
mod settings;

pub use flow::{booking_steps, BookingFlow, BookingService, BookingStep, CustomerDetails};
pub use settings::BookingSettings;
