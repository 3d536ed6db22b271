//! # innkeeper-analytics
//!
//! Descriptive aggregates over the pre-cleaned hotel-bookings table: the
//! ten metrics the reporting dashboard displays, computed as plain data.
//! No retained state and no rendering: load the CSV, compute, and hand
//! the numbers to whatever draws them.
//!
//! ```no_run
//! use innkeeper_analytics::{DashboardSummary, load_bookings_from_path};
//!
//! # fn example() -> anyhow::Result<()> {
//! let bookings = load_bookings_from_path("cleaned_hotel_bookings.csv")?;
//! let summary = DashboardSummary::compute(&bookings, 15);
//! println!("cancellation rate: {:.2}%", summary.cancellation_rate);
//! # Ok(())
//! # }
//! ```

pub mod booking;
pub mod error;
pub mod stats;

pub use booking::{Booking, load_bookings, load_bookings_from_path, month_number};
pub use error::{AnalyticsError, Result};
pub use stats::{AdrSummary, DashboardSummary};
