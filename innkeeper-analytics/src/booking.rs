//! The pre-cleaned bookings table
//!
//! Cleaning and ingestion happen upstream; this module only loads the
//! already-cleaned CSV into typed records and exposes the derived columns
//! the reporting layer works with (arrival date, total nights, revenue).

use crate::error::{AnalyticsError, Result};
use chrono::NaiveDate;
use csv::ReaderBuilder;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

/// One row of the cleaned hotel-bookings dataset.
#[derive(Debug, Clone, Deserialize)]
pub struct Booking {
    pub hotel: String,
    pub is_canceled: u8,
    pub lead_time: u32,
    pub arrival_date_year: i32,
    pub arrival_date_month: String,
    pub arrival_date_day_of_month: u32,
    pub stays_in_weekend_nights: u32,
    pub stays_in_week_nights: u32,
    /// Average daily rate
    pub adr: f64,
    pub country: String,
    pub market_segment: String,
    pub deposit_type: String,
    pub booking_changes: u32,
    pub total_of_special_requests: u32,
    pub is_repeated_guest: u8,
    /// Day-month-year, two-digit year (as the cleaned export writes it)
    pub reservation_status_date: String,
}

impl Booking {
    /// Total nights stayed: weekend plus week nights.
    pub fn total_nights(&self) -> u32 {
        self.stays_in_weekend_nights + self.stays_in_week_nights
    }

    /// Revenue for the stay: ADR times total nights.
    pub fn total_revenue(&self) -> f64 {
        self.adr * f64::from(self.total_nights())
    }

    /// Arrival month as 1..=12, from the month name.
    pub fn arrival_month_number(&self) -> Option<u32> {
        month_number(&self.arrival_date_month)
    }

    /// Arrival date assembled from the year/month/day columns.
    pub fn arrival_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(
            self.arrival_date_year,
            self.arrival_month_number()?,
            self.arrival_date_day_of_month,
        )
    }

    /// Reservation status date, parsed from the `dd-mm-yy` export format.
    pub fn reservation_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.reservation_status_date, "%d-%m-%y").ok()
    }

    pub fn is_canceled(&self) -> bool {
        self.is_canceled != 0
    }

    pub fn is_repeated_guest(&self) -> bool {
        self.is_repeated_guest != 0
    }
}

/// Month name (any capitalization) to 1..=12.
pub fn month_number(name: &str) -> Option<u32> {
    const MONTHS: [&str; 12] = [
        "january",
        "february",
        "march",
        "april",
        "may",
        "june",
        "july",
        "august",
        "september",
        "october",
        "november",
        "december",
    ];
    let lower = name.trim().to_lowercase();
    MONTHS
        .iter()
        .position(|m| *m == lower)
        .map(|i| (i + 1) as u32)
}

/// Load bookings from any reader producing the cleaned CSV.
pub fn load_bookings<R: Read>(reader: R) -> Result<Vec<Booking>> {
    let mut csv_reader = ReaderBuilder::new().has_headers(true).from_reader(reader);
    let mut bookings = Vec::new();
    for (row, record) in csv_reader.deserialize::<Booking>().enumerate() {
        let booking = record?;
        if booking.arrival_month_number().is_none() {
            return Err(AnalyticsError::InvalidRecord {
                row: row + 1,
                message: format!("unknown arrival month '{}'", booking.arrival_date_month),
            });
        }
        bookings.push(booking);
    }
    tracing::info!(rows = bookings.len(), "loaded bookings table");
    Ok(bookings)
}

/// Load bookings from a cleaned CSV file on disk.
pub fn load_bookings_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Booking>> {
    let file = std::fs::File::open(path.as_ref())?;
    load_bookings(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
hotel,is_canceled,lead_time,arrival_date_year,arrival_date_month,arrival_date_day_of_month,stays_in_weekend_nights,stays_in_week_nights,adr,country,market_segment,deposit_type,booking_changes,total_of_special_requests,is_repeated_guest,reservation_status_date
Resort Hotel,0,342,2015,July,1,0,3,75.0,PRT,Direct,No Deposit,3,0,0,01-07-15
City Hotel,1,14,2015,August,2,2,5,110.5,GBR,Online TA,Non Refund,0,2,1,15-08-15
";

    #[test]
    fn test_load_and_derived_columns() {
        let bookings = load_bookings(SAMPLE.as_bytes()).unwrap();
        assert_eq!(bookings.len(), 2);

        let first = &bookings[0];
        assert_eq!(first.total_nights(), 3);
        assert_eq!(first.total_revenue(), 225.0);
        assert_eq!(
            first.arrival_date(),
            NaiveDate::from_ymd_opt(2015, 7, 1)
        );
        assert_eq!(
            first.reservation_date(),
            NaiveDate::from_ymd_opt(2015, 7, 1)
        );
        assert!(!first.is_canceled());

        let second = &bookings[1];
        assert_eq!(second.total_nights(), 7);
        assert!(second.is_canceled());
        assert!(second.is_repeated_guest());
    }

    #[test]
    fn test_month_number_ignores_capitalization() {
        assert_eq!(month_number("July"), Some(7));
        assert_eq!(month_number("december"), Some(12));
        assert_eq!(month_number("SEPTEMBER"), Some(9));
        assert_eq!(month_number("Smarch"), None);
    }

    #[test]
    fn test_load_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bookings.csv");
        std::fs::write(&path, SAMPLE).unwrap();

        let bookings = load_bookings_from_path(&path).unwrap();
        assert_eq!(bookings.len(), 2);
    }

    #[test]
    fn test_unknown_month_is_rejected() {
        let bad = SAMPLE.replace("August", "Augst");
        let err = load_bookings(bad.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            crate::error::AnalyticsError::InvalidRecord { row: 2, .. }
        ));
    }
}
