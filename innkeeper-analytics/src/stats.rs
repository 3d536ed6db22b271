//! Dashboard aggregates over the bookings table
//!
//! The ten descriptive metrics the reporting dashboard renders, computed
//! here as plain data. Chart rendering is a separate concern and stays
//! out of this crate.

use crate::booking::Booking;
use std::collections::{BTreeMap, HashMap};

/// Bin width for the lead-time histogram, in days.
pub const LEAD_TIME_BIN_DAYS: u32 = 30;

/// Booking changes at or above this count are left out of the
/// changes distribution, matching the dashboard's filter.
pub const BOOKING_CHANGES_CUTOFF: u32 = 5;

/// ADR summary for one hotel type.
#[derive(Debug, Clone, PartialEq)]
pub struct AdrSummary {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub bookings: usize,
}

/// Total revenue per (year, month number), months 1..=12.
pub fn monthly_revenue(bookings: &[Booking]) -> BTreeMap<(i32, u32), f64> {
    let mut revenue = BTreeMap::new();
    for b in bookings {
        if let Some(month) = b.arrival_month_number() {
            *revenue.entry((b.arrival_date_year, month)).or_insert(0.0) += b.total_revenue();
        }
    }
    revenue
}

/// Share of cancelled bookings, in percent of all bookings.
pub fn cancellation_rate(bookings: &[Booking]) -> f64 {
    if bookings.is_empty() {
        return 0.0;
    }
    let cancelled = bookings.iter().filter(|b| b.is_canceled()).count();
    cancelled as f64 / bookings.len() as f64 * 100.0
}

/// The `n` countries with the most bookings, descending by count.
/// Ties break alphabetically so the ordering is deterministic.
pub fn top_countries(bookings: &[Booking], n: usize) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for b in bookings {
        *counts.entry(b.country.as_str()).or_insert(0) += 1;
    }
    let mut ranked: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(country, count)| (country.to_string(), count))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(n);
    ranked
}

/// Lead-time distribution: bin start (in days) to booking count, with
/// fixed [`LEAD_TIME_BIN_DAYS`]-wide bins.
pub fn lead_time_histogram(bookings: &[Booking]) -> BTreeMap<u32, usize> {
    let mut bins = BTreeMap::new();
    for b in bookings {
        let bin = b.lead_time / LEAD_TIME_BIN_DAYS * LEAD_TIME_BIN_DAYS;
        *bins.entry(bin).or_insert(0) += 1;
    }
    bins
}

/// Booking counts per market segment.
pub fn market_segment_counts(bookings: &[Booking]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for b in bookings {
        *counts.entry(b.market_segment.clone()).or_insert(0) += 1;
    }
    counts
}

/// ADR mean/min/max per hotel type.
pub fn adr_by_hotel(bookings: &[Booking]) -> BTreeMap<String, AdrSummary> {
    let mut grouped: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for b in bookings {
        grouped.entry(b.hotel.clone()).or_default().push(b.adr);
    }
    grouped
        .into_iter()
        .map(|(hotel, rates)| {
            let sum: f64 = rates.iter().sum();
            let min = rates.iter().cloned().fold(f64::INFINITY, f64::min);
            let max = rates.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            let summary = AdrSummary {
                mean: sum / rates.len() as f64,
                min,
                max,
                bookings: rates.len(),
            };
            (hotel, summary)
        })
        .collect()
}

/// Counts per number of booking changes, for bookings with fewer than
/// [`BOOKING_CHANGES_CUTOFF`] changes.
pub fn booking_changes_counts(bookings: &[Booking]) -> BTreeMap<u32, usize> {
    let mut counts = BTreeMap::new();
    for b in bookings {
        if b.booking_changes < BOOKING_CHANGES_CUTOFF {
            *counts.entry(b.booking_changes).or_insert(0) += 1;
        }
    }
    counts
}

/// Counts per number of special requests.
pub fn special_requests_counts(bookings: &[Booking]) -> BTreeMap<u32, usize> {
    let mut counts = BTreeMap::new();
    for b in bookings {
        *counts.entry(b.total_of_special_requests).or_insert(0) += 1;
    }
    counts
}

/// Cancellation rate in percent, per deposit type.
pub fn cancellation_rate_by_deposit(bookings: &[Booking]) -> BTreeMap<String, f64> {
    let mut totals: BTreeMap<String, (usize, usize)> = BTreeMap::new();
    for b in bookings {
        let entry = totals.entry(b.deposit_type.clone()).or_insert((0, 0));
        entry.0 += 1;
        if b.is_canceled() {
            entry.1 += 1;
        }
    }
    totals
        .into_iter()
        .map(|(deposit, (total, cancelled))| {
            (deposit, cancelled as f64 / total as f64 * 100.0)
        })
        .collect()
}

/// Share of bookings made by repeated guests, in percent.
pub fn repeated_guest_share(bookings: &[Booking]) -> f64 {
    if bookings.is_empty() {
        return 0.0;
    }
    let repeated = bookings.iter().filter(|b| b.is_repeated_guest()).count();
    repeated as f64 / bookings.len() as f64 * 100.0
}

/// All ten dashboard metrics computed in one pass over the table.
#[derive(Debug, Clone)]
pub struct DashboardSummary {
    pub monthly_revenue: BTreeMap<(i32, u32), f64>,
    pub cancellation_rate: f64,
    pub top_countries: Vec<(String, usize)>,
    pub lead_time_histogram: BTreeMap<u32, usize>,
    pub market_segment_counts: BTreeMap<String, usize>,
    pub adr_by_hotel: BTreeMap<String, AdrSummary>,
    pub booking_changes_counts: BTreeMap<u32, usize>,
    pub special_requests_counts: BTreeMap<u32, usize>,
    pub cancellation_rate_by_deposit: BTreeMap<String, f64>,
    pub repeated_guest_share: f64,
}

impl DashboardSummary {
    /// Compute every metric for the given table. `top_n` bounds the
    /// country ranking (the dashboard shows 15).
    pub fn compute(bookings: &[Booking], top_n: usize) -> Self {
        Self {
            monthly_revenue: monthly_revenue(bookings),
            cancellation_rate: cancellation_rate(bookings),
            top_countries: top_countries(bookings, top_n),
            lead_time_histogram: lead_time_histogram(bookings),
            market_segment_counts: market_segment_counts(bookings),
            adr_by_hotel: adr_by_hotel(bookings),
            booking_changes_counts: booking_changes_counts(bookings),
            special_requests_counts: special_requests_counts(bookings),
            cancellation_rate_by_deposit: cancellation_rate_by_deposit(bookings),
            repeated_guest_share: repeated_guest_share(bookings),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::load_bookings;

    const SAMPLE: &str = "\
hotel,is_canceled,lead_time,arrival_date_year,arrival_date_month,arrival_date_day_of_month,stays_in_weekend_nights,stays_in_week_nights,adr,country,market_segment,deposit_type,booking_changes,total_of_special_requests,is_repeated_guest,reservation_status_date
Resort Hotel,0,10,2015,July,1,0,2,100.0,PRT,Direct,No Deposit,0,1,0,01-07-15
Resort Hotel,1,45,2015,July,5,2,2,80.0,PRT,Online TA,Non Refund,1,0,0,05-07-15
City Hotel,0,200,2016,August,3,1,3,120.0,GBR,Online TA,No Deposit,7,2,1,03-08-16
City Hotel,1,70,2016,August,9,0,1,90.0,FRA,Groups,Non Refund,2,0,0,09-08-16
";

    fn sample() -> Vec<Booking> {
        load_bookings(SAMPLE.as_bytes()).unwrap()
    }

    #[test]
    fn test_monthly_revenue_groups_by_year_and_month() {
        let revenue = monthly_revenue(&sample());
        assert_eq!(revenue[&(2015, 7)], 100.0 * 2.0 + 80.0 * 4.0);
        assert_eq!(revenue[&(2016, 8)], 120.0 * 4.0 + 90.0 * 1.0);
        assert_eq!(revenue.len(), 2);
    }

    #[test]
    fn test_cancellation_rates() {
        let bookings = sample();
        assert_eq!(cancellation_rate(&bookings), 50.0);
        assert_eq!(cancellation_rate(&[]), 0.0);

        let by_deposit = cancellation_rate_by_deposit(&bookings);
        assert_eq!(by_deposit["No Deposit"], 0.0);
        assert_eq!(by_deposit["Non Refund"], 100.0);
    }

    #[test]
    fn test_top_countries_ranking_is_deterministic() {
        let ranked = top_countries(&sample(), 15);
        assert_eq!(ranked[0], ("PRT".to_string(), 2));
        // FRA and GBR tie at 1; alphabetical order breaks the tie
        assert_eq!(ranked[1], ("FRA".to_string(), 1));
        assert_eq!(ranked[2], ("GBR".to_string(), 1));

        let truncated = top_countries(&sample(), 1);
        assert_eq!(truncated.len(), 1);
    }

    #[test]
    fn test_lead_time_histogram_bins() {
        let bins = lead_time_histogram(&sample());
        assert_eq!(bins[&0], 1); // lead_time 10
        assert_eq!(bins[&30], 1); // 45
        assert_eq!(bins[&60], 1); // 70
        assert_eq!(bins[&180], 1); // 200
    }

    #[test]
    fn test_adr_by_hotel_summary() {
        let summaries = adr_by_hotel(&sample());
        let resort = &summaries["Resort Hotel"];
        assert_eq!(resort.mean, 90.0);
        assert_eq!(resort.min, 80.0);
        assert_eq!(resort.max, 100.0);
        assert_eq!(resort.bookings, 2);
    }

    #[test]
    fn test_booking_changes_cutoff_applied() {
        let counts = booking_changes_counts(&sample());
        // the booking with 7 changes falls outside the distribution
        assert_eq!(counts.values().sum::<usize>(), 3);
        assert_eq!(counts[&0], 1);
        assert_eq!(counts[&1], 1);
        assert_eq!(counts[&2], 1);
    }

    #[test]
    fn test_remaining_distributions() {
        let bookings = sample();

        let segments = market_segment_counts(&bookings);
        assert_eq!(segments["Online TA"], 2);
        assert_eq!(segments["Direct"], 1);
        assert_eq!(segments["Groups"], 1);

        let requests = special_requests_counts(&bookings);
        assert_eq!(requests[&0], 2);
        assert_eq!(requests[&1], 1);
        assert_eq!(requests[&2], 1);

        assert_eq!(repeated_guest_share(&bookings), 25.0);
    }

    #[test]
    fn test_dashboard_summary_composes_all_metrics() {
        let summary = DashboardSummary::compute(&sample(), 15);
        assert_eq!(summary.cancellation_rate, 50.0);
        assert_eq!(summary.top_countries.len(), 3);
        assert_eq!(summary.adr_by_hotel.len(), 2);
    }
}
