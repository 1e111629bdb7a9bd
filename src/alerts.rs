//! Derived inventory views: the expiry partition and the low-stock filter.
//!
//! Both are pure functions over the full record set; they perform a single
//! O(n) scan and preserve the input order (callers pass store output, which
//! is ordered by name).

use chrono::{Duration, Local, NaiveDate};

use crate::models::Medicine;

/// Default lookahead window for near-expiry classification, in days
pub const DEFAULT_EXPIRY_WINDOW_DAYS: i64 = 30;

/// A record due to expire within the lookahead window
#[derive(Debug)]
pub struct NearExpiry<'a> {
    pub medicine: &'a Medicine,
    /// Whole days from today until expiry, never negative
    pub days_left: i64,
}

/// Expiry partition of the inventory. Records without an expiry date
/// appear in neither set.
#[derive(Debug, Default)]
pub struct ExpiryReport<'a> {
    /// Expiry date strictly before today
    pub expired: Vec<&'a Medicine>,
    /// Expiry date between today and today + window, inclusive
    pub near_expiry: Vec<NearExpiry<'a>>,
}

/// Partitions `meds` into expired and near-expiry sets relative to the
/// current local date.
pub fn check_expired_and_near_expiry(meds: &[Medicine], window_days: i64) -> ExpiryReport<'_> {
    classify_expiry(meds, Local::now().date_naive(), window_days)
}

/// Inner classification with an explicit `today` - used directly in tests.
pub fn classify_expiry(meds: &[Medicine], today: NaiveDate, window_days: i64) -> ExpiryReport<'_> {
    let horizon = today + Duration::days(window_days);
    let mut report = ExpiryReport::default();

    for med in meds {
        let Some(expiry) = med.expiry_date else {
            continue;
        };
        if expiry < today {
            report.expired.push(med);
        } else if expiry <= horizon {
            report.near_expiry.push(NearExpiry {
                medicine: med,
                days_left: (expiry - today).num_days(),
            });
        }
    }

    log::debug!(
        "Expiry scan: {} expired, {} near expiry (window {} days)",
        report.expired.len(),
        report.near_expiry.len(),
        window_days
    );
    report
}

/// Returns every record whose quantity is at or below its threshold.
pub fn check_low_stock(meds: &[Medicine]) -> Vec<&Medicine> {
    meds.iter().filter(|m| m.is_low_stock()).collect()
}
