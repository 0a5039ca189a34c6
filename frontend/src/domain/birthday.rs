//! Upcoming birthday reminders for customer and vendor contacts and staff.
//!
//! Alerts are recomputed from the current person list on every call. A
//! birthday only counts in the current calendar year unless the window is
//! configured to wrap into January.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::models::{Customer, User, Vendor};
use crate::services::date_utils::{date_parts, days_in_month, is_leap_year};

/// Alerts look this many days ahead of today
pub const DEFAULT_ALERT_WINDOW_DAYS: i64 = 7;

/// Affiliation used for back-office users
pub const STAFF_AFFILIATION: &str = "Staff";

/// A date of birth as recorded.
///
/// Unlike [`NaiveDate`] this accepts Feb 29 in any birth year: records
/// entered by hand carry `1990-02-29` and the reminder still has to fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Birthday {
    year: i32,
    month: u32,
    day: u32,
}

impl Birthday {
    pub fn new(year: i32, month: u32, day: u32) -> Option<Self> {
        let fits_month = days_in_month(year, month).is_some_and(|len| (1..=len).contains(&day));
        let leap_day = month == 2 && day == 29;
        (fits_month || leap_day).then_some(Self { year, month, day })
    }

    /// Read from any text [`date_parts`] understands
    pub fn parse(input: &str) -> Option<Self> {
        let (year, month, day) = date_parts(input)?;
        Self::new(year, month, day)
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn month(self) -> u32 {
        self.month
    }

    pub fn day(self) -> u32 {
        self.day
    }

    pub fn is_leap_day(self) -> bool {
        self.month == 2 && self.day == 29
    }

    /// `YYYY-MM-DD`, exactly as recorded
    pub fn to_iso(self) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl From<NaiveDate> for Birthday {
    fn from(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
        }
    }
}

impl fmt::Display for Birthday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso())
    }
}

impl TryFrom<String> for Birthday {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("invalid birthday {:?}", value))
    }
}

impl From<Birthday> for String {
    fn from(birthday: Birthday) -> Self {
        birthday.to_iso()
    }
}

/// One person whose birthday may be upcoming
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BirthdayCandidate {
    pub name: String,
    pub affiliation: String,
    /// Raw birthday text from the record
    pub birthday: String,
}

impl BirthdayCandidate {
    pub fn new(name: impl Into<String>, affiliation: impl Into<String>, birthday: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            affiliation: affiliation.into(),
            birthday: birthday.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BirthdayAlert {
    pub person_name: String,
    pub affiliation: String,
    pub occurs_on: NaiveDate,
    pub days_until: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthdayWindow {
    /// Inclusive upper bound on `days_until`
    pub days: i64,
    /// Look into next year when this year's date already passed
    pub wrap_year_end: bool,
}

impl Default for BirthdayWindow {
    fn default() -> Self {
        Self {
            days: DEFAULT_ALERT_WINDOW_DAYS,
            wrap_year_end: false,
        }
    }
}

/// The birthday's occurrence in `year`; Feb 29 falls on Feb 28 outside leap years
pub fn birthday_in_year(birthday: Birthday, year: i32) -> Option<NaiveDate> {
    if birthday.is_leap_day() && !is_leap_year(year) {
        return NaiveDate::from_ymd_opt(year, 2, 28);
    }
    NaiveDate::from_ymd_opt(year, birthday.month(), birthday.day())
}

/// Birthdays within the next seven days, soonest first
pub fn compute_alerts(people: &[BirthdayCandidate], today: NaiveDate) -> Vec<BirthdayAlert> {
    compute_alerts_with(people, today, BirthdayWindow::default())
}

pub fn compute_alerts_with(
    people: &[BirthdayCandidate],
    today: NaiveDate,
    window: BirthdayWindow,
) -> Vec<BirthdayAlert> {
    let max_days = window.days.max(0);
    let mut alerts = Vec::new();

    for person in people {
        if person.birthday.trim().is_empty() {
            continue;
        }

        let Some(birthday) = Birthday::parse(&person.birthday) else {
            log::warn!(
                "Skipping birthday for {}: unreadable date {:?}",
                person.name,
                person.birthday
            );
            continue;
        };

        let Some(mut occurs_on) = birthday_in_year(birthday, today.year()) else {
            continue;
        };
        let mut days_until = (occurs_on - today).num_days();

        if days_until < 0 && window.wrap_year_end {
            if let Some(next) = birthday_in_year(birthday, today.year() + 1) {
                occurs_on = next;
                days_until = (next - today).num_days();
            }
        }

        if (0..=max_days).contains(&days_until) {
            alerts.push(BirthdayAlert {
                person_name: person.name.clone(),
                affiliation: person.affiliation.clone(),
                occurs_on,
                days_until,
            });
        }
    }

    alerts.sort_by_key(|alert| alert.days_until);
    alerts
}

/// Contacts of every customer, with the company as affiliation
pub fn candidates_from_customers(customers: &[Customer]) -> Vec<BirthdayCandidate> {
    customers
        .iter()
        .flat_map(|customer| {
            customer.pics.iter().filter_map(move |pic| {
                pic.birthday.map(|birthday| {
                    BirthdayCandidate::new(&pic.name, &customer.company_name, birthday.to_iso())
                })
            })
        })
        .collect()
}

/// Contacts of every vendor, with the company as affiliation
pub fn candidates_from_vendors(vendors: &[Vendor]) -> Vec<BirthdayCandidate> {
    vendors
        .iter()
        .flat_map(|vendor| {
            vendor.pics.iter().filter_map(move |pic| {
                pic.birthday.map(|birthday| {
                    BirthdayCandidate::new(&pic.name, &vendor.company_name, birthday.to_iso())
                })
            })
        })
        .collect()
}

/// Active back-office users
pub fn candidates_from_users(users: &[User]) -> Vec<BirthdayCandidate> {
    users
        .iter()
        .filter(|user| user.active)
        .filter_map(|user| {
            user.birthday.map(|birthday| {
                BirthdayCandidate::new(user.display_name(), STAFF_AFFILIATION, birthday.to_iso())
            })
        })
        .collect()
}
