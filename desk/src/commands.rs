//! Subcommand handlers. Each returns the text to print.

use anyhow::{bail, Result};
use chrono::NaiveDate;
use log::{info, warn};
use port_agency_frontend::domain::birthday::{
    candidates_from_customers, candidates_from_users, candidates_from_vendors, compute_alerts_with,
};
use port_agency_frontend::domain::filter::filter_records;
use port_agency_frontend::domain::models::{KycStatus, User, Vessel};
use port_agency_frontend::domain::sscec::{
    classify_date_with, compute_expiry, compute_issued_from_expiry, SscecStatus,
};
use port_agency_frontend::services::date_utils::{parse_date, to_display};
use port_agency_frontend::services::{ApiClient, ApiError};

use crate::config::DeskConfig;
use crate::report;

pub async fn login(client: &ApiClient, username: &str, password: &str) -> Result<String> {
    let user = client.login(username, password).await?;
    info!("Logged in against {}", client.base_url());
    Ok(format!("Logged in as {} ({})\n", user.display_name(), user.role))
}

pub fn logout(client: &ApiClient) -> String {
    client.logout();
    "Logged out\n".to_string()
}

pub fn whoami(client: &ApiClient) -> String {
    report::whoami(client.session().current_user().as_ref())
}

pub async fn customers(client: &ApiClient, search: Option<&str>) -> Result<String> {
    let customers = client.list_customers().await?;
    let rows = filter_records(&customers, search.unwrap_or_default());
    Ok(report::customers(&rows))
}

pub async fn vendors(client: &ApiClient, search: Option<&str>, kyc: Option<KycStatus>) -> Result<String> {
    let vendors = client.list_vendors().await?;
    let rows: Vec<_> = filter_records(&vendors, search.unwrap_or_default())
        .into_iter()
        .filter(|vendor| kyc.map_or(true, |status| vendor.kyc_status == status))
        .collect();
    Ok(report::vendors(&rows))
}

pub async fn vessels(
    client: &ApiClient,
    config: &DeskConfig,
    search: Option<&str>,
    status: Option<SscecStatus>,
    today: NaiveDate,
) -> Result<String> {
    let vessels = client.list_vessels().await?;
    let rows: Vec<&Vessel> = filter_records(&vessels, search.unwrap_or_default())
        .into_iter()
        .filter(|vessel| {
            status.map_or(true, |wanted| vessel.sscec_status(today, config.sscec_warning_days) == wanted)
        })
        .collect();
    Ok(report::vessels(&rows, today, config.sscec_warning_days, config.display_style))
}

/// Staff birthdays are skipped when the user list is off limits for this account
async fn staff_for_birthdays(client: &ApiClient) -> Result<Vec<User>> {
    match client.list_users().await {
        Ok(users) => Ok(users),
        Err(ApiError::Unauthorized) => Err(ApiError::Unauthorized.into()),
        Err(e) if e.status() == Some(403) => {
            warn!("No access to the user list, staff birthdays skipped");
            Ok(Vec::new())
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn birthdays(client: &ApiClient, config: &DeskConfig, today: NaiveDate) -> Result<String> {
    let (customers, vendors) = tokio::try_join!(client.list_customers(), client.list_vendors())?;
    let users = staff_for_birthdays(client).await?;

    let mut people = candidates_from_customers(&customers);
    people.extend(candidates_from_vendors(&vendors));
    people.extend(candidates_from_users(&users));

    let window = config.birthday_window();
    let alerts = compute_alerts_with(&people, today, window);
    Ok(report::birthdays(&alerts, window.days))
}

pub async fn users(client: &ApiClient, search: Option<&str>) -> Result<String> {
    let users = client.list_users().await?;
    let rows = filter_records(&users, search.unwrap_or_default());
    Ok(report::users(&rows))
}

/// Offline: expiry of a certificate issued on `issued`
pub fn sscec_expiry(config: &DeskConfig, issued: &str, today: NaiveDate) -> Result<String> {
    let expiry = compute_expiry(issued);
    let Some(expiry_date) = parse_date(&expiry) else {
        bail!("Unreadable issue date {:?}", issued);
    };
    let status = classify_date_with(expiry_date, today, config.sscec_warning_days);
    Ok(format!(
        "Expires {} ({})\n",
        to_display(&expiry, config.display_style),
        status
    ))
}

/// Offline: issue date of a certificate expiring on `expiry`
pub fn sscec_issued(config: &DeskConfig, expiry: &str) -> Result<String> {
    let issued = compute_issued_from_expiry(expiry);
    if issued.is_empty() {
        bail!("Unreadable expiry date {:?}", expiry);
    }
    Ok(format!("Issued {}\n", to_display(&issued, config.display_style)))
}

/// Parse a `--date` argument, defaulting to `today`
pub fn reference_date(value: Option<&str>, today: NaiveDate) -> Result<NaiveDate> {
    match value {
        None => Ok(today),
        Some(value) => match parse_date(value) {
            Some(date) => Ok(date),
            None => bail!("Unreadable date {:?}", value),
        },
    }
}
