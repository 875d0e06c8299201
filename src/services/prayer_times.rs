//! Prayer timetable sources.
//!
//! Singapore deployments read the official MUIS timetable CSV first and
//! fall back to the Aladhan HTTP API; other locations go straight to the
//! API. Sources are composed with [`SourceChain`].

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::SchedulerError;
use crate::scheduler::policy::PrayerTimings;

/// A source of one day's prayer timetable for a location.
///
/// Results must be stable for a given (location, date) within one
/// calendar day; the scheduler refetches instead of caching.
#[async_trait]
pub trait PrayerTimeSource: Send + Sync {
    async fn get_times(
        &self,
        city: &str,
        country: &str,
        date: NaiveDate,
    ) -> Result<PrayerTimings, SchedulerError>;
}

fn unavailable(city: &str, country: &str) -> SchedulerError {
    SchedulerError::TimingsUnavailable {
        city: city.to_string(),
        country: country.to_string(),
    }
}

/// Client for the Aladhan timings-by-city API.
pub struct AladhanClient {
    http: reqwest::Client,
    base_url: String,
    method: u8,
}

#[derive(Debug, Deserialize)]
struct AladhanResponse {
    data: AladhanData,
}

#[derive(Debug, Deserialize)]
struct AladhanData {
    timings: AladhanTimings,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AladhanTimings {
    fajr: String,
    sunrise: String,
    dhuhr: String,
    asr: String,
    maghrib: String,
    isha: String,
}

impl AladhanClient {
    pub fn new(base_url: String, method: u8) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();

        Self {
            http,
            base_url,
            method,
        }
    }
}

#[async_trait]
impl PrayerTimeSource for AladhanClient {
    async fn get_times(
        &self,
        city: &str,
        country: &str,
        _date: NaiveDate,
    ) -> Result<PrayerTimings, SchedulerError> {
        // The API serves today's timings for the city's own timezone.
        let method = self.method.to_string();
        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("city", city),
                ("country", country),
                ("method", method.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                warn!("Prayer API request failed for {}, {}: {}", city, country, e);
                unavailable(city, country)
            })?;

        if !response.status().is_success() {
            warn!(
                "Prayer API returned HTTP {} for {}, {}",
                response.status(),
                city,
                country
            );
            return Err(unavailable(city, country));
        }

        let body: AladhanResponse = response.json().await.map_err(|e| {
            warn!("Prayer API returned malformed body: {}", e);
            unavailable(city, country)
        })?;

        let t = body.data.timings;
        let timings = PrayerTimings::from_strings(
            &t.fajr, &t.sunrise, &t.dhuhr, &t.asr, &t.maghrib, &t.isha,
        )?;

        info!("Fetched prayer times for {}, {}", city, country);
        Ok(timings)
    }
}

/// Reads the official MUIS (Majlis Ugama Islam Singapura) timetable CSV.
/// Only answers for Singapore; other locations fall through the chain.
pub struct MuisCsvSource {
    path: PathBuf,
}

#[derive(Debug, Deserialize)]
struct MuisRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Subuh")]
    subuh: String,
    #[serde(rename = "Syuruk")]
    syuruk: String,
    #[serde(rename = "Zohor")]
    zohor: String,
    #[serde(rename = "Asar")]
    asar: String,
    #[serde(rename = "Maghrib")]
    maghrib: String,
    #[serde(rename = "Isyak")]
    isyak: String,
}

impl MuisCsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn lookup(&self, date: NaiveDate) -> Result<Option<PrayerTimings>, SchedulerError> {
        let date_str = date.format("%Y-%m-%d").to_string();

        let mut reader = csv::Reader::from_path(&self.path).map_err(|e| {
            warn!("MUIS CSV not readable at {}: {}", self.path.display(), e);
            unavailable("Singapore", "Singapore")
        })?;

        for row in reader.deserialize::<MuisRow>() {
            let row = row.map_err(|e| {
                warn!("MUIS CSV row malformed: {}", e);
                unavailable("Singapore", "Singapore")
            })?;

            if row.date == date_str {
                return Ok(Some(PrayerTimings::from_strings(
                    &row.subuh,
                    &row.syuruk,
                    &row.zohor,
                    &row.asar,
                    &row.maghrib,
                    &row.isyak,
                )?));
            }
        }

        Ok(None)
    }
}

#[async_trait]
impl PrayerTimeSource for MuisCsvSource {
    async fn get_times(
        &self,
        city: &str,
        country: &str,
        date: NaiveDate,
    ) -> Result<PrayerTimings, SchedulerError> {
        let is_singapore = city.eq_ignore_ascii_case("singapore")
            || country.eq_ignore_ascii_case("singapore");
        if !is_singapore {
            return Err(unavailable(city, country));
        }

        // The file is small (one year of rows); a blocking read here is
        // cheaper than shuttling it to a worker thread.
        match self.lookup(date)? {
            Some(timings) => {
                info!("Retrieved MUIS prayer times from CSV for {}", date);
                Ok(timings)
            }
            None => {
                warn!("Date {} not found in MUIS CSV", date);
                Err(unavailable(city, country))
            }
        }
    }
}

/// Tries each source in order, returning the first successful timetable.
pub struct SourceChain {
    sources: Vec<Arc<dyn PrayerTimeSource>>,
}

impl SourceChain {
    pub fn new(sources: Vec<Arc<dyn PrayerTimeSource>>) -> Self {
        Self { sources }
    }
}

#[async_trait]
impl PrayerTimeSource for SourceChain {
    async fn get_times(
        &self,
        city: &str,
        country: &str,
        date: NaiveDate,
    ) -> Result<PrayerTimings, SchedulerError> {
        for source in &self.sources {
            match source.get_times(city, country, date).await {
                Ok(timings) => return Ok(timings),
                Err(e) => warn!("Prayer time source failed, trying next: {}", e),
            }
        }

        Err(unavailable(city, country))
    }
}
