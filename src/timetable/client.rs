use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, instrument, warn};

use super::models::TimetableSession;
use super::{Timetable, TimetableError};

const TIMETABLE_ENDPOINT: &str = "enterprise/Timetable/GetClassTimeTable";
const API_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Debug, Default, Deserialize)]
pub struct TimetableResponse {
    #[serde(rename = "Results", default)]
    pub results: Vec<TimetableRecord>,
}

/// One raw timetable entry; any field may be missing
#[derive(Debug, Default, Deserialize)]
pub struct TimetableRecord {
    pub start: Option<String>,
    #[serde(rename = "AvailableSlots")]
    pub available_slots: Option<i64>,
    #[serde(rename = "ResourceScheduleId")]
    pub resource_schedule_id: Option<i64>,
}

impl TimetableResponse {
    /// Sessions for the complete records, incomplete ones are skipped
    pub fn into_sessions(self) -> Vec<TimetableSession> {
        self.results
            .into_iter()
            .filter_map(|record| {
                let (Some(start), Some(available_slots), Some(schedule_id)) =
                    (record.start, record.available_slots, record.resource_schedule_id)
                else {
                    return None;
                };
                match NaiveDateTime::parse_from_str(&start, API_DATETIME_FORMAT) {
                    Ok(start_datetime) => Some(TimetableSession::new(
                        start_datetime,
                        available_slots,
                        schedule_id,
                    )),
                    Err(err) => {
                        warn!(start = %start, error = %err, "Skipping timetable record with bad start");
                        None
                    }
                }
            })
            .collect()
    }
}

/// The leisure centre booking API's class timetable
pub struct LeisureCentreTimetable {
    client: reqwest::Client,
    api_url: String,
    activity_id: String,
    location_id: String,
}

impl LeisureCentreTimetable {
    pub fn new(
        api_url: impl Into<String>,
        activity_id: impl Into<String>,
        location_id: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.into(),
            activity_id: activity_id.into(),
            location_id: location_id.into(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/{}", self.api_url.trim_end_matches('/'), TIMETABLE_ENDPOINT)
    }
}

#[async_trait]
impl Timetable for LeisureCentreTimetable {
    #[instrument(skip(self))]
    async fn get_sessions(
        &self,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Vec<TimetableSession>, TimetableError> {
        let response = self
            .client
            .post(self.endpoint())
            .json(&json!({
                "ResourceSubTypeIdList": self.activity_id,
                "FacilityLocationIdList": self.location_id,
                "DateFrom": from.format(API_DATETIME_FORMAT).to_string(),
                "DateTo": to.format(API_DATETIME_FORMAT).to_string(),
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(TimetableError::Status(response.status().as_u16()));
        }

        let sessions = response.json::<TimetableResponse>().await?.into_sessions();
        debug!(sessions = sessions.len(), "Fetched timetable");
        Ok(sessions)
    }
}
