//! Appointments: `/v1/clinics/{clinic_id}/schedules`, `/v1/schedules` and
//! dentist availability.

use dentaloffice_domain::constants::DEFAULT_AVAILABLE_HOURS_DAYS;
use dentaloffice_domain::{Parameters, RequestDescriptor, Result};
use serde::Serialize;

use super::{clinic_path, encode_body, encode_query, ClinicRecord, FromParameters};

const COLLECTION: &str = "schedules";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateSchedule {
    #[serde(skip)]
    pub clinic_id: i64,
    pub chair_id: i64,
    /// ISO-8601 start timestamp, passed through untouched.
    pub schedule_start: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dentist_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dentist_ids: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<i64>,
    /// Always sent, defaulting to `false`.
    pub personal: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule_situation_id: Option<i64>,
}

impl FromParameters for CreateSchedule {
    fn from_parameters(params: &Parameters) -> Result<Self> {
        Ok(Self {
            clinic_id: params.required_id("clinicId")?,
            chair_id: params.required_id("chairId")?,
            schedule_start: params.required_string("scheduleStart")?,
            dentist_id: params.optional_integer("dentistId")?,
            dentist_ids: params.id_list("dentistIds")?,
            customer_id: params.optional_integer("customerId")?,
            personal: params.is_set("personal")?,
            description: params.optional_string("description")?,
            schedule_situation_id: params.optional_integer("scheduleSituationId")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateSchedule {
    #[serde(skip)]
    pub clinic_id: i64,
    #[serde(skip)]
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chair_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dentist_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dentist_ids: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule_start: Option<String>,
    /// Sent whenever supplied, including `false`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personal: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule_situation_id: Option<i64>,
}

impl FromParameters for UpdateSchedule {
    fn from_parameters(params: &Parameters) -> Result<Self> {
        let ClinicRecord { clinic_id, id } = ClinicRecord::from_parameters(params)?;
        Ok(Self {
            clinic_id,
            id,
            chair_id: params.optional_integer("chairId")?,
            dentist_id: params.optional_integer("dentistId")?,
            dentist_ids: params.id_list("dentistIds")?,
            customer_id: params.optional_integer("customerId")?,
            schedule_start: params.optional_string("scheduleStart")?,
            personal: params.flag("personal")?,
            description: params.optional_string("description")?,
            schedule_situation_id: params.optional_integer("scheduleSituationId")?,
        })
    }
}

/// Cross-clinic listing filters for `GET /v1/schedules`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListSchedules {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dentist_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chair_id: Option<i64>,
}

impl FromParameters for ListSchedules {
    fn from_parameters(params: &Parameters) -> Result<Self> {
        Ok(Self {
            start: params.optional_string("start")?,
            end: params.optional_string("end")?,
            dentist_id: params.optional_integer("dentistId")?,
            chair_id: params.optional_integer("chairId")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailableHours {
    #[serde(skip)]
    pub clinic_id: i64,
    #[serde(skip)]
    pub dentist_id: i64,
    /// Look-ahead window in days. Absent means the default window; an
    /// explicit zero leaves the window to the server.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<i64>,
}

impl FromParameters for AvailableHours {
    fn from_parameters(params: &Parameters) -> Result<Self> {
        let next = match params.supplied_integer("next")? {
            None => Some(DEFAULT_AVAILABLE_HOURS_DAYS),
            Some(0) => None,
            Some(days) => Some(days),
        };
        Ok(Self {
            clinic_id: params.required_id("clinicId")?,
            dentist_id: params.required_id("dentistId")?,
            next,
        })
    }
}

fn record_path(clinic_id: i64, id: i64) -> String {
    format!("{}/{id}", clinic_path(clinic_id, COLLECTION))
}

pub fn create(params: &Parameters) -> Result<RequestDescriptor> {
    let command = CreateSchedule::from_parameters(params)?;
    Ok(RequestDescriptor::post(clinic_path(command.clinic_id, COLLECTION))
        .with_body(encode_body(&command)?))
}

pub fn list(params: &Parameters) -> Result<RequestDescriptor> {
    let filters = ListSchedules::from_parameters(params)?;
    Ok(RequestDescriptor::get("/v1/schedules").with_query(encode_query(&filters)?))
}

pub fn get(params: &Parameters) -> Result<RequestDescriptor> {
    let ClinicRecord { clinic_id, id } = ClinicRecord::from_parameters(params)?;
    Ok(RequestDescriptor::get(record_path(clinic_id, id)))
}

pub fn update(params: &Parameters) -> Result<RequestDescriptor> {
    let command = UpdateSchedule::from_parameters(params)?;
    Ok(RequestDescriptor::put(record_path(command.clinic_id, command.id))
        .with_body(encode_body(&command)?))
}

pub fn delete(params: &Parameters) -> Result<RequestDescriptor> {
    let ClinicRecord { clinic_id, id } = ClinicRecord::from_parameters(params)?;
    Ok(RequestDescriptor::delete(record_path(clinic_id, id)))
}

pub fn available_hours(params: &Parameters) -> Result<RequestDescriptor> {
    let query = AvailableHours::from_parameters(params)?;
    let path = format!(
        "{}/{}/available_hours",
        clinic_path(query.clinic_id, "dentists"),
        query.dentist_id
    );
    Ok(RequestDescriptor::get(path).with_query(encode_query(&query)?))
}
