//! Treatment chairs: `/v1/clinics/{clinic_id}/chairs`

use dentaloffice_domain::{Parameters, RequestDescriptor, Result};
use serde::Serialize;

use super::{clinic_path, encode_body, ClinicRecord, FromParameters};

const COLLECTION: &str = "chairs";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateChair {
    #[serde(skip)]
    pub clinic_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl FromParameters for CreateChair {
    fn from_parameters(params: &Parameters) -> Result<Self> {
        Ok(Self {
            clinic_id: params.required_id("clinicId")?,
            name: params.optional_string("name")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateChair {
    #[serde(skip)]
    pub clinic_id: i64,
    #[serde(skip)]
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl FromParameters for UpdateChair {
    fn from_parameters(params: &Parameters) -> Result<Self> {
        let ClinicRecord { clinic_id, id } = ClinicRecord::from_parameters(params)?;
        Ok(Self { clinic_id, id, name: params.optional_string("name")? })
    }
}

fn record_path(clinic_id: i64, id: i64) -> String {
    format!("{}/{id}", clinic_path(clinic_id, COLLECTION))
}

pub fn create(params: &Parameters) -> Result<RequestDescriptor> {
    let command = CreateChair::from_parameters(params)?;
    Ok(RequestDescriptor::post(clinic_path(command.clinic_id, COLLECTION))
        .with_body(encode_body(&command)?))
}

pub fn list(params: &Parameters) -> Result<RequestDescriptor> {
    let clinic_id = params.required_id("clinicId")?;
    Ok(RequestDescriptor::get(clinic_path(clinic_id, COLLECTION)))
}

pub fn get(params: &Parameters) -> Result<RequestDescriptor> {
    let ClinicRecord { clinic_id, id } = ClinicRecord::from_parameters(params)?;
    Ok(RequestDescriptor::get(record_path(clinic_id, id)))
}

pub fn update(params: &Parameters) -> Result<RequestDescriptor> {
    let command = UpdateChair::from_parameters(params)?;
    Ok(RequestDescriptor::put(record_path(command.clinic_id, command.id))
        .with_body(encode_body(&command)?))
}

pub fn delete(params: &Parameters) -> Result<RequestDescriptor> {
    let ClinicRecord { clinic_id, id } = ClinicRecord::from_parameters(params)?;
    Ok(RequestDescriptor::delete(record_path(clinic_id, id)))
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;

    #[test]
    fn create_nests_under_clinic() {
        let params = Parameters::new().with("clinicId", 3).with("name", "Sala 2");
        let request = create(&params).unwrap();

        assert_eq!(request.endpoint(), "POST /v1/clinics/3/chairs");
        assert_eq!(Value::Object(request.body.unwrap()), json!({"name": "Sala 2"}));
    }

    #[test]
    fn list_has_no_query() {
        let request = list(&Parameters::new().with("clinicId", 3)).unwrap();

        assert_eq!(request.endpoint(), "GET /v1/clinics/3/chairs");
        assert!(request.query.is_empty());
        assert!(request.body.is_none());
    }

    #[test]
    fn update_and_delete_address_the_chair() {
        let params = Parameters::new().with("clinicId", 3).with("id", 6).with("name", "");

        let request = update(&params).unwrap();
        assert_eq!(request.endpoint(), "PUT /v1/clinics/3/chairs/6");
        assert!(request.body.is_none());

        assert_eq!(delete(&params).unwrap().endpoint(), "DELETE /v1/clinics/3/chairs/6");
        assert_eq!(get(&params).unwrap().endpoint(), "GET /v1/clinics/3/chairs/6");
    }
}
