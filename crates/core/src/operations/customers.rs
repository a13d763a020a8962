//! Patients: `/v1/customers`

use dentaloffice_domain::constants::ACTIVE_FILTER_BOTH;
use dentaloffice_domain::{Parameters, RequestDescriptor, Result};
use serde::Serialize;
use serde_json::Value;

use super::{encode_body, encode_query, FromParameters, Record};

const COLLECTION: &str = "/v1/customers";

/// Optional patient details shared by create and update.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CustomerDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    /// Sent whenever supplied: `0` is a valid value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_situation_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_specialty: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub addresses_attributes: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contacts_attributes: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documents_attributes: Option<Value>,
}

impl FromParameters for CustomerDetails {
    fn from_parameters(params: &Parameters) -> Result<Self> {
        Ok(Self {
            birth_date: params.optional_string("birthDate")?,
            gender: params.supplied_integer("gender")?,
            customer_situation_id: params.optional_integer("customerSituationId")?,
            customer_specialty: params.optional_integer("customerSpecialty")?,
            addresses_attributes: params.json_field("addressesAttributes")?,
            contacts_attributes: params.json_field("contactsAttributes")?,
            documents_attributes: params.json_field("documentsAttributes")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateCustomer {
    pub name: String,
    pub clinic_id: i64,
    #[serde(flatten)]
    pub details: CustomerDetails,
}

impl FromParameters for CreateCustomer {
    fn from_parameters(params: &Parameters) -> Result<Self> {
        Ok(Self {
            name: params.required_string("name")?,
            clinic_id: params.required_id("clinicId")?,
            details: CustomerDetails::from_parameters(params)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateCustomer {
    #[serde(skip)]
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clinic_id: Option<i64>,
    #[serde(flatten)]
    pub details: CustomerDetails,
}

impl FromParameters for UpdateCustomer {
    fn from_parameters(params: &Parameters) -> Result<Self> {
        Ok(Self {
            id: params.required_id("id")?,
            name: params.optional_string("name")?,
            clinic_id: params.optional_integer("clinicId")?,
            details: CustomerDetails::from_parameters(params)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListCustomers {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clinic_id: Option<i64>,
    /// `"true"` or `"false"`; `None` lists both.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub only_deleted: bool,
}

impl FromParameters for ListCustomers {
    fn from_parameters(params: &Parameters) -> Result<Self> {
        Ok(Self {
            q: params.optional_string("q")?,
            page: params.optional_integer("page")?,
            clinic_id: params.optional_integer("clinicId")?,
            active: active_filter(params)?,
            only_deleted: params.is_set("onlyDeleted")?,
        })
    }
}

/// Text or boolean `active` filter; `"both"` means no filter.
fn active_filter(params: &Parameters) -> Result<Option<String>> {
    if let Some(Value::Bool(active)) = params.get("active") {
        return Ok(Some(active.to_string()));
    }
    Ok(params.optional_string("active")?.filter(|value| value != ACTIVE_FILTER_BOTH))
}

pub fn create(params: &Parameters) -> Result<RequestDescriptor> {
    let command = CreateCustomer::from_parameters(params)?;
    Ok(RequestDescriptor::post(COLLECTION).with_body(encode_body(&command)?))
}

pub fn list(params: &Parameters) -> Result<RequestDescriptor> {
    let filters = ListCustomers::from_parameters(params)?;
    Ok(RequestDescriptor::get(COLLECTION).with_query(encode_query(&filters)?))
}

pub fn get(params: &Parameters) -> Result<RequestDescriptor> {
    let Record { id } = Record::from_parameters(params)?;
    Ok(RequestDescriptor::get(format!("{COLLECTION}/{id}")))
}

pub fn update(params: &Parameters) -> Result<RequestDescriptor> {
    let command = UpdateCustomer::from_parameters(params)?;
    Ok(RequestDescriptor::put(format!("{COLLECTION}/{}", command.id))
        .with_body(encode_body(&command)?))
}

pub fn delete(params: &Parameters) -> Result<RequestDescriptor> {
    let Record { id } = Record::from_parameters(params)?;
    Ok(RequestDescriptor::delete(format!("{COLLECTION}/{id}")))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn params(value: Value) -> Parameters {
        Parameters::from_value(value).unwrap()
    }

    #[test]
    fn create_keeps_gender_zero() {
        let request = create(&params(json!({
            "name": "Carlos",
            "clinicId": 2,
            "gender": 0,
            "customerSituationId": 0,
            "documentsAttributes": {"cpf": "000.000.000-00"}
        })))
        .unwrap();

        assert_eq!(
            Value::Object(request.body.unwrap()),
            json!({
                "name": "Carlos",
                "clinic_id": 2,
                "gender": 0,
                "documents_attributes": {"cpf": "000.000.000-00"}
            })
        );
    }

    #[test]
    fn create_requires_clinic() {
        let err = create(&params(json!({"name": "Carlos"}))).unwrap_err();
        assert_eq!(err.field(), Some("clinicId"));
    }

    #[test]
    fn update_treats_every_field_as_optional() {
        let request = update(&params(json!({"id": 8, "customerSpecialty": "5"}))).unwrap();

        assert_eq!(request.endpoint(), "PUT /v1/customers/8");
        assert_eq!(Value::Object(request.body.unwrap()), json!({"customer_specialty": 5}));
    }

    #[test]
    fn list_drops_active_when_both() {
        let both = list(&params(json!({"active": "both", "clinicId": 4}))).unwrap();
        assert_eq!(both.query_value("active"), None);
        assert_eq!(both.query_value("clinic_id"), Some("4"));

        let inactive = list(&params(json!({"active": "false"}))).unwrap();
        assert_eq!(inactive.query_value("active"), Some("false"));
    }

    #[test]
    fn list_accepts_boolean_active() {
        let active = list(&params(json!({"active": true}))).unwrap();
        assert_eq!(active.query_value("active"), Some("true"));

        let inactive = list(&params(json!({"active": false}))).unwrap();
        assert_eq!(inactive.query_value("active"), Some("false"));
    }
}
