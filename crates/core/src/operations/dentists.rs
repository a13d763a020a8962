//! Dentists: `/v1/dentists`

use dentaloffice_domain::{Parameters, RequestDescriptor, Result};
use serde::Serialize;
use serde_json::Value;

use super::{encode_body, encode_query, FromParameters, Record};

const COLLECTION: &str = "/v1/dentists";

/// Profile fields accepted by both create and update. All optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DentistProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpf: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    /// Professional council type, e.g. `CRO`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cr_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cr_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cr_uf: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub addresses_attributes: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contacts_attributes: Option<Value>,
}

impl FromParameters for DentistProfile {
    fn from_parameters(params: &Parameters) -> Result<Self> {
        Ok(Self {
            name: params.optional_string("name")?,
            cpf: params.optional_string("cpf")?,
            rg: params.optional_string("rg")?,
            birth_date: params.optional_string("birthDate")?,
            cr_type: params.optional_string("crType")?,
            cr_number: params.optional_string("crNumber")?,
            cr_uf: params.optional_string("crUf")?,
            addresses_attributes: params.json_field("addressesAttributes")?,
            contacts_attributes: params.json_field("contactsAttributes")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateDentist {
    #[serde(skip)]
    pub id: i64,
    #[serde(flatten)]
    pub profile: DentistProfile,
}

impl FromParameters for UpdateDentist {
    fn from_parameters(params: &Parameters) -> Result<Self> {
        Ok(Self {
            id: params.required_id("id")?,
            profile: DentistProfile::from_parameters(params)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListDentists {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clinic_id: Option<i64>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub only_deleted: bool,
}

impl FromParameters for ListDentists {
    fn from_parameters(params: &Parameters) -> Result<Self> {
        Ok(Self {
            q: params.optional_string("q")?,
            page: params.optional_integer("page")?,
            clinic_id: params.optional_integer("clinicId")?,
            only_deleted: params.is_set("onlyDeleted")?,
        })
    }
}

pub fn create(params: &Parameters) -> Result<RequestDescriptor> {
    let profile = DentistProfile::from_parameters(params)?;
    Ok(RequestDescriptor::post(COLLECTION).with_body(encode_body(&profile)?))
}

pub fn list(params: &Parameters) -> Result<RequestDescriptor> {
    let filters = ListDentists::from_parameters(params)?;
    Ok(RequestDescriptor::get(COLLECTION).with_query(encode_query(&filters)?))
}

pub fn get(params: &Parameters) -> Result<RequestDescriptor> {
    let Record { id } = Record::from_parameters(params)?;
    Ok(RequestDescriptor::get(format!("{COLLECTION}/{id}")))
}

pub fn update(params: &Parameters) -> Result<RequestDescriptor> {
    let command = UpdateDentist::from_parameters(params)?;
    Ok(RequestDescriptor::put(format!("{COLLECTION}/{}", command.id))
        .with_body(encode_body(&command)?))
}

pub fn delete(params: &Parameters) -> Result<RequestDescriptor> {
    let Record { id } = Record::from_parameters(params)?;
    Ok(RequestDescriptor::delete(format!("{COLLECTION}/{id}")))
}
