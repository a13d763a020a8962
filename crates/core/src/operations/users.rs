//! User accounts: `/v1/users`

use std::fmt;

use dentaloffice_domain::{Parameters, RequestDescriptor, Result};
use serde::Serialize;
use serde_json::Value;

use super::{encode_body, encode_query, FromParameters, Record};

const COLLECTION: &str = "/v1/users";

#[derive(Clone, PartialEq, Serialize)]
pub struct CreateUser {
    pub email: String,
    pub password: String,
    pub name: String,
    pub user_group_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clinic_ids: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub addresses_attributes: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contacts_attributes: Option<Value>,
}

impl FromParameters for CreateUser {
    fn from_parameters(params: &Parameters) -> Result<Self> {
        Ok(Self {
            email: params.required_string("email")?,
            password: params.required_string("password")?,
            name: params.required_string("name")?,
            user_group_id: params.required_id("userGroupId")?,
            clinic_ids: params.id_list("clinicIds")?,
            addresses_attributes: params.json_field("addressesAttributes")?,
            contacts_attributes: params.json_field("contactsAttributes")?,
        })
    }
}

impl fmt::Debug for CreateUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateUser")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .field("user_group_id", &self.user_group_id)
            .field("clinic_ids", &self.clinic_ids)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListUsers {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_group: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
}

impl FromParameters for ListUsers {
    fn from_parameters(params: &Parameters) -> Result<Self> {
        Ok(Self {
            q: params.optional_string("q")?,
            user_group: params.optional_integer("userGroup")?,
            page: params.optional_integer("page")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateUser {
    #[serde(skip)]
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_group_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clinic_ids: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contacts_attributes: Option<Value>,
}

impl FromParameters for UpdateUser {
    fn from_parameters(params: &Parameters) -> Result<Self> {
        Ok(Self {
            id: params.required_id("id")?,
            name: params.optional_string("name")?,
            email: params.optional_string("email")?,
            user_group_id: params.optional_integer("userGroupId")?,
            clinic_ids: params.id_list("clinicIds")?,
            contacts_attributes: params.json_field("contactsAttributes")?,
        })
    }
}

pub fn create(params: &Parameters) -> Result<RequestDescriptor> {
    let command = CreateUser::from_parameters(params)?;
    Ok(RequestDescriptor::post(COLLECTION).with_body(encode_body(&command)?))
}

pub fn list(params: &Parameters) -> Result<RequestDescriptor> {
    let filters = ListUsers::from_parameters(params)?;
    Ok(RequestDescriptor::get(COLLECTION).with_query(encode_query(&filters)?))
}

pub fn get(params: &Parameters) -> Result<RequestDescriptor> {
    let Record { id } = Record::from_parameters(params)?;
    Ok(RequestDescriptor::get(format!("{COLLECTION}/{id}")))
}

pub fn update(params: &Parameters) -> Result<RequestDescriptor> {
    let command = UpdateUser::from_parameters(params)?;
    Ok(RequestDescriptor::put(format!("{COLLECTION}/{}", command.id))
        .with_body(encode_body(&command)?))
}

pub fn delete(params: &Parameters) -> Result<RequestDescriptor> {
    let Record { id } = Record::from_parameters(params)?;
    Ok(RequestDescriptor::delete(format!("{COLLECTION}/{id}")))
}

#[cfg(test)]
mod tests {
    use dentaloffice_domain::{DentalOfficeError, HttpMethod};
    use serde_json::json;

    use super::*;

    fn params(value: Value) -> Parameters {
        Parameters::from_value(value).unwrap()
    }

    #[test]
    fn create_sends_required_fields_and_parsed_lists() {
        let request = create(&params(json!({
            "email": "ana@clinic.example",
            "password": "pw",
            "name": "Ana",
            "userGroupId": 2,
            "clinicIds": "1, 2,3",
            "contactsAttributes": "[{\"kind\":\"phone\",\"value\":\"555\"}]"
        })))
        .unwrap();

        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.path, "/v1/users");
        assert_eq!(
            Value::Object(request.body.unwrap()),
            json!({
                "email": "ana@clinic.example",
                "password": "pw",
                "name": "Ana",
                "user_group_id": 2,
                "clinic_ids": [1, 2, 3],
                "contacts_attributes": [{"kind": "phone", "value": "555"}]
            })
        );
    }

    #[test]
    fn create_rejects_malformed_addresses_before_any_request() {
        let err = create(&params(json!({
            "email": "ana@clinic.example",
            "password": "pw",
            "name": "Ana",
            "userGroupId": 1,
            "addressesAttributes": "{invalid"
        })))
        .unwrap_err();

        assert!(matches!(err, DentalOfficeError::Validation { .. }));
        assert_eq!(err.field(), Some("addressesAttributes"));
    }

    #[test]
    fn create_reports_missing_required_parameter() {
        let err = create(&params(json!({"email": "a@b.c", "name": "Ana", "userGroupId": 1})))
            .unwrap_err();

        assert_eq!(err.to_string(), "missing required parameter `password`");
    }

    #[test]
    fn update_with_only_name_sends_only_name() {
        let request = update(&params(json!({"id": 7, "name": "Bia", "email": ""}))).unwrap();

        assert_eq!(request.endpoint(), "PUT /v1/users/7");
        assert_eq!(Value::Object(request.body.unwrap()), json!({"name": "Bia"}));
    }

    #[test]
    fn list_omits_unset_filters() {
        let request = list(&params(json!({"q": "ana", "userGroup": 0}))).unwrap();

        assert_eq!(request.query, vec![("q".to_string(), "ana".to_string())]);
        assert!(request.body.is_none());
    }

    #[test]
    fn get_and_delete_address_the_record() {
        let item = params(json!({"id": "41"}));

        assert_eq!(get(&item).unwrap().endpoint(), "GET /v1/users/41");
        assert_eq!(delete(&item).unwrap().endpoint(), "DELETE /v1/users/41");
    }

    #[test]
    fn debug_redacts_password() {
        let command = CreateUser::from_parameters(&params(json!({
            "email": "a@b.c", "password": "hunter2", "name": "A", "userGroupId": 1
        })))
        .unwrap();

        assert!(!format!("{command:?}").contains("hunter2"));
    }
}
