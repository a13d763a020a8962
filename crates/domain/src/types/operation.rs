//! Resource and operation identifiers

use std::fmt;

use serde::{Deserialize, Serialize};

/// Entity type exposed by the Dental Office API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Resource {
    User,
    Dentist,
    Customer,
    Schedule,
    Chair,
}

impl Resource {
    pub const ALL: [Self; 5] = [Self::User, Self::Dentist, Self::Customer, Self::Schedule, Self::Chair];

    /// Host-facing name, e.g. `"customer"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Dentist => "dentist",
            Self::Customer => "customer",
            Self::Schedule => "schedule",
            Self::Chair => "chair",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|resource| resource.as_str() == name)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Action performed on a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operation {
    Create,
    List,
    Get,
    Update,
    Delete,
    /// Free slots of a dentist at a clinic (schedules only).
    GetAvailableHours,
}

impl Operation {
    pub const ALL: [Self; 6] = [
        Self::Create,
        Self::List,
        Self::Get,
        Self::Update,
        Self::Delete,
        Self::GetAvailableHours,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::List => "list",
            Self::Get => "get",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::GetAvailableHours => "getAvailableHours",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|operation| operation.as_str() == name)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
