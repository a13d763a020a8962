//! Option catalogs exposed by the Dental Office API
//!
//! The API takes these as plain integers. The labels exist so hosts can
//! present a human-readable choice; values are never translated.

/// A single `(value, label)` option.
pub type CatalogEntry = (i64, &'static str);

pub const USER_GROUPS: &[CatalogEntry] = &[(1, "Administrator"), (2, "Attendant"), (3, "Dentist")];

pub const GENDERS: &[CatalogEntry] = &[(0, "Male"), (1, "Female")];

pub const CUSTOMER_SITUATIONS: &[CatalogEntry] = &[
    (1, "First visit"),
    (2, "In treatment"),
    (3, "Treatment finished"),
    (4, "Discharged"),
    (7, "Abandoned"),
];

pub const CUSTOMER_SPECIALTIES: &[CatalogEntry] = &[
    (2, "Surgery"),
    (4, "Endodontics"),
    (5, "Orthodontics"),
    (6, "Periodontics"),
    (7, "Prosthodontics"),
    (8, "Implantology"),
];

pub const SCHEDULE_SITUATIONS: &[CatalogEntry] = &[
    (1, "To confirm"),
    (2, "Confirmed"),
    (3, "In service"),
    (4, "Attended"),
    (5, "No-show"),
    (6, "Cancelled"),
];

/// Every catalog, keyed by the parameter name it applies to.
pub const ALL: &[(&str, &[CatalogEntry])] = &[
    ("userGroupId", USER_GROUPS),
    ("gender", GENDERS),
    ("customerSituationId", CUSTOMER_SITUATIONS),
    ("customerSpecialty", CUSTOMER_SPECIALTIES),
    ("scheduleSituationId", SCHEDULE_SITUATIONS),
];
