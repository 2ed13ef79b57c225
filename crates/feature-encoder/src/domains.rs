//! Training-Time Categorical Domains
//!
//! Ordered value lists fixed by the classifier's training schema. Both the
//! block order and the value order inside each block are part of the
//! contract with the model artifact; changing either silently corrupts
//! every prediction.

/// A categorical attribute and its ordered set of admissible values
#[derive(Debug, Clone, Copy)]
pub struct Domain {
    /// Attribute name as it appears in the training schema
    pub attribute: &'static str,
    /// Admissible values, in one-hot index order
    pub values: &'static [&'static str],
}

impl Domain {
    /// Number of one-hot slots this attribute occupies
    pub fn cardinality(&self) -> usize {
        self.values.len()
    }

    /// One-hot index of `value`, or `None` if it is not in the domain
    pub fn index_of(&self, value: &str) -> Option<usize> {
        self.values.iter().position(|v| *v == value)
    }
}

/// Internet add-on services share one domain
const INTERNET_ADDON: &[&str] = &["No", "No internet service", "Yes"];

pub const GENDER: Domain = Domain {
    attribute: "Gender",
    values: &["Female", "Male"],
};

pub const PARTNER: Domain = Domain {
    attribute: "Partner",
    values: &["No", "Yes"],
};

pub const DEPENDENTS: Domain = Domain {
    attribute: "Dependents",
    values: &["No", "Yes"],
};

pub const PHONE_SERVICE: Domain = Domain {
    attribute: "PhoneService",
    values: &["No", "Yes"],
};

pub const MULTIPLE_LINES: Domain = Domain {
    attribute: "MultipleLines",
    values: &["No", "No phone service", "Yes"],
};

pub const INTERNET_SERVICE: Domain = Domain {
    attribute: "InternetService",
    values: &["DSL", "Fiber optic", "No"],
};

pub const ONLINE_SECURITY: Domain = Domain {
    attribute: "OnlineSecurity",
    values: INTERNET_ADDON,
};

pub const ONLINE_BACKUP: Domain = Domain {
    attribute: "OnlineBackup",
    values: INTERNET_ADDON,
};

pub const DEVICE_PROTECTION: Domain = Domain {
    attribute: "DeviceProtection",
    values: INTERNET_ADDON,
};

pub const TECH_SUPPORT: Domain = Domain {
    attribute: "TechSupport",
    values: INTERNET_ADDON,
};

pub const STREAMING_TV: Domain = Domain {
    attribute: "StreamingTV",
    values: INTERNET_ADDON,
};

pub const STREAMING_MOVIES: Domain = Domain {
    attribute: "StreamingMovies",
    values: INTERNET_ADDON,
};

pub const CONTRACT: Domain = Domain {
    attribute: "Contract",
    values: &["Month-to-month", "One year", "Two year"],
};

pub const PAPERLESS_BILLING: Domain = Domain {
    attribute: "PaperlessBilling",
    values: &["No", "Yes"],
};

pub const PAYMENT_METHOD: Domain = Domain {
    attribute: "PaymentMethod",
    values: &[
        "Bank transfer (automatic)",
        "Credit card (automatic)",
        "Electronic check",
        "Mailed check",
    ],
};

pub const TENURE_GROUP: Domain = Domain {
    attribute: "TenureGroup",
    values: &["1 - 12", "13 - 24", "25 - 36", "37 - 48", "49 - 60", "61 - 72"],
};

/// One-hot blocks in vector order, after the three numeric features
pub const CATEGORICAL_SCHEMA: [&Domain; 16] = [
    &GENDER,
    &PARTNER,
    &DEPENDENTS,
    &PHONE_SERVICE,
    &MULTIPLE_LINES,
    &INTERNET_SERVICE,
    &ONLINE_SECURITY,
    &ONLINE_BACKUP,
    &DEVICE_PROTECTION,
    &TECH_SUPPORT,
    &STREAMING_TV,
    &STREAMING_MOVIES,
    &CONTRACT,
    &PAPERLESS_BILLING,
    &PAYMENT_METHOD,
    &TENURE_GROUP,
];

/// Total width of the one-hot section
pub fn one_hot_width() -> usize {
    CATEGORICAL_SCHEMA.iter().map(|d| d.cardinality()).sum()
}
