use serde::{Deserialize, Serialize};

/// Contact and account details accepted by `MyApexRestService`, which
/// creates both records in one transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContactAccount {
    pub first_name: String,
    pub last_name: String,
    /// Account name.
    pub company: String,
    pub street: String,
    pub city: String,
    pub state: String,
}

/// Body of `POST /services/apexrest/MyApexRestService`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApexContactRequest {
    pub request: NewContactAccount,
}

/// One person in a batch sent to the `v1/service` Apex endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactLead {
    pub first_name: String,
    pub last_name: String,
    pub company: String,
}

/// Body of `POST /services/apexrest/v1/service/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApexBatchRequest {
    pub requests: Vec<ContactLead>,
}
