use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::sobject::Record;
use crate::constants::MAX_COMPOSITE_SUBREQUESTS;
use crate::error::DemoError;
use crate::ids::{referenced_ids, ReferenceId};

/// HTTP method of a composite subrequest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
}

/// One operation inside a composite request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositeSubrequest {
    pub method: Method,
    pub url: String,
    pub reference_id: ReferenceId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

impl CompositeSubrequest {
    pub fn post(url: impl Into<String>, reference_id: ReferenceId, body: Record) -> Self {
        Self {
            method: Method::Post,
            url: url.into(),
            reference_id,
            body: Some(body.into_value()),
        }
    }

    pub fn get(url: impl Into<String>, reference_id: ReferenceId) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            reference_id,
            body: None,
        }
    }
}

/// Body of `POST /services/data/vXX.X/composite`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositeRequest {
    pub all_or_none: bool,
    pub composite_request: Vec<CompositeSubrequest>,
}

impl CompositeRequest {
    /// An all-or-none request: any failing subrequest rolls back the rest.
    pub fn all_or_none(subrequests: Vec<CompositeSubrequest>) -> Self {
        Self {
            all_or_none: true,
            composite_request: subrequests,
        }
    }

    /// Check the request against the platform's documented limits before
    /// sending it.
    ///
    /// Every `@{Ref…}` expression must name a subrequest that appears
    /// earlier in the list, since the platform evaluates them in order.
    pub fn validate(&self) -> Result<(), DemoError> {
        if self.composite_request.is_empty() {
            return Err(DemoError::Validation(
                "composite request has no subrequests".into(),
            ));
        }
        if self.composite_request.len() > MAX_COMPOSITE_SUBREQUESTS {
            return Err(DemoError::Validation(format!(
                "composite request has {} subrequests, limit is {MAX_COMPOSITE_SUBREQUESTS}",
                self.composite_request.len()
            )));
        }

        let mut seen: HashSet<&str> = HashSet::new();
        for sub in &self.composite_request {
            let body = match &sub.body {
                Some(body) => serde_json::to_string(body)?,
                None => String::new(),
            };
            for used in referenced_ids(&sub.url)
                .into_iter()
                .chain(referenced_ids(&body))
            {
                if !seen.contains(used) {
                    return Err(DemoError::Validation(format!(
                        "subrequest {} references {used} before it is defined",
                        sub.reference_id
                    )));
                }
            }
            if !seen.insert(sub.reference_id.as_str()) {
                return Err(DemoError::Validation(format!(
                    "duplicate reference id {}",
                    sub.reference_id
                )));
            }
        }
        Ok(())
    }
}

/// Result of one subrequest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositeSubresponse {
    #[serde(default)]
    pub body: Value,
    #[serde(default)]
    pub http_headers: Value,
    pub http_status_code: u16,
    pub reference_id: String,
}

/// Response of the composite resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositeResponse {
    pub composite_response: Vec<CompositeSubresponse>,
}

impl CompositeResponse {
    /// True when every subrequest answered with a 2xx status.
    pub fn all_succeeded(&self) -> bool {
        self.composite_response
            .iter()
            .all(|r| (200..300).contains(&r.http_status_code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::reference;
    use serde_json::json;

    fn rid(s: &str) -> ReferenceId {
        ReferenceId::new(s).unwrap()
    }

    fn account_then_contact() -> CompositeRequest {
        let acct = rid("GearsAccount");
        CompositeRequest::all_or_none(vec![
            CompositeSubrequest::post(
                "/services/data/v40.0/sobjects/Account",
                acct.clone(),
                Record::new().field("Name", "GearsCRM"),
            ),
            CompositeSubrequest::post(
                "/services/data/v40.0/sobjects/Contact",
                rid("GearsContact"),
                Record::new()
                    .field("AccountId", reference(&acct, "id"))
                    .field("LastName", "Radenberg"),
            ),
        ])
    }

    #[test]
    fn serializes_in_camel_case() {
        let json = serde_json::to_value(account_then_contact()).unwrap();
        assert_eq!(json["allOrNone"], true);
        assert_eq!(json["compositeRequest"][0]["method"], "POST");
        assert_eq!(json["compositeRequest"][0]["referenceId"], "GearsAccount");
        assert_eq!(
            json["compositeRequest"][1]["body"]["AccountId"],
            "@{GearsAccount.id}"
        );
    }

    #[test]
    fn get_subrequest_omits_body() {
        let sub = CompositeSubrequest::get("/services/data/v40.0/query/?q=x", rid("Q"));
        let json = serde_json::to_value(sub).unwrap();
        assert_eq!(json["method"], "GET");
        assert!(json.get("body").is_none());
    }

    #[test]
    fn validate_accepts_backward_references() {
        assert!(account_then_contact().validate().is_ok());
    }

    #[test]
    fn validate_rejects_forward_reference() {
        let mut req = account_then_contact();
        req.composite_request.reverse();
        let err = req.validate().unwrap_err();
        assert!(err.to_string().contains("GearsAccount"));
    }

    #[test]
    fn validate_rejects_reference_in_url_to_unknown_id() {
        let req = CompositeRequest::all_or_none(vec![CompositeSubrequest::get(
            "/services/data/v40.0/sobjects/Account/@{Missing.id}",
            rid("Lookup"),
        )]);
        assert!(matches!(req.validate(), Err(DemoError::Validation(_))));
    }

    #[test]
    fn validate_rejects_duplicate_reference_ids() {
        let req = CompositeRequest::all_or_none(vec![
            CompositeSubrequest::post("/a", rid("Same"), Record::new()),
            CompositeSubrequest::post("/b", rid("Same"), Record::new()),
        ]);
        let err = req.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn validate_rejects_empty_and_oversized() {
        assert!(CompositeRequest::all_or_none(vec![]).validate().is_err());
        let subs = (0..=MAX_COMPOSITE_SUBREQUESTS)
            .map(|i| CompositeSubrequest::post("/a", rid(&format!("R{i}")), Record::new()))
            .collect();
        assert!(CompositeRequest::all_or_none(subs).validate().is_err());
    }

    #[test]
    fn response_reports_failed_subrequest() {
        let resp: CompositeResponse = serde_json::from_value(json!({
            "compositeResponse": [
                {"body": {"id": "001D000000IqhSLIAZ", "success": true, "errors": []},
                 "httpHeaders": {}, "httpStatusCode": 201, "referenceId": "GearsAccount"},
                {"body": [{"errorCode": "PROCESSING_HALTED", "message": "rolled back"}],
                 "httpHeaders": {}, "httpStatusCode": 400, "referenceId": "GearsContact"}
            ]
        }))
        .unwrap();
        assert!(!resp.all_succeeded());
        assert_eq!(resp.composite_response[1].reference_id, "GearsContact");
    }
}
