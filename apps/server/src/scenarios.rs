//! Fixed demo payloads, one per route.
//!
//! Every value here is a literal: nothing comes from the incoming request.

use chrono::NaiveDate;
use multidml_shared::api::apex::{ApexBatchRequest, ApexContactRequest, ContactLead, NewContactAccount};
use multidml_shared::api::composite::{CompositeRequest, CompositeSubrequest};
use multidml_shared::api::query::query_url;
use multidml_shared::api::sobject::Record;
use multidml_shared::api::tree::{TreeRecord, TreeRequest};
use multidml_shared::error::DemoError;
use multidml_shared::ids::{reference, RecordId, ReferenceId};

/// Apex REST path of the single contact-and-account service.
pub const APEX_CONTACT_PATH: &str = "/MyApexRestService";
/// Apex REST path of the batch service.
pub const APEX_BATCH_PATH: &str = "/v1/service/";
/// Root sObject type of the tree demo.
pub const TREE_ROOT: &str = "Account";

/// The demo pages, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    Home,
    Traditional,
    Apex,
    ApexBatch,
    Composite1,
    Composite2,
    Composite3,
    Tree,
}

impl Scenario {
    pub const ALL: [Scenario; 8] = [
        Scenario::Home,
        Scenario::Traditional,
        Scenario::Apex,
        Scenario::ApexBatch,
        Scenario::Composite1,
        Scenario::Composite2,
        Scenario::Composite3,
        Scenario::Tree,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Scenario::Home => "/",
            Scenario::Traditional => "/api/traditional",
            Scenario::Apex => "/api/apex",
            Scenario::ApexBatch => "/api/apex-batch",
            Scenario::Composite1 => "/api/composite1",
            Scenario::Composite2 => "/api/composite2",
            Scenario::Composite3 => "/api/composite3",
            Scenario::Tree => "/api/tree",
        }
    }

    /// Tab label.
    pub fn label(self) -> &'static str {
        match self {
            Scenario::Home => "Home",
            Scenario::Traditional => "Traditional",
            Scenario::Apex => "Apex REST",
            Scenario::ApexBatch => "Apex Batch",
            Scenario::Composite1 => "Composite 1",
            Scenario::Composite2 => "Composite 2",
            Scenario::Composite3 => "Composite 3",
            Scenario::Tree => "Tree",
        }
    }

    /// Short explanation shown above the response.
    pub fn description(self) -> &'static str {
        match self {
            Scenario::Home => {
                "Compare ways of creating several related records with the REST API. \
                 Pick a tab to send its request and see the raw response."
            }
            Scenario::Traditional => {
                "Creates an account, then a contact at that account, with one API call each. \
                 Every call is its own transaction: a failure on the second call cannot undo the first."
            }
            Scenario::Apex => {
                "One call to a custom Apex REST service that creates an account and a contact. \
                 The service rolls back everything if any step fails."
            }
            Scenario::ApexBatch => {
                "One call to a custom Apex REST service with a batch of people to create."
            }
            Scenario::Composite1 => {
                "Creates an account and a contact in one composite request. \
                 The contact references the account through its reference id."
            }
            Scenario::Composite2 => {
                "Queries for an existing account, then creates a contact at it, in one composite request."
            }
            Scenario::Composite3 => {
                "Creates an account, contact and opportunity, then makes the contact the \
                 opportunity's primary contact role, in one all-or-none composite request."
            }
            Scenario::Tree => {
                "Creates an account with nested contacts and an opportunity in one SObject Tree request. \
                 The platform inserts the tree level by level."
            }
        }
    }
}

fn rid(value: &str) -> Result<ReferenceId, DemoError> {
    ReferenceId::new(value)
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Traditional
// ---------------------------------------------------------------------------

pub fn traditional_account() -> Record {
    Record::new()
        .field("Name", "Midwest Dreamin")
        .field("BillingStreet", "17 E Monroe St")
        .field("BillingCity", "Chicago")
        .field("BillingState", "Illinois")
        .field("BillingPostalCode", "60603")
}

pub fn traditional_contact(account_id: &RecordId) -> Record {
    Record::new()
        .field("AccountId", account_id.as_str())
        .field("FirstName", "Eric")
        .field("LastName", "Dreshfield")
}

// ---------------------------------------------------------------------------
// Apex REST
// ---------------------------------------------------------------------------

pub fn apex_contact() -> ApexContactRequest {
    ApexContactRequest {
        request: NewContactAccount {
            first_name: "Marc".into(),
            last_name: "Benioff".into(),
            company: "Salesforce".into(),
            street: "1 Market Street".into(),
            city: "San Francisco".into(),
            state: "California".into(),
        },
    }
}

pub fn apex_batch() -> ApexBatchRequest {
    let lead = |first: &str, last: &str| ContactLead {
        first_name: first.into(),
        last_name: last.into(),
        company: "Salesforce".into(),
    };
    ApexBatchRequest {
        requests: vec![lead("Marc", "Benioff"), lead("Parker", "Harris")],
    }
}

// ---------------------------------------------------------------------------
// Composite
// ---------------------------------------------------------------------------

/// Account plus a contact that points at it.
pub fn composite_account_contact(data_path: &str) -> Result<CompositeRequest, DemoError> {
    let account = rid("GearsAccount")?;
    Ok(CompositeRequest::all_or_none(vec![
        CompositeSubrequest::post(
            format!("{data_path}/sobjects/Account"),
            account.clone(),
            Record::new()
                .field("Name", "GearsCRM")
                .field("BillingStreet", "10 Kearney Road, Suite 152")
                .field("BillingCity", "Needham")
                .field("BillingState", "Massachusetts"),
        ),
        CompositeSubrequest::post(
            format!("{data_path}/sobjects/Contact"),
            rid("GearsContact")?,
            Record::new()
                .field("AccountId", reference(&account, "id"))
                .field("FirstName", "Harry")
                .field("LastName", "Radenberg"),
        ),
    ]))
}

/// Query for the newest GearsCRM account, then create a contact there.
pub fn composite_query_then_contact(data_path: &str) -> Result<CompositeRequest, DemoError> {
    let results = rid("AccountResults")?;
    Ok(CompositeRequest::all_or_none(vec![
        CompositeSubrequest::get(
            query_url(
                data_path,
                "SELECT id FROM Account WHERE name = 'GearsCRM' ORDER BY CreatedDate DESC LIMIT 1",
            ),
            results.clone(),
        ),
        CompositeSubrequest::post(
            format!("{data_path}/sobjects/Contact"),
            rid("NewContact")?,
            Record::new()
                .field("AccountId", reference(&results, "records[0].Id"))
                .field("FirstName", "Doug")
                .field("LastName", "Ayers"),
        ),
    ]))
}

/// Account, contact, opportunity and the contact role tying them together.
pub fn composite_opportunity(data_path: &str) -> Result<CompositeRequest, DemoError> {
    let account = rid("BagginsAccount")?;
    let contact = rid("BilboContact")?;
    let opportunity = rid("BilboBirthdayOppty")?;
    Ok(CompositeRequest::all_or_none(vec![
        CompositeSubrequest::post(
            format!("{data_path}/sobjects/Account"),
            account.clone(),
            Record::new()
                .field("Name", "Baggins")
                .field("BillingStreet", "Bag End on Bagshot Row")
                .field("BillingCity", "Hobbiton")
                .field("BillingState", "Shire"),
        ),
        CompositeSubrequest::post(
            format!("{data_path}/sobjects/Contact"),
            contact.clone(),
            Record::new()
                .field("AccountId", reference(&account, "id"))
                .field("FirstName", "Bilbo")
                .field("LastName", "Baggins"),
        ),
        CompositeSubrequest::post(
            format!("{data_path}/sobjects/Opportunity"),
            opportunity.clone(),
            Record::new()
                .field("AccountId", reference(&account, "id"))
                .field("Name", "Bilbo Baggins 111th Birthday")
                .field("StageName", "Prospecting")
                .date("CloseDate", date(2017, 9, 22))
                .field("Amount", 5000),
        ),
        CompositeSubrequest::post(
            format!("{data_path}/sobjects/OpportunityContactRole"),
            rid("BilboOpptyContactRole")?,
            Record::new()
                .field("OpportunityId", reference(&opportunity, "id"))
                .field("ContactId", reference(&contact, "id"))
                .field("Role", "Evaluator")
                .field("IsPrimary", true),
        ),
    ]))
}

// ---------------------------------------------------------------------------
// Tree
// ---------------------------------------------------------------------------

pub fn tree_account() -> Result<TreeRequest, DemoError> {
    let contact = |reference_id: &str, first: &str| -> Result<TreeRecord, DemoError> {
        Ok(TreeRecord::new("Contact", rid(reference_id)?)
            .field("FirstName", first)
            .field("LastName", "Disney"))
    };

    let account = TreeRecord::new(TREE_ROOT, rid("DisneyAccount")?)
        .field("Name", "Walt Disney World Resort")
        .field("BillingStreet", "Walt Disney World Resort")
        .field("BillingCity", "Orlando")
        .field("BillingState", "Florida")
        .children(
            "Contacts",
            vec![
                contact("WaltDisneyContact", "Walt")?,
                contact("RoyDisneyContact", "Roy")?,
            ],
        )
        .children(
            "Opportunities",
            vec![TreeRecord::new("Opportunity", rid("AmusementParksOppty")?)
                .field("Name", "Amusement Parks")
                .field("StageName", "Prospecting")
                .date("CloseDate", date(1971, 10, 1))
                .field("Amount", 149.99)],
        );

    Ok(TreeRequest::new(vec![account]))
}
