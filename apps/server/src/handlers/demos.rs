use axum::extract::State;
use maud::Markup;
use multidml_shared::api::composite::CompositeResponse;
use multidml_shared::api::sobject::SaveResult;
use multidml_shared::api::tree::TreeResponse;
use multidml_shared::ids::RecordId;
use serde_json::Value;

use crate::scenarios::{self, Scenario};
use crate::state::AppState;
use crate::views::{self, Outcome};

// Every handler answers 200 with an HTML page. A failed remote call is
// rendered in place of the response, never turned into an error status.

/// Decides whether a 2xx response body counts as a success on the page.
type Judge = fn(&Value) -> bool;

/// Log the outcome of one step and return whether it succeeded.
fn judge_outcome(scenario: Scenario, step: &str, outcome: &Outcome, judge: Judge) -> bool {
    match outcome {
        Ok(body) if judge(body) => {
            tracing::info!(scenario = scenario.label(), step, "remote call succeeded");
            true
        }
        Ok(_) => {
            tracing::warn!(scenario = scenario.label(), step, "remote call reported failed records");
            false
        }
        Err(e) => {
            tracing::warn!(scenario = scenario.label(), step, error = %e, "remote call failed");
            false
        }
    }
}

fn render(scenario: Scenario, outcome: Outcome, judge: Judge) -> Markup {
    let succeeded = judge_outcome(scenario, "request", &outcome, judge);
    views::result_page(scenario, &outcome, succeeded)
}

/// Apex services answer with their own shapes; any 2xx body is a success.
fn any_body(_: &Value) -> bool {
    true
}

/// A create is a success unless its save result says otherwise.
fn save_succeeded(body: &Value) -> bool {
    serde_json::from_value::<SaveResult>(body.clone()).map_or(true, |r| r.success)
}

/// An all-or-none composite that rolled back still answers 200, with the
/// failures in the per-subrequest status codes.
fn composite_succeeded(body: &Value) -> bool {
    serde_json::from_value::<CompositeResponse>(body.clone()).map_or(true, |r| r.all_succeeded())
}

fn tree_succeeded(body: &Value) -> bool {
    serde_json::from_value::<TreeResponse>(body.clone()).map_or(true, |r| !r.has_errors)
}

/// Id of the record a create call produced, if it produced one.
fn created_id(response: &Value) -> Option<RecordId> {
    serde_json::from_value::<SaveResult>(response.clone())
        .ok()?
        .created_id()
        .cloned()
}

/// GET / — landing page, no remote call.
pub async fn home() -> Markup {
    views::home_page()
}

/// GET /api/traditional — create an account, then a contact at it, as two
/// separate calls. The contact call is only made once the account exists.
pub async fn traditional(State(state): State<AppState>) -> Markup {
    let account = state
        .crm
        .create("Account", &scenarios::traditional_account())
        .await;
    let account_ok = judge_outcome(Scenario::Traditional, "account", &account, save_succeeded);

    let account_id = account.as_ref().ok().and_then(created_id);
    let contact = match account_id {
        Some(id) => {
            let contact = state
                .crm
                .create("Contact", &scenarios::traditional_contact(&id))
                .await;
            let contact_ok =
                judge_outcome(Scenario::Traditional, "contact", &contact, save_succeeded);
            Some((contact, contact_ok))
        }
        None => {
            tracing::info!("account not created, skipping contact");
            None
        }
    };

    views::traditional_page(
        (&account, account_ok),
        contact.as_ref().map(|(outcome, ok)| (outcome, *ok)),
    )
}

/// GET /api/apex — one call to a custom Apex REST service.
pub async fn apex(State(state): State<AppState>) -> Markup {
    let outcome = async {
        let body = serde_json::to_value(scenarios::apex_contact())?;
        state.crm.apex_post(scenarios::APEX_CONTACT_PATH, &body).await
    }
    .await;
    render(Scenario::Apex, outcome, any_body)
}

/// GET /api/apex-batch — one call to the batch Apex REST service.
pub async fn apex_batch(State(state): State<AppState>) -> Markup {
    let outcome = async {
        let body = serde_json::to_value(scenarios::apex_batch())?;
        state.crm.apex_post(scenarios::APEX_BATCH_PATH, &body).await
    }
    .await;
    render(Scenario::ApexBatch, outcome, any_body)
}

/// GET /api/composite1 — account and contact in one composite request.
pub async fn composite1(State(state): State<AppState>) -> Markup {
    let outcome = async {
        let request = scenarios::composite_account_contact(&state.crm.data_path())?;
        state.crm.composite(&request).await
    }
    .await;
    render(Scenario::Composite1, outcome, composite_succeeded)
}

/// GET /api/composite2 — query then create in one composite request.
pub async fn composite2(State(state): State<AppState>) -> Markup {
    let outcome = async {
        let request = scenarios::composite_query_then_contact(&state.crm.data_path())?;
        state.crm.composite(&request).await
    }
    .await;
    render(Scenario::Composite2, outcome, composite_succeeded)
}

/// GET /api/composite3 — four dependent creates in one composite request.
pub async fn composite3(State(state): State<AppState>) -> Markup {
    let outcome = async {
        let request = scenarios::composite_opportunity(&state.crm.data_path())?;
        state.crm.composite(&request).await
    }
    .await;
    render(Scenario::Composite3, outcome, composite_succeeded)
}

/// GET /api/tree — account with nested children in one tree request.
///
/// The tree resource answers save errors with HTTP 400 and a structured
/// body; that body arrives as `DemoError::Remote` and is shown as-is.
pub async fn tree(State(state): State<AppState>) -> Markup {
    let outcome = async {
        let request = scenarios::tree_account()?;
        state.crm.tree(scenarios::TREE_ROOT, &request).await
    }
    .await;
    render(Scenario::Tree, outcome, tree_succeeded)
}
