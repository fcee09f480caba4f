use maud::{html, Markup, DOCTYPE};
use multidml_shared::error::DemoError;
use serde_json::Value;

use crate::scenarios::Scenario;

/// What a remote call produced: its JSON response or the error in its place.
pub type Outcome = Result<Value, DemoError>;

/// Pretty-print an outcome with two-space indentation. Errors are shown in
/// their JSON form, so the page always carries the platform's own words.
pub fn outcome_json(outcome: &Outcome) -> String {
    let value = match outcome {
        Ok(value) => value.clone(),
        Err(e) => e.to_json(),
    };
    serde_json::to_string_pretty(&value).unwrap_or_else(|e| format!("\"{e}\""))
}

fn layout(selected: Scenario, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { "Multi-record DML demo - " (selected.label()) }
                link rel="stylesheet" href="/public/style.css";
            }
            body {
                nav class="tabs" {
                    ul {
                        @for scenario in Scenario::ALL {
                            li class=[(scenario == selected).then_some("selected")] {
                                a href=(scenario.path()) { (scenario.label()) }
                            }
                        }
                    }
                }
                main {
                    h1 { (selected.label()) }
                    p class="description" { (selected.description()) }
                    (content)
                }
            }
        }
    }
}

/// `succeeded` is false for an `Err`, and also for an `Ok` body that reports
/// failed or rolled-back records.
fn response_block(heading: &str, outcome: &Outcome, succeeded: bool) -> Markup {
    let status = if succeeded { "success" } else { "error" };
    html! {
        section class={ "response " (status) } {
            h2 { (heading) }
            pre { code { (outcome_json(outcome)) } }
        }
    }
}

pub fn home_page() -> Markup {
    layout(
        Scenario::Home,
        html! {
            ul class="scenarios" {
                @for scenario in Scenario::ALL.iter().skip(1) {
                    li {
                        a href=(scenario.path()) { (scenario.label()) }
                        " - " (scenario.description())
                    }
                }
            }
        },
    )
}

/// Page for a scenario with a single response.
pub fn result_page(scenario: Scenario, outcome: &Outcome, succeeded: bool) -> Markup {
    layout(scenario, response_block("Response", outcome, succeeded))
}

/// Page for the two-step traditional scenario. Each step carries its outcome
/// and whether it succeeded; `contact` is `None` when the account call
/// failed and the contact was never attempted.
pub fn traditional_page(account: (&Outcome, bool), contact: Option<(&Outcome, bool)>) -> Markup {
    layout(
        Scenario::Traditional,
        html! {
            (response_block("Account response", account.0, account.1))
            @match contact {
                Some((contact, succeeded)) => {
                    (response_block("Contact response", contact, succeeded))
                }
                None => {
                    section class="response skipped" {
                        h2 { "Contact response" }
                        p { "Not attempted: the account was not created." }
                    }
                }
            }
        },
    )
}
