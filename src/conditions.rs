//! Ready-made conditions for the generated workflow.

use crate::{ConditionNode, disjunction, function_call, property, string_literal};

const HEAD_REPO_FULL_NAME: &str = "github.event.pull_request.head.repo.full_name";

/// `github.event_name == '<event>'`
#[must_use]
pub fn event_type_equals(event: &str) -> ConditionNode {
    property("github.event_name").eq(string_literal(event))
}

/// `github.event.action == '<action>'`
#[must_use]
pub fn action_equals(action: &str) -> ConditionNode {
    property("github.event.action").eq(string_literal(action))
}

/// True when a pull request comes from the repository itself.
#[must_use]
pub fn not_from_fork() -> ConditionNode {
    property("github.event.pull_request.head.repo.id").eq(property("github.repository_id"))
}

/// True when a pull request comes from the repository itself or from one
/// of `allowed` forks. Entries are `owner/repo`, or `owner/*` for every
/// repository of an owner.
#[must_use]
pub fn from_allowed_forks(allowed: &[&str]) -> ConditionNode {
    let mut terms = vec![not_from_fork()];
    for entry in allowed {
        let term = match entry.strip_suffix('*') {
            Some(prefix) => function_call(
                "startsWith",
                vec![property(HEAD_REPO_FULL_NAME), string_literal(prefix)],
            ),
            None => property(HEAD_REPO_FULL_NAME).eq(string_literal(entry)),
        };
        terms.push(term);
    }
    disjunction(terms)
}

/// `needs.<job>.outputs.success == 'true'`, gating jobs on a detection job.
#[must_use]
pub fn detection_succeeded(job: &str) -> ConditionNode {
    property(&format!("needs.{job}.outputs.success")).eq(string_literal("true"))
}
