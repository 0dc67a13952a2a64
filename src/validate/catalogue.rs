//! Built-in allowlist and dangerous-property catalogue.

/// Context accessors that may appear verbatim inside an interpolation span.
pub const ALLOWED_EXPRESSIONS: &[&str] = &[
    "github.event.after",
    "github.event.before",
    "github.event.check_run.id",
    "github.event.check_suite.id",
    "github.event.comment.id",
    "github.event.deployment.id",
    "github.event.deployment_status.id",
    "github.event.discussion.number",
    "github.event.discussion.title",
    "github.event.head_commit.id",
    "github.event.installation.id",
    "github.event.issue.number",
    "github.event.issue.state",
    "github.event.issue.title",
    "github.event.label.id",
    "github.event.label.name",
    "github.event.milestone.id",
    "github.event.organization.id",
    "github.event.page.id",
    "github.event.project.id",
    "github.event.project_card.id",
    "github.event.project_column.id",
    "github.event.pull_request.base.sha",
    "github.event.pull_request.head.sha",
    "github.event.pull_request.number",
    "github.event.pull_request.state",
    "github.event.pull_request.title",
    "github.event.release.assets[0].id",
    "github.event.release.id",
    "github.event.release.name",
    "github.event.release.tag_name",
    "github.event.repository.id",
    "github.event.review.id",
    "github.event.review_comment.id",
    "github.event.sender.id",
    "github.event.workflow_job.id",
    "github.event.workflow_job.run_id",
    "github.event.workflow_run.conclusion",
    "github.event.workflow_run.event",
    "github.event.workflow_run.head_sha",
    "github.event.workflow_run.html_url",
    "github.event.workflow_run.id",
    "github.event.workflow_run.run_number",
    "github.event.workflow_run.status",
    "github.actor",
    "github.api_url",
    "github.base_ref",
    "github.event_name",
    "github.graphql_url",
    "github.head_ref",
    "github.job",
    "github.owner",
    "github.ref",
    "github.ref_name",
    "github.repository",
    "github.repository_owner",
    "github.run_attempt",
    "github.run_id",
    "github.run_number",
    "github.server_url",
    "github.sha",
    "github.triggering_actor",
    "github.workflow",
    "github.workspace",
    "runner.arch",
    "runner.name",
    "runner.os",
    "runner.temp",
    "runner.tool_cache",
];

/// Families matched by shape rather than by exact name. Listed first in
/// error reports.
pub const DYNAMIC_FAMILIES: &[&str] = &[
    "needs.*",
    "steps.*",
    "github.event.inputs.*",
    "github.aw.inputs.*",
    "inputs.*",
    "env.*",
];

/// Property names that reach into object internals when a path is later
/// resolved by a script runtime.
pub const DANGEROUS_PROPERTY_NAMES: &[&str] = &[
    "constructor",
    "prototype",
    "__proto__",
    "__defineGetter__",
    "__defineSetter__",
    "__lookupGetter__",
    "__lookupSetter__",
    "hasOwnProperty",
    "isPrototypeOf",
    "propertyIsEnumerable",
    "toLocaleString",
    "toString",
    "valueOf",
];
