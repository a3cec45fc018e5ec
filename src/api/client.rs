use super::queries::{self, IssueFilter};
use super::transport::{GraphQlRequest, HttpTransport, Transport};
use super::types::{
    Comment, Connection, Issue, IssueCreateInput, IssueUpdateInput, Label, Project, Team, User,
};
use crate::config::Config;
use crate::error::{LinearError, Result};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::{debug, warn};

/// Issues requested per page when paginating.
pub const PAGE_SIZE: usize = 100;

/// Client-side guard against mutating the workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SafeMode {
    /// Read-only: mutation documents are rejected before they are sent.
    #[default]
    Enabled,
    Disabled,
}

impl SafeMode {
    pub fn from_allow_mutations(allow: bool) -> Self {
        if allow {
            SafeMode::Disabled
        } else {
            SafeMode::Enabled
        }
    }

    pub fn is_enabled(self) -> bool {
        self == SafeMode::Enabled
    }
}

/// Returns true when the document's leading keyword is `mutation`.
///
/// Blank lines and `#` comment lines before the operation are skipped.
pub fn is_mutation(document: &str) -> bool {
    leading_keyword(document) == Some("mutation")
}

fn leading_keyword(document: &str) -> Option<&str> {
    document
        .lines()
        .map(str::trim_start)
        .find(|line| !line.is_empty() && !line.starts_with('#'))
        .and_then(|line| {
            line.split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .find(|word| !word.is_empty())
        })
}

/// Operation name for logs and error messages, e.g. `CreateIssue`.
pub fn operation_name(document: &str) -> String {
    let mut words = document
        .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .filter(|w| !w.is_empty());
    match (words.next(), words.next()) {
        (Some(kind @ ("query" | "mutation" | "subscription")), Some(name)) => {
            if document.trim_start().starts_with(&format!("{} {}", kind, name)) {
                name.to_string()
            } else {
                kind.to_string()
            }
        }
        (Some(kind), _) => kind.to_string(),
        _ => "anonymous".to_string(),
    }
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
    #[serde(default)]
    extensions: Option<Value>,
}

impl GraphQlError {
    fn is_authentication(&self) -> bool {
        let code = self
            .extensions
            .as_ref()
            .and_then(|e| e.get("code"))
            .and_then(Value::as_str)
            .unwrap_or_default();
        code.eq_ignore_ascii_case("AUTHENTICATION_ERROR")
            || self.message.to_lowercase().contains("authentication")
    }
}

pub struct LinearClient<T: Transport = HttpTransport> {
    transport: T,
    safe_mode: SafeMode,
}

impl LinearClient<HttpTransport> {
    /// Builds an HTTPS client from the resolved configuration.
    pub fn connect(config: &Config, safe_mode: SafeMode) -> Result<Self> {
        let transport = HttpTransport::new(config.api_url.clone(), config.api_key()?)?;
        Ok(Self::new(transport, safe_mode))
    }
}

impl<T: Transport> LinearClient<T> {
    pub fn new(transport: T, safe_mode: SafeMode) -> Self {
        Self {
            transport,
            safe_mode,
        }
    }

    pub fn safe_mode(&self) -> SafeMode {
        self.safe_mode
    }

    /// Fails with `MutationBlocked` when safe mode forbids sending `document`.
    pub fn guard(&self, document: &str) -> Result<()> {
        if self.safe_mode.is_enabled() && is_mutation(document) {
            let operation = operation_name(document);
            warn!(operation = %operation, "mutation blocked by safe mode");
            return Err(LinearError::MutationBlocked(operation));
        }
        Ok(())
    }

    /// Executes a GraphQL document and returns its `data` member.
    pub fn query(&self, document: &str, variables: Value) -> Result<Value> {
        self.guard(document)?;

        let operation = operation_name(document);
        debug!(operation = %operation, "sending graphql request");
        let request = GraphQlRequest {
            query: document,
            variables,
        };
        let response = self.transport.send(&request)?;

        if response.status == 401 || response.status == 403 {
            let message = serde_json::from_str::<GraphQlResponse>(&response.body)
                .ok()
                .and_then(|r| r.errors.into_iter().next())
                .map(|e| e.message)
                .unwrap_or_else(|| format!("HTTP {}", response.status));
            return Err(LinearError::Authentication(message));
        }

        let parsed: GraphQlResponse = match serde_json::from_str(&response.body) {
            Ok(parsed) => parsed,
            Err(e) if (200..300).contains(&response.status) => return Err(e.into()),
            Err(_) => {
                return Err(LinearError::Api(format!(
                    "HTTP {}: {}",
                    response.status,
                    truncate(&response.body, 200)
                )));
            }
        };

        if !parsed.errors.is_empty() {
            if let Some(auth) = parsed.errors.iter().find(|e| e.is_authentication()) {
                return Err(LinearError::Authentication(auth.message.clone()));
            }
            let messages: Vec<_> = parsed.errors.iter().map(|e| e.message.as_str()).collect();
            return Err(LinearError::Api(messages.join("; ")));
        }

        if !(200..300).contains(&response.status) {
            return Err(LinearError::Api(format!("HTTP {}", response.status)));
        }

        parsed
            .data
            .ok_or_else(|| LinearError::Api("response contained no data".to_string()))
    }

    /// Executes a document and deserializes `data` into `R`.
    pub fn query_as<R: DeserializeOwned>(&self, document: &str, variables: Value) -> Result<R> {
        let data = self.query(document, variables)?;
        Ok(serde_json::from_value(data)?)
    }

    pub fn viewer(&self) -> Result<User> {
        #[derive(Deserialize)]
        struct Data {
            viewer: User,
        }
        Ok(self.query_as::<Data>(queries::VIEWER, Value::Null)?.viewer)
    }

    pub fn teams(&self) -> Result<Vec<Team>> {
        self.paginate(queries::TEAMS, "teams", Value::Null, None)
    }

    pub fn team(&self, id: &str) -> Result<Team> {
        #[derive(Deserialize)]
        struct Data {
            team: Option<Team>,
        }
        self.query_as::<Data>(queries::TEAM, json!({ "id": id }))?
            .team
            .ok_or_else(|| LinearError::Lookup(format!("Team '{}' not found", id)))
    }

    /// Resolves a team name (case-insensitive) to its ID.
    pub fn get_team_id_by_name(&self, name: &str) -> Result<String> {
        let teams = self.teams()?;
        find_team(&teams, name).map(|t| t.id.clone())
    }

    pub fn projects(&self, team: Option<&str>) -> Result<Vec<Project>> {
        let variables = json!({ "filter": queries::project_filter(team) });
        self.paginate(queries::PROJECTS, "projects", variables, None)
    }

    pub fn project(&self, id: &str) -> Result<Project> {
        #[derive(Deserialize)]
        struct Data {
            project: Option<Project>,
        }
        self.query_as::<Data>(queries::PROJECT, json!({ "id": id }))?
            .project
            .ok_or_else(|| LinearError::Lookup(format!("Project '{}' not found", id)))
    }

    /// Fetches issues page by page until `limit` is reached or the last page.
    pub fn issues(&self, filter: &IssueFilter, limit: Option<usize>) -> Result<Vec<Issue>> {
        let variables = json!({ "filter": filter.to_variable() });
        let issues: Vec<Issue> =
            self.paginate(&queries::issues_query(), "issues", variables, limit)?;
        debug!(count = issues.len(), "fetched issues");
        Ok(issues)
    }

    /// Follows `pageInfo` cursors on the connection at `data.<field>`,
    /// requesting at most `PAGE_SIZE` nodes per page.
    fn paginate<N: DeserializeOwned>(
        &self,
        document: &str,
        field: &str,
        mut variables: Value,
        limit: Option<usize>,
    ) -> Result<Vec<N>> {
        let mut nodes: Vec<N> = Vec::new();
        let mut after: Option<String> = None;

        loop {
            let remaining = limit.map_or(PAGE_SIZE, |l| l.saturating_sub(nodes.len()));
            if remaining == 0 {
                break;
            }
            variables["first"] = json!(remaining.min(PAGE_SIZE));
            variables["after"] = json!(after);

            let mut data = self.query(document, variables.clone())?;
            let connection = data
                .get_mut(field)
                .map(Value::take)
                .filter(|c| !c.is_null())
                .ok_or_else(|| LinearError::Api(format!("response contained no '{}'", field)))?;
            let page: Connection<N> = serde_json::from_value(connection)?;
            nodes.extend(page.nodes);

            match page.page_info {
                Some(info) if info.has_next_page && info.end_cursor.is_some() => {
                    after = info.end_cursor;
                }
                _ => break,
            }
        }

        if let Some(limit) = limit {
            nodes.truncate(limit);
        }
        Ok(nodes)
    }

    pub fn all_issues(&self, filter: &IssueFilter) -> Result<Vec<Issue>> {
        self.issues(filter, None)
    }

    pub fn issue(&self, id: &str) -> Result<Issue> {
        #[derive(Deserialize)]
        struct Data {
            issue: Option<Issue>,
        }
        self.query_as::<Data>(&queries::issue_query(), json!({ "id": id }))?
            .issue
            .ok_or_else(|| LinearError::Lookup(format!("Issue '{}' not found", id)))
    }

    pub fn users(&self) -> Result<Vec<User>> {
        self.paginate(queries::USERS, "users", Value::Null, None)
    }

    /// Resolves `me`, an email address, or a (display) name to a user ID.
    pub fn get_user_id(&self, identifier: &str) -> Result<String> {
        if identifier.eq_ignore_ascii_case("me") {
            return Ok(self.viewer()?.id);
        }
        let users = self.users()?;
        find_user(&users, identifier).map(|u| u.id.clone())
    }

    /// Resolves a workflow state name within a team.
    pub fn workflow_state_id(&self, team_id: &str, status: &str) -> Result<String> {
        let team = self.team(team_id)?;
        team.states
            .nodes
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(status))
            .map(|s| s.id.clone())
            .ok_or_else(|| {
                let available: Vec<_> = team.states.nodes.iter().map(|s| s.name.as_str()).collect();
                LinearError::Lookup(format!(
                    "Status '{}' not found in team {}. Available statuses: {}",
                    status,
                    team.name,
                    available.join(", ")
                ))
            })
    }

    /// Resolves label names to IDs; every name must exist.
    pub fn label_ids(&self, names: &[String]) -> Result<Vec<String>> {
        if names.is_empty() {
            return Ok(Vec::new());
        }
        let labels: Vec<Label> =
            self.paginate(queries::ISSUE_LABELS, "issueLabels", Value::Null, None)?;
        resolve_labels(&labels, names)
    }

    pub fn create_issue(&self, input: &IssueCreateInput) -> Result<Issue> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Data {
            issue_create: IssuePayload,
        }
        let data: Data =
            self.query_as(&queries::create_issue_mutation(), json!({ "input": input }))?;
        data.issue_create.into_issue("create issue")
    }

    pub fn update_issue(&self, id: &str, input: &IssueUpdateInput) -> Result<Issue> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Data {
            issue_update: IssuePayload,
        }
        let data: Data = self.query_as(
            &queries::update_issue_mutation(),
            json!({ "id": id, "input": input }),
        )?;
        data.issue_update.into_issue("update issue")
    }

    pub fn create_comment(&self, issue_id: &str, body: &str) -> Result<Comment> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Data {
            comment_create: CommentPayload,
        }
        #[derive(Deserialize)]
        struct CommentPayload {
            success: bool,
            comment: Option<Comment>,
        }
        let data: Data = self.query_as(
            queries::CREATE_COMMENT,
            json!({ "input": { "issueId": issue_id, "body": body } }),
        )?;
        match data.comment_create {
            CommentPayload {
                success: true,
                comment: Some(comment),
            } => Ok(comment),
            _ => Err(LinearError::Api("Failed to create comment".to_string())),
        }
    }

    pub fn create_team(&self, name: &str, key: &str, description: Option<&str>) -> Result<Team> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Data {
            team_create: TeamPayload,
        }
        #[derive(Deserialize)]
        struct TeamPayload {
            success: bool,
            team: Option<Team>,
        }
        let data: Data = self.query_as(
            queries::CREATE_TEAM,
            json!({ "input": { "name": name, "key": key, "description": description } }),
        )?;
        match data.team_create {
            TeamPayload {
                success: true,
                team: Some(team),
            } => Ok(team),
            _ => Err(LinearError::Api("Failed to create team".to_string())),
        }
    }

    pub fn create_project(
        &self,
        name: &str,
        team_ids: &[String],
        description: Option<&str>,
    ) -> Result<Project> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Data {
            project_create: ProjectPayload,
        }
        #[derive(Deserialize)]
        struct ProjectPayload {
            success: bool,
            project: Option<Project>,
        }
        let data: Data = self.query_as(
            queries::CREATE_PROJECT,
            json!({ "input": { "name": name, "teamIds": team_ids, "description": description } }),
        )?;
        match data.project_create {
            ProjectPayload {
                success: true,
                project: Some(project),
            } => Ok(project),
            _ => Err(LinearError::Api("Failed to create project".to_string())),
        }
    }
}

#[derive(Deserialize)]
struct IssuePayload {
    success: bool,
    issue: Option<Issue>,
}

impl IssuePayload {
    fn into_issue(self, action: &str) -> Result<Issue> {
        match self {
            IssuePayload {
                success: true,
                issue: Some(issue),
            } => Ok(issue),
            _ => Err(LinearError::Api(format!("Failed to {}", action))),
        }
    }
}

/// Case-insensitive team lookup by name, then by key.
pub fn find_team<'a>(teams: &'a [Team], name: &str) -> Result<&'a Team> {
    let name = name.trim();
    teams
        .iter()
        .find(|t| t.name.eq_ignore_ascii_case(name))
        .or_else(|| teams.iter().find(|t| t.key.eq_ignore_ascii_case(name)))
        .ok_or_else(|| {
            let available: Vec<_> = teams.iter().map(|t| t.name.as_str()).collect();
            LinearError::Lookup(format!(
                "Team '{}' not found. Available teams: {}",
                name,
                if available.is_empty() {
                    "(none)".to_string()
                } else {
                    available.join(", ")
                }
            ))
        })
}

/// Matches an email exactly (ignoring case), otherwise a name or display name.
pub fn find_user<'a>(users: &'a [User], identifier: &str) -> Result<&'a User> {
    let identifier = identifier.trim();
    let found = if identifier.contains('@') {
        users.iter().find(|u| {
            u.email
                .as_deref()
                .is_some_and(|e| e.eq_ignore_ascii_case(identifier))
        })
    } else {
        users.iter().find(|u| {
            u.name.eq_ignore_ascii_case(identifier)
                || u.display_name
                    .as_deref()
                    .is_some_and(|d| d.eq_ignore_ascii_case(identifier))
        })
    };

    found.ok_or_else(|| {
        let available: Vec<String> = users
            .iter()
            .filter(|u| u.active != Some(false))
            .map(|u| match &u.email {
                Some(email) => format!("{} <{}>", u.name, email),
                None => u.name.clone(),
            })
            .collect();
        LinearError::Lookup(format!(
            "User '{}' not found. Available users: {}",
            identifier,
            available.join(", ")
        ))
    })
}

fn resolve_labels(labels: &[Label], names: &[String]) -> Result<Vec<String>> {
    let mut ids = Vec::with_capacity(names.len());
    let mut missing = Vec::new();
    for name in names {
        match labels
            .iter()
            .find(|l| l.name.eq_ignore_ascii_case(name))
            .and_then(|l| l.id.clone())
        {
            Some(id) => ids.push(id),
            None => missing.push(name.as_str()),
        }
    }
    if missing.is_empty() {
        return Ok(ids);
    }
    let available: Vec<_> = labels.iter().map(|l| l.name.as_str()).collect();
    Err(LinearError::Lookup(format!(
        "Label(s) not found: {}. Available labels: {}",
        missing.join(", "),
        available.join(", ")
    )))
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{}...", cut)
    }
}
