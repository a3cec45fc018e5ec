//! Static GraphQL documents sent to the Linear API.

use serde_json::{Map, Value, json};

const ISSUE_FIELDS: &str = r#"
    id
    identifier
    title
    description
    priority
    estimate
    url
    createdAt
    startedAt
    completedAt
    canceledAt
    state { id name type }
    team { id name key }
    assignee { id name displayName email }
    project { id name }
    labels { nodes { id name } }
"#;

pub const VIEWER: &str = r#"
query Viewer {
  viewer { id name displayName email active }
}
"#;

pub const TEAMS: &str = r#"
query Teams($first: Int!, $after: String) {
  teams(first: $first, after: $after) {
    nodes {
      id
      name
      key
      description
    }
    pageInfo { hasNextPage endCursor }
  }
}
"#;

pub const TEAM: &str = r#"
query Team($id: String!) {
  team(id: $id) {
    id
    name
    key
    description
    members { nodes { id name displayName email active } }
    states { nodes { id name type position } }
  }
}
"#;

pub const PROJECTS: &str = r#"
query Projects($first: Int!, $after: String, $filter: ProjectFilter) {
  projects(first: $first, after: $after, filter: $filter) {
    nodes {
      id
      name
      state
      description
      startDate
      targetDate
      progress
      lead { id name displayName email }
      labels { nodes { id name } }
      teams { nodes { id name key } }
    }
    pageInfo { hasNextPage endCursor }
  }
}
"#;

pub const PROJECT: &str = r#"
query Project($id: String!) {
  project(id: $id) {
    id
    name
    state
    description
    startDate
    targetDate
    progress
    lead { id name displayName email }
    labels { nodes { id name } }
    teams { nodes { id name key } }
  }
}
"#;

pub const USERS: &str = r#"
query Users($first: Int!, $after: String) {
  users(first: $first, after: $after) {
    nodes { id name displayName email active }
    pageInfo { hasNextPage endCursor }
  }
}
"#;

pub const ISSUE_LABELS: &str = r#"
query IssueLabels($first: Int!, $after: String) {
  issueLabels(first: $first, after: $after) {
    nodes { id name }
    pageInfo { hasNextPage endCursor }
  }
}
"#;

pub const CREATE_TEAM: &str = r#"
mutation CreateTeam($input: TeamCreateInput!) {
  teamCreate(input: $input) {
    success
    team { id name key description }
  }
}
"#;

pub const CREATE_PROJECT: &str = r#"
mutation CreateProject($input: ProjectCreateInput!) {
  projectCreate(input: $input) {
    success
    project {
      id
      name
      state
      description
      teams { nodes { id name key } }
    }
  }
}
"#;

pub const CREATE_COMMENT: &str = r#"
mutation CreateComment($input: CommentCreateInput!) {
  commentCreate(input: $input) {
    success
    comment { id body createdAt user { id name displayName email } }
  }
}
"#;

/// Issues page query; `$first` is capped by the server at 250.
pub fn issues_query() -> String {
    format!(
        r#"
query Issues($first: Int!, $after: String, $filter: IssueFilter) {{
  issues(first: $first, after: $after, filter: $filter, orderBy: updatedAt) {{
    nodes {{ {ISSUE_FIELDS} }}
    pageInfo {{ hasNextPage endCursor }}
  }}
}}
"#
    )
}

pub fn issue_query() -> String {
    format!(
        r#"
query Issue($id: String!) {{
  issue(id: $id) {{
    {ISSUE_FIELDS}
    comments {{ nodes {{ id body createdAt user {{ id name displayName email }} }} }}
  }}
}}
"#
    )
}

pub fn create_issue_mutation() -> String {
    format!(
        r#"
mutation CreateIssue($input: IssueCreateInput!) {{
  issueCreate(input: $input) {{
    success
    issue {{ {ISSUE_FIELDS} }}
  }}
}}
"#
    )
}

pub fn update_issue_mutation() -> String {
    format!(
        r#"
mutation UpdateIssue($id: String!, $input: IssueUpdateInput!) {{
  issueUpdate(id: $id, input: $input) {{
    success
    issue {{ {ISSUE_FIELDS} }}
  }}
}}
"#
    )
}

/// Filters applied server-side when listing issues.
#[derive(Debug, Clone, Default)]
pub struct IssueFilter {
    pub team: Option<String>,
    pub assignee_id: Option<String>,
    pub status: Option<String>,
}

impl IssueFilter {
    pub fn for_team(team: Option<String>) -> Self {
        Self {
            team,
            ..Self::default()
        }
    }

    /// Builds the `IssueFilter` input object, or `null` when no filter is set.
    pub fn to_variable(&self) -> Value {
        let mut filter = Map::new();
        if let Some(team) = &self.team {
            filter.insert("team".into(), json!({ "name": { "eqIgnoreCase": team } }));
        }
        if let Some(assignee) = &self.assignee_id {
            filter.insert("assignee".into(), json!({ "id": { "eq": assignee } }));
        }
        if let Some(status) = &self.status {
            filter.insert("state".into(), json!({ "name": { "eqIgnoreCase": status } }));
        }
        if filter.is_empty() {
            Value::Null
        } else {
            Value::Object(filter)
        }
    }
}

/// Project filter restricting to projects that include the named team.
pub fn project_filter(team: Option<&str>) -> Value {
    match team {
        Some(team) => json!({
            "accessibleTeams": { "some": { "name": { "eqIgnoreCase": team } } }
        }),
        None => Value::Null,
    }
}
