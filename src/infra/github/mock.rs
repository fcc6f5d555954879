//! wiremock-based GitHub mock server for testing.
//!
//! Provides `GitHubMockServer` for HTTP-level mocking of the repository
//! endpoints the provider talks to.
//!
//! # Usage
//!
//! ```ignore
//! let mock = GitHubMockServer::start().await;
//! mock.current_user("octocat").await;
//!
//! // Creation endpoints echo the request body over GitHub's defaults
//! mock.user_repos().create("octocat").await;
//! mock.org_repos("acme").create().await;
//!
//! // Repository scoped endpoints
//! let ctx = mock.repo("octocat", "demo");
//! ctx.repository().set("has_wiki", true).get().await;
//! ctx.repository().get_by_id().await;
//! ctx.repository().get_not_found().await;
//! ctx.edit().await;
//! ctx.delete().await;
//! ctx.delete_not_found().await;
//! ctx.generate().await;
//!
//! // Inspect what was sent
//! let bodies = mock.request_bodies("PATCH", "/repos/octocat/demo").await;
//! ```

use std::time::Duration;

use serde_json::{Map, Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use super::client::OctocrabClient;

/// ID every mocked repository is created with.
pub const REPOSITORY_ID: i64 = 1296269;

/// Node ID every mocked repository is created with.
pub const REPOSITORY_NODE_ID: &str = "R_kgDOABPHjQ";

/// Settings GitHub reflects back in the repository object.
const ECHOED_SETTINGS: &[&str] = &[
    "name",
    "description",
    "homepage",
    "private",
    "has_issues",
    "has_projects",
    "has_wiki",
    "has_discussions",
    "is_template",
    "allow_squash_merge",
    "allow_merge_commit",
    "allow_rebase_merge",
    "allow_auto_merge",
    "delete_branch_on_merge",
    "squash_merge_commit_title",
    "squash_merge_commit_message",
    "merge_commit_title",
    "merge_commit_message",
];

/// Create a mock account JSON object.
fn mock_account(login: &str) -> Value {
    json!({
        "login": login,
        "id": 1,
        "node_id": "U_test",
        "url": format!("https://api.github.com/users/{login}"),
        "html_url": format!("https://github.com/{login}"),
        "type": "User",
        "site_admin": false
    })
}

/// Create a mock repository JSON object carrying GitHub's defaults for a new repository.
fn mock_repository(owner: &str, name: &str) -> Value {
    json!({
        "id": REPOSITORY_ID,
        "node_id": REPOSITORY_NODE_ID,
        "name": name,
        "full_name": format!("{owner}/{name}"),
        "owner": mock_account(owner),
        "private": false,
        "visibility": "public",
        "description": null,
        "homepage": null,
        "fork": false,
        "archived": false,
        "disabled": false,
        "default_branch": "main",
        "language": null,
        "has_issues": true,
        "has_projects": true,
        "has_wiki": false,
        "has_pages": false,
        "has_downloads": true,
        "has_discussions": false,
        "is_template": false,
        "allow_squash_merge": true,
        "allow_merge_commit": true,
        "allow_rebase_merge": true,
        "allow_auto_merge": false,
        "allow_update_branch": false,
        "allow_forking": true,
        "web_commit_signoff_required": false,
        "delete_branch_on_merge": false,
        "squash_merge_commit_title": "COMMIT_OR_PR_TITLE",
        "squash_merge_commit_message": "COMMIT_MESSAGES",
        "merge_commit_title": "MERGE_MESSAGE",
        "merge_commit_message": "PR_TITLE",
        "forks_count": 0,
        "stargazers_count": 0,
        "watchers_count": 0,
        "open_issues_count": 0,
        "size": 0,
        "topics": [],
        "html_url": format!("https://github.com/{owner}/{name}"),
        "clone_url": format!("https://github.com/{owner}/{name}.git"),
        "git_url": format!("git://github.com/{owner}/{name}.git"),
        "ssh_url": format!("git@github.com:{owner}/{name}.git"),
        "svn_url": format!("https://github.com/{owner}/{name}"),
        "mirror_url": null,
        "created_at": "2024-01-01T00:00:00Z",
        "pushed_at": "2024-01-01T00:00:00Z",
        "updated_at": "2024-01-01T00:00:00Z",
        "permissions": {
            "admin": true,
            "maintain": true,
            "push": true,
            "triage": true,
            "pull": true
        }
    })
}

/// Overlay the echoed settings from `settings` onto a repository object.
fn apply_settings(repository: &mut Value, settings: &Map<String, Value>) {
    let Some(object) = repository.as_object_mut() else {
        return;
    };
    for (key, value) in settings {
        if !ECHOED_SETTINGS.contains(&key.as_str()) {
            continue;
        }
        object.insert(key.clone(), value.clone());
        if key == "private" {
            let visibility = if value.as_bool() == Some(true) {
                "private"
            } else {
                "public"
            };
            object.insert("visibility".to_string(), json!(visibility));
        }
    }
    let owner = object
        .get("owner")
        .and_then(|o| o.get("login"))
        .and_then(Value::as_str)
        .unwrap_or_default();
    let name = object.get("name").and_then(Value::as_str).unwrap_or_default();
    let full_name = format!("{owner}/{name}");
    object.insert("full_name".to_string(), json!(full_name));
}

fn request_object(req: &Request) -> Map<String, Value> {
    serde_json::from_slice::<Value>(&req.body)
        .ok()
        .and_then(|body| body.as_object().cloned())
        .unwrap_or_default()
}

/// Respond with a repository that reflects the settings in the request body.
fn echo_repository(
    owner: &str,
    fallback_name: &str,
    status: u16,
    req: &Request,
) -> ResponseTemplate {
    let settings = request_object(req);
    let name = settings
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or(fallback_name)
        .to_string();
    let mut repository = mock_repository(owner, &name);
    apply_settings(&mut repository, &settings);
    ResponseTemplate::new(status).set_body_json(repository)
}

fn not_found() -> ResponseTemplate {
    ResponseTemplate::new(404).set_body_json(json!({
        "message": "Not Found",
        "documentation_url": "https://docs.github.com/rest"
    }))
}

/// wiremock-based GitHub mock server for testing.
///
/// This provides HTTP-level mocking for GitHub API endpoints, allowing tests
/// to verify actual HTTP requests rather than mocking at the trait level.
pub struct GitHubMockServer {
    server: MockServer,
}

impl GitHubMockServer {
    /// Start a new mock server.
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Base URL of the mock server.
    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Get an OctocrabClient configured to use this mock server.
    pub fn client(&self) -> OctocrabClient {
        OctocrabClient::with_base_url(&self.server.uri(), "test-token").unwrap()
    }

    /// Mock GET /user for current user.
    pub async fn current_user(&self, login: &str) {
        Mock::given(method("GET"))
            .and(path("/user"))
            .respond_with(ResponseTemplate::new(200).set_body_json(mock_account(login)))
            .mount(&self.server)
            .await;
    }

    /// Mock GET /user rejecting the token.
    pub async fn current_user_unauthorized(&self) {
        Mock::given(method("GET"))
            .and(path("/user"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "message": "Bad credentials",
                "documentation_url": "https://docs.github.com/rest"
            })))
            .mount(&self.server)
            .await;
    }

    /// Builder for POST /user/repos.
    pub fn user_repos(&self) -> MockCreateBuilder<'_> {
        MockCreateBuilder {
            server: &self.server,
            route: "/user/repos".to_string(),
        }
    }

    /// Builder for POST /orgs/{org}/repos.
    pub fn org_repos<'a>(&'a self, org: &'a str) -> MockOrgCreateBuilder<'a> {
        MockOrgCreateBuilder {
            inner: MockCreateBuilder {
                server: &self.server,
                route: format!("/orgs/{org}/repos"),
            },
            org,
        }
    }

    /// Create a repository context for building mocks.
    pub fn repo<'a>(&'a self, owner: &'a str, name: &'a str) -> MockRepoContext<'a> {
        MockRepoContext {
            server: &self.server,
            owner,
            name,
        }
    }

    /// JSON bodies of the requests received for `http_method` on `request_path`, in order.
    pub async fn request_bodies(&self, http_method: &str, request_path: &str) -> Vec<Value> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|r| r.method.as_str() == http_method && r.url.path() == request_path)
            .map(|r| serde_json::from_slice(&r.body).unwrap_or(Value::Null))
            .collect()
    }

    /// Number of requests received for `http_method` on `request_path`.
    pub async fn request_count(&self, http_method: &str, request_path: &str) -> usize {
        self.request_bodies(http_method, request_path).await.len()
    }
}

// ============ Builder Pattern API ============

/// Builder for mocking a repository creation endpoint.
pub struct MockCreateBuilder<'a> {
    server: &'a MockServer,
    route: String,
}

impl<'a> MockCreateBuilder<'a> {
    /// Mount a 201 response owned by `owner` that echoes the request body.
    pub async fn create(self, owner: &str) {
        let owner = owner.to_string();
        Mock::given(method("POST"))
            .and(path(self.route))
            .respond_with(move |req: &Request| echo_repository(&owner, "", 201, req))
            .mount(self.server)
            .await;
    }

    /// Mount a 422 validation failure.
    pub async fn create_rejected(self) {
        Mock::given(method("POST"))
            .and(path(self.route))
            .respond_with(ResponseTemplate::new(422).set_body_json(json!({
                "message": "Repository creation failed.",
                "errors": [{"resource": "Repository", "code": "custom", "field": "name", "message": "name already exists on this account"}],
                "documentation_url": "https://docs.github.com/rest/repos/repos#create-a-repository-for-the-authenticated-user"
            })))
            .mount(self.server)
            .await;
    }
}

/// Builder for POST /orgs/{org}/repos, where the organization owns the result.
pub struct MockOrgCreateBuilder<'a> {
    inner: MockCreateBuilder<'a>,
    org: &'a str,
}

impl<'a> MockOrgCreateBuilder<'a> {
    /// Mount a 201 response owned by the organization.
    pub async fn create(self) {
        let org = self.org;
        self.inner.create(org).await;
    }
}

/// Repository context for building mocks.
///
/// Created via `GitHubMockServer::repo()`.
pub struct MockRepoContext<'a> {
    server: &'a MockServer,
    owner: &'a str,
    name: &'a str,
}

impl<'a> MockRepoContext<'a> {
    /// Builder for the read endpoints of this repository.
    pub fn repository(&self) -> MockRepositoryBuilder<'a> {
        MockRepositoryBuilder {
            server: self.server,
            owner: self.owner,
            name: self.name,
            id: REPOSITORY_ID,
            settings: Map::new(),
        }
    }

    /// Mount mock for PATCH /repos/{owner}/{name} echoing the request body.
    pub async fn edit(&self) {
        let owner = self.owner.to_string();
        let name = self.name.to_string();
        Mock::given(method("PATCH"))
            .and(path(format!("/repos/{}/{}", self.owner, self.name)))
            .respond_with(move |req: &Request| echo_repository(&owner, &name, 200, req))
            .mount(self.server)
            .await;
    }

    /// Mount mock for PATCH /repos/{owner}/{name} that echoes only after `delay`.
    pub async fn edit_delayed(&self, delay: Duration) {
        let owner = self.owner.to_string();
        let name = self.name.to_string();
        Mock::given(method("PATCH"))
            .and(path(format!("/repos/{}/{}", self.owner, self.name)))
            .respond_with(move |req: &Request| {
                echo_repository(&owner, &name, 200, req).set_delay(delay)
            })
            .mount(self.server)
            .await;
    }

    /// Mount mock for PATCH /repos/{owner}/{name} failing with `status`.
    pub async fn edit_failing(&self, status: u16) {
        Mock::given(method("PATCH"))
            .and(path(format!("/repos/{}/{}", self.owner, self.name)))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({
                "message": "Validation Failed",
                "errors": [{"resource": "Repository", "field": "merge_commit_title", "code": "invalid"}],
                "documentation_url": "https://docs.github.com/rest/repos/repos#update-a-repository"
            })))
            .mount(self.server)
            .await;
    }

    /// Mount mock for DELETE /repos/{owner}/{name}.
    pub async fn delete(&self) {
        Mock::given(method("DELETE"))
            .and(path(format!("/repos/{}/{}", self.owner, self.name)))
            .respond_with(ResponseTemplate::new(204))
            .mount(self.server)
            .await;
    }

    /// Mount mock for DELETE /repos/{owner}/{name} returning 404.
    pub async fn delete_not_found(&self) {
        Mock::given(method("DELETE"))
            .and(path(format!("/repos/{}/{}", self.owner, self.name)))
            .respond_with(not_found())
            .mount(self.server)
            .await;
    }

    /// Mount mock for POST /repos/{owner}/{name}/generate, treating this repository as the template.
    pub async fn generate(&self) {
        Mock::given(method("POST"))
            .and(path(format!("/repos/{}/{}/generate", self.owner, self.name)))
            .respond_with(|req: &Request| {
                let body = request_object(req);
                let owner = body
                    .get("owner")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string();
                echo_repository(&owner, "", 201, req)
            })
            .mount(self.server)
            .await;
    }

    /// Mount mock for POST /repos/{owner}/{name}/generate returning 404.
    pub async fn generate_not_found(&self) {
        Mock::given(method("POST"))
            .and(path(format!("/repos/{}/{}/generate", self.owner, self.name)))
            .respond_with(not_found())
            .mount(self.server)
            .await;
    }
}

/// Builder for mocking repository read endpoints.
pub struct MockRepositoryBuilder<'a> {
    server: &'a MockServer,
    owner: &'a str,
    name: &'a str,
    id: i64,
    settings: Map<String, Value>,
}

impl<'a> MockRepositoryBuilder<'a> {
    /// Set the numeric ID served under /repositories/{id}.
    pub fn id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    /// Override a repository setting in the response.
    pub fn set(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.settings.insert(key.to_string(), value.into());
        self
    }

    fn body(&self) -> Value {
        let mut repository = mock_repository(self.owner, self.name);
        apply_settings(&mut repository, &self.settings);
        if let Some(object) = repository.as_object_mut() {
            object.insert("id".to_string(), json!(self.id));
        }
        repository
    }

    /// Mount mock for GET /repos/{owner}/{name}.
    pub async fn get(self) {
        Mock::given(method("GET"))
            .and(path(format!("/repos/{}/{}", self.owner, self.name)))
            .respond_with(ResponseTemplate::new(200).set_body_json(self.body()))
            .mount(self.server)
            .await;
    }

    /// Mount mock for GET /repos/{owner}/{name} with extra nested objects.
    pub async fn get_with(self, extra: Value) {
        let mut repository = self.body();
        if let (Some(object), Some(extra)) = (repository.as_object_mut(), extra.as_object()) {
            object.extend(extra.clone());
        }
        Mock::given(method("GET"))
            .and(path(format!("/repos/{}/{}", self.owner, self.name)))
            .respond_with(ResponseTemplate::new(200).set_body_json(repository))
            .mount(self.server)
            .await;
    }

    /// Mount mock for GET /repositories/{id}.
    pub async fn get_by_id(self) {
        Mock::given(method("GET"))
            .and(path(format!("/repositories/{}", self.id)))
            .respond_with(ResponseTemplate::new(200).set_body_json(self.body()))
            .mount(self.server)
            .await;
    }

    /// Mount mock for GET /repositories/{id} failing with `status`.
    pub async fn get_by_id_failing(self, status: u16) {
        Mock::given(method("GET"))
            .and(path(format!("/repositories/{}", self.id)))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({
                "message": "Server Error",
                "documentation_url": "https://docs.github.com/rest"
            })))
            .mount(self.server)
            .await;
    }

    /// Mount mock for GET /repos/{owner}/{name} and GET /repositories/{id} returning 404.
    pub async fn get_not_found(self) {
        Mock::given(method("GET"))
            .and(path(format!("/repos/{}/{}", self.owner, self.name)))
            .respond_with(not_found())
            .mount(self.server)
            .await;
        Mock::given(method("GET"))
            .and(path(format!("/repositories/{}", self.id)))
            .respond_with(not_found())
            .mount(self.server)
            .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_settings_ignores_create_only_fields_and_tracks_visibility() {
        let mut repository = mock_repository("octocat", "demo");
        let settings = json!({
            "name": "renamed",
            "private": true,
            "auto_init": true,
            "gitignore_template": "Rust"
        });

        apply_settings(&mut repository, settings.as_object().unwrap());

        assert_eq!(repository["name"], "renamed");
        assert_eq!(repository["full_name"], "octocat/renamed");
        assert_eq!(repository["visibility"], "private");
        assert!(repository.get("auto_init").is_none());
        assert!(repository.get("gitignore_template").is_none());
    }
}
