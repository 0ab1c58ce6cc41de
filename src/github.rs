// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Isolated GitHub API client behind the IssueTracker trait (repo lookup, open issues, comments, user profiles)
// role: tracker/github-api
// inputs: API token from the CLI; env ISR_TEST_* JSON fixtures for the mock backend
// outputs: Typed repos/issues/comments/users for decoration and matching
// side_effects: Network calls to api.github.com (HTTP backend only)
// invariants:
// - Transport and decode failures are fatal; no retries, no partial results
// - User profile lookups are the one best-effort call: a failed lookup yields None
// - Pull requests surfaced by the issues endpoint are filtered out
// errors: Propagated with URL context; callers abort the run
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::cell::RefCell;
use std::collections::HashMap;

use crate::model::{Comment, Issue, Repo, RepoOwner, User};

const API_ROOT: &str = "https://api.github.com";
const USER_AGENT: &str = "issue-status-report";
const PER_PAGE: usize = 100;

/// Blocking tracker seam. One implementation talks to api.github.com; the
/// env-backed one feeds integration tests without a network.
pub trait IssueTracker {
  fn get_repo(&self, owner: &str, name: &str) -> Result<Repo>;
  fn list_open_issues(&self, repo: &Repo) -> Result<Vec<Issue>>;
  fn list_comments(&self, repo: &Repo, number: i64) -> Result<Vec<Comment>>;
  /// Best-effort profile lookup for display names and public emails.
  fn get_user(&self, login: &str) -> Option<User>;
}

// --- HTTP backend ---

struct GithubHttpTracker {
  agent: ureq::Agent,
  token: String,
}

impl GithubHttpTracker {
  fn new(token: String) -> Self {
    let agent: ureq::Agent = ureq::Agent::config_builder().build().into();
    Self { agent, token }
  }

  fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
    let mut resp = self
      .agent
      .get(url)
      .header("Accept", "application/vnd.github+json")
      .header("User-Agent", USER_AGENT)
      .header("Authorization", &format!("Bearer {}", self.token))
      .call()
      .with_context(|| format!("GET {}", url))?;

    resp
      .body_mut()
      .read_json::<T>()
      .with_context(|| format!("decoding response from {}", url))
  }
}

impl IssueTracker for GithubHttpTracker {
  fn get_repo(&self, owner: &str, name: &str) -> Result<Repo> {
    let url = format!("{}/repos/{}/{}", API_ROOT, owner, name);
    self.get_json::<Repo>(&url)
  }

  fn list_open_issues(&self, repo: &Repo) -> Result<Vec<Issue>> {
    let mut out: Vec<Issue> = Vec::new();
    let mut page = 1usize;

    loop {
      let url = format!(
        "{}/repos/{}/issues?state=open&per_page={}&page={}",
        API_ROOT, repo.full_name, PER_PAGE, page
      );
      let batch: Vec<Issue> = self.get_json(&url)?;
      let fetched = batch.len();

      out.extend(batch.into_iter().filter(|i| i.pull_request.is_none()));

      if fetched < PER_PAGE {
        return Ok(out);
      }
      page += 1;
    }
  }

  fn list_comments(&self, repo: &Repo, number: i64) -> Result<Vec<Comment>> {
    let url = format!(
      "{}/repos/{}/issues/{}/comments?per_page={}",
      API_ROOT, repo.full_name, number, PER_PAGE
    );
    self.get_json::<Vec<Comment>>(&url)
  }

  fn get_user(&self, login: &str) -> Option<User> {
    let url = format!("{}/users/{}", API_ROOT, login);
    self.get_json::<User>(&url).ok()
  }
}

// --- Env-backed backend for tests ---
//
// Fixtures, all optional:
// - ISR_TEST_REPO_JSON:     repo object (defaults to one built from the args)
// - ISR_TEST_ISSUES_JSON:   array of issue objects
// - ISR_TEST_COMMENTS_JSON: map of issue-number string -> array of comments
// - ISR_TEST_USERS_JSON:    map of login -> user object

struct GithubEnvTracker;

impl GithubEnvTracker {
  fn env_json(key: &str) -> Result<Option<serde_json::Value>> {
    match std::env::var(key) {
      Ok(s) => {
        let v = serde_json::from_str::<serde_json::Value>(&s).with_context(|| format!("parsing {}", key))?;
        Ok(Some(v))
      }
      Err(_) => Ok(None),
    }
  }
}

impl IssueTracker for GithubEnvTracker {
  fn get_repo(&self, owner: &str, name: &str) -> Result<Repo> {
    if let Some(v) = Self::env_json("ISR_TEST_REPO_JSON")? {
      return serde_json::from_value::<Repo>(v).context("decoding ISR_TEST_REPO_JSON");
    }

    Ok(Repo {
      name: name.to_string(),
      full_name: format!("{}/{}", owner, name),
      owner: RepoOwner {
        login: owner.to_string(),
      },
    })
  }

  fn list_open_issues(&self, _repo: &Repo) -> Result<Vec<Issue>> {
    let Some(v) = Self::env_json("ISR_TEST_ISSUES_JSON")? else {
      return Ok(Vec::new());
    };
    let issues: Vec<Issue> = serde_json::from_value(v).context("decoding ISR_TEST_ISSUES_JSON")?;

    Ok(issues.into_iter().filter(|i| i.pull_request.is_none()).collect())
  }

  fn list_comments(&self, _repo: &Repo, number: i64) -> Result<Vec<Comment>> {
    let Some(v) = Self::env_json("ISR_TEST_COMMENTS_JSON")? else {
      return Ok(Vec::new());
    };

    match v.get(number.to_string()) {
      Some(arr) => serde_json::from_value(arr.clone()).context("decoding ISR_TEST_COMMENTS_JSON entry"),
      None => Ok(Vec::new()),
    }
  }

  fn get_user(&self, login: &str) -> Option<User> {
    let map = Self::env_json("ISR_TEST_USERS_JSON").ok()??;
    let entry = map.get(login)?;
    serde_json::from_value(entry.clone()).ok()
  }
}

// --- User-lookup memoization ---
// Assignees repeat across issues; profile fetches are the only duplicated
// remote call in a run.

struct CachedTracker {
  inner: Box<dyn IssueTracker>,
  users: RefCell<HashMap<String, Option<User>>>,
}

impl CachedTracker {
  fn new(inner: Box<dyn IssueTracker>) -> Self {
    Self {
      inner,
      users: RefCell::new(HashMap::new()),
    }
  }
}

impl IssueTracker for CachedTracker {
  fn get_repo(&self, owner: &str, name: &str) -> Result<Repo> {
    self.inner.get_repo(owner, name)
  }

  fn list_open_issues(&self, repo: &Repo) -> Result<Vec<Issue>> {
    self.inner.list_open_issues(repo)
  }

  fn list_comments(&self, repo: &Repo, number: i64) -> Result<Vec<Comment>> {
    self.inner.list_comments(repo, number)
  }

  fn get_user(&self, login: &str) -> Option<User> {
    if let Some(cached) = self.users.borrow().get(login).cloned() {
      return cached;
    }
    let fetched = self.inner.get_user(login);
    self.users.borrow_mut().insert(login.to_string(), fetched.clone());

    fetched
  }
}

fn env_wants_mock() -> bool {
  ["ISR_TEST_REPO_JSON", "ISR_TEST_ISSUES_JSON", "ISR_TEST_COMMENTS_JSON", "ISR_TEST_USERS_JSON"]
    .iter()
    .any(|k| std::env::var(k).is_ok())
}

/// Select the backend for this run: env fixtures when present, HTTP otherwise.
pub fn build_tracker(token: &str) -> Box<dyn IssueTracker> {
  let inner: Box<dyn IssueTracker> = if env_wants_mock() {
    Box::new(GithubEnvTracker)
  } else {
    Box::new(GithubHttpTracker::new(token.to_string()))
  };

  Box::new(CachedTracker::new(inner))
}
