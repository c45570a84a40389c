/// Path constants shared across the catalog.
///
/// The quiz data is published as static JSON files under `data/`, with a
/// single index file listing every topic and the file that holds its
/// questions.

/// Relative path of the topic index on the server.
pub const TOPICS_INDEX_PATH: &str = "data/topics.json";

/// Path segment the app is served under when deployed to GitHub Pages.
pub const DEPLOY_PATH_SEGMENT: &str = "/Promotion-cbt-app";

/// Resolve the base prefix for a given request path: deployments under the
/// project path segment keep it, everything else gets no prefix.
///
/// Exported for the deployed app, which resolves its base from the page
/// path; the CLI takes its base URL from configuration instead.
pub fn deployment_base(path: &str) -> &'static str {
    if path.starts_with(DEPLOY_PATH_SEGMENT) {
        DEPLOY_PATH_SEGMENT
    } else {
        ""
    }
}

/// Join a base URL and a relative file path without doubling slashes.
pub fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}
