use changes_highlight::HighlightOptions;
use url::Url;

use crate::RenderError;

/// Request-scoped rendering state. Cheap to clone; never shared mutably.
#[derive(Clone, Debug)]
pub struct RenderContext {
    /// Root of the changes app, always ending in `/`.
    pub base_uri: Url,
    /// Repository the changes belong to, e.g. `go.googlesource.com/go`.
    pub repo_spec: String,
    pub change_id: Option<u64>,
    /// Render user names as plain text instead of profile links.
    pub disable_users: bool,
    pub highlight: HighlightOptions,
}

impl RenderContext {
    pub fn new(base_uri: &str, repo_spec: impl Into<String>) -> Result<Self, RenderError> {
        let mut base = Url::parse(base_uri)?;
        if base.cannot_be_a_base() {
            return Err(RenderError::OpaqueBaseUri(base_uri.to_string()));
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self {
            base_uri: base,
            repo_spec: repo_spec.into(),
            change_id: None,
            disable_users: false,
            highlight: HighlightOptions::default(),
        })
    }

    pub fn with_change(mut self, id: u64) -> Self {
        self.change_id = Some(id);
        self
    }

    pub fn with_highlight(mut self, highlight: HighlightOptions) -> Self {
        self.highlight = highlight;
        self
    }

    pub fn change_url(&self, id: u64) -> Result<Url, RenderError> {
        Ok(self.base_uri.join(&id.to_string())?)
    }

    pub fn files_url(&self, id: u64) -> Result<Url, RenderError> {
        Ok(self.base_uri.join(&format!("{id}/files"))?)
    }

    /// Permalink to a comment on the current change.
    pub fn comment_anchor(&self, comment_id: u64) -> Result<Url, RenderError> {
        let change = self.change_id.ok_or(RenderError::NoChange)?;
        let mut url = self.change_url(change)?;
        url.set_fragment(Some(&format!("comment-{comment_id}")));
        Ok(url)
    }
}
