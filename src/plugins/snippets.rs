use crate::actions::Action;
use crate::common::payload::{decode_payload, encode_payload};
use crate::common::strip_prefix_ci;
use crate::launcher::LaunchOptions;
use crate::plugin::Plugin;
use crate::store::{Snippet, SnippetStore};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock, RwLockReadGuard};
use std::time::Duration;

pub const SNIPPETS_PREFIX: &str = "cs";
pub const DEFAULT_PASTE_DELAY_MS: u64 = 200;
pub const DEFAULT_RESULTS: usize = 5;

pub const ADD_ACTION_PREFIX: &str = "snippet:add:";
pub const REMOVE_ACTION_PREFIX: &str = "snippet:remove:";
pub const PASTE_ACTION_PREFIX: &str = "snippet:paste:";

pub const CREATE_LABEL: &str = "Create a new snippet";
pub const DELETE_LABEL: &str = "Delete Snippet (Shift+Enter)";
const EMPTY_TITLE: &str = "[Empty Title]";
const DESC: &str = "Snippet";

pub type SharedStore = Arc<RwLock<SnippetStore>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnippetsPluginSettings {
    /// Keyword that routes a query to this plugin.
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// Milliseconds to wait before the host pastes a snippet.
    #[serde(default = "default_paste_delay")]
    pub paste_delay_ms: u64,
    /// Number of snippets shown when the query holds only the prefix.
    #[serde(default = "default_results")]
    pub default_results: usize,
}

fn default_prefix() -> String {
    SNIPPETS_PREFIX.to_string()
}

fn default_paste_delay() -> u64 {
    DEFAULT_PASTE_DELAY_MS
}

fn default_results() -> usize {
    DEFAULT_RESULTS
}

impl Default for SnippetsPluginSettings {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            paste_delay_ms: DEFAULT_PASTE_DELAY_MS,
            default_results: DEFAULT_RESULTS,
        }
    }
}

/// Split free text into a new snippet. `title-content` yields both parts
/// (content trimmed); text without a dash becomes untitled content.
pub fn parse_new_snippet(input: &str) -> Snippet {
    match input.split_once('-') {
        Some((title, content)) => Snippet::new(title, content.trim()),
        None => Snippet::new("", input.trim()),
    }
}

fn display_title(title: &str) -> &str {
    if title.trim().is_empty() {
        EMPTY_TITLE
    } else {
        title
    }
}

pub fn snippet_action(prefix: &str, label: String, desc: String, snippet: &Snippet) -> Option<Action> {
    match encode_payload(snippet) {
        Ok(payload) => Some(Action {
            label,
            desc,
            action: format!("{prefix}{payload}"),
            args: None,
        }),
        Err(e) => {
            tracing::error!("failed to encode snippet payload: {e}");
            None
        }
    }
}

fn existing_result(snippet: &Snippet) -> Option<Action> {
    snippet_action(
        PASTE_ACTION_PREFIX,
        snippet.title.clone(),
        snippet.content.clone(),
        snippet,
    )
}

fn create_result(text: &str) -> Option<Action> {
    let snippet = parse_new_snippet(text);
    let desc = format!("{} | {}", display_title(&snippet.title), snippet.content);
    snippet_action(ADD_ACTION_PREFIX, CREATE_LABEL.into(), desc, &snippet)
}

pub struct SnippetsPlugin {
    store: SharedStore,
    settings: SnippetsPluginSettings,
}

impl SnippetsPlugin {
    /// Create a new snippets plugin instance over `store`.
    pub fn new(store: SharedStore) -> Self {
        Self {
            store,
            settings: SnippetsPluginSettings::default(),
        }
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    pub fn settings(&self) -> &SnippetsPluginSettings {
        &self.settings
    }

    pub fn paste_delay(&self) -> Duration {
        Duration::from_millis(self.settings.paste_delay_ms)
    }

    pub fn launch_options(&self) -> LaunchOptions {
        LaunchOptions {
            paste_delay: self.paste_delay(),
            requery: self.settings.prefix.clone(),
        }
    }

    fn read_store(&self) -> Option<RwLockReadGuard<'_, SnippetStore>> {
        match self.store.read() {
            Ok(guard) => Some(guard),
            Err(_) => {
                tracing::error!("snippet store lock poisoned");
                None
            }
        }
    }

    fn list_defaults(&self) -> Vec<Action> {
        let Some(store) = self.read_store() else {
            return Vec::new();
        };
        store
            .list()
            .iter()
            .take(self.settings.default_results)
            .filter_map(existing_result)
            .collect()
    }

    fn query(&self, text: &str) -> Vec<Action> {
        let Some(store) = self.read_store() else {
            return Vec::new();
        };
        let mut results = Vec::new();
        if !store.has_exact_content_match(text) {
            results.extend(create_result(text));
        }
        results.extend(store.search(text).into_iter().filter_map(existing_result));
        results
    }
}

/// Strip `word` when it is followed by whitespace or the end of input. An
/// empty `word` accepts everything.
fn strip_word<'a>(s: &'a str, word: &str) -> Option<&'a str> {
    if word.is_empty() {
        return Some(s);
    }
    let rest = strip_prefix_ci(s, word)?;
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        Some(rest)
    } else {
        None
    }
}

impl Plugin for SnippetsPlugin {
    fn search(&self, query: &str) -> Vec<Action> {
        let Some(rest) = strip_word(query.trim_start(), &self.settings.prefix) else {
            return Vec::new();
        };
        let text = rest.trim();
        if text.is_empty() {
            return self.list_defaults();
        }
        self.query(text)
    }

    fn name(&self) -> &str {
        "snippets"
    }

    fn description(&self) -> &str {
        "Search, create and paste saved text snippets (default prefix: `cs`)"
    }

    fn capabilities(&self) -> &[&str] {
        &["search"]
    }

    fn commands(&self) -> Vec<Action> {
        let prefix = &self.settings.prefix;
        vec![Action {
            label: prefix.clone(),
            desc: DESC.into(),
            action: format!("query:{prefix} "),
            args: None,
        }]
    }

    fn context_menu(&self, selected: &Action) -> Vec<Action> {
        let Some(payload) = selected.action.strip_prefix(PASTE_ACTION_PREFIX) else {
            return Vec::new();
        };
        let snippet: Snippet = match decode_payload(payload) {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!("context menu for undecodable snippet: {e}");
                return Vec::new();
            }
        };
        snippet_action(REMOVE_ACTION_PREFIX, DELETE_LABEL.into(), DESC.into(), &snippet)
            .into_iter()
            .collect()
    }

    fn default_settings(&self) -> Option<serde_json::Value> {
        serde_json::to_value(&self.settings).ok()
    }

    fn apply_settings(&mut self, value: &serde_json::Value) {
        match serde_json::from_value::<SnippetsPluginSettings>(value.clone()) {
            Ok(s) => {
                tracing::debug!(
                    prefix = %s.prefix,
                    paste_delay_ms = s.paste_delay_ms,
                    "applied snippet settings"
                );
                self.settings = s;
            }
            Err(e) => {
                tracing::warn!("invalid snippet settings, using defaults: {e}");
                self.settings = SnippetsPluginSettings::default();
            }
        }
    }
}
