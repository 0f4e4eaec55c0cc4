use crate::actions::{self, Action};
use crate::common::payload::decode_payload;
use crate::plugins::snippets::{ADD_ACTION_PREFIX, PASTE_ACTION_PREFIX, REMOVE_ACTION_PREFIX};
use crate::store::{Snippet, SnippetStore};
use std::time::Duration;

/// Host-side parameters needed to turn an action into an outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchOptions {
    /// Delay the host should wait before pasting.
    pub paste_delay: Duration,
    /// Query to show again after a snippet was created.
    pub requery: String,
}

/// What the host should do after an action ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchOutcome {
    /// Place `text` on the clipboard and paste it after `delay`.
    Paste { text: String, delay: Duration },
    /// Re-run the given query so the result list reflects the change.
    Requery(String),
    /// Drop the selected result from the visible list.
    RemoveSelected,
}

/// A parsed action string. Text variants borrow from the [`Action`].
#[derive(Debug, PartialEq, Eq)]
pub enum ActionKind<'a> {
    SnippetAdd(Snippet),
    SnippetRemove(Snippet),
    SnippetPaste(Snippet),
    ClipboardText(&'a str),
    Query(&'a str),
    Unknown(&'a str),
}

fn decode_snippet(encoded: &str) -> Option<Snippet> {
    match decode_payload(encoded) {
        Ok(s) => Some(s),
        Err(e) => {
            tracing::warn!("invalid snippet payload: {e}");
            None
        }
    }
}

/// Classify `action` by its prefix. Snippet actions whose payload cannot be
/// decoded fall through to [`ActionKind::Unknown`].
pub fn parse_action_kind(action: &Action) -> ActionKind<'_> {
    let s = action.action.as_str();
    if let Some(rest) = s.strip_prefix(ADD_ACTION_PREFIX) {
        if let Some(snippet) = decode_snippet(rest) {
            return ActionKind::SnippetAdd(snippet);
        }
    }
    if let Some(rest) = s.strip_prefix(REMOVE_ACTION_PREFIX) {
        if let Some(snippet) = decode_snippet(rest) {
            return ActionKind::SnippetRemove(snippet);
        }
    }
    if let Some(rest) = s.strip_prefix(PASTE_ACTION_PREFIX) {
        if let Some(snippet) = decode_snippet(rest) {
            return ActionKind::SnippetPaste(snippet);
        }
    }
    if let Some(text) = s.strip_prefix("clipboard:") {
        return ActionKind::ClipboardText(text);
    }
    if let Some(q) = s.strip_prefix("query:") {
        return ActionKind::Query(q);
    }
    ActionKind::Unknown(s)
}

/// Run `action` against `store`.
///
/// Store mutations happen here; anything that touches the desktop (clipboard,
/// key presses, the result list) is returned to the caller as an outcome.
pub fn launch_action(
    store: &mut SnippetStore,
    action: &Action,
    opts: &LaunchOptions,
) -> anyhow::Result<LaunchOutcome> {
    match parse_action_kind(action) {
        ActionKind::SnippetAdd(snippet) => {
            actions::snippets::add(store, snippet)?;
            Ok(LaunchOutcome::Requery(opts.requery.clone()))
        }
        ActionKind::SnippetRemove(snippet) => {
            actions::snippets::remove(store, &snippet)?;
            Ok(LaunchOutcome::RemoveSelected)
        }
        ActionKind::SnippetPaste(snippet) => Ok(LaunchOutcome::Paste {
            text: snippet.content,
            delay: opts.paste_delay,
        }),
        ActionKind::ClipboardText(text) => Ok(LaunchOutcome::Paste {
            text: text.to_string(),
            delay: opts.paste_delay,
        }),
        ActionKind::Query(q) => Ok(LaunchOutcome::Requery(q.to_string())),
        ActionKind::Unknown(s) => anyhow::bail!("unknown action: {s}"),
    }
}
