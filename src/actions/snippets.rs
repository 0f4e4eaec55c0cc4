use crate::store::{Snippet, SnippetStore};
use anyhow::Context;

pub fn add(store: &mut SnippetStore, snippet: Snippet) -> anyhow::Result<()> {
    store.add(snippet).context("add snippet")?;
    Ok(())
}

pub fn remove(store: &mut SnippetStore, snippet: &Snippet) -> anyhow::Result<()> {
    if !store.remove(snippet).context("remove snippet")? {
        tracing::info!("snippet '{}' was already gone", snippet.title);
    }
    Ok(())
}
