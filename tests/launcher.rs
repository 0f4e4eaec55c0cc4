use snippet_launcher::actions::Action;
use snippet_launcher::launcher::{
    launch_action, parse_action_kind, ActionKind, LaunchOptions, LaunchOutcome,
};
use snippet_launcher::plugin::Plugin;
use snippet_launcher::plugins::snippets::{SnippetsPlugin, SNIPPETS_PREFIX};
use snippet_launcher::store::SNIPPETS_FILE;
use snippet_launcher::{Snippet, SnippetStore};
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tempfile::tempdir;

fn opts() -> LaunchOptions {
    LaunchOptions {
        paste_delay: Duration::from_millis(200),
        requery: SNIPPETS_PREFIX.into(),
    }
}

#[test]
fn create_result_adds_and_requeries() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(SNIPPETS_FILE);
    let store = Arc::new(RwLock::new(SnippetStore::load(&path).unwrap()));
    let plugin = SnippetsPlugin::new(store.clone());

    let results = plugin.search("cs sig - Best regards");
    let outcome = launch_action(&mut store.write().unwrap(), &results[0], &opts()).unwrap();
    assert_eq!(outcome, LaunchOutcome::Requery("cs".into()));

    let reloaded = SnippetStore::load(&path).unwrap();
    assert_eq!(reloaded.list(), &[Snippet::new("sig ", "Best regards")]);
    // Exact content now exists, so only the stored snippet comes back.
    assert_eq!(plugin.search("cs Best regards").len(), 1);
}

#[test]
fn existing_result_requests_paste() {
    let dir = tempdir().unwrap();
    let mut store = SnippetStore::load(dir.path().join(SNIPPETS_FILE)).unwrap();
    store.add(Snippet::new("email", "me@example.com")).unwrap();
    let store = Arc::new(RwLock::new(store));
    let mut plugin = SnippetsPlugin::new(store.clone());
    plugin.apply_settings(&serde_json::json!({ "paste_delay_ms": 50 }));

    let results = plugin.search("cs");
    let outcome = launch_action(
        &mut store.write().unwrap(),
        &results[0],
        &plugin.launch_options(),
    )
    .unwrap();
    assert_eq!(
        outcome,
        LaunchOutcome::Paste {
            text: "me@example.com".into(),
            delay: Duration::from_millis(50),
        }
    );
    assert_eq!(store.read().unwrap().len(), 1);
}

#[test]
fn delete_from_context_menu_removes_snippet() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(SNIPPETS_FILE);
    let mut store = SnippetStore::load(&path).unwrap();
    store.add(Snippet::new("a", "one")).unwrap();
    store.add(Snippet::new("b", "two")).unwrap();
    let store = Arc::new(RwLock::new(store));
    let plugin = SnippetsPlugin::new(store.clone());

    let results = plugin.search("cs one");
    let existing = results.iter().find(|a| a.label == "a").unwrap();
    let menu = plugin.context_menu(existing);
    let outcome = launch_action(&mut store.write().unwrap(), &menu[0], &opts()).unwrap();
    assert_eq!(outcome, LaunchOutcome::RemoveSelected);

    let reloaded = SnippetStore::load(&path).unwrap();
    assert_eq!(reloaded.list(), &[Snippet::new("b", "two")]);

    // Deleting again is a no-op rather than an error.
    let outcome = launch_action(&mut store.write().unwrap(), &menu[0], &opts()).unwrap();
    assert_eq!(outcome, LaunchOutcome::RemoveSelected);
    assert_eq!(store.read().unwrap().len(), 1);
}

#[test]
fn clipboard_and_query_actions() {
    let dir = tempdir().unwrap();
    let mut store = SnippetStore::load(dir.path().join(SNIPPETS_FILE)).unwrap();
    let clip = Action {
        label: "x".into(),
        desc: String::new(),
        action: "clipboard:hello".into(),
        args: None,
    };
    assert_eq!(
        launch_action(&mut store, &clip, &opts()).unwrap(),
        LaunchOutcome::Paste {
            text: "hello".into(),
            delay: Duration::from_millis(200),
        }
    );
    let query = Action {
        action: "query:cs mail".into(),
        ..clip
    };
    assert_eq!(
        launch_action(&mut store, &query, &opts()).unwrap(),
        LaunchOutcome::Requery("cs mail".into())
    );
}

#[test]
fn unknown_action_is_an_error() {
    let dir = tempdir().unwrap();
    let mut store = SnippetStore::load(dir.path().join(SNIPPETS_FILE)).unwrap();
    let bogus = Action {
        label: String::new(),
        desc: String::new(),
        action: "snippet:add:not-a-payload!".into(),
        args: None,
    };
    assert!(launch_action(&mut store, &bogus, &opts()).is_err());
    assert!(store.is_empty());
}

#[test]
fn persistence_failure_surfaces_through_launcher() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(SNIPPETS_FILE);
    let store = Arc::new(RwLock::new(SnippetStore::load(&path).unwrap()));
    let plugin = SnippetsPlugin::new(store.clone());
    std::fs::create_dir(&path).unwrap();

    let results = plugin.search("cs new text");
    let err = launch_action(&mut store.write().unwrap(), &results[0], &opts()).unwrap_err();
    let store_err = err
        .downcast_ref::<snippet_launcher::StoreError>()
        .expect("store error in chain");
    assert_eq!(store_err.kind(), snippet_launcher::ErrorKind::Persist);
}

#[test]
fn parse_action_kind_classifies_plugin_results() {
    let dir = tempdir().unwrap();
    let mut store = SnippetStore::load(dir.path().join(SNIPPETS_FILE)).unwrap();
    store.add(Snippet::new("email", "me@example.com")).unwrap();
    let plugin = SnippetsPlugin::new(Arc::new(RwLock::new(store)));

    let results = plugin.search("cs email");
    assert_eq!(
        parse_action_kind(&results[0]),
        ActionKind::SnippetAdd(Snippet::new("", "email"))
    );
    assert_eq!(
        parse_action_kind(&results[1]),
        ActionKind::SnippetPaste(Snippet::new("email", "me@example.com"))
    );
    let menu = plugin.context_menu(&results[1]);
    assert_eq!(
        parse_action_kind(&menu[0]),
        ActionKind::SnippetRemove(Snippet::new("email", "me@example.com"))
    );

    let clip = Action {
        label: String::new(),
        desc: String::new(),
        action: "clipboard:hi".into(),
        args: None,
    };
    assert_eq!(parse_action_kind(&clip), ActionKind::ClipboardText("hi"));
    let broken = Action {
        action: "snippet:paste:???".into(),
        ..clip
    };
    assert_eq!(
        parse_action_kind(&broken),
        ActionKind::Unknown("snippet:paste:???")
    );
}
