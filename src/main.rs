//! `snippets` - command-line front end for the snippet store
//!
//! Drives the same store, plugin and launcher a desktop host would use, and
//! prints results instead of rendering them.

use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use snippet_launcher::actions::Action;
use snippet_launcher::launcher::{launch_action, LaunchOutcome};
use snippet_launcher::logging;
use snippet_launcher::plugin::{Plugin, PluginManager};
use snippet_launcher::plugins::snippets::SnippetsPlugin;
use snippet_launcher::settings::{Settings, SETTINGS_FILE};
use snippet_launcher::{Snippet, SnippetStore};

#[derive(Parser)]
#[command(name = "snippets")]
#[command(author, version, about = "Search, create and paste saved text snippets")]
#[command(propagate_version = true)]
struct Cli {
    /// Path to the snippet file (overrides the settings file)
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    /// Path to the settings file
    #[arg(short, long, global = true, default_value = SETTINGS_FILE)]
    settings: String,

    /// Move a corrupt snippet file aside and start with an empty list
    #[arg(long, global = true)]
    recover: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all snippets in stored order
    List,
    /// Show snippets whose title or content contains TEXT (ignoring case)
    Search { text: String },
    /// Append a snippet
    Add {
        /// Snippet title
        #[arg(short, long, default_value = "")]
        title: String,
        /// Snippet content
        content: String,
    },
    /// Remove the first snippet with the given title and content
    Rm {
        /// Snippet title
        #[arg(short, long, default_value = "")]
        title: String,
        /// Snippet content
        content: String,
    },
    /// Run a launcher query (e.g. `cs`, `cs mail`, `cs sig - Best regards`) and print the results
    Query {
        /// Query text
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
        /// Launch the N-th result (1-based)
        #[arg(short, long)]
        run: Option<usize>,
        /// Show the context menu of the N-th result (1-based)
        #[arg(short, long, conflicts_with = "run")]
        menu: Option<usize>,
    },
}

fn print_snippet(index: usize, s: &Snippet) {
    let title = if s.title.is_empty() { "[no title]" } else { &s.title };
    println!("{index:>3}. {title} | {}", s.content);
}

fn print_action(index: usize, a: &Action) {
    println!("{index:>3}. {} - {}", a.label, a.desc);
}

fn pick(results: &[Action], n: usize) -> anyhow::Result<&Action> {
    n.checked_sub(1)
        .and_then(|i| results.get(i))
        .ok_or_else(|| anyhow!("no result #{n} ({} results)", results.len()))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load(&cli.settings)?;
    logging::init(settings.debug_logging, settings.log_path());

    let path = match cli.file {
        Some(p) => p,
        None => settings.snippets_path()?,
    };
    let store = if cli.recover {
        SnippetStore::load_or_backup(&path)?
    } else {
        SnippetStore::load(&path).context("use --recover to start over with an empty list")?
    };
    tracing::debug!("using snippet file {}", path.display());

    match cli.command {
        Commands::List => {
            for (i, s) in store.list().iter().enumerate() {
                print_snippet(i + 1, s);
            }
        }
        Commands::Search { text } => {
            let found: Vec<&Snippet> = if text.trim().is_empty() {
                store.list().iter().collect()
            } else {
                store.search(&text)
            };
            for (i, s) in found.into_iter().enumerate() {
                print_snippet(i + 1, s);
            }
        }
        Commands::Add { title, content } => {
            let mut store = store;
            store.add(Snippet::new(title, content))?;
            println!("Added snippet ({} total)", store.len());
        }
        Commands::Rm { title, content } => {
            let mut store = store;
            if store.remove(&Snippet::new(title, content))? {
                println!("Removed snippet ({} left)", store.len());
            } else {
                println!("No matching snippet");
            }
        }
        Commands::Query { text, run, menu } => {
            let store = Arc::new(RwLock::new(store));
            let mut plugin = SnippetsPlugin::new(store.clone());
            if let Some(value) = settings.plugin_settings.get(plugin.name()) {
                plugin.apply_settings(value);
            }
            let opts = plugin.launch_options();
            let mut manager = PluginManager::new();
            manager.register(Box::new(plugin));

            let results = manager.search(&text.join(" "));
            if let Some(n) = menu {
                let selected = pick(&results, n)?;
                for (i, a) in manager.context_menu(selected).iter().enumerate() {
                    print_action(i + 1, a);
                }
            } else if let Some(n) = run {
                let selected = pick(&results, n)?;
                let mut guard = store
                    .write()
                    .map_err(|_| anyhow!("snippet store lock poisoned"))?;
                match launch_action(&mut guard, selected, &opts)? {
                    LaunchOutcome::Paste { text, delay } => {
                        tracing::info!("paste requested after {}ms", delay.as_millis());
                        println!("{text}");
                    }
                    LaunchOutcome::Requery(q) => println!("Saved. Query again with `{q}`"),
                    LaunchOutcome::RemoveSelected => println!("Removed '{}'", selected.label),
                }
            } else {
                for (i, a) in results.iter().enumerate() {
                    print_action(i + 1, a);
                }
            }
        }
    }
    Ok(())
}
