use crate::actions::Action;
use std::collections::HashMap;

pub trait Plugin: Send + Sync {
    /// Return actions based on the query string
    fn search(&self, query: &str) -> Vec<Action>;
    /// Name of the plugin
    fn name(&self) -> &str;
    /// Short human readable description
    fn description(&self) -> &str;
    /// Capability identifiers supported by this plugin
    fn capabilities(&self) -> &[&str];
    /// Query shortcuts offered to the user
    fn commands(&self) -> Vec<Action> {
        Vec::new()
    }
    /// Secondary actions for a result previously returned by `search`
    fn context_menu(&self, _selected: &Action) -> Vec<Action> {
        Vec::new()
    }
    fn default_settings(&self) -> Option<serde_json::Value> {
        None
    }
    fn apply_settings(&mut self, _value: &serde_json::Value) {}
}

/// A manager that holds plugins
pub struct PluginManager {
    plugins: Vec<Box<dyn Plugin>>,
}

impl PluginManager {
    pub fn new() -> Self {
        Self {
            plugins: Vec::new(),
        }
    }

    pub fn register(&mut self, plugin: Box<dyn Plugin>) {
        tracing::debug!("registering plugin {}", plugin.name());
        self.plugins.push(plugin);
    }

    pub fn search(&self, query: &str) -> Vec<Action> {
        let mut actions = Vec::new();
        for p in &self.plugins {
            actions.extend(p.search(query));
        }
        actions
    }

    pub fn context_menu(&self, selected: &Action) -> Vec<Action> {
        let mut actions = Vec::new();
        for p in &self.plugins {
            actions.extend(p.context_menu(selected));
        }
        actions
    }

    /// Push stored plugin settings into each plugin. Plugins without an entry
    /// keep their current configuration.
    pub fn apply_settings(&mut self, settings: &HashMap<String, serde_json::Value>) {
        for p in &mut self.plugins {
            if let Some(value) = settings.get(p.name()) {
                p.apply_settings(value);
            }
        }
    }
}

impl Default for PluginManager {
    fn default() -> Self {
        Self::new()
    }
}
