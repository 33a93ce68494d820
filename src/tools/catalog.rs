//! Tool catalog
//!
//! Maps tool kinds to their descriptors and keeps them in selector order.

use std::time::Duration;

use log::debug;

use crate::config::HttpConfig;
use crate::error::Result;
use crate::shell::ToolDescriptor;

use super::builtin;

/// Ordered set of tool descriptors keyed by kind
#[derive(Debug, Clone)]
pub struct ToolCatalog {
    tools: Vec<ToolDescriptor>,
}

impl ToolCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    /// Catalog of every builtin tool
    ///
    /// The HTTP tester shares one client built from `http`.
    pub fn builtin(http: &HttpConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(http.timeout_ms))
            .user_agent(http.user_agent.clone())
            .build()?;

        let mut catalog = Self::new();
        catalog.add(builtin::json_format::descriptor());
        catalog.add(builtin::base64_codec::descriptor());
        catalog.add(builtin::url_codec::descriptor());
        catalog.add(builtin::regex_tester::descriptor());
        catalog.add(builtin::hash_gen::descriptor());
        catalog.add(builtin::uuid_gen::descriptor());
        catalog.add(builtin::timestamp::descriptor());
        catalog.add(builtin::markdown::descriptor());
        catalog.add(builtin::color::descriptor());
        catalog.add(builtin::jwt::descriptor());
        catalog.add(builtin::http_request::descriptor(client));
        catalog.add(builtin::css_minify::descriptor());
        catalog.add(builtin::json_csv::descriptor());
        debug!("Loaded {} builtin tools", catalog.len());
        Ok(catalog)
    }

    /// Get a descriptor by kind
    pub fn get(&self, kind: &str) -> Option<&ToolDescriptor> {
        self.tools.iter().find(|t| t.kind == kind)
    }

    /// List all kinds, in selector order
    pub fn list(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.kind.as_str()).collect()
    }

    /// Get all descriptors, in selector order
    pub fn all(&self) -> impl Iterator<Item = &ToolDescriptor> {
        self.tools.iter()
    }

    /// Get number of tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if catalog is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Add a descriptor, replacing any existing one of the same kind in place
    pub fn add(&mut self, tool: ToolDescriptor) {
        match self.tools.iter_mut().find(|t| t.kind == tool.kind) {
            Some(existing) => *existing = tool,
            None => self.tools.push(tool),
        }
    }

    /// Remove a descriptor from the catalog
    pub fn remove(&mut self, kind: &str) -> Option<ToolDescriptor> {
        let index = self.tools.iter().position(|t| t.kind == kind)?;
        Some(self.tools.remove(index))
    }

    /// Check if a kind exists
    pub fn contains(&self, kind: &str) -> bool {
        self.get(kind).is_some()
    }
}

impl Default for ToolCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builtin() -> ToolCatalog {
        ToolCatalog::builtin(&HttpConfig::default()).unwrap()
    }

    #[test]
    fn test_catalog_new_empty() {
        let catalog = ToolCatalog::new();
        assert!(catalog.is_empty());
        assert_eq!(catalog.len(), 0);
    }

    #[test]
    fn test_builtin_order() {
        let catalog = builtin();
        assert_eq!(
            catalog.list(),
            vec![
                "json",
                "base64",
                "url",
                "regex",
                "hash",
                "uuid",
                "timestamp",
                "markdown",
                "color",
                "jwt",
                "http",
                "css",
                "jsonToCsv"
            ]
        );
    }

    #[test]
    fn test_builtin_titles() {
        let catalog = builtin();
        assert_eq!(catalog.get("json").unwrap().title, "JSON Formatter");
        assert_eq!(catalog.get("base64").unwrap().title, "Base64 Encoder/Decoder");
        assert_eq!(catalog.get("jsonToCsv").unwrap().title, "JSON to CSV Converter");
        assert_eq!(catalog.get("http").unwrap().title, "HTTP Request Tester");
    }

    #[test]
    fn test_builtin_all_wired() {
        let catalog = builtin();
        assert!(catalog.all().all(|t| t.is_wired()));
        assert!(catalog.all().all(|t| !t.body_template.is_empty()));
    }

    #[test]
    fn test_catalog_get_nonexistent() {
        let catalog = builtin();
        assert!(catalog.get("nonexistent").is_none());
        assert!(!catalog.contains(""));
    }

    #[test]
    fn test_catalog_add() {
        let mut catalog = ToolCatalog::new();
        catalog.add(ToolDescriptor::new("echo", "Echo", "<input>"));

        assert!(catalog.contains("echo"));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_catalog_add_replaces_in_place() {
        let mut catalog = ToolCatalog::new();
        catalog.add(ToolDescriptor::new("a", "A", ""));
        catalog.add(ToolDescriptor::new("b", "B", ""));
        catalog.add(ToolDescriptor::new("a", "A2", ""));

        assert_eq!(catalog.list(), vec!["a", "b"]);
        assert_eq!(catalog.get("a").unwrap().title, "A2");
    }

    #[test]
    fn test_catalog_remove() {
        let mut catalog = builtin();
        let removed = catalog.remove("css");

        assert!(removed.is_some());
        assert_eq!(removed.unwrap().kind, "css");
        assert!(!catalog.contains("css"));
        assert_eq!(catalog.len(), 12);
        assert!(catalog.remove("css").is_none());
    }
}
