// Pure edits on a decoded dashboard document
//
// Scans are first-match in existing order, insertions append at the end and
// nothing is ever re-sorted.
use super::dashboard::{DashboardConfig, View, ViewSummary};
use serde_json::{Map, Value};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Added,
    Updated,
}

impl DashboardConfig {
    /// Renames the view at `path`, or appends a placeholder view when absent.
    pub fn upsert_view(&mut self, title: &str, path: &str, placeholder_heading: &str) -> UpsertOutcome {
        let views = self.views_mut();

        match views.iter_mut().find(|v| v.path() == Some(path)) {
            Some(view) => {
                view.set_title(title);
                UpsertOutcome::Updated
            }
            None => {
                views.push(View::placeholder(title, path, placeholder_heading));
                UpsertOutcome::Added
            }
        }
    }

    /// Removes every view whose `path` matches. Returns whether anything was removed.
    pub fn delete_view(&mut self, path: &str) -> bool {
        if !self.has_view_list() {
            return false;
        }

        let views = self.views_mut();
        let before = views.len();
        views.retain(|v| v.path() != Some(path));
        views.len() < before
    }

    pub fn get_view(&self, path: &str) -> Option<&View> {
        self.views().iter().find(|v| v.path() == Some(path))
    }

    /// Replaces the body of the view at `path` (or appends it), forcing `path`
    /// onto the stored body.
    pub fn set_view_content(&mut self, path: &str, body: Map<String, Value>) -> UpsertOutcome {
        let mut replacement = View::from_body(body);
        replacement.set_path(path);

        let views = self.views_mut();
        match views.iter_mut().find(|v| v.path() == Some(path)) {
            Some(view) => {
                *view = replacement;
                UpsertOutcome::Updated
            }
            None => {
                views.push(replacement);
                UpsertOutcome::Added
            }
        }
    }

    /// Views that carry both a string `title` and `path`, in document order.
    pub fn list_views(&self) -> Vec<ViewSummary> {
        self.views()
            .iter()
            .filter_map(|v| match (v.title(), v.path()) {
                (Some(title), Some(path)) => Some(ViewSummary {
                    title: title.to_string(),
                    path: path.to_string(),
                }),
                _ => None,
            })
            .collect()
    }

    /// Paths that appear on more than one view (each reported once).
    pub fn duplicate_paths(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut duplicates: Vec<String> = Vec::new();

        for path in self.views().iter().filter_map(View::path) {
            if !seen.insert(path) && !duplicates.iter().any(|d| *d == path) {
                duplicates.push(path.to_string());
            }
        }

        duplicates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const HEADING: &str = "New section";

    fn config(value: Value) -> DashboardConfig {
        serde_json::from_value(value).unwrap()
    }

    fn paths(config: &DashboardConfig) -> Vec<Option<String>> {
        config
            .views()
            .iter()
            .map(|v| v.path().map(str::to_string))
            .collect()
    }

    #[test]
    fn test_upsert_rename_delete_scenario() {
        let mut doc = config(json!({ "views": [] }));

        assert_eq!(doc.upsert_view("A", "p1", HEADING), UpsertOutcome::Added);
        let views = doc.views();
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].title(), Some("A"));
        assert_eq!(views[0].path(), Some("p1"));
        assert_eq!(views[0].get("type"), Some(&json!("sections")));
        let original_sections = views[0].get("sections").cloned().unwrap();
        assert_eq!(original_sections[0]["cards"][0]["heading"], HEADING);

        assert_eq!(doc.upsert_view("B", "p1", HEADING), UpsertOutcome::Updated);
        let views = doc.views();
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].title(), Some("B"));
        assert_eq!(views[0].get("sections"), Some(&original_sections));

        assert!(doc.delete_view("p1"));
        assert!(doc.has_view_list());
        assert!(doc.views().is_empty());
    }

    #[test]
    fn test_upsert_keeps_position_and_appends_new() {
        let mut doc = config(json!({ "views": [
            { "title": "One", "path": "one", "cards": [{ "type": "entities" }] },
            { "title": "Two", "path": "two" },
        ]}));

        doc.upsert_view("Uno", "one", HEADING);
        doc.upsert_view("Three", "three", HEADING);

        assert_eq!(
            paths(&doc),
            vec![Some("one".to_string()), Some("two".to_string()), Some("three".to_string())]
        );
        let first = &doc.views()[0];
        assert_eq!(first.title(), Some("Uno"));
        assert_eq!(first.get("cards"), Some(&json!([{ "type": "entities" }])));
    }

    #[test]
    fn test_upsert_twice_is_stable() {
        let mut doc = config(json!({ "views": [{ "title": "x", "path": "x" }] }));

        doc.upsert_view("New", "new", HEADING);
        let after_first = doc.clone();
        doc.upsert_view("New", "new", HEADING);

        assert_eq!(doc, after_first);
    }

    #[test]
    fn test_upsert_creates_views_field() {
        let mut doc = DashboardConfig::default();
        doc.upsert_view("A", "a", HEADING);
        assert_eq!(paths(&doc), vec![Some("a".to_string())]);
    }

    #[test]
    fn test_delete_is_exact() {
        let mut doc = config(json!({ "views": [
            { "title": "A", "path": "a" },
            { "title": "B", "path": "b", "badges": ["x"] },
            { "title": "A again", "path": "a" },
            { "title": "No path" },
        ]}));

        assert!(doc.delete_view("a"));
        assert_eq!(doc, config(json!({ "views": [
            { "title": "B", "path": "b", "badges": ["x"] },
            { "title": "No path" },
        ]})));
    }

    #[test]
    fn test_delete_missing_path_is_noop() {
        let mut doc = config(json!({ "views": [{ "title": "A", "path": "a" }] }));
        let before = doc.clone();

        assert!(!doc.delete_view("zzz"));
        assert_eq!(doc, before);

        let mut empty = DashboardConfig::default();
        assert!(!empty.delete_view("a"));
        assert!(!empty.has_view_list());
    }

    #[test]
    fn test_get_view_first_match_wins() {
        let doc = config(json!({ "views": [
            { "title": "first", "path": "dup" },
            { "title": "second", "path": "dup" },
        ]}));

        assert_eq!(doc.get_view("dup").and_then(View::title), Some("first"));
        assert!(doc.get_view("missing").is_none());
        assert_eq!(doc.duplicate_paths(), vec!["dup".to_string()]);
    }

    #[test]
    fn test_set_view_content_forces_path() {
        let mut doc = config(json!({ "views": [
            { "title": "A", "path": "a" },
            { "title": "B", "path": "b" },
        ]}));

        let body = json!({ "title": "Replaced", "path": "wrong", "cards": [] });
        let outcome = doc.set_view_content("a", body.as_object().cloned().unwrap());

        assert_eq!(outcome, UpsertOutcome::Updated);
        let first = &doc.views()[0];
        assert_eq!(first.path(), Some("a"));
        assert_eq!(first.title(), Some("Replaced"));
        assert_eq!(first.get("cards"), Some(&json!([])));
        assert_eq!(paths(&doc), vec![Some("a".to_string()), Some("b".to_string())]);
    }

    #[test]
    fn test_set_view_content_appends_when_absent() {
        let mut doc = config(json!({ "views": [{ "title": "A", "path": "a" }] }));

        let body = json!({ "title": "C" });
        let outcome = doc.set_view_content("c", body.as_object().cloned().unwrap());

        assert_eq!(outcome, UpsertOutcome::Added);
        assert_eq!(paths(&doc), vec![Some("a".to_string()), Some("c".to_string())]);
    }

    #[test]
    fn test_list_views_skips_incomplete_entries() {
        let doc = config(json!({ "views": [
            { "title": "A", "path": "a" },
            { "title": "No path" },
            { "path": "no-title" },
            { "title": 7, "path": "numeric-title" },
            { "title": "B", "path": "b" },
        ]}));

        assert_eq!(
            doc.list_views(),
            vec![
                ViewSummary { title: "A".into(), path: "a".into() },
                ViewSummary { title: "B".into(), path: "b".into() },
            ]
        );
        assert!(DashboardConfig::default().list_views().is_empty());
    }

    #[test]
    fn test_malformed_view_entries_are_skipped_but_kept() {
        let mut doc = config(json!({ "views": [
            { "title": "A", "path": "a" },
            "oops",
            null,
        ]}));

        assert_eq!(
            doc.list_views(),
            vec![ViewSummary { title: "A".into(), path: "a".into() }]
        );
        assert_eq!(doc.get_view("a").and_then(View::title), Some("A"));

        doc.upsert_view("B", "b", HEADING);
        assert!(!doc.delete_view("oops"));
        assert_eq!(paths(&doc), vec![Some("a".to_string()), None, None, Some("b".to_string())]);

        let written = serde_json::to_value(&doc).unwrap();
        assert_eq!(written["views"][1], "oops");
        assert_eq!(written["views"][2], Value::Null);
    }

    #[test]
    fn test_null_views_become_a_list_on_first_edit() {
        let mut doc = config(json!({ "views": null }));
        assert!(doc.list_views().is_empty());
        assert!(!doc.delete_view("a"));

        doc.upsert_view("A", "a", HEADING);
        assert_eq!(paths(&doc), vec![Some("a".to_string())]);
    }
}
