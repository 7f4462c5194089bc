//! Presentation state driven by the event loop
//!
//! Holds what the user is looking at (active tab, focused panel, cursors,
//! overlays). Resource membership is never kept here between refreshes: every
//! action that can change it rebuilds the catalog from disk.

use crate::domain::{self, Category, Item, ItemCatalog};
use crate::preview::{self, Preview};
use crate::tree::{DirTree, TreeLine};

/// The two navigable panels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Available,
    Applied,
}

impl Panel {
    pub fn other(self) -> Self {
        match self {
            Panel::Available => Panel::Applied,
            Panel::Applied => Panel::Available,
        }
    }
}

/// UI view state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    /// Main list/preview view
    Browsing,
    /// Help overlay visible
    Help,
    /// Tree overlay for a directory item
    Tree(Item),
}

#[derive(Debug)]
pub struct App {
    pub categories: Vec<Category>,
    pub active_tab: usize,
    pub focus: Panel,
    pub catalog: ItemCatalog,
    pub available_cursor: usize,
    pub applied_cursor: usize,
    pub preview: Preview,
    pub preview_scroll: u16,
    pub view: ViewState,
    /// Rows of the open tree overlay, collected when it opened
    pub tree_rows: Vec<TreeLine>,
    pub tree_scroll: u16,
    /// Last error from apply/remove, shown in the status bar
    pub status: Option<String>,
}

impl App {
    /// Creates the app and performs the first refresh. `categories` must not
    /// be empty; discovery rejects an empty store before this point.
    pub fn new(categories: Vec<Category>) -> Self {
        let mut app = Self {
            categories,
            active_tab: 0,
            focus: Panel::Available,
            catalog: ItemCatalog::default(),
            available_cursor: 0,
            applied_cursor: 0,
            preview: Preview::empty(),
            preview_scroll: 0,
            view: ViewState::Browsing,
            tree_rows: Vec::new(),
            tree_scroll: 0,
            status: None,
        };
        app.refresh();
        app
    }

    pub fn active_category(&self) -> Option<&Category> {
        self.categories.get(self.active_tab)
    }

    /// Rebuilds the catalog of the active category from disk and clamps the
    /// cursors to the new list lengths.
    pub fn refresh(&mut self) {
        self.catalog = match self.active_category() {
            Some(category) => domain::list_items(category),
            None => ItemCatalog::default(),
        };
        self.available_cursor = clamp_cursor(self.available_cursor, self.catalog.available.len());
        self.applied_cursor = clamp_cursor(self.applied_cursor, self.catalog.applied.len());
        self.update_preview();
    }

    pub fn next_tab(&mut self) {
        if self.categories.is_empty() {
            return;
        }
        self.active_tab = (self.active_tab + 1) % self.categories.len();
        self.status = None;
        self.refresh();
    }

    pub fn prev_tab(&mut self) {
        if self.categories.is_empty() {
            return;
        }
        let len = self.categories.len();
        self.active_tab = (self.active_tab + len - 1) % len;
        self.status = None;
        self.refresh();
    }

    pub fn focus_panel(&mut self, panel: Panel) {
        self.focus = panel;
        self.update_preview();
    }

    pub fn toggle_panel(&mut self) {
        self.focus_panel(self.focus.other());
    }

    pub fn cursor_down(&mut self) {
        let len = self.focused_items().len();
        let cursor = self.focused_cursor_mut();
        if *cursor + 1 < len {
            *cursor += 1;
        }
        self.update_preview();
    }

    pub fn cursor_up(&mut self) {
        let cursor = self.focused_cursor_mut();
        *cursor = cursor.saturating_sub(1);
        self.update_preview();
    }

    pub fn scroll_preview_down(&mut self) {
        let max = u16::try_from(self.preview.len().saturating_sub(1)).unwrap_or(u16::MAX);
        self.preview_scroll = self.preview_scroll.saturating_add(1).min(max);
    }

    pub fn scroll_preview_up(&mut self) {
        self.preview_scroll = self.preview_scroll.saturating_sub(1);
    }

    pub fn focused_items(&self) -> &[Item] {
        match self.focus {
            Panel::Available => &self.catalog.available,
            Panel::Applied => &self.catalog.applied,
        }
    }

    fn focused_cursor_mut(&mut self) -> &mut usize {
        match self.focus {
            Panel::Available => &mut self.available_cursor,
            Panel::Applied => &mut self.applied_cursor,
        }
    }

    pub fn focused_cursor(&self) -> usize {
        match self.focus {
            Panel::Available => self.available_cursor,
            Panel::Applied => self.applied_cursor,
        }
    }

    pub fn selected_item(&self) -> Option<&Item> {
        self.focused_items().get(self.focused_cursor())
    }

    /// Applies the selected item from Available or removes it from Applied,
    /// then refreshes regardless of the outcome.
    pub fn toggle_selected(&mut self) {
        let (Some(category), Some(item)) = (self.active_category(), self.selected_item()) else {
            return;
        };
        let result = match self.focus {
            Panel::Available => domain::apply(category, item),
            Panel::Applied => domain::remove(category, item),
        };
        self.status = result.err().map(|e| format!("Error: {}", e));
        self.refresh();
    }

    /// Opens the tree overlay when the selection is a directory. The tree is
    /// walked once here, not on every redraw.
    pub fn open_tree(&mut self) {
        let directory = self.selected_item().filter(|item| item.is_directory).cloned();
        if let Some(item) = directory {
            self.tree_rows = DirTree::new(&item.global_path).lines();
            self.tree_scroll = 0;
            self.view = ViewState::Tree(item);
        }
    }

    pub fn open_help(&mut self) {
        self.view = ViewState::Help;
    }

    pub fn close_overlay(&mut self) {
        self.view = ViewState::Browsing;
        self.tree_rows.clear();
        self.tree_scroll = 0;
    }

    pub fn scroll_tree_down(&mut self) {
        if !matches!(self.view, ViewState::Tree(_)) {
            return;
        }
        let max = u16::try_from(self.tree_rows.len().saturating_sub(1)).unwrap_or(u16::MAX);
        self.tree_scroll = self.tree_scroll.saturating_add(1).min(max);
    }

    pub fn scroll_tree_up(&mut self) {
        self.tree_scroll = self.tree_scroll.saturating_sub(1);
    }

    /// Item and cached rows of the open tree overlay, if any
    pub fn overlay_tree(&self) -> Option<(&Item, &[TreeLine])> {
        match &self.view {
            ViewState::Tree(item) => Some((item, self.tree_rows.as_slice())),
            _ => None,
        }
    }

    fn update_preview(&mut self) {
        self.preview = match self.selected_item() {
            Some(item) => preview::generate_preview(item),
            None => Preview::empty(),
        };
        self.preview_scroll = 0;
    }
}

fn clamp_cursor(cursor: usize, len: usize) -> usize {
    cursor.min(len.saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    /// Builds a store from relative paths; entries ending in `/` are
    /// category directories without files.
    fn store_with(temp: &TempDir, entries: &[&str]) -> Vec<Category> {
        let store = temp.path().join("store");
        for entry in entries {
            let path = store.join(entry);
            if entry.ends_with('/') {
                fs::create_dir_all(&path).unwrap();
            } else {
                fs::create_dir_all(path.parent().unwrap()).unwrap();
                fs::write(&path, *entry).unwrap();
            }
        }
        domain::discover_categories(&store, &temp.path().join("project")).unwrap()
    }

    fn names(items: &[Item]) -> Vec<&str> {
        items.iter().map(|i| i.name.as_str()).collect()
    }

    mod navigation_tests {
        use super::*;

        #[test]
        fn test_new_loads_first_category() {
            let temp = TempDir::new().unwrap();
            let categories = store_with(&temp, &["skills/s.md", "agents/a.md"]);
            let app = App::new(categories);

            assert_eq!(app.active_category().unwrap().name, "agents");
            assert_eq!(names(&app.catalog.available), vec!["a.md"]);
            assert_eq!(app.selected_item().unwrap().name, "a.md");
        }

        #[test]
        fn test_tabs_wrap_both_ways() {
            let temp = TempDir::new().unwrap();
            let categories = store_with(&temp, &["agents/a.md", "skills/s.md"]);
            let mut app = App::new(categories);

            app.prev_tab();
            assert_eq!(app.active_category().unwrap().name, "skills");
            assert_eq!(names(&app.catalog.available), vec!["s.md"]);
            app.next_tab();
            assert_eq!(app.active_category().unwrap().name, "agents");
        }

        #[test]
        fn test_cursor_stays_in_bounds() {
            let temp = TempDir::new().unwrap();
            let categories = store_with(&temp, &["agents/a.md", "agents/b.md"]);
            let mut app = App::new(categories);

            app.cursor_up();
            assert_eq!(app.available_cursor, 0);
            app.cursor_down();
            app.cursor_down();
            assert_eq!(app.available_cursor, 1);
            assert_eq!(app.selected_item().unwrap().name, "b.md");
        }

        #[test]
        fn test_empty_panel_has_no_selection() {
            let temp = TempDir::new().unwrap();
            let categories = store_with(&temp, &["agents/a.md"]);
            let mut app = App::new(categories);

            app.focus_panel(Panel::Applied);
            assert!(app.selected_item().is_none());
            app.toggle_selected();
            assert!(app.status.is_none());
        }

        #[test]
        fn test_preview_scroll_is_bounded() {
            let temp = TempDir::new().unwrap();
            let categories = store_with(&temp, &["agents/a.md"]);
            let mut app = App::new(categories);

            app.scroll_preview_up();
            assert_eq!(app.preview_scroll, 0);
            for _ in 0..50 {
                app.scroll_preview_down();
            }
            assert_eq!(usize::from(app.preview_scroll), app.preview.len() - 1);
        }
    }

    #[cfg(unix)]
    mod toggle_tests {
        use super::*;

        #[test]
        fn test_apply_and_remove_through_toggle() {
            let temp = TempDir::new().unwrap();
            let categories = store_with(&temp, &["agents/a.md", "agents/b.md"]);
            let mut app = App::new(categories);

            app.toggle_selected();
            assert!(app.status.is_none());
            assert_eq!(names(&app.catalog.available), vec!["b.md"]);
            assert_eq!(names(&app.catalog.applied), vec!["a.md"]);

            app.toggle_panel();
            app.toggle_selected();
            assert!(app.status.is_none());
            assert_eq!(names(&app.catalog.available), vec!["a.md", "b.md"]);
            assert!(app.catalog.applied.is_empty());
        }

        #[test]
        fn test_failed_apply_sets_status_and_refreshes() {
            let temp = TempDir::new().unwrap();
            let categories = store_with(&temp, &["agents/a.md"]);
            let project_dir = categories[0].project_dir.clone();
            fs::create_dir_all(&project_dir).unwrap();
            fs::write(project_dir.join("a.md"), "local file").unwrap();
            let mut app = App::new(categories);

            app.toggle_selected();
            let status = app.status.clone().unwrap();
            assert!(status.starts_with("Error:"));
            assert_eq!(names(&app.catalog.available), vec!["a.md"]);

            app.next_tab();
            assert!(app.status.is_none());
        }

        #[test]
        fn test_cursor_clamped_after_last_item_applied() {
            let temp = TempDir::new().unwrap();
            let categories = store_with(&temp, &["agents/a.md", "agents/b.md"]);
            let mut app = App::new(categories);

            app.cursor_down();
            app.toggle_selected();
            assert_eq!(app.available_cursor, 0);
            assert_eq!(app.selected_item().unwrap().name, "a.md");
        }

        #[test]
        fn test_externally_removed_resource_disappears_on_refresh() {
            let temp = TempDir::new().unwrap();
            let categories = store_with(&temp, &["agents/a.md"]);
            let mut app = App::new(categories);
            app.toggle_selected();
            let global = app.catalog.applied[0].global_path.clone();

            fs::remove_file(&global).unwrap();
            app.refresh();
            assert!(app.catalog.is_empty());
            let link = Path::new(&app.categories[0].project_dir).join("a.md");
            assert!(fs::symlink_metadata(link).is_err());
        }
    }

    mod overlay_tests {
        use super::*;

        #[test]
        fn test_tree_only_opens_for_directories() {
            let temp = TempDir::new().unwrap();
            let categories = store_with(&temp, &["skills/plain.md"]);
            fs::create_dir(categories[0].global_dir.join("bundle")).unwrap();
            let mut app = App::new(categories);

            // "bundle" sorts before "plain.md"
            app.open_tree();
            assert!(matches!(app.view, ViewState::Tree(_)));
            assert!(app.overlay_tree().is_some());
            app.close_overlay();

            app.cursor_down();
            app.open_tree();
            assert_eq!(app.view, ViewState::Browsing);
            assert!(app.overlay_tree().is_none());
        }

        #[test]
        fn test_tree_rows_are_cached_and_scroll_bounded() {
            let temp = TempDir::new().unwrap();
            let categories = store_with(
                &temp,
                &["skills/bundle/one.md", "skills/bundle/two.md", "skills/bundle/three.md"],
            );
            let mut app = App::new(categories);

            app.open_tree();
            let (_, rows) = app.overlay_tree().unwrap();
            assert_eq!(rows.len(), 3);

            // Later filesystem changes do not reach an open overlay
            let bundle = app.categories[0].global_dir.join("bundle");
            fs::remove_file(bundle.join("one.md")).unwrap();
            assert_eq!(app.overlay_tree().unwrap().1.len(), 3);

            for _ in 0..10 {
                app.scroll_tree_down();
            }
            assert_eq!(app.tree_scroll, 2);
            app.scroll_tree_up();
            assert_eq!(app.tree_scroll, 1);

            app.close_overlay();
            assert!(app.tree_rows.is_empty());
            assert_eq!(app.tree_scroll, 0);
            app.scroll_tree_down();
            assert_eq!(app.tree_scroll, 0);
        }

        #[test]
        fn test_help_overlay() {
            let temp = TempDir::new().unwrap();
            let mut app = App::new(store_with(&temp, &["agents/"]));

            app.open_help();
            assert_eq!(app.view, ViewState::Help);
            app.close_overlay();
            assert_eq!(app.view, ViewState::Browsing);
        }
    }
}
