//! Employee access selection.
//!
//! The access list decides which employees appear in the employee tables.
//! It is edited through a dual list: available employees on the left,
//! selected employees on the right, with highlight-and-move controls.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{AdminError, AdminResult};

use super::EmployeeDirectory;

/// A dual-list editing action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum DualListAction {
    /// Filter the available list by name.
    Search {
        /// Case-insensitive name fragment; empty clears the filter.
        query: String,
    },
    /// Highlight or unhighlight an available employee.
    ToggleAvailable {
        /// The employee id.
        id: String,
    },
    /// Highlight or unhighlight a selected employee.
    ToggleSelected {
        /// The employee id.
        id: String,
    },
    /// Move highlighted available employees to the selected list.
    MoveHighlightedRight,
    /// Move highlighted selected employees back to the available list.
    MoveHighlightedLeft,
    /// Select every employee.
    MoveAllRight,
    /// Deselect every employee.
    MoveAllLeft,
}

/// Working copy of the access list while it is being edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DualListSession {
    selected: BTreeSet<String>,
    search: String,
    highlighted_available: BTreeSet<String>,
    highlighted_selected: BTreeSet<String>,
}

impl DualListSession {
    /// Starts a session from the currently committed selection.
    pub fn new(selected: impl IntoIterator<Item = String>) -> Self {
        Self {
            selected: selected.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Applies one action against the directory.
    pub fn apply(&mut self, action: &DualListAction, directory: &EmployeeDirectory) {
        match action {
            DualListAction::Search { query } => self.search = query.clone(),
            DualListAction::ToggleAvailable { id } => toggle(&mut self.highlighted_available, id),
            DualListAction::ToggleSelected { id } => toggle(&mut self.highlighted_selected, id),
            DualListAction::MoveHighlightedRight => {
                if !self.highlighted_available.is_empty() {
                    let moved = std::mem::take(&mut self.highlighted_available);
                    self.selected.extend(moved);
                }
            }
            DualListAction::MoveHighlightedLeft => {
                if !self.highlighted_selected.is_empty() {
                    for id in std::mem::take(&mut self.highlighted_selected) {
                        self.selected.remove(&id);
                    }
                }
            }
            DualListAction::MoveAllRight => {
                self.selected = directory.all().iter().map(|e| e.id.clone()).collect();
                self.highlighted_available.clear();
            }
            DualListAction::MoveAllLeft => {
                self.selected.clear();
                self.highlighted_selected.clear();
            }
        }
    }

    /// Ids of employees not selected whose name matches the search,
    /// in roster order.
    pub fn available<'a>(&self, directory: &'a EmployeeDirectory) -> Vec<&'a str> {
        let search = self.search.to_lowercase();
        directory
            .all()
            .iter()
            .filter(|e| !self.selected.contains(&e.id))
            .filter(|e| e.name.to_lowercase().contains(&search))
            .map(|e| e.id.as_str())
            .collect()
    }

    /// Ids of selected employees, in roster order.
    pub fn selected<'a>(&self, directory: &'a EmployeeDirectory) -> Vec<&'a str> {
        directory
            .all()
            .iter()
            .filter(|e| self.selected.contains(&e.id))
            .map(|e| e.id.as_str())
            .collect()
    }

    /// Current search text.
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Highlighted ids on the available side.
    pub fn highlighted_available(&self) -> &BTreeSet<String> {
        &self.highlighted_available
    }

    /// Highlighted ids on the selected side.
    pub fn highlighted_selected(&self) -> &BTreeSet<String> {
        &self.highlighted_selected
    }

    /// Consumes the session, returning the selected ids.
    pub fn into_selection(self) -> BTreeSet<String> {
        self.selected
    }
}

fn toggle(set: &mut BTreeSet<String>, id: &str) {
    if !set.remove(id) {
        set.insert(id.to_string());
    }
}

/// The committed set of employees visible in the employee tables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessSelection {
    visible: BTreeSet<String>,
}

impl AccessSelection {
    /// Makes the first `count` employees of the directory visible.
    pub fn first(directory: &EmployeeDirectory, count: usize) -> Self {
        Self {
            visible: directory
                .all()
                .iter()
                .take(count)
                .map(|e| e.id.clone())
                .collect(),
        }
    }

    /// Returns true if the employee is visible.
    pub fn is_visible(&self, id: &str) -> bool {
        self.visible.contains(id)
    }

    /// Returns the visible ids.
    pub fn ids(&self) -> &BTreeSet<String> {
        &self.visible
    }

    /// Replaces the visible set.
    ///
    /// Fails with `EmployeeNotFound` if any id is not in the directory,
    /// leaving the selection unchanged.
    pub fn commit(
        &mut self,
        ids: impl IntoIterator<Item = String>,
        directory: &EmployeeDirectory,
    ) -> AdminResult<()> {
        let ids: BTreeSet<String> = ids.into_iter().collect();
        if let Some(unknown) = ids.iter().find(|id| !directory.contains(id)) {
            return Err(AdminError::EmployeeNotFound {
                id: unknown.clone(),
            });
        }
        self.visible = ids;
        Ok(())
    }

    /// Starts an editing session seeded with the visible set.
    pub fn session(&self) -> DualListSession {
        DualListSession::new(self.visible.iter().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use chrono::Utc;

    fn directory() -> EmployeeDirectory {
        let config = ConfigLoader::load("./config/catalog").expect("Failed to load config");
        EmployeeDirectory::from_config(config.config().roster(), Utc::now())
    }

    fn toggle_available(id: &str) -> DualListAction {
        DualListAction::ToggleAvailable { id: id.to_string() }
    }

    #[test]
    fn test_initial_selection_is_first_ten() {
        let directory = directory();
        let access = AccessSelection::first(&directory, 10);
        assert_eq!(access.ids().len(), 10);
        assert!(access.is_visible("EMP010"));
        assert!(!access.is_visible("EMP011"));
    }

    #[test]
    fn test_move_highlighted_right() {
        let directory = directory();
        let mut session = AccessSelection::first(&directory, 10).session();

        session.apply(&toggle_available("EMP012"), &directory);
        session.apply(&toggle_available("EMP015"), &directory);
        session.apply(&toggle_available("EMP015"), &directory);
        session.apply(&DualListAction::MoveHighlightedRight, &directory);

        assert_eq!(session.selected(&directory).len(), 11);
        assert!(session.selected(&directory).contains(&"EMP012"));
        assert!(session.highlighted_available().is_empty());
        assert!(!session.available(&directory).contains(&"EMP012"));
    }

    #[test]
    fn test_move_left_with_nothing_highlighted_is_noop() {
        let directory = directory();
        let mut session = AccessSelection::first(&directory, 10).session();
        session.apply(&toggle_available("EMP020"), &directory);
        session.apply(&DualListAction::MoveHighlightedLeft, &directory);

        assert_eq!(session.selected(&directory).len(), 10);
        assert_eq!(session.highlighted_available().len(), 1);
    }

    #[test]
    fn test_move_all_both_ways() {
        let directory = directory();
        let mut session = DualListSession::default();

        session.apply(&DualListAction::MoveAllRight, &directory);
        assert_eq!(session.selected(&directory).len(), 25);
        assert!(session.available(&directory).is_empty());

        session.apply(
            &DualListAction::ToggleSelected {
                id: "EMP003".to_string(),
            },
            &directory,
        );
        session.apply(&DualListAction::MoveAllLeft, &directory);
        assert!(session.selected(&directory).is_empty());
        assert!(session.highlighted_selected().is_empty());
    }

    #[test]
    fn test_search_filters_available_only() {
        let directory = directory();
        let mut session = AccessSelection::first(&directory, 10).session();
        session.apply(
            &DualListAction::Search {
                query: "WILSON".to_string(),
            },
            &directory,
        );

        // James Wilson (EMP006) is selected; Patricia Wilson (EMP013) is not.
        assert_eq!(session.available(&directory), vec!["EMP013"]);
        assert_eq!(session.selected(&directory).len(), 10);
    }

    #[test]
    fn test_commit_rejects_unknown_ids() {
        let directory = directory();
        let mut access = AccessSelection::first(&directory, 10);
        let result = access.commit(vec!["EMP001".to_string(), "EMP404".to_string()], &directory);

        assert!(matches!(result, Err(AdminError::EmployeeNotFound { id }) if id == "EMP404"));
        assert_eq!(access.ids().len(), 10);
    }

    #[test]
    fn test_action_deserialization() {
        let action: DualListAction =
            serde_json::from_str(r#"{"action":"toggle_selected","id":"EMP002"}"#).unwrap();
        assert_eq!(
            action,
            DualListAction::ToggleSelected {
                id: "EMP002".to_string()
            }
        );
        let action: DualListAction =
            serde_json::from_str(r#"{"action":"move_all_left"}"#).unwrap();
        assert_eq!(action, DualListAction::MoveAllLeft);
    }
}
