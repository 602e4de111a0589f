// Status filter
//
// Single-select: at most one status is shown at a time, or all of them.

/// Which status the scene is restricted to (`None` shows everything)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    selected: Option<String>,
}

impl FilterState {
    /// Show-all filter
    pub fn show_all() -> Self {
        Self::default()
    }

    pub fn only(status: &str) -> Self {
        Self {
            selected: Some(status.to_string()),
        }
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn is_show_all(&self) -> bool {
        self.selected.is_none()
    }

    /// Select `status`, or clear the filter if it is already selected
    pub fn toggle(&self, status: &str) -> Self {
        if self.selected() == Some(status) {
            Self::show_all()
        } else {
            Self::only(status)
        }
    }

    /// Back to show-all, whatever the current selection
    pub fn clear(&self) -> Self {
        Self::show_all()
    }

    /// Whether a record with this status passes the filter
    pub fn matches(&self, status: &str) -> bool {
        match self.selected() {
            Some(selected) => selected == status,
            None => true,
        }
    }
}
