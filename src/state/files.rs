// File list state.
// Handles filtering and keyboard selection over project sections.

use ratatui::widgets::ListState;

use crate::figma::{File, Node, ProjectFiles};

/// One rendered row of the grouped file list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Row<'a> {
    /// Project header.
    Section { name: &'a str, files: usize },
    File(&'a File),
}

/// Selection and filter over the grouped file list.
///
/// Selection is tracked by file key so it survives the listing being replaced.
#[derive(Debug, Default)]
pub struct FileListState {
    filter: String,
    selected_key: Option<String>,
    pub list_state: ListState,
}

impl FileListState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    fn matches(&self, file: &File) -> bool {
        self.filter.is_empty() || file.name.to_lowercase().contains(&self.filter.to_lowercase())
    }

    /// Files passing the filter, in display order.
    pub fn visible_files<'a>(&self, sections: &'a [ProjectFiles]) -> Vec<&'a File> {
        sections
            .iter()
            .flat_map(|section| section.files.iter())
            .filter(|file| self.matches(file))
            .collect()
    }

    /// Rows to render. Sections without visible files are omitted.
    pub fn rows<'a>(&self, sections: &'a [ProjectFiles]) -> Vec<Row<'a>> {
        let mut rows = Vec::new();
        for section in sections {
            let files: Vec<&File> = section.files.iter().filter(|f| self.matches(f)).collect();
            if files.is_empty() {
                continue;
            }
            rows.push(Row::Section {
                name: &section.name,
                files: files.len(),
            });
            rows.extend(files.into_iter().map(Row::File));
        }
        rows
    }

    /// Currently selected file, if it is still visible.
    pub fn selected_file<'a>(&self, sections: &'a [ProjectFiles]) -> Option<&'a File> {
        let key = self.selected_key.as_deref()?;
        self.visible_files(sections)
            .into_iter()
            .find(|file| file.key == key)
    }

    /// Keep the selection on a visible file and point the list state at its row.
    pub fn sync(&mut self, sections: &[ProjectFiles]) {
        let visible = self.visible_files(sections);
        let still_visible = self
            .selected_key
            .as_deref()
            .is_some_and(|key| visible.iter().any(|f| f.key == key));
        if !still_visible {
            self.selected_key = visible.first().map(|f| f.key.clone());
        }

        let row = self.selected_key.as_deref().and_then(|key| {
            self.rows(sections)
                .iter()
                .position(|row| matches!(row, Row::File(f) if f.key == key))
        });
        self.list_state.select(row);
    }

    /// Select the next visible file.
    pub fn select_next(&mut self, sections: &[ProjectFiles]) {
        self.step(sections, 1);
    }

    /// Select the previous visible file.
    pub fn select_prev(&mut self, sections: &[ProjectFiles]) {
        self.step(sections, -1);
    }

    fn step(&mut self, sections: &[ProjectFiles], delta: isize) {
        let visible = self.visible_files(sections);
        if visible.is_empty() {
            return;
        }
        let current = self
            .selected_key
            .as_deref()
            .and_then(|key| visible.iter().position(|f| f.key == key));
        let next = match current {
            Some(i) => i.saturating_add_signed(delta).min(visible.len() - 1),
            None => 0,
        };
        self.selected_key = Some(visible[next].key.clone());
        self.sync(sections);
    }

    pub fn push_filter(&mut self, c: char, sections: &[ProjectFiles]) {
        self.filter.push(c);
        self.sync(sections);
    }

    pub fn pop_filter(&mut self, sections: &[ProjectFiles]) {
        self.filter.pop();
        self.sync(sections);
    }

    pub fn clear_filter(&mut self, sections: &[ProjectFiles]) {
        self.filter.clear();
        self.sync(sections);
    }
}

/// Page submenu opened for one file.
#[derive(Debug)]
pub struct PageMenu {
    pub file: File,
    pub list_state: ListState,
}

impl PageMenu {
    pub fn new(file: File) -> Self {
        Self {
            file,
            list_state: ListState::default(),
        }
    }

    /// Clamp the selection to the current page count.
    pub fn sync(&mut self, pages: &[Node]) {
        let selected = match (self.list_state.selected(), pages.len()) {
            (_, 0) => None,
            (Some(i), len) => Some(i.min(len - 1)),
            (None, _) => Some(0),
        };
        self.list_state.select(selected);
    }

    pub fn select_next(&mut self, pages: &[Node]) {
        if let Some(i) = self.list_state.selected() {
            self.list_state.select(Some(i + 1));
        }
        self.sync(pages);
    }

    pub fn select_prev(&mut self, pages: &[Node]) {
        if let Some(i) = self.list_state.selected() {
            self.list_state.select(Some(i.saturating_sub(1)));
        }
        self.sync(pages);
    }

    pub fn selected_page<'a>(&self, pages: &'a [Node]) -> Option<&'a Node> {
        pages.get(self.list_state.selected()?)
    }
}
