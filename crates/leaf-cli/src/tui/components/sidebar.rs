//! Chat and folder sidebar
//!
//! The sidebar is a flat list of entries rebuilt from the store on demand, so
//! selection is just an index into [`sidebar_entries`].

use std::collections::HashSet;

use leaf_core::chat::{ChatId, ChatStore, FolderId};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::tui::themes::Theme;
use crate::tui::utils::text::truncate_ellipsis;
use crate::tui::utils::{RenameTarget, TitleEditor};

/// Width when open
pub const SIDEBAR_WIDTH: u16 = 30;
/// Width when collapsed
pub const COLLAPSED_WIDTH: u16 = 18;
/// Unorganized chats shown while collapsed
pub const COLLAPSED_RECENT: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarEntry {
    NewChat,
    Search,
    NewFolder,
    Folder(FolderId),
    FolderChat { chat: ChatId, folder: FolderId },
    Chat(ChatId),
    Settings,
}

impl SidebarEntry {
    pub fn chat_id(&self) -> Option<&ChatId> {
        match self {
            SidebarEntry::FolderChat { chat, .. } | SidebarEntry::Chat(chat) => Some(chat),
            _ => None,
        }
    }

    /// Folder this entry is or lives in
    pub fn folder_id(&self) -> Option<&FolderId> {
        match self {
            SidebarEntry::Folder(folder) | SidebarEntry::FolderChat { folder, .. } => Some(folder),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SidebarState {
    pub open: bool,
    pub selected: usize,
    pub expanded: HashSet<FolderId>,
    pub search: String,
    pub searching: bool,
}

impl SidebarState {
    pub fn new(open: bool) -> Self {
        Self {
            open,
            selected: 0,
            expanded: HashSet::new(),
            search: String::new(),
            searching: false,
        }
    }

    pub fn width(&self) -> u16 {
        if self.open {
            SIDEBAR_WIDTH
        } else {
            COLLAPSED_WIDTH
        }
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
        self.searching = false;
        self.selected = 0;
    }

    pub fn toggle_folder(&mut self, folder: &FolderId) {
        if !self.expanded.remove(folder) {
            self.expanded.insert(folder.clone());
        }
    }

    pub fn select_next(&mut self, len: usize) {
        if self.selected + 1 < len {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Keep the selection inside a list that may have shrunk
    pub fn clamp(&mut self, len: usize) {
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    /// Point the selection at `entry`, if present
    pub fn select(&mut self, entries: &[SidebarEntry], entry: &SidebarEntry) {
        if let Some(idx) = entries.iter().position(|e| e == entry) {
            self.selected = idx;
        }
    }
}

/// Entries in display order for the current state
pub fn sidebar_entries(store: &ChatStore, state: &SidebarState) -> Vec<SidebarEntry> {
    let mut entries = vec![SidebarEntry::NewChat];

    if !state.open {
        entries.extend(
            store
                .unorganized()
                .take(COLLAPSED_RECENT)
                .map(|c| SidebarEntry::Chat(c.id.clone())),
        );
        return entries;
    }

    entries.push(SidebarEntry::Search);
    entries.push(SidebarEntry::NewFolder);
    for folder in store.folders() {
        entries.push(SidebarEntry::Folder(folder.id.clone()));
        if state.expanded.contains(&folder.id) {
            entries.extend(store.chats_in(&folder.id).map(|c| SidebarEntry::FolderChat {
                chat: c.id.clone(),
                folder: folder.id.clone(),
            }));
        }
    }
    entries.extend(
        store
            .search(&state.search)
            .into_iter()
            .map(|c| SidebarEntry::Chat(c.id.clone())),
    );
    entries.push(SidebarEntry::Settings);
    entries
}

/// Everything the sidebar needs to draw itself
pub struct SidebarView<'a> {
    pub store: &'a ChatStore,
    pub state: &'a SidebarState,
    pub current: Option<&'a ChatId>,
    pub focused: bool,
    pub editor: &'a TitleEditor,
    pub theme: &'a Theme,
}

impl SidebarView<'_> {
    fn entry_line(&self, entry: &SidebarEntry, selected: bool, width: usize) -> Line<'static> {
        let theme = self.theme;
        let base = Style::default().fg(theme.text_color);
        let dim = Style::default().fg(theme.dim_color);

        let (prefix, label, style): (String, String, Style) = match entry {
            SidebarEntry::NewChat => (
                "+ ".into(),
                "New Chat".into(),
                Style::default()
                    .fg(theme.accent_color)
                    .add_modifier(Modifier::BOLD),
            ),
            SidebarEntry::Search => {
                if self.state.search.is_empty() && !self.state.searching {
                    ("⌕ ".into(), "Search chats...".into(), dim)
                } else {
                    let cursor = if self.state.searching { "▏" } else { "" };
                    ("⌕ ".into(), format!("{}{}", self.state.search, cursor), base)
                }
            }
            SidebarEntry::NewFolder => ("+ ".into(), "New Folder".into(), dim),
            SidebarEntry::Folder(id) => {
                let name = self
                    .store
                    .folder(id)
                    .map(|f| f.name.clone())
                    .unwrap_or_default();
                let arrow = if self.state.expanded.contains(id) {
                    "▾ "
                } else {
                    "▸ "
                };
                let count = self.store.chats_in(id).count();
                let label = self
                    .renaming(&RenameTarget::Folder(id.clone()))
                    .unwrap_or_else(|| format!("{} ({})", name, count));
                (arrow.into(), label, base.add_modifier(Modifier::BOLD))
            }
            SidebarEntry::FolderChat { chat, .. } | SidebarEntry::Chat(chat) => {
                let indent = if matches!(entry, SidebarEntry::FolderChat { .. }) {
                    "    "
                } else {
                    "  "
                };
                let title = self
                    .store
                    .chat(chat)
                    .map(|c| c.title.clone())
                    .unwrap_or_default();
                let label = self
                    .renaming(&RenameTarget::Chat(chat.clone()))
                    .unwrap_or(title);
                let style = if self.current == Some(chat) {
                    Style::default()
                        .fg(theme.accent_color)
                        .add_modifier(Modifier::BOLD)
                } else {
                    base
                };
                (indent.into(), label, style)
            }
            SidebarEntry::Settings => ("⚙ ".into(), "Settings".into(), dim),
        };

        let available = width.saturating_sub(prefix.width());
        let label = truncate_ellipsis(&label, available).into_owned();
        let line = Line::from(vec![Span::styled(prefix, style), Span::styled(label, style)]);
        if selected && self.focused {
            line.style(
                Style::default()
                    .bg(theme.selection_bg_color)
                    .fg(theme.selection_fg_color),
            )
        } else {
            line
        }
    }

    /// Editor buffer with cursor when `target` is being renamed
    fn renaming(&self, target: &RenameTarget) -> Option<String> {
        (self.editor.target.as_ref() == Some(target)).then(|| format!("{}▏", self.editor.buffer))
    }
}

impl Widget for SidebarView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::RIGHT)
            .border_style(Style::default().fg(if self.focused {
                self.theme.accent_color
            } else {
                self.theme.border_color
            }))
            .style(Style::default().bg(self.theme.sidebar_bg_color));
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width < 4 || inner.height == 0 {
            return;
        }

        let entries = sidebar_entries(self.store, self.state);
        let height = inner.height as usize;
        let width = inner.width.saturating_sub(1) as usize;

        // Settings is pinned to the bottom row when open
        let (list, pinned) = match entries.split_last() {
            Some((SidebarEntry::Settings, rest)) => (rest, true),
            _ => (entries.as_slice(), false),
        };
        let list_height = if pinned { height.saturating_sub(1) } else { height };
        let offset = if self.state.selected >= list_height {
            self.state.selected + 1 - list_height
        } else {
            0
        };

        let lines: Vec<Line> = list
            .iter()
            .enumerate()
            .skip(offset)
            .take(list_height)
            .map(|(idx, entry)| self.entry_line(entry, idx == self.state.selected, width))
            .collect();
        Paragraph::new(lines).render(
            Rect {
                x: inner.x + 1,
                width: inner.width.saturating_sub(1),
                height: list_height as u16,
                ..inner
            },
            buf,
        );

        if pinned && height > 1 {
            let idx = entries.len() - 1;
            let line = self.entry_line(&SidebarEntry::Settings, idx == self.state.selected, width);
            Paragraph::new(line).render(
                Rect {
                    x: inner.x + 1,
                    y: inner.y + inner.height - 1,
                    width: inner.width.saturating_sub(1),
                    height: 1,
                },
                buf,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leaf_core::chat::Message;

    fn store_with_chats() -> (ChatStore, FolderId, Vec<ChatId>) {
        let mut store = ChatStore::new();
        let folder = store.new_folder();
        let mut ids = Vec::new();
        for text in ["first", "second", "third", "fourth"] {
            ids.push(store.start_chat(Message::user(text), None).unwrap());
        }
        store.move_chat(&ids[0], Some(folder.clone())).unwrap();
        (store, folder, ids)
    }

    #[test]
    fn test_open_entries_order() {
        let (store, folder, ids) = store_with_chats();
        let state = SidebarState::new(true);
        let entries = sidebar_entries(&store, &state);
        assert_eq!(
            entries,
            vec![
                SidebarEntry::NewChat,
                SidebarEntry::Search,
                SidebarEntry::NewFolder,
                SidebarEntry::Folder(folder),
                SidebarEntry::Chat(ids[3].clone()),
                SidebarEntry::Chat(ids[2].clone()),
                SidebarEntry::Chat(ids[1].clone()),
                SidebarEntry::Settings,
            ]
        );
    }

    #[test]
    fn test_expanded_folder_lists_its_chats() {
        let (store, folder, ids) = store_with_chats();
        let mut state = SidebarState::new(true);
        state.toggle_folder(&folder);
        let entries = sidebar_entries(&store, &state);
        assert_eq!(
            entries[4],
            SidebarEntry::FolderChat {
                chat: ids[0].clone(),
                folder: folder.clone()
            }
        );
        state.toggle_folder(&folder);
        assert_eq!(sidebar_entries(&store, &state).len(), entries.len() - 1);
    }

    #[test]
    fn test_collapsed_shows_three_newest_unorganized() {
        let (mut store, _, ids) = store_with_chats();
        let fifth = store.start_chat(Message::user("fifth"), None).unwrap();
        let state = SidebarState::new(false);
        let entries = sidebar_entries(&store, &state);
        assert_eq!(
            entries,
            vec![
                SidebarEntry::NewChat,
                SidebarEntry::Chat(fifth),
                SidebarEntry::Chat(ids[3].clone()),
                SidebarEntry::Chat(ids[2].clone()),
            ]
        );
    }

    #[test]
    fn test_search_filters_unorganized() {
        let (store, _, ids) = store_with_chats();
        let mut state = SidebarState::new(true);
        state.search = "SEC".to_string();
        let chats: Vec<_> = sidebar_entries(&store, &state)
            .into_iter()
            .filter_map(|e| e.chat_id().cloned())
            .collect();
        assert_eq!(chats, vec![ids[1].clone()]);
    }

    #[test]
    fn test_clamp_after_shrink() {
        let mut state = SidebarState::new(true);
        state.selected = 9;
        state.clamp(4);
        assert_eq!(state.selected, 3);
        state.clamp(0);
        assert_eq!(state.selected, 0);
    }
}
