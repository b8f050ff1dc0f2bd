//! Payload types carried by the bus, and the view-state enums they encode.

use docview_common::Color;
use serde::{Deserialize, Serialize};

use crate::codec::Payload;
use crate::error::DecodingError;
use crate::registry::TriggerableEvent;

/// `SetPage` trigger and `PageChanged` event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageChange {
    pub page_number: u32,
}

/// `PagesCount` event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagesCount {
    pub count: u32,
}

/// `FindNext` / `FindPrevious` triggers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Search {
    pub search_target: String,
}

/// `SetThemeColors` trigger. Values are CSS `rgba()` strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetThemeColors {
    pub background: String,
    pub foreground: String,
    pub icons: String,
}

impl SetThemeColors {
    pub fn from_colors(background: Color, foreground: Color, icons: Color) -> Self {
        Self {
            background: background.to_css_rgba(),
            foreground: foreground.to_css_rgba(),
            icons: icons.to_css_rgba(),
        }
    }
}

/// `SetSidebarViewMode` trigger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidebarViewModeChange {
    pub mode: String,
}

impl SidebarViewModeChange {
    pub fn from_mode(mode: SidebarViewMode) -> Self {
        Self {
            mode: mode.display_name().to_string(),
        }
    }
}

/// `SidebarViewStateChanged` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidebarViewStateChange {
    pub mode: String,
    pub hidden: bool,
}

impl SidebarViewStateChange {
    pub fn from_state(state: SidebarViewState) -> Self {
        Self {
            mode: state.mode.display_name().to_string(),
            hidden: state.hidden,
        }
    }

    /// The typed state. Fails on a mode name the host does not know.
    pub fn state(&self) -> Result<SidebarViewState, DecodingError> {
        let mode = SidebarViewMode::from_display_name(&self.mode).ok_or_else(|| {
            DecodingError(format!("unknown sidebar view mode '{}'", self.mode))
        })?;
        Ok(SidebarViewState {
            mode,
            hidden: self.hidden,
        })
    }
}

/// `SidebarAvailableViewsChanged` event. Absent keys take the defaults:
/// thumbnails always exist, the other views only when the document has them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SidebarAvailableViewModes {
    pub thumbnails: bool,
    pub bookmarks: bool,
    pub attachments: bool,
}

impl Default for SidebarAvailableViewModes {
    fn default() -> Self {
        Self {
            thumbnails: true,
            bookmarks: false,
            attachments: false,
        }
    }
}

impl SidebarAvailableViewModes {
    pub fn is_view_mode_available(&self, mode: SidebarViewMode) -> bool {
        match mode {
            SidebarViewMode::Thumbnails => self.thumbnails,
            SidebarViewMode::Bookmarks => self.bookmarks,
            SidebarViewMode::Attachments => self.attachments,
        }
    }
}

/// `DocumentInfo` event: document properties as display strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DocumentInfo {
    pub file_name: String,
    pub file_size: String,
    pub title: String,
    pub subject: String,
    pub author: String,
    pub creator: String,
    pub creation_date: String,
    pub modification_date: String,
    pub producer: String,
    pub version: String,
    pub page_size: String,
    pub linearized: String,
}

impl DocumentInfo {
    /// `(label, value)` rows in display order.
    pub fn entries(&self) -> [(&'static str, &str); 12] {
        [
            ("File Name", self.file_name.as_str()),
            ("File Size", self.file_size.as_str()),
            ("Title", self.title.as_str()),
            ("Subject", self.subject.as_str()),
            ("Author", self.author.as_str()),
            ("Creator", self.creator.as_str()),
            ("Creation Date", self.creation_date.as_str()),
            ("Modification Date", self.modification_date.as_str()),
            ("Producer", self.producer.as_str()),
            ("Version", self.version.as_str()),
            ("Page Size", self.page_size.as_str()),
            ("Linearized", self.linearized.as_str()),
        ]
    }
}

/// Structured form of a non-empty `DocumentLoadError` payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentLoadError {
    pub message: String,
}

impl Payload for PageChange {}
impl Payload for PagesCount {}
impl Payload for Search {}
impl Payload for SetThemeColors {}
impl Payload for SidebarViewModeChange {}
impl Payload for SidebarViewStateChange {}
impl Payload for SidebarAvailableViewModes {}
impl Payload for DocumentInfo {}
impl Payload for DocumentLoadError {}

/// Sidebar views the renderer offers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SidebarViewMode {
    #[default]
    Thumbnails,
    Bookmarks,
    Attachments,
}

impl SidebarViewMode {
    pub const ALL: &'static [Self] = &[Self::Thumbnails, Self::Bookmarks, Self::Attachments];

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Thumbnails => "thumbs",
            Self::Bookmarks => "bookmarks",
            Self::Attachments => "attachments",
        }
    }

    pub fn from_display_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|m| m.display_name() == name)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SidebarViewState {
    pub mode: SidebarViewMode,
    pub hidden: bool,
}

/// Two-page spread layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PageSpreadState {
    #[default]
    None,
    Even,
    Odd,
}

impl PageSpreadState {
    pub fn trigger_event(&self) -> TriggerableEvent {
        match self {
            Self::None => TriggerableEvent::SpreadNone,
            Self::Even => TriggerableEvent::SpreadEvenPages,
            Self::Odd => TriggerableEvent::SpreadOddPages,
        }
    }

    /// Layout order when cycling: none, odd, even, none.
    pub fn next(&self) -> Self {
        match self {
            Self::None => Self::Odd,
            Self::Odd => Self::Even,
            Self::Even => Self::None,
        }
    }
}
