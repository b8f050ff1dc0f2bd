//! Every event the bus knows about, bound to its wire name.
//!
//! Wire names are shared with the renderer bundle. The two ship together but
//! a running session cannot swap one side, so renaming an event needs a
//! migration on both sides.

/// Host -> renderer commands. The renderer exposes a global function per
/// wire name taking zero or one string argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerableEvent {
    SetPage,
    IncreaseScale,
    DecreaseScale,
    GotoNextPage,
    GotoPreviousPage,
    GetDocumentInfo,
    ToggleSidebar,
    SetSidebarViewMode,
    PrintDocument,
    RotateClockwise,
    RotateCounterclockwise,
    SpreadNone,
    SpreadEvenPages,
    SpreadOddPages,
    ToggleScrollDirection,
    FindNext,
    FindPrevious,
    SetThemeColors,
}

impl TriggerableEvent {
    pub const ALL: &'static [Self] = &[
        Self::SetPage,
        Self::IncreaseScale,
        Self::DecreaseScale,
        Self::GotoNextPage,
        Self::GotoPreviousPage,
        Self::GetDocumentInfo,
        Self::ToggleSidebar,
        Self::SetSidebarViewMode,
        Self::PrintDocument,
        Self::RotateClockwise,
        Self::RotateCounterclockwise,
        Self::SpreadNone,
        Self::SpreadEvenPages,
        Self::SpreadOddPages,
        Self::ToggleScrollDirection,
        Self::FindNext,
        Self::FindPrevious,
        Self::SetThemeColors,
    ];

    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::SetPage => "setPage",
            Self::IncreaseScale => "increaseScale",
            Self::DecreaseScale => "decreaseScale",
            Self::GotoNextPage => "nextPage",
            Self::GotoPreviousPage => "previousPage",
            Self::GetDocumentInfo => "getDocumentInfo",
            Self::ToggleSidebar => "toggleSidebar",
            Self::SetSidebarViewMode => "setSidebarViewMode",
            Self::PrintDocument => "printDocument",
            Self::RotateClockwise => "rotateClockwise",
            Self::RotateCounterclockwise => "rotateCounterclockwise",
            Self::SpreadNone => "spreadNone",
            Self::SpreadEvenPages => "spreadEvenPages",
            Self::SpreadOddPages => "spreadOddPages",
            Self::ToggleScrollDirection => "toggleScrollDirection",
            Self::FindNext => "findNext",
            Self::FindPrevious => "findPrevious",
            Self::SetThemeColors => "setThemeColors",
        }
    }

    pub fn from_wire_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|e| e.wire_name() == name)
    }
}

/// Renderer -> host notifications. Each one gets its own query endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubscribableEvent {
    PageChanged,
    DocumentInfo,
    FrameFocused,
    PagesCount,
    /// Sometimes fires with no payload at all; see `DocumentPanel`.
    DocumentLoadError,
    SidebarViewStateChanged,
    SidebarAvailableViewsChanged,
}

impl SubscribableEvent {
    pub const ALL: &'static [Self] = &[
        Self::PageChanged,
        Self::DocumentInfo,
        Self::FrameFocused,
        Self::PagesCount,
        Self::DocumentLoadError,
        Self::SidebarViewStateChanged,
        Self::SidebarAvailableViewsChanged,
    ];

    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::PageChanged => "pageChanged",
            Self::DocumentInfo => "documentInfo",
            Self::FrameFocused => "frameFocused",
            Self::PagesCount => "pagesCount",
            Self::DocumentLoadError => "documentLoadError",
            Self::SidebarViewStateChanged => "sidebarViewStateChanged",
            Self::SidebarAvailableViewsChanged => "sidebarAvailableViewsChanged",
        }
    }

    pub fn from_wire_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|e| e.wire_name() == name)
    }
}
