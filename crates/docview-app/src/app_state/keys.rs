//! Window key bindings.

use winit::keyboard::{Key, ModifiersState, NamedKey};

/// A viewer command bound to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ViewerAction {
    PreviousPage,
    NextPage,
    ReloadDocument,
    IncreaseScale,
    DecreaseScale,
    PrintDocument,
    DocumentInfo,
    ToggleSidebar,
    CycleSidebarViewMode,
    RotateClockwise,
    RotateCounterclockwise,
    CyclePageSpread,
    ToggleScrollDirection,
    FindNext,
    FindPrevious,
}

/// Map a pressed key to its action, if any.
pub(super) fn action_for_key(key: &Key, modifiers: ModifiersState) -> Option<ViewerAction> {
    let command = modifiers.control_key() || modifiers.super_key();
    match key {
        Key::Named(NamedKey::ArrowLeft) => Some(ViewerAction::PreviousPage),
        Key::Named(NamedKey::ArrowRight) => Some(ViewerAction::NextPage),
        Key::Named(NamedKey::F5) => Some(ViewerAction::ReloadDocument),
        Key::Named(NamedKey::F3) if modifiers.shift_key() => Some(ViewerAction::FindPrevious),
        Key::Named(NamedKey::F3) => Some(ViewerAction::FindNext),
        Key::Character(c) if command => match c.as_str() {
            "+" | "=" => Some(ViewerAction::IncreaseScale),
            "-" => Some(ViewerAction::DecreaseScale),
            "p" | "P" => Some(ViewerAction::PrintDocument),
            "i" | "I" => Some(ViewerAction::DocumentInfo),
            "b" | "B" => Some(ViewerAction::ToggleSidebar),
            "m" | "M" => Some(ViewerAction::CycleSidebarViewMode),
            "r" | "R" => Some(ViewerAction::ReloadDocument),
            "]" | "}" => Some(ViewerAction::RotateClockwise),
            "[" | "{" => Some(ViewerAction::RotateCounterclockwise),
            "e" | "E" => Some(ViewerAction::CyclePageSpread),
            "l" | "L" => Some(ViewerAction::ToggleScrollDirection),
            "g" | "G" if modifiers.shift_key() => Some(ViewerAction::FindPrevious),
            "g" | "G" => Some(ViewerAction::FindNext),
            _ => None,
        },
        _ => None,
    }
}
