//! Icon and title management for the tray.
//!
//! This module handles:
//! - Generating the tray title text (e.g., "🍅 24m59s")
//! - Choosing and rasterising the icon for the current phase
//!
//! Everything here is platform-independent and fully testable.

use crate::types::{format_remaining, Phase};

// ============================================================================
// Constants
// ============================================================================

/// Emoji for work phase
const WORKING_EMOJI: &str = "🍅";

/// Emoji for break phase
const BREAK_EMOJI: &str = "☕";

/// Title shown while no phase is running
pub const IDLE_TITLE: &str = "Tomatick";

/// Edge length of the generated icons in pixels
pub const ICON_SIZE: u32 = 32;

// ============================================================================
// TrayIconKind
// ============================================================================

/// The three icons the tray can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrayIconKind {
    /// No phase running
    Idle,
    /// Work phase running
    Working,
    /// Break phase running
    OnBreak,
}

impl TrayIconKind {
    /// Icon for a running phase.
    pub fn for_phase(phase: Phase) -> Self {
        match phase {
            Phase::Work => TrayIconKind::Working,
            Phase::Break => TrayIconKind::OnBreak,
        }
    }

    /// Fill colour as RGBA.
    pub fn color(&self) -> [u8; 4] {
        match self {
            TrayIconKind::Idle => [0x80, 0x80, 0x80, 0xff],
            TrayIconKind::Working => [0xd7, 0x26, 0x1e, 0xff],
            TrayIconKind::OnBreak => [0x2e, 0xa0, 0x43, 0xff],
        }
    }

    /// Solid square of `size` x `size` pixels in RGBA order.
    pub fn rgba(&self, size: u32) -> Vec<u8> {
        let pixels = (size * size) as usize;
        self.color().repeat(pixels)
    }
}

// ============================================================================
// IconManager
// ============================================================================

/// Tracks the displayed icon and generates titles.
#[derive(Debug, Default)]
pub struct IconManager {
    /// Last icon applied to the tray
    last_icon: Option<TrayIconKind>,
}

impl IconManager {
    /// Creates a new IconManager.
    pub fn new() -> Self {
        Self { last_icon: None }
    }

    /// Generates the title text for a running phase.
    ///
    /// Format:
    /// - Work: "🍅 24m59s"
    /// - Break: "☕ 4m59s"
    pub fn generate_title(&self, phase: Phase, remaining_seconds: i64) -> String {
        format!(
            "{} {}",
            Self::get_emoji(phase),
            format_remaining(remaining_seconds)
        )
    }

    /// Returns the emoji for a phase.
    pub fn get_emoji(phase: Phase) -> &'static str {
        match phase {
            Phase::Work => WORKING_EMOJI,
            Phase::Break => BREAK_EMOJI,
        }
    }

    /// Records `icon` and returns true if it differs from the last one.
    pub fn icon_changed(&mut self, icon: TrayIconKind) -> bool {
        let changed = self.last_icon != Some(icon);
        if changed {
            self.last_icon = Some(icon);
        }
        changed
    }

    /// Last icon recorded by `icon_changed`.
    pub fn current_icon(&self) -> Option<TrayIconKind> {
        self.last_icon
    }
}

// ============================================================================
// Tests
// ============================================================================
