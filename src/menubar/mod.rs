//! Tray reflector: mirrors the running session in the system tray.
//!
//! This module provides:
//! - `TrayPublisher`, an event sink turning timer events into tray updates
//! - `TrayReflector`, which applies those updates on the main thread
//! - Title text and icon generation ("🍅 24m59s", red/green/grey squares)
//! - A placeholder menu (Pause, Stop, Statistics, Settings, Quit)
//!
//! # Architecture
//!
//! - `icon.rs`: Title text and icon pixels (platform-independent)
//! - `menu.rs`: Menu layout (platform-independent)
//! - `event.rs`: Update type and the publishing sink (platform-independent)
//! - `mod.rs`: TrayReflector (platform-specific on macOS)
//!
//! Updates travel over a crossbeam channel from the router task to the
//! reflector, which the render loop pumps once per frame.
//!
//! ```ignore
//! use tomatick::menubar::{TrayPublisher, TrayReflector};
//! use crossbeam_channel::unbounded;
//!
//! let (tx, rx) = unbounded();
//! let mut reflector = TrayReflector::new("Coding", rx);
//! reflector.initialize()?;
//!
//! // registered with the event router
//! let publisher = TrayPublisher::new(tx);
//!
//! // on every frame
//! reflector.process_pending_updates();
//! ```

pub mod event;
pub mod icon;
pub mod menu;

pub use event::{TrayPublisher, TrayUpdate};
pub use icon::{IconManager, TrayIconKind, ICON_SIZE, IDLE_TITLE};
pub use menu::{MenuAction, MenuBuilder, MenuConfig, MenuItemConfig};

use crossbeam_channel::{Receiver, TryRecvError};
use thiserror::Error;

// ============================================================================
// TrayError
// ============================================================================

/// Errors from the tray reflector.
#[derive(Debug, Error)]
pub enum TrayError {
    /// Icon pixels were rejected by the platform
    #[error("invalid tray icon: {0}")]
    InvalidIcon(String),

    /// The tray icon or its menu could not be created
    #[error("failed to create tray icon: {0}")]
    BuildFailed(String),

    /// The reflector is gone
    #[error("tray reflector disconnected")]
    Disconnected,
}

// ============================================================================
// TrayReflector
// ============================================================================

/// Applies tray updates on the main thread.
///
/// On macOS this owns a `tray-icon` status item. Elsewhere it keeps the same
/// state (title and icon) and only logs, so the rest of the program does not
/// need to care which platform it runs on.
pub struct TrayReflector {
    /// Icon bookkeeping
    icon_manager: IconManager,
    /// Menu layout
    menu_builder: MenuBuilder,
    /// Tag shown in the menu title row
    tag: String,
    /// Channel for receiving updates from the publisher
    update_rx: Receiver<TrayUpdate>,
    /// Current title text
    title: String,
    /// Whether the reflector is initialized
    initialized: bool,
    /// Platform-specific tray icon instance (macOS only)
    #[cfg(target_os = "macos")]
    tray_icon: Option<tray_icon::TrayIcon>,
    /// Menu item ids for click lookup (macOS only)
    #[cfg(target_os = "macos")]
    menu_ids: Vec<(tray_icon::menu::MenuId, MenuAction)>,
}

impl TrayReflector {
    /// Creates a reflector for a session working on `tag`.
    ///
    /// The tray icon is not created until `initialize()` is called.
    pub fn new(tag: impl Into<String>, update_rx: Receiver<TrayUpdate>) -> Self {
        Self {
            icon_manager: IconManager::new(),
            menu_builder: MenuBuilder::new(),
            tag: tag.into(),
            update_rx,
            title: IDLE_TITLE.to_string(),
            initialized: false,
            #[cfg(target_os = "macos")]
            tray_icon: None,
            #[cfg(target_os = "macos")]
            menu_ids: Vec::new(),
        }
    }

    /// Returns whether the reflector is initialized.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Current title text.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Icon currently shown, if any.
    pub fn current_icon(&self) -> Option<TrayIconKind> {
        self.icon_manager.current_icon()
    }

    /// Menu layout for this session.
    pub fn menu_config(&self) -> MenuConfig {
        self.menu_builder.build(&self.tag)
    }

    /// Applies every queued update. Returns how many were applied.
    pub fn process_pending_updates(&mut self) -> usize {
        let mut applied = 0;
        loop {
            match self.update_rx.try_recv() {
                Ok(update) => {
                    self.handle_update(update);
                    applied += 1;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    tracing::debug!("tray update channel closed");
                    break;
                }
            }
        }
        self.process_menu_events();
        applied
    }

    fn handle_update(&mut self, update: TrayUpdate) {
        match update {
            TrayUpdate::SetTitle(title) => {
                tracing::debug!(title = %title, "tray title update");
                #[cfg(target_os = "macos")]
                if let Some(ref tray_icon) = self.tray_icon {
                    tray_icon.set_title(Some(&title));
                }
                self.title = title;
            }
            TrayUpdate::SetIcon(kind) => {
                if self.icon_manager.icon_changed(kind) {
                    tracing::debug!(icon = ?kind, "tray icon update");
                    if let Err(e) = self.apply_icon(kind) {
                        tracing::warn!(error = %e, "failed to switch tray icon");
                    }
                }
            }
        }
    }

    /// Removes the tray icon.
    pub fn shutdown(&mut self) {
        self.initialized = false;
        #[cfg(target_os = "macos")]
        {
            self.tray_icon = None;
            self.menu_ids.clear();
        }
    }

    /// Creates the status item (macOS only).
    ///
    /// Must be called from the main thread.
    ///
    /// # Errors
    ///
    /// Returns an error if the icon or menu cannot be created.
    #[cfg(target_os = "macos")]
    pub fn initialize(&mut self) -> Result<(), TrayError> {
        use tray_icon::TrayIconBuilder;

        let menu = self.build_native_menu()?;
        let icon = native_icon(TrayIconKind::Idle)?;
        self.icon_manager.icon_changed(TrayIconKind::Idle);

        let tray_icon = TrayIconBuilder::new()
            .with_title(&self.title)
            .with_icon(icon)
            .with_menu(Box::new(menu))
            .with_tooltip(IDLE_TITLE)
            .build()
            .map_err(|e| TrayError::BuildFailed(e.to_string()))?;

        self.tray_icon = Some(tray_icon);
        self.initialized = true;

        tracing::info!("tray icon initialized");
        Ok(())
    }

    /// Initializes the reflector (non-macOS, state only).
    #[cfg(not(target_os = "macos"))]
    pub fn initialize(&mut self) -> Result<(), TrayError> {
        tracing::warn!("tray icon is only rendered on macOS; updates are logged");
        self.icon_manager.icon_changed(TrayIconKind::Idle);
        self.initialized = true;
        Ok(())
    }

    #[cfg(target_os = "macos")]
    fn apply_icon(&self, kind: TrayIconKind) -> Result<(), TrayError> {
        if let Some(ref tray_icon) = self.tray_icon {
            let icon = native_icon(kind)?;
            tray_icon
                .set_icon(Some(icon))
                .map_err(|e| TrayError::BuildFailed(e.to_string()))?;
        }
        Ok(())
    }

    #[cfg(not(target_os = "macos"))]
    fn apply_icon(&self, _kind: TrayIconKind) -> Result<(), TrayError> {
        Ok(())
    }

    #[cfg(target_os = "macos")]
    fn build_native_menu(&mut self) -> Result<tray_icon::menu::Menu, TrayError> {
        use tray_icon::menu::{Menu, MenuItem, PredefinedMenuItem};

        let config = self.menu_config();
        let menu = Menu::new();
        let build_err = |e: tray_icon::menu::Error| TrayError::BuildFailed(e.to_string());

        let title_item = MenuItem::new(&config.title.text, false, None);
        menu.append(&title_item).map_err(build_err)?;
        menu.append(&PredefinedMenuItem::separator())
            .map_err(build_err)?;

        self.menu_ids.clear();
        for (action, item) in &config.actions {
            let native = MenuItem::new(&item.text, item.enabled, None);
            menu.append(&native).map_err(build_err)?;
            self.menu_ids.push((native.id().clone(), *action));
        }

        Ok(menu)
    }

    #[cfg(target_os = "macos")]
    fn process_menu_events(&self) {
        use tray_icon::menu::MenuEvent;

        while let Ok(event) = MenuEvent::receiver().try_recv() {
            if let Some((_, action)) = self.menu_ids.iter().find(|(id, _)| *id == event.id) {
                self.menu_builder.handle_click(*action);
            }
        }
    }

    #[cfg(not(target_os = "macos"))]
    fn process_menu_events(&self) {}
}

#[cfg(target_os = "macos")]
fn native_icon(kind: TrayIconKind) -> Result<tray_icon::Icon, TrayError> {
    tray_icon::Icon::from_rgba(kind.rgba(ICON_SIZE), ICON_SIZE, ICON_SIZE)
        .map_err(|e| TrayError::InvalidIcon(e.to_string()))
}

impl std::fmt::Debug for TrayReflector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrayReflector")
            .field("initialized", &self.initialized)
            .field("title", &self.title)
            .field("icon_manager", &self.icon_manager)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
