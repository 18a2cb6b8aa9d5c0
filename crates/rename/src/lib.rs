//! Rename session overlay lifecycle.
//!
//! A [`RenameService`] owns the single active [`RenameSession`]. Every open view
//! gets an [`AdornmentManager`] that listens for session changes and installs or
//! removes the rename overlay on that view's adornment surface. Views showing the
//! same session share one view model, handed out by the [`ViewModelRegistry`].
//!
//! Session notifications may fire on any thread. Managers never act inside the
//! notification; they queue it and act when the owning view calls
//! [`AdornmentManager::pump`] or drives [`AdornmentManager::run`].

mod adornment;
mod error;
mod events;
mod manager;
mod options;
mod overlay;
mod registry;
mod session;
mod view;
mod view_model;

#[cfg(test)]
mod invariants;

pub use adornment::{AdornmentLayer, AdornmentSurface, Positioning, Teardown};
pub use error::{RenameError, Result};
pub use events::{EventSource, Subscription};
pub use manager::{AdornmentManager, AdornmentProvider, DashboardColorUpdater, ThemeApplier};
pub use options::{OptionsReader, SharedOptions};
pub use overlay::{Overlay, OverlayStyle, Presentation, RenameDashboard, RenameFlyout};
pub use registry::ViewModelRegistry;
pub use session::{RenameService, RenameSession, SessionEndReason, SessionEvent};
pub use view::{TextView, ViewClosed, WorkspaceMap};
pub use view_model::{DashboardViewModel, FlyoutViewModel, identifier_selection};
