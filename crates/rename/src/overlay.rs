//! The two rename overlay variants.

use std::sync::Arc;

use quill_primitives::{SessionId, ViewId};

use crate::view_model::{DashboardViewModel, FlyoutViewModel};

/// Which overlay a session is shown with, chosen by the inline-adornment option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presentation {
	/// Flyout at the identifier.
	Inline,
	/// Dashboard panel docked to the viewport.
	Panel,
}

impl Presentation {
	pub fn from_inline_option(inline: bool) -> Self {
		if inline { Self::Inline } else { Self::Panel }
	}
}

/// Theme state applied to an overlay before it is installed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverlayStyle {
	pub theme: Option<String>,
}

/// Inline rename flyout. Counts as attached to its view model while alive.
#[derive(Debug)]
pub struct RenameFlyout {
	view_model: Arc<FlyoutViewModel>,
	view: ViewId,
	pub style: OverlayStyle,
}

impl RenameFlyout {
	pub fn new(view_model: Arc<FlyoutViewModel>, view: ViewId) -> Self {
		view_model.attach();
		Self {
			view_model,
			view,
			style: OverlayStyle::default(),
		}
	}

	pub fn view_model(&self) -> &Arc<FlyoutViewModel> {
		&self.view_model
	}
}

impl Drop for RenameFlyout {
	fn drop(&mut self) {
		self.view_model.detach();
	}
}

/// Rename dashboard panel.
#[derive(Debug)]
pub struct RenameDashboard {
	view_model: Arc<DashboardViewModel>,
	view: ViewId,
	pub style: OverlayStyle,
}

impl RenameDashboard {
	pub fn new(view_model: Arc<DashboardViewModel>, view: ViewId) -> Self {
		view_model.attach();
		Self {
			view_model,
			view,
			style: OverlayStyle::default(),
		}
	}

	pub fn view_model(&self) -> &Arc<DashboardViewModel> {
		&self.view_model
	}
}

impl Drop for RenameDashboard {
	fn drop(&mut self) {
		self.view_model.detach();
	}
}

/// A constructed rename overlay.
#[derive(Debug)]
pub enum Overlay {
	Flyout(RenameFlyout),
	Dashboard(RenameDashboard),
}

impl Overlay {
	pub fn presentation(&self) -> Presentation {
		match self {
			Self::Flyout(_) => Presentation::Inline,
			Self::Dashboard(_) => Presentation::Panel,
		}
	}

	pub fn session_id(&self) -> SessionId {
		match self {
			Self::Flyout(f) => f.view_model.session_id(),
			Self::Dashboard(d) => d.view_model.session_id(),
		}
	}

	pub fn view(&self) -> ViewId {
		match self {
			Self::Flyout(f) => f.view,
			Self::Dashboard(d) => d.view,
		}
	}

	pub fn style(&self) -> &OverlayStyle {
		match self {
			Self::Flyout(f) => &f.style,
			Self::Dashboard(d) => &d.style,
		}
	}

	pub fn style_mut(&mut self) -> &mut OverlayStyle {
		match self {
			Self::Flyout(f) => &mut f.style,
			Self::Dashboard(d) => &mut d.style,
		}
	}

	/// Releases the overlay and its hold on the view model.
	pub fn dispose(self) {
		tracing::trace!(session = %self.session_id(), view = %self.view(), kind = ?self.presentation(), "overlay disposed");
	}
}
