//! Per-view rename overlay manager.
//!
//! One [`AdornmentManager`] exists per open view. It keeps the view's adornment
//! surface in sync with the active rename session: at most one overlay, shown
//! only when the session's workspace is among the workspaces the view displays.

use std::sync::Arc;

use quill_config::ThemeConfig;
use quill_primitives::WorkspaceId;
use tokio::sync::mpsc;

use crate::adornment::{AdornmentLayer, AdornmentSurface, Positioning};
use crate::events::Subscription;
use crate::options::OptionsReader;
use crate::overlay::{Overlay, Presentation, RenameDashboard, RenameFlyout};
use crate::registry::ViewModelRegistry;
use crate::session::{RenameService, RenameSession};
use crate::view::{TextView, WorkspaceMap};
use crate::view_model::{DashboardViewModel, FlyoutViewModel, identifier_selection};

/// Applies the current theme to an overlay before it is installed.
pub trait ThemeApplier: Send + Sync {
	fn apply(&self, overlay: &mut Overlay);
}

impl ThemeApplier for ThemeConfig {
	fn apply(&self, overlay: &mut Overlay) {
		overlay.style_mut().theme = self.name.clone();
	}
}

/// Refreshes the dashboard's colors. Invoked on every recompute that finds a
/// session to show.
pub trait DashboardColorUpdater: Send + Sync {
	fn update_colors(&self);
}

/// Host services shared by the managers of every view.
///
/// Keeps the registry tracking the service, so view models are evicted as soon
/// as their session ends, for as long as any clone of the provider lives.
#[derive(Clone)]
pub struct AdornmentProvider {
	service: Arc<RenameService>,
	registry: Arc<ViewModelRegistry>,
	tracking: Arc<Subscription>,
	workspaces: Arc<dyn WorkspaceMap>,
	options: Arc<dyn OptionsReader>,
	theme: Option<Arc<dyn ThemeApplier>>,
	colors: Option<Arc<dyn DashboardColorUpdater>>,
}

impl AdornmentProvider {
	pub fn new(
		service: Arc<RenameService>,
		registry: Arc<ViewModelRegistry>,
		workspaces: Arc<dyn WorkspaceMap>,
		options: Arc<dyn OptionsReader>,
	) -> Self {
		let tracking = Arc::new(registry.track(&service));
		Self {
			service,
			registry,
			tracking,
			workspaces,
			options,
			theme: None,
			colors: None,
		}
	}

	pub fn with_theme(mut self, theme: Arc<dyn ThemeApplier>) -> Self {
		self.theme = Some(theme);
		self
	}

	pub fn with_color_updater(mut self, colors: Arc<dyn DashboardColorUpdater>) -> Self {
		self.colors = Some(colors);
		self
	}

	pub fn service(&self) -> &Arc<RenameService> {
		&self.service
	}

	pub fn registry(&self) -> &Arc<ViewModelRegistry> {
		&self.registry
	}

	/// True while the registry is evicting on session end.
	pub fn is_tracking(&self) -> bool {
		self.tracking.is_active()
	}

	/// Creates the manager for a newly opened view.
	pub fn attach<V: TextView, S: AdornmentSurface>(&self, view: Arc<V>, surface: S) -> AdornmentManager<V, S> {
		AdornmentManager::new(self.clone(), view, surface)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Notification {
	SessionChanged,
	ViewClosed,
}

/// Binds one view to the rename service.
///
/// Session and close notifications are queued from whatever thread raised
/// them. Nothing touches the surface until the owner calls [`Self::pump`] or
/// drives [`Self::run`] on the view's own context.
pub struct AdornmentManager<V: TextView, S: AdornmentSurface = AdornmentLayer> {
	provider: AdornmentProvider,
	view: Arc<V>,
	surface: S,
	session_sub: Subscription,
	closed_sub: Subscription,
	mailbox: mpsc::UnboundedReceiver<Notification>,
	disposed: bool,
}

impl<V: TextView, S: AdornmentSurface> AdornmentManager<V, S> {
	/// Subscribes to session changes and view close, then installs the overlay
	/// for the current session, if any.
	pub fn new(provider: AdornmentProvider, view: Arc<V>, surface: S) -> Self {
		let (tx, mailbox) = mpsc::unbounded_channel();

		let session_tx = tx.clone();
		let session_sub = provider.service.subscribe(move |_| {
			let _ = session_tx.send(Notification::SessionChanged);
		});
		let closed_sub = view.closed().subscribe(move |_| {
			let _ = tx.send(Notification::ViewClosed);
		});

		let mut manager = Self {
			provider,
			view,
			surface,
			session_sub,
			closed_sub,
			mailbox,
			disposed: false,
		};
		manager.recompute();
		manager
	}

	pub fn view(&self) -> &Arc<V> {
		&self.view
	}

	pub fn surface(&self) -> &S {
		&self.surface
	}

	pub fn surface_mut(&mut self) -> &mut S {
		&mut self.surface
	}

	pub fn is_disposed(&self) -> bool {
		self.disposed
	}

	/// Handles every queued notification. Returns how many were handled.
	pub fn pump(&mut self) -> usize {
		let mut handled = 0;
		while !self.disposed {
			let Ok(notification) = self.mailbox.try_recv() else {
				break;
			};
			self.handle(notification);
			handled += 1;
		}
		handled
	}

	/// Handles notifications as they arrive until the view closes.
	pub async fn run(&mut self) {
		while !self.disposed {
			let Some(notification) = self.mailbox.recv().await else {
				break;
			};
			self.handle(notification);
		}
	}

	fn handle(&mut self, notification: Notification) {
		tracing::trace!(view = %self.view.id(), ?notification, "rename adornment notification");
		match notification {
			Notification::SessionChanged => self.recompute(),
			Notification::ViewClosed => self.dispose(),
		}
	}

	/// Removes the current overlay and installs one for the active session
	/// when this view should show it.
	pub fn recompute(&mut self) {
		if self.disposed {
			return;
		}
		self.surface.remove_all();

		let Some(session) = self.provider.service.active_session().filter(|s| !s.is_ended()) else {
			return;
		};
		if !self.shows_workspace(session.workspace()) {
			tracing::trace!(view = %self.view.id(), session = %session.id(), "session belongs to another workspace");
			return;
		}

		if let Some(colors) = &self.provider.colors {
			colors.update_colors();
		}

		let Some(mut overlay) = self.build_overlay(&session) else {
			return;
		};
		if let Some(theme) = &self.provider.theme {
			theme.apply(&mut overlay);
		}

		tracing::debug!(
			view = %self.view.id(),
			session = %session.id(),
			kind = ?overlay.presentation(),
			"rename overlay installed"
		);
		self.surface.add(overlay, Positioning::ViewportRelative, Box::new(Overlay::dispose));
	}

	fn shows_workspace(&self, workspace: WorkspaceId) -> bool {
		self.view
			.buffers()
			.into_iter()
			.any(|buffer| self.provider.workspaces.workspace_for_buffer(buffer) == Some(workspace))
	}

	fn build_overlay(&self, session: &Arc<RenameSession>) -> Option<Overlay> {
		let registry = &self.provider.registry;
		match Presentation::from_inline_option(self.provider.options.use_inline_adornment()) {
			Presentation::Inline => {
				if !self.view.has_aggregate_focus() {
					tracing::trace!(view = %self.view.id(), "view unfocused, flyout skipped");
					return None;
				}
				let selection = identifier_selection(session.trigger_span(), self.view.primary_selection());
				let view_model = registry.get_or_insert_with(session, |s| FlyoutViewModel::new(s, selection));
				Some(Overlay::Flyout(RenameFlyout::new(view_model, self.view.id())))
			}
			Presentation::Panel => {
				let view_model = registry.get_or_insert_with(session, DashboardViewModel::new);
				Some(Overlay::Dashboard(RenameDashboard::new(view_model, self.view.id())))
			}
		}
	}

	/// Releases both subscriptions and removes the overlay. Idempotent.
	pub fn dispose(&mut self) {
		if self.disposed {
			return;
		}
		self.disposed = true;
		self.session_sub.unsubscribe();
		self.closed_sub.unsubscribe();
		self.surface.remove_all();
		tracing::debug!(view = %self.view.id(), "rename adornment manager disposed");
	}
}

impl<V: TextView, S: AdornmentSurface> Drop for AdornmentManager<V, S> {
	fn drop(&mut self) {
		self.dispose();
	}
}
