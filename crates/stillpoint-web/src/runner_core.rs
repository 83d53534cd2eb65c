#![forbid(unsafe_code)]

//! Platform-independent page runner.
//!
//! [`SiteRunner`] owns everything one page view needs: the host-fed layout,
//! the section registry, the scroll hub, the mounted scroll observer, and the
//! navigation controller. The wasm exports and the native tests both drive it
//! through the same methods. No JS types here.
//!
//! Scroll requests are queued rather than executed; the host drains them with
//! [`SiteRunner::take_scroll_requests`] and calls `scrollIntoView` itself.

use std::rc::Rc;

use stillpoint_layout::{ActiveSection, MeasuredLayout, SectionListError, SectionRegistry};
use stillpoint_runtime::{
    ConfigError, MenuState, NavigateOutcome, NavigationController, QueuedScrollDriver, ScrollHub,
    ScrollObserver, ScrollRequest, ScrollSpyConfig,
};
use tracing::{debug, warn};

use crate::host_message::{HostMessage, parse_host_message};
use crate::nav_bar::{Breakpoint, NavBarView};
use crate::site::PageDefinition;

/// Errors mounting a [`SiteRunner`].
#[derive(Debug)]
pub enum SiteError {
    Page(SectionListError),
    Config(ConfigError),
}

impl std::fmt::Display for SiteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Page(e) => write!(f, "invalid page: {e}"),
            Self::Config(e) => write!(f, "invalid scroll-spy config: {e}"),
        }
    }
}

impl std::error::Error for SiteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Page(e) => Some(e),
            Self::Config(e) => Some(e),
        }
    }
}

impl From<SectionListError> for SiteError {
    fn from(e: SectionListError) -> Self {
        Self::Page(e)
    }
}

impl From<ConfigError> for SiteError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Host-driven runtime for one page view.
pub struct SiteRunner {
    page: PageDefinition,
    registry: Rc<SectionRegistry<MeasuredLayout>>,
    hub: ScrollHub,
    observer: ScrollObserver,
    nav: NavigationController<MeasuredLayout, QueuedScrollDriver>,
    breakpoint: Breakpoint,
    /// Structured log lines for the host, drained by `take_logs`.
    logs: Vec<String>,
    torn_down: bool,
}

impl std::fmt::Debug for SiteRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SiteRunner")
            .field("active", &self.observer.active())
            .field("menu", &self.nav.menu_state())
            .field("breakpoint", &self.breakpoint)
            .field("torn_down", &self.torn_down)
            .finish_non_exhaustive()
    }
}

impl SiteRunner {
    /// Mount a page at the given viewport width. No section is measured yet,
    /// so the active section starts `Unset`. An invalid config is rejected.
    pub fn new(
        page: PageDefinition,
        config: &ScrollSpyConfig,
        width: f64,
    ) -> Result<Self, ConfigError> {
        let registry = Rc::new(SectionRegistry::new(page.sections.clone(), MeasuredLayout::new()));
        let hub = ScrollHub::new();
        let observer = ScrollObserver::mount(&hub, Rc::clone(&registry), config)?;
        let nav = NavigationController::new(Rc::clone(&registry), QueuedScrollDriver::new())
            .with_active_section(observer.active_signal());
        let breakpoint = Breakpoint::from_width(width);
        let logs = vec![format!("site_mount {}", config.to_jsonl())];
        debug!(sections = page.sections.len(), ?breakpoint, "site runner mounted");
        Ok(Self {
            page,
            registry,
            hub,
            observer,
            nav,
            breakpoint,
            logs,
            torn_down: false,
        })
    }

    /// The studio page with default scroll-spy tuning.
    pub fn studio(width: f64) -> Result<Self, SiteError> {
        let page = PageDefinition::studio()?;
        Self::new(page, &ScrollSpyConfig::default(), width).map_err(SiteError::Config)
    }

    /// Record a section's measured position. Invalid measurements are
    /// logged and dropped.
    pub fn measure_section(&mut self, id: &str, top: f64, height: f64) -> bool {
        if self.torn_down {
            return false;
        }
        match self.registry.probe().update(id, top, height) {
            Ok(()) => true,
            Err(err) => {
                warn!(section = id, %err, "rejected section measurement");
                self.logs.push(format!("layout_rejected id={id} error=\"{err}\""));
                false
            }
        }
    }

    /// Forget a section that left the document. Returns whether it was
    /// mounted.
    pub fn unmount_section(&mut self, id: &str) -> bool {
        !self.torn_down && self.registry.probe().unmount(id)
    }

    /// Feed one raw scroll sample. Returns whether the active section
    /// changed.
    pub fn scroll(&mut self, raw_scroll: f64) -> bool {
        let before = self.observer.publications();
        self.hub.emit(raw_scroll);
        let changed = self.observer.publications() != before;
        if changed {
            let active = self.observer.active();
            let id = active.id().map_or("", |id| id.as_str());
            self.logs.push(format!("scrollspy active={id} scroll={raw_scroll}"));
        }
        changed
    }

    /// Apply a new viewport width. Returns whether the breakpoint changed.
    pub fn resize(&mut self, width: f64) -> bool {
        if self.torn_down {
            return false;
        }
        let next = Breakpoint::from_width(width);
        if next == self.breakpoint {
            return false;
        }
        debug!(from = ?self.breakpoint, to = ?next, "breakpoint changed");
        self.breakpoint = next;
        true
    }

    /// Navigate to a section. Returns whether a scroll was requested.
    pub fn navigate_to(&mut self, id: &str) -> bool {
        if self.torn_down {
            return false;
        }
        let outcome = self.nav.navigate_to(id);
        let label = match outcome {
            NavigateOutcome::Requested(_) => "requested",
            NavigateOutcome::Unresolved(_) => "unresolved",
        };
        self.logs.push(format!("nav phase=navigate id={id} outcome={label}"));
        outcome.is_requested()
    }

    /// Flip the mobile menu. After teardown the menu stays closed.
    pub fn toggle_menu(&mut self) -> MenuState {
        if self.torn_down {
            return self.nav.menu_state();
        }
        let state = self.nav.toggle_menu();
        self.logs.push(format!("nav phase=toggle_menu open={}", state.is_open()));
        state
    }

    pub fn close_menu(&mut self) {
        if self.torn_down {
            return;
        }
        self.nav.close_menu();
    }

    /// Decode and apply one JSON host message. Malformed or unknown messages
    /// return `false`.
    pub fn push_encoded(&mut self, json: &str) -> bool {
        match parse_host_message(json) {
            Ok(msg) => self.dispatch(msg),
            Err(err) => {
                self.logs.push(format!("host_message_rejected: {err}"));
                false
            }
        }
    }

    /// Apply one decoded host message. Returns whether it had an effect.
    pub fn dispatch(&mut self, msg: HostMessage) -> bool {
        if self.torn_down {
            self.logs.push(format!(
                "host_message_ignored kind={} reason=torn_down",
                msg.kind()
            ));
            return false;
        }
        match msg {
            HostMessage::Scroll { y } => self.scroll(y),
            HostMessage::Layout { id, top, height } => self.measure_section(&id, top, height),
            HostMessage::Unmount { id } => self.unmount_section(&id),
            HostMessage::Resize { width } => self.resize(width),
            HostMessage::Navigate { id } => self.navigate_to(&id),
            HostMessage::ToggleMenu => {
                self.toggle_menu();
                true
            }
            HostMessage::CloseMenu => {
                let was_open = self.nav.is_menu_open();
                self.close_menu();
                was_open
            }
        }
    }

    /// Drain queued smooth-scroll requests in issue order.
    pub fn take_scroll_requests(&mut self) -> Vec<ScrollRequest> {
        self.nav.driver_mut().take()
    }

    /// Drain accumulated log lines.
    pub fn take_logs(&mut self) -> Vec<String> {
        std::mem::take(&mut self.logs)
    }

    /// What the navigation bar should render right now.
    #[must_use]
    pub fn nav_view(&self) -> NavBarView {
        NavBarView::build(
            &self.page,
            &self.observer.active(),
            self.nav.menu_state(),
            self.breakpoint,
        )
    }

    pub fn nav_view_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.nav_view())
    }

    #[must_use]
    pub fn active_section(&self) -> ActiveSection {
        self.observer.active()
    }

    #[must_use]
    pub fn menu_state(&self) -> MenuState {
        self.nav.menu_state()
    }

    #[must_use]
    pub fn breakpoint(&self) -> Breakpoint {
        self.breakpoint
    }

    #[must_use]
    pub fn page(&self) -> &PageDefinition {
        &self.page
    }

    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Release the scroll listener, forget every measurement, and stop
    /// accepting host input. Returns `true` only for the first call.
    pub fn teardown(&mut self) -> bool {
        if self.torn_down {
            return false;
        }
        self.torn_down = true;
        self.observer.unmount();
        self.nav.close_menu();
        self.registry.probe().clear();
        self.logs.push(format!(
            "site_teardown samples={} publications={}",
            self.observer.samples(),
            self.observer.publications()
        ));
        true
    }
}
