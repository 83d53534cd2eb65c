#![forbid(unsafe_code)]

//! Navigation intent: "jump to section" and the mobile menu.
//!
//! # State machine
//!
//! ```text
//!            toggle_menu
//!   Closed ─────────────▶ Open
//!     ▲  ◀─────────────── │
//!     │   toggle_menu /   │
//!     │   close_menu /    │
//!     │   navigate_to(ok) │
//!     └───────────────────┘
//! ```
//!
//! A successful [`NavigationController::navigate_to`] issues exactly one
//! smooth [`ScrollRequest`] and then closes the menu, whether or not it was
//! open. An identifier that does not resolve to a mounted section is a no-op:
//! no request, menu untouched, no error surfaced.
//!
//! The scroll itself is fire-and-forget. The controller never feeds its own
//! request back into the active section; the scroll observer catches up once
//! the page settles.

use std::rc::Rc;

use stillpoint_layout::{ActiveSection, LayoutProbe, RegistryError, SectionId, SectionRegistry};
use tracing::debug;

use crate::reactive::{Observable, ReadSignal, Subscription};

/// Mobile menu panel state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

impl MenuState {
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Closed => Self::Open,
            Self::Open => Self::Closed,
        }
    }
}

/// Scroll animation style. The page only ever asks for smooth scrolling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollBehavior {
    #[default]
    Smooth,
}

impl ScrollBehavior {
    /// Value for the DOM `scrollIntoView({ behavior })` option.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Smooth => "smooth",
        }
    }
}

/// Request to bring a section into view.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollRequest {
    pub target: SectionId,
    /// Section top at the time of the request, for hosts that scroll by offset.
    pub top: f64,
    pub behavior: ScrollBehavior,
}

/// Outbound browser scroll API.
pub trait ScrollDriver {
    /// Start the animation. Must not block on its completion.
    fn request_scroll(&mut self, request: ScrollRequest);
}

impl<F: FnMut(ScrollRequest)> ScrollDriver for F {
    fn request_scroll(&mut self, request: ScrollRequest) {
        self(request);
    }
}

/// Driver that queues requests for the host to drain.
#[derive(Debug, Default)]
pub struct QueuedScrollDriver {
    pending: Vec<ScrollRequest>,
}

impl QueuedScrollDriver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain queued requests in issue order.
    pub fn take(&mut self) -> Vec<ScrollRequest> {
        std::mem::take(&mut self.pending)
    }

    #[must_use]
    pub fn pending(&self) -> &[ScrollRequest] {
        &self.pending
    }
}

impl ScrollDriver for QueuedScrollDriver {
    fn request_scroll(&mut self, request: ScrollRequest) {
        self.pending.push(request);
    }
}

/// Result of a navigation command. Never an error: an unresolved target is
/// simply ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigateOutcome {
    /// A smooth scroll was requested and the menu closed.
    Requested(SectionId),
    /// The target is unknown or not mounted; nothing happened.
    Unresolved(SectionId),
}

impl NavigateOutcome {
    #[must_use]
    pub const fn is_requested(&self) -> bool {
        matches!(self, Self::Requested(_))
    }
}

/// Owns the menu state and turns navigation intents into scroll requests.
pub struct NavigationController<P, D> {
    registry: Rc<SectionRegistry<P>>,
    driver: D,
    menu: Observable<MenuState>,
    active: Option<ReadSignal<ActiveSection>>,
}

impl<P, D> std::fmt::Debug for NavigationController<P, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationController")
            .field("menu", &self.menu.with(|m| *m))
            .finish_non_exhaustive()
    }
}

impl<P: LayoutProbe, D: ScrollDriver> NavigationController<P, D> {
    /// New controller with the menu closed.
    #[must_use]
    pub fn new(registry: Rc<SectionRegistry<P>>, driver: D) -> Self {
        Self {
            registry,
            driver,
            menu: Observable::new(MenuState::Closed),
            active: None,
        }
    }

    /// Attach the scroll observer's published state for informational reads.
    #[must_use]
    pub fn with_active_section(mut self, active: ReadSignal<ActiveSection>) -> Self {
        self.active = Some(active);
        self
    }

    /// Scroll smoothly to `id` and close the menu.
    ///
    /// Unresolvable targets leave everything untouched.
    pub fn navigate_to(&mut self, id: &str) -> NavigateOutcome {
        let bounds = match self.registry.bounds_of(id) {
            Ok(bounds) => bounds,
            Err(RegistryError::NotFound(target)) => {
                debug!(section = %target, "navigation target not mounted; ignoring");
                return NavigateOutcome::Unresolved(target);
            }
        };
        let target = SectionId::new(id);
        self.driver.request_scroll(ScrollRequest {
            target: target.clone(),
            top: bounds.top,
            behavior: ScrollBehavior::Smooth,
        });
        self.menu.set(MenuState::Closed);
        debug!(section = %target, top = bounds.top, "smooth scroll requested");
        NavigateOutcome::Requested(target)
    }

    /// Flip the mobile menu.
    pub fn toggle_menu(&self) -> MenuState {
        let next = self.menu.with(|m| m.toggled());
        self.menu.set(next);
        debug!(menu = ?next, "menu toggled");
        next
    }

    /// Close the mobile menu if it is open.
    pub fn close_menu(&self) {
        self.menu.set(MenuState::Closed);
    }

    #[must_use]
    pub fn menu_state(&self) -> MenuState {
        self.menu.get()
    }

    #[must_use]
    pub fn is_menu_open(&self) -> bool {
        self.menu.get().is_open()
    }

    /// Read-only handle for conditional rendering of the mobile panel.
    #[must_use]
    pub fn menu_signal(&self) -> ReadSignal<MenuState> {
        self.menu.read_only()
    }

    pub fn subscribe_menu(&self, callback: impl Fn(&MenuState) + 'static) -> Subscription {
        self.menu.subscribe(callback)
    }

    /// Active section as last published by the scroll observer, if attached.
    #[must_use]
    pub fn active_section(&self) -> ActiveSection {
        self.active
            .as_ref()
            .map_or(ActiveSection::Unset, ReadSignal::get)
    }

    #[must_use]
    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }
}
