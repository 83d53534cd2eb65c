#![forbid(unsafe_code)]

//! Navigation bar view model.
//!
//! Derived, never stored: [`NavBarView::build`] turns the published active
//! section, the menu state, and the current viewport width into exactly what
//! the bar should render.
//!
//! # Invariants
//!
//! 1. At most one link is highlighted, and only when the active section is
//!    `Known`.
//! 2. Desktop widths show the link row and never the toggle or mobile panel.
//! 3. The mobile panel is shown iff the width is mobile and the menu is open.
//! 4. The brand button is never highlighted.

use serde::Serialize;
use stillpoint_layout::ActiveSection;
use stillpoint_runtime::MenuState;

use crate::site::{NavLink, PageDefinition};

/// Width (CSS px) at which the bar switches from the hamburger menu to the
/// inline link row.
pub const DESKTOP_MIN_WIDTH: f64 = 768.0;

/// Responsive layout class of the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Breakpoint {
    Mobile,
    #[default]
    Desktop,
}

impl Breakpoint {
    /// Classify a viewport width. Non-finite widths fall back to desktop.
    #[must_use]
    pub fn from_width(width: f64) -> Self {
        if width.is_finite() && width < DESKTOP_MIN_WIDTH {
            Self::Mobile
        } else {
            Self::Desktop
        }
    }
}

/// Icon on the mobile menu toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToggleIcon {
    Menu,
    Close,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItemView {
    pub label: String,
    pub target: String,
    pub highlighted: bool,
}

/// Brand button. Always rendered plain, whichever section is active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrandView {
    pub label: String,
    pub target: String,
}

impl NavItemView {
    fn from_link(link: &NavLink, active: &ActiveSection) -> Self {
        Self {
            label: link.label.clone(),
            target: link.target.to_string(),
            highlighted: active.is(link.target.as_str()),
        }
    }
}

/// Everything the nav bar needs for one render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavBarView {
    pub brand: BrandView,
    pub items: Vec<NavItemView>,
    pub active: Option<String>,
    pub menu_open: bool,
    pub breakpoint: Breakpoint,
    pub show_desktop_links: bool,
    pub show_menu_toggle: bool,
    pub show_mobile_panel: bool,
    pub toggle_icon: ToggleIcon,
}

impl NavBarView {
    #[must_use]
    pub fn build(
        page: &PageDefinition,
        active: &ActiveSection,
        menu: MenuState,
        breakpoint: Breakpoint,
    ) -> Self {
        let mobile = breakpoint == Breakpoint::Mobile;
        Self {
            brand: BrandView {
                label: page.brand.label.clone(),
                target: page.brand.target.to_string(),
            },
            items: page
                .links
                .iter()
                .map(|link| NavItemView::from_link(link, active))
                .collect(),
            active: active.id().map(ToString::to_string),
            menu_open: menu.is_open(),
            breakpoint,
            show_desktop_links: !mobile,
            show_menu_toggle: mobile,
            show_mobile_panel: mobile && menu.is_open(),
            toggle_icon: if menu.is_open() {
                ToggleIcon::Close
            } else {
                ToggleIcon::Menu
            },
        }
    }

    /// Target of the highlighted link, if any.
    #[must_use]
    pub fn highlighted(&self) -> Option<&str> {
        self.items
            .iter()
            .find(|item| item.highlighted)
            .map(|item| item.target.as_str())
    }
}
