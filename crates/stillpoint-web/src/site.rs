#![forbid(unsafe_code)]

//! Page composition for the studio site.
//!
//! The section list and nav destinations are hand-authored and fixed for the
//! lifetime of a page view. What each section renders (copy, imagery, the
//! booking and social embeds) is not the runtime's concern.

use stillpoint_layout::{SectionId, SectionList, SectionListError};

/// Section anchors, top to bottom.
pub const STUDIO_SECTIONS: [&str; 4] = ["hero", "about", "contact", "socials"];

/// One navigation destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub label: String,
    pub target: SectionId,
}

impl NavLink {
    #[must_use]
    pub fn new(label: impl Into<String>, target: impl Into<SectionId>) -> Self {
        Self {
            label: label.into(),
            target: target.into(),
        }
    }
}

/// Sections plus the nav bar's destinations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageDefinition {
    pub sections: SectionList,
    /// Brand button in the bar's leading corner.
    pub brand: NavLink,
    /// Menu links in display order (desktop row and mobile panel alike).
    pub links: Vec<NavLink>,
}

impl PageDefinition {
    /// Compose a page. Links may point at ids outside `sections`; navigating
    /// to one is a no-op.
    pub fn new<I, S>(
        sections: I,
        brand: NavLink,
        links: Vec<NavLink>,
    ) -> Result<Self, SectionListError>
    where
        I: IntoIterator<Item = S>,
        S: Into<SectionId>,
    {
        Ok(Self {
            sections: SectionList::new(sections)?,
            brand,
            links,
        })
    }

    /// The studio page: hero, about, contact, socials.
    pub fn studio() -> Result<Self, SectionListError> {
        Self::new(
            STUDIO_SECTIONS,
            NavLink::new("STUDIO", "hero"),
            vec![
                NavLink::new("About", "about"),
                NavLink::new("Contact", "contact"),
                NavLink::new("Connect", "socials"),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn studio_page_order_and_links() {
        let page = PageDefinition::studio().unwrap();
        let ids: Vec<_> = page.sections.ids().map(SectionId::as_str).collect();
        assert_eq!(ids, STUDIO_SECTIONS);
        assert_eq!(page.brand.target, "hero");
        let targets: Vec<_> = page.links.iter().map(|l| l.target.as_str()).collect();
        assert_eq!(targets, ["about", "contact", "socials"]);
        assert_eq!(page.links[2].label, "Connect");
    }

    #[test]
    fn custom_page_rejects_duplicate_sections() {
        let err = PageDefinition::new(
            ["hero", "hero"],
            NavLink::new("Home", "hero"),
            Vec::new(),
        );
        assert!(err.is_err());
    }
}
