#![forbid(unsafe_code)]

//! End-to-end scroll spy behaviour: hub → observer → published state, and
//! navigation commands flowing back out.
//!
//! Run:
//!   cargo test -p stillpoint-runtime --test scroll_spy_e2e

use std::cell::RefCell;
use std::rc::Rc;

use stillpoint_layout::{ActiveSection, MeasuredLayout, SectionId, SectionList, SectionRegistry};
use stillpoint_runtime::{
    MenuState, NavigationController, QueuedScrollDriver, ScrollHub, ScrollObserver,
    ScrollSpyConfig, Subscription,
};

struct Page {
    hub: ScrollHub,
    registry: Rc<SectionRegistry<MeasuredLayout>>,
    observer: ScrollObserver,
    nav: NavigationController<MeasuredLayout, QueuedScrollDriver>,
}

fn page() -> Page {
    let layout = MeasuredLayout::new();
    layout.update("hero", 0.0, 800.0).unwrap();
    layout.update("about", 800.0, 900.0).unwrap();
    layout.update("contact", 1700.0, 1000.0).unwrap();
    let registry = Rc::new(SectionRegistry::new(
        SectionList::new(["hero", "about", "contact"]).unwrap(),
        layout,
    ));
    let hub = ScrollHub::new();
    let observer =
        ScrollObserver::mount(&hub, Rc::clone(&registry), &ScrollSpyConfig::default()).unwrap();
    let nav = NavigationController::new(Rc::clone(&registry), QueuedScrollDriver::new())
        .with_active_section(observer.active_signal());
    Page {
        hub,
        registry,
        observer,
        nav,
    }
}

type PublishLog = Rc<RefCell<Vec<String>>>;

fn recorder(observer: &ScrollObserver) -> (PublishLog, Subscription) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let log_clone = Rc::clone(&log);
    let sub = observer.subscribe(move |active| {
        if let Some(id) = active.id() {
            log_clone.borrow_mut().push(id.to_string());
        }
    });
    (log, sub)
}

mod classification {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Biased offsets 750, 850, 1650, 1705 with a bias of 100.
    #[test]
    fn reference_scenario() {
        let p = page();
        let (log, _sub) = recorder(&p.observer);
        for raw in [650.0, 750.0, 1550.0, 1605.0] {
            p.hub.emit(raw);
        }
        assert_eq!(*log.borrow(), vec!["hero", "about", "contact"]);
        assert_eq!(p.observer.samples(), 4);
    }

    #[test]
    fn momentum_past_the_end_does_not_flicker() {
        let p = page();
        let (log, _sub) = recorder(&p.observer);
        for raw in [1800.0, 2700.0, 3200.0, 4000.0, 2800.0] {
            p.hub.emit(raw);
        }
        assert_eq!(*log.borrow(), vec!["contact"]);
        assert_eq!(
            p.observer.active(),
            ActiveSection::Known(SectionId::new("contact"))
        );
    }

    #[test]
    fn transient_overlap_resolves_to_earlier_section() {
        let p = page();
        p.registry.probe().update("about", 600.0, 1100.0).unwrap();
        p.hub.emit(600.0);
        assert_eq!(p.observer.active(), ActiveSection::Known(SectionId::new("hero")));
    }

    #[test]
    fn section_unmounting_mid_scroll_keeps_highlight() {
        let p = page();
        p.hub.emit(900.0);
        assert!(p.registry.probe().unmount("about"));
        p.hub.emit(1000.0);
        assert_eq!(p.observer.active(), ActiveSection::Known(SectionId::new("about")));
    }
}

mod lifecycle {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn double_unsubscribe_is_silent_and_final() {
        let p = page();
        let (log, _sub) = recorder(&p.observer);
        p.hub.emit(0.0);
        assert!(p.observer.unmount());
        assert!(!p.observer.unmount());
        p.hub.emit(1800.0);
        p.hub.emit(900.0);
        assert_eq!(*log.borrow(), vec!["hero"]);
    }

    #[test]
    fn high_frequency_events_publish_once_per_change() {
        let p = page();
        let (log, _sub) = recorder(&p.observer);
        for step in 0..10_000 {
            p.hub.emit(f64::from(step) * 0.25);
        }
        assert_eq!(p.observer.samples(), 10_000);
        assert_eq!(*log.borrow(), vec!["hero", "about", "contact"]);
    }
}

mod navigation {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn navigation_is_not_fed_back_into_classifier() {
        let mut p = page();
        p.hub.emit(0.0);
        assert!(p.nav.navigate_to("contact").is_requested());
        assert_eq!(p.nav.active_section(), ActiveSection::Known(SectionId::new("hero")));

        let requests = p.nav.driver_mut().take();
        assert_eq!(requests.len(), 1);
        // Host finishes the animation and reports the settled position.
        p.hub.emit(requests[0].top);
        assert_eq!(
            p.nav.active_section(),
            ActiveSection::Known(SectionId::new("contact"))
        );
    }

    #[test]
    fn menu_state_machine() {
        let mut p = page();
        assert_eq!(p.nav.menu_state(), MenuState::Closed);
        p.nav.toggle_menu();
        assert_eq!(p.nav.menu_state(), MenuState::Open);
        p.nav.navigate_to("nowhere");
        assert_eq!(p.nav.menu_state(), MenuState::Open);
        p.nav.navigate_to("about");
        assert_eq!(p.nav.menu_state(), MenuState::Closed);
        p.nav.navigate_to("about");
        assert_eq!(p.nav.menu_state(), MenuState::Closed);
        assert_eq!(p.nav.driver().pending().len(), 2);
    }

    #[test]
    fn menu_signal_tracks_controller() {
        let p = page();
        let signal = p.nav.menu_signal();
        p.nav.toggle_menu();
        assert!(signal.get().is_open());
        p.nav.close_menu();
        assert!(!signal.get().is_open());
    }
}
