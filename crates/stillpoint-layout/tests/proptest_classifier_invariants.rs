//! Property-based invariant tests for the active-section classifier.
//!
//! ## Invariants
//!
//! 1. An offset inside exactly one section resolves to that section.
//! 2. Overlapping matches resolve to the lowest order.
//! 3. No match returns the previous value unchanged.
//! 4. Once known, a classification never returns `Unset`.

use proptest::prelude::*;
use stillpoint_layout::{
    ActiveSection, ActiveSectionClassifier, BoundsSnapshot, SectionBounds, SectionId, ScrollState,
};

// ── Strategies ────────────────────────────────────────────────────────────

/// Contiguous, non-overlapping sections laid out top to bottom.
fn arb_stacked_layout() -> impl Strategy<Value = (BoundsSnapshot, Vec<SectionId>)> {
    prop::collection::vec(1u32..2_000, 1..8).prop_map(|heights| {
        let mut bounds = BoundsSnapshot::default();
        let mut order = Vec::new();
        let mut top = 0.0;
        for (i, h) in heights.into_iter().enumerate() {
            let id = SectionId::new(format!("s{i}"));
            bounds.insert(
                id.clone(),
                SectionBounds {
                    top,
                    height: f64::from(h),
                },
            );
            order.push(id);
            top += f64::from(h);
        }
        (bounds, order)
    })
}

/// Arbitrary (possibly overlapping) sections.
fn arb_overlapping_layout() -> impl Strategy<Value = (BoundsSnapshot, Vec<SectionId>)> {
    prop::collection::vec((0u32..5_000, 0u32..2_000), 1..8).prop_map(|dims| {
        let mut bounds = BoundsSnapshot::default();
        let mut order = Vec::new();
        for (i, (top, h)) in dims.into_iter().enumerate() {
            let id = SectionId::new(format!("s{i}"));
            bounds.insert(
                id.clone(),
                SectionBounds {
                    top: f64::from(top),
                    height: f64::from(h),
                },
            );
            order.push(id);
        }
        (bounds, order)
    })
}

fn arb_previous() -> impl Strategy<Value = ActiveSection> {
    prop_oneof![
        Just(ActiveSection::Unset),
        "[a-z]{1,6}".prop_map(|s| ActiveSection::Known(SectionId::new(s))),
    ]
}

// ── 1. Unique containment ─────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn stacked_offset_resolves_to_enclosing(
        (bounds, order) in arb_stacked_layout(),
        pick in any::<prop::sample::Index>(),
        frac in 0.0f64..1.0,
    ) {
        let target = &order[pick.index(order.len())];
        let b = bounds[target];
        let offset = b.top + frac * b.height;
        prop_assume!(b.contains(offset));
        let got = ActiveSectionClassifier::default().classify(
            ScrollState::new(offset),
            &bounds,
            &order,
            &ActiveSection::Unset,
        );
        prop_assert_eq!(got, ActiveSection::Known(target.clone()));
    }

    // ── 2. Lowest order wins ──────────────────────────────────────────────

    #[test]
    fn overlap_resolves_to_lowest_order(
        (bounds, order) in arb_overlapping_layout(),
        offset in -100.0f64..8_000.0,
        previous in arb_previous(),
    ) {
        let got = ActiveSectionClassifier::default().classify(
            ScrollState::new(offset),
            &bounds,
            &order,
            &previous,
        );
        let expected = order
            .iter()
            .find(|id| bounds[*id].contains(offset))
            .map_or(previous.clone(), |id| ActiveSection::Known(id.clone()));
        prop_assert_eq!(got, expected);
    }

    // ── 3 & 4. Retention ──────────────────────────────────────────────────

    #[test]
    fn no_match_retains_previous(
        (bounds, order) in arb_stacked_layout(),
        past in 0.0f64..10_000.0,
        previous in arb_previous(),
    ) {
        let end = bounds.values().map(SectionBounds::bottom).fold(0.0, f64::max);
        let got = ActiveSectionClassifier::default().classify(
            ScrollState::new(end + past),
            &bounds,
            &order,
            &previous,
        );
        prop_assert_eq!(got, previous);
    }

    #[test]
    fn known_never_reverts_to_unset(
        (bounds, order) in arb_overlapping_layout(),
        offsets in prop::collection::vec(-1_000.0f64..10_000.0, 1..50),
    ) {
        let classifier = ActiveSectionClassifier::default();
        let mut current = ActiveSection::Unset;
        let mut seen_known = false;
        for offset in offsets {
            current = classifier.classify(ScrollState::new(offset), &bounds, &order, &current);
            if seen_known {
                prop_assert_ne!(&current, &ActiveSection::Unset);
            }
            seen_known |= current != ActiveSection::Unset;
        }
    }
}
