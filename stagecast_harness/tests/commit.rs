// Copyright 2026 the Stagecast Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-region flushing, the no-update lifecycle, and the last-cast replay.

use stagecast_core::{
    AnimateConfig, Animator, BackdropHandle, EntityStore as _, Prop, Rect, Screen as _, Signal,
};
use stagecast_harness::{ScreenCall, SimEntityStore, SimScreen, SimViews};

fn rig() -> (SimEntityStore, SimViews, SimScreen, Animator<SimScreen>) {
    let mut views = SimViews::new();
    for id in 1..=3 {
        views.add_view(id, &[&[(10, 20)]]);
    }
    (
        SimEntityStore::new(),
        views,
        SimScreen::new(),
        Animator::new(AnimateConfig::default()),
    )
}

fn shows(screen: &SimScreen) -> Vec<Rect> {
    screen
        .calls()
        .iter()
        .filter_map(|c| match c {
            ScreenCall::Show { rect } => Some(*rect),
            _ => None,
        })
        .collect()
}

fn blits(screen: &SimScreen) -> Vec<Rect> {
    screen
        .calls()
        .iter()
        .filter_map(|c| match c {
            ScreenCall::Blit { rect, .. } => Some(*rect),
            _ => None,
        })
        .collect()
}

#[test]
fn overlapping_move_flushes_one_union() {
    let (mut store, views, mut screen, mut animator) = rig();
    let a = store.add_actor(1, 100, 50);
    let list = store.make_list(&[a]);
    animator
        .animate(&mut store, &views, &mut screen, Some(list), false)
        .unwrap();

    // Small move; old rect (95,31,105,51) and new rect (99,31,109,51)
    // overlap, so one flush of the union suffices.
    store.put(a, Prop::X, 104);
    screen.clear_calls();
    animator
        .animate(&mut store, &views, &mut screen, Some(list), false)
        .unwrap();

    assert_eq!(shows(&screen), vec![Rect::new(95, 31, 109, 51)]);
    assert_eq!(store.peek(a, Prop::LsLeft), 99);
    assert_eq!(store.peek(a, Prop::LsRight), 109);
}

#[test]
fn disjoint_move_flushes_old_then_new() {
    let (mut store, views, mut screen, mut animator) = rig();
    let a = store.add_actor(1, 100, 50);
    let list = store.make_list(&[a]);
    animator
        .animate(&mut store, &views, &mut screen, Some(list), false)
        .unwrap();

    store.put(a, Prop::X, 200);
    screen.clear_calls();
    animator
        .animate(&mut store, &views, &mut screen, Some(list), false)
        .unwrap();

    assert_eq!(
        shows(&screen),
        vec![Rect::new(95, 31, 105, 51), Rect::new(195, 31, 205, 51)]
    );
}

#[test]
fn stop_update_parks_the_background_across_cycles() {
    let (mut store, views, mut screen, mut animator) = rig();
    let a = store.add_actor(1, 100, 50);
    store.put(a, Prop::Signal, Signal::STOP_UPDATE.bits() as i16);
    let list = store.make_list(&[a]);

    animator
        .animate(&mut store, &views, &mut screen, Some(list), false)
        .unwrap();

    // The entity transitioned into no-update state, its background is
    // parked, and the state was written back.
    let signal = Signal::from_bits_retain(store.peek(a, Prop::Signal) as u16);
    assert!(signal.contains(Signal::NO_UPDATE));
    assert!(!signal.contains(Signal::STOP_UPDATE));
    assert_ne!(store.under_bits(a), BackdropHandle::NONE);
    assert_eq!(animator.backdrops().live(), 1);
}

#[test]
fn hidden_no_update_entry_is_restored_and_removed() {
    let (mut store, views, mut screen, mut animator) = rig();
    let a = store.add_actor(1, 100, 50);
    store.put(a, Prop::Signal, Signal::STOP_UPDATE.bits() as i16);
    let list = store.make_list(&[a]);
    animator
        .animate(&mut store, &views, &mut screen, Some(list), false)
        .unwrap();

    let signal = store.peek(a, Prop::Signal) as u16 | Signal::HIDDEN.bits();
    store.put(a, Prop::Signal, signal as i16);
    screen.clear_calls();
    animator
        .animate(&mut store, &views, &mut screen, Some(list), false)
        .unwrap();

    // The parked background went back to the screen exactly once, the
    // handle was cleared, and the entry is flagged for removal.
    assert_eq!(blits(&screen).len(), 1);
    assert!(screen.draw_calls().is_empty());
    assert_eq!(store.under_bits(a), BackdropHandle::NONE);
    assert_eq!(animator.backdrops().live(), 0);
    let signal = Signal::from_bits_retain(store.peek(a, Prop::Signal) as u16);
    assert!(signal.contains(Signal::REMOVE_VIEW));
}

#[test]
fn whole_picture_invalidation_frees_instead_of_restoring() {
    let (mut store, views, mut screen, mut animator) = rig();
    let a = store.add_actor(1, 100, 50);
    store.put(a, Prop::Signal, Signal::STOP_UPDATE.bits() as i16);
    let list = store.make_list(&[a]);
    animator
        .animate(&mut store, &views, &mut screen, Some(list), false)
        .unwrap();

    let signal = store.peek(a, Prop::Signal) as u16 | Signal::HIDDEN.bits();
    store.put(a, Prop::Signal, signal as i16);
    screen.set_pic_not_valid(1);
    screen.clear_calls();
    animator
        .animate(&mut store, &views, &mut screen, Some(list), false)
        .unwrap();

    // The picture is being replaced wholesale; the parked pixels are
    // dropped without ever touching the screen.
    assert!(blits(&screen).is_empty());
    assert_eq!(store.under_bits(a), BackdropHandle::NONE);
    assert_eq!(animator.backdrops().live(), 0);
}

#[test]
fn reanimate_restores_in_reverse_save_order() {
    let (mut store, views, mut screen, mut animator) = rig();
    let a = store.add_actor(1, 100, 50);
    let b = store.add_actor(2, 100, 80);
    let list = store.make_list(&[a, b]);
    animator
        .animate(&mut store, &views, &mut screen, Some(list), false)
        .unwrap();
    assert_eq!(animator.last_cast().len(), 2);

    screen.clear_calls();
    let target = Rect::new(0, 0, 320, 200);
    animator.reanimate(&mut screen, target);

    let draw_rects: Vec<Rect> = screen
        .calls()
        .iter()
        .filter_map(|c| match c {
            ScreenCall::DrawCel { rect, .. } => Some(*rect),
            _ => None,
        })
        .collect();
    let blit_rects = blits(&screen);

    assert_eq!(draw_rects.len(), 2);
    assert_eq!(blit_rects.len(), 2);
    // Strict stack discipline: last saved, first restored.
    assert_eq!(blit_rects[0], draw_rects[1]);
    assert_eq!(blit_rects[1], draw_rects[0]);
    assert_eq!(shows(&screen), vec![target]);
    // All replay handles were consumed.
    assert_eq!(animator.backdrops().live(), 0);
}

#[test]
fn reanimate_with_no_last_cast_just_flushes() {
    let (_, _, mut screen, mut animator) = rig();
    let target = Rect::new(10, 10, 50, 50);
    animator.reanimate(&mut screen, target);

    assert_eq!(screen.calls(), &[ScreenCall::Show { rect: target }]);
}

#[test]
fn force_update_redraws_a_no_update_entry() {
    let (mut store, views, mut screen, mut animator) = rig();
    let a = store.add_actor(1, 100, 50);
    store.put(a, Prop::Signal, Signal::STOP_UPDATE.bits() as i16);
    let list = store.make_list(&[a]);
    animator
        .animate(&mut store, &views, &mut screen, Some(list), false)
        .unwrap();

    let signal = store.peek(a, Prop::Signal) as u16 | Signal::FORCE_UPDATE.bits();
    store.put(a, Prop::Signal, signal as i16);
    screen.clear_calls();
    animator
        .animate(&mut store, &views, &mut screen, Some(list), false)
        .unwrap();

    // The old background was put back, a fresh one parked, and the cel
    // redrawn, all in one cycle.
    assert_eq!(blits(&screen).len(), 1);
    assert_eq!(screen.draw_calls().len(), 1);
    let signal = Signal::from_bits_retain(store.peek(a, Prop::Signal) as u16);
    assert!(signal.contains(Signal::NO_UPDATE));
    assert!(!signal.contains(Signal::FORCE_UPDATE));
    assert_ne!(store.under_bits(a), BackdropHandle::NONE);
}

#[test]
fn view_updated_transitions_out_of_no_update() {
    let (mut store, views, mut screen, mut animator) = rig();
    let a = store.add_actor(1, 100, 50);
    store.put(a, Prop::Signal, Signal::STOP_UPDATE.bits() as i16);
    let list = store.make_list(&[a]);
    animator
        .animate(&mut store, &views, &mut screen, Some(list), false)
        .unwrap();

    let signal = store.peek(a, Prop::Signal) as u16 | Signal::VIEW_UPDATED.bits();
    store.put(a, Prop::Signal, signal as i16);
    animator
        .animate(&mut store, &views, &mut screen, Some(list), false)
        .unwrap();

    let signal = Signal::from_bits_retain(store.peek(a, Prop::Signal) as u16);
    assert!(!signal.contains(Signal::NO_UPDATE));
    assert!(!signal.contains(Signal::VIEW_UPDATED));
    // Back in the ordinary updating state: the final draw pass handled it.
    assert_eq!(animator.last_cast().len(), 1);
}
