// Copyright 2026 the Stagecast Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Immediate background-picture drawing.

use stagecast_core::{
    AnimateConfig, AnimateError, Animator, Generation, Prop, Screen as _, Signal, ViewId,
};
use stagecast_harness::{ScreenCall, SimEntityStore, SimScreen, SimViews};

fn rig() -> (SimEntityStore, SimViews, SimScreen, Animator<SimScreen>) {
    let mut views = SimViews::new();
    views.add_view(1, &[&[(10, 20)]]);
    views.add_view(2, &[&[(10, 20)]]);
    (
        SimEntityStore::new(),
        views,
        SimScreen::new(),
        Animator::new(AnimateConfig::default()),
    )
}

#[test]
fn list_form_draws_sorted_and_invalidates_the_picture() {
    let (mut store, views, mut screen, mut animator) = rig();
    let near = store.add_actor(1, 50, 120);
    let far = store.add_actor(2, 80, 60);
    let list = store.make_list(&[near, far]);

    animator
        .add_to_pic_list(&mut store, &views, &mut screen, list)
        .unwrap();

    let drawn: Vec<i16> = screen
        .draw_calls()
        .iter()
        .filter_map(|c| match c {
            ScreenCall::DrawCel { view, .. } => Some(view.0),
            _ => None,
        })
        .collect();
    assert_eq!(drawn, vec![2, 1]);
    assert_eq!(screen.pic_not_valid(), 2);
    // No background saves: these cels become scenery.
    assert_eq!(animator.backdrops().live(), 0);
}

#[test]
fn list_form_recomputes_only_unset_priorities() {
    let (mut store, views, mut screen, mut animator) = rig();
    let auto_prio = store.add_actor(1, 50, 120);
    store.put(auto_prio, Prop::Priority, -1);
    let fixed = store.add_actor(2, 80, 120);
    store.put(fixed, Prop::Priority, 3);
    let list = store.make_list(&[auto_prio, fixed]);

    animator
        .add_to_pic_list(&mut store, &views, &mut screen, list)
        .unwrap();

    let priorities: Vec<i16> = screen
        .draw_calls()
        .iter()
        .filter_map(|c| match c {
            ScreenCall::DrawCel { priority, .. } => Some(*priority),
            _ => None,
        })
        .collect();
    assert_eq!(priorities, vec![12, 3]);
}

#[test]
fn list_form_skips_strips_for_ignore_actor() {
    let (mut store, views, mut screen, mut animator) = rig();
    let marked = store.add_actor(1, 50, 120);
    let unmarked = store.add_actor(2, 80, 60);
    store.put(marked, Prop::Signal, Signal::IGNORE_ACTOR.bits() as i16);
    let list = store.make_list(&[marked, unmarked]);

    animator
        .add_to_pic_list(&mut store, &views, &mut screen, list)
        .unwrap();

    let fills = screen
        .calls()
        .iter()
        .filter(|c| matches!(c, ScreenCall::FillControl { .. }))
        .count();
    assert_eq!(fills, 1);
}

#[test]
fn list_form_rejects_a_bad_reference() {
    let (mut store, views, mut screen, mut animator) = rig();
    let result =
        animator.add_to_pic_list(&mut store, &views, &mut screen, stagecast_core::CastListRef(7));
    assert_eq!(result, Err(AnimateError::InvalidList(7)));
}

#[test]
fn view_form_draws_one_cel_with_optional_control() {
    let (_, views, mut screen, mut animator) = rig();

    animator.add_to_pic_view(&views, &mut screen, ViewId(1), 0, 0, 100, 120, -1, 15);

    assert_eq!(screen.draw_calls().len(), 1);
    let fills = screen
        .calls()
        .iter()
        .filter(|c| matches!(c, ScreenCall::FillControl { value: 15, .. }))
        .count();
    assert_eq!(fills, 1);
    assert_eq!(screen.pic_not_valid(), 2);
}

#[test]
fn view_form_with_negative_control_skips_the_strip() {
    let (_, views, mut screen, mut animator) = rig();

    animator.add_to_pic_view(&views, &mut screen, ViewId(1), 0, 0, 100, 120, 5, -1);

    assert_eq!(screen.draw_calls().len(), 1);
    assert!(!screen
        .calls()
        .iter()
        .any(|c| matches!(c, ScreenCall::FillControl { .. })));
}

#[test]
fn early_generations_use_the_low_invalidation_value() {
    let (mut store, views, mut screen, _) = rig();
    let mut animator: Animator<SimScreen> =
        Animator::new(AnimateConfig::for_generation(Generation::G1Early));
    let a = store.add_actor(1, 50, 120);
    let list = store.make_list(&[a]);

    animator
        .add_to_pic_list(&mut store, &views, &mut screen, list)
        .unwrap();

    assert_eq!(screen.pic_not_valid(), 1);
}
