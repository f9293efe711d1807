mod common;

use common::{idle, images, settle, started_with, HostCall, RecordingHost};
use galleria_core::{Config, Direction, Dispatch, Gallery, GalleryError, Intent, Step};
use galleria_test_fixtures::configs;

#[test]
fn small_wheel_delta_is_ignored() {
    let mut g = idle(5);
    assert_eq!(g.wheel(20.0, true).unwrap(), Dispatch::Ignored);
    assert_eq!(g.wheel(-40.0, true).unwrap(), Dispatch::Ignored);
    assert!(g.host().calls.is_empty());
    assert!(!g.state().is_animating);
}

#[test]
fn wheel_outside_main_region_is_ignored() {
    let mut g = idle(5);
    assert_eq!(g.wheel(120.0, false).unwrap(), Dispatch::Ignored);
    assert_eq!(g.state().current_image_index, 0);
}

#[test]
fn wheel_navigates_and_latches_until_finished() {
    let mut g = idle(5);
    assert!(g.wheel(50.0, true).unwrap().is_accepted());
    assert_eq!(g.state().current_image_index, 1);
    assert!(g.state().is_touch_animation);

    // the rest of the same scroll burst
    assert_eq!(g.wheel(80.0, true).unwrap(), Dispatch::Suppressed);
    assert_eq!(g.wheel(80.0, false).unwrap(), Dispatch::Suppressed);
    assert!(g.pending_intents().is_empty());

    settle(&mut g);
    assert!(!g.state().is_touch_animation);
    assert!(g.wheel(-50.0, true).unwrap().is_accepted());
    assert_eq!(g.state().current_image_index, 0);
    assert_eq!(g.state().next_dir, Direction::Backward);
}

#[test]
fn clicks_are_queued_during_gesture_transition() {
    let mut g = idle(5);
    g.wheel(50.0, true).unwrap();
    assert_eq!(g.click_next().unwrap(), Dispatch::Queued { pending: 1 });
}

#[test]
fn wheel_during_click_transition_is_queued_once() {
    let mut g = idle(5);
    g.click_next().unwrap();
    assert_eq!(g.wheel(50.0, true).unwrap(), Dispatch::Queued { pending: 1 });
    assert_eq!(g.wheel(50.0, true).unwrap(), Dispatch::Suppressed);
    assert_eq!(g.pending_intents(), vec![Intent::Step(Step::Next)]);
}

#[test]
fn swipe_left_advances_and_right_goes_back() {
    let mut g = idle(5);
    g.touch_start(300.0);
    assert!(g.touch_end(200.0, 1024.0).unwrap().is_accepted());
    assert_eq!(g.state().current_image_index, 1);
    assert_eq!(g.gestures().touch().end_x, 200.0);

    // a second swipe while the first runs is swallowed
    g.touch_start(300.0);
    assert_eq!(g.touch_end(100.0, 1024.0).unwrap(), Dispatch::Suppressed);
    settle(&mut g);

    g.touch_start(100.0);
    assert!(g.touch_end(300.0, 1024.0).unwrap().is_accepted());
    assert_eq!(g.state().current_image_index, 0);
    assert_eq!(g.state().next_dir, Direction::Backward);
}

#[test]
fn short_swipe_is_ignored() {
    let mut g = idle(5);
    g.touch_start(300.0);
    assert_eq!(g.touch_end(250.0, 1024.0).unwrap(), Dispatch::Ignored);
    g.touch_start(300.0);
    assert_eq!(g.touch_end(360.0, 1024.0).unwrap(), Dispatch::Ignored);
    assert!(!g.state().is_touch_animation);
}

#[test]
fn viewport_relative_swipe_threshold() {
    let cfg: Config = configs::load("viewport_swipe").unwrap();
    let mut g = started_with(5, cfg);
    settle(&mut g);

    // 15% of 400 is 60
    g.touch_start(200.0);
    assert_eq!(g.touch_end(150.0, 400.0).unwrap(), Dispatch::Ignored);
    g.touch_start(200.0);
    assert!(g.touch_end(130.0, 400.0).unwrap().is_accepted());

    // wheel threshold from the same fixture
    settle(&mut g);
    assert!(g.wheel(35.0, true).unwrap().is_accepted());
}

#[test]
fn drag_fires_once_per_press() {
    let mut g = idle(5);
    g.mouse_down(100.0, true).unwrap();
    assert!(g.state().is_mouse_down);
    assert_eq!(g.host().calls, vec![HostCall::DragTracking(true)]);

    assert_eq!(g.mouse_move(120.0).unwrap(), Dispatch::Ignored);
    assert!(g.mouse_move(150.0).unwrap().is_accepted());
    assert_eq!(g.state().current_image_index, 4);
    assert_eq!(g.state().next_dir, Direction::Backward);
    assert!(g.state().has_mouse_animated);
    assert_eq!(g.mouse_move(250.0).unwrap(), Dispatch::Suppressed);

    // still the same press after the transition ended
    settle(&mut g);
    assert!(!g.state().has_mouse_animated);
    assert_eq!(g.mouse_move(0.0).unwrap(), Dispatch::Ignored);

    g.mouse_up();
    assert!(!g.state().is_mouse_down);
    assert_eq!(g.host().calls.last(), Some(&HostCall::DragTracking(false)));
    assert_eq!(g.mouse_move(0.0).unwrap(), Dispatch::Ignored);

    g.mouse_down(100.0, true).unwrap();
    assert!(g.mouse_move(50.0).unwrap().is_accepted());
    assert_eq!(g.state().current_image_index, 0);
}

#[test]
fn press_outside_main_region_does_not_track() {
    let mut g = idle(5);
    g.mouse_down(100.0, false).unwrap();
    assert!(!g.state().is_mouse_down);
    assert!(g.host().calls.is_empty());
    assert_eq!(g.mouse_move(300.0).unwrap(), Dispatch::Ignored);
}

#[test]
fn mouse_up_before_start_is_harmless() {
    let mut g = Gallery::new(images(3), Config::default(), RecordingHost::default()).unwrap();
    g.mouse_up();
    assert!(g.host().calls.is_empty());
    assert!(!g.state().is_mouse_down);
    assert_eq!(g.mouse_down(10.0, true), Err(GalleryError::NotStarted));

    g.start().unwrap();
    settle(&mut g);
    g.host_mut().take_calls();
    g.mouse_up();
    assert!(g.host().calls.is_empty());
}
