use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::catalog::{MediaKind, Track};
use crate::error::MediaError;
use crate::media::MediaEvent;
use crate::media::scripted::{Script, ScriptedElement};

fn t(id: &str) -> Track {
    Track {
        id: id.into(),
        title: format!("Title {id}"),
        artist: "Artist".into(),
        media_url: format!("/music/{id}.mp3"),
        cover_image_url: String::new(),
        kind: MediaKind::Audio,
        featured: false,
        duration_seconds: None,
        genre: None,
        release_date: None,
        description: None,
    }
}

fn transport() -> (Transport, Rc<RefCell<Script>>) {
    let (el, script) = ScriptedElement::new();
    (Transport::new(Box::new(el), 1.0), script)
}

fn loaded(duration: f64) -> (Transport, Rc<RefCell<Script>>) {
    let (mut tr, script) = transport();
    tr.play(&t("a"));
    tr.handle_event(MediaEvent::LoadedMetadata(duration));
    (tr, script)
}

// --- queue ---

#[test]
fn queue_append_is_idempotent_by_id() {
    let mut q = PlayQueue::new();
    assert!(q.append(t("a")));
    assert!(!q.append(t("a")));
    assert!(q.append(t("b")));
    assert_eq!(q.len(), 2);
    assert!(q.remove("a"));
    assert!(!q.remove("a"));
    assert_eq!(q.tracks()[0].id, "b");
    q.clear();
    assert!(q.is_empty());
    assert!(q.next("b").is_none());
    assert!(q.previous("b").is_none());
}

#[test]
fn queue_wraps_in_both_directions() {
    let mut q = PlayQueue::new();
    for id in ["a", "b", "c"] {
        q.append(t(id));
    }
    assert_eq!(q.next("c").unwrap().id, "a");
    assert_eq!(q.previous("a").unwrap().id, "c");
    assert_eq!(q.next("a").unwrap().id, "b");
    assert_eq!(q.previous("c").unwrap().id, "b");
}

#[test]
fn single_track_queue_steps_to_itself() {
    let mut q = PlayQueue::new();
    q.append(t("a"));
    assert_eq!(q.next("a").unwrap().id, "a");
    assert_eq!(q.previous("a").unwrap().id, "a");
}

#[test]
fn unknown_current_lands_on_the_ends() {
    let mut q = PlayQueue::new();
    q.append(t("a"));
    q.append(t("b"));
    assert_eq!(q.next("zzz").unwrap().id, "a");
    assert_eq!(q.previous("zzz").unwrap().id, "b");
}

// --- transport ---

#[test]
fn play_loads_source_starts_and_queues() {
    let (mut tr, script) = transport();
    tr.play(&t("a"));

    let s = tr.state();
    assert!(s.is_playing);
    assert_eq!(s.current_time_seconds, 0.0);
    assert!(s.last_error.is_none());
    assert!(tr.is_current_track("a"));
    assert_eq!(tr.queue().len(), 1);
    assert_eq!(script.borrow().source.as_deref(), Some("/music/a.mp3"));
    assert!(script.borrow().playing);

    tr.play(&t("a"));
    assert_eq!(tr.queue().len(), 1);
}

#[test]
fn switching_tracks_pauses_the_previous_one_first() {
    let (mut tr, script) = transport();
    tr.play(&t("a"));
    script.borrow_mut().calls.clear();

    tr.play(&t("b"));
    let calls = script.borrow().calls.clone();
    assert_eq!(calls, vec!["pause", "source /music/b.mp3", "play"]);
    assert_eq!(tr.queue().len(), 2);
}

#[test]
fn failed_play_leaves_recoverable_state() {
    let (mut tr, script) = transport();
    script.borrow_mut().refuse_next_play = Some(MediaError::Refused("autoplay".into()));

    tr.play(&t("a"));
    assert!(!tr.state().is_playing);
    assert!(tr.state().last_error.as_deref().is_some_and(|e| !e.is_empty()));
    assert!(tr.is_current_track("a"));
    assert!(tr.queue().is_empty());

    tr.play(&t("a"));
    assert!(tr.state().is_playing);
    assert!(tr.state().last_error.is_none());
    assert_eq!(tr.queue().len(), 1);
}

#[test]
fn toggle_play_after_failure_reloads_the_track() {
    let (mut tr, script) = transport();
    script.borrow_mut().refuse_next_play = Some(MediaError::Refused("autoplay".into()));
    tr.play(&t("a"));
    script.borrow_mut().calls.clear();

    tr.toggle_play();
    assert_eq!(script.borrow().calls, vec!["source /music/a.mp3", "play"]);
    assert!(tr.state().is_playing);
}

#[test]
fn pause_and_toggle_are_noops_without_a_track() {
    let (mut tr, script) = transport();
    script.borrow_mut().calls.clear();
    tr.pause();
    tr.toggle_play();
    assert!(script.borrow().calls.is_empty());
    assert!(!tr.state().is_playing);
}

#[test]
fn toggle_play_resumes_without_reloading() {
    let (mut tr, script) = loaded(100.0);
    tr.handle_event(MediaEvent::TimeUpdate(42.0));
    tr.toggle_play();
    assert!(!tr.state().is_playing);

    script.borrow_mut().calls.clear();
    tr.toggle_play();
    assert!(tr.state().is_playing);
    assert_eq!(script.borrow().calls, vec!["play"]);
    assert_eq!(tr.state().current_time_seconds, 42.0);
}

#[test]
fn seek_clamps_into_known_duration() {
    let (mut tr, script) = loaded(120.0);
    for (input, expected) in [
        (-5.0, 0.0),
        (60.0, 60.0),
        (500.0, 120.0),
        (f64::NAN, 0.0),
        (f64::INFINITY, 0.0),
    ] {
        tr.seek(input);
        assert_eq!(tr.state().current_time_seconds, expected, "seek({input})");
        assert_eq!(script.borrow().position, expected);
    }
}

#[test]
fn seek_before_metadata_pins_to_zero() {
    let (mut tr, _) = transport();
    tr.play(&t("a"));
    tr.seek(30.0);
    assert_eq!(tr.state().current_time_seconds, 0.0);
}

#[test]
fn volume_mute_round_trip_restores_the_level() {
    for v in [0.01_f32, 0.3, 0.75, 1.0] {
        let (mut tr, script) = transport();
        tr.set_volume(v);
        tr.toggle_mute();
        assert!(tr.state().is_muted);
        assert_eq!(tr.state().effective_volume(), 0.0);
        assert_eq!(script.borrow().volume, 0.0);

        tr.toggle_mute();
        assert!(!tr.state().is_muted);
        assert_eq!(tr.state().effective_volume(), v);
        assert_eq!(script.borrow().volume, v);
    }
}

#[test]
fn volume_zero_mutes_and_unmute_restores_last_non_zero() {
    let (mut tr, _) = transport();
    tr.set_volume(0.4);
    tr.set_volume(0.0);
    assert!(tr.state().is_muted);
    assert_eq!(tr.state().restore_volume, Some(0.4));
    tr.toggle_mute();
    assert_eq!(tr.state().volume, 0.4);
}

#[test]
fn unmute_without_history_goes_to_full_volume() {
    let (el, _) = ScriptedElement::new();
    let mut tr = Transport::new(Box::new(el), 0.0);
    assert!(tr.state().is_muted);
    tr.toggle_mute();
    assert_eq!(tr.state().volume, 1.0);
}

#[test]
fn set_volume_clamps_out_of_range_input() {
    let (mut tr, _) = transport();
    tr.set_volume(3.0);
    assert_eq!(tr.state().volume, 1.0);
    tr.set_volume(-1.0);
    assert_eq!(tr.state().volume, 0.0);
    assert!(tr.state().is_muted);
}

#[test]
fn reset_while_playing_keeps_playing_from_zero() {
    let (mut tr, script) = loaded(200.0);
    tr.handle_event(MediaEvent::TimeUpdate(90.0));
    tr.reset();
    assert!(tr.state().is_playing);
    assert_eq!(tr.state().current_time_seconds, 0.0);
    assert!(script.borrow().playing);
    assert_eq!(script.borrow().position, 0.0);
}

#[test]
fn reset_while_paused_stays_paused() {
    let (mut tr, script) = loaded(200.0);
    tr.pause();
    tr.handle_event(MediaEvent::TimeUpdate(90.0));
    tr.reset();
    assert!(!tr.state().is_playing);
    assert!(!script.borrow().playing);
    assert_eq!(tr.state().current_time_seconds, 0.0);
}

#[test]
fn close_clears_track_but_keeps_queue() {
    let (mut tr, _) = loaded(10.0);
    tr.handle_event(MediaEvent::Error("boom".into()));
    tr.close();
    assert!(tr.current_track().is_none());
    assert!(!tr.state().is_playing);
    assert!(tr.state().last_error.is_none());
    assert_eq!(tr.state().current_time_seconds, 0.0);
    assert_eq!(tr.queue().len(), 1);
}

#[test]
fn drag_suppresses_time_updates_until_released() {
    let (mut tr, _) = loaded(100.0);
    tr.handle_event(MediaEvent::TimeUpdate(10.0));
    tr.set_dragging(true);
    tr.seek(50.0);
    tr.handle_event(MediaEvent::TimeUpdate(11.0));
    tr.handle_event(MediaEvent::TimeUpdate(12.0));
    assert_eq!(tr.state().current_time_seconds, 50.0);

    tr.set_dragging(false);
    tr.handle_event(MediaEvent::TimeUpdate(50.5));
    assert_eq!(tr.state().current_time_seconds, 50.5);
}

#[test]
fn metadata_sets_duration_and_clears_error() {
    let (mut tr, _) = transport();
    tr.play(&t("a"));
    tr.handle_event(MediaEvent::Error("404".into()));
    assert_eq!(tr.state().last_error.as_deref(), Some("404"));
    assert!(!tr.state().is_playing);
    assert_eq!(tr.state().duration_seconds, 0.0);

    tr.handle_event(MediaEvent::LoadedMetadata(245.0));
    assert_eq!(tr.state().duration_seconds, 245.0);
    assert!(tr.state().last_error.is_none());
}

#[test]
fn can_play_through_clears_a_stale_error() {
    let (mut tr, _) = loaded(30.0);
    tr.handle_event(MediaEvent::Error("stalled".into()));
    assert!(tr.state().last_error.is_some());

    tr.handle_event(MediaEvent::CanPlayThrough);
    assert!(tr.state().last_error.is_none());
    assert_eq!(tr.state().duration_seconds, 30.0);
}

#[test]
fn switching_tracks_forgets_the_old_duration() {
    let (mut tr, _) = loaded(245.0);
    tr.play(&t("b"));
    assert_eq!(tr.state().duration_seconds, 0.0);
}

#[test]
fn ended_advances_through_queue_and_wraps() {
    let (mut tr, script) = transport();
    tr.play(&t("a"));
    tr.play(&t("b"));
    tr.play(&t("c"));

    tr.handle_event(MediaEvent::Ended);
    assert!(tr.is_current_track("a"));
    assert!(tr.state().is_playing);

    tr.handle_event(MediaEvent::Ended);
    assert!(tr.is_current_track("b"));
    assert_eq!(script.borrow().source.as_deref(), Some("/music/b.mp3"));
}

#[test]
fn ended_with_single_track_replays_it() {
    let (mut tr, script) = loaded(10.0);
    script.borrow_mut().calls.clear();
    tr.handle_event(MediaEvent::Ended);
    assert!(tr.is_current_track("a"));
    assert!(tr.state().is_playing);
    assert_eq!(script.borrow().calls, vec!["source /music/a.mp3", "play"]);
}

#[test]
fn ended_with_empty_queue_stops() {
    let (mut tr, script) = loaded(10.0);
    tr.clear_queue();
    tr.handle_event(MediaEvent::Ended);
    assert!(!tr.state().is_playing);
    assert!(!script.borrow().playing);
    assert!(tr.is_current_track("a"));
}

#[test]
fn manual_next_and_previous_follow_the_queue() {
    let (mut tr, _) = transport();
    tr.play(&t("a"));
    tr.add_to_queue(&t("b"));
    tr.play_next();
    assert!(tr.is_current_track("b"));
    tr.play_next();
    assert!(tr.is_current_track("a"));
    tr.play_previous();
    assert!(tr.is_current_track("b"));
}

#[test]
fn pump_applies_element_events() {
    let (mut tr, script) = transport();
    tr.play(&t("a"));
    assert!(!tr.pump());

    script.borrow_mut().emit(MediaEvent::LoadedMetadata(30.0));
    script.borrow_mut().emit(MediaEvent::TimeUpdate(3.0));
    assert!(tr.pump());
    assert_eq!(tr.state().duration_seconds, 30.0);
    assert_eq!(tr.state().current_time_seconds, 3.0);
}

#[test]
fn dropping_transport_releases_the_element() {
    let (tr, script) = loaded(10.0);
    drop(tr);
    let s = script.borrow();
    assert!(s.unloaded);
    assert!(!s.playing);
}

// --- shared broadcast ---

fn shared() -> (SharedPlayer, Rc<RefCell<Script>>) {
    let (el, script) = ScriptedElement::new();
    (SharedPlayer::new(Box::new(el), 1.0), script)
}

#[test]
fn every_subscriber_sees_the_same_snapshot() {
    let (player, _) = shared();
    let seen_a: Rc<RefCell<Vec<PlayerSnapshot>>> = Rc::default();
    let seen_b: Rc<RefCell<Vec<PlayerSnapshot>>> = Rc::default();

    let a = seen_a.clone();
    let _sa = player.subscribe(move |s| a.borrow_mut().push(s.clone()));
    let b = seen_b.clone();
    let _sb = player.subscribe(move |s| b.borrow_mut().push(s.clone()));

    player.play(&t("a"));
    player.set_volume(0.5);

    assert_eq!(seen_a.borrow().len(), 2);
    assert_eq!(*seen_a.borrow(), *seen_b.borrow());
    let last = seen_a.borrow().last().cloned().unwrap();
    assert!(last.is_playing_track("a"));
    assert!(last.mini_player_visible);
    assert_eq!(last.state.volume, 0.5);
    assert_eq!(player.snapshot(), last);
}

#[test]
fn commands_from_subscribers_run_after_everyone_saw_the_snapshot() {
    let (player, _) = shared();
    let log: Rc<RefCell<Vec<String>>> = Rc::default();

    let handle = player.clone();
    let l1 = log.clone();
    let _first = player.subscribe(move |s| {
        l1.borrow_mut().push(format!("first playing={}", s.state.is_playing));
        if s.state.is_playing {
            handle.pause();
        }
    });
    let l2 = log.clone();
    let _second = player.subscribe(move |s| {
        l2.borrow_mut().push(format!("second playing={}", s.state.is_playing));
    });

    player.play(&t("a"));

    assert_eq!(
        *log.borrow(),
        vec![
            "first playing=true",
            "second playing=true",
            "first playing=false",
            "second playing=false",
        ]
    );
    assert!(!player.snapshot().state.is_playing);
}

#[test]
fn dropping_subscription_unsubscribes() {
    let (player, _) = shared();
    let count = Rc::new(RefCell::new(0));
    let c = count.clone();
    let sub = player.subscribe(move |_| *c.borrow_mut() += 1);
    assert_eq!(player.subscriber_count(), 1);

    player.toggle_mini_player();
    drop(sub);
    assert_eq!(player.subscriber_count(), 0);
    player.toggle_mini_player();
    assert_eq!(*count.borrow(), 1);
}

#[test]
fn unsubscribing_from_inside_a_callback_is_safe() {
    let (player, _) = shared();
    let slot: Rc<RefCell<Option<Subscription>>> = Rc::default();
    let calls = Rc::new(RefCell::new(0));

    let s = slot.clone();
    let c = calls.clone();
    let sub = player.subscribe(move |_| {
        *c.borrow_mut() += 1;
        s.borrow_mut().take();
    });
    *slot.borrow_mut() = Some(sub);

    player.toggle_mini_player();
    player.toggle_mini_player();
    assert_eq!(*calls.borrow(), 1);
    assert_eq!(player.subscriber_count(), 0);
}

#[test]
fn pump_publishes_only_when_events_arrive() {
    let (player, script) = shared();
    let count = Rc::new(RefCell::new(0));
    let c = count.clone();
    let _sub = player.subscribe(move |_| *c.borrow_mut() += 1);

    player.pump();
    assert_eq!(*count.borrow(), 0);

    script.borrow_mut().emit(MediaEvent::LoadedMetadata(12.0));
    player.pump();
    assert_eq!(*count.borrow(), 1);
    assert_eq!(player.snapshot().state.duration_seconds, 12.0);
}

#[test]
fn load_failure_after_an_accepted_play_is_reconciled() {
    let (player, script) = shared();
    player.play(&t("a"));
    assert!(player.snapshot().state.is_playing);

    // The source fails to load after play was accepted.
    script.borrow_mut().emit(MediaEvent::Error("unable to fetch a".into()));
    player.pump();
    let snap = player.snapshot();
    assert!(!snap.state.is_playing);
    assert_eq!(snap.state.last_error.as_deref(), Some("unable to fetch a"));

    player.play(&t("a"));
    assert!(player.snapshot().state.is_playing);
    assert!(player.snapshot().state.last_error.is_none());
}

#[test]
fn drag_flag_round_trips_through_the_broadcast() {
    let (player, script) = shared();
    player.play(&t("a"));
    script.borrow_mut().emit(MediaEvent::LoadedMetadata(100.0));
    player.pump();

    player.drag_start();
    assert!(player.snapshot().dragging);
    player.seek(40.0);
    script.borrow_mut().emit(MediaEvent::TimeUpdate(1.0));
    player.pump();
    assert_eq!(player.snapshot().state.current_time_seconds, 40.0);

    player.drag_end();
    script.borrow_mut().emit(MediaEvent::TimeUpdate(41.0));
    player.pump();
    assert_eq!(player.snapshot().state.current_time_seconds, 41.0);
}

#[test]
fn queue_commands_are_reflected_in_snapshot() {
    let (player, _) = shared();
    player.add_to_queue(&t("x"));
    player.add_to_queue(&t("y"));
    player.add_to_queue(&t("x"));
    assert_eq!(player.snapshot().queue.len(), 2);
    player.remove_from_queue("x");
    assert_eq!(player.snapshot().queue[0].id, "y");
    player.clear_queue();
    assert!(player.snapshot().queue.is_empty());
}

#[test]
fn dropping_last_handle_releases_the_element() {
    let (player, script) = shared();
    player.play(&t("a"));
    let other = player.clone();
    drop(player);
    assert!(!script.borrow().unloaded);
    drop(other);
    assert!(script.borrow().unloaded);
}
