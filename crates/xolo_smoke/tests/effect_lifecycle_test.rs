//! # Effect Lifecycle Integration Test
//!
//! Drives a full overlay session through the headless host: enable, input,
//! frames, resize, teardown, re-enable.

use xolo_smoke::{
    EffectState, FrameReport, HeadlessHost, Host, HostEvent, ListenerKind, PixelCanvas,
    SmokeConfig, SmokeEffect, Viewport,
};

fn running(viewport: Viewport) -> (HeadlessHost, SmokeEffect<PixelCanvas>) {
    let mut host = HeadlessHost::new(viewport);
    let mut effect = SmokeEffect::new(SmokeConfig::default().with_seed(7));
    effect.set_enabled(&mut host, true);
    assert_eq!(effect.state(), EffectState::Running);
    (host, effect)
}

fn run_frame(host: &mut HeadlessHost, effect: &mut SmokeEffect<PixelCanvas>) -> FrameReport {
    host.advance(16.0);
    let request = host.take_frame().expect("frame scheduled");
    effect.on_frame(host, request).expect("effect running")
}

/// Test: pointer input becomes drawn smoke.
#[test]
fn test_pointer_session_draws() {
    let (mut host, mut effect) = running(Viewport::new(160.0, 120.0, 1.0));

    let mut time = 0.0;
    for step in 0..10 {
        time += 20.0;
        let event = HostEvent::PointerMove {
            x: 40.0 + step as f32 * 8.0,
            y: 60.0,
            time,
        };
        assert_eq!(effect.handle_event(&mut host, &event), 2);
    }

    let report = run_frame(&mut host, &mut effect);
    assert_eq!(report.active, 20);
    assert_eq!(report.drawn, 20);

    let canvas = effect.surface().expect("surface").canvas();
    assert!(canvas.total_alpha() > 0.0);
    assert_eq!(canvas.fill_count(), 20);
}

/// Test: scroll bursts obey the cap.
#[test]
fn test_scroll_burst_is_capped() {
    let (mut host, mut effect) = running(Viewport::new(200.0, 100.0, 1.0));

    for i in 0..50 {
        effect.handle_event(&mut host, &HostEvent::Scroll { time: f64::from(i) });
    }
    let report = run_frame(&mut host, &mut effect);
    assert_eq!(report.active, 80);
    assert_eq!(effect.engine().expect("engine").stats().dropped, 120);
}

/// Test: smoke dies out once input stops.
#[test]
fn test_smoke_fades_without_input() {
    let (mut host, mut effect) = running(Viewport::new(120.0, 120.0, 1.0));
    effect.handle_event(
        &mut host,
        &HostEvent::PointerMove {
            x: 60.0,
            y: 60.0,
            time: 0.0,
        },
    );

    let mut last = run_frame(&mut host, &mut effect);
    for _ in 0..250 {
        last = run_frame(&mut host, &mut effect);
    }
    assert_eq!(last.active, 0);
    assert_eq!(last.drawn, 0);
    // The loop keeps going with nothing to draw
    assert_eq!(host.pending_frames(), 1);
}

/// Test: resize rescales the backing store and keeps running.
#[test]
fn test_resize_while_running() {
    let (mut host, mut effect) = running(Viewport::new(100.0, 80.0, 1.0));

    let event = host.resize(Viewport::new(60.0, 40.0, 2.0));
    effect.handle_event(&mut host, &event);

    let surface = effect.surface().expect("surface");
    assert_eq!(surface.backing_size(), (120, 80));
    assert_eq!(surface.logical_size(), (60.0, 40.0));
    assert_eq!(effect.engine().expect("engine").viewport(), (60.0, 40.0));

    run_frame(&mut host, &mut effect);
    assert_eq!(effect.state(), EffectState::Running);
}

/// Test: tearing down twice leaves nothing behind.
#[test]
fn test_teardown_is_idempotent() {
    let (mut host, mut effect) = running(Viewport::new(64.0, 64.0, 1.0));
    run_frame(&mut host, &mut effect);
    let orphan = host.take_frame();
    assert!(orphan.is_some());

    effect.teardown(&mut host);
    effect.teardown(&mut host);

    assert_eq!(effect.state(), EffectState::TornDown);
    assert_eq!(host.pending_frames(), 0);
    assert_eq!(host.listener_count(), 0);
    assert!(effect.engine().is_none());

    // A callback the host already handed out must not revive the loop
    let orphan = orphan.expect("frame taken");
    assert!(effect.on_frame(&mut host, orphan).is_none());
    assert_eq!(host.pending_frames(), 0);
}

/// Test: events after teardown are ignored.
#[test]
fn test_events_after_teardown_are_ignored() {
    let (mut host, mut effect) = running(Viewport::new(64.0, 64.0, 1.0));
    effect.set_enabled(&mut host, false);

    let spawned = effect.handle_event(
        &mut host,
        &HostEvent::PointerMove {
            x: 32.0,
            y: 32.0,
            time: 100.0,
        },
    );
    assert_eq!(spawned, 0);
    assert!(!host.is_listening(ListenerKind::PointerMove));
}

/// Test: disable then re-enable starts a fresh session.
#[test]
fn test_reenable_after_teardown() {
    let (mut host, mut effect) = running(Viewport::new(64.0, 64.0, 1.0));
    for i in 0..5 {
        effect.handle_event(&mut host, &HostEvent::Scroll { time: f64::from(i) });
    }
    effect.set_enabled(&mut host, false);
    effect.set_enabled(&mut host, true);

    assert_eq!(effect.state(), EffectState::Running);
    assert_eq!(effect.engine().expect("engine").active_count(), 0);
    assert_eq!(host.listener_count(), 3);
    assert_eq!(host.pending_frames(), 1);
}

/// Test: no drawing context, no effect, no error.
#[test]
fn test_missing_canvas_leaves_page_untouched() {
    let mut host = HeadlessHost::without_canvas(Viewport::default());
    let mut effect: SmokeEffect<PixelCanvas> = SmokeEffect::new(SmokeConfig::default());

    effect.set_enabled(&mut host, true);
    assert_eq!(effect.state(), EffectState::Disabled);
    assert_eq!(host.listener_count(), 0);
    assert_eq!(host.pending_frames(), 0);

    // Later input is harmless
    effect.handle_event(&mut host, &HostEvent::Scroll { time: 0.0 });
    assert!(effect.engine().is_none());
}

/// Test: a high-DPR display renders at device resolution.
#[test]
fn test_high_dpr_backing_store() {
    let (mut host, mut effect) = running(Viewport::new(50.0, 40.0, 2.0));
    effect.handle_event(
        &mut host,
        &HostEvent::PointerMove {
            x: 25.0,
            y: 20.0,
            time: 0.0,
        },
    );
    run_frame(&mut host, &mut effect);

    let canvas = effect.surface().expect("surface").canvas();
    assert_eq!((canvas.width(), canvas.height()), (100, 80));
    assert!(canvas.total_alpha() > 0.0);
}

/// Test: a host clock that jumps backwards stalls one frame and reopens
/// the pointer gate instead of freezing input.
#[test]
fn test_clock_going_backwards() {
    let (mut host, mut effect) = running(Viewport::new(160.0, 120.0, 1.0));
    run_frame(&mut host, &mut effect);
    run_frame(&mut host, &mut effect);

    let moved = HostEvent::PointerMove {
        x: 80.0,
        y: 60.0,
        time: host.now(),
    };
    assert_eq!(effect.handle_event(&mut host, &moved), 2);

    host.set_time(10.0);
    let request = host.take_frame().expect("frame scheduled");
    let stalled = effect.on_frame(&mut host, request).expect("effect running");
    assert!(stalled.dt_ms.abs() < f64::EPSILON);
    assert_eq!(stalled.active, 2);
    assert!(effect
        .engine()
        .expect("engine")
        .particles()
        .iter()
        .all(|p| p.age.abs() < f32::EPSILON));

    // Earlier than the last accepted move, yet accepted
    let rewound = HostEvent::PointerMove {
        x: 80.0,
        y: 60.0,
        time: host.now() + 2.0,
    };
    assert_eq!(effect.handle_event(&mut host, &rewound), 2);

    // Time runs forward again from the rewound clock
    let resumed = run_frame(&mut host, &mut effect);
    assert!((resumed.dt_ms - 16.0).abs() < f64::EPSILON);
    assert_eq!(resumed.active, 4);
}
