// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Integration tests for the frame profiler.
//!
//! These tests drive `ProfilingSystem` through whole frames with a manual
//! clock and check the retained tree and its reports.

use ember_telemetry::{
    ManualClock, ProfileReport, ProfilerConfig, ProfilerError, ProfilingSystem, ReportSort,
    SampleId,
};

/// Helper: an enabled profiler on a manual clock.
fn profiler() -> (ProfilingSystem<ManualClock>, ManualClock) {
    let clock = ManualClock::new();
    let profiler = ProfilingSystem::with_clock(&ProfilerConfig::default(), clock.clone());
    (profiler, clock)
}

/// Helper: checks that every sample under `id` nests inside its parent.
fn assert_nested(p: &ProfilingSystem<ManualClock>, id: SampleId) {
    let sample = p.sample(id).expect("sample should be live");
    let end = sample.end_ticks().expect("every retained sample is closed");
    assert!(end >= sample.start_ticks(), "end must not precede start");

    let children_ticks: u64 = p
        .children(id)
        .map(|c| p.sample(c).unwrap().duration_ticks())
        .sum();
    assert!(
        children_ticks <= sample.duration_ticks(),
        "children of '{}' outlast their parent",
        sample.tag()
    );
    for child in p.children(id) {
        let c = p.sample(child).unwrap();
        assert!(c.start_ticks() >= sample.start_ticks());
        assert!(c.end_ticks().unwrap() <= end);
        assert_nested(p, child);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tree shape
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn balanced_pushes_produce_properly_nested_tree() {
    // ARRANGE
    let (mut p, clock) = profiler();
    p.start_new_frame().unwrap();

    // ACT
    for tag in ["input", "update", "render"] {
        clock.advance_ms(1);
        p.push_sample(tag).unwrap();
        clock.advance_ms(2);
        p.push_sample("inner").unwrap();
        clock.advance_ms(3);
        p.pop_sample().unwrap();
        clock.advance_ms(1);
        p.pop_sample().unwrap();
    }
    clock.advance_ms(1);
    p.mark_frame().unwrap();

    // ASSERT
    let root = p.last_frame().expect("a frame was completed");
    assert_eq!(p.sample(root).unwrap().tag(), "frame");
    let tags: Vec<_> = p
        .children(root)
        .map(|c| p.sample(c).unwrap().tag())
        .collect();
    assert_eq!(tags, ["input", "update", "render"]);
    assert_nested(&p, root);
    assert_eq!(p.duration_ms(root), 22.0);
}

#[test]
fn empty_frame_reports_equal_self_and_total_time() {
    // ARRANGE
    let (mut p, clock) = profiler();
    p.start_new_frame().unwrap();
    p.mark_frame().unwrap();

    // ACT
    clock.advance_ms(16);
    p.mark_frame().unwrap();
    let report = p.generate_report(ReportSort::SelfTime).unwrap();

    // ASSERT
    assert_eq!(report.nodes.len(), 1);
    let frame = report.node("frame").unwrap();
    assert_eq!(frame.total_time_ms, 16.0);
    assert_eq!(frame.self_time_ms, frame.total_time_ms);
    assert_eq!(report.frame_time_ms, 16.0);
}

#[test]
fn report_is_idempotent_for_the_same_retained_frame() {
    // ARRANGE
    let (mut p, clock) = profiler();
    p.start_new_frame().unwrap();
    p.scope("physics", |p| {
        clock.advance_ms(4);
        p.scope("broadphase", |_| clock.advance_ms(1)).unwrap();
    })
    .unwrap();
    p.mark_frame().unwrap();

    // ACT
    let first = p.generate_report(ReportSort::TotalTime).unwrap();
    let second = p.generate_report(ReportSort::TotalTime).unwrap();

    // ASSERT
    assert_eq!(first, second);
    assert_eq!(first.node("physics").unwrap().self_time_ms, 4.0);
}

#[test]
fn previous_frame_stays_readable_while_next_is_built() {
    // ARRANGE
    let (mut p, clock) = profiler();
    p.start_new_frame().unwrap();
    p.scope("ai", |_| clock.advance_ms(5)).unwrap();
    p.mark_frame().unwrap();
    let before: ProfileReport = p.generate_report(ReportSort::SelfTime).unwrap();

    // ACT: build half of the next frame.
    p.push_sample("ai").unwrap();
    clock.advance_ms(50);

    // ASSERT
    let during = p.generate_report(ReportSort::SelfTime).unwrap();
    assert_eq!(before, during);
    assert!(p.tree_view().unwrap().contains("-ai"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Misuse and recovery
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn unpopped_sample_fails_the_frame_but_not_the_next_one() {
    // ARRANGE
    let (mut p, clock) = profiler();
    p.start_new_frame().unwrap();
    p.scope("good", |_| clock.advance_ms(2)).unwrap();
    p.mark_frame().unwrap();
    let good_report = p.generate_report(ReportSort::SelfTime).unwrap();

    // ACT
    p.push_sample("leaky").unwrap();
    p.push_sample("leakier").unwrap();
    let result = p.mark_frame();

    // ASSERT
    assert_eq!(
        result,
        Err(ProfilerError::UnpoppedSamples {
            open: 2,
            innermost: "leakier"
        })
    );
    assert_eq!(
        p.generate_report(ReportSort::SelfTime).unwrap(),
        good_report,
        "The last good frame stays the reported one"
    );
    assert_eq!(p.active_tag(), Some("frame"), "A clean frame was started");

    p.scope("recovered", |_| clock.advance_ms(1)).unwrap();
    p.mark_frame().unwrap();
    assert!(p
        .generate_report(ReportSort::SelfTime)
        .unwrap()
        .node("recovered")
        .is_some());
}

#[test]
fn toggling_takes_effect_at_the_next_frame_boundary() {
    // ARRANGE
    let (mut p, clock) = profiler();
    p.start_new_frame().unwrap();

    // ACT: disable mid-frame; this frame still records.
    p.set_enabled(false);
    assert!(p.is_enabled());
    p.scope("before_toggle", |_| clock.advance_ms(1)).unwrap();
    p.mark_frame().unwrap();

    // ASSERT
    assert!(!p.is_enabled());
    let frames = p.frame_number();
    // Everything is a no-op while disabled, including unbalanced pops.
    p.push_sample("ignored").unwrap();
    p.pop_sample().unwrap();
    p.pop_sample().unwrap();
    p.mark_frame().unwrap();
    assert_eq!(p.frame_number(), frames);
    assert!(p
        .generate_report(ReportSort::SelfTime)
        .unwrap()
        .node("before_toggle")
        .is_some());

    // Re-enabling starts a fresh frame at the next boundary.
    p.set_enabled(true);
    p.mark_frame().unwrap();
    assert!(p.is_enabled());
    assert_eq!(p.active_tag(), Some("frame"));
}

#[test]
fn average_frame_duration_tracks_steady_frame_rate() {
    // ARRANGE
    let (mut p, clock) = profiler();
    p.start_new_frame().unwrap();

    // ACT
    for _ in 0..200 {
        clock.advance_ms(16);
        p.mark_frame().unwrap();
    }

    // ASSERT
    let average = p.average_frame_duration().as_secs_f64() * 1000.0;
    assert!((average - 16.0).abs() < 1e-6, "average was {average}");
}
