// Tests for the console reporter - public API only

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use dotspec::report::{ConsoleOptions, ConsoleReporter, ReportError};
use dotspec::state::{ExpectationResult, RunPhase, SpecResult, SpecStatus, SuiteResult};

/// Captures everything the reporter prints
#[derive(Clone, Default)]
struct Output(Arc<Mutex<String>>);

impl Output {
    fn sink(&self) -> impl FnMut(&str) + Send + 'static {
        let buffer = Arc::clone(&self.0);
        move |text: &str| buffer.lock().unwrap().push_str(text)
    }

    fn get(&self) -> String {
        self.0.lock().unwrap().clone()
    }

    fn clear(&self) {
        self.0.lock().unwrap().clear();
    }
}

/// Settable fake clock
#[derive(Clone, Default)]
struct FakeNow(Arc<AtomicU64>);

impl FakeNow {
    fn set(&self, millis: u64) {
        self.0.store(millis, Ordering::SeqCst);
    }

    fn clock(&self) -> impl Fn() -> u64 + Send + 'static {
        let millis = Arc::clone(&self.0);
        move || millis.load(Ordering::SeqCst)
    }
}

fn reporter(out: &Output) -> ConsoleReporter {
    ConsoleReporter::new(ConsoleOptions::new().print(out.sink()))
}

fn colored_reporter(out: &Output) -> ConsoleReporter {
    ConsoleReporter::new(ConsoleOptions::new().print(out.sink()).show_colors(true))
}

fn failing_spec(stack: &str) -> SpecResult {
    SpecResult::failed(
        "with a failing spec",
        "A suite with a failing spec",
        vec![ExpectationResult::new("Expected true to be false.").with_stack(stack)],
    )
}

#[test]
fn test_reports_run_started() {
    // Arrange
    let out = Output::default();
    let mut reporter = reporter(&out);

    // Act
    reporter.run_started().unwrap();

    // Assert
    assert_eq!(out.get(), "Started\n");
}

#[test]
fn test_reports_passing_spec_as_dot() {
    let out = Output::default();
    let mut reporter = reporter(&out);

    reporter.spec_finished(&SpecResult::with_status(SpecStatus::Passed)).unwrap();

    assert_eq!(out.get(), ".");
}

#[test]
fn test_does_not_report_disabled_spec() {
    let out = Output::default();
    let mut reporter = reporter(&out);

    reporter.spec_finished(&SpecResult::with_status(SpecStatus::Disabled)).unwrap();
    reporter.spec_finished(&SpecResult::with_status(SpecStatus::Pending)).unwrap();
    reporter.spec_finished(&SpecResult::with_status(SpecStatus::Other)).unwrap();

    assert_eq!(out.get(), "");
    assert_eq!(reporter.state().spec_count(), 0);
    assert_eq!(reporter.state().failure_count(), 0);
}

#[test]
fn test_reports_failing_spec_as_f() {
    let out = Output::default();
    let mut reporter = reporter(&out);

    reporter.spec_finished(&SpecResult::with_status(SpecStatus::Failed)).unwrap();

    assert_eq!(out.get(), "F");
}

#[test]
fn test_progress_characters_follow_call_order() {
    let out = Output::default();
    let mut reporter = reporter(&out);

    reporter.run_started().unwrap();
    out.clear();
    for status in [
        SpecStatus::Passed,
        SpecStatus::Failed,
        SpecStatus::Disabled,
        SpecStatus::Passed,
        SpecStatus::Failed,
    ] {
        reporter.spec_finished(&SpecResult::with_status(status)).unwrap();
    }
    assert_eq!(out.get(), ".F.F");

    reporter.run_finished().unwrap();
    assert!(out.get().starts_with(".F.F\n"));
    assert!(!out.get().starts_with(".F.F\n\n\n"));
}

#[test]
fn test_summary_singular_spec_and_time() {
    // Arrange
    let out = Output::default();
    let now = FakeNow::default();
    let mut reporter =
        ConsoleReporter::new(ConsoleOptions::new().print(out.sink()).now(now.clock()));

    now.set(500);
    reporter.run_started().unwrap();
    reporter.spec_finished(&SpecResult::passed("works", "Suite works")).unwrap();
    now.set(1500);
    out.clear();

    // Act
    let summary = reporter.run_finished().unwrap();

    // Assert
    let output = out.get();
    assert!(output.contains("1 spec, 0 failures"));
    assert!(output.contains("Finished in 1 second\n"));
    assert_eq!(summary.spec_count, 1);
    assert_eq!(summary.elapsed_millis, 1000);
    assert!(summary.all_passed());
}

#[test]
fn test_summary_pluralized_specs_and_seconds() {
    let out = Output::default();
    let now = FakeNow::default();
    let mut reporter =
        ConsoleReporter::new(ConsoleOptions::new().print(out.sink()).now(now.clock()));

    now.set(500);
    reporter.run_started().unwrap();
    reporter.spec_finished(&SpecResult::passed("works", "Suite works")).unwrap();
    reporter.spec_finished(&failing_spec("foo\nbar\nbaz")).unwrap();
    out.clear();

    now.set(600);
    let summary = reporter.run_finished().unwrap();

    let output = out.get();
    assert!(output.contains("2 specs, 1 failure"));
    assert!(!output.contains("1 failures"));
    assert!(output.contains("Finished in 0.1 seconds\n"));
    assert!(!summary.all_passed());
}

#[test]
fn test_summary_for_many_passing_specs() {
    let out = Output::default();
    let mut reporter = ConsoleReporter::new(ConsoleOptions::new().print(out.sink()).now(|| 0u64));

    reporter.run_started().unwrap();
    for _ in 0..5 {
        reporter.spec_finished(&SpecResult::passed("p", "Suite p")).unwrap();
    }
    reporter.run_finished().unwrap();

    assert!(out.get().contains("5 specs, 0 failures"));
}

#[test]
fn test_summary_includes_stack_trace_verbatim() {
    let out = Output::default();
    let mut reporter = reporter(&out);

    reporter.run_started().unwrap();
    reporter.spec_finished(&SpecResult::passed("works", "Suite works")).unwrap();
    reporter.spec_finished(&failing_spec("foo\nbar\nbaz")).unwrap();
    out.clear();

    reporter.run_finished().unwrap();

    let output = out.get();
    assert!(output.contains("Failures:\n"));
    assert!(output.contains("1) A suite with a failing spec\n"));
    assert!(output.contains("Expected true to be false.\n"));
    assert!(output.contains("foo\nbar\nbaz"));
}

#[test]
fn test_full_output_with_failure() {
    let out = Output::default();
    let now = FakeNow::default();
    let mut reporter =
        ConsoleReporter::new(ConsoleOptions::new().print(out.sink()).now(now.clock()));

    now.set(0);
    reporter.run_started().unwrap();
    reporter.spec_finished(&SpecResult::passed("works", "Suite works")).unwrap();
    reporter.spec_finished(&failing_spec("foo bar baz")).unwrap();
    now.set(2000);
    reporter.run_finished().unwrap();

    assert_eq!(
        out.get(),
        "Started\n\
         .F\n\
         Failures:\n\
         \n\
         1) A suite with a failing spec\n\
         Expected true to be false.\n\
         foo bar baz\n\
         \n\
         Finished in 2 seconds\n\
         2 specs, 1 failure\n"
    );
}

#[test]
fn test_full_output_without_failures_has_no_failure_section() {
    let out = Output::default();
    let mut reporter = ConsoleReporter::new(ConsoleOptions::new().print(out.sink()).now(|| 0u64));

    reporter.run_started().unwrap();
    reporter.spec_finished(&SpecResult::passed("works", "Suite works")).unwrap();
    reporter.run_finished().unwrap();

    assert_eq!(
        out.get(),
        "Started\n.\n\nFinished in 0 seconds\n1 spec, 0 failures\n"
    );
}

#[test]
fn test_expectation_without_stack_renders_message_only() {
    let out = Output::default();
    let mut reporter = reporter(&out);

    reporter.run_started().unwrap();
    reporter
        .spec_finished(&SpecResult::failed(
            "no stack",
            "Suite no stack",
            vec![ExpectationResult::new("Expected 1 to be 2.")],
        ))
        .unwrap();
    out.clear();
    reporter.run_finished().unwrap();

    assert!(
        out.get()
            .contains("1) Suite no stack\nExpected 1 to be 2.\n\nFinished in")
    );
}

#[test]
fn test_failures_are_numbered_in_order() {
    let out = Output::default();
    let mut reporter = reporter(&out);

    reporter.run_started().unwrap();
    reporter
        .spec_finished(&SpecResult::failed("one", "Suite one", vec![]))
        .unwrap();
    reporter.spec_finished(&SpecResult::passed("p", "Suite p")).unwrap();
    reporter
        .spec_finished(&SpecResult::failed("two", "Suite two", vec![]))
        .unwrap();
    out.clear();
    reporter.run_finished().unwrap();

    let output = out.get();
    let first = output.find("1) Suite one").expect("first failure");
    let second = output.find("2) Suite two").expect("second failure");
    assert!(first < second);
    assert!(output.contains("3 specs, 2 failures"));
}

#[test]
fn test_calls_on_complete_when_done() {
    // Arrange
    let out = Output::default();
    let calls = Arc::new(AtomicUsize::new(0));
    let mut reporter = ConsoleReporter::new(ConsoleOptions::new().print(out.sink()).on_complete({
        let calls = Arc::clone(&calls);
        move || {
            calls.fetch_add(1, Ordering::SeqCst);
        }
    }));

    // Act
    reporter.run_finished().unwrap();

    // Assert
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(out.get().contains("0 specs, 0 failures"));
    assert!(out.get().contains("Finished in 0 seconds\n"));
}

#[test]
fn test_calls_on_complete_when_all_specs_fail() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut reporter = ConsoleReporter::new(
        ConsoleOptions::new()
            .print(|_| {})
            .now(|| 0u64)
            .on_complete({
                let calls = Arc::clone(&calls);
                move || {
                    calls.fetch_add(1, Ordering::SeqCst);
                }
            }),
    );

    reporter.run_started().unwrap();
    reporter.spec_finished(&failing_spec("x")).unwrap();
    reporter.run_finished().unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_same_result_twice_counts_twice() {
    let out = Output::default();
    let mut reporter = ConsoleReporter::new(ConsoleOptions::new().print(out.sink()).now(|| 0u64));
    let result = failing_spec("trace");

    reporter.run_started().unwrap();
    reporter.spec_finished(&result).unwrap();
    reporter.spec_finished(&result).unwrap();
    let summary = reporter.run_finished().unwrap();

    assert_eq!(summary.spec_count, 2);
    assert_eq!(summary.failure_count, 2);
    assert!(out.get().contains("2) A suite with a failing spec"));
}

#[test]
fn test_suite_finished_prints_nothing() {
    let out = Output::default();
    let mut reporter = reporter(&out);

    reporter.run_started().unwrap();
    out.clear();
    reporter.suite_finished(&SuiteResult::default()).unwrap();

    assert_eq!(out.get(), "");
}

#[test]
fn test_run_started_resets_earlier_counts() {
    let out = Output::default();
    let mut reporter = ConsoleReporter::new(ConsoleOptions::new().print(out.sink()).now(|| 0u64));

    reporter.spec_finished(&failing_spec("early")).unwrap();
    reporter.run_started().unwrap();
    let summary = reporter.run_finished().unwrap();

    assert_eq!(summary.spec_count, 0);
    assert_eq!(summary.failure_count, 0);
}

#[test]
fn test_backwards_clock_reports_zero_elapsed() {
    let out = Output::default();
    let now = FakeNow::default();
    let mut reporter =
        ConsoleReporter::new(ConsoleOptions::new().print(out.sink()).now(now.clock()));

    now.set(5000);
    reporter.run_started().unwrap();
    now.set(4000);
    let summary = reporter.run_finished().unwrap();

    assert_eq!(summary.elapsed_millis, 0);
    assert!(out.get().contains("Finished in 0 seconds\n"));
}

#[test]
fn test_events_after_run_finished_are_rejected() {
    let out = Output::default();
    let mut reporter = reporter(&out);

    reporter.run_started().unwrap();
    reporter.run_finished().unwrap();
    out.clear();

    let err = reporter
        .spec_finished(&SpecResult::with_status(SpecStatus::Passed))
        .unwrap_err();
    assert!(matches!(
        err,
        ReportError::OutOfOrder {
            event: "spec_finished",
            phase: RunPhase::Done
        }
    ));
    assert_eq!(err.to_string(), "spec_finished received while run is done");

    assert!(reporter.run_finished().is_err());
    assert_eq!(out.get(), "");
}

#[test]
fn test_run_started_twice_is_rejected() {
    let out = Output::default();
    let mut reporter = reporter(&out);

    reporter.run_started().unwrap();
    let err = reporter.run_started().unwrap_err();

    assert!(matches!(
        err,
        ReportError::OutOfOrder {
            phase: RunPhase::Running,
            ..
        }
    ));
    assert_eq!(out.get(), "Started\n");
}

mod with_color {
    use super::*;

    #[test]
    fn test_reports_run_started_uncolored() {
        let out = Output::default();
        let mut reporter = colored_reporter(&out);

        reporter.run_started().unwrap();

        assert_eq!(out.get(), "Started\n");
    }

    #[test]
    fn test_reports_passing_spec_as_green_dot() {
        let out = Output::default();
        let mut reporter = colored_reporter(&out);

        reporter.spec_finished(&SpecResult::with_status(SpecStatus::Passed)).unwrap();

        assert_eq!(out.get(), "\x1b[32m.\x1b[0m");
    }

    #[test]
    fn test_does_not_report_disabled_spec() {
        let out = Output::default();
        let mut reporter = colored_reporter(&out);

        reporter.spec_finished(&SpecResult::with_status(SpecStatus::Disabled)).unwrap();

        assert_eq!(out.get(), "");
    }

    #[test]
    fn test_reports_failing_spec_as_red_f() {
        let out = Output::default();
        let mut reporter = colored_reporter(&out);

        reporter.spec_finished(&SpecResult::with_status(SpecStatus::Failed)).unwrap();

        assert_eq!(out.get(), "\x1b[31mF\x1b[0m");
    }

    #[test]
    fn test_summary_is_uncolored() {
        let out = Output::default();
        let mut reporter = ConsoleReporter::new(
            ConsoleOptions::new()
                .print(out.sink())
                .show_colors(true)
                .now(|| 0u64),
        );

        reporter.spec_finished(&failing_spec("trace")).unwrap();
        out.clear();
        reporter.run_finished().unwrap();

        assert!(!out.get().contains('\x1b'));
    }
}
