mod common;
use common::*;

#[test]
fn test_worker_count_does_not_change_result() {
    for threads in ["1", "2", "3", "4", "5", "16", "0"] {
        let (stdout, stderr, exit_code) = run_loggator_with_file(&["--threads", threads], SAMPLE_LOG);
        assert_eq!(exit_code, 0, "threads = {}, stderr: {}", threads, stderr);
        assert_eq!(stdout, SAMPLE_OUTPUT, "threads = {}", threads);
    }
}

#[test]
fn test_more_workers_than_records_are_clamped() {
    let (_stdout, stderr, exit_code) =
        run_loggator_with_file(&["--stats", "-j", "64"], "ts INFO a\nts ERROR b\n");
    assert_eq!(exit_code, 0);
    assert!(
        stderr.contains("2 workers (64 requested)"),
        "expected the worker count to be clamped: {}",
        stderr
    );
}

#[test]
fn test_parallel_sequential_equivalence_large_input() {
    let levels = ["INFO", "WARN", "ERROR", "DEBUG", "ERROR"];
    let messages = ["disk full", "timeout", "oom", "connection reset"];
    let mut input = String::new();
    for i in 0..10_007 {
        input.push_str(&format!(
            "2024-01-01T00:00:{:02} {} {}\n",
            i % 60,
            levels[i % levels.len()],
            messages[(i / 3) % messages.len()]
        ));
        if i % 97 == 0 {
            input.push_str("garbage\n");
        }
    }

    let (sequential, _stderr, seq_exit_code) = run_loggator_with_file(&["-j", "1"], &input);
    let (parallel, _stderr, par_exit_code) = run_loggator_with_file(&["-j", "7"], &input);

    assert_eq!(seq_exit_code, 0);
    assert_eq!(par_exit_code, 0);
    assert_eq!(sequential, parallel);

    let levels = section_entries(&sequential, "Frequency by Level:");
    let total: u64 = levels.iter().map(|(_, count)| count).sum();
    assert_eq!(total, 10_007);
}
