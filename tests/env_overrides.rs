// Test intent: verifies the parallel batch threshold honours its environment variable.
#![cfg(feature = "parallel")]

use std::process::Command;

use lanefft::batch::{
    parallel_batch_threshold, set_parallel_batch_threshold, DEFAULT_PARALLEL_BATCH_THRESHOLD,
};

#[test]
fn print_threshold() {
    println!("{}", parallel_batch_threshold());
}

fn threshold_with_env(value: &str) -> usize {
    let exe = std::env::current_exe().unwrap();
    let output = Command::new(&exe)
        .env("LANEFFT_PAR_BATCH_THRESHOLD", value)
        .args(["--exact", "print_threshold", "--nocapture", "--test-threads=1"])
        .output()
        .expect("run threshold test");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    stdout
        .lines()
        .rev()
        .find_map(|l| l.trim().parse().ok())
        .unwrap()
}

#[test]
fn env_var_sets_threshold() {
    assert_eq!(threshold_with_env("32"), 32);
    assert_eq!(threshold_with_env(" 4096 "), 4096);
}

#[test]
fn invalid_env_value_falls_back_to_default() {
    assert_eq!(
        threshold_with_env("not-a-number"),
        DEFAULT_PARALLEL_BATCH_THRESHOLD
    );
    assert_eq!(threshold_with_env("0"), DEFAULT_PARALLEL_BATCH_THRESHOLD);
}

#[test]
fn setter_overrides_and_zero_reverts() {
    let baseline = parallel_batch_threshold();
    set_parallel_batch_threshold(7);
    assert_eq!(parallel_batch_threshold(), 7);
    set_parallel_batch_threshold(0);
    assert_eq!(parallel_batch_threshold(), baseline);
}
