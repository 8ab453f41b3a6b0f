#![cfg(feature = "std")]

use broadside::LogFilter;
use log::LevelFilter;

#[test]
fn test_defaults_to_info() {
    let filter = LogFilter::parse("");
    assert_eq!(filter, LogFilter::default());
    assert_eq!(filter.level_for("broadside::scheduler"), LevelFilter::Info);
    assert_eq!(filter.max_level(), LevelFilter::Info);
}

#[test]
fn test_bare_level_sets_default() {
    let filter = LogFilter::parse("warn");
    assert_eq!(filter.level_for("broadside::fleet"), LevelFilter::Warn);
    assert_eq!(filter.max_level(), LevelFilter::Warn);
}

#[test]
fn test_strategy_trace_override() {
    let filter = LogFilter::parse("warn,broadside::strategy=trace");
    assert_eq!(
        filter.level_for("broadside::strategy::optimal"),
        LevelFilter::Trace
    );
    assert_eq!(filter.level_for("broadside::strategy"), LevelFilter::Trace);
    assert_eq!(filter.level_for("broadside::scheduler"), LevelFilter::Warn);
    // prefix must end on a module boundary
    assert_eq!(filter.level_for("broadside::strategyx"), LevelFilter::Warn);
    assert_eq!(filter.max_level(), LevelFilter::Trace);
}

#[test]
fn test_longest_prefix_wins() {
    let filter = LogFilter::parse(
        "broadside=error, broadside::strategy=debug, broadside::strategy::greedy=off",
    );
    assert_eq!(filter.level_for("broadside::grid"), LevelFilter::Error);
    assert_eq!(
        filter.level_for("broadside::strategy::minimax"),
        LevelFilter::Debug
    );
    assert_eq!(
        filter.level_for("broadside::strategy::greedy"),
        LevelFilter::Off
    );
    assert_eq!(filter.level_for("sim"), LevelFilter::Info);
}

#[test]
fn test_malformed_directives_are_skipped() {
    let filter = LogFilter::parse("loud,=debug,broadside::fleet=chatty,broadside::fleet=debug");
    assert_eq!(filter.level_for("broadside::fleet"), LevelFilter::Debug);
    assert_eq!(filter.level_for("broadside::grid"), LevelFilter::Info);
}
