//! Integration tests for the simulator.
//!
//! These tests run whole traces, from trace text through to the report.

use std::io::Write;
use std::process::Command;

use tempfile::NamedTempFile;
use vmsim::common::{AgingSelection, Error, PolicyKind, SimConfig};
use vmsim::trace::{read_trace, TraceReader, TraceRecord};
use vmsim::vm::replacer::LookaheadIndex;
use vmsim::vm::{simulate, Outcome, Simulator};

fn write_trace(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
    file
}

fn run(config: SimConfig, trace: &str) -> (Vec<Outcome>, vmsim::Report) {
    let records: Vec<TraceRecord> = TraceReader::new(trace.as_bytes())
        .collect::<vmsim::Result<_>>()
        .unwrap();
    let mut outcomes = Vec::new();
    let report = simulate(config, &records, |_, ev| outcomes.push(ev.outcome)).unwrap();
    (outcomes, report)
}

/// frames=3, lru, A B C A D all reads.
#[test]
fn test_lru_reference_scenario() {
    let config = SimConfig::new(3, PolicyKind::Lru, None).unwrap();
    let (outcomes, report) = run(
        config,
        "aaaaa000 R\nbbbbb000 R\nccccc000 R\naaaaa010 R\nddddd000 R\n",
    );

    assert_eq!(
        outcomes,
        vec![
            Outcome::FaultNoEviction,
            Outcome::FaultNoEviction,
            Outcome::FaultNoEviction,
            Outcome::Hit,
            Outcome::FaultEvictClean,
        ]
    );
    assert_eq!(report.total_faults, 4);
    assert_eq!(report.total_writebacks, 0);
}

/// frames=1, clock, A(write) B(read).
#[test]
fn test_clock_reference_scenario() {
    let config = SimConfig::new(1, PolicyKind::Clock, None).unwrap();
    let (outcomes, report) = run(config, "aaaaa000 W\nbbbbb000 R\n");

    assert_eq!(
        outcomes,
        vec![Outcome::FaultNoEviction, Outcome::FaultEvictDirty]
    );
    assert_eq!(report.total_writebacks, 1);
}

/// Pages that differ only past the fifth character collapse together.
#[test]
fn test_address_truncation() {
    let config = SimConfig::new(1, PolicyKind::Lru, None).unwrap();
    let (outcomes, report) = run(config, "0041f7a0 R\n0041f000 W\n0041fffc R\n");

    assert_eq!(
        outcomes,
        vec![Outcome::FaultNoEviction, Outcome::Hit, Outcome::Hit]
    );
    assert_eq!(report.total_faults, 1);
}

/// Same trace, every policy: all agree before the frames fill.
#[test]
fn test_policies_agree_until_full() {
    let trace = "00001000 R\n00002000 W\n00003000 R\n00001000 R\n";

    for kind in PolicyKind::ALL {
        let config = SimConfig::new(4, kind, Some(2)).unwrap();
        let (outcomes, report) = run(config, trace);
        assert_eq!(outcomes[3], Outcome::Hit, "{}", kind);
        assert_eq!(report.total_faults, 3, "{}", kind);
        assert_eq!(report.total_writebacks, 0, "{}", kind);
    }
}

/// Aging victim search when the unreferenced minimum is shared by a
/// referenced frame.
#[test]
fn test_aging_selection_modes() {
    // frames=2, refresh=2:
    //   1 a, 2 b        -> refresh: a=0x80 b=0x80, bits clear
    //   3 a (hit), 4 c  -> only b is unreferenced, but a holds the same value
    let trace = "aaaaa R\nbbbbb R\naaaaa R\nccccc R\n";
    let records: Vec<_> = TraceReader::new(trace.as_bytes())
        .collect::<vmsim::Result<_>>()
        .unwrap();

    for (selection, expected) in [
        (AgingSelection::Strict, "bbbbb"),
        (AgingSelection::Compatible, "aaaaa"),
    ] {
        let config = SimConfig::new(2, PolicyKind::Aging, Some(2))
            .unwrap()
            .with_aging_selection(selection);

        let mut sim = Simulator::for_trace(config, &records).unwrap();
        let mut victims = Vec::new();
        for r in &records {
            victims.extend(sim.access(r).victim);
        }
        assert_eq!(victims.len(), 1);
        assert_eq!(victims[0].as_str(), expected, "{:?}", selection);
    }
}

/// Trace file round trip through the reader.
#[test]
fn test_trace_file_run() {
    let file = write_trace(&["0041f7a0 R", "13f5e2c0 W", "", "0041f000 R", "bfffe3c0 W"]);
    let records = read_trace(file.path()).unwrap();
    assert_eq!(records.len(), 4);

    let config = SimConfig::new(2, PolicyKind::Optimal, None).unwrap();
    let report = simulate(config, &records, |_, _| {}).unwrap();
    assert_eq!(report.total_accesses, 4);
    assert_eq!(report.total_faults, 3);
    // Neither resident page is used again; the tie goes to frame 0 (clean)
    assert_eq!(report.total_writebacks, 0);
}

/// A malformed record aborts the run with its line number.
#[test]
fn test_malformed_trace_aborts() {
    let file = write_trace(&["0041f7a0 R", "13f5e2c0 X"]);
    match read_trace(file.path()) {
        Err(Error::MalformedRecord { line, .. }) => assert_eq!(line, 2),
        other => panic!("Expected MalformedRecord, got {:?}", other),
    }
}

/// The binary prints one line per reference, then the report.
#[test]
fn test_cli_output() {
    let file = write_trace(&["aaaaa000 W", "bbbbb000 R"]);

    let output = Command::new(env!("CARGO_BIN_EXE_vmsim"))
        .args(["-n", "1", "-a", "clock"])
        .arg(file.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let expected = "\
page fault - no eviction
page fault - evict dirty
+++++++++++++++++++++++++++++++++
Algorithm: Clock
Number of Frames: 1
Total Memory Accesses: 2
Total Page Faults: 2
Total Writes to Disk: 1
+++++++++++++++++++++++++++++++++
";
    assert_eq!(stdout, expected);
}

/// Aging without a refresh interval is rejected before reading the trace.
#[test]
fn test_cli_aging_requires_refresh() {
    let file = write_trace(&["aaaaa000 R"]);

    let output = Command::new(env!("CARGO_BIN_EXE_vmsim"))
        .args(["-n", "2", "-a", "aging"])
        .arg(file.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("refresh amount needs to be set when using aging"));
    assert!(stderr.contains("--help"));
    assert!(output.stdout.is_empty());
}

/// A malformed trace is a runtime failure, not a usage error.
#[test]
fn test_cli_malformed_trace_exit_code() {
    let file = write_trace(&["aaaaa000 R", "bbbbb000 Q"]);

    let output = Command::new(env!("CARGO_BIN_EXE_vmsim"))
        .args(["-n", "2", "-a", "lru"])
        .arg(file.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("line 2"));
    assert!(!stderr.contains("--help"));
}

fn run_aging_cli(extra: &[&str]) -> String {
    // Strict evicts bbbbb at the fourth reference, so the final aaaaa hits.
    // Compatible evicts aaaaa instead and faults it back in.
    let file = write_trace(&["aaaaa R", "bbbbb R", "aaaaa R", "ccccc R", "aaaaa R"]);

    let output = Command::new(env!("CARGO_BIN_EXE_vmsim"))
        .args(["-n", "2", "-a", "aging", "-r", "2", "-q"])
        .args(extra)
        .arg(file.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    String::from_utf8(output.stdout).unwrap()
}

/// `-q` leaves only the report.
#[test]
fn test_cli_quiet() {
    let expected = "\
+++++++++++++++++++++++++++++++++
Algorithm: Aging
Number of Frames: 2
Total Memory Accesses: 5
Total Page Faults: 3
Total Writes to Disk: 0
+++++++++++++++++++++++++++++++++
";
    assert_eq!(run_aging_cli(&[]), expected);
}

#[test]
fn test_cli_compat_aging() {
    let stdout = run_aging_cli(&["--compat-aging"]);
    assert!(!stdout.contains("page fault"));
    assert!(stdout.contains("Total Page Faults: 4\n"));
}

/// An index built apart from the simulator drives the optimal policy the
/// same way a prescan does.
#[test]
fn test_injected_lookahead_from_raw_addresses() {
    let file = write_trace(&[
        "00007000 R", "00000000 W", "00001000 R", "00002000 R", "00000004 R", "00003000 W",
        "00000008 R", "00004000 R", "00002010 R",
    ]);
    let records = read_trace(file.path()).unwrap();
    let config = SimConfig::new(3, PolicyKind::Optimal, None).unwrap();

    let index = LookaheadIndex::build(records.iter().map(|r| r.address.as_str()));
    let mut sim = Simulator::with_lookahead(config, index).unwrap();
    assert_eq!(sim.replacer().kind(), PolicyKind::Optimal);

    let mut injected = Vec::new();
    for r in &records {
        injected.push(sim.access(r));
    }

    let mut prescanned = Vec::new();
    let report = simulate(config, &records, |_, ev| prescanned.push(ev.clone())).unwrap();

    assert_eq!(injected, prescanned);
    assert_eq!(sim.finish(), report);
}
