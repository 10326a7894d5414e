//! Integration tests for the public engine API.

use std::sync::Arc;

use chrono::Duration as ChronoDuration;
use conkytext::cache::CacheCleanupConfig;
use conkytext::clock::ManualClock;
use conkytext::engine::Engine;
use conkytext::metrics::{MetricSnapshot, StaticSource};
use conkytext::shell::RecordingExecutor;
use std::time::Duration;

const SNAPSHOT: &str = r#"
cpu:
  usage_percent: 45.5
  cores:
    - usage_percent: 10
      frequency_mhz: 2400
    - usage_percent: 90
      frequency_mhz: 3600
memory:
  total: 17179869184
  used: 8589934592
network:
  interfaces:
    eth0:
      rx_rate: 1536
      addresses: [192.168.1.10]
    wlan0:
      addresses: []
filesystems:
  mounts:
    /:
      fs_type: ext4
      total: 107374182400
      used: 53687091200
      free: 53687091200
processes:
  top_cpu:
    - name: firefox
      pid: 4242
      cpu_percent: 12.5
audio:
  muted: true
system:
  hostname: box.example.org
"#;

struct Harness {
    engine: Engine,
    clock: Arc<ManualClock>,
    exec: Arc<RecordingExecutor>,
}

fn harness() -> Harness {
    let snapshot = MetricSnapshot::from_yaml(SNAPSHOT).unwrap();
    let clock = Arc::new(ManualClock::new());
    let exec = Arc::new(RecordingExecutor::new());
    let engine = Engine::builder()
        .source(Arc::new(StaticSource::new(snapshot)))
        .clock(clock.clone())
        .executor(exec.clone())
        .janitor(false)
        .build()
        .unwrap();
    Harness {
        engine,
        clock,
        exec,
    }
}

#[test]
fn text_without_directives_is_unchanged() {
    let h = harness();
    for text in ["", "plain text", "100% sure", "a } b { c", "multi\nline\n"] {
        assert_eq!(h.engine.parse(text), text);
    }
}

#[test]
fn status_line_renders() {
    let h = harness();
    assert_eq!(
        h.engine
            .parse("CPU: ${cpu}% | RAM: ${mem}/${memmax} (${memperc}%)"),
        "CPU: 46% | RAM: 8.0GiB/16.0GiB (50%)"
    );
}

#[test]
fn end_to_end_cpu_and_memory_line() {
    let snapshot = MetricSnapshot::from_yaml(
        "cpu: { usage_percent: 45.5 }\nmemory: { total: 17179869184, used: 8589934592 }\n",
    )
    .unwrap();
    let engine = Engine::builder()
        .source(Arc::new(StaticSource::new(snapshot)))
        .janitor(false)
        .build()
        .unwrap();

    assert_eq!(
        engine.parse("CPU: ${cpu}% | RAM: ${mem}/${memmax} (${memperc}%)"),
        "CPU: 46% | RAM: 8.0GiB/16.0GiB (50%)"
    );
}

#[test]
fn byte_directives_use_binary_suffixes() {
    let h = harness();
    let suffixes = ["B", "KiB", "MiB", "GiB", "TiB"];
    for text in ["${mem}", "${memmax}", "${downspeed eth0}", "${upspeed eth0}", "${fs_size /}"] {
        let out = h.engine.parse(text);
        assert!(
            suffixes.iter().any(|s| out.ends_with(s)),
            "{text} rendered {out}"
        );
    }
    assert_eq!(h.engine.parse("${downspeed eth0}"), "1.5KiB");
    assert_eq!(h.engine.parse("${upspeed eth0}"), "0B");
}

#[test]
fn predicates_choose_branches() {
    let h = harness();
    let cases = [
        ("${if_up eth0}UP${else}DOWN${endif}", "UP"),
        ("${if_up wlan0}UP${else}DOWN${endif}", "DOWN"),
        ("${if_up nope0}UP${else}DOWN${endif}", "DOWN"),
        ("${if_mounted /}UP${else}DOWN${endif}", "UP"),
        ("${if_mounted /mnt}UP${else}DOWN${endif}", "DOWN"),
        ("${if_running firefox}UP${else}DOWN${endif}", "UP"),
        ("${if_running emacs}UP${else}DOWN${endif}", "DOWN"),
        ("${if_mixer_mute}UP${else}DOWN${endif}", "UP"),
        ("${if_match ${cpu} > 40}UP${else}DOWN${endif}", "UP"),
        ("${if_match ${cpu} < 40}UP${else}DOWN${endif}", "DOWN"),
        ("${if_empty ${wireless_essid wlan0}}UP${else}DOWN${endif}", "UP"),
        ("${if_gw}UP${else}DOWN${endif}", "DOWN"),
    ];
    for (template, expected) in cases {
        assert_eq!(h.engine.parse(template), expected, "{template}");
    }
}

#[test]
fn triple_nesting_renders_all_levels() {
    let h = harness();
    let text = "${if_up eth0}L1${if_mounted /}L2${if_running firefox}L3${endif}${endif}${endif}";
    assert_eq!(h.engine.parse(text), "L1L2L3");
}

#[test]
fn nested_else_binds_to_inner_block() {
    let h = harness();
    let text = "${if_up eth0}${if_up wlan0}X${else}Y${endif}${else}Z${endif}";
    assert_eq!(h.engine.parse(text), "Y");
}

#[test]
fn execi_caches_until_interval_elapses() {
    let h = harness();
    h.exec.respond("date", "Mon\n");

    assert_eq!(h.engine.parse("${execi 60 date}"), "Mon");
    assert_eq!(h.engine.parse("${execi 60 date}"), "Mon");
    assert_eq!(h.exec.count("date"), 1);

    h.clock.advance(ChronoDuration::seconds(61));
    h.engine.parse("${execi 60 date}");
    assert_eq!(h.exec.count("date"), 2);
}

#[test]
fn execi_zero_always_runs() {
    let h = harness();
    for _ in 0..3 {
        h.engine.parse("${execi 0 uptime}");
    }
    assert_eq!(h.exec.count("uptime"), 3);
    assert_eq!(h.engine.cache_stats().exec_entries, 0);
}

#[test]
fn sweep_keeps_fresh_and_removes_stale() {
    let h = harness();
    h.engine
        .set_cleanup_config(CacheCleanupConfig::new(
            Duration::from_secs(300),
            Duration::from_secs(60),
        ))
        .unwrap();

    h.engine.parse("${execi 1000 old}");
    h.clock.advance(ChronoDuration::seconds(200));
    h.engine.parse("${execi 1000 fresh}");
    h.clock.advance(ChronoDuration::seconds(200));

    let report = h.engine.sweep();
    assert_eq!(report.exec_evicted, 1);
    assert_eq!(h.engine.cache_stats().exec_entries, 1);
    assert_eq!(h.engine.cache_stats().sweeps, 1);

    // The survivor is still served from cache.
    h.engine.parse("${execi 1000 fresh}");
    assert_eq!(h.exec.count("fresh"), 1);
}

#[test]
fn running_janitor_applies_new_max_age() {
    let snapshot = MetricSnapshot::from_yaml(SNAPSHOT).unwrap();
    let clock = Arc::new(ManualClock::new());
    let engine = Engine::builder()
        .source(Arc::new(StaticSource::new(snapshot)))
        .clock(clock.clone())
        .executor(Arc::new(RecordingExecutor::new()))
        .cleanup(CacheCleanupConfig::new(
            Duration::from_secs(300),
            Duration::from_secs(3600),
        ))
        .build()
        .unwrap();
    assert!(engine.janitor_running());

    engine.parse("${execi 1000 old}");
    clock.advance(ChronoDuration::seconds(120));
    assert_eq!(engine.cache_stats().exec_entries, 1);

    // Shrinks the interval of the pending hour-long wait and the max age.
    engine
        .set_cleanup_config(CacheCleanupConfig::new(
            Duration::from_secs(60),
            Duration::from_millis(10),
        ))
        .unwrap();

    let deadline = std::time::Instant::now() + Duration::from_secs(2);
    while engine.cache_stats().exec_entries > 0 && std::time::Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(5));
    }

    let stats = engine.cache_stats();
    assert_eq!(stats.exec_entries, 0);
    assert!(stats.sweeps > 0);
    assert!(engine.stop_janitor());
}

#[test]
fn scroll_huge_width_does_not_panic() {
    let h = harness();
    let out = h.engine.parse("${scroll 18446744073709551615 1 x}");
    assert_eq!(out.chars().count(), conkytext::cache::MAX_SCROLL_WIDTH);
}

#[test]
fn scroll_windows_have_fixed_width() {
    let h = harness();
    assert_eq!(h.engine.parse("${scroll 5 1 ABCDEFGHIJ}").chars().count(), 5);
    assert_eq!(h.engine.parse("${scroll 20 1 Hello}"), format!("{:<20}", "Hello"));
}

#[test]
fn scroll_advances_with_the_clock() {
    let h = harness();
    assert_eq!(h.engine.parse("${scroll 3 1 ABCDE}"), "ABC");
    h.clock.advance(ChronoDuration::seconds(1));
    assert_eq!(h.engine.parse("${scroll 3 1 ABCDE}"), "BCD");
    h.clock.advance(ChronoDuration::seconds(4));
    assert_eq!(h.engine.parse("${scroll 3 1 ABCDE}"), "ABC");
}

#[test]
fn templates_substitute_arguments() {
    let h = harness();
    h.engine.set_template(0, "[${fs_type \\1}]").unwrap();
    assert_eq!(h.engine.parse("${template0 /}"), "[ext4]");
    assert!(h.engine.set_template(10, "x").is_err());
}

#[test]
fn without_source_directives_pass_through() {
    let engine = Engine::builder().janitor(false).build().unwrap();
    assert_eq!(engine.parse("CPU ${cpu}%"), "CPU ${cpu}%");
    assert_eq!(engine.parse("${if_up eth0}UP${else}DOWN${endif}"), "DOWN");
    assert!(!engine.has_source());
}

#[test]
fn janitor_starts_and_stops() {
    let engine = Engine::builder().build().unwrap();
    assert!(engine.janitor_running());
    assert!(engine.stop_janitor());
    assert!(!engine.janitor_running());
    assert!(engine.start_janitor());
}
