//! Byte-size formatting.

const KIB: u64 = 1024;
const MIB: u64 = KIB * 1024;
const GIB: u64 = MIB * 1024;
const TIB: u64 = GIB * 1024;

/// Format a byte count with a binary suffix.
///
/// Values below 1 KiB render as a bare integer with `B`; larger values
/// use one decimal place against the largest threshold not exceeding them.
/// TiB is the top of the ladder.
///
/// # Example
///
/// ```
/// use conkytext::format::format_bytes;
///
/// assert_eq!(format_bytes(0), "0B");
/// assert_eq!(format_bytes(512), "512B");
/// assert_eq!(format_bytes(8 * 1024 * 1024 * 1024), "8.0GiB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    if bytes >= TIB {
        format!("{:.1}TiB", bytes as f64 / TIB as f64)
    } else if bytes >= GIB {
        format!("{:.1}GiB", bytes as f64 / GIB as f64)
    } else if bytes >= MIB {
        format!("{:.1}MiB", bytes as f64 / MIB as f64)
    } else if bytes >= KIB {
        format!("{:.1}KiB", bytes as f64 / KIB as f64)
    } else {
        format!("{bytes}B")
    }
}

/// Format a byte count as KiB with one decimal place and no suffix.
///
/// Used by the `*speedf` directives.
pub fn format_kib(bytes: u64) -> String {
    format!("{:.1}", bytes as f64 / KIB as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mantissa(s: &str) -> (f64, &str) {
        let split = s
            .find(|c: char| c.is_ascii_alphabetic())
            .expect("suffix present");
        (s[..split].parse().unwrap(), &s[split..])
    }

    #[test]
    fn zero_is_bare_bytes() {
        assert_eq!(format_bytes(0), "0B");
    }

    #[test]
    fn below_kib_is_bare_bytes() {
        assert_eq!(format_bytes(1023), "1023B");
    }

    #[test]
    fn thresholds_pick_largest_suffix() {
        assert_eq!(format_bytes(1024), "1.0KiB");
        assert_eq!(format_bytes(1536), "1.5KiB");
        assert_eq!(format_bytes(MIB), "1.0MiB");
        assert_eq!(format_bytes(16 * GIB), "16.0GiB");
        assert_eq!(format_bytes(3 * TIB / 2), "1.5TiB");
    }

    #[test]
    fn tib_is_the_top_of_the_ladder() {
        assert_eq!(format_bytes(2048 * TIB), "2048.0TiB");
    }

    #[test]
    fn mantissa_recovers_value_within_precision() {
        for bytes in [1u64, 999, 1024, 5_000, 1_234_567, 9_876_543_210, 3 * TIB + 17] {
            let formatted = format_bytes(bytes);
            let (value, suffix) = mantissa(&formatted);
            let unit = match suffix {
                "B" => 1,
                "KiB" => KIB,
                "MiB" => MIB,
                "GiB" => GIB,
                "TiB" => TIB,
                other => panic!("unexpected suffix {other}"),
            };
            let recovered = value * unit as f64;
            assert!(
                (recovered - bytes as f64).abs() <= 0.05 * unit as f64,
                "{bytes} -> {formatted}"
            );
        }
    }

    #[test]
    fn kib_float_format() {
        assert_eq!(format_kib(0), "0.0");
        assert_eq!(format_kib(1536), "1.5");
    }
}
