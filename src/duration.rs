//! Human-readable run durations (`1m 35.5s`, `850ms`).

const MS_PER_SECOND: u64 = 1_000;
const MS_PER_MINUTE: u64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: u64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: u64 = 24 * MS_PER_HOUR;

pub fn pretty_ms(ms: i64) -> String {
    let sign = if ms < 0 { "-" } else { "" };
    let mut rest = ms.unsigned_abs();

    if rest < MS_PER_SECOND {
        return format!("{sign}{rest}ms");
    }

    let mut parts = Vec::new();
    for (unit_ms, suffix) in [(MS_PER_DAY, "d"), (MS_PER_HOUR, "h"), (MS_PER_MINUTE, "m")] {
        let count = rest / unit_ms;
        if count > 0 {
            parts.push(format!("{count}{suffix}"));
        }
        rest %= unit_ms;
    }

    let tenths = rest / 100;
    if tenths > 0 {
        let (whole, fraction) = (tenths / 10, tenths % 10);
        if fraction == 0 {
            parts.push(format!("{whole}s"));
        } else {
            parts.push(format!("{whole}.{fraction}s"));
        }
    }

    format!("{sign}{}", parts.join(" "))
}
