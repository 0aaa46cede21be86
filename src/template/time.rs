//! 时间相关的格式化：播放时间偏移的分解、时间选择符，以及 `%t{...}` 使用的日期时间模式。

use std::fmt;

use chrono::{DateTime, Datelike, TimeZone, Timelike};

/// 将秒数限制为非负有限值，负数和 NaN 都视为 0。
fn clamp_seconds(seconds: f64) -> f64 {
    if seconds.is_finite() && seconds > 0.0 {
        seconds
    } else {
        0.0
    }
}

/// 一个播放时间偏移（秒）分解后的各个分量。
///
/// 分解基于四舍五入到毫秒的总时长 `t = round(S * 1000)`，之后全部使用整数向下取整。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeParts {
    seconds: f64,
    /// 小时，不回绕。
    pub hours: u64,
    /// 分钟，0..60。
    pub minutes: u64,
    /// 秒，0..60。
    pub secs: u64,
    /// 毫秒，0..1000。
    pub millis: u64,
}

impl TimeParts {
    /// 从秒数构建。负数会被限制为 0。
    #[must_use]
    pub fn from_seconds(seconds: f64) -> Self {
        let seconds = clamp_seconds(seconds);
        let total_ms = (seconds * 1000.0 + 0.5) as u64;
        Self {
            seconds,
            hours: total_ms / 3_600_000,
            minutes: total_ms / 60_000 % 60,
            secs: total_ms % 60_000 / 1000,
            millis: total_ms % 1000,
        }
    }

    /// 四舍五入后的总毫秒数。
    #[must_use]
    pub fn total_millis(&self) -> u64 {
        ((self.hours * 60 + self.minutes) * 60 + self.secs) * 1000 + self.millis
    }

    /// 按单个选择符格式化，对应 `%a?`、`%b?`、`%w?` 中的 `?`。
    ///
    /// | 选择符 | 输出 |
    /// |---|---|
    /// | `p` | `HH:MM:SS` |
    /// | `P` | `HH:MM:SS.mmm` |
    /// | `H` `M` `S` `T` | 补零的时、分、秒、毫秒 |
    /// | `h` | 不补零的小时 |
    /// | `m` `s` | 整数总分钟数、整数总秒数 |
    /// | `f` | 原始秒数，六位小数 |
    ///
    /// 未知选择符原样输出。
    #[must_use]
    pub fn format_selector(&self, selector: char) -> String {
        match selector {
            'p' => format!("{:02}:{:02}:{:02}", self.hours, self.minutes, self.secs),
            'P' => format!(
                "{:02}:{:02}:{:02}.{:03}",
                self.hours, self.minutes, self.secs, self.millis
            ),
            'H' => format!("{:02}", self.hours),
            'M' => format!("{:02}", self.minutes),
            'S' => format!("{:02}", self.secs),
            'T' => format!("{:03}", self.millis),
            'h' => self.hours.to_string(),
            'm' => (self.seconds as u64 / 60).to_string(),
            's' => (self.seconds as u64).to_string(),
            'f' => format!("{:.6}", self.seconds),
            other => other.to_string(),
        }
    }
}

/// 将秒数格式化为 `H:MM:SS.mmm`，小时不补零。负数按 0 处理。
///
/// 用于播放列表中的时长等不经过格式字符串的场景。
#[must_use]
pub fn format_timestamp(seconds: f64) -> String {
    let parts = TimeParts::from_seconds(seconds);
    format!(
        "{}:{:02}:{:02}.{:03}",
        parts.hours, parts.minutes, parts.secs, parts.millis
    )
}

/// 按 Qt 风格的日期时间模式格式化一个时刻。
///
/// 支持的记号：`d` `dd` `ddd` `dddd`、`M` `MM` `MMM` `MMMM`、`yy` `yyyy`、
/// `h` `hh` `H` `HH`、`m` `mm`、`s` `ss`、`z` `zzz`、`AP` `A` `ap` `a`、`t`。
/// 单引号内的文本原样输出，`''` 输出一个单引号，其余字符直接复制。
/// 模式中出现上下午记号时，`h` 与 `hh` 使用 12 小时制。
///
/// `t` 使用 chrono 的 `%Z`：对 `Local` 和 `FixedOffset` 输出的是 `+08:00` 这样的数字偏移，
/// 而不是 Qt 输出的时区缩写（如 `CST`）。
#[must_use]
pub fn format_qt_datetime<Tz>(now: &DateTime<Tz>, pattern: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let chars: Vec<char> = pattern.chars().collect();
    let twelve_hour = has_am_pm_token(&chars);
    let mut output = String::with_capacity(pattern.len() * 2);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == '\'' {
            i += 1;
            if chars.get(i) == Some(&'\'') {
                output.push('\'');
                i += 1;
                continue;
            }
            while let Some(&quoted) = chars.get(i) {
                i += 1;
                if quoted != '\'' {
                    output.push(quoted);
                } else if chars.get(i) == Some(&'\'') {
                    output.push('\'');
                    i += 1;
                } else {
                    break;
                }
            }
            continue;
        }

        let run = chars[i..].iter().take_while(|&&x| x == c).count();
        let consumed = match c {
            'd' => match run.min(4) {
                1 => push_num(&mut output, now.day(), 1),
                2 => push_num(&mut output, now.day(), 2),
                3 => push_str(&mut output, &now.format("%a").to_string(), 3),
                _ => push_str(&mut output, &now.format("%A").to_string(), 4),
            },
            'M' => match run.min(4) {
                1 => push_num(&mut output, now.month(), 1),
                2 => push_num(&mut output, now.month(), 2),
                3 => push_str(&mut output, &now.format("%b").to_string(), 3),
                _ => push_str(&mut output, &now.format("%B").to_string(), 4),
            },
            'y' if run >= 4 => {
                output.push_str(&format!("{:04}", now.year()));
                4
            }
            'y' if run >= 2 => push_num(&mut output, now.year().rem_euclid(100), 2),
            'h' => {
                let hour = if twelve_hour {
                    now.hour12().1
                } else {
                    now.hour()
                };
                push_num(&mut output, hour, run.min(2))
            }
            'H' => push_num(&mut output, now.hour(), run.min(2)),
            'm' => push_num(&mut output, now.minute(), run.min(2)),
            's' => push_num(&mut output, now.second(), run.min(2)),
            'z' => {
                let millis = now.timestamp_subsec_millis().min(999);
                if run >= 3 {
                    output.push_str(&format!("{millis:03}"));
                    3
                } else {
                    push_num(&mut output, millis, 1)
                }
            }
            'A' | 'a' => {
                let is_pm = now.hour12().0;
                let marker = match (c == 'A', is_pm) {
                    (true, false) => "AM",
                    (true, true) => "PM",
                    (false, false) => "am",
                    (false, true) => "pm",
                };
                output.push_str(marker);
                if matches!(chars.get(i + 1), Some('P' | 'p')) {
                    2
                } else {
                    1
                }
            }
            't' => push_str(&mut output, &now.format("%Z").to_string(), 1),
            _ => {
                output.push(c);
                1
            }
        };
        i += consumed;
    }

    output
}

/// 写入一个数字，`width` 为 2 时补零到两位。返回消耗的模式字符数。
fn push_num(output: &mut String, value: impl Into<i64>, width: usize) -> usize {
    let value = value.into();
    if width >= 2 {
        output.push_str(&format!("{value:02}"));
    } else {
        output.push_str(&value.to_string());
    }
    width
}

fn push_str(output: &mut String, text: &str, consumed: usize) -> usize {
    output.push_str(text);
    consumed
}

/// 引号之外是否出现了上下午记号。
fn has_am_pm_token(chars: &[char]) -> bool {
    let mut quoted = false;
    for &c in chars {
        match c {
            '\'' => quoted = !quoted,
            'a' | 'A' if !quoted => return true,
            _ => {}
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn fixed_time(hour: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(8 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 3, 9, hour, 5, 7)
            .single()
            .unwrap()
    }

    #[test]
    fn test_decomposition_rounds_to_millis() {
        let parts = TimeParts::from_seconds(3725.0046);
        assert_eq!(
            (parts.hours, parts.minutes, parts.secs, parts.millis),
            (1, 2, 5, 5)
        );
        assert_eq!(parts.total_millis(), 3_725_005);
    }

    #[test]
    fn test_negative_time_is_clamped() {
        let parts = TimeParts::from_seconds(-12.5);
        assert_eq!(parts.total_millis(), 0);
        assert_eq!(parts.format_selector('P'), "00:00:00.000");
        assert_eq!(parts.format_selector('f'), "0.000000");
        assert_eq!(TimeParts::from_seconds(f64::NAN).total_millis(), 0);
    }

    #[test]
    fn test_selectors() {
        let parts = TimeParts::from_seconds(3725.5);
        assert_eq!(parts.format_selector('p'), "01:02:05");
        assert_eq!(parts.format_selector('P'), "01:02:05.500");
        assert_eq!(parts.format_selector('H'), "01");
        assert_eq!(parts.format_selector('M'), "02");
        assert_eq!(parts.format_selector('S'), "05");
        assert_eq!(parts.format_selector('T'), "500");
        assert_eq!(parts.format_selector('h'), "1");
        assert_eq!(parts.format_selector('m'), "62");
        assert_eq!(parts.format_selector('s'), "3725");
        assert_eq!(parts.format_selector('f'), "3725.500000");
        assert_eq!(parts.format_selector('x'), "x");
    }

    #[test]
    fn test_precise_selector_reconstructs_total() {
        for seconds in [0.0, 0.0004, 0.0005, 59.9995, 65.4, 3599.999, 86400.123] {
            let parts = TimeParts::from_seconds(seconds);
            let text = parts.format_selector('P');
            let (hms, ms) = text.split_once('.').unwrap();
            let fields: Vec<u64> = hms.split(':').map(|f| f.parse().unwrap()).collect();
            let total =
                ((fields[0] * 60 + fields[1]) * 60 + fields[2]) * 1000 + ms.parse::<u64>().unwrap();
            assert_eq!(total, (seconds * 1000.0 + 0.5) as u64, "秒数 {seconds}");
        }
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(3725.0042), "1:02:05.004");
        assert_eq!(format_timestamp(5.0), "0:00:05.000");
        assert_eq!(format_timestamp(-1.0), "0:00:00.000");
    }

    #[test]
    fn test_qt_datetime_numeric_tokens() {
        let now = fixed_time(14);
        assert_eq!(
            format_qt_datetime(&now, "yyyy-MM-dd HH:mm:ss"),
            "2024-03-09 14:05:07"
        );
        assert_eq!(format_qt_datetime(&now, "d/M/yy h:m:s"), "9/3/24 14:5:7");
        assert_eq!(format_qt_datetime(&now, "zzz z"), "000 0");
    }

    #[test]
    fn test_qt_datetime_names_and_am_pm() {
        let now = fixed_time(14);
        assert_eq!(format_qt_datetime(&now, "ddd dddd"), "Sat Saturday");
        assert_eq!(format_qt_datetime(&now, "MMM MMMM"), "Mar March");
        assert_eq!(format_qt_datetime(&now, "hh:mm AP"), "02:05 PM");
        assert_eq!(format_qt_datetime(&now, "h ap"), "2 pm");
        assert_eq!(format_qt_datetime(&fixed_time(9), "h a"), "9 am");
    }

    #[test]
    fn test_qt_datetime_zone_is_numeric_offset() {
        assert_eq!(format_qt_datetime(&fixed_time(14), "HH:mm t"), "14:05 +08:00");
    }

    #[test]
    fn test_qt_datetime_quotes_and_literals() {
        let now = fixed_time(14);
        assert_eq!(format_qt_datetime(&now, "'at' HH"), "at 14");
        assert_eq!(format_qt_datetime(&now, "HH''mm"), "14'05");
        assert_eq!(format_qt_datetime(&now, "'it''s' y"), "it's y");
        assert_eq!(format_qt_datetime(&now, "'am' HH"), "am 14", "引号内的上下午不影响小时制");
    }
}
