//! Sector grid naming.
//!
//! The map is split into square sectors of [`SECTOR_SIZE`] units. A sector
//! name is a row part followed by a column number; `F5` is the sector whose
//! top-left corner is the origin.
//!
//! Rows:
//! - `A`..`Z` cover rows 0..=25 (`F` is row 5, at y = 0),
//! - two uppercase letters (`AA`, `AB`, ...) continue downwards past `Z`,
//! - two lowercase letters (`zz`, `zy`, ...) continue upwards above `A`.
//!
//! Columns are plain integers, `5` at x = 0; they may be negative.

/// Edge length of one sector in world units.
pub const SECTOR_SIZE: f32 = 20000.0;

const SECTOR: i64 = 20000;

/// Lowest and highest row index [`sector_name`] can spell.
const MIN_ROW: i64 = -26 * 26;
const MAX_ROW: i64 = 26 + 26 * 26 - 1;

/// Converts a sector name to the world position of its top-left corner.
///
/// Never fails: labels shorter than two characters or without a parsable
/// column yield `(0, 0)`.
pub fn sector_to_xy(label: &str) -> (f32, f32) {
    let chars: Vec<char> = label.chars().collect();
    if chars.len() < 2 {
        return (0.0, 0.0);
    }

    let (row, digits_start) = if chars[0].is_ascii_alphabetic() && chars[1].is_ascii_alphabetic() {
        let a1 = chars[0] as i64;
        if chars[0].is_ascii_lowercase() {
            let a2 = chars[1].to_ascii_lowercase() as i64;
            (-((('z' as i64 - a1) * 26) + ('z' as i64 - a2) + 6), 2)
        } else {
            let a2 = chars[1].to_ascii_uppercase() as i64;
            (((a1 - 'A' as i64) * 26) + (a2 - 'A' as i64) + 21, 2)
        }
    } else {
        (chars[0].to_ascii_uppercase() as i64 - 'F' as i64, 1)
    };

    let digits: String = chars[digits_start..].iter().collect();
    let Some(column) = parse_int_prefix(&digits) else {
        return (0.0, 0.0);
    };

    let x = (column - 5) * SECTOR;
    let y = row * SECTOR;
    (x as f32, y as f32)
}

/// Names the sector containing the world position `(x, y)`.
///
/// Rows beyond what two letters can spell are clamped to the outermost row.
pub fn sector_name(x: f32, y: f32) -> String {
    let row = ((y / SECTOR_SIZE).floor() as i64)
        .saturating_add(5)
        .clamp(MIN_ROW, MAX_ROW);
    let column = ((x / SECTOR_SIZE).floor() as i64).saturating_add(5);

    let mut name = String::new();
    if row < 0 {
        let n = -row - 1;
        name.push(offset_char('z', -(n / 26)));
        name.push(offset_char('z', -(n % 26)));
    } else if row < 26 {
        name.push(offset_char('A', row));
    } else {
        let m = row - 26;
        name.push(offset_char('A', m / 26));
        name.push(offset_char('A', m % 26));
    }
    name.push_str(&column.to_string());
    name
}

fn offset_char(base: char, offset: i64) -> char {
    u32::try_from(base as i64 + offset)
        .ok()
        .and_then(char::from_u32)
        .unwrap_or(base)
}

/// Parses a leading decimal integer: optional whitespace, optional sign, at
/// least one digit. Trailing characters are ignored. Values outside the
/// `i32` range are rejected.
fn parse_int_prefix(text: &str) -> Option<i64> {
    let rest = text.trim_start_matches([' ', '\t', '\n', '\r', '\x0b', '\x0c']);
    let (negative, rest) = match rest.as_bytes().first() {
        Some(b'-') => (true, &rest[1..]),
        Some(b'+') => (false, &rest[1..]),
        _ => (false, rest),
    };

    let mut value: i64 = 0;
    let mut digits = 0;
    for byte in rest.bytes().take_while(u8::is_ascii_digit) {
        value = value * 10 + i64::from(byte - b'0');
        if value > i64::from(i32::MAX) + 1 {
            return None;
        }
        digits += 1;
    }
    if digits == 0 {
        return None;
    }

    let value = if negative { -value } else { value };
    i32::try_from(value).ok().map(i64::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_sectors() {
        assert_eq!(sector_to_xy("F5"), (0.0, 0.0));
        assert_eq!(sector_to_xy("A0"), (-100000.0, -100000.0));
        assert_eq!(sector_to_xy("zz-23"), (-560000.0, -120000.0));
        assert_eq!(sector_to_xy("BA12"), (140000.0, 940000.0));
    }

    #[test]
    fn test_single_letter_row_is_case_insensitive() {
        assert_eq!(sector_to_xy("f5"), sector_to_xy("F5"));
        assert_eq!(sector_to_xy("g7"), (40000.0, 20000.0));
    }

    #[test]
    fn test_two_letter_second_char_follows_first_case() {
        assert_eq!(sector_to_xy("zZ1"), sector_to_xy("zz1"));
        assert_eq!(sector_to_xy("Ba12"), sector_to_xy("BA12"));
    }

    #[test]
    fn test_short_or_unparsable_labels_fall_back_to_origin() {
        for label in ["", "F", "Fx", "zz", "AB", "F-", "F+", "Z "] {
            assert_eq!(sector_to_xy(label), (0.0, 0.0), "label {label:?}");
        }
    }

    #[test]
    fn test_column_is_prefix_parsed() {
        assert_eq!(sector_to_xy("F7abc"), (40000.0, 0.0));
        assert_eq!(sector_to_xy("F 7"), (40000.0, 0.0));
        assert_eq!(sector_to_xy("F+6"), (20000.0, 0.0));
    }

    #[test]
    fn test_overflowing_column_falls_back_to_origin() {
        assert_eq!(sector_to_xy("F99999999999999999999"), (0.0, 0.0));
        assert_eq!(sector_to_xy("F2147483648"), (0.0, 0.0));
    }

    #[test]
    fn test_unusual_characters_do_not_panic() {
        let _ = sector_to_xy("é5");
        let _ = sector_to_xy("日本12");
        let _ = sector_to_xy("5F");
        let _ = sector_to_xy("\u{0}\u{0}");
        let _ = sector_to_xy("F\u{1F680}");
    }

    #[test]
    fn test_sector_name_basic() {
        assert_eq!(sector_name(0.0, 0.0), "F5");
        assert_eq!(sector_name(19999.0, 19999.0), "F5");
        assert_eq!(sector_name(-1.0, -1.0), "E4");
        assert_eq!(sector_name(-100000.0, -100000.0), "A0");
        assert_eq!(sector_name(140000.0, 940000.0), "BA12");
        assert_eq!(sector_name(-560000.0, -120000.0), "zz-23");
    }

    #[test]
    fn test_sector_name_round_trips_to_top_left_corner() {
        let points = [
            (0.0, 0.0),
            (12345.0, -54321.0),
            (-250000.0, 600000.0),
            (999999.0, -999999.0),
            (-1.0, 420000.0),
        ];
        for (x, y) in points {
            let (cx, cy) = sector_to_xy(&sector_name(x, y));
            assert_eq!(cx, (x / SECTOR_SIZE).floor() * SECTOR_SIZE, "x of {x},{y}");
            assert_eq!(cy, (y / SECTOR_SIZE).floor() * SECTOR_SIZE, "y of {x},{y}");
        }
    }

    #[test]
    fn test_sector_name_handles_extremes() {
        let _ = sector_name(f32::MAX, f32::MIN);
        let _ = sector_name(f32::NAN, f32::INFINITY);
    }
}
