//! Zone-code formatting.

/// Formats a zone code as text, left-padding with `'0'` to `width`.
///
/// The code is stringified first and then padded, so a negative code keeps
/// its sign in place and receives zeros in front of it. Codes already wider
/// than `width` are returned unchanged. `None` disables padding.
///
/// ```
/// use gridzone_zonal::format_zone_code;
///
/// assert_eq!(format_zone_code(7, Some(3)), "007");
/// assert_eq!(format_zone_code(1234, Some(3)), "1234");
/// assert_eq!(format_zone_code(7, None), "7");
/// ```
pub fn format_zone_code(zone: i64, width: Option<usize>) -> String {
    let text = zone.to_string();
    match width {
        Some(width) => format!("{text:0>width$}"),
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_to_width() {
        assert_eq!(format_zone_code(1, Some(2)), "01");
        assert_eq!(format_zone_code(42, Some(10)), "0000000042");
    }

    #[test]
    fn zero_width_is_plain() {
        assert_eq!(format_zone_code(5, Some(0)), "5");
    }

    #[test]
    fn negative_codes_pad_in_front_of_sign() {
        assert_eq!(format_zone_code(-9999, Some(10)), "00000-9999");
        assert_eq!(format_zone_code(-9999, Some(2)), "-9999");
    }
}
