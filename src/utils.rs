/// Signed distance from `old` to `new` in 32-bit serial number space (RFC 1982).
pub fn seq_nr_offset(new: u32, old: u32) -> i64 {
    new.wrapping_sub(old) as i32 as i64
}

/// Converts a byte count into (fractional) segments. Returns None if the segment size is 0.
pub fn bytes_to_segments(bytes: u32, segment_size: u32) -> Option<f64> {
    if segment_size == 0 {
        return None;
    }
    Some(bytes as f64 / segment_size as f64)
}

/// Converts a window in segments back to bytes, saturating at u32::MAX.
pub fn segments_to_bytes(segments: f64, segment_size: u32) -> u32 {
    let bytes = segments * segment_size as f64;
    if bytes >= u32::MAX as f64 {
        u32::MAX
    } else if bytes <= 0. {
        0
    } else {
        bytes as u32
    }
}

#[inline(always)]
pub fn run_before_and_after_if_changed<
    'a,
    Object: 'a,
    Value: PartialEq + Copy + std::fmt::Debug + 'static,
    ChangeResult,
>(
    obj: &mut Object,
    calc: impl Fn(&Object) -> Value,
    maybe_change: impl FnOnce(&mut Object) -> ChangeResult,
    callback: impl FnOnce(&Object, &Value, &Value),
) -> ChangeResult {
    let before = calc(obj);
    let result = maybe_change(obj);
    let after = calc(obj);
    if before != after {
        callback(obj, &before, &after);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::{bytes_to_segments, segments_to_bytes, seq_nr_offset};

    #[test]
    fn test_seq_nr_offset() {
        // no wraps
        assert_eq!(seq_nr_offset(2, 1), 1);
        assert_eq!(seq_nr_offset(1, 1), 0);
        assert_eq!(seq_nr_offset(0, 1), -1);

        // new wrapped
        assert_eq!(seq_nr_offset(0, u32::MAX), 1);
        assert_eq!(seq_nr_offset(1023, u32::MAX), 1024);

        // old wrapped
        assert_eq!(seq_nr_offset(u32::MAX, 0), -1);
        assert_eq!(seq_nr_offset(u32::MAX, 1023), -1024);

        // half the space apart is the limit
        assert_eq!(seq_nr_offset(1 << 31, 0), -(1i64 << 31));
        assert_eq!(seq_nr_offset((1 << 31) - 1, 0), (1i64 << 31) - 1);
    }

    #[test]
    fn test_segment_conversions() {
        assert_eq!(bytes_to_segments(3000, 1500), Some(2.));
        assert_eq!(bytes_to_segments(3000, 0), None);
        assert_eq!(segments_to_bytes(2.5, 1000), 2500);
        assert_eq!(segments_to_bytes(1e12, 1500), u32::MAX);
        assert_eq!(segments_to_bytes(-1., 1500), 0);
    }
}
