//! Binary parsing of day-file buffers.

use byteorder::{ByteOrder, LittleEndian};
use chancay_types::Bar;

use crate::RawDayRecord;

/// Parses raw records from a day-file buffer.
///
/// The buffer is consumed as consecutive 32-byte records in the order
/// they appear (source files are already chronologically ordered; no
/// sorting happens here). Trailing bytes that do not form a complete
/// record are silently discarded, and a buffer shorter than one record
/// yields an empty iterator.
pub fn parse_records(data: &[u8]) -> impl Iterator<Item = RawDayRecord> + '_ {
    data.chunks_exact(RawDayRecord::SIZE).map(parse_single_record)
}

/// Parses a single record from a 32-byte chunk.
#[inline]
fn parse_single_record(data: &[u8]) -> RawDayRecord {
    RawDayRecord::new(
        LittleEndian::read_u32(&data[0..4]),
        LittleEndian::read_u32(&data[4..8]),
        LittleEndian::read_u32(&data[8..12]),
        LittleEndian::read_u32(&data[12..16]),
        LittleEndian::read_u32(&data[16..20]),
        LittleEndian::read_f32(&data[20..24]),
        LittleEndian::read_u32(&data[24..28]),
    )
}

/// Returns the number of complete records in a buffer of the given length.
#[must_use]
pub const fn record_count(data_len: usize) -> usize {
    data_len / RawDayRecord::SIZE
}

/// Decodes a whole day file into bars for the given symbol.
///
/// Records with implausible dates are dropped individually; the buffer
/// as a whole never fails. Output preserves buffer order.
#[must_use]
pub fn decode_day_file(symbol: &str, data: &[u8]) -> Vec<Bar> {
    parse_records(data)
        .filter_map(|record| record.normalize(symbol))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn record_bytes(
        date: u32,
        open: u32,
        high: u32,
        low: u32,
        close: u32,
        turnover: f32,
        volume: u32,
    ) -> Vec<u8> {
        let mut bytes = vec![0u8; 32];
        LittleEndian::write_u32(&mut bytes[0..4], date);
        LittleEndian::write_u32(&mut bytes[4..8], open);
        LittleEndian::write_u32(&mut bytes[8..12], high);
        LittleEndian::write_u32(&mut bytes[12..16], low);
        LittleEndian::write_u32(&mut bytes[16..20], close);
        LittleEndian::write_f32(&mut bytes[20..24], turnover);
        LittleEndian::write_u32(&mut bytes[24..28], volume);
        // bytes 28..32 are the reserved field, left zero
        bytes
    }

    #[test]
    fn test_parse_single_record() {
        let bytes = record_bytes(20_230_105, 730, 745, 725, 740, 1.83e8, 25_000_000);
        let records: Vec<_> = parse_records(&bytes).collect();

        assert_eq!(records.len(), 1);
        let r = records[0];
        assert_eq!(r.date_raw, 20_230_105);
        assert_eq!(r.open_raw, 730);
        assert_eq!(r.close_raw, 740);
        assert_eq!(r.volume, 25_000_000);
        assert_relative_eq!(r.turnover, 1.83e8, max_relative = 1e-6);
    }

    #[test]
    fn test_round_trip_decode() {
        let mut data = record_bytes(20_230_105, 730, 745, 725, 740, 1.83e8, 25_000_000);
        data.extend(record_bytes(20_230_106, 740, 752, 738, 750, 2.01e8, 28_000_000));

        let bars = decode_day_file("600000.SS", &data);
        assert_eq!(bars.len(), 2);

        assert_eq!(bars[0].date.to_string(), "2023-01-05");
        assert_relative_eq!(bars[0].open, 7.30, epsilon = 1e-9);
        assert_relative_eq!(bars[0].close, 7.40, epsilon = 1e-9);

        assert_eq!(bars[1].date.to_string(), "2023-01-06");
        assert_relative_eq!(bars[1].high, 7.52, epsilon = 1e-9);
        assert_eq!(bars[1].volume, 28_000_000);
    }

    #[test]
    fn test_corrupt_tail_discarded() {
        let mut data = Vec::new();
        for day in 5..8 {
            data.extend(record_bytes(20_230_100 + day, 730, 745, 725, 740, 1.0e8, 1_000_000));
        }
        data.extend(vec![0xAB; 10]); // trailing garbage, less than one record

        assert_eq!(record_count(data.len()), 3);
        let bars = decode_day_file("600000.SS", &data);
        assert_eq!(bars.len(), 3);
    }

    #[test]
    fn test_short_buffer_is_empty() {
        let data = vec![0u8; RawDayRecord::SIZE - 1];
        assert!(decode_day_file("600000.SS", &data).is_empty());
        assert!(decode_day_file("600000.SS", &[]).is_empty());
    }

    #[test]
    fn test_invalid_date_record_dropped() {
        let mut data = record_bytes(20_230_105, 730, 745, 725, 740, 1.0e8, 1_000_000);
        data.extend(record_bytes(0, 730, 745, 725, 740, 1.0e8, 1_000_000));
        data.extend(record_bytes(20_230_106, 740, 752, 738, 750, 1.0e8, 1_000_000));

        let bars = decode_day_file("600000.SS", &data);
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].date.to_string(), "2023-01-05");
        assert_eq!(bars[1].date.to_string(), "2023-01-06");
    }

    #[test]
    fn test_buffer_order_preserved() {
        // Decoder does not sort; out-of-order buffers stay out of order.
        let mut data = record_bytes(20_230_110, 1, 1, 1, 1, 0.0, 0);
        data.extend(record_bytes(20_230_105, 1, 1, 1, 1, 0.0, 0));

        let bars = decode_day_file("600000.SS", &data);
        assert_eq!(bars[0].date.to_string(), "2023-01-10");
        assert_eq!(bars[1].date.to_string(), "2023-01-05");
    }
}
