use std::ops::Range;

use bstr::ByteSlice;
use tracing::debug;

use crate::chunking::NEWLINE;
use crate::config::{TableConfig, MAX_KEY_LEN};
use crate::error::{BrcError, Result};
use crate::parse::{parse_tenths, SEMICOLON};
use crate::table::AggregateTable;

/// Scans one line-aligned range of `buffer` into a fresh table.
pub fn scan_ascii_chunk(buffer: &[u8], range: Range<usize>, config: &TableConfig) -> Result<AggregateTable> {
    let mut measurements = AggregateTable::new(config);
    let (start, end) = (range.start, range.end);
    scan_into(&buffer[range], start, &mut measurements)?;

    debug!(start, end, keys = measurements.len(), "scanned range");
    Ok(measurements)
}

/// Folds every line of `chunk` into `measurements`. `base` is the offset of
/// `chunk` in the input and only feeds error reports.
pub fn scan_into(chunk: &[u8], base: usize, measurements: &mut AggregateTable) -> Result<()> {
    let mut line_start = 0;

    while line_start < chunk.len() {
        let line = &chunk[line_start..];
        let offset = base + line_start;

        let window = &line[..line.len().min(MAX_KEY_LEN + 1)];
        let name_end = match window.find_byteset([SEMICOLON, NEWLINE]) {
            Some(position) if line[position] == SEMICOLON => position,
            Some(_) => return Err(BrcError::MissingSeparator { offset }),
            None if window.len() > MAX_KEY_LEN => {
                return Err(match key_len(line) {
                    Some(len) => BrcError::KeyTooLong { offset, len },
                    None => BrcError::MissingSeparator { offset }
                })
            },
            None => return Err(BrcError::MissingSeparator { offset })
        };

        let key = &line[..name_end];
        let (value, consumed) = parse_tenths(&line[(name_end + 1)..])
            .ok_or(BrcError::MalformedValue { offset })?;

        measurements.find_or_create(key)?.update(value);
        line_start += name_end + 1 + consumed;
    }

    Ok(())
}

/// Length of the key on `line`, or `None` when the line has no separator.
fn key_len(line: &[u8]) -> Option<usize> {
    let line = match line.find_byte(NEWLINE) {
        Some(position) => &line[..position],
        None => line
    };
    line.find_byte(SEMICOLON)
}

#[cfg(test)]
mod tests {
    use hashbrown::HashMap;
    use rand::prelude::*;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::measurement::Measurement;

    fn scan(input: &[u8]) -> Result<AggregateTable> {
        scan_ascii_chunk(input, 0..input.len(), &TableConfig::default())
    }

    fn contents(table: &AggregateTable) -> HashMap<Vec<u8>, Measurement> {
        table.iter().map(| (key, m) | (key.to_vec(), *m)).collect()
    }

    #[test]
    fn scans_lines_into_table() {
        let table = scan(b"Hamburg;12.0\nHamburg;-3.4\nBerlin;10.5\n").unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(
            *table.get(b"Hamburg").unwrap(),
            Measurement { minimum: -34, maximum: 120, count: 2, sum: 86 }
        );
        assert_eq!(
            *table.get(b"Berlin").unwrap(),
            Measurement { minimum: 105, maximum: 105, count: 1, sum: 105 }
        );
    }

    #[test]
    fn scans_only_its_range() {
        let input = b"a;1.0\nb;2.0\nc;3.0\n";
        let table = scan_ascii_chunk(input, 6..12, &TableConfig::default()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(b"b").unwrap().sum, 20);
    }

    #[test]
    fn last_line_without_newline() {
        let table = scan(b"a;1.0\na;-2.5").unwrap();
        assert_eq!(*table.get(b"a").unwrap(), Measurement { minimum: -25, maximum: 10, count: 2, sum: -15 });
    }

    #[test]
    fn empty_range_gives_empty_table() {
        assert!(scan(b"").unwrap().is_empty());
    }

    #[test]
    fn keys_may_contain_any_other_byte() {
        let table = scan("São Paulo;25.1\nİzmir;-1.0\n;3.3\n".as_bytes()).unwrap();
        assert_eq!(table.get("São Paulo".as_bytes()).unwrap().sum, 251);
        assert_eq!(table.get("İzmir".as_bytes()).unwrap().sum, -10);
        assert_eq!(table.get(b"").unwrap().sum, 33);
    }

    #[test]
    fn reports_missing_separator() {
        let error = scan(b"a;1.0\nbroken line\nc;3.0\n").err();
        assert!(matches!(error, Some(BrcError::MissingSeparator { offset: 6 })));

        let error = scan(b"a;1.0\ntrailing").err();
        assert!(matches!(error, Some(BrcError::MissingSeparator { offset: 6 })));
    }

    #[test]
    fn reports_malformed_value() {
        let error = scan(b"a;1.0\nb;1.25\n").err();
        assert!(matches!(error, Some(BrcError::MalformedValue { offset: 6 })));

        let error = scan(b"a;\n").err();
        assert!(matches!(error, Some(BrcError::MalformedValue { offset: 0 })));
    }

    #[test]
    fn key_limit_is_inclusive() {
        let longest = [vec![b'x'; MAX_KEY_LEN], b";1.0\n".to_vec()].concat();
        assert_eq!(scan(&longest).unwrap().len(), 1);

        let too_long = [vec![b'x'; MAX_KEY_LEN + 1], b";1.0\n".to_vec()].concat();
        let error = scan(&too_long).err();
        assert!(matches!(error, Some(BrcError::KeyTooLong { offset: 0, len: 101 })));
    }

    #[test]
    fn long_line_without_separator() {
        let input = [b"a;1.0\n".to_vec(), vec![b'x'; 150], b"\n".to_vec()].concat();
        let error = scan(&input).err();
        assert!(matches!(error, Some(BrcError::MissingSeparator { offset: 6 })));

        let unterminated = [b"a;1.0\n".to_vec(), vec![b'x'; 150]].concat();
        let error = scan(&unterminated).err();
        assert!(matches!(error, Some(BrcError::MissingSeparator { offset: 6 })));
    }

    #[test]
    fn line_order_does_not_matter() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let names = ["Abha", "Accra", "Addis Ababa", "Adelaide", "Aden", "Ahvaz", "Albuquerque"];

        let mut lines: Vec<String> = (0..2_000)
            .map(| _ | {
                let name = names[rng.random_range(0..names.len())];
                let value: i32 = rng.random_range(-999..=999);
                let sign = if value < 0 { "-" } else { "" };
                format!("{name};{sign}{}.{}\n", value.abs() / 10, value.abs() % 10)
            })
            .collect();

        let expected = contents(&scan(lines.concat().as_bytes()).unwrap());
        for _ in 0..10 {
            lines.shuffle(&mut rng);
            let shuffled = contents(&scan(lines.concat().as_bytes()).unwrap());
            assert_eq!(shuffled, expected);
        }

        let mut oracle: HashMap<Vec<u8>, Measurement> = HashMap::new();
        for line in &lines {
            let (name, value) = line.trim_end().split_once(';').unwrap();
            let value: f64 = value.parse().unwrap();
            oracle
                .entry(name.as_bytes().to_vec())
                .or_default()
                .update((value * 10.0).round() as i32);
        }
        assert_eq!(oracle, expected);
    }
}
