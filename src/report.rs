use std::io::Write;

use crate::measurement::Measurement;
use crate::table::AggregateTable;

/// Entries of `table` in byte-lexicographic key order.
pub fn sorted_entries(table: &AggregateTable) -> Vec<(&[u8], &Measurement)> {
    let mut entries: Vec<(&[u8], &Measurement)> = table.iter().collect();
    entries.sort_unstable_by_key(| item | item.0);
    entries
}

/// Writes `{key=min/mean/max, ...}` and a newline.
pub fn write_output<W: Write>(table: &AggregateTable, out: &mut W) -> std::io::Result<()> {
    let mut entries = sorted_entries(table).into_iter();

    write!(out, "{{")?;
    if let Some((first_key, first_entry)) = entries.next() {
        out.write_all(first_key)?;
        write!(out, "={first_entry}")?;
    }
    for (key, measurement) in entries {
        write!(out, ", ")?;
        out.write_all(key)?;
        write!(out, "={measurement}")?;
    }
    writeln!(out, "}}")?;
    Ok(())
}
