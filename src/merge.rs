use crate::config::TableConfig;
use crate::error::Result;
use crate::table::AggregateTable;

/// Folds every worker table into one fresh global table.
pub fn merge<I>(parts: I, config: &TableConfig) -> Result<AggregateTable>
where
    I: IntoIterator<Item = AggregateTable>,
{
    parts
        .into_iter()
        .try_fold(
            AggregateTable::new(config),
            | mut global, part | -> Result<AggregateTable> { merge_into(&mut global, &part)?; Ok(global) }
        )
}

pub fn merge_into(global: &mut AggregateTable, part: &AggregateTable) -> Result<()> {
    for (key, measurement) in part.iter() {
        global.find_or_create(key)?.merge(measurement);
    }
    Ok(())
}
