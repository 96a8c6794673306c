use crate::{collector::CountSource, error::CollectError, report::Report};
use model::{CountMap, Outcome, Side};
use tracing::{debug, info};

/// Collects both sides in order and classifies every source table.
///
/// The target is only queried once the source collection succeeded.
pub async fn compare<S>(counts: &S) -> Result<Report, CollectError>
where
    S: CountSource + ?Sized,
{
    let source = counts.collect(Side::Source).await?;
    let target = counts.collect(Side::Target).await?;
    Ok(classify(&source, &target))
}

/// Joins two count maps on table name, walking the source side only.
pub fn classify(source: &CountMap, target: &CountMap) -> Report {
    let mut report = Report::new();

    for (table, rows) in source.iter() {
        let outcome = Outcome::classify(rows, target.get(table));
        debug!("Table {}: {}", table, outcome);
        report.push(table, outcome);
    }

    let target_only: Vec<&str> = target.tables().filter(|t| !source.contains(t)).collect();
    if !target_only.is_empty() {
        debug!(
            "{} tables exist only on target and are not reported: {}",
            target_only.len(),
            target_only.join(", ")
        );
    }

    info!(
        "Compared {} tables: {} matching, {} with errors",
        report.len(),
        report.successes().len(),
        report.errors().len()
    );
    report
}
