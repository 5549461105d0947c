//! Text rendering of comparison reports

use std::io::{self, Write};

use vagueness_analysis::{
    comparison::ComparisonReport,
    outcome::Outcome,
    table::{P_VALUE_DECIMALS, PosthocTable},
};

const CELL_WIDTH: usize = 12;

/// Write a full comparison report
///
/// # Arguments
/// * `out` - Destination of the text
/// * `report` - Report to render
/// * `tooltips` - Whether to list the mean-rank tooltip of every cell
pub(super) fn write_report<W>(
    out: &mut W,
    report: &ComparisonReport,
    tooltips: bool,
) -> io::Result<()>
where
    W: Write,
{
    let query = &report.query;
    writeln!(out, "{}", report.header)?;
    writeln!(out, "{}", "=".repeat(report.header.len()))?;
    writeln!(out)?;
    writeln!(out, "  {:<12} : {}", "Metric", query.metric.label())?;
    writeln!(out, "  {:<12} : {}", "Grouped by", query.group_by)?;
    writeln!(out, "  {:<12} : {}", "Total N", report.total)?;
    writeln!(out)?;

    writeln!(out, "Normality (Shapiro-Wilk)")?;
    write_outcome(out, &report.normality, |sw| {
        format!(
            "W = {:.4}, p = {:.5}, n = {}",
            sw.statistic, sw.p_value, sw.observations
        )
    })?;
    writeln!(out)?;

    writeln!(out, "Omnibus (Kruskal-Wallis)")?;
    write_outcome(out, &report.omnibus, |kw| {
        format!(
            "H = {:.4}, p = {:.5}, groups = {}, n = {}",
            kw.statistic, kw.p_value, kw.groups, kw.observations
        )
    })?;
    writeln!(out)?;

    writeln!(out, "Post-hoc p-values")?;
    match &report.posthoc {
        Outcome::Value(table) => {
            write_table(out, table)?;
            writeln!(out)?;
            write_legend(out)?;
            if tooltips {
                writeln!(out)?;
                write_tooltips(out, table)?;
            }
        }
        Outcome::Error(error) => writeln!(out, "  not computed: {error}")?,
    }
    Ok(())
}

fn write_outcome<W, T, F>(out: &mut W, outcome: &Outcome<T>, describe: F) -> io::Result<()>
where
    W: Write,
    F: FnOnce(&T) -> String,
{
    match outcome {
        Outcome::Value(value) => writeln!(out, "  {}", describe(value)),
        Outcome::Error(error) => writeln!(out, "  not computed: {error}"),
    }
}

fn label_width(table: &PosthocTable) -> usize {
    table
        .columns
        .iter()
        .map(String::len)
        .max()
        .unwrap_or_default()
}

fn write_table<W>(out: &mut W, table: &PosthocTable) -> io::Result<()>
where
    W: Write,
{
    let width = label_width(table);
    let Some((label_column, groups)) = table.columns.split_first() else {
        return Ok(());
    };

    write!(out, "  {label_column:<width$}")?;
    for group in groups {
        write!(out, " {group:>CELL_WIDTH$}")?;
    }
    writeln!(out)?;
    writeln!(
        out,
        "  {}",
        "-".repeat(width + groups.len() * (CELL_WIDTH + 1))
    )?;

    let decimals = P_VALUE_DECIMALS.unsigned_abs() as usize;
    for row in &table.rows {
        write!(out, "  {:<width$}", row.label)?;
        for cell in &row.cells {
            let text = format!(
                "{:.decimals$}{}",
                cell.p_value,
                cell.significance.marker()
            );
            write!(out, " {text:>CELL_WIDTH$}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn write_legend<W>(out: &mut W) -> io::Result<()>
where
    W: Write,
{
    writeln!(out, "Legend:")?;
    writeln!(out, "  *   : p < 0.05")?;
    writeln!(out, "  **  : p < 0.01")?;
    writeln!(out, "  *** : p < 0.001")
}

fn write_tooltips<W>(out: &mut W, table: &PosthocTable) -> io::Result<()>
where
    W: Write,
{
    writeln!(out, "Mean ranks")?;
    for row in &table.rows {
        for tooltip in &row.tooltips {
            writeln!(out, "  {tooltip}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use vagueness_analysis::{comparison::compare, query::ComparisonQuery};
    use vagueness_data::{dataset::Dataset, filter::FilterCriteria};

    use super::*;

    fn render(json: &str, tooltips: bool) -> String {
        let dataset = Dataset::from_json_str(json).unwrap();
        let selection = dataset.filter(&FilterCriteria::all(&dataset));
        let report = compare(&selection, &ComparisonQuery::default());
        let mut buf = Vec::new();
        write_report(&mut buf, &report, tooltips).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn record(country: &str, value: f64) -> String {
        format!(
            r#"{{"genre": "Tools", "hostingLocation": "{country}", "maxInstalls": 10,
                "amountOfInstallsGrouped": "10+", "isNativelyEnglish": true,
                "vagueTotalPercentage": {value}}}"#
        )
    }

    #[test]
    fn test_report_with_table() {
        let rows = [
            record("DE", 1.0),
            record("DE", 2.0),
            record("DE", 3.0),
            record("US", 4.0),
            record("US", 5.0),
            record("US", 6.0),
        ];
        let text = render(&format!("[{}]", rows.join(",")), true);

        assert!(text.starts_with(
            "Kruskal Wallis Post-Hoc Dunn-Test using Bonferroni for adjusting p values\n"
        ));
        assert!(text.contains("Percentage occurrence of Vague Terms"));
        assert!(text.contains("Total N      : 6"));
        assert!(text.contains("W = "));
        assert!(text.contains("groups = 2, n = 6"));
        assert!(text.contains("1.00000"));
        assert!(text.contains("Legend:"));
        assert!(text.contains("DE with mean rank: 2.0 vs US with mean rank: 5.0. Total N = 6"));
    }

    #[test]
    fn test_report_with_errors() {
        let text = render(&format!("[{}]", record("DE", 1.0)), false);
        assert!(text.contains("not computed: "));
        assert!(!text.contains("Legend:"));
        assert!(!text.contains("Mean ranks"));
    }
}
