//! Chart Renderer
//!
//! Turns a selection of site ids into a time-series line chart for one
//! variable. Pure: the same inputs always give the same figure.

use std::collections::HashMap;

use super::figure::{
    palette_color, Axis, ChartSpec, Layout, LayoutMeta, Legend, LineStyle, LineTrace, Text,
    Trace, DATETIME_FORMAT,
};
use super::selection::Selection;
use crate::readings::{Reading, ReadingStore, VariableKind};

/// Render the line chart for `kind` over the selected sites.
///
/// One line per site, in order of first appearance in the file. The y-axis
/// unit comes from the first matching row; an empty result gives a chart
/// with no lines and a blank unit.
pub fn render(
    store: &ReadingStore,
    selection: &Selection,
    kind: &VariableKind,
    height: u32,
) -> ChartSpec {
    let ids = selection.id_set();
    let rows: Vec<&Reading> = store.filter(kind.variable, &ids).collect();

    let unit = rows.first().map(|r| r.unit.as_str()).unwrap_or("");
    let units = distinct_units(&rows);
    if units.len() > 1 {
        tracing::warn!(
            variable = kind.variable,
            sites = %selection.joined(),
            units = ?units,
            "Selected sites report different units; labelling axis with '{}'",
            unit
        );
    }

    let mut layout = Layout::titled(
        format!("{} at site {}", kind.label, selection.joined()),
        height,
    );
    layout.legend = Some(Legend {
        orientation: "h",
        title: Text::new("SiteID"),
    });
    layout.xaxis = Some(Axis::titled("DatetimeAEST"));
    layout.yaxis = Some(Axis::titled(format!("{}, {}", kind.label, unit)));
    if units.len() > 1 {
        layout.meta = Some(LayoutMeta {
            units: units.iter().map(|u| u.to_string()).collect(),
        });
    }

    let mut chart = ChartSpec::new(layout);
    chart.data = group_by_site(&rows)
        .into_iter()
        .enumerate()
        .map(|(idx, (site_id, rows))| Trace::Scatter(line_for(site_id, &rows, idx)))
        .collect();
    chart
}

/// Rows grouped per site, sites in order of first appearance
fn group_by_site<'a>(rows: &[&'a Reading]) -> Vec<(&'a str, Vec<&'a Reading>)> {
    let mut groups: Vec<(&str, Vec<&Reading>)> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for &row in rows {
        let pos = *positions.entry(row.site_id.as_str()).or_insert_with(|| {
            groups.push((row.site_id.as_str(), Vec::new()));
            groups.len() - 1
        });
        groups[pos].1.push(row);
    }

    groups
}

fn line_for(site_id: &str, rows: &[&Reading], index: usize) -> LineTrace {
    LineTrace {
        name: site_id.to_string(),
        mode: "lines",
        legendgroup: site_id.to_string(),
        x: rows
            .iter()
            .map(|r| r.timestamp.format(DATETIME_FORMAT).to_string())
            .collect(),
        y: rows.iter().map(|r| r.value).collect(),
        line: LineStyle {
            color: palette_color(index),
        },
    }
}

fn distinct_units<'a>(rows: &[&'a Reading]) -> Vec<&'a str> {
    let mut units: Vec<&str> = Vec::new();
    for row in rows {
        if !units.contains(&row.unit.as_str()) {
            units.push(&row.unit);
        }
    }
    units
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::readings::ReadingsImporter;

    const DISCHARGE: &str = "Stream Discharge Ml/Day";

    fn store() -> ReadingStore {
        let csv_data = "SiteID,VariableName,Value,Unit,DatetimeAEST
410001,Stream Discharge Ml/Day,120.5,Ml/Day,2019-01-01 09:00:00
410002,Stream Discharge Ml/Day,8.1,Ml/Day,2019-01-01 09:00:00
570946,Rainfall,2.4,mm,2019-01-01 09:00:00
410001,Stream Discharge Ml/Day,118.0,Ml/Day,2019-01-02 09:00:00
410002,Stream Discharge Ml/Day,,Ml/Day,2019-01-02 09:00:00
410001,Rainfall,0.0,mm,2019-01-02 09:00:00
570946,Rainfall,0.2,mm,2019-01-02 09:00:00";
        ReadingStore::new(ReadingsImporter::new().import_str(csv_data).unwrap())
    }

    #[test]
    fn test_single_site_line_matches_rows() {
        let store = store();
        let chart = render(
            &store,
            &Selection::single("410001"),
            &VariableKind::STREAMFLOW,
            400,
        );

        let lines: Vec<&LineTrace> = chart.lines().collect();
        assert_eq!(lines.len(), 1);

        let expected: Vec<&Reading> = store
            .readings()
            .iter()
            .filter(|r| r.site_id == "410001" && r.variable == DISCHARGE)
            .collect();
        assert_eq!(lines[0].y, expected.iter().map(|r| r.value).collect::<Vec<_>>());
        assert_eq!(
            lines[0].x,
            vec!["2019-01-01 09:00:00", "2019-01-02 09:00:00"]
        );
        assert_eq!(lines[0].name, "410001");
    }

    #[test]
    fn test_titles() {
        let chart = render(
            &store(),
            &Selection::single("410001"),
            &VariableKind::STREAMFLOW,
            400,
        );
        assert_eq!(chart.layout.title.text, "Streamflow at site 410001");
        assert_eq!(
            chart.layout.yaxis.as_ref().unwrap().title.text,
            "Streamflow, Ml/Day"
        );
        assert_eq!(chart.layout.legend.as_ref().unwrap().orientation, "h");
        assert_eq!(chart.layout.height, 400);
        assert!(chart.layout.meta.is_none());
    }

    #[test]
    fn test_two_sites_two_colors() {
        let chart = render(
            &store(),
            &Selection::new(["410001", "410002"]),
            &VariableKind::STREAMFLOW,
            400,
        );

        let lines: Vec<&LineTrace> = chart.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_ne!(lines[0].line.color, lines[1].line.color);
        assert_eq!(lines[1].y, vec![Some(8.1), None]);
        assert_eq!(chart.layout.title.text, "Streamflow at site 410001, 410002");
    }

    #[test]
    fn test_empty_selection() {
        let chart = render(&store(), &Selection::empty(), &VariableKind::RAINFALL, 400);
        assert!(chart.data.is_empty());
        assert_eq!(chart.layout.yaxis.unwrap().title.text, "Rainfall, ");
    }

    #[test]
    fn test_unknown_site() {
        let chart = render(
            &store(),
            &Selection::single("999999"),
            &VariableKind::STREAMFLOW,
            400,
        );
        assert!(chart.data.is_empty());
        assert_eq!(chart.layout.yaxis.unwrap().title.text, "Streamflow, ");
    }

    #[test]
    fn test_filters_by_variable() {
        // 410001 also has a rainfall row; only discharge is plotted
        let chart = render(
            &store(),
            &Selection::single("410001"),
            &VariableKind::STREAMFLOW,
            400,
        );
        assert_eq!(chart.lines().next().unwrap().y.len(), 2);
    }

    #[test]
    fn test_idempotent() {
        let store = store();
        let sel = Selection::new(["570946", "410001"]);
        let first = render(&store, &sel, &VariableKind::RAINFALL, 400);
        let second = render(&store, &sel, &VariableKind::RAINFALL, 400);
        assert_eq!(first, second);
    }

    #[test]
    fn test_series_follow_file_order() {
        // Selection order drives the title, file order drives the series
        let chart = render(
            &store(),
            &Selection::new(["410002", "410001"]),
            &VariableKind::STREAMFLOW,
            400,
        );
        let names: Vec<&str> = chart.lines().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["410001", "410002"]);
        assert_eq!(chart.layout.title.text, "Streamflow at site 410002, 410001");
    }

    #[test]
    fn test_mixed_units_first_wins_and_flagged() {
        let csv_data = "SiteID,VariableName,Value,Unit,DatetimeAEST
570946,Rainfall,2.4,mm,2019-01-01
570951,Rainfall,0.1,in,2019-01-01";
        let store = ReadingStore::new(ReadingsImporter::new().import_str(csv_data).unwrap());

        let chart = render(
            &store,
            &Selection::new(["570951", "570946"]),
            &VariableKind::RAINFALL,
            400,
        );
        assert_eq!(
            chart.layout.yaxis.as_ref().unwrap().title.text,
            "Rainfall, mm"
        );
        assert_eq!(chart.layout.meta.unwrap().units, vec!["mm", "in"]);
    }
}
