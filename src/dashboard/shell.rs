//! Dashboard shell
//!
//! The page state: two independent panel slots plus the static map.
//! Each slot starts on its first dropdown option; a selection change
//! re-renders that slot only.

use serde::Serialize;

use super::figure::ChartSpec;
use super::options::DropdownOption;
use super::panel::PanelKind;
use super::selection::Selection;
use crate::context::DashboardContext;

/// Current state of one dropdown+chart slot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelState {
    pub panel: PanelKind,
    pub label: &'static str,
    pub selection: Selection,
    pub chart: ChartSpec,
}

/// A slot together with its dropdown entries
#[derive(Debug, Clone, Serialize)]
pub struct PanelView<'a> {
    #[serde(flatten)]
    pub state: &'a PanelState,
    pub options: &'a [DropdownOption],
}

/// Everything the page needs for its first paint
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot<'a> {
    pub title: &'a str,
    pub source_url: Option<&'a str>,
    pub map: &'a ChartSpec,
    pub panels: Vec<PanelView<'a>>,
}

pub struct DashboardShell<'a> {
    ctx: &'a DashboardContext,
    streamflow: PanelState,
    rainfall: PanelState,
}

impl<'a> DashboardShell<'a> {
    /// Initial state: every slot on its first option
    pub fn new(ctx: &'a DashboardContext) -> Self {
        let initial = |panel| Self::transition(ctx, panel, ctx.initial_selection(panel));
        Self {
            ctx,
            streamflow: initial(PanelKind::Streamflow),
            rainfall: initial(PanelKind::Rainfall),
        }
    }

    /// New state of `panel` after the user picks `selection`
    pub fn transition(ctx: &DashboardContext, panel: PanelKind, selection: Selection) -> PanelState {
        let chart = ctx.render(panel, &selection);
        PanelState {
            panel,
            label: panel.variable().label,
            selection,
            chart,
        }
    }

    pub fn panel(&self, panel: PanelKind) -> &PanelState {
        match panel {
            PanelKind::Streamflow => &self.streamflow,
            PanelKind::Rainfall => &self.rainfall,
        }
    }

    pub fn snapshot(&self) -> DashboardSnapshot<'_> {
        let settings = self.ctx.settings();
        DashboardSnapshot {
            title: &settings.title,
            source_url: settings.source_url.as_deref(),
            map: self.ctx.site_map(),
            panels: PanelKind::ALL
                .iter()
                .map(|&panel| PanelView {
                    state: self.panel(panel),
                    options: self.ctx.options(panel),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::tests::sample_context;

    #[test]
    fn test_initial_state_is_first_option() {
        let ctx = sample_context();
        let shell = DashboardShell::new(&ctx);

        let streamflow = shell.panel(PanelKind::Streamflow);
        assert_eq!(streamflow.selection, Selection::single("410001"));
        assert_eq!(streamflow.chart.layout.title.text, "Streamflow at site 410001");

        let rainfall = shell.panel(PanelKind::Rainfall);
        assert_eq!(rainfall.selection, Selection::single("570946"));
        assert_eq!(rainfall.chart.lines().count(), 1);
    }

    #[test]
    fn test_transition_renders_new_selection() {
        let ctx = sample_context();
        let state = DashboardShell::transition(
            &ctx,
            PanelKind::Streamflow,
            Selection::new(["410001", "410002"]),
        );

        assert_eq!(state.panel, PanelKind::Streamflow);
        assert_eq!(state.label, "Streamflow");
        assert_eq!(state.chart.lines().count(), 2);
        assert_eq!(
            state.chart.layout.title.text,
            "Streamflow at site 410001, 410002"
        );
    }

    #[test]
    fn test_transition_is_independent_of_other_panel() {
        let ctx = sample_context();
        let shell = DashboardShell::new(&ctx);
        let rainfall = DashboardShell::transition(
            &ctx,
            PanelKind::Rainfall,
            ctx.initial_selection(PanelKind::Rainfall),
        );
        assert_eq!(shell.panel(PanelKind::Rainfall), &rainfall);
    }

    #[test]
    fn test_clearing_selection_renders_blank() {
        let ctx = sample_context();
        let state = DashboardShell::transition(&ctx, PanelKind::Rainfall, Selection::empty());
        assert!(state.selection.is_empty());
        assert!(state.chart.data.is_empty());
    }

    #[test]
    fn test_snapshot_serializes() {
        let ctx = sample_context();
        let shell = DashboardShell::new(&ctx);
        let value = serde_json::to_value(shell.snapshot()).unwrap();

        assert_eq!(value["title"], "ACT Government Water Monitoring Sites");
        assert_eq!(
            value["source_url"],
            "https://github.com/JoeWalshe/act_water_app"
        );
        assert_eq!(value["panels"][0]["panel"], "streamflow");
        assert_eq!(value["panels"][0]["selection"][0], "410001");
        assert_eq!(value["panels"][1]["options"][0]["value"], "570946");
        assert_eq!(value["map"]["data"][0]["type"], "scattermapbox");
    }
}
