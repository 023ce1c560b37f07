use crate::grid::{self, GridCell};
use crate::widget::{build_widget, Widget};
use futures::future::join_all;
use gridline_config::LoadedComponent;
use gridline_types::RenderContext;

/// Lines for the multi-line block plus non-fatal diagnostics gathered
/// along the way. Warnings are for stderr under a debug flag; they never
/// reach the status line itself.
#[derive(Debug, Default)]
pub struct RenderReport {
    pub lines: Vec<String>,
    pub warnings: Vec<String>,
}

/// Orchestrates one render pass: factory → detection → concurrent widget
/// renders → grid composition.
pub struct MultilineRenderer {
    separator: String,
}

impl MultilineRenderer {
    pub fn new(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
        }
    }

    /// Render the extra lines below the primary status line. An empty
    /// active-widget set yields an empty Vec, never blank lines.
    ///
    /// All active widgets render concurrently; results are keyed by grid
    /// position before composition, so completion order cannot affect
    /// the output.
    pub async fn render_extra_lines(
        &self,
        ctx: &RenderContext,
        components: &[LoadedComponent],
    ) -> RenderReport {
        let mut warnings = Vec::new();
        let mut widgets: Vec<Box<dyn Widget>> = Vec::new();

        for component in components {
            for (name, config) in &component.config.widgets {
                match build_widget(name, config) {
                    Ok(widget) => widgets.push(widget),
                    Err(err) => {
                        warnings.push(format!("component '{}': {} (skipped)", component.name, err))
                    }
                }
            }
        }

        let active: Vec<_> = widgets
            .iter()
            .filter(|widget| widget.should_render(ctx))
            .collect();

        let rendered = join_all(
            active
                .iter()
                .map(|widget| async move { (widget.position(), widget.render(ctx).await) }),
        )
        .await;

        let cells: Vec<GridCell> = rendered
            .into_iter()
            .filter_map(|((row, col), text)| text.map(|text| GridCell { row, col, text }))
            .collect();

        RenderReport {
            lines: grid::layout(cells, &self.separator),
            warnings,
        }
    }
}
