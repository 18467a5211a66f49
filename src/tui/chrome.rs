use std::cell::Cell;
use std::rc::Rc;

use crate::model::PanelConfig;

/// Title line (top border) plus bottom border
pub const CHROME_HEIGHT: u16 = 2;

/// Receives resize requests whenever the row count may have changed
pub trait WindowChrome {
    fn resize(&mut self, row_count: usize);
}

/// Applies focus to a row. Returns false when the row is not laid out yet,
/// in which case the request is dropped.
pub trait FocusTarget {
    fn focus_row(&mut self, index: usize) -> bool;
}

/// Fixed geometry constants of the panel, in terminal cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelMetrics {
    pub width: u16,
    pub row_height: u16,
    pub padding: u16,
}

impl PanelMetrics {
    pub fn from_config(panel: &PanelConfig) -> Self {
        PanelMetrics {
            width: panel.width.max(12),
            row_height: panel.row_height.max(1),
            padding: panel.padding,
        }
    }

    /// `rows * row_height + padding`
    pub fn content_height(&self, row_count: usize) -> u16 {
        let rows = u16::try_from(row_count).unwrap_or(u16::MAX);
        rows.saturating_mul(self.row_height)
            .saturating_add(self.padding)
    }

    pub fn outer_height(&self, row_count: usize) -> u16 {
        self.content_height(row_count).saturating_add(CHROME_HEIGHT)
    }
}

impl Default for PanelMetrics {
    fn default() -> Self {
        Self::from_config(&PanelConfig::default())
    }
}

/// Size of the panel as last requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PanelSize {
    pub row_count: usize,
    pub width: u16,
    pub height: u16,
}

/// Terminal panel chrome. Clones share the current size, so the renderer
/// reads what the controller requested.
#[derive(Debug, Clone)]
pub struct PanelChrome {
    metrics: PanelMetrics,
    size: Rc<Cell<PanelSize>>,
}

impl PanelChrome {
    pub fn new(metrics: PanelMetrics) -> Self {
        PanelChrome {
            metrics,
            size: Rc::new(Cell::new(PanelSize::default())),
        }
    }

    pub fn metrics(&self) -> PanelMetrics {
        self.metrics
    }

    pub fn size(&self) -> PanelSize {
        self.size.get()
    }
}

impl WindowChrome for PanelChrome {
    fn resize(&mut self, row_count: usize) {
        let next = PanelSize {
            row_count,
            width: self.metrics.width,
            height: self.metrics.outer_height(row_count),
        };
        if self.size.get() != next {
            tracing::debug!(row_count, height = next.height, "panel resized");
            self.size.set(next);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn height_follows_row_count() {
        let metrics = PanelMetrics {
            width: 30,
            row_height: 2,
            padding: 1,
        };
        assert_eq!(metrics.content_height(3), 7);
        assert_eq!(metrics.outer_height(3), 9);
        assert_eq!(metrics.content_height(0), 1);
    }

    #[test]
    fn resize_is_visible_through_clones() {
        let renderer_view = PanelChrome::new(PanelMetrics::default());
        let mut chrome = renderer_view.clone();
        chrome.resize(4);
        let size = renderer_view.size();
        assert_eq!(size.row_count, 4);
        assert_eq!(size.height, 4 + CHROME_HEIGHT);
        assert_eq!(size.width, 34);
    }

    #[test]
    fn config_values_are_floored() {
        let panel = PanelConfig {
            width: 3,
            row_height: 0,
            padding: 0,
            start_hidden: false,
        };
        let metrics = PanelMetrics::from_config(&panel);
        assert_eq!(metrics.width, 12);
        assert_eq!(metrics.row_height, 1);
    }
}
