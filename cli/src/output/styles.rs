//! Output styles using owo-colors stylesheet pattern

use nomad_common::ContainerStatus;
use owo_colors::Style;

/// Centralized stylesheet for CLI output colors.
#[derive(Default, Clone)]
pub struct Styles {
    /// Success messages (green)
    pub success: Style,
    /// Warning messages (yellow)
    pub warning: Style,
    /// Error messages (red)
    pub error: Style,
    /// Info messages (blue)
    pub info: Style,
    /// Dimmed/secondary text
    pub dim: Style,
}

impl Styles {
    /// Apply colors to the stylesheet.
    pub fn colorize(&mut self) {
        self.success = Style::new().green();
        self.warning = Style::new().yellow();
        self.error = Style::new().red();
        self.info = Style::new().blue();
        self.dim = Style::new().dimmed();
    }

    /// Style for a container status cell.
    #[must_use]
    pub fn status(&self, status: ContainerStatus) -> Style {
        match status {
            ContainerStatus::Running => self.success,
            ContainerStatus::Stopped => self.warning,
            ContainerStatus::Absent => self.dim,
            ContainerStatus::Unknown => self.error,
        }
    }
}
