use ratatui::style::Color;

use super::TabSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorTab {
    Metrics,
    Alerts,
}

impl TabSet for MonitorTab {
    const ALL: &'static [Self] = &[MonitorTab::Metrics, MonitorTab::Alerts];

    fn title(self) -> &'static str {
        match self {
            MonitorTab::Metrics => "Metrics",
            MonitorTab::Alerts => "Alerts",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Health {
    Healthy,
    Warning,
}

impl Health {
    pub fn color(self) -> Color {
        match self {
            Health::Healthy => Color::Green,
            Health::Warning => Color::Yellow,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
}

impl Trend {
    pub fn color(self) -> Color {
        match self {
            Trend::Up => Color::Green,
            Trend::Down => Color::Red,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Critical,
}

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Severity::Warning => "Warning",
            Severity::Critical => "Critical",
        }
    }

    pub fn color(self) -> Color {
        match self {
            Severity::Warning => Color::Yellow,
            Severity::Critical => Color::Red,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertStatus {
    Active,
    Resolved,
}

impl AlertStatus {
    pub fn label(self) -> &'static str {
        match self {
            AlertStatus::Active => "Active",
            AlertStatus::Resolved => "Resolved",
        }
    }

    pub fn color(self) -> Color {
        match self {
            AlertStatus::Active => Color::Blue,
            AlertStatus::Resolved => Color::Green,
        }
    }
}

pub struct ServiceMetric {
    pub name: &'static str,
    pub value: &'static str,
    pub change: &'static str,
    pub trend: Trend,
    pub health: Health,
}

pub struct Alert {
    pub title: &'static str,
    pub service: &'static str,
    pub severity: Severity,
    pub timestamp: &'static str,
    pub status: AlertStatus,
}

pub static METRICS: [ServiceMetric; 3] = [
    ServiceMetric {
        name: "API Response Time",
        value: "235ms",
        change: "-12%",
        trend: Trend::Down,
        health: Health::Healthy,
    },
    ServiceMetric {
        name: "Error Rate",
        value: "0.05%",
        change: "+0.01%",
        trend: Trend::Up,
        health: Health::Warning,
    },
    ServiceMetric {
        name: "CPU Usage",
        value: "78%",
        change: "+5%",
        trend: Trend::Up,
        health: Health::Healthy,
    },
];

pub static ALERTS: [Alert; 2] = [
    Alert {
        title: "High Memory Usage",
        service: "User Service",
        severity: Severity::Warning,
        timestamp: "2024-03-15T11:30:00Z",
        status: AlertStatus::Active,
    },
    Alert {
        title: "API Latency Spike",
        service: "API Gateway",
        severity: Severity::Critical,
        timestamp: "2024-03-15T11:15:00Z",
        status: AlertStatus::Resolved,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_fixture() {
        let severities: Vec<Severity> = ALERTS.iter().map(|a| a.severity).collect();
        assert_eq!(severities, [Severity::Warning, Severity::Critical]);
        assert_eq!(ALERTS[1].status.label(), "Resolved");
    }

    #[test]
    fn test_severity_styles_are_distinct() {
        assert_ne!(Severity::Warning.color(), Severity::Critical.color());
    }
}
