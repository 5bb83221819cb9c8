use ratatui::style::Color;

use crate::catalog::ColorTag;

pub struct MetricCard {
    pub title: &'static str,
    pub value: &'static str,
    pub icon: &'static str,
    pub trend: Option<&'static str>,
    pub color: ColorTag,
}

impl MetricCard {
    /// Positive trends read green, everything else red.
    pub fn trend_color(&self) -> Option<Color> {
        self.trend.map(|t| {
            if t.starts_with('+') {
                Color::Green
            } else {
                Color::Red
            }
        })
    }
}

pub struct MetricSection {
    pub title: &'static str,
    pub cards: &'static [MetricCard],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    Critical,
    High,
    Medium,
}

impl Priority {
    pub fn label(self) -> &'static str {
        match self {
            Priority::Critical => "Critical",
            Priority::High => "High",
            Priority::Medium => "Medium",
        }
    }

    pub fn color(self) -> Color {
        match self {
            Priority::Critical => Color::Red,
            Priority::High => Color::Rgb(249, 115, 22),
            Priority::Medium => Color::Blue,
        }
    }
}

pub struct Event {
    pub time: &'static str,
    pub title: &'static str,
}

pub struct Ticket {
    pub id: &'static str,
    pub title: &'static str,
    pub priority: Priority,
}

const fn card(
    title: &'static str,
    value: &'static str,
    icon: &'static str,
    trend: Option<&'static str>,
    color: ColorTag,
) -> MetricCard {
    MetricCard {
        title,
        value,
        icon,
        trend,
        color,
    }
}

static DORA: [MetricCard; 3] = [
    card("Deployment Frequency", "4.2/day", "⚡", Some("+12%"), ColorTag::Blue),
    card("Lead Time", "2.5 days", "◷", Some("-8%"), ColorTag::Purple),
    card("Change Failure Rate", "1.8%", "∿", Some("-5%"), ColorTag::Green),
];

static AGILE: [MetricCard; 2] = [
    card("Sprint Velocity", "42 points", "▮", Some("+15%"), ColorTag::Indigo),
    card("Open Stories", "24", "☑", None, ColorTag::Yellow),
];

static SECURITY: [MetricCard; 2] = [
    card("Security Score", "94%", "⛨", None, ColorTag::Red),
    card("Cloud Resources", "156", "☁", None, ColorTag::Cyan),
];

pub static SECTIONS: [MetricSection; 3] = [
    MetricSection {
        title: "DORA Metrics",
        cards: &DORA,
    },
    MetricSection {
        title: "Agile Metrics",
        cards: &AGILE,
    },
    MetricSection {
        title: "Security & Infrastructure",
        cards: &SECURITY,
    },
];

pub static EVENTS: [Event; 3] = [
    Event {
        time: "10:00 AM",
        title: "Sprint Planning",
    },
    Event {
        time: "2:00 PM",
        title: "Architecture Review",
    },
    Event {
        time: "4:30 PM",
        title: "Team Standup",
    },
];

pub static TICKETS: [Ticket; 3] = [
    Ticket {
        id: "PROJ-123",
        title: "Update API Documentation",
        priority: Priority::High,
    },
    Ticket {
        id: "PROJ-124",
        title: "Fix Authentication Bug",
        priority: Priority::Critical,
    },
    Ticket {
        id: "PROJ-125",
        title: "Implement New Feature",
        priority: Priority::Medium,
    },
];
