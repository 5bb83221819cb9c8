use ratatui::style::Color;

use super::TabSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployTab {
    Environments,
    Deployments,
}

impl TabSet for DeployTab {
    const ALL: &'static [Self] = &[DeployTab::Environments, DeployTab::Deployments];

    fn title(self) -> &'static str {
        match self {
            DeployTab::Environments => "Environments",
            DeployTab::Deployments => "Deployments",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvStatus {
    Healthy,
    Deploying,
    Warning,
}

impl EnvStatus {
    pub fn label(self) -> &'static str {
        match self {
            EnvStatus::Healthy => "Healthy",
            EnvStatus::Deploying => "Deploying",
            EnvStatus::Warning => "Warning",
        }
    }

    pub fn color(self) -> Color {
        match self {
            EnvStatus::Healthy => Color::Green,
            EnvStatus::Deploying => Color::Blue,
            EnvStatus::Warning => Color::Yellow,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeploymentStatus {
    Successful,
    InProgress,
}

impl DeploymentStatus {
    pub fn label(self) -> &'static str {
        match self {
            DeploymentStatus::Successful => "Successful",
            DeploymentStatus::InProgress => "In Progress",
        }
    }

    pub fn color(self) -> Color {
        match self {
            DeploymentStatus::Successful => Color::Green,
            DeploymentStatus::InProgress => Color::Blue,
        }
    }
}

pub struct Environment {
    pub name: &'static str,
    pub status: EnvStatus,
    pub last_deploy: &'static str,
    pub version: &'static str,
    pub region: &'static str,
}

pub struct Deployment {
    pub environment: &'static str,
    pub version: &'static str,
    pub status: DeploymentStatus,
    pub timestamp: &'static str,
    pub duration: &'static str,
    pub triggered_by: &'static str,
}

pub static ENVIRONMENTS: [Environment; 3] = [
    Environment {
        name: "Production",
        status: EnvStatus::Healthy,
        last_deploy: "2024-03-15T12:00:00Z",
        version: "v1.2.3",
        region: "us-west-2",
    },
    Environment {
        name: "Staging",
        status: EnvStatus::Deploying,
        last_deploy: "2024-03-15T11:30:00Z",
        version: "v1.2.4-rc1",
        region: "us-west-2",
    },
    Environment {
        name: "Development",
        status: EnvStatus::Warning,
        last_deploy: "2024-03-15T10:00:00Z",
        version: "v1.2.4-dev",
        region: "us-west-2",
    },
];

pub static DEPLOYMENTS: [Deployment; 2] = [
    Deployment {
        environment: "Production",
        version: "v1.2.3",
        status: DeploymentStatus::Successful,
        timestamp: "2024-03-15T12:00:00Z",
        duration: "5m 30s",
        triggered_by: "CI/CD Pipeline",
    },
    Deployment {
        environment: "Staging",
        version: "v1.2.4-rc1",
        status: DeploymentStatus::InProgress,
        timestamp: "2024-03-15T11:30:00Z",
        duration: "3m 45s",
        triggered_by: "Manual Deploy",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environments_fixture() {
        let summary: Vec<(&str, EnvStatus)> =
            ENVIRONMENTS.iter().map(|e| (e.name, e.status)).collect();
        assert_eq!(
            summary,
            [
                ("Production", EnvStatus::Healthy),
                ("Staging", EnvStatus::Deploying),
                ("Development", EnvStatus::Warning),
            ]
        );
    }

    #[test]
    fn test_deployment_status_styles() {
        assert_eq!(DeploymentStatus::Successful.color(), Color::Green);
        assert_eq!(DeploymentStatus::InProgress.color(), Color::Blue);
    }
}
