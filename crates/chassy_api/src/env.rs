//! Backend environment selection.
//!
//! Each environment maps to an API base URL and a console base URL. The
//! console URL is only used to print human-readable links to a run.

use std::fmt;
use std::str::FromStr;

/// Target Chassy backend environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Prod,
    Stage,
    Dev,
}

impl Environment {
    /// Base URL of the Chassy API for this environment.
    pub fn api_base_url(&self) -> &'static str {
        match self {
            Self::Prod => "https://api.chassy.io/v1",
            Self::Stage => "https://api.stage.chassy.dev/v1",
            Self::Dev => "https://api.test.chassy.dev/v1",
        }
    }

    /// Base URL of the Chassy console for this environment.
    pub fn console_base_url(&self) -> &'static str {
        match self {
            Self::Prod => "https://console.chassy.io",
            Self::Stage => "https://console.stage.chassy.dev",
            Self::Dev => "https://console.test.chassy.dev",
        }
    }

    /// Console link for one execution of a workflow.
    pub fn execution_url(&self, workflow_id: &str, execution_id: &str) -> String {
        format!(
            "{}/workflows/{}/runs/{}",
            self.console_base_url(),
            workflow_id,
            execution_id
        )
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Prod => "PROD",
            Self::Stage => "STAGE",
            Self::Dev => "DEV",
        };
        f.write_str(s)
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PROD" => Ok(Self::Prod),
            "STAGE" => Ok(Self::Stage),
            "DEV" => Ok(Self::Dev),
            other => Err(format!(
                "unknown environment '{other}', expected PROD, STAGE or DEV"
            )),
        }
    }
}
