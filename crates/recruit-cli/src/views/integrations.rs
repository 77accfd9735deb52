//! Integrations page. Static for now; no connector talks to anything yet.

pub struct Integration {
  pub name:        &'static str,
  pub description: &'static str,
}

pub const INTEGRATIONS: [Integration; 2] = [
  Integration {
    name:        "Dayforce",
    description: "Sync employee data, job roles, and payroll status.",
  },
  Integration {
    name:        "Workday",
    description: "Import job descriptions and automate interview scheduling.",
  },
];

pub const COMING_SOON: &str = "More integrations coming soon...";
