//! Paneles informativos fijos que acompañan a cada fichero mostrado.

use serde::Serialize;

pub const DASHBOARD_TITLE: &str = "Operational Excellence File Intelligence Dashboard";
pub const SNAPSHOT_TITLE: &str = "Operational Excellence Consulting Snapshot";

#[derive(Debug, Clone, Copy, Serialize)]
pub struct InfoPanel {
    pub title: &'static str,
    pub items: &'static [&'static str],
}

pub const TOOLS_USED: InfoPanel = InfoPanel {
    title: "Tools Used",
    items: &[
        "Lean Six Sigma (DMAIC)",
        "Process Mapping (VSM, SIPOC)",
        "Power BI / Tableau",
        "Excel Solver & VBA",
        "RPA (UiPath, Power Automate)",
        "ERP / SAP Analytics",
    ],
};

pub const IMPACT_CREATED: InfoPanel = InfoPanel {
    title: "Impact Created",
    items: &[
        "15–30% cost reduction",
        "20–40% cycle time improvement",
        "Productivity uplift",
        "Reduction in defects & rework",
        "Data-driven decision making",
    ],
};

pub const INDUSTRIES_CATERED: InfoPanel = InfoPanel {
    title: "Industries Catered",
    items: &[
        "Manufacturing",
        "FMCG",
        "BFSI",
        "Logistics & Supply Chain",
        "Energy & Utilities",
        "Retail & E-commerce",
    ],
};

pub fn consulting_panels() -> [InfoPanel; 3] {
    [TOOLS_USED, IMPACT_CREATED, INDUSTRIES_CATERED]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panels_keep_their_order_and_content() {
        let panels = consulting_panels();
        let titles: Vec<_> = panels.iter().map(|p| p.title).collect();
        assert_eq!(titles, ["Tools Used", "Impact Created", "Industries Catered"]);
        assert!(panels.iter().all(|p| !p.items.is_empty()));
        assert!(INDUSTRIES_CATERED.items.contains(&"BFSI"));
    }
}
