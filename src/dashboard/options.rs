//! Dropdown options for each panel

use serde::Serialize;

use crate::readings::VariableKind;
use crate::registry::SiteRegistry;

/// One dropdown entry: site name shown, site id submitted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DropdownOption {
    pub label: String,
    pub value: String,
}

/// Sites whose type matches the variable's prefix, in registry order
pub fn build_options(registry: &SiteRegistry, kind: &VariableKind) -> Vec<DropdownOption> {
    registry
        .of_type(kind.site_prefix)
        .map(|site| DropdownOption {
            label: site.name.clone(),
            value: site.id.clone(),
        })
        .collect()
}
