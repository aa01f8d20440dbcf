//! Checks command - list the built-in check catalogue

use anyhow::Result;

use crate::audit::CheckRegistry;
use crate::ui::Printer;

pub fn run(category: Option<&str>, details: bool) -> Result<()> {
    let registry = CheckRegistry::builtin();
    let printer = Printer::new();

    let checks = registry.list(category);
    if checks.is_empty() {
        printer.warning(&format!(
            "No checks in category '{}'. Categories: {}",
            category.unwrap_or(""),
            registry.categories().join(", ")
        ));
        return Ok(());
    }

    printer.header(&format!("Available checks ({})", checks.len()));
    printer.separator();
    for check in checks {
        printer.kv(check.name, check.category);
        if details {
            printer.println(&format!("      {}", check.description));
        }
    }

    Ok(())
}
