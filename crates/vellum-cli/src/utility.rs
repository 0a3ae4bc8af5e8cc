use console::style;
use vellum::schema::db::Plan;

/// Redact the password portion of a database URL for safe display.
///
/// If the URL can be parsed and contains a password, replaces it with `***`.
/// If parsing fails, returns the original string unchanged.
pub(crate) fn redact_url_password(url: &str) -> String {
    match url::Url::parse(url) {
        Ok(mut parsed) => {
            if parsed.password().is_some() {
                let _ = parsed.set_password(Some("***"));
            }
            parsed.to_string()
        }
        Err(_) => url.to_string(),
    }
}

pub(crate) fn heading(title: &str) {
    println!();
    println!("  {}", style(title).cyan().bold().underlined());
    println!();
}

/// Prints type mismatches found while planning. They are never corrected.
pub(crate) fn print_drift(plan: &Plan) {
    for drift in &plan.drift {
        println!(
            "  {} {}",
            style("!").yellow().bold(),
            style(format!("type drift on {drift}")).yellow()
        );
    }
}
