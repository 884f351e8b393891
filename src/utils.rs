/// Make `name` safe to use as a file name on every desktop platform.
pub fn sanitize_filename(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let trimmed = replaced.trim_matches(|c: char| c == '.' || c.is_whitespace());
    if trimmed.is_empty() {
        "plan".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Window caption: the plan name once a plan is open, the version before.
pub fn window_title(app_title: &str, plan_name: Option<&str>) -> String {
    match plan_name {
        Some(plan) => format!("{} - {}", app_title, plan),
        None => format!("{} v{}", app_title, env!("CARGO_PKG_VERSION")),
    }
}

pub fn parse_u32_input(value: &str, fallback: u32) -> u32 {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return fallback;
    }
    trimmed.parse::<u32>().unwrap_or(fallback)
}

/// Whole number typed into a dialog, accepted only inside `min..=max`.
/// Anything else is left for the caller to report.
pub fn parse_bounded_input(value: &str, min: u32, max: u32) -> Option<u32> {
    value
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|parsed| (min..=max).contains(parsed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("a<b>c:d\"e/f\\g|h?i*j"), "a_b_c_d_e_f_g_h_i_j");
        assert_eq!(sanitize_filename("tab\there"), "tab_here");
        assert_eq!(sanitize_filename("  ..Plan.. "), "Plan");
        assert_eq!(sanitize_filename(" ... "), "plan");
        assert_eq!(sanitize_filename("Übung 3"), "Übung 3");
    }

    #[test]
    fn test_window_title() {
        assert_eq!(window_title("Zeitplaner", Some("Dienstag")), "Zeitplaner - Dienstag");
        assert_eq!(
            window_title("Time Planner", None),
            format!("Time Planner v{}", env!("CARGO_PKG_VERSION"))
        );
    }

    #[test]
    fn test_parse_inputs() {
        assert_eq!(parse_u32_input(" 42 ", 7), 42);
        assert_eq!(parse_u32_input("", 7), 7);
        assert_eq!(parse_u32_input("-1", 7), 7);
        assert_eq!(parse_bounded_input(" 90 ", 10, 1440), Some(90));
        assert_eq!(parse_bounded_input("10", 10, 1440), Some(10));
        assert_eq!(parse_bounded_input("1440", 10, 1440), Some(1440));
        assert_eq!(parse_bounded_input("5000", 10, 1440), None);
        assert_eq!(parse_bounded_input("3", 10, 1440), None);
        assert_eq!(parse_bounded_input("x", 10, 1440), None);
        assert_eq!(parse_bounded_input("", 1, 20), None);
        assert_eq!(parse_bounded_input("7.5", 1, 20), None);
        // An exhausted plan has no valid duration at all.
        assert_eq!(parse_bounded_input("1", 1, 0), None);
    }
}
