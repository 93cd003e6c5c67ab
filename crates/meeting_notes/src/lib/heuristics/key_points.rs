use std::sync::LazyLock;

use regex::Regex;

pub const MAX_KEY_POINTS: usize = 3;

const FALLBACK_KEY_POINTS: [&str; 2] = ["Tasks clearly assigned", "Deadlines are defined"];

/// Topic rules in declaration order; that order, not match strength, decides which survive
/// truncation.
static TOPIC_RULES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"(?i)login.*module|module.*login", "Login module development is critical"),
        (r"(?i)dashboard", "Dashboard will be developed in next phase"),
        (r"(?i)testing|test case", "Testing phase follows development"),
        (r"(?i)integration", "Component integration required after development"),
        (r"(?i)documentation|api doc", "Documentation should be maintained"),
    ]
    .into_iter()
    .map(|(pattern, point)| (Regex::new(pattern).unwrap(), point))
    .collect()
});

pub fn select_key_points(text: &str) -> Vec<String> {
    let points = TOPIC_RULES
        .iter()
        .filter(|(re, _)| re.is_match(text))
        .map(|(_, point)| point.to_string())
        .take(MAX_KEY_POINTS)
        .collect::<Vec<_>>();

    if points.is_empty() {
        return FALLBACK_KEY_POINTS.map(String::from).to_vec();
    }

    points
}
