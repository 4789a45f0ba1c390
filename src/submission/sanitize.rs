/// Strip angle brackets and surrounding whitespace from a free-text field.
/// Bracket removal runs before the trim so the result is stable under
/// repeated application.
pub fn sanitize(input: &str) -> String {
    input
        .chars()
        .filter(|c| *c != '<' && *c != '>')
        .collect::<String>()
        .trim()
        .to_string()
}
