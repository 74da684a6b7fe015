/// Wraps `token` in `%` for a substring LIKE/ILIKE match, escaping `\`, `%`
/// and `_` so they match literally under `ESCAPE '\'`.
pub fn contains(token: &str) -> String {
    let mut pattern = String::with_capacity(token.len() + 2);
    pattern.push('%');
    for c in token.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
