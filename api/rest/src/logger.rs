/// Access-log line for actix's `Logger` middleware.
pub fn logger_format() -> &'static str {
    "%a \"%r\" %s %b %Dms"
}
