use serde::Serialize;

/// Format a result as minified JSON.
pub fn format_json<T: Serialize>(result: &T) -> String {
    serde_json::to_string(result).unwrap_or_else(|e| format!("{{\"error\":\"{e}\"}}"))
}

/// Format an error as JSON.
pub fn format_error(err: &dyn std::fmt::Display) -> String {
    format!("{{\"error\":\"{}\"}}", err.to_string().replace('"', "\\\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct TestData {
        name: String,
        value: i32,
    }

    #[test]
    fn format_json_is_minified() {
        let data = TestData {
            name: "x".into(),
            value: 42,
        };
        assert_eq!(format_json(&data), "{\"name\":\"x\",\"value\":42}");
    }

    #[test]
    fn format_error_escapes_quotes() {
        let msg = "bad \"input\"";
        let out = format_error(&msg);
        assert_eq!(out, "{\"error\":\"bad \\\"input\\\"\"}");
    }
}
