use anyhow::Result;
use serde::Serialize;

pub fn render_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::render_json;
    use crate::budget::BudgetBreakdown;

    #[test]
    fn renders_breakdown_keys() {
        let rendered = render_json(&BudgetBreakdown::zero()).expect("failed to render");
        assert!(rendered.contains("\"accommodation\": 0.0"));
        assert!(rendered.contains("\"miscellaneous\": 0.0"));
    }
}
