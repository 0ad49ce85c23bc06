//! JSON rendering of the abstract job graph

use crate::core::jobs::JobGraph;
use crate::error::RenderError;

/// Render the job graph as pretty-printed JSON
pub fn render_graph(graph: &JobGraph) -> Result<String, RenderError> {
    let mut json = serde_json::to_string_pretty(graph)?;
    json.push('\n');
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::GeneratorConfig;
    use crate::core::jobs::JobGraphBuilder;
    use crate::core::package::{Package, Requirements};
    use crate::core::store::MetadataStore;

    #[test]
    fn test_render_graph() {
        let store: MetadataStore = [
            Package::new("pip-base", Requirements::default()),
            Package::new("pip-app", Requirements::new(["pip-base"], Vec::<String>::new())),
        ]
        .into_iter()
        .collect();
        let config = GeneratorConfig::default();
        let graph = JobGraphBuilder::new(&store, &config).build_all().unwrap();

        let json = render_graph(&graph).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["pip-app"]["needs"], serde_json::json!(["pip-base"]));
        assert_eq!(value["pip-app"]["steps"][3]["kind"], "fetch-artifact");
        assert_eq!(value["pip-app"]["steps"][3]["artifact"], "pip-base-3.10");
        assert_eq!(value["pip-base"]["needs"], serde_json::json!([]));
    }
}
