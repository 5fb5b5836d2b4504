use notegraph_core::config::ResolvedConfig;

use super::output::print_json;

/// Print nodes and distinct resolved edges for graph visualization.
pub fn run(rc: &ResolvedConfig) {
    let build = super::build(rc, None);
    let graph = build.index.graph(rc.index.resolution);
    tracing::debug!("graph: {} nodes, {} edges", graph.nodes.len(), graph.edges.len());
    print_json(&graph);
}
