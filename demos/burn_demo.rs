extern crate bonfire;

use bonfire::graph::Graph;
use bonfire::model_builder::ModelBuilder;
use bonfire::solve::SolveOptions;

fn main() {
    env_logger::init();

    // A small branching graph: 4 -> 3 -> 0 -> {1, 2}
    let graph = Graph::directed_from_edges(vec![(0, 1), (0, 2), (3, 0), (4, 3)]);
    let model = ModelBuilder::new(&graph).build().unwrap();
    let report = model.solve(&SolveOptions::default()).unwrap();
    println!("branching: {:?}", report);

    let star = Graph::undirected_from_edges((1..=6).map(|leaf| (0, leaf)));
    let model = ModelBuilder::new(&star).build().unwrap();
    let report = model.solve(&SolveOptions::default()).unwrap();
    println!("star: {:?}", report);

    let path = Graph::undirected_from_edges((0..8).map(|i| (i, i + 1)));
    let model = ModelBuilder::new(&path).build().unwrap();
    let report = model.solve(&SolveOptions::default()).unwrap();
    println!("path: {:?}", report);
}
