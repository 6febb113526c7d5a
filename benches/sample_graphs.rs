use criterion::{criterion_group, criterion_main, Criterion};
use std::io::BufReader;
use vertex_race::{
    cancel::CancelToken,
    parse_input,
    runner::{Algorithm, CoverSolver},
};

fn benchmark_graph(c: &mut Criterion, graph_name: &str) {
    let graph = parse_input(BufReader::new(
        std::fs::File::open(format!("graphs/{}.in", graph_name)).unwrap(),
    ))
    .unwrap();

    for algorithm in Algorithm::ALL {
        c.bench_function(&format!("{graph_name}/{algorithm}"), |b| {
            b.iter(|| {
                let cover = algorithm.solve(&graph, &CancelToken::new()).unwrap();
                assert!(graph.validate_cover(&cover));
            })
        });
    }
}

fn vertex_cover_benchmark(c: &mut Criterion) {
    benchmark_graph(c, "petersen");
    benchmark_graph(c, "grid_3x4");
    benchmark_graph(c, "random_12");
}

criterion_group!(benches, vertex_cover_benchmark);
criterion_main!(benches);
