use criterion::{
    black_box, criterion_group, criterion_main, Criterion,
};
use sasa_tree::{
    parameters::Parameters,
    result::{SasaResult, SasaTree},
    structure::Structure,
};

const SIDE_CHAIN: [&str; 4] = ["CB", "CG", "CD1", "CD2"];

/// A structure of `n_chains` chains with 500 eight-atom residues each.
fn large_structure(n_chains: usize) -> Structure {
    let mut structure = Structure::new_empty(Some("bench"));
    let labels = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    for label in labels.chars().take(n_chains) {
        for residue in 1..=500 {
            let number = residue.to_string();
            for atom in ["N", "CA", "C", "O"].iter().chain(SIDE_CHAIN.iter()) {
                structure
                    .add_atom(atom, "LEU", &number, label)
                    .unwrap();
            }
        }
    }
    structure
}

fn result_for(structure: &Structure) -> SasaResult {
    let n_atoms = sasa_tree::structure::StructureSource::n_atoms(structure);
    let sasa = (0..n_atoms).map(|i| (i % 17) as f64 * 1.5).collect();
    SasaResult::new(sasa, Parameters::default())
}

pub fn tree_building_benchmark(c: &mut Criterion) {
    let structure = large_structure(8);
    let result = result_for(&structure);

    c.bench_function("Tree Building Benchmark", |b| {
        b.iter(|| {
            SasaTree::from_result(
                black_box(&result),
                black_box(&structure),
                "bench",
            )
            .unwrap()
        })
    });
}

pub fn forest_join_benchmark(c: &mut Criterion) {
    let structure = large_structure(2);
    let result = result_for(&structure);
    let tree = SasaTree::from_result(&result, &structure, "bench").unwrap();

    c.bench_function("Forest Join Benchmark", |b| {
        b.iter(|| {
            let mut forest = SasaTree::new();
            for _ in 0..10 {
                forest.join(tree.clone()).unwrap();
            }
            forest
        })
    });
}

criterion_group!(benches, tree_building_benchmark, forest_join_benchmark);
criterion_main!(benches);
