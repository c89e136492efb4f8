use criterion::{Criterion, criterion_group, criterion_main};
use isoprune::identity::{ExclusionSet, NameCodeMapping};
use isoprune::newick::{self, LengthFormat};
use isoprune::transform::TreeTransformer;
use std::hint::black_box;

const SIZES: &[(&str, usize)] = &[("n400", 400), ("n4000", 4000)];

/// Balanced binary tree over the leaves `Language_0` to `Language_{n-1}`.
fn generate_newick(num_leaves: usize) -> String {
    fn subtree(from: usize, to: usize, newick: &mut String) {
        if to - from == 1 {
            newick.push_str(&format!("Language_{from}:0.{}", from % 97 + 1));
            return;
        }
        let mid = from + (to - from) / 2;
        newick.push('(');
        subtree(from, mid, newick);
        newick.push(',');
        subtree(mid, to, newick);
        newick.push_str("):0.125");
    }

    let mut newick = String::new();
    subtree(0, num_leaves, &mut newick);
    newick.push(';');
    newick
}

/// Every third language has a code, every seventh is excluded.
fn generate_resolution(num_leaves: usize) -> (NameCodeMapping, ExclusionSet) {
    let mapping = (0..num_leaves)
        .filter(|i| i % 3 == 0)
        .map(|i| (format!("Language_{i}"), format!("l{i:04}")))
        .collect();
    let excluded: Vec<String> = (0..num_leaves)
        .filter(|i| i % 7 == 0)
        .map(|i| format!("language_{i}"))
        .collect();
    let exclusions = excluded.iter().map(String::as_str).collect();
    (mapping, exclusions)
}

fn newick_parsing(c: &mut Criterion) {
    for (name, size) in SIZES {
        let newick = generate_newick(*size);
        c.bench_function(&format!("parse_{name}"), |b| {
            b.iter(|| newick::parse_str(black_box(&newick)).unwrap());
        });
    }
}

fn tree_transformation(c: &mut Criterion) {
    for (name, size) in SIZES {
        let tree = newick::parse_str(generate_newick(*size)).unwrap();
        let (mapping, exclusions) = generate_resolution(*size);
        let transformer = TreeTransformer::new(&mapping, &exclusions);

        c.bench_function(&format!("transform_write_{name}"), |b| {
            b.iter(|| {
                let mut tree = tree.clone();
                transformer.transform(&mut tree);
                tree.to_newick(LengthFormat::Shortest)
            });
        });
    }
}

criterion_group!(benches, newick_parsing, tree_transformation);
criterion_main!(benches);
