use bppctl::model::{RootedTree, TraversalOrder};
use bppctl::newick::{parse_str, to_newick};
use bppctl::parse_control_str;
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

const CONTROL_FILE: &str = include_str!("../tests/fixtures/A00.bpp.ctl");

const TREE_SIZES: &[(&str, usize)] = &[("n16", 16), ("n128", 128), ("n1024", 1024)];

/// Leaves merged pairwise in rounds.
fn balanced_tree(num_leaves: usize) -> RootedTree {
    let mut tree = RootedTree::new(num_leaves);
    let mut level: Vec<_> = (0..num_leaves)
        .map(|i| tree.add_leaf(format!("T{i}"), 0.001 * (i + 1) as f64))
        .collect();

    while level.len() > 1 {
        let mut next = Vec::with_capacity(level.len() / 2 + 1);
        let mut pairs = level.chunks_exact(2);
        for pair in &mut pairs {
            next.push(tree.add_internal((pair[0], pair[1]), None, 0.5));
        }
        next.extend_from_slice(pairs.remainder());
        level = next;
    }

    tree.set_root(level[0]).unwrap();
    tree
}

fn control_file_parsing(c: &mut Criterion) {
    c.bench_function("A00.bpp.ctl", |b| {
        b.iter(|| parse_control_str(black_box(CONTROL_FILE)).unwrap());
    });
}

fn newick_round_trip(c: &mut Criterion) {
    for (name, num_leaves) in TREE_SIZES {
        let newick = to_newick(&balanced_tree(*num_leaves));
        c.bench_function(&format!("parse {name}"), |b| {
            b.iter(|| parse_str(black_box(&newick)).unwrap());
        });

        let tree = parse_str(&newick).unwrap();
        c.bench_function(&format!("write {name}"), |b| {
            b.iter(|| to_newick(black_box(&tree)));
        });
        c.bench_function(&format!("postorder {name}"), |b| {
            b.iter(|| {
                black_box(&tree)
                    .traverse(TraversalOrder::Postorder, |_| true)
                    .unwrap()
            });
        });
    }
}

criterion_group!(control, control_file_parsing);
criterion_group! {
    name = trees;
    config = Criterion::default().sample_size(20);
    targets = newick_round_trip
}
criterion_main!(control, trees);
