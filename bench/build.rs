use criterion::{black_box, criterion_group, criterion_main, Criterion};
use plasma_mst::{Address, PlasmaMerkleSumTree, Transaction, Transfer};

pub fn block_transactions(count: usize) -> Vec<Transaction> {
    (0..count)
        .map(|i| {
            let start = i as u128 * 1_000;
            let length = rand::random::<u16>() as u128 % 999 + 1;
            Transaction::new(
                1,
                vec![Transfer {
                    sender: Address::from_bytes(rand::random()),
                    recipient: Address::from_bytes(rand::random()),
                    token: 0,
                    start,
                    end: start + length,
                }],
            )
        })
        .collect()
}

fn bench_tree_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("PMST Construction");

    for leaf_count in [100, 1_000, 10_000] {
        let transactions = block_transactions(leaf_count);
        group.bench_function(format!("{leaf_count} leaves"), |b| {
            b.iter(|| black_box(PlasmaMerkleSumTree::new(&transactions)).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_tree_construction);
criterion_main!(benches);
