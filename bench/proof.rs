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

fn bench_proof_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("PMST Proof Generation");

    let transactions = block_transactions(1_000);
    let tree = PlasmaMerkleSumTree::new(&transactions).unwrap();

    group.bench_function("1000 leaves", |b| {
        b.iter(|| {
            for index in 0..tree.leaf_count() {
                black_box(tree.get_inclusion_proof(index)).unwrap();
            }
        })
    });

    group.finish();
}

fn bench_proof_verification(c: &mut Criterion) {
    let mut group = c.benchmark_group("PMST Proof Verification");

    let transactions = block_transactions(1_000);
    let tree = PlasmaMerkleSumTree::new(&transactions).unwrap();
    let root = tree.root();
    let proofs: Vec<_> = (0..tree.leaf_count())
        .map(|index| tree.get_inclusion_proof(index).unwrap())
        .collect();

    group.bench_function("1000 leaves", |b| {
        b.iter(|| {
            for (index, proof) in proofs.iter().enumerate() {
                assert!(black_box(PlasmaMerkleSumTree::check_inclusion(
                    index,
                    &transactions[index],
                    0,
                    proof,
                    &root,
                )));
            }
        })
    });

    group.finish();
}

criterion_group!(benches, bench_proof_generation, bench_proof_verification);
criterion_main!(benches);
