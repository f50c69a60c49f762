//! Benchmarks for the collapsing engines and the EXORCISM minimizer
//!
//! Fixtures are synthetic: parity chains of growing width for the
//! collapsers, seeded random cube soups for insertion and minimization.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use esop_logic::{
    aig_extract, aig_to_bdd, bdd_extract, Aig, BddManager, Cube, EsopSet, Exorcism, LIT_FALSE,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn parity_aig(n_inputs: u32) -> Aig {
    let mut aig = Aig::new(n_inputs);
    let mut f = LIT_FALSE;
    for i in 0..n_inputs {
        let x = aig.input(i);
        f = aig.xor(f, x);
    }
    aig.add_output(f);
    aig
}

fn random_cubes(n_vars: u32, n_cubes: usize, seed: u64) -> Vec<Cube> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n_cubes)
        .map(|_| {
            let mut cube = Cube::ONE;
            for var in 0..n_vars {
                match rng.gen_range(0..3) {
                    0 => cube.add_lit(var, false),
                    1 => cube.add_lit(var, true),
                    _ => {}
                }
            }
            cube
        })
        .collect()
}

fn bench_insertion(c: &mut Criterion) {
    let mut group = c.benchmark_group("esop_insertion");
    for n_cubes in [64usize, 256, 1024] {
        let cubes = random_cubes(12, n_cubes, 7);
        group.throughput(Throughput::Elements(n_cubes as u64));
        group.bench_with_input(BenchmarkId::new("add_cube", n_cubes), &cubes, |b, cubes| {
            b.iter(|| {
                let mut set = EsopSet::new(12);
                for &cube in cubes {
                    set.add_cube(black_box(cube));
                }
                black_box(set.len());
            });
        });
    }
    group.finish();
}

fn bench_collapse(c: &mut Criterion) {
    let mut group = c.benchmark_group("collapse");
    for n_inputs in [6u32, 8, 10] {
        let aig = parity_aig(n_inputs);
        group.bench_with_input(
            BenchmarkId::new("aig_parity", n_inputs),
            &aig,
            |b, aig| {
                b.iter(|| {
                    let esop = aig_extract(black_box(aig)).unwrap();
                    black_box(esop.total_cubes());
                });
            },
        );
        group.bench_with_input(
            BenchmarkId::new("bdd_parity", n_inputs),
            &aig,
            |b, aig| {
                b.iter(|| {
                    let mut mgr = BddManager::new();
                    let roots = aig_to_bdd(aig, &mut mgr);
                    let esop = bdd_extract(&mut mgr, &roots, aig.n_inputs()).unwrap();
                    black_box(esop.total_cubes());
                });
            },
        );
    }
    group.finish();
}

fn bench_exorcism(c: &mut Criterion) {
    let mut group = c.benchmark_group("exorcism");
    for n_cubes in [32usize, 128] {
        let cubes = random_cubes(10, n_cubes, 11);
        group.throughput(Throughput::Elements(n_cubes as u64));
        group.bench_with_input(
            BenchmarkId::new("minimize", n_cubes),
            &cubes,
            |b, cubes| {
                b.iter(|| {
                    let result = Exorcism::new(black_box(cubes), 10).run();
                    black_box(result.len());
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_insertion, bench_collapse, bench_exorcism);
criterion_main!(benches);
