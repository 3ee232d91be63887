use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use sat_propagator::sat::clause::Clause;
use sat_propagator::sat::configs::SolverConfig;
use sat_propagator::sat::literal::{Literal, Variable, neg, pos};
use sat_propagator::sat::propagation::PropagatorType;
use sat_propagator::sat::solver::Solver;
use std::hint::black_box;
use std::time::Duration;

const PROPAGATORS: [PropagatorType; 2] = [PropagatorType::FullScan, PropagatorType::WatchedLiterals];

/// `x0 -> x1 -> ... -> x(n-1)`, stated in reverse so a full scan needs many passes.
fn implication_chain(n: u32) -> Vec<Clause> {
    (0..n - 1)
        .rev()
        .map(|i| Clause::new([neg(Variable::new(i)), pos(Variable::new(i + 1))]))
        .collect()
}

fn random_3cnf(num_vars: u32, num_clauses: usize, seed: u64) -> Vec<Clause> {
    let mut rng = fastrand::Rng::with_seed(seed);
    (0..num_clauses)
        .map(|_| {
            Clause::new((0..3).map(|_| {
                Literal::from_var(Variable::new(rng.u32(..num_vars)), rng.bool())
            }))
        })
        .collect()
}

fn propagate(
    num_vars: usize,
    clauses: &[Clause],
    assumptions: &[Literal],
    propagator: PropagatorType,
) -> bool {
    let mut solver = Solver::from_clauses(
        num_vars,
        clauses.iter().map(Clause::literals).map(<[Literal]>::to_vec),
        SolverConfig::new(propagator),
    );
    for &l in assumptions {
        if !solver.assign(l) {
            return false;
        }
    }
    solver.unit_propagate()
}

fn bench_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("implication chain");
    group.measurement_time(Duration::from_secs(10));

    for n in [100_u32, 1_000] {
        let clauses = implication_chain(n);
        let start = [pos(Variable::new(0))];
        for propagator in PROPAGATORS {
            group.bench_with_input(BenchmarkId::new(propagator.to_string(), n), &n, |b, &n| {
                b.iter(|| black_box(propagate(n as usize, &clauses, &start, propagator)));
            });
        }
    }
    group.finish();
}

fn bench_random_3sat(c: &mut Criterion) {
    let mut group = c.benchmark_group("random 3-cnf");
    group.sample_size(50);

    // clause/variable ratio near the 3-SAT threshold
    let num_vars = 200_u32;
    let clauses = random_3cnf(num_vars, 852, 1337);
    let mut rng = fastrand::Rng::with_seed(7);
    let assumptions: Vec<Literal> = (0..20)
        .map(|_| Literal::from_var(Variable::new(rng.u32(..num_vars)), rng.bool()))
        .collect();

    for propagator in PROPAGATORS {
        group.bench_function(propagator.to_string(), |b| {
            b.iter(|| black_box(propagate(num_vars as usize, &clauses, &assumptions, propagator)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_chain, bench_random_3sat);
criterion_main!(benches);
