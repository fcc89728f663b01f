use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::{SeedableRng, rngs::StdRng};
use swiss_tables::{
    Tournament,
    pairing::{PairingOptimizer, allocate_tables},
    standings::compute_standings,
    tournament::{ParticipantId, Round},
};

/// Helper to build a roster and `rounds` rounds of optimizer-paired history
fn setup_history(n_players: usize, rounds: u32) -> (Vec<ParticipantId>, Vec<Round>) {
    let players: Vec<ParticipantId> = (0..n_players).map(|_| ParticipantId::new()).collect();
    let structure = allocate_tables(n_players).unwrap();
    let optimizer = PairingOptimizer::default();
    let mut rng = StdRng::seed_from_u64(42);

    let mut history = Vec::new();
    for number in 1..=rounds {
        let tables = optimizer
            .generate_pairing(&players, &structure, &history, &mut rng)
            .unwrap();
        history.push(Round::new(number, tables, false));
    }
    (players, history)
}

/// Helper to create a tournament sitting in its last swiss round
fn setup_tournament(n_players: usize) -> Tournament {
    let mut tournament = Tournament::default();
    for i in 0..n_players {
        tournament.add_participant(&format!("player{i}")).unwrap();
    }
    let mut rng = StdRng::seed_from_u64(7);
    tournament.start(&mut rng).unwrap();
    for _ in 0..2 {
        tournament.advance_round(true, &mut rng).unwrap();
    }
    tournament
}

/// Benchmark table allocation across roster sizes
fn bench_allocate_tables(c: &mut Criterion) {
    c.bench_function("allocate_tables_3_to_200", |b| {
        b.iter(|| {
            for n in 3..200 {
                let _ = allocate_tables(n);
            }
        });
    });
}

/// Benchmark the first round, where every arrangement is repeat free
fn bench_first_round(c: &mut Criterion) {
    let mut group = c.benchmark_group("pairing_first_round");

    for n_players in [8, 16, 32, 64].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_players", n_players)),
            n_players,
            |b, &n| {
                let (players, _) = setup_history(n, 0);
                let structure = allocate_tables(n).unwrap();
                let optimizer = PairingOptimizer::default();
                let mut rng = StdRng::seed_from_u64(1);
                b.iter(|| optimizer.generate_pairing(&players, &structure, &[], &mut rng));
            },
        );
    }

    group.finish();
}

/// Benchmark a late round with three rounds of history to avoid
fn bench_late_round(c: &mut Criterion) {
    let mut group = c.benchmark_group("pairing_late_round");

    for n_players in [8, 16, 32, 64].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_players", n_players)),
            n_players,
            |b, &n| {
                let (players, history) = setup_history(n, 3);
                let structure = allocate_tables(n).unwrap();
                let optimizer = PairingOptimizer::default();
                let mut rng = StdRng::seed_from_u64(1);
                b.iter(|| optimizer.generate_pairing(&players, &structure, &history, &mut rng));
            },
        );
    }

    group.finish();
}

/// Benchmark standings over three rounds
fn bench_standings(c: &mut Criterion) {
    let mut group = c.benchmark_group("standings");

    for n_players in [16, 64].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_players", n_players)),
            n_players,
            |b, &n| {
                let tournament = setup_tournament(n);
                b.iter(|| compute_standings(tournament.participants(), tournament.rounds()));
            },
        );
    }

    group.finish();
}

/// Benchmark closing the last swiss round and seeding the finals
fn bench_advance_to_finals(c: &mut Criterion) {
    c.bench_function("advance_to_finals_32_players", |b| {
        b.iter_batched(
            || (setup_tournament(32), StdRng::seed_from_u64(3)),
            |(mut t, mut rng)| {
                t.advance_round(true, &mut rng).unwrap();
                t
            },
            criterion::BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    pairing,
    bench_allocate_tables,
    bench_first_round,
    bench_late_round,
);

criterion_group!(
    tournament_operations,
    bench_standings,
    bench_advance_to_finals,
);

criterion_main!(pairing, tournament_operations);
