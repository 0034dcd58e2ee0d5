/*
 * Firefly Flock Benchmark
 *
 * Measures one simulation step at the default flock sizes. The neighbor
 * scan is quadratic in the number of fireflies, so the full flock is the
 * number to watch.
 */

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use fireflies::spawn::{random_position, random_velocity};
use fireflies::steering::follower_forces;
use fireflies::{FireflyId, Simulation, SimulationParams};

fn populated(count: usize) -> Simulation {
    let params = SimulationParams { seed: Some(42), ..Default::default() };
    let mut sim = Simulation::new(&params).expect("default parameters are valid");
    for _ in 0..count {
        let bounds = sim.bounds;
        let position = random_position(&bounds, sim.rng_mut());
        let velocity = random_velocity(params.max_speed, sim.rng_mut());
        sim.spawn_firefly(position, velocity).expect("flock has room");
    }
    sim
}

// Benchmark a full simulation step
fn bench_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("step");

    for count in [15, 50] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &n| {
            let mut sim = populated(n);
            b.iter(|| black_box(sim.step(black_box(1.0 / 30.0))));
        });
    }

    group.finish();
}

// Benchmark the follower neighbor scan on its own
fn bench_follower_forces(c: &mut Criterion) {
    let sim = populated(50);
    c.bench_function("follower_forces/50", |b| {
        b.iter(|| black_box(follower_forces(&sim.flock, FireflyId(49), sim.state.max_speed)));
    });
}

criterion_group!(benches, bench_step, bench_follower_forces);
criterion_main!(benches);
