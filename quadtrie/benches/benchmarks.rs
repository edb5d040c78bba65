use common::shapes::{Aabb, Point};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use quadtrie::grid::UniformGrid;
use quadtrie::quadtrie::{Config, MortonTree};
use rand::prelude::*;

const ENTITY_COUNT: u32 = 10_000;

fn random_positions(rng: &mut StdRng, config: &Config) -> Vec<Point> {
    let half = config.world_half_extent;
    let world = Aabb::from_min_max(-half, -half, half, half);
    (0..ENTITY_COUNT)
        .map(|_| world.random_point_inside(rng))
        .collect()
}

fn rebuild_benchmark(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(1);
    let config = Config::default();
    let positions = random_positions(&mut rng, &config);
    let mut tree = MortonTree::new_with_config(config).unwrap();

    c.bench_function("morton_tree_rebuild", |b| {
        b.iter(|| {
            tree.reset();
            for (value, position) in positions.iter().enumerate() {
                tree.insert(value as u32, black_box(*position)).unwrap();
            }
        })
    });
}

fn query_benchmark(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(2);
    let config = Config::default();
    let positions = random_positions(&mut rng, &config);
    let reach = 2.0 * config.max_object_radius;
    let mut tree = MortonTree::new_with_config(config.clone()).unwrap();
    let mut grid = UniformGrid::new_with_config(&config).unwrap();
    for (value, position) in positions.iter().enumerate() {
        tree.insert(value as u32, *position).unwrap();
        grid.insert(value as u32, *position).unwrap();
    }

    let mut found = Vec::new();
    c.bench_function("morton_tree_query_neighbours", |b| {
        b.iter(|| {
            for position in positions.iter().take(1_000) {
                found.clear();
                tree.query_box(black_box(&Aabb::around(*position, reach)), &mut found);
            }
        })
    });

    c.bench_function("uniform_grid_query_neighbours", |b| {
        b.iter(|| {
            for position in positions.iter().take(1_000) {
                found.clear();
                grid.query(
                    black_box(position.offset(-reach, -reach)),
                    black_box(position.offset(reach, reach)),
                    &mut found,
                );
            }
        })
    });

    c.bench_function("morton_tree_query_quarter_world", |b| {
        b.iter(|| {
            found.clear();
            tree.query(
                black_box(Point::new(-512.0, -512.0)),
                black_box(Point::new(512.0, 512.0)),
                &mut found,
            );
        })
    });
}

fn tick_benchmark(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(3);
    let config = Config::default();
    let positions = random_positions(&mut rng, &config);
    let reach = 2.0 * config.max_object_radius;
    let mut tree = MortonTree::new_with_config(config).unwrap();
    let mut found = Vec::new();

    c.bench_function("morton_tree_full_tick", |b| {
        b.iter(|| {
            tree.reset();
            for (value, position) in positions.iter().enumerate() {
                tree.insert(value as u32, *position).unwrap();
            }
            for position in positions.iter() {
                found.clear();
                tree.query_box(&Aabb::around(*position, reach), &mut found);
                black_box(found.len());
            }
        })
    });
}

criterion_group!(
    quadtrie_benchmarks,
    rebuild_benchmark,
    query_benchmark,
    tick_benchmark
);
criterion_main!(quadtrie_benchmarks);
