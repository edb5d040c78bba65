use common::shapes::{Aabb, Circle, Point};
use fxhash::FxHashMap;
use nalgebra::{Isometry2, Vector2};
use parry2d::query;
use parry2d::shape::Ball;
use quadtrie::{EntityCategory, QuadtrieResult, SpatialIndex};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub value: u32,
    pub circle: Circle,
    pub category: EntityCategory,
}

impl Body {
    pub fn creature(value: u32, x: f32, y: f32, radius: f32) -> Self {
        Self {
            value,
            circle: Circle::new(x, y, radius),
            category: EntityCategory::Creature,
        }
    }

    pub fn food(value: u32, x: f32, y: f32, radius: f32) -> Self {
        Self {
            value,
            circle: Circle::new(x, y, radius),
            category: EntityCategory::Food,
        }
    }
}

/// A creature overlapping another body this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionEvent {
    pub value: u32,
    pub other: u32,
    /// Translation that moves `value` half the overlap away from `other`.
    /// Only set when both bodies are creatures.
    pub separation: Option<(f32, f32)>,
}

/// Rebuilds `index` for a new tick: creatures first, then food.
pub fn rebuild_index<I>(index: &mut I, bodies: &[Body]) -> QuadtrieResult<()>
where
    I: SpatialIndex + ?Sized,
{
    index.reset();
    for category in [EntityCategory::Creature, EntityCategory::Food] {
        for body in bodies.iter().filter(|body| body.category == category) {
            index.insert_entity(body.value, body.circle.position(), category)?;
        }
    }
    Ok(())
}

/// Appends everything strictly inside the square of `half_extent` around `center`.
pub fn neighbours<I>(index: &I, center: Point, half_extent: f32, out: &mut Vec<u32>)
where
    I: SpatialIndex + ?Sized,
{
    index.query_box(&Aabb::around(center, half_extent), out);
}

/// Every creature/body overlap, found by querying the index around each
/// creature. Bodies no larger than `max_object_radius` are never missed.
pub fn find_collisions<I>(index: &I, bodies: &[Body], max_object_radius: f32) -> Vec<CollisionEvent>
where
    I: SpatialIndex + ?Sized,
{
    let by_value: FxHashMap<u32, &Body> = bodies.iter().map(|body| (body.value, body)).collect();
    let reach = 2.0 * max_object_radius;
    let mut events = Vec::new();
    let mut candidates = Vec::new();

    for body in bodies
        .iter()
        .filter(|body| body.category == EntityCategory::Creature)
    {
        candidates.clear();
        neighbours(index, body.circle.position(), reach, &mut candidates);
        for &other_value in &candidates {
            if other_value == body.value {
                continue;
            }
            let Some(other) = by_value.get(&other_value) else {
                log::trace!("index returned unknown entity {}", other_value);
                continue;
            };
            if let Some(event) = collide(body, other) {
                events.push(event);
            }
        }
    }

    log::debug!(
        "{} collisions among {} bodies",
        events.len(),
        bodies.len()
    );
    events
}

/// Collision of `body` against `other`, if their circles overlap. Touching
/// circles do not collide.
pub fn collide(body: &Body, other: &Body) -> Option<CollisionEvent> {
    let (normal, depth) = ball_penetration(&body.circle, &other.circle)?;
    let separation = match other.category {
        EntityCategory::Creature => {
            let push = -normal * (depth * 0.5);
            Some((push.x, push.y))
        }
        EntityCategory::Food => None,
    };
    Some(CollisionEvent {
        value: body.value,
        other: other.value,
        separation,
    })
}

/// Contact normal pointing from `a` towards `b`, and the overlap depth.
fn ball_penetration(a: &Circle, b: &Circle) -> Option<(Vector2<f32>, f32)> {
    let pos_a = Isometry2::translation(a.x, a.y);
    let pos_b = Isometry2::translation(b.x, b.y);
    let contact = query::contact(
        &pos_a,
        &Ball::new(a.radius),
        &pos_b,
        &Ball::new(b.radius),
        0.0,
    )
    .ok()??;
    if contact.dist >= 0.0 {
        return None;
    }
    Some((contact.normal1.into_inner(), -contact.dist))
}
