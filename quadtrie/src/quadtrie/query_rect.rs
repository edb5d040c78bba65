use super::*;
use common::shapes::Aabb;

impl MortonTree {
    /// Appends every entity strictly inside the box to `out`. `out` is not
    /// cleared and result order is unspecified.
    pub fn query(&self, begin: Point, end: Point, out: &mut Vec<u32>) {
        self.query_with(begin, end, |value| out.push(value));
    }

    pub fn query_box(&self, aabb: &Aabb, out: &mut Vec<u32>) {
        self.query(aabb.begin, aabb.end, out);
    }

    pub fn query_batch(&self, boxes: &[Aabb]) -> Vec<Vec<u32>> {
        boxes
            .iter()
            .map(|aabb| {
                let mut found = Vec::new();
                self.query_box(aabb, &mut found);
                found
            })
            .collect()
    }

    /// Walks the trie once, comparing each child's quadrant bits with the
    /// matching bit pair of the box corners' keys.
    ///
    /// While a bound is undecided the node's prefix on that axis equals the
    /// corner's prefix, so one bit comparison per child either rejects the
    /// child, proves the bound for its whole subtree, or leaves it undecided.
    /// Subtrees with every bound proven are collected without any tests;
    /// remaining leaves get the exact open-box test on their stored position.
    pub fn query_with<F>(&self, begin: Point, end: Point, mut f: F)
    where
        F: FnMut(u32),
    {
        let query = Aabb::new(begin, end);
        if query.is_empty() || self.entity_count == 0 {
            return;
        }
        let mut stack = QueryStack::new();
        stack.push(QueryFrame {
            node: 0,
            flags: FLAGS_ALL,
            begin: morton::quadrant_key(morton::encode(begin, self.half_extent)),
            end: morton::quadrant_key(morton::encode(end, self.half_extent)),
        });

        while let Some(frame) = stack.pop() {
            let node = &self.nodes[frame.node as usize];
            if node.is_leaf() {
                self.visit_leaf(node, &query, frame.flags, &mut f);
                continue;
            }

            if frame.flags == 0 {
                for &child in node.children.iter() {
                    if child != NO_CHILD {
                        stack.push(QueryFrame {
                            node: child,
                            flags: 0,
                            begin: 0,
                            end: 0,
                        });
                    }
                }
                continue;
            }

            let begin_quadrant = morton::quadrant(frame.begin);
            let end_quadrant = morton::quadrant(frame.end);
            for (quadrant, &child) in node.children.iter().enumerate() {
                if child == NO_CHILD {
                    continue;
                }
                if let Some(flags) = child_flags(quadrant, frame.flags, begin_quadrant, end_quadrant)
                {
                    stack.push(QueryFrame {
                        node: child,
                        flags,
                        begin: frame.begin << 2,
                        end: frame.end << 2,
                    });
                }
            }
        }
    }

    #[inline(always)]
    fn visit_leaf<F>(&self, node: &Node, query: &Aabb, flags: u8, f: &mut F)
    where
        F: FnMut(u32),
    {
        if flags == 0 || query.strictly_contains(&node.position) {
            f(node.value);
        }
        let mut link = node.overflow;
        while link != NO_OVERFLOW {
            let entry = &self.overflow[link as usize];
            if flags == 0 || query.strictly_contains(&entry.position) {
                f(entry.value);
            }
            link = entry.next;
        }
    }
}

/// Undecided bounds left for the child in `quadrant`, or `None` when the child
/// lies wholly outside the box on some axis.
#[inline(always)]
fn child_flags(quadrant: usize, flags: u8, begin_quadrant: usize, end_quadrant: usize) -> Option<u8> {
    let mut flags = flags;
    let (x, y) = (quadrant & 1, quadrant >> 1);

    if flags & FLAG_LEFT != 0 {
        let bound = begin_quadrant & 1;
        if x < bound {
            return None;
        }
        if x > bound {
            flags &= !FLAG_LEFT;
        }
    }
    if flags & FLAG_RIGHT != 0 {
        let bound = end_quadrant & 1;
        if x > bound {
            return None;
        }
        if x < bound {
            flags &= !FLAG_RIGHT;
        }
    }
    if flags & FLAG_BOTTOM != 0 {
        let bound = begin_quadrant >> 1;
        if y < bound {
            return None;
        }
        if y > bound {
            flags &= !FLAG_BOTTOM;
        }
    }
    if flags & FLAG_TOP != 0 {
        let bound = end_quadrant >> 1;
        if y > bound {
            return None;
        }
        if y < bound {
            flags &= !FLAG_TOP;
        }
    }
    Some(flags)
}

#[cfg(test)]
mod tests {
    use super::child_flags;
    use super::{FLAGS_ALL, FLAG_BOTTOM, FLAG_LEFT, FLAG_RIGHT, FLAG_TOP};

    #[test]
    fn child_flags_rejects_quadrants_left_of_begin() {
        // Begin in the right half: left-half children cannot match.
        assert_eq!(child_flags(0, FLAGS_ALL, 0b01, 0b11), None);
        assert_eq!(child_flags(2, FLAGS_ALL, 0b01, 0b11), None);
    }

    #[test]
    fn child_flags_proves_bounds_strictly_inside() {
        // Begin in quadrant 0, end in quadrant 3: quadrant 3 clears both low
        // bounds, quadrant 0 clears both high bounds.
        assert_eq!(child_flags(3, FLAGS_ALL, 0, 3), Some(FLAG_RIGHT | FLAG_TOP));
        assert_eq!(child_flags(0, FLAGS_ALL, 0, 3), Some(FLAG_LEFT | FLAG_BOTTOM));
        assert_eq!(child_flags(1, FLAGS_ALL, 0, 3), Some(FLAG_RIGHT | FLAG_BOTTOM));
    }

    #[test]
    fn child_flags_keeps_cleared_bounds_cleared() {
        assert_eq!(child_flags(0, 0, 3, 0), Some(0));
    }

    #[test]
    fn child_flags_same_quadrant_corners_stay_undecided() {
        assert_eq!(child_flags(2, FLAGS_ALL, 2, 2), Some(FLAGS_ALL));
        assert_eq!(child_flags(0, FLAGS_ALL, 2, 2), None);
    }
}
