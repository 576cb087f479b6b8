use std::cell::Cell;
use std::collections::HashSet;

use quickcheck::Arbitrary;
use reselect::{equal, to_key, DefaultMemoize, MapMemoize, Selector, Stats};

#[derive(Debug, Clone, Copy)]
struct Point {
    x: u8,
    y: u8,
}

#[derive(Debug, Clone)]
enum Op {
    Select(u8, u8),
    Clear,
}

impl Arbitrary for Op {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        // Small coordinates so that bundles repeat often.
        match g.choose(&[0, 0, 0, 0, 1]) {
            Some(0) => Self::Select(
                *g.choose(&[0, 1, 2, 3]).unwrap_or(&0),
                *g.choose(&[0, 1, 2]).unwrap_or(&0),
            ),
            _ => Self::Clear,
        }
    }
}

fn weigh(&(x, y): &(u8, u8)) -> u32 {
    u32::from(x) * 1000 + u32::from(y)
}

#[quickcheck_macros::quickcheck]
fn test_map_matches_model(ops: Vec<Op>) {
    let calls = Cell::new(0);
    let selector = Selector::new(
        (|p: &Point| p.x, |p: &Point| p.y),
        |args: &(u8, u8)| {
            calls.set(calls.get() + 1);
            weigh(args)
        },
        MapMemoize::new((to_key::<u8>, to_key::<u8>)),
    )
    .unwrap();

    let mut seen = HashSet::new();
    let mut expected = Stats::default();
    for op in ops {
        match op {
            Op::Select(x, y) => {
                assert_eq!(selector.select(&Point { x, y }), weigh(&(x, y)));
                if seen.insert((x, y)) {
                    expected.misses += 1;
                } else {
                    expected.hits += 1;
                }
            }
            Op::Clear => {
                selector.clear();
                seen.clear();
            }
        }
        assert_eq!(selector.len(), seen.len());
    }

    assert_eq!(selector.stats(), expected);
    assert_eq!(calls.get(), expected.misses);
}

#[quickcheck_macros::quickcheck]
fn test_default_matches_model(ops: Vec<Op>) {
    let calls = Cell::new(0);
    let selector = Selector::new(
        (|p: &Point| p.x, |p: &Point| p.y),
        |args: &(u8, u8)| {
            calls.set(calls.get() + 1);
            weigh(args)
        },
        DefaultMemoize::new((equal::<u8>, equal::<u8>)),
    )
    .unwrap();

    let mut last = None;
    let mut expected = Stats::default();
    for op in ops {
        match op {
            Op::Select(x, y) => {
                assert_eq!(selector.select(&Point { x, y }), weigh(&(x, y)));
                if last == Some((x, y)) {
                    expected.hits += 1;
                } else {
                    expected.misses += 1;
                }
                last = Some((x, y));
            }
            Op::Clear => {
                selector.clear();
                last = None;
            }
        }
        assert_eq!(selector.len(), usize::from(last.is_some()));
    }

    assert_eq!(selector.stats(), expected);
    assert_eq!(calls.get(), expected.misses);
}

#[quickcheck_macros::quickcheck]
fn test_map_never_recomputes_more_than_default(points: Vec<(u8, u8)>) -> bool {
    let narrow = Selector::new(
        (|p: &Point| p.x, |p: &Point| p.y),
        weigh,
        DefaultMemoize::new((equal::<u8>, equal::<u8>)),
    )
    .unwrap();
    let wide = Selector::new(
        (|p: &Point| p.x, |p: &Point| p.y),
        weigh,
        MapMemoize::new((to_key::<u8>, to_key::<u8>)),
    )
    .unwrap();

    for &(x, y) in &points {
        let point = Point { x, y };
        if narrow.select(&point) != wide.select(&point) {
            return false;
        }
    }

    wide.stats().misses <= narrow.stats().misses
}
