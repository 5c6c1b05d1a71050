//! Exhaustive check of the list-reorder variant over all 720 orders.

use bomblab::phase::{ListReorder, Phase};

fn permutations(items: &[usize]) -> Vec<Vec<usize>> {
    if items.len() <= 1 {
        return vec![items.to_vec()];
    }
    let mut out = Vec::new();
    for (i, &first) in items.iter().enumerate() {
        let mut rest = items.to_vec();
        rest.remove(i);
        for mut tail in permutations(&rest) {
            tail.insert(0, first);
            out.push(tail);
        }
    }
    out
}

fn accepted_orders(phase: &ListReorder) -> Vec<Vec<usize>> {
    let all = permutations(&[1, 2, 3, 4, 5, 6]);
    assert_eq!(all.len(), 720);

    let mut accepted = Vec::new();
    for order in all {
        let line = order
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        let descending = order
            .windows(2)
            .all(|w| phase.values[w[0] - 1] >= phase.values[w[1] - 1]);
        assert_eq!(phase.check(&line).is_ok(), descending, "{line}");
        if descending {
            accepted.push(order);
        }
    }
    accepted
}

#[test]
fn distinct_values_accept_exactly_one_order() {
    let phase = ListReorder {
        values: [253, 725, 301, 997, 212, 432],
    };
    let accepted = accepted_orders(&phase);
    assert_eq!(accepted, vec![vec![4, 2, 6, 3, 1, 5]]);
    assert_eq!(phase.solve().unwrap(), "4 2 6 3 1 5");
}

#[test]
fn tied_values_accept_every_tie_order() {
    let phase = ListReorder {
        values: [10, 20, 10, 30, 20, 10],
    };
    // 2! orders of the 20s times 3! orders of the 10s.
    assert_eq!(accepted_orders(&phase).len(), 12);
    assert!(phase.check(&phase.solve().unwrap()).is_ok());
}
